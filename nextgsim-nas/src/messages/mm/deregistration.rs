//! Deregistration Messages (3GPP TS 24.501 Section 8.2.12 - 8.2.15)
//!
//! - Deregistration Request (UE originating)
//! - Deregistration Accept (UE originating)
//! - Deregistration Request (UE terminated)
//! - Deregistration Accept (UE terminated)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values for Deregistration Request (UE terminated) optional IEs
pub mod deregistration_request_ue_terminated_iei {
    /// 5GMM cause
    pub const MM_CAUSE: u8 = 0x58;
    /// T3346 value
    pub const T3346_VALUE: u8 = 0x5F;
    /// Rejected NSSAI
    pub const REJECTED_NSSAI: u8 = 0x6D;
    /// CAG information list
    pub const CAG_INFORMATION_LIST: u8 = 0x75;
}

// ============================================================================
// Deregistration Request (UE originating)
// ============================================================================

/// Deregistration Request message, UE originating (3GPP TS 24.501 Section 8.2.12)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeregistrationRequestUeOriginating {
    /// De-registration type (mandatory, low half octet)
    pub deregistration_type: IeDeRegistrationType,
    /// NAS key set identifier (mandatory, high half octet)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// 5GS mobile identity (mandatory)
    pub mobile_identity: Ie5gsMobileIdentity,
}

impl DeregistrationRequestUeOriginating {
    /// Create a new UE originating Deregistration Request
    pub fn new(
        deregistration_type: IeDeRegistrationType,
        ng_ksi: IeNasKeySetIdentifier,
        mobile_identity: Ie5gsMobileIdentity,
    ) -> Self {
        Self {
            deregistration_type,
            ng_ksi,
            mobile_identity,
        }
    }

    /// Whether the UE is switching off
    pub fn is_switch_off(&self) -> bool {
        self.deregistration_type.switch_off == SwitchOff::SwitchOff
    }
}

impl NasMessageBody for DeregistrationRequestUeOriginating {
    const MESSAGE_TYPE: MessageType = MessageType::DeregistrationRequestUeOriginating;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.ng_ksi.nas_encode(buf)?;
        self.deregistration_type.nas_encode(buf)?;
        self.mobile_identity.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let deregistration_type = IeDeRegistrationType::nas_decode(buf)?;
        let mobile_identity = Ie5gsMobileIdentity::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self::new(deregistration_type, ng_ksi, mobile_identity))
    }
}

// ============================================================================
// Deregistration Accept (both directions)
// ============================================================================

empty_message!(
    /// Deregistration Accept message, UE originating (3GPP TS 24.501 Section 8.2.13)
    ///
    /// Carries no IEs beyond the header.
    DeregistrationAcceptUeOriginating,
    DeregistrationAcceptUeOriginating
);

empty_message!(
    /// Deregistration Accept message, UE terminated (3GPP TS 24.501 Section 8.2.15)
    DeregistrationAcceptUeTerminated,
    DeregistrationAcceptUeTerminated
);

// ============================================================================
// Deregistration Request (UE terminated)
// ============================================================================

/// Deregistration Request message, UE terminated (3GPP TS 24.501 Section 8.2.14)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeregistrationRequestUeTerminated {
    /// De-registration type (mandatory, low half octet after a spare)
    pub deregistration_type: IeDeRegistrationType,
    /// 5GMM cause
    pub mm_cause: Option<Ie5gMmCause>,
    /// T3346 value
    pub t3346_value: Option<IeGprsTimer2>,
    /// Rejected NSSAI
    pub rejected_nssai: Option<IeRejectedNssai>,
    /// CAG information list
    pub cag_information_list: Option<IeCagInformationList>,
}

impl DeregistrationRequestUeTerminated {
    /// Create a new UE terminated Deregistration Request
    pub fn new(deregistration_type: IeDeRegistrationType) -> Self {
        Self {
            deregistration_type,
            mm_cause: None,
            t3346_value: None,
            rejected_nssai: None,
            cag_information_list: None,
        }
    }
}

impl NasMessageBody for DeregistrationRequestUeTerminated {
    const MESSAGE_TYPE: MessageType = MessageType::DeregistrationRequestUeTerminated;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use deregistration_request_ue_terminated_iei as iei;

        encode_spare_half_octet(buf);
        self.deregistration_type.nas_encode(buf)?;
        encode_optional(buf, iei::MM_CAUSE, &self.mm_cause)?;
        encode_optional(buf, iei::T3346_VALUE, &self.t3346_value)?;
        encode_optional(buf, iei::REJECTED_NSSAI, &self.rejected_nssai)?;
        encode_optional(buf, iei::CAG_INFORMATION_LIST, &self.cag_information_list)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use deregistration_request_ue_terminated_iei as iei;

        decode_spare_half_octet(buf)?;
        let mut msg = Self::new(IeDeRegistrationType::nas_decode(buf)?);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::MM_CAUSE => msg.mm_cause = Some(NasDecode::nas_decode(r)?),
                iei::T3346_VALUE => msg.t3346_value = Some(NasDecode::nas_decode(r)?),
                iei::REJECTED_NSSAI => msg.rejected_nssai = Some(NasDecode::nas_decode(r)?),
                iei::CAG_INFORMATION_LIST => {
                    msg.cag_information_list = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::{decode_body, encode_body, round_trip};

    #[test]
    fn test_deregistration_request_ue_originating() {
        let msg = DeregistrationRequestUeOriginating::new(
            IeDeRegistrationType::new(
                SwitchOff::SwitchOff,
                ReRegistrationRequired::NotRequired,
                DeRegistrationAccessType::ThreeGppAccess,
            ),
            IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 0),
            Ie5gsMobileIdentity::Guti(Guti::new(Plmn::new(1, 1, false), 0xCA, 0x3F8, 0, 1)),
        );
        let encoded = round_trip(&msg);
        assert_eq!(encoded[0], 0x09);
        assert_eq!(&encoded[1..3], &[0x00, 0x0B]);
        assert!(msg.is_switch_off());
    }

    #[test]
    fn test_deregistration_accept_is_empty() {
        assert!(encode_body(&DeregistrationAcceptUeOriginating::new()).is_empty());
        assert!(encode_body(&DeregistrationAcceptUeTerminated::new()).is_empty());
        assert_eq!(
            decode_body::<DeregistrationAcceptUeTerminated>(&[]).unwrap(),
            DeregistrationAcceptUeTerminated
        );
    }

    #[test]
    fn test_deregistration_request_ue_terminated() {
        let mut msg = DeregistrationRequestUeTerminated::new(IeDeRegistrationType::new(
            SwitchOff::NormalDeRegistration,
            ReRegistrationRequired::Required,
            DeRegistrationAccessType::ThreeGppAndNonThreeGppAccess,
        ));
        msg.mm_cause = Some(Ie5gMmCause::new(MmCause::ImplicitlyDeregistered));
        msg.t3346_value = Some(IeGprsTimer2::new(0x05));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x07, 0x58, 0x0A, 0x5F, 0x01, 0x05]);
    }
}
