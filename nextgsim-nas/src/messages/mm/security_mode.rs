//! Security Mode Messages (3GPP TS 24.501 Section 8.2.25 - 8.2.27)
//!
//! - Security Mode Command (network to UE)
//! - Security Mode Complete (UE to network)
//! - Security Mode Reject (UE to network)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values for Security Mode Command optional IEs
pub mod security_mode_command_iei {
    /// IMEISV request
    pub const IMEISV_REQUEST: u8 = 0xE;
    /// Selected EPS NAS security algorithms
    pub const SELECTED_EPS_NAS_SECURITY_ALGORITHMS: u8 = 0x57;
    /// Additional 5G security information
    pub const ADDITIONAL_5G_SECURITY_INFORMATION: u8 = 0x36;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// ABBA
    pub const ABBA: u8 = 0x38;
    /// Replayed S1 UE security capabilities
    pub const REPLAYED_S1_UE_SECURITY_CAPABILITIES: u8 = 0x19;
}

/// IEI values for Security Mode Complete optional IEs
pub mod security_mode_complete_iei {
    /// IMEISV
    pub const IMEISV: u8 = 0x77;
    /// NAS message container
    pub const NAS_MESSAGE_CONTAINER: u8 = 0x71;
    /// Non-IMEISV PEI
    pub const NON_IMEISV_PEI: u8 = 0x78;
}

// ============================================================================
// Security Mode Command
// ============================================================================

/// Security Mode Command message (3GPP TS 24.501 Section 8.2.25)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityModeCommand {
    /// Selected NAS security algorithms (mandatory)
    pub selected_nas_security_algorithms: IeNasSecurityAlgorithms,
    /// ngKSI (mandatory, low half octet after a spare)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// Replayed UE security capabilities (mandatory, LV)
    pub replayed_ue_security_capabilities: IeUeSecurityCapability,
    /// IMEISV request
    pub imeisv_request: Option<IeImeiSvRequest>,
    /// Selected EPS NAS security algorithms
    pub selected_eps_nas_security_algorithms: Option<IeEpsNasSecurityAlgorithms>,
    /// Additional 5G security information
    pub additional_5g_security_information: Option<IeAdditional5gSecurityInformation>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// ABBA
    pub abba: Option<IeAbba>,
    /// Replayed S1 UE security capabilities
    pub replayed_s1_ue_security_capabilities: Option<IeS1UeSecurityCapability>,
}

impl SecurityModeCommand {
    /// Create a Security Mode Command with the mandatory IEs only
    pub fn new(
        selected_nas_security_algorithms: IeNasSecurityAlgorithms,
        ng_ksi: IeNasKeySetIdentifier,
        replayed_ue_security_capabilities: IeUeSecurityCapability,
    ) -> Self {
        Self {
            selected_nas_security_algorithms,
            ng_ksi,
            replayed_ue_security_capabilities,
            imeisv_request: None,
            selected_eps_nas_security_algorithms: None,
            additional_5g_security_information: None,
            eap_message: None,
            abba: None,
            replayed_s1_ue_security_capabilities: None,
        }
    }

    /// Whether the network asks for the IMEISV in the Security Mode Complete
    pub fn imeisv_requested(&self) -> bool {
        self.imeisv_request
            .is_some_and(|ie| ie.value == ImeiSvRequest::Requested)
    }
}

impl NasMessageBody for SecurityModeCommand {
    const MESSAGE_TYPE: MessageType = MessageType::SecurityModeCommand;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use security_mode_command_iei as iei;

        self.selected_nas_security_algorithms.nas_encode(buf)?;
        encode_spare_half_octet(buf);
        self.ng_ksi.nas_encode(buf)?;
        self.replayed_ue_security_capabilities.nas_encode(buf)?;
        encode_optional(buf, iei::IMEISV_REQUEST, &self.imeisv_request)?;
        encode_optional(
            buf,
            iei::SELECTED_EPS_NAS_SECURITY_ALGORITHMS,
            &self.selected_eps_nas_security_algorithms,
        )?;
        encode_optional(
            buf,
            iei::ADDITIONAL_5G_SECURITY_INFORMATION,
            &self.additional_5g_security_information,
        )?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(buf, iei::ABBA, &self.abba)?;
        encode_optional(
            buf,
            iei::REPLAYED_S1_UE_SECURITY_CAPABILITIES,
            &self.replayed_s1_ue_security_capabilities,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use security_mode_command_iei as iei;

        let algorithms = IeNasSecurityAlgorithms::nas_decode(buf)?;
        decode_spare_half_octet(buf)?;
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let replayed = IeUeSecurityCapability::nas_decode(buf)?;
        let mut msg = Self::new(algorithms, ng_ksi, replayed);

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::IMEISV_REQUEST => msg.imeisv_request = Some(NasDecode::nas_decode(r)?),
                iei::SELECTED_EPS_NAS_SECURITY_ALGORITHMS => {
                    msg.selected_eps_nas_security_algorithms = Some(NasDecode::nas_decode(r)?)
                }
                iei::ADDITIONAL_5G_SECURITY_INFORMATION => {
                    msg.additional_5g_security_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::ABBA => msg.abba = Some(NasDecode::nas_decode(r)?),
                iei::REPLAYED_S1_UE_SECURITY_CAPABILITIES => {
                    msg.replayed_s1_ue_security_capabilities = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Security Mode Complete
// ============================================================================

/// Security Mode Complete message (3GPP TS 24.501 Section 8.2.26)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityModeComplete {
    /// IMEISV
    pub imeisv: Option<Ie5gsMobileIdentity>,
    /// NAS message container, holding the initial NAS message
    pub nas_message_container: Option<IeNasMessageContainer>,
    /// Non-IMEISV PEI
    pub non_imeisv_pei: Option<Ie5gsMobileIdentity>,
}

impl SecurityModeComplete {
    /// Create an empty Security Mode Complete
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for SecurityModeComplete {
    const MESSAGE_TYPE: MessageType = MessageType::SecurityModeComplete;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use security_mode_complete_iei as iei;

        encode_optional(buf, iei::IMEISV, &self.imeisv)?;
        encode_optional(buf, iei::NAS_MESSAGE_CONTAINER, &self.nas_message_container)?;
        encode_optional(buf, iei::NON_IMEISV_PEI, &self.non_imeisv_pei)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use security_mode_complete_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::IMEISV => msg.imeisv = Some(NasDecode::nas_decode(r)?),
                iei::NAS_MESSAGE_CONTAINER => {
                    msg.nas_message_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::NON_IMEISV_PEI => msg.non_imeisv_pei = Some(NasDecode::nas_decode(r)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Security Mode Reject
// ============================================================================

/// Security Mode Reject message (3GPP TS 24.501 Section 8.2.27)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityModeReject {
    /// 5GMM cause (mandatory)
    pub mm_cause: Ie5gMmCause,
}

impl SecurityModeReject {
    pub fn new(mm_cause: MmCause) -> Self {
        Self {
            mm_cause: Ie5gMmCause::new(mm_cause),
        }
    }
}

impl NasMessageBody for SecurityModeReject {
    const MESSAGE_TYPE: MessageType = MessageType::SecurityModeReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.mm_cause.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mm_cause = Ie5gMmCause::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self { mm_cause })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::round_trip;

    fn command() -> SecurityModeCommand {
        SecurityModeCommand::new(
            IeNasSecurityAlgorithms::new(
                TypeOfIntegrityProtectionAlgorithm::Ia2_128,
                TypeOfCipheringAlgorithm::Ea0,
            ),
            IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 0),
            IeUeSecurityCapability::new(0xF0, 0xF0),
        )
    }

    #[test]
    fn test_security_mode_command_mandatory() {
        let encoded = round_trip(&command());
        assert_eq!(encoded, vec![0x02, 0x00, 0x02, 0xF0, 0xF0]);
    }

    #[test]
    fn test_security_mode_command_imeisv_request() {
        let mut msg = command();
        msg.imeisv_request = Some(IeImeiSvRequest::new(ImeiSvRequest::Requested));
        msg.abba = Some(IeAbba::new(vec![0x00, 0x00]));
        msg.additional_5g_security_information = Some(IeAdditional5gSecurityInformation::default());
        let encoded = round_trip(&msg);
        assert_eq!(encoded[5], 0xE1);
        assert!(msg.imeisv_requested());
        assert!(!command().imeisv_requested());
    }

    #[test]
    fn test_security_mode_complete_with_container() {
        let mut msg = SecurityModeComplete::new();
        msg.imeisv = Some(Ie5gsMobileIdentity::ImeiSv(
            BcdIdentity::from_str_digits("4370816125816151").unwrap(),
        ));
        msg.nas_message_container = Some(IeNasMessageContainer::new(vec![0x7E, 0x00, 0x41, 0x79]));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..3], &[0x77, 0x00, 0x09]);
        assert_eq!(&encoded[12..15], &[0x71, 0x00, 0x04]);
    }

    #[test]
    fn test_security_mode_reject() {
        let msg = SecurityModeReject::new(MmCause::UeSecurityCapMismatch);
        assert_eq!(round_trip(&msg), vec![0x17]);
    }
}
