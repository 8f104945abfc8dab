//! Authentication Messages (3GPP TS 24.501 Section 8.2.1 - 8.2.5)
//!
//! - Authentication Request (network to UE)
//! - Authentication Response (UE to network)
//! - Authentication Result (network to UE)
//! - Authentication Failure (UE to network)
//! - Authentication Reject (network to UE)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI values for Authentication messages
// ============================================================================

/// IEI values for Authentication Request optional IEs
pub mod authentication_request_iei {
    /// Authentication parameter RAND (5G authentication challenge)
    pub const RAND: u8 = 0x21;
    /// Authentication parameter AUTN (5G authentication challenge)
    pub const AUTN: u8 = 0x20;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
}

/// IEI values for Authentication Response optional IEs
pub mod authentication_response_iei {
    /// Authentication response parameter (RES*)
    pub const RESPONSE_PARAMETER: u8 = 0x2D;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
}

/// IEI values for Authentication Reject optional IEs
pub mod authentication_reject_iei {
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
}

/// IEI values for Authentication Failure optional IEs
pub mod authentication_failure_iei {
    /// Authentication failure parameter (AUTS)
    pub const FAILURE_PARAMETER: u8 = 0x30;
}

/// IEI values for Authentication Result optional IEs
pub mod authentication_result_iei {
    /// ABBA
    pub const ABBA: u8 = 0x38;
}

// ============================================================================
// Authentication Request
// ============================================================================

/// Authentication Request message (3GPP TS 24.501 Section 8.2.1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    /// ngKSI (mandatory, low half octet after a spare)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// ABBA (mandatory, LV)
    pub abba: IeAbba,
    /// Authentication parameter RAND
    pub rand: Option<IeAuthenticationParameterRand>,
    /// Authentication parameter AUTN
    pub autn: Option<IeAuthenticationParameterAutn>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
}

impl AuthenticationRequest {
    /// Create an Authentication Request with the mandatory IEs only
    pub fn new(ng_ksi: IeNasKeySetIdentifier, abba: IeAbba) -> Self {
        Self {
            ng_ksi,
            abba,
            rand: None,
            autn: None,
            eap_message: None,
        }
    }

    /// Create a 5G AKA challenge carrying RAND and AUTN
    pub fn with_challenge(
        ng_ksi: IeNasKeySetIdentifier,
        abba: IeAbba,
        rand: [u8; 16],
        autn: [u8; 16],
    ) -> Self {
        Self {
            rand: Some(IeAuthenticationParameterRand::from_bytes(rand)),
            autn: Some(IeAuthenticationParameterAutn::new(autn)),
            ..Self::new(ng_ksi, abba)
        }
    }
}

impl NasMessageBody for AuthenticationRequest {
    const MESSAGE_TYPE: MessageType = MessageType::AuthenticationRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use authentication_request_iei as iei;

        encode_spare_half_octet(buf);
        self.ng_ksi.nas_encode(buf)?;
        self.abba.nas_encode(buf)?;
        encode_optional(buf, iei::RAND, &self.rand)?;
        encode_optional(buf, iei::AUTN, &self.autn)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use authentication_request_iei as iei;

        decode_spare_half_octet(buf)?;
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let abba = IeAbba::nas_decode(buf)?;
        let mut msg = Self::new(ng_ksi, abba);

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::RAND => msg.rand = Some(NasDecode::nas_decode(r)?),
                iei::AUTN => msg.autn = Some(NasDecode::nas_decode(r)?),
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Authentication Response
// ============================================================================

/// Authentication Response message (3GPP TS 24.501 Section 8.2.2)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthenticationResponse {
    /// Authentication response parameter (RES*)
    pub response_parameter: Option<IeAuthenticationResponseParameter>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
}

impl AuthenticationResponse {
    /// Create an empty Authentication Response
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a 5G AKA response carrying RES*
    pub fn with_res_star(res_star: [u8; 16]) -> Self {
        Self {
            response_parameter: Some(IeAuthenticationResponseParameter::new(res_star)),
            eap_message: None,
        }
    }
}

impl NasMessageBody for AuthenticationResponse {
    const MESSAGE_TYPE: MessageType = MessageType::AuthenticationResponse;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use authentication_response_iei as iei;

        encode_optional(buf, iei::RESPONSE_PARAMETER, &self.response_parameter)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use authentication_response_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::RESPONSE_PARAMETER => msg.response_parameter = Some(NasDecode::nas_decode(r)?),
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Authentication Reject
// ============================================================================

/// Authentication Reject message (3GPP TS 24.501 Section 8.2.5)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthenticationReject {
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
}

impl AuthenticationReject {
    /// Create an empty Authentication Reject
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for AuthenticationReject {
    const MESSAGE_TYPE: MessageType = MessageType::AuthenticationReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_optional(buf, authentication_reject_iei::EAP_MESSAGE, &self.eap_message)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                authentication_reject_iei::EAP_MESSAGE => {
                    msg.eap_message = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Authentication Failure
// ============================================================================

/// Authentication Failure message (3GPP TS 24.501 Section 8.2.4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationFailure {
    /// 5GMM cause (mandatory)
    pub mm_cause: Ie5gMmCause,
    /// Authentication failure parameter (AUTS), present on synch failure
    pub failure_parameter: Option<IeAuthenticationFailureParameter>,
}

impl AuthenticationFailure {
    /// Create an Authentication Failure with the given cause
    pub fn new(mm_cause: MmCause) -> Self {
        Self {
            mm_cause: Ie5gMmCause::new(mm_cause),
            failure_parameter: None,
        }
    }

    /// Create a synch failure report carrying AUTS
    pub fn synch_failure(auts: [u8; 14]) -> Self {
        Self {
            failure_parameter: Some(IeAuthenticationFailureParameter::new(auts)),
            ..Self::new(MmCause::SynchFailure)
        }
    }
}

impl NasMessageBody for AuthenticationFailure {
    const MESSAGE_TYPE: MessageType = MessageType::AuthenticationFailure;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.mm_cause.nas_encode(buf)?;
        encode_optional(
            buf,
            authentication_failure_iei::FAILURE_PARAMETER,
            &self.failure_parameter,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new(Ie5gMmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                authentication_failure_iei::FAILURE_PARAMETER => {
                    msg.failure_parameter = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Authentication Result
// ============================================================================

/// Authentication Result message (3GPP TS 24.501 Section 8.2.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// ngKSI (mandatory, low half octet after a spare)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// EAP message (mandatory, LV-E)
    pub eap_message: IeEapMessage,
    /// ABBA
    pub abba: Option<IeAbba>,
}

impl AuthenticationResult {
    /// Create an Authentication Result
    pub fn new(ng_ksi: IeNasKeySetIdentifier, eap_message: IeEapMessage) -> Self {
        Self {
            ng_ksi,
            eap_message,
            abba: None,
        }
    }
}

impl NasMessageBody for AuthenticationResult {
    const MESSAGE_TYPE: MessageType = MessageType::AuthenticationResult;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_spare_half_octet(buf);
        self.ng_ksi.nas_encode(buf)?;
        self.eap_message.nas_encode(buf)?;
        encode_optional(buf, authentication_result_iei::ABBA, &self.abba)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        decode_spare_half_octet(buf)?;
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let mut msg = Self::new(ng_ksi, IeEapMessage::nas_decode(buf)?);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                authentication_result_iei::ABBA => msg.abba = Some(NasDecode::nas_decode(r)?),
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
    use crate::codec::CodecError;
    use crate::messages::test_util::{decode_body, encode_body, round_trip};

    const RAND: [u8; 16] = [
        0x16, 0xA9, 0x4E, 0x4C, 0x4F, 0x61, 0x2F, 0x83, 0x4B, 0x0E, 0x2B, 0xE7, 0x2F, 0x6B, 0x2F,
        0x30,
    ];
    const AUTN: [u8; 16] = [
        0x71, 0xB4, 0x5E, 0x61, 0x39, 0x0E, 0x80, 0x00, 0xBE, 0x3B, 0xDA, 0x45, 0x0B, 0x3B, 0xC1,
        0x8D,
    ];

    #[test]
    fn test_authentication_request_5g_aka() {
        let msg = AuthenticationRequest::with_challenge(
            IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 0),
            IeAbba::new(vec![0x00, 0x00]),
            RAND,
            AUTN,
        );
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..4], &[0x00, 0x02, 0x00, 0x00]);
        assert_eq!(encoded[4], authentication_request_iei::RAND);
        assert_eq!(&encoded[5..21], &RAND);
        assert_eq!(&encoded[21..23], &[0x20, 0x10]);
        assert_eq!(encoded.len(), 39);
    }

    #[test]
    fn test_authentication_request_short_abba() {
        let data = [0x00, 0x01, 0x00];
        assert!(matches!(
            decode_body::<AuthenticationRequest>(&data),
            Err(CodecError::LengthOutOfBounds { ie: "ABBA", .. })
        ));
    }

    #[test]
    fn test_authentication_response() {
        let msg = AuthenticationResponse::with_res_star([0xA5; 16]);
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..2], &[0x2D, 0x10]);
        assert_eq!(encoded.len(), 18);
    }

    #[test]
    fn test_authentication_reject_with_eap() {
        let mut msg = AuthenticationReject::new();
        msg.eap_message = Some(IeEapMessage::new(vec![0x04, 0x02, 0x00, 0x04]));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x78, 0x00, 0x04, 0x04, 0x02, 0x00, 0x04]);
        assert!(encode_body(&AuthenticationReject::new()).is_empty());
    }

    #[test]
    fn test_authentication_failure_synch() {
        let msg = AuthenticationFailure::synch_failure([0x11; 14]);
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..3], &[0x15, 0x30, 0x0E]);
    }

    #[test]
    fn test_authentication_failure_mac() {
        let msg = AuthenticationFailure::new(MmCause::MacFailure);
        assert_eq!(round_trip(&msg), vec![0x14]);
    }

    #[test]
    fn test_authentication_result() {
        let mut msg = AuthenticationResult::new(
            IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 1),
            IeEapMessage::new(vec![0x03, 0x01, 0x00, 0x04]),
        );
        msg.abba = Some(IeAbba::new(vec![0x00, 0x00]));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..7], &[0x01, 0x00, 0x04, 0x03, 0x01, 0x00, 0x04]);
        assert_eq!(&encoded[7..], &[0x38, 0x02, 0x00, 0x00]);
    }
}
