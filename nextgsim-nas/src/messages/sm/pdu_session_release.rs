//! PDU Session Release Messages (3GPP TS 24.501 Section 8.3.12 - 8.3.15)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values for PDU Session Release Request / Complete optional IEs
pub mod pdu_session_release_request_iei {
    /// 5GSM cause
    pub const SM_CAUSE: u8 = 0x59;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
}

/// IEI values for PDU Session Release Reject optional IEs
pub mod pdu_session_release_reject_iei {
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
}

/// IEI values for PDU Session Release Command optional IEs
pub mod pdu_session_release_command_iei {
    /// Back-off timer value
    pub const BACK_OFF_TIMER_VALUE: u8 = 0x37;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// 5GSM congestion re-attempt indicator
    pub const CONGESTION_RE_ATTEMPT_INDICATOR: u8 = 0x61;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// Access type (Type 1)
    pub const ACCESS_TYPE: u8 = 0xD;
}

/// IEI values for PDU Session Release Complete optional IEs
pub use pdu_session_release_request_iei as pdu_session_release_complete_iei;

// ============================================================================
// PDU Session Release Request
// ============================================================================

/// PDU Session Release Request message (3GPP TS 24.501 Section 8.3.12)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionReleaseRequest {
    /// 5GSM cause
    pub sm_cause: Option<Ie5gSmCause>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionReleaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release request carrying a 5GSM cause
    pub fn with_cause(cause: SmCause) -> Self {
        Self {
            sm_cause: Some(Ie5gSmCause::new(cause)),
            ..Self::default()
        }
    }
}

impl NasMessageBody for PduSessionReleaseRequest {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionReleaseRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_release_request_iei as iei;

        encode_optional(buf, iei::SM_CAUSE, &self.sm_cause)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_release_request_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::SM_CAUSE => msg.sm_cause = Some(NasDecode::nas_decode(r)?),
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Release Reject
// ============================================================================

/// PDU Session Release Reject message (3GPP TS 24.501 Section 8.3.13)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionReleaseReject {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionReleaseReject {
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
            extended_protocol_configuration_options: None,
        }
    }
}

impl NasMessageBody for PduSessionReleaseReject {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionReleaseReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_release_reject_iei as iei;

        self.sm_cause.nas_encode(buf)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_release_reject_iei as iei;

        let mut msg = Self::new(Ie5gSmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Release Command
// ============================================================================

/// PDU Session Release Command message (3GPP TS 24.501 Section 8.3.14)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionReleaseCommand {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
    /// Back-off timer value
    pub back_off_timer_value: Option<IeGprsTimer3>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// 5GSM congestion re-attempt indicator
    pub congestion_re_attempt_indicator: Option<IeCongestionReAttemptIndicator>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// Access type
    pub access_type: Option<IeAccessType>,
}

impl PduSessionReleaseCommand {
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
            back_off_timer_value: None,
            eap_message: None,
            congestion_re_attempt_indicator: None,
            extended_protocol_configuration_options: None,
            access_type: None,
        }
    }
}

impl NasMessageBody for PduSessionReleaseCommand {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionReleaseCommand;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_release_command_iei as iei;

        self.sm_cause.nas_encode(buf)?;
        encode_optional(buf, iei::BACK_OFF_TIMER_VALUE, &self.back_off_timer_value)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(
            buf,
            iei::CONGESTION_RE_ATTEMPT_INDICATOR,
            &self.congestion_re_attempt_indicator,
        )?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(buf, iei::ACCESS_TYPE, &self.access_type)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_release_command_iei as iei;

        let mut msg = Self::new(Ie5gSmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::BACK_OFF_TIMER_VALUE => {
                    msg.back_off_timer_value = Some(NasDecode::nas_decode(r)?)
                }
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::CONGESTION_RE_ATTEMPT_INDICATOR => {
                    msg.congestion_re_attempt_indicator = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::ACCESS_TYPE => msg.access_type = Some(NasDecode::nas_decode(r)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Release Complete
// ============================================================================

/// PDU Session Release Complete message (3GPP TS 24.501 Section 8.3.15)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionReleaseComplete {
    /// 5GSM cause
    pub sm_cause: Option<Ie5gSmCause>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionReleaseComplete {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for PduSessionReleaseComplete {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionReleaseComplete;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_release_complete_iei as iei;

        encode_optional(buf, iei::SM_CAUSE, &self.sm_cause)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_release_complete_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::SM_CAUSE => msg.sm_cause = Some(NasDecode::nas_decode(r)?),
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
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
    use crate::messages::test_util::{decode_body, round_trip};
    use crate::codec::CodecError;

    #[test]
    fn test_release_request() {
        assert!(round_trip(&PduSessionReleaseRequest::new()).is_empty());
        let msg = PduSessionReleaseRequest::with_cause(SmCause::RegularDeactivation);
        assert_eq!(round_trip(&msg), vec![0x59, 0x24]);
    }

    #[test]
    fn test_release_reject() {
        let msg = PduSessionReleaseReject::new(SmCause::InvalidPduSessionIdentity);
        assert_eq!(round_trip(&msg), vec![0x2B]);
    }

    #[test]
    fn test_release_command_access_type() {
        let mut msg = PduSessionReleaseCommand::new(SmCause::ReactivationRequested);
        msg.back_off_timer_value = Some(IeGprsTimer3::new(GprsTimer3Unit::Deactivated, 0));
        msg.access_type = Some(IeAccessType::new(AccessType::ThreeGppAccess));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x27, 0x37, 0x01, 0xE0, 0xD1]);
    }

    #[test]
    fn test_release_command_truncated_cause() {
        let result: Result<PduSessionReleaseCommand, _> = decode_body(&[]);
        assert!(matches!(result, Err(CodecError::Bit(_))));
    }

    #[test]
    fn test_release_complete() {
        let msg = PduSessionReleaseComplete {
            sm_cause: Some(Ie5gSmCause::new(SmCause::RegularDeactivation)),
            ..Default::default()
        };
        assert_eq!(round_trip(&msg), vec![0x59, 0x24]);
    }
}
