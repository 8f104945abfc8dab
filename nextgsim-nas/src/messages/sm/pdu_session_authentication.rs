//! PDU Session Authentication Messages (3GPP TS 24.501 Section 8.3.4 - 8.3.6)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values shared by the PDU Session Authentication messages
pub mod pdu_session_authentication_iei {
    /// EAP message (optional only in the Result)
    pub const EAP_MESSAGE: u8 = 0x78;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
}

use pdu_session_authentication_iei as iei;

/// PDU Session Authentication Command message (3GPP TS 24.501 Section 8.3.4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionAuthenticationCommand {
    /// EAP message (mandatory, LV-E)
    pub eap_message: IeEapMessage,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionAuthenticationCommand {
    pub fn new(eap_message: IeEapMessage) -> Self {
        Self {
            eap_message,
            extended_protocol_configuration_options: None,
        }
    }
}

impl NasMessageBody for PduSessionAuthenticationCommand {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionAuthenticationCommand;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.eap_message.nas_encode(buf)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new(IeEapMessage::nas_decode(buf)?);
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

/// PDU Session Authentication Complete message (3GPP TS 24.501 Section 8.3.5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionAuthenticationComplete {
    /// EAP message (mandatory, LV-E)
    pub eap_message: IeEapMessage,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionAuthenticationComplete {
    pub fn new(eap_message: IeEapMessage) -> Self {
        Self {
            eap_message,
            extended_protocol_configuration_options: None,
        }
    }
}

impl NasMessageBody for PduSessionAuthenticationComplete {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionAuthenticationComplete;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.eap_message.nas_encode(buf)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new(IeEapMessage::nas_decode(buf)?);
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

/// PDU Session Authentication Result message (3GPP TS 24.501 Section 8.3.6)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionAuthenticationResult {
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionAuthenticationResult {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for PduSessionAuthenticationResult {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionAuthenticationResult;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
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
    use crate::messages::test_util::round_trip;

    /// EAP-Request/Identity
    const EAP_REQUEST: [u8; 5] = [0x01, 0x01, 0x00, 0x05, 0x01];

    #[test]
    fn test_authentication_command() {
        let msg = PduSessionAuthenticationCommand::new(IeEapMessage::new(EAP_REQUEST.to_vec()));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x00, 0x05, 0x01, 0x01, 0x00, 0x05, 0x01]);
    }

    #[test]
    fn test_authentication_complete_with_epco() {
        let mut msg = PduSessionAuthenticationComplete::new(IeEapMessage::new(vec![
            0x02, 0x01, 0x00, 0x04,
        ]));
        msg.extended_protocol_configuration_options =
            Some(IeExtendedProtocolConfigurationOptions::new(vec![0x80]));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[6..], &[0x7B, 0x00, 0x01, 0x80]);
    }

    #[test]
    fn test_authentication_result() {
        assert!(round_trip(&PduSessionAuthenticationResult::new()).is_empty());

        let msg = PduSessionAuthenticationResult {
            eap_message: Some(IeEapMessage::new(vec![0x03, 0x01, 0x00, 0x04])),
            ..Default::default()
        };
        assert_eq!(round_trip(&msg), vec![0x78, 0x00, 0x04, 0x03, 0x01, 0x00, 0x04]);
    }
}
