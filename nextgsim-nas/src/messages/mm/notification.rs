//! Notification Messages (3GPP TS 24.501 Section 8.2.23, 8.2.24)
//!
//! - Notification (network to UE), paging over non-3GPP access
//! - Notification Response (UE to network)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values for Notification Response optional IEs
pub mod notification_response_iei {
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
}

/// Notification message (3GPP TS 24.501 Section 8.2.23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Access type (mandatory, low half octet after a spare)
    pub access_type: IeAccessType,
}

impl Notification {
    /// Create a new Notification for the given access
    pub fn new(access_type: AccessType) -> Self {
        Self {
            access_type: IeAccessType::new(access_type),
        }
    }
}

impl NasMessageBody for Notification {
    const MESSAGE_TYPE: MessageType = MessageType::Notification;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_spare_half_octet(buf);
        self.access_type.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        decode_spare_half_octet(buf)?;
        let access_type = IeAccessType::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self { access_type })
    }
}

/// Notification Response message (3GPP TS 24.501 Section 8.2.24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationResponse {
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
}

impl NotificationResponse {
    /// Create an empty Notification Response
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for NotificationResponse {
    const MESSAGE_TYPE: MessageType = MessageType::NotificationResponse;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_optional(
            buf,
            notification_response_iei::PDU_SESSION_STATUS,
            &self.pdu_session_status,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                notification_response_iei::PDU_SESSION_STATUS => {
                    msg.pdu_session_status = Some(NasDecode::nas_decode(r)?)
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

    #[test]
    fn test_notification() {
        assert_eq!(round_trip(&Notification::new(AccessType::NonThreeGppAccess)), vec![0x02]);
        assert_eq!(round_trip(&Notification::new(AccessType::ThreeGppAccess)), vec![0x01]);
    }

    #[test]
    fn test_notification_response() {
        let mut status = IePduSessionStatus::default();
        status.set(1, true);
        let msg = NotificationResponse {
            pdu_session_status: Some(status),
        };
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..2], &[0x50, 0x02]);
        assert!(round_trip(&NotificationResponse::new()).is_empty());
    }
}
