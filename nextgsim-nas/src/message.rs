//! Top-level NAS message container and dispatcher
//!
//! A [`NasMessage`] owns one [`NasHeader`] and exactly one message body.
//! The body is a closed sum type over every 5GMM and 5GSM message, so the
//! header's message type always selects a concrete codec.
//!
//! # Example
//!
//! ```rust
//! use nextgsim_nas::message::{DecodeOutcome, NasMessage};
//! use nextgsim_nas::messages::RegistrationComplete;
//!
//! let msg = NasMessage::new(RegistrationComplete::new());
//! let bytes = msg.pack().unwrap();
//! assert_eq!(&bytes[..], &[0x7E, 0x00, 0x43]);
//!
//! match NasMessage::unpack(&bytes).unwrap() {
//!     DecodeOutcome::Decoded(decoded) => assert_eq!(decoded, msg),
//!     DecodeOutcome::Ignored { .. } => unreachable!(),
//! }
//! ```

use bytes::Bytes;
use nextgsim_common::{log_nas_message, BitBuffer, BitBufferReader, CodecConfig, Direction};

use crate::codec::{CodecError, CodecResult, NasDecode, NasEncode};
use crate::enums::{MessageType, SecurityHeaderType};
use crate::header::{NasHeader, OuterHeader, PlainHeader, PlainSmHeader, SecuredHeader};
use crate::ies::IeNasMessageContainer;
use crate::messages::*;

/// Implemented by every message that can be held in a [`NasBody`].
pub trait BodyVariant: NasMessageBody {
    /// Borrows the message if `body` holds this variant
    fn from_body(body: &NasBody) -> Option<&Self>;
}

macro_rules! nas_bodies {
    ($($variant:ident),* $(,)?) => {
        /// Message body, one variant per message type
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum NasBody {
            $(
                #[allow(missing_docs)]
                $variant($variant),
            )*
        }

        impl NasBody {
            /// Message type of the held message
            pub fn message_type(&self) -> MessageType {
                match self {
                    $(Self::$variant(_) => <$variant as NasMessageBody>::MESSAGE_TYPE,)*
                }
            }

            fn encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                match self {
                    $(Self::$variant(m) => m.encode_body(buf),)*
                }
            }

            /// `None` for message types without a codec
            fn decode(
                message_type: MessageType,
                buf: &mut BitBufferReader<'_>,
                config: &CodecConfig,
            ) -> CodecResult<Option<Self>> {
                match message_type {
                    $(
                        MessageType::$variant => {
                            $variant::decode_body(buf, config).map(|m| Some(Self::$variant(m)))
                        }
                    )*
                    _ => Ok(None),
                }
            }
        }

        $(
            impl From<$variant> for NasBody {
                fn from(msg: $variant) -> Self {
                    Self::$variant(msg)
                }
            }

            impl From<$variant> for NasMessage {
                fn from(msg: $variant) -> Self {
                    Self::new(msg)
                }
            }

            impl BodyVariant for $variant {
                fn from_body(body: &NasBody) -> Option<&Self> {
                    match body {
                        NasBody::$variant(m) => Some(m),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

nas_bodies! {
    // 5GMM
    RegistrationRequest,
    RegistrationAccept,
    RegistrationComplete,
    RegistrationReject,
    DeregistrationRequestUeOriginating,
    DeregistrationAcceptUeOriginating,
    DeregistrationRequestUeTerminated,
    DeregistrationAcceptUeTerminated,
    ServiceRequest,
    ServiceReject,
    ServiceAccept,
    ConfigurationUpdateCommand,
    ConfigurationUpdateComplete,
    AuthenticationRequest,
    AuthenticationResponse,
    AuthenticationReject,
    AuthenticationFailure,
    AuthenticationResult,
    IdentityRequest,
    IdentityResponse,
    SecurityModeCommand,
    SecurityModeComplete,
    SecurityModeReject,
    FiveGMmStatus,
    Notification,
    NotificationResponse,
    UlNasTransport,
    DlNasTransport,
    // 5GSM
    PduSessionEstablishmentRequest,
    PduSessionEstablishmentAccept,
    PduSessionEstablishmentReject,
    PduSessionAuthenticationCommand,
    PduSessionAuthenticationComplete,
    PduSessionAuthenticationResult,
    PduSessionModificationRequest,
    PduSessionModificationReject,
    PduSessionModificationCommand,
    PduSessionModificationComplete,
    PduSessionModificationCommandReject,
    PduSessionReleaseRequest,
    PduSessionReleaseReject,
    PduSessionReleaseCommand,
    PduSessionReleaseComplete,
    FiveGSmStatus,
}

/// Result of [`NasMessage::unpack`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Header and body were decoded
    Decoded(NasMessage),
    /// The header was valid but its message type has no codec; the body
    /// was not read
    Ignored {
        /// Decoded header
        header: NasHeader,
    },
}

impl DecodeOutcome {
    /// The decoded message, `None` if it was ignored
    pub fn message(self) -> Option<NasMessage> {
        match self {
            Self::Decoded(msg) => Some(msg),
            Self::Ignored { .. } => None,
        }
    }

    /// Returns true if the message type had no codec
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

/// A complete NAS message: header plus body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NasMessage {
    /// Header, including the security protected header if present
    pub header: NasHeader,
    /// Message body selected by the header's message type
    pub body: NasBody,
}

impl NasMessage {
    /// Plain message. 5GSM messages get PDU session identity and PTI 0,
    /// see [`NasMessage::sm`].
    pub fn new(body: impl Into<NasBody>) -> Self {
        let body = body.into();
        Self {
            header: NasHeader::plain(PlainHeader::for_message_type(body.message_type())),
            body,
        }
    }

    /// Plain 5GSM message for the given PDU session and procedure transaction
    pub fn sm(pdu_session_id: u8, pti: u8, body: impl Into<NasBody>) -> Self {
        let body = body.into();
        Self {
            header: NasHeader::plain(PlainHeader::Sm(PlainSmHeader::new(
                pdu_session_id,
                pti,
                body.message_type(),
            ))),
            body,
        }
    }

    /// Wraps the message in a security protected header. MAC and sequence
    /// number are carried as given; nothing is computed.
    pub fn secured(
        mut self,
        security_header_type: SecurityHeaderType,
        mac: u32,
        sequence_number: u8,
    ) -> Self {
        self.header.security = Some(SecuredHeader::new(security_header_type, mac, sequence_number));
        self
    }

    /// Message type selecting the body
    pub fn message_type(&self) -> MessageType {
        self.body.message_type()
    }

    /// Checked access to the body as message `M`
    pub fn body_as<M: BodyVariant>(&self) -> CodecResult<&M> {
        M::from_body(&self.body).ok_or(CodecError::VariantMismatch {
            expected: M::name(),
            actual: self.body.message_type().name(),
        })
    }

    /// Encodes the message with the default configuration
    pub fn pack(&self) -> CodecResult<Bytes> {
        self.pack_with(&CodecConfig::default())
    }

    /// Encodes header and body into a fresh buffer
    pub fn pack_with(&self, config: &CodecConfig) -> CodecResult<Bytes> {
        self.check_header()?;

        let mut buf = BitBuffer::new();
        self.header.nas_encode(&mut buf)?;
        self.body.encode(&mut buf)?;
        let data = buf.into_vec();

        trace_pdu(config, Direction::Tx, self.message_type(), &data);
        Ok(Bytes::from(data))
    }

    /// Decodes a NAS PDU with the default configuration
    pub fn unpack(data: &[u8]) -> CodecResult<DecodeOutcome> {
        Self::unpack_with(data, &CodecConfig::default())
    }

    /// Decodes a NAS PDU. For security protected messages the payload is
    /// expected in clear text.
    pub fn unpack_with(data: &[u8], config: &CodecConfig) -> CodecResult<DecodeOutcome> {
        let mut buf = BitBufferReader::new(data);
        let header = NasHeader::nas_decode(&mut buf)?;
        let message_type = header.message_type();

        let Some(body) = NasBody::decode(message_type, &mut buf, config)? else {
            tracing::warn!(
                message_type = u8::from(message_type),
                "ignoring NAS message without a codec"
            );
            return Ok(DecodeOutcome::Ignored { header });
        };

        trace_pdu(config, Direction::Rx, message_type, data);
        Ok(DecodeOutcome::Decoded(Self { header, body }))
    }

    /// Decodes the plain NAS message held in a NAS message container
    pub fn from_container(container: &IeNasMessageContainer) -> CodecResult<DecodeOutcome> {
        Self::from_container_with(container, &CodecConfig::default())
    }

    /// Decodes a contained NAS message under the caller's codec
    /// configuration, so the unknown IEI policy reaches nested messages too
    pub fn from_container_with(
        container: &IeNasMessageContainer,
        config: &CodecConfig,
    ) -> CodecResult<DecodeOutcome> {
        Self::unpack_with(&container.value, config)
    }

    /// Packs the message into a NAS message container
    pub fn to_container(&self) -> CodecResult<IeNasMessageContainer> {
        self.to_container_with(&CodecConfig::default())
    }

    /// Packs the message into a NAS message container under `config`
    pub fn to_container_with(&self, config: &CodecConfig) -> CodecResult<IeNasMessageContainer> {
        Ok(IeNasMessageContainer::new(self.pack_with(config)?.to_vec()))
    }

    fn check_header(&self) -> CodecResult<()> {
        let body_type = self.body.message_type();
        if self.header.message_type() != body_type {
            return Err(CodecError::EncodingError(format!(
                "header message type {} does not match body {}",
                self.header.message_type(),
                body_type
            )));
        }
        if self.header.plain.epd() != PlainHeader::for_message_type(body_type).epd() {
            return Err(CodecError::EncodingError(format!(
                "{body_type} cannot be sent with a {:?} header",
                self.header.plain.epd()
            )));
        }
        Ok(())
    }
}

/// Parses only the outer header of a NAS PDU, stopping before the inner
/// plain header of a security protected message.
pub fn unpack_outer_hdr(data: &[u8]) -> CodecResult<OuterHeader> {
    OuterHeader::nas_decode(&mut BitBufferReader::new(data))
}

fn trace_pdu(config: &CodecConfig, direction: Direction, message_type: MessageType, data: &[u8]) {
    if config.hex_dump {
        log_nas_message(direction, message_type.name(), data);
    } else {
        tracing::debug!(
            direction = %direction,
            msg_type = %message_type,
            len = data.len(),
            "NAS message"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ies::*;

    fn decoded(data: &[u8]) -> NasMessage {
        NasMessage::unpack(data).unwrap().message().unwrap()
    }

    #[test]
    fn test_plain_mm_message() {
        let msg = NasMessage::new(RegistrationReject::new(MmCause::IllegalUe));
        let bytes = msg.pack().unwrap();
        assert_eq!(&bytes[..], &[0x7E, 0x00, 0x44, 0x03]);
        assert_eq!(decoded(&bytes), msg);
    }

    #[test]
    fn test_plain_sm_message() {
        let msg = NasMessage::sm(5, 1, PduSessionReleaseReject::new(SmCause::InvalidPduSessionIdentity));
        let bytes = msg.pack().unwrap();
        assert_eq!(&bytes[..], &[0x2E, 0x05, 0x01, 0xD2, 0x2B]);
        assert_eq!(decoded(&bytes), msg);
    }

    #[test]
    fn test_secured_message() {
        let msg = NasMessage::new(ServiceAccept::default()).secured(
            SecurityHeaderType::IntegrityProtectedAndCiphered,
            0x0102_0304,
            7,
        );
        let bytes = msg.pack().unwrap();
        assert_eq!(
            &bytes[..],
            &[0x7E, 0x02, 0x01, 0x02, 0x03, 0x04, 0x07, 0x7E, 0x00, 0x4E]
        );
        let back = decoded(&bytes);
        assert_eq!(back.header.security_header_type(), SecurityHeaderType::IntegrityProtectedAndCiphered);
        assert_eq!(back, msg);
    }

    #[test]
    fn test_unknown_message_type_ignored() {
        let outcome = NasMessage::unpack(&[0x7E, 0x00, 0x50, 0x01, 0x02]).unwrap();
        assert!(outcome.is_ignored());
        match outcome {
            DecodeOutcome::Ignored { header } => {
                assert_eq!(header.message_type(), MessageType::Unknown(0x50))
            }
            DecodeOutcome::Decoded(_) => panic!("expected ignored outcome"),
        }
    }

    #[test]
    fn test_body_as() {
        let msg = NasMessage::new(IdentityRequest::new(IdentityType::Suci));
        assert_eq!(
            msg.body_as::<IdentityRequest>().unwrap().identity_type.value,
            IdentityType::Suci
        );
        assert_eq!(
            msg.body_as::<IdentityResponse>(),
            Err(CodecError::VariantMismatch {
                expected: "Identity response",
                actual: "Identity request",
            })
        );
    }

    #[test]
    fn test_header_body_mismatch_rejected() {
        let mut msg = NasMessage::new(AuthenticationReject::default());
        msg.header.plain.set_message_type(MessageType::AuthenticationResult);
        assert!(matches!(msg.pack(), Err(CodecError::EncodingError(_))));

        let mut msg = NasMessage::new(FiveGSmStatus::new(SmCause::InvalidPduSessionIdentity));
        msg.header.plain = PlainHeader::for_message_type(MessageType::RegistrationComplete);
        msg.header.plain.set_message_type(MessageType::FiveGSmStatus);
        assert!(matches!(msg.pack(), Err(CodecError::EncodingError(_))));
    }

    #[test]
    fn test_unpack_outer_hdr_secured() {
        let outer = unpack_outer_hdr(&[0x7E, 0x01, 0xAA, 0xBB, 0xCC, 0xDD, 0x05, 0x7E, 0x00]).unwrap();
        match outer {
            OuterHeader::Secured(h) => {
                assert_eq!(h.mac, 0xAABB_CCDD);
                assert_eq!(h.sequence_number, 5);
            }
            OuterHeader::Plain(_) => panic!("expected secured header"),
        }
    }

    #[test]
    fn test_unpack_outer_hdr_plain() {
        let outer = unpack_outer_hdr(&[0x2E, 0x01, 0x02, 0xD6]).unwrap();
        assert_eq!(outer.security_header_type(), SecurityHeaderType::NotProtected);
        assert_eq!(outer.size(), PlainSmHeader::SIZE);
    }

    #[test]
    fn test_nas_message_container_recursion() {
        let inner = NasMessage::new(RegistrationComplete::new());
        let container = inner.to_container().unwrap();
        assert_eq!(container.value, vec![0x7E, 0x00, 0x43]);

        let mut smc = SecurityModeComplete::new();
        smc.nas_message_container = Some(container);
        let outer = decoded(&NasMessage::new(smc).pack().unwrap());

        let held = outer.body_as::<SecurityModeComplete>().unwrap();
        let nested = NasMessage::from_container(held.nas_message_container.as_ref().unwrap())
            .unwrap()
            .message()
            .unwrap();
        assert_eq!(nested, inner);
    }

    #[test]
    fn test_unpack_hex_dump_config() {
        let config = CodecConfig {
            hex_dump: true,
            ..CodecConfig::default()
        };
        let msg = NasMessage::new(ConfigurationUpdateComplete::new());
        let bytes = msg.pack_with(&config).unwrap();
        assert_eq!(
            NasMessage::unpack_with(&bytes, &config).unwrap(),
            DecodeOutcome::Decoded(msg)
        );
    }

    #[test]
    fn test_truncated_body_fails() {
        assert!(NasMessage::unpack(&[0x7E, 0x00, 0x44]).is_err());
    }
}
