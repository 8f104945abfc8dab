//! NAS 5G Messages
//!
//! This module contains implementations of 5G NAS messages
//! as defined in 3GPP TS 24.501.
//!
//! ## Message Categories
//!
//! - 5GMM (Mobility Management) messages - [`mm`]
//! - 5GSM (Session Management) messages - [`sm`]
//!
//! Every message is a struct holding its mandatory IEs as plain fields
//! and its optional IEs as `Option`s. Bodies start right after the plain
//! header; headers are handled by [`crate::message::NasMessage`].

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::CodecResult;
use crate::enums::MessageType;

/// Defines a message that carries no IEs beyond its header. Trailing
/// octets are handled as unknown optional IEs.
macro_rules! empty_message {
    ($(#[$meta:meta])* $name:ident, $message_type:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            /// Create the message
            pub fn new() -> Self {
                Self
            }
        }

        impl $crate::messages::NasMessageBody for $name {
            const MESSAGE_TYPE: $crate::enums::MessageType = $crate::enums::MessageType::$message_type;

            fn encode_body(
                &self,
                _buf: &mut nextgsim_common::BitBuffer,
            ) -> $crate::codec::CodecResult<()> {
                Ok(())
            }

            fn decode_body(
                buf: &mut nextgsim_common::BitBufferReader<'_>,
                config: &nextgsim_common::CodecConfig,
            ) -> $crate::codec::CodecResult<Self> {
                let name = <Self as $crate::messages::NasMessageBody>::name();
                $crate::codec::decode_optional_ies(buf, config, name, |_, _| Ok(false))?;
                Ok(Self)
            }
        }
    };
}

pub mod mm;
pub mod sm;

pub use mm::*;
pub use sm::*;

/// Codec for a message body.
///
/// `encode_body` writes the mandatory IEs in order followed by every
/// present optional IE with its IEI. `decode_body` reads the mandatory
/// IEs, then optional IEs until the buffer is exhausted; the
/// configuration decides how unknown IEIs are treated.
pub trait NasMessageBody: Sized {
    /// Message type written in the plain header
    const MESSAGE_TYPE: MessageType;

    /// Encode the body at the current position of `buf`
    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()>;

    /// Decode a body from the current position of `buf`
    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self>;

    /// Message name used in logs and errors
    fn name() -> &'static str {
        Self::MESSAGE_TYPE.name()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    pub fn encode_body<M: NasMessageBody>(msg: &M) -> Vec<u8> {
        let mut buf = BitBuffer::new();
        msg.encode_body(&mut buf).unwrap();
        buf.into_vec()
    }

    pub fn decode_body<M: NasMessageBody>(data: &[u8]) -> CodecResult<M> {
        let mut reader = BitBufferReader::new(data);
        M::decode_body(&mut reader, &CodecConfig::default())
    }

    /// Encodes, decodes and re-encodes `msg`, checking both directions.
    pub fn round_trip<M: NasMessageBody + PartialEq + std::fmt::Debug>(msg: &M) -> Vec<u8> {
        let encoded = encode_body(msg);
        let decoded: M = decode_body(&encoded).unwrap();
        assert_eq!(&decoded, msg);
        assert_eq!(encode_body(&decoded), encoded);
        encoded
    }
}
