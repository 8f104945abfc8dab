//! 5GMM Status Message (3GPP TS 24.501 Section 8.2.29)
//!
//! Sent by either side to report an error condition detected on receipt
//! of a 5GMM message.

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// 5GMM Status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiveGMmStatus {
    /// 5GMM cause (mandatory)
    pub mm_cause: Ie5gMmCause,
}

impl FiveGMmStatus {
    /// Create a new 5GMM Status message
    pub fn new(mm_cause: MmCause) -> Self {
        Self {
            mm_cause: Ie5gMmCause::new(mm_cause),
        }
    }
}

impl NasMessageBody for FiveGMmStatus {
    const MESSAGE_TYPE: MessageType = MessageType::FiveGMmStatus;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.mm_cause.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mm_cause = Ie5gMmCause::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self { mm_cause })
    }
}
