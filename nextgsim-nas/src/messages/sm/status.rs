//! 5GSM Status Message (3GPP TS 24.501 Section 8.3.16)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// 5GSM Status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiveGSmStatus {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
}

impl FiveGSmStatus {
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
        }
    }
}

impl NasMessageBody for FiveGSmStatus {
    const MESSAGE_TYPE: MessageType = MessageType::FiveGSmStatus;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.sm_cause.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let sm_cause = Ie5gSmCause::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self { sm_cause })
    }
}
