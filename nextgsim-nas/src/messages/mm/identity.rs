//! Identity Messages (3GPP TS 24.501 Section 8.2.21, 8.2.22)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// Identity Request message (3GPP TS 24.501 Section 8.2.21)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRequest {
    /// Identity type (mandatory, low half octet after a spare)
    pub identity_type: Ie5gsIdentityType,
}

impl IdentityRequest {
    pub fn new(identity_type: IdentityType) -> Self {
        Self {
            identity_type: Ie5gsIdentityType::new(identity_type),
        }
    }
}

impl NasMessageBody for IdentityRequest {
    const MESSAGE_TYPE: MessageType = MessageType::IdentityRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_spare_half_octet(buf);
        self.identity_type.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        decode_spare_half_octet(buf)?;
        let identity_type = Ie5gsIdentityType::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self { identity_type })
    }
}

/// Identity Response message (3GPP TS 24.501 Section 8.2.22)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityResponse {
    /// Mobile identity (mandatory)
    pub mobile_identity: Ie5gsMobileIdentity,
}

impl IdentityResponse {
    pub fn new(mobile_identity: Ie5gsMobileIdentity) -> Self {
        Self { mobile_identity }
    }
}

impl NasMessageBody for IdentityResponse {
    const MESSAGE_TYPE: MessageType = MessageType::IdentityResponse;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.mobile_identity.nas_encode(buf)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mobile_identity = Ie5gsMobileIdentity::nas_decode(buf)?;
        decode_optional_ies(buf, config, Self::name(), |_, _| Ok(false))?;
        Ok(Self::new(mobile_identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::round_trip;

    #[test]
    fn test_identity_request() {
        let msg = IdentityRequest::new(IdentityType::Suci);
        assert_eq!(round_trip(&msg), vec![0x01]);
        assert_eq!(round_trip(&IdentityRequest::new(IdentityType::ImeiSv)), vec![0x05]);
    }

    #[test]
    fn test_identity_response_imeisv() {
        let msg = IdentityResponse::new(Ie5gsMobileIdentity::ImeiSv(
            BcdIdentity::from_str_digits("4370816125816151").unwrap(),
        ));
        let encoded = round_trip(&msg);
        assert_eq!(
            encoded,
            vec![0x00, 0x09, 0x45, 0x73, 0x80, 0x61, 0x21, 0x85, 0x61, 0x51, 0xF1]
        );
        assert_eq!(msg.mobile_identity.imeisv().unwrap().to_string(), "4370816125816151");
    }
}
