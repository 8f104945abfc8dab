//! NAS message header structures
//!
//! Implements 5G NAS message headers according to 3GPP TS 24.501
//!
//! # Header Types
//!
//! There are two main header formats:
//! - Plain NAS header (3 bytes for MM, 4 bytes for SM)
//! - Security protected NAS header (7 bytes), always followed by a plain
//!   header of the embedded message
//!
//! ## Plain 5GMM Header (3 bytes)
//! ```text
//! +------------------+------------------+------------------+
//! |       EPD        |  Spare (4 bits)  |   Message Type   |
//! |     (1 byte)     |  Security Header |    (1 byte)      |
//! |                  |  Type (4 bits)   |                  |
//! +------------------+------------------+------------------+
//! ```
//!
//! ## Plain 5GSM Header (4 bytes)
//! ```text
//! +------------------+------------------+------------------+------------------+
//! |       EPD        | PDU Session ID   |       PTI        |   Message Type   |
//! |     (1 byte)     |    (1 byte)      |    (1 byte)      |    (1 byte)      |
//! +------------------+------------------+------------------+------------------+
//! ```
//!
//! ## Security Protected Header (7 bytes)
//! ```text
//! +------------------+------------------+------------------+------------------+
//! |       EPD        |  Security Header |        Message Authentication      |
//! |     (1 byte)     |  Type (1 byte)   |           Code (4 bytes)           |
//! +------------------+------------------+------------------+------------------+
//! |  Sequence Number |                  Plain NAS Message                    |
//! |     (1 byte)     |                      (variable)                       |
//! +------------------+------------------------------------------------------ +
//! ```
//!
//! The codec reads and writes the MAC and sequence number but never
//! computes or verifies them.

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{read_enum, write_enum, CodecError, CodecResult, NasDecode, NasEncode};
use crate::enums::{ExtendedProtocolDiscriminator, MessageType, SecurityHeaderType};

/// Plain 5GMM NAS message header
///
/// Used for unprotected 5G Mobility Management messages.
/// Total size: 3 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainMmHeader {
    /// Message type
    pub message_type: MessageType,
}

impl PlainMmHeader {
    /// Size of the plain MM header in bytes
    pub const SIZE: usize = 3;

    /// Create a new plain MM header
    pub fn new(message_type: MessageType) -> Self {
        Self { message_type }
    }
}

/// Plain 5GSM NAS message header
///
/// Used for 5G Session Management messages.
/// Total size: 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainSmHeader {
    /// PDU Session Identity
    pub pdu_session_id: u8,
    /// Procedure Transaction Identity
    pub pti: u8,
    /// Message type
    pub message_type: MessageType,
}

impl PlainSmHeader {
    /// Size of the plain SM header in bytes
    pub const SIZE: usize = 4;

    /// Create a new plain SM header
    pub fn new(pdu_session_id: u8, pti: u8, message_type: MessageType) -> Self {
        Self {
            pdu_session_id,
            pti,
            message_type,
        }
    }
}

/// Plain header of either protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainHeader {
    /// 5GMM header
    Mm(PlainMmHeader),
    /// 5GSM header
    Sm(PlainSmHeader),
}

impl PlainHeader {
    /// Plain header for `message_type`, with zero PDU session and
    /// procedure transaction identities for 5GSM messages
    pub fn for_message_type(message_type: MessageType) -> Self {
        if message_type.is_sm() {
            Self::Sm(PlainSmHeader::new(0, 0, message_type))
        } else {
            Self::Mm(PlainMmHeader::new(message_type))
        }
    }

    /// Message type carried by the header
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Mm(h) => h.message_type,
            Self::Sm(h) => h.message_type,
        }
    }

    /// Overwrites the message type
    pub fn set_message_type(&mut self, message_type: MessageType) {
        match self {
            Self::Mm(h) => h.message_type = message_type,
            Self::Sm(h) => h.message_type = message_type,
        }
    }

    /// Extended protocol discriminator of the header
    pub fn epd(&self) -> ExtendedProtocolDiscriminator {
        match self {
            Self::Mm(_) => ExtendedProtocolDiscriminator::MobilityManagement,
            Self::Sm(_) => ExtendedProtocolDiscriminator::SessionManagement,
        }
    }

    /// Size of the encoded header in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Mm(_) => PlainMmHeader::SIZE,
            Self::Sm(_) => PlainSmHeader::SIZE,
        }
    }

    /// Reads the part of a plain header following an already consumed
    /// EPD octet.
    fn decode_after_epd(buf: &mut BitBufferReader<'_>, epd: ExtendedProtocolDiscriminator) -> CodecResult<Self> {
        match epd {
            ExtendedProtocolDiscriminator::MobilityManagement => {
                buf.skip(4)?;
                let sht: SecurityHeaderType = read_enum(buf, 4)?;
                if sht != SecurityHeaderType::NotProtected {
                    return Err(CodecError::UnexpectedInnerSecurityHeader(sht.into()));
                }
                Ok(Self::Mm(PlainMmHeader::new(read_enum(buf, 8)?)))
            }
            ExtendedProtocolDiscriminator::SessionManagement => {
                let pdu_session_id = buf.read_bits(8)? as u8;
                let pti = buf.read_bits(8)? as u8;
                Ok(Self::Sm(PlainSmHeader::new(pdu_session_id, pti, read_enum(buf, 8)?)))
            }
            ExtendedProtocolDiscriminator::Unknown(raw) => {
                Err(CodecError::InvalidProtocolDiscriminator(raw))
            }
        }
    }
}

impl NasEncode for PlainHeader {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.epd(), 8)?;
        match self {
            Self::Mm(h) => {
                buf.skip(4);
                write_enum(buf, SecurityHeaderType::NotProtected, 4)?;
                write_enum(buf, h.message_type, 8)
            }
            Self::Sm(h) => {
                buf.write_bits(u32::from(h.pdu_session_id), 8)?;
                buf.write_bits(u32::from(h.pti), 8)?;
                write_enum(buf, h.message_type, 8)
            }
        }
    }
}

impl NasDecode for PlainHeader {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let epd = read_enum(buf, 8)?;
        Self::decode_after_epd(buf, epd)
    }
}

/// Security protected 5GMM header (the outer 7 octets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecuredHeader {
    /// Security header type, never `NotProtected`
    pub security_header_type: SecurityHeaderType,
    /// Message authentication code
    pub mac: u32,
    /// Sequence number (low octet of the NAS COUNT)
    pub sequence_number: u8,
}

impl SecuredHeader {
    /// Size of the security protected header in bytes
    pub const SIZE: usize = 7;

    /// Create a new security protected header
    pub fn new(security_header_type: SecurityHeaderType, mac: u32, sequence_number: u8) -> Self {
        Self {
            security_header_type,
            mac,
            sequence_number,
        }
    }

    fn encode_after_epd(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        if !self.security_header_type.is_protected() {
            return Err(CodecError::EncodingError(
                "security protected header with plain security header type".into(),
            ));
        }
        buf.skip(4);
        write_enum(buf, self.security_header_type, 4)?;
        buf.write_bits(self.mac, 32)?;
        buf.write_bits(u32::from(self.sequence_number), 8)?;
        Ok(())
    }
}

/// Result of reading only the outer header of a NAS PDU.
///
/// For a protected message the embedded plain header is not touched, so
/// a caller can decide whether the payload must be deciphered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterHeader {
    /// Unprotected message; this is the only header
    Plain(PlainHeader),
    /// Security protected message; a plain header follows the MAC and
    /// sequence number
    Secured(SecuredHeader),
}

impl OuterHeader {
    /// Security header type of the outer header
    pub fn security_header_type(&self) -> SecurityHeaderType {
        match self {
            Self::Plain(_) => SecurityHeaderType::NotProtected,
            Self::Secured(h) => h.security_header_type,
        }
    }

    /// Size of the outer header in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Plain(h) => h.size(),
            Self::Secured(_) => SecuredHeader::SIZE,
        }
    }
}

impl NasDecode for OuterHeader {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let epd: ExtendedProtocolDiscriminator = read_enum(buf, 8)?;
        if epd != ExtendedProtocolDiscriminator::MobilityManagement {
            return PlainHeader::decode_after_epd(buf, epd).map(Self::Plain);
        }

        buf.skip(4)?;
        let sht: SecurityHeaderType = read_enum(buf, 4)?;
        if sht == SecurityHeaderType::NotProtected {
            return Ok(Self::Plain(PlainHeader::Mm(PlainMmHeader::new(read_enum(buf, 8)?))));
        }
        if let SecurityHeaderType::Unknown(raw) = sht {
            tracing::warn!(
                security_header_type = raw,
                "non-standard security header type, treating message as protected"
            );
        }
        let mac = buf.read_bits(32)?;
        let sequence_number = buf.read_bits(8)? as u8;
        Ok(Self::Secured(SecuredHeader::new(sht, mac, sequence_number)))
    }
}

/// Complete NAS header: an optional security protected header and the
/// plain header that selects the message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NasHeader {
    /// Outer security protected header, if any
    pub security: Option<SecuredHeader>,
    /// Plain header (the inner one for protected messages)
    pub plain: PlainHeader,
}

impl NasHeader {
    /// Unprotected header
    pub fn plain(plain: PlainHeader) -> Self {
        Self {
            security: None,
            plain,
        }
    }

    /// Security protected header wrapping `plain`
    pub fn secured(security: SecuredHeader, plain: PlainHeader) -> Self {
        Self {
            security: Some(security),
            plain,
        }
    }

    /// Message type selecting the body
    pub fn message_type(&self) -> MessageType {
        self.plain.message_type()
    }

    /// Security header type of the outer header
    pub fn security_header_type(&self) -> SecurityHeaderType {
        self.security
            .map(|s| s.security_header_type)
            .unwrap_or(SecurityHeaderType::NotProtected)
    }

    /// Outer header view
    pub fn outer(&self) -> OuterHeader {
        match self.security {
            Some(security) => OuterHeader::Secured(security),
            None => OuterHeader::Plain(self.plain),
        }
    }
}

impl NasEncode for NasHeader {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        if let Some(security) = &self.security {
            write_enum(buf, ExtendedProtocolDiscriminator::MobilityManagement, 8)?;
            security.encode_after_epd(buf)?;
        }
        self.plain.nas_encode(buf)
    }
}

impl NasDecode for NasHeader {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        match OuterHeader::nas_decode(buf)? {
            OuterHeader::Plain(plain) => Ok(Self::plain(plain)),
            OuterHeader::Secured(security) => {
                let plain = PlainHeader::nas_decode(buf)?;
                Ok(Self::secured(security, plain))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: NasEncode>(value: &T) -> Vec<u8> {
        let mut buf = BitBuffer::new();
        value.nas_encode(&mut buf).unwrap();
        buf.into_vec()
    }

    fn decode<T: NasDecode>(data: &[u8]) -> CodecResult<T> {
        let mut reader = BitBufferReader::new(data);
        T::nas_decode(&mut reader)
    }

    #[test]
    fn test_plain_mm_header() {
        let header = NasHeader::plain(PlainHeader::Mm(PlainMmHeader::new(
            MessageType::RegistrationRequest,
        )));
        assert_eq!(encode(&header), vec![0x7E, 0x00, 0x41]);
        assert_eq!(decode::<NasHeader>(&[0x7E, 0x00, 0x41]).unwrap(), header);
    }

    #[test]
    fn test_plain_sm_header() {
        let header = PlainHeader::Sm(PlainSmHeader::new(5, 1, MessageType::PduSessionEstablishmentRequest));
        let encoded = encode(&header);
        assert_eq!(encoded, vec![0x2E, 0x05, 0x01, 0xC1]);
        assert_eq!(header.size(), encoded.len());
        assert_eq!(decode::<PlainHeader>(&encoded).unwrap(), header);
    }

    #[test]
    fn test_plain_header_consumes_no_mac() {
        let data = [0x7E, 0x00, 0x45, 0x01, 0x02, 0x03, 0x04];
        let mut reader = BitBufferReader::new(&data);
        let header = NasHeader::nas_decode(&mut reader).unwrap();
        assert!(header.security.is_none());
        assert_eq!(reader.current_index(), 24);
    }

    #[test]
    fn test_secured_header() {
        let data = [0x7E, 0x01, 0x6F, 0x03, 0x25, 0xF5, 0x02, 0x7E, 0x00, 0x45];
        let mut reader = BitBufferReader::new(&data);
        let header = NasHeader::nas_decode(&mut reader).unwrap();
        assert_eq!(reader.current_index(), 80);
        let security = header.security.unwrap();
        assert_eq!(security.security_header_type, SecurityHeaderType::IntegrityProtected);
        assert_eq!(security.mac, 0x6F03_25F5);
        assert_eq!(security.sequence_number, 2);
        assert_eq!(header.message_type(), MessageType::DeregistrationRequestUeOriginating);
        assert_eq!(encode(&header), data.to_vec());
    }

    #[test]
    fn test_secured_inner_header_must_be_plain() {
        let data = [0x7E, 0x02, 0, 0, 0, 0, 0x01, 0x7E, 0x01, 0x41];
        assert_eq!(
            decode::<NasHeader>(&data),
            Err(CodecError::UnexpectedInnerSecurityHeader(0x01))
        );
    }

    #[test]
    fn test_secured_inner_sm_header() {
        let data = [0x7E, 0x02, 0, 0, 0, 0, 0x07, 0x2E, 0x01, 0x02, 0xC2];
        let header = decode::<NasHeader>(&data).unwrap();
        assert_eq!(
            header.plain,
            PlainHeader::Sm(PlainSmHeader::new(1, 2, MessageType::PduSessionEstablishmentAccept))
        );
        assert_eq!(encode(&header), data.to_vec());
    }

    #[test]
    fn test_outer_header_only() {
        let data = [0x7E, 0x04, 0xAA, 0xBB, 0xCC, 0xDD, 0x09, 0xFF];
        let mut reader = BitBufferReader::new(&data);
        let outer = OuterHeader::nas_decode(&mut reader).unwrap();
        assert_eq!(
            outer.security_header_type(),
            SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        );
        assert_eq!(outer.size(), SecuredHeader::SIZE);
        assert_eq!(reader.current_index(), 56);
    }

    #[test]
    fn test_invalid_epd() {
        assert_eq!(
            decode::<NasHeader>(&[0x0F, 0x00, 0x41]),
            Err(CodecError::InvalidProtocolDiscriminator(0x0F))
        );
    }

    #[test]
    fn test_unknown_message_type_is_kept() {
        let header = decode::<NasHeader>(&[0x7E, 0x00, 0x99]).unwrap();
        assert_eq!(header.message_type(), MessageType::Unknown(0x99));
    }

    #[test]
    fn test_secured_header_rejects_plain_type() {
        let header = NasHeader::secured(
            SecuredHeader::new(SecurityHeaderType::NotProtected, 0, 0),
            PlainHeader::for_message_type(MessageType::ServiceRequest),
        );
        let mut buf = BitBuffer::new();
        assert!(matches!(header.nas_encode(&mut buf), Err(CodecError::EncodingError(_))));
    }
}
