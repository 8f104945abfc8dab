//! NAS message encoding/decoding traits and utilities
//!
//! This module provides the traits every Information Element (IE) and
//! message implements, plus the shared machinery for the IE formats of
//! 3GPP TS 24.501 Section 11.2.1:
//!
//! - Type 1: Half-octet (4 bits) value, possibly sharing an octet with
//!   another half-octet IE or with its own IEI
//! - Type 3: Fixed-length value
//! - Type 4: Variable-length with 1-byte length field (TLV / LV)
//! - Type 6: Variable-length with 2-byte length field (TLV-E / LV-E)
//!
//! All codecs operate on the bit cursor from `nextgsim-common`, so
//! sub-octet fields are written exactly where they belong without manual
//! shifting.
//!
//! # Example
//!
//! ```rust
//! use nextgsim_common::{BitBuffer, BitBufferReader};
//! use nextgsim_nas::codec::{NasDecode, NasEncode};
//! use nextgsim_nas::ies::IeDnn;
//!
//! let dnn = IeDnn::new(b"\x08internet".to_vec());
//! let mut buf = BitBuffer::new();
//! dnn.nas_encode(&mut buf).unwrap();
//! assert_eq!(buf.data()[0], 9);
//!
//! let mut reader = BitBufferReader::new(buf.data());
//! assert_eq!(IeDnn::nas_decode(&mut reader).unwrap(), dnn);
//! ```

use nextgsim_common::{bits_between, BitBuffer, BitBufferReader, BitError, CodecConfig, UnknownIeiPolicy};
use thiserror::Error;

/// Errors that can occur during NAS encoding/decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Bit cursor failure (exhausted input, oversized field, ...)
    #[error("Bit buffer error: {0}")]
    Bit(#[from] BitError),

    /// A length field (decoded) or a computed payload length (encoded)
    /// violates the IE's documented bounds
    #[error("{ie}: length {length} outside of allowed range [{min}, {max}]")]
    LengthOutOfBounds {
        /// IE name
        ie: &'static str,
        /// Offending length in octets
        length: usize,
        /// Minimum allowed length
        min: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Length and discriminant of a choice IE do not match any known shape
    #[error("{ie}: not expected combination of length {length} and type field {kind}")]
    InvalidLengthForType {
        /// IE name
        ie: &'static str,
        /// Observed length in octets
        length: usize,
        /// Raw discriminant value
        kind: u8,
    },

    /// Invalid value encountered during encoding or decoding
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Checked variant access on a choice IE or message body failed
    #[error("Variant mismatch: expected {expected}, got {actual}")]
    VariantMismatch {
        /// Requested variant
        expected: &'static str,
        /// Variant actually held
        actual: &'static str,
    },

    /// Invalid protocol discriminator
    #[error("Invalid protocol discriminator: 0x{0:02X}")]
    InvalidProtocolDiscriminator(u8),

    /// The inner header of a security protected 5GMM message is not plain
    #[error("Expected inner security type to be plain, got 0x{0:X}")]
    UnexpectedInnerSecurityHeader(u8),

    /// Unknown IEI rejected by [`UnknownIeiPolicy::Reject`]
    #[error("Unknown IEI 0x{iei:02X} in {message}")]
    UnknownIei {
        /// The tag read from the wire
        iei: u8,
        /// Message being decoded
        message: &'static str,
    },

    /// Encoding error
    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Result type for NAS codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Trait for encoding NAS messages and Information Elements
///
/// IEs encode their value part only: the length field if the format has
/// one, followed by the contents. IEIs are written by the enclosing
/// message.
pub trait NasEncode {
    /// Encode this value at the current position of `buf`
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()>;
}

/// Trait for decoding NAS messages and Information Elements
///
/// Decoding always builds a fresh value; nothing is carried over from a
/// previous attempt.
pub trait NasDecode: Sized {
    /// Decode a value from the current position of `buf`
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self>;
}

// ============================================================================
// Length-prefixed envelopes (Type 4 / Type 6)
// ============================================================================

/// Length field and bounds of a variable-length IE.
///
/// `min` and `max` constrain the value of the length field, i.e. the
/// number of octets following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    /// IE name used in diagnostics
    pub name: &'static str,
    /// Width of the length field in bits (8 or 16)
    pub width: usize,
    /// Minimum contents length
    pub min: usize,
    /// Maximum contents length
    pub max: usize,
}

impl Envelope {
    /// Envelope with an 8-bit length field (TLV / LV)
    pub const fn tlv(name: &'static str, min: usize, max: usize) -> Self {
        Self { name, width: 8, min, max }
    }

    /// Envelope with a 16-bit length field (TLV-E / LV-E)
    pub const fn tlv_e(name: &'static str, min: usize, max: usize) -> Self {
        Self { name, width: 16, min, max }
    }

    /// Fails unless `length` lies in `[min, max]`
    pub fn check(&self, length: usize) -> CodecResult<()> {
        if length < self.min || length > self.max {
            return Err(CodecError::LengthOutOfBounds {
                ie: self.name,
                length,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Writes a length-prefixed section.
    ///
    /// A zero placeholder is reserved for the length, `contents` writes the
    /// payload, the buffer is octet aligned, and the real length is patched
    /// into the placeholder after the bounds check. An error from
    /// `contents` aborts the whole encode.
    pub fn encode<F>(&self, buf: &mut BitBuffer, contents: F) -> CodecResult<()>
    where
        F: FnOnce(&mut BitBuffer) -> CodecResult<()>,
    {
        let length_at = buf.current_index();
        buf.write_bits(0, self.width)?;
        let payload_at = buf.current_index();

        contents(buf)?;
        buf.octet_align();

        let length = bits_between(payload_at, buf.current_index()) / 8;
        self.check(length)?;
        // Bounded by `max`, which never exceeds the field width.
        buf.patch_bits(length_at, length as u32, self.width)?;
        Ok(())
    }

    /// Reads a length-prefixed section.
    ///
    /// The length field is validated before any payload is touched. The
    /// closure receives a reader confined to exactly the declared octets
    /// and the declared length; whatever it leaves unread is skipped.
    pub fn decode<'a, T, F>(&self, buf: &mut BitBufferReader<'a>, contents: F) -> CodecResult<T>
    where
        F: FnOnce(&mut BitBufferReader<'a>, usize) -> CodecResult<T>,
    {
        let length = buf.read_bits(self.width)? as usize;
        self.check(length)?;
        let mut section = buf.take_octets(length)?;
        contents(&mut section, length)
    }
}

// ============================================================================
// Enumerated fields
// ============================================================================

/// Writes an enumerated value into a `bits` wide field.
///
/// Raw fallback values wider than the field fail with
/// [`BitError::ValueOutOfRange`].
pub fn write_enum<E>(buf: &mut BitBuffer, value: E, bits: usize) -> CodecResult<()>
where
    E: Into<u8>,
{
    buf.write_bits(u32::from(value.into()), bits)?;
    Ok(())
}

/// Reads a `bits` wide field and maps it onto an enumeration. Values without
/// a named variant map onto the enumeration's raw fallback.
pub fn read_enum<E>(buf: &mut BitBufferReader<'_>, bits: usize) -> CodecResult<E>
where
    E: From<u8>,
{
    let raw = buf.read_bits(bits)?;
    // `bits` is at most 8 for every enumerated NAS field.
    Ok(E::from(raw as u8))
}

/// Checks that `value` fits into a `bits` wide field and returns it.
///
/// Used when several sub-octet fields are assembled into one nibble or
/// octet before being written.
pub fn fit_bits(value: u8, bits: usize) -> CodecResult<u8> {
    if bits < 8 && value >> bits != 0 {
        return Err(BitError::ValueOutOfRange {
            value: u64::from(value),
            bits,
        }
        .into());
    }
    Ok(value)
}

/// Writes a boolean flag as a single bit
#[inline]
pub fn write_flag(buf: &mut BitBuffer, flag: bool) {
    buf.write(flag);
}

/// Reads a single bit as a boolean flag
#[inline]
pub fn read_flag(buf: &mut BitBufferReader<'_>) -> CodecResult<bool> {
    Ok(buf.read()?)
}

// ============================================================================
// Optional IEs
// ============================================================================

/// Largest IEI value written as a half-octet tag
pub const HALF_OCTET_IEI_MAX: u8 = 0x0F;

/// Writes an IEI: a single nibble for half-octet IEIs, an octet otherwise.
pub fn write_iei(buf: &mut BitBuffer, iei: u8) -> CodecResult<()> {
    if iei <= HALF_OCTET_IEI_MAX {
        buf.write_bits(u32::from(iei), 4)?;
    } else {
        buf.write_bits(u32::from(iei), 8)?;
    }
    Ok(())
}

/// Reads an IEI.
///
/// The first nibble of a half-octet IEI always has its top bit set (type 1
/// IEIs are 0x8-0xF); any other nibble is the high half of a full-octet
/// IEI.
pub fn read_iei(buf: &mut BitBufferReader<'_>) -> CodecResult<u8> {
    let high = buf.read_bits(4)? as u8;
    if high >= 0x8 {
        return Ok(high);
    }
    let low = buf.read_bits(4)? as u8;
    Ok((high << 4) | low)
}

/// Writes an optional IE with its IEI when present.
pub fn encode_optional<T: NasEncode>(
    buf: &mut BitBuffer,
    iei: u8,
    ie: &Option<T>,
) -> CodecResult<()> {
    if let Some(ie) = ie {
        write_iei(buf, iei)?;
        ie.nas_encode(buf)?;
    }
    Ok(())
}

/// Runs the optional-IE loop of a message decoder.
///
/// Reads IEIs until the buffer is exhausted and hands each one to
/// `handler`, which decodes the IE and returns `true`, or returns `false`
/// for an IEI the message does not define. Unknown IEIs are then treated
/// according to the configured [`UnknownIeiPolicy`].
pub fn decode_optional_ies<'a, F>(
    buf: &mut BitBufferReader<'a>,
    config: &CodecConfig,
    message: &'static str,
    mut handler: F,
) -> CodecResult<()>
where
    F: FnMut(u8, &mut BitBufferReader<'a>) -> CodecResult<bool>,
{
    while buf.remaining_octets() > 0 {
        let iei = read_iei(buf)?;
        if handler(iei, buf)? {
            continue;
        }
        match config.unknown_iei_policy {
            UnknownIeiPolicy::Ignore => {
                tracing::warn!(
                    iei = format_args!("0x{iei:02X}"),
                    msg_type = message,
                    "unknown IEI, ignoring"
                );
            }
            UnknownIeiPolicy::SkipTlv => {
                let skipped = skip_unknown_ie(buf, iei)?;
                tracing::warn!(
                    iei = format_args!("0x{iei:02X}"),
                    msg_type = message,
                    skipped_octets = skipped,
                    "unknown IEI, skipped"
                );
            }
            UnknownIeiPolicy::Reject => {
                return Err(CodecError::UnknownIei { iei, message });
            }
        }
    }
    Ok(())
}

/// Skips the value part of an unknown IE, returning the number of
/// contents octets skipped.
fn skip_unknown_ie(buf: &mut BitBufferReader<'_>, iei: u8) -> CodecResult<usize> {
    if iei <= HALF_OCTET_IEI_MAX {
        buf.skip(4)?;
        return Ok(0);
    }
    let width = if (0x70..=0x7F).contains(&iei) { 16 } else { 8 };
    let length = buf.read_bits(width)? as usize;
    buf.skip(length * 8)?;
    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ENVELOPE: Envelope = Envelope::tlv("Test IE", 2, 4);

    #[test]
    fn test_envelope_encode_patches_length() {
        let mut buf = BitBuffer::new();
        TEST_ENVELOPE
            .encode(&mut buf, |b| {
                b.write_octets(&[0xAA, 0xBB, 0xCC]);
                Ok(())
            })
            .unwrap();
        assert_eq!(buf.data(), &[0x03, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_envelope_encode_aligns_payload() {
        let mut buf = BitBuffer::new();
        Envelope::tlv_e("Test IE", 1, 10)
            .encode(&mut buf, |b| {
                b.write_bits(0xF, 4)?;
                b.write_bits(0xA, 8)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(buf.data(), &[0x00, 0x02, 0xF0, 0xA0]);
    }

    #[test]
    fn test_envelope_encode_bounds() {
        let mut buf = BitBuffer::new();
        let result = TEST_ENVELOPE.encode(&mut buf, |b| {
            b.write_octets(&[0x01]);
            Ok(())
        });
        assert_eq!(
            result,
            Err(CodecError::LengthOutOfBounds {
                ie: "Test IE",
                length: 1,
                min: 2,
                max: 4
            })
        );

        let mut buf = BitBuffer::new();
        let result = TEST_ENVELOPE.encode(&mut buf, |b| {
            b.write_octets(&[0; 5]);
            Ok(())
        });
        assert!(matches!(result, Err(CodecError::LengthOutOfBounds { length: 5, .. })));
    }

    #[test]
    fn test_envelope_decode_confines_reader() {
        let data = [0x03, 0x11, 0x22, 0x33, 0x44];
        let mut reader = BitBufferReader::new(&data);
        let first = TEST_ENVELOPE
            .decode(&mut reader, |r, length| {
                assert_eq!(length, 3);
                Ok(r.read_bits(8)?)
            })
            .unwrap();
        assert_eq!(first, 0x11);
        // Unread contents are skipped with the envelope
        assert_eq!(reader.read_bits(8).unwrap(), 0x44);
    }

    #[test]
    fn test_envelope_decode_checks_length_first() {
        let data = [0x09, 0x00];
        let mut reader = BitBufferReader::new(&data);
        let result = TEST_ENVELOPE.decode(&mut reader, |_, _| -> CodecResult<()> {
            panic!("payload must not be read")
        });
        assert!(matches!(result, Err(CodecError::LengthOutOfBounds { length: 9, .. })));
    }

    #[test]
    fn test_envelope_decode_truncated() {
        let data = [0x04, 0x00, 0x00];
        let mut reader = BitBufferReader::new(&data);
        let result = TEST_ENVELOPE.decode(&mut reader, |_, _| Ok(()));
        assert!(matches!(result, Err(CodecError::Bit(BitError::UnexpectedEnd { .. }))));
    }

    #[test]
    fn test_fit_bits() {
        assert_eq!(fit_bits(0x7, 3).unwrap(), 0x7);
        assert_eq!(fit_bits(0xFF, 8).unwrap(), 0xFF);
        assert_eq!(
            fit_bits(0x9, 3),
            Err(CodecError::Bit(BitError::ValueOutOfRange { value: 9, bits: 3 }))
        );
    }

    #[test]
    fn test_write_enum_rejects_wide_raw_value() {
        let mut buf = BitBuffer::new();
        assert!(write_enum(&mut buf, 0x1Fu8, 4).is_err());
        let mut reader = BitBufferReader::new(&[0xA0]);
        let value: u8 = read_enum(&mut reader, 4).unwrap();
        assert_eq!(value, 0xA);
    }

    #[test]
    fn test_iei_widths() {
        let mut buf = BitBuffer::new();
        write_iei(&mut buf, 0x0B).unwrap();
        buf.write_bits(0x1, 4).unwrap();
        write_iei(&mut buf, 0x2E).unwrap();
        assert_eq!(buf.data(), &[0xB1, 0x2E]);

        let mut reader = BitBufferReader::new(buf.data());
        assert_eq!(read_iei(&mut reader).unwrap(), 0x0B);
        assert_eq!(reader.current_index(), 4);
        reader.skip(4).unwrap();
        assert_eq!(read_iei(&mut reader).unwrap(), 0x2E);
        assert_eq!(reader.current_index(), 16);
    }

    fn collect_ieis(data: &[u8], policy: UnknownIeiPolicy) -> CodecResult<Vec<u8>> {
        let mut reader = BitBufferReader::new(data);
        let mut seen = Vec::new();
        decode_optional_ies(&mut reader, &CodecConfig::with_policy(policy), "Test", |iei, r| {
            match iei {
                // known half-octet IE
                0x0B => {
                    r.skip(4)?;
                    seen.push(iei);
                    Ok(true)
                }
                // known TLV IE
                0x50 => {
                    Envelope::tlv("PDU session status", 2, 32).decode(r, |_, _| Ok(()))?;
                    seen.push(iei);
                    Ok(true)
                }
                _ => Ok(false),
            }
        })?;
        Ok(seen)
    }

    #[test]
    fn test_optional_loop_known_ieis() {
        let data = [0xB1, 0x50, 0x02, 0x00, 0x00];
        assert_eq!(collect_ieis(&data, UnknownIeiPolicy::Ignore).unwrap(), vec![0x0B, 0x50]);
    }

    #[test]
    fn test_optional_loop_unknown_ignore() {
        // Unknown 0x42 with no payload is stepped over as a bare tag
        let data = [0x42, 0xB1];
        assert_eq!(collect_ieis(&data, UnknownIeiPolicy::Ignore).unwrap(), vec![0x0B]);
    }

    #[test]
    fn test_optional_loop_unknown_skip_tlv() {
        // Unknown TLV 0x42 (2 octets), unknown TLV-E 0x7C (1 octet), then a known IE
        let data = [0x42, 0x02, 0x50, 0x50, 0x7C, 0x00, 0x01, 0xFF, 0xB1];
        assert_eq!(collect_ieis(&data, UnknownIeiPolicy::SkipTlv).unwrap(), vec![0x0B]);
    }

    #[test]
    fn test_optional_loop_unknown_reject() {
        let data = [0x42, 0x00];
        assert_eq!(
            collect_ieis(&data, UnknownIeiPolicy::Reject),
            Err(CodecError::UnknownIei { iei: 0x42, message: "Test" })
        );
    }

    #[test]
    fn test_encode_optional_absent_writes_nothing() {
        struct Nibble(u8);
        impl NasEncode for Nibble {
            fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                buf.write_bits(u32::from(self.0), 4)?;
                Ok(())
            }
        }

        let mut buf = BitBuffer::new();
        encode_optional::<Nibble>(&mut buf, 0x0B, &None).unwrap();
        assert_eq!(buf.current_index(), 0);
        encode_optional(&mut buf, 0x0B, &Some(Nibble(1))).unwrap();
        assert_eq!(buf.data(), &[0xB1]);
    }
}
