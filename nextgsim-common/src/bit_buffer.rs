//! `BitBuffer` - A bit-level read/write cursor for NAS encoding.
//!
//! This module provides `BitBuffer`, a growable MSB-first writer, and
//! `BitBufferReader`, a bounds-checked reader over a borrowed byte slice.
//! NAS information elements mix half-octet fields, odd bit widths and
//! length-prefixed octet payloads, so every codec in `nextgsim-nas` is
//! written against these two types.
//!
//! Positions are expressed in bits. A position taken with
//! [`BitBuffer::current_index`] can later be handed to
//! [`BitBuffer::patch_bits`] to fill in a length field once the payload
//! that follows it has been written.

use thiserror::Error;

/// Largest field width accepted by the 32-bit read/write operations.
pub const MAX_FIELD_BITS: usize = 32;

/// Result type for bit cursor operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors raised by the bit cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bits but only {available} bits available")]
    UnexpectedEnd {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits available.
        available: usize,
    },

    /// Invalid bit count for the operation.
    #[error("invalid bit count {bits}, maximum allowed is {max_bits}")]
    InvalidBitCount {
        /// The bit count provided.
        bits: usize,
        /// Maximum allowed bits for this operation.
        max_bits: usize,
    },

    /// Value does not fit into the requested number of bits.
    #[error("value {value} cannot be represented in {bits} bits")]
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Number of bits available.
        bits: usize,
    },

    /// Seek or patch outside the written/readable range.
    #[error("position {position} is outside the buffer (limit {limit} bits)")]
    InvalidSeek {
        /// Requested bit position.
        position: usize,
        /// Upper bound in bits.
        limit: usize,
    },

    /// Octet operation attempted at a position that is not octet aligned.
    #[error("octet operation at unaligned bit position {0}")]
    Unaligned(usize),
}

/// Returns the number of bits between two cursor positions.
#[inline]
pub fn bits_between(from: usize, to: usize) -> usize {
    to.saturating_sub(from)
}

/// A growable bit-level write buffer.
///
/// Bits are written in MSB-first order within each byte. The backing
/// vector grows on demand, so writes never fail for lack of space.
///
/// # Example
/// ```
/// use nextgsim_common::BitBuffer;
///
/// let mut buffer = BitBuffer::new();
/// buffer.write_bits(0b1010, 4).unwrap();
/// buffer.write_bits(0b1100, 4).unwrap();
/// assert_eq!(buffer.data(), &[0b1010_1100]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    index: usize, // bit index
}

impl BitBuffer {
    /// Creates an empty `BitBuffer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `BitBuffer` with room for `octets` bytes.
    pub fn with_capacity(octets: usize) -> Self {
        Self {
            data: Vec::with_capacity(octets),
            index: 0,
        }
    }

    /// Returns the current bit index.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Writes a single bit.
    #[inline]
    pub fn write(&mut self, bit: bool) {
        let octet_index = self.index / 8;
        let bit_index = self.index % 8;
        if octet_index == self.data.len() {
            self.data.push(0);
        }

        if bit {
            self.data[octet_index] |= 1 << (7 - bit_index);
        } else {
            self.data[octet_index] &= !(1 << (7 - bit_index));
        }
        self.index += 1;
    }

    /// Writes the low `len` bits of `value`, most significant bit first.
    ///
    /// Fails if `len` exceeds 32 or if `value` needs more than `len` bits.
    pub fn write_bits(&mut self, value: u32, len: usize) -> BitResult<()> {
        if len > MAX_FIELD_BITS {
            return Err(BitError::InvalidBitCount {
                bits: len,
                max_bits: MAX_FIELD_BITS,
            });
        }
        self.write_bits_long(u64::from(value), len)
    }

    /// Writes the low `len` bits of a 64-bit value.
    pub fn write_bits_long(&mut self, value: u64, len: usize) -> BitResult<()> {
        if len > 64 {
            return Err(BitError::InvalidBitCount {
                bits: len,
                max_bits: 64,
            });
        }
        if len < 64 && value >> len != 0 {
            return Err(BitError::ValueOutOfRange { value, bits: len });
        }

        for i in 0..len {
            self.write(((value >> (len - 1 - i)) & 1) != 0);
        }
        Ok(())
    }

    /// Writes raw octets. Unaligned positions are handled bit by bit.
    pub fn write_octets(&mut self, octets: &[u8]) {
        if self.index % 8 == 0 && self.index / 8 == self.data.len() {
            self.data.extend_from_slice(octets);
            self.index += octets.len() * 8;
            return;
        }
        for octet in octets {
            for i in 0..8 {
                self.write((octet >> (7 - i)) & 1 != 0);
            }
        }
    }

    /// Writes `len` zero bits.
    pub fn skip(&mut self, len: usize) {
        for _ in 0..len {
            self.write(false);
        }
    }

    /// Overwrites `len` bits starting at an earlier position.
    ///
    /// The patched range must lie entirely inside what has already been
    /// written. The write position is left untouched.
    pub fn patch_bits(&mut self, at: usize, value: u32, len: usize) -> BitResult<()> {
        if at + len > self.index {
            return Err(BitError::InvalidSeek {
                position: at + len,
                limit: self.index,
            });
        }
        let end = self.index;
        self.index = at;
        let result = self.write_bits(value, len);
        self.index = end;
        result
    }

    /// Returns the total number of octets written, rounded up.
    #[inline]
    pub fn written_octets(&self) -> usize {
        self.index.div_ceil(8)
    }

    /// Aligns the buffer to the next octet boundary by writing zero bits.
    #[inline]
    pub fn octet_align(&mut self) {
        let remainder = self.bits_to_octet_boundary();
        self.skip(remainder);
    }

    /// Returns the number of bits until the next octet boundary.
    #[inline]
    pub fn bits_to_octet_boundary(&self) -> usize {
        let remainder = self.index % 8;
        if remainder == 0 {
            0
        } else {
            8 - remainder
        }
    }

    /// Returns the bytes written so far.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.written_octets()]
    }

    /// Consumes the buffer and returns the written bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.written_octets());
        self.data
    }
}

/// A read-only bit cursor for parsing bit-level data.
///
/// Every read is bounds checked; malformed input produces a [`BitError`]
/// rather than a panic.
#[derive(Debug, Clone)]
pub struct BitBufferReader<'a> {
    data: &'a [u8],
    index: usize, // bit index
}

impl<'a> BitBufferReader<'a> {
    /// Creates a new `BitBufferReader` from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    /// Seeks to the specified bit index.
    pub fn seek(&mut self, index: usize) -> BitResult<()> {
        if index > self.capacity_bits() {
            return Err(BitError::InvalidSeek {
                position: index,
                limit: self.capacity_bits(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Returns the current bit index.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    fn ensure(&self, len: usize) -> BitResult<()> {
        if len > self.remaining_bits() {
            return Err(BitError::UnexpectedEnd {
                requested: len,
                available: self.remaining_bits(),
            });
        }
        Ok(())
    }

    #[inline]
    fn bit_at(&self, index: usize) -> bool {
        (self.data[index / 8] >> (7 - index % 8)) & 1 != 0
    }

    /// Reads a single bit and advances the index.
    pub fn read(&mut self) -> BitResult<bool> {
        self.ensure(1)?;
        let bit = self.bit_at(self.index);
        self.index += 1;
        Ok(bit)
    }

    /// Reads `len` bits (at most 32) as an unsigned integer.
    pub fn read_bits(&mut self, len: usize) -> BitResult<u32> {
        if len > MAX_FIELD_BITS {
            return Err(BitError::InvalidBitCount {
                bits: len,
                max_bits: MAX_FIELD_BITS,
            });
        }
        // Width is at most 32 so the value always fits.
        self.read_bits_long(len).map(|v| v as u32)
    }

    /// Reads `len` bits (at most 64) as an unsigned integer.
    pub fn read_bits_long(&mut self, len: usize) -> BitResult<u64> {
        if len > 64 {
            return Err(BitError::InvalidBitCount {
                bits: len,
                max_bits: 64,
            });
        }
        self.ensure(len)?;

        let mut result = 0u64;
        for i in 0..len {
            result = (result << 1) | u64::from(self.bit_at(self.index + i));
        }
        self.index += len;
        Ok(result)
    }

    /// Returns the next `len` bits without advancing.
    pub fn peek_bits(&self, len: usize) -> BitResult<u32> {
        let mut probe = self.clone();
        probe.read_bits(len)
    }

    /// Reads `count` octets, handling unaligned positions bit by bit.
    pub fn read_octets(&mut self, count: usize) -> BitResult<Vec<u8>> {
        self.ensure(count * 8)?;
        if self.index % 8 == 0 {
            let start = self.index / 8;
            self.index += count * 8;
            return Ok(self.data[start..start + count].to_vec());
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }

    /// Reads a fixed number of octets into an array.
    pub fn read_array<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        let mut out = [0u8; N];
        for octet in out.iter_mut() {
            *octet = self.read_bits(8)? as u8;
        }
        Ok(out)
    }

    /// Advances the index by `len` bits.
    pub fn skip(&mut self, len: usize) -> BitResult<()> {
        self.ensure(len)?;
        self.index += len;
        Ok(())
    }

    /// Skips to the next octet boundary.
    pub fn octet_align(&mut self) -> BitResult<()> {
        let remainder = self.index % 8;
        if remainder != 0 {
            self.skip(8 - remainder)?;
        }
        Ok(())
    }

    /// Splits off the next `count` octets as an independent reader and
    /// advances past them.
    ///
    /// Used to confine a length-prefixed element to its declared envelope.
    pub fn take_octets(&mut self, count: usize) -> BitResult<BitBufferReader<'a>> {
        if self.index % 8 != 0 {
            return Err(BitError::Unaligned(self.index));
        }
        self.ensure(count * 8)?;
        let start = self.index / 8;
        self.index += count * 8;
        Ok(BitBufferReader::new(&self.data[start..start + count]))
    }

    /// Returns the unread octets from the current (aligned) position.
    pub fn remaining_data(&self) -> &'a [u8] {
        let start = self.index.div_ceil(8).min(self.data.len());
        &self.data[start..]
    }

    /// Returns the total capacity in bits.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Returns the remaining bits that can be read.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.capacity_bits().saturating_sub(self.index)
    }

    /// Returns the number of whole octets left to read.
    #[inline]
    pub fn remaining_octets(&self) -> usize {
        self.remaining_bits() / 8
    }

    /// Returns true if there are more bits to read.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.capacity_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_single_bits() {
        let mut buffer = BitBuffer::new();
        for i in 0..8 {
            buffer.write(i % 2 == 0);
        }
        assert_eq!(buffer.data(), &[0b1010_1010]);

        let mut reader = BitBufferReader::new(buffer.data());
        assert!(reader.read().unwrap());
        assert!(!reader.read().unwrap());
        assert!(reader.read().unwrap());
        assert!(!reader.read().unwrap());
    }

    #[test]
    fn test_write_and_read_bits() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0b1010, 4).unwrap();
        buffer.write_bits(0b1100, 4).unwrap();
        buffer.write_bits(0b1111_0000, 8).unwrap();
        assert_eq!(buffer.data(), &[0b1010_1100, 0b1111_0000]);

        let mut reader = BitBufferReader::new(buffer.data());
        assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
        assert_eq!(reader.read_bits(8).unwrap(), 0b1111_0000);
        assert!(!reader.has_next());
    }

    #[test]
    fn test_write_bits_long() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits_long(0x1234_5678_9ABC_DEF0, 64).unwrap();

        let mut reader = BitBufferReader::new(buffer.data());
        assert_eq!(reader.read_bits_long(64).unwrap(), 0x1234_5678_9ABC_DEF0);
    }

    #[test]
    fn test_write_bits_rejects_wide_values() {
        let mut buffer = BitBuffer::new();
        assert_eq!(
            buffer.write_bits(0x10, 4),
            Err(BitError::ValueOutOfRange { value: 0x10, bits: 4 })
        );
        assert_eq!(
            buffer.write_bits(0, 33),
            Err(BitError::InvalidBitCount { bits: 33, max_bits: 32 })
        );
        assert_eq!(buffer.current_index(), 0);
    }

    #[test]
    fn test_octet_align() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0b101, 3).unwrap();
        assert_eq!(buffer.current_index(), 3);

        buffer.octet_align();
        assert_eq!(buffer.current_index(), 8);

        // Already aligned, should not change
        buffer.octet_align();
        assert_eq!(buffer.current_index(), 8);
        assert_eq!(buffer.data(), &[0b1010_0000]);
    }

    #[test]
    fn test_written_octets() {
        let mut buffer = BitBuffer::new();
        assert_eq!(buffer.written_octets(), 0);

        buffer.write_bits(0b1, 1).unwrap();
        assert_eq!(buffer.written_octets(), 1);

        buffer.write_bits(0b111_1111, 7).unwrap();
        assert_eq!(buffer.written_octets(), 1);

        buffer.write_bits(0b1, 1).unwrap();
        assert_eq!(buffer.written_octets(), 2);
    }

    #[test]
    fn test_patch_bits() {
        let mut buffer = BitBuffer::new();
        let length_at = buffer.current_index();
        buffer.write_bits(0, 8).unwrap();
        buffer.write_octets(&[0xAA, 0xBB, 0xCC]);
        let written = bits_between(length_at + 8, buffer.current_index()) / 8;
        buffer.patch_bits(length_at, written as u32, 8).unwrap();

        assert_eq!(buffer.data(), &[0x03, 0xAA, 0xBB, 0xCC]);
        assert_eq!(buffer.current_index(), 32);
    }

    #[test]
    fn test_patch_beyond_written_fails() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0, 8).unwrap();
        assert!(matches!(
            buffer.patch_bits(4, 0, 8),
            Err(BitError::InvalidSeek { .. })
        ));
    }

    #[test]
    fn test_unaligned_octets() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0xF, 4).unwrap();
        buffer.write_octets(&[0x12, 0x34]);
        buffer.write_bits(0x5, 4).unwrap();
        assert_eq!(buffer.data(), &[0xF1, 0x23, 0x45]);

        let mut reader = BitBufferReader::new(buffer.data());
        reader.skip(4).unwrap();
        assert_eq!(reader.read_octets(2).unwrap(), vec![0x12, 0x34]);
    }

    #[test]
    fn test_peek() {
        let data = [0b1010_1010u8];
        let mut reader = BitBufferReader::new(&data);

        assert_eq!(reader.peek_bits(1).unwrap(), 1);
        assert_eq!(reader.current_index(), 0);

        reader.seek(1).unwrap();
        assert_eq!(reader.peek_bits(3).unwrap(), 0b010);
    }

    #[test]
    fn test_bits_to_octet_boundary() {
        let mut buffer = BitBuffer::new();
        assert_eq!(buffer.bits_to_octet_boundary(), 0);

        buffer.write(true);
        assert_eq!(buffer.bits_to_octet_boundary(), 7);

        buffer.skip(6);
        assert_eq!(buffer.bits_to_octet_boundary(), 1);

        buffer.write(true);
        assert_eq!(buffer.bits_to_octet_boundary(), 0);
    }

    #[test]
    fn test_bit_buffer_reader_octet_align() {
        let data = [0u8; 4];
        let mut reader = BitBufferReader::new(&data);

        reader.seek(3).unwrap();
        reader.octet_align().unwrap();
        assert_eq!(reader.current_index(), 8);

        reader.octet_align().unwrap();
        assert_eq!(reader.current_index(), 8);
    }

    #[test]
    fn test_reader_exhaustion() {
        let data = [0xFFu8];
        let mut reader = BitBufferReader::new(&data);
        reader.read_bits(6).unwrap();
        assert_eq!(
            reader.read_bits(4),
            Err(BitError::UnexpectedEnd {
                requested: 4,
                available: 2
            })
        );
        // A failed read does not move the cursor.
        assert_eq!(reader.current_index(), 6);
    }

    #[test]
    fn test_take_octets() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BitBufferReader::new(&data);
        reader.skip(8).unwrap();

        let mut sub = reader.take_octets(2).unwrap();
        assert_eq!(sub.remaining_octets(), 2);
        assert_eq!(sub.read_bits(16).unwrap(), 0x0203);
        assert!(sub.read_bits(1).is_err());

        assert_eq!(reader.remaining_octets(), 1);
        assert_eq!(reader.remaining_data(), &[0x04]);
        assert!(reader.take_octets(2).is_err());
    }

    #[test]
    fn test_take_octets_requires_alignment() {
        let data = [0x01, 0x02];
        let mut reader = BitBufferReader::new(&data);
        reader.skip(4).unwrap();
        assert_eq!(reader.take_octets(1).unwrap_err(), BitError::Unaligned(4));
    }

    #[test]
    fn test_remaining_bits() {
        let data = [0u8; 2];
        let mut reader = BitBufferReader::new(&data);

        assert_eq!(reader.remaining_bits(), 16);
        reader.seek(5).unwrap();
        assert_eq!(reader.remaining_bits(), 11);
        assert_eq!(reader.remaining_octets(), 1);
        assert!(reader.seek(17).is_err());
    }

    #[test]
    fn test_cross_byte_boundary() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0b1111_0000_1111, 12).unwrap();

        let mut reader = BitBufferReader::new(buffer.data());
        assert_eq!(reader.read_bits(12).unwrap(), 0b1111_0000_1111);
    }

    #[test]
    fn test_write_zero_bits() {
        let mut buffer = BitBuffer::new();
        buffer.write_bits(0, 0).unwrap();
        assert_eq!(buffer.current_index(), 0);
        assert!(buffer.into_vec().is_empty());
    }
}
