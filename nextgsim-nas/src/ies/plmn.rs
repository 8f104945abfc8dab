//! PLMN identity and tracking area identity
//!
//! The 3-octet BCD "MCC/MNC" layout of 3GPP TS 24.008 Figure 10.5.13 is
//! shared by every IE that carries a PLMN: mobile identities, TAIs, PLMN
//! lists and service area lists.
//!
//! ```text
//!   octet 1: MCC digit 2 | MCC digit 1
//!   octet 2: MNC digit 3 | MCC digit 3
//!   octet 3: MNC digit 2 | MNC digit 1
//! ```

use std::fmt;

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{CodecResult, NasDecode, NasEncode};

/// Filler nibble used in place of the third MNC digit of a 2-digit MNC
pub const BCD_FILLER: u8 = 0x0F;

/// Public Land Mobile Network identity as BCD digits.
///
/// Digits are kept as nibbles rather than numbers so that filler and
/// out-of-range nibbles survive a decode/encode cycle unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Plmn {
    /// MCC digits 1-3
    pub mcc: [u8; 3],
    /// MNC digits 1-3; digit 3 is [`BCD_FILLER`] for a 2-digit MNC
    pub mnc: [u8; 3],
}

impl Plmn {
    /// Create a PLMN from numeric MCC and MNC values
    ///
    /// * `mcc` - Mobile Country Code (3 digits)
    /// * `mnc` - Mobile Network Code (2-3 digits)
    /// * `long_mnc` - Whether MNC is 3 digits
    pub fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        let mcc_digits = [
            ((mcc / 100) % 10) as u8,
            ((mcc / 10) % 10) as u8,
            (mcc % 10) as u8,
        ];
        let mnc_digits = if long_mnc {
            [
                ((mnc / 100) % 10) as u8,
                ((mnc / 10) % 10) as u8,
                (mnc % 10) as u8,
            ]
        } else {
            [((mnc / 10) % 10) as u8, (mnc % 10) as u8, BCD_FILLER]
        };
        Self {
            mcc: mcc_digits,
            mnc: mnc_digits,
        }
    }

    /// Returns true if the MNC has three digits
    pub fn long_mnc(&self) -> bool {
        self.mnc[2] != BCD_FILLER
    }

    /// Numeric MCC (nibbles above 9 are taken at face value)
    pub fn mcc_value(&self) -> u16 {
        self.mcc
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(*d))
    }

    /// Numeric MNC
    pub fn mnc_value(&self) -> u16 {
        let digits = if self.long_mnc() { &self.mnc[..] } else { &self.mnc[..2] };
        digits.iter().fold(0u16, |acc, d| acc * 10 + u16::from(*d))
    }

    /// Encode to the 3-octet BCD layout
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            ((self.mcc[1] & 0x0F) << 4) | (self.mcc[0] & 0x0F),
            ((self.mnc[2] & 0x0F) << 4) | (self.mcc[2] & 0x0F),
            ((self.mnc[1] & 0x0F) << 4) | (self.mnc[0] & 0x0F),
        ]
    }

    /// Decode from the 3-octet BCD layout
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            mcc: [bytes[0] & 0x0F, bytes[0] >> 4, bytes[1] & 0x0F],
            mnc: [bytes[2] & 0x0F, bytes[2] >> 4, bytes[1] >> 4],
        }
    }
}

impl NasEncode for Plmn {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.write_octets(&self.to_bytes());
        Ok(())
    }
}

impl NasDecode for Plmn {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::from_bytes(buf.read_array::<3>()?))
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({self})")
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.mcc {
            write!(f, "{d:X}")?;
        }
        f.write_str("-")?;
        let digits = if self.long_mnc() { &self.mnc[..] } else { &self.mnc[..2] };
        for d in digits {
            write!(f, "{d:X}")?;
        }
        Ok(())
    }
}

/// 5GS Tracking Area Identity (3GPP TS 24.501 Section 9.11.3.8)
///
/// PLMN followed by a 24-bit tracking area code. Used as a fixed 6-octet
/// value (last visited registered TAI) and as an element of TAI lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tai {
    /// PLMN identity
    pub plmn: Plmn,
    /// Tracking area code (24 bits)
    pub tac: u32,
}

impl Tai {
    /// Create a new TAI
    pub fn new(plmn: Plmn, tac: u32) -> Self {
        Self { plmn, tac }
    }
}

impl NasEncode for Tai {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.plmn.nas_encode(buf)?;
        buf.write_bits(self.tac, 24)?;
        Ok(())
    }
}

impl NasDecode for Tai {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let plmn = Plmn::nas_decode(buf)?;
        let tac = buf.read_bits(24)?;
        Ok(Self { plmn, tac })
    }
}
