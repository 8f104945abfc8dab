//! 5GS Mobile Identity (3GPP TS 24.501 Section 9.11.3.4)
//!
//! A TLV-E IE whose first contents octet ends with a 3-bit type of
//! identity; the remaining five bits of that octet belong to the selected
//! variant (BCD digit and odd/even flag, SUPI format, or spare bits).
//!
//! ```text
//!   SUCI:    spare | SUPI format (3) | spare | type
//!   5G-GUTI: 1111  | spare           | type   then PLMN, AMF ID, 5G-TMSI
//!   IMEI:    digit 1 (4)     | odd/even      | type   then BCD digits
//! ```

use std::fmt;

use nextgsim_common::{BitBuffer, BitBufferReader};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::codec::{
    fit_bits, read_enum, write_enum, write_flag, CodecError, CodecResult, Envelope, NasDecode,
    NasEncode,
};
use crate::ies::plmn::{Plmn, BCD_FILLER};

/// Type of identity (3 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive)]
#[repr(u8)]
pub enum MobileIdentityType {
    /// No identity
    NoIdentity = 0b000,
    /// SUCI
    Suci = 0b001,
    /// 5G-GUTI
    Guti = 0b010,
    /// IMEI
    Imei = 0b011,
    /// 5G-S-TMSI
    Tmsi = 0b100,
    /// IMEISV
    ImeiSv = 0b101,
    /// MAC address
    MacAddress = 0b110,
    /// EUI-64
    Eui64 = 0b111,
}

impl MobileIdentityType {
    /// Maps the low three bits of `value` onto a type. Every 3-bit value
    /// names a type.
    pub fn from_bits(value: u8) -> Self {
        match value & 0b111 {
            0b000 => Self::NoIdentity,
            0b001 => Self::Suci,
            0b010 => Self::Guti,
            0b011 => Self::Imei,
            0b100 => Self::Tmsi,
            0b101 => Self::ImeiSv,
            0b110 => Self::MacAddress,
            _ => Self::Eui64,
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoIdentity => "No identity",
            Self::Suci => "SUCI",
            Self::Guti => "5G-GUTI",
            Self::Imei => "IMEI",
            Self::Tmsi => "5G-S-TMSI",
            Self::ImeiSv => "IMEISV",
            Self::MacAddress => "MAC address",
            Self::Eui64 => "EUI-64",
        }
    }
}

impl fmt::Display for MobileIdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SUPI format of a SUCI (3 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SupiFormat {
    /// IMSI
    Imsi = 0b000,
    /// Network specific identifier
    NetworkSpecificIdentifier = 0b001,
    /// Global cable identifier
    Gci = 0b010,
    /// Global line identifier
    Gli = 0b011,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Protection scheme identifier of a SUCI (4 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ProtectionScheme {
    /// Null scheme
    Null = 0b0000,
    /// ECIES scheme profile A
    ProfileA = 0b0001,
    /// ECIES scheme profile B
    ProfileB = 0b0010,
    /// Reserved or operator specific
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// SUCI in the IMSI format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuciImsi {
    /// Home network PLMN
    pub plmn: Plmn,
    /// Routing indicator digits 1-4 (0xF for unused digits)
    pub routing_indicator: [u8; 4],
    /// Protection scheme identifier
    pub protection_scheme: ProtectionScheme,
    /// Home network public key identifier
    pub home_network_public_key_id: u8,
    /// Scheme output (the MSIN in BCD for the null scheme)
    pub scheme_output: Vec<u8>,
}

impl SuciImsi {
    /// Octets before the scheme output: identity octet, PLMN, routing
    /// indicator, protection scheme, key identifier
    pub const HEADER_LEN: usize = 8;

    /// SUCI with the null protection scheme
    pub fn null_scheme(plmn: Plmn, routing_indicator: [u8; 4], msin: Vec<u8>) -> Self {
        Self {
            plmn,
            routing_indicator,
            protection_scheme: ProtectionScheme::Null,
            home_network_public_key_id: 0,
            scheme_output: msin,
        }
    }
}

/// Subscription Concealed Identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suci {
    /// SUPI format IMSI
    Imsi(SuciImsi),
    /// Any other SUPI format; the contents (a NAI for network specific
    /// identifiers) are kept as octets
    Other {
        /// SUPI format
        supi_format: SupiFormat,
        /// Octets after the identity octet
        value: Vec<u8>,
    },
}

impl Suci {
    /// SUPI format field
    pub fn supi_format(&self) -> SupiFormat {
        match self {
            Self::Imsi(_) => SupiFormat::Imsi,
            Self::Other { supi_format, .. } => *supi_format,
        }
    }
}

/// 5G Globally Unique Temporary Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guti {
    /// The five bits before the type of identity: 1111 filler and a spare bit
    pub head: u8,
    /// PLMN identity
    pub plmn: Plmn,
    /// AMF region ID
    pub amf_region_id: u8,
    /// AMF set ID (10 bits)
    pub amf_set_id: u16,
    /// AMF pointer (6 bits)
    pub amf_pointer: u8,
    /// 5G-TMSI
    pub tmsi: u32,
}

/// Leading five bits of a GUTI or S-TMSI identity octet: filler and spare
pub const IDENTITY_FILLER_HEAD: u8 = 0b11110;

impl Guti {
    /// Create a GUTI with the standard filler
    pub fn new(plmn: Plmn, amf_region_id: u8, amf_set_id: u16, amf_pointer: u8, tmsi: u32) -> Self {
        Self {
            head: IDENTITY_FILLER_HEAD,
            plmn,
            amf_region_id,
            amf_set_id,
            amf_pointer,
            tmsi,
        }
    }

    /// The 5G-S-TMSI part of this GUTI
    pub fn s_tmsi(&self) -> STmsi {
        STmsi::new(self.amf_set_id, self.amf_pointer, self.tmsi)
    }
}

/// 5G S-Temporary Mobile Subscriber Identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct STmsi {
    /// The five bits before the type of identity: 1111 filler and a spare bit
    pub head: u8,
    /// AMF set ID (10 bits)
    pub amf_set_id: u16,
    /// AMF pointer (6 bits)
    pub amf_pointer: u8,
    /// 5G-TMSI
    pub tmsi: u32,
}

impl STmsi {
    /// Create an S-TMSI with the standard filler
    pub fn new(amf_set_id: u16, amf_pointer: u8, tmsi: u32) -> Self {
        Self {
            head: IDENTITY_FILLER_HEAD,
            amf_set_id,
            amf_pointer,
            tmsi,
        }
    }
}

/// IMEI or IMEISV as BCD digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BcdIdentity {
    /// Digits in order, one per element
    pub digits: Vec<u8>,
}

impl BcdIdentity {
    /// Parses a digit string such as `"356938035643809"`
    pub fn from_str_digits(digits: &str) -> CodecResult<Self> {
        let digits = digits
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| CodecError::InvalidValue(format!("not a digit: {c:?}")))
            })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Self { digits })
    }

    fn is_odd(&self) -> bool {
        self.digits.len() % 2 == 1
    }
}

impl fmt::Display for BcdIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.digits {
            write!(f, "{d:X}")?;
        }
        Ok(())
    }
}

/// 5GS Mobile Identity IE (Type 6, TLV-E)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ie5gsMobileIdentity {
    /// No identity
    NoIdentity,
    /// SUCI
    Suci(Suci),
    /// 5G-GUTI
    Guti(Guti),
    /// IMEI
    Imei(BcdIdentity),
    /// 5G-S-TMSI
    Tmsi(STmsi),
    /// IMEISV
    ImeiSv(BcdIdentity),
    /// MAC address
    MacAddress {
        /// MAC address usage restriction indication
        mauri: bool,
        /// MAC address
        address: [u8; 6],
    },
    /// EUI-64
    Eui64([u8; 8]),
}

impl Default for Ie5gsMobileIdentity {
    fn default() -> Self {
        Self::NoIdentity
    }
}

macro_rules! checked_accessor {
    ($fn_name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        /// Checked access to the
        #[doc = $expected]
        /// variant
        pub fn $fn_name(&self) -> CodecResult<&$ty> {
            match self {
                Self::$variant(v) => Ok(v),
                other => Err(CodecError::VariantMismatch {
                    expected: $expected,
                    actual: other.identity_type().name(),
                }),
            }
        }
    };
}

impl Ie5gsMobileIdentity {
    const ENVELOPE: Envelope = Envelope::tlv_e("5GS mobile identity", 1, 65535);

    /// Type of identity held
    pub fn identity_type(&self) -> MobileIdentityType {
        match self {
            Self::NoIdentity => MobileIdentityType::NoIdentity,
            Self::Suci(_) => MobileIdentityType::Suci,
            Self::Guti(_) => MobileIdentityType::Guti,
            Self::Imei(_) => MobileIdentityType::Imei,
            Self::Tmsi(_) => MobileIdentityType::Tmsi,
            Self::ImeiSv(_) => MobileIdentityType::ImeiSv,
            Self::MacAddress { .. } => MobileIdentityType::MacAddress,
            Self::Eui64(_) => MobileIdentityType::Eui64,
        }
    }

    checked_accessor!(suci, Suci, Suci, "SUCI");
    checked_accessor!(guti, Guti, Guti, "5G-GUTI");
    checked_accessor!(imei, Imei, BcdIdentity, "IMEI");
    checked_accessor!(s_tmsi, Tmsi, STmsi, "5G-S-TMSI");
    checked_accessor!(imeisv, ImeiSv, BcdIdentity, "IMEISV");
    checked_accessor!(eui64, Eui64, [u8; 8], "EUI-64");

    /// Checked access to the MAC address variant, as its MAURI flag and
    /// address octets
    pub fn mac_address(&self) -> CodecResult<(bool, &[u8; 6])> {
        match self {
            Self::MacAddress { mauri, address } => Ok((*mauri, address)),
            other => Err(CodecError::VariantMismatch {
                expected: "MAC address",
                actual: other.identity_type().name(),
            }),
        }
    }

    fn encode_contents(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        let kind = self.identity_type();
        match self {
            Self::NoIdentity => {
                buf.skip(5);
                write_enum(buf, kind, 3)?;
            }
            Self::Suci(suci) => {
                buf.skip(1);
                write_enum(buf, suci.supi_format(), 3)?;
                buf.skip(1);
                write_enum(buf, kind, 3)?;
                match suci {
                    Suci::Imsi(imsi) => {
                        imsi.plmn.nas_encode(buf)?;
                        let ri = imsi.routing_indicator;
                        for digit in [ri[1], ri[0], ri[3], ri[2]] {
                            buf.write_bits(u32::from(digit), 4)?;
                        }
                        buf.skip(4);
                        write_enum(buf, imsi.protection_scheme, 4)?;
                        buf.write_bits(u32::from(imsi.home_network_public_key_id), 8)?;
                        buf.write_octets(&imsi.scheme_output);
                    }
                    Suci::Other { value, .. } => buf.write_octets(value),
                }
            }
            Self::Guti(guti) => {
                buf.write_bits(u32::from(fit_bits(guti.head, 5)?), 5)?;
                write_enum(buf, kind, 3)?;
                guti.plmn.nas_encode(buf)?;
                buf.write_bits(u32::from(guti.amf_region_id), 8)?;
                buf.write_bits(u32::from(guti.amf_set_id), 10)?;
                buf.write_bits(u32::from(guti.amf_pointer), 6)?;
                buf.write_bits(guti.tmsi, 32)?;
            }
            Self::Tmsi(tmsi) => {
                buf.write_bits(u32::from(fit_bits(tmsi.head, 5)?), 5)?;
                write_enum(buf, kind, 3)?;
                buf.write_bits(u32::from(tmsi.amf_set_id), 10)?;
                buf.write_bits(u32::from(tmsi.amf_pointer), 6)?;
                buf.write_bits(tmsi.tmsi, 32)?;
            }
            Self::Imei(bcd) | Self::ImeiSv(bcd) => {
                let (first, rest) = bcd.digits.split_first().ok_or_else(|| {
                    CodecError::EncodingError(format!("{} without digits", kind.name()))
                })?;
                buf.write_bits(u32::from(*first), 4)?;
                write_flag(buf, bcd.is_odd());
                write_enum(buf, kind, 3)?;
                for pair in rest.chunks(2) {
                    let high = pair.get(1).copied().unwrap_or(BCD_FILLER);
                    buf.write_bits(u32::from(high), 4)?;
                    buf.write_bits(u32::from(pair[0]), 4)?;
                }
            }
            Self::MacAddress { mauri, address } => {
                buf.skip(4);
                write_flag(buf, *mauri);
                write_enum(buf, kind, 3)?;
                buf.write_octets(address);
            }
            Self::Eui64(eui) => {
                buf.skip(5);
                write_enum(buf, kind, 3)?;
                buf.write_octets(eui);
            }
        }
        Ok(())
    }

    fn decode_contents(buf: &mut BitBufferReader<'_>, length: usize) -> CodecResult<Self> {
        let head = buf.read_bits(5)? as u8;
        let kind = MobileIdentityType::from_bits(buf.read_bits(3)? as u8);
        let wrong_length = || CodecError::InvalidLengthForType {
            ie: "5GS mobile identity",
            length,
            kind: kind.into(),
        };
        let expect_length = |expected: usize| {
            if length == expected {
                Ok(())
            } else {
                Err(wrong_length())
            }
        };

        match kind {
            MobileIdentityType::NoIdentity => Ok(Self::NoIdentity),
            MobileIdentityType::Suci => {
                let supi_format = SupiFormat::from((head >> 1) & 0b111);
                if supi_format != SupiFormat::Imsi {
                    let value = buf.read_octets(length - 1)?;
                    return Ok(Self::Suci(Suci::Other { supi_format, value }));
                }
                if length < SuciImsi::HEADER_LEN {
                    return Err(wrong_length());
                }
                let plmn = Plmn::nas_decode(buf)?;
                let mut ri = [0u8; 4];
                for index in [1, 0, 3, 2] {
                    ri[index] = buf.read_bits(4)? as u8;
                }
                buf.skip(4)?;
                let protection_scheme = read_enum(buf, 4)?;
                let home_network_public_key_id = buf.read_bits(8)? as u8;
                let scheme_output = buf.read_octets(length - SuciImsi::HEADER_LEN)?;
                Ok(Self::Suci(Suci::Imsi(SuciImsi {
                    plmn,
                    routing_indicator: ri,
                    protection_scheme,
                    home_network_public_key_id,
                    scheme_output,
                })))
            }
            MobileIdentityType::Guti => {
                expect_length(11)?;
                Ok(Self::Guti(Guti {
                    head,
                    plmn: Plmn::nas_decode(buf)?,
                    amf_region_id: buf.read_bits(8)? as u8,
                    amf_set_id: buf.read_bits(10)? as u16,
                    amf_pointer: buf.read_bits(6)? as u8,
                    tmsi: buf.read_bits(32)?,
                }))
            }
            MobileIdentityType::Tmsi => {
                expect_length(7)?;
                Ok(Self::Tmsi(STmsi {
                    head,
                    amf_set_id: buf.read_bits(10)? as u16,
                    amf_pointer: buf.read_bits(6)? as u8,
                    tmsi: buf.read_bits(32)?,
                }))
            }
            MobileIdentityType::Imei | MobileIdentityType::ImeiSv => {
                expect_length(if kind == MobileIdentityType::Imei { 8 } else { 9 })?;
                let odd = head & 0x01 == 1;
                let mut digits = vec![head >> 1];
                for index in 1..length {
                    let high = buf.read_bits(4)? as u8;
                    let low = buf.read_bits(4)? as u8;
                    digits.push(low);
                    let last = index == length - 1;
                    if !(last && !odd && high == BCD_FILLER) {
                        digits.push(high);
                    }
                }
                let bcd = BcdIdentity { digits };
                if kind == MobileIdentityType::Imei {
                    Ok(Self::Imei(bcd))
                } else {
                    Ok(Self::ImeiSv(bcd))
                }
            }
            MobileIdentityType::MacAddress => {
                expect_length(7)?;
                let mauri = head & 0x01 == 1;
                Ok(Self::MacAddress {
                    mauri,
                    address: buf.read_array::<6>()?,
                })
            }
            MobileIdentityType::Eui64 => {
                expect_length(9)?;
                Ok(Self::Eui64(buf.read_array::<8>()?))
            }
        }
    }
}

impl NasEncode for Ie5gsMobileIdentity {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| self.encode_contents(b))
    }
}

impl NasDecode for Ie5gsMobileIdentity {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, Self::decode_contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ie: &Ie5gsMobileIdentity) -> CodecResult<Vec<u8>> {
        let mut buf = BitBuffer::new();
        ie.nas_encode(&mut buf)?;
        Ok(buf.into_vec())
    }

    fn decode(data: &[u8]) -> CodecResult<Ie5gsMobileIdentity> {
        let mut reader = BitBufferReader::new(data);
        Ie5gsMobileIdentity::nas_decode(&mut reader)
    }

    #[test]
    fn test_guti_all_zero_capture() {
        let data = [
            0x00, 0x0B, 0xF2, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let identity = decode(&data).unwrap();
        let guti = identity.guti().unwrap();
        assert_eq!(guti.head, IDENTITY_FILLER_HEAD);
        assert_eq!(guti.plmn, Plmn::from_bytes([0, 0, 0]));
        assert_eq!(guti.amf_region_id, 0);
        assert_eq!(guti.amf_set_id, 0);
        assert_eq!(guti.amf_pointer, 0);
        assert_eq!(guti.tmsi, 0);
        assert_eq!(encode(&identity).unwrap(), data.to_vec());
    }

    #[test]
    fn test_guti_fields() {
        let guti = Guti::new(Plmn::new(1, 1, false), 0xCA, 0x3F8, 0x2A, 0x1234_5678);
        let encoded = encode(&Ie5gsMobileIdentity::Guti(guti)).unwrap();
        assert_eq!(
            encoded,
            vec![0x00, 0x0B, 0xF2, 0x00, 0xF1, 0x10, 0xCA, 0xFE, 0x2A, 0x12, 0x34, 0x56, 0x78]
        );
        assert_eq!(decode(&encoded).unwrap(), Ie5gsMobileIdentity::Guti(guti));
    }

    #[test]
    fn test_guti_field_overflow() {
        let mut guti = Guti::new(Plmn::default(), 0, 0x400, 0, 0);
        assert!(encode(&Ie5gsMobileIdentity::Guti(guti)).is_err());
        guti.amf_set_id = 0;
        guti.head = 0x20;
        assert!(encode(&Ie5gsMobileIdentity::Guti(guti)).is_err());
    }

    #[test]
    fn test_suci_null_scheme() {
        let suci = SuciImsi::null_scheme(
            Plmn::new(1, 1, false),
            [0, BCD_FILLER, BCD_FILLER, BCD_FILLER],
            vec![0x00, 0x00, 0x00, 0x00, 0x10],
        );
        let identity = Ie5gsMobileIdentity::Suci(Suci::Imsi(suci));
        let encoded = encode(&identity).unwrap();
        assert_eq!(
            encoded,
            vec![0x00, 0x0D, 0x01, 0x00, 0xF1, 0x10, 0xF0, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10]
        );
        assert_eq!(decode(&encoded).unwrap(), identity);
    }

    #[test]
    fn test_suci_imsi_too_short() {
        let data = [0x00, 0x04, 0x01, 0x00, 0xF1, 0x10];
        assert!(matches!(
            decode(&data),
            Err(CodecError::InvalidLengthForType { length: 4, kind: 1, .. })
        ));
    }

    #[test]
    fn test_suci_nai() {
        let data = [0x00, 0x04, 0x11, b'a', b'@', b'b'];
        let identity = decode(&data).unwrap();
        let suci = identity.suci().unwrap();
        assert_eq!(suci.supi_format(), SupiFormat::NetworkSpecificIdentifier);
        assert_eq!(encode(&identity).unwrap(), data.to_vec());
    }

    #[test]
    fn test_s_tmsi() {
        let tmsi = STmsi::new(0x001, 0x01, 0xC000_0001);
        let encoded = encode(&Ie5gsMobileIdentity::Tmsi(tmsi)).unwrap();
        assert_eq!(encoded, vec![0x00, 0x07, 0xF4, 0x00, 0x41, 0xC0, 0x00, 0x00, 0x01]);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(*decoded.s_tmsi().unwrap(), tmsi);
        assert!(matches!(
            decoded.guti(),
            Err(CodecError::VariantMismatch { expected: "5G-GUTI", actual: "5G-S-TMSI" })
        ));
    }

    #[test]
    fn test_imeisv_even_digits() {
        let imeisv = BcdIdentity::from_str_digits("4370816125816151").unwrap();
        let identity = Ie5gsMobileIdentity::ImeiSv(imeisv.clone());
        let encoded = encode(&identity).unwrap();
        assert_eq!(
            encoded,
            vec![0x00, 0x09, 0x45, 0x73, 0x80, 0x61, 0x21, 0x85, 0x61, 0x51, 0xF1]
        );
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.imeisv().unwrap().to_string(), "4370816125816151");
    }

    #[test]
    fn test_imei_odd_digits() {
        let imei = BcdIdentity::from_str_digits("356938035643809").unwrap();
        let identity = Ie5gsMobileIdentity::Imei(imei);
        let encoded = encode(&identity).unwrap();
        assert_eq!(encoded[2], 0x3B);
        assert_eq!(encoded.len(), 10);
        assert_eq!(decode(&encoded).unwrap(), identity);
    }

    #[test]
    fn test_fixed_shape_length_mismatch() {
        // GUTI announced with 7 octets
        let data = [0x00, 0x07, 0xF2, 0x00, 0xF1, 0x10, 0x00, 0x00, 0x00];
        assert!(matches!(
            decode(&data),
            Err(CodecError::InvalidLengthForType { length: 7, kind: 2, .. })
        ));
    }

    #[test]
    fn test_every_type_selects_its_variant() {
        let cases: [(&[u8], MobileIdentityType); 8] = [
            (&[0x00, 0x01, 0x00], MobileIdentityType::NoIdentity),
            (&[0x00, 0x02, 0x11, 0x00], MobileIdentityType::Suci),
            (&[0x00, 0x0B, 0xF2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], MobileIdentityType::Guti),
            (&[0x00, 0x08, 0x3B, 0, 0, 0, 0, 0, 0, 0], MobileIdentityType::Imei),
            (&[0x00, 0x07, 0xF4, 0, 0, 0, 0, 0, 0], MobileIdentityType::Tmsi),
            (&[0x00, 0x09, 0x05, 0, 0, 0, 0, 0, 0, 0, 0xF0], MobileIdentityType::ImeiSv),
            (&[0x00, 0x07, 0x0E, 1, 2, 3, 4, 5, 6], MobileIdentityType::MacAddress),
            (&[0x00, 0x09, 0x07, 1, 2, 3, 4, 5, 6, 7, 8], MobileIdentityType::Eui64),
        ];
        for (data, kind) in cases {
            let identity = decode(data).unwrap();
            assert_eq!(identity.identity_type(), kind);
            assert_eq!(encode(&identity).unwrap(), data.to_vec(), "{kind}");
        }
    }

    #[test]
    fn test_mac_address_mauri() {
        let identity = decode(&[0x00, 0x07, 0x0E, 1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(
            identity,
            Ie5gsMobileIdentity::MacAddress {
                mauri: true,
                address: [1, 2, 3, 4, 5, 6]
            }
        );
    }

    #[test]
    fn test_mac_address_and_eui64_accessors() {
        let mac = decode(&[0x00, 0x07, 0x06, 1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(mac.mac_address().unwrap(), (false, &[1, 2, 3, 4, 5, 6]));
        assert!(matches!(
            mac.eui64(),
            Err(CodecError::VariantMismatch {
                expected: "EUI-64",
                actual: "MAC address"
            })
        ));

        let eui = decode(&[0x00, 0x09, 0x07, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(eui.eui64().unwrap(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(matches!(
            eui.mac_address(),
            Err(CodecError::VariantMismatch {
                expected: "MAC address",
                actual: "EUI-64"
            })
        ));
    }
}
