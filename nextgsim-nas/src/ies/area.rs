//! PLMN lists, tracking area identity lists and service area lists
//!
//! TAI lists and service area lists are made of partial lists. Each partial
//! list starts with a one-octet header:
//!
//! ```text
//!   bit 8    : spare (TAI list) / allowed type (service area list)
//!   bits 7-6 : type of list
//!   bits 5-1 : number of elements minus one
//! ```

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{read_flag, write_flag, CodecError, CodecResult, Envelope, NasDecode, NasEncode};
use crate::ies::plmn::{Plmn, Tai};

/// Largest number of elements a partial list header can announce
pub const MAX_PARTIAL_LIST_ELEMENTS: usize = 32;

const LIST_TACS: u8 = 0b00;
const LIST_CONSECUTIVE_TACS: u8 = 0b01;
const LIST_TAIS: u8 = 0b10;
const LIST_ALL_TACS: u8 = 0b11;

// ============================================================================
// PLMN list (3GPP TS 24.501 Section 9.11.3.45)
// ============================================================================

/// PLMN List IE, used for the equivalent PLMNs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IePlmnList {
    /// PLMN identities
    pub plmns: Vec<Plmn>,
}

impl IePlmnList {
    const ENVELOPE: Envelope = Envelope::tlv("PLMN list", 3, 45);

    /// Create a new PLMN list
    pub fn new(plmns: Vec<Plmn>) -> Self {
        Self { plmns }
    }
}

impl NasEncode for IePlmnList {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for plmn in &self.plmns {
                plmn.nas_encode(b)?;
            }
            Ok(())
        })
    }
}

impl NasDecode for IePlmnList {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, length| {
            let plmns = (0..length / 3)
                .map(|_| Plmn::nas_decode(r))
                .collect::<CodecResult<Vec<_>>>()?;
            Ok(Self { plmns })
        })
    }
}

// ============================================================================
// Partial lists
// ============================================================================

/// Partial tracking area identity list (3GPP TS 24.501 Section 9.11.3.9)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialTaiList {
    /// Type 00: TACs belonging to one PLMN, non-consecutive values
    SinglePlmnList {
        /// PLMN shared by all TACs
        plmn: Plmn,
        /// Tracking area codes (24 bits each)
        tacs: Vec<u32>,
    },
    /// Type 01: TACs belonging to one PLMN, consecutive values
    SinglePlmnConsecutive {
        /// PLMN shared by all TACs
        plmn: Plmn,
        /// First tracking area code
        first_tac: u32,
        /// Number of consecutive TACs (1-32)
        count: u8,
    },
    /// Type 10: TAIs belonging to different PLMNs
    MultiplePlmns {
        /// Tracking area identities
        tais: Vec<Tai>,
    },
}

impl PartialTaiList {
    /// Tracking area identities covered by this partial list
    pub fn tais(&self) -> Vec<Tai> {
        match self {
            Self::SinglePlmnList { plmn, tacs } => tacs.iter().map(|tac| Tai::new(*plmn, *tac)).collect(),
            Self::SinglePlmnConsecutive {
                plmn,
                first_tac,
                count,
            } => (0..u32::from(*count))
                .map(|i| Tai::new(*plmn, (first_tac + i) & 0x00FF_FFFF))
                .collect(),
            Self::MultiplePlmns { tais } => tais.clone(),
        }
    }

    fn kind(&self) -> u8 {
        match self {
            Self::SinglePlmnList { .. } => LIST_TACS,
            Self::SinglePlmnConsecutive { .. } => LIST_CONSECUTIVE_TACS,
            Self::MultiplePlmns { .. } => LIST_TAIS,
        }
    }

    fn element_count(&self) -> usize {
        match self {
            Self::SinglePlmnList { tacs, .. } => tacs.len(),
            Self::SinglePlmnConsecutive { count, .. } => usize::from(*count),
            Self::MultiplePlmns { tais } => tais.len(),
        }
    }

    /// Writes the header fields after the leading bit, then the elements
    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.write_bits(u32::from(self.kind()), 2)?;
        write_element_count(buf, self.element_count())?;
        match self {
            Self::SinglePlmnList { plmn, tacs } => {
                plmn.nas_encode(buf)?;
                for tac in tacs {
                    buf.write_bits(*tac, 24)?;
                }
            }
            Self::SinglePlmnConsecutive { plmn, first_tac, .. } => {
                plmn.nas_encode(buf)?;
                buf.write_bits(*first_tac, 24)?;
            }
            Self::MultiplePlmns { tais } => {
                for tai in tais {
                    tai.nas_encode(buf)?;
                }
            }
        }
        Ok(())
    }

    /// Reads the elements of a partial list whose header has been consumed
    fn decode_body(buf: &mut BitBufferReader<'_>, kind: u8, count: usize) -> CodecResult<Self> {
        match kind {
            LIST_TACS => {
                let plmn = Plmn::nas_decode(buf)?;
                let tacs = (0..count)
                    .map(|_| buf.read_bits(24))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::SinglePlmnList { plmn, tacs })
            }
            LIST_CONSECUTIVE_TACS => {
                let plmn = Plmn::nas_decode(buf)?;
                let first_tac = buf.read_bits(24)?;
                Ok(Self::SinglePlmnConsecutive {
                    plmn,
                    first_tac,
                    // count is at most 32
                    count: count as u8,
                })
            }
            LIST_TAIS => {
                let tais = (0..count)
                    .map(|_| Tai::nas_decode(buf))
                    .collect::<CodecResult<Vec<_>>>()?;
                Ok(Self::MultiplePlmns { tais })
            }
            other => Err(CodecError::InvalidValue(format!(
                "reserved type of TAI list 0b{other:02b}"
            ))),
        }
    }
}

fn write_element_count(buf: &mut BitBuffer, count: usize) -> CodecResult<()> {
    if count == 0 || count > MAX_PARTIAL_LIST_ELEMENTS {
        return Err(CodecError::EncodingError(format!(
            "partial list with {count} elements, expected 1..={MAX_PARTIAL_LIST_ELEMENTS}"
        )));
    }
    buf.write_bits((count - 1) as u32, 5)?;
    Ok(())
}

fn read_element_count(buf: &mut BitBufferReader<'_>) -> CodecResult<usize> {
    Ok(buf.read_bits(5)? as usize + 1)
}

// ============================================================================
// 5GS tracking area identity list (3GPP TS 24.501 Section 9.11.3.9)
// ============================================================================

/// 5GS Tracking Area Identity List IE
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ie5gsTrackingAreaIdentityList {
    /// Partial lists in wire order
    pub lists: Vec<PartialTaiList>,
}

impl Ie5gsTrackingAreaIdentityList {
    const ENVELOPE: Envelope = Envelope::tlv("5GS tracking area identity list", 7, 114);

    /// Create a new TAI list
    pub fn new(lists: Vec<PartialTaiList>) -> Self {
        Self { lists }
    }

    /// All tracking area identities in the list
    pub fn tais(&self) -> Vec<Tai> {
        self.lists.iter().flat_map(PartialTaiList::tais).collect()
    }
}

impl NasEncode for Ie5gsTrackingAreaIdentityList {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for list in &self.lists {
                b.skip(1);
                list.encode_body(b)?;
            }
            Ok(())
        })
    }
}

impl NasDecode for Ie5gsTrackingAreaIdentityList {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut lists = Vec::new();
            while r.remaining_octets() > 0 {
                r.skip(1)?;
                let kind = r.read_bits(2)? as u8;
                let count = read_element_count(r)?;
                lists.push(PartialTaiList::decode_body(r, kind, count)?);
            }
            Ok(Self { lists })
        })
    }
}

// ============================================================================
// Service area list (3GPP TS 24.501 Section 9.11.3.49)
// ============================================================================

/// Tracking areas of a partial service area list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceArea {
    /// Types 00, 01 and 10, laid out as in a TAI list
    Tais(PartialTaiList),
    /// Type 11: all tracking areas of one PLMN
    AllTacsInPlmn(Plmn),
}

/// Partial service area list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialServiceAreaList {
    /// `true` if the areas are non-allowed, `false` if allowed (ALLT bit)
    pub non_allowed: bool,
    /// Tracking areas
    pub area: ServiceArea,
}

/// Service Area List IE
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeServiceAreaList {
    /// Partial service area lists in wire order
    pub lists: Vec<PartialServiceAreaList>,
}

impl IeServiceAreaList {
    const ENVELOPE: Envelope = Envelope::tlv("Service area list", 6, 114);

    /// Create a new service area list
    pub fn new(lists: Vec<PartialServiceAreaList>) -> Self {
        Self { lists }
    }
}

impl NasEncode for IeServiceAreaList {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for list in &self.lists {
                write_flag(b, list.non_allowed);
                match &list.area {
                    ServiceArea::Tais(tais) => tais.encode_body(b)?,
                    ServiceArea::AllTacsInPlmn(plmn) => {
                        b.write_bits(u32::from(LIST_ALL_TACS), 2)?;
                        b.skip(5);
                        plmn.nas_encode(b)?;
                    }
                }
            }
            Ok(())
        })
    }
}

impl NasDecode for IeServiceAreaList {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut lists = Vec::new();
            while r.remaining_octets() > 0 {
                let non_allowed = read_flag(r)?;
                let kind = r.read_bits(2)? as u8;
                let area = if kind == LIST_ALL_TACS {
                    r.skip(5)?;
                    ServiceArea::AllTacsInPlmn(Plmn::nas_decode(r)?)
                } else {
                    let count = read_element_count(r)?;
                    ServiceArea::Tais(PartialTaiList::decode_body(r, kind, count)?)
                };
                lists.push(PartialServiceAreaList { non_allowed, area });
            }
            Ok(Self { lists })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plmn() -> Plmn {
        Plmn::new(1, 1, false)
    }

    fn encode<T: NasEncode>(ie: &T) -> CodecResult<Vec<u8>> {
        let mut buf = BitBuffer::new();
        ie.nas_encode(&mut buf)?;
        Ok(buf.into_vec())
    }

    fn decode<T: NasDecode>(data: &[u8]) -> CodecResult<T> {
        let mut reader = BitBufferReader::new(data);
        T::nas_decode(&mut reader)
    }

    #[test]
    fn test_plmn_list() {
        let list = IePlmnList::new(vec![plmn(), Plmn::new(310, 410, true)]);
        let encoded = encode(&list).unwrap();
        assert_eq!(encoded, vec![0x06, 0x00, 0xF1, 0x10, 0x13, 0x00, 0x14]);
        assert_eq!(decode::<IePlmnList>(&encoded).unwrap(), list);
        assert!(encode(&IePlmnList::default()).is_err());
    }

    #[test]
    fn test_tai_list_single_tac() {
        let list = Ie5gsTrackingAreaIdentityList::new(vec![PartialTaiList::SinglePlmnList {
            plmn: plmn(),
            tacs: vec![0x000075],
        }]);
        let encoded = encode(&list).unwrap();
        assert_eq!(encoded, vec![0x07, 0x00, 0x00, 0xF1, 0x10, 0x00, 0x00, 0x75]);
        assert_eq!(decode::<Ie5gsTrackingAreaIdentityList>(&encoded).unwrap(), list);
    }

    #[test]
    fn test_tai_list_mixed_partial_lists() {
        let list = Ie5gsTrackingAreaIdentityList::new(vec![
            PartialTaiList::SinglePlmnConsecutive {
                plmn: plmn(),
                first_tac: 0x10,
                count: 3,
            },
            PartialTaiList::MultiplePlmns {
                tais: vec![Tai::new(plmn(), 1), Tai::new(Plmn::new(310, 410, true), 2)],
            },
        ]);
        let encoded = encode(&list).unwrap();
        assert_eq!(encoded[0] as usize, encoded.len() - 1);
        assert_eq!(encoded[1], 0x22);
        assert_eq!(encoded[8], 0x41);
        let decoded = decode::<Ie5gsTrackingAreaIdentityList>(&encoded).unwrap();
        assert_eq!(decoded, list);
        assert_eq!(decoded.tais().len(), 5);
        assert_eq!(decoded.tais()[2], Tai::new(plmn(), 0x12));
    }

    #[test]
    fn test_tai_list_rejects_empty_partial_list() {
        let list = Ie5gsTrackingAreaIdentityList::new(vec![PartialTaiList::SinglePlmnList {
            plmn: plmn(),
            tacs: Vec::new(),
        }]);
        assert!(matches!(encode(&list), Err(CodecError::EncodingError(_))));
    }

    #[test]
    fn test_tai_list_reserved_type() {
        let data = [0x07, 0x60, 0x00, 0xF1, 0x10, 0x00, 0x00, 0x01];
        assert!(matches!(
            decode::<Ie5gsTrackingAreaIdentityList>(&data),
            Err(CodecError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_service_area_list_all_tacs() {
        let list = IeServiceAreaList::new(vec![
            PartialServiceAreaList {
                non_allowed: true,
                area: ServiceArea::AllTacsInPlmn(plmn()),
            },
            PartialServiceAreaList {
                non_allowed: false,
                area: ServiceArea::Tais(PartialTaiList::SinglePlmnList {
                    plmn: plmn(),
                    tacs: vec![0x01, 0x02],
                }),
            },
        ]);
        let encoded = encode(&list).unwrap();
        assert_eq!(&encoded[..5], &[0x0E, 0xE0, 0x00, 0xF1, 0x10]);
        assert_eq!(encoded[5], 0x01);
        assert_eq!(decode::<IeServiceAreaList>(&encoded).unwrap(), list);
    }
}
