//! PDU Address (3GPP TS 24.501 Section 9.11.4.10)
//!
//! The PDU session type value selects the address shape and the SI6LLA
//! flag appends the SMF's IPv6 link local address. Only the lengths of
//! the following combinations are valid:
//!
//! | type   | SI6LLA | length |
//! |--------|--------|--------|
//! | IPv4   | 0      | 5      |
//! | IPv6   | 0      | 9      |
//! | IPv4v6 | 0      | 13     |
//! | IPv6   | 1      | 25     |
//! | IPv4v6 | 1      | 29     |

use std::net::{Ipv4Addr, Ipv6Addr};

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{read_flag, write_flag, CodecError, CodecResult, Envelope, NasDecode, NasEncode};

/// PDU session type values carried in the address IE
const TYPE_IPV4: u8 = 0b001;
const TYPE_IPV6: u8 = 0b010;
const TYPE_IPV4V6: u8 = 0b011;

/// Address assigned to a PDU session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PduAddress {
    /// IPv4 address
    Ipv4(Ipv4Addr),
    /// IPv6 interface identifier
    Ipv6 {
        /// Interface identifier for the IPv6 link local address
        interface_id: [u8; 8],
    },
    /// IPv6 interface identifier followed by an IPv4 address
    Ipv4v6 {
        /// Interface identifier for the IPv6 link local address
        interface_id: [u8; 8],
        /// IPv4 address
        ipv4: Ipv4Addr,
    },
}

impl PduAddress {
    fn type_value(&self) -> u8 {
        match self {
            Self::Ipv4(_) => TYPE_IPV4,
            Self::Ipv6 { .. } => TYPE_IPV6,
            Self::Ipv4v6 { .. } => TYPE_IPV4V6,
        }
    }

    /// IPv4 address, if the shape carries one
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Ipv4(addr) | Self::Ipv4v6 { ipv4: addr, .. } => Some(*addr),
            Self::Ipv6 { .. } => None,
        }
    }
}

/// PDU Address IE (Type 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IePduAddress {
    /// Assigned address
    pub address: PduAddress,
    /// SMF's IPv6 link local address; present exactly when SI6LLA is set
    pub smf_ipv6_link_local: Option<Ipv6Addr>,
}

impl IePduAddress {
    const ENVELOPE: Envelope = Envelope::tlv("PDU address", 5, 29);

    /// Address without an SMF link local address
    pub fn new(address: PduAddress) -> Self {
        Self {
            address,
            smf_ipv6_link_local: None,
        }
    }

    /// Convenience constructor for an IPv4 address
    pub fn ipv4(addr: Ipv4Addr) -> Self {
        Self::new(PduAddress::Ipv4(addr))
    }
}

impl NasEncode for IePduAddress {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        if self.smf_ipv6_link_local.is_some() && matches!(self.address, PduAddress::Ipv4(_)) {
            return Err(CodecError::EncodingError(
                "SMF IPv6 link local address requires an IPv6 or IPv4v6 PDU address".into(),
            ));
        }
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(4);
            write_flag(b, self.smf_ipv6_link_local.is_some());
            b.write_bits(u32::from(self.address.type_value()), 3)?;
            match &self.address {
                PduAddress::Ipv4(addr) => b.write_octets(&addr.octets()),
                PduAddress::Ipv6 { interface_id } => b.write_octets(interface_id),
                PduAddress::Ipv4v6 { interface_id, ipv4 } => {
                    b.write_octets(interface_id);
                    b.write_octets(&ipv4.octets());
                }
            }
            if let Some(lla) = &self.smf_ipv6_link_local {
                b.write_octets(&lla.octets());
            }
            Ok(())
        })
    }
}

impl NasDecode for IePduAddress {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, length| {
            r.skip(4)?;
            let si6lla = read_flag(r)?;
            let kind = r.read_bits(3)? as u8;

            let address = match (kind, si6lla, length) {
                (TYPE_IPV4, false, 5) => PduAddress::Ipv4(Ipv4Addr::from(r.read_array::<4>()?)),
                (TYPE_IPV6, false, 9) | (TYPE_IPV6, true, 25) => PduAddress::Ipv6 {
                    interface_id: r.read_array::<8>()?,
                },
                (TYPE_IPV4V6, false, 13) | (TYPE_IPV4V6, true, 29) => PduAddress::Ipv4v6 {
                    interface_id: r.read_array::<8>()?,
                    ipv4: Ipv4Addr::from(r.read_array::<4>()?),
                },
                _ => {
                    return Err(CodecError::InvalidLengthForType {
                        ie: "PDU address",
                        length,
                        kind,
                    })
                }
            };
            let smf_ipv6_link_local = if si6lla {
                Some(Ipv6Addr::from(r.read_array::<16>()?))
            } else {
                None
            };
            Ok(Self {
                address,
                smf_ipv6_link_local,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(ie: &IePduAddress) -> CodecResult<Vec<u8>> {
        let mut buf = BitBuffer::new();
        ie.nas_encode(&mut buf)?;
        Ok(buf.into_vec())
    }

    fn decode(data: &[u8]) -> CodecResult<IePduAddress> {
        let mut reader = BitBufferReader::new(data);
        IePduAddress::nas_decode(&mut reader)
    }

    #[test]
    fn test_ipv4() {
        let ie = IePduAddress::ipv4(Ipv4Addr::new(10, 45, 0, 2));
        let encoded = encode(&ie).unwrap();
        assert_eq!(encoded, vec![0x05, 0x01, 10, 45, 0, 2]);
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.address.ipv4(), Some(Ipv4Addr::new(10, 45, 0, 2)));
        assert_eq!(decoded, ie);
    }

    #[test]
    fn test_ipv6_interface_identifier() {
        let ie = IePduAddress::new(PduAddress::Ipv6 {
            interface_id: [0, 0, 0, 0, 0, 0, 0, 1],
        });
        let encoded = encode(&ie).unwrap();
        assert_eq!(encoded, vec![0x09, 0x02, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(decode(&encoded).unwrap(), ie);
    }

    #[test]
    fn test_ipv4v6_with_link_local() {
        let ie = IePduAddress {
            address: PduAddress::Ipv4v6 {
                interface_id: [1; 8],
                ipv4: Ipv4Addr::new(192, 168, 0, 1),
            },
            smf_ipv6_link_local: Some(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)),
        };
        let encoded = encode(&ie).unwrap();
        assert_eq!(encoded[0], 29);
        assert_eq!(encoded[1], 0x0B);
        assert_eq!(encoded.len(), 30);
        assert_eq!(decode(&encoded).unwrap(), ie);
    }

    #[test]
    fn test_ipv6_with_link_local_length() {
        let mut data = vec![25, 0x0A];
        data.extend_from_slice(&[2; 8]);
        data.extend_from_slice(&Ipv6Addr::LOCALHOST.octets());
        let ie = decode(&data).unwrap();
        assert_eq!(ie.smf_ipv6_link_local, Some(Ipv6Addr::LOCALHOST));
        assert_eq!(encode(&ie).unwrap(), data);
    }

    #[test]
    fn test_invalid_length_for_type() {
        // IPv4 type with 9 octets
        let data = [0x09, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            decode(&data),
            Err(CodecError::InvalidLengthForType {
                ie: "PDU address",
                length: 9,
                kind: TYPE_IPV4
            })
        );
        // SI6LLA with an IPv4-only address
        let data = [0x05, 0x09, 0, 0, 0, 0];
        assert!(matches!(decode(&data), Err(CodecError::InvalidLengthForType { .. })));
    }

    #[test]
    fn test_link_local_with_ipv4_rejected_on_encode() {
        let ie = IePduAddress {
            address: PduAddress::Ipv4(Ipv4Addr::LOCALHOST),
            smf_ipv6_link_local: Some(Ipv6Addr::LOCALHOST),
        };
        assert!(matches!(encode(&ie), Err(CodecError::EncodingError(_))));
    }
}
