//! Network slice selection IEs
//!
//! The S-NSSAI has no type field of its own: the length octet tells which
//! optional parts are present.
//!
//! | length | contents                                       |
//! |--------|------------------------------------------------|
//! | 1      | SST                                            |
//! | 2      | SST, mapped HPLMN SST                          |
//! | 4      | SST, SD                                        |
//! | 5      | SST, SD, mapped HPLMN SST                      |
//! | 8      | SST, SD, mapped HPLMN SST, mapped HPLMN SD     |

use nextgsim_common::{BitBuffer, BitBufferReader};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::codec::{read_enum, write_enum, CodecError, CodecResult, Envelope, NasDecode, NasEncode};

/// Slice Service Type: enhanced mobile broadband
pub const SST_EMBB: u8 = 1;
/// Slice Service Type: ultra-reliable low latency communications
pub const SST_URLLC: u8 = 2;
/// Slice Service Type: massive IoT
pub const SST_MIOT: u8 = 3;

/// S-NSSAI IE (3GPP TS 24.501 Section 9.11.2.8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IeSNssai {
    /// Slice/service type
    pub sst: u8,
    /// Slice differentiator (24 bits)
    pub sd: Option<u32>,
    /// SST of the HPLMN S-NSSAI this one maps to
    pub mapped_hplmn_sst: Option<u8>,
    /// SD of the HPLMN S-NSSAI this one maps to (24 bits)
    pub mapped_hplmn_sd: Option<u32>,
}

impl IeSNssai {
    const ENVELOPE: Envelope = Envelope::tlv("S-NSSAI", 1, 8);

    /// S-NSSAI with an SST only
    pub fn new(sst: u8) -> Self {
        Self {
            sst,
            ..Self::default()
        }
    }

    /// S-NSSAI with SST and SD
    pub fn with_sd(sst: u8, sd: u32) -> Self {
        Self {
            sst,
            sd: Some(sd),
            ..Self::default()
        }
    }

    /// Contents length implied by the populated fields.
    ///
    /// Fails for combinations that have no wire representation, e.g. a
    /// mapped SD without a mapped SST.
    pub fn content_length(&self) -> CodecResult<usize> {
        match (self.sd, self.mapped_hplmn_sst, self.mapped_hplmn_sd) {
            (None, None, None) => Ok(1),
            (None, Some(_), None) => Ok(2),
            (Some(_), None, None) => Ok(4),
            (Some(_), Some(_), None) => Ok(5),
            (Some(_), Some(_), Some(_)) => Ok(8),
            _ => Err(CodecError::EncodingError(format!(
                "S-NSSAI has no encoding for sd={:?} mapped_sst={:?} mapped_sd={:?}",
                self.sd, self.mapped_hplmn_sst, self.mapped_hplmn_sd
            ))),
        }
    }

    fn encode_contents(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        // Rejects unrepresentable shapes before anything is written.
        self.content_length()?;
        buf.write_bits(u32::from(self.sst), 8)?;
        if let Some(sd) = self.sd {
            buf.write_bits(sd, 24)?;
        }
        if let Some(sst) = self.mapped_hplmn_sst {
            buf.write_bits(u32::from(sst), 8)?;
        }
        if let Some(sd) = self.mapped_hplmn_sd {
            buf.write_bits(sd, 24)?;
        }
        Ok(())
    }

    fn decode_contents(buf: &mut BitBufferReader<'_>, length: usize) -> CodecResult<Self> {
        let (has_sd, has_mapped_sst, has_mapped_sd) = match length {
            1 => (false, false, false),
            2 => (false, true, false),
            4 => (true, false, false),
            5 => (true, true, false),
            8 => (true, true, true),
            _ => {
                return Err(CodecError::InvalidLengthForType {
                    ie: "S-NSSAI",
                    length,
                    kind: 0,
                })
            }
        };
        let sst = buf.read_bits(8)? as u8;
        let sd = if has_sd { Some(buf.read_bits(24)?) } else { None };
        let mapped_hplmn_sst = if has_mapped_sst {
            Some(buf.read_bits(8)? as u8)
        } else {
            None
        };
        let mapped_hplmn_sd = if has_mapped_sd {
            Some(buf.read_bits(24)?)
        } else {
            None
        };
        Ok(Self {
            sst,
            sd,
            mapped_hplmn_sst,
            mapped_hplmn_sd,
        })
    }
}

impl NasEncode for IeSNssai {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| self.encode_contents(b))
    }
}

impl NasDecode for IeSNssai {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, Self::decode_contents)
    }
}

/// Declares an IE that is a length-prefixed sequence of S-NSSAI values
macro_rules! snssai_list_ie {
    ($(#[$doc:meta])* $name:ident, $envelope:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            /// S-NSSAI values
            pub s_nssai: Vec<IeSNssai>,
        }

        impl $name {
            const ENVELOPE: Envelope = $envelope;

            /// Create from S-NSSAI values
            pub fn new(s_nssai: Vec<IeSNssai>) -> Self {
                Self { s_nssai }
            }
        }

        impl NasEncode for $name {
            fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                Self::ENVELOPE.encode(buf, |b| {
                    for s_nssai in &self.s_nssai {
                        s_nssai.nas_encode(b)?;
                    }
                    Ok(())
                })
            }
        }

        impl NasDecode for $name {
            fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
                Self::ENVELOPE.decode(buf, |r, _| {
                    let mut s_nssai = Vec::new();
                    while r.remaining_octets() > 0 {
                        s_nssai.push(IeSNssai::nas_decode(r)?);
                    }
                    Ok(Self { s_nssai })
                })
            }
        }
    };
}

snssai_list_ie!(
    /// NSSAI IE (3GPP TS 24.501 Section 9.11.3.37)
    ///
    /// Used for requested, allowed, configured and pending NSSAI.
    IeNssai,
    Envelope::tlv("NSSAI", 2, 144)
);

snssai_list_ie!(
    /// Mapped NSSAI IE (3GPP TS 24.501 Section 9.11.3.31B)
    IeMappedNssai,
    Envelope::tlv("Mapped NSSAI", 2, 40)
);

/// Cause value of a rejected S-NSSAI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum RejectedSNssaiCause {
    /// S-NSSAI not available in the current PLMN or SNPN
    NotAvailableInCurrentPlmn = 0b0000,
    /// S-NSSAI not available in the current registration area
    NotAvailableInCurrentRegistrationArea = 0b0001,
    /// S-NSSAI not available due to the failed or revoked NSSAA
    NssaaFailedOrRevoked = 0b0010,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// A rejected S-NSSAI: cause plus SST and optional SD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedSNssai {
    /// Rejection cause
    pub cause: RejectedSNssaiCause,
    /// Slice/service type
    pub sst: u8,
    /// Slice differentiator (24 bits)
    pub sd: Option<u32>,
}

/// Rejected NSSAI IE (3GPP TS 24.501 Section 9.11.3.46)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeRejectedNssai {
    /// Rejected S-NSSAI values
    pub rejected: Vec<RejectedSNssai>,
}

impl IeRejectedNssai {
    const ENVELOPE: Envelope = Envelope::tlv("Rejected NSSAI", 2, 40);

    /// Create a new Rejected NSSAI IE
    pub fn new(rejected: Vec<RejectedSNssai>) -> Self {
        Self { rejected }
    }
}

impl NasEncode for IeRejectedNssai {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for item in &self.rejected {
                let length = if item.sd.is_some() { 4 } else { 1 };
                b.write_bits(length, 4)?;
                write_enum(b, item.cause, 4)?;
                b.write_bits(u32::from(item.sst), 8)?;
                if let Some(sd) = item.sd {
                    b.write_bits(sd, 24)?;
                }
            }
            Ok(())
        })
    }
}

impl NasDecode for IeRejectedNssai {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut rejected = Vec::new();
            while r.remaining_octets() > 0 {
                let length = r.read_bits(4)? as usize;
                let cause: RejectedSNssaiCause = read_enum(r, 4)?;
                if length != 1 && length != 4 {
                    return Err(CodecError::InvalidLengthForType {
                        ie: "Rejected S-NSSAI",
                        length,
                        kind: u8::from(cause),
                    });
                }
                let sst = r.read_bits(8)? as u8;
                let sd = if length == 4 { Some(r.read_bits(24)?) } else { None };
                rejected.push(RejectedSNssai { cause, sst, sd });
            }
            Ok(Self { rejected })
        })
    }
}
