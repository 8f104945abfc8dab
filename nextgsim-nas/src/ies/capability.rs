//! Capability and feature-support bitmaps
//!
//! These IEs are flag octets whose length grows with each release. The
//! contents are kept as received, so octets this codec does not name
//! survive a decode/encode cycle; named bits are read and written through
//! [`CapabilityBit`] constants.

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{CodecError, CodecResult, Envelope, NasDecode, NasEncode};

/// Position of a flag: contents octet index (0-based) and bit number
/// (1-8, bit 8 being the most significant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityBit {
    /// Contents octet index
    pub octet: usize,
    /// Bit number within the octet, 1-8
    pub bit: u8,
}

impl CapabilityBit {
    /// Create a bit position
    pub const fn new(octet: usize, bit: u8) -> Self {
        Self { octet, bit }
    }

    fn mask(&self) -> u8 {
        1 << (self.bit.clamp(1, 8) - 1)
    }
}

macro_rules! capability_ie {
    (
        $(#[$doc:meta])*
        $name:ident, $envelope:expr, default_len = $default_len:literal,
        { $($(#[$flag_doc:meta])* $flag:ident = ($octet:literal, $bit:literal)),* $(,)? }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            /// Contents octets
            pub octets: Vec<u8>,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    octets: vec![0; $default_len],
                }
            }
        }

        impl $name {
            const ENVELOPE: Envelope = $envelope;

            $(
                $(#[$flag_doc])*
                pub const $flag: CapabilityBit = CapabilityBit::new($octet, $bit);
            )*

            /// Create from contents octets
            pub fn new(octets: Vec<u8>) -> Self {
                Self { octets }
            }

            /// Returns the flag at `bit`; octets beyond the contents read as zero
            pub fn is_set(&self, bit: CapabilityBit) -> bool {
                self.octets
                    .get(bit.octet)
                    .is_some_and(|octet| octet & bit.mask() != 0)
            }

            /// Sets or clears the flag at `bit`, growing the contents if needed
            pub fn set(&mut self, bit: CapabilityBit, value: bool) {
                if self.octets.len() <= bit.octet {
                    if !value {
                        return;
                    }
                    self.octets.resize(bit.octet + 1, 0);
                }
                if value {
                    self.octets[bit.octet] |= bit.mask();
                } else {
                    self.octets[bit.octet] &= !bit.mask();
                }
            }

            /// Builder form of [`set`](Self::set)
            pub fn with(mut self, bit: CapabilityBit) -> Self {
                self.set(bit, true);
                self
            }
        }

        impl NasEncode for $name {
            fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                Self::ENVELOPE.encode(buf, |b| {
                    b.write_octets(&self.octets);
                    Ok(())
                })
            }
        }

        impl NasDecode for $name {
            fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
                Self::ENVELOPE.decode(buf, |r, length| Ok(Self::new(r.read_octets(length)?)))
            }
        }
    };
}

capability_ie!(
    /// 5GMM Capability IE (3GPP TS 24.501 Section 9.11.3.1)
    Ie5gmmCapability, Envelope::tlv("5GMM capability", 1, 13), default_len = 3,
    {
        /// S1 mode supported
        S1_MODE = (0, 1),
        /// ATTACH REQUEST message containing PDN CONNECTIVITY REQUEST with request type handover
        HO_ATTACH = (0, 2),
        /// LTE positioning protocol supported
        LPP = (0, 3),
        /// Restriction on use of enhanced coverage supported
        RESTRICT_EC = (0, 4),
        /// Control plane CIoT 5GS optimization supported
        CP_CIOT = (0, 5),
        /// N3 data transfer supported
        N3_DATA = (0, 6),
        /// IP header compression for control plane CIoT 5GS optimization supported
        IPHC_CP_CIOT = (0, 7),
        /// Service gap control supported
        SGC = (0, 8),
        /// 5G-SRVCC from NG-RAN to UTRAN supported
        SRVCC = (1, 1),
        /// User plane CIoT 5GS optimization supported
        UP_CIOT = (1, 2),
        /// V2X supported
        V2X = (1, 3),
        /// V2X communication over E-UTRA-PC5 supported
        V2XCEPC5 = (1, 4),
        /// V2X communication over NR-PC5 supported
        V2XCNPC5 = (1, 5),
        /// Location services notification mechanisms supported
        LCS = (1, 6),
        /// Network slice-specific authentication and authorization supported
        NSSAA = (1, 7),
        /// Radio capability signalling optimisation supported
        RACS = (1, 8),
        /// Closed access group supported
        CAG = (2, 1),
        /// WUS assistance information reception supported
        WUSA = (2, 2),
        /// Multiple user-plane resources supported
        MULTIPLE_UP = (2, 3),
        /// Ethernet header compression for control plane CIoT 5GS optimization supported
        EHC_CP_CIOT = (2, 4),
    }
);

capability_ie!(
    /// S1 UE Network Capability IE (3GPP TS 24.301 Section 9.9.3.34)
    ///
    /// Octets 1-4 are the EEA, EIA, UEA and UIA algorithm bitmaps with
    /// algorithm 0 in bit 8.
    IeS1UeNetworkCapability, Envelope::tlv("S1 UE network capability", 2, 13), default_len = 7,
    {
        /// EEA0 supported
        EEA0 = (0, 8),
        /// 128-EEA1 supported
        EEA1 = (0, 7),
        /// 128-EEA2 supported
        EEA2 = (0, 6),
        /// 128-EEA3 supported
        EEA3 = (0, 5),
        /// EIA0 supported
        EIA0 = (1, 8),
        /// 128-EIA1 supported
        EIA1 = (1, 7),
        /// 128-EIA2 supported
        EIA2 = (1, 6),
        /// 128-EIA3 supported
        EIA3 = (1, 5),
        /// UCS2 support
        UCS2 = (3, 8),
        /// LTE positioning protocol supported
        LPP = (4, 4),
        /// Location services notification mechanisms supported
        LCS = (4, 3),
        /// Extended protocol configuration options supported
        EPCO = (5, 8),
        /// Control plane CIoT EPS optimization supported
        CP_CIOT = (5, 3),
        /// N1 mode supported
        N1_MODE = (6, 6),
        /// Dual connectivity with NR supported
        DCNR = (6, 5),
    }
);

capability_ie!(
    /// S1 UE Security Capability IE (3GPP TS 24.501 Section 9.11.3.48A)
    IeS1UeSecurityCapability, Envelope::tlv("S1 UE security capability", 2, 5), default_len = 2,
    {
        /// EEA0 supported
        EEA0 = (0, 8),
        /// 128-EEA1 supported
        EEA1 = (0, 7),
        /// 128-EEA2 supported
        EEA2 = (0, 6),
        /// 128-EEA3 supported
        EEA3 = (0, 5),
        /// EIA0 supported
        EIA0 = (1, 8),
        /// 128-EIA1 supported
        EIA1 = (1, 7),
        /// 128-EIA2 supported
        EIA2 = (1, 6),
        /// 128-EIA3 supported
        EIA3 = (1, 5),
    }
);

capability_ie!(
    /// 5GSM Capability IE (3GPP TS 24.501 Section 9.11.4.1)
    Ie5gsmCapability, Envelope::tlv("5GSM capability", 1, 13), default_len = 1,
    {
        /// Reflective QoS supported
        RQOS = (0, 1),
        /// Multi-homed IPv6 PDU session supported
        MH6PDU = (0, 2),
        /// Ethernet PDN type in S1 mode supported
        EPT_S1 = (0, 3),
        /// ATSSS Low-Layer functionality supported
        ATS_LL = (0, 4),
        /// Transfer of port management information containers supported
        TPMIC = (0, 5),
        /// Access performance measurements per QoS flow supported
        APMQF = (0, 6),
    }
);

capability_ie!(
    /// 5GS Network Feature Support IE (3GPP TS 24.501 Section 9.11.3.5)
    IeNetworkFeatureSupport5gs, Envelope::tlv("5GS network feature support", 1, 3), default_len = 2,
    {
        /// IMS voice over PS session supported over 3GPP access
        IMS_VOPS_3GPP = (0, 1),
        /// IMS voice over PS session supported over non-3GPP access
        IMS_VOPS_N3GPP = (0, 2),
        /// Interworking without N26 supported
        IWK_N26 = (0, 7),
        /// MPS indicator
        MPSI = (0, 8),
        /// Emergency services supported over non-3GPP access
        EMCN3 = (1, 1),
        /// MCS indicator
        MCSI = (1, 2),
        /// Restriction on enhanced coverage
        RESTRICT_EC = (1, 3),
        /// Control plane CIoT 5GS optimization supported
        CP_CIOT = (1, 4),
        /// N3 data transfer supported
        N3_DATA = (1, 5),
        /// User plane CIoT 5GS optimization supported
        UP_CIOT = (1, 7),
        /// Location services indicator
        LCS = (1, 8),
    }
);

capability_ie!(
    /// 5GSM Network Feature Support IE (3GPP TS 24.501 Section 9.11.4.18)
    IeNetworkFeatureSupport5gsm, Envelope::tlv("5GSM network feature support", 1, 13), default_len = 1,
    {
        /// Ethernet PDN type in S1 mode supported
        EPT_S1 = (0, 1),
    }
);

// ============================================================================
// UE Security Capability IE (3GPP TS 24.501 Section 9.11.3.54)
// ============================================================================

/// UE Security Capability IE (Type 4, TLV)
///
/// Contains the UE's security algorithm capabilities, including
/// supported 5GS encryption algorithms (EA0-EA7) and 5GS integrity
/// algorithms (IA0-IA7), optionally followed by the EPS ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IeUeSecurityCapability {
    /// 5GS encryption algorithms supported (EA0 = bit 7, EA7 = bit 0)
    pub ea: u8,
    /// 5GS integrity algorithms supported (IA0 = bit 7, IA7 = bit 0)
    pub ia: u8,
    /// EPS encryption algorithms supported (optional, EEA0 = bit 7, EEA7 = bit 0)
    pub eea: Option<u8>,
    /// EPS integrity algorithms supported (optional, EIA0 = bit 7, EIA7 = bit 0)
    pub eia: Option<u8>,
    /// Spare octets after the EPS algorithms
    pub spare: Vec<u8>,
}

impl Default for IeUeSecurityCapability {
    fn default() -> Self {
        Self::new(0x80, 0x80)
    }
}

impl IeUeSecurityCapability {
    const ENVELOPE: Envelope = Envelope::tlv("UE security capability", 2, 8);

    /// Create a new UE Security Capability IE
    pub fn new(ea: u8, ia: u8) -> Self {
        Self {
            ea,
            ia,
            eea: None,
            eia: None,
            spare: Vec::new(),
        }
    }

    /// Create with EPS capabilities
    pub fn with_eps(ea: u8, ia: u8, eea: u8, eia: u8) -> Self {
        Self {
            eea: Some(eea),
            eia: Some(eia),
            ..Self::new(ea, ia)
        }
    }

    /// Contents length implied by the populated fields.
    ///
    /// Each optional octet is only present on the wire when the one before
    /// it is, so EIA without EEA, or spare octets without EIA, cannot be
    /// encoded.
    pub fn content_length(&self) -> CodecResult<usize> {
        match (self.eea, self.eia, self.spare.is_empty()) {
            (None, None, true) => Ok(2),
            (Some(_), None, true) => Ok(3),
            (Some(_), Some(_), _) => Ok(4 + self.spare.len()),
            _ => Err(CodecError::EncodingError(format!(
                "UE security capability has no encoding for eea={:?} eia={:?} with {} spare octets",
                self.eea,
                self.eia,
                self.spare.len()
            ))),
        }
    }

    /// Check if a specific 5GS encryption algorithm is supported (0=EA0, 7=EA7)
    pub fn supports_ea(&self, alg: u8) -> bool {
        alg <= 7 && (self.ea >> (7 - alg)) & 0x01 == 1
    }

    /// Check if a specific 5GS integrity algorithm is supported (0=IA0, 7=IA7)
    pub fn supports_ia(&self, alg: u8) -> bool {
        alg <= 7 && (self.ia >> (7 - alg)) & 0x01 == 1
    }
}

impl NasEncode for IeUeSecurityCapability {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        self.content_length()?;
        Self::ENVELOPE.encode(buf, |b| {
            b.write_octets(&[self.ea, self.ia]);
            b.write_octets(self.eea.as_slice());
            b.write_octets(self.eia.as_slice());
            b.write_octets(&self.spare);
            Ok(())
        })
    }
}

impl NasDecode for IeUeSecurityCapability {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, length| {
            let [ea, ia] = r.read_array::<2>()?;
            let mut cap = Self::new(ea, ia);
            if length >= 3 {
                cap.eea = Some(r.read_bits(8)? as u8);
            }
            if length >= 4 {
                cap.eia = Some(r.read_bits(8)? as u8);
            }
            if length > 4 {
                cap.spare = r.read_octets(length - 4)?;
            }
            Ok(cap)
        })
    }
}
