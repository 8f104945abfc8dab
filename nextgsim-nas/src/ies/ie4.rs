//! Type 4 Information Elements (variable length, TLV)
//!
//! Type 4 IEs carry a 1-byte length field followed by the contents. Some
//! of them have a fixed contents length that is still announced by the
//! length field; the decoder insists on it.
//!
//! Based on 3GPP TS 24.501 specification.

use nextgsim_common::{BitBuffer, BitBufferReader};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::codec::{
    read_enum, read_flag, write_enum, write_flag, CodecError, CodecResult, Envelope, NasDecode,
    NasEncode,
};

// ============================================================================
// Enumerations for Type 4 IEs
// ============================================================================

/// GPRS timer 3 value unit (3GPP TS 24.008 Section 10.5.7.4a)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum GprsTimer3Unit {
    /// Value is incremented in multiples of 10 minutes
    MultiplesOf10Minutes = 0b000,
    /// Value is incremented in multiples of 1 hour
    MultiplesOf1Hour = 0b001,
    /// Value is incremented in multiples of 10 hours
    MultiplesOf10Hours = 0b010,
    /// Value is incremented in multiples of 2 seconds
    MultiplesOf2Seconds = 0b011,
    /// Value is incremented in multiples of 30 seconds
    MultiplesOf30Seconds = 0b100,
    /// Value is incremented in multiples of 1 minute
    MultiplesOf1Minute = 0b101,
    /// Value is incremented in multiples of 320 hours
    MultiplesOf320Hours = 0b110,
    /// Timer is deactivated
    Deactivated = 0b111,
    /// Out of range raw value
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Daylight saving time value (3GPP TS 24.501 Section 9.11.3.19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DaylightSavingTime {
    /// No adjustment for daylight saving time
    NoAdjustment = 0b00,
    /// +1 hour adjustment for daylight saving time
    PlusOneHour = 0b01,
    /// +2 hours adjustment for daylight saving time
    PlusTwoHours = 0b10,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// UE's usage setting (3GPP TS 24.501 Section 9.11.3.55)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum UeUsageSetting {
    /// Voice centric
    #[default]
    VoiceCentric = 0b0,
    /// Data centric
    DataCentric = 0b1,
}

/// DRX value (3GPP TS 24.501 Section 9.11.3.2A and 9.11.3.73)
///
/// The 512 and 1024 cycles are only defined for NB-N1 mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DrxValue {
    /// DRX value not specified
    NotSpecified = 0b0000,
    /// DRX cycle parameter T = 32
    Cycle32 = 0b0001,
    /// DRX cycle parameter T = 64
    Cycle64 = 0b0010,
    /// DRX cycle parameter T = 128
    Cycle128 = 0b0011,
    /// DRX cycle parameter T = 256
    Cycle256 = 0b0100,
    /// DRX cycle parameter T = 512
    Cycle512 = 0b0101,
    /// DRX cycle parameter T = 1024
    Cycle1024 = 0b0111,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Preferred network behaviour for CIoT optimizations
/// (3GPP TS 24.501 Section 9.11.3.9A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum PreferredCiotBehaviour {
    /// No additional information
    NoAdditionalInformation = 0b00,
    /// Control plane CIoT optimization
    ControlPlane = 0b01,
    /// User plane CIoT optimization
    UserPlane = 0b10,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// 5GS registration result value (3GPP TS 24.501 Section 9.11.3.6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum RegistrationResult {
    /// 3GPP access
    ThreeGppAccess = 0b001,
    /// Non-3GPP access
    NonThreeGppAccess = 0b010,
    /// 3GPP access and non-3GPP access
    ThreeGppAndNonThreeGppAccess = 0b011,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Session-AMBR unit (3GPP TS 24.501 Section 9.11.4.14)
///
/// Units grow by a factor of 4 from 1 Kbps (0x01) to 256 Pbps (0x19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum AmbrUnit {
    NotUsed = 0x00,
    Kbps1 = 0x01,
    Kbps4 = 0x02,
    Kbps16 = 0x03,
    Kbps64 = 0x04,
    Kbps256 = 0x05,
    Mbps1 = 0x06,
    Mbps4 = 0x07,
    Mbps16 = 0x08,
    Mbps64 = 0x09,
    Mbps256 = 0x0A,
    Gbps1 = 0x0B,
    Gbps4 = 0x0C,
    Gbps16 = 0x0D,
    Gbps64 = 0x0E,
    Gbps256 = 0x0F,
    Tbps1 = 0x10,
    Tbps4 = 0x11,
    Tbps16 = 0x12,
    Tbps64 = 0x13,
    Tbps256 = 0x14,
    Pbps1 = 0x15,
    Pbps4 = 0x16,
    Pbps16 = 0x17,
    Pbps64 = 0x18,
    Pbps256 = 0x19,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl AmbrUnit {
    /// Size of one unit in kbps, `None` for "not used" and reserved values.
    ///
    /// Kbps/Mbps/... steps are treated as powers of 4 from 1 Kbps, the
    /// way the unit codepoints are laid out.
    pub fn kbps_multiplier(&self) -> Option<u64> {
        match u8::from(*self) {
            raw @ 0x01..=0x19 => Some(4u64.pow(u32::from(raw - 1))),
            _ => None,
        }
    }
}

/// Ethernet header compression CID length (3GPP TS 24.501 Section 9.11.4.28)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum CidLength {
    /// Ethernet header compression not used
    NotUsed = 0b00,
    /// 7 bits
    SevenBits = 0b01,
    /// 15 bits
    FifteenBits = 0b10,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

// ============================================================================
// Opaque and fixed-size contents
// ============================================================================

opaque_ie!(
    /// ABBA IE (3GPP TS 24.501 Section 9.11.3.10)
    IeAbba,
    Envelope::tlv("ABBA", 2, 255)
);

opaque_ie!(
    /// Additional information IE (3GPP TS 24.501 Section 9.11.2.1)
    IeAdditionalInformation,
    Envelope::tlv("Additional information", 1, 255)
);

opaque_ie!(
    /// Mobile station classmark 2 IE (3GPP TS 24.008 Section 10.5.1.6)
    IeMobileStationClassmark2,
    Envelope::tlv("Mobile station classmark 2", 3, 3)
);

opaque_ie!(
    /// Supported codec list IE (3GPP TS 24.008 Section 10.5.4.32)
    IeSupportedCodecList,
    Envelope::tlv("Supported codec list", 3, 255)
);

opaque_ie!(
    /// UE radio capability ID IE (3GPP TS 24.501 Section 9.11.3.68)
    IeUeRadioCapabilityId,
    Envelope::tlv("UE radio capability ID", 1, 255)
);

opaque_ie!(
    /// WUS assistance information IE (3GPP TS 24.501 Section 9.11.3.71)
    IeWusAssistanceInformation,
    Envelope::tlv("WUS assistance information", 1, 255)
);

opaque_ie!(
    /// SM PDU DN request container IE (3GPP TS 24.501 Section 9.11.4.15)
    IeSmPduDnRequestContainer,
    Envelope::tlv("SM PDU DN request container", 1, 253)
);

opaque_ie!(
    /// IP header compression configuration IE (3GPP TS 24.501 Section 9.11.4.24)
    IeIpHeaderCompressionConfiguration,
    Envelope::tlv("IP header compression configuration", 3, 255)
);

opaque_ie!(
    /// DNN IE (3GPP TS 24.501 Section 9.11.2.1B)
    ///
    /// The value holds the DNN in its encoded form: a sequence of labels,
    /// each preceded by its length octet.
    IeDnn,
    Envelope::tlv("DNN", 1, 100)
);

impl IeDnn {
    /// Encodes a dotted name (e.g. `"internet"`, `"ims.mnc001.mcc001.gprs"`)
    /// into length-prefixed labels.
    pub fn from_name(name: &str) -> CodecResult<Self> {
        let mut value = Vec::with_capacity(name.len() + 1);
        for label in name.split('.') {
            let len = u8::try_from(label.len())
                .map_err(|_| CodecError::InvalidValue(format!("DNN label too long: {label}")))?;
            if len == 0 {
                return Err(CodecError::InvalidValue(format!("empty DNN label in {name:?}")));
            }
            value.push(len);
            value.extend_from_slice(label.as_bytes());
        }
        Ok(Self { value })
    }

    /// Decodes the labels into a dotted name. Returns `None` if the label
    /// structure is inconsistent or a label is not UTF-8.
    pub fn name(&self) -> Option<String> {
        let mut labels = Vec::new();
        let mut rest = self.value.as_slice();
        while let Some((&len, tail)) = rest.split_first() {
            let len = usize::from(len);
            if len > tail.len() {
                return None;
            }
            labels.push(std::str::from_utf8(&tail[..len]).ok()?);
            rest = &tail[len..];
        }
        Some(labels.join("."))
    }
}

fixed_octets_ie!(
    /// Authentication parameter AUTN IE (3GPP TS 24.501 Section 9.11.3.15)
    IeAuthenticationParameterAutn,
    "Authentication parameter AUTN",
    16
);

fixed_octets_ie!(
    /// Authentication response parameter IE (3GPP TS 24.501 Section 9.11.3.17), RES*
    IeAuthenticationResponseParameter,
    "Authentication response parameter",
    16
);

fixed_octets_ie!(
    /// Authentication failure parameter IE (3GPP TS 24.501 Section 9.11.3.14), AUTS
    IeAuthenticationFailureParameter,
    "Authentication failure parameter",
    14
);

fixed_octets_ie!(
    /// DS-TT Ethernet port MAC address IE (3GPP TS 24.501 Section 9.11.4.25)
    IeDsTtEthernetPortMacAddress,
    "DS-TT Ethernet port MAC address",
    6
);

fixed_octets_ie!(
    /// UE-DS-TT residence time IE (3GPP TS 24.501 Section 9.11.4.26)
    IeUeDsTtResidenceTime,
    "UE-DS-TT residence time",
    8
);

// ============================================================================
// Single-octet contents
// ============================================================================

/// GPRS Timer 2 IE (3GPP TS 24.008 Section 10.5.7.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeGprsTimer2 {
    /// Timer value, in the unit of the timer it describes
    pub value: u8,
}

impl IeGprsTimer2 {
    const ENVELOPE: Envelope = Envelope::tlv("GPRS timer 2", 1, 1);

    /// Create a new GPRS Timer 2 IE
    pub fn new(value: u8) -> Self {
        Self { value }
    }
}

impl NasEncode for IeGprsTimer2 {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.write_bits(u32::from(self.value), 8)?;
            Ok(())
        })
    }
}

impl NasDecode for IeGprsTimer2 {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| Ok(Self::new(r.read_bits(8)? as u8)))
    }
}

/// GPRS Timer 3 IE (3GPP TS 24.008 Section 10.5.7.4a)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeGprsTimer3 {
    /// Timer value unit
    pub unit: GprsTimer3Unit,
    /// Timer value (5 bits)
    pub timer_value: u8,
}

impl IeGprsTimer3 {
    const ENVELOPE: Envelope = Envelope::tlv("GPRS timer 3", 1, 1);

    /// Create a new GPRS Timer 3 IE
    pub fn new(unit: GprsTimer3Unit, timer_value: u8) -> Self {
        Self {
            unit,
            timer_value: timer_value & 0x1F,
        }
    }

    /// Timer duration in seconds, `None` when deactivated or reserved
    pub fn seconds(&self) -> Option<u64> {
        let step = match self.unit {
            GprsTimer3Unit::MultiplesOf10Minutes => 600,
            GprsTimer3Unit::MultiplesOf1Hour => 3_600,
            GprsTimer3Unit::MultiplesOf10Hours => 36_000,
            GprsTimer3Unit::MultiplesOf2Seconds => 2,
            GprsTimer3Unit::MultiplesOf30Seconds => 30,
            GprsTimer3Unit::MultiplesOf1Minute => 60,
            GprsTimer3Unit::MultiplesOf320Hours => 1_152_000,
            GprsTimer3Unit::Deactivated | GprsTimer3Unit::Unknown(_) => return None,
        };
        Some(step * u64::from(self.timer_value))
    }
}

impl NasEncode for IeGprsTimer3 {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            write_enum(b, self.unit, 3)?;
            b.write_bits(u32::from(self.timer_value), 5)?;
            Ok(())
        })
    }
}

impl NasDecode for IeGprsTimer3 {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let unit = read_enum(r, 3)?;
            let timer_value = r.read_bits(5)? as u8;
            Ok(Self { unit, timer_value })
        })
    }
}

/// Daylight Saving Time IE (3GPP TS 24.501 Section 9.11.3.19)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeDaylightSavingTime {
    /// Adjustment value (bits 2-1)
    pub value: DaylightSavingTime,
}

impl IeDaylightSavingTime {
    const ENVELOPE: Envelope = Envelope::tlv("Daylight saving time", 1, 1);

    /// Create a new Daylight Saving Time IE
    pub fn new(value: DaylightSavingTime) -> Self {
        Self { value }
    }
}

impl NasEncode for IeDaylightSavingTime {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(6);
            write_enum(b, self.value, 2)
        })
    }
}

impl NasDecode for IeDaylightSavingTime {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(6)?;
            Ok(Self::new(read_enum(r, 2)?))
        })
    }
}

/// UE Status IE (3GPP TS 24.501 Section 9.11.3.56)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeUeStatus {
    /// UE is in 5GMM-REGISTERED state
    pub n1_mode_reg: bool,
    /// UE is in EMM-REGISTERED state
    pub s1_mode_reg: bool,
}

impl IeUeStatus {
    const ENVELOPE: Envelope = Envelope::tlv("UE status", 1, 1);
}

impl NasEncode for IeUeStatus {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(6);
            write_flag(b, self.n1_mode_reg);
            write_flag(b, self.s1_mode_reg);
            Ok(())
        })
    }
}

impl NasDecode for IeUeStatus {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(6)?;
            Ok(Self {
                n1_mode_reg: read_flag(r)?,
                s1_mode_reg: read_flag(r)?,
            })
        })
    }
}

/// UE's Usage Setting IE (3GPP TS 24.501 Section 9.11.3.55)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeUeUsageSetting {
    /// Usage setting (bit 1)
    pub value: UeUsageSetting,
}

impl IeUeUsageSetting {
    const ENVELOPE: Envelope = Envelope::tlv("UE usage setting", 1, 1);

    /// Create a new UE's Usage Setting IE
    pub fn new(value: UeUsageSetting) -> Self {
        Self { value }
    }
}

impl NasEncode for IeUeUsageSetting {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(7);
            write_enum(b, self.value, 1)
        })
    }
}

impl NasDecode for IeUeUsageSetting {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(7)?;
            Ok(Self::new(read_enum(r, 1)?))
        })
    }
}

/// 5GS DRX Parameters IE (3GPP TS 24.501 Section 9.11.3.2A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gsDrxParameters {
    /// DRX value (bits 4-1)
    pub value: DrxValue,
}

impl Ie5gsDrxParameters {
    const ENVELOPE: Envelope = Envelope::tlv("5GS DRX parameters", 1, 1);

    /// Create a new 5GS DRX Parameters IE
    pub fn new(value: DrxValue) -> Self {
        Self { value }
    }
}

impl NasEncode for Ie5gsDrxParameters {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(4);
            write_enum(b, self.value, 4)
        })
    }
}

impl NasDecode for Ie5gsDrxParameters {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(4)?;
            Ok(Self::new(read_enum(r, 4)?))
        })
    }
}

/// NB-N1 Mode DRX Parameters IE (3GPP TS 24.501 Section 9.11.3.73)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeNbN1ModeDrxParameters {
    /// DRX value (bits 4-1)
    pub value: DrxValue,
}

impl IeNbN1ModeDrxParameters {
    const ENVELOPE: Envelope = Envelope::tlv("NB-N1 mode DRX parameters", 1, 1);

    /// Create a new NB-N1 Mode DRX Parameters IE
    pub fn new(value: DrxValue) -> Self {
        Self { value }
    }
}

impl NasEncode for IeNbN1ModeDrxParameters {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(4);
            write_enum(b, self.value, 4)
        })
    }
}

impl NasDecode for IeNbN1ModeDrxParameters {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(4)?;
            Ok(Self::new(read_enum(r, 4)?))
        })
    }
}

/// Extended DRX Parameters IE (3GPP TS 24.501 Section 9.11.3.26A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeExtendedDrxParameters {
    /// Paging time window (4 bits)
    pub paging_time_window: u8,
    /// eDRX value (4 bits)
    pub edrx_value: u8,
}

impl IeExtendedDrxParameters {
    const ENVELOPE: Envelope = Envelope::tlv("Extended DRX parameters", 1, 1);

    /// Create a new Extended DRX Parameters IE
    pub fn new(paging_time_window: u8, edrx_value: u8) -> Self {
        Self {
            paging_time_window,
            edrx_value,
        }
    }
}

impl NasEncode for IeExtendedDrxParameters {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.write_bits(u32::from(self.paging_time_window), 4)?;
            b.write_bits(u32::from(self.edrx_value), 4)?;
            Ok(())
        })
    }
}

impl NasDecode for IeExtendedDrxParameters {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let paging_time_window = r.read_bits(4)? as u8;
            let edrx_value = r.read_bits(4)? as u8;
            Ok(Self::new(paging_time_window, edrx_value))
        })
    }
}

/// 5GS Update Type IE (3GPP TS 24.501 Section 9.11.3.9A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gsUpdateType {
    /// EPS preferred network behaviour (bits 6-5)
    pub eps_pnb_ciot: PreferredCiotBehaviour,
    /// 5GS preferred network behaviour (bits 4-3)
    pub five_gs_pnb_ciot: PreferredCiotBehaviour,
    /// NG-RAN radio capability update needed (bit 2)
    pub ng_ran_rcu: bool,
    /// SMS over NAS supported (bit 1)
    pub sms_requested: bool,
}

impl Default for Ie5gsUpdateType {
    fn default() -> Self {
        Self {
            eps_pnb_ciot: PreferredCiotBehaviour::NoAdditionalInformation,
            five_gs_pnb_ciot: PreferredCiotBehaviour::NoAdditionalInformation,
            ng_ran_rcu: false,
            sms_requested: false,
        }
    }
}

impl Ie5gsUpdateType {
    const ENVELOPE: Envelope = Envelope::tlv("5GS update type", 1, 255);
}

impl NasEncode for Ie5gsUpdateType {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(2);
            write_enum(b, self.eps_pnb_ciot, 2)?;
            write_enum(b, self.five_gs_pnb_ciot, 2)?;
            write_flag(b, self.ng_ran_rcu);
            write_flag(b, self.sms_requested);
            Ok(())
        })
    }
}

impl NasDecode for Ie5gsUpdateType {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(2)?;
            Ok(Self {
                eps_pnb_ciot: read_enum(r, 2)?,
                five_gs_pnb_ciot: read_enum(r, 2)?,
                ng_ran_rcu: read_flag(r)?,
                sms_requested: read_flag(r)?,
            })
        })
    }
}

/// Additional Information Requested IE (3GPP TS 24.501 Section 9.11.3.12A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAdditionalInformationRequested {
    /// Ciphering keys for ciphered broadcast assistance data requested
    pub cipher_key: bool,
}

impl IeAdditionalInformationRequested {
    const ENVELOPE: Envelope = Envelope::tlv("Additional information requested", 1, 255);
}

impl NasEncode for IeAdditionalInformationRequested {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(7);
            write_flag(b, self.cipher_key);
            Ok(())
        })
    }
}

impl NasDecode for IeAdditionalInformationRequested {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(7)?;
            Ok(Self {
                cipher_key: read_flag(r)?,
            })
        })
    }
}

/// 5GS Registration Result IE (3GPP TS 24.501 Section 9.11.3.6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gsRegistrationResult {
    /// Registered for emergency services (bit 6)
    pub emergency_registered: bool,
    /// Network slice-specific authentication and authorization is to be performed (bit 5)
    pub nssaa_to_be_performed: bool,
    /// SMS over NAS allowed (bit 4)
    pub sms_allowed: bool,
    /// Registration result value (bits 3-1)
    pub result: RegistrationResult,
}

impl Ie5gsRegistrationResult {
    const ENVELOPE: Envelope = Envelope::tlv("5GS registration result", 1, 1);

    /// Create a registration result with all indicators cleared
    pub fn new(result: RegistrationResult) -> Self {
        Self {
            emergency_registered: false,
            nssaa_to_be_performed: false,
            sms_allowed: false,
            result,
        }
    }
}

impl NasEncode for Ie5gsRegistrationResult {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(2);
            write_flag(b, self.emergency_registered);
            write_flag(b, self.nssaa_to_be_performed);
            write_flag(b, self.sms_allowed);
            write_enum(b, self.result, 3)
        })
    }
}

impl NasDecode for Ie5gsRegistrationResult {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(2)?;
            Ok(Self {
                emergency_registered: read_flag(r)?,
                nssaa_to_be_performed: read_flag(r)?,
                sms_allowed: read_flag(r)?,
                result: read_enum(r, 3)?,
            })
        })
    }
}

/// Additional 5G Security Information IE (3GPP TS 24.501 Section 9.11.3.12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAdditional5gSecurityInformation {
    /// Retransmission of initial NAS message request (RINMR)
    pub rinmr: bool,
    /// Horizontal derivation parameter (HDP)
    pub hdp: bool,
}

impl IeAdditional5gSecurityInformation {
    const ENVELOPE: Envelope = Envelope::tlv("Additional 5G security information", 1, 1);
}

impl NasEncode for IeAdditional5gSecurityInformation {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(6);
            write_flag(b, self.rinmr);
            write_flag(b, self.hdp);
            Ok(())
        })
    }
}

impl NasDecode for IeAdditional5gSecurityInformation {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(6)?;
            Ok(Self {
                rinmr: read_flag(r)?,
                hdp: read_flag(r)?,
            })
        })
    }
}

/// Truncated 5G-S-TMSI Configuration IE (3GPP TS 24.501 Section 9.11.3.70)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeTruncated5gSTmsiConfiguration {
    /// Truncated AMF set ID value (4 bits)
    pub truncated_amf_set_id: u8,
    /// Truncated AMF pointer value (4 bits)
    pub truncated_amf_pointer: u8,
}

impl IeTruncated5gSTmsiConfiguration {
    const ENVELOPE: Envelope = Envelope::tlv("Truncated 5G-S-TMSI configuration", 1, 1);
}

impl NasEncode for IeTruncated5gSTmsiConfiguration {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.write_bits(u32::from(self.truncated_amf_set_id), 4)?;
            b.write_bits(u32::from(self.truncated_amf_pointer), 4)?;
            Ok(())
        })
    }
}

impl NasDecode for IeTruncated5gSTmsiConfiguration {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            Ok(Self {
                truncated_amf_set_id: r.read_bits(4)? as u8,
                truncated_amf_pointer: r.read_bits(4)? as u8,
            })
        })
    }
}

/// 5GSM Congestion Re-attempt Indicator IE (3GPP TS 24.501 Section 9.11.4.21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeCongestionReAttemptIndicator {
    /// All PLMNs back-off timer (ABO): `true` if the back-off timer applies
    /// in all PLMNs, `false` for the registered PLMN only
    pub abo: bool,
}

impl IeCongestionReAttemptIndicator {
    const ENVELOPE: Envelope = Envelope::tlv("5GSM congestion re-attempt indicator", 1, 1);
}

impl NasEncode for IeCongestionReAttemptIndicator {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(7);
            write_flag(b, self.abo);
            Ok(())
        })
    }
}

impl NasDecode for IeCongestionReAttemptIndicator {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(7)?;
            Ok(Self { abo: read_flag(r)? })
        })
    }
}

/// Re-attempt Indicator IE (3GPP TS 24.501 Section 9.11.4.17)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeReAttemptIndicator {
    /// Re-attempt not allowed in equivalent PLMNs (EPLMNC)
    pub eplmnc: bool,
    /// Re-attempt not allowed in S1 mode (RATC)
    pub ratc: bool,
}

impl IeReAttemptIndicator {
    const ENVELOPE: Envelope = Envelope::tlv("Re-attempt indicator", 1, 1);
}

impl NasEncode for IeReAttemptIndicator {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(6);
            write_flag(b, self.eplmnc);
            write_flag(b, self.ratc);
            Ok(())
        })
    }
}

impl NasDecode for IeReAttemptIndicator {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(6)?;
            Ok(Self {
                eplmnc: read_flag(r)?,
                ratc: read_flag(r)?,
            })
        })
    }
}

/// Ethernet Header Compression Configuration IE (3GPP TS 24.501 Section 9.11.4.28)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeEthernetHeaderCompressionConfiguration {
    /// CID length (bits 2-1)
    pub cid_length: CidLength,
}

impl IeEthernetHeaderCompressionConfiguration {
    const ENVELOPE: Envelope = Envelope::tlv("Ethernet header compression configuration", 1, 1);

    /// Create a new Ethernet Header Compression Configuration IE
    pub fn new(cid_length: CidLength) -> Self {
        Self { cid_length }
    }
}

impl NasEncode for IeEthernetHeaderCompressionConfiguration {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.skip(6);
            write_enum(b, self.cid_length, 2)
        })
    }
}

impl NasDecode for IeEthernetHeaderCompressionConfiguration {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            r.skip(6)?;
            Ok(Self::new(read_enum(r, 2)?))
        })
    }
}

// ============================================================================
// Multi-octet contents
// ============================================================================

/// Serving PLMN Rate Control IE (3GPP TS 24.501 Section 9.11.4.20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeServingPlmnRateControl {
    /// Maximum number of uplink messages per 6 minute interval
    pub value: u16,
}

impl IeServingPlmnRateControl {
    const ENVELOPE: Envelope = Envelope::tlv("Serving PLMN rate control", 2, 2);

    /// Create a new Serving PLMN Rate Control IE
    pub fn new(value: u16) -> Self {
        Self { value }
    }
}

impl NasEncode for IeServingPlmnRateControl {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            b.write_bits(u32::from(self.value), 16)?;
            Ok(())
        })
    }
}

impl NasDecode for IeServingPlmnRateControl {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| Ok(Self::new(r.read_bits(16)? as u16)))
    }
}

/// Session-AMBR IE (3GPP TS 24.501 Section 9.11.4.14)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeSessionAmbr {
    /// Unit for session-AMBR for downlink
    pub downlink_unit: AmbrUnit,
    /// Session-AMBR for downlink, in `downlink_unit`
    pub downlink: u16,
    /// Unit for session-AMBR for uplink
    pub uplink_unit: AmbrUnit,
    /// Session-AMBR for uplink, in `uplink_unit`
    pub uplink: u16,
}

impl IeSessionAmbr {
    const ENVELOPE: Envelope = Envelope::tlv("Session-AMBR", 6, 6);

    /// Create a new Session-AMBR IE
    pub fn new(downlink_unit: AmbrUnit, downlink: u16, uplink_unit: AmbrUnit, uplink: u16) -> Self {
        Self {
            downlink_unit,
            downlink,
            uplink_unit,
            uplink,
        }
    }

    /// Downlink rate in kbps
    pub fn downlink_kbps(&self) -> Option<u64> {
        self.downlink_unit
            .kbps_multiplier()
            .map(|m| m * u64::from(self.downlink))
    }

    /// Uplink rate in kbps
    pub fn uplink_kbps(&self) -> Option<u64> {
        self.uplink_unit
            .kbps_multiplier()
            .map(|m| m * u64::from(self.uplink))
    }
}

impl NasEncode for IeSessionAmbr {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            write_enum(b, self.downlink_unit, 8)?;
            b.write_bits(u32::from(self.downlink), 16)?;
            write_enum(b, self.uplink_unit, 8)?;
            b.write_bits(u32::from(self.uplink), 16)?;
            Ok(())
        })
    }
}

impl NasDecode for IeSessionAmbr {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let downlink_unit = read_enum(r, 8)?;
            let downlink = r.read_bits(16)? as u16;
            let uplink_unit = read_enum(r, 8)?;
            let uplink = r.read_bits(16)? as u16;
            Ok(Self::new(downlink_unit, downlink, uplink_unit, uplink))
        })
    }
}

// ============================================================================
// PSI / EBI bitmaps
// ============================================================================

/// Declares an IE whose first two contents octets are a bitmap indexed by
/// PDU session identity (or EPS bearer identity): octet 1 holds
/// identities 7..0 (bit 8 = 7), octet 2 identities 15..8. Octets beyond
/// the second are spare and skipped on decode.
macro_rules! identity_bitmap_ie {
    ($(#[$doc:meta])* $name:ident, $ie_name:literal, $min:literal, $max:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            /// Bit `n` is the status of identity `n`
            pub bitmap: u16,
        }

        impl $name {
            const ENVELOPE: Envelope = Envelope::tlv($ie_name, $min, $max);

            /// Create from a raw bitmap
            pub fn new(bitmap: u16) -> Self {
                Self { bitmap }
            }

            /// Returns the status bit of `id` (0-15)
            pub fn is_set(&self, id: u8) -> bool {
                id < 16 && (self.bitmap >> id) & 0x01 == 1
            }

            /// Sets the status bit of `id` (0-15); other ids are ignored
            pub fn set(&mut self, id: u8, value: bool) {
                if id >= 16 {
                    return;
                }
                if value {
                    self.bitmap |= 1 << id;
                } else {
                    self.bitmap &= !(1 << id);
                }
            }

            /// Identities whose bit is set, ascending
            pub fn ids(&self) -> Vec<u8> {
                (0..16).filter(|id| self.is_set(*id)).collect()
            }
        }

        impl NasEncode for $name {
            fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                Self::ENVELOPE.encode(buf, |b| {
                    b.write_bits(u32::from(self.bitmap & 0xFF), 8)?;
                    b.write_bits(u32::from(self.bitmap >> 8), 8)?;
                    Ok(())
                })
            }
        }

        impl NasDecode for $name {
            fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
                Self::ENVELOPE.decode(buf, |r, _| {
                    let low = r.read_bits(8)? as u16;
                    let high = r.read_bits(8)? as u16;
                    Ok(Self::new((high << 8) | low))
                })
            }
        }
    };
}

identity_bitmap_ie!(
    /// Uplink Data Status IE (3GPP TS 24.501 Section 9.11.3.57)
    IeUplinkDataStatus,
    "Uplink data status",
    2,
    32
);

identity_bitmap_ie!(
    /// PDU Session Status IE (3GPP TS 24.501 Section 9.11.3.44)
    IePduSessionStatus,
    "PDU session status",
    2,
    32
);

identity_bitmap_ie!(
    /// Allowed PDU Session Status IE (3GPP TS 24.501 Section 9.11.3.13)
    IeAllowedPduSessionStatus,
    "Allowed PDU session status",
    2,
    32
);

identity_bitmap_ie!(
    /// PDU Session Reactivation Result IE (3GPP TS 24.501 Section 9.11.3.42)
    IePduSessionReactivationResult,
    "PDU session reactivation result",
    2,
    32
);

identity_bitmap_ie!(
    /// EPS Bearer Context Status IE (3GPP TS 24.301 Section 9.9.2.1), indexed by EBI
    IeEpsBearerContextStatus,
    "EPS bearer context status",
    2,
    2
);

// ============================================================================
// Network name and emergency numbers
// ============================================================================

/// Network Name IE (3GPP TS 24.008 Section 10.5.3.5a)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IeNetworkName {
    /// Coding scheme (3 bits): 0 = GSM 7 bit default alphabet, 1 = UCS2
    pub coding_scheme: u8,
    /// Add country initials (CI)
    pub add_ci: bool,
    /// Number of spare bits in the last octet of `text` (3 bits)
    pub spare_bits_in_last_octet: u8,
    /// Encoded text string
    pub text: Vec<u8>,
}

impl IeNetworkName {
    const ENVELOPE: Envelope = Envelope::tlv("Network name", 1, 255);

    /// GSM 7 bit default alphabet
    pub const CODING_GSM7: u8 = 0b000;
    /// UCS2 (16 bit)
    pub const CODING_UCS2: u8 = 0b001;

    /// Create a network name carrying pre-encoded text
    pub fn new(coding_scheme: u8, add_ci: bool, spare_bits_in_last_octet: u8, text: Vec<u8>) -> Self {
        Self {
            coding_scheme,
            add_ci,
            spare_bits_in_last_octet,
            text,
        }
    }
}

impl NasEncode for IeNetworkName {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            // ext bit is always 1
            write_flag(b, true);
            b.write_bits(u32::from(self.coding_scheme), 3)?;
            write_flag(b, self.add_ci);
            b.write_bits(u32::from(self.spare_bits_in_last_octet), 3)?;
            b.write_octets(&self.text);
            Ok(())
        })
    }
}

impl NasDecode for IeNetworkName {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, length| {
            r.skip(1)?;
            let coding_scheme = r.read_bits(3)? as u8;
            let add_ci = read_flag(r)?;
            let spare_bits_in_last_octet = r.read_bits(3)? as u8;
            let text = r.read_octets(length - 1)?;
            Ok(Self::new(coding_scheme, add_ci, spare_bits_in_last_octet, text))
        })
    }
}

/// One entry of an emergency number list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmergencyNumber {
    /// Emergency service category value (5 bits, TS 24.008 Table 10.5.135d)
    pub service_category: u8,
    /// Number digits as BCD octets (digit 1 in the low nibble, 0xF filler)
    pub digits: Vec<u8>,
}

impl EmergencyNumber {
    /// Create an entry from a digit string such as `"112"`
    pub fn from_digits(service_category: u8, number: &str) -> CodecResult<Self> {
        let nibbles = number
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or_else(|| CodecError::InvalidValue(format!("not a digit: {c:?}")))
            })
            .collect::<CodecResult<Vec<u8>>>()?;
        let digits = nibbles
            .chunks(2)
            .map(|pair| (pair.get(1).copied().unwrap_or(0x0F) << 4) | pair[0])
            .collect();
        Ok(Self {
            service_category,
            digits,
        })
    }
}

/// Emergency Number List IE (3GPP TS 24.008 Section 10.5.3.13)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeEmergencyNumberList {
    /// Emergency numbers
    pub numbers: Vec<EmergencyNumber>,
}

impl IeEmergencyNumberList {
    const ENVELOPE: Envelope = Envelope::tlv("Emergency number list", 3, 48);
}

impl NasEncode for IeEmergencyNumberList {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for number in &self.numbers {
                let length = u8::try_from(number.digits.len() + 1).map_err(|_| {
                    CodecError::EncodingError("emergency number too long".to_string())
                })?;
                b.write_bits(u32::from(length), 8)?;
                b.skip(3);
                b.write_bits(u32::from(number.service_category), 5)?;
                b.write_octets(&number.digits);
            }
            Ok(())
        })
    }
}

impl NasDecode for IeEmergencyNumberList {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut numbers = Vec::new();
            while r.remaining_octets() > 0 {
                let length = r.read_bits(8)? as usize;
                if length == 0 {
                    return Err(CodecError::InvalidValue(
                        "emergency number entry with zero length".to_string(),
                    ));
                }
                r.skip(3)?;
                let service_category = r.read_bits(5)? as u8;
                let digits = r.read_octets(length - 1)?;
                numbers.push(EmergencyNumber {
                    service_category,
                    digits,
                });
            }
            Ok(Self { numbers })
        })
    }
}
