//! Type 3 Information Elements (fixed length)
//!
//! Type 3 IEs have a fixed length and no length field. They are used both
//! as mandatory message fields and, preceded by an IEI, as optional IEs.
//!
//! Based on 3GPP TS 24.501 specification.

use nextgsim_common::{BitBuffer, BitBufferReader};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::codec::{read_enum, write_enum, CodecResult, NasDecode, NasEncode};

// ============================================================================
// Enumerations for Type 3 IEs
// ============================================================================

/// 5GMM Cause values (3GPP TS 24.501 Section 9.11.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MmCause {
    /// Illegal UE
    IllegalUe = 0x03,
    /// PEI not accepted
    PeiNotAccepted = 0x05,
    /// Illegal ME
    IllegalMe = 0x06,
    /// 5GS services not allowed
    FiveGsServicesNotAllowed = 0x07,
    /// UE identity cannot be derived by the network
    UeIdentityCannotBeDerived = 0x09,
    /// Implicitly de-registered
    ImplicitlyDeregistered = 0x0A,
    /// PLMN not allowed
    PlmnNotAllowed = 0x0B,
    /// Tracking area not allowed
    TaNotAllowed = 0x0C,
    /// Roaming not allowed in this tracking area
    RoamingNotAllowedInTa = 0x0D,
    /// No suitable cells in tracking area
    NoSuitableCellsInTa = 0x0F,
    /// MAC failure
    MacFailure = 0x14,
    /// Synch failure
    SynchFailure = 0x15,
    /// Congestion
    Congestion = 0x16,
    /// UE security capabilities mismatch
    UeSecurityCapMismatch = 0x17,
    /// Security mode rejected, unspecified
    SecModeRejectedUnspecified = 0x18,
    /// Non-5G authentication unacceptable
    Non5gAuthenticationUnacceptable = 0x1A,
    /// N1 mode not allowed
    N1ModeNotAllowed = 0x1B,
    /// Restricted service area
    RestrictedServiceArea = 0x1C,
    /// Redirection to EPC required
    RedirectionToEpcRequired = 0x1F,
    /// LADN not available
    LadnNotAvailable = 0x2B,
    /// No network slices available
    NoNetworkSlicesAvailable = 0x3E,
    /// Maximum number of PDU sessions reached
    MaxPduSessionsReached = 0x41,
    /// Insufficient resources for specific slice and DNN
    InsufficientResourcesForSliceAndDnn = 0x43,
    /// Insufficient resources for specific slice
    InsufficientResourcesForSlice = 0x45,
    /// ngKSI already in use
    NgksiAlreadyInUse = 0x47,
    /// Non-3GPP access to 5GCN not allowed
    Non3gppAccessTo5gcnNotAllowed = 0x48,
    /// Serving network not authorized
    ServingNetworkNotAuthorized = 0x49,
    /// Temporarily not authorized for this SNPN
    TemporarilyNotAuthorizedForSnpn = 0x4A,
    /// Permanently not authorized for this SNPN
    PermanentlyNotAuthorizedForSnpn = 0x4B,
    /// Not authorized for this CAG or authorized for CAG cells only
    NotAuthorizedForCag = 0x4C,
    /// Wireline access area not allowed
    WirelineAccessAreaNotAllowed = 0x4D,
    /// Payload was not forwarded
    PayloadNotForwarded = 0x5A,
    /// DNN not supported or not subscribed in the slice
    DnnNotSupportedOrNotSubscribed = 0x5B,
    /// Insufficient user-plane resources for the PDU session
    InsufficientUserPlaneResources = 0x5C,
    /// Semantically incorrect message
    SemanticallyIncorrectMessage = 0x5F,
    /// Invalid mandatory information
    InvalidMandatoryInformation = 0x60,
    /// Message type non-existent or not implemented
    MessageTypeNonExistent = 0x61,
    /// Message type not compatible with protocol state
    MessageTypeNotCompatible = 0x62,
    /// Information element non-existent or not implemented
    IeNonExistent = 0x63,
    /// Conditional IE error
    ConditionalIeError = 0x64,
    /// Message not compatible with protocol state
    MessageNotCompatible = 0x65,
    /// Protocol error, unspecified
    ProtocolErrorUnspecified = 0x6F,
    /// Cause value without a named variant
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// 5GSM Cause values (3GPP TS 24.501 Section 9.11.4.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SmCause {
    /// Operator determined barring
    OperatorDeterminedBarring = 0x08,
    /// Insufficient resources
    InsufficientResources = 0x1A,
    /// Missing or unknown DNN
    MissingOrUnknownDnn = 0x1B,
    /// Unknown PDU session type
    UnknownPduSessionType = 0x1C,
    /// User authentication or authorization failed
    UserAuthFailed = 0x1D,
    /// Request rejected, unspecified
    RequestRejectedUnspecified = 0x1F,
    /// Service option not supported
    ServiceOptionNotSupported = 0x20,
    /// Requested service option not subscribed
    RequestedServiceOptionNotSubscribed = 0x21,
    /// PTI already in use
    PtiAlreadyInUse = 0x23,
    /// Regular deactivation
    RegularDeactivation = 0x24,
    /// Network failure
    NetworkFailure = 0x26,
    /// Reactivation requested
    ReactivationRequested = 0x27,
    /// Semantic error in the TFT operation
    SemanticErrorInTftOperation = 0x29,
    /// Syntactical error in the TFT operation
    SyntacticalErrorInTftOperation = 0x2A,
    /// Invalid PDU session identity
    InvalidPduSessionIdentity = 0x2B,
    /// Semantic errors in packet filter(s)
    SemanticErrorsInPacketFilters = 0x2C,
    /// Syntactical error in packet filter(s)
    SyntacticalErrorInPacketFilters = 0x2D,
    /// Out of LADN service area
    OutOfLadnServiceArea = 0x2E,
    /// PTI mismatch
    PtiMismatch = 0x2F,
    /// PDU session type IPv4 only allowed
    PduSessionTypeIpv4OnlyAllowed = 0x32,
    /// PDU session type IPv6 only allowed
    PduSessionTypeIpv6OnlyAllowed = 0x33,
    /// PDU session does not exist
    PduSessionDoesNotExist = 0x36,
    /// PDU session type IPv4v6 only allowed
    PduSessionTypeIpv4v6OnlyAllowed = 0x39,
    /// PDU session type Unstructured only allowed
    PduSessionTypeUnstructuredOnlyAllowed = 0x3A,
    /// Unsupported 5QI value
    Unsupported5qiValue = 0x3B,
    /// PDU session type Ethernet only allowed
    PduSessionTypeEthernetOnlyAllowed = 0x3D,
    /// Insufficient resources for specific slice and DNN
    InsufficientResourcesForSliceAndDnn = 0x43,
    /// Not supported SSC mode
    NotSupportedSscMode = 0x44,
    /// Insufficient resources for specific slice
    InsufficientResourcesForSlice = 0x45,
    /// Missing or unknown DNN in a slice
    MissingOrUnknownDnnInSlice = 0x46,
    /// Invalid PTI value
    InvalidPtiValue = 0x51,
    /// Maximum data rate per UE for user-plane integrity protection is too low
    MaxDataRateForIntegrityProtectionTooLow = 0x52,
    /// Semantic error in the QoS operation
    SemanticErrorInQosOperation = 0x53,
    /// Syntactical error in the QoS operation
    SyntacticalErrorInQosOperation = 0x54,
    /// Invalid mapped EPS bearer identity
    InvalidMappedEpsBearerIdentity = 0x55,
    /// Semantically incorrect message
    SemanticallyIncorrectMessage = 0x5F,
    /// Invalid mandatory information
    InvalidMandatoryInformation = 0x60,
    /// Message type non-existent or not implemented
    MessageTypeNonExistent = 0x61,
    /// Message type not compatible with the protocol state
    MessageTypeNotCompatible = 0x62,
    /// Information element non-existent or not implemented
    IeNonExistent = 0x63,
    /// Conditional IE error
    ConditionalIeError = 0x64,
    /// Message not compatible with the protocol state
    MessageNotCompatible = 0x65,
    /// Protocol error, unspecified
    ProtocolErrorUnspecified = 0x6F,
    /// Cause value without a named variant
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Type of ciphering algorithm (3GPP TS 24.501 Section 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum TypeOfCipheringAlgorithm {
    /// 5G-EA0 (null ciphering)
    Ea0 = 0x00,
    /// 128-5G-EA1
    Ea1_128 = 0x01,
    /// 128-5G-EA2
    Ea2_128 = 0x02,
    /// 128-5G-EA3
    Ea3_128 = 0x03,
    /// 5G-EA4
    Ea4 = 0x04,
    /// 5G-EA5
    Ea5 = 0x05,
    /// 5G-EA6
    Ea6 = 0x06,
    /// 5G-EA7
    Ea7 = 0x07,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Type of integrity protection algorithm (3GPP TS 24.501 Section 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum TypeOfIntegrityProtectionAlgorithm {
    /// 5G-IA0 (null integrity)
    Ia0 = 0x00,
    /// 128-5G-IA1
    Ia1_128 = 0x01,
    /// 128-5G-IA2
    Ia2_128 = 0x02,
    /// 128-5G-IA3
    Ia3_128 = 0x03,
    /// 5G-IA4
    Ia4 = 0x04,
    /// 5G-IA5
    Ia5 = 0x05,
    /// 5G-IA6
    Ia6 = 0x06,
    /// 5G-IA7
    Ia7 = 0x07,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// EPS type of ciphering algorithm (3GPP TS 24.301 Section 9.9.3.23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum EpsTypeOfCipheringAlgorithm {
    /// EEA0 (null ciphering)
    Eea0 = 0x00,
    /// 128-EEA1
    Eea1_128 = 0x01,
    /// 128-EEA2
    Eea2_128 = 0x02,
    /// 128-EEA3
    Eea3_128 = 0x03,
    /// EEA4
    Eea4 = 0x04,
    /// EEA5
    Eea5 = 0x05,
    /// EEA6
    Eea6 = 0x06,
    /// EEA7
    Eea7 = 0x07,
    /// Out of range raw value
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// EPS type of integrity protection algorithm (3GPP TS 24.301 Section 9.9.3.23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum EpsTypeOfIntegrityProtectionAlgorithm {
    /// EIA0 (null integrity)
    Eia0 = 0x00,
    /// 128-EIA1
    Eia1_128 = 0x01,
    /// 128-EIA2
    Eia2_128 = 0x02,
    /// 128-EIA3
    Eia3_128 = 0x03,
    /// EIA4
    Eia4 = 0x04,
    /// EIA5
    Eia5 = 0x05,
    /// EIA6
    Eia6 = 0x06,
    /// EIA7
    Eia7 = 0x07,
    /// Out of range raw value
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// GPRS timer value unit (3GPP TS 24.008 Section 10.5.7.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum GprsTimerValueUnit {
    /// Value is incremented in multiples of 2 seconds
    MultiplesOf2Seconds = 0b000,
    /// Value is incremented in multiples of 1 minute
    MultiplesOf1Minute = 0b001,
    /// Value is incremented in multiples of decihours (6 minutes)
    MultiplesOfDecihours = 0b010,
    /// Timer is deactivated
    TimerDeactivated = 0b111,
    /// Other values are interpreted as multiples of 1 minute by receivers
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Maximum data rate per UE for user-plane integrity protection
/// (3GPP TS 24.501 Section 9.11.4.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MaximumDataRate {
    /// 64 kbps
    SixtyFourKbps = 0x00,
    /// NULL
    Null = 0x01,
    /// Spare values, interpreted as 64 kbps by receivers. Declared ahead
    /// of 0xFF so its implicit discriminant stays in range.
    #[num_enum(catch_all)]
    Unknown(u8),
    /// Full data rate
    FullDataRate = 0xFF,
}

// ============================================================================
// Trait for Type 3 Information Elements
// ============================================================================

/// Trait for Type 3 Information Elements (fixed length)
pub trait InformationElement3: NasEncode + NasDecode {
    /// The fixed length of this IE in bytes
    const LENGTH: usize;
}

// ============================================================================
// Type 3 IE Structures
// ============================================================================

/// 5GMM Cause IE (3GPP TS 24.501 Section 9.11.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gMmCause {
    /// The cause value
    pub value: MmCause,
}

impl Ie5gMmCause {
    /// Create a new 5GMM Cause IE
    pub fn new(value: MmCause) -> Self {
        Self { value }
    }
}

impl InformationElement3 for Ie5gMmCause {
    const LENGTH: usize = 1;
}

impl NasEncode for Ie5gMmCause {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.value, 8)
    }
}

impl NasDecode for Ie5gMmCause {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::new(read_enum(buf, 8)?))
    }
}

/// 5GSM Cause IE (3GPP TS 24.501 Section 9.11.4.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gSmCause {
    /// The cause value
    pub value: SmCause,
}

impl Ie5gSmCause {
    /// Create a new 5GSM Cause IE
    pub fn new(value: SmCause) -> Self {
        Self { value }
    }
}

impl InformationElement3 for Ie5gSmCause {
    const LENGTH: usize = 1;
}

impl NasEncode for Ie5gSmCause {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.value, 8)
    }
}

impl NasDecode for Ie5gSmCause {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::new(read_enum(buf, 8)?))
    }
}

/// Authentication Parameter RAND IE (3GPP TS 24.501 Section 9.11.3.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAuthenticationParameterRand {
    /// 128-bit random challenge
    pub value: [u8; 16],
}

impl IeAuthenticationParameterRand {
    /// Create from a 16-byte array
    pub fn from_bytes(value: [u8; 16]) -> Self {
        Self { value }
    }
}

impl InformationElement3 for IeAuthenticationParameterRand {
    const LENGTH: usize = 16;
}

impl NasEncode for IeAuthenticationParameterRand {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.write_octets(&self.value);
        Ok(())
    }
}

impl NasDecode for IeAuthenticationParameterRand {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::from_bytes(buf.read_array::<16>()?))
    }
}

/// NAS Security Algorithms IE (3GPP TS 24.501 Section 9.11.3.34)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeNasSecurityAlgorithms {
    /// Type of ciphering algorithm (bits 8-5)
    pub ciphering: TypeOfCipheringAlgorithm,
    /// Type of integrity protection algorithm (bits 4-1)
    pub integrity: TypeOfIntegrityProtectionAlgorithm,
}

impl IeNasSecurityAlgorithms {
    /// Create a new NAS Security Algorithms IE
    pub fn new(
        integrity: TypeOfIntegrityProtectionAlgorithm,
        ciphering: TypeOfCipheringAlgorithm,
    ) -> Self {
        Self {
            ciphering,
            integrity,
        }
    }
}

impl InformationElement3 for IeNasSecurityAlgorithms {
    const LENGTH: usize = 1;
}

impl NasEncode for IeNasSecurityAlgorithms {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.ciphering, 4)?;
        write_enum(buf, self.integrity, 4)
    }
}

impl NasDecode for IeNasSecurityAlgorithms {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let ciphering = read_enum(buf, 4)?;
        let integrity = read_enum(buf, 4)?;
        Ok(Self {
            ciphering,
            integrity,
        })
    }
}

/// EPS NAS Security Algorithms IE (3GPP TS 24.501 Section 9.11.3.25)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeEpsNasSecurityAlgorithms {
    /// Type of ciphering algorithm (bits 7-5, bit 8 spare)
    pub ciphering: EpsTypeOfCipheringAlgorithm,
    /// Type of integrity protection algorithm (bits 3-1, bit 4 spare)
    pub integrity: EpsTypeOfIntegrityProtectionAlgorithm,
}

impl IeEpsNasSecurityAlgorithms {
    /// Create a new EPS NAS Security Algorithms IE
    pub fn new(
        integrity: EpsTypeOfIntegrityProtectionAlgorithm,
        ciphering: EpsTypeOfCipheringAlgorithm,
    ) -> Self {
        Self {
            ciphering,
            integrity,
        }
    }
}

impl InformationElement3 for IeEpsNasSecurityAlgorithms {
    const LENGTH: usize = 1;
}

impl NasEncode for IeEpsNasSecurityAlgorithms {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.skip(1);
        write_enum(buf, self.ciphering, 3)?;
        buf.skip(1);
        write_enum(buf, self.integrity, 3)
    }
}

impl NasDecode for IeEpsNasSecurityAlgorithms {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        buf.skip(1)?;
        let ciphering = read_enum(buf, 3)?;
        buf.skip(1)?;
        let integrity = read_enum(buf, 3)?;
        Ok(Self {
            ciphering,
            integrity,
        })
    }
}

/// GPRS Timer IE (3GPP TS 24.008 Section 10.5.7.3)
///
/// Used as the RQ timer value in 5GSM messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeGprsTimer {
    /// Timer value (5-bit, 0-31)
    pub timer_value: u8,
    /// Timer value unit
    pub timer_value_unit: GprsTimerValueUnit,
}

impl IeGprsTimer {
    /// Create a new GPRS Timer IE
    pub fn new(timer_value: u8, timer_value_unit: GprsTimerValueUnit) -> Self {
        Self {
            timer_value: timer_value & 0x1F,
            timer_value_unit,
        }
    }
}

impl InformationElement3 for IeGprsTimer {
    const LENGTH: usize = 1;
}

impl NasEncode for IeGprsTimer {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.timer_value_unit, 3)?;
        buf.write_bits(u32::from(self.timer_value), 5)?;
        Ok(())
    }
}

impl NasDecode for IeGprsTimer {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let timer_value_unit = read_enum(buf, 3)?;
        let timer_value = buf.read_bits(5)? as u8;
        Ok(Self {
            timer_value,
            timer_value_unit,
        })
    }
}

/// Integrity Protection Maximum Data Rate IE (3GPP TS 24.501 Section 9.11.4.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeIntegrityProtectionMaximumDataRate {
    /// Maximum data rate for uplink
    pub max_rate_uplink: MaximumDataRate,
    /// Maximum data rate for downlink
    pub max_rate_downlink: MaximumDataRate,
}

impl IeIntegrityProtectionMaximumDataRate {
    /// Create a new Integrity Protection Maximum Data Rate IE
    pub fn new(max_rate_uplink: MaximumDataRate, max_rate_downlink: MaximumDataRate) -> Self {
        Self {
            max_rate_uplink,
            max_rate_downlink,
        }
    }
}

impl InformationElement3 for IeIntegrityProtectionMaximumDataRate {
    const LENGTH: usize = 2;
}

impl NasEncode for IeIntegrityProtectionMaximumDataRate {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        write_enum(buf, self.max_rate_uplink, 8)?;
        write_enum(buf, self.max_rate_downlink, 8)
    }
}

impl NasDecode for IeIntegrityProtectionMaximumDataRate {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let max_rate_uplink = read_enum(buf, 8)?;
        let max_rate_downlink = read_enum(buf, 8)?;
        Ok(Self {
            max_rate_uplink,
            max_rate_downlink,
        })
    }
}

/// Maximum Number of Supported Packet Filters IE (3GPP TS 24.501 Section 9.11.4.9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeMaximumNumberOfSupportedPacketFilters {
    /// Maximum number of packet filters (11-bit value, 0-2047)
    pub value: u16,
}

impl IeMaximumNumberOfSupportedPacketFilters {
    /// Create a new Maximum Number of Supported Packet Filters IE
    pub fn new(value: u16) -> Self {
        Self {
            value: value & 0x07FF,
        }
    }
}

impl InformationElement3 for IeMaximumNumberOfSupportedPacketFilters {
    const LENGTH: usize = 2;
}

impl NasEncode for IeMaximumNumberOfSupportedPacketFilters {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        // 11-bit value followed by 5 spare bits
        buf.write_bits(u32::from(self.value), 11)?;
        buf.skip(5);
        Ok(())
    }
}

impl NasDecode for IeMaximumNumberOfSupportedPacketFilters {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let value = buf.read_bits(11)? as u16;
        buf.skip(5)?;
        Ok(Self { value })
    }
}

/// PDU Session Identity 2 IE (3GPP TS 24.501 Section 9.11.3.41)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IePduSessionIdentity2 {
    /// PDU session identity value
    pub value: u8,
}

impl IePduSessionIdentity2 {
    /// Create a new PDU Session Identity 2 IE
    pub fn new(value: u8) -> Self {
        Self { value }
    }
}

impl InformationElement3 for IePduSessionIdentity2 {
    const LENGTH: usize = 1;
}

impl NasEncode for IePduSessionIdentity2 {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.write_bits(u32::from(self.value), 8)?;
        Ok(())
    }
}

impl NasDecode for IePduSessionIdentity2 {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::new(buf.read_bits(8)? as u8))
    }
}

/// Time Zone IE (3GPP TS 24.501 Section 9.11.3.52)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeTimeZone {
    /// Time zone value (encoded as per 3GPP TS 23.040)
    pub value: u8,
}

impl IeTimeZone {
    /// Create a new Time Zone IE
    pub fn new(value: u8) -> Self {
        Self { value }
    }
}

impl InformationElement3 for IeTimeZone {
    const LENGTH: usize = 1;
}

impl NasEncode for IeTimeZone {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        buf.write_bits(u32::from(self.value), 8)?;
        Ok(())
    }
}

impl NasDecode for IeTimeZone {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Ok(Self::new(buf.read_bits(8)? as u8))
    }
}

/// Universal time structure for TimeZoneAndTime IE
///
/// All fields hold semi-octet (swapped BCD) encoded values as they appear
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VTime {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl VTime {
    /// Create a new VTime
    pub fn new(year: u8, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Time Zone and Time IE (3GPP TS 24.501 Section 9.11.3.53)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeTimeZoneAndTime {
    /// Universal time
    pub time: VTime,
    /// Time zone value
    pub timezone: u8,
}

impl IeTimeZoneAndTime {
    /// Create a new Time Zone and Time IE
    pub fn new(time: VTime, timezone: u8) -> Self {
        Self { time, timezone }
    }
}

impl InformationElement3 for IeTimeZoneAndTime {
    const LENGTH: usize = 7;
}

impl NasEncode for IeTimeZoneAndTime {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        let t = &self.time;
        buf.write_octets(&[t.year, t.month, t.day, t.hour, t.minute, t.second, self.timezone]);
        Ok(())
    }
}

impl NasDecode for IeTimeZoneAndTime {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        let [year, month, day, hour, minute, second, timezone] = buf.read_array::<7>()?;
        Ok(Self {
            time: VTime::new(year, month, day, hour, minute, second),
            timezone,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: InformationElement3>(ie: &T) -> Vec<u8> {
        let mut buf = BitBuffer::new();
        ie.nas_encode(&mut buf).unwrap();
        let data = buf.into_vec();
        assert_eq!(data.len(), T::LENGTH);
        data
    }

    fn decode<T: InformationElement3>(data: &[u8]) -> T {
        let mut reader = BitBufferReader::new(data);
        let ie = T::nas_decode(&mut reader).unwrap();
        assert_eq!(reader.remaining_bits(), 0);
        ie
    }

    #[test]
    fn test_ie5g_mm_cause_encode_decode() {
        let ie = Ie5gMmCause::new(MmCause::IllegalUe);
        assert_eq!(encode(&ie), vec![0x03]);
        assert_eq!(decode::<Ie5gMmCause>(&[0x03]), ie);
    }

    #[test]
    fn test_ie5g_mm_cause_unknown_value() {
        let decoded = decode::<Ie5gMmCause>(&[0x02]);
        assert_eq!(decoded.value, MmCause::Unknown(0x02));
        assert_eq!(encode(&decoded), vec![0x02]);
    }

    #[test]
    fn test_ie5g_sm_cause_encode_decode() {
        let ie = Ie5gSmCause::new(SmCause::RegularDeactivation);
        assert_eq!(encode(&ie), vec![0x24]);
        assert_eq!(decode::<Ie5gSmCause>(&[0x24]), ie);
        assert_eq!(
            decode::<Ie5gSmCause>(&[0x08]).value,
            SmCause::OperatorDeterminedBarring
        );
    }

    #[test]
    fn test_ie_authentication_parameter_rand_encode_decode() {
        let bytes = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
            0x0F, 0x10,
        ];
        let ie = IeAuthenticationParameterRand::from_bytes(bytes);
        assert_eq!(encode(&ie), bytes.to_vec());
        assert_eq!(decode::<IeAuthenticationParameterRand>(&bytes), ie);
    }

    #[test]
    fn test_ie_nas_security_algorithms_encode_decode() {
        let ie = IeNasSecurityAlgorithms::new(
            TypeOfIntegrityProtectionAlgorithm::Ia2_128,
            TypeOfCipheringAlgorithm::Ea1_128,
        );
        assert_eq!(encode(&ie), vec![0x12]);
        assert_eq!(decode::<IeNasSecurityAlgorithms>(&[0x12]), ie);

        let reserved = decode::<IeNasSecurityAlgorithms>(&[0x9A]);
        assert_eq!(reserved.ciphering, TypeOfCipheringAlgorithm::Unknown(9));
        assert_eq!(reserved.integrity, TypeOfIntegrityProtectionAlgorithm::Unknown(0xA));
        assert_eq!(encode(&reserved), vec![0x9A]);
    }

    #[test]
    fn test_ie_eps_nas_security_algorithms_spare_bits() {
        let ie = IeEpsNasSecurityAlgorithms::new(
            EpsTypeOfIntegrityProtectionAlgorithm::Eia2_128,
            EpsTypeOfCipheringAlgorithm::Eea0,
        );
        assert_eq!(encode(&ie), vec![0x02]);
        // spare bits 8 and 4 are ignored
        assert_eq!(decode::<IeEpsNasSecurityAlgorithms>(&[0x8A]), ie);
    }

    #[test]
    fn test_ie_gprs_timer_encode_decode() {
        let ie = IeGprsTimer::new(5, GprsTimerValueUnit::MultiplesOf1Minute);
        assert_eq!(encode(&ie), vec![0x25]);
        assert_eq!(decode::<IeGprsTimer>(&[0x25]), ie);
        assert_eq!(
            decode::<IeGprsTimer>(&[0xE0]).timer_value_unit,
            GprsTimerValueUnit::TimerDeactivated
        );
    }

    #[test]
    fn test_ie_integrity_protection_max_data_rate() {
        let ie = IeIntegrityProtectionMaximumDataRate::new(
            MaximumDataRate::FullDataRate,
            MaximumDataRate::FullDataRate,
        );
        assert_eq!(encode(&ie), vec![0xFF, 0xFF]);
        let decoded = decode::<IeIntegrityProtectionMaximumDataRate>(&[0x01, 0x42]);
        assert_eq!(decoded.max_rate_uplink, MaximumDataRate::Null);
        assert_eq!(decoded.max_rate_downlink, MaximumDataRate::Unknown(0x42));
    }

    #[test]
    fn test_max_data_rate_spare_and_full_values() {
        let decoded = decode::<IeIntegrityProtectionMaximumDataRate>(&[0x02, 0xFF]);
        assert_eq!(decoded.max_rate_uplink, MaximumDataRate::Unknown(0x02));
        assert_eq!(decoded.max_rate_downlink, MaximumDataRate::FullDataRate);
        assert_eq!(u8::from(MaximumDataRate::FullDataRate), 0xFF);
        assert_eq!(MaximumDataRate::from(0x00), MaximumDataRate::SixtyFourKbps);
        assert_eq!(encode(&decoded), vec![0x02, 0xFF]);
    }

    #[test]
    fn test_ie_max_packet_filters() {
        let ie = IeMaximumNumberOfSupportedPacketFilters::new(1024);
        assert_eq!(encode(&ie), vec![0x80, 0x00]);
        let decoded = decode::<IeMaximumNumberOfSupportedPacketFilters>(&[0xFF, 0xFF]);
        assert_eq!(decoded.value, 0x07FF);
    }

    #[test]
    fn test_ie_time_zone_and_time() {
        let ie = IeTimeZoneAndTime::new(VTime::new(0x12, 0x50, 0x31, 0x32, 0x54, 0x40), 0x21);
        let data = encode(&ie);
        assert_eq!(data, vec![0x12, 0x50, 0x31, 0x32, 0x54, 0x40, 0x21]);
        assert_eq!(decode::<IeTimeZoneAndTime>(&data), ie);
        assert_eq!(encode(&IeTimeZone::new(0x40)), vec![0x40]);
    }

    #[test]
    fn test_ie_truncated_input() {
        let mut reader = BitBufferReader::new(&[0x01]);
        assert!(IeIntegrityProtectionMaximumDataRate::nas_decode(&mut reader).is_err());
    }
}
