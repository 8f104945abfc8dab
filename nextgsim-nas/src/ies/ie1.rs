//! Type 1 Information Elements (half-octet)
//!
//! Type 1 IEs occupy only 4 bits (half an octet) and are used for
//! compact encoding of small values in NAS messages. As optional IEs they
//! share their octet with a half-octet IEI; as mandatory IEs two of them
//! (or one and a spare half octet) share an octet.
//!
//! Based on 3GPP TS 24.501 specification.

use nextgsim_common::{BitBuffer, BitBufferReader};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::codec::{fit_bits, CodecResult, NasDecode, NasEncode};

// ============================================================================
// Enumerations for Type 1 IEs
// ============================================================================

/// Type of security context flag (3GPP TS 24.501 Section 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum TypeOfSecurityContext {
    /// Native security context (for KSIAMF)
    #[default]
    Native = 0b0,
    /// Mapped security context (for KSIASME)
    Mapped = 0b1,
}

/// 5GS registration type value (3GPP TS 24.501 Section 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum RegistrationType {
    /// Initial registration
    InitialRegistration = 0b001,
    /// Mobility registration updating
    MobilityRegistrationUpdating = 0b010,
    /// Periodic registration updating
    PeriodicRegistrationUpdating = 0b011,
    /// Emergency registration
    EmergencyRegistration = 0b100,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Follow-on Request indicator (3GPP TS 24.501 Section 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum FollowOnRequest {
    /// No follow-on request pending
    #[default]
    NoPending = 0b0,
    /// Follow-on request pending
    Pending = 0b1,
}

/// 5GS identity type (3GPP TS 24.501 Section 9.11.3.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum IdentityType {
    /// No identity
    NoIdentity = 0b000,
    /// SUCI (Subscription Concealed Identifier)
    Suci = 0b001,
    /// 5G-GUTI (5G Globally Unique Temporary Identifier)
    Guti = 0b010,
    /// IMEI (International Mobile Equipment Identity)
    Imei = 0b011,
    /// 5G-S-TMSI (5G S-Temporary Mobile Subscriber Identity)
    STmsi = 0b100,
    /// IMEISV (IMEI Software Version)
    ImeiSv = 0b101,
    /// MAC address
    MacAddress = 0b110,
    /// EUI-64
    Eui64 = 0b111,
    /// Out of range raw value
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Access Type (3GPP TS 24.501 Section 9.11.2.1A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum AccessType {
    /// 3GPP access
    ThreeGppAccess = 0b01,
    /// Non-3GPP access
    NonThreeGppAccess = 0b10,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// De-registration access type (3GPP TS 24.501 Section 9.11.3.20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DeRegistrationAccessType {
    /// 3GPP access
    ThreeGppAccess = 0b01,
    /// Non-3GPP access
    NonThreeGppAccess = 0b10,
    /// 3GPP access and non-3GPP access
    ThreeGppAndNonThreeGppAccess = 0b11,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Switch off indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SwitchOff {
    /// Normal de-registration
    #[default]
    NormalDeRegistration = 0b0,
    /// Switch off
    SwitchOff = 0b1,
}

/// Re-registration required indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ReRegistrationRequired {
    /// Re-registration not required
    #[default]
    NotRequired = 0b0,
    /// Re-registration required
    Required = 0b1,
}

/// Service type (3GPP TS 24.501 Section 9.11.3.50)
///
/// Unused values are to be interpreted as signalling (0111, 1000) or data
/// (1001-1011) by the receiver; they are kept raw here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ServiceType {
    Signalling = 0b0000,
    Data = 0b0001,
    MobileTerminatedServices = 0b0010,
    EmergencyServices = 0b0011,
    EmergencyServicesFallback = 0b0100,
    HighPriorityAccess = 0b0101,
    ElevatedSignalling = 0b0110,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Payload container type (3GPP TS 24.501 Section 9.11.3.40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum PayloadContainerType {
    /// N1 SM information
    N1SmInformation = 0b0001,
    /// SMS
    Sms = 0b0010,
    /// LTE Positioning Protocol (LPP) message container
    Lpp = 0b0011,
    /// SOR transparent container
    SorTransparentContainer = 0b0100,
    /// UE policy container
    UePolicyContainer = 0b0101,
    /// UE parameters update transparent container
    UeParametersUpdate = 0b0110,
    /// Location services message container
    LocationServices = 0b0111,
    /// CIoT user data container
    CiotUserData = 0b1000,
    /// Multiple payloads
    MultiplePayloads = 0b1111,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// NSSAI inclusion mode (3GPP TS 24.501 Section 9.11.3.37A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum NssaiInclusionMode {
    A = 0b00,
    B = 0b01,
    C = 0b10,
    D = 0b11,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// UE radio capability ID deletion indication value
/// (3GPP TS 24.501 Section 9.11.3.69)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum UeRadioCapabilityIdDeletion {
    /// UE radio capability ID deletion not requested
    NotRequested = 0b000,
    /// Network-assigned UE radio capability IDs deletion requested
    Requested = 0b001,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// IMEISV request (3GPP TS 24.501 Section 9.11.3.28)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ImeiSvRequest {
    /// IMEISV not requested
    NotRequested = 0b000,
    /// IMEISV requested
    Requested = 0b001,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Request type (3GPP TS 24.501 Section 9.11.3.47)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum RequestType {
    InitialRequest = 0b001,
    ExistingPduSession = 0b010,
    InitialEmergencyRequest = 0b011,
    ExistingEmergencyPduSession = 0b100,
    ModificationRequest = 0b101,
    MaPduRequest = 0b110,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// MA PDU session information value (3GPP TS 24.501 Section 9.11.3.31A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MaPduSessionInformation {
    /// MA PDU session network upgrade is allowed
    NetworkUpgradeAllowed = 0b0001,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Downlink data expected (3GPP TS 24.501 Section 9.11.3.46A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum DownlinkDataExpected {
    /// No information regarding DDX is conveyed
    NoInformation = 0b00,
    /// No further uplink and no further downlink data transmission expected
    NoFurtherData = 0b01,
    /// Only a single downlink data transmission expected
    SingleDownlinkTransmission = 0b10,
    /// Reserved
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// PDU session type (3GPP TS 24.501 Section 9.11.4.11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum PduSessionType {
    Ipv4 = 0b001,
    Ipv6 = 0b010,
    Ipv4v6 = 0b011,
    Unstructured = 0b100,
    Ethernet = 0b101,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// SSC mode (3GPP TS 24.501 Section 9.11.4.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SscMode {
    SscMode1 = 0b001,
    SscMode2 = 0b010,
    SscMode3 = 0b011,
    #[num_enum(catch_all)]
    Unknown(u8),
}

// ============================================================================
// Type 1 IE trait and codec glue
// ============================================================================

/// Trait for Type 1 Information Elements (half-octet)
pub trait InformationElement1: Sized {
    /// Decode from the low 4 bits of `val`. Spare bits are ignored.
    fn decode(val: u8) -> Self;

    /// Encode to a 4-bit value. Fails if a raw field does not fit.
    fn encode(&self) -> CodecResult<u8>;
}

macro_rules! impl_type1_codec {
    ($($ie:ty),* $(,)?) => {
        $(
            impl NasEncode for $ie {
                fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
                    let nibble = InformationElement1::encode(self)?;
                    buf.write_bits(u32::from(nibble), 4)?;
                    Ok(())
                }
            }

            impl NasDecode for $ie {
                fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
                    let nibble = buf.read_bits(4)? as u8;
                    Ok(<$ie as InformationElement1>::decode(nibble))
                }
            }
        )*
    };
}

#[inline]
fn bit(val: u8, index: u8) -> bool {
    (val >> index) & 0x01 == 1
}

// ============================================================================
// 5GMM Type 1 IEs
// ============================================================================

/// 5GS Registration Type IE (3GPP TS 24.501 Section 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gsRegistrationType {
    /// Follow-on request pending (bit 4)
    pub follow_on_request: FollowOnRequest,
    /// Registration type value (bits 3-1)
    pub registration_type: RegistrationType,
}

impl Ie5gsRegistrationType {
    /// Create a new 5GS Registration Type IE
    pub fn new(follow_on_request: FollowOnRequest, registration_type: RegistrationType) -> Self {
        Self {
            follow_on_request,
            registration_type,
        }
    }
}

impl InformationElement1 for Ie5gsRegistrationType {
    fn decode(val: u8) -> Self {
        Self {
            follow_on_request: FollowOnRequest::from((val >> 3) & 0x01),
            registration_type: RegistrationType::from(val & 0x07),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        let for_bit = fit_bits(self.follow_on_request.into(), 1)?;
        let reg_type = fit_bits(self.registration_type.into(), 3)?;
        Ok((for_bit << 3) | reg_type)
    }
}

/// NAS Key Set Identifier IE (3GPP TS 24.501 Section 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeNasKeySetIdentifier {
    /// Type of security context
    pub tsc: TypeOfSecurityContext,
    /// Key set identifier (0-6, 7 = no key is available)
    pub ksi: u8,
}

impl IeNasKeySetIdentifier {
    /// KSI value signalling that no key is available
    pub const NO_KEY_AVAILABLE: u8 = 0b111;

    /// Create a new NAS Key Set Identifier
    pub fn new(tsc: TypeOfSecurityContext, ksi: u8) -> Self {
        Self { tsc, ksi }
    }

    /// Create a "no key is available" NAS Key Set Identifier
    pub fn not_available() -> Self {
        Self {
            tsc: TypeOfSecurityContext::Native,
            ksi: Self::NO_KEY_AVAILABLE,
        }
    }

    /// Returns true if a key is available
    pub fn is_available(&self) -> bool {
        self.ksi != Self::NO_KEY_AVAILABLE
    }
}

impl Default for IeNasKeySetIdentifier {
    fn default() -> Self {
        Self::not_available()
    }
}

impl InformationElement1 for IeNasKeySetIdentifier {
    fn decode(val: u8) -> Self {
        // Bit 3: TSC, Bits 2-0: KSI
        Self {
            tsc: TypeOfSecurityContext::from((val >> 3) & 0x01),
            ksi: val & 0x07,
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        let tsc_val: u8 = self.tsc.into();
        Ok((tsc_val << 3) | fit_bits(self.ksi, 3)?)
    }
}

/// MICO Indication IE (3GPP TS 24.501 Section 9.11.3.31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeMicoIndication {
    /// Strictly periodic registration timer supported (SPRTI)
    pub sprti: bool,
    /// Registration area allocation indication (RAAI)
    pub raai: bool,
}

impl InformationElement1 for IeMicoIndication {
    fn decode(val: u8) -> Self {
        Self {
            sprti: bit(val, 1),
            raai: bit(val, 0),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok((u8::from(self.sprti) << 1) | u8::from(self.raai))
    }
}

/// Network Slicing Indication IE (3GPP TS 24.501 Section 9.11.3.36)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeNetworkSlicingIndication {
    /// Network slicing subscription change indication (spare if UE->NW)
    pub nssci: bool,
    /// Default configured NSSAI indication (spare if NW->UE)
    pub dcni: bool,
}

impl InformationElement1 for IeNetworkSlicingIndication {
    fn decode(val: u8) -> Self {
        Self {
            nssci: bit(val, 1),
            dcni: bit(val, 0),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok((u8::from(self.nssci) << 1) | u8::from(self.dcni))
    }
}

/// Payload Container Type IE (3GPP TS 24.501 Section 9.11.3.40)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IePayloadContainerType {
    /// Payload container type value
    pub value: PayloadContainerType,
}

impl IePayloadContainerType {
    /// Create a new Payload Container Type IE
    pub fn new(value: PayloadContainerType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IePayloadContainerType {
    fn decode(val: u8) -> Self {
        Self::new(PayloadContainerType::from(val & 0x0F))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 4)
    }
}

/// NSSAI Inclusion Mode IE (3GPP TS 24.501 Section 9.11.3.37A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeNssaiInclusionMode {
    /// Inclusion mode
    pub mode: NssaiInclusionMode,
}

impl InformationElement1 for IeNssaiInclusionMode {
    fn decode(val: u8) -> Self {
        Self {
            mode: NssaiInclusionMode::from(val & 0x03),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.mode.into(), 2)
    }
}

/// Non-3GPP NW provided policies IE (3GPP TS 24.501 Section 9.11.3.36A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeNon3gppNwProvidedPolicies {
    /// Non-3GPP emergency number policy (N3EN)
    pub n3en: bool,
}

impl InformationElement1 for IeNon3gppNwProvidedPolicies {
    fn decode(val: u8) -> Self {
        Self { n3en: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.n3en))
    }
}

/// UE radio capability ID deletion indication IE (3GPP TS 24.501 Section 9.11.3.69)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeUeRadioCapabilityIdDeletionIndication {
    /// Deletion request
    pub value: UeRadioCapabilityIdDeletion,
}

impl InformationElement1 for IeUeRadioCapabilityIdDeletionIndication {
    fn decode(val: u8) -> Self {
        Self {
            value: UeRadioCapabilityIdDeletion::from(val & 0x07),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// N5GC indication IE (3GPP TS 24.501 Section 9.11.3.72)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeN5gcIndication {
    /// N5GC device registration requested
    pub n5gcreg: bool,
}

impl InformationElement1 for IeN5gcIndication {
    fn decode(val: u8) -> Self {
        Self { n5gcreg: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.n5gcreg))
    }
}

/// De-registration Type IE (3GPP TS 24.501 Section 9.11.3.20)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeDeRegistrationType {
    /// Switch off (bit 4)
    pub switch_off: SwitchOff,
    /// Re-registration required (bit 3)
    pub re_registration_required: ReRegistrationRequired,
    /// Access type (bits 2-1)
    pub access_type: DeRegistrationAccessType,
}

impl IeDeRegistrationType {
    /// Create a new De-registration Type IE
    pub fn new(
        switch_off: SwitchOff,
        re_registration_required: ReRegistrationRequired,
        access_type: DeRegistrationAccessType,
    ) -> Self {
        Self {
            switch_off,
            re_registration_required,
            access_type,
        }
    }
}

impl InformationElement1 for IeDeRegistrationType {
    fn decode(val: u8) -> Self {
        Self {
            switch_off: SwitchOff::from((val >> 3) & 0x01),
            re_registration_required: ReRegistrationRequired::from((val >> 2) & 0x01),
            access_type: DeRegistrationAccessType::from(val & 0x03),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        let switch_off: u8 = self.switch_off.into();
        let re_reg: u8 = self.re_registration_required.into();
        Ok((switch_off << 3) | (re_reg << 2) | fit_bits(self.access_type.into(), 2)?)
    }
}

/// Service Type IE (3GPP TS 24.501 Section 9.11.3.50)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeServiceType {
    /// Service type value
    pub value: ServiceType,
}

impl IeServiceType {
    /// Create a new Service Type IE
    pub fn new(value: ServiceType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IeServiceType {
    fn decode(val: u8) -> Self {
        Self::new(ServiceType::from(val & 0x0F))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 4)
    }
}

/// Configuration Update Indication IE (3GPP TS 24.501 Section 9.11.3.18)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeConfigurationUpdateIndication {
    /// Registration requested (RED)
    pub red: bool,
    /// Acknowledgement requested (ACK)
    pub ack: bool,
}

impl InformationElement1 for IeConfigurationUpdateIndication {
    fn decode(val: u8) -> Self {
        Self {
            red: bit(val, 1),
            ack: bit(val, 0),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok((u8::from(self.red) << 1) | u8::from(self.ack))
    }
}

/// SMS Indication IE (3GPP TS 24.501 Section 9.11.3.50A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeSmsIndication {
    /// SMS over NAS available (SAI)
    pub sai: bool,
}

impl InformationElement1 for IeSmsIndication {
    fn decode(val: u8) -> Self {
        Self { sai: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.sai))
    }
}

/// Additional configuration indication IE (3GPP TS 24.501 Section 9.11.3.74)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAdditionalConfigurationIndication {
    /// Release of N1 NAS signalling connection not required (SCMR)
    pub scmr: bool,
}

impl InformationElement1 for IeAdditionalConfigurationIndication {
    fn decode(val: u8) -> Self {
        Self { scmr: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.scmr))
    }
}

/// 5GS Identity Type IE (3GPP TS 24.501 Section 9.11.3.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ie5gsIdentityType {
    /// Requested identity
    pub value: IdentityType,
}

impl Ie5gsIdentityType {
    /// Create a new 5GS Identity Type IE
    pub fn new(value: IdentityType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for Ie5gsIdentityType {
    fn decode(val: u8) -> Self {
        Self::new(IdentityType::from(val & 0x07))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// IMEISV Request IE (3GPP TS 24.501 Section 9.11.3.28)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeImeiSvRequest {
    /// IMEISV request value
    pub value: ImeiSvRequest,
}

impl IeImeiSvRequest {
    /// Create a new IMEISV Request IE
    pub fn new(value: ImeiSvRequest) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IeImeiSvRequest {
    fn decode(val: u8) -> Self {
        Self::new(ImeiSvRequest::from(val & 0x07))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// Access Type IE (3GPP TS 24.501 Section 9.11.2.1A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeAccessType {
    /// Access type value
    pub value: AccessType,
}

impl IeAccessType {
    /// Create a new Access Type IE
    pub fn new(value: AccessType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IeAccessType {
    fn decode(val: u8) -> Self {
        Self::new(AccessType::from(val & 0x03))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 2)
    }
}

/// Request Type IE (3GPP TS 24.501 Section 9.11.3.47)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeRequestType {
    /// Request type value
    pub value: RequestType,
}

impl IeRequestType {
    /// Create a new Request Type IE
    pub fn new(value: RequestType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IeRequestType {
    fn decode(val: u8) -> Self {
        Self::new(RequestType::from(val & 0x07))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// MA PDU session information IE (3GPP TS 24.501 Section 9.11.3.31A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeMaPduSessionInformation {
    /// Information value
    pub value: MaPduSessionInformation,
}

impl InformationElement1 for IeMaPduSessionInformation {
    fn decode(val: u8) -> Self {
        Self {
            value: MaPduSessionInformation::from(val & 0x0F),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 4)
    }
}

/// Release assistance indication IE (3GPP TS 24.501 Section 9.11.3.46A)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeReleaseAssistanceIndication {
    /// Downlink data expected
    pub ddx: DownlinkDataExpected,
}

impl InformationElement1 for IeReleaseAssistanceIndication {
    fn decode(val: u8) -> Self {
        Self {
            ddx: DownlinkDataExpected::from(val & 0x03),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.ddx.into(), 2)
    }
}

// ============================================================================
// 5GSM Type 1 IEs
// ============================================================================

/// PDU Session Type IE (3GPP TS 24.501 Section 9.11.4.11)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IePduSessionType {
    /// PDU session type value
    pub value: PduSessionType,
}

impl IePduSessionType {
    /// Create a new PDU Session Type IE
    pub fn new(value: PduSessionType) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IePduSessionType {
    fn decode(val: u8) -> Self {
        Self::new(PduSessionType::from(val & 0x07))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// SSC Mode IE (3GPP TS 24.501 Section 9.11.4.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IeSscMode {
    /// SSC mode value
    pub value: SscMode,
}

impl IeSscMode {
    /// Create a new SSC Mode IE
    pub fn new(value: SscMode) -> Self {
        Self { value }
    }
}

impl InformationElement1 for IeSscMode {
    fn decode(val: u8) -> Self {
        Self::new(SscMode::from(val & 0x07))
    }

    fn encode(&self) -> CodecResult<u8> {
        fit_bits(self.value.into(), 3)
    }
}

/// Always-on PDU session requested IE (3GPP TS 24.501 Section 9.11.4.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAlwaysOnPduSessionRequested {
    /// Always-on PDU session requested (APSR)
    pub apsr: bool,
}

impl InformationElement1 for IeAlwaysOnPduSessionRequested {
    fn decode(val: u8) -> Self {
        Self { apsr: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.apsr))
    }
}

/// Always-on PDU session indication IE (3GPP TS 24.501 Section 9.11.4.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAlwaysOnPduSessionIndication {
    /// Always-on PDU session required (APSI)
    pub apsi: bool,
}

impl InformationElement1 for IeAlwaysOnPduSessionIndication {
    fn decode(val: u8) -> Self {
        Self { apsi: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.apsi))
    }
}

/// Control plane only indication IE (3GPP TS 24.501 Section 9.11.4.23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeControlPlaneOnlyIndication {
    /// PDU session for control plane CIoT 5GS optimization only (CPOI)
    pub cpoi: bool,
}

impl InformationElement1 for IeControlPlaneOnlyIndication {
    fn decode(val: u8) -> Self {
        Self { cpoi: bit(val, 0) }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok(u8::from(self.cpoi))
    }
}

/// Allowed SSC Mode IE (3GPP TS 24.501 Section 9.11.4.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IeAllowedSscMode {
    /// SSC mode 3 allowed (bit 3)
    pub ssc3: bool,
    /// SSC mode 2 allowed (bit 2)
    pub ssc2: bool,
    /// SSC mode 1 allowed (bit 1)
    pub ssc1: bool,
}

impl InformationElement1 for IeAllowedSscMode {
    fn decode(val: u8) -> Self {
        Self {
            ssc3: bit(val, 2),
            ssc2: bit(val, 1),
            ssc1: bit(val, 0),
        }
    }

    fn encode(&self) -> CodecResult<u8> {
        Ok((u8::from(self.ssc3) << 2) | (u8::from(self.ssc2) << 1) | u8::from(self.ssc1))
    }
}

impl_type1_codec!(
    Ie5gsRegistrationType,
    IeNasKeySetIdentifier,
    IeMicoIndication,
    IeNetworkSlicingIndication,
    IePayloadContainerType,
    IeNssaiInclusionMode,
    IeNon3gppNwProvidedPolicies,
    IeUeRadioCapabilityIdDeletionIndication,
    IeN5gcIndication,
    IeDeRegistrationType,
    IeServiceType,
    IeConfigurationUpdateIndication,
    IeSmsIndication,
    IeAdditionalConfigurationIndication,
    Ie5gsIdentityType,
    IeImeiSvRequest,
    IeAccessType,
    IeRequestType,
    IeMaPduSessionInformation,
    IeReleaseAssistanceIndication,
    IePduSessionType,
    IeSscMode,
    IeAlwaysOnPduSessionRequested,
    IeAlwaysOnPduSessionIndication,
    IeControlPlaneOnlyIndication,
    IeAllowedSscMode,
);

/// Writes a spare half octet (4 zero bits)
pub fn encode_spare_half_octet(buf: &mut BitBuffer) {
    buf.skip(4);
}

/// Skips a spare half octet
pub fn decode_spare_half_octet(buf: &mut BitBufferReader<'_>) -> CodecResult<()> {
    buf.skip(4)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use nextgsim_common::BitError;

    fn encode_pair<A: NasEncode, B: NasEncode>(high: &A, low: &B) -> Vec<u8> {
        let mut buf = BitBuffer::new();
        high.nas_encode(&mut buf).unwrap();
        low.nas_encode(&mut buf).unwrap();
        buf.into_vec()
    }

    #[test]
    fn test_registration_type_encode_decode() {
        let ie = Ie5gsRegistrationType::new(FollowOnRequest::Pending, RegistrationType::InitialRegistration);
        assert_eq!(ie.encode().unwrap(), 0x09);
        assert_eq!(Ie5gsRegistrationType::decode(0x09), ie);

        let decoded = Ie5gsRegistrationType::decode(0x07);
        assert_eq!(decoded.follow_on_request, FollowOnRequest::NoPending);
        assert_eq!(decoded.registration_type, RegistrationType::Unknown(7));
        assert_eq!(decoded.encode().unwrap(), 0x07);
    }

    #[test]
    fn test_mandatory_pair_high_nibble_first() {
        // ngKSI (high) + registration type (low), as in a Registration Request
        let ngksi = IeNasKeySetIdentifier::not_available();
        let reg = Ie5gsRegistrationType::new(FollowOnRequest::Pending, RegistrationType::InitialRegistration);
        assert_eq!(encode_pair(&ngksi, &reg), vec![0x79]);

        let data = [0x79];
        let mut reader = BitBufferReader::new(&data);
        assert_eq!(IeNasKeySetIdentifier::nas_decode(&mut reader).unwrap(), ngksi);
        assert_eq!(Ie5gsRegistrationType::nas_decode(&mut reader).unwrap(), reg);
    }

    #[test]
    fn test_nas_key_set_identifier() {
        let ksi = IeNasKeySetIdentifier::new(TypeOfSecurityContext::Mapped, 3);
        assert_eq!(ksi.encode().unwrap(), 0x0B);
        assert!(ksi.is_available());
        assert!(!IeNasKeySetIdentifier::default().is_available());

        let bad = IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 9);
        assert_eq!(
            bad.encode(),
            Err(CodecError::Bit(BitError::ValueOutOfRange { value: 9, bits: 3 }))
        );
    }

    #[test]
    fn test_deregistration_type() {
        let ie = IeDeRegistrationType::new(
            SwitchOff::NormalDeRegistration,
            ReRegistrationRequired::NotRequired,
            DeRegistrationAccessType::ThreeGppAccess,
        );
        assert_eq!(ie.encode().unwrap(), 0x01);
        let decoded = IeDeRegistrationType::decode(0x0F);
        assert_eq!(decoded.switch_off, SwitchOff::SwitchOff);
        assert_eq!(decoded.re_registration_required, ReRegistrationRequired::Required);
        assert_eq!(
            decoded.access_type,
            DeRegistrationAccessType::ThreeGppAndNonThreeGppAccess
        );
    }

    #[test]
    fn test_flag_ies_ignore_spare_bits() {
        assert_eq!(IeMicoIndication::decode(0x0F), IeMicoIndication { sprti: true, raai: true });
        assert_eq!(IeMicoIndication { sprti: true, raai: true }.encode().unwrap(), 0x03);
        assert_eq!(IeSmsIndication::decode(0x0E), IeSmsIndication { sai: false });
        assert!(IeAlwaysOnPduSessionIndication::decode(0x01).apsi);
        assert_eq!(
            IeAllowedSscMode::decode(0x05),
            IeAllowedSscMode {
                ssc3: true,
                ssc2: false,
                ssc1: true
            }
        );
    }

    #[test]
    fn test_raw_values_round_trip() {
        let payload = IePayloadContainerType::decode(0x0A);
        assert_eq!(payload.value, PayloadContainerType::Unknown(0x0A));
        assert_eq!(payload.encode().unwrap(), 0x0A);

        let service = IeServiceType::decode(0x09);
        assert_eq!(service.value, ServiceType::Unknown(0x09));
        assert_eq!(service.encode().unwrap(), 0x09);

        let session = IePduSessionType::decode(0x07);
        assert_eq!(session.value, PduSessionType::Unknown(7));
        assert_eq!(session.encode().unwrap(), 0x07);
    }

    #[test]
    fn test_unknown_value_wider_than_field() {
        let ie = IeAccessType::new(AccessType::Unknown(0x05));
        let mut buf = BitBuffer::new();
        assert!(matches!(
            ie.nas_encode(&mut buf),
            Err(CodecError::Bit(BitError::ValueOutOfRange { bits: 2, .. }))
        ));
    }

    #[test]
    fn test_spare_half_octet() {
        let mut buf = BitBuffer::new();
        encode_spare_half_octet(&mut buf);
        IeAccessType::new(AccessType::NonThreeGppAccess)
            .nas_encode(&mut buf)
            .unwrap();
        assert_eq!(buf.data(), &[0x02]);
    }
}
