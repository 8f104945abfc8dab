//! PDU Session Modification Messages (3GPP TS 24.501 Section 8.3.7 - 8.3.11)
//!
//! - PDU Session Modification Request (UE to network)
//! - PDU Session Modification Reject (network to UE)
//! - PDU Session Modification Command (network to UE)
//! - PDU Session Modification Complete (UE to network)
//! - PDU Session Modification Command Reject (UE to network)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI values
// ============================================================================

/// IEI values for PDU Session Modification Request optional IEs
pub mod pdu_session_modification_request_iei {
    /// 5GSM capability
    pub const SM_CAPABILITY: u8 = 0x28;
    /// 5GSM cause
    pub const SM_CAUSE: u8 = 0x59;
    /// Maximum number of supported packet filters
    pub const MAXIMUM_NUMBER_OF_SUPPORTED_PACKET_FILTERS: u8 = 0x55;
    /// Always-on PDU session requested (Type 1)
    pub const ALWAYS_ON_PDU_SESSION_REQUESTED: u8 = 0xB;
    /// Integrity protection maximum data rate
    pub const INTEGRITY_PROTECTION_MAXIMUM_DATA_RATE: u8 = 0x13;
    /// Requested QoS rules
    pub const REQUESTED_QOS_RULES: u8 = 0x7A;
    /// Requested QoS flow descriptions
    pub const REQUESTED_QOS_FLOW_DESCRIPTIONS: u8 = 0x79;
    /// Mapped EPS bearer contexts
    pub const MAPPED_EPS_BEARER_CONTEXTS: u8 = 0x75;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// Port management information container
    pub const PORT_MANAGEMENT_INFORMATION_CONTAINER: u8 = 0x74;
    /// IP header compression configuration
    pub const IP_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x66;
    /// Ethernet header compression configuration
    pub const ETHERNET_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x1F;
}

/// IEI values for PDU Session Modification Reject optional IEs
pub mod pdu_session_modification_reject_iei {
    /// Back-off timer value
    pub const BACK_OFF_TIMER_VALUE: u8 = 0x37;
    /// 5GSM congestion re-attempt indicator
    pub const CONGESTION_RE_ATTEMPT_INDICATOR: u8 = 0x61;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// Re-attempt indicator
    pub const RE_ATTEMPT_INDICATOR: u8 = 0x1D;
}

/// IEI values for PDU Session Modification Command optional IEs
pub mod pdu_session_modification_command_iei {
    /// 5GSM cause
    pub const SM_CAUSE: u8 = 0x59;
    /// Session-AMBR
    pub const SESSION_AMBR: u8 = 0x2A;
    /// RQ timer value
    pub const RQ_TIMER_VALUE: u8 = 0x56;
    /// Always-on PDU session indication (Type 1)
    pub const ALWAYS_ON_PDU_SESSION_INDICATION: u8 = 0x8;
    /// Authorized QoS rules
    pub const AUTHORIZED_QOS_RULES: u8 = 0x7A;
    /// Mapped EPS bearer contexts
    pub const MAPPED_EPS_BEARER_CONTEXTS: u8 = 0x75;
    /// Authorized QoS flow descriptions
    pub const AUTHORIZED_QOS_FLOW_DESCRIPTIONS: u8 = 0x79;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// ATSSS container
    pub const ATSSS_CONTAINER: u8 = 0x77;
    /// IP header compression configuration
    pub const IP_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x66;
    /// Port management information container
    pub const PORT_MANAGEMENT_INFORMATION_CONTAINER: u8 = 0x74;
    /// Serving PLMN rate control
    pub const SERVING_PLMN_RATE_CONTROL: u8 = 0x1E;
    /// Ethernet header compression configuration
    pub const ETHERNET_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x1F;
}

/// IEI values for PDU Session Modification Complete optional IEs
pub mod pdu_session_modification_complete_iei {
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// Port management information container
    pub const PORT_MANAGEMENT_INFORMATION_CONTAINER: u8 = 0x74;
}

/// IEI values for PDU Session Modification Command Reject optional IEs
pub mod pdu_session_modification_command_reject_iei {
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
}

// ============================================================================
// PDU Session Modification Request
// ============================================================================

/// PDU Session Modification Request message (3GPP TS 24.501 Section 8.3.7)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionModificationRequest {
    /// 5GSM capability
    pub sm_capability: Option<Ie5gsmCapability>,
    /// 5GSM cause
    pub sm_cause: Option<Ie5gSmCause>,
    /// Maximum number of supported packet filters
    pub maximum_number_of_supported_packet_filters: Option<IeMaximumNumberOfSupportedPacketFilters>,
    /// Always-on PDU session requested
    pub always_on_pdu_session_requested: Option<IeAlwaysOnPduSessionRequested>,
    /// Integrity protection maximum data rate
    pub integrity_protection_maximum_data_rate: Option<IeIntegrityProtectionMaximumDataRate>,
    /// Requested QoS rules
    pub requested_qos_rules: Option<IeQosRules>,
    /// Requested QoS flow descriptions
    pub requested_qos_flow_descriptions: Option<IeQosFlowDescriptions>,
    /// Mapped EPS bearer contexts
    pub mapped_eps_bearer_contexts: Option<IeMappedEpsBearerContexts>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// Port management information container
    pub port_management_information_container: Option<IePortManagementInformationContainer>,
    /// IP header compression configuration
    pub ip_header_compression_configuration: Option<IeIpHeaderCompressionConfiguration>,
    /// Ethernet header compression configuration
    pub ethernet_header_compression_configuration: Option<IeEthernetHeaderCompressionConfiguration>,
}

impl PduSessionModificationRequest {
    /// Create an empty PDU Session Modification Request
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for PduSessionModificationRequest {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionModificationRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_modification_request_iei as iei;

        encode_optional(buf, iei::SM_CAPABILITY, &self.sm_capability)?;
        encode_optional(buf, iei::SM_CAUSE, &self.sm_cause)?;
        encode_optional(
            buf,
            iei::MAXIMUM_NUMBER_OF_SUPPORTED_PACKET_FILTERS,
            &self.maximum_number_of_supported_packet_filters,
        )?;
        encode_optional(
            buf,
            iei::ALWAYS_ON_PDU_SESSION_REQUESTED,
            &self.always_on_pdu_session_requested,
        )?;
        encode_optional(
            buf,
            iei::INTEGRITY_PROTECTION_MAXIMUM_DATA_RATE,
            &self.integrity_protection_maximum_data_rate,
        )?;
        encode_optional(buf, iei::REQUESTED_QOS_RULES, &self.requested_qos_rules)?;
        encode_optional(
            buf,
            iei::REQUESTED_QOS_FLOW_DESCRIPTIONS,
            &self.requested_qos_flow_descriptions,
        )?;
        encode_optional(buf, iei::MAPPED_EPS_BEARER_CONTEXTS, &self.mapped_eps_bearer_contexts)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(
            buf,
            iei::PORT_MANAGEMENT_INFORMATION_CONTAINER,
            &self.port_management_information_container,
        )?;
        encode_optional(
            buf,
            iei::IP_HEADER_COMPRESSION_CONFIGURATION,
            &self.ip_header_compression_configuration,
        )?;
        encode_optional(
            buf,
            iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION,
            &self.ethernet_header_compression_configuration,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_modification_request_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::SM_CAPABILITY => msg.sm_capability = Some(NasDecode::nas_decode(r)?),
                iei::SM_CAUSE => msg.sm_cause = Some(NasDecode::nas_decode(r)?),
                iei::MAXIMUM_NUMBER_OF_SUPPORTED_PACKET_FILTERS => {
                    msg.maximum_number_of_supported_packet_filters =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::ALWAYS_ON_PDU_SESSION_REQUESTED => {
                    msg.always_on_pdu_session_requested = Some(NasDecode::nas_decode(r)?)
                }
                iei::INTEGRITY_PROTECTION_MAXIMUM_DATA_RATE => {
                    msg.integrity_protection_maximum_data_rate = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_QOS_RULES => {
                    msg.requested_qos_rules = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_QOS_FLOW_DESCRIPTIONS => {
                    msg.requested_qos_flow_descriptions = Some(NasDecode::nas_decode(r)?)
                }
                iei::MAPPED_EPS_BEARER_CONTEXTS => {
                    msg.mapped_eps_bearer_contexts = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::PORT_MANAGEMENT_INFORMATION_CONTAINER => {
                    msg.port_management_information_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::IP_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ip_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ethernet_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Modification Reject
// ============================================================================

/// PDU Session Modification Reject message (3GPP TS 24.501 Section 8.3.8)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionModificationReject {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
    /// Back-off timer value
    pub back_off_timer_value: Option<IeGprsTimer3>,
    /// 5GSM congestion re-attempt indicator
    pub congestion_re_attempt_indicator: Option<IeCongestionReAttemptIndicator>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// Re-attempt indicator
    pub re_attempt_indicator: Option<IeReAttemptIndicator>,
}

impl PduSessionModificationReject {
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
            back_off_timer_value: None,
            congestion_re_attempt_indicator: None,
            extended_protocol_configuration_options: None,
            re_attempt_indicator: None,
        }
    }
}

impl NasMessageBody for PduSessionModificationReject {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionModificationReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_modification_reject_iei as iei;

        self.sm_cause.nas_encode(buf)?;
        encode_optional(buf, iei::BACK_OFF_TIMER_VALUE, &self.back_off_timer_value)?;
        encode_optional(
            buf,
            iei::CONGESTION_RE_ATTEMPT_INDICATOR,
            &self.congestion_re_attempt_indicator,
        )?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(buf, iei::RE_ATTEMPT_INDICATOR, &self.re_attempt_indicator)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_modification_reject_iei as iei;

        let mut msg = Self::new(Ie5gSmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::BACK_OFF_TIMER_VALUE => {
                    msg.back_off_timer_value = Some(NasDecode::nas_decode(r)?)
                }
                iei::CONGESTION_RE_ATTEMPT_INDICATOR => {
                    msg.congestion_re_attempt_indicator = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::RE_ATTEMPT_INDICATOR => {
                    msg.re_attempt_indicator = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Modification Command
// ============================================================================

/// PDU Session Modification Command message (3GPP TS 24.501 Section 8.3.9)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionModificationCommand {
    /// 5GSM cause
    pub sm_cause: Option<Ie5gSmCause>,
    /// Session-AMBR
    pub session_ambr: Option<IeSessionAmbr>,
    /// RQ timer value
    pub rq_timer_value: Option<IeGprsTimer>,
    /// Always-on PDU session indication
    pub always_on_pdu_session_indication: Option<IeAlwaysOnPduSessionIndication>,
    /// Authorized QoS rules
    pub authorized_qos_rules: Option<IeQosRules>,
    /// Mapped EPS bearer contexts
    pub mapped_eps_bearer_contexts: Option<IeMappedEpsBearerContexts>,
    /// Authorized QoS flow descriptions
    pub authorized_qos_flow_descriptions: Option<IeQosFlowDescriptions>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// ATSSS container
    pub atsss_container: Option<IeAtsssContainer>,
    /// IP header compression configuration
    pub ip_header_compression_configuration: Option<IeIpHeaderCompressionConfiguration>,
    /// Port management information container
    pub port_management_information_container: Option<IePortManagementInformationContainer>,
    /// Serving PLMN rate control
    pub serving_plmn_rate_control: Option<IeServingPlmnRateControl>,
    /// Ethernet header compression configuration
    pub ethernet_header_compression_configuration: Option<IeEthernetHeaderCompressionConfiguration>,
}

impl PduSessionModificationCommand {
    /// Create an empty PDU Session Modification Command
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for PduSessionModificationCommand {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionModificationCommand;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_modification_command_iei as iei;

        encode_optional(buf, iei::SM_CAUSE, &self.sm_cause)?;
        encode_optional(buf, iei::SESSION_AMBR, &self.session_ambr)?;
        encode_optional(buf, iei::RQ_TIMER_VALUE, &self.rq_timer_value)?;
        encode_optional(
            buf,
            iei::ALWAYS_ON_PDU_SESSION_INDICATION,
            &self.always_on_pdu_session_indication,
        )?;
        encode_optional(buf, iei::AUTHORIZED_QOS_RULES, &self.authorized_qos_rules)?;
        encode_optional(buf, iei::MAPPED_EPS_BEARER_CONTEXTS, &self.mapped_eps_bearer_contexts)?;
        encode_optional(
            buf,
            iei::AUTHORIZED_QOS_FLOW_DESCRIPTIONS,
            &self.authorized_qos_flow_descriptions,
        )?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(buf, iei::ATSSS_CONTAINER, &self.atsss_container)?;
        encode_optional(
            buf,
            iei::IP_HEADER_COMPRESSION_CONFIGURATION,
            &self.ip_header_compression_configuration,
        )?;
        encode_optional(
            buf,
            iei::PORT_MANAGEMENT_INFORMATION_CONTAINER,
            &self.port_management_information_container,
        )?;
        encode_optional(buf, iei::SERVING_PLMN_RATE_CONTROL, &self.serving_plmn_rate_control)?;
        encode_optional(
            buf,
            iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION,
            &self.ethernet_header_compression_configuration,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_modification_command_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::SM_CAUSE => msg.sm_cause = Some(NasDecode::nas_decode(r)?),
                iei::SESSION_AMBR => msg.session_ambr = Some(NasDecode::nas_decode(r)?),
                iei::RQ_TIMER_VALUE => msg.rq_timer_value = Some(NasDecode::nas_decode(r)?),
                iei::ALWAYS_ON_PDU_SESSION_INDICATION => {
                    msg.always_on_pdu_session_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::AUTHORIZED_QOS_RULES => {
                    msg.authorized_qos_rules = Some(NasDecode::nas_decode(r)?)
                }
                iei::MAPPED_EPS_BEARER_CONTEXTS => {
                    msg.mapped_eps_bearer_contexts = Some(NasDecode::nas_decode(r)?)
                }
                iei::AUTHORIZED_QOS_FLOW_DESCRIPTIONS => {
                    msg.authorized_qos_flow_descriptions = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::ATSSS_CONTAINER => msg.atsss_container = Some(NasDecode::nas_decode(r)?),
                iei::IP_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ip_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::PORT_MANAGEMENT_INFORMATION_CONTAINER => {
                    msg.port_management_information_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::SERVING_PLMN_RATE_CONTROL => {
                    msg.serving_plmn_rate_control = Some(NasDecode::nas_decode(r)?)
                }
                iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ethernet_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Modification Complete
// ============================================================================

/// PDU Session Modification Complete message (3GPP TS 24.501 Section 8.3.10)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PduSessionModificationComplete {
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// Port management information container
    pub port_management_information_container: Option<IePortManagementInformationContainer>,
}

impl PduSessionModificationComplete {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for PduSessionModificationComplete {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionModificationComplete;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_modification_complete_iei as iei;

        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(
            buf,
            iei::PORT_MANAGEMENT_INFORMATION_CONTAINER,
            &self.port_management_information_container,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_modification_complete_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::PORT_MANAGEMENT_INFORMATION_CONTAINER => {
                    msg.port_management_information_container = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Modification Command Reject
// ============================================================================

/// PDU Session Modification Command Reject message (3GPP TS 24.501 Section 8.3.11)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionModificationCommandReject {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
}

impl PduSessionModificationCommandReject {
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
            extended_protocol_configuration_options: None,
        }
    }
}

impl NasMessageBody for PduSessionModificationCommandReject {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionModificationCommandReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_modification_command_reject_iei as iei;

        self.sm_cause.nas_encode(buf)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_modification_command_reject_iei as iei;

        let mut msg = Self::new(Ie5gSmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::{decode_body, round_trip};

    #[test]
    fn test_modification_request_empty() {
        assert!(round_trip(&PduSessionModificationRequest::new()).is_empty());
    }

    #[test]
    fn test_modification_request_ipmdr_tag() {
        let msg = PduSessionModificationRequest {
            sm_cause: Some(Ie5gSmCause::new(SmCause::RegularDeactivation)),
            integrity_protection_maximum_data_rate: Some(IeIntegrityProtectionMaximumDataRate::new(
                MaximumDataRate::SixtyFourKbps,
                MaximumDataRate::FullDataRate,
            )),
            always_on_pdu_session_requested: Some(IeAlwaysOnPduSessionRequested { apsr: true }),
            ..Default::default()
        };
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x59, 0x24, 0xB1, 0x13, 0x00, 0xFF]);
    }

    #[test]
    fn test_modification_reject() {
        let mut msg = PduSessionModificationReject::new(SmCause::InsufficientResources);
        msg.back_off_timer_value =
            Some(IeGprsTimer3::new(GprsTimer3Unit::MultiplesOf1Minute, 3));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x1A, 0x37, 0x01, 0xA3]);
    }

    #[test]
    fn test_modification_command_ambr_and_rules() {
        let msg = PduSessionModificationCommand {
            session_ambr: Some(IeSessionAmbr::new(AmbrUnit::Mbps1, 200, AmbrUnit::Mbps1, 100)),
            authorized_qos_rules: Some(IeQosRules::new(vec![
                0x01, 0x00, 0x06, 0x31, 0x31, 0x01, 0x01, 0xFF, 0x01,
            ])),
            serving_plmn_rate_control: Some(IeServingPlmnRateControl::new(0x0100)),
            ..Default::default()
        };
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..2], &[0x2A, 0x06]);
        assert_eq!(&encoded[8..11], &[0x7A, 0x00, 0x09]);
        assert_eq!(encoded[20], 0x1E);
    }

    #[test]
    fn test_modification_complete_and_command_reject() {
        let complete = PduSessionModificationComplete {
            port_management_information_container: Some(IePortManagementInformationContainer::new(
                vec![0xAA],
            )),
            ..Default::default()
        };
        assert_eq!(round_trip(&complete), vec![0x74, 0x00, 0x01, 0xAA]);

        let reject = PduSessionModificationCommandReject::new(SmCause::InvalidPduSessionIdentity);
        let decoded: PduSessionModificationCommandReject = decode_body(&[0x2B]).unwrap();
        assert_eq!(decoded, reject);
    }
}
