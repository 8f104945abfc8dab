//! PDU Session Establishment Messages (3GPP TS 24.501 Section 8.3.1 - 8.3.3)
//!
//! This module implements the PDU Session Establishment procedure messages:
//! - PDU Session Establishment Request (UE to network)
//! - PDU Session Establishment Accept (network to UE)
//! - PDU Session Establishment Reject (network to UE)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI values
// ============================================================================

/// IEI values for PDU Session Establishment Request optional IEs
pub mod pdu_session_establishment_request_iei {
    /// PDU session type (Type 1)
    pub const PDU_SESSION_TYPE: u8 = 0x9;
    /// SSC mode (Type 1)
    pub const SSC_MODE: u8 = 0xA;
    /// 5GSM capability
    pub const SM_CAPABILITY: u8 = 0x28;
    /// Maximum number of supported packet filters
    pub const MAXIMUM_NUMBER_OF_SUPPORTED_PACKET_FILTERS: u8 = 0x55;
    /// Always-on PDU session requested (Type 1)
    pub const ALWAYS_ON_PDU_SESSION_REQUESTED: u8 = 0xB;
    /// SM PDU DN request container
    pub const SM_PDU_DN_REQUEST_CONTAINER: u8 = 0x39;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// IP header compression configuration
    pub const IP_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x66;
    /// DS-TT Ethernet port MAC address
    pub const DS_TT_ETHERNET_PORT_MAC_ADDRESS: u8 = 0x6E;
    /// UE-DS-TT residence time
    pub const UE_DS_TT_RESIDENCE_TIME: u8 = 0x6F;
    /// Port management information container
    pub const PORT_MANAGEMENT_INFORMATION_CONTAINER: u8 = 0x74;
    /// Ethernet header compression configuration
    pub const ETHERNET_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x1F;
    /// Suggested interface identifier
    pub const SUGGESTED_INTERFACE_IDENTIFIER: u8 = 0x29;
}

/// IEI values for PDU Session Establishment Accept optional IEs
pub mod pdu_session_establishment_accept_iei {
    /// 5GSM cause
    pub const SM_CAUSE: u8 = 0x59;
    /// PDU address
    pub const PDU_ADDRESS: u8 = 0x29;
    /// RQ timer value
    pub const RQ_TIMER_VALUE: u8 = 0x56;
    /// S-NSSAI
    pub const S_NSSAI: u8 = 0x22;
    /// Always-on PDU session indication (Type 1)
    pub const ALWAYS_ON_PDU_SESSION_INDICATION: u8 = 0x8;
    /// Mapped EPS bearer contexts
    pub const MAPPED_EPS_BEARER_CONTEXTS: u8 = 0x75;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// Authorized QoS flow descriptions
    pub const AUTHORIZED_QOS_FLOW_DESCRIPTIONS: u8 = 0x79;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// DNN
    pub const DNN: u8 = 0x25;
    /// 5GSM network feature support
    pub const NETWORK_FEATURE_SUPPORT: u8 = 0x17;
    /// Serving PLMN rate control
    pub const SERVING_PLMN_RATE_CONTROL: u8 = 0x18;
    /// ATSSS container
    pub const ATSSS_CONTAINER: u8 = 0x77;
    /// Control plane only indication (Type 1)
    pub const CONTROL_PLANE_ONLY_INDICATION: u8 = 0xC;
    /// IP header compression configuration
    pub const IP_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x66;
    /// Ethernet header compression configuration
    pub const ETHERNET_HEADER_COMPRESSION_CONFIGURATION: u8 = 0x1F;
}

/// IEI values for PDU Session Establishment Reject optional IEs
pub mod pdu_session_establishment_reject_iei {
    /// Back-off timer value
    pub const BACK_OFF_TIMER_VALUE: u8 = 0x37;
    /// Allowed SSC mode (Type 1)
    pub const ALLOWED_SSC_MODE: u8 = 0xF;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// 5GSM congestion re-attempt indicator
    pub const CONGESTION_RE_ATTEMPT_INDICATOR: u8 = 0x61;
    /// Extended protocol configuration options
    pub const EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS: u8 = 0x7B;
    /// Re-attempt indicator
    pub const RE_ATTEMPT_INDICATOR: u8 = 0x1D;
}

// ============================================================================
// PDU Session Establishment Request
// ============================================================================

/// PDU Session Establishment Request message (3GPP TS 24.501 Section 8.3.1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionEstablishmentRequest {
    /// Integrity protection maximum data rate (mandatory)
    pub integrity_protection_maximum_data_rate: IeIntegrityProtectionMaximumDataRate,
    /// PDU session type
    pub pdu_session_type: Option<IePduSessionType>,
    /// SSC mode
    pub ssc_mode: Option<IeSscMode>,
    /// 5GSM capability
    pub sm_capability: Option<Ie5gsmCapability>,
    /// Maximum number of supported packet filters
    pub maximum_number_of_supported_packet_filters: Option<IeMaximumNumberOfSupportedPacketFilters>,
    /// Always-on PDU session requested
    pub always_on_pdu_session_requested: Option<IeAlwaysOnPduSessionRequested>,
    /// SM PDU DN request container
    pub sm_pdu_dn_request_container: Option<IeSmPduDnRequestContainer>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// IP header compression configuration
    pub ip_header_compression_configuration: Option<IeIpHeaderCompressionConfiguration>,
    /// DS-TT Ethernet port MAC address
    pub ds_tt_ethernet_port_mac_address: Option<IeDsTtEthernetPortMacAddress>,
    /// UE-DS-TT residence time
    pub ue_ds_tt_residence_time: Option<IeUeDsTtResidenceTime>,
    /// Port management information container
    pub port_management_information_container: Option<IePortManagementInformationContainer>,
    /// Ethernet header compression configuration
    pub ethernet_header_compression_configuration: Option<IeEthernetHeaderCompressionConfiguration>,
    /// Suggested interface identifier
    pub suggested_interface_identifier: Option<IePduAddress>,
}

impl PduSessionEstablishmentRequest {
    /// Create a PDU Session Establishment Request with the mandatory IE only
    pub fn new(integrity_protection_maximum_data_rate: IeIntegrityProtectionMaximumDataRate) -> Self {
        Self {
            integrity_protection_maximum_data_rate,
            pdu_session_type: None,
            ssc_mode: None,
            sm_capability: None,
            maximum_number_of_supported_packet_filters: None,
            always_on_pdu_session_requested: None,
            sm_pdu_dn_request_container: None,
            extended_protocol_configuration_options: None,
            ip_header_compression_configuration: None,
            ds_tt_ethernet_port_mac_address: None,
            ue_ds_tt_residence_time: None,
            port_management_information_container: None,
            ethernet_header_compression_configuration: None,
            suggested_interface_identifier: None,
        }
    }

    /// Request with full data rate in both directions for the given
    /// session type
    pub fn full_rate(pdu_session_type: PduSessionType) -> Self {
        Self {
            pdu_session_type: Some(IePduSessionType::new(pdu_session_type)),
            ..Self::new(IeIntegrityProtectionMaximumDataRate::new(
                MaximumDataRate::FullDataRate,
                MaximumDataRate::FullDataRate,
            ))
        }
    }
}

impl NasMessageBody for PduSessionEstablishmentRequest {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionEstablishmentRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_establishment_request_iei as iei;

        self.integrity_protection_maximum_data_rate.nas_encode(buf)?;
        encode_optional(buf, iei::PDU_SESSION_TYPE, &self.pdu_session_type)?;
        encode_optional(buf, iei::SSC_MODE, &self.ssc_mode)?;
        encode_optional(buf, iei::SM_CAPABILITY, &self.sm_capability)?;
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
        encode_optional(buf, iei::SM_PDU_DN_REQUEST_CONTAINER, &self.sm_pdu_dn_request_container)?;
        encode_optional(
            buf,
            iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS,
            &self.extended_protocol_configuration_options,
        )?;
        encode_optional(
            buf,
            iei::IP_HEADER_COMPRESSION_CONFIGURATION,
            &self.ip_header_compression_configuration,
        )?;
        encode_optional(
            buf,
            iei::DS_TT_ETHERNET_PORT_MAC_ADDRESS,
            &self.ds_tt_ethernet_port_mac_address,
        )?;
        encode_optional(buf, iei::UE_DS_TT_RESIDENCE_TIME, &self.ue_ds_tt_residence_time)?;
        encode_optional(
            buf,
            iei::PORT_MANAGEMENT_INFORMATION_CONTAINER,
            &self.port_management_information_container,
        )?;
        encode_optional(
            buf,
            iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION,
            &self.ethernet_header_compression_configuration,
        )?;
        encode_optional(
            buf,
            iei::SUGGESTED_INTERFACE_IDENTIFIER,
            &self.suggested_interface_identifier,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use pdu_session_establishment_request_iei as iei;

        let mut msg = Self::new(IeIntegrityProtectionMaximumDataRate::nas_decode(buf)?);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::PDU_SESSION_TYPE => msg.pdu_session_type = Some(NasDecode::nas_decode(r)?),
                iei::SSC_MODE => msg.ssc_mode = Some(NasDecode::nas_decode(r)?),
                iei::SM_CAPABILITY => msg.sm_capability = Some(NasDecode::nas_decode(r)?),
                iei::MAXIMUM_NUMBER_OF_SUPPORTED_PACKET_FILTERS => {
                    msg.maximum_number_of_supported_packet_filters =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::ALWAYS_ON_PDU_SESSION_REQUESTED => {
                    msg.always_on_pdu_session_requested = Some(NasDecode::nas_decode(r)?)
                }
                iei::SM_PDU_DN_REQUEST_CONTAINER => {
                    msg.sm_pdu_dn_request_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::IP_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ip_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::DS_TT_ETHERNET_PORT_MAC_ADDRESS => {
                    msg.ds_tt_ethernet_port_mac_address = Some(NasDecode::nas_decode(r)?)
                }
                iei::UE_DS_TT_RESIDENCE_TIME => {
                    msg.ue_ds_tt_residence_time = Some(NasDecode::nas_decode(r)?)
                }
                iei::PORT_MANAGEMENT_INFORMATION_CONTAINER => {
                    msg.port_management_information_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::ETHERNET_HEADER_COMPRESSION_CONFIGURATION => {
                    msg.ethernet_header_compression_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::SUGGESTED_INTERFACE_IDENTIFIER => {
                    msg.suggested_interface_identifier = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// PDU Session Establishment Accept
// ============================================================================

/// PDU Session Establishment Accept message (3GPP TS 24.501 Section 8.3.2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionEstablishmentAccept {
    /// Selected PDU session type (mandatory, low half octet)
    pub selected_pdu_session_type: IePduSessionType,
    /// Selected SSC mode (mandatory, high half octet)
    pub selected_ssc_mode: IeSscMode,
    /// Authorized QoS rules (mandatory, LV-E)
    pub authorized_qos_rules: IeQosRules,
    /// Session-AMBR (mandatory, LV)
    pub session_ambr: IeSessionAmbr,
    /// 5GSM cause
    pub sm_cause: Option<Ie5gSmCause>,
    /// PDU address
    pub pdu_address: Option<IePduAddress>,
    /// RQ timer value
    pub rq_timer_value: Option<IeGprsTimer>,
    /// S-NSSAI
    pub s_nssai: Option<IeSNssai>,
    /// Always-on PDU session indication
    pub always_on_pdu_session_indication: Option<IeAlwaysOnPduSessionIndication>,
    /// Mapped EPS bearer contexts
    pub mapped_eps_bearer_contexts: Option<IeMappedEpsBearerContexts>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// Authorized QoS flow descriptions
    pub authorized_qos_flow_descriptions: Option<IeQosFlowDescriptions>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// DNN
    pub dnn: Option<IeDnn>,
    /// 5GSM network feature support
    pub network_feature_support: Option<IeNetworkFeatureSupport5gsm>,
    /// Serving PLMN rate control
    pub serving_plmn_rate_control: Option<IeServingPlmnRateControl>,
    /// ATSSS container
    pub atsss_container: Option<IeAtsssContainer>,
    /// Control plane only indication
    pub control_plane_only_indication: Option<IeControlPlaneOnlyIndication>,
    /// IP header compression configuration
    pub ip_header_compression_configuration: Option<IeIpHeaderCompressionConfiguration>,
    /// Ethernet header compression configuration
    pub ethernet_header_compression_configuration: Option<IeEthernetHeaderCompressionConfiguration>,
}

impl PduSessionEstablishmentAccept {
    /// Create a PDU Session Establishment Accept with the mandatory IEs only
    pub fn new(
        selected_pdu_session_type: PduSessionType,
        selected_ssc_mode: SscMode,
        authorized_qos_rules: IeQosRules,
        session_ambr: IeSessionAmbr,
    ) -> Self {
        Self {
            selected_pdu_session_type: IePduSessionType::new(selected_pdu_session_type),
            selected_ssc_mode: IeSscMode::new(selected_ssc_mode),
            authorized_qos_rules,
            session_ambr,
            sm_cause: None,
            pdu_address: None,
            rq_timer_value: None,
            s_nssai: None,
            always_on_pdu_session_indication: None,
            mapped_eps_bearer_contexts: None,
            eap_message: None,
            authorized_qos_flow_descriptions: None,
            extended_protocol_configuration_options: None,
            dnn: None,
            network_feature_support: None,
            serving_plmn_rate_control: None,
            atsss_container: None,
            control_plane_only_indication: None,
            ip_header_compression_configuration: None,
            ethernet_header_compression_configuration: None,
        }
    }
}

impl NasMessageBody for PduSessionEstablishmentAccept {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionEstablishmentAccept;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_establishment_accept_iei as iei;

        self.selected_ssc_mode.nas_encode(buf)?;
        self.selected_pdu_session_type.nas_encode(buf)?;
        self.authorized_qos_rules.nas_encode(buf)?;
        self.session_ambr.nas_encode(buf)?;
        encode_optional(buf, iei::SM_CAUSE, &self.sm_cause)?;
        encode_optional(buf, iei::PDU_ADDRESS, &self.pdu_address)?;
        encode_optional(buf, iei::RQ_TIMER_VALUE, &self.rq_timer_value)?;
        encode_optional(buf, iei::S_NSSAI, &self.s_nssai)?;
        encode_optional(
            buf,
            iei::ALWAYS_ON_PDU_SESSION_INDICATION,
            &self.always_on_pdu_session_indication,
        )?;
        encode_optional(buf, iei::MAPPED_EPS_BEARER_CONTEXTS, &self.mapped_eps_bearer_contexts)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
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
        encode_optional(buf, iei::DNN, &self.dnn)?;
        encode_optional(buf, iei::NETWORK_FEATURE_SUPPORT, &self.network_feature_support)?;
        encode_optional(buf, iei::SERVING_PLMN_RATE_CONTROL, &self.serving_plmn_rate_control)?;
        encode_optional(buf, iei::ATSSS_CONTAINER, &self.atsss_container)?;
        encode_optional(
            buf,
            iei::CONTROL_PLANE_ONLY_INDICATION,
            &self.control_plane_only_indication,
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
        use pdu_session_establishment_accept_iei as iei;

        let selected_ssc_mode = IeSscMode::nas_decode(buf)?;
        let selected_pdu_session_type = IePduSessionType::nas_decode(buf)?;
        let authorized_qos_rules = IeQosRules::nas_decode(buf)?;
        let session_ambr = IeSessionAmbr::nas_decode(buf)?;
        let mut msg = Self::new(
            selected_pdu_session_type.value,
            selected_ssc_mode.value,
            authorized_qos_rules,
            session_ambr,
        );

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::SM_CAUSE => msg.sm_cause = Some(NasDecode::nas_decode(r)?),
                iei::PDU_ADDRESS => msg.pdu_address = Some(NasDecode::nas_decode(r)?),
                iei::RQ_TIMER_VALUE => msg.rq_timer_value = Some(NasDecode::nas_decode(r)?),
                iei::S_NSSAI => msg.s_nssai = Some(NasDecode::nas_decode(r)?),
                iei::ALWAYS_ON_PDU_SESSION_INDICATION => {
                    msg.always_on_pdu_session_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::MAPPED_EPS_BEARER_CONTEXTS => {
                    msg.mapped_eps_bearer_contexts = Some(NasDecode::nas_decode(r)?)
                }
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::AUTHORIZED_QOS_FLOW_DESCRIPTIONS => {
                    msg.authorized_qos_flow_descriptions = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_PROTOCOL_CONFIGURATION_OPTIONS => {
                    msg.extended_protocol_configuration_options = Some(NasDecode::nas_decode(r)?)
                }
                iei::DNN => msg.dnn = Some(NasDecode::nas_decode(r)?),
                iei::NETWORK_FEATURE_SUPPORT => {
                    msg.network_feature_support = Some(NasDecode::nas_decode(r)?)
                }
                iei::SERVING_PLMN_RATE_CONTROL => {
                    msg.serving_plmn_rate_control = Some(NasDecode::nas_decode(r)?)
                }
                iei::ATSSS_CONTAINER => msg.atsss_container = Some(NasDecode::nas_decode(r)?),
                iei::CONTROL_PLANE_ONLY_INDICATION => {
                    msg.control_plane_only_indication = Some(NasDecode::nas_decode(r)?)
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
// PDU Session Establishment Reject
// ============================================================================

/// PDU Session Establishment Reject message (3GPP TS 24.501 Section 8.3.3)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PduSessionEstablishmentReject {
    /// 5GSM cause (mandatory)
    pub sm_cause: Ie5gSmCause,
    /// Back-off timer value
    pub back_off_timer_value: Option<IeGprsTimer3>,
    /// Allowed SSC mode
    pub allowed_ssc_mode: Option<IeAllowedSscMode>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// 5GSM congestion re-attempt indicator
    pub congestion_re_attempt_indicator: Option<IeCongestionReAttemptIndicator>,
    /// Extended protocol configuration options
    pub extended_protocol_configuration_options: Option<IeExtendedProtocolConfigurationOptions>,
    /// Re-attempt indicator
    pub re_attempt_indicator: Option<IeReAttemptIndicator>,
}

impl PduSessionEstablishmentReject {
    /// Create a PDU Session Establishment Reject with the given cause
    pub fn new(sm_cause: SmCause) -> Self {
        Self {
            sm_cause: Ie5gSmCause::new(sm_cause),
            back_off_timer_value: None,
            allowed_ssc_mode: None,
            eap_message: None,
            congestion_re_attempt_indicator: None,
            extended_protocol_configuration_options: None,
            re_attempt_indicator: None,
        }
    }
}

impl NasMessageBody for PduSessionEstablishmentReject {
    const MESSAGE_TYPE: MessageType = MessageType::PduSessionEstablishmentReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use pdu_session_establishment_reject_iei as iei;

        self.sm_cause.nas_encode(buf)?;
        encode_optional(buf, iei::BACK_OFF_TIMER_VALUE, &self.back_off_timer_value)?;
        encode_optional(buf, iei::ALLOWED_SSC_MODE, &self.allowed_ssc_mode)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
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
        use pdu_session_establishment_reject_iei as iei;

        let mut msg = Self::new(Ie5gSmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::BACK_OFF_TIMER_VALUE => {
                    msg.back_off_timer_value = Some(NasDecode::nas_decode(r)?)
                }
                iei::ALLOWED_SSC_MODE => msg.allowed_ssc_mode = Some(NasDecode::nas_decode(r)?),
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::round_trip;
    use std::net::Ipv4Addr;

    /// Default QoS rule: id 1, create new, DQR, match-all filter, QFI 1
    const DEFAULT_QOS_RULE: [u8; 9] = [0x01, 0x00, 0x06, 0x31, 0x31, 0x01, 0x01, 0xFF, 0x01];

    fn accept() -> PduSessionEstablishmentAccept {
        PduSessionEstablishmentAccept::new(
            PduSessionType::Ipv4,
            SscMode::SscMode1,
            IeQosRules::new(DEFAULT_QOS_RULE.to_vec()),
            IeSessionAmbr::new(AmbrUnit::Mbps1, 100, AmbrUnit::Mbps1, 50),
        )
    }

    #[test]
    fn test_establishment_request_full_rate() {
        let mut msg = PduSessionEstablishmentRequest::full_rate(PduSessionType::Ipv4);
        msg.ssc_mode = Some(IeSscMode::new(SscMode::SscMode1));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0xFF, 0xFF, 0x91, 0xA1]);
    }

    #[test]
    fn test_establishment_request_optional_ies() {
        let mut msg = PduSessionEstablishmentRequest::full_rate(PduSessionType::Ipv4v6);
        msg.sm_capability = Some(Ie5gsmCapability::new(vec![0x01]));
        msg.maximum_number_of_supported_packet_filters =
            Some(IeMaximumNumberOfSupportedPacketFilters::new(16));
        msg.always_on_pdu_session_requested = Some(IeAlwaysOnPduSessionRequested { apsr: true });
        msg.extended_protocol_configuration_options =
            Some(IeExtendedProtocolConfigurationOptions::new(vec![0x80, 0x00, 0x0A, 0x00]));
        msg.ethernet_header_compression_configuration =
            Some(IeEthernetHeaderCompressionConfiguration::new(CidLength::SevenBits));
        msg.suggested_interface_identifier = Some(IePduAddress::new(PduAddress::Ipv6 {
            interface_id: [0, 0, 0, 0, 0, 0, 0, 2],
        }));
        round_trip(&msg);
    }

    #[test]
    fn test_establishment_accept_mandatory_layout() {
        let encoded = round_trip(&accept());
        // Selected SSC mode in the high nibble, PDU session type in the low one
        assert_eq!(encoded[0], 0x11);
        assert_eq!(&encoded[1..3], &[0x00, 0x09]);
        assert_eq!(&encoded[3..12], &DEFAULT_QOS_RULE);
        assert_eq!(&encoded[12..], &[0x06, 0x06, 0x00, 0x64, 0x06, 0x00, 0x32]);
    }

    #[test]
    fn test_establishment_accept_with_address() {
        let mut msg = accept();
        msg.pdu_address = Some(IePduAddress::ipv4(Ipv4Addr::new(10, 45, 0, 2)));
        msg.s_nssai = Some(IeSNssai::new(SST_EMBB));
        msg.always_on_pdu_session_indication = Some(IeAlwaysOnPduSessionIndication { apsi: false });
        msg.dnn = Some(IeDnn::from_name("internet").unwrap());
        msg.rq_timer_value = Some(IeGprsTimer::new(2, GprsTimerValueUnit::MultiplesOf1Minute));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[19..26], &[0x29, 0x05, 0x01, 10, 45, 0, 2]);
        assert_eq!(
            msg.pdu_address.and_then(|a| a.address.ipv4()),
            Some(Ipv4Addr::new(10, 45, 0, 2))
        );
    }

    #[test]
    fn test_establishment_reject() {
        let mut msg = PduSessionEstablishmentReject::new(SmCause::MissingOrUnknownDnn);
        msg.allowed_ssc_mode = Some(IeAllowedSscMode {
            ssc3: false,
            ssc2: false,
            ssc1: true,
        });
        msg.congestion_re_attempt_indicator = Some(IeCongestionReAttemptIndicator { abo: true });
        msg.re_attempt_indicator = Some(IeReAttemptIndicator {
            eplmnc: false,
            ratc: true,
        });
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x1B, 0xF1, 0x61, 0x01, 0x01, 0x1D, 0x01, 0x01]);
    }
}
