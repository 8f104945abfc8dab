//! Registration Messages (3GPP TS 24.501 Section 8.2.6 - 8.2.9)
//!
//! - Registration Request (UE to network)
//! - Registration Accept (network to UE)
//! - Registration Complete (UE to network)
//! - Registration Reject (network to UE)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI values for Registration messages
// ============================================================================

/// IEI values for Registration Request optional IEs
pub mod registration_request_iei {
    /// Non-current native NAS key set identifier
    pub const NON_CURRENT_NG_KSI: u8 = 0xC;
    /// 5GMM capability
    pub const MM_CAPABILITY: u8 = 0x10;
    /// UE security capability
    pub const UE_SECURITY_CAPABILITY: u8 = 0x2E;
    /// Requested NSSAI
    pub const REQUESTED_NSSAI: u8 = 0x2F;
    /// Last visited registered TAI
    pub const LAST_VISITED_REGISTERED_TAI: u8 = 0x52;
    /// S1 UE network capability
    pub const S1_UE_NETWORK_CAPABILITY: u8 = 0x17;
    /// Uplink data status
    pub const UPLINK_DATA_STATUS: u8 = 0x40;
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
    /// MICO indication
    pub const MICO_INDICATION: u8 = 0xB;
    /// UE status
    pub const UE_STATUS: u8 = 0x2B;
    /// Additional GUTI
    pub const ADDITIONAL_GUTI: u8 = 0x77;
    /// Allowed PDU session status
    pub const ALLOWED_PDU_SESSION_STATUS: u8 = 0x25;
    /// UE's usage setting
    pub const UE_USAGE_SETTING: u8 = 0x18;
    /// Requested DRX parameters
    pub const REQUESTED_DRX_PARAMETERS: u8 = 0x51;
    /// EPS NAS message container
    pub const EPS_NAS_MESSAGE_CONTAINER: u8 = 0x70;
    /// LADN indication
    pub const LADN_INDICATION: u8 = 0x74;
    /// Payload container type
    pub const PAYLOAD_CONTAINER_TYPE: u8 = 0x8;
    /// Payload container
    pub const PAYLOAD_CONTAINER: u8 = 0x7B;
    /// Network slicing indication
    pub const NETWORK_SLICING_INDICATION: u8 = 0x9;
    /// 5GS update type
    pub const UPDATE_TYPE: u8 = 0x53;
    /// Mobile station classmark 2
    pub const MOBILE_STATION_CLASSMARK_2: u8 = 0x41;
    /// Supported codecs
    pub const SUPPORTED_CODECS: u8 = 0x42;
    /// NAS message container
    pub const NAS_MESSAGE_CONTAINER: u8 = 0x71;
    /// EPS bearer context status
    pub const EPS_BEARER_CONTEXT_STATUS: u8 = 0x60;
    /// Requested extended DRX parameters
    pub const REQUESTED_EXTENDED_DRX_PARAMETERS: u8 = 0x6E;
    /// T3324 value
    pub const T3324_VALUE: u8 = 0x6A;
    /// UE radio capability ID
    pub const UE_RADIO_CAPABILITY_ID: u8 = 0x67;
    /// Requested mapped NSSAI
    pub const REQUESTED_MAPPED_NSSAI: u8 = 0x35;
    /// Additional information requested
    pub const ADDITIONAL_INFORMATION_REQUESTED: u8 = 0x48;
    /// Requested WUS assistance information
    pub const REQUESTED_WUS_ASSISTANCE_INFORMATION: u8 = 0x1A;
    /// N5GC indication
    pub const N5GC_INDICATION: u8 = 0xA;
    /// Requested NB-N1 mode DRX parameters
    pub const REQUESTED_NB_N1_MODE_DRX_PARAMETERS: u8 = 0x30;
}

/// IEI values for Registration Accept optional IEs
pub mod registration_accept_iei {
    /// 5G-GUTI
    pub const GUTI: u8 = 0x77;
    /// Equivalent PLMNs
    pub const EQUIVALENT_PLMNS: u8 = 0x4A;
    /// TAI list
    pub const TAI_LIST: u8 = 0x54;
    /// Allowed NSSAI
    pub const ALLOWED_NSSAI: u8 = 0x15;
    /// Rejected NSSAI
    pub const REJECTED_NSSAI: u8 = 0x11;
    /// Configured NSSAI
    pub const CONFIGURED_NSSAI: u8 = 0x31;
    /// 5GS network feature support
    pub const NETWORK_FEATURE_SUPPORT: u8 = 0x21;
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
    /// PDU session reactivation result
    pub const PDU_SESSION_REACTIVATION_RESULT: u8 = 0x26;
    /// PDU session reactivation result error cause
    pub const PDU_SESSION_REACTIVATION_RESULT_ERROR_CAUSE: u8 = 0x72;
    /// LADN information
    pub const LADN_INFORMATION: u8 = 0x79;
    /// MICO indication
    pub const MICO_INDICATION: u8 = 0xB;
    /// Network slicing indication
    pub const NETWORK_SLICING_INDICATION: u8 = 0x9;
    /// Service area list
    pub const SERVICE_AREA_LIST: u8 = 0x27;
    /// T3512 value
    pub const T3512_VALUE: u8 = 0x5E;
    /// Non-3GPP de-registration timer value
    pub const NON_3GPP_DEREGISTRATION_TIMER_VALUE: u8 = 0x5D;
    /// T3502 value
    pub const T3502_VALUE: u8 = 0x16;
    /// Emergency number list
    pub const EMERGENCY_NUMBER_LIST: u8 = 0x34;
    /// Extended emergency number list
    pub const EXTENDED_EMERGENCY_NUMBER_LIST: u8 = 0x7A;
    /// SOR transparent container
    pub const SOR_TRANSPARENT_CONTAINER: u8 = 0x73;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// NSSAI inclusion mode
    pub const NSSAI_INCLUSION_MODE: u8 = 0xA;
    /// Operator-defined access category definitions
    pub const OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS: u8 = 0x76;
    /// Negotiated DRX parameters
    pub const NEGOTIATED_DRX_PARAMETERS: u8 = 0x51;
    /// Non-3GPP NW policies
    pub const NON_3GPP_NW_POLICIES: u8 = 0xD;
    /// EPS bearer context status
    pub const EPS_BEARER_CONTEXT_STATUS: u8 = 0x60;
    /// Negotiated extended DRX parameters
    pub const NEGOTIATED_EXTENDED_DRX_PARAMETERS: u8 = 0x6E;
    /// T3447 value
    pub const T3447_VALUE: u8 = 0x6C;
    /// T3448 value
    pub const T3448_VALUE: u8 = 0x6B;
    /// T3324 value
    pub const T3324_VALUE: u8 = 0x6A;
    /// UE radio capability ID
    pub const UE_RADIO_CAPABILITY_ID: u8 = 0x67;
    /// UE radio capability ID deletion indication
    pub const UE_RADIO_CAPABILITY_ID_DELETION_INDICATION: u8 = 0xE;
    /// Pending NSSAI
    pub const PENDING_NSSAI: u8 = 0x39;
    /// Ciphering key data
    pub const CIPHERING_KEY_DATA: u8 = 0x74;
    /// CAG information list
    pub const CAG_INFORMATION_LIST: u8 = 0x75;
    /// Truncated 5G-S-TMSI configuration
    pub const TRUNCATED_5G_S_TMSI_CONFIGURATION: u8 = 0x1B;
    /// Negotiated WUS assistance information
    pub const NEGOTIATED_WUS_ASSISTANCE_INFORMATION: u8 = 0x1C;
    /// Negotiated NB-N1 mode DRX parameters
    pub const NEGOTIATED_NB_N1_MODE_DRX_PARAMETERS: u8 = 0x29;
}

/// IEI values for Registration Complete optional IEs
pub mod registration_complete_iei {
    /// SOR transparent container
    pub const SOR_TRANSPARENT_CONTAINER: u8 = 0x73;
}

/// IEI values for Registration Reject optional IEs
pub mod registration_reject_iei {
    /// T3346 value
    pub const T3346_VALUE: u8 = 0x5F;
    /// T3502 value
    pub const T3502_VALUE: u8 = 0x16;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// Rejected NSSAI
    pub const REJECTED_NSSAI: u8 = 0x69;
    /// CAG information list
    pub const CAG_INFORMATION_LIST: u8 = 0x75;
}

// ============================================================================
// Registration Request
// ============================================================================

/// Registration Request message (3GPP TS 24.501 Section 8.2.6)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// 5GS registration type (mandatory, low half octet)
    pub registration_type: Ie5gsRegistrationType,
    /// NAS key set identifier (mandatory, high half octet)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// 5GS mobile identity (mandatory)
    pub mobile_identity: Ie5gsMobileIdentity,
    /// Non-current native NAS key set identifier
    pub non_current_ng_ksi: Option<IeNasKeySetIdentifier>,
    /// 5GMM capability
    pub mm_capability: Option<Ie5gmmCapability>,
    /// UE security capability
    pub ue_security_capability: Option<IeUeSecurityCapability>,
    /// Requested NSSAI
    pub requested_nssai: Option<IeNssai>,
    /// Last visited registered TAI
    pub last_visited_registered_tai: Option<Tai>,
    /// S1 UE network capability
    pub s1_ue_network_capability: Option<IeS1UeNetworkCapability>,
    /// Uplink data status
    pub uplink_data_status: Option<IeUplinkDataStatus>,
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
    /// MICO indication
    pub mico_indication: Option<IeMicoIndication>,
    /// UE status
    pub ue_status: Option<IeUeStatus>,
    /// Additional GUTI
    pub additional_guti: Option<Ie5gsMobileIdentity>,
    /// Allowed PDU session status
    pub allowed_pdu_session_status: Option<IeAllowedPduSessionStatus>,
    /// UE's usage setting
    pub ue_usage_setting: Option<IeUeUsageSetting>,
    /// Requested DRX parameters
    pub requested_drx_parameters: Option<Ie5gsDrxParameters>,
    /// EPS NAS message container
    pub eps_nas_message_container: Option<IeEpsNasMessageContainer>,
    /// LADN indication
    pub ladn_indication: Option<IeLadnIndication>,
    /// Payload container type
    pub payload_container_type: Option<IePayloadContainerType>,
    /// Payload container
    pub payload_container: Option<IePayloadContainer>,
    /// Network slicing indication
    pub network_slicing_indication: Option<IeNetworkSlicingIndication>,
    /// 5GS update type
    pub update_type: Option<Ie5gsUpdateType>,
    /// Mobile station classmark 2
    pub mobile_station_classmark_2: Option<IeMobileStationClassmark2>,
    /// Supported codecs
    pub supported_codecs: Option<IeSupportedCodecList>,
    /// NAS message container
    pub nas_message_container: Option<IeNasMessageContainer>,
    /// EPS bearer context status
    pub eps_bearer_context_status: Option<IeEpsBearerContextStatus>,
    /// Requested extended DRX parameters
    pub requested_extended_drx_parameters: Option<IeExtendedDrxParameters>,
    /// T3324 value
    pub t3324_value: Option<IeGprsTimer3>,
    /// UE radio capability ID
    pub ue_radio_capability_id: Option<IeUeRadioCapabilityId>,
    /// Requested mapped NSSAI
    pub requested_mapped_nssai: Option<IeMappedNssai>,
    /// Additional information requested
    pub additional_information_requested: Option<IeAdditionalInformationRequested>,
    /// Requested WUS assistance information
    pub requested_wus_assistance_information: Option<IeWusAssistanceInformation>,
    /// N5GC indication
    pub n5gc_indication: Option<IeN5gcIndication>,
    /// Requested NB-N1 mode DRX parameters
    pub requested_nb_n1_mode_drx_parameters: Option<IeNbN1ModeDrxParameters>,
}

impl RegistrationRequest {
    /// Create a Registration Request with the mandatory IEs only
    pub fn new(
        registration_type: Ie5gsRegistrationType,
        ng_ksi: IeNasKeySetIdentifier,
        mobile_identity: Ie5gsMobileIdentity,
    ) -> Self {
        Self {
            registration_type,
            ng_ksi,
            mobile_identity,
            non_current_ng_ksi: None,
            mm_capability: None,
            ue_security_capability: None,
            requested_nssai: None,
            last_visited_registered_tai: None,
            s1_ue_network_capability: None,
            uplink_data_status: None,
            pdu_session_status: None,
            mico_indication: None,
            ue_status: None,
            additional_guti: None,
            allowed_pdu_session_status: None,
            ue_usage_setting: None,
            requested_drx_parameters: None,
            eps_nas_message_container: None,
            ladn_indication: None,
            payload_container_type: None,
            payload_container: None,
            network_slicing_indication: None,
            update_type: None,
            mobile_station_classmark_2: None,
            supported_codecs: None,
            nas_message_container: None,
            eps_bearer_context_status: None,
            requested_extended_drx_parameters: None,
            t3324_value: None,
            ue_radio_capability_id: None,
            requested_mapped_nssai: None,
            additional_information_requested: None,
            requested_wus_assistance_information: None,
            n5gc_indication: None,
            requested_nb_n1_mode_drx_parameters: None,
        }
    }
}

impl NasMessageBody for RegistrationRequest {
    const MESSAGE_TYPE: MessageType = MessageType::RegistrationRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use registration_request_iei as iei;

        self.ng_ksi.nas_encode(buf)?;
        self.registration_type.nas_encode(buf)?;
        self.mobile_identity.nas_encode(buf)?;

        encode_optional(buf, iei::NON_CURRENT_NG_KSI, &self.non_current_ng_ksi)?;
        encode_optional(buf, iei::MM_CAPABILITY, &self.mm_capability)?;
        encode_optional(buf, iei::UE_SECURITY_CAPABILITY, &self.ue_security_capability)?;
        encode_optional(buf, iei::REQUESTED_NSSAI, &self.requested_nssai)?;
        encode_optional(buf, iei::LAST_VISITED_REGISTERED_TAI, &self.last_visited_registered_tai)?;
        encode_optional(buf, iei::S1_UE_NETWORK_CAPABILITY, &self.s1_ue_network_capability)?;
        encode_optional(buf, iei::UPLINK_DATA_STATUS, &self.uplink_data_status)?;
        encode_optional(buf, iei::PDU_SESSION_STATUS, &self.pdu_session_status)?;
        encode_optional(buf, iei::MICO_INDICATION, &self.mico_indication)?;
        encode_optional(buf, iei::UE_STATUS, &self.ue_status)?;
        encode_optional(buf, iei::ADDITIONAL_GUTI, &self.additional_guti)?;
        encode_optional(buf, iei::ALLOWED_PDU_SESSION_STATUS, &self.allowed_pdu_session_status)?;
        encode_optional(buf, iei::UE_USAGE_SETTING, &self.ue_usage_setting)?;
        encode_optional(buf, iei::REQUESTED_DRX_PARAMETERS, &self.requested_drx_parameters)?;
        encode_optional(buf, iei::EPS_NAS_MESSAGE_CONTAINER, &self.eps_nas_message_container)?;
        encode_optional(buf, iei::LADN_INDICATION, &self.ladn_indication)?;
        encode_optional(buf, iei::PAYLOAD_CONTAINER_TYPE, &self.payload_container_type)?;
        encode_optional(buf, iei::PAYLOAD_CONTAINER, &self.payload_container)?;
        encode_optional(buf, iei::NETWORK_SLICING_INDICATION, &self.network_slicing_indication)?;
        encode_optional(buf, iei::UPDATE_TYPE, &self.update_type)?;
        encode_optional(buf, iei::MOBILE_STATION_CLASSMARK_2, &self.mobile_station_classmark_2)?;
        encode_optional(buf, iei::SUPPORTED_CODECS, &self.supported_codecs)?;
        encode_optional(buf, iei::NAS_MESSAGE_CONTAINER, &self.nas_message_container)?;
        encode_optional(buf, iei::EPS_BEARER_CONTEXT_STATUS, &self.eps_bearer_context_status)?;
        encode_optional(
            buf,
            iei::REQUESTED_EXTENDED_DRX_PARAMETERS,
            &self.requested_extended_drx_parameters,
        )?;
        encode_optional(buf, iei::T3324_VALUE, &self.t3324_value)?;
        encode_optional(buf, iei::UE_RADIO_CAPABILITY_ID, &self.ue_radio_capability_id)?;
        encode_optional(buf, iei::REQUESTED_MAPPED_NSSAI, &self.requested_mapped_nssai)?;
        encode_optional(
            buf,
            iei::ADDITIONAL_INFORMATION_REQUESTED,
            &self.additional_information_requested,
        )?;
        encode_optional(
            buf,
            iei::REQUESTED_WUS_ASSISTANCE_INFORMATION,
            &self.requested_wus_assistance_information,
        )?;
        encode_optional(buf, iei::N5GC_INDICATION, &self.n5gc_indication)?;
        encode_optional(
            buf,
            iei::REQUESTED_NB_N1_MODE_DRX_PARAMETERS,
            &self.requested_nb_n1_mode_drx_parameters,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use registration_request_iei as iei;

        // First octet: ngKSI (high nibble) + registration type (low nibble)
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let registration_type = Ie5gsRegistrationType::nas_decode(buf)?;
        let mobile_identity = Ie5gsMobileIdentity::nas_decode(buf)?;
        let mut msg = Self::new(registration_type, ng_ksi, mobile_identity);

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::NON_CURRENT_NG_KSI => msg.non_current_ng_ksi = Some(NasDecode::nas_decode(r)?),
                iei::MM_CAPABILITY => msg.mm_capability = Some(NasDecode::nas_decode(r)?),
                iei::UE_SECURITY_CAPABILITY => {
                    msg.ue_security_capability = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_NSSAI => msg.requested_nssai = Some(NasDecode::nas_decode(r)?),
                iei::LAST_VISITED_REGISTERED_TAI => {
                    msg.last_visited_registered_tai = Some(NasDecode::nas_decode(r)?)
                }
                iei::S1_UE_NETWORK_CAPABILITY => {
                    msg.s1_ue_network_capability = Some(NasDecode::nas_decode(r)?)
                }
                iei::UPLINK_DATA_STATUS => msg.uplink_data_status = Some(NasDecode::nas_decode(r)?),
                iei::PDU_SESSION_STATUS => msg.pdu_session_status = Some(NasDecode::nas_decode(r)?),
                iei::MICO_INDICATION => msg.mico_indication = Some(NasDecode::nas_decode(r)?),
                iei::UE_STATUS => msg.ue_status = Some(NasDecode::nas_decode(r)?),
                iei::ADDITIONAL_GUTI => msg.additional_guti = Some(NasDecode::nas_decode(r)?),
                iei::ALLOWED_PDU_SESSION_STATUS => {
                    msg.allowed_pdu_session_status = Some(NasDecode::nas_decode(r)?)
                }
                iei::UE_USAGE_SETTING => msg.ue_usage_setting = Some(NasDecode::nas_decode(r)?),
                iei::REQUESTED_DRX_PARAMETERS => {
                    msg.requested_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                iei::EPS_NAS_MESSAGE_CONTAINER => {
                    msg.eps_nas_message_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::LADN_INDICATION => msg.ladn_indication = Some(NasDecode::nas_decode(r)?),
                iei::PAYLOAD_CONTAINER_TYPE => {
                    msg.payload_container_type = Some(NasDecode::nas_decode(r)?)
                }
                iei::PAYLOAD_CONTAINER => msg.payload_container = Some(NasDecode::nas_decode(r)?),
                iei::NETWORK_SLICING_INDICATION => {
                    msg.network_slicing_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::UPDATE_TYPE => msg.update_type = Some(NasDecode::nas_decode(r)?),
                iei::MOBILE_STATION_CLASSMARK_2 => {
                    msg.mobile_station_classmark_2 = Some(NasDecode::nas_decode(r)?)
                }
                iei::SUPPORTED_CODECS => msg.supported_codecs = Some(NasDecode::nas_decode(r)?),
                iei::NAS_MESSAGE_CONTAINER => {
                    msg.nas_message_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::EPS_BEARER_CONTEXT_STATUS => {
                    msg.eps_bearer_context_status = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_EXTENDED_DRX_PARAMETERS => {
                    msg.requested_extended_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                iei::T3324_VALUE => msg.t3324_value = Some(NasDecode::nas_decode(r)?),
                iei::UE_RADIO_CAPABILITY_ID => {
                    msg.ue_radio_capability_id = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_MAPPED_NSSAI => {
                    msg.requested_mapped_nssai = Some(NasDecode::nas_decode(r)?)
                }
                iei::ADDITIONAL_INFORMATION_REQUESTED => {
                    msg.additional_information_requested = Some(NasDecode::nas_decode(r)?)
                }
                iei::REQUESTED_WUS_ASSISTANCE_INFORMATION => {
                    msg.requested_wus_assistance_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::N5GC_INDICATION => msg.n5gc_indication = Some(NasDecode::nas_decode(r)?),
                iei::REQUESTED_NB_N1_MODE_DRX_PARAMETERS => {
                    msg.requested_nb_n1_mode_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(msg)
    }
}

// ============================================================================
// Registration Accept
// ============================================================================

/// Registration Accept message (3GPP TS 24.501 Section 8.2.7)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationAccept {
    /// 5GS registration result (mandatory)
    pub registration_result: Ie5gsRegistrationResult,
    /// 5G-GUTI
    pub guti: Option<Ie5gsMobileIdentity>,
    /// Equivalent PLMNs
    pub equivalent_plmns: Option<IePlmnList>,
    /// TAI list
    pub tai_list: Option<Ie5gsTrackingAreaIdentityList>,
    /// Allowed NSSAI
    pub allowed_nssai: Option<IeNssai>,
    /// Rejected NSSAI
    pub rejected_nssai: Option<IeRejectedNssai>,
    /// Configured NSSAI
    pub configured_nssai: Option<IeNssai>,
    /// 5GS network feature support
    pub network_feature_support: Option<IeNetworkFeatureSupport5gs>,
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
    /// PDU session reactivation result
    pub pdu_session_reactivation_result: Option<IePduSessionReactivationResult>,
    /// PDU session reactivation result error cause
    pub pdu_session_reactivation_result_error_cause:
        Option<IePduSessionReactivationResultErrorCause>,
    /// LADN information
    pub ladn_information: Option<IeLadnInformation>,
    /// MICO indication
    pub mico_indication: Option<IeMicoIndication>,
    /// Network slicing indication
    pub network_slicing_indication: Option<IeNetworkSlicingIndication>,
    /// Service area list
    pub service_area_list: Option<IeServiceAreaList>,
    /// T3512 value
    pub t3512_value: Option<IeGprsTimer3>,
    /// Non-3GPP de-registration timer value
    pub non_3gpp_deregistration_timer_value: Option<IeGprsTimer2>,
    /// T3502 value
    pub t3502_value: Option<IeGprsTimer2>,
    /// Emergency number list
    pub emergency_number_list: Option<IeEmergencyNumberList>,
    /// Extended emergency number list
    pub extended_emergency_number_list: Option<IeExtendedEmergencyNumberList>,
    /// SOR transparent container
    pub sor_transparent_container: Option<IeSorTransparentContainer>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// NSSAI inclusion mode
    pub nssai_inclusion_mode: Option<IeNssaiInclusionMode>,
    /// Operator-defined access category definitions
    pub operator_defined_access_category_definitions:
        Option<IeOperatorDefinedAccessCategoryDefinitions>,
    /// Negotiated DRX parameters
    pub negotiated_drx_parameters: Option<Ie5gsDrxParameters>,
    /// Non-3GPP NW policies
    pub non_3gpp_nw_policies: Option<IeNon3gppNwProvidedPolicies>,
    /// EPS bearer context status
    pub eps_bearer_context_status: Option<IeEpsBearerContextStatus>,
    /// Negotiated extended DRX parameters
    pub negotiated_extended_drx_parameters: Option<IeExtendedDrxParameters>,
    /// T3447 value
    pub t3447_value: Option<IeGprsTimer3>,
    /// T3448 value
    pub t3448_value: Option<IeGprsTimer2>,
    /// T3324 value
    pub t3324_value: Option<IeGprsTimer3>,
    /// UE radio capability ID
    pub ue_radio_capability_id: Option<IeUeRadioCapabilityId>,
    /// UE radio capability ID deletion indication
    pub ue_radio_capability_id_deletion_indication: Option<IeUeRadioCapabilityIdDeletionIndication>,
    /// Pending NSSAI
    pub pending_nssai: Option<IeNssai>,
    /// Ciphering key data
    pub ciphering_key_data: Option<IeCipheringKeyData>,
    /// CAG information list
    pub cag_information_list: Option<IeCagInformationList>,
    /// Truncated 5G-S-TMSI configuration
    pub truncated_s_tmsi_configuration: Option<IeTruncated5gSTmsiConfiguration>,
    /// Negotiated WUS assistance information
    pub negotiated_wus_assistance_information: Option<IeWusAssistanceInformation>,
    /// Negotiated NB-N1 mode DRX parameters
    pub negotiated_nb_n1_mode_drx_parameters: Option<IeNbN1ModeDrxParameters>,
}

impl RegistrationAccept {
    /// Create a Registration Accept with the mandatory IE only
    pub fn new(registration_result: Ie5gsRegistrationResult) -> Self {
        Self {
            registration_result,
            guti: None,
            equivalent_plmns: None,
            tai_list: None,
            allowed_nssai: None,
            rejected_nssai: None,
            configured_nssai: None,
            network_feature_support: None,
            pdu_session_status: None,
            pdu_session_reactivation_result: None,
            pdu_session_reactivation_result_error_cause: None,
            ladn_information: None,
            mico_indication: None,
            network_slicing_indication: None,
            service_area_list: None,
            t3512_value: None,
            non_3gpp_deregistration_timer_value: None,
            t3502_value: None,
            emergency_number_list: None,
            extended_emergency_number_list: None,
            sor_transparent_container: None,
            eap_message: None,
            nssai_inclusion_mode: None,
            operator_defined_access_category_definitions: None,
            negotiated_drx_parameters: None,
            non_3gpp_nw_policies: None,
            eps_bearer_context_status: None,
            negotiated_extended_drx_parameters: None,
            t3447_value: None,
            t3448_value: None,
            t3324_value: None,
            ue_radio_capability_id: None,
            ue_radio_capability_id_deletion_indication: None,
            pending_nssai: None,
            ciphering_key_data: None,
            cag_information_list: None,
            truncated_s_tmsi_configuration: None,
            negotiated_wus_assistance_information: None,
            negotiated_nb_n1_mode_drx_parameters: None,
        }
    }
}

impl NasMessageBody for RegistrationAccept {
    const MESSAGE_TYPE: MessageType = MessageType::RegistrationAccept;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use registration_accept_iei as iei;

        self.registration_result.nas_encode(buf)?;

        encode_optional(buf, iei::GUTI, &self.guti)?;
        encode_optional(buf, iei::EQUIVALENT_PLMNS, &self.equivalent_plmns)?;
        encode_optional(buf, iei::TAI_LIST, &self.tai_list)?;
        encode_optional(buf, iei::ALLOWED_NSSAI, &self.allowed_nssai)?;
        encode_optional(buf, iei::REJECTED_NSSAI, &self.rejected_nssai)?;
        encode_optional(buf, iei::CONFIGURED_NSSAI, &self.configured_nssai)?;
        encode_optional(buf, iei::NETWORK_FEATURE_SUPPORT, &self.network_feature_support)?;
        encode_optional(buf, iei::PDU_SESSION_STATUS, &self.pdu_session_status)?;
        encode_optional(
            buf,
            iei::PDU_SESSION_REACTIVATION_RESULT,
            &self.pdu_session_reactivation_result,
        )?;
        encode_optional(
            buf,
            iei::PDU_SESSION_REACTIVATION_RESULT_ERROR_CAUSE,
            &self.pdu_session_reactivation_result_error_cause,
        )?;
        encode_optional(buf, iei::LADN_INFORMATION, &self.ladn_information)?;
        encode_optional(buf, iei::MICO_INDICATION, &self.mico_indication)?;
        encode_optional(buf, iei::NETWORK_SLICING_INDICATION, &self.network_slicing_indication)?;
        encode_optional(buf, iei::SERVICE_AREA_LIST, &self.service_area_list)?;
        encode_optional(buf, iei::T3512_VALUE, &self.t3512_value)?;
        encode_optional(
            buf,
            iei::NON_3GPP_DEREGISTRATION_TIMER_VALUE,
            &self.non_3gpp_deregistration_timer_value,
        )?;
        encode_optional(buf, iei::T3502_VALUE, &self.t3502_value)?;
        encode_optional(buf, iei::EMERGENCY_NUMBER_LIST, &self.emergency_number_list)?;
        encode_optional(
            buf,
            iei::EXTENDED_EMERGENCY_NUMBER_LIST,
            &self.extended_emergency_number_list,
        )?;
        encode_optional(buf, iei::SOR_TRANSPARENT_CONTAINER, &self.sor_transparent_container)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(buf, iei::NSSAI_INCLUSION_MODE, &self.nssai_inclusion_mode)?;
        encode_optional(
            buf,
            iei::OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS,
            &self.operator_defined_access_category_definitions,
        )?;
        encode_optional(buf, iei::NEGOTIATED_DRX_PARAMETERS, &self.negotiated_drx_parameters)?;
        encode_optional(buf, iei::NON_3GPP_NW_POLICIES, &self.non_3gpp_nw_policies)?;
        encode_optional(buf, iei::EPS_BEARER_CONTEXT_STATUS, &self.eps_bearer_context_status)?;
        encode_optional(
            buf,
            iei::NEGOTIATED_EXTENDED_DRX_PARAMETERS,
            &self.negotiated_extended_drx_parameters,
        )?;
        encode_optional(buf, iei::T3447_VALUE, &self.t3447_value)?;
        encode_optional(buf, iei::T3448_VALUE, &self.t3448_value)?;
        encode_optional(buf, iei::T3324_VALUE, &self.t3324_value)?;
        encode_optional(buf, iei::UE_RADIO_CAPABILITY_ID, &self.ue_radio_capability_id)?;
        encode_optional(
            buf,
            iei::UE_RADIO_CAPABILITY_ID_DELETION_INDICATION,
            &self.ue_radio_capability_id_deletion_indication,
        )?;
        encode_optional(buf, iei::PENDING_NSSAI, &self.pending_nssai)?;
        encode_optional(buf, iei::CIPHERING_KEY_DATA, &self.ciphering_key_data)?;
        encode_optional(buf, iei::CAG_INFORMATION_LIST, &self.cag_information_list)?;
        encode_optional(
            buf,
            iei::TRUNCATED_5G_S_TMSI_CONFIGURATION,
            &self.truncated_s_tmsi_configuration,
        )?;
        encode_optional(
            buf,
            iei::NEGOTIATED_WUS_ASSISTANCE_INFORMATION,
            &self.negotiated_wus_assistance_information,
        )?;
        encode_optional(
            buf,
            iei::NEGOTIATED_NB_N1_MODE_DRX_PARAMETERS,
            &self.negotiated_nb_n1_mode_drx_parameters,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use registration_accept_iei as iei;

        let mut msg = Self::new(Ie5gsRegistrationResult::nas_decode(buf)?);

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::GUTI => msg.guti = Some(NasDecode::nas_decode(r)?),
                iei::EQUIVALENT_PLMNS => msg.equivalent_plmns = Some(NasDecode::nas_decode(r)?),
                iei::TAI_LIST => msg.tai_list = Some(NasDecode::nas_decode(r)?),
                iei::ALLOWED_NSSAI => msg.allowed_nssai = Some(NasDecode::nas_decode(r)?),
                iei::REJECTED_NSSAI => msg.rejected_nssai = Some(NasDecode::nas_decode(r)?),
                iei::CONFIGURED_NSSAI => msg.configured_nssai = Some(NasDecode::nas_decode(r)?),
                iei::NETWORK_FEATURE_SUPPORT => {
                    msg.network_feature_support = Some(NasDecode::nas_decode(r)?)
                }
                iei::PDU_SESSION_STATUS => msg.pdu_session_status = Some(NasDecode::nas_decode(r)?),
                iei::PDU_SESSION_REACTIVATION_RESULT => {
                    msg.pdu_session_reactivation_result = Some(NasDecode::nas_decode(r)?)
                }
                iei::PDU_SESSION_REACTIVATION_RESULT_ERROR_CAUSE => {
                    msg.pdu_session_reactivation_result_error_cause =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::LADN_INFORMATION => msg.ladn_information = Some(NasDecode::nas_decode(r)?),
                iei::MICO_INDICATION => msg.mico_indication = Some(NasDecode::nas_decode(r)?),
                iei::NETWORK_SLICING_INDICATION => {
                    msg.network_slicing_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::SERVICE_AREA_LIST => msg.service_area_list = Some(NasDecode::nas_decode(r)?),
                iei::T3512_VALUE => msg.t3512_value = Some(NasDecode::nas_decode(r)?),
                iei::NON_3GPP_DEREGISTRATION_TIMER_VALUE => {
                    msg.non_3gpp_deregistration_timer_value = Some(NasDecode::nas_decode(r)?)
                }
                iei::T3502_VALUE => msg.t3502_value = Some(NasDecode::nas_decode(r)?),
                iei::EMERGENCY_NUMBER_LIST => {
                    msg.emergency_number_list = Some(NasDecode::nas_decode(r)?)
                }
                iei::EXTENDED_EMERGENCY_NUMBER_LIST => {
                    msg.extended_emergency_number_list = Some(NasDecode::nas_decode(r)?)
                }
                iei::SOR_TRANSPARENT_CONTAINER => {
                    msg.sor_transparent_container = Some(NasDecode::nas_decode(r)?)
                }
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::NSSAI_INCLUSION_MODE => {
                    msg.nssai_inclusion_mode = Some(NasDecode::nas_decode(r)?)
                }
                iei::OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS => {
                    msg.operator_defined_access_category_definitions =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::NEGOTIATED_DRX_PARAMETERS => {
                    msg.negotiated_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                iei::NON_3GPP_NW_POLICIES => {
                    msg.non_3gpp_nw_policies = Some(NasDecode::nas_decode(r)?)
                }
                iei::EPS_BEARER_CONTEXT_STATUS => {
                    msg.eps_bearer_context_status = Some(NasDecode::nas_decode(r)?)
                }
                iei::NEGOTIATED_EXTENDED_DRX_PARAMETERS => {
                    msg.negotiated_extended_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                iei::T3447_VALUE => msg.t3447_value = Some(NasDecode::nas_decode(r)?),
                iei::T3448_VALUE => msg.t3448_value = Some(NasDecode::nas_decode(r)?),
                iei::T3324_VALUE => msg.t3324_value = Some(NasDecode::nas_decode(r)?),
                iei::UE_RADIO_CAPABILITY_ID => {
                    msg.ue_radio_capability_id = Some(NasDecode::nas_decode(r)?)
                }
                iei::UE_RADIO_CAPABILITY_ID_DELETION_INDICATION => {
                    msg.ue_radio_capability_id_deletion_indication =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::PENDING_NSSAI => msg.pending_nssai = Some(NasDecode::nas_decode(r)?),
                iei::CIPHERING_KEY_DATA => msg.ciphering_key_data = Some(NasDecode::nas_decode(r)?),
                iei::CAG_INFORMATION_LIST => {
                    msg.cag_information_list = Some(NasDecode::nas_decode(r)?)
                }
                iei::TRUNCATED_5G_S_TMSI_CONFIGURATION => {
                    msg.truncated_s_tmsi_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::NEGOTIATED_WUS_ASSISTANCE_INFORMATION => {
                    msg.negotiated_wus_assistance_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::NEGOTIATED_NB_N1_MODE_DRX_PARAMETERS => {
                    msg.negotiated_nb_n1_mode_drx_parameters = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(msg)
    }
}

// ============================================================================
// Registration Complete
// ============================================================================

/// Registration Complete message (3GPP TS 24.501 Section 8.2.8)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationComplete {
    /// SOR transparent container
    pub sor_transparent_container: Option<IeSorTransparentContainer>,
}

impl RegistrationComplete {
    /// Create an empty Registration Complete
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for RegistrationComplete {
    const MESSAGE_TYPE: MessageType = MessageType::RegistrationComplete;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        encode_optional(
            buf,
            registration_complete_iei::SOR_TRANSPARENT_CONTAINER,
            &self.sor_transparent_container,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                registration_complete_iei::SOR_TRANSPARENT_CONTAINER => {
                    msg.sor_transparent_container = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Registration Reject
// ============================================================================

/// Registration Reject message (3GPP TS 24.501 Section 8.2.9)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReject {
    /// 5GMM cause (mandatory)
    pub mm_cause: Ie5gMmCause,
    /// T3346 value
    pub t3346_value: Option<IeGprsTimer2>,
    /// T3502 value
    pub t3502_value: Option<IeGprsTimer2>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// Rejected NSSAI
    pub rejected_nssai: Option<IeRejectedNssai>,
    /// CAG information list
    pub cag_information_list: Option<IeCagInformationList>,
}

impl RegistrationReject {
    /// Create a Registration Reject with the given cause
    pub fn new(mm_cause: MmCause) -> Self {
        Self {
            mm_cause: Ie5gMmCause::new(mm_cause),
            t3346_value: None,
            t3502_value: None,
            eap_message: None,
            rejected_nssai: None,
            cag_information_list: None,
        }
    }
}

impl NasMessageBody for RegistrationReject {
    const MESSAGE_TYPE: MessageType = MessageType::RegistrationReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use registration_reject_iei as iei;

        self.mm_cause.nas_encode(buf)?;
        encode_optional(buf, iei::T3346_VALUE, &self.t3346_value)?;
        encode_optional(buf, iei::T3502_VALUE, &self.t3502_value)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(buf, iei::REJECTED_NSSAI, &self.rejected_nssai)?;
        encode_optional(buf, iei::CAG_INFORMATION_LIST, &self.cag_information_list)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use registration_reject_iei as iei;

        let mut msg = Self::new(Ie5gMmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::T3346_VALUE => msg.t3346_value = Some(NasDecode::nas_decode(r)?),
                iei::T3502_VALUE => msg.t3502_value = Some(NasDecode::nas_decode(r)?),
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::REJECTED_NSSAI => msg.rejected_nssai = Some(NasDecode::nas_decode(r)?),
                iei::CAG_INFORMATION_LIST => {
                    msg.cag_information_list = Some(NasDecode::nas_decode(r)?)
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
    use crate::codec::CodecError;
    use crate::messages::test_util::{decode_body, encode_body, round_trip};
    use nextgsim_common::UnknownIeiPolicy;

    fn initial_registration() -> RegistrationRequest {
        RegistrationRequest::new(
            Ie5gsRegistrationType::new(FollowOnRequest::Pending, RegistrationType::InitialRegistration),
            IeNasKeySetIdentifier::not_available(),
            Ie5gsMobileIdentity::Suci(Suci::Imsi(SuciImsi::null_scheme(
                Plmn::new(1, 1, false),
                [0, BCD_FILLER, BCD_FILLER, BCD_FILLER],
                vec![0x21, 0x43, 0x65, 0x87, 0x09],
            ))),
        )
    }

    #[test]
    fn test_registration_request_mandatory_only() {
        let msg = initial_registration();
        let encoded = round_trip(&msg);
        // ngKSI 7 in the high nibble, FOR + initial registration in the low one
        assert_eq!(encoded[0], 0x79);
        assert_eq!(&encoded[1..3], &[0x00, 0x0D]);
    }

    #[test]
    fn test_registration_request_with_optional_ies() {
        let mut msg = initial_registration();
        msg.mm_capability = Some(Ie5gmmCapability::new(vec![0x07]));
        msg.ue_security_capability = Some(IeUeSecurityCapability::new(0xF0, 0xF0));
        msg.requested_nssai = Some(IeNssai::new(vec![
            IeSNssai::new(SST_EMBB),
            IeSNssai::with_sd(SST_EMBB, 0x010203),
        ]));
        msg.last_visited_registered_tai = Some(Tai::new(Plmn::new(1, 1, false), 1));
        msg.mico_indication = Some(IeMicoIndication {
            sprti: false,
            raai: true,
        });
        msg.ue_usage_setting = Some(IeUeUsageSetting::default());
        msg.update_type = Some(Ie5gsUpdateType::default());
        msg.t3324_value = Some(IeGprsTimer3::new(GprsTimer3Unit::MultiplesOf1Hour, 2));
        msg.n5gc_indication = Some(IeN5gcIndication::default());
        round_trip(&msg);
    }

    #[test]
    fn test_registration_request_half_octet_iei_offsets() {
        let mut msg = initial_registration();
        msg.non_current_ng_ksi = Some(IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 2));
        msg.mm_capability = Some(Ie5gmmCapability::new(vec![0x01]));
        let encoded = encode_body(&msg);
        let optional = &encoded[16..];
        // Half-octet IEI C with value 2 shares one octet, then a full-octet IEI
        assert_eq!(optional, &[0xC2, 0x10, 0x01, 0x01]);
    }

    #[test]
    fn test_registration_request_unknown_iei_policies() {
        let mut encoded = encode_body(&initial_registration());
        encoded.extend_from_slice(&[0x5A, 0x01, 0x00]);
        encoded.extend_from_slice(&[0x18, 0x01, 0x01]);

        let mut reader = BitBufferReader::new(&encoded);
        let strict = CodecConfig::with_policy(UnknownIeiPolicy::Reject);
        assert_eq!(
            RegistrationRequest::decode_body(&mut reader, &strict),
            Err(CodecError::UnknownIei {
                iei: 0x5A,
                message: "Registration request"
            })
        );

        let mut reader = BitBufferReader::new(&encoded);
        let skip = CodecConfig::with_policy(UnknownIeiPolicy::SkipTlv);
        let msg = RegistrationRequest::decode_body(&mut reader, &skip).unwrap();
        assert_eq!(
            msg.ue_usage_setting,
            Some(IeUeUsageSetting {
                value: UeUsageSetting::DataCentric
            })
        );
    }

    #[test]
    fn test_registration_accept() {
        let mut msg = RegistrationAccept::new(Ie5gsRegistrationResult::new(
            RegistrationResult::ThreeGppAccess,
        ));
        msg.guti = Some(Ie5gsMobileIdentity::Guti(Guti::new(
            Plmn::new(1, 1, false),
            0xCA,
            0x3F8,
            0,
            0x0000_0001,
        )));
        msg.tai_list = Some(Ie5gsTrackingAreaIdentityList::new(vec![PartialTaiList::SinglePlmnList {
            plmn: Plmn::new(1, 1, false),
            tacs: vec![1],
        }]));
        msg.allowed_nssai = Some(IeNssai::new(vec![IeSNssai::new(SST_EMBB)]));
        msg.t3512_value = Some(IeGprsTimer3::new(GprsTimer3Unit::MultiplesOf1Minute, 54));
        msg.nssai_inclusion_mode = Some(IeNssaiInclusionMode {
            mode: NssaiInclusionMode::B,
        });
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..2], &[0x01, 0x01]);
        assert_eq!(encoded[2], registration_accept_iei::GUTI);
    }

    #[test]
    fn test_registration_complete_empty() {
        assert!(encode_body(&RegistrationComplete::new()).is_empty());
        assert_eq!(decode_body::<RegistrationComplete>(&[]).unwrap(), RegistrationComplete::new());
    }

    #[test]
    fn test_registration_reject() {
        let mut msg = RegistrationReject::new(MmCause::PlmnNotAllowed);
        msg.t3346_value = Some(IeGprsTimer2::new(0x21));
        let encoded = round_trip(&msg);
        assert_eq!(encoded, vec![0x0B, 0x5F, 0x01, 0x21]);
    }
}
