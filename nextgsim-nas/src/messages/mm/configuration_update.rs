//! Configuration Update Messages (3GPP TS 24.501 Section 8.2.19, 8.2.20)
//!
//! - Configuration Update Command (network to UE)
//! - Configuration Update Complete (UE to network)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

/// IEI values for Configuration Update Command optional IEs
pub mod configuration_update_command_iei {
    /// Configuration update indication
    pub const CONFIGURATION_UPDATE_INDICATION: u8 = 0xD;
    /// 5G-GUTI
    pub const GUTI: u8 = 0x77;
    /// TAI list
    pub const TAI_LIST: u8 = 0x54;
    /// Allowed NSSAI
    pub const ALLOWED_NSSAI: u8 = 0x15;
    /// Service area list
    pub const SERVICE_AREA_LIST: u8 = 0x27;
    /// Full name for network
    pub const FULL_NAME_FOR_NETWORK: u8 = 0x43;
    /// Short name for network
    pub const SHORT_NAME_FOR_NETWORK: u8 = 0x45;
    /// Local time zone
    pub const LOCAL_TIME_ZONE: u8 = 0x46;
    /// Universal time and local time zone
    pub const UNIVERSAL_TIME_AND_LOCAL_TIME_ZONE: u8 = 0x47;
    /// Network daylight saving time
    pub const NETWORK_DAYLIGHT_SAVING_TIME: u8 = 0x49;
    /// LADN information
    pub const LADN_INFORMATION: u8 = 0x79;
    /// MICO indication
    pub const MICO_INDICATION: u8 = 0xB;
    /// Network slicing indication
    pub const NETWORK_SLICING_INDICATION: u8 = 0x9;
    /// Configured NSSAI
    pub const CONFIGURED_NSSAI: u8 = 0x31;
    /// Rejected NSSAI
    pub const REJECTED_NSSAI: u8 = 0x11;
    /// Operator-defined access category definitions
    pub const OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS: u8 = 0x76;
    /// SMS indication
    pub const SMS_INDICATION: u8 = 0xF;
    /// T3447 value
    pub const T3447_VALUE: u8 = 0x6C;
    /// CAG information list
    pub const CAG_INFORMATION_LIST: u8 = 0x75;
    /// UE radio capability ID
    pub const UE_RADIO_CAPABILITY_ID: u8 = 0x67;
    /// UE radio capability ID deletion indication
    pub const UE_RADIO_CAPABILITY_ID_DELETION_INDICATION: u8 = 0xA;
    /// 5GS registration result
    pub const REGISTRATION_RESULT: u8 = 0x44;
    /// Truncated 5G-S-TMSI configuration
    pub const TRUNCATED_5G_S_TMSI_CONFIGURATION: u8 = 0x1B;
    /// Additional configuration indication
    pub const ADDITIONAL_CONFIGURATION_INDICATION: u8 = 0xC;
}

/// Configuration Update Command message (3GPP TS 24.501 Section 8.2.19)
///
/// Every IE is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationUpdateCommand {
    pub configuration_update_indication: Option<IeConfigurationUpdateIndication>,
    pub guti: Option<Ie5gsMobileIdentity>,
    pub tai_list: Option<Ie5gsTrackingAreaIdentityList>,
    pub allowed_nssai: Option<IeNssai>,
    pub service_area_list: Option<IeServiceAreaList>,
    pub full_name_for_network: Option<IeNetworkName>,
    pub short_name_for_network: Option<IeNetworkName>,
    pub local_time_zone: Option<IeTimeZone>,
    pub universal_time_and_local_time_zone: Option<IeTimeZoneAndTime>,
    pub network_daylight_saving_time: Option<IeDaylightSavingTime>,
    pub ladn_information: Option<IeLadnInformation>,
    pub mico_indication: Option<IeMicoIndication>,
    pub network_slicing_indication: Option<IeNetworkSlicingIndication>,
    pub configured_nssai: Option<IeNssai>,
    pub rejected_nssai: Option<IeRejectedNssai>,
    pub operator_defined_access_category_definitions:
        Option<IeOperatorDefinedAccessCategoryDefinitions>,
    pub sms_indication: Option<IeSmsIndication>,
    pub t3447_value: Option<IeGprsTimer3>,
    pub cag_information_list: Option<IeCagInformationList>,
    pub ue_radio_capability_id: Option<IeUeRadioCapabilityId>,
    pub ue_radio_capability_id_deletion_indication: Option<IeUeRadioCapabilityIdDeletionIndication>,
    pub registration_result: Option<Ie5gsRegistrationResult>,
    pub truncated_s_tmsi_configuration: Option<IeTruncated5gSTmsiConfiguration>,
    pub additional_configuration_indication: Option<IeAdditionalConfigurationIndication>,
}

impl ConfigurationUpdateCommand {
    /// Create an empty Configuration Update Command
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for ConfigurationUpdateCommand {
    const MESSAGE_TYPE: MessageType = MessageType::ConfigurationUpdateCommand;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use configuration_update_command_iei as iei;

        encode_optional(
            buf,
            iei::CONFIGURATION_UPDATE_INDICATION,
            &self.configuration_update_indication,
        )?;
        encode_optional(buf, iei::GUTI, &self.guti)?;
        encode_optional(buf, iei::TAI_LIST, &self.tai_list)?;
        encode_optional(buf, iei::ALLOWED_NSSAI, &self.allowed_nssai)?;
        encode_optional(buf, iei::SERVICE_AREA_LIST, &self.service_area_list)?;
        encode_optional(buf, iei::FULL_NAME_FOR_NETWORK, &self.full_name_for_network)?;
        encode_optional(buf, iei::SHORT_NAME_FOR_NETWORK, &self.short_name_for_network)?;
        encode_optional(buf, iei::LOCAL_TIME_ZONE, &self.local_time_zone)?;
        encode_optional(
            buf,
            iei::UNIVERSAL_TIME_AND_LOCAL_TIME_ZONE,
            &self.universal_time_and_local_time_zone,
        )?;
        encode_optional(
            buf,
            iei::NETWORK_DAYLIGHT_SAVING_TIME,
            &self.network_daylight_saving_time,
        )?;
        encode_optional(buf, iei::LADN_INFORMATION, &self.ladn_information)?;
        encode_optional(buf, iei::MICO_INDICATION, &self.mico_indication)?;
        encode_optional(buf, iei::NETWORK_SLICING_INDICATION, &self.network_slicing_indication)?;
        encode_optional(buf, iei::CONFIGURED_NSSAI, &self.configured_nssai)?;
        encode_optional(buf, iei::REJECTED_NSSAI, &self.rejected_nssai)?;
        encode_optional(
            buf,
            iei::OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS,
            &self.operator_defined_access_category_definitions,
        )?;
        encode_optional(buf, iei::SMS_INDICATION, &self.sms_indication)?;
        encode_optional(buf, iei::T3447_VALUE, &self.t3447_value)?;
        encode_optional(buf, iei::CAG_INFORMATION_LIST, &self.cag_information_list)?;
        encode_optional(buf, iei::UE_RADIO_CAPABILITY_ID, &self.ue_radio_capability_id)?;
        encode_optional(
            buf,
            iei::UE_RADIO_CAPABILITY_ID_DELETION_INDICATION,
            &self.ue_radio_capability_id_deletion_indication,
        )?;
        encode_optional(buf, iei::REGISTRATION_RESULT, &self.registration_result)?;
        encode_optional(
            buf,
            iei::TRUNCATED_5G_S_TMSI_CONFIGURATION,
            &self.truncated_s_tmsi_configuration,
        )?;
        encode_optional(
            buf,
            iei::ADDITIONAL_CONFIGURATION_INDICATION,
            &self.additional_configuration_indication,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use configuration_update_command_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::CONFIGURATION_UPDATE_INDICATION => {
                    msg.configuration_update_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::GUTI => msg.guti = Some(NasDecode::nas_decode(r)?),
                iei::TAI_LIST => msg.tai_list = Some(NasDecode::nas_decode(r)?),
                iei::ALLOWED_NSSAI => msg.allowed_nssai = Some(NasDecode::nas_decode(r)?),
                iei::SERVICE_AREA_LIST => msg.service_area_list = Some(NasDecode::nas_decode(r)?),
                iei::FULL_NAME_FOR_NETWORK => {
                    msg.full_name_for_network = Some(NasDecode::nas_decode(r)?)
                }
                iei::SHORT_NAME_FOR_NETWORK => {
                    msg.short_name_for_network = Some(NasDecode::nas_decode(r)?)
                }
                iei::LOCAL_TIME_ZONE => msg.local_time_zone = Some(NasDecode::nas_decode(r)?),
                iei::UNIVERSAL_TIME_AND_LOCAL_TIME_ZONE => {
                    msg.universal_time_and_local_time_zone = Some(NasDecode::nas_decode(r)?)
                }
                iei::NETWORK_DAYLIGHT_SAVING_TIME => {
                    msg.network_daylight_saving_time = Some(NasDecode::nas_decode(r)?)
                }
                iei::LADN_INFORMATION => msg.ladn_information = Some(NasDecode::nas_decode(r)?),
                iei::MICO_INDICATION => msg.mico_indication = Some(NasDecode::nas_decode(r)?),
                iei::NETWORK_SLICING_INDICATION => {
                    msg.network_slicing_indication = Some(NasDecode::nas_decode(r)?)
                }
                iei::CONFIGURED_NSSAI => msg.configured_nssai = Some(NasDecode::nas_decode(r)?),
                iei::REJECTED_NSSAI => msg.rejected_nssai = Some(NasDecode::nas_decode(r)?),
                iei::OPERATOR_DEFINED_ACCESS_CATEGORY_DEFINITIONS => {
                    msg.operator_defined_access_category_definitions =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::SMS_INDICATION => msg.sms_indication = Some(NasDecode::nas_decode(r)?),
                iei::T3447_VALUE => msg.t3447_value = Some(NasDecode::nas_decode(r)?),
                iei::CAG_INFORMATION_LIST => {
                    msg.cag_information_list = Some(NasDecode::nas_decode(r)?)
                }
                iei::UE_RADIO_CAPABILITY_ID => {
                    msg.ue_radio_capability_id = Some(NasDecode::nas_decode(r)?)
                }
                iei::UE_RADIO_CAPABILITY_ID_DELETION_INDICATION => {
                    msg.ue_radio_capability_id_deletion_indication =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::REGISTRATION_RESULT => {
                    msg.registration_result = Some(NasDecode::nas_decode(r)?)
                }
                iei::TRUNCATED_5G_S_TMSI_CONFIGURATION => {
                    msg.truncated_s_tmsi_configuration = Some(NasDecode::nas_decode(r)?)
                }
                iei::ADDITIONAL_CONFIGURATION_INDICATION => {
                    msg.additional_configuration_indication = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

empty_message!(
    /// Configuration Update Complete message (3GPP TS 24.501 Section 8.2.20)
    ConfigurationUpdateComplete,
    ConfigurationUpdateComplete
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::test_util::{encode_body, round_trip};

    #[test]
    fn test_configuration_update_command_time_zones() {
        let mut msg = ConfigurationUpdateCommand::new();
        msg.configuration_update_indication = Some(IeConfigurationUpdateIndication {
            red: false,
            ack: true,
        });
        msg.local_time_zone = Some(IeTimeZone::new(0x40));
        msg.universal_time_and_local_time_zone = Some(IeTimeZoneAndTime::new(
            VTime::new(0x42, 0x01, 0x11, 0x01, 0x30, 0x00),
            0x40,
        ));
        msg.network_daylight_saving_time = Some(IeDaylightSavingTime::new(DaylightSavingTime::PlusOneHour));
        let encoded = round_trip(&msg);
        // Half-octet IEI D carrying the ACK bit
        assert_eq!(encoded[0], 0xD1);
        assert_eq!(&encoded[1..3], &[0x46, 0x40]);
        assert_eq!(encoded[3], 0x47);
        assert_eq!(&encoded[encoded.len() - 3..], &[0x49, 0x01, 0x01]);
    }

    #[test]
    fn test_configuration_update_command_names_and_guti() {
        let mut msg = ConfigurationUpdateCommand::new();
        msg.guti = Some(Ie5gsMobileIdentity::Guti(Guti::new(
            Plmn::new(208, 93, false),
            0x01,
            0x001,
            0x01,
            0x1234_5678,
        )));
        msg.full_name_for_network = Some(IeNetworkName::new(
            IeNetworkName::CODING_GSM7,
            false,
            0,
            b"Open5GS".to_vec(),
        ));
        msg.sms_indication = Some(IeSmsIndication { sai: true });
        msg.registration_result = Some(Ie5gsRegistrationResult::new(RegistrationResult::ThreeGppAccess));
        round_trip(&msg);
    }

    #[test]
    fn test_configuration_update_complete_is_empty() {
        assert!(encode_body(&ConfigurationUpdateComplete::new()).is_empty());
    }
}
