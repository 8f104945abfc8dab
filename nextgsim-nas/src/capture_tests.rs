//! NAS Message Capture Tests
//!
//! Decodes NAS PDUs captured from a live 5G core and UE stack, checks the
//! decoded fields, and re-encodes each one to the exact captured bytes.
//! Security protected captures carry their payload in clear text.

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use nextgsim_common::{BitBuffer, BitBufferReader};

    use crate::codec::{CodecError, NasDecode, NasEncode};
    use crate::enums::{ExtendedProtocolDiscriminator, MessageType, SecurityHeaderType};
    use crate::header::{OuterHeader, PlainHeader};
    use crate::ies::*;
    use crate::message::{unpack_outer_hdr, NasMessage};
    use crate::messages::*;
    use crate::{CodecConfig, UnknownIeiPolicy};

    // ========================================================================
    // Helper Functions
    // ========================================================================

    /// Parse hex string to bytes
    fn hex_to_bytes(hex: &str) -> Vec<u8> {
        hex::decode(hex).unwrap()
    }

    /// Decodes a capture that must map to a known message
    fn decode(data: &[u8]) -> NasMessage {
        NasMessage::unpack(data).unwrap().message().unwrap()
    }

    /// Asserts that re-encoding the message yields the capture
    fn assert_repacks(msg: &NasMessage, data: &[u8]) {
        assert_eq!(hex::encode(msg.pack().unwrap()), hex::encode(data));
    }

    fn test_plmn() -> Plmn {
        Plmn::from_bytes([0x00, 0xF1, 0x10])
    }

    // ========================================================================
    // Registration Request Tests (3GPP TS 24.501 Section 8.2.6)
    // ========================================================================

    /// Initial registration with a zero 5G-GUTI and EPS capabilities
    const REGISTRATION_REQUEST_GUTI: &str =
        "7e004179000bf2000000000000000000002e02f0f01707f0f0c0c0018030";

    /// Initial registration with a profile B concealed SUCI
    const REGISTRATION_REQUEST_SUCI: &str = concat!(
        "7e00417900360100f11071ff021b03997ee4012de36c86e22997c899704b0f613abd6c3b",
        "1c9ca78a4b147e22afb064cbbd5d27341e8b9e3328184bec2e028020"
    );

    #[test]
    fn test_registration_request_guti_capture() {
        let data = hex_to_bytes(REGISTRATION_REQUEST_GUTI);
        let msg = decode(&data);
        assert!(msg.header.security.is_none());
        assert_eq!(msg.message_type(), MessageType::RegistrationRequest);

        let req = msg.body_as::<RegistrationRequest>().unwrap();
        assert_eq!(req.ng_ksi.ksi, 7);
        assert_eq!(req.ng_ksi.tsc, TypeOfSecurityContext::Native);
        assert_eq!(req.registration_type.follow_on_request, FollowOnRequest::Pending);
        assert_eq!(
            req.registration_type.registration_type,
            RegistrationType::InitialRegistration
        );

        let guti = req.mobile_identity.guti().unwrap();
        assert_eq!(guti.head, IDENTITY_FILLER_HEAD);
        assert_eq!(guti.plmn.to_bytes(), [0x00, 0x00, 0x00]);
        assert_eq!(guti.amf_region_id, 0);
        assert_eq!(guti.amf_set_id, 0);
        assert_eq!(guti.tmsi, 0);

        let sec_cap = req.ue_security_capability.as_ref().unwrap();
        assert_eq!((sec_cap.ea, sec_cap.ia), (0xF0, 0xF0));
        assert_eq!(sec_cap.eea, None);
        assert_eq!(
            req.s1_ue_network_capability.as_ref().unwrap().octets,
            vec![0xF0, 0xF0, 0xC0, 0xC0, 0x01, 0x80, 0x30]
        );
        assert!(req.nas_message_container.is_none());

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_registration_request_suci_capture() {
        let data = hex_to_bytes(REGISTRATION_REQUEST_SUCI);
        let msg = decode(&data);
        let req = msg.body_as::<RegistrationRequest>().unwrap();

        let Suci::Imsi(suci) = req.mobile_identity.suci().unwrap() else {
            panic!("expected IMSI format SUCI");
        };
        assert_eq!(suci.plmn.mcc_value(), 1);
        assert_eq!(suci.plmn.mnc_value(), 1);
        assert!(!suci.plmn.long_mnc());
        assert_eq!(suci.routing_indicator, [0x1, 0x7, 0xF, 0xF]);
        assert_eq!(suci.protection_scheme, ProtectionScheme::ProfileB);
        assert_eq!(suci.home_network_public_key_id, 0x1B);
        assert_eq!(suci.scheme_output.len(), 46);
        assert_eq!(suci.scheme_output[0], 0x03);

        // A SUCI is not a GUTI
        assert!(matches!(
            req.mobile_identity.guti(),
            Err(CodecError::VariantMismatch { expected: "5G-GUTI", .. })
        ));

        let sec_cap = req.ue_security_capability.as_ref().unwrap();
        assert_eq!((sec_cap.ea, sec_cap.ia), (0x80, 0x20));

        assert_repacks(&msg, &data);
    }

    // ========================================================================
    // Deregistration Tests (3GPP TS 24.501 Section 8.2.12)
    // ========================================================================

    const DEREGISTRATION_REQUEST: &str = "7e016f0325f5027e004509000b0200f110cafe0000000001";

    #[test]
    fn test_deregistration_request_outer_header() {
        let data = hex_to_bytes(DEREGISTRATION_REQUEST);
        let outer = unpack_outer_hdr(&data).unwrap();
        let OuterHeader::Secured(sec) = outer else {
            panic!("expected a security protected header");
        };
        assert_eq!(sec.security_header_type, SecurityHeaderType::IntegrityProtected);
        assert_eq!(sec.mac, 0x6F0325F5);
        assert_eq!(sec.sequence_number, 2);
        assert_eq!(outer.size(), 7);
    }

    #[test]
    fn test_deregistration_request_capture() {
        let data = hex_to_bytes(DEREGISTRATION_REQUEST);
        let msg = decode(&data);
        assert_eq!(msg.header.security_header_type(), SecurityHeaderType::IntegrityProtected);
        assert_eq!(msg.header.plain.epd(), ExtendedProtocolDiscriminator::MobilityManagement);

        let dereg = msg.body_as::<DeregistrationRequestUeOriginating>().unwrap();
        assert!(dereg.is_switch_off());
        assert_eq!(dereg.deregistration_type.switch_off, SwitchOff::SwitchOff);
        assert_eq!(
            dereg.deregistration_type.re_registration_required,
            ReRegistrationRequired::NotRequired
        );
        assert_eq!(
            dereg.deregistration_type.access_type,
            DeRegistrationAccessType::ThreeGppAccess
        );
        assert_eq!(dereg.ng_ksi.ksi, 0);

        let guti = dereg.mobile_identity.guti().unwrap();
        assert_eq!(guti.head, 0);
        assert_eq!(guti.plmn, test_plmn());
        assert_eq!(guti.amf_region_id, 202);
        assert_eq!(guti.amf_set_id, 1016);
        assert_eq!(guti.amf_pointer, 0);
        assert_eq!(guti.tmsi, 1);

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_deregistration_request_ciphered_capture() {
        let data = hex_to_bytes("7e02b1b87698027e004509000b0200f110cafe0000000003");
        let msg = decode(&data);
        let sec = msg.header.security.unwrap();
        assert_eq!(sec.security_header_type, SecurityHeaderType::IntegrityProtectedAndCiphered);
        assert_eq!(sec.mac, 0xB1B87698);

        let dereg = msg.body_as::<DeregistrationRequestUeOriginating>().unwrap();
        assert_eq!(dereg.mobile_identity.guti().unwrap().tmsi, 3);
        assert_repacks(&msg, &data);
    }

    // ========================================================================
    // Authentication Tests (3GPP TS 24.501 Section 8.2.1 - 8.2.2)
    // ========================================================================

    #[test]
    fn test_authentication_request_capture() {
        let data = hex_to_bytes(
            "7e005600020000211646243275b8b9c718b605c6ff0396712010a30926e42eea8000f687d5baa2d956ed",
        );
        let msg = decode(&data);
        let auth = msg.body_as::<AuthenticationRequest>().unwrap();
        assert_eq!(auth.ng_ksi.ksi, 0);
        assert_eq!(auth.abba.value, vec![0x00, 0x00]);
        assert_eq!(
            auth.rand.unwrap().value,
            [
                0x16, 0x46, 0x24, 0x32, 0x75, 0xB8, 0xB9, 0xC7, 0x18, 0xB6, 0x05, 0xC6, 0xFF,
                0x03, 0x96, 0x71
            ]
        );
        let autn = auth.autn.unwrap();
        assert_eq!(autn.value[0], 0xA3);
        assert_eq!(autn.value[15], 0xED);
        assert!(auth.eap_message.is_none());

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_authentication_response_capture() {
        let data = hex_to_bytes("7e00572d10a11f51a41da9b529b33b043ae1e20208");
        let msg = decode(&data);
        let resp = msg.body_as::<AuthenticationResponse>().unwrap();
        let res_star = resp.response_parameter.unwrap();
        assert_eq!(res_star.value.len(), 16);
        assert_eq!(res_star.value[0], 0xA1);
        assert!(resp.eap_message.is_none());

        assert_repacks(&msg, &data);
    }

    // ========================================================================
    // Security Mode Tests (3GPP TS 24.501 Section 8.2.25 - 8.2.26)
    // ========================================================================

    #[test]
    fn test_security_mode_command_capture() {
        let data = hex_to_bytes("7e03533fcb29007e005d020004f070f070e1360100");
        let msg = decode(&data);
        let sec = msg.header.security.unwrap();
        assert_eq!(
            sec.security_header_type,
            SecurityHeaderType::IntegrityProtectedWithNewSecurityContext
        );
        assert_eq!(sec.mac, 0x533FCB29);
        assert_eq!(sec.sequence_number, 0);

        let smc = msg.body_as::<SecurityModeCommand>().unwrap();
        assert_eq!(
            smc.selected_nas_security_algorithms.ciphering,
            TypeOfCipheringAlgorithm::Ea0
        );
        assert_eq!(
            smc.selected_nas_security_algorithms.integrity,
            TypeOfIntegrityProtectionAlgorithm::Ia2_128
        );
        assert_eq!(smc.ng_ksi.ksi, 0);

        let caps = &smc.replayed_ue_security_capabilities;
        assert_eq!((caps.ea, caps.ia), (0xF0, 0x70));
        assert_eq!((caps.eea, caps.eia), (Some(0xF0), Some(0x70)));

        assert_eq!(smc.imeisv_request.unwrap().value, ImeiSvRequest::Requested);
        let info = smc.additional_5g_security_information.unwrap();
        assert!(!info.rinmr);
        assert!(!info.hdp);

        assert_repacks(&msg, &data);
    }

    const SECURITY_MODE_COMPLETE: &str = concat!(
        "7e044088e4e4007e005e7700098556110654282021f57100577e00417900360100f11071ff",
        "021b03e3424299674b24bc8c8a54e2f9065bf6920963b09e37261348f5fedca242079100f9",
        "6d5782bf257ecba4d6ce2d1001032e04f070f0701707f070c0401180b0180101740000530101"
    );

    #[test]
    fn test_security_mode_complete_capture() {
        let data = hex_to_bytes(SECURITY_MODE_COMPLETE);
        assert_eq!(data.len(), 112);
        let msg = decode(&data);
        assert_eq!(
            msg.header.security_header_type(),
            SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        );

        let complete = msg.body_as::<SecurityModeComplete>().unwrap();
        let imeisv = complete.imeisv.as_ref().unwrap().imeisv().unwrap();
        assert_eq!(imeisv.digits.len(), 16);
        assert!(imeisv.to_string().starts_with("86511604"));
        assert_eq!(complete.nas_message_container.as_ref().unwrap().value.len(), 87);

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_security_mode_complete_nested_registration_request() {
        let data = hex_to_bytes(SECURITY_MODE_COMPLETE);
        let msg = decode(&data);
        let complete = msg.body_as::<SecurityModeComplete>().unwrap();
        let container = complete.nas_message_container.as_ref().unwrap();

        let inner = NasMessage::from_container(container).unwrap().message().unwrap();
        assert!(inner.header.security.is_none());
        let req = inner.body_as::<RegistrationRequest>().unwrap();
        assert!(req.mobile_identity.suci().is_ok());
        assert_eq!(req.mm_capability.as_ref().unwrap().octets, vec![0x03]);

        let sec_cap = req.ue_security_capability.as_ref().unwrap();
        assert_eq!(sec_cap.eea, Some(0xF0));
        assert_eq!(sec_cap.eia, Some(0x70));
        assert_eq!(req.s1_ue_network_capability.as_ref().unwrap().octets.len(), 7);
        assert_eq!(
            req.ue_usage_setting.unwrap().value,
            UeUsageSetting::DataCentric
        );
        assert!(req.ladn_indication.as_ref().unwrap().dnns.is_empty());
        assert!(req.update_type.unwrap().sms_requested);

        // Re-packing the inner message reproduces the container contents
        assert_eq!(inner.to_container().unwrap(), *container);
    }

    // ========================================================================
    // Registration Accept / Complete Tests (3GPP TS 24.501 Section 8.2.7 - 8.2.8)
    // ========================================================================

    #[test]
    fn test_registration_accept_capture() {
        let data = hex_to_bytes(concat!(
            "7e02d2b078f7017e0042010177000bf200f110cafe000000000354070000f110000001",
            "150a040101020304011122335e010616012c"
        ));
        let msg = decode(&data);
        let accept = msg.body_as::<RegistrationAccept>().unwrap();

        let result = &accept.registration_result;
        assert_eq!(result.result, RegistrationResult::ThreeGppAccess);
        assert!(!result.sms_allowed);
        assert!(!result.nssaa_to_be_performed);
        assert!(!result.emergency_registered);

        let guti = accept.guti.as_ref().unwrap().guti().unwrap();
        assert_eq!(guti.head, IDENTITY_FILLER_HEAD);
        assert_eq!(guti.plmn, test_plmn());
        assert_eq!(guti.amf_region_id, 0xCA);
        assert_eq!(guti.amf_set_id, 1016);
        assert_eq!(guti.tmsi, 3);

        let tais = accept.tai_list.as_ref().unwrap().tais();
        assert_eq!(tais, vec![Tai::new(test_plmn(), 1)]);

        let nssai = &accept.allowed_nssai.as_ref().unwrap().s_nssai;
        assert_eq!(nssai.len(), 2);
        assert_eq!(nssai[0], IeSNssai::with_sd(1, 0x010203));
        assert_eq!(nssai[1], IeSNssai::with_sd(1, 0x112233));

        let t3512 = accept.t3512_value.unwrap();
        assert_eq!(t3512.unit, GprsTimer3Unit::MultiplesOf10Minutes);
        assert_eq!(t3512.seconds(), Some(3600));
        assert_eq!(accept.t3502_value.unwrap().value, 44);

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_registration_complete_capture() {
        let data = hex_to_bytes("7e02a0b88817017e0043");
        let msg = decode(&data);
        assert_eq!(msg.message_type(), MessageType::RegistrationComplete);
        assert_eq!(
            *msg.body_as::<RegistrationComplete>().unwrap(),
            RegistrationComplete::new()
        );
        assert_repacks(&msg, &data);
    }

    // ========================================================================
    // NAS Transport Tests (3GPP TS 24.501 Section 8.2.10 - 8.2.11)
    // ========================================================================

    const UL_NAS_TRANSPORT: &str =
        "7e02dcf91d1b027e00670100062e0a00c1ffff120a81220401010203250908696e7465726e6574";

    #[test]
    fn test_ul_nas_transport_capture() {
        let data = hex_to_bytes(UL_NAS_TRANSPORT);
        let msg = decode(&data);
        let ul = msg.body_as::<UlNasTransport>().unwrap();
        assert_eq!(ul.payload_container_type.value, PayloadContainerType::N1SmInformation);
        assert_eq!(ul.pdu_session_id.unwrap().value, 10);
        // Half-octet IEI followed by full-octet IEIs
        assert_eq!(ul.request_type.unwrap().value, RequestType::InitialRequest);
        assert_eq!(ul.s_nssai.unwrap(), IeSNssai::with_sd(1, 0x010203));
        assert_eq!(ul.dnn.as_ref().unwrap().name().as_deref(), Some("internet"));
        assert!(ul.old_pdu_session_id.is_none());

        let inner = decode(&ul.payload_container.value);
        let PlainHeader::Sm(sm) = inner.header.plain else {
            panic!("expected a 5GSM header");
        };
        assert_eq!(sm.pdu_session_id, 10);
        assert_eq!(sm.pti, 0);
        let req = inner.body_as::<PduSessionEstablishmentRequest>().unwrap();
        assert_eq!(
            req.integrity_protection_maximum_data_rate.max_rate_uplink,
            MaximumDataRate::FullDataRate
        );
        assert_eq!(
            req.integrity_protection_maximum_data_rate.max_rate_downlink,
            MaximumDataRate::FullDataRate
        );
        assert_eq!(inner.pack().unwrap().to_vec(), ul.payload_container.value);

        assert_repacks(&msg, &data);
    }

    #[test]
    fn test_dl_nas_transport_capture() {
        let data = hex_to_bytes(concat!(
            "7e021acaa292027e006801001d2e0a00c211000801063131010100090601e80301e803",
            "2905013c3c0001120a"
        ));
        let msg = decode(&data);
        let dl = msg.body_as::<DlNasTransport>().unwrap();
        assert_eq!(dl.payload_container.value.len(), 29);
        assert_eq!(dl.pdu_session_id.unwrap().value, 10);

        let inner = decode(&dl.payload_container.value);
        assert_eq!(inner.message_type(), MessageType::PduSessionEstablishmentAccept);
        let accept = inner.body_as::<PduSessionEstablishmentAccept>().unwrap();
        assert_eq!(accept.selected_ssc_mode.value, SscMode::SscMode1);
        assert_eq!(accept.selected_pdu_session_type.value, PduSessionType::Ipv4);
        assert_eq!(accept.authorized_qos_rules.value.len(), 8);
        assert_eq!(accept.session_ambr.downlink_unit, AmbrUnit::Kbps1);
        assert_eq!(accept.session_ambr.downlink, 59395);
        assert_eq!(accept.session_ambr.uplink, 59395);

        let address = accept.pdu_address.as_ref().unwrap();
        assert!(address.smf_ipv6_link_local.is_none());
        assert_eq!(address.address.ipv4(), Some(Ipv4Addr::new(60, 60, 0, 1)));
        assert_eq!(inner.pack().unwrap().to_vec(), dl.payload_container.value);

        assert_repacks(&msg, &data);
    }

    // ========================================================================
    // Optional IE Handling Tests
    // ========================================================================

    /// Plain UL NAS transport with an undefined IEI 0x30 (one octet of
    /// contents) ahead of the DNN
    const UL_NAS_TRANSPORT_UNKNOWN_IE: &str =
        "7e00670100062e0a00c1ffff120a300142250908696e7465726e6574";

    #[test]
    fn test_unknown_iei_skip_tlv() {
        let data = hex_to_bytes(UL_NAS_TRANSPORT_UNKNOWN_IE);
        let config = CodecConfig {
            unknown_iei_policy: UnknownIeiPolicy::SkipTlv,
            ..CodecConfig::default()
        };
        let msg = NasMessage::unpack_with(&data, &config).unwrap().message().unwrap();
        let ul = msg.body_as::<UlNasTransport>().unwrap();
        assert_eq!(ul.pdu_session_id.unwrap().value, 10);
        assert_eq!(ul.dnn.as_ref().unwrap().name().as_deref(), Some("internet"));
    }

    #[test]
    fn test_unknown_iei_reject() {
        let data = hex_to_bytes(UL_NAS_TRANSPORT_UNKNOWN_IE);
        let config = CodecConfig {
            unknown_iei_policy: UnknownIeiPolicy::Reject,
            ..CodecConfig::default()
        };
        assert!(matches!(
            NasMessage::unpack_with(&data, &config),
            Err(CodecError::UnknownIei { iei: 0x30, .. })
        ));
    }

    #[test]
    fn test_unknown_iei_ignore_by_default() {
        let data = hex_to_bytes(UL_NAS_TRANSPORT_UNKNOWN_IE);
        let msg = decode(&data);
        assert!(msg.body_as::<UlNasTransport>().is_ok());
    }

    #[test]
    fn test_unknown_iei_policy_reaches_contained_message() {
        let container = IeNasMessageContainer::new(hex_to_bytes(UL_NAS_TRANSPORT_UNKNOWN_IE));
        let config = CodecConfig::with_policy(UnknownIeiPolicy::Reject);
        assert!(matches!(
            NasMessage::from_container_with(&container, &config),
            Err(CodecError::UnknownIei { iei: 0x30, .. })
        ));

        let inner = NasMessage::from_container(&container)
            .unwrap()
            .message()
            .unwrap();
        assert!(inner.body_as::<UlNasTransport>().is_ok());

        let repacked = inner.to_container_with(&config).unwrap();
        let reparsed = NasMessage::from_container_with(&repacked, &config)
            .unwrap()
            .message()
            .unwrap();
        assert_eq!(reparsed, inner);
    }

    #[test]
    fn test_s_nssai_sst_only() {
        let mut buf = BitBuffer::new();
        IeSNssai::new(SST_EMBB).nas_encode(&mut buf).unwrap();
        assert_eq!(buf.data(), &[0x01, 0x01]);

        let decoded = IeSNssai::nas_decode(&mut BitBufferReader::new(&[0x01, 0x01])).unwrap();
        assert_eq!(decoded, IeSNssai::new(1));
        assert_eq!(decoded.sd, None);
    }

    #[test]
    fn test_eap_message_too_short() {
        let mut buf = BitBuffer::new();
        let result = IeEapMessage::new(vec![0x01, 0x02, 0x03]).nas_encode(&mut buf);
        assert!(matches!(
            result,
            Err(CodecError::LengthOutOfBounds { length: 3, min: 4, .. })
        ));

        let data = [0x00, 0x03, 0x01, 0x02, 0x03];
        let result = IeEapMessage::nas_decode(&mut BitBufferReader::new(&data));
        assert!(matches!(
            result,
            Err(CodecError::LengthOutOfBounds { length: 3, .. })
        ));
    }

    #[test]
    fn test_truncated_capture_fails() {
        let data = hex_to_bytes(REGISTRATION_REQUEST_GUTI);
        let result = NasMessage::unpack(&data[..10]);
        assert!(result.is_err());
    }
}
