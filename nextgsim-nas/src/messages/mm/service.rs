//! Service Messages (3GPP TS 24.501 Section 8.2.15, 8.2.16, 8.2.17)
//!
//! This module implements the Service procedure messages:
//! - Service Request (UE to network)
//! - Service Accept (network to UE)
//! - Service Reject (network to UE)

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI values for Service messages
// ============================================================================

/// IEI values for Service Request optional IEs
pub mod service_request_iei {
    /// Uplink data status
    pub const UPLINK_DATA_STATUS: u8 = 0x40;
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
    /// Allowed PDU session status
    pub const ALLOWED_PDU_SESSION_STATUS: u8 = 0x25;
    /// NAS message container
    pub const NAS_MESSAGE_CONTAINER: u8 = 0x71;
}

/// IEI values for Service Accept optional IEs
pub mod service_accept_iei {
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
    /// PDU session reactivation result
    pub const PDU_SESSION_REACTIVATION_RESULT: u8 = 0x26;
    /// PDU session reactivation result error cause
    pub const PDU_SESSION_REACTIVATION_RESULT_ERROR_CAUSE: u8 = 0x72;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// T3448 value
    pub const T3448_VALUE: u8 = 0x6B;
}

/// IEI values for Service Reject optional IEs
pub mod service_reject_iei {
    /// PDU session status
    pub const PDU_SESSION_STATUS: u8 = 0x50;
    /// T3346 value
    pub const T3346_VALUE: u8 = 0x5F;
    /// EAP message
    pub const EAP_MESSAGE: u8 = 0x78;
    /// T3448 value
    pub const T3448_VALUE: u8 = 0x6B;
    /// CAG information list
    pub const CAG_INFORMATION_LIST: u8 = 0x75;
}

// ============================================================================
// Service Request
// ============================================================================

/// Service Request message (3GPP TS 24.501 Section 8.2.15)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Service type (mandatory, high half octet)
    pub service_type: IeServiceType,
    /// NAS key set identifier (mandatory, low half octet)
    pub ng_ksi: IeNasKeySetIdentifier,
    /// 5G-S-TMSI (mandatory, carried as a 5GS mobile identity)
    pub s_tmsi: Ie5gsMobileIdentity,
    /// Uplink data status
    pub uplink_data_status: Option<IeUplinkDataStatus>,
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
    /// Allowed PDU session status
    pub allowed_pdu_session_status: Option<IeAllowedPduSessionStatus>,
    /// NAS message container
    pub nas_message_container: Option<IeNasMessageContainer>,
}

impl ServiceRequest {
    /// Create a Service Request for the given S-TMSI
    pub fn new(service_type: ServiceType, ng_ksi: IeNasKeySetIdentifier, s_tmsi: STmsi) -> Self {
        Self {
            service_type: IeServiceType::new(service_type),
            ng_ksi,
            s_tmsi: Ie5gsMobileIdentity::Tmsi(s_tmsi),
            uplink_data_status: None,
            pdu_session_status: None,
            allowed_pdu_session_status: None,
            nas_message_container: None,
        }
    }
}

impl NasMessageBody for ServiceRequest {
    const MESSAGE_TYPE: MessageType = MessageType::ServiceRequest;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use service_request_iei as iei;

        self.service_type.nas_encode(buf)?;
        self.ng_ksi.nas_encode(buf)?;
        self.s_tmsi.nas_encode(buf)?;
        encode_optional(buf, iei::UPLINK_DATA_STATUS, &self.uplink_data_status)?;
        encode_optional(buf, iei::PDU_SESSION_STATUS, &self.pdu_session_status)?;
        encode_optional(buf, iei::ALLOWED_PDU_SESSION_STATUS, &self.allowed_pdu_session_status)?;
        encode_optional(buf, iei::NAS_MESSAGE_CONTAINER, &self.nas_message_container)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use service_request_iei as iei;

        let service_type = IeServiceType::nas_decode(buf)?;
        let ng_ksi = IeNasKeySetIdentifier::nas_decode(buf)?;
        let s_tmsi = Ie5gsMobileIdentity::nas_decode(buf)?;
        let mut msg = Self {
            service_type,
            ng_ksi,
            s_tmsi,
            uplink_data_status: None,
            pdu_session_status: None,
            allowed_pdu_session_status: None,
            nas_message_container: None,
        };

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::UPLINK_DATA_STATUS => msg.uplink_data_status = Some(NasDecode::nas_decode(r)?),
                iei::PDU_SESSION_STATUS => msg.pdu_session_status = Some(NasDecode::nas_decode(r)?),
                iei::ALLOWED_PDU_SESSION_STATUS => {
                    msg.allowed_pdu_session_status = Some(NasDecode::nas_decode(r)?)
                }
                iei::NAS_MESSAGE_CONTAINER => {
                    msg.nas_message_container = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(msg)
    }
}

// ============================================================================
// Service Accept
// ============================================================================

/// Service Accept message (3GPP TS 24.501 Section 8.2.16)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceAccept {
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
    /// PDU session reactivation result
    pub pdu_session_reactivation_result: Option<IePduSessionReactivationResult>,
    /// PDU session reactivation result error cause
    pub pdu_session_reactivation_result_error_cause:
        Option<IePduSessionReactivationResultErrorCause>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// T3448 value
    pub t3448_value: Option<IeGprsTimer2>,
}

impl ServiceAccept {
    /// Create an empty Service Accept
    pub fn new() -> Self {
        Self::default()
    }
}

impl NasMessageBody for ServiceAccept {
    const MESSAGE_TYPE: MessageType = MessageType::ServiceAccept;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use service_accept_iei as iei;

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
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(buf, iei::T3448_VALUE, &self.t3448_value)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use service_accept_iei as iei;

        let mut msg = Self::new();
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::PDU_SESSION_STATUS => msg.pdu_session_status = Some(NasDecode::nas_decode(r)?),
                iei::PDU_SESSION_REACTIVATION_RESULT => {
                    msg.pdu_session_reactivation_result = Some(NasDecode::nas_decode(r)?)
                }
                iei::PDU_SESSION_REACTIVATION_RESULT_ERROR_CAUSE => {
                    msg.pdu_session_reactivation_result_error_cause =
                        Some(NasDecode::nas_decode(r)?)
                }
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::T3448_VALUE => msg.t3448_value = Some(NasDecode::nas_decode(r)?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// Service Reject
// ============================================================================

/// Service Reject message (3GPP TS 24.501 Section 8.2.17)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReject {
    /// 5GMM cause (mandatory)
    pub mm_cause: Ie5gMmCause,
    /// PDU session status
    pub pdu_session_status: Option<IePduSessionStatus>,
    /// T3346 value
    pub t3346_value: Option<IeGprsTimer2>,
    /// EAP message
    pub eap_message: Option<IeEapMessage>,
    /// T3448 value
    pub t3448_value: Option<IeGprsTimer2>,
    /// CAG information list
    pub cag_information_list: Option<IeCagInformationList>,
}

impl ServiceReject {
    /// Create a Service Reject with the given cause
    pub fn new(mm_cause: MmCause) -> Self {
        Self {
            mm_cause: Ie5gMmCause::new(mm_cause),
            pdu_session_status: None,
            t3346_value: None,
            eap_message: None,
            t3448_value: None,
            cag_information_list: None,
        }
    }
}

impl NasMessageBody for ServiceReject {
    const MESSAGE_TYPE: MessageType = MessageType::ServiceReject;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use service_reject_iei as iei;

        self.mm_cause.nas_encode(buf)?;
        encode_optional(buf, iei::PDU_SESSION_STATUS, &self.pdu_session_status)?;
        encode_optional(buf, iei::T3346_VALUE, &self.t3346_value)?;
        encode_optional(buf, iei::EAP_MESSAGE, &self.eap_message)?;
        encode_optional(buf, iei::T3448_VALUE, &self.t3448_value)?;
        encode_optional(buf, iei::CAG_INFORMATION_LIST, &self.cag_information_list)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use service_reject_iei as iei;

        let mut msg = Self::new(Ie5gMmCause::nas_decode(buf)?.value);
        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::PDU_SESSION_STATUS => msg.pdu_session_status = Some(NasDecode::nas_decode(r)?),
                iei::T3346_VALUE => msg.t3346_value = Some(NasDecode::nas_decode(r)?),
                iei::EAP_MESSAGE => msg.eap_message = Some(NasDecode::nas_decode(r)?),
                iei::T3448_VALUE => msg.t3448_value = Some(NasDecode::nas_decode(r)?),
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
    use crate::messages::test_util::{decode_body, round_trip};

    #[test]
    fn test_service_request_first_octet() {
        let msg = ServiceRequest::new(
            ServiceType::Data,
            IeNasKeySetIdentifier::new(TypeOfSecurityContext::Native, 3),
            STmsi::new(0x3F8, 0, 1),
        );
        let encoded = round_trip(&msg);
        // Service type in the high nibble, ngKSI in the low nibble
        assert_eq!(encoded[0], 0x13);
        assert_eq!(&encoded[1..], &[0x00, 0x07, 0xF4, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(msg.s_tmsi.s_tmsi().unwrap(), &STmsi::new(0x3F8, 0, 1));
    }

    #[test]
    fn test_service_request_with_container() {
        let mut msg = ServiceRequest::new(
            ServiceType::Signalling,
            IeNasKeySetIdentifier::default(),
            STmsi::new(1, 1, 0xDEADBEEF),
        );
        let mut status = IePduSessionStatus::default();
        status.set(1, true);
        status.set(5, true);
        msg.pdu_session_status = Some(status);
        msg.nas_message_container = Some(IeNasMessageContainer::new(vec![0x7E, 0x00, 0x4C]));
        round_trip(&msg);
    }

    #[test]
    fn test_service_accept_carries_session_status() {
        let mut msg = ServiceAccept::new();
        msg.pdu_session_status = Some(IePduSessionStatus::new(0x0002));
        msg.t3448_value = Some(IeGprsTimer2::new(0x0A));
        let encoded = round_trip(&msg);
        assert_eq!(encoded[0], service_accept_iei::PDU_SESSION_STATUS);
        assert_eq!(decode_body::<ServiceAccept>(&[]).unwrap(), ServiceAccept::new());
    }

    #[test]
    fn test_service_reject() {
        let mut msg = ServiceReject::new(MmCause::Congestion);
        msg.t3346_value = Some(IeGprsTimer2::new(0x21));
        msg.eap_message = Some(IeEapMessage::new(vec![0x04, 0x01, 0x00, 0x04]));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..4], &[0x16, 0x5F, 0x01, 0x21]);
    }
}
