//! NAS Transport Messages (3GPP TS 24.501 Section 8.2.10-8.2.11)
//!
//! This module implements the NAS Transport messages:
//! - UL NAS Transport (UE to network, Section 8.2.10)
//! - DL NAS Transport (network to UE, Section 8.2.11)
//!
//! Both carry an opaque payload container; for N1 SM information the
//! payload is a complete 5GSM message.

use nextgsim_common::{BitBuffer, BitBufferReader, CodecConfig};

use crate::codec::{decode_optional_ies, encode_optional, CodecResult, NasDecode, NasEncode};
use crate::enums::MessageType;
use crate::ies::*;
use crate::messages::NasMessageBody;

// ============================================================================
// IEI Constants for NAS Transport Messages
// ============================================================================

/// IEI values for UL NAS Transport optional IEs
pub mod ul_nas_transport_iei {
    /// PDU session ID
    pub const PDU_SESSION_ID: u8 = 0x12;
    /// Old PDU session ID
    pub const OLD_PDU_SESSION_ID: u8 = 0x59;
    /// Request type (Type 1)
    pub const REQUEST_TYPE: u8 = 0x8;
    /// S-NSSAI
    pub const S_NSSAI: u8 = 0x22;
    /// DNN
    pub const DNN: u8 = 0x25;
    /// Additional information
    pub const ADDITIONAL_INFORMATION: u8 = 0x24;
    /// MA PDU session information (Type 1)
    pub const MA_PDU_SESSION_INFORMATION: u8 = 0xA;
    /// Release assistance indication (Type 1)
    pub const RELEASE_ASSISTANCE_INDICATION: u8 = 0xF;
}

/// IEI values for DL NAS Transport optional IEs
pub mod dl_nas_transport_iei {
    /// PDU session ID
    pub const PDU_SESSION_ID: u8 = 0x12;
    /// Additional information
    pub const ADDITIONAL_INFORMATION: u8 = 0x24;
    /// 5GMM cause
    pub const MM_CAUSE: u8 = 0x58;
    /// Back-off timer value
    pub const BACK_OFF_TIMER_VALUE: u8 = 0x37;
}

// ============================================================================
// UL NAS Transport
// ============================================================================

/// UL NAS Transport message (3GPP TS 24.501 Section 8.2.10)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UlNasTransport {
    /// Payload container type (mandatory, low half octet after a spare)
    pub payload_container_type: IePayloadContainerType,
    /// Payload container (mandatory, LV-E)
    pub payload_container: IePayloadContainer,
    /// PDU session ID
    pub pdu_session_id: Option<IePduSessionIdentity2>,
    /// Old PDU session ID
    pub old_pdu_session_id: Option<IePduSessionIdentity2>,
    /// Request type
    pub request_type: Option<IeRequestType>,
    /// S-NSSAI
    pub s_nssai: Option<IeSNssai>,
    /// DNN
    pub dnn: Option<IeDnn>,
    /// Additional information
    pub additional_information: Option<IeAdditionalInformation>,
    /// MA PDU session information
    pub ma_pdu_session_information: Option<IeMaPduSessionInformation>,
    /// Release assistance indication
    pub release_assistance_indication: Option<IeReleaseAssistanceIndication>,
}

impl UlNasTransport {
    /// Create a UL NAS Transport with the mandatory IEs only
    pub fn new(payload_container_type: PayloadContainerType, payload: Vec<u8>) -> Self {
        Self {
            payload_container_type: IePayloadContainerType::new(payload_container_type),
            payload_container: IePayloadContainer::new(payload),
            pdu_session_id: None,
            old_pdu_session_id: None,
            request_type: None,
            s_nssai: None,
            dnn: None,
            additional_information: None,
            ma_pdu_session_information: None,
            release_assistance_indication: None,
        }
    }

    /// Create a UL NAS Transport carrying an encoded 5GSM message for the
    /// given PDU session
    pub fn n1_sm(pdu_session_id: u8, request_type: Option<RequestType>, sm_message: Vec<u8>) -> Self {
        Self {
            pdu_session_id: Some(IePduSessionIdentity2::new(pdu_session_id)),
            request_type: request_type.map(IeRequestType::new),
            ..Self::new(PayloadContainerType::N1SmInformation, sm_message)
        }
    }
}

impl NasMessageBody for UlNasTransport {
    const MESSAGE_TYPE: MessageType = MessageType::UlNasTransport;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use ul_nas_transport_iei as iei;

        encode_spare_half_octet(buf);
        self.payload_container_type.nas_encode(buf)?;
        self.payload_container.nas_encode(buf)?;
        encode_optional(buf, iei::PDU_SESSION_ID, &self.pdu_session_id)?;
        encode_optional(buf, iei::OLD_PDU_SESSION_ID, &self.old_pdu_session_id)?;
        encode_optional(buf, iei::REQUEST_TYPE, &self.request_type)?;
        encode_optional(buf, iei::S_NSSAI, &self.s_nssai)?;
        encode_optional(buf, iei::DNN, &self.dnn)?;
        encode_optional(buf, iei::ADDITIONAL_INFORMATION, &self.additional_information)?;
        encode_optional(buf, iei::MA_PDU_SESSION_INFORMATION, &self.ma_pdu_session_information)?;
        encode_optional(
            buf,
            iei::RELEASE_ASSISTANCE_INDICATION,
            &self.release_assistance_indication,
        )
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use ul_nas_transport_iei as iei;

        decode_spare_half_octet(buf)?;
        let payload_container_type = IePayloadContainerType::nas_decode(buf)?;
        let payload_container = IePayloadContainer::nas_decode(buf)?;
        let mut msg = Self {
            payload_container_type,
            payload_container,
            ..Self::new(PayloadContainerType::N1SmInformation, Vec::new())
        };

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::PDU_SESSION_ID => msg.pdu_session_id = Some(NasDecode::nas_decode(r)?),
                iei::OLD_PDU_SESSION_ID => msg.old_pdu_session_id = Some(NasDecode::nas_decode(r)?),
                iei::REQUEST_TYPE => msg.request_type = Some(NasDecode::nas_decode(r)?),
                iei::S_NSSAI => msg.s_nssai = Some(NasDecode::nas_decode(r)?),
                iei::DNN => msg.dnn = Some(NasDecode::nas_decode(r)?),
                iei::ADDITIONAL_INFORMATION => {
                    msg.additional_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::MA_PDU_SESSION_INFORMATION => {
                    msg.ma_pdu_session_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::RELEASE_ASSISTANCE_INDICATION => {
                    msg.release_assistance_indication = Some(NasDecode::nas_decode(r)?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(msg)
    }
}

// ============================================================================
// DL NAS Transport
// ============================================================================

/// DL NAS Transport message (3GPP TS 24.501 Section 8.2.11)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlNasTransport {
    /// Payload container type (mandatory, low half octet after a spare)
    pub payload_container_type: IePayloadContainerType,
    /// Payload container (mandatory, LV-E)
    pub payload_container: IePayloadContainer,
    /// PDU session ID
    pub pdu_session_id: Option<IePduSessionIdentity2>,
    /// Additional information
    pub additional_information: Option<IeAdditionalInformation>,
    /// 5GMM cause
    pub mm_cause: Option<Ie5gMmCause>,
    /// Back-off timer value
    pub back_off_timer_value: Option<IeGprsTimer3>,
}

impl DlNasTransport {
    /// Create a DL NAS Transport with the mandatory IEs only
    pub fn new(payload_container_type: PayloadContainerType, payload: Vec<u8>) -> Self {
        Self {
            payload_container_type: IePayloadContainerType::new(payload_container_type),
            payload_container: IePayloadContainer::new(payload),
            pdu_session_id: None,
            additional_information: None,
            mm_cause: None,
            back_off_timer_value: None,
        }
    }

    /// Create a DL NAS Transport carrying an encoded 5GSM message for the
    /// given PDU session
    pub fn n1_sm(pdu_session_id: u8, sm_message: Vec<u8>) -> Self {
        Self {
            pdu_session_id: Some(IePduSessionIdentity2::new(pdu_session_id)),
            ..Self::new(PayloadContainerType::N1SmInformation, sm_message)
        }
    }
}

impl NasMessageBody for DlNasTransport {
    const MESSAGE_TYPE: MessageType = MessageType::DlNasTransport;

    fn encode_body(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        use dl_nas_transport_iei as iei;

        encode_spare_half_octet(buf);
        self.payload_container_type.nas_encode(buf)?;
        self.payload_container.nas_encode(buf)?;
        encode_optional(buf, iei::PDU_SESSION_ID, &self.pdu_session_id)?;
        encode_optional(buf, iei::ADDITIONAL_INFORMATION, &self.additional_information)?;
        encode_optional(buf, iei::MM_CAUSE, &self.mm_cause)?;
        encode_optional(buf, iei::BACK_OFF_TIMER_VALUE, &self.back_off_timer_value)
    }

    fn decode_body(buf: &mut BitBufferReader<'_>, config: &CodecConfig) -> CodecResult<Self> {
        use dl_nas_transport_iei as iei;

        decode_spare_half_octet(buf)?;
        let payload_container_type = IePayloadContainerType::nas_decode(buf)?;
        let payload_container = IePayloadContainer::nas_decode(buf)?;
        let mut msg = Self {
            payload_container_type,
            payload_container,
            pdu_session_id: None,
            additional_information: None,
            mm_cause: None,
            back_off_timer_value: None,
        };

        decode_optional_ies(buf, config, Self::name(), |tag, r| {
            match tag {
                iei::PDU_SESSION_ID => msg.pdu_session_id = Some(NasDecode::nas_decode(r)?),
                iei::ADDITIONAL_INFORMATION => {
                    msg.additional_information = Some(NasDecode::nas_decode(r)?)
                }
                iei::MM_CAUSE => msg.mm_cause = Some(NasDecode::nas_decode(r)?),
                iei::BACK_OFF_TIMER_VALUE => {
                    msg.back_off_timer_value = Some(NasDecode::nas_decode(r)?)
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

    #[test]
    fn test_ul_nas_transport_n1_sm() {
        let mut msg = UlNasTransport::n1_sm(
            1,
            Some(RequestType::InitialRequest),
            vec![0x2E, 0x01, 0x01, 0xC1, 0xFF, 0xFF, 0x91],
        );
        msg.s_nssai = Some(IeSNssai::new(SST_EMBB));
        msg.dnn = Some(IeDnn::from_name("internet").unwrap());
        let encoded = round_trip(&msg);

        assert_eq!(&encoded[..3], &[0x01, 0x00, 0x07]);
        let optional = &encoded[10..];
        assert_eq!(&optional[..2], &[0x12, 0x01]);
        assert_eq!(optional[2], 0x81);
        assert_eq!(&optional[3..6], &[0x22, 0x01, 0x01]);
        assert_eq!(&optional[6..9], &[0x25, 0x09, 0x08]);
        assert_eq!(&optional[9..], b"internet");
    }

    #[test]
    fn test_ul_nas_transport_type1_optionals() {
        let mut msg = UlNasTransport::new(PayloadContainerType::Sms, vec![0x01]);
        msg.ma_pdu_session_information = Some(IeMaPduSessionInformation {
            value: MaPduSessionInformation::NetworkUpgradeAllowed,
        });
        msg.release_assistance_indication = Some(IeReleaseAssistanceIndication {
            ddx: DownlinkDataExpected::NoFurtherData,
        });
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..4], &[0x02, 0x00, 0x01, 0x01]);
        assert_eq!(&encoded[4..], &[0xA1, 0xF1]);
    }

    #[test]
    fn test_dl_nas_transport() {
        let mut msg = DlNasTransport::n1_sm(5, vec![0x2E, 0x05, 0x01, 0xC2]);
        msg.mm_cause = Some(Ie5gMmCause::new(MmCause::PayloadNotForwarded));
        msg.back_off_timer_value = Some(IeGprsTimer3::new(GprsTimer3Unit::MultiplesOf1Minute, 1));
        let encoded = round_trip(&msg);
        assert_eq!(&encoded[..7], &[0x01, 0x00, 0x04, 0x2E, 0x05, 0x01, 0xC2]);
        assert_eq!(&encoded[7..], &[0x12, 0x05, 0x58, 0x5A, 0x37, 0x01, 0xA1]);
    }
}
