//! Type 6 Information Elements (variable length, TLV-E)
//!
//! Type 6 IEs have a variable length with a 2-byte length field (TLV-E format).
//! They are used for encoding/decoding NAS message fields that may be larger
//! than 255 bytes.
//!
//! Based on 3GPP TS 24.501 specification.

use nextgsim_common::{BitBuffer, BitBufferReader};

use crate::codec::{read_enum, write_enum, CodecResult, Envelope, NasDecode, NasEncode};
use crate::ies::area::Ie5gsTrackingAreaIdentityList;
use crate::ies::ie3::MmCause;
use crate::ies::ie4::IeDnn;

opaque_ie!(
    /// EAP message IE (3GPP TS 24.501 Section 9.11.2.2)
    IeEapMessage,
    Envelope::tlv_e("EAP message", 4, 1500)
);

opaque_ie!(
    /// Payload container IE (3GPP TS 24.501 Section 9.11.3.39)
    IePayloadContainer,
    Envelope::tlv_e("Payload container", 1, 65535)
);

opaque_ie!(
    /// EPS NAS message container IE (3GPP TS 24.501 Section 9.11.3.24)
    IeEpsNasMessageContainer,
    Envelope::tlv_e("EPS NAS message container", 1, 65535)
);

opaque_ie!(
    /// NAS message container IE (3GPP TS 24.501 Section 9.11.3.33)
    ///
    /// The contents are a complete plain NAS message, see
    /// [`NasMessage::from_container`](crate::message::NasMessage::from_container).
    IeNasMessageContainer,
    Envelope::tlv_e("NAS message container", 1, 65532)
);

opaque_ie!(
    /// QoS rules IE (3GPP TS 24.501 Section 9.11.4.13)
    IeQosRules,
    Envelope::tlv_e("QoS rules", 4, 65535)
);

opaque_ie!(
    /// QoS flow descriptions IE (3GPP TS 24.501 Section 9.11.4.12)
    IeQosFlowDescriptions,
    Envelope::tlv_e("QoS flow descriptions", 3, 65535)
);

opaque_ie!(
    /// Mapped EPS bearer contexts IE (3GPP TS 24.501 Section 9.11.4.8)
    IeMappedEpsBearerContexts,
    Envelope::tlv_e("Mapped EPS bearer contexts", 4, 65535)
);

opaque_ie!(
    /// Extended protocol configuration options IE (3GPP TS 24.501 Section 9.11.4.6)
    IeExtendedProtocolConfigurationOptions,
    Envelope::tlv_e("Extended protocol configuration options", 1, 65535)
);

opaque_ie!(
    /// SOR transparent container IE (3GPP TS 24.501 Section 9.11.3.51)
    IeSorTransparentContainer,
    Envelope::tlv_e("SOR transparent container", 17, 65535)
);

opaque_ie!(
    /// Ciphering key data IE (3GPP TS 24.501 Section 9.11.3.18C)
    IeCipheringKeyData,
    Envelope::tlv_e("Ciphering key data", 31, 2672)
);

opaque_ie!(
    /// CAG information list IE (3GPP TS 24.501 Section 9.11.3.18A)
    IeCagInformationList,
    Envelope::tlv_e("CAG information list", 1, 65535)
);

opaque_ie!(
    /// Operator-defined access category definitions IE (3GPP TS 24.501 Section 9.11.3.38)
    IeOperatorDefinedAccessCategoryDefinitions,
    Envelope::tlv_e("Operator-defined access category definitions", 1, 65535)
);

opaque_ie!(
    /// Extended emergency number list IE (3GPP TS 24.301 Section 9.9.3.37A)
    IeExtendedEmergencyNumberList,
    Envelope::tlv_e("Extended emergency number list", 4, 65535)
);

opaque_ie!(
    /// Port management information container IE (3GPP TS 24.501 Section 9.11.4.27)
    IePortManagementInformationContainer,
    Envelope::tlv_e("Port management information container", 1, 65535)
);

opaque_ie!(
    /// ATSSS container IE (3GPP TS 24.501 Section 9.11.4.22)
    IeAtsssContainer,
    Envelope::tlv_e("ATSSS container", 1, 65535)
);

// ============================================================================
// LADN (3GPP TS 24.501 Section 9.11.3.29 / 9.11.3.30)
// ============================================================================

/// LADN Indication IE (Type 6, TLV-E)
///
/// List of DNNs for which the UE requests LADN information.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeLadnIndication {
    /// Requested DNNs
    pub dnns: Vec<IeDnn>,
}

impl IeLadnIndication {
    const ENVELOPE: Envelope = Envelope::tlv_e("LADN indication", 0, 808);

    /// Create a new LADN Indication IE
    pub fn new(dnns: Vec<IeDnn>) -> Self {
        Self { dnns }
    }
}

impl NasEncode for IeLadnIndication {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for dnn in &self.dnns {
                dnn.nas_encode(b)?;
            }
            Ok(())
        })
    }
}

impl NasDecode for IeLadnIndication {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut dnns = Vec::new();
            while r.remaining_octets() > 0 {
                dnns.push(IeDnn::nas_decode(r)?);
            }
            Ok(Self { dnns })
        })
    }
}

/// A single LADN (Local Area Data Network) entry
///
/// Each entry contains a DNN and the tracking areas where it is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadnEntry {
    /// DNN value
    pub dnn: IeDnn,
    /// Tracking areas where the LADN is available
    pub tai_list: Ie5gsTrackingAreaIdentityList,
}

impl LadnEntry {
    /// Create a new LADN entry
    pub fn new(dnn: IeDnn, tai_list: Ie5gsTrackingAreaIdentityList) -> Self {
        Self { dnn, tai_list }
    }
}

/// LADN Information IE (Type 6, TLV-E)
///
/// Contains a list of Local Area Data Network (LADN) entries.
/// Each entry specifies a DNN and associated tracking areas where
/// the LADN is available.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IeLadnInformation {
    /// List of LADN entries
    pub entries: Vec<LadnEntry>,
}

impl IeLadnInformation {
    const ENVELOPE: Envelope = Envelope::tlv_e("LADN information", 12, 1712);

    /// Create a new LADN Information IE
    pub fn new(entries: Vec<LadnEntry>) -> Self {
        Self { entries }
    }
}

impl NasEncode for IeLadnInformation {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for entry in &self.entries {
                entry.dnn.nas_encode(b)?;
                entry.tai_list.nas_encode(b)?;
            }
            Ok(())
        })
    }
}

impl NasDecode for IeLadnInformation {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut entries = Vec::new();
            while r.remaining_octets() > 0 {
                let dnn = IeDnn::nas_decode(r)?;
                let tai_list = Ie5gsTrackingAreaIdentityList::nas_decode(r)?;
                entries.push(LadnEntry::new(dnn, tai_list));
            }
            Ok(Self { entries })
        })
    }
}

// ============================================================================
// PDU session reactivation result error cause (3GPP TS 24.501 Section 9.11.3.43)
// ============================================================================

/// One (PDU session identity, cause) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduSessionErrorCause {
    /// PDU session identity
    pub psi: u8,
    /// 5GMM cause for the failed reactivation
    pub cause: MmCause,
}

/// PDU Session Reactivation Result Error Cause IE (Type 6, TLV-E)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IePduSessionReactivationResultErrorCause {
    /// Error causes, one per PDU session
    pub causes: Vec<PduSessionErrorCause>,
}

impl IePduSessionReactivationResultErrorCause {
    const ENVELOPE: Envelope =
        Envelope::tlv_e("PDU session reactivation result error cause", 2, 512);

    /// Create a new error cause list
    pub fn new(causes: Vec<PduSessionErrorCause>) -> Self {
        Self { causes }
    }
}

impl NasEncode for IePduSessionReactivationResultErrorCause {
    fn nas_encode(&self, buf: &mut BitBuffer) -> CodecResult<()> {
        Self::ENVELOPE.encode(buf, |b| {
            for item in &self.causes {
                b.write_bits(u32::from(item.psi), 8)?;
                write_enum(b, item.cause, 8)?;
            }
            Ok(())
        })
    }
}

impl NasDecode for IePduSessionReactivationResultErrorCause {
    fn nas_decode(buf: &mut BitBufferReader<'_>) -> CodecResult<Self> {
        Self::ENVELOPE.decode(buf, |r, _| {
            let mut causes = Vec::new();
            // An odd trailing octet is left to the envelope.
            while r.remaining_octets() >= 2 {
                let psi = r.read_bits(8)? as u8;
                let cause = read_enum(r, 8)?;
                causes.push(PduSessionErrorCause { psi, cause });
            }
            Ok(Self { causes })
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::ies::area::PartialTaiList;
    use crate::ies::plmn::Plmn;

    fn encode<T: NasEncode>(ie: &T) -> Vec<u8> {
        let mut buf = BitBuffer::new();
        ie.nas_encode(&mut buf).unwrap();
        buf.into_vec()
    }

    fn decode<T: NasDecode>(data: &[u8]) -> CodecResult<T> {
        let mut reader = BitBufferReader::new(data);
        T::nas_decode(&mut reader)
    }

    fn internet() -> IeDnn {
        IeDnn::new(vec![0x08, 0x69, 0x6E, 0x74, 0x65, 0x72, 0x6E, 0x65, 0x74])
    }

    fn single_tai_list() -> Ie5gsTrackingAreaIdentityList {
        Ie5gsTrackingAreaIdentityList::new(vec![PartialTaiList::SinglePlmnList {
            plmn: Plmn::new(1, 1, false),
            tacs: vec![0x000001],
        }])
    }

    #[test]
    fn test_eap_message_two_octet_length() {
        let eap = IeEapMessage::new(vec![0x01, 0x02, 0x00, 0x04]);
        assert_eq!(encode(&eap), vec![0x00, 0x04, 0x01, 0x02, 0x00, 0x04]);
        assert!(matches!(
            decode::<IeEapMessage>(&[0x00, 0x03, 0x01, 0x02, 0x03]),
            Err(CodecError::LengthOutOfBounds { ie: "EAP message", length: 3, .. })
        ));
    }

    #[test]
    fn test_payload_container_large() {
        let container = IePayloadContainer::new(vec![0x2E; 300]);
        let encoded = encode(&container);
        assert_eq!(&encoded[..2], &[0x01, 0x2C]);
        assert_eq!(decode::<IePayloadContainer>(&encoded).unwrap(), container);
    }

    #[test]
    fn test_ladn_indication_empty() {
        let ind = IeLadnIndication::default();
        assert_eq!(encode(&ind), vec![0x00, 0x00]);
        assert!(decode::<IeLadnIndication>(&[0x00, 0x00]).unwrap().dnns.is_empty());
    }

    #[test]
    fn test_ladn_indication_dnns() {
        let ind = IeLadnIndication::new(vec![internet(), IeDnn::new(vec![0x03, b'i', b'm', b's'])]);
        let encoded = encode(&ind);
        assert_eq!(&encoded[..3], &[0x00, 0x0F, 0x09]);
        assert_eq!(decode::<IeLadnIndication>(&encoded).unwrap(), ind);
    }

    #[test]
    fn test_ladn_information_single_entry() {
        let info = IeLadnInformation::new(vec![LadnEntry::new(internet(), single_tai_list())]);
        let encoded = encode(&info);
        // DNN LV (10) + TAI list LV (8)
        assert_eq!(&encoded[..2], &[0x00, 18]);
        assert_eq!(
            &encoded[12..],
            &[0x07, 0x00, 0x00, 0xF1, 0x10, 0x00, 0x00, 0x01]
        );
        assert_eq!(decode::<IeLadnInformation>(&encoded).unwrap(), info);
    }

    #[test]
    fn test_ladn_information_too_short() {
        let info = IeLadnInformation::default();
        let mut buf = BitBuffer::new();
        assert!(matches!(
            info.nas_encode(&mut buf),
            Err(CodecError::LengthOutOfBounds { length: 0, min: 12, .. })
        ));
    }

    #[test]
    fn test_reactivation_error_cause_pairs() {
        let ie = IePduSessionReactivationResultErrorCause::new(vec![
            PduSessionErrorCause {
                psi: 5,
                cause: MmCause::from(0x5Au8),
            },
            PduSessionErrorCause {
                psi: 6,
                cause: MmCause::from(0x1Bu8),
            },
        ]);
        let encoded = encode(&ie);
        assert_eq!(encoded, vec![0x00, 0x04, 0x05, 0x5A, 0x06, 0x1B]);
        assert_eq!(
            decode::<IePduSessionReactivationResultErrorCause>(&encoded).unwrap(),
            ie
        );
    }
}
