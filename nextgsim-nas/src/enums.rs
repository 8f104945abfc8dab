//! NAS protocol enumerations
//!
//! Based on 3GPP TS 24.501 specification. Every enumeration keeps a raw
//! `Unknown` fallback so that values without a named variant still decode
//! and re-encode bit-exactly.

use std::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};

/// Extended Protocol Discriminator (EPD)
/// 3GPP TS 24.501 Section 9.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum ExtendedProtocolDiscriminator {
    /// 5GS Mobility Management messages
    MobilityManagement = 0x7E,
    /// 5GS Session Management messages
    SessionManagement = 0x2E,
    /// Any other discriminator
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Security Header Type
/// 3GPP TS 24.501 Section 9.3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum SecurityHeaderType {
    /// Plain NAS message, not security protected
    NotProtected = 0x00,
    /// Integrity protected
    IntegrityProtected = 0x01,
    /// Integrity protected and ciphered
    IntegrityProtectedAndCiphered = 0x02,
    /// Integrity protected with new 5G NAS security context
    IntegrityProtectedWithNewSecurityContext = 0x03,
    /// Integrity protected and ciphered with new 5G NAS security context
    IntegrityProtectedAndCipheredWithNewSecurityContext = 0x04,
    /// Reserved value
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for SecurityHeaderType {
    fn default() -> Self {
        SecurityHeaderType::NotProtected
    }
}

impl SecurityHeaderType {
    /// Returns true if the message is security protected
    pub fn is_protected(&self) -> bool {
        !matches!(self, SecurityHeaderType::NotProtected)
    }

    /// Returns true if the message is ciphered
    pub fn is_ciphered(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedAndCiphered
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }

    /// Returns true if this indicates a new security context
    pub fn is_new_security_context(&self) -> bool {
        matches!(
            self,
            SecurityHeaderType::IntegrityProtectedWithNewSecurityContext
                | SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext
        )
    }
}

/// NAS message type (5GMM and 5GSM)
/// 3GPP TS 24.501 Section 9.7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum MessageType {
    // Registration messages
    RegistrationRequest = 0x41,
    RegistrationAccept = 0x42,
    RegistrationComplete = 0x43,
    RegistrationReject = 0x44,

    // Deregistration messages
    DeregistrationRequestUeOriginating = 0x45,
    DeregistrationAcceptUeOriginating = 0x46,
    DeregistrationRequestUeTerminated = 0x47,
    DeregistrationAcceptUeTerminated = 0x48,

    // Service request messages
    ServiceRequest = 0x4C,
    ServiceReject = 0x4D,
    ServiceAccept = 0x4E,

    // Configuration update messages
    ConfigurationUpdateCommand = 0x54,
    ConfigurationUpdateComplete = 0x55,

    // Authentication messages
    AuthenticationRequest = 0x56,
    AuthenticationResponse = 0x57,
    AuthenticationReject = 0x58,
    AuthenticationFailure = 0x59,
    AuthenticationResult = 0x5A,

    // Identity messages
    IdentityRequest = 0x5B,
    IdentityResponse = 0x5C,

    // Security mode messages
    SecurityModeCommand = 0x5D,
    SecurityModeComplete = 0x5E,
    SecurityModeReject = 0x5F,

    // Status and notification messages
    FiveGMmStatus = 0x64,
    Notification = 0x65,
    NotificationResponse = 0x66,

    // NAS transport messages
    UlNasTransport = 0x67,
    DlNasTransport = 0x68,

    // PDU session establishment messages
    PduSessionEstablishmentRequest = 0xC1,
    PduSessionEstablishmentAccept = 0xC2,
    PduSessionEstablishmentReject = 0xC3,

    // PDU session authentication messages
    PduSessionAuthenticationCommand = 0xC5,
    PduSessionAuthenticationComplete = 0xC6,
    PduSessionAuthenticationResult = 0xC7,

    // PDU session modification messages
    PduSessionModificationRequest = 0xC9,
    PduSessionModificationReject = 0xCA,
    PduSessionModificationCommand = 0xCB,
    PduSessionModificationComplete = 0xCC,
    PduSessionModificationCommandReject = 0xCD,

    // PDU session release messages
    PduSessionReleaseRequest = 0xD1,
    PduSessionReleaseReject = 0xD2,
    PduSessionReleaseCommand = 0xD3,
    PduSessionReleaseComplete = 0xD4,

    // 5GSM status
    FiveGSmStatus = 0xD6,

    /// Message type without a codec
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MessageType {
    /// Protocol the message type belongs to, `None` for unknown values
    pub fn epd(&self) -> Option<ExtendedProtocolDiscriminator> {
        match self {
            MessageType::Unknown(_) => None,
            other if u8::from(*other) >= 0xC1 => Some(ExtendedProtocolDiscriminator::SessionManagement),
            _ => Some(ExtendedProtocolDiscriminator::MobilityManagement),
        }
    }

    /// Returns true for 5GMM message types
    pub fn is_mm(&self) -> bool {
        self.epd() == Some(ExtendedProtocolDiscriminator::MobilityManagement)
    }

    /// Returns true for 5GSM message types
    pub fn is_sm(&self) -> bool {
        self.epd() == Some(ExtendedProtocolDiscriminator::SessionManagement)
    }

    /// 3GPP name of the message
    pub fn name(&self) -> &'static str {
        match self {
            MessageType::RegistrationRequest => "Registration request",
            MessageType::RegistrationAccept => "Registration accept",
            MessageType::RegistrationComplete => "Registration complete",
            MessageType::RegistrationReject => "Registration reject",
            MessageType::DeregistrationRequestUeOriginating => {
                "Deregistration request (UE originating)"
            }
            MessageType::DeregistrationAcceptUeOriginating => "Deregistration accept (UE originating)",
            MessageType::DeregistrationRequestUeTerminated => "Deregistration request (UE terminated)",
            MessageType::DeregistrationAcceptUeTerminated => "Deregistration accept (UE terminated)",
            MessageType::ServiceRequest => "Service request",
            MessageType::ServiceReject => "Service reject",
            MessageType::ServiceAccept => "Service accept",
            MessageType::ConfigurationUpdateCommand => "Configuration update command",
            MessageType::ConfigurationUpdateComplete => "Configuration update complete",
            MessageType::AuthenticationRequest => "Authentication request",
            MessageType::AuthenticationResponse => "Authentication response",
            MessageType::AuthenticationReject => "Authentication reject",
            MessageType::AuthenticationFailure => "Authentication failure",
            MessageType::AuthenticationResult => "Authentication result",
            MessageType::IdentityRequest => "Identity request",
            MessageType::IdentityResponse => "Identity response",
            MessageType::SecurityModeCommand => "Security mode command",
            MessageType::SecurityModeComplete => "Security mode complete",
            MessageType::SecurityModeReject => "Security mode reject",
            MessageType::FiveGMmStatus => "5GMM status",
            MessageType::Notification => "Notification",
            MessageType::NotificationResponse => "Notification response",
            MessageType::UlNasTransport => "UL NAS transport",
            MessageType::DlNasTransport => "DL NAS transport",
            MessageType::PduSessionEstablishmentRequest => "PDU session establishment request",
            MessageType::PduSessionEstablishmentAccept => "PDU session establishment accept",
            MessageType::PduSessionEstablishmentReject => "PDU session establishment reject",
            MessageType::PduSessionAuthenticationCommand => "PDU session authentication command",
            MessageType::PduSessionAuthenticationComplete => "PDU session authentication complete",
            MessageType::PduSessionAuthenticationResult => "PDU session authentication result",
            MessageType::PduSessionModificationRequest => "PDU session modification request",
            MessageType::PduSessionModificationReject => "PDU session modification reject",
            MessageType::PduSessionModificationCommand => "PDU session modification command",
            MessageType::PduSessionModificationComplete => "PDU session modification complete",
            MessageType::PduSessionModificationCommandReject => {
                "PDU session modification command reject"
            }
            MessageType::PduSessionReleaseRequest => "PDU session release request",
            MessageType::PduSessionReleaseReject => "PDU session release reject",
            MessageType::PduSessionReleaseCommand => "PDU session release command",
            MessageType::PduSessionReleaseComplete => "PDU session release complete",
            MessageType::FiveGSmStatus => "5GSM status",
            MessageType::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Unknown(raw) => write!(f, "Unknown message type 0x{raw:02X}"),
            known => f.write_str(known.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epd_values() {
        assert_eq!(u8::from(ExtendedProtocolDiscriminator::MobilityManagement), 0x7E);
        assert_eq!(
            ExtendedProtocolDiscriminator::from(0x2E),
            ExtendedProtocolDiscriminator::SessionManagement
        );
        assert_eq!(
            ExtendedProtocolDiscriminator::from(0x0F),
            ExtendedProtocolDiscriminator::Unknown(0x0F)
        );
    }

    #[test]
    fn test_security_header_type() {
        assert!(!SecurityHeaderType::NotProtected.is_protected());
        assert!(SecurityHeaderType::IntegrityProtected.is_protected());
        assert!(!SecurityHeaderType::IntegrityProtected.is_ciphered());
        assert!(SecurityHeaderType::IntegrityProtectedAndCiphered.is_ciphered());
        assert!(SecurityHeaderType::IntegrityProtectedWithNewSecurityContext.is_new_security_context());
        assert!(SecurityHeaderType::Unknown(0x0C).is_protected());
        assert_eq!(u8::from(SecurityHeaderType::Unknown(0x0C)), 0x0C);
        assert_eq!(SecurityHeaderType::from(0x04), SecurityHeaderType::IntegrityProtectedAndCipheredWithNewSecurityContext);
    }

    #[test]
    fn test_message_type_values() {
        assert_eq!(u8::from(MessageType::RegistrationRequest), 0x41);
        assert_eq!(u8::from(MessageType::ServiceReject), 0x4D);
        assert_eq!(u8::from(MessageType::ServiceAccept), 0x4E);
        assert_eq!(u8::from(MessageType::FiveGSmStatus), 0xD6);
        assert_eq!(MessageType::from(0x68), MessageType::DlNasTransport);
        assert_eq!(MessageType::from(0xFF), MessageType::Unknown(0xFF));
    }

    #[test]
    fn test_message_type_epd() {
        assert!(MessageType::RegistrationRequest.is_mm());
        assert!(MessageType::DlNasTransport.is_mm());
        assert!(MessageType::PduSessionEstablishmentRequest.is_sm());
        assert!(MessageType::FiveGSmStatus.is_sm());
        assert_eq!(MessageType::Unknown(0x50).epd(), None);
    }

    #[test]
    fn test_message_type_display() {
        assert_eq!(MessageType::RegistrationRequest.to_string(), "Registration request");
        assert_eq!(MessageType::FiveGMmStatus.to_string(), "5GMM status");
        assert_eq!(MessageType::Unknown(0x99).to_string(), "Unknown message type 0x99");
    }
}
