//! 5GMM (5G Mobility Management) Messages
//!
//! This module contains implementations of 5GMM messages
//! as defined in 3GPP TS 24.501 Section 8.2.
//!
//! ## Registration Messages
//!
//! - [`RegistrationRequest`] - UE to network registration request
//! - [`RegistrationAccept`] - Network to UE registration accept
//! - [`RegistrationReject`] - Network to UE registration reject
//! - [`RegistrationComplete`] - UE to network registration complete
//!
//! ## Deregistration Messages
//!
//! - [`DeregistrationRequestUeOriginating`] - UE to network deregistration request
//! - [`DeregistrationAcceptUeOriginating`] - Network to UE deregistration accept
//! - [`DeregistrationRequestUeTerminated`] - Network to UE deregistration request
//! - [`DeregistrationAcceptUeTerminated`] - UE to network deregistration accept
//!
//! ## Service Messages
//!
//! - [`ServiceRequest`] - UE to network service request
//! - [`ServiceAccept`] - Network to UE service accept
//! - [`ServiceReject`] - Network to UE service reject
//!
//! ## Configuration Update Messages
//!
//! - [`ConfigurationUpdateCommand`] - Network to UE configuration update
//! - [`ConfigurationUpdateComplete`] - UE to network acknowledgement
//!
//! ## Authentication Messages
//!
//! - [`AuthenticationRequest`] - Network to UE authentication request
//! - [`AuthenticationResponse`] - UE to network authentication response
//! - [`AuthenticationReject`] - Network to UE authentication reject
//! - [`AuthenticationFailure`] - UE to network authentication failure
//! - [`AuthenticationResult`] - Network to UE authentication result
//!
//! ## Identity and Security Mode Messages
//!
//! - [`IdentityRequest`] / [`IdentityResponse`]
//! - [`SecurityModeCommand`] / [`SecurityModeComplete`] / [`SecurityModeReject`]
//!
//! ## Status Messages
//!
//! - [`FiveGMmStatus`] - 5GMM status message for error reporting
//!
//! ## NAS Transport Messages
//!
//! - [`UlNasTransport`] - UE to network NAS transport
//! - [`DlNasTransport`] - Network to UE NAS transport
//!
//! ## Notification Messages
//!
//! - [`Notification`] - Network to UE notification
//! - [`NotificationResponse`] - UE to network notification response

pub mod authentication;
pub mod configuration_update;
pub mod deregistration;
pub mod identity;
pub mod nas_transport;
pub mod notification;
pub mod registration;
pub mod security_mode;
pub mod service;
pub mod status;

pub use authentication::*;
pub use configuration_update::*;
pub use deregistration::*;
pub use identity::*;
pub use nas_transport::*;
pub use notification::*;
pub use registration::*;
pub use security_mode::*;
pub use service::*;
pub use status::*;
