//! NAS 5GSM (Session Management) Messages
//!
//! This module contains implementations of 5G Session Management messages
//! as defined in 3GPP TS 24.501. Bodies start after the 5GSM header
//! (EPD, PDU session identity, PTI, message type).
//!
//! ## Message Categories
//!
//! - PDU Session Establishment messages - [`pdu_session_establishment`]
//! - PDU Session Authentication messages - [`pdu_session_authentication`]
//! - PDU Session Modification messages - [`pdu_session_modification`]
//! - PDU Session Release messages - [`pdu_session_release`]
//! - 5GSM Status

pub mod pdu_session_authentication;
pub mod pdu_session_establishment;
pub mod pdu_session_modification;
pub mod pdu_session_release;
pub mod status;

pub use pdu_session_authentication::*;
pub use pdu_session_establishment::*;
pub use pdu_session_modification::*;
pub use pdu_session_release::*;
pub use status::*;
