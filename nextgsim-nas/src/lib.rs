//! NAS (Non-Access Stratum) protocol library
//!
//! Implements bit-exact 5G NAS message encoding/decoding for:
//! - 5GMM (Mobility Management)
//! - 5GSM (Session Management)
//!
//! # Overview
//!
//! This crate provides types and functions for working with 5G NAS messages
//! as defined in 3GPP TS 24.501. Ciphering and integrity protection are not
//! performed: MAC and sequence number are carried through untouched.
//!
//! # Message Structure
//!
//! NAS messages consist of:
//! - A header (plain, or security protected followed by a plain header)
//! - Message-specific information elements (IEs): mandatory IEs in fixed
//!   order, then optional IEs each introduced by its IEI
//!
//! ## Header Types
//!
//! - [`PlainMmHeader`]: Plain 5GMM message header (3 bytes)
//! - [`PlainSmHeader`]: Plain 5GSM message header (4 bytes)
//! - [`SecuredHeader`]: Security protected header (7 bytes)
//!
//! # Example
//!
//! ```rust
//! use nextgsim_nas::messages::DeregistrationRequestUeOriginating;
//! use nextgsim_nas::{NasMessage, SecurityHeaderType};
//!
//! let data = [
//!     0x7E, 0x01, 0x6F, 0x03, 0x25, 0xF5, 0x02, 0x7E, 0x00, 0x45, 0x09, 0x00, 0x0B, 0x02, 0x00,
//!     0xF1, 0x10, 0xCA, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x01,
//! ];
//! let msg = nextgsim_nas::unpack_outer_hdr(&data).unwrap();
//! assert_eq!(msg.security_header_type(), SecurityHeaderType::IntegrityProtected);
//!
//! let msg = NasMessage::unpack(&data).unwrap().message().unwrap();
//! let dereg = msg.body_as::<DeregistrationRequestUeOriginating>().unwrap();
//! assert!(dereg.is_switch_off());
//! assert_eq!(&msg.pack().unwrap()[..], &data[..]);
//! ```

pub mod codec;
pub mod enums;
pub mod header;
pub mod ies;
pub mod message;
pub mod messages;

#[cfg(test)]
mod capture_tests;

// Re-export commonly used types
pub use codec::{CodecError, CodecResult, NasDecode, NasEncode};
pub use enums::{ExtendedProtocolDiscriminator, MessageType, SecurityHeaderType};
pub use header::{NasHeader, OuterHeader, PlainHeader, PlainMmHeader, PlainSmHeader, SecuredHeader};
pub use message::{unpack_outer_hdr, BodyVariant, DecodeOutcome, NasBody, NasMessage};
pub use messages::NasMessageBody;
pub use nextgsim_common::{CodecConfig, UnknownIeiPolicy};
