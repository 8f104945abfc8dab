//! NAS Information Elements (IEs)
//!
//! This module contains implementations of NAS Information Elements
//! as defined in 3GPP TS 24.501.
//!
//! ## IE Types
//!
//! - Type 1: Half-octet (4 bits) - [`ie1`]
//! - Type 3: Fixed length - [`ie3`]
//! - Type 4: Variable length (TLV) - [`ie4`]
//! - Type 6: Variable length (TLV-E) - [`ie6`]
//!
//! IEs with richer contents live in their own modules: capability
//! bitmaps in [`capability`], PLMN/TAI lists and service areas in
//! [`area`], slice information in [`nssai`], and the choice IEs
//! [`mobile_identity`] and [`pdu_address`].
//!
//! Every IE encodes its value part only. The enclosing message writes the
//! IEI of optional IEs.

/// Declares an IE whose contents are carried as an uninterpreted octet
/// string inside a length-prefixed envelope.
macro_rules! opaque_ie {
    ($(#[$doc:meta])* $name:ident, $envelope:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            /// Contents octets
            pub value: Vec<u8>,
        }

        impl $name {
            /// Length field and bounds
            pub const ENVELOPE: $crate::codec::Envelope = $envelope;

            /// Create from contents octets
            pub fn new(value: Vec<u8>) -> Self {
                Self { value }
            }
        }

        impl $crate::codec::NasEncode for $name {
            fn nas_encode(
                &self,
                buf: &mut ::nextgsim_common::BitBuffer,
            ) -> $crate::codec::CodecResult<()> {
                Self::ENVELOPE.encode(buf, |b| {
                    b.write_octets(&self.value);
                    Ok(())
                })
            }
        }

        impl $crate::codec::NasDecode for $name {
            fn nas_decode(
                buf: &mut ::nextgsim_common::BitBufferReader<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                Self::ENVELOPE.decode(buf, |r, length| Ok(Self::new(r.read_octets(length)?)))
            }
        }
    };
}

/// Declares a TLV IE whose contents are a fixed-size octet array.
macro_rules! fixed_octets_ie {
    ($(#[$doc:meta])* $name:ident, $ie_name:literal, $len:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            /// Contents octets
            pub value: [u8; $len],
        }

        impl $name {
            /// Length field and bounds
            pub const ENVELOPE: $crate::codec::Envelope =
                $crate::codec::Envelope::tlv($ie_name, $len, $len);

            /// Create from contents octets
            pub fn new(value: [u8; $len]) -> Self {
                Self { value }
            }
        }

        impl $crate::codec::NasEncode for $name {
            fn nas_encode(
                &self,
                buf: &mut ::nextgsim_common::BitBuffer,
            ) -> $crate::codec::CodecResult<()> {
                Self::ENVELOPE.encode(buf, |b| {
                    b.write_octets(&self.value);
                    Ok(())
                })
            }
        }

        impl $crate::codec::NasDecode for $name {
            fn nas_decode(
                buf: &mut ::nextgsim_common::BitBufferReader<'_>,
            ) -> $crate::codec::CodecResult<Self> {
                Self::ENVELOPE.decode(buf, |r, _| Ok(Self::new(r.read_array::<$len>()?)))
            }
        }
    };
}

pub mod area;
pub mod capability;
pub mod ie1;
pub mod ie3;
pub mod ie4;
pub mod ie6;
pub mod mobile_identity;
pub mod nssai;
pub mod pdu_address;
pub mod plmn;

pub use area::*;
pub use capability::*;
pub use ie1::*;
pub use ie3::*;
pub use ie4::*;
pub use ie6::*;
pub use mobile_identity::*;
pub use nssai::*;
pub use pdu_address::*;
pub use plmn::*;
