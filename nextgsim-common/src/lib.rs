//! Common types and utilities for nextgsim
//!
//! This crate provides the bit cursor, logging bootstrap and codec
//! configuration shared by the nextgsim NAS codec.

pub mod bit_buffer;
pub mod config;
pub mod error;
pub mod logging;

pub use bit_buffer::{bits_between, BitBuffer, BitBufferReader, BitError, BitResult};
pub use config::{CodecConfig, UnknownIeiPolicy};
pub use error::Error;
pub use logging::{
    init_from_config, init_logging, init_logging_with_filter, format_hex_compact, format_hex_dump,
    log_nas_message, log_protocol_message, Direction, HexDump, LogLevel,
};
