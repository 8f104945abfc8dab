//! Logging for the NAS codec
//!
//! Subscriber bootstrap on top of `tracing-subscriber`, plus the PDU
//! logging helpers the codec calls on every pack and unpack when hex
//! dumps are enabled.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::config::CodecConfig;
use crate::error::Error;

/// Octets per line of [`format_hex_dump`]
const DUMP_LINE_OCTETS: usize = 16;

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level, includes PDU hex dumps
    Trace,
    /// Debug level, one line per PDU
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level, unknown IEIs and ignored messages
    Warn,
    /// Error level
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(Error::Config(format!("unknown log level: {s}"))),
        }
    }
}

/// Installs the global subscriber at `level`.
///
/// `RUST_LOG` takes precedence when set. Fails if a subscriber is already
/// installed.
///
/// # Example
///
/// ```
/// use nextgsim_common::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug).unwrap();
/// assert!(init_logging(LogLevel::Info).is_err());
/// ```
pub fn init_logging(level: LogLevel) -> Result<(), Error> {
    init_logging_with_filter(level.as_str())
}

/// Installs the global subscriber with a filter directive such as
/// `"info,nextgsim_nas=trace"`. `RUST_LOG` takes precedence when set.
pub fn init_logging_with_filter(filter: &str) -> Result<(), Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(env) => env,
        Err(_) => EnvFilter::try_new(filter)
            .map_err(|e| Error::Config(format!("invalid log filter {filter:?}: {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {e}")))
}

/// Installs the global subscriber at the configured level. Hex dumps are
/// emitted at trace level, so `hex_dump` raises the NAS codec's target to
/// trace.
pub fn init_from_config(config: &CodecConfig) -> Result<(), Error> {
    if config.hex_dump {
        init_logging_with_filter(&format!("{},nextgsim_nas=trace", config.log_level))
    } else {
        init_logging(config.log_level)
    }
}

/// Direction of a PDU relative to the codec's caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Decoded from the wire
    Rx,
    /// Encoded for the wire
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => f.write_str("RX"),
            Direction::Tx => f.write_str("TX"),
        }
    }
}

/// Logs a PDU summary at debug level and its hex dump at trace level.
///
/// ```
/// use nextgsim_common::logging::{log_protocol_message, Direction};
///
/// log_protocol_message("NAS", Direction::Rx, "Registration request", &[0x7e, 0x00, 0x41]);
/// ```
pub fn log_protocol_message(protocol: &str, direction: Direction, msg_type: &str, data: &[u8]) {
    tracing::debug!(
        protocol,
        direction = %direction,
        msg_type,
        len = data.len(),
        "{direction} {protocol} message"
    );
    if tracing::enabled!(Level::TRACE) {
        tracing::trace!(protocol, "{msg_type} PDU:\n{}", format_hex_dump(data));
    }
}

/// Logs a whole NAS PDU
pub fn log_nas_message(direction: Direction, msg_type: &str, data: &[u8]) {
    log_protocol_message("NAS", direction, msg_type, data);
}

/// Displays octets as space separated hex pairs (`7e 00 41`)
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{octet:02x}")?;
        }
        Ok(())
    }
}

/// Formats octets as offset-prefixed lines of sixteen.
///
/// ```
/// use nextgsim_common::logging::format_hex_dump;
///
/// let dump = format_hex_dump(&[0x7e, 0x00, 0x43]);
/// assert_eq!(dump, "0000  7e 00 43");
/// ```
pub fn format_hex_dump(data: &[u8]) -> String {
    if data.is_empty() {
        return String::from("(empty)");
    }

    let mut out = String::with_capacity(data.len() * 3 + data.len() / DUMP_LINE_OCTETS * 7);
    for (line, chunk) in data.chunks(DUMP_LINE_OCTETS).enumerate() {
        if line > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{:04x}  {}", line * DUMP_LINE_OCTETS, HexDump(chunk));
    }
    out
}

/// Formats octets as a compact hex string, optionally split into groups of
/// `group_size` octets (0 for no grouping).
///
/// ```
/// use nextgsim_common::logging::format_hex_compact;
///
/// assert_eq!(format_hex_compact(&[0x6f, 0x03, 0x25, 0xf5], 0), "6f0325f5");
/// assert_eq!(format_hex_compact(&[0x6f, 0x03, 0x25, 0xf5], 2), "6f03 25f5");
/// ```
pub fn format_hex_compact(data: &[u8], group_size: usize) -> String {
    if group_size == 0 {
        return hex::encode(data);
    }

    data.chunks(group_size)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!(matches!("verbose".parse::<LogLevel>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_log_level_round_trips_through_display() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_log_level_serde() {
        let level: LogLevel = serde_yaml::from_str("trace").unwrap();
        assert_eq!(level, LogLevel::Trace);
        assert_eq!(serde_yaml::to_string(&LogLevel::Warn).unwrap().trim(), "warn");
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Rx.to_string(), "RX");
        assert_eq!(Direction::Tx.to_string(), "TX");
    }

    #[test]
    fn test_hex_dump_wrapper() {
        assert_eq!(HexDump(&[0x7e, 0x00, 0x41]).to_string(), "7e 00 41");
        assert_eq!(HexDump(&[]).to_string(), "");
    }

    #[test]
    fn test_format_hex_dump_lines() {
        assert_eq!(format_hex_dump(&[]), "(empty)");

        let data: Vec<u8> = (0..20).collect();
        let dump = format_hex_dump(&data);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000  00 01 02"));
        assert!(lines[0].ends_with("0e 0f"));
        assert_eq!(lines[1], "0010  10 11 12 13");
    }

    #[test]
    fn test_format_hex_compact() {
        let mac = [0x6f, 0x03, 0x25, 0xf5];
        assert_eq!(format_hex_compact(&mac, 0), "6f0325f5");
        assert_eq!(format_hex_compact(&mac, 1), "6f 03 25 f5");
        assert_eq!(format_hex_compact(&mac, 3), "6f0325 f5");
    }

    #[test]
    fn test_log_nas_message_without_subscriber() {
        // No subscriber installed: must be a silent no-op
        log_nas_message(Direction::Tx, "Registration complete", &[0x7e, 0x00, 0x43]);
    }
}
