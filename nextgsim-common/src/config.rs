//! Codec configuration
//!
//! Runtime knobs for the NAS codec, loadable from YAML:
//!
//! ```yaml
//! unknown_iei_policy: skip_tlv
//! log_level: debug
//! hex_dump: true
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::logging::LogLevel;

/// How a message decoder reacts to an optional IE whose IEI it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownIeiPolicy {
    /// Log a warning and continue reading the next tag without skipping
    /// any payload. Bit-compatible with existing captures, but an unknown
    /// IE carrying a payload desynchronises the remaining optional IEs.
    #[default]
    Ignore,
    /// Log a warning and skip the unknown IE using the framing implied by
    /// its IEI: the 4-bit value of a half-octet IEI, a 16-bit length for
    /// IEIs 0x70-0x7F, an 8-bit length otherwise.
    SkipTlv,
    /// Fail the decode.
    Reject,
}

impl fmt::Display for UnknownIeiPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownIeiPolicy::Ignore => write!(f, "ignore"),
            UnknownIeiPolicy::SkipTlv => write!(f, "skip_tlv"),
            UnknownIeiPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// NAS codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Treatment of unrecognised optional IEIs
    #[serde(default)]
    pub unknown_iei_policy: UnknownIeiPolicy,
    /// Log level used by [`crate::logging::init_logging`]
    #[serde(default)]
    pub log_level: LogLevel,
    /// Emit trace-level hex dumps of every packed/unpacked PDU
    #[serde(default)]
    pub hex_dump: bool,
}

impl CodecConfig {
    /// Creates a configuration with the given unknown-IEI policy and
    /// defaults for everything else.
    pub fn with_policy(unknown_iei_policy: UnknownIeiPolicy) -> Self {
        Self {
            unknown_iei_policy,
            ..Self::default()
        }
    }

    /// Parses a configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Loads a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}
