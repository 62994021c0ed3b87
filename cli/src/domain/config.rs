//! Domain types and validators for the collector configuration.
//!
//! Deserialized from `collector-conf.yaml`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::ConfigError;
use crate::domain::value::ConfValue;

// ── Coalesce format ──────────────────────────────────────────────────────────

/// How a new value is combined with the value already in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CoalesceFormat {
    /// Not declared; replaced by [`CoalesceFormat::Csv`] during validation.
    #[default]
    Unknown,
    Json,
    Csv,
    BitwiseOr,
}

impl CoalesceFormat {
    /// Token separator for the delimited-list formats.
    #[must_use]
    pub fn separator(self) -> Option<&'static str> {
        match self {
            Self::Csv => Some(","),
            Self::BitwiseOr => Some("|"),
            Self::Json | Self::Unknown => None,
        }
    }
}

impl FromStr for CoalesceFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" | "," => Ok(Self::Csv),
            "bitor" | "|" => Ok(Self::BitwiseOr),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for CoalesceFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoalesceFormat> for String {
    fn from(format: CoalesceFormat) -> Self {
        format.to_string()
    }
}

impl fmt::Display for CoalesceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::BitwiseOr => "bitOR",
            Self::Unknown => "unknown",
        })
    }
}

// ── Config schema ────────────────────────────────────────────────────────────

/// One desired `agent.conf` setting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigEntry {
    /// Property key, matched verbatim against the text before the first `=`.
    pub key: String,
    /// When `true` the value is picked per collector index from `values`
    /// or `values_list`.
    pub discrete: bool,
    pub value: ConfValue,
    pub values: Vec<ConfValue>,
    pub values_list: Vec<Vec<Value>>,
    pub coalesce_format: CoalesceFormat,
    /// Reserved; carried through but not interpreted.
    pub force_quote: bool,
    /// Keep items of the existing value instead of replacing them.
    pub dont_override: bool,
}

impl ConfigEntry {
    /// Entry with a single shared value and the default format.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<ConfValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            coalesce_format: CoalesceFormat::Csv,
            ..Self::default()
        }
    }
}

/// Top-level collector configuration, usually `collector-conf.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectorConf {
    /// Forces the collector index instead of deriving it from the hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_index: Option<usize>,
    /// Settings merged into `agent.conf`.
    #[serde(rename = "agent.conf")]
    pub agent_conf: Vec<ConfigEntry>,
}

impl CollectorConf {
    /// Validate entries and fill in defaults.
    ///
    /// Every entry must have a non-empty, unique key. An undeclared coalesce
    /// format becomes [`CoalesceFormat::Csv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty or duplicated key.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let mut seen = IndexSet::new();
        for (position, entry) in self.agent_conf.iter_mut().enumerate() {
            if entry.key.is_empty() {
                return Err(ConfigError::EmptyKey { position });
            }
            if !seen.insert(entry.key.clone()) {
                return Err(ConfigError::DuplicateKey(entry.key.clone()));
            }
            if entry.coalesce_format == CoalesceFormat::Unknown {
                entry.coalesce_format = CoalesceFormat::Csv;
            }
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
