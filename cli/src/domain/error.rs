//! Typed domain error enums.
//!
//! Services wrap these in `anyhow::Error` with context; callers that need to
//! react to a specific failure downcast back to the enum.

use std::path::PathBuf;

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while parsing or validating the collector configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("agent.conf entry #{position} has an empty key")]
    EmptyKey { position: usize },

    #[error("agent.conf key '{0}' is declared more than once")]
    DuplicateKey(String),

    #[error("unknown coalesce format: {0}\n\nValid formats: json, csv, bitOR")]
    UnknownFormat(String),
}

// ── Apply errors ──────────────────────────────────────────────────────────────

/// Errors raised while merging into or rewriting the properties file.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("file changed after read: {}", path.display())]
    FileChanged { path: PathBuf },

    #[error("properties content is not valid UTF-8 (first bad byte at offset {offset})")]
    NotUtf8 { offset: usize },
}

// ── Index errors ──────────────────────────────────────────────────────────────

/// Errors raised while deriving the collector index from host identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("hostname '{0}' has no numeric ordinal suffix (expected e.g. 'collector-0')")]
    NoOrdinal(String),
}
