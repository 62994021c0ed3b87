//! Unit tests for configuration loading, index resolution and masking.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use collector_bootstrap::application::services::config_service::{
    load_config, masked_config, resolve_index,
};
use collector_bootstrap::domain::error::{ConfigError, IndexError};
use collector_bootstrap::domain::{CoalesceFormat, CollectorConf, ConfigEntry};
use collector_bootstrap::infra::config::YamlConfigStore;
use serde_json::json;
use tempfile::TempDir;

use crate::helpers::{FixedHost, MemoryStore, NoHost, csv};

// ── resolve_index ────────────────────────────────────────────────────────────

#[test]
fn test_resolve_index_prefers_explicit_override() {
    let conf = CollectorConf {
        debug_index: Some(4),
        ..CollectorConf::default()
    };
    let index = resolve_index(Some(7), &conf, &FixedHost("collector-2")).unwrap();
    assert_eq!(index, 7);
}

#[test]
fn test_resolve_index_uses_debug_index_before_hostname() {
    let conf = CollectorConf {
        debug_index: Some(4),
        ..CollectorConf::default()
    };
    let index = resolve_index(None, &conf, &NoHost).unwrap();
    assert_eq!(index, 4);
}

#[test]
fn test_resolve_index_from_statefulset_hostname() {
    let index = resolve_index(None, &CollectorConf::default(), &FixedHost("lm-collector-12")).unwrap();
    assert_eq!(index, 12);
}

#[test]
fn test_resolve_index_fails_without_ordinal() {
    let err = resolve_index(None, &CollectorConf::default(), &FixedHost("workstation"))
        .expect_err("no ordinal");
    assert!(matches!(
        err.downcast_ref::<IndexError>(),
        Some(IndexError::NoOrdinal(_))
    ));
    assert!(format!("{err:#}").contains("cannot retrieve collector index"));
}

#[test]
fn test_resolve_index_fails_when_hostname_unavailable() {
    let err = resolve_index(None, &CollectorConf::default(), &NoHost).expect_err("no host");
    assert!(format!("{err:#}").contains("hostname unavailable"));
}

// ── load_config ──────────────────────────────────────────────────────────────

#[test]
fn test_load_config_defaults_missing_format_to_csv() {
    let mut entry = csv("k", json!("v"));
    entry.coalesce_format = CoalesceFormat::Unknown;
    let store = MemoryStore(CollectorConf {
        debug_index: None,
        agent_conf: vec![entry],
    });

    let conf = load_config(&store).unwrap();

    assert_eq!(conf.agent_conf[0].coalesce_format, CoalesceFormat::Csv);
}

#[test]
fn test_load_config_rejects_duplicate_keys() {
    let store = MemoryStore(CollectorConf {
        debug_index: None,
        agent_conf: vec![csv("k", json!("1")), csv("k", json!("2"))],
    });

    let err = load_config(&store).expect_err("duplicate key");

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::DuplicateKey("k".to_string()))
    );
    assert!(format!("{err:#}").contains("memory.yaml"));
}

#[test]
fn test_load_config_rejects_empty_key() {
    let store = MemoryStore(CollectorConf {
        debug_index: None,
        agent_conf: vec![csv("a", json!("1")), ConfigEntry::default()],
    });

    let err = load_config(&store).expect_err("empty key");

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::EmptyKey { position: 1 })
    );
}

#[test]
fn test_load_config_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collector-conf.yaml");
    std::fs::write(
        &path,
        r"
debugIndex: 1
agent.conf:
  - key: collector.groups
    value: [a, b]
    coalesceFormat: bitOR
    dontOverride: true
  - key: collector.id
    discrete: true
    values: ['10', '11']
",
    )
    .unwrap();

    let conf = load_config(&YamlConfigStore::new(Some(path))).unwrap();

    assert_eq!(conf.debug_index, Some(1));
    assert_eq!(conf.agent_conf.len(), 2);
    assert_eq!(conf.agent_conf[0].coalesce_format, CoalesceFormat::BitwiseOr);
    assert!(conf.agent_conf[0].dont_override);
    assert!(conf.agent_conf[1].discrete);
    assert_eq!(conf.agent_conf[1].coalesce_format, CoalesceFormat::Csv);
}

#[test]
fn test_load_config_reports_unknown_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("collector-conf.yaml");
    std::fs::write(
        &path,
        "agent.conf:\n  - key: k\n    value: v\n    coalesceFormat: xml\n",
    )
    .unwrap();

    let err = load_config(&YamlConfigStore::new(Some(path))).expect_err("bad format");

    assert!(format!("{err:#}").contains("xml"), "got: {err:#}");
}

// ── masked_config ────────────────────────────────────────────────────────────

#[test]
fn test_masked_config_hides_sensitive_values() {
    let conf = CollectorConf {
        debug_index: None,
        agent_conf: vec![csv("access.key", json!("abcdefgh")), csv("collector.id", json!("7"))],
    };

    let masked = masked_config(&conf).unwrap();

    let entries = masked["agent.conf"].as_array().unwrap();
    assert_eq!(entries[0]["key"], "access.key");
    assert_eq!(entries[0]["value"], "ab******");
    assert_eq!(entries[1]["value"], "7");
}
