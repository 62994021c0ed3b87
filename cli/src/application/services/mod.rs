//! Application services — use-case orchestration over the port traits.

pub mod apply;
pub mod config_service;
