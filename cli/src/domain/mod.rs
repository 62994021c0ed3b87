//! Domain layer — configuration schema, value coalescing and the properties merge.
//!
//! Nothing here touches the filesystem or the environment; every function
//! takes data in and returns data out.

pub mod builder;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod index;
pub mod mask;
pub mod properties;
pub mod value;

pub use config::{CoalesceFormat, CollectorConf, ConfigEntry};
pub use error::{ApplyError, ConfigError, IndexError};
pub use value::ConfValue;
