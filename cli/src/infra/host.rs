//! Infrastructure implementation of the `HostIdentity` port.

use anyhow::{Context, Result};

use crate::application::ports::HostIdentity;

/// Reads the host name from the operating system.
pub struct SystemHost;

impl HostIdentity for SystemHost {
    fn hostname(&self) -> Result<String> {
        let name = hostname::get().context("cannot read hostname")?;
        name.into_string()
            .map_err(|raw| anyhow::anyhow!("hostname is not valid UTF-8: {}", raw.to_string_lossy()))
    }
}
