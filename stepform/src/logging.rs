use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::FormConfig;

/// Install the global subscriber: JSON in production, compact otherwise.
pub fn init_tracing(config: &FormConfig) -> Result<()> {
    let filter =
        EnvFilter::try_new(config.log_level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_target(false)
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;
    }

    Ok(())
}
