//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the config is loaded.

use tracing::{info, warn};

/// Load `.env` if present and report where configuration will come from.
///
/// A missing config file is not fatal: every setting has an environment
/// fallback, so only a warning is logged.
pub async fn ensure_env(config_path: &str) -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(anyhow::anyhow!("cannot read .env: {e}")),
    }
    if tokio::fs::metadata(config_path).await.is_err() {
        warn!(%config_path, "config file not found; falling back to environment variables");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_config_file_is_not_fatal() {
        assert!(ensure_env("/definitely/not/here/config.toml").await.is_ok());
    }
}
