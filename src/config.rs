//! Configuration persistence
//!
//! Holds the deployment settings the CLI needs: whether rules are shipped
//! through an agent server or translated for direct-mode devices, and where
//! the agent lives. Saved as JSON under the XDG data directory with the
//! atomic write pattern (temp file, restrictive permissions, rename).

use crate::utils::get_data_dir;
use serde::{Deserialize, Serialize};

/// How templates are delivered to a device
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Send CLI-flag lines as-is to an intermediary agent server
    #[default]
    #[strum(serialize = "agent")]
    Agent,
    /// Translate smartfw-formatted templates for devices without an agent
    #[strum(serialize = "direct")]
    Direct,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub deploy_mode: DeployMode,
    /// Agent server address, used only in agent mode
    #[serde(default = "default_agent_addr")]
    pub agent_addr: String,
    /// Version stamped on newly created templates
    #[serde(default = "default_template_version")]
    pub template_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deploy_mode: DeployMode::Agent,
            agent_addr: default_agent_addr(),
            template_version: default_template_version(),
        }
    }
}

fn default_agent_addr() -> String {
    "127.0.0.1:8181".to_string()
}

fn default_template_version() -> String {
    "1.0.0".to_string()
}

/// Saves the app config to disk using an atomic write pattern.
/// 1. Writes to a temporary file.
/// 2. Sets restrictive permissions (0o600).
/// 3. Atomically renames to the target path.
///
/// # Async
/// Uses `tokio::fs` for non-blocking I/O.
pub async fn save_config(config: &AppConfig) -> std::io::Result<()> {
    if let Some(mut path) = get_data_dir() {
        let json = serde_json::to_string_pretty(config)?;

        let mut temp_path = path.clone();
        temp_path.push("config.json.tmp");

        path.push("config.json");

        // Create file with restrictive permissions from the start to prevent
        // a window where the file is world-readable
        #[cfg(unix)]
        {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .mode(0o600)
                .open(&temp_path)
                .await?;

            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?;
        }

        #[cfg(not(unix))]
        {
            use tokio::io::AsyncWriteExt;

            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(json.as_bytes()).await?;
            file.sync_all().await?;
        }

        tokio::fs::rename(temp_path, path).await?;
    }
    Ok(())
}

/// Loads the app config from disk, or returns default if not found.
pub async fn load_config() -> AppConfig {
    if let Some(mut path) = get_data_dir() {
        path.push("config.json");
        if let Ok(json) = tokio::fs::read_to_string(&path).await
            && let Ok(config) = serde_json::from_str::<AppConfig>(&json)
        {
            return config;
        }
    }
    AppConfig::default()
}
