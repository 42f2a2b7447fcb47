//! CLI configuration

use anyhow::{Context, Result};
use reel_playback::ControllerConfig;
use reel_server_client::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File read when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "reel.toml";

/// Environment variable prefix (`REEL_SERVER_URL`, `REEL_UPLOAD_DELAY`, ...)
const ENV_PREFIX: &str = "REEL";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub upload: UploadSettings,

    #[serde(default)]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    /// Pause between files of a batch, in milliseconds
    #[serde(default = "default_delay")]
    pub delay: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Initial volume, 0.0 - 1.0
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Simulated clip length for the walk-through, in seconds
    #[serde(default = "default_clip")]
    pub clip: f64,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `reel.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables
        settings = settings.add_source(
            config::Environment::with_prefix(prefix)
                .separator("_")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Connection settings for the server client
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone())
            .with_timeout(Duration::from_secs(self.server.timeout))
            .with_upload_delay(Duration::from_millis(self.upload.delay))
    }

    /// Controller settings for the walk-through
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            default_volume: self.player.volume.clamp(0.0, 1.0),
            ..ControllerConfig::default()
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            delay: default_delay(),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            clip: default_clip(),
        }
    }
}

// Default values
fn default_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_delay() -> u64 {
    100
}

fn default_volume() -> f64 {
    0.5
}

fn default_clip() -> f64 {
    30.0
}
