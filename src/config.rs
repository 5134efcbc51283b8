use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::compression::DEFAULT_CHUNK_SIZE;
use crate::error::{PromptError, Result};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "promptsmith.yaml";

/// Overrides `shortlink.base_url`.
pub const BASE_URL_ENV: &str = "PROMPTSMITH_BASE_URL";

/// Configuration for the whole tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmithConfig {
    pub shortlink: ShortlinkConfig,
    pub compression: CompressionConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortlinkConfig {
    /// Page location shortlinks are built against; only origin and path are used.
    pub base_url: String,
}

impl Default for ShortlinkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Prefer the streaming backend when the runtime allows it.
    pub streaming: bool,
    /// Upper bound on the size of each streamed chunk, in bytes.
    pub chunk_size: usize,
    /// gzip level, 0-9.
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            streaming: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            level: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub file_name: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: "prompt.xml".to_string(),
        }
    }
}

impl SmithConfig {
    /// Load from `path`, or from `./promptsmith.yaml` if present, falling back
    /// to defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate: Option<PathBuf> = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut config = match candidate {
            Some(p) => {
                debug!(path = %p.display(), "loading config");
                Self::from_yaml(&std::fs::read_to_string(&p)?)?
            }
            None => Self::default(),
        };

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.shortlink.base_url = base_url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.compression.chunk_size == 0 {
            return Err(PromptError::Config(
                "compression.chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.compression.level > 9 {
            return Err(PromptError::Config(format!(
                "compression.level must be between 0 and 9, got {}",
                self.compression.level
            )));
        }
        self.base_url()?;
        if self.download.file_name.trim().is_empty() {
            return Err(PromptError::Config(
                "download.file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured page location.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.shortlink.base_url).map_err(|e| {
            PromptError::Config(format!(
                "shortlink.base_url '{}' is not a valid URL: {}",
                self.shortlink.base_url, e
            ))
        })
    }
}
