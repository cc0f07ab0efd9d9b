use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::DEFAULT_READ_BUFFER_SIZE;

/// Smallest read buffer that still fits a minimal request line.
pub const MIN_READ_BUFFER_SIZE: usize = 16;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_PATH_VAR: &str = "RAWHTTP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub read_buffer_size: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:42069".to_string(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `RAWHTTP_CONFIG` (if any), then applies
    /// `LISTEN`, `READ_BUFFER_SIZE` and `LOG_LEVEL` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_env_with(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.listen_addr = addr;
        }
        if let Some(size) = lookup("READ_BUFFER_SIZE") {
            self.read_buffer_size = size
                .trim()
                .parse()
                .with_context(|| format!("READ_BUFFER_SIZE is not a number: {size:?}"))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.read_buffer_size >= MIN_READ_BUFFER_SIZE,
            "read_buffer_size must be at least {MIN_READ_BUFFER_SIZE} bytes, got {}",
            self.read_buffer_size
        );
        self.max_level()?;
        Ok(())
    }

    pub fn max_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log_level))
    }
}
