use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::client::SubmitPolicy;
use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_WARMUP_MS: u64 = 10_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_API_URL: &str = "BIOSTRATA_API_URL";
pub const ENV_WARMUP_MS: &str = "BIOSTRATA_WARMUP_MS";
pub const ENV_TIMEOUT_SECS: &str = "BIOSTRATA_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "BIOSTRATA_EXPORT_DIR";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub warmup_ms: u64,
    /// Zero disables the request timeout.
    pub request_timeout_secs: u64,
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            warmup_ms: DEFAULT_WARMUP_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            export_dir: default_export_dir(),
        }
    }
}

/// One partial layer: config file, environment or command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    pub api_url: Option<String>,
    pub warmup_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    /// defaults < config file < environment < command line
    pub fn load(config: Option<&Path>, cli: SettingsLayer) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        if let Some(path) = config {
            settings.apply(read_layer(path)?);
        }
        settings.apply(env_layer(|var| std::env::var(var).ok())?);
        settings.apply(cli);
        debug!(
            api_url = %settings.api_url,
            warmup_ms = settings.warmup_ms,
            timeout_secs = settings.request_timeout_secs,
            "settings resolved"
        );
        Ok(settings)
    }

    pub fn apply(&mut self, layer: SettingsLayer) {
        if let Some(api_url) = layer.api_url {
            self.api_url = api_url;
        }
        if let Some(warmup_ms) = layer.warmup_ms {
            self.warmup_ms = warmup_ms;
        }
        if let Some(timeout) = layer.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(dir) = layer.export_dir {
            self.export_dir = Some(dir);
        }
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        SubmitPolicy {
            warmup: Duration::from_millis(self.warmup_ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

pub fn read_layer(path: &Path) -> Result<SettingsLayer, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|err| ConfigError::Json {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Reads the `BIOSTRATA_*` variables through `lookup`. Blank values are ignored.
pub fn env_layer(lookup: impl Fn(&str) -> Option<String>) -> Result<SettingsLayer, ConfigError> {
    let read = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
    Ok(SettingsLayer {
        api_url: read(ENV_API_URL),
        warmup_ms: read(ENV_WARMUP_MS)
            .map(|value| parse_u64(ENV_WARMUP_MS, &value))
            .transpose()?,
        request_timeout_secs: read(ENV_TIMEOUT_SECS)
            .map(|value| parse_u64(ENV_TIMEOUT_SECS, &value))
            .transpose()?,
        export_dir: read(ENV_EXPORT_DIR).map(PathBuf::from),
    })
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        var,
        value: value.to_string(),
    })
}

pub fn default_export_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "BioStrata", "BioStrata")
        .map(|dirs| dirs.data_dir().join("exports"))
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
