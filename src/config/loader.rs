//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// A relative `mock.fixture_root` is resolved against the directory the file
/// lives in, so the runtime root is independent of the working directory.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.mock.fixture_root = absolutize(base, &config.mock.fixture_root)
        .to_string_lossy()
        .into_owned();

    Ok(config)
}

/// Join `root` onto `base` unless it is already absolute, then anchor the
/// result at the current directory when `base` itself was relative.
pub fn absolutize(base: &Path, root: &str) -> PathBuf {
    let root = Path::new(root);
    let joined = if root.is_absolute() {
        root.to_path_buf()
    } else {
        base.join(root)
    };
    if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&joined))
            .unwrap_or(joined)
    }
}
