//! Startup orchestration.
//!
//! # Responsibilities
//! - Apply command-line overrides on top of the loaded configuration
//! - Compile the mock rules into the runtime configuration
//! - Report whether interception is active and where fixtures live
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The global mock toggle is read once here and never again

use std::path::PathBuf;

use crate::config::loader::absolutize;
use crate::config::validation::{validate_config, ValidationError};
use crate::config::ProxyConfig;
use crate::mock::Interceptor;

/// Values given on the command line; `None` keeps the config file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub fixture_root: Option<PathBuf>,
}

/// Merge overrides into `config` and re-validate the result.
pub fn apply_overrides(
    mut config: ProxyConfig,
    overrides: Overrides,
) -> Result<ProxyConfig, Vec<ValidationError>> {
    if let Some(bind) = overrides.bind_address {
        config.listener.bind_address = bind;
    }
    if let Some(upstream) = overrides.upstream {
        config.upstream.address = Some(upstream);
    }
    if let Some(root) = overrides.fixture_root {
        config.mock.fixture_root = root.to_string_lossy().into_owned();
    }
    let cwd = PathBuf::from(".");
    config.mock.fixture_root = absolutize(&cwd, &config.mock.fixture_root)
        .to_string_lossy()
        .into_owned();

    validate_config(&config)?;
    Ok(config)
}

/// Build the interceptor, logging the same banner on every start.
pub fn build_interceptor(config: &ProxyConfig, enabled: bool) -> Result<Interceptor, regex::Error> {
    let compiled = config.mock.compile()?;

    if enabled {
        tracing::info!(
            fixture_root = %compiled.fixture_root.display(),
            allowlist = compiled.url_allowlist.len(),
            rewrites = compiled.segment_rewrites.len(),
            "Fixture mocking enabled"
        );
        if !compiled.fixture_root.is_dir() {
            tracing::warn!(
                fixture_root = %compiled.fixture_root.display(),
                "Fixture root does not exist yet; every request will be forwarded"
            );
        }
    } else {
        tracing::info!("Fixture mocking disabled (NETWORK_MOCK is not set); forwarding everything");
    }

    Ok(Interceptor::new(compiled, enabled))
}
