//! Configuration loading and management.

use std::path::{Path, PathBuf};

use ct_core::{EmissionFactors, Granularity};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Emission factors are injected here rather than read from module-global
/// state, so a site or region can swap in its own factor set without
/// process-wide side effects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Emission factor overrides for this site or region.
    #[serde(default)]
    pub factors: EmissionFactors,

    /// Default bucket granularity for trend and forecast output.
    #[serde(default)]
    pub granularity: Granularity,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Layering, lowest to highest precedence: built-in defaults, the
    /// platform config file, the explicit `--config` file, then `CT_*`
    /// environment variables (nested keys split on `__`, e.g.
    /// `CT_FACTORS__GRID_ENERGY`).
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CT_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ct.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ct"))
}
