use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::{debug, info};

use crate::domain::catalog::AnalysisConfig;
use crate::domain::error::{AppError, Result};

/// Prefix for environment overrides, e.g. `STOREFRONT_EXPLORE_ROWS=5`
/// or `STOREFRONT_GOOGLE_PLAY__FREE_PRICE=0`
pub const ENV_PREFIX: &str = "STOREFRONT_";

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "storefront-insights.toml";

/// Keys whose env values are kept as written. Figment would otherwise read
/// `0` as an integer and `0.0` as a float, which a `String` field rejects.
const LITERAL_ENV_KEYS: &[&str] = &[
    "google_play_path",
    "app_store_path",
    "google_play.free_price",
    "app_store.free_price",
    "google_play.spotlight.category",
    "app_store.spotlight.category",
];

fn is_literal_key(key: &str) -> bool {
    LITERAL_ENV_KEYS
        .iter()
        .any(|literal| literal.eq_ignore_ascii_case(key))
}

pub struct ConfigService {
    config_file: Option<PathBuf>,
    use_env: bool,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            config_file: None,
            use_env: true,
        }
    }

    /// Read this TOML file instead of the default one; it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    /// Defaults, then the TOML file, then environment variables
    pub fn load(&self) -> Result<AnalysisConfig> {
        let mut figment = Figment::from(Serialized::defaults(AnalysisConfig::default()));

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::NotFound(format!(
                        "Config file {}",
                        path.display()
                    )));
                }
                info!(path = %path.display(), "Loading config file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    info!(path = %default_path.display(), "Loading config file");
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        if self.use_env {
            let env = Env::prefixed(ENV_PREFIX).split("__");
            let literals: Vec<(String, String)> = env
                .iter()
                .filter(|(key, _)| is_literal_key(key.as_str()))
                .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
                .collect();

            figment = figment.merge(env.filter(|key| !is_literal_key(key.as_str())));
            for (key, value) in literals {
                debug!(%key, "Applying literal env override");
                figment = figment.merge(Serialized::default(&key, value));
            }
        }

        let config: AnalysisConfig = figment.extract()?;
        config.validate().map_err(|e| {
            AppError::ConfigError(format!("Invalid analysis config: {}", e))
        })?;

        debug!(?config, "Resolved analysis config");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
