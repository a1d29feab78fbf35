use std::env;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

use crate::domain::auth::models::TokenPolicy;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub token: TokenConfig,
}

/// Token issuance settings.
///
/// Signing uses either an HMAC `secret` or an RSA key pair given as PEM
/// file paths. When both are present the key pair wins.
#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    #[serde(default)]
    pub public_key_path: Option<PathBuf>,
}

fn default_audience() -> String {
    TokenPolicy::DEFAULT_AUDIENCE.to_string()
}

fn default_expiration_minutes() -> i64 {
    TokenPolicy::DEFAULT_EXPIRATION_MINUTES
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            audience: default_audience(),
            expiration_minutes: default_expiration_minutes(),
            secret: None,
            private_key_path: None,
            public_key_path: None,
        }
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl From<&TokenConfig> for TokenPolicy {
    fn from(config: &TokenConfig) -> Self {
        Self {
            audience: config.audience.clone(),
            expiration_minutes: config.expiration_minutes,
        }
    }
}

impl Config {
    /// Prefix for environment overrides, e.g. `IDENTITY_TOKEN__SECRET`.
    pub const ENV_PREFIX: &'static str = "IDENTITY";

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (IDENTITY_TOKEN__SECRET, IDENTITY_TOKEN__EXPIRATION_MINUTES, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        Self::load_from(Path::new("config"), &run_mode, Self::ENV_PREFIX)
    }

    /// Layer `{dir}/default`, `{dir}/{run_mode}` and `{env_prefix}_*`
    /// environment variables, later sources winning.
    pub fn load_from(dir: &Path, run_mode: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let default_file = dir.join("default");
        let run_mode_file = dir.join(run_mode);

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&run_mode_file.to_string_lossy()).required(false))
            // Example: IDENTITY_TOKEN__AUDIENCE=mobile overrides token.audience
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        tracing::debug!(?config, run_mode = %run_mode, "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn token_policy(&self) -> TokenPolicy {
        TokenPolicy::from(&self.token)
    }
}
