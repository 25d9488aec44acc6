use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::RwLock;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Expression rendering configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ExprConfig {
    /// Prefix of the synthetic parameter names minted for higher-order templates
    #[validate(
        length(min = 1, max = 16, message = "Lambda prefix must be 1-16 characters"),
        custom(function = "validate_identifier")
    )]
    pub lambda_prefix: String,

    /// Number of random hex characters appended to each synthetic parameter name
    #[validate(range(
        min = 4,
        max = 32,
        message = "Lambda suffix length must be between 4 and 32"
    ))]
    pub lambda_suffix_len: usize,

    /// Always back-quote column identifiers, even when they are plain identifiers
    pub quote_identifiers: bool,
}

impl Default for ExprConfig {
    fn default() -> Self {
        Self {
            lambda_prefix: "x".to_string(),
            lambda_suffix_len: 8,
            quote_identifiers: false,
        }
    }
}

lazy_static! {
    static ref ACTIVE_CONFIG: RwLock<ExprConfig> = RwLock::new(ExprConfig::default());
}

impl ExprConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            lambda_prefix: env::var("TYPEDFRAME_LAMBDA_PREFIX")
                .unwrap_or_else(|_| defaults.lambda_prefix.clone()),
            lambda_suffix_len: parse_env_var(
                "TYPEDFRAME_LAMBDA_SUFFIX_LEN",
                &defaults.lambda_suffix_len.to_string(),
            )?,
            quote_identifiers: parse_env_var("TYPEDFRAME_QUOTE_IDENTIFIERS", "false")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Snapshot of the process-wide configuration used while rendering expressions
    pub fn global() -> ExprConfig {
        ACTIVE_CONFIG
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Validate and install this configuration as the process-wide one
    pub fn install(self) -> Result<(), ConfigError> {
        self.validate()?;
        log::debug!("Installing expression config: {:?}", self);
        match ACTIVE_CONFIG.write() {
            Ok(mut guard) => *guard = self,
            Err(poisoned) => *poisoned.into_inner() = self,
        }
        Ok(())
    }
}

fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(ValidationError::new("lambda_prefix_not_identifier"))
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
