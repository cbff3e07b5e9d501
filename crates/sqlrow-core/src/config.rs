//! Execution settings for row rendering and the sort step.

use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    value::NULL_LABEL,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid execution config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("null label must not be empty")]
    EmptyNullLabel,
}

impl ConfigError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Parse(_) | Self::EmptyNullLabel => ErrorClass::InvalidArgument,
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(err.class(), ErrorOrigin::Config, err.to_string())
    }
}

///
/// ExecutionConfig
///
/// Unknown keys are rejected so a misspelled setting never silently falls
/// back to its default.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Emit `[debug]` tracing from the sort step.
    pub debug: bool,

    /// Text rendered for NULL values.
    pub null_label: String,

    /// Seed for ORDER BY RANDOM; `None` draws a fresh seed per comparer.
    pub random_seed: Option<u64>,
}

impl ExecutionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, InternalError> {
        let config: Self = toml::from_str(source).map_err(ConfigError::from)?;
        if config.null_label.is_empty() {
            return Err(ConfigError::EmptyNullLabel.into());
        }

        Ok(config)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            debug: false,
            null_label: NULL_LABEL.to_string(),
            random_seed: None,
        }
    }
}

///
/// TESTS
///
