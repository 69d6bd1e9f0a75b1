use crate::errors::DomainError;
use crate::record_kind::RecordKind;
use serde::{Deserialize, Serialize};

/// Resolver configuration, loadable from TOML.
///
/// Every field has a default so an empty document is a usable configuration;
/// `servers` stays empty by default because the server pool is an explicit
/// per-deployment decision.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_record")]
    pub record: RecordKind,

    #[serde(default = "default_retries")]
    pub retries: usize,

    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,

    #[serde(default)]
    pub servers: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            record: default_record(),
            retries: default_retries(),
            workers: default_workers(),
            query_timeout_ms: default_query_timeout(),
            servers: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, DomainError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| DomainError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.workers == 0 {
            return Err(DomainError::NoWorkers);
        }
        if self.query_timeout_ms == 0 {
            return Err(DomainError::ConfigError(
                "query_timeout_ms cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_record() -> RecordKind {
    RecordKind::A
}

fn default_retries() -> usize {
    3
}

fn default_workers() -> usize {
    8
}

fn default_query_timeout() -> u64 {
    5000
}
