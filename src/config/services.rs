//! Collaborator service configuration
//!
//! Each URL is optional. A missing URL selects the in-memory adapter for
//! that collaborator, which is how local development runs.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// External service endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Retrieval/QA service base URL
    pub knowledge_base_url: Option<String>,

    /// Transactions (leave) service base URL
    pub transactions_url: Option<String>,

    /// Analytics service base URL
    pub analytics_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ServicesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Knowledge base URL, if configured and non-empty
    pub fn knowledge_base(&self) -> Option<&str> {
        non_empty(&self.knowledge_base_url)
    }

    /// Transactions URL, if configured and non-empty
    pub fn transactions(&self) -> Option<&str> {
        non_empty(&self.transactions_url)
    }

    /// Analytics URL, if configured and non-empty
    pub fn analytics(&self) -> Option<&str> {
        non_empty(&self.analytics_url)
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidServiceTimeout);
        }
        validate_url("knowledge_base", self.knowledge_base())?;
        validate_url("transactions", self.transactions())?;
        validate_url("analytics", self.analytics())?;
        Ok(())
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            knowledge_base_url: None,
            transactions_url: None,
            analytics_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn validate_url(service: &'static str, url: Option<&str>) -> Result<(), ValidationError> {
    match url {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
            Err(ValidationError::InvalidServiceUrl {
                service,
                url: url.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_in_memory_services() {
        let config = ServicesConfig::default();
        assert!(config.knowledge_base().is_none());
        assert!(config.transactions().is_none());
        assert!(config.analytics().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let config = ServicesConfig {
            transactions_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.transactions().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_scheme_is_checked() {
        let config = ServicesConfig {
            knowledge_base_url: Some("localhost:8000".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidServiceUrl { service: "knowledge_base", .. })
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        for timeout_secs in [0, 301] {
            let config = ServicesConfig {
                timeout_secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidServiceTimeout));
        }
    }
}
