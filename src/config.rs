//! Client configuration.

use crate::error::{Result, TwoCaptchaError};
use crate::models::Hints;
use std::time::Duration;

/// Default base URL of the service.
pub const DEFAULT_BASE_URL: &str = "http://2captcha.com";

/// Default overall time budget for one job.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default interval between two result polls.
pub const DEFAULT_POOLING: Duration = Duration::from_secs(5);

/// Immutable settings shared by every job issued by a client.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) key: String,
    pub timeout: Duration,
    pub pooling: Duration,
    pub hints: Hints,
}

impl ClientConfig {
    /// Create a config with default timeout, pooling and no hints.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            timeout: DEFAULT_TIMEOUT,
            pooling: DEFAULT_POOLING,
            hints: Hints::default(),
        }
    }

    /// The API key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(TwoCaptchaError::InvalidConfig("API key is empty".into()));
        }
        if self.pooling.is_zero() {
            return Err(TwoCaptchaError::InvalidConfig(
                "pooling interval must be greater than zero".into(),
            ));
        }
        self.hints.validate().map_err(TwoCaptchaError::InvalidConfig)
    }
}

// Keeps the key out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("pooling", &self.pooling)
            .field("hints", &self.hints)
            .finish()
    }
}
