//! Dialogue behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::{DialogueSettings, SessionLimits};

/// Upper bound for `max_results`.
const MAX_RESULTS_LIMIT: u32 = 20;

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Artificial pause before each bot reply, in milliseconds
    #[serde(default)]
    pub reply_delay_ms: u64,

    /// Context items requested per knowledge query
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Leave allowance used by the in-memory leave store
    #[serde(default = "default_leave_allowance")]
    pub leave_allowance_days: u32,

    /// Open chat sessions kept at once
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Seconds of inactivity after which a session may be evicted
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl DialogueConfig {
    /// Settings handed to every dialogue manager
    pub fn settings(&self) -> DialogueSettings {
        DialogueSettings {
            max_results: self.max_results,
            reply_delay: Duration::from_millis(self.reply_delay_ms),
        }
    }

    /// Bounds on the chat session registry
    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            max_sessions: self.max_sessions,
            idle_timeout: Duration::from_secs(self.session_idle_secs),
        }
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_results == 0 || self.max_results > MAX_RESULTS_LIMIT {
            return Err(ValidationError::InvalidMaxResults {
                max: MAX_RESULTS_LIMIT,
            });
        }
        if self.leave_allowance_days == 0 {
            return Err(ValidationError::InvalidLeaveAllowance);
        }
        if self.max_sessions == 0 || self.session_idle_secs == 0 {
            return Err(ValidationError::InvalidSessionLimits);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 0,
            max_results: default_max_results(),
            leave_allowance_days: default_leave_allowance(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_max_results() -> u32 {
    crate::application::DEFAULT_MAX_RESULTS
}

fn default_leave_allowance() -> u32 {
    crate::domain::leave::DEFAULT_ALLOWANCE_DAYS
}

fn default_max_sessions() -> usize {
    crate::application::DEFAULT_MAX_SESSIONS
}

fn default_session_idle_secs() -> u64 {
    crate::application::DEFAULT_SESSION_IDLE_TIMEOUT.as_secs()
}
