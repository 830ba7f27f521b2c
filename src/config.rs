//! Configuration types.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::interview::consent::ConsentMatch;

/// Interview configuration.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    /// Re-prompts allowed per field after the first attempt.
    pub max_retries: u32,
    /// How long a single listen waits for speech.
    pub listen_timeout: Duration,
    /// Directory session snapshots are written to.
    pub output_dir: PathBuf,
    /// Keyword matching mode for the consent question.
    pub consent_match: ConsentMatch,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            listen_timeout: Duration::from_secs(5),
            output_dir: PathBuf::from("output"),
            consent_match: ConsentMatch::default(),
        }
    }
}

impl InterviewConfig {
    /// Build config from `KYC_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_retries = match lookup("KYC_MAX_RETRIES") {
            Some(raw) => parse_value("KYC_MAX_RETRIES", &raw)?,
            None => defaults.max_retries,
        };

        let listen_timeout = match lookup("KYC_LISTEN_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = parse_value("KYC_LISTEN_TIMEOUT_SECS", &raw)?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "KYC_LISTEN_TIMEOUT_SECS".to_string(),
                        message: "must be at least 1 second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.listen_timeout,
        };

        let output_dir = lookup("KYC_OUTPUT_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let consent_match = match lookup("KYC_CONSENT_MATCH") {
            Some(raw) => parse_value("KYC_CONSENT_MATCH", &raw)?,
            None => defaults.consent_match,
        };

        Ok(Self {
            max_retries,
            listen_timeout,
            output_dir,
            consent_match,
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
