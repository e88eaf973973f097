use thiserror::Error;

use crate::household::Fixture;

/// Invalid generator configuration. Raised before any row is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("household count must be positive")]
    NonPositiveHouseholds,

    #[error("no distribution parameters for fixture '{0}'")]
    MissingFixture(Fixture),

    #[error("invalid parameter for {subject}: {reason}")]
    InvalidParameter { subject: String, reason: String },
}

impl ConfigError {
    pub fn invalid(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// A query that cannot be answered. The dataset is unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    #[error("unknown fixture '{0}'")]
    UnknownFixture(String),

    #[error("dataset has no households")]
    EmptyDataset,

    #[error("{what} must be a non-negative number, got {value}")]
    NegativeValue { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositiveValue { what: &'static str, value: f64 },

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

/// Failure of the external text-generation service.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("advisor request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("advisor returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("advisor returned no text")]
    EmptyResponse,

    #[error("advisor is disabled")]
    Disabled,
}

/// Reject NaN, infinities and negatives.
pub(crate) fn ensure_non_negative(what: &'static str, value: f64) -> Result<f64, UsageError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(UsageError::NegativeValue { what, value })
    }
}

pub(crate) fn ensure_positive(what: &'static str, value: f64) -> Result<f64, UsageError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(UsageError::NonPositiveValue { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MissingFixture(Fixture::CarWash);
        assert_eq!(err.to_string(), "no distribution parameters for fixture 'Car Wash'");

        let err = UsageError::UnknownFixture("Pool".to_string());
        assert_eq!(err.to_string(), "unknown fixture 'Pool'");
    }

    #[test]
    fn test_ensure_non_negative_rejects_nan() {
        assert!(ensure_non_negative("usage", f64::NAN).is_err());
        assert!(ensure_non_negative("usage", -0.5).is_err());
        assert_eq!(ensure_non_negative("usage", 0.0), Ok(0.0));
    }
}
