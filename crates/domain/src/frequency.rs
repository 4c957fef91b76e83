use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often a reminder fires.
///
/// A closed enum rather than free-form strings so that adding a frequency is
/// a compile-time checked change everywhere it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Once,
    Daily,
    Monthly,
    Yearly,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrequencyError {
    #[error("Expiration date required for one-time reminders")]
    MissingExpiration,
    #[error("Cannot set next reminder in the past")]
    PastDate,
    #[error("Next reminder date ({next}) would be after expiration date ({expiration})")]
    ExceedsExpiration {
        next: DateTime<Utc>,
        expiration: DateTime<Utc>,
    },
    #[error("Next reminder date cannot be later than expiration date")]
    AfterExpiration,
    #[error("Computed next reminder date is out of range")]
    OutOfRange,
}

impl ReminderFrequency {
    /// Compute the next occurrence from `now`.
    ///
    /// One-time reminders fire one day before their (required) expiration.
    /// Recurring reminders fire one unit from `now` and must not land past
    /// the expiration when one is given.
    pub fn next_occurrence(
        &self,
        now: DateTime<Utc>,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, FrequencyError> {
        let next = match self {
            Self::Once => {
                let expiration = expiration.ok_or(FrequencyError::MissingExpiration)?;
                let next = expiration - Duration::days(1);
                if now > next {
                    return Err(FrequencyError::PastDate);
                }
                return Ok(next);
            }
            Self::Daily => now + Duration::days(1),
            Self::Monthly => now
                .checked_add_months(Months::new(1))
                .ok_or(FrequencyError::OutOfRange)?,
            Self::Yearly => now
                .checked_add_months(Months::new(12))
                .ok_or(FrequencyError::OutOfRange)?,
        };

        if let Some(expiration) = expiration {
            if next > expiration {
                return Err(FrequencyError::ExceedsExpiration { next, expiration });
            }
        }

        Ok(next)
    }
}

/// Check a caller-supplied next occurrence against the expiration. The past
/// check on supplied dates happens at parse time.
pub fn validate_next_occurrence(
    next: DateTime<Utc>,
    expiration: Option<DateTime<Utc>>,
) -> Result<(), FrequencyError> {
    if let Some(expiration) = expiration {
        if next > expiration {
            return Err(FrequencyError::AfterExpiration);
        }
    }
    Ok(())
}
