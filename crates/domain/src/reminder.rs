use crate::date::{parse_datetime, DateInput, DateParseError, DateTimeConfig};
use crate::frequency::{validate_next_occurrence, FrequencyError, ReminderFrequency};
use crate::shared::entity::ID;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use thiserror::Error;

/// A stored reminder row.
///
/// The primary key is (`id`, `user_id`): sharing a reminder duplicates the
/// row under the recipient's `user_id` while keeping the same `id`, so a
/// reminder shared with N users exists as N independent rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub frequency: ReminderFrequency,
    pub should_expire: bool,
    /// Present exactly when `should_expire` is true.
    pub expiration_time: Option<DateTime<Utc>>,
    pub next_occurrence_time: DateTime<Utc>,
    pub creation_time: DateTime<Utc>,
}

impl Reminder {
    pub fn new(
        user_id: impl Into<String>,
        attributes: ReminderAttributes,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id: user_id.into(),
            title: attributes.title,
            description: attributes.description,
            tags: attributes.tags,
            frequency: attributes.frequency,
            should_expire: attributes.should_expire,
            expiration_time: attributes.expiration_time,
            next_occurrence_time: attributes.next_occurrence_time,
            creation_time,
        }
    }

    /// Clone this row for another user, keeping the same `id`.
    pub fn shared_with(&self, username: &str) -> Self {
        Self {
            user_id: username.to_string(),
            ..self.clone()
        }
    }

    /// Overwrite the mutable fields. `id`, `user_id` and `creation_time`
    /// never change after creation.
    pub fn apply(&mut self, attributes: ReminderAttributes) {
        self.title = attributes.title;
        self.description = attributes.description;
        self.tags = attributes.tags;
        self.frequency = attributes.frequency;
        self.should_expire = attributes.should_expire;
        self.expiration_time = attributes.expiration_time;
        self.next_occurrence_time = attributes.next_occurrence_time;
    }
}

/// The normalized, validated field set of a reminder: everything except the
/// immutable key and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderAttributes {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub frequency: ReminderFrequency,
    pub should_expire: bool,
    pub expiration_time: Option<DateTime<Utc>>,
    pub next_occurrence_time: DateTime<Utc>,
}

/// An untrusted reminder payload, before validation. Date fields may be raw
/// strings (from a request) or instants (inherited by the update merge).
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRequest {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub frequency: ReminderFrequency,
    pub should_expire: bool,
    pub expiration_time: Option<DateInput>,
    pub next_occurrence_time: Option<DateInput>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Title cannot be empty or whitespace only")]
    EmptyTitle,
    #[error(transparent)]
    Date(#[from] DateParseError),
    #[error("Expiration date required when should_expire is true")]
    MissingExpiration,
    #[error(transparent)]
    Frequency(#[from] FrequencyError),
}

impl ReminderRequest {
    /// Validate and normalize into a canonical record.
    ///
    /// Failures short-circuit on the first violated rule. Caller-supplied
    /// next occurrences take precedence over computed ones; when
    /// `should_expire` is false the expiration is dropped entirely rather
    /// than stored as null.
    pub fn normalize(
        self,
        now: DateTime<Utc>,
        config: &DateTimeConfig,
    ) -> Result<ReminderAttributes, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        // Tag sets have no defined order; sort for a stable representation.
        let tags: Vec<String> = self.tags.into_iter().sorted().dedup().collect();

        let expiration = match &self.expiration_time {
            Some(input) => Some(parse_datetime(input, now, config)?),
            None => None,
        };
        let supplied_next = match &self.next_occurrence_time {
            Some(input) => Some(parse_datetime(input, now, config)?),
            None => None,
        };

        let (expiration_time, next_occurrence_time) = if self.should_expire {
            let expiration = expiration.ok_or(ValidationError::MissingExpiration)?;
            let next = match supplied_next {
                Some(next) => {
                    validate_next_occurrence(next, Some(expiration))?;
                    next
                }
                None => self.frequency.next_occurrence(now, Some(expiration))?,
            };
            (Some(expiration), next)
        } else {
            let next = match supplied_next {
                Some(next) => next,
                None => self.frequency.next_occurrence(now, None)?,
            };
            (None, next)
        };

        Ok(ReminderAttributes {
            title: title.to_string(),
            description: self.description,
            tags,
            frequency: self.frequency,
            should_expire: self.should_expire,
            expiration_time,
            next_occurrence_time,
        })
    }
}
