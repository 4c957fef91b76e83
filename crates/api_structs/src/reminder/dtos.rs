use remind_domain::{format_datetime, Reminder, ReminderFrequency, ID};
use serde::{Deserialize, Serialize};

/// Full reminder record on the wire.
///
/// Date fields are serialized in the human readable output form. The
/// expiration field is omitted entirely for non-expiring reminders, never
/// sent as null.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReminderDTO {
    pub reminder_id: ID,
    pub user_id: String,
    pub reminder_title: String,
    pub reminder_description: String,
    pub reminder_tags: Vec<String>,
    pub reminder_frequency: ReminderFrequency,
    pub should_expire: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_expiration_date_time: Option<String>,
    pub next_reminder_date_time: String,
    pub reminder_creation_time: String,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder_id: reminder.id,
            user_id: reminder.user_id,
            reminder_title: reminder.title,
            reminder_description: reminder.description,
            reminder_tags: reminder.tags,
            reminder_frequency: reminder.frequency,
            should_expire: reminder.should_expire,
            reminder_expiration_date_time: reminder
                .expiration_time
                .as_ref()
                .map(format_datetime),
            next_reminder_date_time: format_datetime(&reminder.next_occurrence_time),
            reminder_creation_time: format_datetime(&reminder.creation_time),
        }
    }
}

/// The list projection: what `GET /reminders` returns per row.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReminderSummaryDTO {
    pub user_id: String,
    pub reminder_title: String,
    pub reminder_id: ID,
    pub reminder_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_expiration_date_time: Option<String>,
}

impl ReminderSummaryDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            user_id: reminder.user_id,
            reminder_title: reminder.title,
            reminder_id: reminder.id,
            reminder_tags: reminder.tags,
            reminder_expiration_date_time: reminder
                .expiration_time
                .as_ref()
                .map(format_datetime),
        }
    }
}
