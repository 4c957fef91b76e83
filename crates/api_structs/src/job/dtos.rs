use remind_domain::ID;
use serde::{Deserialize, Serialize};

/// One delivered notification in the send-due-reminders report.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotificationReceiptDTO {
    pub sns_response: String,
    pub message_body: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct UserNotificationsDTO {
    pub email: Option<String>,
    pub notifications: Vec<NotificationReceiptDTO>,
}

/// A reminder the purge job inspected but left in place.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SkippedReminderDTO {
    pub reminder_id: ID,
    pub reminder_title: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PurgeOutcomeDTO {
    pub deleted: Vec<String>,
    pub not_deleted: Vec<SkippedReminderDTO>,
}
