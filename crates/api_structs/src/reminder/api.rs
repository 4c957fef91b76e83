use crate::dtos::{ReminderDTO, ReminderSummaryDTO};
use remind_domain::{ReminderFrequency, ID};
use serde::{Deserialize, Serialize};

/// Response shape shared by the mutating reminder operations.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMutationResponse {
    pub reminder_id: ID,
    pub message: String,
}

impl ReminderMutationResponse {
    pub fn new(reminder_id: ID, message: &str) -> Self {
        Self {
            reminder_id,
            message: message.to_string(),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Clone)]
    pub struct RequestBody {
        pub reminder_title: String,
        #[serde(default)]
        pub reminder_description: String,
        #[serde(default)]
        pub reminder_tags: Vec<String>,
        pub reminder_frequency: ReminderFrequency,
        pub should_expire: bool,
        #[serde(default)]
        pub reminder_expiration_date_time: Option<String>,
        #[serde(default)]
        pub next_reminder_date_time: Option<String>,
    }

    pub type APIResponse = ReminderMutationResponse;
}

pub mod share_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub username: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub tag: Option<String>,
    }

    pub type APIResponse = Vec<ReminderSummaryDTO>;
}

pub mod get_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderDTO;
}

pub mod update_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Partial update: absent fields keep their stored values.
    #[derive(Debug, Deserialize, Serialize, Clone, Default)]
    pub struct RequestBody {
        #[serde(default)]
        pub reminder_title: Option<String>,
        #[serde(default)]
        pub reminder_description: Option<String>,
        #[serde(default)]
        pub reminder_tags: Option<Vec<String>>,
        #[serde(default)]
        pub reminder_frequency: Option<ReminderFrequency>,
        #[serde(default)]
        pub should_expire: Option<bool>,
        #[serde(default)]
        pub reminder_expiration_date_time: Option<String>,
        #[serde(default)]
        pub next_reminder_date_time: Option<String>,
    }

    pub type APIResponse = ReminderMutationResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderMutationResponse;
}

pub mod get_tags {
    pub type APIResponse = Vec<String>;
}
