use crate::dtos::{PurgeOutcomeDTO, UserNotificationsDTO};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod send_due_reminders {
    use super::*;

    /// A user to check, together with the topic to notify.
    #[derive(Debug, Deserialize, Serialize, Clone)]
    pub struct JobUser {
        pub username: String,
        pub topic: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub users: Option<Vec<JobUser>>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub details: HashMap<String, UserNotificationsDTO>,
    }
}

pub mod purge_expired_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, Clone)]
    pub struct JobUser {
        pub username: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub users: Option<Vec<JobUser>>,
    }

    pub type APIResponse = HashMap<String, PurgeOutcomeDTO>;
}
