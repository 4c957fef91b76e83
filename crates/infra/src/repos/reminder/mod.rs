mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use remind_domain::{Reminder, ID};

use crate::repos::DeleteResult;

/// Storage for reminder rows.
///
/// The backing store is a key-value table keyed by (`reminder_id`,
/// `user_id`) with a secondary query path on (`user_id`, `title`). Finds by
/// id alone return every shared copy of a reminder.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID, user_id: &str) -> Option<Reminder>;
    async fn find_by_id(&self, reminder_id: &ID) -> Vec<Reminder>;
    async fn find_by_user(&self, user_id: &str) -> Vec<Reminder>;
    async fn find_by_user_and_title(&self, user_id: &str, title: &str) -> Vec<Reminder>;
    async fn find_by_user_and_tag(&self, user_id: &str, tag: &str) -> Vec<Reminder>;
    async fn delete_by_id(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult>;
}
