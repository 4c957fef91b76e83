use super::IReminderRepo;
use crate::repos::DeleteResult;
use remind_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }

    fn find_by<F: FnMut(&Reminder) -> bool>(&self, mut compare: F) -> Vec<Reminder> {
        let reminders = self.reminders.lock().unwrap();
        reminders.iter().filter(|r| compare(r)).cloned().collect()
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let mut reminders = self.reminders.lock().unwrap();
        // Inserting over an existing (id, user_id) pair replaces the row,
        // keeping retried requests from producing duplicates
        match reminders
            .iter_mut()
            .find(|r| r.id == reminder.id && r.user_id == reminder.user_id)
        {
            Some(existing) => *existing = reminder.clone(),
            None => reminders.push(reminder.clone()),
        }
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let mut reminders = self.reminders.lock().unwrap();
        for existing in reminders.iter_mut() {
            if existing.id == reminder.id && existing.user_id == reminder.user_id {
                *existing = reminder.clone();
            }
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID, user_id: &str) -> Option<Reminder> {
        self.find_by(|r| r.id == *reminder_id && r.user_id == user_id)
            .into_iter()
            .next()
    }

    async fn find_by_id(&self, reminder_id: &ID) -> Vec<Reminder> {
        self.find_by(|r| r.id == *reminder_id)
    }

    async fn find_by_user(&self, user_id: &str) -> Vec<Reminder> {
        self.find_by(|r| r.user_id == user_id)
    }

    async fn find_by_user_and_title(&self, user_id: &str, title: &str) -> Vec<Reminder> {
        self.find_by(|r| r.user_id == user_id && r.title == title)
    }

    async fn find_by_user_and_tag(&self, user_id: &str, tag: &str) -> Vec<Reminder> {
        self.find_by(|r| r.user_id == user_id && r.tags.iter().any(|t| t == tag))
    }

    async fn delete_by_id(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult> {
        let mut reminders = self.reminders.lock().unwrap();
        let before = reminders.len();
        reminders.retain(|r| r.id != *reminder_id);
        Ok(DeleteResult {
            deleted_count: (before - reminders.len()) as i64,
        })
    }
}
