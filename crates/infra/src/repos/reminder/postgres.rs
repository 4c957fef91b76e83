use super::IReminderRepo;
use crate::repos::DeleteResult;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use remind_domain::{Reminder, ReminderFrequency, ID};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_id: String,
    title: String,
    description: String,
    tags: Json<Vec<String>>,
    frequency: String,
    should_expire: bool,
    expiration_time: Option<DateTime<Utc>>,
    next_occurrence_time: DateTime<Utc>,
    creation_time: DateTime<Utc>,
}

fn frequency_to_str(frequency: ReminderFrequency) -> &'static str {
    match frequency {
        ReminderFrequency::Once => "once",
        ReminderFrequency::Daily => "daily",
        ReminderFrequency::Monthly => "monthly",
        ReminderFrequency::Yearly => "yearly",
    }
}

fn frequency_from_str(value: &str) -> anyhow::Result<ReminderFrequency> {
    match value {
        "once" => Ok(ReminderFrequency::Once),
        "daily" => Ok(ReminderFrequency::Daily),
        "monthly" => Ok(ReminderFrequency::Monthly),
        "yearly" => Ok(ReminderFrequency::Yearly),
        _ => Err(anyhow!("Unknown reminder frequency: {}", value)),
    }
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            user_id: raw.user_id,
            title: raw.title,
            description: raw.description,
            tags: raw.tags.0,
            frequency: frequency_from_str(&raw.frequency)?,
            should_expire: raw.should_expire,
            expiration_time: raw.expiration_time,
            next_occurrence_time: raw.next_occurrence_time,
            creation_time: raw.creation_time,
        })
    }
}

fn into_reminders(raws: Vec<ReminderRaw>) -> Vec<Reminder> {
    raws.into_iter()
        .filter_map(|raw| raw.try_into().ok())
        .collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_id, title, description, tags, frequency,
             should_expire, expiration_time, next_occurrence_time, creation_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (reminder_uid, user_id) DO UPDATE
            SET title = EXCLUDED.title, description = EXCLUDED.description,
                tags = EXCLUDED.tags, frequency = EXCLUDED.frequency,
                should_expire = EXCLUDED.should_expire,
                expiration_time = EXCLUDED.expiration_time,
                next_occurrence_time = EXCLUDED.next_occurrence_time
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.user_id)
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(Json(&reminder.tags))
        .bind(frequency_to_str(reminder.frequency))
        .bind(reminder.should_expire)
        .bind(reminder.expiration_time)
        .bind(reminder.next_occurrence_time)
        .bind(reminder.creation_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $3, description = $4, tags = $5, frequency = $6,
                should_expire = $7, expiration_time = $8, next_occurrence_time = $9
            WHERE reminder_uid = $1 AND user_id = $2
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.user_id)
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(Json(&reminder.tags))
        .bind(frequency_to_str(reminder.frequency))
        .bind(reminder.should_expire)
        .bind(reminder.expiration_time)
        .bind(reminder.next_occurrence_time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID, user_id: &str) -> Option<Reminder> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1 AND user_id = $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .ok()?;
        raw.and_then(|raw| raw.try_into().ok())
    }

    async fn find_by_id(&self, reminder_id: &ID) -> Vec<Reminder> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        into_reminders(raws)
    }

    async fn find_by_user(&self, user_id: &str) -> Vec<Reminder> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        into_reminders(raws)
    }

    async fn find_by_user_and_title(&self, user_id: &str, title: &str) -> Vec<Reminder> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE user_id = $1 AND title = $2
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        into_reminders(raws)
    }

    async fn find_by_user_and_tag(&self, user_id: &str, tag: &str) -> Vec<Reminder> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE user_id = $1 AND tags @> $2
            "#,
        )
        .bind(user_id)
        .bind(Json(vec![tag.to_string()]))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();
        into_reminders(raws)
    }

    async fn delete_by_id(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
