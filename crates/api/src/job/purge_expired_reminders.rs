use crate::error::RemindError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remind_api_structs::dtos::{PurgeOutcomeDTO, SkippedReminderDTO};
use remind_api_structs::purge_expired_reminders::{APIResponse, JobUser, RequestBody};
use remind_infra::RemindContext;
use tracing::warn;

pub async fn purge_expired_reminders_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let usecase = PurgeExpiredRemindersUseCase { users: body.0.users };

    execute(usecase, &ctx)
        .await
        .map(|outcome| HttpResponse::Ok().json(outcome))
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct PurgeExpiredRemindersUseCase {
    users: Option<Vec<JobUser>>,
}

#[derive(Debug)]
enum UseCaseError {
    MissingUsers,
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingUsers => Self::BadClientData {
                message: "Could not process the scheduled job!!".into(),
                error: "The job payload must include the list of users to process!".into(),
            },
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for PurgeExpiredRemindersUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "PurgeExpiredReminders";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let users = self.users.take().ok_or(UseCaseError::MissingUsers)?;
        let today = ctx.sys.now().date_naive();

        let mut outcome = APIResponse::new();
        for user in users {
            let mut purged = PurgeOutcomeDTO::default();

            let reminders = ctx.repos.reminders.find_by_user(&user.username).await;
            for reminder in reminders {
                // Expired means the expiration day is fully behind us. A
                // reminder expiring today survives until tomorrow's run.
                let expired = reminder
                    .expiration_time
                    .map(|expiration| expiration.date_naive() < today)
                    .unwrap_or(false);

                if expired {
                    match ctx.repos.reminders.delete_by_id(&reminder.id).await {
                        Ok(_) => purged.deleted.push(reminder.title),
                        Err(e) => {
                            warn!("Could not purge reminder {}: {:?}", reminder.id, e);
                            purged.not_deleted.push(SkippedReminderDTO {
                                reminder_id: reminder.id,
                                reminder_title: reminder.title,
                            });
                        }
                    }
                } else {
                    purged.not_deleted.push(SkippedReminderDTO {
                        reminder_id: reminder.id,
                        reminder_title: reminder.title,
                    });
                }
            }

            outcome.insert(user.username.clone(), purged);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use remind_domain::{Reminder, ReminderAttributes, ReminderFrequency};
    use remind_infra::{setup_context_inmemory, FixedSys};
    use std::sync::Arc;

    fn setup() -> RemindContext {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(FixedSys(
            chrono::Utc.with_ymd_and_hms(2030, 1, 15, 12, 0, 0).unwrap(),
        ));
        ctx
    }

    async fn insert_reminder(
        ctx: &RemindContext,
        user_id: &str,
        title: &str,
        expires_in_days: Option<i64>,
    ) {
        let now = ctx.sys.now();
        let reminder = Reminder::new(
            user_id,
            ReminderAttributes {
                title: title.into(),
                description: String::new(),
                tags: vec![],
                frequency: ReminderFrequency::Daily,
                should_expire: expires_in_days.is_some(),
                expiration_time: expires_in_days.map(|days| now + Duration::days(days)),
                next_occurrence_time: now,
            },
            now,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
    }

    #[actix_web::test]
    async fn rejects_payload_without_users() {
        let ctx = setup();
        let usecase = PurgeExpiredRemindersUseCase { users: None };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::MissingUsers)
        ));
    }

    #[actix_web::test]
    async fn deletes_only_reminders_past_their_expiration_day() {
        let ctx = setup();
        insert_reminder(&ctx, "alice", "Long gone", Some(-5)).await;
        insert_reminder(&ctx, "alice", "Expires today", Some(0)).await;
        insert_reminder(&ctx, "alice", "Expires later", Some(10)).await;
        insert_reminder(&ctx, "alice", "Never expires", None).await;

        let usecase = PurgeExpiredRemindersUseCase {
            users: Some(vec![JobUser {
                username: "alice".into(),
            }]),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();

        let alice = &outcome["alice"];
        assert_eq!(alice.deleted, vec!["Long gone".to_string()]);
        let skipped: Vec<_> = alice
            .not_deleted
            .iter()
            .map(|r| r.reminder_title.as_str())
            .collect();
        assert_eq!(skipped, vec!["Expires today", "Expires later", "Never expires"]);

        let remaining = ctx.repos.reminders.find_by_user("alice").await;
        assert_eq!(remaining.len(), 3);
    }

    #[actix_web::test]
    async fn only_processes_listed_users() {
        let ctx = setup();
        insert_reminder(&ctx, "alice", "Long gone", Some(-5)).await;
        insert_reminder(&ctx, "bob", "Also long gone", Some(-5)).await;

        let usecase = PurgeExpiredRemindersUseCase {
            users: Some(vec![JobUser {
                username: "alice".into(),
            }]),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();

        assert!(outcome.contains_key("alice"));
        assert!(!outcome.contains_key("bob"));
        assert_eq!(ctx.repos.reminders.find_by_user("bob").await.len(), 1);
    }
}
