use crate::error::RemindError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use remind_domain::{DateInput, Reminder, ReminderRequest, ValidationError, ID};
use remind_infra::RemindContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        username: user.username,
        changes: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| {
            HttpResponse::Ok().json(APIResponse::new(
                reminder.id,
                "Reminder successfully updated!",
            ))
        })
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct UpdateReminderUseCase {
    reminder_id: ID,
    username: String,
    changes: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    InvalidReminder(ID, ValidationError),
    StorageError,
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound {
                message: format!("Could not update reminder {}!!", reminder_id),
                error: format!("No such reminder with id: {}", reminder_id),
            },
            UseCaseError::InvalidReminder(reminder_id, e) => Self::BadClientData {
                message: format!("Could not update reminder {}!!", reminder_id),
                error: e.to_string(),
            },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id, &self.username)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        let changes = self.changes.clone();
        let should_expire = changes.should_expire.unwrap_or(reminder.should_expire);
        // The stored next occurrence is deliberately not inherited: unless
        // the caller supplies one, it is recomputed from the merged fields.
        let attributes = ReminderRequest {
            title: changes.reminder_title.unwrap_or(reminder.title.clone()),
            description: changes
                .reminder_description
                .unwrap_or(reminder.description.clone()),
            tags: changes.reminder_tags.unwrap_or(reminder.tags.clone()),
            frequency: changes.reminder_frequency.unwrap_or(reminder.frequency),
            should_expire,
            expiration_time: changes
                .reminder_expiration_date_time
                .map(DateInput::from)
                .or(reminder.expiration_time.map(DateInput::Instant)),
            next_occurrence_time: changes.next_reminder_date_time.map(DateInput::from),
        }
        .normalize(ctx.sys.now(), &ctx.config.datetime)
        .map_err(|e| UseCaseError::InvalidReminder(self.reminder_id.clone(), e))?;

        // Every shared copy of the reminder receives the same update
        let copies = ctx.repos.reminders.find_by_id(&self.reminder_id).await;
        let mut updated = reminder;
        for mut copy in copies {
            copy.apply(attributes.clone());
            if copy.user_id == self.username {
                updated = copy.clone();
            }
            ctx.repos
                .reminders
                .save(&copy)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use remind_domain::{ReminderAttributes, ReminderFrequency};
    use remind_infra::{setup_context_inmemory, FixedSys};
    use std::sync::Arc;

    fn setup() -> RemindContext {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(FixedSys(
            chrono::Utc.with_ymd_and_hms(2030, 1, 15, 12, 0, 0).unwrap(),
        ));
        ctx
    }

    async fn insert_reminder(ctx: &RemindContext, user_id: &str) -> Reminder {
        let now = ctx.sys.now();
        let reminder = Reminder::new(
            user_id,
            ReminderAttributes {
                title: "Water plants".into(),
                description: "Balcony".into(),
                tags: vec!["home".into()],
                frequency: ReminderFrequency::Daily,
                should_expire: true,
                expiration_time: Some(now + Duration::days(30)),
                next_occurrence_time: now + Duration::days(1),
            },
            now,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::test]
    async fn merges_partial_changes_over_stored_fields() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "alice".into(),
            changes: RequestBody {
                reminder_description: Some("Balcony and kitchen".into()),
                ..Default::default()
            },
        };
        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(updated.description, "Balcony and kitchen");
        assert_eq!(updated.title, reminder.title);
        assert_eq!(updated.expiration_time, reminder.expiration_time);
        assert_eq!(updated.creation_time, reminder.creation_time);
        // Recomputed from the daily frequency, not inherited
        assert_eq!(
            updated.next_occurrence_time,
            ctx.sys.now() + Duration::days(1)
        );
    }

    #[actix_web::test]
    async fn update_propagates_to_all_shared_copies() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;
        let copy = reminder.shared_with("bob");
        ctx.repos.reminders.insert(&copy).await.unwrap();

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "bob".into(),
            changes: RequestBody {
                reminder_title: Some("Water all plants".into()),
                ..Default::default()
            },
        };
        execute(usecase, &ctx).await.unwrap();

        for row in ctx.repos.reminders.find_by_id(&reminder.id).await {
            assert_eq!(row.title, "Water all plants");
        }
    }

    #[actix_web::test]
    async fn rejects_update_of_foreign_reminder() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "eve".into(),
            changes: RequestBody::default(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn dropping_should_expire_clears_the_expiration() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "alice".into(),
            changes: RequestBody {
                should_expire: Some(false),
                ..Default::default()
            },
        };
        let updated = execute(usecase, &ctx).await.unwrap();
        assert!(!updated.should_expire);
        assert_eq!(updated.expiration_time, None);
    }

    #[actix_web::test]
    async fn invalid_merged_state_is_rejected() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "alice".into(),
            changes: RequestBody {
                reminder_title: Some("   ".into()),
                ..Default::default()
            },
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidReminder(_, ValidationError::EmptyTitle))
        ));

        // Stored reminder is untouched
        let stored = ctx
            .repos
            .reminders
            .find(&reminder.id, "alice")
            .await
            .unwrap();
        assert_eq!(stored.title, "Water plants");
    }
}
