use crate::error::RemindError;
use crate::reminder::send_user_confirmation;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::share_reminder::{APIResponse, PathParams, RequestBody};
use remind_domain::{Reminder, ID};
use remind_infra::RemindContext;

pub async fn share_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let target_username = match &body.username {
        Some(username) if !username.trim().is_empty() => username.trim().to_string(),
        _ => {
            return Err(RemindError::BadClientData {
                message: "Could not share the reminder!!".into(),
                error: "The message body needs to contain the username with whom the reminder needs to be shared!".into(),
            })
        }
    };

    let usecase = ShareReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        username: user.username,
        target_username,
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Reminder successfully shared!".into(),
            })
        })
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct ShareReminderUseCase {
    reminder_id: ID,
    username: String,
    target_username: String,
}

#[derive(Debug)]
struct UseCaseRes {
    pub reminder: Reminder,
    pub sharer: String,
    pub target: String,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound {
                message: "Could not share the reminder!!".into(),
                error: format!("No such reminder with id: {}", reminder_id),
            },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ShareReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ShareReminder";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id, &self.username)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        let copy = reminder.shared_with(&self.target_username);
        ctx.repos
            .reminders
            .insert(&copy)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            reminder,
            sharer: self.username.clone(),
            target: self.target_username.clone(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendConfirmationOnReminderShared)]
    }
}

struct SendConfirmationOnReminderShared;

#[async_trait::async_trait(?Send)]
impl Subscriber<ShareReminderUseCase> for SendConfirmationOnReminderShared {
    async fn notify(&self, res: &UseCaseRes, ctx: &RemindContext) {
        let date = res
            .reminder
            .expiration_time
            .unwrap_or(res.reminder.next_occurrence_time);
        let message = format!(
            "Reminder shared with user: {}.Reminder Details : {}. Expiration date : {}",
            res.target,
            res.reminder.description,
            date.format("%d/%m/%y %H:%M")
        );
        send_user_confirmation(ctx, &res.sharer, &message).await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use remind_domain::{ReminderAttributes, ReminderFrequency};
    use remind_infra::{setup_context_inmemory, FixedSys, InMemoryNotificationPublisher};
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
                title: "Team standup".into(),
                description: "Daily sync".into(),
                tags: vec!["work".into()],
                frequency: ReminderFrequency::Daily,
                should_expire: false,
                expiration_time: None,
                next_occurrence_time: now + chrono::Duration::days(1),
            },
            now,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::test]
    async fn duplicates_row_under_target_user() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = ShareReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "alice".into(),
            target_username: "bob".into(),
        };
        execute(usecase, &ctx).await.expect("to share reminder");

        let bobs = ctx.repos.reminders.find_by_user("bob").await;
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].id, reminder.id);
        assert_eq!(bobs[0].title, reminder.title);

        // The sharer keeps their own copy
        assert_eq!(ctx.repos.reminders.find_by_user("alice").await.len(), 1);
        assert_eq!(ctx.repos.reminders.find_by_id(&reminder.id).await.len(), 2);
    }

    #[actix_web::test]
    async fn resharing_with_the_same_user_keeps_a_single_copy() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        for _ in 0..2 {
            let usecase = ShareReminderUseCase {
                reminder_id: reminder.id.clone(),
                username: "alice".into(),
                target_username: "bob".into(),
            };
            execute(usecase, &ctx).await.expect("to share reminder");
        }

        assert_eq!(ctx.repos.reminders.find_by_user("bob").await.len(), 1);
        assert_eq!(ctx.repos.reminders.find_by_id(&reminder.id).await.len(), 2);
    }

    #[actix_web::test]
    async fn rejects_sharing_a_reminder_the_caller_does_not_own() {
        let ctx = setup();
        let reminder = insert_reminder(&ctx, "alice").await;

        let usecase = ShareReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "eve".into(),
            target_username: "bob".into(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotFound(_))));
        assert!(ctx.repos.reminders.find_by_user("bob").await.is_empty());
    }

    #[actix_web::test]
    async fn notifies_the_sharer_not_the_recipient() {
        let mut ctx = setup();
        let publisher = Arc::new(InMemoryNotificationPublisher::new());
        publisher.add_topic("reminders-alice");
        publisher.add_topic("reminders-bob");
        ctx.notifier = publisher.clone();

        let reminder = insert_reminder(&ctx, "alice").await;
        let usecase = ShareReminderUseCase {
            reminder_id: reminder.id.clone(),
            username: "alice".into(),
            target_username: "bob".into(),
        };
        execute(usecase, &ctx).await.expect("to share reminder");

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic, "reminders-alice");
        assert_eq!(
            published[0].message,
            "Reminder shared with user: bob.Reminder Details : Daily sync. \
             Expiration date : 16/01/30 12:00"
        );
    }
}
