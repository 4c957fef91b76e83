use crate::error::RemindError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use remind_api_structs::dtos::{NotificationReceiptDTO, UserNotificationsDTO};
use remind_api_structs::send_due_reminders::{APIResponse, JobUser, RequestBody};
use remind_infra::RemindContext;
use std::collections::HashMap;
use tracing::warn;

pub async fn send_due_reminders_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let usecase = SendDueRemindersUseCase { users: body.0.users };

    execute(usecase, &ctx)
        .await
        .map(|details| HttpResponse::Ok().json(APIResponse { details }))
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct SendDueRemindersUseCase {
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
impl UseCase for SendDueRemindersUseCase {
    type Response = HashMap<String, UserNotificationsDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let users = self.users.take().ok_or(UseCaseError::MissingUsers)?;
        let today = ctx.sys.now().date_naive();

        let mut details = HashMap::new();
        for user in users {
            let email = ctx.directory.find_email(&user.username).await;

            let mut notifications = Vec::new();
            let reminders = ctx.repos.reminders.find_by_user(&user.username).await;
            for reminder in reminders {
                if reminder.next_occurrence_time.date_naive() != today {
                    continue;
                }

                let message_body = match &reminder.expiration_time {
                    Some(expiration) => format!(
                        "{} \n Reminder due date: {}",
                        reminder.description,
                        expiration.format("%d %B, %Y %H:%M")
                    ),
                    None => reminder.description.clone(),
                };

                match ctx.notifier.publish(&user.topic, &message_body).await {
                    Ok(sns_response) => notifications.push(NotificationReceiptDTO {
                        sns_response,
                        message_body,
                    }),
                    Err(e) => {
                        warn!(
                            "Could not notify {} about reminder {}: {:?}",
                            user.username, reminder.id, e
                        );
                    }
                }
            }

            details.insert(
                user.username.clone(),
                UserNotificationsDTO {
                    email,
                    notifications,
                },
            );
        }

        Ok(details)
    }
}
