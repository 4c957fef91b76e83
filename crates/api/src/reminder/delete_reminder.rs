use crate::error::RemindError;
use crate::reminder::send_user_confirmation;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::delete_reminder::{APIResponse, PathParams};
use remind_domain::{Reminder, ID};
use remind_infra::RemindContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        username: user.username,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.reminder.id.clone(),
                "Reminder successfully deleted!",
            ))
        })
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct DeleteReminderUseCase {
    reminder_id: ID,
    username: String,
}

#[derive(Debug)]
struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound { reminder_id: ID, username: String },
    StorageError,
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound {
                reminder_id,
                username,
            } => Self::NotFound {
                message: format!("Could not delete reminder {}!!", reminder_id),
                error: format!(
                    "No reminder with reminder id: {} exists for {}",
                    reminder_id, username
                ),
            },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id, &self.username)
            .await
            .ok_or_else(|| UseCaseError::NotFound {
                reminder_id: self.reminder_id.clone(),
                username: self.username.clone(),
            })?;

        // Deleting removes the reminder for every user it was shared with
        ctx.repos
            .reminders
            .delete_by_id(&self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { reminder })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendConfirmationOnReminderDeleted)]
    }
}

struct SendConfirmationOnReminderDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteReminderUseCase> for SendConfirmationOnReminderDeleted {
    async fn notify(&self, res: &UseCaseRes, ctx: &RemindContext) {
        let message = format!(
            "Reminder id : {} with details : {} is deleted.",
            res.reminder.id, res.reminder.description
        );
        send_user_confirmation(ctx, &res.reminder.user_id, &message).await;
    }
}
