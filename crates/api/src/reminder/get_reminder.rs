use crate::error::RemindError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::dtos::ReminderDTO;
use remind_api_structs::get_reminder::PathParams;
use remind_domain::{Reminder, ID};
use remind_infra::RemindContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = GetReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        username: user.username,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(ReminderDTO::new(reminder)))
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct GetReminderUseCase {
    reminder_id: ID,
    username: String,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound {
                message: format!(
                    "Could not retrieve reminder with reminder id {}!!",
                    reminder_id
                ),
                error: format!("No such reminder with id: {}", reminder_id),
            },
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find(&self.reminder_id, &self.username)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}
