use crate::error::RemindError;
use crate::reminder::send_user_confirmation;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::create_reminder::{APIResponse, RequestBody};
use remind_domain::{Reminder, ReminderRequest, ValidationError};
use remind_infra::RemindContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = CreateReminderUseCase {
        username: user.username,
        body: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(
                res.reminder.id,
                "New reminder successfully created!",
            ))
        })
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct CreateReminderUseCase {
    username: String,
    body: RequestBody,
}

#[derive(Debug)]
struct UseCaseRes {
    pub reminder: Reminder,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidReminder(ValidationError),
    DuplicateTitle { title: String, username: String },
    StorageError,
}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData {
                message: "Could not create a new reminder!!".into(),
                error: e.to_string(),
            },
            UseCaseError::DuplicateTitle { title, username } => Self::BadClientData {
                message: "Could not create a new reminder!!".into(),
                error: format!(
                    "There is already a reminder with name {} for user {}",
                    title, username
                ),
            },
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();

        let attributes = ReminderRequest {
            title: self.body.reminder_title.clone(),
            description: self.body.reminder_description.clone(),
            tags: self.body.reminder_tags.clone(),
            frequency: self.body.reminder_frequency,
            should_expire: self.body.should_expire,
            expiration_time: self
                .body
                .reminder_expiration_date_time
                .clone()
                .map(Into::into),
            next_occurrence_time: self.body.next_reminder_date_time.clone().map(Into::into),
        }
        .normalize(now, &ctx.config.datetime)
        .map_err(UseCaseError::InvalidReminder)?;

        let existing = ctx
            .repos
            .reminders
            .find_by_user_and_title(&self.username, &attributes.title)
            .await;
        if !existing.is_empty() {
            return Err(UseCaseError::DuplicateTitle {
                title: attributes.title,
                username: self.username.clone(),
            });
        }

        let reminder = Reminder::new(self.username.clone(), attributes, now);
        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes { reminder })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendConfirmationOnReminderCreated)]
    }
}

struct SendConfirmationOnReminderCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateReminderUseCase> for SendConfirmationOnReminderCreated {
    async fn notify(&self, res: &UseCaseRes, ctx: &RemindContext) {
        let reminder = &res.reminder;
        let date = reminder
            .expiration_time
            .unwrap_or(reminder.next_occurrence_time);
        let message = format!(
            "New reminder added for date : {}.Reminder Details : {}",
            date.format("%d/%m/%y %H:%M"),
            reminder.description
        );
        send_user_confirmation(ctx, &reminder.user_id, &message).await;
    }
}
