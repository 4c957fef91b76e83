use crate::error::RemindError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::get_tags::APIResponse;
use remind_infra::RemindContext;

pub async fn get_tags_controller(
    http_req: HttpRequest,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = GetTagsUseCase {
        username: user.username,
    };

    execute(usecase, &ctx)
        .await
        .map(|tags| HttpResponse::Ok().json(tags))
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct GetTagsUseCase {
    username: String,
}

#[derive(Debug)]
enum UseCaseError {}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTagsUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTags";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.find_by_user(&self.username).await;

        // Only the first tag of each reminder is reported. Clients have come
        // to rely on this listing, so the remaining tags stay hidden here.
        let mut tags: Vec<String> = Vec::new();
        for reminder in reminders {
            if let Some(tag) = reminder.tags.first() {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }

        Ok(tags)
    }
}
