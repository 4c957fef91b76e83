use crate::error::RemindError;
use crate::shared::auth::protect_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use remind_api_structs::dtos::ReminderSummaryDTO;
use remind_api_structs::get_reminders::{APIResponse, QueryParams};
use remind_domain::Reminder;
use remind_infra::RemindContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<RemindContext>,
) -> Result<HttpResponse, RemindError> {
    let user = protect_route(&http_req)?;

    let usecase = GetRemindersUseCase {
        username: user.username,
        tag: query_params.0.tag,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| {
            let res: APIResponse = reminders.into_iter().map(ReminderSummaryDTO::new).collect();
            HttpResponse::Ok().json(res)
        })
        .map_err(RemindError::from)
}

#[derive(Debug)]
struct GetRemindersUseCase {
    username: String,
    tag: Option<String>,
}

#[derive(Debug)]
enum UseCaseError {}

impl From<UseCaseError> for RemindError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &RemindContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = match &self.tag {
            Some(tag) => {
                ctx.repos
                    .reminders
                    .find_by_user_and_tag(&self.username, tag)
                    .await
            }
            None => ctx.repos.reminders.find_by_user(&self.username).await,
        };

        // Soonest expiration first, non-expiring reminders at the end
        reminders.sort_by_key(|r| (r.expiration_time.is_none(), r.expiration_time));

        Ok(reminders)
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

    async fn insert_reminder(
        ctx: &RemindContext,
        user_id: &str,
        title: &str,
        tags: Vec<String>,
        expires_in_days: Option<i64>,
    ) {
        let now = ctx.sys.now();
        let reminder = Reminder::new(
            user_id,
            ReminderAttributes {
                title: title.into(),
                description: String::new(),
                tags,
                frequency: ReminderFrequency::Daily,
                should_expire: expires_in_days.is_some(),
                expiration_time: expires_in_days.map(|days| now + Duration::days(days)),
                next_occurrence_time: now + Duration::days(1),
            },
            now,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
    }

    #[actix_web::test]
    async fn lists_only_the_callers_reminders() {
        let ctx = setup();
        insert_reminder(&ctx, "alice", "Mine", vec![], None).await;
        insert_reminder(&ctx, "bob", "Not mine", vec![], None).await;

        let usecase = GetRemindersUseCase {
            username: "alice".into(),
            tag: None,
        };
        let reminders = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].title, "Mine");
    }

    #[actix_web::test]
    async fn sorts_by_expiration_with_non_expiring_last() {
        let ctx = setup();
        insert_reminder(&ctx, "alice", "Never expires", vec![], None).await;
        insert_reminder(&ctx, "alice", "Expires late", vec![], Some(30)).await;
        insert_reminder(&ctx, "alice", "Expires soon", vec![], Some(3)).await;

        let usecase = GetRemindersUseCase {
            username: "alice".into(),
            tag: None,
        };
        let reminders = execute(usecase, &ctx).await.unwrap();
        let titles: Vec<_> = reminders.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Expires soon", "Expires late", "Never expires"]);
    }

    #[actix_web::test]
    async fn filters_by_tag() {
        let ctx = setup();
        insert_reminder(&ctx, "alice", "Bill", vec!["bills".into()], None).await;
        insert_reminder(&ctx, "alice", "Gym", vec!["health".into()], None).await;

        let usecase = GetRemindersUseCase {
            username: "alice".into(),
            tag: Some("bills".into()),
        };
        let reminders = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].title, "Bill");

        let usecase = GetRemindersUseCase {
            username: "alice".into(),
            tag: Some("unknown".into()),
        };
        assert!(execute(usecase, &ctx).await.unwrap().is_empty());
    }
}
