mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod get_reminders;
mod get_tags;
mod share_reminder;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use get_tags::get_tags_controller;
use remind_infra::{topics_for_user, RemindContext};
use share_reminder::share_reminder_controller;
use tracing::warn;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::post().to(share_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route("/tags", web::get().to(get_tags_controller));
}

/// Publish a confirmation to every topic belonging to `username`.
///
/// Confirmations are best effort. A reminder mutation that already went
/// through must not fail because the notification service is down.
pub(crate) async fn send_user_confirmation(ctx: &RemindContext, username: &str, message: &str) {
    let topics = match topics_for_user(ctx.notifier.as_ref(), username).await {
        Ok(topics) => topics,
        Err(e) => {
            warn!("Could not resolve topics for {}: {:?}", username, e);
            return;
        }
    };

    for topic in topics {
        if let Err(e) = ctx.notifier.publish(&topic, message).await {
            warn!("Could not publish confirmation to {}: {:?}", topic, e);
        }
    }
}
