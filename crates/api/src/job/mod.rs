mod purge_expired_reminders;
mod send_due_reminders;

use actix_web::web;
use purge_expired_reminders::purge_expired_reminders_controller;
use send_due_reminders::send_due_reminders_controller;

// Invoked by the external scheduler, not by end users, so no auth headers
// are expected on these routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/jobs/send-due-reminders",
        web::post().to(send_due_reminders_controller),
    );
    cfg.route(
        "/jobs/purge-expired-reminders",
        web::post().to(purge_expired_reminders_controller),
    );
}
