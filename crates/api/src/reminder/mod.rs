mod create_reminder;
mod delete_reminder;
mod get_reminders;
pub mod monitor_reminders;
mod snooze_reminder;
mod verify_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminders::get_reminders_controller;
use monitor_reminders::monitor_reminders_controller;
use snooze_reminder::snooze_reminder_controller;
use verify_reminder::verify_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/users/{user_id}/reminders",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders",
        web::get().to(get_reminders_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
    cfg.route(
        "/users/{user_id}/reminders/{reminder_id}/verify",
        web::post().to(verify_reminder_controller),
    );

    // The sweep boundary: one evaluation pass over all reminders
    cfg.route(
        "/reminders/monitor",
        web::post().to(monitor_reminders_controller),
    );
}
