mod connect_caregiver;
mod create_user;
mod get_adherence_log;
mod get_user;
mod get_verifications;

use actix_web::web;
use connect_caregiver::connect_caregiver_controller;
use create_user::create_user_controller;
use get_adherence_log::get_adherence_log_controller;
use get_user::get_user_controller;
use get_verifications::get_verifications_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user_controller));
    cfg.route("/users/{user_id}", web::get().to(get_user_controller));
    cfg.route(
        "/users/{caregiver_id}/patients",
        web::post().to(connect_caregiver_controller),
    );
    cfg.route(
        "/users/{user_id}/adherence",
        web::get().to(get_adherence_log_controller),
    );
    cfg.route(
        "/users/{user_id}/verifications",
        web::get().to(get_verifications_controller),
    );
}
