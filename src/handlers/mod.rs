pub mod content_handler;
pub mod health_handler;
pub mod session_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Registers every route of the service. The review route shares its
/// shape with the open-stage route and has to come first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .service(content_handler::list_reading_sets)
        .service(content_handler::create_reading_set)
        .service(content_handler::get_reading_set)
        .service(content_handler::update_reading_set)
        .service(content_handler::delete_reading_set)
        .service(content_handler::list_listening_sets)
        .service(content_handler::get_listening_set)
        .service(content_handler::list_writing_tasks)
        .service(content_handler::get_writing_task)
        .service(session_handler::create_session)
        .service(session_handler::review_stage)
        .service(session_handler::open_stage)
        .service(session_handler::get_stage)
        .service(session_handler::record_answer)
        .service(session_handler::get_scores)
        .service(session_handler::get_results);
}
