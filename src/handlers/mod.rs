pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{get_random_question, get_session_details, start_session, submit_answer};

/// Registers every route together with a query extractor that reports
/// malformed parameters as a JSON `VALIDATION_ERROR`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .service(start_session)
    .service(get_random_question)
    .service(submit_answer)
    .service(get_session_details)
    .service(health_check)
    .service(health_check_ready);
}
