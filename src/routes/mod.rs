pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error, web, HttpRequest};

use crate::auth::AuthMiddleware;
use crate::config::AuthMode;
use crate::error::AppError;

/// Registers every route for `mode`.
///
/// `/register` and `/login` only exist in multi-user mode; the task routes are
/// always behind [`AuthMiddleware`], which in single-user mode admits every
/// request as the fixed owner.
pub fn config(cfg: &mut web::ServiceConfig, mode: AuthMode) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(health::health);

    if mode == AuthMode::MultiUser {
        cfg.service(auth::register).service(auth::login);
    }

    cfg.service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

// A non-numeric id can never name a task, so it gets the same answer as an unknown one.
fn path_error(_err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound("Task not found or user not authorized".into()).into()
}
