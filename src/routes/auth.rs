use crate::{
    auth::{LoginRequest, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new account and returns its public view (`{id, username}`).
/// The client logs in separately to obtain a token.
///
/// ## Responses:
/// - `201 Created`: `{id, username}`.
/// - `400 Bad Request`: username or password missing or empty.
/// - `409 Conflict`: the username is taken.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = state.auth.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Exchanges a username and password for a bearer token valid for one hour
/// (configurable). Unknown usernames and wrong passwords get the same 400.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.auth.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
