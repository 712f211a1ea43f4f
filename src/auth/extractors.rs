use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// Owner id of the caller, as resolved by [`AuthMiddleware`](super::AuthMiddleware).
///
/// Task handlers scope every operation by this value and never by ids found in
/// the request body. A route that takes it without the middleware in front
/// answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i64);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let found = req.extensions().get::<AuthenticatedUserId>().copied();
        ready(found.ok_or_else(|| {
            log::warn!("{} reached a handler without an identified caller", req.path());
            AppError::Unauthorized("No token, authorization denied".into()).into()
        }))
    }
}
