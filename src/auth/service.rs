//! Registration, login and token authentication.

use actix_web::web;
use validator::Validate;

use super::password::{hash_password, verify_password};
use super::token::TokenService;
use super::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::AppError;
use crate::models::RegisteredUser;
use crate::state::LOCAL_OWNER;
use crate::store::{UserStore, LOCKED_PASSWORD_HASH};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    tokens: TokenService,
    bcrypt_cost: u32,
    // Verified against when the account is unknown or locked, so every
    // rejected login costs one bcrypt verification.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(users: UserStore, tokens: TokenService, bcrypt_cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash_password("taskgate-dummy-password", bcrypt_cost)?;
        Ok(Self {
            users,
            tokens,
            bcrypt_cost,
            dummy_hash,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Creates an account. The password is hashed off the async workers.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisteredUser, AppError> {
        request.validate()?;
        if request.username == LOCAL_OWNER {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        let cost = self.bcrypt_cost;
        let password = request.password;
        let password_hash = web::block(move || hash_password(&password, cost)).await??;

        let user = self.users.create(&request.username, &password_hash).await?;
        log::info!("registered user {} ({})", user.id, user.username);
        Ok(user.into())
    }

    /// Checks the credentials and mints a token.
    ///
    /// An unknown username and a wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .filter(|user| user.password_hash != LOCKED_PASSWORD_HASH);

        let password = request.password;
        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let matches = web::block(move || verify_password(&password, &stored_hash)).await??;

        let user = match user {
            Some(user) if matches => user,
            Some(user) => {
                log::warn!("rejected login for user {}", user.id);
                return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
            }
            None => {
                log::warn!("rejected login for unknown or locked account");
                return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
            }
        };

        let token = self.tokens.mint(user.id)?;
        log::info!("user {} logged in", user.id);
        Ok(LoginResponse { token })
    }

    /// Resolves the `Authorization` header value to a user id.
    ///
    /// The scheme name is matched case-insensitively.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<i64, AppError> {
        let token = authorization
            .and_then(|value| value.trim_start().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".into()))?;

        self.tokens.verify(token).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::{Duration, Utc};

    async fn service() -> AuthService {
        let pool = db::connect("sqlite::memory:", 1).await.unwrap();
        db::migrate(&pool).await.unwrap();
        AuthService::new(
            UserStore::new(pool),
            TokenService::new("service-test-secret", Duration::hours(1)),
            4,
        )
        .unwrap()
    }

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_register_then_login_round_trip() {
        let auth = service().await;
        let user = auth.register(register("alice", "pw123")).await.unwrap();
        assert_eq!(user.username, "alice");

        let response = auth.login(login("alice", "pw123")).await.unwrap();
        let header = format!("Bearer {}", response.token);
        assert_eq!(auth.authenticate(Some(&header)).unwrap(), user.id);
    }

    #[actix_rt::test]
    async fn test_register_rejects_empty_fields_and_duplicates() {
        let auth = service().await;
        assert!(matches!(
            auth.register(register("", "pw")).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            auth.register(register("alice", "")).await,
            Err(AppError::ValidationError(_))
        ));

        auth.register(register("alice", "pw123")).await.unwrap();
        assert!(matches!(
            auth.register(register("alice", "other")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[actix_rt::test]
    async fn test_login_failures_are_uniform() {
        let auth = service().await;
        auth.register(register("alice", "pw123")).await.unwrap();

        let wrong_password = auth.login(login("alice", "nope")).await.unwrap_err();
        let unknown_user = auth.login(login("mallory", "pw123")).await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, AppError::BadRequest(_)));
    }

    #[actix_rt::test]
    async fn test_local_owner_name_is_reserved() {
        let auth = service().await;
        assert!(matches!(
            auth.register(register(LOCAL_OWNER, "pw123")).await,
            Err(AppError::Conflict(_))
        ));
        assert!(auth.users.find_by_username(LOCAL_OWNER).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_unknown_user_is_checked_against_dummy_hash() {
        let auth = service().await;
        // Same cost as real hashes, so the rejection takes as long.
        assert!(auth.dummy_hash.starts_with("$2b$04$"));
        assert!(!verify_password("pw123", &auth.dummy_hash).unwrap());

        assert!(matches!(
            auth.login(login("nobody", "taskgate-dummy-password")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[actix_rt::test]
    async fn test_locked_account_cannot_log_in() {
        let auth = service().await;
        auth.users.ensure_user("local").await.unwrap();
        assert!(matches!(
            auth.login(login("local", "anything")).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[actix_rt::test]
    async fn test_bearer_scheme_is_case_insensitive() {
        let auth = service().await;
        let token = auth.tokens().mint(7).unwrap();
        for scheme in ["Bearer", "bearer", "BEARER"] {
            let header = format!("{} {}", scheme, token);
            assert_eq!(auth.authenticate(Some(&header)).unwrap(), 7, "{}", scheme);
        }
    }

    #[actix_rt::test]
    async fn test_authenticate_header_handling() {
        let auth = service().await;

        match auth.authenticate(None) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "No token, authorization denied"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(auth.authenticate(Some("Basic abc")).is_err());
        assert!(auth.authenticate(Some("Bearer ")).is_err());
        assert!(auth.authenticate(Some("Bearer")).is_err());

        match auth.authenticate(Some("Bearer garbage")) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token is not valid"),
            other => panic!("unexpected {:?}", other),
        }

        let expired = auth
            .tokens()
            .mint_at(1, Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(auth.authenticate(Some(&format!("Bearer {}", expired))).is_err());
    }
}
