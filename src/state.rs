//! Application context shared by all workers.

use chrono::Duration;
use sqlx::SqlitePool;

use crate::auth::{AuthService, TokenService};
use crate::config::{AuthMode, Config};
use crate::error::AppError;
use crate::store::{TaskStore, UserStore};
use crate::tasks::TaskService;

/// Username of the owner of every task in single-user mode.
pub const LOCAL_OWNER: &str = "local";

/// Everything a handler needs, built once at startup and shared through
/// `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    mode: AuthMode,
    fixed_owner: Option<i64>,
}

impl AppState {
    /// Wires the stores and services over `pool`.
    ///
    /// In single-user mode the fixed owner is created on first start. Startup
    /// fails if that name already belongs to an account with a password.
    pub async fn build(pool: SqlitePool, config: &Config) -> Result<Self, AppError> {
        let users = UserStore::new(pool.clone());
        let tokens = TokenService::new(
            &config.jwt_secret,
            Duration::seconds(config.token_ttl_secs),
        );

        let fixed_owner = match config.mode {
            AuthMode::MultiUser => None,
            AuthMode::SingleUser => {
                let owner = users.ensure_user(LOCAL_OWNER).await?;
                log::info!("single-user mode: tasks are owned by user {}", owner.id);
                Some(owner.id)
            }
        };

        Ok(Self {
            auth: AuthService::new(users, tokens, config.bcrypt_cost)?,
            tasks: TaskService::new(TaskStore::new(pool)),
            mode: config.mode,
            fixed_owner,
        })
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Resolves the caller of a task route to the owner id that scopes it.
    pub fn identify(&self, authorization: Option<&str>) -> Result<i64, AppError> {
        match self.fixed_owner {
            Some(owner_id) => Ok(owner_id),
            None => self.auth.authenticate(authorization),
        }
    }
}
