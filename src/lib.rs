#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "A small task tracker: users register and log in, then manage their own tasks"]
#![doc = "through a JSON API. Every task operation is scoped to the user named by the"]
#![doc = "bearer token presented with the request."]
#![doc = ""]
#![doc = "The binary (`main.rs`) reads the configuration, builds an [`state::AppState`]"]
#![doc = "and mounts [`routes::config`] on an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod tasks;

pub use crate::config::{AuthMode, Config};
pub use crate::error::AppError;
pub use crate::state::AppState;
