//! SQL-backed stores. Each holds a clone of the shared pool and only ever runs
//! parameterized single-row statements.

pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::{UserStore, LOCKED_PASSWORD_HASH};
