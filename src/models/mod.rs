pub mod task;
pub mod user;

pub use task::{Task, TaskCompletion, TaskInput};
pub use user::{RegisteredUser, User};
