/// Data models for identities and tasks
pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, PatchTaskRequest, Task, TaskChanges, UpdateTaskRequest};
pub use user::{LoginForm, SignupRequest, User, UserResponse};
