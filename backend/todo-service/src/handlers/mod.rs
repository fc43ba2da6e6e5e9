/// HTTP request handlers (REST API)
pub mod auth;
pub mod health;
pub mod tasks;

// Re-export handlers for easy access
pub use auth::{login, signup};
pub use health::{health, root};
pub use tasks::{create_task, delete_task, get_task, list_tasks, patch_task, update_task};
