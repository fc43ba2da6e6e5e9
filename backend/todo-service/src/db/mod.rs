/// Persistence for identities and tasks
///
/// Handlers only see the `UserStore` / `TaskStore` traits. Every task
/// operation takes the caller's identity id and never touches rows owned by
/// anyone else.
pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::Result;
use crate::models::{Task, TaskChanges, User};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[async_trait]
pub trait UserStore: Send + Sync {
    /// `email` is expected in normalized form
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a new identity
    ///
    /// # Errors
    ///
    /// `AppError::DuplicateIdentity` when the email is already taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(
        &self,
        owner_id: i64,
        task_name: &str,
        description: Option<&str>,
    ) -> Result<Task>;

    /// All tasks of `owner_id`, ordered by id
    async fn list_tasks(&self, owner_id: i64) -> Result<Vec<Task>>;

    async fn get_task(&self, owner_id: i64, task_id: i64) -> Result<Option<Task>>;

    /// `None` when the task does not exist or belongs to someone else
    async fn update_task(
        &self,
        owner_id: i64,
        task_id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>>;

    /// `false` when nothing was deleted
    async fn delete_task(&self, owner_id: i64, task_id: i64) -> Result<bool>;
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
