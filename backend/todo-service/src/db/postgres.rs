/// PostgreSQL-backed store
use super::{TaskStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::{Task, TaskChanges, User};
use async_trait::async_trait;
use sqlx::PgPool;

const UNIQUE_VIOLATION: &str = "23505";

const TASK_COLUMNS: &str =
    "id, owner_id, task_name, description, is_completed, completed_at, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateIdentity
            } else {
                AppError::Database(e)
            }
        })
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(
        &self,
        owner_id: i64,
        task_name: &str,
        description: Option<&str>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (owner_id, task_name, description) VALUES ($1, $2, $3) RETURNING {TASK_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(task_name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn list_tasks(&self, owner_id: i64) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_task(&self, owner_id: i64, task_id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner_id = $2"
        ))
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update_task(
        &self,
        owner_id: i64,
        task_id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>> {
        let (set_description, description) = match changes.description {
            Some(value) => (true, value),
            None => (false, None),
        };

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks SET
                task_name = COALESCE($3, task_name),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                is_completed = COALESCE($6, is_completed),
                completed_at = CASE
                    WHEN $6 IS NULL THEN completed_at
                    WHEN $6 THEN COALESCE(completed_at, NOW())
                    ELSE NULL
                END
            WHERE id = $1 AND owner_id = $2
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task_id)
        .bind(owner_id)
        .bind(changes.task_name)
        .bind(set_description)
        .bind(description)
        .bind(changes.is_completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, owner_id: i64, task_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
