/// In-process store used by tests and by local runs without `DATABASE_URL`
use super::{TaskStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::{Task, TaskChanges, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == email) {
            return Err(AppError::DuplicateIdentity);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(
        &self,
        owner_id: i64,
        task_name: &str,
        description: Option<&str>,
    ) -> Result<Task> {
        let mut tables = self.tables.write().await;
        tables.next_task_id += 1;
        let task = Task {
            id: tables.next_task_id,
            owner_id,
            task_name: task_name.to_string(),
            description: description.map(str::to_string),
            is_completed: false,
            completed_at: None,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner_id: i64) -> Result<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_task(&self, owner_id: i64, task_id: i64) -> Result<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&task_id)
            .filter(|t| t.owner_id == owner_id)
            .cloned())
    }

    async fn update_task(
        &self,
        owner_id: i64,
        task_id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Task>> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables
            .tasks
            .get_mut(&task_id)
            .filter(|t| t.owner_id == owner_id)
        else {
            return Ok(None);
        };

        task.apply(changes, Utc::now());
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, owner_id: i64, task_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .tasks
            .get(&task_id)
            .is_some_and(|t| t.owner_id == owner_id);
        if owned {
            tables.tasks.remove(&task_id);
        }
        Ok(owned)
    }
}
