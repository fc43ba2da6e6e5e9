/// Bounded execution of password hashing
///
/// bcrypt blocks the calling thread for its whole work factor. Calls run on
/// tokio's blocking pool, and a semaphore caps how many run at once so a
/// burst of logins cannot starve the runtime.
use crate::error::{AppError, Result};
use crypto_core::CredentialManager;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Clone)]
pub struct HashingPool {
    credentials: Arc<CredentialManager>,
    permits: Arc<Semaphore>,
}

impl HashingPool {
    pub fn new(credentials: CredentialManager, max_concurrent: usize) -> Self {
        Self {
            credentials: Arc::new(credentials),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    pub async fn hash(&self, raw_password: String) -> Result<String> {
        let credentials = self.credentials.clone();
        let hashed = self
            .run_blocking(move || credentials.hash(&raw_password))
            .await?;
        Ok(hashed?)
    }

    pub async fn verify(&self, raw_password: String, stored_hash: String) -> Result<bool> {
        let credentials = self.credentials.clone();
        self.run_blocking(move || credentials.verify(&raw_password, &stored_hash))
            .await
    }

    async fn run_blocking<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(format!("hashing pool closed: {e}")))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))
    }
}
