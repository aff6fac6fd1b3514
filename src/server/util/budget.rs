use std::{future::Future, time::Duration};

use crate::server::error::AppError;

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on how long a single store operation may take.
///
/// An operation that exceeds the budget is dropped and reported as
/// `AppError::StoreTimeout`. It is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreBudget(Duration);

impl StoreBudget {
    pub fn new(timeout: Duration) -> Self {
        Self(timeout)
    }

    /// Runs `operation`, failing with `AppError::StoreTimeout` once the budget runs out.
    pub async fn run<T, E, F>(&self, operation: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, E>>,
        AppError: From<E>,
    {
        match tokio::time::timeout(self.0, operation).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::StoreTimeout(self.0)),
        }
    }
}

impl Default for StoreBudget {
    fn default() -> Self {
        Self(DEFAULT_STORE_TIMEOUT)
    }
}
