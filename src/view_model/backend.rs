use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    create_task_request::CreateTaskRequest,
    repository::RepositoryError,
    task::{Task, TaskId},
    update_task_request::TaskPatch,
};

#[derive(Debug, Error)]
pub enum ViewModelError {
    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The request never got a usable answer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Local mode: the in-process repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ViewModelError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ViewModelError::Rejected { status: 404, .. } | ViewModelError::Repository(RepositoryError::NotFound(_))
        )
    }
}

pub type BackendResult<T> = Result<T, ViewModelError>;

/// The repository API as seen from the client.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    async fn fetch_all(&self) -> BackendResult<Vec<Task>>;

    async fn create(&self, request: CreateTaskRequest) -> BackendResult<Task>;

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> BackendResult<Task>;

    async fn delete(&self, id: &TaskId) -> BackendResult<()>;
}

#[async_trait]
impl<T: TaskBackend + ?Sized> TaskBackend for Arc<T> {
    async fn fetch_all(&self) -> BackendResult<Vec<Task>> {
        (**self).fetch_all().await
    }

    async fn create(&self, request: CreateTaskRequest) -> BackendResult<Task> {
        (**self).create(request).await
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> BackendResult<Task> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &TaskId) -> BackendResult<()> {
        (**self).delete(id).await
    }
}
