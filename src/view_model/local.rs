use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::{
    create_task_request::CreateTaskRequest,
    persist::Store,
    repository::TaskRepository,
    task::{Task, TaskId},
    update_task_request::TaskPatch,
};

use super::backend::{BackendResult, TaskBackend};

/// Local-only mode: the repository runs in the same process as the board.
pub struct LocalBackend<S, C = DefaultClock> {
    repository: Arc<TaskRepository<S, C>>,
}

impl<S, C> LocalBackend<S, C> {
    pub fn new(repository: Arc<TaskRepository<S, C>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<S, C> TaskBackend for LocalBackend<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    async fn fetch_all(&self) -> BackendResult<Vec<Task>> {
        Ok(self.repository.list()?)
    }

    async fn create(&self, request: CreateTaskRequest) -> BackendResult<Task> {
        Ok(self.repository.create(request)?)
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> BackendResult<Task> {
        Ok(self.repository.update(id, patch)?)
    }

    async fn delete(&self, id: &TaskId) -> BackendResult<()> {
        Ok(self.repository.delete(id)?)
    }
}
