use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    create_task_request::CreateTaskRequest,
    task::{Task, TaskId},
    task_status::TaskStatus,
    update_task_request::TaskPatch,
};

use super::backend::{BackendResult, TaskBackend};

/// Snapshot of what the board shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    /// True once the initial fetch settled, successfully or not.
    pub loaded: bool,
    /// Message of the most recent failed action, cleared by the next success.
    pub error: Option<String>,
}

/// One board column, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: TaskStatus,
    pub title: &'static str,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Board state container, created once at the application root and shared
/// (behind an `Arc`) with whatever renders it.
///
/// Every action is one backend round trip; local state changes only after
/// the backend succeeded. The state lock is never held across an await, so
/// actions may overlap and their responses land in arrival order.
pub struct BoardViewModel<B> {
    backend: B,
    state: RwLock<BoardState>,
}

impl<B: TaskBackend> BoardViewModel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RwLock::new(BoardState::default()),
        }
    }

    /// Initial fetch of the whole collection.
    pub async fn load(&self) -> BackendResult<()> {
        let result = self.backend.fetch_all().await;
        let mut state = self.write();
        state.loaded = true;
        settle(&mut state, "load", result, |state, tasks| state.tasks = tasks)
    }

    /// Create on the backend, then append the server's version of the task.
    pub async fn add(&self, request: CreateTaskRequest) -> BackendResult<Task> {
        let result = self.backend.create(request).await;
        settle(&mut self.write(), "add", result, |state, task: Task| {
            state.tasks.push(task.clone());
            task
        })
    }

    /// Update on the backend, then swap in the returned task.
    pub async fn edit(&self, id: &TaskId, patch: TaskPatch) -> BackendResult<Task> {
        let result = self.backend.update(id, patch).await;
        settle(&mut self.write(), "edit", result, |state, task: Task| {
            if let Some(slot) = state.tasks.iter_mut().find(|t| &t.id == id) {
                *slot = task.clone();
            }
            task
        })
    }

    pub async fn remove(&self, id: &TaskId) -> BackendResult<()> {
        let result = self.backend.delete(id).await;
        settle(&mut self.write(), "remove", result, |state, ()| {
            state.tasks.retain(|t| &t.id != id);
        })
    }

    /// Status-only update. On success the local card takes the new status
    /// directly; the response body is not consulted.
    pub async fn move_task(&self, id: &TaskId, status: TaskStatus) -> BackendResult<()> {
        let result = self.backend.update(id, TaskPatch::status(status)).await;
        settle(&mut self.write(), "move", result, |state, _| {
            if let Some(task) = state.tasks.iter_mut().find(|t| &t.id == id) {
                task.status = status;
            }
        })
    }

    // ── Projections ────────────────────────────────────────────

    /// Tasks of one column in collection order.
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.read().tasks.iter().filter(|t| t.status == status).cloned().collect()
    }

    /// All three columns in board order.
    pub fn columns(&self) -> Vec<Column> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                title: status.title(),
                tasks: self.by_status(status),
            })
            .collect()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    pub fn snapshot(&self) -> BoardState {
        self.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.read().loaded
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Apply a successful result to local state, or log and record the failure
/// and leave the tasks alone.
fn settle<T, R>(
    state: &mut BoardState,
    action: &'static str,
    result: BackendResult<T>,
    apply: impl FnOnce(&mut BoardState, T) -> R,
) -> BackendResult<R> {
    match result {
        Ok(value) => {
            state.error = None;
            Ok(apply(state, value))
        }
        Err(e) => {
            tracing::error!(action, error = %e, "board action failed");
            state.error = Some(e.to_string());
            Err(e)
        }
    }
}
