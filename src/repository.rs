use std::sync::{Mutex, MutexGuard};

use mockable::{Clock, DefaultClock};
use thiserror::Error;

use crate::{
    create_task_request::CreateTaskRequest,
    persist::{Store, StoreError},
    seed::seed_tasks,
    task::{Task, TaskId},
    task_status::TaskStatus,
    update_task_request::TaskPatch,
};

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

// ── The repository ─────────────────────────────────────────────

/// The authoritative task collection. Owns identity and status.
///
/// Every mutation is a full cycle: load the whole collection, change it in
/// memory, save the whole collection. Cycles are serialized by `write_lock`,
/// which only covers this process: two processes on one store race and the
/// last writer wins.
pub struct TaskRepository<S, C = DefaultClock> {
    store: S,
    clock: C,
    write_lock: Mutex<()>,
}

impl<S: Store> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, DefaultClock)
    }
}

impl<S, C> TaskRepository<S, C>
where
    S: Store,
    C: Clock + Send + Sync,
{
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Full collection in store order. Seeds the store on first use.
    pub fn list(&self) -> RepositoryResult<Vec<Task>> {
        let _guard = self.lock()?;
        self.load_or_seed()
    }

    pub fn create(&self, request: CreateTaskRequest) -> RepositoryResult<Task> {
        if request.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(RepositoryError::InvalidRequest("title is required".to_string()));
        }

        let task = Task::new(request, self.clock.utc());
        self.mutate(|tasks| {
            tasks.push(task.clone());
            Ok(())
        })?;
        tracing::debug!(id = %task.id, status = %task.status, "task created");
        Ok(task)
    }

    /// Shallow merge of `patch` onto the task. `id` and `created_at` never change.
    pub fn update(&self, id: &TaskId, patch: TaskPatch) -> RepositoryResult<Task> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(RepositoryError::InvalidRequest("title must not be empty".to_string()));
        }

        let updated = self.mutate(|tasks| {
            let slot = tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
            *slot = slot.clone().edit(patch);
            Ok(slot.clone())
        })?;
        tracing::debug!(id = %id, status = %updated.status, "task updated");
        Ok(updated)
    }

    /// Status-only update; the board's drag/move action.
    pub fn move_task(&self, id: &TaskId, status: TaskStatus) -> RepositoryResult<Task> {
        self.update(id, TaskPatch::status(status))
    }

    pub fn delete(&self, id: &TaskId) -> RepositoryResult<()> {
        self.mutate(|tasks| {
            let before = tasks.len();
            tasks.retain(|t| &t.id != id);
            if tasks.len() == before {
                return Err(RepositoryError::NotFound(id.clone()));
            }
            Ok(())
        })?;
        tracing::debug!(id = %id, "task deleted");
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| RepositoryError::StorageUnavailable(StoreError::Poisoned))
    }

    fn load_or_seed(&self) -> RepositoryResult<Vec<Task>> {
        if let Some(tasks) = self.store.load()? {
            return Ok(tasks);
        }

        let seeded = seed_tasks();
        self.store.save(&seeded)?;
        tracing::info!(count = seeded.len(), "seeded empty store");
        Ok(seeded)
    }

    /// One read-modify-write cycle. Nothing is saved if `change` fails.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<Task>) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let _guard = self.lock()?;
        let mut tasks = self.load_or_seed()?;
        let out = change(&mut tasks)?;
        self.store.save(&tasks)?;
        Ok(out)
    }
}

// ── Tests ──────────────────────────────────────────────────────
