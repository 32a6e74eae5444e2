//! Client-side mirror of the board.
//!
//! [`BoardViewModel`] holds a disposable copy of the task collection for
//! rendering. It only changes local state after the backend confirmed the
//! change, so a failed call never leaves a phantom card behind. Where the
//! backend lives is a configuration choice ([`ClientMode`]):
//!
//! - `remote`: [`RemoteBackend`] talks to the HTTP API.
//! - `local`:  [`LocalBackend`] drives a repository in-process.

pub mod backend;
pub mod board;
pub mod local;
pub mod remote;

pub use backend::{BackendResult, TaskBackend, ViewModelError};
pub use board::{BoardState, BoardViewModel, Column};
pub use local::LocalBackend;
pub use remote::RemoteBackend;

use std::sync::Arc;

use crate::{
    persist::open_store,
    repository::{RepositoryError, TaskRepository},
    settings::{ClientMode, Settings},
};

/// Build the backend selected by `client.mode`.
pub fn backend_from_settings(settings: &Settings) -> BackendResult<Arc<dyn TaskBackend>> {
    let backend: Arc<dyn TaskBackend> = match settings.client.mode {
        ClientMode::Remote => Arc::new(RemoteBackend::new(&settings.client.base_url)),
        ClientMode::Local => {
            let store = open_store(&settings.store).map_err(RepositoryError::from)?;
            Arc::new(LocalBackend::new(Arc::new(TaskRepository::new(store))))
        }
    };
    tracing::debug!(mode = ?settings.client.mode, "board backend ready");
    Ok(backend)
}

/// A view model wired to whatever backend the settings ask for.
pub fn connect(settings: &Settings) -> BackendResult<BoardViewModel<Arc<dyn TaskBackend>>> {
    Ok(BoardViewModel::new(backend_from_settings(settings)?))
}
