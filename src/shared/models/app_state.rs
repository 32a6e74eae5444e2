use std::sync::Arc;

use crate::{persist::Store, repository::TaskRepository};

pub struct AppState {
    pub repository: Arc<TaskRepository<Box<dyn Store>>>,
}

impl AppState {
    pub fn new(repository: Arc<TaskRepository<Box<dyn Store>>>) -> Self {
        Self { repository }
    }
}

pub type SharedState = Arc<AppState>;
