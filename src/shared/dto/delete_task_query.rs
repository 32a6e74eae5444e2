use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// Query string of `DELETE /tasks?id=<id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteTaskQuery {
    pub id: Option<TaskId>,
}
