use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    app_state::SharedState,
    create_task_request::CreateTaskRequest,
    delete_task_query::DeleteTaskQuery,
    delete_task_response::DeleteTaskResponse,
    task::{Task, TaskId},
    update_task_request::UpdateTaskRequest,
};

use super::api_error::ApiError;

pub struct TaskController {}

impl TaskController {
    // GET /tasks
    pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Task>>, ApiError> {
        Ok(Json(state.repository.list()?))
    }

    // POST /tasks
    pub async fn create(
        State(state): State<SharedState>,
        payload: Result<Json<CreateTaskRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<Task>), ApiError> {
        let Json(request) = payload?;
        let task = state.repository.create(request)?;
        Ok((StatusCode::CREATED, Json(task)))
    }

    // PUT /tasks
    pub async fn update(
        State(state): State<SharedState>,
        payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
    ) -> Result<Json<Task>, ApiError> {
        let Json(request) = payload?;
        let id = required_id(request.id)?;
        Ok(Json(state.repository.update(&id, request.patch)?))
    }

    // DELETE /tasks?id=<id>
    pub async fn delete(
        State(state): State<SharedState>,
        Query(query): Query<DeleteTaskQuery>,
    ) -> Result<Json<DeleteTaskResponse>, ApiError> {
        let id = required_id(query.id)?;
        state.repository.delete(&id)?;
        Ok(Json(DeleteTaskResponse { success: true }))
    }
}

fn required_id(id: Option<TaskId>) -> Result<TaskId, ApiError> {
    id.filter(|id| !id.as_str().is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("Task ID required".to_string()))
}
