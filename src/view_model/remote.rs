use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    create_task_request::CreateTaskRequest,
    error_response::ErrorResponse,
    task::{Task, TaskId},
    update_task_request::{TaskPatch, UpdateTaskRequest},
};

use super::backend::{BackendResult, TaskBackend, ViewModelError};

/// Remote mode: one HTTP round trip per call against `<base_url>/tasks`.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: Client,
    tasks_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            tasks_url: format!("{}/tasks", base_url.trim_end_matches('/')),
        }
    }
}

/// Turn a non-2xx answer into [`ViewModelError::Rejected`], keeping the
/// server's `{"error": ...}` message when there is one.
async fn accepted(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    Err(ViewModelError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskBackend for RemoteBackend {
    async fn fetch_all(&self) -> BackendResult<Vec<Task>> {
        let response = self.client.get(&self.tasks_url).send().await?;
        Ok(accepted(response).await?.json().await?)
    }

    async fn create(&self, request: CreateTaskRequest) -> BackendResult<Task> {
        let response = self.client.post(&self.tasks_url).json(&request).send().await?;
        Ok(accepted(response).await?.json().await?)
    }

    async fn update(&self, id: &TaskId, patch: TaskPatch) -> BackendResult<Task> {
        let body = UpdateTaskRequest {
            id: Some(id.clone()),
            patch,
        };
        let response = self.client.put(&self.tasks_url).json(&body).send().await?;
        Ok(accepted(response).await?.json().await?)
    }

    async fn delete(&self, id: &TaskId) -> BackendResult<()> {
        let response = self
            .client
            .delete(&self.tasks_url)
            .query(&[("id", id.as_str())])
            .send()
            .await?;
        accepted(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_url_ignores_trailing_slash() {
        assert_eq!(RemoteBackend::new("http://localhost:3000/").tasks_url, "http://localhost:3000/tasks");
        assert_eq!(RemoteBackend::new("http://localhost:3000").tasks_url, "http://localhost:3000/tasks");
    }
}
