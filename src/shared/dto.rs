// Requests
pub mod create_task_request;
pub mod update_task_request;
pub mod delete_task_query;


// Responses
pub mod delete_task_response;
pub mod error_response;
