use chrono::NaiveDate;
use serde::{de::DeserializeOwned, de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

/// Body of `POST /tasks`. Only `title` is required; the repository rejects
/// a missing or blank one. `""` for status, priority or due date means
/// "use the default", as form inputs send it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub priority: Option<TaskPriority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// `null` and `""` both read as absent.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let request: CreateTaskRequest = serde_json::from_str(
            r#"{"title":"x","description":"","status":"","priority":"","dueDate":""}"#,
        )
        .unwrap();
        assert_eq!(request.status, None);
        assert_eq!(request.priority, None);
        assert_eq!(request.due_date, None);
        assert_eq!(request.description.as_deref(), Some(""));

        let nulls: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"x","status":null,"dueDate":null}"#).unwrap();
        assert_eq!(nulls, CreateTaskRequest::titled("x"));
    }

    #[test]
    fn unknown_status_is_still_rejected() {
        let result = serde_json::from_str::<CreateTaskRequest>(r#"{"title":"x","status":"archived"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn due_date_parses_calendar_date() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title":"x","dueDate":"2026-02-14"}"#).unwrap();
        assert_eq!(request.due_date, NaiveDate::from_ymd_opt(2026, 2, 14));
    }
}
