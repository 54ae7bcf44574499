//! Wire types: request bodies, list query params, and the response envelope.

use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 255;
pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("title is required".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("title must be at most {MAX_TITLE_LEN} characters"));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(format!(
                "description must be at most {MAX_DESCRIPTION_LEN} characters"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            let len = title.chars().count();
            if len < MIN_TITLE_LEN {
                return Err(format!("title must be at least {MIN_TITLE_LEN} characters"));
            }
            if len > MAX_TITLE_LEN {
                return Err(format!("title must be at most {MAX_TITLE_LEN} characters"));
            }
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(format!(
                    "description must be at most {MAX_DESCRIPTION_LEN} characters"
                ));
            }
        }
        Ok(())
    }
}

/// Query params for listing. Completed and the date bounds arrive as raw
/// strings and are parsed leniently: values that fail to parse apply no
/// filter rather than failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub completed: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Standard response envelope: `{status, message, data?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = serde_json::Value> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_title() {
        let req = CreateTaskRequest {
            title: String::new(),
            description: String::new(),
            date: "2030-01-01".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_rejects_overlong_fields() {
        let req = CreateTaskRequest {
            title: "x".repeat(256),
            description: String::new(),
            date: "2030-01-01".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreateTaskRequest {
            title: "ok".to_string(),
            description: "x".repeat(1001),
            date: "2030-01-01".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_accepts_boundary_lengths() {
        let req = CreateTaskRequest {
            title: "x".repeat(255),
            description: "y".repeat(1000),
            date: "2030-01-01".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_title_min_length_applies_only_when_present() {
        let req = UpdateTaskRequest {
            title: Some("ab".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateTaskRequest {
            description: Some("no title supplied".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn envelope_omits_absent_data() {
        let json = serde_json::to_value(ApiResponse::error("boom")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "boom");
        assert!(json.get("data").is_none());

        let json =
            serde_json::to_value(ApiResponse::success("ok", serde_json::json!({"id": 1})))
                .unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["id"], 1);
    }
}
