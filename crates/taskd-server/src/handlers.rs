//! One handler per route. Ids and dates arrive as strings and are parsed
//! here; field validation lives on the DTOs; domain rules in the service.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use taskd_core::{parse_wire_date, TaskDraft, TaskPatch};

use crate::dto::{ApiResponse, CreateTaskRequest, ListTasksQuery, UpdateTaskRequest};
use crate::error::ApiError;
use crate::server::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    req.validate().map_err(ApiError::Validation)?;

    let date = parse_wire_date(&req.date).map_err(|_| {
        ApiError::Validation("Invalid date format, expected YYYY-MM-DD".to_string())
    })?;

    let task = state.service.create(TaskDraft {
        title: req.title,
        description: req.description,
        date,
    })?;

    info!(task_id = task.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Task created successfully", task)),
    ))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let task = state.service.get(id)?;
    Ok(Json(ApiResponse::success("Task retrieved successfully", task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    req.validate().map_err(ApiError::Validation)?;

    let date = match &req.date {
        Some(raw) => Some(parse_wire_date(raw).map_err(|_| {
            ApiError::Validation("Invalid date format, expected YYYY-MM-DD".to_string())
        })?),
        None => None,
    };

    let task = state.service.update(
        id,
        TaskPatch {
            title: req.title,
            description: req.description,
            date,
            completed: req.completed,
        },
    )?;

    info!(task_id = task.id, "task updated");
    Ok(Json(ApiResponse::success("Task updated successfully", task)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id)?;
    info!(task_id = id, "task deleted");
    // Empty body, no envelope
    Ok(StatusCode::OK)
}

pub async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::Validation(e.body_text()))?;

    // Unparseable completed/date values apply no filter rather than failing
    let completed = q.completed.as_deref().and_then(|s| s.parse::<bool>().ok());
    let date_from = q.date_from.as_deref().and_then(|s| parse_wire_date(s).ok());
    let date_to = q.date_to.as_deref().and_then(|s| parse_wire_date(s).ok());

    let tasks = state
        .service
        .list(completed, date_from, date_to, q.limit, q.offset)?;

    info!(count = tasks.len(), "tasks listed");
    Ok(Json(ApiResponse::success("Tasks retrieved successfully", tasks)))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation("Invalid task ID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for raw in ["abc", "", "0", "-5", "1.5", "9999999999999999999999"] {
            assert!(matches!(parse_id(raw), Err(ApiError::Validation(_))), "{raw}");
        }
    }
}
