use chrono::Utc;
use tracing::instrument;

use taskd_core::{Task, TaskDraft, TaskFilter, TaskPatch, DATE_FORMAT};

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers;

const TASK_COLUMNS: &str = "id, title, description, date, completed, created_at, updated_at";

/// Repository for the tasks table. Soft-deleted rows (deleted_at set) are
/// invisible to every read and update.
pub struct TaskRepo {
    db: Database,
}

impl TaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new task. Completed starts false; timestamps are assigned here.
    #[instrument(skip(self), fields(title = %draft.title))]
    pub fn create(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let now = Utc::now().to_rfc3339();

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, description, date, completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?5)",
                rusqlite::params![
                    draft.title,
                    draft.description,
                    draft.date.format(DATE_FORMAT).to_string(),
                    now,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();

            Ok(Task {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                date: draft.date,
                completed: false,
                created_at: now.clone(),
                updated_at: now,
            })
        })
    }

    /// Get a task by ID, excluding soft-deleted rows.
    #[instrument(skip(self))]
    pub fn get(&self, id: i64) -> Result<Task, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND deleted_at IS NULL",
            ))?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => row_to_task(row),
                None => Err(StoreError::NotFound(format!("task {id} not found"))),
            }
        })
    }

    /// Apply a sparse update. Only supplied fields are written; updated_at is
    /// always refreshed. Callers must reject empty patches before this point.
    #[instrument(skip(self, patch))]
    pub fn update(&self, id: i64, patch: &TaskPatch) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        let mut sets: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            params.push(Box::new(title.clone()));
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(description) = &patch.description {
            params.push(Box::new(description.clone()));
            sets.push(format!("description = ?{}", params.len()));
        }
        if let Some(date) = &patch.date {
            params.push(Box::new(date.format(DATE_FORMAT).to_string()));
            sets.push(format!("date = ?{}", params.len()));
        }
        if let Some(completed) = patch.completed {
            params.push(Box::new(completed));
            sets.push(format!("completed = ?{}", params.len()));
        }

        params.push(Box::new(now));
        sets.push(format!("updated_at = ?{}", params.len()));

        params.push(Box::new(id));
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{} AND deleted_at IS NULL",
            sets.join(", "),
            params.len(),
        );

        self.db.with_conn(|conn| {
            let param_refs: Vec<&dyn rusqlite::types::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();
            conn.execute(&sql, param_refs.as_slice())?;
            Ok(())
        })
    }

    /// Soft delete: mark the row invisible without removing it. Deleting a
    /// nonexistent or already-deleted id is not an error.
    #[instrument(skip(self))]
    pub fn soft_delete(&self, id: i64) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "UPDATE tasks SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                rusqlite::params![now, id],
            )?;
            Ok(())
        })
    }

    /// List non-deleted tasks matching the filter, in storage-default order.
    #[instrument(skip(self), fields(limit = filter.limit, offset = filter.offset))]
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE deleted_at IS NULL");
        let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(completed) = filter.completed {
            params.push(Box::new(completed));
            sql.push_str(&format!(" AND completed = ?{}", params.len()));
        }

        // Dates are stored as YYYY-MM-DD text, so string comparison is
        // chronological.
        match (&filter.date_from, &filter.date_to) {
            (Some(from), Some(to)) => {
                params.push(Box::new(from.format(DATE_FORMAT).to_string()));
                let from_idx = params.len();
                params.push(Box::new(to.format(DATE_FORMAT).to_string()));
                sql.push_str(&format!(
                    " AND date BETWEEN ?{} AND ?{}",
                    from_idx,
                    params.len()
                ));
            }
            (Some(from), None) => {
                params.push(Box::new(from.format(DATE_FORMAT).to_string()));
                sql.push_str(&format!(" AND date >= ?{}", params.len()));
            }
            (None, Some(to)) => {
                params.push(Box::new(to.format(DATE_FORMAT).to_string()));
                sql.push_str(&format!(" AND date <= ?{}", params.len()));
            }
            (None, None) => {}
        }

        params.push(Box::new(filter.limit));
        let limit_idx = params.len();
        params.push(Box::new(filter.offset));
        sql.push_str(&format!(" LIMIT ?{} OFFSET ?{}", limit_idx, params.len()));

        self.db.with_conn(|conn| {
            let param_refs: Vec<&dyn rusqlite::types::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(param_refs.as_slice())?;
            let mut results = Vec::new();
            while let Some(row) = rows.next()? {
                results.push(row_to_task(row)?);
            }
            Ok(results)
        })
    }
}

fn row_to_task(row: &rusqlite::Row<'_>) -> Result<Task, StoreError> {
    let date_str: String = row_helpers::get(row, 3, "tasks", "date")?;

    Ok(Task {
        id: row_helpers::get(row, 0, "tasks", "id")?,
        title: row_helpers::get(row, 1, "tasks", "title")?,
        description: row_helpers::get(row, 2, "tasks", "description")?,
        date: row_helpers::parse_date(&date_str, "tasks", "date")?,
        completed: row_helpers::get(row, 4, "tasks", "completed")?,
        created_at: row_helpers::get(row, 5, "tasks", "created_at")?,
        updated_at: row_helpers::get(row, 6, "tasks", "updated_at")?,
    })
}
