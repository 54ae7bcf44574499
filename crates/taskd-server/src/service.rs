use chrono::{NaiveDate, Utc};

use taskd_core::{Task, TaskDraft, TaskFilter, TaskPatch};
use taskd_store::{Database, TaskRepo};

use crate::error::ApiError;

const DEFAULT_LIMIT: u32 = 10;

/// Domain rules over the task repository: past-date rejection on create,
/// empty-patch short-circuit on update, pagination defaulting on list.
pub struct TaskService {
    repo: TaskRepo,
}

impl TaskService {
    pub fn new(db: Database) -> Self {
        Self {
            repo: TaskRepo::new(db),
        }
    }

    /// Create a task. The date must not be before the current UTC calendar
    /// day; time-of-day plays no part in the comparison.
    pub fn create(&self, draft: TaskDraft) -> Result<Task, ApiError> {
        if draft.date < Utc::now().date_naive() {
            return Err(ApiError::Domain("task date cannot be in the past".to_string()));
        }
        Ok(self.repo.create(&draft)?)
    }

    pub fn get(&self, id: i64) -> Result<Task, ApiError> {
        Ok(self.repo.get(id)?)
    }

    /// Apply a partial update and return the re-fetched task. An empty patch
    /// fails before any storage call.
    pub fn update(&self, id: i64, patch: TaskPatch) -> Result<Task, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::Validation("No fields to update".to_string()));
        }
        self.repo.update(id, &patch)?;
        Ok(self.repo.get(id)?)
    }

    /// Soft delete. Succeeds whether or not a visible row existed.
    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        Ok(self.repo.soft_delete(id)?)
    }

    /// List with optional filters. Limit defaults to 10 unless a positive
    /// value is supplied; offset defaults to 0 unless a non-negative value is
    /// supplied.
    pub fn list(
        &self,
        completed: Option<bool>,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Task>, ApiError> {
        let filter = TaskFilter {
            completed,
            date_from,
            date_to,
            // Clamp rather than cast: values beyond u32::MAX must stay large,
            // not wrap to a tiny page.
            limit: match limit {
                Some(l) if l > 0 => u32::try_from(l).unwrap_or(u32::MAX),
                _ => DEFAULT_LIMIT,
            },
            offset: match offset {
                Some(o) if o >= 0 => u32::try_from(o).unwrap_or(u32::MAX),
                _ => 0,
            },
        };
        Ok(self.repo.list(&filter)?)
    }
}
