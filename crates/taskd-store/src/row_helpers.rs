use chrono::NaiveDate;

use crate::error::StoreError;

/// Get a required column value from a row, returning CorruptRow on failure.
pub fn get<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    table: &'static str,
    column: &'static str,
) -> Result<T, StoreError> {
    row.get(idx).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: e.to_string(),
    })
}

/// Parse a `YYYY-MM-DD` text column, returning CorruptRow on parse failure.
pub fn parse_date(
    raw: &str,
    table: &'static str,
    column: &'static str,
) -> Result<NaiveDate, StoreError> {
    taskd_core::parse_wire_date(raw).map_err(|e| StoreError::CorruptRow {
        table,
        column,
        detail: format!("invalid date: {e}"),
    })
}
