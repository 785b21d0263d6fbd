//! Append-only log of completed conversions.

use crate::db::Database;
use crate::error::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::params;
use rusqlite::types::ValueRef;
use tracing::{debug, info, warn};

pub const DEFAULT_RECENT_LIMIT: usize = 8;

/// Text layouts accepted for `created_at`. `CURRENT_TIMESTAMP` writes the
/// first one; the fractional part is optional in both.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub file_path: String,
    pub action: String,
    /// `None` when the stored value is NULL or not a timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ActivityLog {
    db: Database,
}

impl ActivityLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record a conversion. `created_at` is assigned by the database.
    pub fn append(&self, file_path: &str, action: &str) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO recent_files (file_path, action) VALUES (?1, ?2)",
            params![file_path, action],
        )?;
        info!(file_path, action, "logged conversion");
        Ok(())
    }

    /// Up to `limit` records, newest first. Rows written within the same
    /// second fall back to insertion order.
    pub fn recent(&self, limit: usize) -> Result<Vec<ActivityRecord>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(
            "SELECT file_path, action, created_at FROM recent_files
             ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = stmt
            .query_map(params![limit], |row| {
                Ok(ActivityRecord {
                    file_path: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    action: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    created_at: parse_created_at(row.get_ref(2)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(count = records.len(), "loaded recent conversions");
        Ok(records)
    }
}

/// Rows written by other tools may hold NULL, epoch seconds or free text here.
fn parse_created_at(value: ValueRef<'_>) -> Option<DateTime<Utc>> {
    let parsed = match value {
        ValueRef::Null => return None,
        ValueRef::Integer(secs) => DateTime::from_timestamp(secs, 0),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_text),
        ValueRef::Real(_) | ValueRef::Blob(_) => None,
    };
    if parsed.is_none() {
        warn!(value = ?value, "unreadable created_at in recent_files");
    }
    parsed
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}
