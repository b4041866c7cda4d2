//! Append-only scan history in SQLite. Only a per-repo summary is kept:
//! never the token, never README text.

use crate::error::{Result, VisibilityError};
use crate::outcome::Outcome;
use crate::types::config::HistoryConfig;
use crate::types::report::RepoEvaluation;
use crate::types::scoring::Score;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scans (
    scan_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    preset_id TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    repo_count INTEGER NOT NULL,
    summary TEXT NOT NULL
)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub full_name: String,
    pub overall: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub scan_id: i64,
    pub username: String,
    pub preset_id: String,
    pub timestamp: String,
    pub repo_count: i64,
    pub summary: Vec<SummaryEntry>,
}

pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self { conn })
    }

    pub fn record(
        &self,
        username: &str,
        preset_id: &str,
        evaluations: &[RepoEvaluation],
    ) -> Result<i64> {
        let summary: Vec<SummaryEntry> = evaluations
            .iter()
            .map(|evaluation| SummaryEntry {
                full_name: evaluation.display_name().to_string(),
                overall: Some(evaluation.overall()),
            })
            .collect();
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);

        self.conn.execute(
            "INSERT INTO scans (username, preset_id, timestamp, repo_count, summary)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                username,
                preset_id,
                timestamp,
                evaluations.len() as i64,
                serde_json::to_string(&summary)?
            ],
        )?;
        let scan_id = self.conn.last_insert_rowid();
        debug!(scan_id, username, "recorded scan");
        Ok(scan_id)
    }

    /// Most recent scans for `username`, newest first.
    pub fn recent(&self, username: &str, limit: usize) -> Result<Vec<ScanRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT scan_id, username, preset_id, timestamp, repo_count, summary
             FROM scans WHERE username = ?1 ORDER BY scan_id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![username, limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (scan_id, username, preset_id, timestamp, repo_count, summary) = row?;
            let summary = serde_json::from_str(&summary).unwrap_or_else(|err| {
                warn!(scan_id, error = %err, "unreadable scan summary");
                Vec::new()
            });
            records.push(ScanRecord {
                scan_id,
                username,
                preset_id,
                timestamp,
                repo_count,
                summary,
            });
        }
        Ok(records)
    }
}

/// Records a finished scan when history is enabled. Never fails the scan:
/// any storage error comes back degraded with no scan id.
pub fn record_scan(
    config: &HistoryConfig,
    username: &str,
    preset_id: &str,
    evaluations: &[RepoEvaluation],
) -> Outcome<Option<i64>> {
    if !config.enabled {
        return Outcome::Complete(None);
    }
    let result = config
        .resolved_path()
        .ok_or_else(|| VisibilityError::ConfigParse("no history path and no HOME".to_string()))
        .and_then(|path| HistoryStore::open(&path))
        .and_then(|store| store.record(username, preset_id, evaluations))
        .map(Some);
    Outcome::fail_open("history write", result, None)
}
