// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025-2026 Jonathan D.A. Jewell

//! # carbonprint Records
//!
//! Historical footprint records for signed-in users, and the context
//! handed to an advice generator. The calculator never depends on this
//! crate; a result is valid whether or not it is ever stored.
//!
//! ```rust,ignore
//! use carbonprint_records::{CarbonRecord, JsonRecordStore, RecordStore};
//!
//! let mut store = JsonRecordStore::new("/var/lib/carbonprint");
//! store.append(CarbonRecord::new("user-42", &result))?;
//! let history = store.history("user-42")?;
//! ```

pub mod store;

pub use store::JsonRecordStore;

use carbonprint_metrics::{Breakdown, CarbonResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from record storage
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid user id: {0:?}")]
    InvalidUser(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// One stored calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonRecord {
    pub id: Uuid,
    pub user_id: String,
    /// Annual total in kg CO2e
    pub total_emission: i64,
    pub breakdown: Breakdown,
    pub created_at: DateTime<Utc>,
}

impl CarbonRecord {
    pub fn new(user_id: impl Into<String>, result: &CarbonResult) -> Self {
        Self::at(user_id, result, Utc::now())
    }

    /// Record stamped with an explicit time
    pub fn at(user_id: impl Into<String>, result: &CarbonResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            total_emission: result.total,
            breakdown: result.breakdown,
            created_at,
        }
    }

    pub fn result(&self) -> CarbonResult {
        CarbonResult {
            total: self.total_emission,
            breakdown: self.breakdown,
        }
    }
}

/// Persistence collaborator for calculation results
pub trait RecordStore {
    /// Store one record for its user
    fn append(&mut self, record: CarbonRecord) -> Result<()>;

    /// All records of a user, oldest first
    fn history(&self, user_id: &str) -> Result<Vec<CarbonRecord>>;

    fn latest(&self, user_id: &str) -> Result<Option<CarbonRecord>> {
        Ok(self.history(user_id)?.pop())
    }
}

/// A dated total, as shown in a history chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// `YYYY-MM-DD`
    pub date: String,
    pub value: i64,
}

impl From<&CarbonRecord> for HistoryPoint {
    fn from(record: &CarbonRecord) -> Self {
        HistoryPoint {
            date: record.created_at.format("%Y-%m-%d").to_string(),
            value: record.total_emission,
        }
    }
}

/// Everything an advice generator is told about a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryContext {
    pub total: i64,
    pub breakdown: Breakdown,
    pub history: Vec<HistoryPoint>,
}

impl AdvisoryContext {
    pub fn new(result: &CarbonResult, history: &[CarbonRecord]) -> Self {
        Self {
            total: result.total,
            breakdown: result.breakdown,
            history: history.iter().map(HistoryPoint::from).collect(),
        }
    }

    /// Context built from the most recent record; `None` for an empty history.
    pub fn from_history(history: &[CarbonRecord]) -> Option<Self> {
        history
            .last()
            .map(|latest| Self::new(&latest.result(), history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(total: i64) -> CarbonResult {
        CarbonResult {
            total,
            breakdown: Breakdown {
                transport: total / 2,
                energy: total / 4,
                consumption: total - total / 2 - total / 4,
            },
        }
    }

    #[test]
    fn test_record_keeps_result() {
        let r = result(4075);
        let record = CarbonRecord::new("alice", &r);
        assert_eq!(record.user_id, "alice");
        assert_eq!(record.total_emission, 4075);
        assert_eq!(record.result(), r);
    }

    #[test]
    fn test_history_point_date() {
        let when = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let record = CarbonRecord::at("bob", &result(1643), when);
        let point = HistoryPoint::from(&record);
        assert_eq!(point.date, "2026-03-14");
        assert_eq!(point.value, 1643);
    }

    #[test]
    fn test_advisory_context_uses_latest() {
        let jan = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let history = vec![
            CarbonRecord::at("carol", &result(5000), jan),
            CarbonRecord::at("carol", &result(4000), feb),
        ];

        let ctx = AdvisoryContext::from_history(&history).unwrap();
        assert_eq!(ctx.total, 4000);
        assert_eq!(ctx.history.len(), 2);
        assert_eq!(ctx.history[0].value, 5000);

        assert!(AdvisoryContext::from_history(&[]).is_none());
    }

    #[test]
    fn test_record_json_shape() {
        let record = CarbonRecord::new("dave", &result(100));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["total_emission"], 100);
        assert_eq!(json["breakdown"]["transport"], 50);
        assert!(json["created_at"].is_string());
    }
}
