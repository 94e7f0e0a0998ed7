// SPDX-License-Identifier: PMPL-1.0-or-later
//! Record storage backends

use crate::{CarbonRecord, RecordError, RecordStore, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Escape a user id into a file stem. ASCII alphanumerics and `-` are
/// kept; every other byte, `_` included, becomes `_xx` (lowercase hex),
/// so distinct ids never share a file.
fn encode_user_id(user_id: &str) -> String {
    let mut out = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("_{:02x}", byte));
        }
    }
    out
}

/// Inverse of [`encode_user_id`]; `None` for stems it never produces.
fn decode_user_id(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.bytes();
    while let Some(byte) = rest.next() {
        if byte == b'_' {
            let hi = (rest.next()? as char).to_digit(16)?;
            let lo = (rest.next()? as char).to_digit(16)?;
            bytes.push((hi * 16 + lo) as u8);
        } else if byte.is_ascii_alphanumeric() || byte == b'-' {
            bytes.push(byte);
        } else {
            return None;
        }
    }
    String::from_utf8(bytes).ok()
}

/// One pretty-printed JSON array of records per user under `<base>/users`
pub struct JsonRecordStore {
    /// Base directory for storage
    base_path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn users_dir(&self) -> PathBuf {
        self.base_path.join("users")
    }

    fn user_file(&self, user_id: &str) -> Result<PathBuf> {
        if user_id.trim().is_empty() {
            return Err(RecordError::InvalidUser(user_id.to_string()));
        }

        Ok(self
            .users_dir()
            .join(format!("{}.json", encode_user_id(user_id))))
    }

    fn read_user(&self, user_id: &str) -> Result<Vec<CarbonRecord>> {
        let path = self.user_file(user_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let json = std::fs::read_to_string(&path)?;
        let mut records: Vec<CarbonRecord> = serde_json::from_str(&json)?;
        records.retain(|r| r.user_id == user_id);
        Ok(records)
    }

    fn write_user(&self, user_id: &str, records: &[CarbonRecord]) -> Result<PathBuf> {
        std::fs::create_dir_all(self.users_dir())?;

        let path = self.user_file(user_id)?;
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// List users with stored records
    pub fn list_users(&self) -> Result<Vec<String>> {
        let users_dir = self.users_dir();
        if !users_dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in std::fs::read_dir(&users_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(user) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(decode_user_id)
                {
                    users.push(user);
                }
            }
        }

        users.sort();
        Ok(users)
    }

    /// Drop all but the newest `keep` records of a user
    pub fn prune(&self, user_id: &str, keep: usize) -> Result<usize> {
        let records = self.history(user_id)?;
        if records.len() <= keep {
            return Ok(0);
        }

        let removed = records.len() - keep;
        self.write_user(user_id, &records[removed..])?;

        info!(user = user_id, removed, keep, "Pruned old records");
        Ok(removed)
    }
}

impl RecordStore for JsonRecordStore {
    fn append(&mut self, record: CarbonRecord) -> Result<()> {
        let user_id = record.user_id.clone();
        let mut records = self.read_user(&user_id)?;
        records.push(record);

        let path = self.write_user(&user_id, &records)?;
        debug!(path = %path.display(), user = %user_id, count = records.len(), "Saved record");
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<CarbonRecord>> {
        let mut records = self.read_user(user_id)?;
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}

/// In-memory storage for testing
#[cfg(test)]
pub struct MemoryRecordStore {
    records: std::collections::HashMap<String, Vec<CarbonRecord>>,
}

#[cfg(test)]
impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: std::collections::HashMap::new(),
        }
    }
}

#[cfg(test)]
impl RecordStore for MemoryRecordStore {
    fn append(&mut self, record: CarbonRecord) -> Result<()> {
        self.records
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<CarbonRecord>> {
        let mut records = self.records.get(user_id).cloned().unwrap_or_default();
        records.sort_by_key(|r| r.created_at);
        Ok(records)
    }
}
