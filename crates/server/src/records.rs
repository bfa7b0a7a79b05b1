//! JSON-file backed record set behind `/users`.
//!
//! The file is re-read on every request; nothing is cached between calls.

use std::path::{Path, PathBuf};

use common::{env::require_file, types::UserRecord, CoreError};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
}

impl RecordSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the whole record set.
    pub async fn load(&self) -> Result<Vec<UserRecord>, CoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CoreError::Config(format!("cannot read {}: {e}", self.path.display())))?;
        let records: Vec<UserRecord> = serde_json::from_slice(&bytes)?;
        Ok(records)
    }

    /// Startup check: the file exists and decodes. Returns the record count.
    pub async fn preflight(&self) -> Result<usize, CoreError> {
        require_file(&self.path).await?;
        Ok(self.load().await?.len())
    }
}

/// Which slice of the record set a `/users` request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    ById(i64),
    ByName(String),
    All,
}

impl UserFilter {
    /// First `Id` that parses as an integer wins; otherwise a non-empty first
    /// `Name`; otherwise everything.
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        if let Some(id) = first("Id").and_then(|v| v.parse::<i64>().ok()) {
            return UserFilter::ById(id);
        }
        match first("Name") {
            Some(name) if !name.is_empty() => UserFilter::ByName(name.to_string()),
            _ => UserFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    One(UserRecord),
    Many(Vec<UserRecord>),
}

/// Apply `filter` to the loaded records.
///
/// `ById` outside `[0, len)` is a range error. `ByName` always yields
/// records 1 and 2 whatever the name; the value is only logged.
pub fn select(records: Vec<UserRecord>, filter: &UserFilter) -> Result<Selection, CoreError> {
    let len = records.len();
    match filter {
        UserFilter::ById(id) => usize::try_from(*id)
            .ok()
            .and_then(|idx| records.into_iter().nth(idx))
            .map(Selection::One)
            .ok_or_else(|| CoreError::Range(format!("requested index {id} is out of range 0..{len}"))),
        UserFilter::ByName(_) => {
            if len < 3 {
                return Err(CoreError::Range(format!("name lookup needs at least 3 records, found {len}")));
            }
            Ok(Selection::Many(records.into_iter().skip(1).take(2).collect()))
        }
        UserFilter::All => Ok(Selection::Many(records)),
    }
}
