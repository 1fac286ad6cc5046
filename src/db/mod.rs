pub mod submissions;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::Submission;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "I/O failure: {err}"),
            StoreError::Parse(err) => write!(f, "malformed submission file: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err)
    }
}

/// Handle to the JSON file holding every submission.
///
/// The file is rewritten in full on every append and nothing serializes
/// writers, so at most one writer may be active at a time.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty list.
    pub(crate) async fn read_all(&self) -> Result<Vec<Submission>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) async fn write_all(&self, submissions: &[Submission]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let body = serde_json::to_string_pretty(submissions)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
