//! JSON persistence for MessageLog.
//!
//! The on-disk form is `{"messages": [{"role": ..., "content": ...}]}`,
//! pretty-printed. Writes go to a sibling `.tmp` file that is renamed over
//! the target, so a failed save never damages an existing file.

use std::ffi::OsString;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::Message;

use super::manager::MessageLog;
use super::types::{DeleteOutcome, LogError};

#[derive(Serialize)]
struct PersistedLogRef<'a> {
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct PersistedLog {
    messages: Vec<Message>,
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `bytes` and flush them to disk before returning, so the rename
/// that follows never publishes a file whose contents are still buffered.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn write_failed(path: &Path, reason: impl ToString) -> LogError {
    LogError::WriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl MessageLog {
    /// Write the log to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LogError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&PersistedLogRef {
            messages: &self.messages,
        })
        .map_err(|e| write_failed(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(path, e))?;
        }

        let tmp_path = tmp_path_for(path);
        if let Err(e) = write_synced(&tmp_path, json.as_bytes()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(write_failed(path, e));
        }
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            warn!(path = %path.display(), error = %e, "conversation save failed");
            return Err(write_failed(path, e));
        }

        info!(
            path = %path.display(),
            messages = self.messages.len(),
            "conversation saved"
        );
        Ok(())
    }

    /// Replace the log's messages with those stored at `path`.
    ///
    /// On any error the log is left exactly as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LogError> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no saved conversation");
                return Err(LogError::NotFound(path.to_path_buf()));
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(LogError::Corrupt {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                return Err(LogError::ReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        let persisted: PersistedLog = serde_json::from_str(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "saved conversation is corrupt");
            LogError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        self.messages = persisted.messages;
        info!(
            path = %path.display(),
            messages = self.messages.len(),
            "conversation loaded"
        );
        Ok(())
    }

    /// Remove a persisted log. A missing file is reported, not an error.
    pub fn delete(path: impl AsRef<Path>) -> Result<DeleteOutcome, LogError> {
        let path = path.as_ref();
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "conversation deleted");
                Ok(DeleteOutcome::Removed)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::Absent),
            Err(e) => Err(LogError::DeleteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
