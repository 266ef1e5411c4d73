//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes a single JSON line carrying a `type`,
//! a `timestamp` and a per-process `run` id. Lines are appended, so one
//! file can collect the transcripts of many runs.

use askdata_application::{ConversationEvent, ConversationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run_id: String,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; the caller then runs
    /// without a transcript.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier shared by every line written through this logger.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), event.event_type.into());
        record.insert("timestamp".to_string(), timestamp.into());
        record.insert("run".to_string(), self.run_id.clone().into());

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
