use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

/// How many rotated session logs to keep around.
const MAX_SESSIONS: usize = 5;

/// Managed Tauri state holding the session logger once it is initialized.
#[derive(Default)]
pub struct LoggerState {
    pub logger: Arc<Mutex<Option<SessionLogger>>>,
}

impl LoggerState {
    /// Log a line if the logger is up; drop it silently otherwise.
    /// Commands use this for the silent-degradation paths (generation
    /// failures, cache writes) that must never become error dialogs.
    pub async fn log(&self, prefix: &str, line: &str) {
        let guard = self.logger.lock().await;
        if let Some(logger) = guard.as_ref() {
            logger.log(prefix, line);
        }
    }
}

/// Session logger appending timestamped lines to `<base>/logs/latest.log`.
///
/// Writes go through an mpsc channel to a background task, so logging from
/// a command never waits on disk.
pub struct SessionLogger {
    tx: mpsc::UnboundedSender<String>,
}

impl SessionLogger {
    /// Rotates the previous `latest.log`, prunes old sessions, and spawns
    /// the writer task. Returns `None` when the log directory is unusable —
    /// the app runs fine without a logger.
    pub async fn new(base_dir: &Path) -> Option<Self> {
        let logs_dir = base_dir.join("logs");
        tokio::fs::create_dir_all(&logs_dir).await.ok()?;

        let latest = logs_dir.join("latest.log");
        if latest.exists() {
            let rotated = logs_dir.join(format!("session-{}.log", unix_timestamp()));
            let _ = tokio::fs::rename(&latest, &rotated).await;
        }
        prune_old_sessions(&logs_dir).await;

        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&latest)
            .await
            .ok()?;

        let (tx, rx) = mpsc::unbounded_channel::<String>();
        tokio::spawn(writer_task(file, rx));

        let _ = tx.send(format!(
            "=== Pavera session — {} ===\n",
            format_timestamp(unix_timestamp())
        ));
        Some(Self { tx })
    }

    pub fn log(&self, prefix: &str, line: &str) {
        let ts = format_timestamp(unix_timestamp());
        let _ = self.tx.send(format!("[{ts}] [{prefix}] {line}\n"));
    }
}

async fn writer_task(file: tokio::fs::File, mut rx: mpsc::UnboundedReceiver<String>) {
    use tokio::io::AsyncWriteExt;
    let mut writer = tokio::io::BufWriter::new(file);

    while let Some(line) = rx.recv().await {
        let _ = writer.write_all(line.as_bytes()).await;
        // Flush each line so the log is readable while the app runs
        let _ = writer.flush().await;
    }
    let _ = writer.flush().await;
}

/// Keep only the newest `MAX_SESSIONS` rotated logs. File names embed the
/// timestamp, so lexicographic order is chronological.
async fn prune_old_sessions(logs_dir: &Path) {
    let mut rd = match tokio::fs::read_dir(logs_dir).await {
        Ok(rd) => rd,
        Err(_) => return,
    };

    let mut sessions: Vec<PathBuf> = Vec::new();
    while let Ok(Some(entry)) = rd.next_entry().await {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("session-") && name.ends_with(".log") {
            sessions.push(entry.path());
        }
    }
    sessions.sort();

    while sessions.len() > MAX_SESSIONS {
        let oldest = sessions.remove(0);
        let _ = tokio::fs::remove_file(oldest).await;
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Render a Unix timestamp as ISO 8601 UTC without pulling in chrono.
fn format_timestamp(secs: u64) -> String {
    let total = secs as i64;
    let (sec, min, hour) = (total % 60, (total / 60) % 60, (total / 3600) % 24);
    let mut days = total / 86400;

    let mut year: i64 = 1970;
    loop {
        let len = if leap(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }

    let lengths = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1;
    for (i, &len) in lengths.iter().enumerate() {
        let len = if i == 1 && leap(year) { len + 1 } else { len };
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    format!(
        "{year:04}-{month:02}-{:02}T{hour:02}:{min:02}:{sec:02}Z",
        days + 1
    )
}

fn leap(y: i64) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(1735689600), "2025-01-01T00:00:00Z");
        // Leap day 2024
        assert_eq!(format_timestamp(1709164800), "2024-02-29T00:00:00Z");
    }

    #[tokio::test]
    async fn logger_writes_and_rotates() {
        let dir = tempfile::tempdir().expect("tempdir");

        let logger = SessionLogger::new(dir.path()).await.expect("logger");
        logger.log("menu", "generation failed: network");
        // Give the writer task a beat to flush.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let latest = dir.path().join("logs").join("latest.log");
        let content = std::fs::read_to_string(&latest).expect("latest.log");
        assert!(content.contains("[menu] generation failed: network"));

        drop(logger);
        let _second = SessionLogger::new(dir.path()).await.expect("logger");
        let rotated = std::fs::read_dir(dir.path().join("logs"))
            .expect("read_dir")
            .flatten()
            .any(|e| e.file_name().to_string_lossy().starts_with("session-"));
        assert!(rotated);
    }
}
