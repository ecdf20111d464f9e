//! Recording file discovery and naming.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Extension of recording logs.
pub const LOG_EXTENSION: &str = "jsonl";

/// List recording logs under `dir`, sorted by file name. A missing or
/// empty directory yields an empty list, not an error.
pub fn list_recordings(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cannot list recordings");
            return Vec::new();
        }
    };

    let mut logs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == LOG_EXTENSION)
                .unwrap_or(false)
        })
        .collect();
    logs.sort();
    logs
}

/// Path for a fresh session log under `dir`, stamped with wall-clock
/// millis so successive sessions never collide.
pub fn session_path(dir: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    dir.join(format!("session_{millis}.{LOG_EXTENSION}"))
}
