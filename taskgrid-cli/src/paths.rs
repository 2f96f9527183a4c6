//! Where taskgrid keeps its database and logs.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// File name of the table database inside the data directory.
pub const DATABASE_FILE: &str = "tables.db";

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept next to `latest.log`.
const KEEP_LOGS: usize = 10;

fn dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "taskgrid", "taskgrid")
}

/// Platform data directory, e.g. `~/.local/share/taskgrid` on Linux.
pub fn data_dir() -> Option<PathBuf> {
    dirs().map(|d| d.data_dir().to_path_buf())
}

/// `latest.log` in the platform cache directory.
pub fn log_file() -> Option<PathBuf> {
    dirs().map(|d| d.cache_dir().join(LATEST_LOG))
}

/// Archives the previous `latest.log` as `<timestamp>.log` and prunes the
/// archive down to the newest [`KEEP_LOGS`] files.
pub fn rotate_logs() {
    if let Some(dir) = log_file().and_then(|p| p.parent().map(PathBuf::from)) {
        rotate_logs_in(&dir);
    }
}

fn rotate_logs_in(dir: &Path) {
    let _ = fs::create_dir_all(dir);
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", stamp)));
    }

    let Ok(entries) = fs::read_dir(dir) else { return };
    // timestamped names sort oldest first
    let mut archived: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "log")
                && p.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();
    archived.sort();

    let excess = archived.len().saturating_sub(KEEP_LOGS);
    for path in archived.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_archives_latest_and_prunes_oldest() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..KEEP_LOGS {
            fs::write(dir.path().join(format!("2020010{}_000000.000.log", i)), "").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs_in(dir.path());

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names.len(), KEEP_LOGS);
        assert!(!names.contains(&LATEST_LOG.to_string()));
        assert!(!names.contains(&"20200100_000000.000.log".to_string()));
        assert!(names.contains(&"20200101_000000.000.log".to_string()));
    }
}
