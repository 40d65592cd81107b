//! Log file location and rotation.
//!
//! Logs live in the platform cache directory (XDG on Linux, standard
//! locations on macOS/Windows).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "onboard";
const APPLICATION: &str = "onboard";

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept after rotation.
const MAX_OLD_LOGS: usize = 25;

/// Directory holding `latest.log` and its timestamped predecessors.
#[derive(Debug, Clone)]
pub struct LogDir {
    root: PathBuf,
}

impl LogDir {
    /// The cache directory for this application, or `None` when no home
    /// directory can be determined.
    ///
    /// - Linux: `$XDG_CACHE_HOME/onboard` or `~/.cache/onboard`
    /// - macOS: `~/Library/Caches/dev.onboard.onboard`
    /// - Windows: `C:\Users\<User>\AppData\Local\onboard\onboard\cache`
    pub fn platform() -> Option<Self> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|dirs| Self::at(dirs.cache_dir()))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path the current run logs to.
    pub fn latest(&self) -> PathBuf {
        self.root.join(LATEST_LOG)
    }

    /// Archives the previous `latest.log` and prunes old archives, then
    /// creates the directory if needed. Returns the path to log to.
    pub fn prepare(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;
        self.archive_latest()?;
        self.prune(MAX_OLD_LOGS);
        Ok(self.latest())
    }

    /// Renames `latest.log` to `<YYYYmmdd_HHMMSS>.log`, adding a counter when
    /// a run in the same second already took that name.
    fn archive_latest(&self) -> io::Result<()> {
        let latest = self.latest();
        if !latest.exists() {
            return Ok(());
        }

        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut target = self.root.join(format!("{}.log", stamp));
        let mut n = 1;
        while target.exists() {
            target = self.root.join(format!("{}_{}.log", stamp, n));
            n += 1;
        }
        fs::rename(latest, target)
    }

    /// Archived logs, oldest first. Archive names start with their timestamp,
    /// so name order is age order.
    fn archives(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut logs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_archive(p))
            .collect();
        logs.sort();
        logs
    }

    /// Deletes all but the newest `keep` archives.
    fn prune(&self, keep: usize) {
        let logs = self.archives();
        let excess = logs.len().saturating_sub(keep);
        for path in &logs[..excess] {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("Could not remove old log {}: {}", path.display(), e);
            }
        }
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> LogDir {
        let root = std::env::temp_dir().join(format!("onboard-logs-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        LogDir::at(root)
    }

    fn names(dir: &LogDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&dir.root)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_prepare_creates_dir() {
        let dir = scratch("create");
        let latest = dir.prepare().unwrap();
        assert_eq!(latest, dir.latest());
        assert!(dir.root.is_dir());
        assert!(names(&dir).is_empty());
        let _ = fs::remove_dir_all(&dir.root);
    }

    #[test]
    fn test_same_second_archives_do_not_collide() {
        let dir = scratch("collide");
        fs::create_dir_all(&dir.root).unwrap();

        fs::write(dir.latest(), "first").unwrap();
        dir.archive_latest().unwrap();
        fs::write(dir.latest(), "second").unwrap();
        dir.archive_latest().unwrap();

        assert!(!dir.latest().exists());
        assert_eq!(dir.archives().len(), 2);
        let _ = fs::remove_dir_all(&dir.root);
    }

    #[test]
    fn test_prune_keeps_newest_and_ignores_other_files() {
        let dir = scratch("prune");
        fs::create_dir_all(&dir.root).unwrap();
        for day in 1..=5 {
            fs::write(dir.root.join(format!("2024010{}_000000.log", day)), "").unwrap();
        }
        fs::write(dir.latest(), "").unwrap();
        fs::write(dir.root.join("notes.txt"), "").unwrap();

        dir.prune(2);

        assert_eq!(
            names(&dir),
            vec![
                "20240104_000000.log",
                "20240105_000000.log",
                "latest.log",
                "notes.txt",
            ]
        );
        let _ = fs::remove_dir_all(&dir.root);
    }
}
