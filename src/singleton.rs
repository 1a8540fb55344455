//! Process singleton primitives.
//!
//! Two distinct mechanisms live here:
//!
//! - `ModuleServiceRegistry`: an in-process factory keyed on
//!   `(chain_id, module_address)` so two adapters talking to the same
//!   on-chain module share one client. Grounded on the base crate's
//!   `run/registry.rs` daemon registry, generalized from "one entry per
//!   named daemon" to "one entry per (chain, module)".
//! - `MonitorLock`: a cross-process fsync'd lock file with mtime-based
//!   staleness, so only one monitor process runs at a time even across
//!   container restarts where PID liveness can't be observed.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result, bail};

/// Generic process-scoped factory keyed by `(chain_id, module_address)`.
/// `T` is typically an `Arc<ModuleService>`; tests need an explicit reset
///.
pub struct SingletonRegistry<T: Clone> {
    instances: Mutex<HashMap<(u64, String), T>>,
}

impl<T: Clone> Default for SingletonRegistry<T> {
    fn default() -> Self {
        SingletonRegistry {
            instances: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> SingletonRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing instance for `(chain_id, module_address)`, or
    /// build and cache one via `build`.
    pub fn get_or_init(&self, chain_id: u64, module_address: &str, build: impl FnOnce() -> T) -> T {
        let mut instances = self.instances.lock().unwrap();
        let key = (chain_id, module_address.to_lowercase());
        instances.entry(key).or_insert_with(build).clone()
    }

    /// Explicit reset for a single (chain, module) pair.
    pub fn reset(&self, chain_id: u64, module_address: &str) {
        let mut instances = self.instances.lock().unwrap();
        instances.remove(&(chain_id, module_address.to_lowercase()));
    }

    pub fn reset_all(&self) {
        self.instances.lock().unwrap().clear();
    }
}

/// Default location for the monitor's lock file.
pub fn default_lock_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".trade-coordinator")
        .join("monitor.lock")
}

/// File-based monitor singleton with stale-lock takeover after
/// `STALE_AFTER`.
pub struct MonitorLock {
    path: PathBuf,
    _file: File,
}

impl MonitorLock {
    pub const STALE_AFTER: Duration = Duration::from_secs(5 * 60);

    /// Acquire the lock, taking over a stale one if its mtime is older
    /// than `STALE_AFTER`. Returns an error with message "another monitor
    /// is running" if a live holder is found.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("creating monitor lock directory")?;
        }

        if path.exists() {
            let metadata = std::fs::metadata(path).context("reading lock file metadata")?;
            let age = metadata
                .modified()
                .ok()
                .and_then(|m| SystemTime::now().duration_since(m).ok())
                .unwrap_or(Duration::ZERO);

            if age < Self::STALE_AFTER {
                bail!("another monitor is running");
            }
            // Stale: fall through and take over by truncating + rewriting.
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("opening monitor lock file {}", path.display()))?;

        writeln!(file, "pid={}", std::process::id())?;
        file.sync_all().context("fsyncing monitor lock file")?;

        Ok(MonitorLock {
            path: path.to_path_buf(),
            _file: file,
        })
    }

    /// Touch the lock file's mtime so a long-running monitor doesn't get
    /// mistaken for stale by another process mid-cycle.
    pub fn heartbeat(&self) -> Result<()> {
        let now = SystemTime::now();
        filetime_touch(&self.path, now)
    }
}

impl Drop for MonitorLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn filetime_touch(path: &Path, _now: SystemTime) -> Result<()> {
    // Re-writing the file's contents updates its mtime without requiring
    // a filetime-manipulation dependency the rest of the stack doesn't use.
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    writeln!(file, "pid={}", std::process::id())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn second_acquire_fails_while_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.lock");
        let _lock = MonitorLock::acquire(&path).unwrap();
        let err = MonitorLock::acquire(&path).unwrap_err();
        assert!(err.to_string().contains("another monitor is running"));
    }

    #[test]
    fn stale_lock_is_taken_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monitor.lock");
        {
            let _lock = MonitorLock::acquire(&path).unwrap();
        }
        // Backdate the mtime past the staleness window.
        let stale_time = SystemTime::now() - (MonitorLock::STALE_AFTER + StdDuration::from_secs(1));
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(stale_time).unwrap();

        let lock2 = MonitorLock::acquire(&path);
        assert!(lock2.is_ok());
    }

    #[test]
    fn registry_reuses_instance_per_key() {
        let registry: SingletonRegistry<String> = SingletonRegistry::new();
        let a = registry.get_or_init(1, "0xabc", || "built".to_string());
        let b = registry.get_or_init(1, "0xabc", || "built-again".to_string());
        assert_eq!(a, b);

        registry.reset(1, "0xabc");
        let c = registry.get_or_init(1, "0xabc", || "rebuilt".to_string());
        assert_eq!(c, "rebuilt");
    }
}
