//! Single-writer lock for mutating commands.
//!
//! `.unison/unison.write.lock` records which `uni` command holds the project.
//! A second writer fails at once and names that command, so a merge is never
//! interleaved with another merge or assignment. A lock whose process has
//! exited is taken over.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::UNISON_DIR;

const LOCK_FILE: &str = "unison.write.lock";

/// Attempts before giving up on a lock that keeps reappearing.
const TAKEOVER_ATTEMPTS: usize = 3;

/// Contents of the lock file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockHolder {
    pub pid: u32,
    /// The holding command without the binary name, e.g. `merge permission`.
    pub command: String,
    pub acquired_at: DateTime<Utc>,
}

impl LockHolder {
    fn current(command: &str) -> Self {
        Self {
            pid: std::process::id(),
            command: command.to_string(),
            acquired_at: Utc::now(),
        }
    }

    fn is_alive(&self) -> bool {
        std::process::Command::new("kill")
            .arg("-0")
            .arg(self.pid.to_string())
            .status()
            .is_ok_and(|status| status.success())
    }
}

/// Held for the duration of a mutating command; released on drop.
#[derive(Debug)]
pub struct WriteLock {
    path: PathBuf,
    holder: LockHolder,
}

impl WriteLock {
    /// Take the project's write lock on behalf of `command`.
    ///
    /// # Errors
    ///
    /// Fails when a live process holds the lock, or when the lock file cannot
    /// be read or created.
    pub fn acquire(project_root: &Path, command: &str) -> anyhow::Result<Self> {
        let path = project_root.join(UNISON_DIR).join(LOCK_FILE);
        let holder = LockHolder::current(command);

        for _ in 0..TAKEOVER_ATTEMPTS {
            match create(&path, &holder) {
                Ok(()) => {
                    tracing::debug!(command, path = %path.display(), "write lock taken");
                    return Ok(Self { path, holder });
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to create write lock {}", path.display()));
                }
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                // Released between our create and read.
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to read write lock {}", path.display()));
                }
            };
            if contents.trim().is_empty() {
                anyhow::bail!("another uni write is starting; try again");
            }
            let Ok(existing) = serde_json::from_str::<LockHolder>(&contents) else {
                anyhow::bail!(
                    "unreadable write lock at {}; remove it if no uni process is running",
                    path.display()
                );
            };
            if existing.is_alive() {
                anyhow::bail!(
                    "`uni {}` (pid {}) has held the write lock since {}; try again after it finishes",
                    existing.command,
                    existing.pid,
                    existing.acquired_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            tracing::warn!(
                pid = existing.pid,
                command = %existing.command,
                "taking over write lock of exited process"
            );
            let _ = fs::remove_file(&path);
        }

        anyhow::bail!(
            "write lock at {} keeps changing hands; try again",
            path.display()
        )
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if fs::remove_file(&self.path).is_ok() {
            tracing::debug!(command = %self.holder.command, "write lock released");
        }
    }
}

fn create(path: &Path, holder: &LockHolder) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create_new(true).write(true).open(path)?;
    let body = serde_json::to_string(holder).map_err(io::Error::other)?;
    file.write_all(body.as_bytes())
}
