//! Operator Lock
//!
//! Exclusive OS file lock taken around network start and stop so that two
//! operators cannot drive the runtime at the same time. The lock is released
//! when the handle is dropped or the process dies; the file itself stays.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::shared::errors::UseCaseError;

/// Held lock
#[derive(Debug)]
pub struct OperatorLock {
    file: File,
    path: PathBuf,
}

impl OperatorLock {
    /// Take the lock at `path` without blocking
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Locked` if another process holds the lock and
    /// `UseCaseError::Io` if the lock file cannot be opened.
    pub fn acquire(path: &Path) -> Result<Self, UseCaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(UseCaseError::io("failed to create lock directory"))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(UseCaseError::io("failed to open lock file"))?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if is_contended(&e) => {
                tracing::error!(path = %path.display(), "Network lock is held by another operator");
                return Err(UseCaseError::Locked(path.to_path_buf()));
            }
            Err(e) => return Err(UseCaseError::io("failed to lock operator file")(e)),
        }

        // Owner pid is informational only; a failed write keeps the lock
        if let Err(e) = record_owner(&mut file) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to record lock owner");
        }

        tracing::debug!(path = %path.display(), "Operator lock acquired");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// EWOULDBLOCK/EAGAIN is 11 on Linux and 35 on macOS
fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock || matches!(e.raw_os_error(), Some(11 | 35))
}

fn record_owner(file: &mut File) -> io::Result<()> {
    file.set_len(0)?;
    file.rewind()?;
    writeln!(file, "{}", std::process::id())
}

impl Drop for OperatorLock {
    fn drop(&mut self) {
        match FileExt::unlock(&self.file) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Operator lock released"),
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "Failed to release operator lock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_locked_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("bootstrap.lock");

        let first = OperatorLock::acquire(&path).unwrap();
        assert!(path.exists());

        let second = OperatorLock::acquire(&path);
        assert!(matches!(second, Err(UseCaseError::Locked(p)) if p == path));

        drop(first);
        tokio_test::assert_ok!(OperatorLock::acquire(&path));
    }

    #[test]
    fn test_leftover_lock_file_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bootstrap.lock");
        std::fs::write(&path, "4242\n").unwrap();

        let lock = OperatorLock::acquire(&path).unwrap();

        assert_eq!(lock.path(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), format!("{}\n", std::process::id()));
    }

    #[test]
    fn test_lock_is_released_when_holder_closes_without_unlocking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bootstrap.lock");
        let holder = File::create(&path).unwrap();
        holder.try_lock_exclusive().unwrap();

        assert!(matches!(OperatorLock::acquire(&path), Err(UseCaseError::Locked(_))));

        // Closing the descriptor is all a killed process leaves behind
        drop(holder);

        tokio_test::assert_ok!(OperatorLock::acquire(&path));
    }
}
