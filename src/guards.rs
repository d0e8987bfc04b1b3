//! Filesystem sanity guards and file content helpers.
//!
//! The guards ([`check_dir`], [`check_file`]) enforce preconditions the
//! mail tool needs at startup (spool and template locations must exist
//! before any work begins) and report violations as [`FatalError`]s.
//! The content helpers ([`delete_spool_file`], [`get_file_contents`]) are
//! thin I/O wrappers that propagate failures with path context attached.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::fatal::FatalError;

/// Check that `path` is an existing directory.
///
/// When `check_writeable` is set, additionally verify that the current
/// user can write to it (the spool and log directories must both hold).
/// Success is silent.
///
/// # Errors
///
/// Returns a [`FatalError`] when `path` is not a directory, or when
/// `check_writeable` is set and the directory is not writeable.
pub fn check_dir(path: &Path, check_writeable: bool) -> Result<(), FatalError> {
    if !path.is_dir() {
        return Err(FatalError::new(format!(
            "Error: {} is not a directory",
            path.display()
        )));
    }

    if check_writeable && !is_writeable(path) {
        return Err(FatalError::new(format!(
            "Error: {} is not writeable",
            path.display()
        )));
    }

    Ok(())
}

/// Check whether the current user can write to `path`.
///
/// On Unix this asks the kernel via `access(2)`, which accounts for the
/// effective user and group. Elsewhere we fall back to the read-only
/// permission bit.
#[cfg(unix)]
fn is_writeable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writeable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
}

/// Check that `path` is an existing regular file.
///
/// # Errors
///
/// Returns a [`FatalError`] when it is not.
pub fn check_file(path: &Path) -> Result<(), FatalError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(FatalError::new(format!("{} does not exist", path.display())))
    }
}

/// Delete a processed spool file.
///
/// The deletion is logged so that spool handling can be audited from the
/// log alone.
///
/// # Errors
///
/// Propagates the filesystem error (e.g. permission denied, already gone)
/// with the path attached; the caller decides whether that is fatal.
pub fn delete_spool_file(path: &Path) -> Result<()> {
    info!("Deleting: {}", path.display());

    fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))
}

/// Read the full text contents of the file at `path`.
///
/// # Errors
///
/// Propagates the filesystem error with the path attached if the file
/// cannot be opened or read.
pub fn get_file_contents(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_dir_accepts_writable_directory() {
        let tmp = TempDir::new().unwrap();
        assert!(check_dir(tmp.path(), true).is_ok());
        assert!(check_dir(tmp.path(), false).is_ok());
    }

    #[test]
    fn test_check_dir_rejects_missing_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-such-dir");

        let err = check_dir(&missing, false).unwrap_err();
        assert!(err.message().contains("is not a directory"));
    }

    #[test]
    fn test_check_dir_rejects_regular_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("spool.mail");
        fs::write(&file, b"queued").unwrap();

        let err = check_dir(&file, true).unwrap_err();
        assert!(err.message().contains("is not a directory"));
    }

    #[test]
    fn test_check_file_accepts_existing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("template.tpl");
        fs::write(&file, b"Dear $USER").unwrap();

        assert!(check_file(&file).is_ok());
    }

    #[test]
    fn test_check_file_rejects_missing_and_directory() {
        let tmp = TempDir::new().unwrap();

        let missing = check_file(&tmp.path().join("gone")).unwrap_err();
        assert!(missing.message().contains("does not exist"));

        // A directory is not a regular file
        let dir = check_file(tmp.path()).unwrap_err();
        assert!(dir.message().contains("does not exist"));
    }

    #[test]
    fn test_delete_spool_file_removes_file() {
        let tmp = TempDir::new().unwrap();
        let spool = tmp.path().join("1234.mail");
        fs::write(&spool, b"{}").unwrap();

        delete_spool_file(&spool).unwrap();
        assert!(!spool.exists());
    }

    #[test]
    fn test_delete_spool_file_propagates_missing() {
        let tmp = TempDir::new().unwrap();
        let result = delete_spool_file(&tmp.path().join("never-existed.mail"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to delete"));
    }

    #[test]
    fn test_get_file_contents_reads_full_text() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("job.out");
        fs::write(&file, "line one\nline two\n").unwrap();

        assert_eq!(get_file_contents(&file).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_get_file_contents_propagates_missing() {
        let tmp = TempDir::new().unwrap();
        let err = get_file_contents(&tmp.path().join("gone.out")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
