//! Scoped temp directory for run outputs
//!
//! Acquired once per run. [`RunTempDir::scope`] runs the body and then
//! removes the directory on every exit path before handing back the body's
//! result; a panic unwinding through the scope is covered by `Drop`.

use crate::error::SuiteError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEMP_PREFIX: &str = "stellar-cli-tests.";

#[derive(Debug)]
pub struct RunTempDir {
    dir: TempDir,
}

impl RunTempDir {
    /// Create a fresh directory under the system temp location
    pub fn acquire() -> Result<Self, SuiteError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir()
            .map_err(SuiteError::TempDir)?;
        tracing::debug!(target: "SUITE", "temp dir {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Create the directory under `parent` instead
    pub fn acquire_in(parent: &Path) -> Result<Self, SuiteError> {
        let dir = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(parent)
            .map_err(SuiteError::TempDir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory, reporting failures instead of ignoring them
    pub fn close(self) -> Result<(), SuiteError> {
        let path: PathBuf = self.dir.path().to_path_buf();
        self.dir.close().map_err(SuiteError::TempDir)?;
        tracing::debug!(target: "SUITE", "removed temp dir {}", path.display());
        Ok(())
    }

    /// Run `body`, then remove the directory whatever the body returned.
    ///
    /// The body's error wins over a cleanup error so the caller sees the
    /// original failure.
    pub fn scope<T, F>(self, body: F) -> Result<T, SuiteError>
    where
        F: FnOnce(&Path) -> Result<T, SuiteError>,
    {
        let result = body(self.path());
        let cleanup = self.close();
        match (result, cleanup) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                tracing::error!(target: "SUITE", "cleanup failed after error: {}", cleanup_err);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scope_removes_dir_on_success() {
        let run_dir = RunTempDir::acquire().unwrap();
        let path = run_dir.path().to_path_buf();
        assert!(path.is_dir());

        let value = run_dir
            .scope(|dir| {
                fs::create_dir_all(dir.join("dna_both"))?;
                fs::write(dir.join("dna_both/e-1.gff"), "x")?;
                Ok(7)
            })
            .unwrap();

        assert_eq!(value, 7);
        assert!(!path.exists());
    }

    #[test]
    fn test_scope_removes_dir_then_propagates_error() {
        let run_dir = RunTempDir::acquire().unwrap();
        let path = run_dir.path().to_path_buf();

        let result: Result<(), _> =
            run_dir.scope(|_| Err(SuiteError::Config("boom".to_string())));

        assert!(matches!(result, Err(SuiteError::Config(msg)) if msg == "boom"));
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_dir_on_panic() {
        let parent = tempfile::tempdir().unwrap();
        let run_dir = RunTempDir::acquire_in(parent.path()).unwrap();
        let path = run_dir.path().to_path_buf();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            run_dir.scope(|_| -> Result<(), SuiteError> { panic!("tool harness bug") })
        }));

        assert!(outcome.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_prefix() {
        let parent = tempfile::tempdir().unwrap();
        let run_dir = RunTempDir::acquire_in(parent.path()).unwrap();
        let name = run_dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(TEMP_PREFIX));
        run_dir.close().unwrap();
    }
}
