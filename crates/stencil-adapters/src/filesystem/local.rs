//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{application::ports::Filesystem, error::StencilResult};

/// Production filesystem implementation using `std::fs`.
///
/// Writes are all-or-nothing per file: content goes to a temporary sibling
/// first and is renamed into place, so a failure mid-write never leaves a
/// truncated target behind.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        let tmp = temp_sibling(path);

        std::fs::write(&tmp, content).map_err(|e| map_io_error(path, e, "write file"))?;

        if let Err(e) = std::fs::rename(&tmp, path) {
            // The temp file must not linger next to the target.
            let _ = std::fs::remove_file(&tmp);
            return Err(map_io_error(path, e, "move file into place"));
        }

        Ok(())
    }

    fn read_file(&self, path: &Path) -> StencilResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Temp path next to the target, unique per process.
///
/// Same directory as the target so the final rename stays on one filesystem
/// (rename across mount points is not atomic).
fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".into());
    let tmp_name = format!(".{}.stencil-tmp.{}", file_name, std::process::id());
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => std::path::PathBuf::from(tmp_name),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> stencil_core::error::StencilError {
    use stencil_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("hello.txt");

        fs.write_file(&path, b"hello\n").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_file(&path).unwrap(), b"hello\n");
    }

    #[test]
    fn write_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("file.txt");

        fs.write_file(&path, b"first").unwrap();
        fs.write_file(&path, b"second").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), b"second");
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.write_file(&temp.path().join("a.txt"), b"x").unwrap();

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt"]);
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let nested = temp.path().join("a/b/c");

        fs.create_dir_all(&nested).unwrap();
        fs.create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn read_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.read_file(&temp.path().join("nope")).is_err());
    }
}
