//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stencil_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    /// Paths whose writes fail, for exercising partial-failure handling.
    fail_writes: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file as UTF-8 (testing helper).
    pub fn read_string(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Seed a file without going through the port (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: &[u8]) {
        let mut inner = self.inner.write().unwrap();
        let path = path.into();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path, content.to_vec());
    }

    /// Make all future writes to `path` fail (testing helper).
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.inner.write().unwrap().fail_writes.insert(path.into());
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.inner.read().unwrap().files.len()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
        inner.fail_writes.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> stencil_core::error::StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> stencil_core::error::StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        if inner.fail_writes.contains(path) {
            return Err(stencil_core::application::ApplicationError::FileWrite {
                path: path.to_path_buf(),
                reason: "injected write failure".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    stencil_core::application::ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "Parent directory does not exist".into(),
                    }
                    .into(),
                );
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> stencil_core::error::StencilResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        inner.files.get(path).cloned().ok_or_else(|| {
            stencil_core::application::ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}
