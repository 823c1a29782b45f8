use crate::error::{Result, ValidatorError};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Storage for uploaded documents and the intermediate files derived from them.
///
/// Names are flat identifiers. A store only lives as long as one batch: the batch
/// validator clears it when it finishes.
pub trait ArtifactStore {
    fn put(&mut self, name: &str, bytes: Vec<u8>) -> Result<()>;

    /// Fails with [`ValidatorError::DocumentNotFound`] when nothing is stored under `name`.
    fn get(&self, name: &str) -> Result<Vec<u8>>;

    fn names(&self) -> Vec<String>;

    /// Removes every stored artifact.
    fn clear(&mut self) -> Result<()>;

    fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }

    fn is_empty(&self) -> bool {
        self.names().is_empty()
    }
}

fn check_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if invalid {
        return Err(ValidatorError::InvalidArtifactName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: BTreeMap<String, Vec<u8>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&mut self, name: &str, bytes: Vec<u8>) -> Result<()> {
        check_name(name)?;
        self.artifacts.insert(name.to_string(), bytes);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>> {
        self.artifacts
            .get(name)
            .cloned()
            .ok_or_else(|| ValidatorError::DocumentNotFound(name.to_string()))
    }

    fn names(&self) -> Vec<String> {
        self.artifacts.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.artifacts.clear();
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }
}

/// Artifacts stored as files in one directory. [`DirectoryArtifactStore::temporary`] uses a
/// fresh temporary directory that is removed when the store is dropped.
#[derive(Debug)]
pub struct DirectoryArtifactStore {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl DirectoryArtifactStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, _temp: None })
    }

    pub fn temporary() -> Result<Self> {
        let temp = TempDir::new()?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            _temp: Some(temp),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        check_name(name)?;
        Ok(self.root.join(name))
    }
}

impl ArtifactStore for DirectoryArtifactStore {
    fn put(&mut self, name: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path_for(name)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ValidatorError::DocumentNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn names(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    fn clear(&mut self) -> Result<()> {
        if !self.root.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        debug!("Cleared artifact directory {}", self.root.display());
        Ok(())
    }
}

/// Clears the wrapped store exactly once, when the scope is dropped.
pub struct BatchScope<'a> {
    store: &'a mut dyn ArtifactStore,
}

impl<'a> BatchScope<'a> {
    pub fn new(store: &'a mut dyn ArtifactStore) -> Self {
        Self { store }
    }

    pub fn store(&mut self) -> &mut dyn ArtifactStore {
        &mut *self.store
    }
}

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        match self.store.clear() {
            Ok(()) => debug!("Cleaned up batch artifacts"),
            Err(e) => warn!("Failed to clean up batch artifacts: {}", e),
        }
    }
}
