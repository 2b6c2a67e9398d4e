//! Durable string slots the task list is saved into.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("storage I/O failed: {0}")]
  Io(#[from] io::Error),

  #[error("storage contents are not a key-value map: {0}")]
  Format(#[from] serde_json::Error),
}

/// Key-value capability the task list depends on but does not own.
pub trait Storage: Debug {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
  fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemStorage {
  slots: BTreeMap<String, String>,
}

impl MemStorage {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_slot(key: &str, value: &str) -> Self {
    let mut storage = Self::new();
    storage.slots.insert(key.into(), value.into());
    storage
  }
}

impl Storage for MemStorage {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.slots.get(key).cloned())
  }

  fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.slots.insert(key.into(), value.into());
    Ok(())
  }
}

impl<S: Storage + ?Sized> Storage for &mut S {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    (**self).load(key)
  }

  fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    (**self).save(key, value)
  }
}

/// All slots live in one JSON object in a single file.
#[derive(Debug)]
pub struct FileStorage {
  path: PathBuf,
}

impl FileStorage {
  #[must_use]
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  fn read_slots(&self) -> Result<BTreeMap<String, String>, StorageError> {
    match fs::read_to_string(&self.path) {
      Ok(contents) => Ok(serde_json::from_str(&contents)?),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
      Err(e) => Err(e.into()),
    }
  }
}

impl Storage for FileStorage {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.read_slots()?.remove(key))
  }

  fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    // Other keys in a corrupt file cannot be kept
    let mut slots = match self.read_slots() {
      Ok(slots) => slots,
      Err(StorageError::Format(_)) => BTreeMap::new(),
      Err(e) => return Err(e),
    };
    slots.insert(key.into(), value.into());
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }
    fs::write(&self.path, serde_json::to_string_pretty(&slots)?)?;
    Ok(())
  }
}
