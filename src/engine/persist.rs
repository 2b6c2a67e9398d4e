use log::{info, warn};
use serde_json::{from_str as from_json, to_string as to_json};
use std::collections::HashSet;
use std::error::Error;

use super::{clean_text, Listener, Storage, Task};

pub const DEFAULT_KEY: &str = "neo-brutalism-todos";

pub fn encode(tasks: &[&Task]) -> Result<String, serde_json::Error> {
  to_json(tasks)
}

/// Parses a stored task list, rejecting lists that break the collection's
/// invariants (duplicate ids, blank text) or leave no id for the next task.
pub fn decode(blob: &str) -> Result<Vec<Task>, Box<dyn Error>> {
  let tasks: Vec<Task> = from_json(blob)?;
  let mut seen = HashSet::with_capacity(tasks.len());
  for task in &tasks {
    if !seen.insert(task.id) {
      return Err(format!("Duplicate task id {}", task.id).into());
    }
    if task.id.0 == u64::MAX {
      return Err(format!("Task id {} leaves no room for new ids", task.id).into());
    }
    if clean_text(&task.text).is_none() {
      return Err(format!("Task {} has no text", task.id).into());
    }
  }
  Ok(tasks)
}

/// Reads the initial task list. Missing, unreadable and malformed data all
/// yield an empty list.
#[must_use]
pub fn load_tasks<S: Storage + ?Sized>(storage: &S, key: &str) -> Vec<Task> {
  let blob = match storage.load(key) {
    Ok(Some(blob)) => blob,
    Ok(None) => return Vec::new(),
    Err(e) => {
      warn!("Could not read stored tasks, starting empty: {e}");
      return Vec::new();
    }
  };
  match decode(&blob) {
    Ok(tasks) => {
      info!("Loaded {} tasks from {key}", tasks.len());
      tasks
    }
    Err(e) => {
      warn!("Ignoring malformed tasks under {key}: {e}");
      Vec::new()
    }
  }
}

/// Saves every snapshot it is told about. Failures are logged and dropped.
#[derive(Debug)]
pub struct Persister<S: Storage> {
  storage: S,
  key: String,
}

impl<S: Storage> Persister<S> {
  #[must_use]
  pub fn new(storage: S, key: impl Into<String>) -> Self {
    Self {
      storage,
      key: key.into(),
    }
  }

  pub fn save(&mut self, tasks: &[&Task]) -> Result<(), Box<dyn Error>> {
    let blob = encode(tasks)?;
    self.storage.save(&self.key, &blob)?;
    Ok(())
  }
}

impl<S: Storage> Listener for Persister<S> {
  fn tasks_changed(&mut self, tasks: &[&Task]) {
    if let Err(e) = self.save(tasks) {
      warn!("Could not save tasks under {}: {e}", self.key);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{decode, encode, load_tasks, Persister};
  use crate::engine::{Listener, MemStorage, Storage, StorageError, Task, TaskId};
  use rstest::rstest;
  use std::io::{self, ErrorKind};
  use time::macros::datetime;

  #[derive(Debug)]
  struct FailingStorage;

  impl Storage for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
      Err(io::Error::new(ErrorKind::PermissionDenied, "denied").into())
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
      Err(io::Error::new(ErrorKind::Other, "quota exceeded").into())
    }
  }

  fn sample() -> Vec<Task> {
    vec![
      Task {
        completed: true,
        ..Task::new(
          TaskId(2),
          "Walk the dog".into(),
          datetime!(2024-05-02 08:30:15.5 UTC),
        )
      },
      Task::new(TaskId(1), "Buy milk".into(), datetime!(2024-05-01 10:00 UTC)),
    ]
  }

  #[test]
  fn test_round_trip() {
    let tasks = sample();
    let refs: Vec<&Task> = tasks.iter().collect();
    assert_eq!(decode(&encode(&refs).unwrap()).unwrap(), tasks);
  }

  #[test]
  fn test_decode_browser_data() {
    let tasks = decode(
      r#"[{"id":1714557600000,"text":"Buy milk","completed":false,"createdAt":"2024-05-01T10:00:00.000Z"}]"#,
    )
    .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, TaskId(1_714_557_600_000));
    assert_eq!(tasks[0].created_at, datetime!(2024-05-01 10:00 UTC));
  }

  #[rstest]
  #[case("")]
  #[case("not json")]
  #[case(r#"{"id":1}"#)]
  #[case(r#"[{"id":1,"text":"a"}]"#)]
  #[case(r#"[{"id":1,"text":"a","completed":false,"createdAt":"yesterday"}]"#)]
  #[case(r#"[{"id":1,"text":"  ","completed":false,"createdAt":"2024-05-01T10:00:00Z"}]"#)]
  #[case(r#"[{"id":18446744073709551615,"text":"a","completed":false,"createdAt":"2024-05-01T10:00:00Z"}]"#)]
  #[case(
    r#"[{"id":1,"text":"a","completed":false,"createdAt":"2024-05-01T10:00:00Z"},
        {"id":1,"text":"b","completed":false,"createdAt":"2024-05-01T10:00:00Z"}]"#
  )]
  fn test_malformed_loads_empty(#[case] blob: &str) {
    assert!(decode(blob).is_err());
    assert!(load_tasks(&MemStorage::with_slot("k", blob), "k").is_empty());
  }

  #[test]
  fn test_load_absent_or_unreadable() {
    assert!(load_tasks(&MemStorage::new(), "k").is_empty());
    assert!(load_tasks(&FailingStorage, "k").is_empty());
  }

  #[test]
  fn test_persister_saves_snapshot() {
    let mut storage = MemStorage::new();
    let tasks = sample();
    let refs: Vec<&Task> = tasks.iter().collect();
    Persister::new(&mut storage, "k").tasks_changed(&refs);
    assert_eq!(load_tasks(&storage, "k"), tasks);
  }

  #[test]
  fn test_persister_swallows_failures() {
    let mut persister = Persister::new(FailingStorage, "k");
    assert!(persister.save(&[]).is_err());
    persister.tasks_changed(&[]);
  }
}
