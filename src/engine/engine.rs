use log::debug;
use std::fmt::Debug;
use time::OffsetDateTime;

use super::persist::{load_tasks, Persister};
use super::{clean_text, Storage, Store, Task, TaskId};

/// Gets told about every snapshot that differs from the previous one.
pub trait Listener: Debug {
  fn tasks_changed(&mut self, tasks: &[&Task]);
}

/// Task list operations. None of them fail: blank text and unknown ids leave
/// the list untouched and are reported through the return value only.
pub trait Todos {
  type Store: Store;
  fn add(&mut self, raw_text: &str) -> Option<Task>;
  fn delete(&mut self, id: &TaskId) -> Option<Task>;
  fn toggle_completed(&mut self, id: &TaskId) -> Option<bool>;
  fn edit_text(&mut self, id: &TaskId, raw_text: &str) -> bool;
  fn get_store(&self) -> &Self::Store;

  fn snapshot(&self) -> Vec<&Task> {
    self.get_store().get_tasks()
  }
}

#[derive(Debug)]
pub struct TodosInner<S: Store> {
  store: S,
}

impl<S: Store> TodosInner<S> {
  #[must_use]
  pub const fn new(store: S) -> Self {
    Self { store }
  }
}

impl<S: Store> Todos for TodosInner<S> {
  type Store = S;

  fn add(&mut self, raw_text: &str) -> Option<Task> {
    let text = clean_text(raw_text)?;
    let task = self
      .store
      .create_task(text.into(), OffsetDateTime::now_utc())
      .clone();
    debug!("Added task {}", task.id);
    Some(task)
  }

  fn delete(&mut self, id: &TaskId) -> Option<Task> {
    let task = self.store.delete_task(id)?;
    debug!("Deleted task {id}");
    Some(task)
  }

  fn toggle_completed(&mut self, id: &TaskId) -> Option<bool> {
    let completed = !self.store.get_task(id)?.completed;
    self.store.set_task_completed(id, completed)?;
    debug!("Task {id} completed: {completed}");
    Some(completed)
  }

  fn edit_text(&mut self, id: &TaskId, raw_text: &str) -> bool {
    let Some(text) = clean_text(raw_text) else {
      return false;
    };
    let edited = self.store.set_task_text(id, text.into()).is_some();
    if edited {
      debug!("Edited task {id}");
    }
    edited
  }

  fn get_store(&self) -> &Self::Store {
    &self.store
  }
}

/// Wraps the pure operations and notifies listeners after each change.
#[derive(Debug)]
pub struct TodosImpl<'l, S: Store> {
  inner: TodosInner<S>,
  listeners: Vec<Box<dyn Listener + 'l>>,
}

impl<'l, S: Store> TodosImpl<'l, S> {
  #[must_use]
  pub const fn new(inner: TodosInner<S>) -> Self {
    Self {
      inner,
      listeners: Vec::new(),
    }
  }

  pub fn subscribe(&mut self, listener: impl Listener + 'l) {
    self.listeners.push(Box::new(listener));
  }

  fn notify(&mut self) {
    let tasks = self.inner.store.get_tasks();
    for listener in &mut self.listeners {
      listener.tasks_changed(&tasks);
    }
  }
}

impl<S: Store> Todos for TodosImpl<'_, S> {
  type Store = S;

  fn add(&mut self, raw_text: &str) -> Option<Task> {
    let task = self.inner.add(raw_text);
    if task.is_some() {
      self.notify();
    }
    task
  }

  fn delete(&mut self, id: &TaskId) -> Option<Task> {
    let task = self.inner.delete(id);
    if task.is_some() {
      self.notify();
    }
    task
  }

  fn toggle_completed(&mut self, id: &TaskId) -> Option<bool> {
    let completed = self.inner.toggle_completed(id);
    if completed.is_some() {
      self.notify();
    }
    completed
  }

  fn edit_text(&mut self, id: &TaskId, raw_text: &str) -> bool {
    let edited = self.inner.edit_text(id, raw_text);
    if edited {
      self.notify();
    }
    edited
  }

  fn get_store(&self) -> &Self::Store {
    &self.inner.store
  }
}

/// Rehydrates `store` from `storage` and saves every later change back under
/// `key`.
#[must_use]
pub fn new<'l, S: Store, T: Storage + 'l>(
  mut store: S,
  storage: T,
  key: &str,
) -> TodosImpl<'l, S> {
  store.restore_tasks(load_tasks(&storage, key));
  let mut todos = TodosImpl::new(TodosInner::new(store));
  todos.subscribe(Persister::new(storage, key));
  todos
}
