use std::collections::VecDeque;

use super::{Store, Task, TaskDate, TaskId};

#[derive(Debug)]
pub struct MemStore {
  tasks: VecDeque<Task>,
  last_task_id: TaskId,
}

impl Default for MemStore {
  fn default() -> Self {
    Self {
      tasks: VecDeque::default(),
      last_task_id: TaskId(0),
    }
  }
}

impl MemStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn position(&self, task: &TaskId) -> Option<usize> {
    self.tasks.iter().position(|t| t.id == *task)
  }

  fn get_task_mut(&mut self, task: &TaskId) -> Option<&mut Task> {
    self.tasks.iter_mut().find(|t| t.id == *task)
  }
}

impl Store for MemStore {
  fn create_task(&mut self, text: String, created_at: TaskDate) -> &Task {
    self.last_task_id = TaskId(self.last_task_id.0 + 1);
    self
      .tasks
      .push_front(Task::new(self.last_task_id, text, created_at));
    &self.tasks[0]
  }

  fn restore_tasks(&mut self, tasks: Vec<Task>) {
    // Ids are never reused, not even those of tasks deleted before the restore
    if let Some(max_id) = tasks.iter().map(|t| t.id).max() {
      self.last_task_id = self.last_task_id.max(max_id);
    }
    self.tasks = tasks.into();
  }

  fn set_task_completed(&mut self, task: &TaskId, completed: bool) -> Option<&Task> {
    let task = self.get_task_mut(task)?;
    task.completed = completed;
    Some(&*task)
  }

  fn set_task_text(&mut self, task: &TaskId, text: String) -> Option<&Task> {
    let task = self.get_task_mut(task)?;
    task.text = text;
    Some(&*task)
  }

  fn delete_task(&mut self, task: &TaskId) -> Option<Task> {
    let pos = self.position(task)?;
    self.tasks.remove(pos)
  }

  fn get_task(&self, task: &TaskId) -> Option<&Task> {
    self.tasks.iter().find(|t| t.id == *task)
  }

  fn get_tasks(&self) -> Vec<&Task> {
    self.tasks.iter().collect()
  }
}
