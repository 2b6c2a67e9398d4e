use super::{Task, TaskDate, TaskId};

/// Ordered task collection. `get_tasks` yields display order, newest first.
pub trait Store {
  fn create_task(&mut self, text: String, created_at: TaskDate) -> &Task;
  fn restore_tasks(&mut self, tasks: Vec<Task>);
  fn set_task_completed(&mut self, task: &TaskId, completed: bool) -> Option<&Task>;
  fn set_task_text(&mut self, task: &TaskId, text: String) -> Option<&Task>;
  fn delete_task(&mut self, task: &TaskId) -> Option<Task>;

  fn get_task(&self, task: &TaskId) -> Option<&Task>;
  fn get_tasks(&self) -> Vec<&Task>;
}
