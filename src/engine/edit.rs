use super::{Task, TaskId, Todos};

/// In-place editing of one task's text. Dropping the session cancels it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditSession {
  id: TaskId,
  draft: String,
}

impl EditSession {
  #[must_use]
  pub fn start(task: &Task) -> Self {
    Self {
      id: task.id,
      draft: task.text.clone(),
    }
  }

  #[must_use]
  pub const fn id(&self) -> TaskId {
    self.id
  }

  #[must_use]
  pub fn draft(&self) -> &str {
    &self.draft
  }

  pub fn set_draft(&mut self, draft: impl Into<String>) {
    self.draft = draft.into();
  }

  /// Applies the draft. A blank draft leaves the task as it was.
  pub fn commit<T: Todos>(self, todos: &mut T) -> bool {
    todos.edit_text(&self.id, &self.draft)
  }
}

#[cfg(test)]
mod tests {
  use super::EditSession;
  use crate::engine::{MemStore, Todos, TodosInner};

  #[test]
  fn test_edit_session() {
    let mut todos = TodosInner::new(MemStore::new());
    let task = todos.add("Buy milk").unwrap();

    let mut session = EditSession::start(&task);
    assert_eq!(session.draft(), "Buy milk");
    session.set_draft("  Buy oat milk ");
    assert!(session.commit(&mut todos));
    assert_eq!(todos.snapshot()[0].text, "Buy oat milk");

    let mut session = EditSession::start(todos.snapshot()[0]);
    session.set_draft("   ");
    assert!(!session.commit(&mut todos));
    assert_eq!(todos.snapshot()[0].text, "Buy oat milk");

    let mut session = EditSession::start(todos.snapshot()[0]);
    session.set_draft("never saved");
    drop(session);
    assert_eq!(todos.snapshot()[0].text, "Buy oat milk");
  }
}
