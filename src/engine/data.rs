use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Error as FmtError, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;
use time::OffsetDateTime;

#[derive(Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy)]
pub struct TaskId(pub u64);

impl Display for TaskId {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    self.0.fmt(formatter)
  }
}

impl FromStr for TaskId {
  type Err = ParseIntError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse().map(Self)
  }
}

pub type TaskDate = OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id: TaskId,
  pub text: String,
  pub completed: bool,
  #[serde(with = "time::serde::rfc3339")]
  pub created_at: TaskDate,
}

impl Task {
  #[must_use]
  pub const fn new(id: TaskId, text: String, created_at: TaskDate) -> Self {
    Self {
      id,
      text,
      completed: false,
      created_at,
    }
  }
}

/// Trims user input, returning `None` if nothing is left.
#[must_use]
pub fn clean_text(raw_text: &str) -> Option<&str> {
  Some(raw_text.trim()).filter(|text| !text.is_empty())
}
