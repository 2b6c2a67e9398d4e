use std::borrow::Borrow;
use std::fmt::{Display, Error as FmtError, Formatter};
use std::str::FromStr;

use super::Task;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Filter {
  #[default]
  All,
  Active,
  Completed,
}

impl Filter {
  #[must_use]
  pub const fn matches(self, task: &Task) -> bool {
    match self {
      Self::All => true,
      Self::Active => !task.completed,
      Self::Completed => task.completed,
    }
  }

  /// What to show when nothing passes the filter.
  #[must_use]
  pub const fn empty_message(self) -> &'static str {
    match self {
      Self::All => "NO TASKS YET!",
      Self::Active => "NO ACTIVE TASKS!",
      Self::Completed => "NO COMPLETED TASKS!",
    }
  }
}

impl Display for Filter {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    formatter.write_str(match self {
      Self::All => "all",
      Self::Active => "active",
      Self::Completed => "completed",
    })
  }
}

impl FromStr for Filter {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "all" => Ok(Self::All),
      "active" => Ok(Self::Active),
      "completed" => Ok(Self::Completed),
      other => Err(format!(
        "Unknown filter {other}, expected one of all, active, completed"
      )),
    }
  }
}

/// Projects `tasks` onto those matching `mode`, keeping their order.
#[must_use]
pub fn filter<'a, I>(tasks: I, mode: Filter) -> Vec<&'a Task>
where
  I: IntoIterator<Item = &'a Task>,
{
  tasks.into_iter().filter(|task| mode.matches(task)).collect()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
  pub active: usize,
  pub completed: usize,
  pub total: usize,
}

impl Display for Stats {
  fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), FmtError> {
    write!(
      formatter,
      "{} ACTIVE • {} COMPLETED • {} TOTAL",
      self.active, self.completed, self.total
    )
  }
}

/// Counts are taken fresh from the `completed` flags on every call.
#[must_use]
pub fn stats<I>(tasks: I) -> Stats
where
  I: IntoIterator,
  I::Item: Borrow<Task>,
{
  let (completed, total) = tasks
    .into_iter()
    .fold((0, 0), |(completed, total), task| {
      (completed + usize::from(task.borrow().completed), total + 1)
    });
  Stats {
    active: total - completed,
    completed,
    total,
  }
}

#[cfg(test)]
mod tests {
  use super::{filter, stats, Filter, Stats};
  use crate::engine::{Task, TaskId};
  use rstest::{fixture, rstest};
  use time::macros::datetime;

  #[fixture]
  fn tasks() -> Vec<Task> {
    let now = datetime!(2024-05-01 10:00 UTC);
    (1..=5)
      .rev()
      .map(|id| Task {
        completed: id % 2 == 0,
        ..Task::new(TaskId(id), format!("task {id}"), now)
      })
      .collect()
  }

  fn ids(tasks: &[&Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.id.0).collect()
  }

  #[rstest]
  #[case(Filter::All, &[5, 4, 3, 2, 1])]
  #[case(Filter::Active, &[5, 3, 1])]
  #[case(Filter::Completed, &[4, 2])]
  fn test_filter(tasks: Vec<Task>, #[case] mode: Filter, #[case] expected: &[u64]) {
    let filtered = filter(&tasks, mode);
    assert_eq!(ids(&filtered), expected);
    assert_eq!(ids(&filter(filtered.iter().copied(), mode)), expected);
  }

  #[rstest]
  fn test_filter_all_is_identity(tasks: Vec<Task>) {
    let all: Vec<Task> = filter(&tasks, Filter::All).into_iter().cloned().collect();
    assert_eq!(all, tasks);
  }

  #[rstest]
  fn test_stats(tasks: Vec<Task>) {
    let stats = stats(&tasks);
    assert_eq!(
      stats,
      Stats {
        active: 3,
        completed: 2,
        total: 5
      }
    );
    assert_eq!(stats.to_string(), "3 ACTIVE • 2 COMPLETED • 5 TOTAL");
  }

  #[test]
  fn test_stats_empty() {
    assert_eq!(stats(Vec::<&Task>::new()), Stats::default());
  }

  #[rstest]
  #[case("all", Filter::All)]
  #[case("active", Filter::Active)]
  #[case("completed", Filter::Completed)]
  fn test_filter_from_str(#[case] input: &str, #[case] expected: Filter) {
    assert_eq!(input.parse::<Filter>(), Ok(expected));
    assert_eq!(expected.to_string(), input);
  }

  #[test]
  fn test_filter_from_str_unknown() {
    assert!("done".parse::<Filter>().is_err());
  }
}
