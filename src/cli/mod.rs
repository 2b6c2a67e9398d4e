use clap::{ArgAction, Parser, Subcommand};
use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};
use std::error::Error;
use std::io::{stderr, stdout, Write};
use std::path::PathBuf;

use crate::engine::{
  filter, new as new_engine, stats, FileStorage, Filter, Store, Task, TaskId, Todos, DEFAULT_KEY,
};

#[derive(Debug, Parser)]
#[command(name = "tasklist", author, version, about)]
struct Opts {
  #[arg(long, short, default_value = "tasks.json")]
  /// File the task list is stored in
  file: PathBuf,

  #[arg(long, default_value = DEFAULT_KEY)]
  /// Key the task list is stored under
  key: String,

  #[arg(long, short, action = ArgAction::Count)]
  /// Log more, may be repeated
  verbose: u8,

  #[arg(long)]
  /// Log specification such as "tasklist=debug", overrides --verbose
  log: Option<String>,

  #[command(subcommand)]
  cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
  #[command(visible_alias = "ls")]
  /// List tasks
  List {
    #[arg(long, short, default_value_t = Filter::All)]
    /// One of all, active, completed
    filter: Filter,
  },

  /// Add a new task
  Add {
    #[arg(required = true)]
    text: Vec<String>,
  },

  #[command(visible_alias = "do")]
  /// Mark a task as completed, or as active again
  Toggle { id: TaskId },

  /// Replace the text of a task
  Edit {
    id: TaskId,
    #[arg(required = true)]
    text: Vec<String>,
  },

  #[command(visible_alias = "rm")]
  /// Delete a task
  Delete { id: TaskId },

  /// Count active and completed tasks
  Stats,
}

impl Cmd {
  pub const fn readonly(&self) -> bool {
    matches!(self, Self::List { .. } | Self::Stats)
  }
}

fn init_logging(opts: &Opts) -> Result<LoggerHandle, FlexiLoggerError> {
  let spec = opts.log.as_deref().unwrap_or(match opts.verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  });
  Logger::try_with_str(spec)?.log_to_stderr().start()
}

pub fn cli<S: Store>(store: S) -> Result<(), Box<dyn Error>> {
  let opts = Opts::parse();
  let _logger = init_logging(&opts)?;
  let mut app = new_engine(store, FileStorage::new(&opts.file), &opts.key);
  handle_command(opts.cmd.as_ref(), &mut app)
}

fn handle_command<S: Store, A: Todos<Store = S>>(
  command: Option<&Cmd>,
  app: &mut A,
) -> Result<(), Box<dyn Error>> {
  let default = Cmd::List {
    filter: Filter::All,
  };
  let cmd = command.unwrap_or(&default);
  let interactive = atty::is(atty::Stream::Stdout);
  if cmd.readonly() {
    handle_command_impl(cmd, app, &mut stdout(), interactive)
  } else {
    handle_command_impl(cmd, app, &mut stderr(), interactive)
  }
}

fn handle_command_impl<S: Store, A: Todos<Store = S>, W: Write>(
  command: &Cmd,
  app: &mut A,
  output: &mut W,
  interactive: bool,
) -> Result<(), Box<dyn Error>> {
  match command {
    Cmd::List { filter: mode } => list_tasks(app, output, *mode, interactive),
    Cmd::Add { text } => {
      let task = app.add(&text.join(" "));
      print_task(output, task.as_ref())
    }
    Cmd::Toggle { id } => {
      app.toggle_completed(id);
      print_task(output, app.get_store().get_task(id))
    }
    Cmd::Edit { id, text } => {
      if app.edit_text(id, &text.join(" ")) {
        print_task(output, app.get_store().get_task(id))
      } else {
        Ok(())
      }
    }
    Cmd::Delete { id } => {
      let task = app.delete(id);
      print_task(output, task.as_ref())
    }
    Cmd::Stats => {
      writeln!(output, "{}", stats(app.snapshot()))?;
      Ok(())
    }
  }
}

fn list_tasks<A: Todos, W: Write>(
  app: &A,
  output: &mut W,
  mode: Filter,
  interactive: bool,
) -> Result<(), Box<dyn Error>> {
  let tasks = app.snapshot();
  let shown = filter(tasks.iter().copied(), mode);
  let width = shown
    .iter()
    .map(|task| task.id.to_string().len())
    .max()
    .unwrap_or(0);
  for task in &shown {
    write_task(output, task, width)?;
  }
  if interactive {
    if shown.is_empty() {
      writeln!(output, "{}", mode.empty_message())?;
    }
    writeln!(output)?;
    writeln!(output, "{}", stats(tasks))?;
  }
  Ok(())
}

fn write_task<W: Write>(output: &mut W, task: &Task, width: usize) -> Result<(), Box<dyn Error>> {
  writeln!(
    output,
    "{:width$} [{}] {}",
    task.id,
    if task.completed { 'x' } else { ' ' },
    task.text,
    width = width
  )?;
  Ok(())
}

fn print_task<W: Write>(output: &mut W, task: Option<&Task>) -> Result<(), Box<dyn Error>> {
  match task {
    Some(task) => write_task(output, task, 0),
    None => Ok(()),
  }
}
