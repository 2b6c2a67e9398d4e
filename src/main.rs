use std::error::Error;

use tasklist::cli::cli;
use tasklist::engine::MemStore;

fn main() -> Result<(), Box<dyn Error>> {
  cli(MemStore::new())
}
