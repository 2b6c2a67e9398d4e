mod data;
mod edit;
mod engine;
mod filter;
mod mem_store;
mod persist;
mod storage;
mod store;

pub use data::{clean_text, Task, TaskDate, TaskId};
pub use edit::EditSession;
pub use engine::{new, Listener, Todos, TodosImpl, TodosInner};
pub use filter::{filter, stats, Filter, Stats};
pub use mem_store::MemStore;
pub use persist::{decode, encode, load_tasks, Persister, DEFAULT_KEY};
pub use storage::{FileStorage, MemStorage, Storage, StorageError};
pub use store::Store;
