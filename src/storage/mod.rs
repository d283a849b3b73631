pub mod error;
pub mod filter;
mod movie;
pub mod sqlite;
mod task;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use filter::{SearchCriteria, SearchQuery};
pub use movie::Movie;
pub use sqlite::SqliteStorage;
pub use task::{NewTask, Task};
pub use traits::{MovieStore, Storage, TaskStore};
