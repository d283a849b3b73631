pub mod app;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod rest;
pub mod storage;
pub mod tracing;

pub use configuration::DatabaseConfig;
pub use storage::{
    Movie, MovieStore, NewTask, SearchCriteria, SqliteStorage, Storage, StorageError, Task,
    TaskStore,
};
