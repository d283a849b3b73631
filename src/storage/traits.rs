use super::{
    error::StorageResult,
    filter::SearchCriteria,
    movie::Movie,
    task::{NewTask, Task},
};

pub trait MovieStore {
    fn insert_movie(&self, movie: &Movie) -> StorageResult<()>;
    fn fetch_all_movies(&self) -> StorageResult<Vec<Movie>>;
    /// Latest movies rated above 6.0, newest first, at most 50.
    fn fetch_top_rated_recent(&self) -> StorageResult<Vec<Movie>>;
    fn get_by_code(&self, code: &str) -> StorageResult<Movie>;
    fn search_movies(&self, criteria: &SearchCriteria) -> StorageResult<Vec<Movie>>;
}

pub trait TaskStore {
    fn add_task(&self, task: &NewTask) -> StorageResult<i64>;
    fn delete_task_by_id(&self, id: i64) -> StorageResult<()>;
    fn fetch_top_priority_task(&self) -> StorageResult<Task>;
    fn fetch_all_tasks(&self) -> StorageResult<Vec<Task>>;
}

pub trait Storage: MovieStore + TaskStore {}

impl<T: MovieStore + TaskStore> Storage for T {}
