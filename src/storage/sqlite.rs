use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::{
    functions::FunctionFlags,
    params, params_from_iter,
    types::{Type, ValueRef},
    Connection, OptionalExtension,
};
use thiserror::Error;

use super::{
    error::{StorageError, StorageResult},
    filter::{SearchCriteria, SearchQuery, MOVIE_COLUMNS},
    movie::Movie,
    task::{NewTask, Task},
    traits::{MovieStore, TaskStore},
};
use crate::configuration::DatabaseConfig;

pub const TOP_RATED_THRESHOLD: f64 = 6.0;
pub const TOP_RATED_LIMIT: i64 = 50;

const TASK_COLUMNS: &str =
    "id, task_name, is_timer_used, run_in_time, priority, params_json, created_at, done_at";

/// Shared handle over a single SQLite connection.
///
/// Cloning is cheap; every clone talks to the same connection, one statement at a time.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Error)]
#[error("{0:?} is not a finite number")]
struct NotNumeric(String);

fn parse_numeric_text(bytes: &[u8]) -> Result<f64, NotNumeric> {
    let text = String::from_utf8_lossy(bytes);
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NotNumeric(text.into_owned())),
    }
}

fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

    // Numeric view of text columns; fails the statement instead of coercing to 0.
    conn.create_scalar_function("parse_real", 1, flags, |ctx| match ctx.get_raw(0) {
        ValueRef::Integer(i) => Ok(i as f64),
        ValueRef::Real(r) => Ok(r),
        ValueRef::Text(bytes) => parse_numeric_text(bytes)
            .map_err(|err| rusqlite::Error::UserFunctionError(Box::new(err))),
        other => Err(rusqlite::Error::UserFunctionError(Box::new(NotNumeric(
            format!("{}", other.data_type()),
        )))),
    })?;

    conn.create_scalar_function("contains_ci", 2, flags, |ctx| {
        let haystack: String = ctx.get(0)?;
        let needle: String = ctx.get(1)?;
        Ok(haystack.to_lowercase().contains(&needle.to_lowercase()))
    })?;

    Ok(())
}

fn map_movie_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        code: row.get(0)?,
        title: row.get(1)?,
        rating: row.get(2)?,
        year: row.get(3)?,
        image_link: row.get(4)?,
    })
}

fn map_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let params_json: String = row.get(5)?;
    let params = serde_json::from_str(&params_json)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;
    Ok(Task {
        id: row.get(0)?,
        task_name: row.get(1)?,
        is_timer_used: row.get(2)?,
        run_in_time: row.get(3)?,
        priority: row.get(4)?,
        params,
        created_at: row.get(6)?,
        done_at: row.get(7)?,
    })
}

fn db_insert_movie(conn: &Connection, movie: &Movie) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO movies (code, title, rating, year, image_link) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            movie.code,
            movie.title,
            movie.rating,
            movie.year,
            movie.image_link
        ],
    )?;
    Ok(())
}

fn db_list_movies(conn: &Connection) -> rusqlite::Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!("SELECT {MOVIE_COLUMNS} FROM movies"))?;
    let rows = stmt
        .query_map([], map_movie_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_list_top_rated_recent(conn: &Connection) -> rusqlite::Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT {MOVIE_COLUMNS}
        FROM movies
        WHERE parse_real(rating) > ?1
        ORDER BY created_at DESC, parse_real(rating) DESC
        LIMIT ?2
        "#
    ))?;
    let rows = stmt
        .query_map(params![TOP_RATED_THRESHOLD, TOP_RATED_LIMIT], map_movie_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_load_movie(conn: &Connection, code: &str) -> rusqlite::Result<Option<Movie>> {
    conn.query_row(
        &format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE code = ?1"),
        params![code],
        map_movie_row,
    )
    .optional()
}

fn db_search_movies(conn: &Connection, query: &SearchQuery) -> rusqlite::Result<Vec<Movie>> {
    if let Some(guard) = query.guard {
        conn.query_row(guard, [], |_| Ok(()))?;
    }
    let mut stmt = conn.prepare(&query.sql)?;
    let rows = stmt
        .query_map(params_from_iter(query.params.iter()), map_movie_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_insert_task(conn: &Connection, task: &NewTask) -> rusqlite::Result<i64> {
    conn.execute(
        r#"
        INSERT INTO tasks (task_name, is_timer_used, run_in_time, priority, params_json, done_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            task.task_name,
            task.timer_enabled(),
            task.run_in_time,
            task.priority,
            task.params.to_string(),
            task.done_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_delete_task(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])
}

fn db_load_top_priority_task(conn: &Connection) -> rusqlite::Result<Option<Task>> {
    conn.query_row(
        &format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE is_timer_used = 1
            ORDER BY priority DESC, created_at ASC, id ASC
            LIMIT 1
            "#
        ),
        [],
        map_task_row,
    )
    .optional()
}

fn db_list_tasks(conn: &Connection) -> rusqlite::Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks"))?;
    let rows = stmt
        .query_map([], map_task_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

impl SqliteStorage {
    /// Open the database, bootstrap the tables and check the connection answers.
    pub fn open(config: &DatabaseConfig) -> StorageResult<Self> {
        let path = config.path.to_string_lossy().to_string();
        let conn = Self::connect(config).map_err(|source| StorageError::Connection {
            path: path.clone(),
            source,
        })?;
        log::info!("📂 Database ready at {}", path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Remove the database file and its WAL side files.
    pub fn reset_all<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        for suffix in ["", "-wal", "-shm"] {
            let mut file = path.as_os_str().to_owned();
            file.push(suffix);
            let file = Path::new(&file);
            if file.exists() {
                std::fs::remove_file(file)?;
            }
        }
        Ok(())
    }

    fn connect(config: &DatabaseConfig) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&config.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(config.busy_timeout)?;

        register_functions(&conn)?;
        Self::bootstrap(&conn)?;
        Self::probe(&conn)?;
        Ok(conn)
    }

    fn bootstrap(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                code TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                rating TEXT NOT NULL,
                year TEXT NOT NULL,
                image_link TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_name TEXT NOT NULL,
                is_timer_used INTEGER NOT NULL,
                run_in_time TEXT,
                priority INTEGER NOT NULL,
                params_json TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                done_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_movies_created_at ON movies(created_at);
            CREATE INDEX IF NOT EXISTS idx_tasks_timer_priority ON tasks(is_timer_used, priority);
            "#,
        )
    }

    fn probe(conn: &Connection) -> rusqlite::Result<()> {
        conn.query_row("SELECT 1", [], |_| Ok(()))
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }
}

impl MovieStore for SqliteStorage {
    fn insert_movie(&self, movie: &Movie) -> StorageResult<()> {
        self.with_conn(|conn| db_insert_movie(conn, movie))
            .map_err(StorageError::write("insert movie"))?;
        log::debug!("Inserted movie {}", movie.code);
        Ok(())
    }

    fn fetch_all_movies(&self) -> StorageResult<Vec<Movie>> {
        let rows = self
            .with_conn(db_list_movies)
            .map_err(StorageError::read("fetch movies"))?;
        Ok(rows)
    }

    fn fetch_top_rated_recent(&self) -> StorageResult<Vec<Movie>> {
        let rows = self
            .with_conn(db_list_top_rated_recent)
            .map_err(StorageError::read("fetch latest top-rated movies"))?;
        Ok(rows)
    }

    fn get_by_code(&self, code: &str) -> StorageResult<Movie> {
        self.with_conn(|conn| db_load_movie(conn, code))
            .map_err(StorageError::read("fetch movie"))?
            .ok_or_else(|| StorageError::NotFound {
                entity: "movie",
                key: code.to_string(),
            })
    }

    fn search_movies(&self, criteria: &SearchCriteria) -> StorageResult<Vec<Movie>> {
        let query = SearchQuery::build(criteria);
        log::debug!(
            "Searching movies: {} ({} params)",
            query.sql,
            query.params.len()
        );
        let rows = self
            .with_conn(|conn| db_search_movies(conn, &query))
            .map_err(StorageError::read("search movies"))?;
        Ok(rows)
    }
}

impl TaskStore for SqliteStorage {
    fn add_task(&self, task: &NewTask) -> StorageResult<i64> {
        let id = self
            .with_conn(|conn| db_insert_task(conn, task))
            .map_err(StorageError::write("insert task"))?;
        log::debug!("Inserted task {} ({})", id, task.task_name);
        Ok(id)
    }

    fn delete_task_by_id(&self, id: i64) -> StorageResult<()> {
        let affected = self
            .with_conn(|conn| db_delete_task(conn, id))
            .map_err(StorageError::write("delete task"))?;
        if affected == 0 {
            return Err(StorageError::NotFound {
                entity: "task",
                key: id.to_string(),
            });
        }
        Ok(())
    }

    fn fetch_top_priority_task(&self) -> StorageResult<Task> {
        self.with_conn(db_load_top_priority_task)
            .map_err(StorageError::read("fetch top priority task"))?
            .ok_or_else(|| StorageError::NotFound {
                entity: "task",
                key: "with timer".to_string(),
            })
    }

    fn fetch_all_tasks(&self) -> StorageResult<Vec<Task>> {
        let rows = self
            .with_conn(db_list_tasks)
            .map_err(StorageError::read("fetch tasks"))?;
        Ok(rows)
    }
}
