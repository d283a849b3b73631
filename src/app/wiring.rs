use anyhow::{Context, Result};

use crate::{context, storage};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    if ctx.db.is_in_memory() {
        return Ok(());
    }
    if let Some(dir) = ctx.db.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.to_string_lossy()))?;
    }
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    if ctx.reset && !ctx.db.is_in_memory() {
        storage::SqliteStorage::reset_all(&ctx.db.path).context("resetting storage")?;
        log::info!("🧹 Removed {}", ctx.db.path.to_string_lossy());
    }
    let sqlite = storage::SqliteStorage::open(&ctx.db).context("initializing storage")?;
    Ok(sqlite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{Configuration, DatabaseConfig};
    use crate::storage::{Movie, MovieStore};

    fn ctx_for(path: &std::path::Path, reset: bool) -> context::Context {
        context::Context {
            config: Configuration {
                db: DatabaseConfig::new(path),
                log_file: None,
                api_listen: "127.0.0.1:0".parse().unwrap(),
                reset,
            },
        }
    }

    #[test]
    fn init_creates_nested_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("films.sqlite");
        let ctx = ctx_for(&path, false);

        init_data_dir(&ctx).unwrap();
        init_storage(&ctx).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reset_starts_from_an_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("films.sqlite");

        {
            let storage = init_storage(&ctx_for(&path, false)).unwrap();
            storage
                .insert_movie(&Movie::new("tt1", "Kept?", "7.0", "2001", ""))
                .unwrap();
        }

        let storage = init_storage(&ctx_for(&path, false)).unwrap();
        assert_eq!(storage.fetch_all_movies().unwrap().len(), 1);
        drop(storage);

        let storage = init_storage(&ctx_for(&path, true)).unwrap();
        assert!(storage.fetch_all_movies().unwrap().is_empty());
    }
}
