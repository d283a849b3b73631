use std::path::PathBuf;
use std::time::Duration;

use crate::configuration::{Configuration, DatabaseConfig};

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let cfg = Configuration {
            db: DatabaseConfig::new(&cli.db_path)
                .with_busy_timeout(Duration::from_millis(cli.busy_timeout_ms)),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            api_listen: cli.api_listen,
            reset: cli.reset,
        };
        Self { config: cfg }
    }
}

impl std::ops::Deref for Context {
    type Target = Configuration;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn from_cli_builds_database_config() {
        let cli = crate::cli::Cli::try_parse_from([
            "films-db",
            "--db-path",
            "/tmp/films.sqlite",
            "--busy-timeout-ms",
            "1500",
            "--log-file",
            "/tmp/films.log",
        ])
        .unwrap();
        let ctx = Context::from_cli(&cli);
        assert_eq!(ctx.db.path, PathBuf::from("/tmp/films.sqlite"));
        assert_eq!(ctx.db.busy_timeout, Duration::from_millis(1500));
        assert_eq!(ctx.log_file.as_deref(), Some(std::path::Path::new("/tmp/films.log")));
        assert!(!ctx.db.is_in_memory());
    }
}
