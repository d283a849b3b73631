use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Movie catalog and task queue backed by SQLite",
    long_about = "Stores movie records and a small task queue in SQLite and exposes them over a REST API or one-shot commands.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "db-path",
        env = "FILMS_DB_PATH",
        default_value = ".films-db/films.sqlite",
        value_name = "PATH",
        help = "SQLite database file (use :memory: for a throwaway database)"
    )]
    pub db_path: String,

    #[arg(
        long = "busy-timeout-ms",
        env = "FILMS_DB_BUSY_TIMEOUT_MS",
        default_value_t = 500u64,
        value_name = "MS",
        help = "How long a statement waits on a locked database before failing"
    )]
    pub busy_timeout_ms: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Delete the SQLite database before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "FILMS_DB_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "FILMS_DB_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8084",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Command, MoviesCmd, TasksCmd};

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["films-db"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.busy_timeout_ms, 500);
        assert!(!cli.reset);
    }

    #[test]
    fn parses_search_with_repeated_years() {
        let cli = Cli::try_parse_from([
            "films-db",
            "--db-path",
            ":memory:",
            "movies",
            "search",
            "--query",
            "alien",
            "--year",
            "1979",
            "--year",
            "1986",
            "--min-rating",
            "8",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Movies {
                cmd:
                    MoviesCmd::Search {
                        query,
                        years,
                        min_rating,
                    },
            }) => {
                assert_eq!(query, "alien");
                assert_eq!(years, vec!["1979".to_string(), "1986".to_string()]);
                assert_eq!(min_rating, 8.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_min_rating() {
        for bad in ["inf", "-inf", "NaN", "high"] {
            let res = Cli::try_parse_from(["films-db", "movies", "search", "--min-rating", bad]);
            assert!(res.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn parses_task_delete() {
        let cli = Cli::try_parse_from(["films-db", "tasks", "delete", "7"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Some(Command::Tasks {
                cmd: TasksCmd::Delete { id: 7 }
            })
        ));
    }
}
