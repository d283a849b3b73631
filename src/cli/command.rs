use clap::Subcommand;

use crate::cli::movies_cmd::MoviesCmd;
use crate::cli::tasks_cmd::TasksCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Serve the REST API (default)",
        long_about = "Open the database and serve the movie and task endpoints over HTTP until Ctrl-C."
    )]
    Serve,
    #[command(
        about = "Movie catalog commands",
        long_about = "Insert, list, look up and search movie records. Results are printed as JSON."
    )]
    Movies {
        #[command(subcommand)]
        cmd: MoviesCmd,
    },
    #[command(
        about = "Task queue commands",
        long_about = "Queue, list, inspect and delete tasks. Results are printed as JSON."
    )]
    Tasks {
        #[command(subcommand)]
        cmd: TasksCmd,
    },
}
