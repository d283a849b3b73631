mod args;
mod command;
mod movies_cmd;
mod tasks_cmd;

pub use args::Cli;
pub use command::Command;
pub use movies_cmd::MoviesCmd;
pub use tasks_cmd::TasksCmd;

pub use args::parse;
