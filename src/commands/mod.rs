use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Command;
use crate::storage::Storage;

pub mod movies;
pub mod tasks;

pub trait CommandRunner {
    fn run(&self, storage: &dyn Storage, out: &mut dyn Write) -> Result<()>;
}

impl Command {
    /// Run a one-shot command. `Serve` is handled by the daemon and is a no-op here.
    pub fn run(&self, storage: &dyn Storage, out: &mut dyn Write) -> Result<()> {
        match self {
            Command::Serve => Ok(()),
            Command::Movies { cmd } => cmd.run(storage, out),
            Command::Tasks { cmd } => cmd.run(storage, out),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
