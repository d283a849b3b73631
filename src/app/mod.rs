mod wiring;

use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.log_file.as_deref());
        log::info!("🚀 Starting films-db");
        log::info!("📂 Database: {}", ctx.db.path.to_string_lossy());
        if let Some(path) = ctx.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok((Self { ctx, storage }, cli))
    }
}

pub async fn run_daemon(app: App) -> Result<()> {
    let shutdown = CancellationToken::new();

    let api_addr = app.ctx.api_listen;
    let rest_storage = app.storage.clone();
    let rest_shutdown = shutdown.clone();

    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, rest_storage, rest_shutdown).await });

    let finished = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            None
        }
        res = &mut rest_handle => Some(res),
    };

    shutdown.cancel();
    let rest_result = match finished {
        Some(res) => res,
        None => rest_handle.await,
    };

    match rest_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            log::error!("REST server error: {}", e);
            return Err(e);
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            return Err(e.into());
        }
    }

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    match &cli.cmd {
        None | Some(cli::Command::Serve) => run_daemon(app).await,
        Some(cmd) => {
            // one-shot command mode
            let mut stdout = std::io::stdout().lock();
            cmd.run(&app.storage, &mut stdout)
        }
    }
}
