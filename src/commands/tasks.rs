use std::io::Write;

use anyhow::{Context, Result};

use super::{print_json, CommandRunner};
use crate::cli;
use crate::storage::{NewTask, Storage, TaskStore};

impl CommandRunner for cli::TasksCmd {
    fn run(&self, storage: &dyn Storage, out: &mut dyn Write) -> Result<()> {
        let _span = ::tracing::info_span!("tasks").entered();
        match self {
            cli::TasksCmd::Add {
                name,
                timer,
                run_at,
                priority,
                params,
            } => {
                let params: serde_json::Value =
                    serde_json::from_str(params).context("parsing --params as JSON")?;
                let task = NewTask {
                    task_name: name.clone(),
                    is_timer_used: *timer,
                    run_in_time: *run_at,
                    priority: *priority,
                    params,
                    done_at: None,
                };
                let id = storage.add_task(&task).context("queueing task")?;
                log::info!("✅ Queued task {} as #{}", name, id);
                print_json(out, &serde_json::json!({ "id": id }))
            }
            cli::TasksCmd::List => {
                let tasks = storage.fetch_all_tasks().context("listing tasks")?;
                print_json(out, &tasks)
            }
            cli::TasksCmd::Next => {
                let task = storage
                    .fetch_top_priority_task()
                    .context("fetching next timed task")?;
                print_json(out, &task)
            }
            cli::TasksCmd::Delete { id } => {
                storage
                    .delete_task_by_id(*id)
                    .with_context(|| format!("deleting task {id}"))?;
                log::info!("🗑️ Deleted task #{}", id);
                Ok(())
            }
        }
    }
}
