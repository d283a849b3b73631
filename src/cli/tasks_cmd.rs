use chrono::NaiveDateTime;
use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum TasksCmd {
    #[command(
        about = "Queue a task",
        long_about = "Insert a task and print the id assigned by the store."
    )]
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(long, default_value_t = false, help = "Schedule the task on a timer")]
        timer: bool,
        #[arg(
            long = "run-at",
            value_name = "YYYY-MM-DDTHH:MM:SS",
            help = "When a timed task should run"
        )]
        run_at: Option<NaiveDateTime>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        priority: i64,
        #[arg(
            long,
            value_name = "JSON",
            default_value = "{}",
            help = "Task parameters as a JSON document"
        )]
        params: String,
    },
    #[command(about = "List every task")]
    List,
    #[command(
        about = "Show the next timed task",
        long_about = "Among tasks on a timer, show the one with the highest priority; ties go to the earliest queued."
    )]
    Next,
    #[command(about = "Delete a task by id")]
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
}
