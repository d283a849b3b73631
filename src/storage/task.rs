use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A queued task as persisted in the `tasks` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub is_timer_used: bool,
    pub run_in_time: Option<NaiveDateTime>,
    pub priority: i64,
    pub params: serde_json::Value,
    pub created_at: NaiveDateTime,
    pub done_at: Option<NaiveDateTime>,
}

/// Caller-supplied fields of a task; the store assigns `id` and `created_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub task_name: String,
    #[serde(default)]
    pub is_timer_used: bool,
    #[serde(default)]
    pub run_in_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
    pub done_at: Option<NaiveDateTime>,
}

impl NewTask {
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            is_timer_used: false,
            run_in_time: None,
            priority: 0,
            params: serde_json::Value::Null,
            done_at: None,
        }
    }

    pub fn with_timer(mut self, run_in_time: Option<NaiveDateTime>) -> Self {
        self.is_timer_used = true;
        self.run_in_time = run_in_time;
        self
    }

    /// A scheduled run time puts the task on a timer even when the flag is unset.
    pub fn timer_enabled(&self) -> bool {
        self.is_timer_used || self.run_in_time.is_some()
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_deserializes_with_defaults() {
        let task: NewTask = serde_json::from_str(r#"{"task_name":"refresh posters"}"#).unwrap();
        assert_eq!(task, NewTask::new("refresh posters"));
    }

    #[test]
    fn builder_sets_timer_and_priority() {
        let task = NewTask::new("scrape")
            .with_timer(None)
            .with_priority(5)
            .with_params(serde_json::json!({"page": 2}));
        assert!(task.is_timer_used);
        assert_eq!(task.priority, 5);
        assert_eq!(task.params["page"], 2);
    }

    #[test]
    fn run_time_implies_timer() {
        let mut task = NewTask::new("nightly import");
        assert!(!task.timer_enabled());

        task.run_in_time = NaiveDateTime::parse_from_str("2026-11-01 03:00:00", "%Y-%m-%d %H:%M:%S").ok();
        assert!(!task.is_timer_used);
        assert!(task.timer_enabled());
    }
}
