//! Dispatch Report
//!
//! Result types for one publish-triggered dispatch.

use serde::Serialize;

use crate::domain::ports::SyncSummary;

/// What happened to a single task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Filtered out by its target database
    Skipped,
    Succeeded(SyncSummary),
    /// Execution failed; the message is what was logged
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    /// Position in registration order
    pub index: usize,
    pub task: String,
    #[serde(flatten)]
    pub status: TaskStatus,
}

/// Outcomes of every registered task for one publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub database: String,
    pub outcomes: Vec<TaskOutcome>,
}

impl DispatchReport {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize, task: impl Into<String>, status: TaskStatus) {
        self.outcomes.push(TaskOutcome {
            index,
            task: task.into(),
            status,
        });
    }

    pub fn succeeded(&self) -> usize {
        self.count(|status| matches!(status, TaskStatus::Succeeded(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, TaskStatus::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, TaskStatus::Skipped))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&TaskStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(&outcome.status))
            .count()
    }
}
