//! Task checklist for the pomo CLI.
//!
//! A small CRUD list with filter views, persisted as one JSON blob through
//! [`crate::storage`]. The checklist is a sibling of the timer: the timer
//! core never reads or writes tasks.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{Storage, StorageError, TASKS_KEY};

/// Maximum length of a task text in characters.
pub const MAX_TASK_TEXT_LENGTH: usize = 100;

// ============================================================================
// Task
// ============================================================================

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id within the checklist
    pub id: u64,
    /// The task text
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// Creation time as unix seconds
    pub created_at: u64,
}

/// Filter views over the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl TaskFilter {
    /// Returns true if the task belongs to this view.
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }
}

// ============================================================================
// TaskError
// ============================================================================

/// Errors from checklist operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// No task has the given id
    #[error("No task with id {0}")]
    NotFound(u64),

    /// The task text was empty after trimming
    #[error("Task text cannot be empty")]
    EmptyText,

    /// The task text exceeds [`MAX_TASK_TEXT_LENGTH`]
    #[error("Task text is too long (max {MAX_TASK_TEXT_LENGTH} characters)")]
    TextTooLong,

    /// The underlying blob store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ============================================================================
// TaskStore
// ============================================================================

/// The checklist plus its backing storage.
///
/// Every mutation is persisted immediately, so concurrent CLI invocations
/// see each other's writes on next load.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Loads the checklist from storage. A missing blob yields an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob exists but cannot be read or parsed.
    pub fn load(storage: Storage) -> Result<Self, TaskError> {
        let tasks = storage.load_json(TASKS_KEY)?.unwrap_or_default();
        Ok(Self { storage, tasks })
    }

    /// Adds a task and returns it.
    ///
    /// The text is trimmed; empty or over-long text is rejected.
    pub fn add(&mut self, text: &str) -> Result<Task, TaskError> {
        let text = validate_task_text(text)?;
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            text,
            completed: false,
            created_at: unix_now(),
        };
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Toggles the completed flag of the task with the given id and returns
    /// the updated task.
    pub fn toggle(&mut self, id: u64) -> Result<Task, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.completed = !task.completed;
        let task = task.clone();
        self.persist()?;
        Ok(task)
    }

    /// Removes the task with the given id and returns it.
    pub fn remove(&mut self, id: u64) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        let task = self.tasks.remove(index);
        self.persist()?;
        Ok(task)
    }

    /// Returns the tasks belonging to the given filter view, in insertion
    /// order.
    pub fn tasks(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Returns the total number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the checklist is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn persist(&self) -> Result<(), TaskError> {
        self.storage.save_json(TASKS_KEY, &self.tasks)?;
        Ok(())
    }
}

/// Trims and validates task text.
fn validate_task_text(text: &str) -> Result<String, TaskError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskError::EmptyText);
    }
    if trimmed.chars().count() > MAX_TASK_TEXT_LENGTH {
        return Err(TaskError::TextTooLong);
    }
    Ok(trimmed.to_string())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
