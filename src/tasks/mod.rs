//! Recurring tasks.
//!
//! Tasks carry an optional recurrence rule. Completing a recurring task
//! spawns the next occurrence with the due date advanced by the rule;
//! weekday recurrence skips weekends so a Friday task lands on Monday.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// How a task repeats after completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// One-shot task.
    #[default]
    None,
    /// Every day.
    Daily,
    /// Every weekday (Monday through Friday).
    Weekdays,
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Every calendar month.
    Monthly,
}

impl Recurrence {
    /// Returns the next due date after `due`, or `None` for one-shot
    /// tasks (or on date overflow at the calendar boundary).
    #[must_use]
    pub fn next_due_date(&self, due: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::None => None,
            Self::Daily => due.checked_add_days(Days::new(1)),
            Self::Weekdays => {
                let days_to_add = match due.weekday() {
                    Weekday::Fri => 3,
                    Weekday::Sat => 2,
                    _ => 1,
                };
                due.checked_add_days(Days::new(days_to_add))
            }
            Self::Weekly => due.checked_add_days(Days::new(7)),
            Self::Biweekly => due.checked_add_days(Days::new(14)),
            Self::Monthly => due.checked_add_months(Months::new(1)),
        }
    }
}

/// A task on the user's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Whether the task is done.
    pub completed: bool,
    /// Recurrence rule.
    pub recurrence: Recurrence,
    /// Whether a due-date reminder was already sent. Absent in legacy
    /// stored records, so deserialization defaults it.
    #[serde(default)]
    pub reminder_sent: bool,
}

/// Fields for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Recurrence rule.
    #[serde(default)]
    pub recurrence: Recurrence,
}

/// The user's task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Adds a task and returns its ID.
    pub fn add(&mut self, new_task: NewTask) -> Uuid {
        let id = Uuid::new_v4();
        self.tasks.push(Task {
            id,
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            completed: false,
            recurrence: new_task.recurrence,
            reminder_sent: false,
        });
        id
    }

    /// Removes a task. Returns whether it existed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Toggles a task's completion. Returns whether it existed.
    ///
    /// Completing a recurring task spawns the next occurrence as a fresh
    /// incomplete task before the toggle; un-completing never spawns.
    pub fn toggle_completion(&mut self, id: Uuid) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return false;
        };

        let task = &self.tasks[index];
        if !task.completed {
            if let Some(next_due) = task.recurrence.next_due_date(task.due_date) {
                let spawned = NewTask {
                    title: task.title.clone(),
                    description: task.description.clone(),
                    due_date: next_due,
                    recurrence: task.recurrence,
                };
                debug!(due = %next_due, "spawning next occurrence of recurring task");
                self.add(spawned);
            }
        }

        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        true
    }

    /// Returns incomplete tasks due on or before `today` that have not
    /// been reminded about yet.
    #[must_use]
    pub fn due_for_reminder(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| !task.completed && !task.reminder_sent && task.due_date <= today)
            .collect()
    }

    /// Marks a task's reminder as sent. Returns whether it existed.
    pub fn mark_reminder_sent(&mut self, id: Uuid) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.reminder_sent = true;
                true
            }
            None => false,
        }
    }
}
