//! To-do tasks and the lists they are grouped in

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Whether a task is done, and possibly when it was done
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CompletionStatus {
    Completed(Option<DateTime<Utc>>),
    Uncompleted,
}
impl CompletionStatus {
    pub fn is_completed(&self) -> bool {
        match self {
            CompletionStatus::Completed(_) => true,
            _ => false,
        }
    }
}

/// The tabs of the to-do list.
///
/// `All` is only a view over the other groups: no task is ever stored in it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskGroup {
    All,
    Inbox,
    Today,
    Future,
}

impl TaskGroup {
    /// Every group, in the order the tabs are displayed
    pub fn all() -> [TaskGroup; 4] {
        [TaskGroup::All, TaskGroup::Inbox, TaskGroup::Today, TaskGroup::Future]
    }

    /// The group a task added from this tab is stored in
    pub fn storage_group(&self) -> TaskGroup {
        match self {
            TaskGroup::All => TaskGroup::Inbox,
            other => *other,
        }
    }
}

impl Display for TaskGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TaskGroup::All => "All",
            TaskGroup::Inbox => "Inbox",
            TaskGroup::Today => "Today",
            TaskGroup::Future => "Future",
        };
        write!(f, "{}", label)
    }
}

/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: Uuid,
    /// The display name of the task
    name: String,
    completion_status: CompletionStatus,
    group: TaskGroup,
    creation_date: DateTime<Utc>,
}

impl Task {
    /// Create a brand new, uncompleted task, with a random ID
    pub fn new(name: String, group: TaskGroup) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            completion_status: CompletionStatus::Uncompleted,
            group: group.storage_group(),
            creation_date: Utc::now(),
        }
    }

    pub fn id(&self) -> &Uuid       { &self.id          }
    pub fn name(&self) -> &str      { &self.name        }
    pub fn group(&self) -> TaskGroup { self.group       }
    pub fn completed(&self) -> bool { self.completion_status.is_completed() }
    pub fn creation_date(&self) -> &DateTime<Utc>        { &self.creation_date }
    pub fn completion_status(&self) -> &CompletionStatus { &self.completion_status }

    pub fn set_name(&mut self, new_name: String) {
        self.name = new_name;
    }

    pub fn set_group(&mut self, group: TaskGroup) {
        self.group = group.storage_group();
    }

    pub fn set_completion_status(&mut self, new_completion_status: CompletionStatus) {
        self.completion_status = new_completion_status;
    }

    /// Mark as completed now if it was not completed, or as uncompleted otherwise
    pub fn toggle_completed(&mut self) {
        let new_status = if self.completed() {
            CompletionStatus::Uncompleted
        } else {
            CompletionStatus::Completed(Some(Utc::now()))
        };
        self.set_completion_status(new_status);
    }
}



/// The tasks of the to-do list, in the order they have been added
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new task from the tab of a given group. Returns its ID
    pub fn add(&mut self, name: String, group: TaskGroup) -> Uuid {
        let task = Task::new(name, group);
        let id = *task.id();
        log::debug!("Adding task {} to {}", id, task.group());
        self.tasks.push(task);
        id
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Task> {
        match self.tasks.iter().position(|t| t.id() == id) {
            None => Err(Error::NoSuchTask(*id)),
            Some(pos) => Ok(self.tasks.remove(pos)),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// The tasks displayed in the tab of a group
    pub fn filtered(&self, group: TaskGroup) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|t| group == TaskGroup::All || t.group() == group)
            .collect()
    }

    /// The number of tasks displayed in the tab of a group
    pub fn count(&self, group: TaskGroup) -> usize {
        self.filtered(group).len()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}
