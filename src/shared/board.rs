//! Board Data Model
//!
//! The board aggregate as it is stored and sent over the wire:
//! a `Board` owns an ordered list of `Column`s, each column owns an ordered
//! list of `Task`s and each task owns an ordered list of `Subtask`s.
//!
//! Columns are addressed by name, tasks and subtasks by id. Every entity
//! receives a fresh `ObjectId` when it is materialized from a draft, before it
//! is inserted into its parent.
//!
//! # Wire Format
//!
//! Identifiers use the document-database representation:
//!
//! ```json
//! {
//!   "_id": { "$oid": "6f1c0a4e2b7d4f0e9d3a8c1b5e2f7a90" },
//!   "user": { "$oid": "..." },
//!   "name": "Sprint",
//!   "columns": [
//!     { "_id": { "$oid": "..." }, "name": "To Do", "tasks": [] }
//!   ]
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Identifier for users, boards, columns, tasks and subtasks
///
/// Serializes as `{"$oid": "<hex>"}`. Deserializes from that form or from a
/// bare string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a hex (or hyphenated) identifier
    pub fn parse_str(value: &str) -> Result<Self, SharedError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| SharedError::invalid_id(value))
    }

    /// The underlying UUID, used for database binding
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Lowercase hex form without hyphens
    pub fn to_hex(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ObjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ObjectId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[derive(Serialize)]
struct WrappedOid<'a> {
    #[serde(rename = "$oid")]
    oid: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OidRepr {
    Wrapped {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Bare(String),
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let hex = self.to_hex();
        WrappedOid { oid: &hex }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match OidRepr::deserialize(deserializer)? {
            OidRepr::Wrapped { oid } => oid,
            OidRepr::Bare(value) => value,
        };
        ObjectId::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// A task board owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Owning user
    #[serde(rename = "user")]
    pub owner_id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Locate a task by column name and task id
    pub fn task(&self, column_name: &str, task_id: ObjectId) -> Option<&Task> {
        self.column(column_name)?.task(task_id)
    }

    pub fn task_mut(&mut self, column_name: &str, task_id: ObjectId) -> Option<&mut Task> {
        self.column_mut(column_name)?.task_mut(task_id)
    }

    /// Summary projection used by board listings
    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// A named lane of tasks, unique by name within its board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn task(&self, task_id: ObjectId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: ObjectId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}

/// A unit of work; `status` always equals the owning column's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn subtask(&self, subtask_id: ObjectId) -> Option<&Subtask> {
        self.subtasks.iter().find(|subtask| subtask.id == subtask_id)
    }

    pub fn subtask_mut(&mut self, subtask_id: ObjectId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|subtask| subtask.id == subtask_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

/// Reduced projection returned by board listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

/// Column as supplied by a client, before it has an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDraft {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<TaskDraft>,
}

impl ColumnDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Assign fresh ids to the column and anything nested in it
    pub fn materialize(self) -> Column {
        let tasks = self
            .tasks
            .into_iter()
            .map(|task| task.materialize(&self.name))
            .collect();
        Column {
            id: ObjectId::new(),
            name: self.name,
            tasks,
        }
    }
}

/// Task as supplied by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<SubtaskDraft>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            subtasks: Vec::new(),
        }
    }

    /// Assign fresh ids to the task and every subtask, ignoring client ids
    pub fn materialize(self, status: &str) -> Task {
        Task {
            id: ObjectId::new(),
            title: self.title,
            description: self.description,
            status: status.to_string(),
            subtasks: self
                .subtasks
                .into_iter()
                .map(SubtaskDraft::materialize)
                .collect(),
        }
    }
}

/// Subtask as supplied by a client; `id` is present when it refers to an
/// existing subtask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskDraft {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(rename = "isCompleted", default)]
    pub is_completed: bool,
}

impl SubtaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            is_completed: false,
        }
    }

    pub fn existing(id: ObjectId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            is_completed: false,
        }
    }

    pub fn materialize(self) -> Subtask {
        Subtask {
            id: ObjectId::new(),
            title: self.title,
            is_completed: self.is_completed,
        }
    }
}

impl From<&Subtask> for SubtaskDraft {
    fn from(subtask: &Subtask) -> Self {
        Self {
            id: Some(subtask.id),
            title: subtask.title.clone(),
            is_completed: subtask.is_completed,
        }
    }
}
