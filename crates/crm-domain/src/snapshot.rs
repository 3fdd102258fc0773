//! Point-in-time capture of all CRM data.
//!
//! The store never edits a published `Snapshot`. Every applied mutation
//! builds a new one and swaps it in behind a fresh `Arc`, so consumers can
//! tell whether anything changed with `Arc::ptr_eq`.

use crate::{Customer, Table, TableId, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Point-in-time capture of all tables and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Snapshot {
    /// Customer tables, in display order.
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Tasks shared by the kanban and gantt views.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(tables: Vec<Table>, tasks: Vec<Task>) -> Self {
        Self { tables, tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.tasks.is_empty()
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn table_ids(&self) -> Vec<TableId> {
        self.tables.iter().map(|t| t.id).collect()
    }

    /// One past the largest table id, or 1 when there are no tables.
    pub fn next_table_id(&self) -> TableId {
        next_table_id(&self.tables)
    }

    /// Every customer across all tables, in table order.
    pub fn all_customers(&self) -> impl Iterator<Item = &Customer> {
        self.tables.iter().flat_map(|t| t.customers.iter())
    }
}

pub(crate) fn next_table_id(tables: &[Table]) -> TableId {
    tables.iter().map(|t| t.id).max().unwrap_or(0) + 1
}
