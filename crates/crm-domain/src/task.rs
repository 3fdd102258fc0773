use chrono::{DateTime, Utc};
use crm_core::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};

use crate::customer::Priority;
use crate::field_update::FieldUpdate;
use crate::value::{FieldValue, Fields};

pub type TaskId = u32;

/// A work item shown on the kanban board and the gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub percent_complete: u8,
}

/// Partial update merged into a task by a view before it calls
/// `Store::update_task`.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
    pub start_date: FieldUpdate<DateTime<Utc>>,
    pub end_date: FieldUpdate<DateTime<Utc>>,
    pub percent_complete: Option<u8>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status: status.into(),
            priority: Priority::Medium,
            assignee: String::new(),
            start_date: None,
            end_date: None,
            percent_complete: 0,
        }
    }

    pub fn with_schedule(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn set_percent_complete(&mut self, percent: u8) {
        self.percent_complete = percent.min(100);
    }

    /// Return a copy with `update` applied. The original is untouched.
    pub fn merged(&self, update: TaskUpdate) -> Task {
        let mut task = self.clone();
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(assignee) = update.assignee {
            task.assignee = assignee;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        update.start_date.apply_to(&mut task.start_date);
        update.end_date.apply_to(&mut task.end_date);
        if let Some(percent) = update.percent_complete {
            task.set_percent_complete(percent);
        }
        task
    }

    /// Check the invariants the store enforces on `update_task`.
    pub fn validate(&self) -> CrmResult<()> {
        if self.percent_complete > 100 {
            let message = format!(
                "task {} percent complete {} exceeds 100",
                self.id, self.percent_complete
            );
            return Err(CrmError::validation(message));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                let message = format!("task {} ends before it starts", self.id);
                return Err(CrmError::validation(message));
            }
        }
        Ok(())
    }

    /// Whole days between start and end, when both are set.
    pub fn duration_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

impl Fields for Task {
    fn field_value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(FieldValue::Number(u64::from(self.id))),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "assignee" => Some(FieldValue::Text(self.assignee.clone())),
            "priority" => Some(self.priority.into()),
            "start_date" => self.start_date.map(FieldValue::Date),
            "end_date" => self.end_date.map(FieldValue::Date),
            "percent_complete" => Some(FieldValue::Number(u64::from(self.percent_complete))),
            _ => None,
        }
    }
}
