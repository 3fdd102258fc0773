//! Grid column configuration.
//!
//! A layout belongs to one grid instance and is never stored in a snapshot.

use crm_core::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};

use crate::customer::CORE_FIELDS;

const CUSTOM_COLUMN_WIDTH: u16 = 150;

/// How a cell in the column is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnEditor {
    Text,
    Status,
    Priority,
    Date,
    Profile,
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub field: String,
    pub title: String,
    /// Width in pixels.
    pub width: u16,
    pub show: bool,
    #[serde(default)]
    pub is_custom: bool,
    pub editor: ColumnEditor,
}

impl ColumnConfig {
    pub fn new(field: &str, title: &str, width: u16, editor: ColumnEditor) -> Self {
        Self {
            field: field.to_string(),
            title: title.to_string(),
            width,
            show: true,
            is_custom: false,
            editor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    columns: Vec<ColumnConfig>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::default_grid()
    }
}

impl ColumnLayout {
    /// The customer grid's built-in columns, in display order.
    pub fn default_grid() -> Self {
        use ColumnEditor::*;
        Self {
            columns: vec![
                ColumnConfig::new("project", "ProjectName", 150, Text),
                ColumnConfig::new("owner", "Owner", 150, Profile),
                ColumnConfig::new("email", "Email", 200, Text),
                ColumnConfig::new("phone", "Phone", 150, Text),
                ColumnConfig::new("status", "Status", 130, Status),
                ColumnConfig::new("priority", "Priority", 120, Priority),
                ColumnConfig::new("last_contact", "Last Contact", 170, Date),
                ColumnConfig::new("notes", "Notes", 200, Text),
                ColumnConfig::new("files", "Files", 200, Files),
            ],
        }
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    pub fn visible(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|c| c.show)
    }

    pub fn get(&self, field: &str) -> Option<&ColumnConfig> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Returns false when no column has that field.
    pub fn toggle_visibility(&mut self, field: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.field == field) {
            Some(column) => {
                column.show = !column.show;
                true
            }
            None => false,
        }
    }

    /// Move the column at `from` so it ends up at `to`. Out-of-range
    /// indices leave the layout alone.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        if from >= self.columns.len() || to >= self.columns.len() {
            return false;
        }
        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        true
    }

    /// Field key for a custom column title: lowercase, whitespace runs
    /// collapsed to `_`.
    pub fn field_key_for(title: &str) -> String {
        title
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Append a custom text column. A blank title adds nothing.
    pub fn add_custom(&mut self, title: &str) -> CrmResult<Option<&ColumnConfig>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let field = Self::field_key_for(title);
        if self.get(&field).is_some() || CORE_FIELDS.contains(&field.as_str()) {
            return Err(CrmError::validation(format!("column '{}' already exists", field)));
        }
        let mut column = ColumnConfig::new(&field, title, CUSTOM_COLUMN_WIDTH, ColumnEditor::Text);
        column.is_custom = true;
        self.columns.push(column);
        Ok(self.columns.last())
    }

    pub fn remove(&mut self, field: &str) -> Option<ColumnConfig> {
        let index = self.columns.iter().position(|c| c.field == field)?;
        Some(self.columns.remove(index))
    }
}
