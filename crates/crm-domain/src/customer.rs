use chrono::{DateTime, NaiveDate, Utc};
use crm_core::{CrmError, CrmResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::value::{FieldValue, Fields};

pub type CustomerId = u32;

/// Field keys backed by typed `Customer` fields rather than `extensions`.
pub const CORE_FIELDS: &[&str] = &[
    "id",
    "project",
    "name",
    "company",
    "owner",
    "email",
    "phone",
    "notes",
    "title",
    "department",
    "avatar",
    "status",
    "priority",
    "last_contact",
    "files",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(CrmError::validation(format!("unknown priority '{}'", other))),
        }
    }
}

impl From<Priority> for FieldValue {
    fn from(priority: Priority) -> Self {
        FieldValue::Ordinal(priority.rank(), priority.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl CustomerStatus {
    pub fn label(self) -> &'static str {
        match self {
            CustomerStatus::New => "New",
            CustomerStatus::InProgress => "In Progress",
            CustomerStatus::Closed => "Closed",
        }
    }

    fn rank(self) -> u8 {
        match self {
            CustomerStatus::New => 0,
            CustomerStatus::InProgress => 1,
            CustomerStatus::Closed => 2,
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CustomerStatus {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();
        match normalized.as_str() {
            "new" => Ok(CustomerStatus::New),
            "inprogress" => Ok(CustomerStatus::InProgress),
            "closed" => Ok(CustomerStatus::Closed),
            _ => Err(CrmError::validation(format!("unknown status '{}'", s.trim()))),
        }
    }
}

impl From<CustomerStatus> for FieldValue {
    fn from(status: CustomerStatus) -> Self {
        FieldValue::Ordinal(status.rank(), status.label())
    }
}

/// Descriptor of an uploaded file. The bytes themselves live elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub size: u64,
    pub extension: String,
}

impl FileAttachment {
    /// Build a descriptor from a file name, deriving the extension
    /// (lowercase, with the leading dot, empty when absent).
    pub fn from_name(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        Self {
            name,
            size,
            extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub project: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: CustomerStatus,
    pub priority: Priority,
    pub last_contact: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileAttachment>,
    /// Values of runtime custom columns, keyed by column field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
}

impl Customer {
    /// A freshly added grid row: empty text, status New, priority Medium.
    pub fn blank(id: CustomerId, last_contact: DateTime<Utc>) -> Self {
        Self {
            id,
            project: String::new(),
            name: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            status: CustomerStatus::New,
            priority: Priority::Medium,
            last_contact,
            notes: String::new(),
            avatar: None,
            title: None,
            department: None,
            files: Vec::new(),
            extensions: BTreeMap::new(),
        }
    }

    /// Set one field from its text form, as typed into a grid cell.
    ///
    /// Unknown keys are custom columns and land in `extensions`.
    pub fn set_field(&mut self, key: &str, value: &str) -> CrmResult<()> {
        match key {
            "project" => self.project = value.to_string(),
            "name" => self.name = value.to_string(),
            "company" | "owner" => self.company = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "notes" => self.notes = value.to_string(),
            "title" => self.title = non_empty(value),
            "department" => self.department = non_empty(value),
            "avatar" => self.avatar = non_empty(value),
            "status" => self.status = value.parse()?,
            "priority" => self.priority = value.parse()?,
            "last_contact" => self.last_contact = parse_timestamp(value)?,
            "id" | "files" => {
                let message = format!("field '{}' cannot be edited as text", key);
                return Err(CrmError::validation(message));
            }
            custom => {
                let value = value.to_string();
                self.extensions.insert(custom.to_string(), value);
            }
        }
        Ok(())
    }

    pub fn remove_extension(&mut self, key: &str) -> Option<String> {
        self.extensions.remove(key)
    }

    pub fn attach_files(&mut self, files: impl IntoIterator<Item = FileAttachment>) {
        self.files.extend(files);
    }
}

impl Fields for Customer {
    fn field_value(&self, key: &str) -> Option<FieldValue> {
        let text = |s: &str| Some(FieldValue::Text(s.to_string()));
        match key {
            "id" => Some(FieldValue::Number(u64::from(self.id))),
            "project" => text(&self.project),
            "name" => text(&self.name),
            "company" | "owner" => text(&self.company),
            "email" => text(&self.email),
            "phone" => text(&self.phone),
            "notes" => text(&self.notes),
            "title" => text(self.title.as_deref().unwrap_or_default()),
            "department" => text(self.department.as_deref().unwrap_or_default()),
            "avatar" => text(self.avatar.as_deref().unwrap_or_default()),
            "status" => Some(self.status.into()),
            "priority" => Some(self.priority.into()),
            "last_contact" => Some(FieldValue::Date(self.last_contact)),
            "files" => Some(FieldValue::Number(self.files.len() as u64)),
            custom => self
                .extensions
                .get(custom)
                .map(|v| FieldValue::Text(v.clone())),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_timestamp(value: &str) -> CrmResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CrmError::validation(format!("invalid date '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn customer() -> Customer {
        Customer::blank(1, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_blank_defaults() {
        let c = customer();
        assert_eq!(c.status, CustomerStatus::New);
        assert_eq!(c.priority, Priority::Medium);
        assert!(c.name.is_empty());
        assert!(c.files.is_empty());
    }

    #[test]
    fn test_status_parse_variants() {
        assert_eq!(
            "In Progress".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::InProgress
        );
        assert_eq!(
            "in_progress".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::InProgress
        );
        assert_eq!(
            "CLOSED".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::Closed
        );
        assert!("archived".parse::<CustomerStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_with_space() {
        let json = serde_json::to_string(&CustomerStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn test_set_core_fields() {
        let mut c = customer();
        c.set_field("name", "Ada").unwrap();
        c.set_field("status", "closed").unwrap();
        c.set_field("priority", "High").unwrap();
        c.set_field("last_contact", "2024-05-01").unwrap();
        c.set_field("title", "  ").unwrap();

        assert_eq!(c.name, "Ada");
        assert_eq!(c.status, CustomerStatus::Closed);
        assert_eq!(c.priority, Priority::High);
        assert_eq!(
            c.last_contact,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(c.title, None);
    }

    #[test]
    fn test_set_field_rejects_bad_values() {
        let mut c = customer();
        assert!(c.set_field("priority", "urgent").is_err());
        assert!(c.set_field("last_contact", "yesterday").is_err());
        assert!(c.set_field("id", "7").is_err());
        assert_eq!(c.priority, Priority::Medium);
    }

    #[test]
    fn test_unknown_field_is_extension() {
        let mut c = customer();
        c.set_field("region", "EMEA").unwrap();
        assert_eq!(
            c.field_value("region"),
            Some(FieldValue::Text("EMEA".to_string()))
        );
        assert_eq!(c.remove_extension("region"), Some("EMEA".to_string()));
        assert_eq!(c.field_value("region"), None);
    }

    #[test]
    fn test_file_attachment_extension() {
        assert_eq!(
            FileAttachment::from_name("report.PDF", 10).extension,
            ".pdf"
        );
        assert_eq!(FileAttachment::from_name("README", 10).extension, "");
        assert_eq!(FileAttachment::from_name(".env", 10).extension, "");
    }

    #[test]
    fn test_serde_skips_empty_optionals() {
        let json = serde_json::to_value(customer()).unwrap();
        assert!(json.get("files").is_none());
        assert!(json.get("extensions").is_none());
        assert_eq!(json["status"], "New");
    }
}
