//! Field access by string key.
//!
//! Grid columns, filter descriptors and sort descriptors all name fields by
//! key. Records expose their fields through [`Fields`] so the same filter and
//! sort code works for customers and tasks, including runtime custom columns.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Date(DateTime<Utc>),
    /// An enumerated value: its sort rank and its display label.
    Ordinal(u8, &'static str),
}

impl FieldValue {
    /// Ordering used by sort descriptors. Values of different kinds compare
    /// by their display text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Ordinal(a, _), Self::Ordinal(b, _)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Ordinal(_, label) => write!(f, "{}", label),
        }
    }
}

/// Records whose fields can be read by key.
pub trait Fields {
    /// `None` means the record has no such field.
    fn field_value(&self, key: &str) -> Option<FieldValue>;
}

impl<T: Fields + ?Sized> Fields for &T {
    fn field_value(&self, key: &str) -> Option<FieldValue> {
        (**self).field_value(key)
    }
}
