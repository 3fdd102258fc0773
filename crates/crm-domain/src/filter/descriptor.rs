use crm_core::CrmError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::value::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    fn needs_value(self) -> bool {
        !matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

impl FromStr for FilterOperator {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" => Ok(FilterOperator::Eq),
            "neq" | "!=" => Ok(FilterOperator::Neq),
            "contains" | "~" => Ok(FilterOperator::Contains),
            "doesnotcontain" | "!~" => Ok(FilterOperator::DoesNotContain),
            "startswith" => Ok(FilterOperator::StartsWith),
            "endswith" => Ok(FilterOperator::EndsWith),
            "isempty" => Ok(FilterOperator::IsEmpty),
            "isnotempty" => Ok(FilterOperator::IsNotEmpty),
            other => Err(CrmError::validation(format!("unknown filter operator '{}'", other))),
        }
    }
}

/// One condition on one field. Text comparison is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

impl FilterDescriptor {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    /// A record without the field reads as empty text.
    pub fn matches<R: Fields + ?Sized>(&self, record: &R) -> bool {
        let actual = record
            .field_value(&self.field)
            .map(|v| v.to_string().to_lowercase())
            .unwrap_or_default();
        let expected = self.value.to_lowercase();

        match self.operator {
            FilterOperator::Eq => actual == expected,
            FilterOperator::Neq => actual != expected,
            FilterOperator::Contains => actual.contains(&expected),
            FilterOperator::DoesNotContain => !actual.contains(&expected),
            FilterOperator::StartsWith => actual.starts_with(&expected),
            FilterOperator::EndsWith => actual.ends_with(&expected),
            FilterOperator::IsEmpty => actual.trim().is_empty(),
            FilterOperator::IsNotEmpty => !actual.trim().is_empty(),
        }
    }
}

impl FromStr for FilterDescriptor {
    type Err = CrmError;

    /// Parses `field:operator:value`, or `field:operator` for the
    /// emptiness operators. The value may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let field = parts.next().map(str::trim).unwrap_or_default();
        let operator: FilterOperator = parts
            .next()
            .ok_or_else(|| CrmError::validation(format!("filter '{}' has no operator", s)))?
            .parse()?;
        let value = parts.next().unwrap_or_default();

        if field.is_empty() {
            return Err(CrmError::validation(format!("filter '{}' has no field", s)));
        }
        if operator.needs_value() && value.is_empty() {
            return Err(CrmError::validation(format!("filter '{}' has no value", s)));
        }
        Ok(Self::new(field, operator, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterLogic {
    #[default]
    And,
    Or,
}

/// Several descriptors joined by one logic. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeFilter {
    pub logic: FilterLogic,
    pub filters: Vec<FilterDescriptor>,
}

impl CompositeFilter {
    pub fn new(logic: FilterLogic) -> Self {
        Self {
            logic,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: FilterDescriptor) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn matches<R: Fields + ?Sized>(&self, record: &R) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        match self.logic {
            FilterLogic::And => self.filters.iter().all(|f| f.matches(record)),
            FilterLogic::Or => self.filters.iter().any(|f| f.matches(record)),
        }
    }

    /// The matching records, in their original order.
    pub fn apply<'a, R: Fields>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Customer, CustomerStatus};
    use chrono::Utc;

    fn customer(id: u32, name: &str, status: CustomerStatus) -> Customer {
        let mut c = Customer::blank(id, Utc::now());
        c.name = name.to_string();
        c.status = status;
        c
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let c = customer(1, "Jane Smith", CustomerStatus::New);
        assert!(FilterDescriptor::contains("name", "SMITH").matches(&c));
        assert!(!FilterDescriptor::contains("name", "doe").matches(&c));
    }

    #[test]
    fn test_status_compares_by_label() {
        let c = customer(1, "Jane", CustomerStatus::InProgress);
        let filter = FilterDescriptor::new("status", FilterOperator::Eq, "in progress");
        assert!(filter.matches(&c));
    }

    #[test]
    fn test_missing_field_is_empty() {
        let c = customer(1, "Jane", CustomerStatus::New);
        assert!(FilterDescriptor::new("region", FilterOperator::IsEmpty, "").matches(&c));
        assert!(!FilterDescriptor::new("region", FilterOperator::Eq, "emea").matches(&c));
    }

    #[test]
    fn test_composite_logic() {
        let rows = vec![
            customer(1, "John Doe", CustomerStatus::New),
            customer(2, "Jane Smith", CustomerStatus::Closed),
            customer(3, "Ann Brown", CustomerStatus::New),
        ];
        let and = CompositeFilter::new(FilterLogic::And)
            .with_filter(FilterDescriptor::new("status", FilterOperator::Eq, "New"))
            .with_filter(FilterDescriptor::contains("name", "j"));
        let ids: Vec<_> = and.apply(&rows).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        let or = CompositeFilter::new(FilterLogic::Or)
            .with_filter(FilterDescriptor::new("status", FilterOperator::Eq, "Closed"))
            .with_filter(FilterDescriptor::new("name", FilterOperator::StartsWith, "ann"));
        let ids: Vec<_> = or.apply(&rows).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert_eq!(CompositeFilter::default().apply(&rows).len(), 3);
    }

    #[test]
    fn test_parse_descriptor() {
        let parsed: FilterDescriptor = "notes:contains:call at 10:30".parse().unwrap();
        assert_eq!(parsed.field, "notes");
        assert_eq!(parsed.operator, FilterOperator::Contains);
        assert_eq!(parsed.value, "call at 10:30");

        let empty: FilterDescriptor = "title:isempty".parse().unwrap();
        assert_eq!(empty.operator, FilterOperator::IsEmpty);

        assert!("name".parse::<FilterDescriptor>().is_err());
        assert!("name:eq".parse::<FilterDescriptor>().is_err());
        assert!(":eq:x".parse::<FilterDescriptor>().is_err());
        assert!("name:like:x".parse::<FilterDescriptor>().is_err());
    }
}
