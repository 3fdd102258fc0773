//! Record sorting.
//!
//! Sort descriptors are applied in order: the first descriptor decides, later
//! ones break ties, and records still tied keep their original order.

use crm_core::CrmError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::value::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(CrmError::validation(format!("unknown sort direction '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    #[serde(default)]
    pub dir: SortDirection,
}

impl SortDescriptor {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            dir: SortDirection::Desc,
        }
    }

    /// Records missing the field sort after those that have it, in both
    /// directions.
    pub fn compare<R: Fields + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        match (a.field_value(&self.field), b.field_value(&self.field)) {
            (Some(av), Some(bv)) => {
                let cmp = av.compare(&bv);
                match self.dir {
                    SortDirection::Asc => cmp,
                    SortDirection::Desc => cmp.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl FromStr for SortDescriptor {
    type Err = CrmError;

    /// Parses `field` or `field:asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field.trim(), dir.parse()?),
            None => (s.trim(), SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(CrmError::validation(format!("sort '{}' has no field", s)));
        }
        Ok(Self {
            field: field.to_string(),
            dir,
        })
    }
}

/// Stable multi-key sort in place.
pub fn sort_records<R: Fields>(records: &mut [R], descriptors: &[SortDescriptor]) {
    if descriptors.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        descriptors
            .iter()
            .map(|d| d.compare(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Customer, Priority, Task};
    use chrono::{Duration, Utc};

    fn customer(id: u32, name: &str, priority: Priority) -> Customer {
        let mut c = Customer::blank(id, Utc::now());
        c.name = name.to_string();
        c.priority = priority;
        c
    }

    #[test]
    fn test_priority_sorts_by_rank_not_label() {
        let mut rows = vec![
            customer(1, "a", Priority::Medium),
            customer(2, "b", Priority::High),
            customer(3, "c", Priority::Low),
        ];
        sort_records(&mut rows, &[SortDescriptor::desc("priority")]);
        let ids: Vec<_> = rows.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_secondary_key_breaks_ties() {
        let mut rows = vec![
            customer(1, "zed", Priority::High),
            customer(2, "amy", Priority::High),
            customer(3, "bob", Priority::Low),
        ];
        let mut refs: Vec<&Customer> = rows.iter().collect();
        let by_priority = SortDescriptor::desc("priority");
        let then_name = SortDescriptor::asc("name");
        sort_records(&mut refs, &[by_priority, then_name]);
        let ids: Vec<_> = refs.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        sort_records(&mut rows, &[]);
        assert_eq!(rows[0].id, 1);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let now = Utc::now();
        let day = Duration::days(1);
        let mut tasks = vec![
            Task::new(1, "unscheduled", "To Do"),
            Task::new(2, "later", "To Do").with_schedule(now + day * 2, now + day * 3),
            Task::new(3, "sooner", "To Do").with_schedule(now, now + day),
        ];
        sort_records(&mut tasks, &[SortDescriptor::desc("start_date")]);
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_parse_descriptor() {
        assert_eq!(
            "name".parse::<SortDescriptor>().unwrap(),
            SortDescriptor::asc("name")
        );
        assert_eq!(
            "last_contact:DESC".parse::<SortDescriptor>().unwrap(),
            SortDescriptor::desc("last_contact")
        );
        assert!("name:sideways".parse::<SortDescriptor>().is_err());
        assert!(":asc".parse::<SortDescriptor>().is_err());
    }
}
