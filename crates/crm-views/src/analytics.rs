//! Status distributions for the analytics panel.

use crm_domain::Snapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    pub task_status: Vec<Distribution>,
    pub customer_status: Vec<Distribution>,
}

/// Count categories, keeping the order in which each was first seen.
fn tally<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<Distribution> {
    let mut out: Vec<Distribution> = Vec::new();
    for category in categories {
        match out.iter_mut().find(|d| d.category == category) {
            Some(entry) => entry.count += 1,
            None => out.push(Distribution {
                category: category.to_string(),
                count: 1,
            }),
        }
    }
    out
}

pub fn task_status_distribution(snapshot: &Snapshot) -> Vec<Distribution> {
    tally(snapshot.tasks.iter().map(|t| t.status.as_str()))
}

/// Across every table.
pub fn customer_status_distribution(snapshot: &Snapshot) -> Vec<Distribution> {
    tally(snapshot.all_customers().map(|c| c.status.label()))
}

pub fn report(snapshot: &Snapshot) -> AnalyticsReport {
    AnalyticsReport {
        task_status: task_status_distribution(snapshot),
        customer_status: customer_status_distribution(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crm_domain::seed::demo_snapshot;
    use crm_domain::{Customer, CustomerStatus, Table};

    fn pairs(entries: &[Distribution]) -> Vec<(&str, usize)> {
        entries
            .iter()
            .map(|d| (d.category.as_str(), d.count))
            .collect()
    }

    #[test]
    fn test_demo_report() {
        let report = report(&demo_snapshot(Utc::now()));
        assert_eq!(
            pairs(&report.task_status),
            vec![("In Progress", 2), ("To Do", 2), ("Done", 1)]
        );
        assert_eq!(
            pairs(&report.customer_status),
            vec![("New", 1), ("In Progress", 2), ("Closed", 1)]
        );
    }

    #[test]
    fn test_customer_distribution_spans_tables() {
        let now = Utc::now();
        let mut second = Table::new(2, "Second");
        second.customers.push(Customer {
            status: CustomerStatus::Closed,
            ..Customer::blank(1, now)
        });
        let mut snapshot = demo_snapshot(now);
        snapshot.tables.push(second);

        let dist = customer_status_distribution(&snapshot);
        let closed = dist.iter().find(|d| d.category == "Closed").unwrap();
        assert_eq!(closed.count, 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let report = report(&Snapshot::new());
        assert!(report.task_status.is_empty());
        assert!(report.customer_status.is_empty());
    }

    #[test]
    fn test_serializes_as_pairs() {
        let dist = task_status_distribution(&demo_snapshot(Utc::now()));
        let json = serde_json::to_value(&dist[0]).unwrap();
        assert_eq!(json["category"], "In Progress");
        assert_eq!(json["count"], 2);
    }
}
