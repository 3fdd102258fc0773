//! Demo data the dashboard starts with.

use chrono::{DateTime, Duration, Utc};

use crate::{Customer, CustomerStatus, Priority, Snapshot, Table, Task};

pub const DEFAULT_TABLE_NAME: &str = "Default Table";

struct DemoCustomer {
    name: &'static str,
    company: &'static str,
    email: &'static str,
    phone: &'static str,
    status: CustomerStatus,
    priority: Priority,
    notes: &'static str,
}

struct DemoTask {
    title: &'static str,
    description: &'static str,
    status: &'static str,
    priority: Priority,
    assignee: &'static str,
    /// Start and end, in days from now.
    days: (i32, i32),
    percent: u8,
}

const DEMO_CUSTOMERS: [DemoCustomer; 4] = [
    DemoCustomer {
        name: "John Doe",
        company: "Tech Corp",
        email: "john@techcorp.com",
        phone: "123-456-7890",
        status: CustomerStatus::New,
        priority: Priority::High,
        notes: "Initial contact made",
    },
    DemoCustomer {
        name: "Jane Smith",
        company: "Design Co",
        email: "jane@designco.com",
        phone: "098-765-4321",
        status: CustomerStatus::InProgress,
        priority: Priority::Medium,
        notes: "Following up next week",
    },
    DemoCustomer {
        name: "Rose Johnson",
        company: "Mobile Corp",
        email: "rose@designco.com",
        phone: "158-225-5421",
        status: CustomerStatus::Closed,
        priority: Priority::Low,
        notes: "Following up next week",
    },
    DemoCustomer {
        name: "Ann Brown",
        company: "nono Co",
        email: "ann@designco.com",
        phone: "151-513-1222",
        status: CustomerStatus::InProgress,
        priority: Priority::Medium,
        notes: "Following up next week",
    },
];

const DEMO_TASKS: [DemoTask; 5] = [
    DemoTask {
        title: "Website Redesign Project",
        description: "Complete overhaul of client website",
        status: "In Progress",
        priority: Priority::High,
        assignee: "Alice",
        days: (-2, 5),
        percent: 35,
    },
    DemoTask {
        title: "Marketing Campaign",
        description: "Q2 Marketing Initiative",
        status: "To Do",
        priority: Priority::Medium,
        assignee: "Bob",
        days: (1, 7),
        percent: 0,
    },
    DemoTask {
        title: "Client Presentation",
        description: "Prepare and deliver final presentation",
        status: "Done",
        priority: Priority::High,
        assignee: "Charlie",
        days: (-5, -1),
        percent: 100,
    },
    DemoTask {
        title: "Product Launch",
        description: "New feature release",
        status: "In Progress",
        priority: Priority::High,
        assignee: "David",
        days: (0, 10),
        percent: 60,
    },
    DemoTask {
        title: "Team Training",
        description: "Technical skills workshop",
        status: "To Do",
        priority: Priority::Medium,
        assignee: "Eve",
        days: (3, 4),
        percent: 0,
    },
];

/// One table of four customers and five tasks scheduled around `now`.
pub fn demo_snapshot(now: DateTime<Utc>) -> Snapshot {
    let mut table = Table::new(1, DEFAULT_TABLE_NAME);
    table.customers = demo_customers(now);
    Snapshot::from_data(vec![table], demo_tasks(now))
}

fn demo_customers(now: DateTime<Utc>) -> Vec<Customer> {
    DEMO_CUSTOMERS
        .iter()
        .zip(1..)
        .map(|(row, id)| Customer {
            name: row.name.to_string(),
            company: row.company.to_string(),
            email: row.email.to_string(),
            phone: row.phone.to_string(),
            status: row.status,
            priority: row.priority,
            notes: row.notes.to_string(),
            ..Customer::blank(id, now)
        })
        .collect()
}

fn demo_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let day = Duration::days(1);
    DEMO_TASKS
        .iter()
        .zip(1..)
        .map(|(row, id)| {
            let start = now + day * row.days.0;
            let end = now + day * row.days.1;
            let mut task = Task::new(id, row.title, row.status).with_schedule(start, end);
            task.description = row.description.to_string();
            task.priority = row.priority;
            task.assignee = row.assignee.to_string();
            task.set_percent_complete(row.percent);
            task
        })
        .collect()
}
