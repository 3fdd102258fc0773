use serde::{Deserialize, Serialize};

use crate::customer::{Customer, CustomerId};

pub type TableId = u32;

/// A named group of customers, shown as one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl Table {
    pub fn new(id: TableId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            customers: Vec::new(),
        }
    }

    /// One past the largest customer id, or 1 for an empty table.
    pub fn next_customer_id(&self) -> CustomerId {
        self.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn customer_ids(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.customers.iter().map(|c| c.id)
    }
}
