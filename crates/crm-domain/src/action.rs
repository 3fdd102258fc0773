//! Store operations as serializable messages.
//!
//! A script of actions can be replayed against a store; each action maps
//! one-to-one onto a named store operation.

use serde::{Deserialize, Serialize};

use crate::commands::{
    AddCustomer, AddTable, AddTask, Command, DeleteCustomers, DeleteTable, UpdateCustomer,
    UpdateTableName, UpdateTask,
};
use crate::{Customer, CustomerId, TableId, Task};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StoreAction {
    AddTable,
    DeleteTable {
        table_id: TableId,
    },
    UpdateTableName {
        table_id: TableId,
        name: String,
    },
    UpdateCustomer {
        table_id: TableId,
        customer: Customer,
    },
    AddCustomer {
        table_id: TableId,
    },
    DeleteCustomers {
        table_id: TableId,
        customer_ids: Vec<CustomerId>,
    },
    AddTask {
        title: String,
        status: String,
    },
    UpdateTask {
        task: Task,
    },
}

impl StoreAction {
    /// What the action does, as it would appear in the activity log.
    pub fn description(&self) -> String {
        self.clone().into_command().description()
    }

    pub fn into_command(self) -> Box<dyn Command> {
        match self {
            StoreAction::AddTable => Box::new(AddTable),
            StoreAction::DeleteTable { table_id } => Box::new(DeleteTable { table_id }),
            StoreAction::UpdateTableName { table_id, name } => {
                Box::new(UpdateTableName { table_id, name })
            }
            StoreAction::UpdateCustomer { table_id, customer } => {
                Box::new(UpdateCustomer { table_id, customer })
            }
            StoreAction::AddCustomer { table_id } => Box::new(AddCustomer { table_id }),
            StoreAction::DeleteCustomers {
                table_id,
                customer_ids,
            } => Box::new(DeleteCustomers {
                table_id,
                customer_ids,
            }),
            StoreAction::AddTask { title, status } => Box::new(AddTask { title, status }),
            StoreAction::UpdateTask { task } => Box::new(UpdateTask { task }),
        }
    }
}
