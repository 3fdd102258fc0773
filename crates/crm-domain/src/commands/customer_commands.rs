use super::{Command, CommandContext, Outcome};
use crate::{Customer, CustomerId, TableId};
use crm_core::CrmResult;
use std::collections::HashSet;

/// Replace a customer record wholesale
pub struct UpdateCustomer {
    pub table_id: TableId,
    pub customer: Customer,
}

impl Command for UpdateCustomer {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let slot = context
            .tables
            .iter_mut()
            .find(|t| t.id == self.table_id)
            .and_then(|t| t.customers.iter_mut().find(|c| c.id == self.customer.id));
        match slot {
            Some(existing) => {
                *existing = self.customer.clone();
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn description(&self) -> String {
        format!(
            "Update customer {} in table {}",
            self.customer.id, self.table_id
        )
    }
}

/// Append a blank customer with the next free id in the table
pub struct AddCustomer {
    pub table_id: TableId,
}

impl Command for AddCustomer {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let now = context.now;
        match context.tables.iter_mut().find(|t| t.id == self.table_id) {
            Some(table) => {
                let id = table.next_customer_id();
                table.customers.push(Customer::blank(id, now));
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn description(&self) -> String {
        format!("Add customer to table {}", self.table_id)
    }
}

/// Remove every listed customer from one table
pub struct DeleteCustomers {
    pub table_id: TableId,
    pub customer_ids: Vec<CustomerId>,
}

impl Command for DeleteCustomers {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let doomed: HashSet<CustomerId> = self.customer_ids.iter().copied().collect();
        match context.tables.iter_mut().find(|t| t.id == self.table_id) {
            Some(table) => {
                let before = table.customers.len();
                table.customers.retain(|c| !doomed.contains(&c.id));
                Ok(Outcome::from_changed(table.customers.len() != before))
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn description(&self) -> String {
        format!(
            "Delete {} customer(s) from table {}",
            self.customer_ids.len(),
            self.table_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomerStatus, Table};
    use chrono::Utc;

    fn run(command: &dyn Command, tables: &mut Vec<Table>) -> Outcome {
        let mut tasks = Vec::new();
        let mut context = CommandContext {
            tables,
            tasks: &mut tasks,
            table_name_prefix: "Table",
            now: Utc::now(),
        };
        command.execute(&mut context).unwrap()
    }

    fn table_with(ids: &[CustomerId]) -> Table {
        let mut table = Table::new(1, "Default Table");
        for id in ids {
            table.customers.push(Customer::blank(*id, Utc::now()));
        }
        table
    }

    #[test]
    fn test_add_customer_sequence() {
        let mut tables = vec![table_with(&[1, 5])];
        run(&AddCustomer { table_id: 1 }, &mut tables);
        run(&AddCustomer { table_id: 1 }, &mut tables);
        let ids: Vec<_> = tables[0].customer_ids().collect();
        assert_eq!(ids, vec![1, 5, 6, 7]);
    }

    #[test]
    fn test_add_customer_missing_table() {
        let mut tables = vec![table_with(&[1])];
        assert_eq!(
            run(&AddCustomer { table_id: 2 }, &mut tables),
            Outcome::Unchanged
        );
        assert_eq!(tables[0].customers.len(), 1);
    }

    #[test]
    fn test_update_customer_replaces_whole_record() {
        let mut tables = vec![table_with(&[1])];
        tables[0].customers[0].notes = "keep me?".to_string();

        let mut replacement = Customer::blank(1, Utc::now());
        replacement.name = "Ada".to_string();
        replacement.status = CustomerStatus::Closed;

        let command = UpdateCustomer {
            table_id: 1,
            customer: replacement.clone(),
        };
        assert_eq!(run(&command, &mut tables), Outcome::Applied);
        assert_eq!(tables[0].customers[0], replacement);
        assert!(tables[0].customers[0].notes.is_empty());
    }

    #[test]
    fn test_update_customer_unknown_id() {
        let mut tables = vec![table_with(&[1])];
        let command = UpdateCustomer {
            table_id: 1,
            customer: Customer::blank(42, Utc::now()),
        };
        assert_eq!(run(&command, &mut tables), Outcome::Unchanged);
        assert_eq!(tables[0].customer_ids().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_delete_customers_only_touches_listed_ids() {
        let mut other = table_with(&[1, 2]);
        other.id = 2;
        let mut tables = vec![table_with(&[1, 2, 3]), other];

        let command = DeleteCustomers {
            table_id: 1,
            customer_ids: vec![1, 3, 99],
        };
        assert_eq!(run(&command, &mut tables), Outcome::Applied);
        assert_eq!(tables[0].customer_ids().collect::<Vec<_>>(), vec![2]);
        assert_eq!(tables[1].customer_ids().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_delete_customers_none_matching() {
        let mut tables = vec![table_with(&[1])];
        let command = DeleteCustomers {
            table_id: 1,
            customer_ids: vec![7],
        };
        assert_eq!(run(&command, &mut tables), Outcome::Unchanged);
    }
}
