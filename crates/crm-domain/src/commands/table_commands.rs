use super::{Command, CommandContext, Outcome};
use crate::snapshot::next_table_id;
use crate::{Table, TableId};
use crm_core::CrmResult;

/// Append an empty table with the next free id
pub struct AddTable;

impl Command for AddTable {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let id = next_table_id(context.tables);
        let name = format!("{} {}", context.table_name_prefix, id);
        context.tables.push(Table::new(id, name));
        Ok(Outcome::Applied)
    }

    fn description(&self) -> String {
        "Add table".to_string()
    }
}

/// Remove a table and every customer in it
pub struct DeleteTable {
    pub table_id: TableId,
}

impl Command for DeleteTable {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let before = context.tables.len();
        context.tables.retain(|t| t.id != self.table_id);
        Ok(Outcome::from_changed(context.tables.len() != before))
    }

    fn description(&self) -> String {
        format!("Delete table {}", self.table_id)
    }
}

/// Rename a table
pub struct UpdateTableName {
    pub table_id: TableId,
    pub name: String,
}

impl Command for UpdateTableName {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        match context.tables.iter_mut().find(|t| t.id == self.table_id) {
            Some(table) => {
                table.name = self.name.clone();
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn description(&self) -> String {
        format!("Rename table {} to '{}'", self.table_id, self.name)
    }
}
