//! The application store: single owner of the current snapshot.
//!
//! Every mutation goes through a named operation (or a [`Command`]), runs
//! against a working copy of the snapshot, and, when it applies, publishes
//! the copy behind a new `Arc` and notifies listeners in subscription order.
//! Operations aimed at a missing id leave the published snapshot untouched
//! and notify nobody.

use chrono::Utc;
use crm_core::{AppConfig, CrmResult, LogEntry, Loggable};
use std::sync::Arc;

use crate::commands::task_commands::next_task_id;
use crate::commands::{
    AddCustomer, AddTable, AddTask, Command, CommandContext, DeleteCustomers, DeleteTable,
    Outcome, UpdateCustomer, UpdateTableName, UpdateTask,
};
use crate::{
    seed, Customer, CustomerId, HistoryManager, Snapshot, StoreAction, TableId, Task, TaskId,
};

pub type SubscriptionId = u64;

/// Receives every snapshot the store publishes.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotListener {
    fn on_snapshot(&mut self, snapshot: &Arc<Snapshot>);
}

impl<F> SnapshotListener for F
where
    F: FnMut(&Arc<Snapshot>),
{
    fn on_snapshot(&mut self, snapshot: &Arc<Snapshot>) {
        self(snapshot)
    }
}

pub struct Store {
    snapshot: Arc<Snapshot>,
    listeners: Vec<(SubscriptionId, Box<dyn SnapshotListener>)>,
    next_subscription_id: SubscriptionId,
    history: HistoryManager,
    logs: Vec<LogEntry>,
    table_name_prefix: String,
}

impl Store {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            listeners: Vec::new(),
            next_subscription_id: 1,
            history: HistoryManager::new(),
            logs: Vec::new(),
            table_name_prefix: String::from(AppConfig::default().effective_table_name_prefix()),
        }
    }

    /// Build the startup store: demo data unless the config turns it off.
    pub fn from_config(config: &AppConfig) -> Self {
        let snapshot = if config.effective_seed_demo_data() {
            seed::demo_snapshot(Utc::now())
        } else {
            Snapshot::new()
        };
        Self::new(snapshot).with_table_name_prefix(config.effective_table_name_prefix())
    }

    pub fn with_table_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_name_prefix = prefix.into();
        self
    }

    /// The current snapshot. Cheap to clone and never mutated afterwards.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn subscribe(&mut self, listener: impl SnapshotListener + 'static) -> SubscriptionId {
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.listeners.push((id, Box::new(listener)));
        tracing::debug!("Listener {} subscribed", id);
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Execute a command against a working copy and publish it if it applied.
    pub fn dispatch(&mut self, command: Box<dyn Command>) -> CrmResult<Outcome> {
        let description = command.description();
        tracing::debug!("Executing: {}", description);

        let mut working = Snapshot::clone(&self.snapshot);
        let result = {
            let mut context = CommandContext {
                tables: &mut working.tables,
                tasks: &mut working.tasks,
                table_name_prefix: &self.table_name_prefix,
                now: Utc::now(),
            };
            command.execute(&mut context)
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Rejected '{}': {}", description, e);
                return Err(e);
            }
        };

        match outcome {
            Outcome::Applied => {
                let previous = Arc::clone(&self.snapshot);
                self.history.capture_before_command(previous);
                self.add_log(description);
                self.publish(Arc::new(working));
            }
            Outcome::Unchanged => {
                tracing::debug!("No-op: {}", description);
            }
        }
        Ok(outcome)
    }

    pub fn apply(&mut self, action: StoreAction) -> CrmResult<Outcome> {
        self.dispatch(action.into_command())
    }

    /// Append an empty table and return its id.
    pub fn add_table(&mut self) -> CrmResult<TableId> {
        let id = self.snapshot.next_table_id();
        self.dispatch(Box::new(AddTable))?;
        Ok(id)
    }

    pub fn delete_table(&mut self, table_id: TableId) -> CrmResult<Outcome> {
        self.dispatch(Box::new(DeleteTable { table_id }))
    }

    pub fn update_table_name(
        &mut self,
        table_id: TableId,
        name: impl Into<String>,
    ) -> CrmResult<Outcome> {
        self.dispatch(Box::new(UpdateTableName {
            table_id,
            name: name.into(),
        }))
    }

    pub fn update_customer(&mut self, table_id: TableId, customer: Customer) -> CrmResult<Outcome> {
        self.dispatch(Box::new(UpdateCustomer { table_id, customer }))
    }

    /// Append a blank customer; returns its id, or `None` if the table is missing.
    pub fn add_customer(&mut self, table_id: TableId) -> CrmResult<Option<CustomerId>> {
        let id = self.snapshot.table(table_id).map(|t| t.next_customer_id());
        let outcome = self.dispatch(Box::new(AddCustomer { table_id }))?;
        Ok(id.filter(|_| outcome.is_applied()))
    }

    pub fn delete_customers(
        &mut self,
        table_id: TableId,
        customer_ids: impl IntoIterator<Item = CustomerId>,
    ) -> CrmResult<Outcome> {
        self.dispatch(Box::new(DeleteCustomers {
            table_id,
            customer_ids: customer_ids.into_iter().collect(),
        }))
    }

    /// Append a task with the given title and status; returns its id.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        status: impl Into<String>,
    ) -> CrmResult<TaskId> {
        let id = next_task_id(&self.snapshot.tasks);
        self.dispatch(Box::new(AddTask {
            title: title.into(),
            status: status.into(),
        }))?;
        Ok(id)
    }

    pub fn update_task(&mut self, task: Task) -> CrmResult<Outcome> {
        self.dispatch(Box::new(UpdateTask { task }))
    }

    /// Restore the snapshot preceding the last applied mutation.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_undo() {
            Some(previous) => {
                self.history.push_redo(Arc::clone(&self.snapshot));
                self.add_log("Undo".to_string());
                tracing::info!("Undo ({} more available)", self.history.undo_depth());
                self.publish(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.pop_redo() {
            Some(next) => {
                self.history.push_undo(Arc::clone(&self.snapshot));
                self.add_log("Redo".to_string());
                tracing::info!("Redo ({} more available)", self.history.redo_depth());
                self.publish(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn publish(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = snapshot;
        let current = &self.snapshot;
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_snapshot(current);
        }
    }
}

impl Loggable for Store {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Snapshot::new())
    }
}
