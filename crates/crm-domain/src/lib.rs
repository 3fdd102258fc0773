pub mod action;
pub mod column;
pub mod commands;
pub mod customer;
pub mod editable;
pub mod field_update;
pub mod filter;
pub mod history;
pub mod search;
pub mod seed;
pub mod snapshot;
pub mod sort;
pub mod store;
pub mod table;
pub mod task;
pub mod value;

pub use action::StoreAction;
pub use column::{ColumnConfig, ColumnEditor, ColumnLayout};
pub use commands::{Command, CommandContext, Outcome};
pub use customer::{Customer, CustomerId, CustomerStatus, FileAttachment, Priority};
pub use editable::CustomerProfileDto;
pub use field_update::FieldUpdate;
pub use filter::{CompositeFilter, FilterDescriptor, FilterLogic, FilterOperator};
pub use history::HistoryManager;
pub use search::{TaskSearcher, TitleSearcher};
pub use snapshot::Snapshot;
pub use sort::{SortDescriptor, SortDirection};
pub use store::{SnapshotListener, Store, SubscriptionId};
pub use table::{Table, TableId};
pub use task::{Task, TaskId, TaskUpdate};
pub use value::{FieldValue, Fields};
