pub mod config;
pub mod error;
pub mod logging;
pub mod result;
pub mod selection;
pub mod traits;

pub use config::AppConfig;
pub use error::CrmError;
pub use logging::{LogEntry, Loggable};
pub use result::CrmResult;
pub use selection::{MultiSelection, SelectionState};
pub use traits::Editable;
