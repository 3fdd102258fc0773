//! View state for the dashboard tabs.
//!
//! Each view keeps only transient UI state (sort, filter, selection, search,
//! column layout, edit session) and recomputes its projection from whatever
//! snapshot it is handed. Mutations go through the store.

pub mod analytics;
pub mod gantt;
pub mod grid;
pub mod kanban;
pub mod shell;

pub use analytics::{AnalyticsReport, Distribution};
pub use gantt::{GanttRow, GanttView, ScheduleState};
pub use grid::{GridProjection, GridRow, GridView};
pub use kanban::{KanbanBoard, KanbanView, Lane, LaneProjection};
pub use shell::{Shell, Tab};
