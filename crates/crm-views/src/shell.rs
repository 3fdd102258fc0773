//! The tabbed dashboard shell.
//!
//! Owns the store and one instance of every view. A listener subscribed on
//! construction flags the shell for refresh whenever the store publishes,
//! and every routed action re-syncs the per-table grids afterwards.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use crm_core::{AppConfig, CrmResult, SelectionState};
use crm_domain::{Outcome, Snapshot, Store, StoreAction, TableId};
use serde::Serialize;

use crate::{GanttView, GridView, KanbanView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    MainTable,
    KanbanBoard,
    GanttChart,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::MainTable,
        Tab::KanbanBoard,
        Tab::GanttChart,
        Tab::Analytics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::MainTable => "Main Table",
            Tab::KanbanBoard => "Kanban Board",
            Tab::GanttChart => "Gantt Chart",
            Tab::Analytics => "Analytics",
        }
    }
}

pub struct Shell {
    store: Store,
    tab: SelectionState,
    grids: BTreeMap<TableId, GridView>,
    kanban: KanbanView,
    gantt: GanttView,
    needs_refresh: Rc<Cell<bool>>,
}

impl Shell {
    pub fn new(mut store: Store) -> Self {
        let needs_refresh = Rc::new(Cell::new(false));
        let flag = Rc::clone(&needs_refresh);
        store.subscribe(move |_: &Arc<Snapshot>| flag.set(true));

        let mut tab = SelectionState::new();
        tab.set(Some(0));

        let mut shell = Self {
            store,
            tab,
            grids: BTreeMap::new(),
            kanban: KanbanView::new(),
            gantt: GanttView::new(),
            needs_refresh,
        };
        shell.sync();
        shell
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Store::from_config(config))
    }

    // Tabs

    pub fn selected_tab(&self) -> Tab {
        self.tab
            .get()
            .and_then(|i| Tab::ALL.get(i).copied())
            .unwrap_or(Tab::MainTable)
    }

    /// Out-of-range indexes are ignored.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if index >= Tab::ALL.len() {
            return false;
        }
        self.tab.set(Some(index));
        tracing::debug!("Selected tab '{}'", Tab::ALL[index].title());
        true
    }

    pub fn next_tab(&mut self) {
        self.tab.next(Tab::ALL.len());
    }

    pub fn prev_tab(&mut self) {
        self.tab.prev();
    }

    // Store access

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// True once after any publish since the last call.
    pub fn take_needs_refresh(&self) -> bool {
        self.needs_refresh.replace(false)
    }

    // Views

    pub fn grid(&self, table_id: TableId) -> Option<&GridView> {
        self.grids.get(&table_id)
    }

    pub fn grids(&self) -> impl Iterator<Item = &GridView> {
        self.grids.values()
    }

    pub fn kanban(&self) -> &KanbanView {
        &self.kanban
    }

    pub fn gantt(&self) -> &GanttView {
        &self.gantt
    }

    /// Run `f` against the grid of `table_id`; `None` if there is no such table.
    pub fn grid_action<R>(
        &mut self,
        table_id: TableId,
        f: impl FnOnce(&mut GridView, &mut Store) -> R,
    ) -> Option<R> {
        let grid = self.grids.get_mut(&table_id)?;
        let result = f(grid, &mut self.store);
        self.sync();
        Some(result)
    }

    pub fn kanban_action<R>(&mut self, f: impl FnOnce(&mut KanbanView, &mut Store) -> R) -> R {
        let result = f(&mut self.kanban, &mut self.store);
        self.sync();
        result
    }

    pub fn gantt_action<R>(&mut self, f: impl FnOnce(&mut GanttView, &mut Store) -> R) -> R {
        let result = f(&mut self.gantt, &mut self.store);
        self.sync();
        result
    }

    /// Apply a raw store action, as replayed from a script.
    pub fn apply(&mut self, action: StoreAction) -> CrmResult<Outcome> {
        let outcome = self.store.apply(action);
        self.sync();
        outcome
    }

    pub fn add_table(&mut self) -> CrmResult<TableId> {
        let id = self.store.add_table()?;
        self.sync();
        Ok(id)
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.store.undo();
        self.sync();
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.store.redo();
        self.sync();
        redone
    }

    /// Give every table an attached grid, detach and drop grids of deleted
    /// tables, then prune stale selection and edit state.
    fn sync(&mut self) {
        let snapshot = self.store.snapshot();
        let store = &mut self.store;
        self.grids.retain(|id, grid| {
            let live = snapshot.table(*id).is_some();
            if !live {
                grid.detach(store);
            }
            live
        });
        for id in snapshot.table_ids() {
            self.grids.entry(id).or_insert_with(|| {
                let mut grid = GridView::new(id);
                grid.attach(store);
                grid
            });
        }
        for grid in self.grids.values_mut() {
            grid.sync(&snapshot);
        }
        if let Some(selected) = self.gantt.selected() {
            if snapshot.task(selected).is_none() {
                self.gantt.clear_selection();
            }
        }
    }
}
