//! The gantt chart: tasks on a timeline.

use chrono::{DateTime, Utc};
use crm_core::CrmResult;
use crm_domain::sort::sort_records;
use crm_domain::{
    CompositeFilter, FieldUpdate, Outcome, Snapshot, SortDescriptor, Store, Task, TaskId,
    TaskSearcher, TaskUpdate, TitleSearcher,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    Unscheduled,
    NotStarted,
    InProgress,
    Complete,
    Overdue,
}

impl ScheduleState {
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        if task.percent_complete >= 100 {
            return ScheduleState::Complete;
        }
        match (task.start_date, task.end_date) {
            (Some(start), _) if now < start => ScheduleState::NotStarted,
            (_, Some(end)) if now > end => ScheduleState::Overdue,
            (Some(_), Some(_)) => ScheduleState::InProgress,
            _ => ScheduleState::Unscheduled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GanttRow {
    pub task: Task,
    pub duration_days: Option<i64>,
    pub state: ScheduleState,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GanttView {
    search: TitleSearcher,
    sort: Vec<SortDescriptor>,
    filter: CompositeFilter,
    selected: Option<TaskId>,
}

impl GanttView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = TitleSearcher::new(text);
    }

    /// The task list's data-state change: sort and filter descriptors over
    /// task fields, applied on top of the title search.
    pub fn set_data_state(&mut self, sort: Vec<SortDescriptor>, filter: CompositeFilter) {
        self.sort = sort;
        self.filter = filter;
    }

    /// Without sort descriptors: scheduled tasks by start date then id,
    /// followed by tasks missing a start or end date, by id. Sort
    /// descriptors reorder that list, keeping it for ties.
    pub fn rows(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<GanttRow> {
        let mut tasks: Vec<&Task> = snapshot
            .tasks
            .iter()
            .filter(|t| self.search.matches(t) && self.filter.matches(*t))
            .collect();
        tasks.sort_by_key(|t| {
            let scheduled = t.start_date.is_some() && t.end_date.is_some();
            let start = if scheduled { t.start_date } else { None };
            (!scheduled, start, t.id)
        });
        sort_records(&mut tasks, &self.sort);

        tasks
            .into_iter()
            .map(|task| GanttRow {
                task: task.clone(),
                duration_days: task.duration_days(),
                state: ScheduleState::of(task, now),
                selected: self.selected == Some(task.id),
            })
            .collect()
    }

    /// Returns false if the task does not exist.
    pub fn select(&mut self, snapshot: &Snapshot, task_id: TaskId) -> bool {
        let exists = snapshot.task(task_id).is_some();
        if exists {
            self.selected = Some(task_id);
        }
        exists
    }

    pub fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_progress(
        &self,
        store: &mut Store,
        task_id: TaskId,
        percent: u8,
    ) -> CrmResult<Outcome> {
        self.update(
            store,
            task_id,
            TaskUpdate {
                percent_complete: Some(percent),
                ..Default::default()
            },
        )
    }

    /// Move a task's bar. The store rejects an end before the start.
    pub fn reschedule(
        &self,
        store: &mut Store,
        task_id: TaskId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CrmResult<Outcome> {
        self.update(
            store,
            task_id,
            TaskUpdate {
                start_date: FieldUpdate::Set(start),
                end_date: FieldUpdate::Set(end),
                ..Default::default()
            },
        )
    }

    fn update(
        &self,
        store: &mut Store,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> CrmResult<Outcome> {
        match store.snapshot().task(task_id) {
            Some(task) => store.update_task(task.merged(update)),
            None => Ok(Outcome::Unchanged),
        }
    }
}
