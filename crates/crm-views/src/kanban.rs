//! The task board: one lane per task status.

use crm_core::CrmResult;
use crm_domain::{Outcome, Snapshot, Store, Task, TaskId, TaskSearcher, TaskUpdate, TitleSearcher};
use serde::Serialize;

pub const STATUS_TODO: &str = "To Do";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_DONE: &str = "Done";

const NEW_LANE_TITLE: &str = "New Column";

/// A board column bound to one task status string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub id: u32,
    pub title: String,
    pub status: String,
}

impl Lane {
    fn new(id: u32, title: &str, status: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LaneProjection {
    pub lane: Lane,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KanbanBoard {
    pub lanes: Vec<LaneProjection>,
    /// Tasks whose status matches no lane.
    pub unassigned: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct KanbanView {
    lanes: Vec<Lane>,
    search: TitleSearcher,
}

impl Default for KanbanView {
    fn default() -> Self {
        Self::new()
    }
}

impl KanbanView {
    pub fn new() -> Self {
        Self {
            lanes: vec![
                Lane::new(1, "To-Do", STATUS_TODO),
                Lane::new(2, "In Progress", STATUS_IN_PROGRESS),
                Lane::new(3, "Done", STATUS_DONE),
            ],
            search: TitleSearcher::default(),
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = TitleSearcher::new(text);
    }

    /// Group the matching tasks into lanes, keeping snapshot order in each.
    pub fn board(&self, snapshot: &Snapshot) -> KanbanBoard {
        let mut lanes: Vec<LaneProjection> = self
            .lanes
            .iter()
            .map(|lane| LaneProjection {
                lane: lane.clone(),
                tasks: Vec::new(),
            })
            .collect();
        let mut unassigned = Vec::new();

        for task in snapshot.tasks.iter().filter(|t| self.search.matches(t)) {
            match lanes.iter_mut().find(|p| p.lane.status == task.status) {
                Some(projection) => projection.tasks.push(task.clone()),
                None => unassigned.push(task.clone()),
            }
        }

        KanbanBoard { lanes, unassigned }
    }

    /// Drop a task on a lane. Landing in Done marks it fully complete.
    pub fn move_task(
        &self,
        store: &mut Store,
        task_id: TaskId,
        lane_id: u32,
    ) -> CrmResult<Outcome> {
        let Some(lane) = self.lane(lane_id) else {
            return Ok(Outcome::Unchanged);
        };
        let Some(task) = store.snapshot().task(task_id).cloned() else {
            return Ok(Outcome::Unchanged);
        };
        let update = TaskUpdate {
            status: Some(lane.status.clone()),
            percent_complete: (lane.status == STATUS_DONE).then_some(100),
            ..Default::default()
        };
        tracing::debug!("Moving task {} to lane '{}'", task_id, lane.title);
        store.update_task(task.merged(update))
    }

    /// Append an empty lane in edit state; returns it.
    pub fn add_lane(&mut self) -> &Lane {
        let id = self.lanes.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        let lane = Lane::new(id, NEW_LANE_TITLE, &format!("new-{}", id));
        self.lanes.push(lane);
        &self.lanes[self.lanes.len() - 1]
    }

    /// Remove a lane. Its tasks keep their status and land in `unassigned`.
    pub fn delete_lane(&mut self, lane_id: u32) -> bool {
        let before = self.lanes.len();
        self.lanes.retain(|l| l.id != lane_id);
        self.lanes.len() != before
    }

    /// Create a task with the lane's status. `None` if there is no such lane.
    pub fn add_task(
        &self,
        store: &mut Store,
        lane_id: u32,
        title: &str,
    ) -> CrmResult<Option<TaskId>> {
        let Some(lane) = self.lane(lane_id) else {
            return Ok(None);
        };
        store.add_task(title, lane.status.as_str()).map(Some)
    }

    fn lane(&self, lane_id: u32) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id == lane_id)
    }

    pub fn rename_lane(&mut self, lane_id: u32, title: &str) -> bool {
        match self.lanes.iter_mut().find(|l| l.id == lane_id) {
            Some(lane) => {
                lane.title = title.to_string();
                true
            }
            None => false,
        }
    }
}
