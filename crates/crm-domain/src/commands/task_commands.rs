use super::{Command, CommandContext, Outcome};
use crate::{Task, TaskId};
use crm_core::CrmResult;

/// One past the largest task id, or 1 when there are no tasks.
pub(crate) fn next_task_id(tasks: &[Task]) -> TaskId {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

/// Append a task with the next free id
pub struct AddTask {
    pub title: String,
    pub status: String,
}

impl Command for AddTask {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        let id = next_task_id(context.tasks);
        let task = Task::new(id, self.title.clone(), self.status.clone());
        context.tasks.push(task);
        Ok(Outcome::Applied)
    }

    fn description(&self) -> String {
        format!("Add task '{}' to '{}'", self.title, self.status)
    }
}

/// Replace a task record wholesale
pub struct UpdateTask {
    pub task: Task,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> CrmResult<Outcome> {
        match context.tasks.iter_mut().find(|t| t.id == self.task.id) {
            Some(existing) => {
                self.task.validate()?;
                *existing = self.task.clone();
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn description(&self) -> String {
        format!("Update task {}: '{}'", self.task.id, self.task.title)
    }
}
