//! Per-tick task scheduler
//!
//! Replaces frame-suspended coroutines with plain objects that keep their own
//! progress. The host calls [`Scheduler::tick`] once per logical frame; each
//! task advances by `dt` and says whether it still has work to do.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug)]
//! struct Blink { left: u32 }
//!
//! impl Task<Vec<bool>> for Blink {
//!     fn name(&self) -> &'static str { "Blink" }
//!
//!     fn tick(&mut self, _dt: Duration, ctx: &mut Vec<bool>) -> TaskStatus {
//!         ctx.push(self.left % 2 == 0);
//!         self.left -= 1;
//!         if self.left == 0 { TaskStatus::Done } else { TaskStatus::Pending }
//!     }
//! }
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.spawn(Blink { left: 4 });
//! scheduler.tick(dt, &mut lights);
//! ```

use std::fmt;
use std::time::Duration;

// ============================================================================
// Task Trait
// ============================================================================

/// Result of advancing a task by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task wants to run again next tick.
    Pending,
    /// The task finished and should be dropped.
    Done,
}

/// A unit of work resumed once per tick.
///
/// Anything a coroutine would keep on its stack across a `yield` lives in
/// the implementing struct instead.
pub trait Task<Ctx>: fmt::Debug {
    /// Task name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Advance by `dt` and report whether more ticks are needed.
    fn tick(&mut self, dt: Duration, ctx: &mut Ctx) -> TaskStatus;
}

/// Identifier of a scheduled task, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw id value.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// Runs tasks in spawn order, once per tick, until they report `Done`.
pub struct Scheduler<Ctx> {
    tasks: Vec<(TaskId, Box<dyn Task<Ctx>>)>,
    next_id: u64,
}

impl<Ctx> Scheduler<Ctx> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule a task. It first runs on the next `tick`.
    pub fn spawn<T: Task<Ctx> + 'static>(&mut self, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        log::debug!("Scheduled task {} ({})", id.0, task.name());
        self.tasks.push((id, Box::new(task)));
        id
    }

    /// Drop a task before it finishes.
    ///
    /// Returns `false` if the task already finished or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let Some(pos) = self.tasks.iter().position(|(task_id, _)| *task_id == id) else {
            return false;
        };
        let (_, task) = self.tasks.remove(pos);
        log::debug!("Cancelled task {} ({})", id.0, task.name());
        true
    }

    /// Check if a task is still scheduled.
    #[must_use]
    pub fn is_running(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|(task_id, _)| *task_id == id)
    }

    /// Advance every task by `dt`, dropping the ones that finish.
    pub fn tick(&mut self, dt: Duration, ctx: &mut Ctx) {
        self.tasks.retain_mut(|(id, task)| match task.tick(dt, ctx) {
            TaskStatus::Pending => true,
            TaskStatus::Done => {
                log::debug!("Task {} ({}) finished", id.0, task.name());
                false
            }
        });
    }

    /// Number of scheduled tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every scheduled task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<Ctx> Default for Scheduler<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> fmt::Debug for Scheduler<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field(
                "tasks",
                &self
                    .tasks
                    .iter()
                    .map(|(_, task)| task.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
