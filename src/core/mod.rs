//! Core runtime module
//!
//! Tick time, the event queue, the task scheduler and the built-in tasks

mod events;
mod runtime;
mod scheduler;
mod tasks;
mod time;

pub use events::{EventQueue, GameEvent};
pub use runtime::{GameContext, Runtime};
pub use scheduler::{Scheduler, Task, TaskId, TaskStatus};
pub use tasks::{Countdown, Delayed, ReturnAfter, RoundTimer};
pub use time::Time;
