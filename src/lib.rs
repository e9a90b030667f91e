//! Tag-keyed object pooling for frame-driven games
//!
//! This crate provides:
//! - A generic tag-keyed object pool over any scene host
//! - A hecs-backed scene world implementing that host
//! - A per-tick task scheduler with countdown and timer tasks
//! - Pool manifests loaded from RON or JSON

pub mod core;
pub mod manifest;
pub mod pool;
pub mod scene;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::{
        Countdown, Delayed, EventQueue, GameContext, GameEvent, ReturnAfter, RoundTimer, Runtime,
        Scheduler, Task, TaskId, TaskStatus, Time,
    };
    pub use crate::manifest::{ManifestError, PoolManifest, PoolSpec};
    pub use crate::pool::{PoolError, PoolRegistry};
    pub use crate::scene::{Prefab, SceneHost, SceneWorld, Transform};
    pub use glam::{Quat, Vec3};
}
