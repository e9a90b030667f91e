//! Game context and the tick driver

use std::time::Duration;

use super::events::EventQueue;
use super::scheduler::{Scheduler, Task, TaskId};
use super::time::Time;
use crate::pool::PoolRegistry;
use crate::scene::SceneHost;

/// Everything a scheduled task may touch
pub struct GameContext<H: SceneHost> {
    /// Scene host owning all pooled objects
    pub host: H,
    /// Pools shared by every system
    pub pools: PoolRegistry<H>,
    /// Events raised by tasks
    pub events: EventQueue,
    /// Tick time tracking
    pub time: Time,
}

impl<H: SceneHost> GameContext<H> {
    /// Create a context around a host with no pools yet
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            pools: PoolRegistry::new(),
            events: EventQueue::new(),
            time: Time::new(),
        }
    }
}

impl<H: SceneHost + std::fmt::Debug> std::fmt::Debug for GameContext<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("host", &self.host)
            .field("pools", &self.pools)
            .field("events", &self.events)
            .field("time", &self.time)
            .finish()
    }
}

/// Owns the game context and its scheduler, and advances both per tick.
///
/// The embedding application calls [`tick`](Self::tick) once per logical
/// frame. Events raised during a tick are readable from
/// `context().events` as soon as `tick` returns, until the next tick.
pub struct Runtime<H: SceneHost> {
    ctx: GameContext<H>,
    scheduler: Scheduler<GameContext<H>>,
}

impl<H: SceneHost> Runtime<H> {
    /// Create a runtime around a host
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            ctx: GameContext::new(host),
            scheduler: Scheduler::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &GameContext<H> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext<H> {
        &mut self.ctx
    }

    /// Schedule a task to run from the next tick on
    pub fn spawn<T: Task<GameContext<H>> + 'static>(&mut self, task: T) -> TaskId {
        self.scheduler.spawn(task)
    }

    /// Stop a scheduled task
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.scheduler.cancel(id)
    }

    #[must_use]
    pub fn is_running(&self, id: TaskId) -> bool {
        self.scheduler.is_running(id)
    }

    /// Number of tasks still scheduled
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Advance time, run every task once, then publish the tick's events
    pub fn tick(&mut self, dt: Duration) {
        self.ctx.time.advance(dt);
        self.scheduler.tick(dt, &mut self.ctx);
        self.ctx.events.swap();
    }

    /// End the session: drop pending tasks, shut down the pools, hand back the host
    pub fn shutdown(self) -> H {
        let Runtime { ctx, scheduler } = self;
        if !scheduler.is_empty() {
            log::info!("Dropping {} unfinished tasks", scheduler.len());
        }
        let GameContext {
            mut host, pools, ..
        } = ctx;
        pools.shutdown(&mut host);
        host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::GameEvent;
    use crate::core::scheduler::TaskStatus;
    use crate::scene::{Prefab, SceneWorld};
    use glam::{Quat, Vec3};

    #[derive(Debug)]
    struct Announce;

    impl Task<GameContext<SceneWorld>> for Announce {
        fn name(&self) -> &'static str {
            "Announce"
        }

        fn tick(&mut self, _dt: Duration, ctx: &mut GameContext<SceneWorld>) -> TaskStatus {
            ctx.events.push(GameEvent::Triggered { id: "hello" });
            TaskStatus::Done
        }
    }

    #[test]
    fn test_tick_publishes_events_of_that_tick() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(Announce);

        runtime.tick(Duration::from_millis(16));

        let events: Vec<_> = runtime.context().events.iter().cloned().collect();
        assert_eq!(events, vec![GameEvent::Triggered { id: "hello" }]);
        assert_eq!(runtime.task_count(), 0);
        assert_eq!(runtime.context().time.frame_count(), 1);

        // Next tick starts a fresh batch
        runtime.tick(Duration::from_millis(16));
        assert!(runtime.context().events.is_empty());
    }

    #[test]
    fn test_shutdown_returns_host_with_items_inactive() {
        let mut runtime = Runtime::new(SceneWorld::new());
        let ctx = runtime.context_mut();
        ctx.pools
            .create_pool(&mut ctx.host, "Cards", Prefab::new("card"), 2, None)
            .unwrap();
        let card = ctx
            .pools
            .spawn(&mut ctx.host, "Cards", Vec3::ZERO, Quat::IDENTITY)
            .unwrap();
        assert!(ctx.host.is_active(card));

        let world = runtime.shutdown();

        assert!(world.contains(card));
        assert!(!world.is_active(card));
    }
}
