//! Built-in timed tasks
//!
//! Each task keeps its own clock and advances by the `dt` it is ticked with,
//! so the same task runs identically under a fixed-step loop and in tests.

use std::time::Duration;

use super::events::GameEvent;
use super::runtime::GameContext;
use super::scheduler::{Task, TaskStatus};
use crate::scene::SceneHost;

// ============================================================================
// Countdown
// ============================================================================

/// Pre-round "3, 2, 1" countdown.
///
/// The first tick announces the start and the starting value. After that,
/// every elapsed interval shows the next lower value until zero, which emits
/// `CountdownFinished` instead of a tick.
#[derive(Debug, Clone)]
pub struct Countdown {
    from: u32,
    remaining: u32,
    interval: Duration,
    elapsed: Duration,
    started: bool,
}

impl Countdown {
    pub const DEFAULT_FROM: u32 = 3;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Count down from `from`, one step per `interval`
    #[must_use]
    pub fn new(from: u32, interval: Duration) -> Self {
        Self {
            from,
            remaining: from,
            interval,
            elapsed: Duration::ZERO,
            started: false,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FROM, Self::DEFAULT_INTERVAL)
    }
}

impl<H: SceneHost> Task<GameContext<H>> for Countdown {
    fn name(&self) -> &'static str {
        "Countdown"
    }

    fn tick(&mut self, dt: Duration, ctx: &mut GameContext<H>) -> TaskStatus {
        if !self.started {
            self.started = true;
            ctx.events.push(GameEvent::CountdownStarted { from: self.from });
            if self.remaining == 0 {
                ctx.events.push(GameEvent::CountdownFinished);
                return TaskStatus::Done;
            }
            ctx.events.push(GameEvent::CountdownTick {
                remaining: self.remaining,
            });
            return TaskStatus::Pending;
        }

        self.elapsed += dt;
        while self.remaining > 0 && self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.remaining -= 1;
            if self.remaining > 0 {
                ctx.events.push(GameEvent::CountdownTick {
                    remaining: self.remaining,
                });
            }
        }

        if self.remaining == 0 {
            ctx.events.push(GameEvent::CountdownFinished);
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        }
    }
}

// ============================================================================
// Round Timer
// ============================================================================

/// Counts a round's time budget down to zero.
///
/// Emits `TimerChanged` only when the whole-second display changes, then
/// `TimeUp` once. Cancel the task to stop the round early.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    remaining: Duration,
    shown: u32,
    started: bool,
}

impl RoundTimer {
    /// Seconds of round time granted per card pair
    pub const SECONDS_PER_PAIR: u64 = 5;

    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
            shown: whole_seconds(duration),
            started: false,
        }
    }

    /// Round length for a board with `pairs` pairs
    #[must_use]
    pub fn for_pairs(pairs: u32) -> Self {
        Self::new(Duration::from_secs(
            u64::from(pairs) * Self::SECONDS_PER_PAIR,
        ))
    }
}

impl<H: SceneHost> Task<GameContext<H>> for RoundTimer {
    fn name(&self) -> &'static str {
        "RoundTimer"
    }

    fn tick(&mut self, dt: Duration, ctx: &mut GameContext<H>) -> TaskStatus {
        if !self.started {
            self.started = true;
            ctx.events.push(GameEvent::RoundStarted {
                seconds: self.shown,
            });
        }

        self.remaining = self.remaining.saturating_sub(dt);
        let seconds = whole_seconds(self.remaining);
        if seconds != self.shown {
            self.shown = seconds;
            ctx.events.push(GameEvent::TimerChanged { seconds });
        }

        if self.remaining.is_zero() {
            ctx.events.push(GameEvent::TimeUp);
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        }
    }
}

/// Round to the nearest whole second for display, halves to even
fn whole_seconds(duration: Duration) -> u32 {
    duration.as_secs_f32().round_ties_even() as u32
}

// ============================================================================
// Delayed Trigger
// ============================================================================

/// Fires a `Triggered` event once `delay` has elapsed.
#[derive(Debug, Clone)]
pub struct Delayed {
    id: &'static str,
    delay: Duration,
    elapsed: Duration,
}

impl Delayed {
    #[must_use]
    pub const fn new(id: &'static str, delay: Duration) -> Self {
        Self {
            id,
            delay,
            elapsed: Duration::ZERO,
        }
    }
}

impl<H: SceneHost> Task<GameContext<H>> for Delayed {
    fn name(&self) -> &'static str {
        "Delayed"
    }

    fn tick(&mut self, dt: Duration, ctx: &mut GameContext<H>) -> TaskStatus {
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return TaskStatus::Pending;
        }
        ctx.events.push(GameEvent::Triggered { id: self.id });
        TaskStatus::Done
    }
}

// ============================================================================
// Return After
// ============================================================================

/// Hands a spawned item back to its pool once `delay` has elapsed.
///
/// Used for fire-and-forget objects such as one-shot sound players and
/// particle bursts that disable themselves after a fixed time.
pub struct ReturnAfter<H: SceneHost> {
    tag: String,
    handle: H::Handle,
    delay: Duration,
    elapsed: Duration,
}

impl<H: SceneHost> ReturnAfter<H> {
    pub fn new(tag: impl Into<String>, handle: H::Handle, delay: Duration) -> Self {
        Self {
            tag: tag.into(),
            handle,
            delay,
            elapsed: Duration::ZERO,
        }
    }
}

impl<H: SceneHost> std::fmt::Debug for ReturnAfter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReturnAfter")
            .field("tag", &self.tag)
            .field("handle", &self.handle)
            .field("delay", &self.delay)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

impl<H: SceneHost> Task<GameContext<H>> for ReturnAfter<H> {
    fn name(&self) -> &'static str {
        "ReturnAfter"
    }

    fn tick(&mut self, dt: Duration, ctx: &mut GameContext<H>) -> TaskStatus {
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return TaskStatus::Pending;
        }

        // Failures are already logged by the registry
        if ctx
            .pools
            .return_to_pool(&mut ctx.host, &self.tag, self.handle)
            .is_ok()
        {
            ctx.events.push(GameEvent::ItemReturned {
                tag: self.tag.clone(),
            });
        }
        TaskStatus::Done
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::runtime::Runtime;
    use crate::scene::{Prefab, SceneWorld};
    use glam::{Quat, Vec3};

    const SECOND: Duration = Duration::from_secs(1);

    /// Tick once and collect that tick's events
    fn step(runtime: &mut Runtime<SceneWorld>, dt: Duration) -> Vec<GameEvent> {
        runtime.tick(dt);
        runtime.context().events.iter().cloned().collect()
    }

    #[test]
    fn test_countdown_sequence() {
        let mut runtime = Runtime::new(SceneWorld::new());
        let id = runtime.spawn(Countdown::default());

        assert_eq!(
            step(&mut runtime, SECOND),
            vec![
                GameEvent::CountdownStarted { from: 3 },
                GameEvent::CountdownTick { remaining: 3 }
            ]
        );
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![GameEvent::CountdownTick { remaining: 2 }]
        );
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![GameEvent::CountdownTick { remaining: 1 }]
        );
        assert!(runtime.is_running(id));
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![GameEvent::CountdownFinished]
        );
        assert!(!runtime.is_running(id));
    }

    #[test]
    fn test_countdown_with_small_steps() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(Countdown::new(2, SECOND));
        let dt = Duration::from_millis(250);

        let mut events = Vec::new();
        for _ in 0..12 {
            events.extend(step(&mut runtime, dt));
        }

        assert_eq!(
            events,
            vec![
                GameEvent::CountdownStarted { from: 2 },
                GameEvent::CountdownTick { remaining: 2 },
                GameEvent::CountdownTick { remaining: 1 },
                GameEvent::CountdownFinished,
            ]
        );
        assert_eq!(runtime.task_count(), 0);
    }

    #[test]
    fn test_countdown_from_zero_finishes_at_once() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(Countdown::new(0, SECOND));

        assert_eq!(
            step(&mut runtime, SECOND),
            vec![
                GameEvent::CountdownStarted { from: 0 },
                GameEvent::CountdownFinished
            ]
        );
        assert_eq!(runtime.task_count(), 0);
    }

    #[test]
    fn test_round_timer_runs_out() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(RoundTimer::for_pairs(1));

        assert_eq!(
            step(&mut runtime, SECOND),
            vec![
                GameEvent::RoundStarted { seconds: 5 },
                GameEvent::TimerChanged { seconds: 4 }
            ]
        );
        for expected in [3, 2, 1] {
            assert_eq!(
                step(&mut runtime, SECOND),
                vec![GameEvent::TimerChanged { seconds: expected }]
            );
        }
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![GameEvent::TimerChanged { seconds: 0 }, GameEvent::TimeUp]
        );
        assert_eq!(runtime.task_count(), 0);
    }

    #[test]
    fn test_round_timer_only_reports_display_changes() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(RoundTimer::new(Duration::from_secs(10)));

        // 10.0 -> 9.9 still rounds to 10
        assert_eq!(
            step(&mut runtime, Duration::from_millis(100)),
            vec![GameEvent::RoundStarted { seconds: 10 }]
        );
        assert!(step(&mut runtime, Duration::from_millis(100)).is_empty());
    }

    #[test]
    fn test_round_timer_rounds_halves_to_even() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(RoundTimer::new(Duration::from_millis(5500)));

        // 5.5 shows 6, 4.5 shows 4
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![
                GameEvent::RoundStarted { seconds: 6 },
                GameEvent::TimerChanged { seconds: 4 }
            ]
        );
        // 3.5 still shows 4, 2.5 shows 2
        assert!(step(&mut runtime, SECOND).is_empty());
        assert_eq!(
            step(&mut runtime, SECOND),
            vec![GameEvent::TimerChanged { seconds: 2 }]
        );
    }

    #[test]
    fn test_round_timer_cancel_stops_round() {
        let mut runtime = Runtime::new(SceneWorld::new());
        let id = runtime.spawn(RoundTimer::for_pairs(2));
        step(&mut runtime, SECOND);

        assert!(runtime.cancel(id));

        let events = step(&mut runtime, Duration::from_secs(30));
        assert!(!events.contains(&GameEvent::TimeUp));
    }

    #[test]
    fn test_delayed_trigger() {
        let mut runtime = Runtime::new(SceneWorld::new());
        runtime.spawn(Delayed::new("music", Duration::from_millis(500)));

        assert!(step(&mut runtime, Duration::from_millis(300)).is_empty());
        assert_eq!(
            step(&mut runtime, Duration::from_millis(300)),
            vec![GameEvent::Triggered { id: "music" }]
        );
        assert_eq!(runtime.task_count(), 0);
    }

    #[test]
    fn test_return_after_deactivates_item() {
        let mut runtime = Runtime::new(SceneWorld::new());
        let ctx = runtime.context_mut();
        ctx.pools
            .create_pool(&mut ctx.host, "AudioSource", Prefab::new("audio"), 2, None)
            .unwrap();
        let source = ctx
            .pools
            .spawn(&mut ctx.host, "AudioSource", Vec3::ZERO, Quat::IDENTITY)
            .unwrap();
        runtime.spawn(ReturnAfter::<SceneWorld>::new(
            "AudioSource",
            source,
            Duration::from_millis(400),
        ));

        assert!(step(&mut runtime, Duration::from_millis(200)).is_empty());
        assert!(runtime.context().host.is_active(source));

        assert_eq!(
            step(&mut runtime, Duration::from_millis(200)),
            vec![GameEvent::ItemReturned {
                tag: "AudioSource".into()
            }]
        );
        assert!(!runtime.context().host.is_active(source));
        assert_eq!(runtime.context().pools.queued("AudioSource"), Some(3));
    }

    #[test]
    fn test_return_after_unknown_tag_completes_quietly() {
        let mut runtime = Runtime::new(SceneWorld::new());
        let item = runtime.context_mut().host.spawn_container("stray");
        runtime.spawn(ReturnAfter::<SceneWorld>::new("missing", item, Duration::ZERO));

        assert!(step(&mut runtime, SECOND).is_empty());
        assert_eq!(runtime.task_count(), 0);
        assert!(runtime.context().host.is_active(item));
    }
}
