//! Tag-keyed Object Pool Registry
//!
//! This module provides the pool that every gameplay system shares to avoid
//! creating and destroying objects each frame. Card views, leaderboard rows
//! and audio sources are all pre-instantiated once, parked inactive, and
//! handed out from a rotating queue.
//!
//! # Design Principles
//!
//! - **Fixed Capacity**: Objects are created eagerly when a pool is registered; there is no growth path
//! - **Round Robin**: `spawn` re-enqueues the handle at the tail immediately
//! - **Non-fatal Failures**: Misuse is logged and returned as [`PoolError`], never a panic
//! - **Host Agnostic**: Generic over any [`SceneHost`]
//!
//! # Round-robin reuse
//!
//! A spawned handle goes straight back to the tail of its queue. Once a pool
//! of size N has handed out N handles, the next `spawn` yields the oldest one
//! again, even if its previous user never returned it. Size pools for peak
//! concurrent demand, or track live handles on the caller's side.
//!
//! # Example
//!
//! ```ignore
//! let mut pools = PoolRegistry::new();
//! pools.create_pool(&mut world, "Cards", card_prefab, 30, Some(grid))?;
//!
//! if let Ok(card) = pools.spawn(&mut world, "Cards", Vec3::ZERO, Quat::IDENTITY) {
//!     // configure the card...
//!     pools.return_to_pool(&mut world, "Cards", card)?;
//! }
//! ```

use std::collections::VecDeque;

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use super::error::PoolError;
use crate::scene::SceneHost;

// ============================================================================
// Tagged Pool
// ============================================================================

/// One pool: a template and the rotating queue of handles cloned from it.
struct TaggedPool<H: SceneHost> {
    /// Template every item in this pool was instantiated from
    template: H::Template,
    /// Container items are grouped under
    container: Option<H::Container>,
    /// Rotation order; head is handed out next
    queue: VecDeque<H::Handle>,
    /// Number of items created for this pool
    capacity: usize,
}

// ============================================================================
// Pool Registry
// ============================================================================

/// Registry of tag-keyed pools for a single host type.
///
/// The registry is an ordinary value: construct it at startup, hand it to
/// whatever needs pooled objects, and call [`shutdown`](Self::shutdown) (or
/// just drop it) at the end of the session. The host is passed into each
/// call rather than stored, so the host stays usable by other systems.
///
/// # Performance Characteristics
///
/// | Operation        | Time Complexity |
/// |------------------|-----------------|
/// | `create_pool`    | O(size)         |
/// | `spawn`          | O(1)            |
/// | `return_to_pool` | O(1) amortized  |
pub struct PoolRegistry<H: SceneHost> {
    pools: FxHashMap<String, TaggedPool<H>>,
}

impl<H: SceneHost> PoolRegistry<H> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: FxHashMap::default(),
        }
    }

    /// Register a pool and pre-instantiate `size` items from `template`.
    ///
    /// Every item is deactivated, parented under `container` and enqueued in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DuplicateTag`] if `tag` is taken. The existing
    /// pool is left untouched and nothing is instantiated.
    pub fn create_pool(
        &mut self,
        host: &mut H,
        tag: impl Into<String>,
        template: H::Template,
        size: usize,
        container: Option<H::Container>,
    ) -> Result<(), PoolError> {
        let tag = tag.into();
        if self.pools.contains_key(&tag) {
            return Err(report(PoolError::DuplicateTag(tag)));
        }

        let mut queue = VecDeque::with_capacity(size);
        for _ in 0..size {
            let item = host.instantiate(&template);
            host.set_active(item, false);
            host.set_parent(item, container);
            queue.push_back(item);
        }

        log::debug!("Created pool '{tag}' with {size} items");
        self.pools.insert(
            tag,
            TaggedPool {
                template,
                container,
                queue,
                capacity: size,
            },
        );
        Ok(())
    }

    /// Hand out the next item from a pool.
    ///
    /// The head of the queue is activated, moved to `position`/`rotation`
    /// and immediately re-enqueued at the tail (see the module docs on
    /// round-robin reuse).
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownTag`] if no pool has this tag,
    /// [`PoolError::Exhausted`] if the queue is empty. Neither mutates anything.
    pub fn spawn(
        &mut self,
        host: &mut H,
        tag: &str,
        position: Vec3,
        rotation: Quat,
    ) -> Result<H::Handle, PoolError> {
        let Some(pool) = self.pools.get_mut(tag) else {
            return Err(report(PoolError::UnknownTag(tag.to_string())));
        };
        let Some(item) = pool.queue.pop_front() else {
            return Err(report(PoolError::Exhausted(tag.to_string())));
        };

        host.set_active(item, true);
        host.set_transform(item, position, rotation);
        pool.queue.push_back(item);
        Ok(item)
    }

    /// Deactivate an item and enqueue it at the tail of its pool.
    ///
    /// The handle is not checked for membership. Returning an item that was
    /// never spawned, or returning twice, puts an extra copy in the queue.
    ///
    /// # Errors
    ///
    /// [`PoolError::UnknownTag`] if no pool has this tag; the item is left as is.
    pub fn return_to_pool(
        &mut self,
        host: &mut H,
        tag: &str,
        item: H::Handle,
    ) -> Result<(), PoolError> {
        let Some(pool) = self.pools.get_mut(tag) else {
            return Err(report(PoolError::UnknownTag(tag.to_string())));
        };

        host.set_active(item, false);
        pool.queue.push_back(item);
        Ok(())
    }

    /// Check whether a pool is registered under `tag`
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.pools.contains_key(tag)
    }

    /// Number of items originally created for a pool
    #[must_use]
    pub fn capacity(&self, tag: &str) -> Option<usize> {
        self.pools.get(tag).map(|pool| pool.capacity)
    }

    /// Current queue length of a pool.
    ///
    /// Can exceed [`capacity`](Self::capacity) after unmatched returns.
    #[must_use]
    pub fn queued(&self, tag: &str) -> Option<usize> {
        self.pools.get(tag).map(|pool| pool.queue.len())
    }

    /// The handle the next `spawn` on this tag would yield
    #[must_use]
    pub fn peek_next(&self, tag: &str) -> Option<H::Handle> {
        self.pools
            .get(tag)
            .and_then(|pool| pool.queue.front().copied())
    }

    /// Template a pool was created from
    #[must_use]
    pub fn template(&self, tag: &str) -> Option<&H::Template> {
        self.pools.get(tag).map(|pool| &pool.template)
    }

    /// Container a pool's items are parented under
    #[must_use]
    pub fn container(&self, tag: &str) -> Option<H::Container> {
        self.pools.get(tag).and_then(|pool| pool.container)
    }

    /// Iterate over registered tags (unordered)
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    /// Number of registered pools
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if no pools are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// End the session: deactivate every queued item and drop the registry.
    ///
    /// Items are not destroyed; they stay owned by the host.
    pub fn shutdown(self, host: &mut H) {
        let pools = self.pools.len();
        for pool in self.pools.into_values() {
            for item in pool.queue {
                host.set_active(item, false);
            }
        }
        log::info!("Pool registry shut down ({pools} pools)");
    }
}

impl<H: SceneHost> Default for PoolRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SceneHost> std::fmt::Debug for PoolRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.pools.len())
            .field(
                "items",
                &self.pools.values().map(|p| p.capacity).sum::<usize>(),
            )
            .finish()
    }
}

/// Log a pool failure on the warning channel and hand it back
fn report(err: PoolError) -> PoolError {
    log::warn!("{err}");
    err
}

// ============================================================================
// Tests
// ============================================================================
