//! Scene world wrapper around hecs
//!
//! `SceneWorld` is the in-process host the pools run against: every pooled
//! object is an entity carrying `Name`, `Transform` and `Active`, and
//! containers are entities carrying `Children`.

use glam::{Quat, Vec3};
use hecs::Entity;
use rustc_hash::FxHashMap;

use super::components::{Active, Children, Name, Parent, Transform};
use super::host::SceneHost;

/// Template pooled entities are cloned from
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab {
    /// Name given to every instance
    pub name: String,
    /// Initial transform of every instance
    pub transform: Transform,
}

impl Prefab {
    /// Create a prefab at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
        }
    }

    /// Set the initial transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Scene containing all pooled entities and their containers
pub struct SceneWorld {
    /// The underlying hecs world
    inner: hecs::World,
    /// Named prefab library
    prefabs: FxHashMap<String, Prefab>,
}

impl SceneWorld {
    /// Create a new empty world
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
            prefabs: FxHashMap::default(),
        }
    }

    /// Register a prefab under a lookup name, replacing any previous one
    pub fn register_prefab(&mut self, key: impl Into<String>, prefab: Prefab) {
        self.prefabs.insert(key.into(), prefab);
    }

    /// Look up a registered prefab
    #[must_use]
    pub fn prefab(&self, key: &str) -> Option<&Prefab> {
        self.prefabs.get(key)
    }

    /// Spawn an empty, active container entity
    pub fn spawn_container(&mut self, name: impl Into<String>) -> Entity {
        self.inner.spawn((
            Name::new(name),
            Transform::default(),
            Active(true),
            Children::new(),
        ))
    }

    /// Find a container by name
    #[must_use]
    pub fn container(&self, name: &str) -> Option<Entity> {
        self.inner
            .query::<(&Name, &Children)>()
            .iter()
            .find(|(_, (n, _))| n.as_str() == name)
            .map(|(entity, _)| entity)
    }

    /// Despawn an entity, detaching it from its parent and orphaning its children
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.detach(entity);
        let orphans: Vec<Entity> = self
            .inner
            .get::<&Children>(entity)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default();
        for child in orphans {
            let _ = self.inner.remove_one::<Parent>(child);
        }
        self.inner.despawn(entity)
    }

    /// Check if an entity is active. Despawned entities are not.
    #[must_use]
    pub fn is_active(&self, entity: Entity) -> bool {
        self.inner
            .get::<&Active>(entity)
            .is_ok_and(|active| active.0)
    }

    /// Get a copy of an entity's transform
    #[must_use]
    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.inner.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Get an entity's parent
    #[must_use]
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.inner
            .get::<&Parent>(entity)
            .ok()
            .map(|parent| parent.entity())
    }

    /// Get a container's children in attach order
    #[must_use]
    pub fn children(&self, container: Entity) -> Vec<Entity> {
        self.inner
            .get::<&Children>(container)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Get an entity's name
    #[must_use]
    pub fn name(&self, entity: Entity) -> Option<String> {
        self.inner
            .get::<&Name>(entity)
            .ok()
            .map(|name| name.0.clone())
    }

    /// Check if an entity exists
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of active entities, containers included
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner
            .query::<&Active>()
            .iter()
            .filter(|(_, active)| active.0)
            .count()
    }

    /// Get the number of entities
    #[must_use]
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Check if the world is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove `entity` from its current parent's child list
    fn detach(&mut self, entity: Entity) {
        let Some(old) = self.parent(entity) else {
            return;
        };
        if let Ok(mut children) = self.inner.get::<&mut Children>(old) {
            children.remove(entity);
        }
        let _ = self.inner.remove_one::<Parent>(entity);
    }
}

impl SceneHost for SceneWorld {
    type Handle = Entity;
    type Template = Prefab;
    type Container = Entity;

    fn instantiate(&mut self, template: &Prefab) -> Entity {
        self.inner.spawn((
            Name::new(template.name.clone()),
            template.transform,
            Active(true),
        ))
    }

    fn set_active(&mut self, handle: Entity, active: bool) {
        match self.inner.get::<&mut Active>(handle) {
            Ok(mut flag) => flag.0 = active,
            Err(err) => log::warn!("Cannot set active state of {handle:?}: {err}"),
        }
    }

    fn set_transform(&mut self, handle: Entity, position: Vec3, rotation: Quat) {
        match self.inner.get::<&mut Transform>(handle) {
            Ok(mut transform) => {
                transform.position = position;
                transform.rotation = rotation;
            }
            Err(err) => log::warn!("Cannot move {handle:?}: {err}"),
        }
    }

    fn set_parent(&mut self, handle: Entity, container: Option<Entity>) {
        if !self.inner.contains(handle) {
            log::warn!("Cannot parent {handle:?}: entity does not exist");
            return;
        }
        if container == Some(handle) {
            log::warn!("Cannot parent {handle:?} under itself");
            return;
        }
        self.detach(handle);

        let Some(container) = container else {
            return;
        };
        if !self.inner.contains(container) {
            log::warn!("Cannot parent {handle:?} under missing container {container:?}");
            return;
        }

        let attached = match self.inner.get::<&mut Children>(container) {
            Ok(mut children) => {
                children.add(handle);
                true
            }
            Err(_) => false,
        };
        if !attached {
            let _ = self.inner.insert_one(container, Children::single(handle));
        }
        let _ = self.inner.insert_one(handle, Parent(container));
    }
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SceneWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneWorld")
            .field("entities", &self.inner.len())
            .field("prefabs", &self.prefabs.len())
            .finish()
    }
}
