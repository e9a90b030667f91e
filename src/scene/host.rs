//! Host capability trait consumed by the object pool

use glam::{Quat, Vec3};

/// The scene operations a pool needs from whatever owns the pooled objects.
///
/// The pool never creates or destroys objects on its own. It asks the host
/// to clone a template, toggle activation, move things around and group them
/// under a container. Anything that can do those four things can be pooled:
/// an ECS world, a UI tree, an audio source bank.
pub trait SceneHost {
    /// Opaque reference to a host-managed object
    type Handle: Copy + Eq + std::fmt::Debug;
    /// Prototype that new objects are cloned from
    type Template;
    /// Grouping node objects are parented under
    type Container: Copy + std::fmt::Debug;

    /// Create a new object from a template
    fn instantiate(&mut self, template: &Self::Template) -> Self::Handle;

    /// Enable or disable an object
    fn set_active(&mut self, handle: Self::Handle, active: bool);

    /// Move and orient an object
    fn set_transform(&mut self, handle: Self::Handle, position: Vec3, rotation: Quat);

    /// Group an object under a container, or detach it with `None`.
    ///
    /// Parenting is for grouping and visibility only. It does not tie the
    /// child's lifetime to the container.
    fn set_parent(&mut self, handle: Self::Handle, container: Option<Self::Container>);
}
