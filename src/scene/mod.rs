//! Scene host
//!
//! The capability trait pools consume, and a hecs-backed world implementing it.

mod components;
mod host;
mod world;

pub use components::{Active, Children, Name, Parent, Transform};
pub use host::SceneHost;
pub use world::{Prefab, SceneWorld};
