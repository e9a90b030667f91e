//! Object pooling
//!
//! Tag-keyed pools of pre-instantiated host objects, shared by every system
//! that would otherwise create and destroy objects each frame.

mod error;
mod registry;

pub use error::PoolError;
pub use registry::PoolRegistry;
