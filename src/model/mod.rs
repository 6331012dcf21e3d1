//! The orrery itself: static descriptions of the bodies, and the runtime
//! tree that moves them around. Nothing in here knows about windows.

pub mod body;
pub mod system;

pub use body::{BodySpec, Material, StarSpec};
pub use system::{build, step, BodyNode, RenderableBody};
