/// Persp Core Library - perspective projection pipeline
///
/// This library provides the I/O-free core of the viewer: vector and
/// orientation math, the observer, the projected scene model and the
/// keyboard-driven camera controller.

pub mod controller;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use controller::{ControllerSettings, ProjectionController};
pub use geometry::{radial, Point2, Primitive, Vector3};
pub use input::{HeldKeys, Key};
pub use panel::{DrawCommand, Panel};
pub use projection::{Observer, Projection};
pub use scene::{Controller, Scene, Viewer};
pub use transform::Orientation;
