//! wirebox core library: box geometry, pose transforms and the scene renderer
//!
//! Everything here is stateless and toolkit independent. Front ends own the
//! slider values and hand them to [`Scene::redraw`] together with a
//! [`Surface`] to draw on.

pub mod geometry;
pub mod pose;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Edge, Wireframe};
pub use pose::{parse_pose, PoseError};
pub use projection::{Bounds, View};
pub use scene::{Frame, Ink, LocalAxes, Scene, Surface};
pub use transform::{Param, Transform, TransformParams};
