//! Scene renderer: transforms the box and draws it onto a [`Surface`]
use nalgebra::{Point3, Vector3};

use crate::geometry::{Edge, Wireframe, BOX_EDGES, BOX_VERTICES};
use crate::projection::Bounds;
use crate::transform::{Transform, TransformParams};

/// Static title shown above the viewport
pub const TITLE: &str = "3D Box with Local Axes";
/// Display interval used on every axis
pub const AXIS_LIMITS: (f64, f64) = (-6.0, 6.0);
/// Length of each local-axis gizmo arm
pub const AXIS_LENGTH: f64 = 1.5;

/// What a drawn primitive represents; surfaces pick the actual styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    Edge,
    Vertex,
    AxisX,
    AxisY,
    AxisZ,
}

/// Drawing target for [`Scene::redraw`]
pub trait Surface {
    /// Discard everything drawn so far, including bounds and title
    fn clear(&mut self);
    fn line(&mut self, from: &Point3<f64>, to: &Point3<f64>, ink: Ink);
    fn marker(&mut self, at: &Point3<f64>, ink: Ink);
    fn set_bounds(&mut self, bounds: Bounds);
    fn set_title(&mut self, title: &str);
    fn request_repaint(&mut self);
}

/// Local coordinate frame of the box after the pose is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAxes {
    pub origin: Point3<f64>,
    pub x: Point3<f64>,
    pub y: Point3<f64>,
    pub z: Point3<f64>,
}

impl LocalAxes {
    /// Arms paired with their ink, in x, y, z order
    pub fn arms(&self) -> [(Point3<f64>, Ink); 3] {
        [(self.x, Ink::AxisX), (self.y, Ink::AxisY), (self.z, Ink::AxisZ)]
    }
}

/// Box geometry with one pose applied
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub vertices: [Point3<f64>; BOX_VERTICES],
    pub edges: [Edge; BOX_EDGES],
    pub axes: LocalAxes,
}

impl Frame {
    /// Endpoints of every edge
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        self.edges
            .iter()
            .map(|edge| (self.vertices[edge.0], self.vertices[edge.1]))
    }
}

/// Owns the fixed box and knows how to draw it in any pose
#[derive(Debug, Clone)]
pub struct Scene {
    wireframe: Wireframe,
    show_axes: bool,
}

impl Scene {
    pub fn new(wireframe: Wireframe) -> Self {
        Self {
            wireframe,
            show_axes: true,
        }
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    pub fn set_show_axes(&mut self, show: bool) {
        self.show_axes = show;
    }

    /// Display volume reset on every redraw
    pub fn bounds() -> Bounds {
        Bounds::cube(AXIS_LIMITS.0, AXIS_LIMITS.1)
    }

    /// Rotate the box about its own centroid, then translate it.
    ///
    /// The centroid is taken from the untransformed corners on every call,
    /// so the result depends on `params` alone.
    pub fn transform(&self, params: TransformParams) -> Frame {
        let centered = self.wireframe.centered();
        let model = Transform::model_matrix(&params);
        let vertices = centered.map(|v| Transform::apply(&model, &v));

        let arm = |direction: Vector3<f64>| {
            Transform::apply(&model, &Point3::from(direction * AXIS_LENGTH))
        };
        let axes = LocalAxes {
            origin: Transform::apply(&model, &Point3::origin()),
            x: arm(Vector3::x()),
            y: arm(Vector3::y()),
            z: arm(Vector3::z()),
        };

        Frame {
            vertices,
            edges: *self.wireframe.edges(),
            axes,
        }
    }

    /// Full, independent redraw of the scene for one pose
    pub fn redraw<S: Surface + ?Sized>(&self, params: TransformParams, surface: &mut S) {
        log::debug!("redraw: {params}");
        let frame = self.transform(params);

        surface.clear();
        for (from, to) in frame.segments() {
            surface.line(&from, &to, Ink::Edge);
        }
        if self.show_axes {
            for (end, ink) in frame.axes.arms() {
                surface.line(&frame.axes.origin, &end, ink);
            }
        }
        for vertex in &frame.vertices {
            surface.marker(vertex, Ink::Vertex);
        }

        // clearing drops the bounds and title, so they are set again every time
        surface.set_bounds(Self::bounds());
        surface.set_title(TITLE);
        surface.request_repaint();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Wireframe::unit_box())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identity_pose_centers_box() {
        let scene = Scene::default();
        let frame = scene.transform(TransformParams::identity());
        assert_eq!(frame.vertices, scene.wireframe().centered());
    }

    #[test]
    fn test_translation_moves_centroid() {
        let scene = Scene::default();
        let params = TransformParams::new(45.0, 10.0, 300.0, 2.0, -3.0, 4.5);
        let frame = scene.transform(params);
        let moved = Wireframe::from_vertices(frame.vertices).centroid();
        assert!((moved - Point3::new(2.0, -3.0, 4.5)).norm() < EPS);
        assert!((frame.axes.origin - moved).norm() < EPS);
    }

    #[test]
    fn test_local_axes_have_fixed_length() {
        let scene = Scene::default();
        let frame = scene.transform(TransformParams::default());
        for (end, _) in frame.axes.arms() {
            assert!(((end - frame.axes.origin).norm() - AXIS_LENGTH).abs() < EPS);
        }
        let x = frame.axes.x - frame.axes.origin;
        let y = frame.axes.y - frame.axes.origin;
        let z = frame.axes.z - frame.axes.origin;
        assert!((x.cross(&y) - z * AXIS_LENGTH).norm() < EPS);
    }

    #[test]
    fn test_segments_follow_edges() {
        let scene = Scene::default();
        let frame = scene.transform(TransformParams::identity());
        let segments: Vec<_> = frame.segments().collect();
        assert_eq!(segments.len(), BOX_EDGES);
        assert_eq!(segments[0], (frame.vertices[0], frame.vertices[1]));
        assert_eq!(segments[11], (frame.vertices[3], frame.vertices[7]));
    }
}
