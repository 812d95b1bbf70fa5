//! Fixed wireframe geometry of the box
use nalgebra::{Point3, Vector3};

pub const BOX_VERTICES: usize = 8;
pub const BOX_EDGES: usize = 12;

/// Unordered pair of vertex indices joined by a drawn segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self(from, to)
    }

    /// True when this edge joins `a` and `b`, in either order
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.0 == a && self.1 == b) || (self.0 == b && self.1 == a)
    }
}

fn box_edges() -> [Edge; BOX_EDGES] {
    [
        // bottom
        Edge::new(0, 1),
        Edge::new(1, 2),
        Edge::new(2, 3),
        Edge::new(3, 0),
        // top
        Edge::new(4, 5),
        Edge::new(5, 6),
        Edge::new(6, 7),
        Edge::new(7, 4),
        // vertical
        Edge::new(0, 4),
        Edge::new(1, 5),
        Edge::new(2, 6),
        Edge::new(3, 7),
    ]
}

/// The box: eight corners and the twelve edges between them.
///
/// Topology is fixed at construction; nothing here is ever mutated, so
/// every redraw starts from the same untransformed corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    vertices: [Point3<f64>; BOX_VERTICES],
    edges: [Edge; BOX_EDGES],
}

impl Wireframe {
    /// Axis-aligned box with its base at z=0, top at z=2 and half-width 1 in x and y
    pub fn unit_box() -> Self {
        let vertices = [
            Point3::new(1.0, 1.0, 0.0),   // 0
            Point3::new(-1.0, 1.0, 0.0),  // 1
            Point3::new(-1.0, -1.0, 0.0), // 2
            Point3::new(1.0, -1.0, 0.0),  // 3
            Point3::new(1.0, 1.0, 2.0),   // 4
            Point3::new(-1.0, 1.0, 2.0),  // 5
            Point3::new(-1.0, -1.0, 2.0), // 6
            Point3::new(1.0, -1.0, 2.0),  // 7
        ];
        Self::from_vertices(vertices)
    }

    /// Box with custom corners sharing the standard edge list
    pub fn from_vertices(vertices: [Point3<f64>; BOX_VERTICES]) -> Self {
        Self {
            vertices,
            edges: box_edges(),
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>; BOX_VERTICES] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge; BOX_EDGES] {
        &self.edges
    }

    /// Arithmetic mean of the corners
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / BOX_VERTICES as f64)
    }

    /// Corners expressed relative to the centroid
    pub fn centered(&self) -> [Point3<f64>; BOX_VERTICES] {
        let centroid = self.centroid().coords;
        self.vertices.map(|v| v - centroid)
    }
}

impl Default for Wireframe {
    fn default() -> Self {
        Self::unit_box()
    }
}
