//! Display bounds and the fixed orthographic view onto them
use nalgebra::{Point3, Vector3};

/// Axis-aligned display volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
    /// One world unit spans the same screen distance on every axis
    pub equal_aspect: bool,
}

impl Bounds {
    /// Same `[lo, hi]` interval on all three axes, equal aspect
    pub fn cube(lo: f64, hi: f64) -> Self {
        Self {
            min: Point3::new(lo, lo, lo),
            max: Point3::new(hi, hi, hi),
            equal_aspect: true,
        }
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// The eight corners, indexed in the same bottom/top order as the box
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(hi.x, hi.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
        ]
    }
}

/// Orthographic view direction given as elevation and azimuth in degrees.
///
/// Screen `u` grows to the right, `v` grows upwards and `depth` grows
/// towards the viewer. The world z axis always projects straight up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub elevation: f64,
    pub azimuth: f64,
}

impl View {
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        Self { elevation, azimuth }
    }

    fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let (se, ce) = self.elevation.to_radians().sin_cos();
        let (sa, ca) = self.azimuth.to_radians().sin_cos();
        let right = Vector3::new(-sa, ca, 0.0);
        let up = Vector3::new(-se * ca, -se * sa, ce);
        let toward_viewer = Vector3::new(ce * ca, ce * sa, se);
        (right, up, toward_viewer)
    }

    /// Project a world point onto the view plane, returning `(u, v, depth)`
    pub fn project(&self, point: &Point3<f64>) -> (f64, f64, f64) {
        let (right, up, toward_viewer) = self.basis();
        let p = point.coords;
        (p.dot(&right), p.dot(&up), p.dot(&toward_viewer))
    }

    /// Half-width and half-height of the projected bounds around their projected center
    pub fn extent(&self, bounds: &Bounds) -> (f64, f64) {
        let (cu, cv, _) = self.project(&bounds.center());
        bounds
            .corners()
            .iter()
            .map(|corner| self.project(corner))
            .fold((0.0_f64, 0.0_f64), |(hu, hv), (u, v, _)| {
                (hu.max((u - cu).abs()), hv.max((v - cv).abs()))
            })
    }
}

/// Elevation 30°, azimuth -60°: the usual default for 3D plot axes
impl Default for View {
    fn default() -> Self {
        Self::new(30.0, -60.0)
    }
}
