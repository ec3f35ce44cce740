/// Geometry primitives for the projection scene
use nalgebra::{Vector2, Vector3 as NVector3};

/// A point on the 2D viewing plane
pub type Point2 = Vector2<f32>;

/// A point or direction in 3D space
pub type Vector3 = NVector3<f32>;

/// The position reached by travelling `length` at `angle` radians from the +x axis
pub fn radial(length: f32, angle: f32) -> Point2 {
    Point2::new(length * angle.cos(), length * angle.sin())
}

/// A world-space shape made of straight edges
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line { start: Vector3, end: Vector3 },
    Polygon { points: Vec<Vector3> },
}

impl Primitive {
    pub fn line(start: Vector3, end: Vector3) -> Self {
        Primitive::Line { start, end }
    }

    pub fn polygon<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector3>,
    {
        Primitive::Polygon {
            points: points.into_iter().collect(),
        }
    }

    /// The primitive's vertices in drawing order
    pub fn vertices(&self) -> Vec<Vector3> {
        match self {
            Primitive::Line { start, end } => vec![*start, *end],
            Primitive::Polygon { points } => points.clone(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Primitive::Line { .. } => 2,
            Primitive::Polygon { points } => points.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector3::new(1.5, -2.0, 4.0);
        let b = Vector3::new(-0.5, 3.0, 10.0);
        let c = 3.0;

        assert!(((a + b) - b - a).norm() < 1e-6);
        assert!(((a * c) / c - a).norm() < 1e-6);
        assert_eq!(-(-a), a);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point2::new(2.0, 8.0);
        let b = Point2::new(1.0, -1.0);
        assert_eq!(a + b, Point2::new(3.0, 7.0));
        assert_eq!(a - b, Point2::new(1.0, 9.0));
        assert_eq!(a / 2.0, Point2::new(1.0, 4.0));
        assert_eq!(-b, Point2::new(-1.0, 1.0));
    }

    #[test]
    fn test_radial() {
        let p = radial(10.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_primitive_vertices() {
        let line = Primitive::line(Vector3::zeros(), Vector3::x());
        assert_eq!(line.vertices(), vec![Vector3::zeros(), Vector3::x()]);
        assert_eq!(line.vertex_count(), 2);

        let polygon = Primitive::polygon([Vector3::x(), Vector3::y(), Vector3::z()]);
        assert_eq!(polygon.vertex_count(), 3);
        assert_eq!(polygon.vertices()[2], Vector3::z());
    }
}
