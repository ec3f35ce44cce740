/// Perspective observer and the projected scene model
use log::trace;

use crate::geometry::{Point2, Primitive, Vector3};
use crate::panel::Panel;
use crate::transform::Orientation;

/// A pinhole camera placed in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    pub origin: Vector3,
    pub orientation: Orientation,
    /// Focal length, always positive
    pub focal: f32,
    /// Viewport size in pixels
    pub window: (u32, u32),
}

impl Observer {
    pub fn new(origin: Vector3, orientation: Orientation, focal: f32, window: (u32, u32)) -> Self {
        Self {
            origin,
            orientation,
            focal,
            window,
        }
    }

    /// Observer on the -z axis, two focal lengths back, facing the origin
    pub fn looking_at_origin(focal: f32, window: (u32, u32)) -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, -2.0 * focal),
            Orientation::identity(),
            focal,
            window,
        )
    }

    /// Move a world point into camera space, where +z is the view direction
    pub fn transform(&self, point: &Vector3) -> Vector3 {
        self.orientation.rotate(&(point - self.origin))
    }

    /// Perspective divide of a camera-space point.
    ///
    /// Points at or behind the camera plane (depth <= 0) have no projection.
    pub fn project(&self, point: &Vector3) -> Option<Point2> {
        if point.z <= 0.0 {
            return None;
        }

        let scale = self.focal / point.z;
        Some(Point2::new(scale * point.x, scale * point.y))
    }
}

/// A 3D world of lines and polygons viewed through an [`Observer`]
#[derive(Debug, Clone, Default)]
pub struct Projection {
    primitives: Vec<Primitive>,
}

/// A primitive moved into camera space, keyed by its nearest vertex
struct CameraPrimitive {
    points: Vec<Vector3>,
    nearest: f32,
}

impl Projection {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn add_line(&mut self, start: Vector3, end: Vector3) {
        self.primitives.push(Primitive::line(start, end));
    }

    pub fn add_polygon<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Vector3>,
    {
        self.primitives.push(Primitive::polygon(points));
    }

    pub fn add_triangle(&mut self, first: Vector3, second: Vector3, third: Vector3) {
        self.add_polygon([first, second, third]);
    }

    /// Add the 12 edges of an axis-aligned cube with half-width `radius`
    pub fn add_wire_cube(&mut self, center: Vector3, radius: f32) {
        // Each axis in turn spans -radius..radius while the other two
        // walk through the four sign combinations
        for dimension in 0..3 {
            for first in [-radius, radius] {
                for second in [-radius, radius] {
                    let mut start = Vector3::zeros();
                    start[dimension] = -radius;
                    start[(dimension + 1) % 3] = first;
                    start[(dimension + 2) % 3] = second;

                    let mut end = start;
                    end[dimension] = radius;

                    self.add_line(center + start, center + end);
                }
            }
        }
    }

    /// Draw every visible primitive onto a fresh panel, back to front
    pub fn render(&self, observer: &Observer) -> Panel {
        let mut output = Panel::centered(observer.window);

        let mut transformed: Vec<CameraPrimitive> = self
            .primitives
            .iter()
            .filter(|primitive| primitive.vertex_count() > 0)
            .map(|primitive| {
                let points: Vec<Vector3> = primitive
                    .vertices()
                    .iter()
                    .map(|point| observer.transform(point))
                    .collect();
                let nearest = points.iter().map(|p| p.z).fold(f32::INFINITY, f32::min);
                CameraPrimitive { points, nearest }
            })
            .collect();

        // Stable, so ties keep insertion order
        transformed.sort_by(|a, b| b.nearest.total_cmp(&a.nearest));

        let mut culled = 0usize;
        for primitive in &transformed {
            let projected: Option<Vec<Point2>> = primitive
                .points
                .iter()
                .map(|point| observer.project(point))
                .collect();

            match projected.as_deref() {
                None => culled += 1,
                Some([start, end]) => output.draw_line(*start, *end),
                Some(points) => output.draw_polygon(points),
            }
        }

        trace!(
            "rendered {} primitives, culled {}",
            transformed.len() - culled,
            culled
        );

        output
    }
}
