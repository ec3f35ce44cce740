/// 2D drawing surface produced by a scene each frame
use crate::geometry::Point2;

/// A single queued drawing operation, in view coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line { start: Point2, end: Point2 },
    Polygon { points: Vec<Point2> },
}

/// A sized surface of draw commands with its own coordinate frame.
///
/// Commands are stored in view coordinates; `convert` maps them onto the
/// surface using the panel origin and per-axis orientation, so a panel with
/// orientation `(1, -1)` has y pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    size: (u32, u32),
    origin: Point2,
    orientation: Point2,
    commands: Vec<DrawCommand>,
}

impl Panel {
    pub fn new(size: (u32, u32), origin: Point2, orientation: Point2) -> Self {
        Self {
            size,
            origin,
            orientation,
            commands: Vec::new(),
        }
    }

    /// A panel with its origin in the middle and y pointing up
    pub fn centered(size: (u32, u32)) -> Self {
        let origin = Point2::new(size.0 as f32, size.1 as f32) / 2.0;
        Self::new(size, origin, Point2::new(1.0, -1.0))
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn orientation(&self) -> Point2 {
        self.orientation
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Surface position of a view-space point
    pub fn convert(&self, point: &Point2) -> Point2 {
        self.origin + point.component_mul(&self.orientation)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_line(&mut self, start: Point2, end: Point2) {
        self.commands.push(DrawCommand::Line { start, end });
    }

    /// Queue a closed polygon.
    ///
    /// Fewer than three distinct points can't enclose anything, so the
    /// polygon degrades to a line (or a zero-length line for one point).
    pub fn draw_polygon(&mut self, points: &[Point2]) {
        let mut distinct: Vec<Point2> = Vec::with_capacity(points.len());
        for point in points {
            if !distinct.contains(point) {
                distinct.push(*point);
            }
        }

        match distinct.as_slice() {
            [] => {}
            [only] => self.draw_line(*only, *only),
            [start, end] => self.draw_line(*start, *end),
            _ => self.commands.push(DrawCommand::Polygon {
                points: points.to_vec(),
            }),
        }
    }
}
