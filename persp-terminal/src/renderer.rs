/// ASCII rasterizer that composites panels onto the terminal grid
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use persp_core::{DrawCommand, Panel, Point2};
use std::io::Write;

/// Character used for line segments and polygon outlines
const EDGE_CHAR: char = '#';
/// Character used to fill polygon interiors
const FILL_CHAR: char = '+';

/// Character grid that panels are rasterized into
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    /// Terminal cell width divided by cell height
    cell_aspect: f32,
    char_buffer: Vec<char>,
}

/// Maps panel surface positions to grid cells
#[derive(Debug, Clone, Copy)]
struct CellMapping {
    scale_x: f32,
    scale_y: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CellMapping {
    fn apply(&self, point: Point2) -> (f32, f32) {
        (
            point.x * self.scale_x + self.offset_x,
            point.y * self.scale_y + self.offset_y,
        )
    }
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, cell_aspect: f32) -> Self {
        Self {
            width,
            height,
            cell_aspect,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Character at a grid cell, if it is inside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.char_buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Rasterize a panel with its top-left corner at `offset` (in cells).
    ///
    /// The panel is scaled uniformly so it fits the remaining grid, with
    /// vertical distances shrunk by the cell aspect so shapes keep their
    /// proportions. Commands are drawn in order, later ones on top.
    pub fn composite(&mut self, panel: &Panel, offset: (usize, usize)) {
        let mapping = self.mapping(panel, offset);

        for command in panel.commands() {
            match command {
                DrawCommand::Line { start, end } => {
                    let a = mapping.apply(panel.convert(start));
                    let b = mapping.apply(panel.convert(end));
                    self.draw_segment(a, b, EDGE_CHAR);
                }
                DrawCommand::Polygon { points } => {
                    let cells: Vec<(f32, f32)> = points
                        .iter()
                        .map(|point| mapping.apply(panel.convert(point)))
                        .collect();
                    self.fill_polygon(&cells, FILL_CHAR);
                    for (i, a) in cells.iter().enumerate() {
                        let b = cells[(i + 1) % cells.len()];
                        self.draw_segment(*a, b, EDGE_CHAR);
                    }
                }
            }
        }
    }

    fn mapping(&self, panel: &Panel, offset: (usize, usize)) -> CellMapping {
        let (panel_width, panel_height) = panel.size();
        let available_x = self.width.saturating_sub(offset.0) as f32;
        let available_y = self.height.saturating_sub(offset.1) as f32;

        let fit_x = available_x / panel_width.max(1) as f32;
        let fit_y = available_y / (panel_height.max(1) as f32 * self.cell_aspect);
        let scale_x = fit_x.min(fit_y);
        let scale_y = scale_x * self.cell_aspect;

        // Center the scaled panel in the available area
        let used_x = panel_width as f32 * scale_x;
        let used_y = panel_height as f32 * scale_y;

        CellMapping {
            scale_x,
            scale_y,
            offset_x: offset.0 as f32 + (available_x - used_x) / 2.0,
            offset_y: offset.1 as f32 + (available_y - used_y) / 2.0,
        }
    }

    fn plot(&mut self, x: i64, y: i64, character: char) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.char_buffer[y as usize * self.width + x as usize] = character;
        }
    }

    /// Bresenham line between two cell positions
    fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32), character: char) {
        if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
            return;
        }

        // Keep the slope: clip against a rectangle one cell beyond the grid
        let bounds = (-1.0, -1.0, self.width as f32 + 1.0, self.height as f32 + 1.0);
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };

        let (mut x0, mut y0) = (from.0.floor() as i64, from.1.floor() as i64);
        let (x1, y1) = (to.0.floor() as i64, to.1.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, character);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fill a polygon as a fan of triangles around its first vertex
    fn fill_polygon(&mut self, cells: &[(f32, f32)], character: char) {
        if cells.len() < 3 {
            return;
        }
        for i in 1..cells.len() - 1 {
            self.fill_triangle(cells[0], cells[i], cells[i + 1], character);
        }
    }

    fn fill_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), character: char) {
        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, character);
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            if y > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    EDGE_CHAR => Color::White,
                    FILL_CHAR => Color::DarkCyan,
                    _ => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Liang-Barsky clip of a segment to `(min_x, min_y, max_x, max_y)`
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    bounds: (f32, f32, f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-dx, from.0 - min_x),
        (dx, max_x - from.0),
        (-dy, from.1 - min_y),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            // Parallel to this edge and outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(renderer: &AsciiRenderer, character: char) -> usize {
        let mut n = 0;
        for y in 0..renderer.height() {
            for x in 0..renderer.width() {
                if renderer.cell(x, y) == Some(character) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_horizontal_line_through_center() {
        let mut renderer = AsciiRenderer::new(21, 21, 1.0);
        let mut panel = Panel::centered((21, 21));
        panel.draw_line(Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0));
        renderer.composite(&panel, (0, 0));

        assert_eq!(count(&renderer, EDGE_CHAR), 11);
        for x in 5..=15 {
            assert_eq!(renderer.cell(x, 10), Some(EDGE_CHAR));
        }
    }

    #[test]
    fn test_y_points_up() {
        let mut renderer = AsciiRenderer::new(21, 21, 1.0);
        let mut panel = Panel::centered((21, 21));
        panel.draw_line(Point2::new(0.0, 8.0), Point2::new(0.0, 8.0));
        renderer.composite(&panel, (0, 0));
        assert_eq!(renderer.cell(10, 2), Some(EDGE_CHAR));
    }

    #[test]
    fn test_polygon_is_filled_and_outlined() {
        let mut renderer = AsciiRenderer::new(20, 20, 1.0);
        let mut panel = Panel::new((20, 20), Point2::zeros(), Point2::new(1.0, 1.0));
        panel.draw_polygon(&[
            Point2::new(2.0, 2.0),
            Point2::new(17.0, 2.0),
            Point2::new(17.0, 17.0),
            Point2::new(2.0, 17.0),
        ]);
        renderer.composite(&panel, (0, 0));

        assert_eq!(renderer.cell(12, 6), Some(FILL_CHAR));
        assert_eq!(renderer.cell(2, 10), Some(EDGE_CHAR));
        assert_eq!(renderer.cell(0, 0), Some(' '));
    }

    #[test]
    fn test_later_commands_draw_on_top() {
        let mut renderer = AsciiRenderer::new(20, 20, 1.0);
        let mut panel = Panel::new((20, 20), Point2::zeros(), Point2::new(1.0, 1.0));
        panel.draw_line(Point2::new(0.0, 10.0), Point2::new(19.0, 10.0));
        panel.draw_polygon(&[
            Point2::new(5.0, 5.0),
            Point2::new(15.0, 5.0),
            Point2::new(15.0, 15.0),
            Point2::new(5.0, 15.0),
        ]);
        renderer.composite(&panel, (0, 0));
        assert_eq!(renderer.cell(12, 10), Some(FILL_CHAR));
        assert_eq!(renderer.cell(2, 10), Some(EDGE_CHAR));
    }

    #[test]
    fn test_huge_coordinates_are_clipped() {
        let mut renderer = AsciiRenderer::new(10, 10, 0.5);
        let mut panel = Panel::centered((10, 10));
        panel.draw_line(Point2::new(-1e9, 0.0), Point2::new(1e9, 0.0));
        renderer.composite(&panel, (0, 0));
        assert!(count(&renderer, EDGE_CHAR) > 0);
    }

    #[test]
    fn test_offscreen_line_keeps_slope() {
        let mut renderer = AsciiRenderer::new(20, 20, 1.0);
        let mut panel = Panel::new((20, 20), Point2::zeros(), Point2::new(1.0, 1.0));
        panel.draw_line(Point2::new(0.0, 0.0), Point2::new(1000.0, 100.0));
        renderer.composite(&panel, (0, 0));

        assert_eq!(renderer.cell(0, 0), Some(EDGE_CHAR));
        assert_eq!(renderer.cell(10, 1), Some(EDGE_CHAR));
        assert_eq!(renderer.cell(2, 0), Some(EDGE_CHAR));
        assert_eq!(renderer.cell(10, 10), Some(' '));
        // Shallow slope never climbs past row 2 inside the grid
        for y in 3..20 {
            for x in 0..20 {
                assert_eq!(renderer.cell(x, y), Some(' '), "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_line_missing_grid_draws_nothing() {
        let mut renderer = AsciiRenderer::new(10, 10, 1.0);
        let mut panel = Panel::new((10, 10), Point2::zeros(), Point2::new(1.0, 1.0));
        panel.draw_line(Point2::new(-500.0, -50.0), Point2::new(500.0, -40.0));
        renderer.composite(&panel, (0, 0));
        assert_eq!(count(&renderer, EDGE_CHAR), 0);
    }

    #[test]
    fn test_clip_segment() {
        let clipped = clip_segment((0.0, 0.0), (1000.0, 100.0), (-1.0, -1.0, 21.0, 21.0));
        let (start, end) = clipped.unwrap();
        assert_eq!(start, (0.0, 0.0));
        assert!((end.0 - 21.0).abs() < 1e-3);
        assert!((end.1 - 2.1).abs() < 1e-3);

        assert_eq!(clip_segment((-5.0, 30.0), (40.0, 30.0), (-1.0, -1.0, 21.0, 21.0)), None);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(4, 2, 0.5);
        let mut panel = Panel::new((4, 4), Point2::zeros(), Point2::new(1.0, 1.0));
        panel.draw_line(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0));
        renderer.composite(&panel, (0, 0));

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('#').count(), 4);
        assert!(text.contains("\r\n"));

        renderer.clear();
        assert_eq!(count(&renderer, EDGE_CHAR), 0);
    }
}
