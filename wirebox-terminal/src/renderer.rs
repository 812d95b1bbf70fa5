//! Character-cell canvas that the scene draws on
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point3;
use std::io::Write;
use wirebox_core::{Bounds, Ink, Surface, View};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;
const FRAME_CHAR: char = '.';
const MARKER_CHAR: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
enum Primitive {
    Line(Point3<f64>, Point3<f64>, Ink),
    Marker(Point3<f64>, Ink),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

fn ink_color(ink: Ink) -> Color {
    match ink {
        Ink::Edge => Color::Blue,
        Ink::Vertex => Color::Red,
        Ink::AxisX => Color::Red,
        Ink::AxisY => Color::Green,
        Ink::AxisZ => Color::Cyan,
    }
}

/// Pick a line glyph from the on-screen direction (rows grow downwards)
fn slope_char(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Retained display list plus its rasterised cells.
///
/// Row 0 holds the title, the remaining rows are the plot area. The list is
/// re-rasterised on every repaint request and on resize, with the current
/// bounds frame drawn underneath everything else.
pub struct Canvas {
    width: usize,
    height: usize,
    view: View,
    bounds: Option<Bounds>,
    title: String,
    primitives: Vec<Primitive>,
    cells: Vec<Cell>,
    repaint: bool,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            view: View::default(),
            bounds: None,
            title: String::new(),
            primitives: Vec::new(),
            cells: vec![BLANK; width * height],
            repaint: false,
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
        self.rasterize();
        self.repaint = true;
    }

    /// Returns and clears the pending repaint flag
    pub fn take_repaint(&mut self) -> bool {
        std::mem::replace(&mut self.repaint, false)
    }

    pub fn char_at(&self, col: usize, row: usize) -> char {
        self.cells[row * self.width + col].ch
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|cell| cell.ch)
            .collect()
    }

    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|cell| cell.ch == ch).count()
    }

    /// Map a world point to fractional `(col, row)` cell coordinates
    pub fn to_cell(&self, point: &Point3<f64>) -> Option<(f64, f64)> {
        let bounds = self.bounds?;
        if self.width < 2 || self.height < 3 {
            return None;
        }
        let cols = self.width as f64;
        let rows = (self.height - 1) as f64;

        let (half_u, half_v) = self.view.extent(&bounds);
        let (cu, cv, _) = self.view.project(&bounds.center());
        let (u, v, _) = self.view.project(point);

        let fit_rows = (rows - 1.0) / (2.0 * half_v);
        let fit_cols = (cols - 1.0) / (2.0 * half_u);
        let (sx, sy) = if bounds.equal_aspect {
            let sy = fit_rows.min(fit_cols / CELL_ASPECT);
            (sy * CELL_ASPECT, sy)
        } else {
            (fit_cols, fit_rows)
        };

        let col = (cols - 1.0) / 2.0 + (u - cu) * sx;
        let row = 1.0 + (rows - 1.0) / 2.0 - (v - cv) * sy;
        Some((col, row))
    }

    fn plot(&mut self, col: isize, row: isize, ch: char, color: Color) {
        // row 0 belongs to the title
        if col < 0 || row < 1 || col >= self.width as isize || row >= self.height as isize {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = Cell { ch, color };
    }

    /// Bresenham's line between two cell positions
    fn draw_segment(&mut self, from: (f64, f64), to: (f64, f64), ch: char, color: Color) {
        let (mut x0, mut y0, x1, y1) = (
            from.0.round() as isize,
            from.1.round() as isize,
            to.0.round() as isize,
            to.1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, ch, color);
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

    fn draw_line(&mut self, from: &Point3<f64>, to: &Point3<f64>, ch: Option<char>, color: Color) {
        if let (Some(a), Some(b)) = (self.to_cell(from), self.to_cell(to)) {
            let ch = ch.unwrap_or_else(|| slope_char(b.0 - a.0, b.1 - a.1));
            self.draw_segment(a, b, ch, color);
        }
    }

    fn draw_title(&mut self) {
        if self.height == 0 {
            return;
        }
        let len = self.title.chars().count();
        let start = self.width.saturating_sub(len) / 2;
        for (i, ch) in self.title.chars().take(self.width).enumerate() {
            self.cells[start + i] = Cell {
                ch,
                color: Color::White,
            };
        }
    }

    fn rasterize(&mut self) {
        self.cells = vec![BLANK; self.width * self.height];
        self.draw_title();

        if let Some(bounds) = self.bounds {
            let corners = bounds.corners();
            for (i, j) in wirebox_core::Wireframe::from_vertices(corners)
                .edges()
                .iter()
                .map(|edge| (edge.0, edge.1))
            {
                self.draw_line(&corners[i], &corners[j], Some(FRAME_CHAR), Color::DarkGrey);
            }
        }

        // lines first so markers stay visible on top
        let primitives = std::mem::take(&mut self.primitives);
        for primitive in &primitives {
            if let Primitive::Line(from, to, ink) = primitive {
                self.draw_line(from, to, None, ink_color(*ink));
            }
        }
        for primitive in &primitives {
            if let Primitive::Marker(at, ink) = primitive {
                if let Some((col, row)) = self.to_cell(at) {
                    self.plot(
                        col.round() as isize,
                        row.round() as isize,
                        MARKER_CHAR,
                        ink_color(*ink),
                    );
                }
            }
        }
        self.primitives = primitives;
    }

    /// Queue the whole canvas starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        for row in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + row as u16))?;
            let mut current = None;
            let mut run = String::new();
            for cell in &self.cells[row * self.width..(row + 1) * self.width] {
                if current != Some(cell.color) {
                    if !run.is_empty() {
                        writer.queue(Print(std::mem::take(&mut run)))?;
                    }
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                run.push(cell.ch);
            }
            writer.queue(Print(run))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.primitives.clear();
        self.bounds = None;
        self.title.clear();
    }

    fn line(&mut self, from: &Point3<f64>, to: &Point3<f64>, ink: Ink) {
        self.primitives.push(Primitive::Line(*from, *to, ink));
    }

    fn marker(&mut self, at: &Point3<f64>, ink: Ink) {
        self.primitives.push(Primitive::Marker(*at, ink));
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn request_repaint(&mut self) {
        self.rasterize();
        self.repaint = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebox_core::scene::TITLE;
    use wirebox_core::{Scene, TransformParams};

    fn drawn(params: TransformParams) -> Canvas {
        let mut canvas = Canvas::new(100, 40);
        Scene::default().redraw(params, &mut canvas);
        canvas
    }

    #[test]
    fn test_title_centered_on_first_row() {
        let canvas = drawn(TransformParams::default());
        let row = canvas.row_text(0);
        assert_eq!(row.trim(), TITLE);
        let start = row.find(TITLE).unwrap();
        assert_eq!(start, (100 - TITLE.len()) / 2);
    }

    #[test]
    fn test_redraw_requests_repaint() {
        let mut canvas = drawn(TransformParams::default());
        assert!(canvas.take_repaint());
        assert!(!canvas.take_repaint());
    }

    #[test]
    fn test_bounds_center_maps_to_plot_center() {
        let canvas = drawn(TransformParams::identity());
        let (col, row) = canvas.to_cell(&Point3::origin()).unwrap();
        assert!((col - 49.5).abs() < 1e-9);
        assert!((row - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_fit_inside_plot_area() {
        let canvas = drawn(TransformParams::identity());
        for corner in Scene::bounds().corners() {
            let (col, row) = canvas.to_cell(&corner).unwrap();
            assert!(col >= -1e-9 && col <= 99.0 + 1e-9, "col {col}");
            assert!(row >= 1.0 - 1e-9 && row <= 39.0 + 1e-9, "row {row}");
        }
    }

    #[test]
    fn test_markers_drawn_on_top() {
        let canvas = drawn(TransformParams::identity());
        for vertex in Scene::default().wireframe().centered() {
            let (col, row) = canvas.to_cell(&vertex).unwrap();
            assert_eq!(
                canvas.char_at(col.round() as usize, row.round() as usize),
                MARKER_CHAR
            );
        }
    }

    #[test]
    fn test_clear_forgets_bounds() {
        let mut canvas = drawn(TransformParams::default());
        canvas.clear();
        assert!(canvas.to_cell(&Point3::origin()).is_none());
        canvas.request_repaint();
        assert_eq!(canvas.count(MARKER_CHAR), 0);
        assert_eq!(canvas.count(FRAME_CHAR), 0);
        assert!(canvas.row_text(0).trim().is_empty());
    }

    #[test]
    fn test_resize_keeps_display_list() {
        let mut canvas = drawn(TransformParams::default());
        canvas.take_repaint();
        canvas.resize(60, 20);
        assert!(canvas.take_repaint());
        assert_eq!(canvas.width(), 60);
        assert!(canvas.count(MARKER_CHAR) > 0);
        assert_eq!(canvas.row_text(0).trim(), TITLE);
    }

    #[test]
    fn test_tiny_canvas_does_not_panic() {
        let mut canvas = Canvas::new(1, 1);
        Scene::default().redraw(TransformParams::default(), &mut canvas);
        assert_eq!(canvas.count(MARKER_CHAR), 0);
    }

    #[test]
    fn test_slope_chars() {
        assert_eq!(slope_char(10.0, 1.0), '-');
        assert_eq!(slope_char(1.0, 10.0), '|');
        assert_eq!(slope_char(3.0, 3.0), '\\');
        assert_eq!(slope_char(-3.0, 3.0), '/');
    }

    #[test]
    fn test_draw_emits_title() {
        let canvas = drawn(TransformParams::default());
        let mut out = Vec::new();
        canvas.draw(&mut out, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(TITLE));
    }
}
