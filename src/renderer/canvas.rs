//! Character-cell canvas
//!
//! A frame is composed in memory first and then written to the terminal one
//! row at a time, switching colour only where it changes.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize, discarding the contents
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set one cell; off-canvas writes are ignored
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, fg };
        }
    }

    /// Set the cell containing a screen-space point
    pub fn put_at(&mut self, screen: Vec2, ch: char, fg: Color) {
        self.put(screen.x.floor() as i32, screen.y.floor() as i32, ch, fg);
    }

    /// Write a string left to right starting at `(x, y)`
    pub fn text(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, fg);
        }
    }

    /// Write a string centred on row `y`
    pub fn text_centered(&mut self, y: i32, text: &str, fg: Color) {
        let len = text.chars().count() as i32;
        self.text((i32::from(self.width) - len) / 2, y, text, fg);
    }

    /// Fill an ellipse given in screen space (`radii` per axis)
    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, ch: char, fg: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let min = (center - radii).floor();
        let max = (center + radii).ceil();
        for y in min.y as i32..=max.y as i32 {
            for x in min.x as i32..=max.x as i32 {
                let cell_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if ((cell_center - center) / radii).length_squared() <= 1.0 {
                    self.put(x, y, ch, fg);
                }
            }
        }
    }

    /// Queue the whole canvas to `out`
    pub fn emit<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        out.queue(style::SetForegroundColor(current))?;

        for (row, cells) in self.cells.chunks(usize::from(self.width.max(1))).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            let mut run = String::with_capacity(cells.len());
            for cell in cells {
                if cell.fg != current {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    current = cell.fg;
                    out.queue(style::SetForegroundColor(current))?;
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
            }
        }

        out.queue(style::ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_canvas_writes_are_ignored() {
        let mut canvas = Canvas::new(4, 2);
        canvas.put(-1, 0, 'x', Color::Red);
        canvas.put(4, 1, 'x', Color::Red);
        canvas.put(1, 2, 'x', Color::Red);
        assert!(canvas.cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn text_is_clipped() {
        let mut canvas = Canvas::new(5, 1);
        canvas.text(3, 0, "abc", Color::White);
        assert_eq!(canvas.get(3, 0).unwrap().ch, 'a');
        assert_eq!(canvas.get(4, 0).unwrap().ch, 'b');
    }

    #[test]
    fn centred_text() {
        let mut canvas = Canvas::new(10, 1);
        canvas.text_centered(0, "WAVE", Color::Yellow);
        assert_eq!(canvas.get(3, 0).unwrap().ch, 'W');
    }

    #[test]
    fn ellipse_covers_center() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_ellipse(Vec2::new(5.0, 5.0), Vec2::new(2.0, 1.0), '#', Color::Green);
        assert_eq!(canvas.get(5, 5).unwrap().ch, '#');
        assert_eq!(canvas.get(4, 4).unwrap().ch, '#');
        assert_eq!(canvas.get(5, 2).unwrap().ch, ' ');
        assert_eq!(canvas.get(8, 5).unwrap().ch, ' ');
    }

    #[test]
    fn emit_writes_every_row() {
        let mut canvas = Canvas::new(3, 2);
        canvas.text(0, 1, "hi", Color::Cyan);
        let mut out = Vec::new();
        canvas.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hi"));
    }
}
