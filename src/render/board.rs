use ratatui::{
    style::Color,
    widgets::canvas::{Painter, Shape},
};

use super::layout::BoardArea;
use super::palette::Palette;
use crate::game::{GameState, Position};

/// Cells smaller than this get no grid lines, they would cover everything
const GRID_LINE_MIN_CELL_PX: u16 = 3;

/// The board raster: background, grid lines, snake and food.
///
/// Coordinates are pixels from the top-left corner of the board; the canvas
/// bounds are set so that one pixel maps to exactly one half-block.
pub struct BoardShape<'a> {
    pub state: &'a GameState,
    pub area: BoardArea,
    pub palette: Palette,
    /// False on the title menu, where only the empty field is shown
    pub show_pieces: bool,
}

impl BoardShape<'_> {
    /// Canvas x bounds for this board
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.area.rect.width.max(2) - 1)]
    }

    /// Canvas y bounds; the raster always has two pixels per row
    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.area.rect.height.max(1) * 2 - 1)]
    }

    fn put(&self, painter: &mut Painter, px: u16, py: u16, color: Color) {
        let top = self.y_bounds()[1];
        if let Some((x, y)) = painter.get_point(f64::from(px), top - f64::from(py)) {
            painter.paint(x, y, color);
        }
    }

    fn fill_background(&self, painter: &mut Painter) {
        for py in 0..self.area.height_px {
            for px in 0..self.area.width_px {
                self.put(painter, px, py, self.palette.background);
            }
        }
    }

    fn draw_grid_lines(&self, painter: &mut Painter) {
        let cell = self.area.cell_px;
        if cell < GRID_LINE_MIN_CELL_PX {
            return;
        }

        for col in 0..=self.state.grid_width as u16 {
            let px = col * cell;
            for py in 0..self.area.height_px {
                self.put(painter, px, py, self.palette.grid);
            }
        }
        for row in 0..=self.state.grid_height as u16 {
            let py = row * cell;
            for px in 0..self.area.width_px {
                self.put(painter, px, py, self.palette.grid);
            }
        }
    }

    fn fill_cell(&self, painter: &mut Painter, pos: Position, color: Color) {
        let Some((left, top)) = self.cell_origin(pos) else {
            return;
        };
        let cell = self.area.cell_px;
        for py in top..top + cell {
            for px in left..left + cell {
                self.put(painter, px, py, color);
            }
        }
    }

    fn fill_circle(&self, painter: &mut Painter, pos: Position, color: Color) {
        let Some((left, top)) = self.cell_origin(pos) else {
            return;
        };
        let cell = self.area.cell_px;
        let radius = f64::from(cell) / 2.0;
        let (cx, cy) = (f64::from(left) + radius, f64::from(top) + radius);

        for py in top..top + cell {
            for px in left..left + cell {
                let dx = f64::from(px) + 0.5 - cx;
                let dy = f64::from(py) + 0.5 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.put(painter, px, py, color);
                }
            }
        }
    }

    /// Top-left pixel of a grid cell, None for cells off the grid
    fn cell_origin(&self, pos: Position) -> Option<(u16, u16)> {
        if !self.state.is_in_bounds(pos) {
            return None;
        }
        let cell = self.area.cell_px;
        Some((pos.x as u16 * cell, pos.y as u16 * cell))
    }
}

impl Shape for BoardShape<'_> {
    fn draw(&self, painter: &mut Painter) {
        self.fill_background(painter);
        self.draw_grid_lines(painter);

        if !self.show_pieces {
            return;
        }

        for segment in self.state.snake.body_segments() {
            self.fill_cell(painter, *segment, self.palette.snake_body);
        }
        self.fill_cell(painter, self.state.snake.head(), self.palette.snake_head);
        self.fill_circle(painter, self.state.food, self.palette.food);
    }
}
