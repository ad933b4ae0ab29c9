//! Screen geometry shared by the renderer and pointer input.
//!
//! The board is a pixel raster drawn with half-block characters: one
//! terminal column is one pixel wide and one row is two pixels tall.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Largest cell edge in pixels
pub const MAX_CELL_PX: u16 = 6;

const HEADER_HEIGHT: u16 = 1;
const HINTS_HEIGHT: u16 = 1;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 7;
const BUTTON_GAP: u16 = 1;

/// On-screen buttons, the pointer alternative to the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Left,
    Up,
    Down,
    Right,
    /// Same as the space bar
    Primary,
}

impl PadButton {
    pub const ALL: [PadButton; 5] = [
        PadButton::Left,
        PadButton::Up,
        PadButton::Down,
        PadButton::Right,
        PadButton::Primary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PadButton::Left => "◀",
            PadButton::Up => "▲",
            PadButton::Down => "▼",
            PadButton::Right => "▶",
            PadButton::Primary => "Space",
        }
    }
}

/// Where the board sits on screen and how large its cells are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardArea {
    /// Terminal cells covered by the raster
    pub rect: Rect,
    /// Edge length of one grid cell in pixels
    pub cell_px: u16,
    /// Raster size in pixels
    pub width_px: u16,
    pub height_px: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Space available to the board; the board itself is centred in it
    pub board_region: Rect,
    /// None when the terminal is too small for one pixel per cell
    pub board: Option<BoardArea>,
    pub hints: Rect,
    pub buttons: Vec<(PadButton, Rect)>,
}

impl ScreenLayout {
    /// Lay out the screen for a surface of `area` and a grid of the given size
    pub fn compute(area: Rect, grid_width: usize, grid_height: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(HINTS_HEIGHT),
                Constraint::Length(BUTTON_HEIGHT),
            ])
            .split(area);

        Self {
            header: chunks[0],
            board_region: chunks[1],
            board: fit_board(chunks[1], grid_width, grid_height),
            hints: chunks[2],
            buttons: pad_buttons(chunks[3]),
        }
    }

    /// The on-screen button under a terminal cell, if any
    pub fn button_at(&self, column: u16, row: u16) -> Option<PadButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(button, _)| *button)
    }
}

/// Largest whole-pixel cell size that fits the region, centred
fn fit_board(region: Rect, grid_width: usize, grid_height: usize) -> Option<BoardArea> {
    if grid_width == 0 || grid_height == 0 {
        return None;
    }

    let by_width = region.width as usize / grid_width;
    let by_height = region.height as usize * 2 / grid_height;
    let cell_px = by_width.min(by_height).min(MAX_CELL_PX as usize) as u16;
    if cell_px == 0 {
        return None;
    }

    let width_px = cell_px * grid_width as u16;
    let height_px = cell_px * grid_height as u16;
    let rows = height_px.div_ceil(2);

    let rect = Rect::new(
        region.x + (region.width - width_px) / 2,
        region.y + (region.height - rows) / 2,
        width_px,
        rows,
    );

    Some(BoardArea {
        rect,
        cell_px,
        width_px,
        height_px,
    })
}

/// A centred row of buttons; buttons that do not fit are dropped
fn pad_buttons(row: Rect) -> Vec<(PadButton, Rect)> {
    let count = PadButton::ALL.len() as u16;
    let total = count * BUTTON_WIDTH + (count - 1) * BUTTON_GAP;
    let start = row.x + row.width.saturating_sub(total) / 2;

    PadButton::ALL
        .iter()
        .enumerate()
        .filter_map(|(i, button)| {
            let x = start + i as u16 * (BUTTON_WIDTH + BUTTON_GAP);
            let rect = Rect::new(x, row.y, BUTTON_WIDTH, row.height.min(BUTTON_HEIGHT));
            (rect.right() <= row.right() && rect.height > 0).then_some((*button, rect))
        })
        .collect()
}
