use ratatui::style::Color;

/// Opacity of the black veil drawn over the board when paused or game over
pub const OVERLAY_ALPHA: f32 = 0.5;

/// Board colours for one display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
}

impl Palette {
    pub const NORMAL: Palette = Palette {
        background: Color::Rgb(0xAA, 0xD7, 0x51),
        grid: Color::Rgb(0x96, 0xC1, 0x47),
        snake_head: Color::Rgb(0x35, 0x5A, 0x1E),
        snake_body: Color::Rgb(0x4A, 0x75, 0x2C),
        food: Color::Rgb(0xFF, 0x00, 0x00),
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: Color::Rgb(0xFF, 0xFF, 0xFF),
        grid: Color::Rgb(0x00, 0x00, 0x00),
        snake_head: Color::Rgb(0x00, 0x00, 0x00),
        snake_body: Color::Rgb(0x00, 0x00, 0x00),
        food: Color::Rgb(0x00, 0x00, 0x00),
    };

    pub fn for_mode(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::NORMAL
        }
    }

    /// The palette as seen through black at the given opacity
    pub fn dimmed(&self, alpha: f32) -> Self {
        Self {
            background: darken(self.background, alpha),
            grid: darken(self.grid, alpha),
            snake_head: darken(self.snake_head, alpha),
            snake_body: darken(self.snake_body, alpha),
            food: darken(self.food, alpha),
        }
    }
}

fn darken(color: Color, alpha: f32) -> Color {
    let keep = 1.0 - alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * keep).round() as u8,
            (g as f32 * keep).round() as u8,
            (b as f32 * keep).round() as u8,
        ),
        other => other,
    }
}
