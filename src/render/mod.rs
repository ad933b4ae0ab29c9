//! Terminal rendering of the game state.

pub mod board;
pub mod layout;
pub mod palette;
pub mod renderer;

pub use layout::{BoardArea, PadButton, ScreenLayout};
pub use palette::Palette;
pub use renderer::Renderer;
