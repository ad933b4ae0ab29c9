//! Grid Snake - the classic snake game in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Board rendering onto a half-block pixel raster (render module)
//! - Keyboard, swipe and on-screen button input (input module)
//! - Session statistics (metrics module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
