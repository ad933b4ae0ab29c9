use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::handler::KeyAction;
use crate::game::Direction;
use crate::render::ScreenLayout;

/// Turns mouse (or touch-emulated mouse) gestures into key actions.
///
/// A press followed by a release somewhere else is a swipe; a release on
/// the press cell is a tap, which only counts on an on-screen button.
pub struct PointerTracker {
    start: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self { start: None }
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent, layout: &ScreenLayout) -> KeyAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                KeyAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some((start_col, start_row)) = self.start.take() else {
                    return KeyAction::None;
                };

                let dx = i32::from(event.column) - i32::from(start_col);
                // Rows are two pixels tall
                let dy = (i32::from(event.row) - i32::from(start_row)) * 2;

                match Direction::from_displacement(dx, dy) {
                    Some(direction) => KeyAction::Turn(direction),
                    None => layout
                        .button_at(event.column, event.row)
                        .map(KeyAction::from)
                        .unwrap_or(KeyAction::None),
                }
            }
            _ => KeyAction::None,
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn gesture(tracker: &mut PointerTracker, from: (u16, u16), to: (u16, u16)) -> KeyAction {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 40), 20, 20);
        let down = mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1);
        assert_eq!(tracker.handle_mouse_event(down, &layout), KeyAction::None);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1);
        tracker.handle_mouse_event(up, &layout)
    }

    #[test]
    fn test_horizontal_swipes() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            gesture(&mut tracker, (10, 10), (20, 11)),
            KeyAction::Turn(Direction::Right)
        );
        assert_eq!(
            gesture(&mut tracker, (20, 10), (10, 12)),
            KeyAction::Turn(Direction::Left)
        );
    }

    #[test]
    fn test_vertical_swipes() {
        let mut tracker = PointerTracker::new();
        // Four rows is eight pixels, more than six columns
        assert_eq!(
            gesture(&mut tracker, (10, 5), (16, 9)),
            KeyAction::Turn(Direction::Down)
        );
        assert_eq!(
            gesture(&mut tracker, (10, 9), (11, 5)),
            KeyAction::Turn(Direction::Up)
        );
    }

    #[test]
    fn test_zero_length_swipe_on_board_is_ignored() {
        let mut tracker = PointerTracker::new();
        assert_eq!(gesture(&mut tracker, (30, 10), (30, 10)), KeyAction::None);
    }

    #[test]
    fn test_tap_on_buttons() {
        let mut tracker = PointerTracker::new();
        // Buttons sit on rows 37..40, starting at column 20
        assert_eq!(
            gesture(&mut tracker, (22, 38), (22, 38)),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(gesture(&mut tracker, (54, 38), (54, 38)), KeyAction::Primary);
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = PointerTracker::new();
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 40), 20, 20);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 22, 38);
        assert_eq!(tracker.handle_mouse_event(up, &layout), KeyAction::None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut tracker = PointerTracker::new();
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 40), 20, 20);
        let right = mouse(MouseEventKind::Down(MouseButton::Right), 5, 5);
        assert_eq!(tracker.handle_mouse_event(right, &layout), KeyAction::None);
        let moved = mouse(MouseEventKind::Moved, 9, 9);
        assert_eq!(tracker.handle_mouse_event(moved, &layout), KeyAction::None);
    }
}
