use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, canvas::Canvas},
};

use super::board::BoardShape;
use super::layout::{BoardArea, PadButton, ScreenLayout};
use super::palette::{OVERLAY_ALPHA, Palette};
use crate::game::{GamePhase, GameState};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. Reads the state, writes only the frame buffer.
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let layout = ScreenLayout::compute(frame.area(), state.grid_width, state.grid_height);
        let palette = Palette::for_mode(state.high_contrast);

        // Render header with score line
        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, layout.header);

        match layout.board {
            Some(board) => {
                let board_palette = match state.phase {
                    GamePhase::Paused | GamePhase::GameOver => palette.dimmed(OVERLAY_ALPHA),
                    GamePhase::Menu | GamePhase::Running => palette,
                };
                self.render_board(frame, state, board, board_palette);
            }
            None => {
                let notice = self.render_too_small(state);
                frame.render_widget(notice, layout.board_region);
            }
        }

        // Phase overlays, centred on the board region
        match state.phase {
            GamePhase::Menu => self.render_popup(
                frame,
                layout.board_region,
                self.menu_lines(),
                Color::Green,
            ),
            GamePhase::Paused => self.render_popup(
                frame,
                layout.board_region,
                self.paused_lines(),
                Color::Yellow,
            ),
            GamePhase::GameOver => self.render_popup(
                frame,
                layout.board_region,
                self.game_over_lines(state),
                Color::Red,
            ),
            GamePhase::Running => {}
        }

        // Render footer with controls
        let controls = self.render_controls(state.phase);
        frame.render_widget(controls, layout.hints);

        for (button, rect) in &layout.buttons {
            frame.render_widget(self.render_button(*button), *rect);
        }
    }

    fn render_board(&self, frame: &mut Frame, state: &GameState, area: BoardArea, palette: Palette) {
        let shape = BoardShape {
            state,
            area,
            palette,
            show_pieces: state.phase != GamePhase::Menu,
        };

        let canvas = Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds(shape.x_bounds())
            .y_bounds(shape.y_bounds())
            .paint(|ctx| ctx.draw(&shape));

        frame.render_widget(canvas, area.rect);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if let Some(icon) = phase_icon(state.phase) {
            spans.push(Span::styled(
                format!("{}  ", icon),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.extend([
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_with(state.score).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn menu_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ]
    }

    fn paused_lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Paused",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ]
    }

    fn game_over_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]
    }

    /// A bordered box centred in `region`, sized to its text
    fn render_popup(&self, frame: &mut Frame, region: Rect, lines: Vec<Line<'static>>, border: Color) {
        let text_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
        let width = (text_width + 4).min(region.width);
        let height = (lines.len() as u16 + 2).min(region.height);
        let rect = Rect::new(
            region.x + (region.width - width) / 2,
            region.y + (region.height - height) / 2,
            width,
            height,
        );

        let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(popup, rect);
    }

    fn render_too_small(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "need at least {}x{} for the board",
                    state.grid_width,
                    state.grid_height.div_ceil(2)
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, phase: GamePhase) -> Paragraph<'_> {
        let action = match phase {
            GamePhase::Menu => " to start | ",
            GamePhase::Running => " to pause | ",
            GamePhase::Paused => " to resume | ",
            GamePhase::GameOver => " to restart | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or swipe to move | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(action),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_button(&self, button: PadButton) -> Paragraph<'_> {
        Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Play/pause marker for a game in progress: the bars while playing, the
/// triangle while paused
fn phase_icon(phase: GamePhase) -> Option<&'static str> {
    match phase {
        GamePhase::Running => Some("❚❚"),
        GamePhase::Paused => Some("▶"),
        GamePhase::Menu | GamePhase::GameOver => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn draw(state: &GameState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, &metrics))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text_of(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn uses_color(buffer: &Buffer, color: Color) -> bool {
        buffer
            .content()
            .iter()
            .any(|cell| cell.fg == color || cell.bg == color)
    }

    fn running_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(5, 10), Direction::Right, 3),
            Position::new(15, 4),
            20,
            20,
        )
    }

    #[test]
    fn test_running_board() {
        let buffer = draw(&running_state(), 80, 40);
        let text = text_of(&buffer);

        assert!(text.contains("Score: 0"));
        assert!(uses_color(&buffer, Palette::NORMAL.background));
        assert!(uses_color(&buffer, Palette::NORMAL.grid));
        assert!(uses_color(&buffer, Palette::NORMAL.snake_head));
        assert!(uses_color(&buffer, Palette::NORMAL.snake_body));
        assert!(uses_color(&buffer, Palette::NORMAL.food));
        assert!(!text.contains("Game Over"));
        assert!(!text.contains("Paused"));
    }

    #[test]
    fn test_high_contrast_palette() {
        let mut state = running_state();
        state.score = 100;
        state.high_contrast = true;

        let buffer = draw(&state, 80, 40);

        assert!(text_of(&buffer).contains("Score: 100"));
        assert!(uses_color(&buffer, Palette::HIGH_CONTRAST.background));
        assert!(!uses_color(&buffer, Palette::NORMAL.background));
        assert!(!uses_color(&buffer, Palette::NORMAL.food));
    }

    #[test]
    fn test_menu_hides_pieces() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        let state = engine.new_game();

        let buffer = draw(&state, 80, 40);
        let text = text_of(&buffer);

        assert!(text.contains("S N A K E"));
        assert!(text.contains("Press Space to start"));
        assert!(uses_color(&buffer, Palette::NORMAL.background));
        assert!(!uses_color(&buffer, Palette::NORMAL.snake_body));
        assert!(!uses_color(&buffer, Palette::NORMAL.food));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = running_state();
        state.score = 30;
        state.phase = GamePhase::GameOver;

        let buffer = draw(&state, 80, 40);
        let text = text_of(&buffer);

        assert!(text.contains("Game Over!"));
        assert!(text.contains("Score: 30"));
        assert!(text.contains("to restart"));
        let dimmed = Palette::NORMAL.dimmed(OVERLAY_ALPHA);
        assert!(uses_color(&buffer, dimmed.background));
        assert!(uses_color(&buffer, dimmed.food));
        assert!(!uses_color(&buffer, Palette::NORMAL.background));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = running_state();
        state.phase = GamePhase::Paused;

        let buffer = draw(&state, 80, 40);
        let text = text_of(&buffer);

        assert!(text.contains("Paused"));
        assert!(uses_color(&buffer, Palette::NORMAL.dimmed(OVERLAY_ALPHA).background));
        assert!(!uses_color(&buffer, Palette::NORMAL.background));
    }

    #[test]
    fn test_terminal_too_small() {
        let buffer = draw(&running_state(), 30, 12);
        let text = text_of(&buffer);

        assert!(text.contains("Terminal too small"));
        assert!(!uses_color(&buffer, Palette::NORMAL.background));
    }

    #[test]
    fn test_buttons_are_drawn() {
        let buffer = draw(&running_state(), 80, 40);
        let text = text_of(&buffer);

        assert!(text.contains("◀"));
        assert!(text.contains("▶"));
        assert!(text.contains("Space"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let state = running_state();
        assert_eq!(draw(&state, 80, 40), draw(&state, 80, 40));
    }

    fn header_of(buffer: &Buffer) -> String {
        text_of(buffer).lines().next().unwrap_or_default().to_string()
    }

    #[test]
    fn test_phase_icon_in_header() {
        let mut state = running_state();
        assert!(header_of(&draw(&state, 80, 40)).contains("❚❚  Score: 0"));

        state.phase = GamePhase::Paused;
        let header = header_of(&draw(&state, 80, 40));
        assert!(header.contains("▶  Score: 0"));
        assert!(!header.contains("❚❚"));

        state.phase = GamePhase::GameOver;
        let header = header_of(&draw(&state, 80, 40));
        assert!(!header.contains("❚❚"));
        assert!(!header.contains("▶"));
    }

    #[test]
    fn test_high_score_comes_from_metrics() {
        let mut state = running_state();
        state.score = 20;
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(50);

        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics))
            .unwrap();
        let header = header_of(terminal.backend().buffer());

        assert!(header.contains("Score: 20"));
        assert!(header.contains("High: 50"));
        assert!(header.contains("Games: 1"));
    }
}
