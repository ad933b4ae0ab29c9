use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GamePhase, GameState, StepResult};
use crate::input::{InputHandler, KeyAction, PointerTracker};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, ScreenLayout};

/// Redraw at roughly 30 frames per second, independent of the tick rate
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    pointer: PointerTracker,
    layout: ScreenLayout,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let mut engine = GameEngine::new(config)?;
        let state = engine.new_game();
        let layout = ScreenLayout::compute(Rect::default(), state.grid_width, state.grid_height);

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pointer: PointerTracker::new(),
            layout,
            tick_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let size = terminal.size().context("Failed to read terminal size")?;
        self.resize(size.width, size.height);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting with score {}", self.state.score);
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.pointer.handle_mouse_event(mouse, &self.layout),
            Event::Resize(width, height) => {
                self.resize(width, height);
                KeyAction::None
            }
            _ => KeyAction::None,
        };

        self.apply_action(action);
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.engine.set_direction(&mut self.state, direction);
            }
            KeyAction::Primary => match self.state.phase {
                GamePhase::GameOver => self.restart(),
                GamePhase::Menu => {
                    self.engine.press_primary(&mut self.state);
                    info!("Game started");
                    self.metrics.on_game_start();
                }
                GamePhase::Running | GamePhase::Paused => {
                    match self.engine.press_primary(&mut self.state) {
                        GamePhase::Paused => info!("Paused at score {}", self.state.score),
                        _ => info!("Resumed"),
                    }
                }
            },
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Start over from any phase. A game still in progress counts as
    /// finished with its current score.
    fn restart(&mut self) {
        let in_progress = matches!(self.state.phase, GamePhase::Running | GamePhase::Paused);
        if in_progress && self.state.steps > 0 {
            info!(
                "Abandoned after {} steps with score {}",
                self.state.steps, self.state.score
            );
            self.close_game();
        }

        self.engine.restart(&mut self.state);
        info!("Restarted");
        self.metrics.on_game_start();
    }

    fn close_game(&mut self) {
        if self.metrics.on_game_over(self.state.score) {
            info!("New high score {}", self.state.score);
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.advance(&mut self.state);
        if !result.advanced {
            return;
        }

        self.metrics.record_tick(self.tick_interval);

        if result.terminated {
            self.on_game_over(&result);
        }
    }

    fn on_game_over(&mut self, result: &StepResult) {
        let cause = match (result.info.collision_type, result.info.board_full) {
            (Some(collision), _) => format!("{:?}", collision),
            (None, true) => "board full".to_string(),
            (None, false) => "unknown".to_string(),
        };
        info!(
            "Game over after {} steps: score {}, cause {}",
            self.state.steps, self.state.score, cause
        );
        self.close_game();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::compute(
            Rect::new(0, 0, width, height),
            self.state.grid_width,
            self.state.grid_height,
        );
        match self.layout.board {
            Some(board) => info!(
                "Resized to {}x{}, {} px per cell",
                width, height, board.cell_px
            ),
            None => info!("Resized to {}x{}, too small for the board", width, height),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
