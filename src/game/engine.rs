use super::{
    config::{BoundaryPolicy, GameConfig},
    direction::Direction,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use anyhow::{Context, Result, anyhow};
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Uniform draws tried before falling back to enumerating the free cells
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// The snake filled every cell, so no food could be placed
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the tick moved the game at all (false outside `Running`)
    pub advanced: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn skipped(terminated: bool) -> Self {
        Self {
            advanced: false,
            terminated,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                board_full: false,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration.
    /// Fails if the configuration does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, rng: StdRng) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid game config")?;
        Ok(Self { config, rng })
    }

    /// State shown at process start: the title menu, unless it is disabled
    pub fn new_game(&mut self) -> GameState {
        let mut state = self.reset();
        if self.config.show_menu {
            state.phase = GamePhase::Menu;
        }
        state
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let length = self.config.initial_snake_length;
        let head = Position::new(length as i32 + 2, (self.config.grid_height / 2) as i32);
        let snake = Snake::new(head, Direction::Right, length);

        // The config was validated on construction, so free cells remain.
        let food = self
            .spawn_food(&snake, self.config.grid_width, self.config.grid_height)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Leave the title menu. Returns false if the game was not on the menu.
    pub fn start(&self, state: &mut GameState) -> bool {
        if state.phase != GamePhase::Menu {
            return false;
        }
        state.phase = GamePhase::Running;
        true
    }

    /// Switch between `Running` and `Paused`. Other phases are left alone.
    pub fn toggle_pause(&self, state: &mut GameState) -> bool {
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Menu | GamePhase::GameOver => return false,
        };
        true
    }

    /// Throw the current game away and start a fresh one
    pub fn restart(&mut self, state: &mut GameState) {
        *state = self.reset();
    }

    /// The space-bar action: start from the menu, pause or resume while
    /// playing, restart after a game over. Returns the phase it leads to.
    pub fn press_primary(&mut self, state: &mut GameState) -> GamePhase {
        match state.phase {
            GamePhase::Menu => {
                self.start(state);
            }
            GamePhase::Running | GamePhase::Paused => {
                self.toggle_pause(state);
            }
            GamePhase::GameOver => self.restart(state),
        }
        state.phase
    }

    /// Stage a turn for the next tick.
    ///
    /// Rejected while not running, and when it would reverse either the
    /// staged direction or the last executed move.
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) -> bool {
        if !state.is_running() {
            return false;
        }

        let snake = &mut state.snake;
        if snake.direction.is_opposite(direction) || snake.last_moved.is_opposite(direction) {
            debug!(
                "Rejected turn {:?} (heading {:?}, last moved {:?})",
                direction, snake.direction, snake.last_moved
            );
            return false;
        }

        snake.direction = direction;
        true
    }

    /// Execute one tick of the game
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_running() {
            return StepResult::skipped(state.is_game_over());
        }

        let new_head = self.candidate_head(state);

        // Check for collisions
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.phase = GamePhase::GameOver;
            state.steps += 1;

            return StepResult {
                advanced: true,
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    board_full: false,
                },
            };
        }

        // Check if snake ate food
        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        let mut board_full = false;
        if ate_food {
            state.score += self.config.points_per_food;
            state.high_contrast = state.score >= self.config.high_contrast_threshold;

            match self.spawn_food(&state.snake, state.grid_width, state.grid_height) {
                Some(food) => state.food = food,
                None => {
                    board_full = true;
                    state.phase = GamePhase::GameOver;
                }
            }
        }

        StepResult {
            advanced: true,
            terminated: board_full,
            info: StepInfo {
                ate_food,
                collision_type: None,
                board_full,
            },
        }
    }

    /// Where the head lands next tick, after applying the boundary policy
    fn candidate_head(&self, state: &GameState) -> Position {
        let mut head = state.snake.head().moved_in_direction(state.snake.direction);

        if self.config.boundary == BoundaryPolicy::WrapHorizontal {
            head.x = head.x.rem_euclid(state.grid_width as i32);
        }

        head
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Top and bottom walls first, then the sides (only reachable when solid)
        if pos.y < 0 || pos.y >= state.grid_height as i32 {
            return Some(CollisionType::Wall);
        }
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail counts: it has not moved away yet
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell not covered by the snake, or None if the board is full
    fn spawn_food(&mut self, snake: &Snake, width: usize, height: usize) -> Option<Position> {
        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        debug!(
            "Food sampling missed {} times, enumerating free cells (snake length {})",
            FOOD_SAMPLE_ATTEMPTS,
            snake.len()
        );

        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
