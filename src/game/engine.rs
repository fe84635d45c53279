use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use super::{
    action::{Command, Direction},
    config::{ConfigError, GameConfig},
    event::GameEvent,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};

/// Points awarded per food item
pub const FOOD_SCORE: u32 = 10;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake actually moved this tick
    pub moved: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

impl StepResult {
    fn skipped() -> Self {
        Self {
            moved: false,
            ate_food: false,
            collision: None,
        }
    }
}

/// The game engine that owns the session state and handles all game logic
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    /// Direction accepted since the last step, applied on the next one
    queued_direction: Option<Direction>,
    timer_armed: bool,
    events: Vec<GameEvent>,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Validate `config`, then create an engine with a fresh game
    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a new engine and initialise a fresh game.
    ///
    /// `config` is assumed to have passed [`GameConfig::validate`]; food
    /// placement on a board with no cells panics. Use [`GameEngine::try_new`]
    /// for configs from outside the program.
    pub fn new(config: GameConfig) -> Self {
        let start = config.start_position;
        let state = GameState::new(
            Snake::new(start, Direction::Right),
            start,
            config.tick_interval_ms,
        );

        let mut engine = Self {
            config,
            state,
            queued_direction: None,
            timer_armed: false,
            events: Vec::new(),
            rng: rand::thread_rng(),
        };
        engine.init_game();
        engine
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    pub fn queued_direction(&self) -> Option<Direction> {
        self.queued_direction
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset snake, direction, score and phase; the tick interval is kept
    pub fn init_game(&mut self) {
        self.state.snake = Snake::new(self.config.start_position, Direction::Right);
        self.state.score = 0;
        self.state.phase = GamePhase::Idle;
        self.queued_direction = None;
        self.generate_food();

        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::SpeedChanged(self.state.tick_interval_ms));
        self.events.push(GameEvent::Redraw);
    }

    /// Place food on a random free cell.
    ///
    /// Rejection sampling has no iteration cap: on a board the snake almost
    /// fills this can spin for a long time, and on a full board it never
    /// returns.
    pub fn generate_food(&mut self) -> Position {
        let cells = self.config.cells_per_side();
        let cell = self.config.cell_size;

        let food = loop {
            let x = self.rng.gen_range(0..cells) * cell;
            let y = self.rng.gen_range(0..cells) * cell;
            let pos = Position::new(x, y);

            if !self.state.snake.occupies(pos) {
                break pos;
            }
        };

        debug!("food placed at ({}, {})", food.x, food.y);
        self.state.food = food;
        food
    }

    /// Advance the game by one tick
    pub fn step(&mut self) -> StepResult {
        if self.state.phase != GamePhase::Running {
            return StepResult::skipped();
        }

        if let Some(direction) = self.queued_direction.take() {
            self.state.snake.direction = direction;
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction, self.config.cell_size);
        let ate_food = new_head == self.state.food;

        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.state.score += FOOD_SCORE;
            self.events.push(GameEvent::ScoreChanged(self.state.score));
            self.generate_food();
        }

        let collision = self.check_collision();
        match collision {
            Some(kind) => {
                info!("collision ({:?}) at ({}, {})", kind, new_head.x, new_head.y);
                self.game_over();
            }
            None => self.events.push(GameEvent::Redraw),
        }

        StepResult {
            moved: true,
            ate_food,
            collision,
        }
    }

    /// Whether the current head is off the board or on the body
    pub fn check_collision(&self) -> Option<CollisionType> {
        let head = self.state.snake.head();
        let size = self.config.board_size;

        if head.x < 0 || head.x >= size || head.y < 0 || head.y >= size {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Queue a turn; requests along the current axis are ignored.
    ///
    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if requested.axis() == self.state.snake.direction.axis() {
            return false;
        }
        self.queued_direction = Some(requested);
        true
    }

    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Idle {
            return;
        }

        info!("game started at {}ms per tick", self.state.tick_interval_ms);
        self.state.phase = GamePhase::Running;
        self.arm_timer();
        self.events.push(GameEvent::Started);
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => {
                self.cancel_timer();
                self.state.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                info!("game paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                self.arm_timer();
                self.events.push(GameEvent::Resumed);
                info!("game resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Change the tick interval, restarting the timer when ticking.
    ///
    /// Returns the interval actually applied after clamping.
    pub fn set_speed(&mut self, ms: u64) -> u64 {
        let ms = self.config.clamp_interval(ms);
        self.state.tick_interval_ms = ms;
        self.events.push(GameEvent::SpeedChanged(ms));
        debug!("tick interval set to {}ms", ms);

        if self.state.phase == GamePhase::Running {
            self.arm_timer();
        }
        ms
    }

    pub fn restart(&mut self) {
        self.cancel_timer();
        self.events.push(GameEvent::OverlaysCleared);
        self.init_game();
        self.start();
    }

    pub fn apply_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
            Command::SetSpeed(ms) => {
                self.set_speed(ms);
            }
            Command::SetDirection(direction) => {
                if self.state.phase == GamePhase::Running {
                    self.set_direction(direction);
                }
            }
        }
    }

    fn game_over(&mut self) {
        self.cancel_timer();
        self.state.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.state.score,
        });
        info!("game over with score {}", self.state.score);
    }

    /// At most one timer exists: any previous one is cancelled first
    fn arm_timer(&mut self) {
        self.cancel_timer();
        self.timer_armed = true;
        self.events.push(GameEvent::TimerArmed(Duration::from_millis(
            self.state.tick_interval_ms,
        )));
    }

    fn cancel_timer(&mut self) {
        if self.timer_armed {
            self.timer_armed = false;
            self.events.push(GameEvent::TimerCancelled);
        }
    }
}
