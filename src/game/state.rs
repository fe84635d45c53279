use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A grid-aligned position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta(cell_size);
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction used by the most recent step
    pub direction: Direction,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Create a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least one segment");
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; the tail is dropped unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Where the game sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub score: u32,
    pub phase: GamePhase,
    pub tick_interval_ms: u64,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, tick_interval_ms: u64) -> Self {
        Self {
            snake,
            food,
            score: 0,
            phase: GamePhase::Idle,
            tick_interval_ms,
        }
    }

    /// True while a game is in progress, paused or not
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(200, 200);
        assert_eq!(pos.moved_by(20, 0), Position::new(220, 200));
        assert_eq!(
            pos.moved_in_direction(Direction::Up, 20),
            Position::new(200, 180)
        );
        assert_eq!(
            pos.moved_in_direction(Direction::Left, 20),
            Position::new(180, 200)
        );
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(200, 200), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(200, 200));
        assert!(snake.body_segments().is_empty());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_segments(
            vec![Position::new(2, 0), Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
        );

        snake.advance(Position::new(3, 0), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 0));
        assert!(!snake.occupies(Position::new(0, 0)));

        snake.advance(Position::new(4, 0), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body[3], Position::new(1, 0));
    }

    #[test]
    fn test_body_collision_excludes_head() {
        let snake = Snake::from_segments(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
        );
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_phase_flags() {
        let mut state = GameState::new(
            Snake::new(Position::new(0, 0), Direction::Right),
            Position::new(1, 1),
            150,
        );
        assert!(!state.is_running());

        state.phase = GamePhase::Paused;
        assert!(state.is_running());
        assert!(state.is_paused());

        state.phase = GamePhase::GameOver;
        assert!(!state.is_running());
        assert!(state.is_over());
    }
}
