//! Cell canvas the board is painted onto.
//!
//! The engine's positions are in canvas units (multiples of the cell size);
//! a [`CellBuffer`] maps them down to one character cell per grid cell.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::game::{GameConfig, GameState, Position};

pub const HEAD_COLOR: Color = Color::LightGreen;
pub const BODY_COLOR: Color = Color::Green;
pub const FOOD_COLOR: Color = Color::Red;
const GRID_COLOR: Color = Color::DarkGray;

/// Drawing primitives the board needs
pub trait Canvas {
    fn clear(&mut self);
    fn draw_cell(&mut self, position: Position, color: Color);
    fn draw_grid(&mut self);
}

/// Paint the whole board: snake (brighter head), food, then grid lines
pub fn draw_board<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, config: &GameConfig) {
    canvas.clear();

    for (index, segment) in state.snake.body.iter().enumerate() {
        let color = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
        canvas.draw_cell(*segment, color);
    }

    canvas.draw_cell(state.food, FOOD_COLOR);

    if config.show_grid {
        canvas.draw_grid();
    }
}

#[derive(Debug, Clone)]
pub struct CellBuffer {
    side: usize,
    cell_size: i32,
    cells: Vec<Option<Color>>,
    grid: bool,
}

impl CellBuffer {
    pub fn new(config: &GameConfig) -> Self {
        let side = config.cells_per_side().max(0) as usize;
        Self {
            side,
            cell_size: config.cell_size,
            cells: vec![None; side * side],
            grid: false,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn has_grid(&self) -> bool {
        self.grid
    }

    /// Colour painted at a board position, if any
    pub fn cell(&self, position: Position) -> Option<Color> {
        self.index(position).and_then(|i| self.cells[i])
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        let col = (position.x / self.cell_size) as usize;
        let row = (position.y / self.cell_size) as usize;
        (col < self.side && row < self.side).then_some(row * self.side + col)
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.side.max(1))
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(color) => Span::styled("■ ", Style::default().fg(*color)),
                        None if self.grid => {
                            Span::styled(". ", Style::default().fg(GRID_COLOR))
                        }
                        None => Span::raw("  "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Canvas for CellBuffer {
    fn clear(&mut self) {
        self.cells.fill(None);
        self.grid = false;
    }

    /// Positions off the board are ignored
    fn draw_cell(&mut self, position: Position, color: Color) {
        if let Some(index) = self.index(position) {
            self.cells[index] = Some(color);
        }
    }

    fn draw_grid(&mut self) {
        self.grid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Canvas for Recorder {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }

        fn draw_cell(&mut self, position: Position, color: Color) {
            self.calls
                .push(format!("cell {} {} {:?}", position.x, position.y, color));
        }

        fn draw_grid(&mut self) {
            self.calls.push("grid".into());
        }
    }

    fn sample_state() -> GameState {
        GameState::new(
            Snake::from_segments(
                vec![Position::new(40, 20), Position::new(20, 20)],
                Direction::Right,
            ),
            Position::new(0, 0),
            150,
        )
    }

    #[test]
    fn test_draw_order() {
        let mut recorder = Recorder::default();
        draw_board(&mut recorder, &sample_state(), &GameConfig::default());

        assert_eq!(
            recorder.calls,
            vec![
                "clear".to_string(),
                format!("cell 40 20 {:?}", HEAD_COLOR),
                format!("cell 20 20 {:?}", BODY_COLOR),
                format!("cell 0 0 {:?}", FOOD_COLOR),
                "grid".to_string(),
            ]
        );
    }

    #[test]
    fn test_grid_is_optional() {
        let mut config = GameConfig::default();
        config.show_grid = false;
        let mut recorder = Recorder::default();

        draw_board(&mut recorder, &sample_state(), &config);

        assert!(!recorder.calls.contains(&"grid".to_string()));
    }

    #[test]
    fn test_cell_buffer_maps_positions() {
        let config = GameConfig::default();
        let mut buffer = CellBuffer::new(&config);
        assert_eq!(buffer.side(), 20);

        draw_board(&mut buffer, &sample_state(), &config);

        assert_eq!(buffer.cell(Position::new(40, 20)), Some(HEAD_COLOR));
        assert_eq!(buffer.cell(Position::new(20, 20)), Some(BODY_COLOR));
        assert_eq!(buffer.cell(Position::new(0, 0)), Some(FOOD_COLOR));
        assert_eq!(buffer.cell(Position::new(60, 20)), None);
        assert!(buffer.has_grid());
    }

    #[test]
    fn test_off_board_cells_are_ignored() {
        let config = GameConfig::default();
        let mut buffer = CellBuffer::new(&config);

        buffer.draw_cell(Position::new(400, 0), HEAD_COLOR);
        buffer.draw_cell(Position::new(-20, 0), HEAD_COLOR);

        assert!(buffer.lines().iter().all(|line| line
            .spans
            .iter()
            .all(|span| span.content != "■ ")));
    }

    #[test]
    fn test_clear_resets_cells_and_grid() {
        let config = GameConfig::default();
        let mut buffer = CellBuffer::new(&config);
        draw_board(&mut buffer, &sample_state(), &config);

        buffer.clear();

        assert_eq!(buffer.cell(Position::new(40, 20)), None);
        assert!(!buffer.has_grid());
        assert_eq!(buffer.lines().len(), 20);
        assert_eq!(buffer.lines()[0].spans[0].content, "  ");
    }
}
