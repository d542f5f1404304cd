#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod clock_tests;
pub mod components_tests;
pub mod config_tests;
pub mod puzzle_tests;

// Import test utilities
#[cfg(test)]
pub mod test_utils {
    use crate::components::{Board, Cell, Piece, PieceColor, PieceKind};
    use crate::config::GameConfig;
    use crate::engine::Engine;

    // Helper to build an engine with a deterministic first piece
    #[must_use]
    pub fn engine_with_next(kind: PieceKind) -> Engine {
        let mut engine = Engine::new(GameConfig::default());
        engine.next = kind;
        engine
    }

    // Fill a whole board row except the listed columns
    pub fn fill_row_except(board: &mut Board, row: usize, holes: &[usize]) {
        for col in 0..board.width {
            if !holes.contains(&col) {
                board.rows[row][col] = Cell {
                    filled: true,
                    color: Some(PieceColor::Cyan),
                };
            }
        }
    }

    // A 1x1 test piece, handy for dropping into a specific column
    #[must_use]
    pub fn unit_piece(x: i32, y: i32) -> Piece {
        Piece {
            kind: PieceKind::I,
            shape: vec![vec![1]],
            color: PieceColor::Cyan,
            x,
            y,
        }
    }
}
