#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap,
    // Allow more than 3 bools in structs for input handling where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;

/// Render palette identifier for a piece. Resolved to a concrete terminal
/// color only at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    #[must_use]
    pub fn random() -> Self {
        match fastrand::u8(0..7) {
            0 => PieceKind::I,
            1 => PieceKind::J,
            2 => PieceKind::L,
            3 => PieceKind::O,
            4 => PieceKind::S,
            5 => PieceKind::T,
            _ => PieceKind::Z,
        }
    }

    /// Bounding-box matrix of the shape. Matrices are square so rotation is
    /// a transpose plus row reversal with no re-centering.
    #[must_use]
    pub fn shape(self) -> Vec<Vec<u8>> {
        match self {
            PieceKind::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            PieceKind::J => vec![vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::L => vec![vec![0, 0, 1], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::O => vec![vec![1, 1], vec![1, 1]],
            PieceKind::S => vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 0, 0]],
            PieceKind::T => vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]],
            PieceKind::Z => vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 0]],
        }
    }

    #[must_use]
    pub fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::J => PieceColor::Blue,
            PieceKind::L => PieceColor::Orange,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::S => PieceColor::Green,
            PieceKind::T => PieceColor::Purple,
            PieceKind::Z => PieceColor::Red,
        }
    }
}

/// Rotate a square 0/1 matrix 90 degrees clockwise: transpose, then reverse
/// each row. Four applications return the original matrix.
#[must_use]
pub fn rotate_matrix(shape: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let n = shape.len();
    let mut rotated = vec![vec![0u8; n]; n];
    for (y, row) in shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            rotated[x][n - 1 - y] = cell;
        }
    }
    rotated
}

/// A live falling piece: shape matrix plus the top-left offset of its
/// bounding box in grid coordinates. `y` may be negative while the piece is
/// still partially above the visible grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Vec<Vec<u8>>,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// A fresh piece at the top-center spawn position, one row above the
    /// visible grid.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width as i32 - shape.len() as i32) / 2;
        Self {
            kind,
            shape,
            color: kind.color(),
            x,
            y: -1,
        }
    }

    /// Count of occupied cells in the shape matrix.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.shape
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == 1)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub filled: bool,
    pub color: Option<PieceColor>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        filled: false,
        color: None,
    };
}

/// The settled playfield, `height` rows by `width` columns, row-major.
/// Dimensions never change after creation.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![Cell::EMPTY; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::EMPTY);
        }
    }

    /// The single source of truth for placement legality. True if any
    /// occupied cell of `piece`, after translating by `(dx, dy)`, leaves the
    /// grid horizontally, passes the bottom, or lands on a filled cell.
    /// Cells that end up above the grid top (`y < 0`) are legal and are
    /// never checked against board contents.
    #[must_use]
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        for (row_off, row) in piece.shape.iter().enumerate() {
            for (col_off, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let x = piece.x + col_off as i32 + dx;
                let y = piece.y + row_off as i32 + dy;

                if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                    return true;
                }
                if y >= 0 && self.rows[y as usize][x as usize].filled {
                    return true;
                }
            }
        }
        false
    }

    /// Lock: write every occupied cell of `piece` into the board with the
    /// piece's color. Cells still above the grid top are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (row_off, row) in piece.shape.iter().enumerate() {
            for (col_off, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let x = piece.x + col_off as i32;
                let y = piece.y + row_off as i32;

                if y >= 0 && y < self.height as i32 && x >= 0 && x < self.width as i32 {
                    self.rows[y as usize][x as usize] = Cell {
                        filled: true,
                        color: Some(piece.color),
                    };
                }
            }
        }
    }

    /// Indices of fully-filled rows, top to bottom. Detection only; removal
    /// is a separate call so the caller can insert a visual delay between
    /// the two.
    #[must_use]
    pub fn completed_lines(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|cell| cell.filled))
            .map(|(y, _)| y)
            .collect()
    }

    /// Remove exactly the given rows, shift the remaining rows down, and
    /// prepend the same number of empty rows at the top. Dimensions and the
    /// relative order of surviving rows are preserved.
    pub fn remove_lines(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let mut kept: Vec<Vec<Cell>> = self
            .rows
            .drain(..)
            .enumerate()
            .filter(|(y, _)| !indices.contains(y))
            .map(|(_, row)| row)
            .collect();

        let mut rows = vec![vec![Cell::EMPTY; self.width]; self.height - kept.len()];
        rows.append(&mut kept);
        self.rows = rows;
    }

    /// Number of filled cells on the board.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.filled)
            .count()
    }
}

// Input state for the falling-block game, set by the key handler and
// drained by the input system once per game tick
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
    pub pause: bool,
}

// Input state for the pillar puzzle
#[derive(Resource, Debug, Clone, Default)]
pub struct PuzzleInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub place: Option<u8>,
    pub erase: bool,
}
