#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info};

/// The five pillar symbols. A puzzle of size N uses the first N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pillar {
    Savings,
    Income,
    Protection,
    Growth,
    Legacy,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Savings,
        Pillar::Income,
        Pillar::Protection,
        Pillar::Growth,
        Pillar::Legacy,
    ];

    /// Maps the 1-based digit keys to a symbol; out-of-range digits are
    /// rejected rather than wrapped.
    #[must_use]
    pub fn from_digit(digit: u8, size: usize) -> Option<Self> {
        let idx = digit.checked_sub(1)? as usize;
        if idx < size.min(Self::ALL.len()) {
            Some(Self::ALL[idx])
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Pillar::Savings => "Savings",
            Pillar::Income => "Income",
            Pillar::Protection => "Protection",
            Pillar::Growth => "Growth",
            Pillar::Legacy => "Legacy",
        }
    }

    /// Single-character board glyph.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Pillar::Savings => 'S',
            Pillar::Income => 'I',
            Pillar::Protection => 'P',
            Pillar::Growth => 'G',
            Pillar::Legacy => 'L',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleCell {
    pub value: Option<Pillar>,
    /// Revealed at generation time and locked against player edits.
    pub prefilled: bool,
}

/// A Latin-square placement puzzle: an N by N board where each of N symbols
/// must appear exactly once per row and per column. Roughly half the cells
/// are revealed from the solution at generation time.
#[derive(Resource, Debug, Clone)]
pub struct Puzzle {
    size: usize,
    cells: Vec<Vec<PuzzleCell>>,
    solution: Vec<Vec<Pillar>>,
}

impl Puzzle {
    /// Generate a solved Latin square and derive the playable board from it.
    ///
    /// The base square is built by cyclic shifts (`palette[(i + j) mod N]`),
    /// which is row- and column-unique by construction; independently
    /// shuffling the row order and the column order preserves that property
    /// while hiding the cyclic structure. Prefilled positions are the first
    /// `ceil(N^2 * prefill_ratio)` coordinates of a shuffled coordinate
    /// list.
    #[must_use]
    pub fn generate(size: usize, prefill_ratio: f64) -> Self {
        let n = size.clamp(2, Pillar::ALL.len());
        let palette = &Pillar::ALL[..n];

        let mut row_order: Vec<usize> = (0..n).collect();
        let mut col_order: Vec<usize> = (0..n).collect();
        fastrand::shuffle(&mut row_order);
        fastrand::shuffle(&mut col_order);

        let solution: Vec<Vec<Pillar>> = row_order
            .iter()
            .map(|&i| {
                col_order
                    .iter()
                    .map(|&j| palette[(i + j) % n])
                    .collect()
            })
            .collect();

        let mut coords: Vec<(usize, usize)> = (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .collect();
        fastrand::shuffle(&mut coords);

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let prefill_count = ((n * n) as f64 * prefill_ratio).ceil() as usize;

        let mut cells = vec![vec![PuzzleCell::default(); n]; n];
        for &(row, col) in coords.iter().take(prefill_count.min(coords.len())) {
            cells[row][col] = PuzzleCell {
                value: Some(solution[row][col]),
                prefilled: true,
            };
        }

        info!("Generated {n}x{n} pillar puzzle with {prefill_count} prefilled cells");
        Self {
            size: n,
            cells,
            solution,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> PuzzleCell {
        self.cells[row][col]
    }

    #[must_use]
    pub fn solution(&self) -> &[Vec<Pillar>] {
        &self.solution
    }

    /// Pre-drop feedback: true iff no *other* cell in `row` or `col`
    /// currently holds `value`. The target cell itself is excluded so that
    /// replacing a cell's own value never self-conflicts.
    #[must_use]
    pub fn is_drop_valid(&self, row: usize, col: usize, value: Pillar) -> bool {
        for c in 0..self.size {
            if c != col && self.cells[row][c].value == Some(value) {
                return false;
            }
        }
        for r in 0..self.size {
            if r != row && self.cells[r][col].value == Some(value) {
                return false;
            }
        }
        true
    }

    /// Every coordinate participating in any row or column duplicate
    /// currently on the board, for persistent conflict highlighting.
    /// Unlike `is_drop_valid`, nothing is excluded.
    #[must_use]
    pub fn conflict_cells(&self) -> Vec<(usize, usize)> {
        let mut conflicts = std::collections::BTreeSet::new();

        for row in 0..self.size {
            for a in 0..self.size {
                let Some(value) = self.cells[row][a].value else {
                    continue;
                };
                for b in (a + 1)..self.size {
                    if self.cells[row][b].value == Some(value) {
                        conflicts.insert((row, a));
                        conflicts.insert((row, b));
                    }
                }
            }
        }
        for col in 0..self.size {
            for a in 0..self.size {
                let Some(value) = self.cells[a][col].value else {
                    continue;
                };
                for b in (a + 1)..self.size {
                    if self.cells[b][col].value == Some(value) {
                        conflicts.insert((a, col));
                        conflicts.insert((b, col));
                    }
                }
            }
        }

        conflicts.into_iter().collect()
    }

    /// The win condition: every row and every column holds each symbol
    /// exactly once, with no empty cells.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let full = self
            .cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.value.is_some()));
        full && self.conflict_cells().is_empty()
    }

    /// Commit a placement. Prefilled cells are rejected; invalid values are
    /// accepted and left to show up as conflicts.
    pub fn place(&mut self, row: usize, col: usize, value: Pillar) -> bool {
        if self.cells[row][col].prefilled {
            debug!("Placement on prefilled cell ({row}, {col}) rejected");
            return false;
        }
        self.cells[row][col].value = Some(value);
        true
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        if self.cells[row][col].prefilled {
            return false;
        }
        self.cells[row][col].value = None;
        true
    }
}

/// Player cursor on the puzzle board.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PuzzleCursor {
    pub row: usize,
    pub col: usize,
}
