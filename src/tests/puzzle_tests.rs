#[cfg(test)]
mod tests {
    use crate::game::{PUZZLE_PREFILL_RATIO, PUZZLE_SIZE};
    use crate::puzzle::{Pillar, Puzzle};

    fn empty_puzzle() -> Puzzle {
        // A zero prefill ratio yields an all-empty, fully editable board
        Puzzle::generate(PUZZLE_SIZE, 0.0)
    }

    #[test]
    fn generated_solutions_are_latin_squares() {
        for _ in 0..20 {
            let puzzle = Puzzle::generate(PUZZLE_SIZE, PUZZLE_PREFILL_RATIO);
            let solution = puzzle.solution();
            let n = puzzle.size();

            for row in solution {
                let mut seen: Vec<Pillar> = row.clone();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), n, "row has duplicates");
            }
            for col in 0..n {
                let mut seen: Vec<Pillar> = solution.iter().map(|row| row[col]).collect();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), n, "column has duplicates");
            }
        }
    }

    #[test]
    fn prefilled_cells_match_the_solution() {
        let puzzle = Puzzle::generate(PUZZLE_SIZE, PUZZLE_PREFILL_RATIO);
        let n = puzzle.size();
        let mut prefilled = 0;

        for row in 0..n {
            for col in 0..n {
                let cell = puzzle.cell(row, col);
                if cell.prefilled {
                    prefilled += 1;
                    assert_eq!(cell.value, Some(puzzle.solution()[row][col]));
                } else {
                    assert_eq!(cell.value, None, "non-prefilled cells start empty");
                }
            }
        }
        // ceil(25 * 0.5)
        assert_eq!(prefilled, 13);
    }

    #[test]
    fn prefilled_cells_are_locked() {
        let mut puzzle = Puzzle::generate(PUZZLE_SIZE, 1.0);
        let value = puzzle.cell(0, 0).value.unwrap();

        assert!(!puzzle.place(0, 0, Pillar::Legacy));
        assert!(!puzzle.clear_cell(0, 0));
        assert_eq!(puzzle.cell(0, 0).value, Some(value));
    }

    #[test]
    fn drop_validity_checks_row_and_column() {
        let mut puzzle = empty_puzzle();
        assert!(puzzle.place(0, 2, Pillar::Savings));

        // Same row, same column, and a clear spot
        assert!(!puzzle.is_drop_valid(0, 4, Pillar::Savings));
        assert!(!puzzle.is_drop_valid(3, 2, Pillar::Savings));
        assert!(puzzle.is_drop_valid(3, 4, Pillar::Savings));

        // A different symbol is unaffected
        assert!(puzzle.is_drop_valid(0, 4, Pillar::Income));
    }

    #[test]
    fn drop_validity_excludes_the_target_cell() {
        let mut puzzle = empty_puzzle();
        puzzle.place(2, 2, Pillar::Growth);

        // Re-placing the same value over its own cell does not self-conflict
        assert!(puzzle.is_drop_valid(2, 2, Pillar::Growth));
    }

    #[test]
    fn conflict_cells_reports_every_participant() {
        let mut puzzle = empty_puzzle();
        assert!(puzzle.conflict_cells().is_empty());

        puzzle.place(1, 0, Pillar::Income);
        puzzle.place(1, 3, Pillar::Income);
        puzzle.place(4, 3, Pillar::Income);

        let conflicts = puzzle.conflict_cells();
        // Row duplicate at (1,0)/(1,3) and column duplicate at (1,3)/(4,3)
        assert_eq!(conflicts, vec![(1, 0), (1, 3), (4, 3)]);

        puzzle.clear_cell(1, 3);
        assert!(puzzle.conflict_cells().is_empty());
    }

    #[test]
    fn completion_requires_full_and_conflict_free() {
        let mut puzzle = empty_puzzle();
        assert!(!puzzle.is_complete(), "empty board is not complete");

        // Copy the solution onto the board
        let solution: Vec<Vec<Pillar>> = puzzle.solution().to_vec();
        for (row, values) in solution.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                assert!(puzzle.place(row, col, value));
            }
        }
        assert!(puzzle.conflict_cells().is_empty());
        assert!(puzzle.is_complete());

        // A single hole breaks completion without creating conflicts
        puzzle.clear_cell(0, 0);
        assert!(!puzzle.is_complete());
        assert!(puzzle.conflict_cells().is_empty());

        // A duplicate breaks completion even with a full board
        let other = solution[0][1];
        puzzle.place(0, 0, other);
        assert!(!puzzle.is_complete());
        assert!(!puzzle.conflict_cells().is_empty());
    }

    #[test]
    fn digits_map_to_the_palette() {
        assert_eq!(Pillar::from_digit(1, 5), Some(Pillar::Savings));
        assert_eq!(Pillar::from_digit(5, 5), Some(Pillar::Legacy));
        assert_eq!(Pillar::from_digit(0, 5), None);
        assert_eq!(Pillar::from_digit(6, 5), None);
        assert_eq!(Pillar::from_digit(4, 3), None, "outside a smaller palette");
    }

    #[test]
    fn generation_clamps_the_size_to_the_palette() {
        let puzzle = Puzzle::generate(9, 0.5);
        assert_eq!(puzzle.size(), Pillar::ALL.len());
    }
}
