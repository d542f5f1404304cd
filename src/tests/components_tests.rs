#[cfg(test)]
mod tests {
    use crate::components::{Board, Cell, Piece, PieceColor, PieceKind, rotate_matrix};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::tests::test_utils::{fill_row_except, unit_piece};

    #[test]
    fn shapes_are_square_matrices() {
        for kind in [
            PieceKind::I,
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            let shape = kind.shape();
            for row in &shape {
                assert_eq!(row.len(), shape.len(), "{kind:?} bounding box not square");
            }
            assert_eq!(
                Piece::spawn(kind, BOARD_WIDTH).block_count(),
                4,
                "{kind:?} is not a tetromino"
            );
        }
    }

    #[test]
    fn rotating_four_times_is_identity() {
        for kind in [
            PieceKind::I,
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            let original = kind.shape();
            let mut shape = original.clone();
            for _ in 0..4 {
                shape = rotate_matrix(&shape);
            }
            assert_eq!(shape, original);
        }
    }

    #[test]
    fn rotation_is_clockwise() {
        // The J corner moves from top-left to top-right under one clockwise turn
        let rotated = rotate_matrix(&PieceKind::J.shape());
        assert_eq!(
            rotated,
            vec![vec![0, 1, 1], vec![0, 1, 0], vec![0, 1, 0]]
        );
    }

    #[test]
    fn collision_at_walls_and_floor() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let piece = unit_piece(0, 0);

        assert!(board.collides(&piece, -1, 0), "left wall");
        assert!(!board.collides(&piece, 1, 0));

        let right = unit_piece(BOARD_WIDTH as i32 - 1, 0);
        assert!(board.collides(&right, 1, 0), "right wall");

        let bottom = unit_piece(0, BOARD_HEIGHT as i32 - 1);
        assert!(board.collides(&bottom, 0, 1), "floor");
        assert!(!board.collides(&bottom, 0, 0));
    }

    #[test]
    fn collision_with_filled_cells() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.rows[5][3] = Cell {
            filled: true,
            color: Some(PieceColor::Red),
        };

        let piece = unit_piece(3, 4);
        assert!(board.collides(&piece, 0, 1), "occupied cell");
        assert!(!board.collides(&piece, 1, 1), "adjacent column is free");
    }

    #[test]
    fn cells_above_the_grid_never_collide() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        // Even with a full top row, a piece hovering above the grid is legal
        fill_row_except(&mut board, 0, &[]);

        let piece = unit_piece(4, -1);
        assert!(!board.collides(&piece, 0, 0));
        // Moving into row 0 collides
        assert!(board.collides(&piece, 0, 1));
    }

    #[test]
    fn spawn_is_partially_off_screen_and_centered() {
        let piece = Piece::spawn(PieceKind::O, BOARD_WIDTH);
        assert_eq!(piece.x, 4);
        assert_eq!(piece.y, -1);

        let piece = Piece::spawn(PieceKind::I, BOARD_WIDTH);
        assert_eq!(piece.x, 3);
    }

    #[test]
    fn merge_adds_exactly_the_occupied_cells() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.rows[10][0] = Cell {
            filled: true,
            color: Some(PieceColor::Green),
        };

        let mut piece = Piece::spawn(PieceKind::T, BOARD_WIDTH);
        piece.y = 5;
        let before = board.filled_count();
        board.merge(&piece);

        assert_eq!(board.filled_count(), before + piece.block_count());
        // Previously filled cells keep their color
        assert_eq!(board.rows[10][0].color, Some(PieceColor::Green));
    }

    #[test]
    fn merge_drops_cells_above_the_grid() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let piece = unit_piece(4, -1);
        board.merge(&piece);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn completed_lines_are_color_agnostic() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        fill_row_except(&mut board, 19, &[]);
        board.rows[19][0].color = Some(PieceColor::Purple);
        fill_row_except(&mut board, 7, &[2]);

        assert_eq!(board.completed_lines(), vec![19]);
    }

    #[test]
    fn remove_lines_preserves_dimensions_and_order() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        fill_row_except(&mut board, 18, &[]);
        fill_row_except(&mut board, 19, &[0]);
        board.rows[19][5].color = Some(PieceColor::Blue);

        board.remove_lines(&[18]);

        assert_eq!(board.rows.len(), BOARD_HEIGHT);
        assert!(board.rows.iter().all(|row| row.len() == BOARD_WIDTH));
        // New top row is empty
        assert!(board.rows[0].iter().all(|cell| !cell.filled));
        // The partial row shifted is still at the bottom with its colors
        assert!(!board.rows[19][0].filled);
        assert_eq!(board.rows[19][5].color, Some(PieceColor::Blue));
    }

    #[test]
    fn remove_multiple_lines_inserts_matching_empty_rows() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        fill_row_except(&mut board, 16, &[]);
        fill_row_except(&mut board, 17, &[3]);
        fill_row_except(&mut board, 18, &[]);
        fill_row_except(&mut board, 19, &[]);

        let completed = board.completed_lines();
        assert_eq!(completed, vec![16, 18, 19]);
        board.remove_lines(&completed);

        assert_eq!(board.rows.len(), BOARD_HEIGHT);
        for y in 0..3 {
            assert!(board.rows[y].iter().all(|cell| !cell.filled));
        }
        // The surviving partial row lands on the floor
        assert!(!board.rows[19][3].filled);
        assert!(board.rows[19][4].filled);
    }
}
