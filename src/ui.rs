#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::components::{Piece, PieceColor};
use crate::engine::{Countdown, Engine, GameStatus};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::menu::{MenuOption, MenuState};
use crate::puzzle::{Pillar, Puzzle, PuzzleCursor};
use crate::systems::MilestoneBanner;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Palette lookup, resolved only here at the rendering boundary. Game logic
/// never carries terminal colors.
fn piece_color(color: PieceColor) -> Color {
    match color {
        PieceColor::Cyan => Color::Cyan,
        PieceColor::Blue => Color::Blue,
        PieceColor::Orange => Color::LightYellow,
        PieceColor::Yellow => Color::Yellow,
        PieceColor::Green => Color::Green,
        PieceColor::Purple => Color::Magenta,
        PieceColor::Red => Color::Red,
    }
}

fn pillar_color(pillar: Pillar) -> Color {
    match pillar {
        Pillar::Savings => Color::Yellow,
        Pillar::Income => Color::Green,
        Pillar::Protection => Color::Blue,
        Pillar::Growth => Color::Cyan,
        Pillar::Legacy => Color::Magenta,
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    match app.menu.state {
        MenuState::MainMenu => render_menu(f, app),
        MenuState::Blocks => render_blocks(f, app),
        MenuState::Puzzle => render_puzzle(f, app),
    }
}

fn render_menu(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 40, f.area());

    let mut lines = vec![
        Line::from("PILLARBLOCKS").bold().centered(),
        Line::from(""),
    ];
    for option in MenuOption::ALL {
        let label = option.label();
        let line = if option == app.menu.selected {
            Line::from(format!("> {label} <"))
                .style(Style::default().fg(Color::Yellow))
                .centered()
        } else {
            Line::from(label).centered()
        };
        lines.push(line);
    }
    lines.push(Line::from(""));
    lines.push(
        Line::from("↑/↓ select   Enter confirm   q quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
    );

    let menu = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(menu, area);
}

fn render_blocks(f: &mut Frame, app: &mut App) {
    let cell_width = 2; // Each cell is 2 characters wide
    let board_width = BOARD_WIDTH as u16 * cell_width + 2; // +2 for borders
    let board_height = BOARD_HEIGHT as u16 + 2;
    let min_info_width = 22u16;

    // Check if the terminal is too small to render the game properly
    if f.area().width < board_width + min_info_width || f.area().height < board_height + 3 {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Falling Blocks"),
        );
        f.render_widget(warning, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("FALLING BLOCKS")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_info_panel(f, app, main_layout[1]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let cell_width = 2u16;
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let engine = app.world.resource::<Engine>();
    let ghost = engine.ghost();

    // Settled cells
    for (y, row) in engine.board.rows.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if !cell.filled {
                continue;
            }
            let color = cell.color.map_or(Color::White, piece_color);
            let bursting = engine.bursting.contains(&y);
            let (symbol, color) = if bursting {
                ("▓", Color::White)
            } else {
                ("█", color)
            };
            draw_board_cell(f, inner_area, x as u16, y as u16, cell_width, symbol, color);
        }
    }

    // Ghost projection under the active piece
    if let Some(ghost) = &ghost {
        draw_piece(f, inner_area, ghost, cell_width, "░", Color::DarkGray);
    }

    // Active piece on top
    if let Some(piece) = &engine.active {
        let color = piece_color(piece.color);
        draw_piece(f, inner_area, piece, cell_width, "█", color);
    }

    // Status overlays
    let overlay = match engine.status {
        GameStatus::Paused => Some(("PAUSED", Color::Yellow)),
        GameStatus::Lost => Some(("GAME OVER", Color::Red)),
        GameStatus::Won => Some(("TIME'S UP - YOU MADE IT", Color::Green)),
        _ => None,
    };
    if let Some((text, color)) = overlay {
        let width = text.len() as u16;
        let overlay_area = Rect {
            x: inner_area.x + inner_area.width.saturating_sub(width) / 2,
            y: inner_area.y + inner_area.height / 2,
            width: width.min(inner_area.width),
            height: 1,
        };
        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(widget, overlay_area);
    }
}

fn draw_piece(f: &mut Frame, area: Rect, piece: &Piece, cell_width: u16, symbol: &str, color: Color) {
    for (row_off, row) in piece.shape.iter().enumerate() {
        for (col_off, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let x = piece.x + col_off as i32;
            let y = piece.y + row_off as i32;
            // Rows above the grid top are simply not drawn
            if y < 0 || y >= BOARD_HEIGHT as i32 || x < 0 || x >= BOARD_WIDTH as i32 {
                continue;
            }
            draw_board_cell(f, area, x as u16, y as u16, cell_width, symbol, color);
        }
    }
}

fn draw_board_cell(
    f: &mut Frame,
    area: Rect,
    x: u16,
    y: u16,
    cell_width: u16,
    symbol: &str,
    color: Color,
) {
    let block_x = area.left() + x * cell_width;
    let block_y = area.top() + y;
    if block_x + 1 >= area.right() || block_y >= area.bottom() {
        return;
    }
    // Each cell is two characters wide for better proportions
    for dx in 0..2 {
        if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn render_info_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Stats
            Constraint::Length(6), // Next piece
            Constraint::Length(3), // Milestone banner
            Constraint::Min(6),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let engine = app.world.resource::<Engine>();
    let countdown = app.world.resource::<Countdown>();

    let stats = format!(
        "Score: {}\nLines: {}\nSpeed: {} ms\nTime:  {}s",
        engine.score, engine.lines_cleared, engine.speed_ms, countdown.remaining,
    );
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    render_next_preview(f, app, info_layout[2]);

    let banner = app.world.resource::<MilestoneBanner>();
    if let Some(lines) = banner.current() {
        let bonus = crate::config::CONFIG.read().unwrap().game.line_clear_bonus_seconds;
        let text = if lines == 1 {
            format!("Line cleared! +{bonus}s")
        } else {
            format!("{lines} lines cleared! +{bonus}s")
        };
        let widget = Paragraph::new(text)
            .style(Style::default().fg(Color::LightGreen))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, info_layout[3]);
    }

    let engine = app.world.resource::<Engine>();
    let controls = if matches!(engine.status, GameStatus::Lost | GameStatus::Won) {
        "Enter: Play again\nq: Back to menu\n"
    } else {
        "←/→: Move\n↓: Soft drop\n↑/Space: Rotate\np: Pause\nq: Back to menu\n"
    };
    let controls_widget = Paragraph::new(controls)
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(controls_widget, info_layout[4]);
}

fn render_next_preview(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let engine = app.world.resource::<Engine>();
    let shape = engine.next.shape();
    let color = piece_color(engine.next.color());

    for (y, row) in shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let px = inner.left() + (x as u16) * 2;
            let py = inner.top() + y as u16;
            if px + 1 >= inner.right() || py >= inner.bottom() {
                continue;
            }
            for dx in 0..2 {
                if let Some(buf_cell) = f.buffer_mut().cell_mut((px + dx, py)) {
                    buf_cell.set_symbol("█");
                    buf_cell.set_fg(color);
                }
            }
        }
    }
}

fn render_puzzle(f: &mut Frame, app: &mut App) {
    let puzzle = app.world.resource::<Puzzle>();
    let cursor = *app.world.resource::<PuzzleCursor>();
    let size = puzzle.size();

    let cell_width = 4u16;
    let board_width = size as u16 * cell_width + 2;
    let board_height = size as u16 * 2 + 1 + 2;

    if f.area().width < board_width + 28 || f.area().height < board_height + 4 {
        let warning = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Pillar Puzzle"));
        f.render_widget(warning, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width + 2), Constraint::Min(26)])
        .split(f.area());

    let board_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(board_height),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("PILLAR PUZZLE")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, board_layout[0]);

    let board_block = Block::default().borders(Borders::ALL);
    let inner = board_block.inner(board_layout[1]);
    f.render_widget(board_block, board_layout[1]);

    let conflicts = puzzle.conflict_cells();
    let solved = puzzle.is_complete();

    for row in 0..size {
        for col in 0..size {
            let cell = puzzle.cell(row, col);
            let x = inner.left() + col as u16 * cell_width;
            let y = inner.top() + row as u16 * 2;
            if x >= inner.right() || y >= inner.bottom() {
                continue;
            }

            let (text, mut style) = match cell.value {
                Some(pillar) => (
                    format!(" {} ", pillar.glyph()),
                    Style::default().fg(pillar_color(pillar)),
                ),
                None => (" · ".to_string(), Style::default().fg(Color::DarkGray)),
            };
            if cell.prefilled {
                style = style.add_modifier(Modifier::BOLD);
            }
            if conflicts.contains(&(row, col)) {
                style = style.fg(Color::Red).add_modifier(Modifier::UNDERLINED);
            }
            if row == cursor.row && col == cursor.col {
                style = style.add_modifier(Modifier::REVERSED);
            }

            let widget = Paragraph::new(text).style(style);
            let cell_area = Rect {
                x,
                y,
                width: 3.min(inner.right().saturating_sub(x)),
                height: 1,
            };
            f.render_widget(widget, cell_area);
        }
    }

    if solved {
        let widget = Paragraph::new("SOLVED!")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        let overlay = Rect {
            x: inner.x,
            y: inner.bottom().saturating_sub(1),
            width: inner.width,
            height: 1,
        };
        f.render_widget(widget, overlay);
    }

    render_puzzle_legend(f, app, main_layout[1], solved);
}

fn render_puzzle_legend(f: &mut Frame, app: &mut App, area: Rect, solved: bool) {
    let puzzle = app.world.resource::<Puzzle>();
    let size = puzzle.size();

    let legend_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(size as u16 + 2),
            Constraint::Min(6),
        ])
        .split(area);

    let legend_title = Paragraph::new("PILLARS")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(legend_title, legend_layout[0]);

    let mut lines = Vec::new();
    for (idx, pillar) in Pillar::ALL.iter().take(size).enumerate() {
        lines.push(Line::from(format!(
            "{}: {} ({})",
            idx + 1,
            pillar.label(),
            pillar.glyph()
        ))
        .style(Style::default().fg(pillar_color(*pillar))));
    }
    f.render_widget(Paragraph::new(lines), legend_layout[1]);

    let controls = if solved {
        "Puzzle solved!\nEnter: New puzzle\nq: Back to menu\n"
    } else {
        "Arrows: Move cursor\n1-5: Place pillar\nBackspace/0: Clear cell\nEnter: New puzzle\nq: Back to menu\n"
    };
    let controls_widget = Paragraph::new(controls)
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(controls_widget, legend_layout[2]);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
