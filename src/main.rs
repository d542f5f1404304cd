#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use pillarblocks::app::{App, AppResult};
use pillarblocks::components::{Input, PuzzleInput};
use pillarblocks::config::Config;
use pillarblocks::engine::{Engine, GameStatus};
use pillarblocks::menu::{MenuOption, MenuState};
use pillarblocks::puzzle::Puzzle;
use pillarblocks::{Time, systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so the TUI stays clean
    let log_path = "pillarblocks.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting pillarblocks");

    // Initialize configuration system
    if let Err(e) = Config::load_global() {
        error!("Failed to load configuration: {e}");
        // Continue with default configuration
    } else {
        info!("Configuration loaded successfully");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let game_tick_rate = Duration::from_millis(50); // Game logic updates less often

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
            }

            if app.should_quit {
                return Ok(());
            }

            match app.menu.state {
                MenuState::Blocks => {
                    systems::blocks_input_system(&mut app.world);
                    systems::game_tick_system(&mut app.world);
                }
                MenuState::Puzzle => {
                    systems::puzzle_input_system(&mut app.world);
                }
                MenuState::MainMenu => {}
            }
        }

        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");

                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match app.menu.state {
                    MenuState::MainMenu => handle_menu_key(&mut app, key.code),
                    MenuState::Blocks => handle_blocks_key(&mut app, key.code),
                    MenuState::Puzzle => handle_puzzle_key(&mut app, key.code),
                }
            }
        }
    }
}

fn handle_menu_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('w') => app.menu.prev_option(),
        KeyCode::Down | KeyCode::Char('s') => app.menu.next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => match app.menu.selected {
            MenuOption::FallingBlocks => {
                app.menu.state = MenuState::Blocks;
                app.start_blocks();
            }
            MenuOption::PillarPuzzle => {
                app.menu.state = MenuState::Puzzle;
                app.start_puzzle();
            }
            MenuOption::Quit => app.should_quit = true,
        },
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_blocks_key(app: &mut App, code: KeyCode) {
    if code == KeyCode::Char('q') || code == KeyCode::Esc {
        app.menu.state = MenuState::MainMenu;
        return;
    }

    let status = app.world.resource::<Engine>().status;
    if matches!(status, GameStatus::Lost | GameStatus::Won) {
        if code == KeyCode::Enter {
            app.start_blocks();
        }
        return;
    }

    let mut input = app.world.resource_mut::<Input>();
    match code {
        KeyCode::Left | KeyCode::Char('a') => {
            input.left = true;
            input.right = false;
        }
        KeyCode::Right | KeyCode::Char('d') => {
            input.right = true;
            input.left = false;
        }
        KeyCode::Down | KeyCode::Char('s') => input.down = true,
        KeyCode::Up | KeyCode::Char('w' | ' ') => input.rotate = true,
        KeyCode::Char('p') => input.pause = true,
        _ => {}
    }
}

fn handle_puzzle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.menu.state = MenuState::MainMenu;
            return;
        }
        KeyCode::Enter => {
            app.start_puzzle();
            return;
        }
        _ => {}
    }

    // Ignore edits once the board is solved
    if app.world.resource::<Puzzle>().is_complete() {
        return;
    }

    let mut input = app.world.resource_mut::<PuzzleInput>();
    match code {
        KeyCode::Up => input.up = true,
        KeyCode::Down => input.down = true,
        KeyCode::Left => input.left = true,
        KeyCode::Right => input.right = true,
        KeyCode::Char(c @ '1'..='5') => input.place = Some(c as u8 - b'0'),
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('0') => input.erase = true,
        _ => {}
    }
}
