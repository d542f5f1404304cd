// Screen selection for the mini-game suite
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuState {
    MainMenu,
    Blocks,
    Puzzle,
}

// Main menu entries, in display order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuOption {
    FallingBlocks,
    PillarPuzzle,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [
        MenuOption::FallingBlocks,
        MenuOption::PillarPuzzle,
        MenuOption::Quit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::FallingBlocks => "Falling Blocks",
            MenuOption::PillarPuzzle => "Pillar Puzzle",
            MenuOption::Quit => "Quit",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Menu {
    pub state: MenuState,
    pub selected: MenuOption,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::MainMenu,
            selected: MenuOption::FallingBlocks,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self) {
        let idx = Self::index_of(self.selected);
        self.selected = MenuOption::ALL[(idx + 1) % MenuOption::ALL.len()];
    }

    pub fn prev_option(&mut self) {
        let idx = Self::index_of(self.selected);
        self.selected = MenuOption::ALL[(idx + MenuOption::ALL.len() - 1) % MenuOption::ALL.len()];
    }

    fn index_of(option: MenuOption) -> usize {
        MenuOption::ALL
            .iter()
            .position(|&o| o == option)
            .unwrap_or(0)
    }
}
