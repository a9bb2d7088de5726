use serde::{Deserialize, Serialize};

/// Full state of a single board cell, mines included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_opened: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_opened(self) -> bool {
        self.is_opened
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Whether a reveal may open this cell.
    pub const fn is_openable(self) -> bool {
        !self.is_opened && !self.is_flagged
    }

    pub const fn view(self) -> CellView {
        match (self.is_opened, self.is_mine, self.is_flagged) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Opened(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }
}

/// Canonical player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Opened(u8),
    Mine,
}

impl CellView {
    /// Character used for this cell in a rendered row.
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '-',
            Self::Flagged => '?',
            Self::Opened(0) => '.',
            Self::Opened(count @ 1..=8) => (b'0' + count) as char,
            // adjacent counts never exceed 8
            Self::Opened(_) => '#',
            Self::Mine => '*',
        }
    }
}
