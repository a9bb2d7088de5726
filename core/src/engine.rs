use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Victory
/// - InProgress -> Defeat
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No cell has been opened or flagged yet
    #[default]
    NotStarted,
    InProgress,
    /// Every safe cell was opened
    Victory,
    /// A mine was opened
    Defeat,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

/// A single game from setup to victory or defeat.
///
/// Starting a new game replaces the board wholesale; the mine generator and clock are kept across games.
#[derive(Clone, Debug)]
pub struct Minesweeper<G = RandomMineGenerator, C = SystemClock> {
    generator: G,
    clock: C,
    board: Board,
    opened_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Minesweeper {
    /// Randomly mined game using an OS-seeded generator and the system clock.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_sources(RandomMineGenerator::default(), SystemClock, config)
    }

    /// Game with mines at exactly `mine_coords`, using the system clock.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Self::with_sources_and_mines(
            RandomMineGenerator::default(),
            SystemClock,
            size,
            mine_coords,
        )
    }
}

impl<G: MineGenerator, C: Clock> Minesweeper<G, C> {
    pub fn with_sources(mut generator: G, clock: C, config: GameConfig) -> Result<Self> {
        let board = random_board(&mut generator, config)?;
        Ok(Self::from_board(generator, clock, board))
    }

    pub fn with_sources_and_mines(
        generator: G,
        clock: C,
        size: Coord2,
        mine_coords: &[Coord2],
    ) -> Result<Self> {
        let board = Board::with_mines(size, mine_coords)?;
        Ok(Self::from_board(generator, clock, board))
    }

    fn from_board(generator: G, clock: C, board: Board) -> Self {
        let mut game = Self {
            generator,
            clock,
            board,
            opened_count: 0,
            flag_count: 0,
            status: GameStatus::NotStarted,
            started_at: None,
            ended_at: None,
        };
        game.log_new_game();
        game
    }

    /// Replaces the board with a randomly mined one. On error the current game is kept as is.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        let board = random_board(&mut self.generator, config)?;
        self.reset(board);
        Ok(())
    }

    /// Replaces the board with one mined at exactly `mine_coords`. On error the current game is kept as is.
    pub fn new_game_with_mines(&mut self, size: Coord2, mine_coords: &[Coord2]) -> Result<()> {
        let board = Board::with_mines(size, mine_coords)?;
        self.reset(board);
        Ok(())
    }

    fn reset(&mut self, board: Board) {
        self.board = board;
        self.opened_count = 0;
        self.flag_count = 0;
        self.status = GameStatus::NotStarted;
        self.started_at = None;
        self.ended_at = None;
        self.log_new_game();
    }

    fn log_new_game(&self) {
        let (width, height) = self.board.size();
        log::debug!(
            "New {}x{} game with {} mines",
            width,
            height,
            self.board.mine_count()
        );
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.board.safe_cell_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines
    pub fn mines_left(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.flag_count)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords].view())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Whole seconds played: 0 before the first move, live while in progress, frozen once finished.
    pub fn elapsed_secs(&self) -> u64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let until = self.ended_at.unwrap_or_else(|| self.clock.now());
        until.saturating_duration_since(started_at).as_secs()
    }

    /// One string per row, top to bottom.
    ///
    /// `*` opened mine, `1`-`8` opened with adjacent mines, `.` opened without, `?` flagged, `-` closed.
    pub fn render_field(&self) -> Vec<String> {
        self.board.render_rows()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.mark_started();

        if self.status != GameStatus::InProgress {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.board[coords];
        if cell.is_opened {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flag_count += 1;
        } else {
            self.flag_count -= 1;
        }
        log::trace!("Flag at {:?} set to {}", coords, cell.is_flagged);
        Ok(MarkOutcome::Changed)
    }

    pub fn open_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.mark_started();

        if self.status != GameStatus::InProgress {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board[coords];
        if cell.is_opened {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            log::debug!("Opened mine at {:?}", coords);
            self.opened_count += self.board.open_all();
            self.end_game(GameStatus::Defeat);
            return Ok(RevealOutcome::HitMine);
        }

        if cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        self.flood_open(coords);

        if self.opened_count == self.board.safe_cell_count() {
            self.end_game(GameStatus::Victory);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Breadth-first reveal from a safe cell, expanding through cells without adjacent mines.
    fn flood_open(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.board[coords];
            if cell.is_opened {
                continue;
            }

            cell.is_opened = true;
            self.opened_count += 1;
            let adjacent_mines = cell.adjacent_mines;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos].is_openable()),
                );
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.status, GameStatus::NotStarted) {
            let now = self.clock.now();
            log::debug!("Game started");
            self.started_at = Some(now);
            self.status = GameStatus::InProgress;
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.ended_at = Some(self.clock.now());
        self.status = status;
        log::debug!(
            "Game ended with {:?} after {}s",
            status,
            self.elapsed_secs()
        );
    }
}

fn random_board<G: MineGenerator>(generator: &mut G, config: GameConfig) -> Result<Board> {
    let config = GameConfig::new(config.size, config.mines)?;
    let mine_coords = generator.generate(config);
    Board::with_mines(config.size, &mine_coords)
}

impl<G, C> fmt::Display for Minesweeper<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.board.render_rows().iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}
