use crate::*;

/// Represents a game from start to finish: one minefield and the board played on it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    minefield: MineField,
    board: Board,
}

impl GameSession {
    /// Starts a game with mines placed at random, seeded from the clock.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = GameConfig::new((rows, cols), mines)?;
        Self::with_generator(config, RandomMinefieldGenerator::from_clock())
    }

    /// Starts a game whose mine placement is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    pub fn with_generator(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        Ok(Self::from_minefield(generator.generate(config)?))
    }

    pub fn from_minefield(minefield: MineField) -> Self {
        let config = minefield.game_config();
        log::debug!(
            "New session {}x{} with {} mines",
            config.rows(),
            config.cols(),
            config.mines()
        );
        Self {
            config,
            board: Board::for_field(&minefield),
            minefield,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn is_finished(&self) -> bool {
        self.board.is_finished()
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.config.mines()) - i64::from(self.board.flag_count())
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.board.triggered_mine()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.board.reveal(&self.minefield, coords)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.board.toggle_flag(coords)
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.board.is_revealed(coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.board.is_flagged(coords)
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        self.board.cell_at(coords)
    }

    /// Content of a cell, regardless of whether it was revealed.
    ///
    /// Renderers should only ask for revealed cells, or use [`observe`](Self::observe).
    pub fn cell_content(&self, coords: Coord2) -> Result<CellContent> {
        self.minefield.content(coords)
    }

    pub fn observe(&self) -> Observation {
        Observation::new(&self.minefield, &self.board)
    }
}
