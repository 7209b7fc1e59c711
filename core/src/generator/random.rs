use ndarray::Array2;
use web_time::{SystemTime, UNIX_EPOCH};

use super::*;

/// Purely random placement: draws uniform coordinates and rejects the ones that already hold
/// a mine.
///
/// Rejections grow as the board fills up, which only matters for boards that are nearly all mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the current wall clock.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        use rand::prelude::*;

        // sampling below needs a non-empty board with at least one cell left free
        let config = GameConfig::new(config.size(), config.mines())
            .inspect_err(|err| log::warn!("Refusing to place mines for {:?}: {}", config, err))?;
        let (rows, cols) = config.size();
        let total_cells = config.total_cells();

        if u64::from(config.mines()) * 4 > u64::from(total_cells) * 3 {
            log::warn!(
                "Dense minefield, placing {} mines in {} cells will reject many samples",
                config.mines(),
                total_cells
            );
        }

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut mines_placed = 0;
        let mut rejected = 0u64;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines() {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                rejected += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines with seed {}, rejected {} samples",
            mines_placed,
            self.seed,
            rejected
        );
        Ok(MineField::new_unchecked(mines, config.mines()))
    }
}
