use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField>;
}

/// Hands out a prebuilt field, for fixed layouts and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    field: MineField,
}

impl FixedMinefieldGenerator {
    pub fn new(field: MineField) -> Self {
        Self { field }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        if config != self.field.game_config() {
            log::warn!(
                "Fixed minefield ignores requested config {:?}, using {:?}",
                config,
                self.field.game_config()
            );
        }
        Ok(self.field)
    }
}
