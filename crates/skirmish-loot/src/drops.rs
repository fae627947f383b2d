//! Loot drop table: a drop-chance gate in front of a weighted table.

use rand::Rng;

use skirmish_core::commands::LootSpec;
use skirmish_core::enums::DrawMode;
use skirmish_core::error::{CombatError, CombatResult};

use crate::sampler::WeightedTable;

/// What an enemy may leave behind when it dies.
#[derive(Debug, Clone)]
pub struct LootTable<T> {
    drop_chance_percent: u8,
    mode: DrawMode,
    table: WeightedTable<T>,
}

impl<T> LootTable<T> {
    pub fn new(drop_chance_percent: u8, mode: DrawMode, table: WeightedTable<T>) -> CombatResult<Self> {
        if drop_chance_percent > 100 {
            return Err(CombatError::invalid_config(format!(
                "drop chance must be within 0..=100, got {drop_chance_percent}"
            )));
        }
        Ok(Self {
            drop_chance_percent,
            mode,
            table,
        })
    }

    pub fn drop_chance_percent(&self) -> u8 {
        self.drop_chance_percent
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn table(&self) -> &WeightedTable<T> {
        &self.table
    }

    /// Whether a gate roll in `1..100` lets a drop through.
    pub fn passes_gate(&self, roll: u8) -> bool {
        roll <= self.drop_chance_percent
    }

    /// Roll the drop chance, then draw in the table's configured mode.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.roll_with(rng, self.mode)
    }

    /// Roll the drop chance, then draw weighted or uniformly.
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R, mode: DrawMode) -> Option<&T> {
        let gate: u8 = rng.gen_range(1..100);
        if !self.passes_gate(gate) {
            return None;
        }
        Some(match mode {
            DrawMode::Weighted => self.table.sample(rng),
            DrawMode::Uniform => self.table.sample_uniform(rng),
        })
    }
}

impl LootTable<String> {
    /// Build a validated table from authored configuration.
    pub fn from_spec(spec: &LootSpec) -> CombatResult<Self> {
        let table = WeightedTable::build(
            spec.entries
                .iter()
                .map(|entry| (entry.item.clone(), entry.chance)),
        )?;
        let mode = if spec.weighted {
            DrawMode::Weighted
        } else {
            DrawMode::Uniform
        };
        Self::new(spec.drop_chance_percent, mode, table)
    }
}
