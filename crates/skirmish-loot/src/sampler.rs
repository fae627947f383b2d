//! Cumulative-weight sampler.
//!
//! `draw` performs a binary search over the running totals, which yields the
//! same distribution as walking the outcomes and accumulating weights but in
//! O(log n).

use rand::Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::error::{CombatError, CombatResult};

/// A value and the relative chance of selecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOutcome<T> {
    pub value: T,
    pub chance: f64,
}

impl<T> WeightedOutcome<T> {
    pub fn new(value: T, chance: f64) -> Self {
        Self { value, chance }
    }
}

/// Ordered outcomes plus their cumulative weights.
///
/// Invariants: never empty, `cumulative` is non-decreasing, and its last
/// entry equals the (positive) sum of all weights.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    outcomes: Vec<WeightedOutcome<T>>,
    cumulative: Vec<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(value, weight)` pairs.
    pub fn build(outcomes: impl IntoIterator<Item = (T, f64)>) -> CombatResult<Self> {
        Self::from_outcomes(
            outcomes
                .into_iter()
                .map(|(value, chance)| WeightedOutcome::new(value, chance))
                .collect(),
        )
    }

    /// Build a table from already-paired outcomes.
    pub fn from_outcomes(outcomes: Vec<WeightedOutcome<T>>) -> CombatResult<Self> {
        let cumulative = cumulative_weights(&outcomes)?;
        Ok(Self {
            outcomes,
            cumulative,
        })
    }

    /// Append an outcome and rebuild the cumulative array.
    /// On error the table is left unchanged.
    pub fn push(&mut self, value: T, chance: f64) -> CombatResult<()> {
        self.outcomes.push(WeightedOutcome::new(value, chance));
        match cumulative_weights(&self.outcomes) {
            Ok(cumulative) => {
                self.cumulative = cumulative;
                Ok(())
            }
            Err(e) => {
                self.outcomes.pop();
                Err(e)
            }
        }
    }

    /// Sum of all weights. Valid draws lie in `[0, total_weight)`.
    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn outcomes(&self) -> &[WeightedOutcome<T>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always false for a built table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Index of the smallest cumulative entry `>= x`.
    ///
    /// A draw exactly on a boundary resolves to the outcome at that boundary.
    /// Entries still at zero (leading zero-weight outcomes) are skipped so a
    /// zero-weight outcome can never be chosen. Draws at or beyond the total
    /// resolve to the last outcome.
    pub fn draw_index(&self, x: f64) -> usize {
        let idx = self.cumulative.partition_point(|&c| c <= 0.0 || c < x);
        idx.min(self.cumulative.len() - 1)
    }

    /// Weighted selection for a draw `x` in `[0, total_weight)`.
    pub fn draw(&self, x: f64) -> &T {
        &self.outcomes[self.draw_index(x)].value
    }

    /// Weight-blind selection; `fraction` in `[0, 1)` maps onto the outcomes.
    pub fn draw_uniform(&self, fraction: f64) -> &T {
        let len = self.outcomes.len();
        let idx = if fraction.is_finite() && fraction > 0.0 {
            ((fraction * len as f64) as usize).min(len - 1)
        } else {
            0
        };
        &self.outcomes[idx].value
    }

    /// Weighted selection using `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let x = rng.gen_range(0.0..self.total_weight());
        self.draw(x)
    }

    /// Uniform selection using `rng`.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.outcomes[rng.gen_range(0..self.outcomes.len())].value
    }
}

/// Validate weights and compute running totals.
fn cumulative_weights<T>(outcomes: &[WeightedOutcome<T>]) -> CombatResult<Vec<f64>> {
    if outcomes.is_empty() {
        return Err(CombatError::invalid_config(
            "weighted table needs at least one outcome",
        ));
    }

    let mut running = 0.0;
    let mut cumulative = Vec::with_capacity(outcomes.len());
    for (idx, outcome) in outcomes.iter().enumerate() {
        if !outcome.chance.is_finite() || outcome.chance < 0.0 {
            return Err(CombatError::invalid_config(format!(
                "outcome {idx} has weight {}, weights must be finite and >= 0",
                outcome.chance
            )));
        }
        running += outcome.chance;
        cumulative.push(running);
    }

    if !running.is_finite() || running <= 0.0 {
        return Err(CombatError::invalid_config(format!(
            "total weight must be finite and > 0, got {running}"
        )));
    }

    Ok(cumulative)
}
