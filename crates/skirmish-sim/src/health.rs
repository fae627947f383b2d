//! Health pool with clamped damage/heal and a single death transition.

use serde::{Deserialize, Serialize};

use skirmish_core::error::{CombatError, CombatResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    max: f64,
    current: f64,
}

/// What a damage or heal call actually did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChange {
    /// Amount actually applied after clamping.
    pub applied: f64,
    pub remaining: f64,
    /// True only on the call that brought health to zero.
    pub died: bool,
}

impl Health {
    /// Starting health is `initial` clamped to `[1, max]`.
    pub fn new(max: f64, initial: f64) -> CombatResult<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(CombatError::invalid_config(format!(
                "max health must be finite and > 0, got {max}"
            )));
        }
        let initial = if initial.is_finite() { initial } else { max };
        Ok(Self {
            max,
            current: initial.max(1.0).min(max),
        })
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// `current / max`, for health bars.
    pub fn fraction(&self) -> f64 {
        self.current / self.max
    }

    pub fn damage(&mut self, amount: f64) -> HealthChange {
        let was_alive = self.is_alive();
        let amount = clamp_amount(amount);
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        HealthChange {
            applied: before - self.current,
            remaining: self.current,
            died: was_alive && !self.is_alive(),
        }
    }

    /// Heal a living combatant. The dead stay dead.
    pub fn heal(&mut self, amount: f64) -> HealthChange {
        if !self.is_alive() {
            return HealthChange {
                applied: 0.0,
                remaining: 0.0,
                died: false,
            };
        }
        let before = self.current;
        self.current = (self.current + clamp_amount(amount)).clamp(0.0, self.max);
        HealthChange {
            applied: self.current - before,
            remaining: self.current,
            died: false,
        }
    }

    /// Deal `max` damage.
    pub fn kill(&mut self) -> HealthChange {
        self.damage(self.max)
    }

    /// Back to full health (respawn).
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

fn clamp_amount(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}
