//! Attack intent: turns per-tick attack decisions into start/end edges.

/// Transition reported by `AttackIntent::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentChange {
    Started,
    Ended,
}

/// Remembers whether a combatant is currently attacking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackIntent {
    attacking: bool,
}

impl AttackIntent {
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Record this tick's decision; returns the edge if the state flipped.
    pub fn update(&mut self, should_attack: bool) -> Option<IntentChange> {
        if should_attack == self.attacking {
            return None;
        }
        self.attacking = should_attack;
        Some(if should_attack {
            IntentChange::Started
        } else {
            IntentChange::Ended
        })
    }

    /// Force the intent off (death, unequip). Returns `Ended` if it was on.
    pub fn stop(&mut self) -> Option<IntentChange> {
        self.update(false)
    }
}
