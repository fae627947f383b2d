//! Score, lives and win/lose rules for a skirmish.

use serde::{Deserialize, Serialize};

use skirmish_core::enums::MatchOutcome;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::ScoreView;

/// Kill value of an enemy: `base + modifier`, never below `base`.
pub fn kill_value(base: u32, weapon_modifier: i32) -> u32 {
    let boosted = base as i64 + weapon_modifier as i64;
    boosted.max(base as i64).min(u32::MAX as i64) as u32
}

/// Running score for the current match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub high_score: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub hits_landed: u32,
    pub lives_left: u32,
    pub score_to_win: u32,
}

impl ScoreState {
    pub fn new(score_to_win: u32, lives: u32) -> Self {
        Self {
            score_to_win,
            lives_left: lives,
            ..Self::default()
        }
    }

    /// Add (or remove) points. The score floors at zero and the high score
    /// follows it up. Returns the `ScoreChanged` event when anything moved.
    pub fn add_points(&mut self, delta: i64) -> Option<CombatEvent> {
        let next = (self.score as i64 + delta).clamp(0, u32::MAX as i64) as u32;
        if next == self.score {
            return None;
        }
        self.score = next;
        self.high_score = self.high_score.max(next);
        Some(CombatEvent::ScoreChanged {
            score: self.score,
            high_score: self.high_score,
        })
    }

    pub fn has_won(&self) -> bool {
        self.score >= self.score_to_win
    }

    /// Spend a life if one is left. False means the player is out.
    pub fn consume_life(&mut self) -> bool {
        if self.lives_left == 0 {
            return false;
        }
        self.lives_left -= 1;
        true
    }

    /// Outcome if the match should end now with the player still alive.
    pub fn check_win(&self) -> Option<MatchOutcome> {
        self.has_won().then_some(MatchOutcome::Won)
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            high_score: self.high_score,
            kills: self.kills,
            shots_fired: self.shots_fired,
            hits_landed: self.hits_landed,
            lives_left: self.lives_left,
        }
    }
}
