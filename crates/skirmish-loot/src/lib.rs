//! Loot resolution for SKIRMISH.
//!
//! A cumulative-weight sampler over discrete outcomes, and the drop table
//! that gates it behind a percent drop chance.

pub mod drops;
pub mod sampler;

pub use drops::LootTable;
pub use sampler::{WeightedOutcome, WeightedTable};
