pub mod engine;
pub mod similarity;

pub use engine::{MatchOutcome, MatchTier, MatchingEngine};
