pub mod delivery;
pub mod innings;
pub mod match_state;
pub mod result;
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_support;


pub use delivery::{apply_delivery, DeliveryFacts, BALLS_PER_OVER, HAT_TRICK_STREAK};
pub use innings::InningsVerdict;
pub use match_state::{MatchOutcome, MatchPhase, MatchSetup, MatchState};
pub use scorer::{MatchScorer, PendingDecision};
