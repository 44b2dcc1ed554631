use serde::{Deserialize, Serialize};

/// Which of the two configured sides a reference points at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeamId {
    Team1,
    Team2,
}

impl TeamId {
    pub fn other(self) -> TeamId {
        match self {
            TeamId::Team1 => TeamId::Team2,
            TeamId::Team2 => TeamId::Team1,
        }
    }
}

/// One bowled delivery, as reported by the scorer.
///
/// A closed tagged enum rather than a string code: the delivery processor
/// matches exhaustively, so adding a variant is a compile error until every
/// scoring rule handles it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryEvent {
    /// Legal ball, no runs.
    Dot,
    /// Runs off the bat, completed by running (1..=3).
    Runs { n: u8 },
    /// Boundary along the ground.
    Four,
    /// Boundary over the rope.
    Six,
    /// Illegal delivery: one penalty run plus any runs completed. Re-bowled.
    Wide { extra_runs: u8 },
    /// Illegal delivery: one penalty run, bat runs still credited. Re-bowled.
    NoBall { extra_runs: u8 },
    /// Legal ball deflected off the body; runs go to the team as extras.
    LegBye { runs: u8 },
    /// Striker dismissed. Dismissal detail arrives as a follow-up decision.
    Wicket,
}

impl DeliveryEvent {
    /// Clamp scorer-supplied payloads into rule range. The host UI bounds its
    /// widgets already; the engine does not trust it.
    pub fn normalized(self) -> DeliveryEvent {
        match self {
            DeliveryEvent::Runs { n } => DeliveryEvent::Runs { n: n.clamp(1, 3) },
            DeliveryEvent::Wide { extra_runs } => {
                DeliveryEvent::Wide { extra_runs: extra_runs.min(6) }
            }
            DeliveryEvent::NoBall { extra_runs } => {
                DeliveryEvent::NoBall { extra_runs: extra_runs.min(6) }
            }
            DeliveryEvent::LegBye { runs } => DeliveryEvent::LegBye { runs: runs.clamp(1, 6) },
            other => other,
        }
    }

    /// Whether this delivery counts toward the 6-ball over.
    pub fn is_legal(&self) -> bool {
        !matches!(self, DeliveryEvent::Wide { .. } | DeliveryEvent::NoBall { .. })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    Four,
    Six,
    HatTrick,
}

/// Events emitted toward the presentation layer after a committed update.
///
/// `Request*` signals carry the decision the engine is now waiting for;
/// further deliveries are rejected until the matching decision call arrives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    Celebration { kind: CelebrationKind },
    /// The striker is out; dismissal type and fielder must be supplied.
    RequestDismissalDetails { batsman: usize },
    /// Indices of not-out players available to come in.
    RequestReplacementBatsman { candidates: Vec<usize> },
    /// Indices of bowling-team players available for the next over.
    RequestNewBowler { candidates: Vec<usize> },
    /// First innings finished; waiting for the innings switch.
    InningsEnded,
    MatchEnded { winner: TeamId, loser: TeamId, margin: String },
}
