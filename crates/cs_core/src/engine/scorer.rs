//! Match orchestrator.
//!
//! `MatchScorer` owns the single mutable `MatchState`, sequences the delivery
//! processor and the innings lifecycle controller, and latches the follow-up
//! decision the presentation layer owes the engine (dismissal detail,
//! replacement batsman, new bowler, innings-switch acknowledgment). While a
//! decision is outstanding every other input is rejected, so the two-phase
//! wicket flow is an explicit state machine rather than a UI convention.

use crate::error::{Result, ScoringError};
use crate::models::{DeliveryEvent, DismissalKind, Signal};
use super::delivery::{self, DeliveryFacts};
use super::innings::{self, InningsVerdict};
use super::match_state::{MatchPhase, MatchSetup, MatchState};
use super::result;

/// The decision the engine is currently blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDecision {
    /// A wicket fell; dismissal type (and fielder, where needed) is owed.
    DismissalDetails { over_completed: bool },
    /// The dismissed batsman must be replaced before the next ball.
    ReplacementBatsman { over_completed: bool },
    /// The over finished; the next bowler must be named.
    NewBowler,
    /// First innings closed; waiting for the switch acknowledgment.
    InningsBreak,
}

#[derive(Debug, Default)]
pub struct MatchScorer {
    state: Option<MatchState>,
    pending: Option<PendingDecision>,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume scoring from a mid-match position.
    #[cfg(test)]
    pub(crate) fn with_state(state: MatchState) -> Self {
        Self { state: Some(state), pending: None }
    }

    /// Validate the setup and open the first innings.
    pub fn start_match(&mut self, setup: MatchSetup) -> Result<()> {
        if let Some(state) = &self.state {
            if state.phase == MatchPhase::InProgress {
                return Err(ScoringError::InvalidMatchState(
                    "A match is already in progress".to_string(),
                ));
            }
        }
        let state = MatchState::from_setup(setup)?;
        tracing::info!(
            team1 = %state.team1.name,
            team2 = %state.team2.name,
            overs = state.total_overs,
            "match started"
        );
        self.state = Some(state);
        self.pending = None;
        Ok(())
    }

    /// Score one delivery. Rejected while any decision is outstanding.
    pub fn deliver(&mut self, event: DeliveryEvent) -> Result<Vec<Signal>> {
        self.require_no_pending()?;
        let state = self.state.as_ref().ok_or_else(not_started)?;

        // Work on a copy: a rejection must leave committed state untouched.
        let mut working = state.clone();
        let facts = delivery::apply_delivery(&mut working, event)?;
        let mut signals = celebration_signals(&facts);

        if facts.wicket_fell {
            // Dismissal detail comes first; the lifecycle check waits until
            // the out is fully recorded.
            signals.push(Signal::RequestDismissalDetails { batsman: working.striker });
            self.pending =
                Some(PendingDecision::DismissalDetails { over_completed: facts.over_completed });
        } else {
            match innings::check(&working) {
                InningsVerdict::Continue => {
                    if facts.over_completed {
                        signals.push(Signal::RequestNewBowler {
                            candidates: bowler_candidates(&working),
                        });
                        self.pending = Some(PendingDecision::NewBowler);
                    }
                }
                InningsVerdict::InningsOver => {
                    signals.push(Signal::InningsEnded);
                    self.pending = Some(PendingDecision::InningsBreak);
                }
                InningsVerdict::MatchOver => {
                    signals.push(finalize(&mut working));
                }
            }
        }

        self.state = Some(working);
        Ok(signals)
    }

    /// Record how the struck batsman was out. For bowled, LBW and hit wicket
    /// the credit goes to the current bowler; the other kinds need an
    /// explicit fielder name.
    pub fn resolve_dismissal(
        &mut self,
        kind: DismissalKind,
        fielder: Option<String>,
    ) -> Result<Vec<Signal>> {
        let over_completed = match self.pending {
            Some(PendingDecision::DismissalDetails { over_completed }) => over_completed,
            _ => {
                return Err(ScoringError::InvalidMatchState(
                    "No dismissal is awaiting details".to_string(),
                ))
            }
        };
        let state = self.state.as_ref().ok_or_else(not_started)?;

        let dismissed_by = if kind.requires_fielder() {
            fielder.filter(|f| !f.trim().is_empty()).ok_or_else(|| {
                ScoringError::InvalidDismissal(format!(
                    "{} requires a fielder name",
                    kind.label()
                ))
            })?
        } else {
            state.bowling_team().players[state.current_bowler].name.clone()
        };

        let mut working = state.clone();
        let striker = working.striker;
        {
            let batsman = &mut working.batting_team_mut().players[striker];
            batsman.dismissal_type = Some(kind);
            batsman.dismissed_by = Some(dismissed_by);
        }

        let mut signals = Vec::new();
        match innings::check(&working) {
            InningsVerdict::Continue => {
                signals.push(Signal::RequestReplacementBatsman {
                    candidates: replacement_candidates(&working),
                });
                self.pending = Some(PendingDecision::ReplacementBatsman { over_completed });
            }
            InningsVerdict::InningsOver => {
                signals.push(Signal::InningsEnded);
                self.pending = Some(PendingDecision::InningsBreak);
            }
            InningsVerdict::MatchOver => {
                signals.push(finalize(&mut working));
                self.pending = None;
            }
        }

        self.state = Some(working);
        Ok(signals)
    }

    /// Seat the incoming batsman. The new batsman always takes the striker's
    /// end; the non-striker is unaffected. If the wicket fell on the last
    /// ball of the over, the new-bowler request follows immediately.
    pub fn select_replacement_batsman(&mut self, player_index: usize) -> Result<Vec<Signal>> {
        let over_completed = match self.pending {
            Some(PendingDecision::ReplacementBatsman { over_completed }) => over_completed,
            _ => {
                return Err(ScoringError::InvalidMatchState(
                    "No replacement batsman is awaited".to_string(),
                ))
            }
        };
        let state = self.state.as_ref().ok_or_else(not_started)?;

        let batting = state.batting_team();
        let player = batting.players.get(player_index).ok_or_else(|| {
            ScoringError::InvalidSelection(format!("Batsman index {player_index} out of range"))
        })?;
        if player.is_out {
            return Err(ScoringError::InvalidSelection(format!(
                "{} is already out",
                player.name
            )));
        }
        if player_index == state.current_batsman1 || player_index == state.current_batsman2 {
            return Err(ScoringError::InvalidSelection(format!(
                "{} is already batting",
                player.name
            )));
        }

        let mut working = state.clone();
        let non_striker = working.non_striker();
        working.current_batsman1 = player_index;
        working.current_batsman2 = non_striker;
        working.striker = player_index;

        let mut signals = Vec::new();
        if over_completed {
            signals.push(Signal::RequestNewBowler { candidates: bowler_candidates(&working) });
            self.pending = Some(PendingDecision::NewBowler);
        } else {
            self.pending = None;
        }

        self.state = Some(working);
        Ok(signals)
    }

    /// Hand the next over to another bowler, then apply the normal
    /// end-of-over strike rotation.
    pub fn select_new_bowler(&mut self, player_index: usize) -> Result<Vec<Signal>> {
        if self.pending != Some(PendingDecision::NewBowler) {
            return Err(ScoringError::InvalidMatchState(
                "No new bowler is awaited".to_string(),
            ));
        }
        let state = self.state.as_ref().ok_or_else(not_started)?;

        if player_index >= state.bowling_team().players.len() {
            return Err(ScoringError::InvalidSelection(format!(
                "Bowler index {player_index} out of range"
            )));
        }
        if player_index == state.current_bowler {
            return Err(ScoringError::InvalidSelection(
                "The same bowler cannot carry straight on".to_string(),
            ));
        }

        let mut working = state.clone();
        working.current_bowler = player_index;
        working.rotate_strike();
        self.pending = None;
        self.state = Some(working);
        Ok(Vec::new())
    }

    /// Perform the innings switch. Resolves the break raised at first-innings
    /// end, and doubles as the manual declaration override mid-innings.
    pub fn switch_innings(&mut self) -> Result<Vec<Signal>> {
        let state = self.state.as_ref().ok_or_else(not_started)?;
        match self.pending {
            Some(PendingDecision::InningsBreak) => {}
            None if state.phase == MatchPhase::InProgress && !state.innings_complete => {
                // Manual declaration.
            }
            _ => {
                return Err(ScoringError::InvalidMatchState(
                    "No innings switch is possible now".to_string(),
                ))
            }
        }

        let mut working = state.clone();
        innings::switch_innings(&mut working);
        self.pending = None;
        self.state = Some(working);
        Ok(Vec::new())
    }

    /// Discard the match entirely.
    pub fn new_match(&mut self) {
        tracing::info!("state discarded for a new match");
        self.state = None;
        self.pending = None;
    }

    pub fn state(&self) -> Option<&MatchState> {
        self.state.as_ref()
    }

    pub fn pending(&self) -> Option<PendingDecision> {
        self.pending
    }

    /// Not-out batting-side players excluding the two at the wicket.
    pub fn replacement_candidates(&self) -> Vec<usize> {
        self.state.as_ref().map(|s| replacement_candidates(s)).unwrap_or_default()
    }

    /// Bowling-side players excluding the current bowler.
    pub fn bowler_candidates(&self) -> Vec<usize> {
        self.state.as_ref().map(|s| bowler_candidates(s)).unwrap_or_default()
    }

    fn require_no_pending(&self) -> Result<()> {
        match self.pending {
            None => Ok(()),
            Some(decision) => Err(ScoringError::InvalidMatchState(format!(
                "A decision is still outstanding: {decision:?}"
            ))),
        }
    }
}

fn not_started() -> ScoringError {
    ScoringError::InvalidMatchState("No match has been started".to_string())
}

fn celebration_signals(facts: &DeliveryFacts) -> Vec<Signal> {
    facts.celebrations.iter().map(|&kind| Signal::Celebration { kind }).collect()
}

fn replacement_candidates(state: &MatchState) -> Vec<usize> {
    state
        .batting_team()
        .players
        .iter()
        .enumerate()
        .filter(|(i, p)| {
            !p.is_out && *i != state.current_batsman1 && *i != state.current_batsman2
        })
        .map(|(i, _)| i)
        .collect()
}

fn bowler_candidates(state: &MatchState) -> Vec<usize> {
    (0..state.bowling_team().players.len())
        .filter(|&i| i != state.current_bowler)
        .collect()
}

/// Close out the match: freeze the state and produce the result signal.
fn finalize(state: &mut MatchState) -> Signal {
    let outcome = result::resolve(state);
    state.phase = MatchPhase::Ended;
    state.outcome = Some(outcome.clone());
    tracing::info!(
        winner = %state.team(outcome.winner).name,
        margin = %outcome.margin,
        "match ended"
    );
    Signal::MatchEnded {
        winner: outcome.winner,
        loser: outcome.loser,
        margin: outcome.margin,
    }
}
