//! Delivery processor: the per-ball scoring rules.
//!
//! One call scores exactly one delivery against a working copy of the match
//! state. The orchestrator owns commit/rollback; this module never sees a
//! state it is not allowed to mutate.

use crate::error::{Result, ScoringError};
use crate::models::{CelebrationKind, DeliveryEvent};
use super::match_state::{MatchPhase, MatchState};

/// Legal balls per over.
pub const BALLS_PER_OVER: u8 = 6;

/// Consecutive wickets by one bowler that make a hat-trick.
pub const HAT_TRICK_STREAK: u32 = 3;

/// What happened on one delivery, beyond the stat mutations. The
/// orchestrator turns these into signals and pending decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFacts {
    /// The event as scored, after defensive clamping.
    pub event: DeliveryEvent,
    pub wicket_fell: bool,
    /// The 6th legal ball of the over was bowled.
    pub over_completed: bool,
    pub celebrations: Vec<CelebrationKind>,
}

/// Score one delivery. Rejects without mutating when the match is not in
/// progress or a player reference is out of range.
pub fn apply_delivery(state: &mut MatchState, event: DeliveryEvent) -> Result<DeliveryFacts> {
    if state.phase != MatchPhase::InProgress {
        return Err(ScoringError::InvalidMatchState(format!(
            "Cannot score a delivery while the match is {:?}",
            state.phase
        )));
    }
    let batting_len = state.batting_team().players.len();
    let bowling_len = state.bowling_team().players.len();
    if state.striker >= batting_len {
        return Err(ScoringError::InvalidMatchState(format!(
            "Striker index {} out of range",
            state.striker
        )));
    }
    if state.current_bowler >= bowling_len {
        return Err(ScoringError::InvalidMatchState(format!(
            "Bowler index {} out of range",
            state.current_bowler
        )));
    }

    let event = event.normalized();
    let mut celebrations = Vec::new();

    // Per-event scoring, mirroring the rules table. `team_runs` is also what
    // the bowler concedes on the ball.
    let mut bat_runs: u32 = 0;
    let mut faces_ball = true;
    let mut team_runs: u32 = 0;
    let mut extras: u32 = 0;
    let mut rotate = false;
    let mut wicket_fell = false;

    match event {
        DeliveryEvent::Dot => {}
        DeliveryEvent::Runs { n } => {
            bat_runs = u32::from(n);
            team_runs = u32::from(n);
            rotate = n % 2 == 1;
        }
        DeliveryEvent::Four => {
            bat_runs = 4;
            team_runs = 4;
            celebrations.push(CelebrationKind::Four);
        }
        DeliveryEvent::Six => {
            bat_runs = 6;
            team_runs = 6;
            celebrations.push(CelebrationKind::Six);
        }
        DeliveryEvent::Wide { extra_runs } => {
            faces_ball = false;
            team_runs = 1 + u32::from(extra_runs);
            extras = team_runs;
            rotate = extra_runs % 2 == 1;
        }
        DeliveryEvent::NoBall { extra_runs } => {
            faces_ball = false;
            bat_runs = u32::from(extra_runs);
            team_runs = 1 + u32::from(extra_runs);
            // Only the penalty run is an extra; the rest went off the bat.
            extras = 1;
            rotate = extra_runs % 2 == 1;
        }
        DeliveryEvent::LegBye { runs } => {
            team_runs = u32::from(runs);
            extras = team_runs;
            rotate = runs % 2 == 1;
        }
        DeliveryEvent::Wicket => {
            wicket_fell = true;
        }
    }

    let striker = state.striker;
    let bowler = state.current_bowler;

    {
        let batting = state.batting_team_mut();
        let batsman = &mut batting.players[striker];
        batsman.runs += bat_runs;
        if faces_ball {
            batsman.balls_faced += 1;
        }
        match event {
            DeliveryEvent::Four => batsman.fours += 1,
            DeliveryEvent::Six => batsman.sixes += 1,
            DeliveryEvent::Wicket => batsman.is_out = true,
            _ => {}
        }
        batting.total_runs += team_runs;
        batting.extras += extras;
        if wicket_fell {
            batting.wickets += 1;
        }
    }

    {
        let bowling = state.bowling_team_mut();
        let b = &mut bowling.players[bowler];
        b.runs_conceded += team_runs;
        if wicket_fell {
            b.wickets_taken += 1;
            b.consecutive_wickets += 1;
            if b.consecutive_wickets >= HAT_TRICK_STREAK {
                celebrations.push(CelebrationKind::HatTrick);
            }
        } else {
            b.consecutive_wickets = 0;
        }
    }
    state.runs_in_current_over += team_runs;

    let mut over_completed = false;
    if event.is_legal() {
        state.batting_team_mut().total_balls += 1;
        state.bowling_team_mut().players[bowler].total_balls_bowled += 1;
        state.balls_in_current_over += 1;
        if state.balls_in_current_over == BALLS_PER_OVER {
            state.balls_in_current_over = 0;
            if state.runs_in_current_over == 0 {
                state.bowling_team_mut().players[bowler].maiden_overs += 1;
            }
            state.runs_in_current_over = 0;
            over_completed = true;
        }
    }

    // A wicket supersedes end-of-ball positioning; the replacement flow
    // decides who faces next.
    if rotate && !wicket_fell {
        state.rotate_strike();
    }

    tracing::debug!(
        ?event,
        total = state.batting_team().total_runs,
        wickets = state.batting_team().wickets,
        overs = %state.batting_team().overs_display(),
        "delivery scored"
    );

    Ok(DeliveryFacts { event, wicket_fell, over_completed, celebrations })
}
