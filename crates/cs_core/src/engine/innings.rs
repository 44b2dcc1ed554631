//! Innings lifecycle controller: decides when an innings is over and
//! performs the switch between the two.

use crate::models::MAX_WICKETS;
use super::match_state::MatchState;

/// Outcome of the end-of-innings check run after every committed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InningsVerdict {
    Continue,
    /// First innings done; an innings switch is due.
    InningsOver,
    /// Second innings done; the match result is due.
    MatchOver,
}

/// End-of-innings predicate: all out, overs exhausted, or (second innings
/// only) target reached. A successful chase ends the innings immediately,
/// even mid-over.
pub fn innings_over(state: &MatchState) -> bool {
    let batting = state.batting_team();
    if batting.wickets >= MAX_WICKETS {
        return true;
    }
    if batting.total_balls / 6 >= u32::from(state.total_overs) {
        return true;
    }
    if let Some(target) = state.target() {
        if batting.total_runs >= target {
            return true;
        }
    }
    false
}

pub fn check(state: &MatchState) -> InningsVerdict {
    if !innings_over(state) {
        InningsVerdict::Continue
    } else if state.innings_complete {
        InningsVerdict::MatchOver
    } else {
        InningsVerdict::InningsOver
    }
}

/// Close the first innings and seat the second: swap the batting side, reset
/// the over in progress, open with bowler 0 and the pre-selected opening
/// pair, first opener on strike.
pub fn switch_innings(state: &mut MatchState) {
    state.innings_complete = true;
    state.current_team = state.current_team.other();
    state.balls_in_current_over = 0;
    state.runs_in_current_over = 0;
    state.current_bowler = 0;

    let openers = state.current_opening_pair();
    state.current_batsman1 = openers.0;
    state.current_batsman2 = openers.1;
    state.striker = openers.0;

    tracing::info!(
        batting = %state.batting_team().name,
        target = state.target(),
        "innings switched"
    );
}
