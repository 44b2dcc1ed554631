//! Shared fixtures for engine tests.

use crate::models::{Team, TeamId};
use super::match_state::{MatchSetup, MatchState};

pub fn make_team(name: &str) -> Team {
    let players = (1..=11).map(|i| format!("{name} Player {i}")).collect();
    Team::new(name, players, 0)
}

/// A 20-over match, Team A batting first, openers 0 and 1 on both sides.
pub fn make_setup() -> MatchSetup {
    MatchSetup {
        team1: make_team("Team A"),
        team2: make_team("Team B"),
        total_overs: 20,
        batting_first: TeamId::Team1,
        team1_opening_pair: (0, 1),
        team2_opening_pair: (0, 1),
    }
}

pub fn make_state() -> MatchState {
    MatchState::from_setup(make_setup()).expect("fixture setup is valid")
}
