use crate::error::{Result, ScoringError};
use crate::models::{Team, TeamId, PLAYERS_PER_SIDE};
use serde::{Deserialize, Serialize};

/// Match lifecycle flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    Ended,
}

/// Everything needed to start a match, collected by the setup screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSetup {
    pub team1: Team,
    pub team2: Team,
    /// Overs per innings, 1..=50.
    pub total_overs: u8,
    pub batting_first: TeamId,
    pub team1_opening_pair: (usize, usize),
    pub team2_opening_pair: (usize, usize),
}

/// Final outcome, filled in when the second innings closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    pub winner: TeamId,
    pub loser: TeamId,
    /// "by 7 wickets", "by 12 runs", or "Match Tied".
    pub margin: String,
}

/// Complete state of one match.
///
/// Owned by the orchestrator and mutated only through the delivery processor
/// and the innings lifecycle controller. All player references are indices
/// into the owning team's `players`; indices are stable for the life of the
/// match (players are marked out, never removed). Read-only once `phase`
/// reaches `Ended`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub team1: Team,
    pub team2: Team,
    pub total_overs: u8,
    /// Side currently batting.
    pub current_team: TeamId,
    /// True once the first innings has closed.
    pub innings_complete: bool,

    pub current_batsman1: usize,
    pub current_batsman2: usize,
    /// One of the two current batsmen; faces the next delivery.
    pub striker: usize,
    pub current_bowler: usize,
    /// Legal balls bowled in the over in progress, 0..=5.
    pub balls_in_current_over: u8,
    /// Runs conceded by the bowler in the over in progress. Zero at the 6th
    /// legal ball means a maiden.
    pub runs_in_current_over: u32,

    /// Pre-selected opening pairs, re-seated at the innings switch.
    pub team1_opening_pair: (usize, usize),
    pub team2_opening_pair: (usize, usize),

    pub phase: MatchPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    /// Validate a setup and seat the opening players.
    pub fn from_setup(setup: MatchSetup) -> Result<Self> {
        let MatchSetup {
            mut team1,
            mut team2,
            total_overs,
            batting_first,
            team1_opening_pair,
            team2_opening_pair,
        } = setup;

        team1.validate().map_err(ScoringError::InvalidSelection)?;
        team2.validate().map_err(ScoringError::InvalidSelection)?;
        if !(1..=50).contains(&total_overs) {
            return Err(ScoringError::InvalidSelection(format!(
                "Overs per innings must be 1..=50, got {total_overs}"
            )));
        }
        validate_opening_pair(&team1.name, team1_opening_pair)?;
        validate_opening_pair(&team2.name, team2_opening_pair)?;

        team1.reset_match_stats();
        team2.reset_match_stats();

        let openers = match batting_first {
            TeamId::Team1 => team1_opening_pair,
            TeamId::Team2 => team2_opening_pair,
        };

        Ok(Self {
            team1,
            team2,
            total_overs,
            current_team: batting_first,
            innings_complete: false,
            current_batsman1: openers.0,
            current_batsman2: openers.1,
            striker: openers.0,
            current_bowler: 0,
            balls_in_current_over: 0,
            runs_in_current_over: 0,
            team1_opening_pair,
            team2_opening_pair,
            phase: MatchPhase::InProgress,
            outcome: None,
        })
    }

    pub fn team(&self, id: TeamId) -> &Team {
        match id {
            TeamId::Team1 => &self.team1,
            TeamId::Team2 => &self.team2,
        }
    }

    pub fn batting_team(&self) -> &Team {
        self.team(self.current_team)
    }

    pub fn batting_team_mut(&mut self) -> &mut Team {
        match self.current_team {
            TeamId::Team1 => &mut self.team1,
            TeamId::Team2 => &mut self.team2,
        }
    }

    pub fn bowling_team(&self) -> &Team {
        self.team(self.current_team.other())
    }

    pub fn bowling_team_mut(&mut self) -> &mut Team {
        match self.current_team {
            TeamId::Team1 => &mut self.team2,
            TeamId::Team2 => &mut self.team1,
        }
    }

    /// Opening pair configured for the side currently batting.
    pub fn current_opening_pair(&self) -> (usize, usize) {
        match self.current_team {
            TeamId::Team1 => self.team1_opening_pair,
            TeamId::Team2 => self.team2_opening_pair,
        }
    }

    /// The current batsman not on strike.
    pub fn non_striker(&self) -> usize {
        if self.striker == self.current_batsman1 {
            self.current_batsman2
        } else {
            self.current_batsman1
        }
    }

    /// Swap which end is on strike.
    pub fn rotate_strike(&mut self) {
        self.striker = self.non_striker();
    }

    /// Runs the chasing side must reach to win. `None` in the first innings.
    pub fn target(&self) -> Option<u32> {
        if self.innings_complete {
            Some(self.bowling_team().total_runs + 1)
        } else {
            None
        }
    }
}

fn validate_opening_pair(team_name: &str, pair: (usize, usize)) -> Result<()> {
    if pair.0 == pair.1 {
        return Err(ScoringError::InvalidSelection(format!(
            "{team_name}: opening batsmen must be two different players"
        )));
    }
    if pair.0 >= PLAYERS_PER_SIDE || pair.1 >= PLAYERS_PER_SIDE {
        return Err(ScoringError::InvalidSelection(format!(
            "{team_name}: opening batsman index out of range"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::make_setup;

    #[test]
    fn from_setup_seats_the_openers_of_the_side_batting_first() {
        let mut setup = make_setup();
        setup.batting_first = TeamId::Team2;
        setup.team2_opening_pair = (3, 7);
        let state = MatchState::from_setup(setup).unwrap();
        assert_eq!(state.current_team, TeamId::Team2);
        assert_eq!(state.current_batsman1, 3);
        assert_eq!(state.current_batsman2, 7);
        assert_eq!(state.striker, 3);
        assert_eq!(state.phase, MatchPhase::InProgress);
    }

    #[test]
    fn duplicate_openers_are_rejected() {
        let mut setup = make_setup();
        setup.team1_opening_pair = (4, 4);
        let err = MatchState::from_setup(setup).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidSelection(_)));
    }

    #[test]
    fn overs_out_of_range_are_rejected() {
        let mut setup = make_setup();
        setup.total_overs = 0;
        assert!(MatchState::from_setup(setup.clone()).is_err());
        setup.total_overs = 51;
        assert!(MatchState::from_setup(setup).is_err());
    }

    #[test]
    fn setup_resets_any_stale_roster_stats() {
        let mut setup = make_setup();
        setup.team1.total_runs = 200;
        setup.team1.players[0].runs = 77;
        let state = MatchState::from_setup(setup).unwrap();
        assert_eq!(state.team1.total_runs, 0);
        assert_eq!(state.team1.players[0].runs, 0);
    }

    #[test]
    fn strike_rotation_toggles_between_current_batsmen() {
        let mut state = MatchState::from_setup(make_setup()).unwrap();
        assert_eq!(state.striker, 0);
        assert_eq!(state.non_striker(), 1);
        state.rotate_strike();
        assert_eq!(state.striker, 1);
        state.rotate_strike();
        assert_eq!(state.striker, 0);
    }

    #[test]
    fn target_only_exists_in_the_chase() {
        let mut state = MatchState::from_setup(make_setup()).unwrap();
        assert_eq!(state.target(), None);
        state.team2.total_runs = 150;
        state.innings_complete = true;
        state.current_team = TeamId::Team1;
        // Team1 batting second chases team2's total.
        assert_eq!(state.target(), Some(151));
    }
}
