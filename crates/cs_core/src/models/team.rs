use super::Player;
use serde::{Deserialize, Serialize};

/// Number of players on a side. Indices into `players` are the stable
/// identity used for "current batsman" / "current bowler" references; players
/// are never removed mid-match, only marked out.
pub const PLAYERS_PER_SIDE: usize = 11;

/// Maximum wickets an innings can lose (ten batting partners).
pub const MAX_WICKETS: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>, // exactly 11
    pub captain: usize,
    pub vice_captain: usize,

    // Innings aggregates
    pub total_runs: u32,
    /// Legal deliveries faced (wides and no-balls excluded).
    pub total_balls: u32,
    pub wickets: u8,
    /// Runs not credited to any batsman: wides, the no-ball penalty, leg-byes.
    pub extras: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, player_names: Vec<String>, captain: usize) -> Self {
        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(i, n)| Player::new(i as u32, n))
            .collect();
        Self {
            name: name.into(),
            players,
            captain,
            vice_captain: if captain == 0 { 1 } else { 0 },
            total_runs: 0,
            total_balls: 0,
            wickets: 0,
            extras: 0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.players.len() != PLAYERS_PER_SIDE {
            return Err(format!(
                "Team must have exactly {} players, found {}",
                PLAYERS_PER_SIDE,
                self.players.len()
            ));
        }
        if self.captain >= PLAYERS_PER_SIDE || self.vice_captain >= PLAYERS_PER_SIDE {
            return Err("Captain and vice-captain must be player indices".to_string());
        }
        if self.captain == self.vice_captain {
            return Err("Captain and vice-captain must be different players".to_string());
        }
        Ok(())
    }

    /// Zero every match counter on the team and its players. Called at match
    /// start so a roster can be reused across matches.
    pub fn reset_match_stats(&mut self) {
        self.total_runs = 0;
        self.total_balls = 0;
        self.wickets = 0;
        self.extras = 0;
        for p in &mut self.players {
            p.runs = 0;
            p.balls_faced = 0;
            p.fours = 0;
            p.sixes = 0;
            p.is_out = false;
            p.dismissal_type = None;
            p.dismissed_by = None;
            p.runs_conceded = 0;
            p.wickets_taken = 0;
            p.maiden_overs = 0;
            p.total_balls_bowled = 0;
            p.consecutive_wickets = 0;
        }
    }

    /// Completed overs faced, e.g. 112 balls -> "18.4".
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.total_balls / 6, self.total_balls % 6)
    }

    /// Runs per over faced so far. `None` before the first legal ball.
    pub fn run_rate(&self) -> Option<f32> {
        if self.total_balls == 0 {
            return None;
        }
        Some(self.total_runs as f32 * 6.0 / self.total_balls as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(prefix: &str) -> Vec<String> {
        (1..=11).map(|i| format!("{prefix} {i}")).collect()
    }

    #[test]
    fn valid_team_passes_validation() {
        let team = Team::new("Team A", names("Player"), 0);
        assert_eq!(team.vice_captain, 1);
        assert!(team.validate().is_ok());
    }

    #[test]
    fn wrong_size_fails_validation() {
        let mut team = Team::new("Team A", names("Player"), 0);
        team.players.pop();
        assert!(team.validate().is_err());
    }

    #[test]
    fn captain_and_vice_must_differ() {
        let mut team = Team::new("Team A", names("Player"), 3);
        team.vice_captain = 3;
        assert!(team.validate().is_err());
    }

    #[test]
    fn reset_clears_player_and_team_counters() {
        let mut team = Team::new("Team A", names("Player"), 0);
        team.total_runs = 99;
        team.wickets = 4;
        team.players[2].runs = 50;
        team.players[2].is_out = true;
        team.reset_match_stats();
        assert_eq!(team.total_runs, 0);
        assert_eq!(team.wickets, 0);
        assert_eq!(team.players[2].runs, 0);
        assert!(!team.players[2].is_out);
    }

    #[test]
    fn overs_display_from_balls() {
        let mut team = Team::new("Team A", names("Player"), 0);
        team.total_balls = 112;
        assert_eq!(team.overs_display(), "18.4");
    }
}
