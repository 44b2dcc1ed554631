use serde::{Deserialize, Serialize};

/// How a batsman was dismissed.
///
/// Closed set so the engine can pattern-match exhaustively; the string forms
/// match the host UI's dismissal dialog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DismissalKind {
    Bowled,
    Lbw,
    HitWicket,
    Caught,
    RunOut,
    Stumped,
}

impl DismissalKind {
    /// Caught / run out / stumped need an explicit fielder name; for the
    /// other three the credit goes to the bowler.
    pub fn requires_fielder(&self) -> bool {
        matches!(self, DismissalKind::Caught | DismissalKind::RunOut | DismissalKind::Stumped)
    }

    /// Display label used on scorecards.
    pub fn label(&self) -> &'static str {
        match self {
            DismissalKind::Bowled => "Bowled",
            DismissalKind::Lbw => "LBW",
            DismissalKind::HitWicket => "Hit Wicket",
            DismissalKind::Caught => "Caught",
            DismissalKind::RunOut => "Run Out",
            DismissalKind::Stumped => "Stumped",
        }
    }
}

/// One member of a team's eleven.
///
/// Every player carries both stat blocks unconditionally: in a short-format
/// match any batter may be asked to bowl. All counters are mutated only by
/// the scoring engine and are monotonically non-decreasing for the life of a
/// match; `is_out` flips false -> true at most once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,

    // Batting
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal_type: Option<DismissalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissed_by: Option<String>,

    // Bowling
    pub runs_conceded: u32,
    pub wickets_taken: u32,
    pub maiden_overs: u32,
    pub total_balls_bowled: u32,
    /// Running streak for hat-trick detection; reset by any non-wicket
    /// delivery from this bowler.
    pub consecutive_wickets: u32,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            dismissal_type: None,
            dismissed_by: None,
            runs_conceded: 0,
            wickets_taken: 0,
            maiden_overs: 0,
            total_balls_bowled: 0,
            consecutive_wickets: 0,
        }
    }

    /// Runs per 100 balls faced. `None` before the first ball.
    pub fn batting_strike_rate(&self) -> Option<f32> {
        if self.balls_faced == 0 {
            return None;
        }
        Some(self.runs as f32 * 100.0 / self.balls_faced as f32)
    }

    /// Overs bowled in the cricket "O.B" display form, e.g. 27 balls -> "4.3".
    pub fn overs_bowled(&self) -> String {
        format!("{}.{}", self.total_balls_bowled / 6, self.total_balls_bowled % 6)
    }

    /// Runs conceded per over bowled. `None` before the first legal ball.
    pub fn economy_rate(&self) -> Option<f32> {
        if self.total_balls_bowled == 0 {
            return None;
        }
        Some(self.runs_conceded as f32 * 6.0 / self.total_balls_bowled as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fielder_requirement_follows_dismissal_kind() {
        assert!(!DismissalKind::Bowled.requires_fielder());
        assert!(!DismissalKind::Lbw.requires_fielder());
        assert!(!DismissalKind::HitWicket.requires_fielder());
        assert!(DismissalKind::Caught.requires_fielder());
        assert!(DismissalKind::RunOut.requires_fielder());
        assert!(DismissalKind::Stumped.requires_fielder());
    }

    #[test]
    fn overs_bowled_display() {
        let mut p = Player::new(0, "Bowler");
        assert_eq!(p.overs_bowled(), "0.0");
        p.total_balls_bowled = 27;
        assert_eq!(p.overs_bowled(), "4.3");
    }

    #[test]
    fn rates_are_none_before_first_ball() {
        let p = Player::new(0, "Fresh");
        assert!(p.batting_strike_rate().is_none());
        assert!(p.economy_rate().is_none());
    }

    #[test]
    fn economy_is_per_six_balls() {
        let mut p = Player::new(0, "Bowler");
        p.total_balls_bowled = 12;
        p.runs_conceded = 15;
        assert_eq!(p.economy_rate(), Some(7.5));
    }
}
