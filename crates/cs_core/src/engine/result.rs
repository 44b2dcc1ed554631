//! Result resolver: winner, loser and win margin at the end of the chase.

use crate::models::MAX_WICKETS;
use super::match_state::{MatchOutcome, MatchState};

/// Compute the final outcome. Only meaningful once the second innings has
/// closed; the chasing side is `state.current_team`.
pub fn resolve(state: &MatchState) -> MatchOutcome {
    let chasing = state.current_team;
    let defending = chasing.other();
    let chase = state.team(chasing);
    let defence = state.team(defending);
    let target = defence.total_runs + 1;

    if chase.total_runs >= target {
        let wickets_remaining = u32::from(MAX_WICKETS - chase.wickets);
        MatchOutcome {
            winner: chasing,
            loser: defending,
            margin: format!("by {} {}", wickets_remaining, plural(wickets_remaining, "wicket")),
        }
    } else if chase.total_runs == defence.total_runs {
        // Scores level with the chase closed out: a tie. The winner slot is
        // arbitrary for display.
        MatchOutcome {
            winner: chasing,
            loser: defending,
            margin: "Match Tied".to_string(),
        }
    } else {
        let runs = defence.total_runs - chase.total_runs;
        MatchOutcome {
            winner: defending,
            loser: chasing,
            margin: format!("by {} {}", runs, plural(runs, "run")),
        }
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::make_state;
    use crate::models::TeamId;

    fn chase_state(defence_runs: u32, chase_runs: u32, chase_wickets: u8) -> MatchState {
        let mut state = make_state();
        state.innings_complete = true;
        state.current_team = TeamId::Team2;
        state.team1.total_runs = defence_runs;
        state.team2.total_runs = chase_runs;
        state.team2.wickets = chase_wickets;
        state
    }

    #[test]
    fn successful_chase_wins_by_wickets_remaining() {
        let outcome = resolve(&chase_state(150, 151, 3));
        assert_eq!(outcome.winner, TeamId::Team2);
        assert_eq!(outcome.loser, TeamId::Team1);
        assert_eq!(outcome.margin, "by 7 wickets");
    }

    #[test]
    fn one_wicket_margin_is_singular() {
        let outcome = resolve(&chase_state(150, 152, 9));
        assert_eq!(outcome.margin, "by 1 wicket");
    }

    #[test]
    fn failed_chase_loses_by_the_run_gap() {
        let outcome = resolve(&chase_state(150, 138, 10));
        assert_eq!(outcome.winner, TeamId::Team1);
        assert_eq!(outcome.loser, TeamId::Team2);
        assert_eq!(outcome.margin, "by 12 runs");
    }

    #[test]
    fn one_run_margin_is_singular() {
        let outcome = resolve(&chase_state(150, 149, 10));
        assert_eq!(outcome.margin, "by 1 run");
    }

    #[test]
    fn level_scores_are_a_tie() {
        let outcome = resolve(&chase_state(120, 120, 10));
        assert_eq!(outcome.margin, "Match Tied");
    }
}
