use serde::{Deserialize, Serialize};

use crate::engine::{MatchPhase, MatchScorer, MatchSetup, MatchState};
use crate::models::{DeliveryEvent, DismissalKind, Signal};

/// One operation against the scorer, as sent by the host UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScoringCommand {
    StartMatch { setup: MatchSetup },
    Deliver { event: DeliveryEvent },
    ResolveDismissal { dismissal_type: DismissalKind, dismissed_by: Option<String> },
    SelectReplacementBatsman { player_index: usize },
    SelectNewBowler { player_index: usize },
    SwitchInnings,
    NewMatch,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub signals: Vec<Signal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<MatchSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct BatsmanLine {
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,
}

#[derive(Debug, Serialize)]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub runs_conceded: u32,
    pub wickets_taken: u32,
}

/// Header-level summary of the live match for the host to render.
#[derive(Debug, Serialize)]
pub struct MatchSnapshot {
    pub phase: MatchPhase,
    pub batting_team: String,
    pub bowling_team: String,
    /// "151/3"
    pub score: String,
    /// "18.4"
    pub overs: String,
    pub striker: BatsmanLine,
    pub non_striker: BatsmanLine,
    pub bowler: BowlerLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs_required: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl MatchSnapshot {
    fn from_state(state: &MatchState) -> Self {
        let batting = state.batting_team();
        let bowling = state.bowling_team();
        let batsman_line = |index: usize| {
            let p = &batting.players[index];
            BatsmanLine { name: p.name.clone(), runs: p.runs, balls_faced: p.balls_faced }
        };
        let bowler = &bowling.players[state.current_bowler];
        let target = state.target();
        Self {
            phase: state.phase,
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            score: format!("{}/{}", batting.total_runs, batting.wickets),
            overs: batting.overs_display(),
            striker: batsman_line(state.striker),
            non_striker: batsman_line(state.non_striker()),
            bowler: BowlerLine {
                name: bowler.name.clone(),
                overs: bowler.overs_bowled(),
                runs_conceded: bowler.runs_conceded,
                wickets_taken: bowler.wickets_taken,
            },
            target,
            runs_required: target.map(|t| t.saturating_sub(batting.total_runs)),
            result: state.outcome.as_ref().map(|o| {
                if o.margin == "Match Tied" {
                    o.margin.clone()
                } else {
                    format!("{} won {}", state.team(o.winner).name, o.margin)
                }
            }),
        }
    }
}

/// Apply one command and report the emitted signals plus a fresh snapshot.
pub fn apply_command(scorer: &mut MatchScorer, command: ScoringCommand) -> CommandResponse {
    let result = match command {
        ScoringCommand::StartMatch { setup } => scorer.start_match(setup).map(|()| Vec::new()),
        ScoringCommand::Deliver { event } => scorer.deliver(event),
        ScoringCommand::ResolveDismissal { dismissal_type, dismissed_by } => {
            scorer.resolve_dismissal(dismissal_type, dismissed_by)
        }
        ScoringCommand::SelectReplacementBatsman { player_index } => {
            scorer.select_replacement_batsman(player_index)
        }
        ScoringCommand::SelectNewBowler { player_index } => {
            scorer.select_new_bowler(player_index)
        }
        ScoringCommand::SwitchInnings => scorer.switch_innings(),
        ScoringCommand::NewMatch => {
            scorer.new_match();
            Ok(Vec::new())
        }
    };

    let snapshot = scorer.state().map(MatchSnapshot::from_state);
    match result {
        Ok(signals) => CommandResponse { ok: true, error: None, signals, snapshot },
        Err(err) => {
            tracing::warn!(%err, "command rejected");
            CommandResponse {
                ok: false,
                error: Some(err.to_string()),
                signals: Vec::new(),
                snapshot,
            }
        }
    }
}

/// JSON-in / JSON-out wrapper around [`apply_command`].
pub fn apply_command_json(scorer: &mut MatchScorer, json: &str) -> String {
    let response = match serde_json::from_str::<ScoringCommand>(json) {
        Ok(command) => apply_command(scorer, command),
        Err(err) => CommandResponse {
            ok: false,
            error: Some(format!("Invalid command: {err}")),
            signals: Vec::new(),
            snapshot: scorer.state().map(MatchSnapshot::from_state),
        },
    };
    serde_json::to_string(&response)
        .unwrap_or_else(|err| format!(r#"{{"ok":false,"error":"serialization failed: {err}"}}"#))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::make_setup;

    fn started() -> MatchScorer {
        let mut scorer = MatchScorer::new();
        scorer.start_match(make_setup()).unwrap();
        scorer
    }

    #[test]
    fn deliver_command_round_trips_through_json() {
        let mut scorer = started();
        let out = apply_command_json(
            &mut scorer,
            r#"{"command":"deliver","event":{"type":"four"}}"#,
        );
        let response: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["ok"], true);
        assert_eq!(response["signals"][0]["signal"], "celebration");
        assert_eq!(response["snapshot"]["score"], "4/0");
        assert_eq!(response["snapshot"]["overs"], "0.1");
    }

    #[test]
    fn rejected_command_reports_the_error_and_keeps_the_snapshot() {
        let mut scorer = started();
        apply_command_json(&mut scorer, r#"{"command":"deliver","event":{"type":"wicket"}}"#);
        // A second delivery while the dismissal is unresolved.
        let out = apply_command_json(
            &mut scorer,
            r#"{"command":"deliver","event":{"type":"dot"}}"#,
        );
        let response: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["ok"], false);
        assert!(response["error"].as_str().unwrap().contains("Invalid match state"));
        assert_eq!(response["snapshot"]["score"], "0/1");
    }

    #[test]
    fn malformed_json_is_a_soft_error() {
        let mut scorer = MatchScorer::new();
        let out = apply_command_json(&mut scorer, "{nope");
        let response: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(response["ok"], false);
    }

    #[test]
    fn snapshot_shows_the_chase_target() {
        let mut scorer = started();
        scorer.deliver(DeliveryEvent::Four).unwrap();
        scorer.switch_innings().unwrap();
        let response = apply_command(
            &mut scorer,
            ScoringCommand::Deliver { event: DeliveryEvent::Runs { n: 1 } },
        );
        let snapshot = response.snapshot.unwrap();
        assert_eq!(snapshot.target, Some(5));
        assert_eq!(snapshot.runs_required, Some(4));
        assert_eq!(snapshot.batting_team, "Team B");
    }
}
