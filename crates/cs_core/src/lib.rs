//! # cs_core - Ball-by-Ball Cricket Scoring Engine
//!
//! Deterministic scoring core for a limited-overs cricket match: consumes one
//! delivery event at a time and updates team totals, player statistics, over
//! and innings progress, and the final result with win margin.
//!
//! The crate is the rules engine only. Rendering, dialogs and input widgets
//! live in the host application, which drives the engine through
//! [`MatchScorer`] (or the JSON boundary in [`api`]) and answers the signals
//! it emits: dismissal details, replacement batsman, new bowler, innings
//! switch.

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{apply_command, apply_command_json, ScoringCommand};
pub use engine::{MatchOutcome, MatchPhase, MatchScorer, MatchSetup, MatchState, PendingDecision};
pub use error::{Result, ScoringError};
pub use models::{CelebrationKind, DeliveryEvent, DismissalKind, Player, Signal, Team, TeamId};
