pub mod json_api;

pub use json_api::{
    apply_command, apply_command_json, CommandResponse, MatchSnapshot, ScoringCommand,
};
