pub mod events;
pub mod player;
pub mod team;

pub use events::{CelebrationKind, DeliveryEvent, Signal, TeamId};
pub use player::{DismissalKind, Player};
pub use team::{Team, MAX_WICKETS, PLAYERS_PER_SIDE};
