//! Game abstractions: player identity and the rules capability.

pub mod player;
pub mod rules;

pub use player::Player;
pub use rules::Rules;
