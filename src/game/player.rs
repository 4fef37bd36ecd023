//! Player identity.

use serde::{Deserialize, Serialize};

/// Opaque player identity used to route per-turn requests to the correct
/// network endpoint. Equality-comparable and hashable so it can key the
/// broker's player-to-listener map; created by the caller before
/// orchestration and immutable for the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Player(String);

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn players_key_maps_by_identity() {
        let mut ports = HashMap::new();
        ports.insert(Player::new("alpha"), 10001u16);
        ports.insert(Player::new("beta"), 10002u16);
        assert_eq!(ports.get(&Player::new("alpha")), Some(&10001));
        assert_ne!(Player::new("alpha"), Player::new("beta"));
    }
}
