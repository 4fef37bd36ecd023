//! The rules capability: everything the orchestrator needs to know about a
//! game without knowing the game.

use crate::game::Player;

/// Transition, legality, termination, and visibility semantics for one game.
///
/// Implementations must be pure functions of the state they are given -- no
/// hidden global game state -- so the orchestrator's defensive-copy and
/// filtering discipline is meaningful. `transition` returns a new state rather
/// than mutating in place; the orchestrator treats states as immutable values.
pub trait Rules {
    type State;
    type Action;

    /// Builds the initial state for the given players.
    fn initial_state(&self, players: &[Player]) -> Self::State;

    /// The player whose turn it is in `state`.
    fn current_player(&self, state: &Self::State) -> Player;

    /// All actions `player` may legally take from `state`. Empty iff the
    /// player has no move (typically only at terminal states).
    fn available_actions(&self, player: &Player, state: &Self::State) -> Vec<Self::Action>;

    /// The successor of `state` after `action`. Callers must only pass
    /// actions drawn from `available_actions`.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether the game is over in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// A player-scoped view of `state`, hiding information that player should
    /// not see. Identity for perfect-information games.
    fn filter_state(&self, state: &Self::State, player: &Player) -> Self::State;

    /// A defensive copy of `state`, safe to hand outside the orchestrator.
    fn copy_state(&self, state: &Self::State) -> Self::State;
}
