//! Error taxonomy for the networked turn-orchestration core.
//!
//! Every kind here is unrecoverable at the point it occurs; nothing is retried
//! internally. Accept failures during setup are recorded in the broker's
//! counters instead of crossing the task boundary, and only escalate into a
//! [`OrchestrationError::Setup`] once a caller awaits readiness.

use crate::game::Player;
use crate::net::SocketState;

/// Errors raised by listeners, the broker, and the wire codec.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("invalid port {0}: valid ports are 1..=65535")]
    InvalidPort(u16),

    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("accept failed on port {port}: {source}")]
    Connection { port: u16, source: std::io::Error },

    #[error("accept on port {port} rejected: listener is {state:?}")]
    AcceptState { port: u16, state: SocketState },

    #[error("no client connection on port {port}")]
    NotConnected { port: u16 },

    #[error("transport failure on port {port}: {source}")]
    Transport { port: u16, source: std::io::Error },

    #[error("malformed wire payload: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("cannot broker connections for an empty player set")]
    NoPlayers,

    #[error("duplicate player {0} in broker player set")]
    DuplicatePlayer(Player),
}

/// Errors raised while driving a game turn by turn.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("cannot drive the game: {failed} of {total} client connections failed")]
    Setup { failed: usize, total: usize },

    #[error("rules reported player {player} but the broker knows only {known:?}")]
    UnknownPlayer { player: Player, known: Vec<Player> },

    #[error("player {player} chose illegal action {action}; legal actions: {legal}")]
    IllegalAction {
        player: Player,
        action: String,
        legal: String,
    },

    #[error("game already reached a terminal state")]
    Complete,

    #[error(transparent)]
    Net(#[from] NetError),
}

/// Errors raised by the peer-side participant loop.
#[derive(Debug, thiserror::Error)]
pub enum ParticipantError {
    #[error("policy produced no action for the received state")]
    NoActionChosen,

    #[error(transparent)]
    Net(#[from] NetError),
}
