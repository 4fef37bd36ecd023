//! Networked turn orchestration for abstract turn-based games.
//!
//! A central [`net::Orchestrator`] drives a game to completion while
//! delegating "which action to take" decisions to independent peer processes,
//! each reached over one TCP connection speaking a newline-framed JSON
//! protocol. Game semantics live entirely behind the [`game::Rules`] trait;
//! peers need only a [`policy::Policy`] and a copy of the rules.
//!
//! Setup is concurrent (one accept task per player, tracked by the
//! [`net::Broker`]); play is strictly sequential, with the orchestrator as
//! the single mutator of game state.

pub mod error;
pub mod game;
pub mod games;
pub mod net;
pub mod policy;
pub mod wire;

pub use error::{NetError, OrchestrationError, ParticipantError};
pub use game::{Player, Rules};
pub use net::{Broker, Listener, NetConfig, Orchestrator, Participant};
pub use policy::Policy;
