//! Networked turn orchestration: listener, broker, orchestrator, participant.

pub mod broker;
pub mod config;
pub mod listener;
pub mod orchestrator;
pub mod participant;

pub use broker::Broker;
pub use config::NetConfig;
pub use listener::{Listener, SocketState};
pub use orchestrator::Orchestrator;
pub use participant::Participant;
