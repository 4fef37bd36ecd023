//! Turn orchestrator: drives one game from initial to terminal state by
//! alternating "ask the rules who goes next" and "ask that player's listener
//! what they do".
//!
//! Connection setup is concurrent, but play is strictly sequential: the
//! orchestrator is the single mutator of game state, so no lock guards the
//! state itself.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::OrchestrationError;
use crate::game::{Player, Rules};
use crate::net::broker::Broker;
use crate::net::config::NetConfig;

/// Owns the authoritative game state and the brokered connections for one
/// session. Create it, hand the advertised ports to the peer processes, await
/// readiness, then drive turns.
pub struct Orchestrator<R: Rules> {
    rules: R,
    broker: Broker,
    state: R::State,
}

impl<R> Orchestrator<R>
where
    R: Rules,
    R::State: Serialize + Debug,
    R::Action: DeserializeOwned + PartialEq + Debug,
{
    /// Brokers one listener per player and establishes the initial state.
    /// Accepts begin immediately; the caller provisions peers against
    /// [`ports_by_player`](Self::ports_by_player) out of band.
    pub async fn new(
        rules: R,
        players: &[Player],
        config: &NetConfig,
    ) -> Result<Self, OrchestrationError> {
        let broker = Broker::initialize(players, config).await?;
        let state = rules.initial_state(players);
        Ok(Self {
            rules,
            broker,
            state,
        })
    }

    /// Snapshot of each player's assigned port.
    pub fn ports_by_player(&self) -> std::collections::HashMap<Player, u16> {
        self.broker.ports_by_player()
    }

    pub fn num_players(&self) -> usize {
        self.broker.num_players()
    }

    /// Blocks until every peer is connected or some accept has failed;
    /// returns whether the session is fully connected.
    pub async fn await_ready(&self) -> bool {
        self.broker.await_ready().await
    }

    async fn ensure_connected(&self) -> Result<(), OrchestrationError> {
        if self.broker.all_connected() {
            return Ok(());
        }
        if self.broker.await_ready().await {
            Ok(())
        } else {
            Err(OrchestrationError::Setup {
                failed: self.broker.failed_count(),
                total: self.broker.num_players(),
            })
        }
    }

    /// Performs one step: resolve the current player's listener, send them
    /// their filtered view, validate the returned action against the legal
    /// set, and apply the transition. Returns a defensive copy of the new
    /// state.
    ///
    /// An action the orchestrator did not itself validate is never applied;
    /// on any error the state is unchanged.
    pub async fn advance_single_action(&mut self) -> Result<R::State, OrchestrationError> {
        self.ensure_connected().await?;
        if self.rules.is_terminal(&self.state) {
            return Err(OrchestrationError::Complete);
        }

        let player = self.rules.current_player(&self.state);
        let slot = self
            .broker
            .slot(&player)
            .ok_or_else(|| OrchestrationError::UnknownPlayer {
                player: player.clone(),
                known: self.broker.known_players(),
            })?;

        let legal = self.rules.available_actions(&player, &self.state);
        let visible = self.rules.filter_state(&self.state, &player);
        let action: R::Action = slot.listener.lock().await.request_action(&visible).await?;

        if !legal.contains(&action) {
            return Err(OrchestrationError::IllegalAction {
                player,
                action: format!("{action:?}"),
                legal: format!("{legal:?}"),
            });
        }

        self.state = self.rules.transition(&self.state, &action);
        Ok(self.current_state())
    }

    /// Steps until the rules report a terminal state. Returns a defensive
    /// copy of the ending state.
    pub async fn play_to_completion(&mut self) -> Result<R::State, OrchestrationError> {
        self.ensure_connected().await?;
        while !self.rules.is_terminal(&self.state) {
            self.advance_single_action().await?;
        }
        log::info!("ending state for game: {:?}", self.state);
        Ok(self.current_state())
    }

    /// Steps until it is `player`'s turn or the state is terminal, letting
    /// callers interleave observation with play.
    pub async fn advance_until_player_turn(
        &mut self,
        player: &Player,
    ) -> Result<R::State, OrchestrationError> {
        if self.broker.slot(player).is_none() {
            return Err(OrchestrationError::UnknownPlayer {
                player: player.clone(),
                known: self.broker.known_players(),
            });
        }
        self.ensure_connected().await?;

        let mut turns = 0usize;
        while self.rules.current_player(&self.state) != *player
            && !self.rules.is_terminal(&self.state)
        {
            self.advance_single_action().await?;
            turns += 1;
            log::debug!(
                "advanced {} turns awaiting player {}; current player: {}",
                turns,
                player,
                self.rules.current_player(&self.state)
            );
        }
        Ok(self.current_state())
    }

    /// A defensive copy of the authoritative state.
    pub fn current_state(&self) -> R::State {
        self.rules.copy_state(&self.state)
    }

    /// A player-scoped view of the current state.
    pub fn current_state_filtered_for_player(&self, player: &Player) -> R::State {
        self.rules.filter_state(&self.state, player)
    }

    /// Disconnects every listener; idempotent.
    pub async fn shutdown(&self) {
        self.broker.shutdown().await;
    }
}
