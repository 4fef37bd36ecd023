//! Connection broker: one listener per player, concurrent accepts, aggregate
//! progress tracking.
//!
//! Port allocation and the player-to-listener map are decided fully before
//! any accept task starts, so the map is read-only during the accept phase.
//! The only concurrently mutated values are the two atomic counters; each
//! accept task increments exactly one of them exactly once.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::Mutex;

use crate::error::NetError;
use crate::game::Player;
use crate::net::config::NetConfig;
use crate::net::listener::Listener;

pub(crate) struct Slot {
    pub(crate) port: u16,
    pub(crate) listener: Arc<Mutex<Listener>>,
}

/// Allocates collision-free ports for a set of players and drives all accepts
/// concurrently. Connection failures are terminal for the whole session:
/// there is no reconnection or replacement-port retry.
pub struct Broker {
    slots: HashMap<Player, Slot>,
    connected: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    poll_interval: std::time::Duration,
    // Pending accept tasks, aborted on shutdown so a never-connecting peer
    // cannot wedge a listener's lock forever.
    accept_tasks: std::sync::Mutex<Vec<tokio::task::JoinHandle<()>>>,
}

/// Draws an unreserved port uniformly from `[floor, 65535]`.
fn draw_port(used: &HashSet<u16>, floor: u16) -> u16 {
    let mut rng = rand::rng();
    loop {
        let port = rng.random_range(floor..=u16::MAX);
        if !used.contains(&port) {
            return port;
        }
    }
}

impl Broker {
    /// Binds one listener per player on a distinct random port and submits
    /// one accept task per player. Tasks complete independently; one
    /// player's failure never cancels the others.
    pub async fn initialize(players: &[Player], config: &NetConfig) -> Result<Self, NetError> {
        if players.is_empty() {
            return Err(NetError::NoPlayers);
        }
        let capacity = usize::from(u16::MAX - config.port_floor) + 1;
        assert!(
            players.len() <= capacity,
            "more players ({}) than ports available ({})",
            players.len(),
            capacity
        );

        let mut used = HashSet::with_capacity(players.len());
        let mut slots = HashMap::with_capacity(players.len());
        for player in players {
            if slots.contains_key(player) {
                return Err(NetError::DuplicatePlayer(player.clone()));
            }
            let port = draw_port(&used, config.port_floor);
            used.insert(port);

            let listener = Listener::bind(&config.host, port).await?;
            log::info!("mapping player {} to port {}", player, port);
            slots.insert(
                player.clone(),
                Slot {
                    port,
                    listener: Arc::new(Mutex::new(listener)),
                },
            );
        }

        let broker = Self {
            slots,
            connected: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            poll_interval: config.poll_interval,
            accept_tasks: std::sync::Mutex::new(Vec::with_capacity(players.len())),
        };
        broker.spawn_accepts();
        Ok(broker)
    }

    fn spawn_accepts(&self) {
        let mut tasks = self.accept_tasks.lock().expect("accept task list poisoned");
        for (player, slot) in &self.slots {
            let player = player.clone();
            let listener = Arc::clone(&slot.listener);
            let connected = Arc::clone(&self.connected);
            let failed = Arc::clone(&self.failed);
            let handle = tokio::spawn(async move {
                let outcome = listener.lock().await.accept().await;
                match outcome {
                    Ok(()) => {
                        let total = connected.fetch_add(1, Ordering::SeqCst) + 1;
                        log::info!("client for {} connected, {} total connections", player, total);
                    }
                    Err(e) => {
                        let total = failed.fetch_add(1, Ordering::SeqCst) + 1;
                        log::error!(
                            "client for {} failed to connect ({}), {} total failures",
                            player,
                            e,
                            total
                        );
                    }
                }
            });
            tasks.push(handle);
        }
    }

    /// Snapshot of each player's assigned port, for provisioning peer
    /// processes out of band.
    pub fn ports_by_player(&self) -> HashMap<Player, u16> {
        self.slots
            .iter()
            .map(|(player, slot)| (player.clone(), slot.port))
            .collect()
    }

    pub fn num_players(&self) -> usize {
        self.slots.len()
    }

    /// True iff every player's accept has succeeded.
    pub fn all_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst) == self.slots.len()
    }

    /// True iff any player's accept has failed.
    pub fn any_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst) != 0
    }

    pub(crate) fn failed_count(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Blocks until the session is fully connected or some accept has failed,
    /// polling at the configured interval. Returns whether every client
    /// connected. Setup has no timeout: a peer that never connects hangs the
    /// session, as the caller opted into by configuring that peer.
    pub async fn await_ready(&self) -> bool {
        loop {
            if self.all_connected() || self.any_failed() {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        let ready = !self.any_failed();
        if ready {
            log::info!("all {} clients connected successfully", self.slots.len());
        } else {
            log::error!("a client had a problem connecting");
        }
        ready
    }

    /// Disconnects every listener. Idempotent and safe in any session state;
    /// accepts still in flight are aborted first, which releases their
    /// listener locks.
    pub async fn shutdown(&self) {
        let pending: Vec<_> = {
            let mut tasks = self.accept_tasks.lock().expect("accept task list poisoned");
            tasks.drain(..).collect()
        };
        for task in pending {
            task.abort();
            // Cancelled tasks report a JoinError; completed ones just join.
            let _ = task.await;
        }
        for slot in self.slots.values() {
            slot.listener.lock().await.disconnect().await;
        }
    }

    pub(crate) fn slot(&self, player: &Player) -> Option<&Slot> {
        self.slots.get(player)
    }

    pub(crate) fn known_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.slots.keys().cloned().collect();
        players.sort();
        players
    }
}
