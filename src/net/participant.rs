//! Peer-side participant loop.
//!
//! Symmetric counterpart of the listener: connect to an assigned port, then
//! loop reading a state line, computing an action via a decision policy, and
//! writing the action line back. The participant must not send unless it has
//! just received a state, which the strict read-then-write loop enforces by
//! construction.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::{NetError, ParticipantError};
use crate::game::Rules;
use crate::policy::Policy;
use crate::wire;

/// One decision process speaking the line protocol. The participant carries
/// its own copy of the rules purely to enumerate legal actions and derive
/// whose turn a received state describes; it never advances state itself.
pub struct Participant<R, P> {
    rules: R,
    policy: P,
    port: u16,
    conn: BufReader<TcpStream>,
}

impl<R, P> Participant<R, P>
where
    R: Rules,
    R::State: DeserializeOwned,
    R::Action: Serialize,
    P: Policy<R::State, R::Action>,
{
    /// Connects to the orchestrator endpoint assigned to this participant's
    /// player.
    pub async fn connect(rules: R, policy: P, host: &str, port: u16) -> Result<Self, NetError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| NetError::Connection { port, source })?;
        log::info!("participant connected to {}:{}", host, port);
        Ok(Self {
            rules,
            policy,
            port,
            conn: BufReader::new(stream),
        })
    }

    /// Serves requests until the orchestrator hangs up, which is the normal
    /// end of a session and returns `Ok`.
    pub async fn run(mut self) -> Result<(), ParticipantError> {
        loop {
            let mut line = String::new();
            let read = self
                .conn
                .read_line(&mut line)
                .await
                .map_err(|source| NetError::Transport {
                    port: self.port,
                    source,
                })?;
            if read == 0 {
                log::info!("orchestrator closed the connection on port {}", self.port);
                return Ok(());
            }

            let state: R::State = wire::decode_line(&line)?;
            let player = self.rules.current_player(&state);
            let legal = self.rules.available_actions(&player, &state);
            let action = self
                .policy
                .choose(&state, &legal)
                .ok_or(ParticipantError::NoActionChosen)?;

            let reply = wire::encode_line(&action)?;
            let stream = self.conn.get_mut();
            let transport = |source| NetError::Transport {
                port: self.port,
                source,
            };
            stream.write_all(reply.as_bytes()).await.map_err(transport)?;
            stream.write_all(b"\n").await.map_err(transport)?;
            stream.flush().await.map_err(transport)?;
        }
    }
}
