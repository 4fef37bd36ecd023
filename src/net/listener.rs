//! Per-player server-socket endpoint.
//!
//! A `Listener` owns one bound server socket for exactly one player, accepts
//! exactly one inbound connection, and then performs synchronous
//! state-out/action-in exchanges over it, one per turn. The exchange is
//! strictly request/response, so the transport needs no sequence numbers or
//! acknowledgements.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::error::NetError;
use crate::wire;

/// Lifecycle of a listener's sockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketState {
    /// Bound, no accept attempted yet.
    Listening,
    /// An accept call is in flight.
    AwaitingAccept,
    /// Exactly one peer connection is established.
    Connected,
    /// The accept call failed; the listener is unusable.
    Failed,
    /// Explicitly shut down; the port is freed.
    Closed,
}

/// One player's network endpoint.
pub struct Listener {
    port: u16,
    state: SocketState,
    socket: Option<TcpListener>,
    conn: Option<BufReader<TcpStream>>,
}

impl Listener {
    /// Binds a server socket on `host:port`.
    ///
    /// Valid ports are the closed interval `[1, 65535]`; the `u16` port type
    /// carries the upper bound and port 0 is rejected explicitly (an
    /// ephemeral-port bind would leave the broker unable to advertise the
    /// port it promised a player).
    pub async fn bind(host: &str, port: u16) -> Result<Self, NetError> {
        if port == 0 {
            return Err(NetError::InvalidPort(port));
        }
        let socket = TcpListener::bind((host, port))
            .await
            .map_err(|source| NetError::Bind {
                host: host.to_string(),
                port,
                source,
            })?;
        Ok(Self {
            port,
            state: SocketState::Listening,
            socket: Some(socket),
            conn: None,
        })
    }

    /// Blocks until exactly one inbound connection is established.
    ///
    /// May be invoked at most once per listener; any later call fails fast
    /// with [`NetError::AcceptState`] rather than silently re-accepting.
    pub async fn accept(&mut self) -> Result<(), NetError> {
        if self.state != SocketState::Listening {
            return Err(NetError::AcceptState {
                port: self.port,
                state: self.state,
            });
        }
        let socket = self.socket.as_ref().ok_or(NetError::AcceptState {
            port: self.port,
            state: self.state,
        })?;

        self.state = SocketState::AwaitingAccept;
        match socket.accept().await {
            Ok((stream, peer)) => {
                log::info!("established connection on port {} from {}", self.port, peer);
                self.conn = Some(BufReader::new(stream));
                self.state = SocketState::Connected;
                Ok(())
            }
            Err(source) => {
                log::error!("accept failed on port {}: {}", self.port, source);
                self.state = SocketState::Failed;
                Err(NetError::Connection {
                    port: self.port,
                    source,
                })
            }
        }
    }

    /// Sends `state` as one line and awaits the peer's one-line action reply.
    ///
    /// Requires an established connection. Any I/O failure is fatal to this
    /// call and not retried here; retry policy, if any, belongs to the caller.
    /// There is deliberately no timeout: a connected peer that never answers
    /// hangs the call (wrap in `tokio::time::timeout` for a deadline).
    pub async fn request_action<S, A>(&mut self, state: &S) -> Result<A, NetError>
    where
        S: Serialize,
        A: DeserializeOwned,
    {
        if self.state != SocketState::Connected {
            return Err(NetError::NotConnected { port: self.port });
        }
        let conn = self.conn.as_mut().ok_or(NetError::NotConnected { port: self.port })?;

        let line = wire::encode_line(state)?;
        let port = self.port;
        let transport = |source| NetError::Transport { port, source };

        let stream = conn.get_mut();
        stream.write_all(line.as_bytes()).await.map_err(transport)?;
        stream.write_all(b"\n").await.map_err(transport)?;
        stream.flush().await.map_err(transport)?;

        let mut reply = String::new();
        let read = conn.read_line(&mut reply).await.map_err(transport)?;
        if read == 0 {
            return Err(NetError::Transport {
                port,
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "peer closed the connection",
                ),
            });
        }
        wire::decode_line(&reply)
    }

    /// Closes the peer connection if open, then the listening socket, freeing
    /// the port. Idempotent: closing an already-closed listener is a no-op.
    pub async fn disconnect(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = conn.get_mut().shutdown().await {
                log::warn!("error closing client connection on port {}: {}", self.port, e);
            } else {
                log::info!("client connection on port {} closed", self.port);
            }
        }
        if self.socket.take().is_some() {
            log::info!("listening socket on port {} closed", self.port);
        }
        self.state = SocketState::Closed;
    }

    /// The bound port; valid any time after `bind`.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> SocketState {
        self.state
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("port", &self.port)
            .field("state", &self.state)
            .finish()
    }
}
