use std::time::Duration;

use rand::Rng;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use turnwire::game::{Player, Rules};
use turnwire::games::tictactoe::{TicTacToe, TicTacToeAction, TicTacToeState};
use turnwire::net::SocketState;
use turnwire::{Listener, NetError};

/// Binds a listener on a random high port, retrying if the draw collides with
/// a port already in use on the machine.
async fn bind_free_port() -> Listener {
    for _ in 0..16 {
        let port = rand::rng().random_range(20000..=65000);
        if let Ok(listener) = Listener::bind("127.0.0.1", port).await {
            return listener;
        }
    }
    panic!("could not find a free port to bind");
}

fn initial_state() -> TicTacToeState {
    TicTacToe.initial_state(&[Player::new("crosses"), Player::new("noughts")])
}

#[tokio::test]
async fn bind_rejects_port_zero() {
    let result = Listener::bind("127.0.0.1", 0).await;
    assert!(matches!(result, Err(NetError::InvalidPort(0))));
}

#[tokio::test]
async fn bind_rejects_occupied_port() {
    let listener = bind_free_port().await;
    let result = Listener::bind("127.0.0.1", listener.port()).await;
    assert!(matches!(result, Err(NetError::Bind { .. })));
}

#[tokio::test]
async fn second_accept_is_rejected() {
    let mut listener = bind_free_port().await;
    let port = listener.port();

    let client = tokio::spawn(async move {
        TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("connect failed")
    });

    listener.accept().await.expect("first accept failed");
    assert_eq!(listener.state(), SocketState::Connected);

    let result = listener.accept().await;
    assert!(matches!(
        result,
        Err(NetError::AcceptState {
            state: SocketState::Connected,
            ..
        })
    ));

    let _stream = client.await.unwrap();
    listener.disconnect().await;
}

#[tokio::test]
async fn request_action_requires_connection() {
    let mut listener = bind_free_port().await;
    let state = initial_state();
    let result = listener
        .request_action::<TicTacToeState, TicTacToeAction>(&state)
        .await;
    assert!(matches!(result, Err(NetError::NotConnected { .. })));
}

#[tokio::test]
async fn request_action_exchanges_one_line_each_way() {
    let mut listener = bind_free_port().await;
    let port = listener.port();

    // Peer reads the state line, checks it parses, answers one action line.
    let peer = tokio::spawn(async move {
        let stream = TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("connect failed");
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();
        let state_line = lines
            .next_line()
            .await
            .unwrap()
            .expect("expected a state line");
        let _state: TicTacToeState = serde_json::from_str(&state_line).unwrap();
        write_half
            .write_all(b"{\"row\":1,\"col\":2,\"mark\":\"X\"}\n")
            .await
            .unwrap();
        write_half.flush().await.unwrap();
    });

    listener.accept().await.expect("accept failed");
    let state = initial_state();
    let action: TicTacToeAction = tokio::time::timeout(
        Duration::from_secs(2),
        listener.request_action(&state),
    )
    .await
    .expect("exchange timed out")
    .expect("exchange failed");

    assert_eq!(action.row, 1);
    assert_eq!(action.col, 2);

    peer.await.unwrap();
    listener.disconnect().await;
}

#[tokio::test]
async fn peer_hangup_surfaces_transport_error() {
    let mut listener = bind_free_port().await;
    let port = listener.port();

    let peer = tokio::spawn(async move {
        let stream = TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("connect failed");
        // Hang up without answering anything.
        drop(stream);
    });

    listener.accept().await.expect("accept failed");
    peer.await.unwrap();

    let state = initial_state();
    let result = listener
        .request_action::<TicTacToeState, TicTacToeAction>(&state)
        .await;
    assert!(matches!(result, Err(NetError::Transport { .. })));
}

#[tokio::test]
async fn disconnect_is_idempotent_and_frees_the_port() {
    let mut listener = bind_free_port().await;
    let port = listener.port();

    let client = tokio::spawn(async move {
        TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("connect failed")
    });
    listener.accept().await.expect("accept failed");
    let _stream = client.await.unwrap();

    listener.disconnect().await;
    assert_eq!(listener.state(), SocketState::Closed);
    // Closing an already-closed listener is a no-op.
    listener.disconnect().await;

    // The port is free for a new session.
    let rebound = Listener::bind("127.0.0.1", port)
        .await
        .expect("port was not freed");
    assert_eq!(rebound.port(), port);
}
