use std::collections::HashSet;
use std::time::Duration;

use tokio::net::TcpStream;

use turnwire::{Broker, NetConfig, NetError, Player};

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("player-{i}"))).collect()
}

#[tokio::test]
async fn ports_are_distinct_and_above_the_floor() {
    let config = NetConfig::default();
    let broker = Broker::initialize(&players(4), &config)
        .await
        .expect("broker init failed");

    let ports = broker.ports_by_player();
    assert_eq!(ports.len(), 4);

    let distinct: HashSet<u16> = ports.values().copied().collect();
    assert_eq!(distinct.len(), 4);
    assert!(ports.values().all(|&port| port >= config.port_floor));

    broker.shutdown().await;
}

#[tokio::test]
async fn empty_player_set_is_rejected() {
    let result = Broker::initialize(&[], &NetConfig::default()).await;
    assert!(matches!(result, Err(NetError::NoPlayers)));
}

#[tokio::test]
async fn duplicate_players_are_rejected() {
    let twins = vec![Player::new("twin"), Player::new("twin")];
    let result = Broker::initialize(&twins, &NetConfig::default()).await;
    assert!(matches!(result, Err(NetError::DuplicatePlayer(_))));
}

#[tokio::test]
async fn observation_is_idempotent_before_any_connection() {
    let broker = Broker::initialize(&players(2), &NetConfig::default())
        .await
        .expect("broker init failed");

    for _ in 0..3 {
        assert!(!broker.all_connected());
        assert!(!broker.any_failed());
    }

    broker.shutdown().await;
}

#[tokio::test]
async fn await_ready_resolves_only_once_every_peer_connects() {
    let config = NetConfig::default();
    let broker = Broker::initialize(&players(2), &config)
        .await
        .expect("broker init failed");

    let ports: Vec<u16> = broker.ports_by_player().values().copied().collect();

    // One peer connected, one missing: readiness must still be pending.
    let _first = TcpStream::connect(("127.0.0.1", ports[0]))
        .await
        .expect("first peer connect failed");
    let pending = tokio::time::timeout(Duration::from_millis(400), broker.await_ready()).await;
    assert!(pending.is_err(), "await_ready resolved with a peer missing");

    let _second = TcpStream::connect(("127.0.0.1", ports[1]))
        .await
        .expect("second peer connect failed");
    let ready = tokio::time::timeout(Duration::from_secs(2), broker.await_ready())
        .await
        .expect("await_ready did not resolve");
    assert!(ready);

    // Repeated observation after readiness stays stable.
    assert!(broker.all_connected());
    assert!(!broker.any_failed());
    assert!(broker.await_ready().await);

    broker.shutdown().await;
}

#[tokio::test]
async fn shutdown_is_idempotent_with_accepts_still_pending() {
    let broker = Broker::initialize(&players(2), &NetConfig::default())
        .await
        .expect("broker init failed");

    // No peer ever connects; shutdown must still complete promptly.
    tokio::time::timeout(Duration::from_secs(2), broker.shutdown())
        .await
        .expect("shutdown hung on pending accepts");
    tokio::time::timeout(Duration::from_secs(2), broker.shutdown())
        .await
        .expect("second shutdown hung");
}
