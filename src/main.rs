//! Loopback demo runner (default binary).
//!
//! Plays one complete game of tic-tac-toe between two random-policy
//! participants connected over local TCP, exercising the whole
//! broker/listener/orchestrator path. Set `RUST_LOG=info` to watch the
//! session unfold.

use anyhow::{bail, Context, Result};

use turnwire::games::tictactoe::TicTacToe;
use turnwire::policy::RandomPolicy;
use turnwire::{NetConfig, Orchestrator, Participant, Player};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let players = vec![Player::new("crosses"), Player::new("noughts")];
    let config = NetConfig::from_env();

    let mut orchestrator = Orchestrator::new(TicTacToe, &players, &config)
        .await
        .context("failed to broker listeners")?;

    // Out-of-band provisioning: in a real deployment these processes would be
    // launched by a bootstrap script against the advertised ports.
    for (player, port) in orchestrator.ports_by_player() {
        let participant = Participant::connect(TicTacToe, RandomPolicy::new(), &config.host, port)
            .await
            .with_context(|| format!("participant for {player} failed to connect"))?;
        tokio::spawn(participant.run());
    }

    if !orchestrator.await_ready().await {
        bail!("a participant failed to connect");
    }

    let ending = orchestrator.play_to_completion().await?;
    match ending.winner() {
        Some(mark) => println!("{mark:?} wins"),
        None => println!("draw"),
    }

    orchestrator.shutdown().await;
    Ok(())
}
