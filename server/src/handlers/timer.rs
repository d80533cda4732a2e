use std::io::stdout;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};
use rand::RngCore;

use crate::{
    handlers::broadcast,
    net::ServerNetworkHandle,
    session::{CountdownStep, Phase, RoundStep, Session},
};
use common::{net::AppChannel, protocol::ServerMessage};

/// Advances whichever timer the current phase owns by one second. The
/// phase invariant guarantees at most one of them is armed, so a tick
/// can never land on the wrong timer.
pub fn tick_second(
    network: &mut dyn ServerNetworkHandle,
    session: &mut Session,
    rng: &mut dyn RngCore,
) {
    match session.phase() {
        Phase::Countdown { .. } => countdown_tick(network, session, rng),
        Phase::Active { .. } => round_tick(network, session),
        Phase::Idle | Phase::Finished => {}
    }
}

fn countdown_tick(
    network: &mut dyn ServerNetworkHandle,
    session: &mut Session,
    rng: &mut dyn RngCore,
) {
    match session.countdown_step() {
        Some(CountdownStep::Tick { remaining_secs }) => {
            let output = format!("Game starting in {}s...", remaining_secs);
            execute!(
                stdout(),
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                Print(output)
            )
            .expect("failed to print countdown line");

            broadcast(
                network,
                AppChannel::Unreliable,
                &ServerMessage::Countdown {
                    seconds: remaining_secs,
                },
            );
        }
        Some(CountdownStep::Elapsed) => {
            execute!(stdout(), MoveToColumn(0), Clear(ClearType::CurrentLine))
                .expect("failed to clear countdown line");

            let problem = session.start_round(rng);
            let duration_secs = session.round_duration_secs();
            println!("Round started ({}s). First problem: {}", duration_secs, problem);

            broadcast(
                network,
                AppChannel::ReliableOrdered,
                &ServerMessage::GameStarted {
                    duration_secs,
                    problem: problem.to_string(),
                },
            );
        }
        None => {}
    }
}

fn round_tick(network: &mut dyn ServerNetworkHandle, session: &mut Session) {
    match session.round_step() {
        Some(RoundStep::Tick { remaining_secs }) => {
            broadcast(
                network,
                AppChannel::Unreliable,
                &ServerMessage::RoundTimer {
                    seconds: remaining_secs,
                },
            );
        }
        Some(RoundStep::Over) => {
            // The final tick is still announced before the results.
            broadcast(
                network,
                AppChannel::Unreliable,
                &ServerMessage::RoundTimer { seconds: 0 },
            );

            let leaderboard = session.finish_round();
            println!("Round over. Back to the lobby.");

            broadcast(
                network,
                AppChannel::ReliableOrdered,
                &ServerMessage::GameOver { leaderboard },
            );
        }
        None => {}
    }
}
