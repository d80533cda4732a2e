use bincode::{config::standard, serde::decode_from_slice};
use rand::RngCore;

use crate::{
    handlers::{broadcast, send, send_error},
    net::ServerNetworkHandle,
    session::Session,
};
use common::{
    net::AppChannel,
    protocol::{ClientMessage, ServerMessage},
};

pub fn handle_messages(
    network: &mut dyn ServerNetworkHandle,
    session: &mut Session,
    rng: &mut dyn RngCore,
) {
    for client_id in network.clients_id() {
        while let Some(data) = network.receive_message(client_id, AppChannel::ReliableOrdered) {
            let Ok((message, _)) = decode_from_slice::<ClientMessage, _>(&data, standard()) else {
                eprintln!("Client {} sent malformed data. Disconnecting.", client_id);
                network.disconnect(client_id);
                continue;
            };

            match message {
                ClientMessage::Join(name) => handle_join(network, session, client_id, &name),
                ClientMessage::SubmitAnswer(answer) => {
                    handle_answer(network, session, rng, client_id, answer);
                }
            }
        }
    }
}

fn handle_join(
    network: &mut dyn ServerNetworkHandle,
    session: &mut Session,
    client_id: u64,
    name: &str,
) {
    match session.join(client_id, name) {
        Ok(name) => {
            println!("Client {} joined the lobby as '{}'.", client_id, name);
            broadcast(
                network,
                AppChannel::ReliableOrdered,
                &ServerMessage::PlayerList {
                    names: session.player_names(),
                },
            );

            if session.ready_to_start() {
                let seconds = session.start_countdown();
                println!("Enough players present; {}s countdown started.", seconds);
                broadcast(
                    network,
                    AppChannel::ReliableOrdered,
                    &ServerMessage::Countdown { seconds },
                );
            }
        }
        Err(err) => {
            eprintln!("Client {} join rejected: {}", client_id, err);
            send_error(network, client_id, err.to_string());
        }
    }
}

fn handle_answer(
    network: &mut dyn ServerNetworkHandle,
    session: &mut Session,
    rng: &mut dyn RngCore,
    client_id: u64,
    answer: i32,
) {
    match session.submit_answer(client_id, answer, rng) {
        Ok(outcome) => {
            send(
                network,
                client_id,
                AppChannel::ReliableOrdered,
                &ServerMessage::AnswerResult {
                    correct: outcome.correct,
                    correct_answer: (!outcome.correct).then_some(outcome.correct_answer),
                },
            );
            send(
                network,
                client_id,
                AppChannel::ReliableOrdered,
                &ServerMessage::NewProblem {
                    problem: outcome.next.to_string(),
                },
            );
        }
        Err(err) => {
            send_error(network, client_id, err.to_string());
        }
    }
}
