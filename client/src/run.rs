use std::{
    net::{SocketAddr, UdpSocket},
    thread,
    time::{Duration, Instant},
};

use bincode::{
    config::standard,
    serde::{decode_from_slice, encode_to_vec},
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use renet::RenetClient;
use renet_netcode::{ClientAuthentication, NetcodeClientTransport};

use crate::view::View;
use common::{
    net::AppChannel,
    protocol::{ClientMessage, ServerMessage},
    time,
};

pub fn run_client(socket: UdpSocket, server_addr: SocketAddr, name: String) {
    let current_time = time::now();
    let protocol_id = common::protocol::version();
    let client_id = current_time.as_millis() as u64;

    let authentication = ClientAuthentication::Unsecure {
        protocol_id,
        client_id,
        server_addr,
        user_data: None,
    };
    let mut transport = NetcodeClientTransport::new(current_time, authentication, socket)
        .expect("failed to create transport");
    let mut client = RenetClient::new(common::net::connection_config());

    enable_raw_mode().expect("failed to enable raw mode");

    let mut view = View::new();
    let mut sent_join = false;
    let mut last_updated = Instant::now();

    loop {
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        client.update(duration);
        if let Err(e) = transport.update(duration, &mut client) {
            view.print_line(&format!("Connection lost: {}.", e));
            break;
        }

        if client.is_connected() {
            if !sent_join {
                view.print_line("Connected. Waiting for more players...");
                send(&mut client, &ClientMessage::Join(name.clone()));
                sent_join = true;
            }

            for channel in [AppChannel::ReliableOrdered, AppChannel::Unreliable] {
                while let Some(data) = client.receive_message(channel) {
                    match decode_from_slice::<ServerMessage, _>(&data, standard()) {
                        Ok((message, _)) => view.apply(message),
                        Err(_) => view.print_line("Received malformed data from server."),
                    }
                }
            }
        }

        if !poll_input(&mut client, &mut view) {
            break;
        }

        transport
            .send_packets(&mut client)
            .expect("failed to send packets");
        thread::sleep(Duration::from_millis(16));
    }

    disable_raw_mode().expect("failed to disable raw mode");
    println!();
    println!("Goodbye!");
}

/// Drains pending key events. Returns false when the player quits.
fn poll_input(client: &mut RenetClient, view: &mut View) -> bool {
    while event::poll(Duration::ZERO).expect("failed to poll for input") {
        let Event::Key(key) = event::read().expect("failed to read input") else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return false;
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => view.push_char(c),
            KeyCode::Backspace => view.backspace(),
            KeyCode::Enter => {
                if let Some(answer) = view.take_submission() {
                    send(client, &ClientMessage::SubmitAnswer(answer));
                }
            }
            _ => {}
        }
    }

    true
}

fn send(client: &mut RenetClient, message: &ClientMessage) {
    let payload = encode_to_vec(message, standard()).expect("failed to serialize client message");
    client.send_message(AppChannel::ReliableOrdered, payload);
}
