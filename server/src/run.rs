use std::{
    net::{SocketAddr, UdpSocket},
    thread,
    time::{Duration, Instant},
};

use rand::RngCore;
use renet::RenetServer;
use renet_netcode::NetcodeServerTransport;

use crate::{
    handlers,
    net::{self, RenetServerNetworkHandle, ServerNetworkEvent, ServerNetworkHandle},
    session::{GameConfig, Session},
};
use common::{self, net::AppChannel, protocol::ServerMessage, time};

pub fn run_server(socket: UdpSocket, server_addr: SocketAddr) {
    let current_time = time::now();
    let protocol_id = common::protocol::version();

    let server_config = net::build_server_config(current_time, protocol_id, server_addr);
    let mut transport =
        NetcodeServerTransport::new(server_config, socket).expect("failed to create transport");
    let connection_config = common::net::connection_config();
    let mut server = RenetServer::new(connection_config);
    let mut session = Session::new(GameConfig::default());
    let mut rng = rand::rng();

    print_server_banner(protocol_id, server_addr);
    server_loop(&mut server, &mut transport, &mut session, &mut rng);
}

fn print_server_banner(protocol_id: u64, server_addr: SocketAddr) {
    println!("  Game version:   {}", protocol_id);
    println!("  Server address: {}", server_addr);
}

fn server_loop(
    server: &mut RenetServer,
    transport: &mut NetcodeServerTransport,
    session: &mut Session,
    rng: &mut dyn RngCore,
) {
    let mut last_updated = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        transport
            .update(duration, server)
            .expect("failed to update transport");
        server.update(duration);

        let mut network_handle = RenetServerNetworkHandle {
            server: &mut *server,
        };

        let phase_before = session.phase().name();
        process_events(&mut network_handle, session);
        handlers::handle_messages(&mut network_handle, session, rng);

        // A join can arm the countdown; its first tick lands a full
        // second later, and a stale tick from the previous phase never
        // carries over.
        if session.phase().name() != phase_before {
            last_tick = now;
        }

        if now.duration_since(last_tick) >= Duration::from_secs(1) {
            handlers::tick_second(&mut network_handle, session, rng);
            last_tick += Duration::from_secs(1);
        }

        transport.send_packets(server);
        thread::sleep(Duration::from_millis(16));
    }
}

pub fn process_events(network: &mut dyn ServerNetworkHandle, session: &mut Session) {
    while let Some(event) = network.get_event() {
        match event {
            ServerNetworkEvent::ClientConnected { client_id } => {
                println!("Client {} connected.", client_id);
            }
            ServerNetworkEvent::ClientDisconnected { client_id, reason } => {
                println!("Client {} disconnected: {}.", client_id, reason);
                if let Some(player) = session.remove(client_id) {
                    println!("'{}' left the game.", player.name);
                    handlers::broadcast(
                        network,
                        AppChannel::ReliableOrdered,
                        &ServerMessage::PlayerList {
                            names: session.player_names(),
                        },
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{session::GameConfig, test_helpers::MockServerNetwork};

    #[test]
    fn disconnect_of_a_player_rebroadcasts_the_roster() {
        let mut network = MockServerNetwork::new();
        let mut session = Session::new(GameConfig::default());

        session.join(1, "Alice").unwrap();
        session.join(2, "Bob").unwrap();

        network.queue_event(ServerNetworkEvent::ClientDisconnected {
            client_id: 1,
            reason: "timeout".to_string(),
        });

        process_events(&mut network, &mut session);

        assert_eq!(session.player_names(), vec!["Bob"]);
        assert_eq!(
            network.broadcasts(),
            vec![ServerMessage::PlayerList {
                names: vec!["Bob".to_string()]
            }]
        );
    }

    #[test]
    fn disconnect_of_a_spectator_changes_nothing() {
        let mut network = MockServerNetwork::new();
        let mut session = Session::new(GameConfig::default());

        session.join(1, "Alice").unwrap();

        network.queue_event(ServerNetworkEvent::ClientDisconnected {
            client_id: 9,
            reason: "timeout".to_string(),
        });

        process_events(&mut network, &mut session);

        assert_eq!(session.player_names(), vec!["Alice"]);
        assert!(network.broadcasts().is_empty());
    }
}
