pub mod messages;
pub mod timer;

pub use messages::handle_messages;
pub use timer::tick_second;

use bincode::{config::standard, serde::encode_to_vec};

use crate::net::ServerNetworkHandle;
use common::{net::AppChannel, protocol::ServerMessage};

pub(crate) fn send(
    network: &mut dyn ServerNetworkHandle,
    client_id: u64,
    channel: AppChannel,
    message: &ServerMessage,
) {
    let payload = encode_to_vec(message, standard())
        .unwrap_or_else(|_| panic!("failed to serialize {}", message.variant_name()));
    network.send_message(client_id, channel, payload);
}

pub(crate) fn broadcast(
    network: &mut dyn ServerNetworkHandle,
    channel: AppChannel,
    message: &ServerMessage,
) {
    let payload = encode_to_vec(message, standard())
        .unwrap_or_else(|_| panic!("failed to serialize {}", message.variant_name()));
    network.broadcast_message(channel, payload);
}

pub(crate) fn send_error(network: &mut dyn ServerNetworkHandle, client_id: u64, message: String) {
    send(
        network,
        client_id,
        AppChannel::ReliableOrdered,
        &ServerMessage::Error { message },
    );
}
