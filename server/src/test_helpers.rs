use std::collections::{HashMap, VecDeque};

use bincode::{
    config::standard,
    serde::{decode_from_slice, encode_to_vec},
};

use crate::net::{ServerNetworkEvent, ServerNetworkHandle};
use common::{
    net::AppChannel,
    protocol::{ClientMessage, ServerMessage},
};

/// In-memory stand-in for the renet transport. Tests queue client
/// messages and network events, run the handlers, then inspect the
/// decoded per-client and broadcast logs.
#[derive(Default)]
pub struct MockServerNetwork {
    events_to_process: VecDeque<ServerNetworkEvent>,
    client_messages: HashMap<u64, VecDeque<Vec<u8>>>,
    sent_messages: HashMap<u64, Vec<Vec<u8>>>,
    broadcast_messages: Vec<Vec<u8>>,
    pub disconnected_clients: Vec<u64>,
    client_ids: Vec<u64>,
}

impl MockServerNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&mut self, client_id: u64) {
        self.client_ids.push(client_id);
        self.client_messages.entry(client_id).or_default();
        self.sent_messages.entry(client_id).or_default();
    }

    pub fn queue_event(&mut self, event: ServerNetworkEvent) {
        self.events_to_process.push_back(event);
    }

    pub fn queue_client_message(&mut self, client_id: u64, message: &ClientMessage) {
        let payload = encode_to_vec(message, standard()).expect("failed to serialize test message");
        self.queue_raw_message(client_id, payload);
    }

    pub fn queue_raw_message(&mut self, client_id: u64, message: Vec<u8>) {
        self.client_messages
            .entry(client_id)
            .or_default()
            .push_back(message);
    }

    pub fn sent_to(&mut self, client_id: u64) -> Vec<ServerMessage> {
        self.sent_messages
            .entry(client_id)
            .or_default()
            .iter()
            .map(|data| decode(data))
            .collect()
    }

    pub fn broadcasts(&self) -> Vec<ServerMessage> {
        self.broadcast_messages.iter().map(|data| decode(data)).collect()
    }

    pub fn clear_outgoing(&mut self) {
        self.sent_messages.values_mut().for_each(Vec::clear);
        self.broadcast_messages.clear();
    }
}

fn decode(data: &[u8]) -> ServerMessage {
    decode_from_slice::<ServerMessage, _>(data, standard())
        .expect("failed to decode server message")
        .0
}

impl ServerNetworkHandle for MockServerNetwork {
    fn get_event(&mut self) -> Option<ServerNetworkEvent> {
        self.events_to_process.pop_front()
    }

    fn clients_id(&self) -> Vec<u64> {
        self.client_ids.clone()
    }

    fn receive_message(&mut self, client_id: u64, _channel: AppChannel) -> Option<Vec<u8>> {
        self.client_messages
            .entry(client_id)
            .or_default()
            .pop_front()
    }

    fn send_message(&mut self, client_id: u64, _channel: AppChannel, message: Vec<u8>) {
        self.sent_messages
            .entry(client_id)
            .or_default()
            .push(message);
    }

    fn broadcast_message(&mut self, _channel: AppChannel, message: Vec<u8>) {
        self.broadcast_messages.push(message);
    }

    fn disconnect(&mut self, client_id: u64) {
        self.disconnected_clients.push(client_id);
        self.client_ids.retain(|&id| id != client_id);
    }
}
