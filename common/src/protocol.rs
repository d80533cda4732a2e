use serde::{Deserialize, Serialize};

pub const GAME_IN_PROGRESS_MESSAGE: &str =
    "Game already in progress. Please wait for the next round.";
pub const INVALID_NAME_MESSAGE: &str = "Invalid name. Please enter a valid name.";
pub const GAME_NOT_STARTED_MESSAGE: &str = "Game has not started yet.";
pub const PLAYER_NOT_FOUND_MESSAGE: &str = "Player not found.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub enum ClientMessage {
    Join(String),
    SubmitAnswer(i32),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Error {
        message: String,
    },
    /// Current roster in join order, rebroadcast on every join and leave.
    PlayerList {
        names: Vec<String>,
    },
    Countdown {
        seconds: u32,
    },
    /// The round has begun. Every player starts on the same first
    /// problem; follow-ups are issued per player via `NewProblem`.
    GameStarted {
        duration_secs: u32,
        problem: String,
    },
    RoundTimer {
        seconds: u32,
    },
    NewProblem {
        problem: String,
    },
    AnswerResult {
        correct: bool,
        correct_answer: Option<i32>,
    },
    GameOver {
        leaderboard: Vec<LeaderboardEntry>,
    },
}

impl ServerMessage {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Error { .. } => "Error",
            Self::PlayerList { .. } => "PlayerList",
            Self::Countdown { .. } => "Countdown",
            Self::GameStarted { .. } => "GameStarted",
            Self::RoundTimer { .. } => "RoundTimer",
            Self::NewProblem { .. } => "NewProblem",
            Self::AnswerResult { .. } => "AnswerResult",
            Self::GameOver { .. } => "GameOver",
        }
    }
}

pub fn version() -> u64 {
    env!("CARGO_PKG_VERSION")
        .split('.')
        .next()
        .expect("failed to get major version")
        .parse()
        .expect("failed to parse major version")
}

#[cfg(test)]
mod tests {
    use bincode::{
        config::standard,
        serde::{decode_from_slice, encode_to_vec},
    };

    use super::*;

    #[test]
    fn client_messages_survive_a_wire_trip() {
        let message = ClientMessage::Join("Alice".to_string());
        let payload = encode_to_vec(&message, standard()).unwrap();
        let (decoded, _) = decode_from_slice::<ClientMessage, _>(&payload, standard()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn leaderboard_order_is_preserved_on_the_wire() {
        let message = ServerMessage::GameOver {
            leaderboard: vec![
                LeaderboardEntry {
                    name: "Bob".to_string(),
                    score: 5,
                },
                LeaderboardEntry {
                    name: "Alice".to_string(),
                    score: 2,
                },
            ],
        };

        let payload = encode_to_vec(&message, standard()).unwrap();
        let (decoded, _) = decode_from_slice::<ServerMessage, _>(&payload, standard()).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn variant_names_match_the_wire_vocabulary() {
        let message = ServerMessage::AnswerResult {
            correct: false,
            correct_answer: Some(-3),
        };
        assert_eq!(message.variant_name(), "AnswerResult");
    }
}
