use std::{fmt, ops::RangeInclusive};

use rand::RngCore;

use common::{
    constants::{COUNTDOWN_SECS, MIN_PLAYERS, OPERAND_RANGE, ROUND_SECS},
    name::{NameError, sanitize_name},
    problem::Problem,
    protocol::{
        GAME_IN_PROGRESS_MESSAGE, GAME_NOT_STARTED_MESSAGE, INVALID_NAME_MESSAGE,
        PLAYER_NOT_FOUND_MESSAGE, LeaderboardEntry,
    },
};

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub min_players: usize,
    pub countdown_secs: u32,
    pub round_secs: u32,
    pub operands: RangeInclusive<i32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            countdown_secs: COUNTDOWN_SECS,
            round_secs: ROUND_SECS,
            operands: OPERAND_RANGE,
        }
    }
}

/// Lifecycle phase of the one global session. The remaining seconds
/// live inside the variant that owns them, so the countdown timer and
/// the round timer can never both be armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Countdown { remaining_secs: u32 },
    Active { remaining_secs: u32 },
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Countdown { .. } => "Countdown",
            Phase::Active { .. } => "Active",
            Phase::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub client_id: u64,
    pub name: String,
    pub score: u32,
    /// Answer to the problem most recently issued to this player.
    /// `Some` for every player while the phase is `Active`.
    pub answer: Option<i32>,
}

#[derive(Debug, PartialEq)]
pub enum JoinError {
    GameInProgress,
    InvalidName(NameError),
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::GameInProgress => write!(f, "{}", GAME_IN_PROGRESS_MESSAGE),
            JoinError::InvalidName(_) => write!(f, "{}", INVALID_NAME_MESSAGE),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SubmitError {
    NotActive,
    UnknownPlayer,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotActive => write!(f, "{}", GAME_NOT_STARTED_MESSAGE),
            SubmitError::UnknownPlayer => write!(f, "{}", PLAYER_NOT_FOUND_MESSAGE),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: i32,
    pub next: Problem,
}

#[derive(Debug, PartialEq)]
pub enum CountdownStep {
    Tick { remaining_secs: u32 },
    Elapsed,
}

#[derive(Debug, PartialEq)]
pub enum RoundStep {
    Tick { remaining_secs: u32 },
    Over,
}

/// One global session shared by every connection: the roster and the
/// lifecycle phase. Players are stored in join order, which doubles as
/// the stable tie-break for the leaderboard.
pub struct Session {
    config: GameConfig,
    phase: Phase,
    players: Vec<Player>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            players: Vec::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn player_name(&self, client_id: u64) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.client_id == client_id)
            .map(|p| p.name.as_str())
    }

    fn player_mut(&mut self, client_id: u64) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.client_id == client_id)
    }

    /// Adds the connection to the roster. Rejected while a round is
    /// active and for blank names. A connection that joins again keeps
    /// its place in the roster but starts over with a fresh score.
    pub fn join(&mut self, client_id: u64, name: &str) -> Result<String, JoinError> {
        if matches!(self.phase, Phase::Active { .. }) {
            return Err(JoinError::GameInProgress);
        }

        let name = sanitize_name(name).map_err(JoinError::InvalidName)?;

        if let Some(player) = self.player_mut(client_id) {
            player.name = name.clone();
            player.score = 0;
        } else {
            self.players.push(Player {
                client_id,
                name: name.clone(),
                score: 0,
                answer: None,
            });
        }

        Ok(name)
    }

    /// Removes the connection in any phase. A round that drops below
    /// the minimum keeps running to completion.
    pub fn remove(&mut self, client_id: u64) -> Option<Player> {
        let index = self.players.iter().position(|p| p.client_id == client_id)?;
        Some(self.players.remove(index))
    }

    /// The countdown trigger is evaluated on join events only, so after
    /// a round ends a fresh countdown waits for the next join even if
    /// enough players are still connected.
    pub fn ready_to_start(&self) -> bool {
        self.phase == Phase::Idle && self.players.len() >= self.config.min_players
    }

    pub fn start_countdown(&mut self) -> u32 {
        debug_assert_eq!(self.phase, Phase::Idle);
        self.phase = Phase::Countdown {
            remaining_secs: self.config.countdown_secs,
        };
        self.config.countdown_secs
    }

    /// Advances the countdown by one second. Returns `None` when no
    /// countdown is running.
    pub fn countdown_step(&mut self) -> Option<CountdownStep> {
        let Phase::Countdown { remaining_secs } = &mut self.phase else {
            return None;
        };

        *remaining_secs -= 1;
        if *remaining_secs > 0 {
            Some(CountdownStep::Tick {
                remaining_secs: *remaining_secs,
            })
        } else {
            Some(CountdownStep::Elapsed)
        }
    }

    /// Begins the round: one shared first problem for everybody, after
    /// which each player advances through their own problems.
    pub fn start_round(&mut self, rng: &mut dyn RngCore) -> Problem {
        let problem = Problem::generate(rng, self.config.operands.clone());
        for player in &mut self.players {
            player.answer = Some(problem.answer);
        }
        self.phase = Phase::Active {
            remaining_secs: self.config.round_secs,
        };
        problem
    }

    pub fn round_duration_secs(&self) -> u32 {
        self.config.round_secs
    }

    /// Advances the round by one second. Returns `None` when no round
    /// is running. `Over` leaves the session in `Finished`; the caller
    /// collects the leaderboard with [`Session::finish_round`].
    pub fn round_step(&mut self) -> Option<RoundStep> {
        let Phase::Active { remaining_secs } = &mut self.phase else {
            return None;
        };

        *remaining_secs -= 1;
        if *remaining_secs > 0 {
            Some(RoundStep::Tick {
                remaining_secs: *remaining_secs,
            })
        } else {
            self.phase = Phase::Finished;
            Some(RoundStep::Over)
        }
    }

    /// Computes the leaderboard, resets every score to zero, and
    /// returns the session to `Idle`, ready for a new countdown
    /// trigger.
    pub fn finish_round(&mut self) -> Vec<LeaderboardEntry> {
        debug_assert_eq!(self.phase, Phase::Finished);

        let mut leaderboard: Vec<LeaderboardEntry> = self
            .players
            .iter()
            .map(|p| LeaderboardEntry {
                name: p.name.clone(),
                score: p.score,
            })
            .collect();
        // Stable sort, so ties stay in join order.
        leaderboard.sort_by(|a, b| b.score.cmp(&a.score));

        for player in &mut self.players {
            player.score = 0;
            player.answer = None;
        }
        self.phase = Phase::Idle;

        leaderboard
    }

    /// Checks the submission against the answer most recently issued
    /// to this player (exact integer equality), then issues them a
    /// fresh problem either way.
    pub fn submit_answer(
        &mut self,
        client_id: u64,
        answer: i32,
        rng: &mut dyn RngCore,
    ) -> Result<AnswerOutcome, SubmitError> {
        if !matches!(self.phase, Phase::Active { .. }) {
            return Err(SubmitError::NotActive);
        }

        let operands = self.config.operands.clone();
        let Some(player) = self.player_mut(client_id) else {
            return Err(SubmitError::UnknownPlayer);
        };

        let expected = player
            .answer
            .expect("every player has a problem while the round is active");

        let correct = answer == expected;
        if correct {
            player.score += 1;
        }

        let next = Problem::generate(rng, operands);
        player.answer = Some(next.answer);

        Ok(AnswerOutcome {
            correct,
            correct_answer: expected,
            next,
        })
    }
}
