use std::ops::RangeInclusive;

// Lobby:
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const MAX_NAME_LENGTH: usize = 32;

// Round:
pub const COUNTDOWN_SECS: u32 = 10;
pub const ROUND_SECS: u32 = 120;
pub const OPERAND_RANGE: RangeInclusive<i32> = 1..=20;
