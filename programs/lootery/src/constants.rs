pub const BPS_DENOMINATOR: u64 = 10_000;

pub const MIN_GAME_PERIOD: u64 = 600;              // shortest allowed round, 10 minutes

pub const REQUEST_TIMEOUT: i64 = 3_600;            // re-issue window for a stuck randomness request
pub const REQUEST_DEADLINE: i64 = 30;              // deadline handed to the oracle per request

pub const SHUFFLE_ROUNDS: u32 = 4;                 // Feistel rounds for the ball draw

pub const LOTTERY_SEED: &[u8] = b"lottery";
pub const ROUND_SEED: &[u8] = b"round";
pub const TICKET_SEED: &[u8] = b"ticket";
pub const PICKS_SEED: &[u8] = b"picks";
pub const VAULT_SEED: &[u8] = b"vault";
pub const OPERATIONAL_SEED: &[u8] = b"operational";
