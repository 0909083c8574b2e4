use anchor_lang::prelude::*;

use crate::errors::LooteryError;

/// Canonical identifier of a pick set: the bitset with bit `b` set for every
/// ball `b` in the set. Ball 0 is never valid, so bit 0 is never set.
pub type PickId = [u8; 32];

/// Identifier of an undrawn round.
pub const EMPTY_PICK_ID: PickId = [0u8; 32];

/// Byte size of a [`PickId`]; `[u8; 32]` can't implement the foreign
/// `Space` trait directly (orphan rule), so structs embedding it compute
/// their `Space` impl manually using this constant.
pub const PICK_ID_SPACE: usize = 32;

/// Rejects a pick set unless it holds exactly `num_picks` strictly ascending
/// balls, all in `[1, max_ball_value]`. Strict ascendancy rules out
/// duplicates, so accepted sets are automatically distinct.
pub fn validate(picks: &[u8], num_picks: u8, max_ball_value: u8) -> Result<()> {
    require!(picks.len() == num_picks as usize, LooteryError::InvalidNumPicks);

    let mut last = 0u8;
    for &ball in picks {
        require!(ball >= 1 && ball <= max_ball_value, LooteryError::InvalidBallValue);
        require!(ball > last, LooteryError::UnsortedPicks);
        last = ball;
    }

    Ok(())
}

/// Encodes a pick set into its bitset identifier. Order-independent by
/// construction; callers are expected to have validated the set first.
pub fn encode(picks: &[u8]) -> PickId {
    let mut id = EMPTY_PICK_ID;
    for &ball in picks {
        id[(ball / 8) as usize] |= 1 << (ball % 8);
    }
    id
}

/// Decodes an identifier back into its ascending ball sequence.
pub fn decode(pick_id: &PickId) -> Vec<u8> {
    let mut picks = Vec::new();
    for ball in 1..=u8::MAX {
        if pick_id[(ball / 8) as usize] & (1 << (ball % 8)) != 0 {
            picks.push(ball);
        }
    }
    picks
}
