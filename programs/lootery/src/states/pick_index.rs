use anchor_lang::prelude::*;

use crate::pick::{PickId, PICK_ID_SPACE};

/// Per-`(game, pick)` tally, created lazily on the first purchase of a pick.
/// Reading the entry at the winning pick counts the round's winners in O(1);
/// a missing entry means nobody bought that pick.
#[account]
pub struct PickIndex {
    pub game_id: u64,
    pub pick_id: PickId,
    pub count: u64,
    pub bump: u8,
}

impl Space for PickIndex {
    const INIT_SPACE: usize = 8 // game_id
        + PICK_ID_SPACE // pick_id
        + 8 // count
        + 1; // bump
}
