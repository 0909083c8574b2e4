use anchor_lang::prelude::*;

use crate::pick::{PickId, PICK_ID_SPACE};

/// One minted ticket. Created at purchase, closed on claim; closing the
/// account is the claim nullifier.
#[account]
pub struct Ticket {
    pub id: u64,
    pub owner: Pubkey,
    pub game_id: u64,
    pub pick_id: PickId,
    pub bump: u8,
}

impl Space for Ticket {
    const INIT_SPACE: usize = 8 // id
        + 32 // owner
        + 8 // game_id
        + PICK_ID_SPACE // pick_id
        + 1; // bump
}
