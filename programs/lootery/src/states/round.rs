use anchor_lang::prelude::*;

use crate::errors::LooteryError;
use crate::pick::{PickId, EMPTY_PICK_ID, PICK_ID_SPACE};

#[account]
pub struct Round {
    pub game_id: u64,
    pub tickets_sold: u64,
    pub started_at: i64,
    /// All-zero until the round has been drawn.
    pub winning_pick_id: PickId,
    /// Number of winning tickets, snapshotted at finalisation.
    pub winners: u64,
    /// Winning claims paid so far; co-winners split the residual pool.
    pub claims: u64,
    pub bump: u8,
}

impl Space for Round {
    const INIT_SPACE: usize = 8 // game_id
        + 8 // tickets_sold
        + 8 // started_at
        + PICK_ID_SPACE // winning_pick_id
        + 8 // winners
        + 8 // claims
        + 1; // bump
}

impl Round {
    pub fn open(game_id: u64, started_at: i64, bump: u8) -> Self {
        Self {
            game_id,
            tickets_sold: 0,
            started_at,
            winning_pick_id: EMPTY_PICK_ID,
            winners: 0,
            claims: 0,
            bump,
        }
    }

    pub fn record_sale(&mut self) -> Result<()> {
        self.tickets_sold = self
            .tickets_sold
            .checked_add(1)
            .ok_or(LooteryError::TicketsSoldOverflow)?;

        Ok(())
    }

    pub fn remaining_winners(&self) -> u64 {
        self.winners.saturating_sub(self.claims)
    }
}
