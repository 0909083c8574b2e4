use anchor_lang::prelude::*;

#[event]
pub struct TicketPurchased {
    pub game_id: u64,
    pub ticket_id: u64,
    pub recipient: Pubkey,
    pub pick_id: [u8; 32],
}

#[event]
pub struct JackpotSeeded {
    pub from: Pubkey,
    pub amount: u64,
    pub jackpot_after: u64,
}

#[event]
pub struct RandomnessRequested {
    pub game_id: u64,
    pub request_id: u64,
    pub deadline: i64,
}

#[event]
pub struct DrawSkipped {
    pub game_id: u64,
}

#[event]
pub struct GameFinalised {
    pub game_id: u64,
    pub winning_balls: Vec<u8>,
    pub winners: u64,
}

#[event]
pub struct JackpotRollover {
    pub game_id: u64,
    pub jackpot_after: u64,
    pub unclaimed_payouts_after: u64,
}

#[event]
pub struct WinningsClaimed {
    pub game_id: u64,
    pub ticket_id: u64,
    pub winner: Pubkey,
    pub payout: u64,
}

#[event]
pub struct ConsolationClaimed {
    pub game_id: u64,
    pub ticket_id: u64,
    pub claimant: Pubkey,
    pub payout: u64,
}

#[event]
pub struct FeesWithdrawn {
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ApocalypseDeclared {
    pub final_game_id: u64,
}
