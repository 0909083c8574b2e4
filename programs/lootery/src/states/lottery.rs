use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::enums::GameState;
use crate::errors::LooteryError;

#[account]
#[derive(InitSpace)]
pub struct Lottery {
    // Immutable configuration, set once at initialisation.
    pub authority: Pubkey,
    pub randomiser: Pubkey,
    pub prize_token_mint: Pubkey,
    pub vault: Pubkey,
    pub num_picks: u8,
    pub max_ball_value: u8,
    pub game_period: u64,
    pub ticket_price: u64,
    pub community_fee_bps: u16,
    pub seed_jackpot_delay: i64,
    pub seed_jackpot_min_value: u64,
    pub request_fee: u64,

    // Round state machine.
    pub state: GameState,
    pub current_game_id: u64,
    pub apocalypse_game_id: u64,

    // Accounting scalars. The vault must always hold at least
    // jackpot + unclaimed_payouts + accrued_community_fees.
    pub jackpot: u64,
    pub unclaimed_payouts: u64,
    pub accrued_community_fees: u64,

    // Counters and the single-slot randomness request.
    pub ticket_counter: u64,
    pub last_seeded_at: i64,
    pub request_id: u64,
    pub request_issued_at: i64,
    pub next_request_id: u64,

    pub bump: u8,
}

impl Lottery {
    /// Writes are refused once the game id reaches the apocalypse round.
    pub fn is_active(&self) -> bool {
        self.apocalypse_game_id == 0 || self.current_game_id < self.apocalypse_game_id
    }

    /// True when `game_id` is the last round that will ever be drawn.
    pub fn is_terminal_round(&self, game_id: u64) -> bool {
        self.apocalypse_game_id != 0 && game_id + 1 == self.apocalypse_game_id
    }

    /// Splits one ticket price between the community fee and the jackpot.
    /// Returns the fee portion.
    pub fn accrue_ticket_sale(&mut self) -> Result<u64> {
        let fee = self
            .ticket_price
            .checked_mul(self.community_fee_bps as u64)
            .ok_or(LooteryError::MathOverflow)?
            .checked_div(BPS_DENOMINATOR)
            .ok_or(LooteryError::MathOverflow)?;

        let jackpot_share = self
            .ticket_price
            .checked_sub(fee)
            .ok_or(LooteryError::MathOverflow)?;

        self.accrued_community_fees = self
            .accrued_community_fees
            .checked_add(fee)
            .ok_or(LooteryError::MathOverflow)?;

        self.jackpot = self
            .jackpot
            .checked_add(jackpot_share)
            .ok_or(LooteryError::MathOverflow)?;

        Ok(fee)
    }

    pub fn record_jackpot_seed(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(
            amount >= self.seed_jackpot_min_value,
            LooteryError::InsufficientJackpotSeed
        );

        require!(
            now >= self.last_seeded_at.saturating_add(self.seed_jackpot_delay),
            LooteryError::RateLimited
        );

        self.jackpot = self
            .jackpot
            .checked_add(amount)
            .ok_or(LooteryError::MathOverflow)?;

        self.last_seeded_at = now;

        Ok(())
    }

    /// Allocates a fresh request id and moves the machine to DrawPending.
    /// Ids start at 1, so 0 always means "no request in flight".
    pub fn issue_request(&mut self, now: i64) -> Result<u64> {
        let request_id = self.next_request_id;

        self.next_request_id = self
            .next_request_id
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        self.request_id = request_id;
        self.request_issued_at = now;
        self.state = GameState::DrawPending;

        Ok(request_id)
    }

    /// Clears the request slot if and only if `request_id` matches it.
    pub fn consume_request(&mut self, request_id: u64) -> Result<()> {
        require!(
            self.request_id != 0 && self.request_id == request_id,
            LooteryError::RequestIdMismatch
        );

        self.request_id = 0;
        self.request_issued_at = 0;

        Ok(())
    }

    /// Round-closure accounting. Conserves `jackpot + unclaimed_payouts`
    /// across every branch:
    /// - terminal round: the whole pot becomes claimable, as winnings or as
    ///   the consolation pool;
    /// - no winners: the pot rolls into the next round's jackpot;
    /// - winners: they compete for the closing jackpot during the next round,
    ///   while last round's expired unclaimed payouts seed the next jackpot.
    pub fn rollover(&mut self, winners: u64, terminal: bool) -> Result<()> {
        let jackpot = self.jackpot;
        let unclaimed = self.unclaimed_payouts;

        let combined = jackpot
            .checked_add(unclaimed)
            .ok_or(LooteryError::MathOverflow)?;

        if terminal {
            self.unclaimed_payouts = combined;
            self.jackpot = 0;
        } else if winners == 0 {
            self.jackpot = combined;
            self.unclaimed_payouts = 0;
        } else {
            self.unclaimed_payouts = jackpot;
            self.jackpot = unclaimed;
        }

        Ok(())
    }

    pub fn advance_game(&mut self) -> Result<u64> {
        self.current_game_id = self
            .current_game_id
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        self.state = GameState::Purchase;

        Ok(self.current_game_id)
    }

    /// Equal integer share for one of `remaining_winners` co-winners, drawn
    /// from the residual pool. Dust accrues to later claimants.
    pub fn take_winning_payout(&mut self, remaining_winners: u64) -> Result<u64> {
        let payout = self
            .unclaimed_payouts
            .checked_div(remaining_winners)
            .ok_or(LooteryError::MathOverflow)?;

        self.unclaimed_payouts = self
            .unclaimed_payouts
            .checked_sub(payout)
            .ok_or(LooteryError::MathOverflow)?;

        Ok(payout)
    }

    /// Per-ticket consolation share for the terminal round. Deliberately does
    /// not reduce `unclaimed_payouts`: every ticket of that round receives the
    /// same share and the rounding dust stays behind.
    pub fn consolation_payout(&self, tickets_sold: u64) -> Result<u64> {
        self.unclaimed_payouts
            .checked_div(tickets_sold)
            .ok_or_else(|| LooteryError::MathOverflow.into())
    }
}
