use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};

use crate::{
    constants::{LOTTERY_SEED, ROUND_SEED, TICKET_SEED, VAULT_SEED},
    enums::GameState,
    errors::LooteryError,
    events::{ConsolationClaimed, WinningsClaimed},
    Lottery, Round, Ticket,
};

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    // Closing the ticket is the claim nullifier: a second attempt fails at
    // account resolution.
    #[account(
        mut,
        seeds = [TICKET_SEED, lottery.key().as_ref(), ticket.id.to_le_bytes().as_ref()],
        bump = ticket.bump,
        constraint = ticket.owner == claimant.key() @ LooteryError::Unauthorized,
        close = claimant
    )]
    pub ticket: Account<'info, Ticket>,

    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.key().as_ref(), ticket.game_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    /// CHECK: PDA authority for vault
    #[account(
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault.key() == lottery.vault @ LooteryError::NoWin
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = claimant_token_account.mint == lottery.prize_token_mint
            @ LooteryError::NoWin
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> ClaimWinnings<'info> {
    pub fn claim_winnings(&mut self, bumps: ClaimWinningsBumps) -> Result<()> {
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        // Winners of round k claim during round k+1 only
        require!(
            self.ticket.game_id.saturating_add(1) == self.lottery.current_game_id,
            LooteryError::ClaimWindowMissed
        );

        let winning_pick_id = self.round.winning_pick_id;

        if self.round.winners == 0 && !self.lottery.is_active() {
            // The closed round was the apocalypse round and nobody hit the
            // winning pick: every ticket takes an equal consolation share.
            // The pool is deliberately not reduced; rounding dust remains.
            let payout = self.lottery.consolation_payout(self.round.tickets_sold)?;

            self.pay_out(payout, bumps)?;

            emit!(ConsolationClaimed {
                game_id: self.ticket.game_id,
                ticket_id: self.ticket.id,
                claimant: self.claimant.key(),
                payout,
            });
        } else if self.ticket.pick_id == winning_pick_id {
            let remaining = self.round.remaining_winners();

            let payout = self.lottery.take_winning_payout(remaining)?;

            self.round.claims = self
                .round
                .claims
                .checked_add(1)
                .ok_or(LooteryError::MathOverflow)?;

            self.pay_out(payout, bumps)?;

            emit!(WinningsClaimed {
                game_id: self.ticket.game_id,
                ticket_id: self.ticket.id,
                winner: self.claimant.key(),
                payout,
            });
        } else {
            return Err(LooteryError::NoWin.into());
        }

        Ok(())
    }

    fn pay_out(&self, payout: u64, bumps: ClaimWinningsBumps) -> Result<()> {
        if payout == 0 {
            return Ok(());
        }

        let lottery_key = self.lottery.key();

        let seeds: &[&[u8]] = &[VAULT_SEED, lottery_key.as_ref(), &[bumps.vault_authority]];

        let signer = &[seeds];

        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Transfer {
                from: self.vault.to_account_info(),
                to: self.claimant_token_account.to_account_info(),
                authority: self.vault_authority.to_account_info(),
            },
            signer,
        );

        anchor_spl::token::transfer(cpi_ctx, payout)
    }
}
