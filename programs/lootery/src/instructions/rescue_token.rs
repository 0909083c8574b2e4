use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};

use crate::{
    constants::{LOTTERY_SEED, VAULT_SEED},
    errors::LooteryError,
    Lottery,
};

#[derive(Accounts)]
pub struct RescueToken<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ LooteryError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,

    /// CHECK: PDA authority for vault
    #[account(
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Any token account held by the vault authority, the prize vault
    /// included.
    #[account(
        mut,
        constraint = token_account.owner == vault_authority.key()
            @ LooteryError::Unauthorized
    )]
    pub token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == token_account.mint @ LooteryError::Unauthorized
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> RescueToken<'info> {
    /// Transfers the unaccounted portion of a held token balance to the
    /// owner. For the prize vault that is whatever exceeds
    /// jackpot + unclaimed payouts + accrued fees; any other token was never
    /// accounted at all.
    pub fn rescue_token(&mut self, bumps: RescueTokenBumps) -> Result<()> {
        let accounted = if self.token_account.key() == self.lottery.vault {
            self.lottery
                .jackpot
                .checked_add(self.lottery.unclaimed_payouts)
                .ok_or(LooteryError::MathOverflow)?
                .checked_add(self.lottery.accrued_community_fees)
                .ok_or(LooteryError::MathOverflow)?
        } else {
            0
        };

        let amount = self
            .token_account
            .amount
            .checked_sub(accounted)
            .ok_or(LooteryError::MathOverflow)?;

        if amount == 0 {
            return Ok(());
        }

        let lottery_key = self.lottery.key();

        let seeds: &[&[u8]] = &[VAULT_SEED, lottery_key.as_ref(), &[bumps.vault_authority]];

        let signer = &[seeds];

        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            Transfer {
                from: self.token_account.to_account_info(),
                to: self.destination.to_account_info(),
                authority: self.vault_authority.to_account_info(),
            },
            signer,
        );

        anchor_spl::token::transfer(cpi_ctx, amount)?;

        Ok(())
    }
}
