use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};

use crate::{
    constants::LOTTERY_SEED, enums::GameState, errors::LooteryError, events::JackpotSeeded,
    Lottery,
};

#[derive(Accounts)]
pub struct SeedJackpot<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        constraint = funder_token_account.mint == lottery.prize_token_mint
            @ LooteryError::InsufficientJackpotSeed
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = vault.key() == lottery.vault @ LooteryError::InsufficientJackpotSeed
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> SeedJackpot<'info> {
    pub fn seed_jackpot(&mut self, amount: u64) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);

        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        let now = Clock::get()?.unix_timestamp;

        // Enforces the minimum seed value and the rate limit
        self.lottery.record_jackpot_seed(amount, now)?;

        let cpi_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.funder_token_account.to_account_info(),
                to: self.vault.to_account_info(),
                authority: self.funder.to_account_info(),
            },
        );

        anchor_spl::token::transfer(cpi_ctx, amount)?;

        emit!(JackpotSeeded {
            from: self.funder.key(),
            amount,
            jackpot_after: self.lottery.jackpot,
        });

        Ok(())
    }
}
