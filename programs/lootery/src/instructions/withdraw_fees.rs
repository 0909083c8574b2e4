use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};

use crate::{
    constants::{LOTTERY_SEED, VAULT_SEED},
    errors::LooteryError,
    events::FeesWithdrawn,
    Lottery,
};

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
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

    #[account(
        mut,
        constraint = vault.key() == lottery.vault @ LooteryError::Unauthorized
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = authority_token_account.mint == lottery.prize_token_mint
            @ LooteryError::Unauthorized
    )]
    pub authority_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

impl<'info> WithdrawFees<'info> {
    pub fn withdraw_fees(&mut self, bumps: WithdrawFeesBumps) -> Result<()> {
        let amount = self.lottery.accrued_community_fees;

        self.lottery.accrued_community_fees = 0;

        if amount > 0 {
            let lottery_key = self.lottery.key();

            let seeds: &[&[u8]] = &[VAULT_SEED, lottery_key.as_ref(), &[bumps.vault_authority]];

            let signer = &[seeds];

            let cpi_ctx = CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Transfer {
                    from: self.vault.to_account_info(),
                    to: self.authority_token_account.to_account_info(),
                    authority: self.vault_authority.to_account_info(),
                },
                signer,
            );

            anchor_spl::token::transfer(cpi_ctx, amount)?;
        }

        emit!(FeesWithdrawn {
            to: self.authority_token_account.key(),
            amount,
        });

        Ok(())
    }
}
