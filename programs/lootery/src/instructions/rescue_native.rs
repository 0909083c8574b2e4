use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    constants::{LOTTERY_SEED, OPERATIONAL_SEED},
    errors::LooteryError,
    Lottery,
};

#[derive(Accounts)]
pub struct RescueNative<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ LooteryError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [OPERATIONAL_SEED, lottery.key().as_ref()],
        bump
    )]
    pub operational_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> RescueNative<'info> {
    /// Sweeps the operational lamports back to the owner. The whole balance
    /// is unaccounted: it exists only to pay oracle request fees.
    pub fn rescue_native(&mut self, bumps: RescueNativeBumps) -> Result<()> {
        let amount = self.operational_vault.lamports();

        if amount == 0 {
            return Ok(());
        }

        let lottery_key = self.lottery.key();

        let seeds: &[&[u8]] = &[
            OPERATIONAL_SEED,
            lottery_key.as_ref(),
            &[bumps.operational_vault],
        ];

        let ix = system_instruction::transfer(
            &self.operational_vault.key(),
            &self.authority.key(),
            amount,
        );

        invoke_signed(
            &ix,
            &[
                self.operational_vault.to_account_info(),
                self.authority.to_account_info(),
                self.system_program.to_account_info(),
            ],
            &[seeds],
        )?;

        Ok(())
    }
}
