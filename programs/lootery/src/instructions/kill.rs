use anchor_lang::prelude::*;

use crate::{
    constants::LOTTERY_SEED, enums::GameState, errors::LooteryError,
    events::ApocalypseDeclared, Lottery,
};

#[derive(Accounts)]
pub struct Kill<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ LooteryError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,
}

impl<'info> Kill<'info> {
    /// Declares the current round the last one. Once it finalises, every
    /// write operation refuses with GameInactive; claims stay open.
    pub fn kill(&mut self) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);

        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        // Apocalypse, once declared, is fixed
        require!(
            self.lottery.apocalypse_game_id == 0,
            LooteryError::UnexpectedState
        );

        let final_game_id = self.lottery.current_game_id;

        self.lottery.apocalypse_game_id = final_game_id
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        emit!(ApocalypseDeclared { final_game_id });

        Ok(())
    }
}
