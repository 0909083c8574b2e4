use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PICKS_SEED, ROUND_SEED, TICKET_SEED},
    enums::GameState,
    errors::LooteryError,
    events::TicketPurchased,
    pick, Lottery, PickIndex, Round, Ticket,
};

#[derive(Accounts)]
#[instruction(recipient: Pubkey, picks: Vec<u8>)]
pub struct OwnerPick<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ LooteryError::Unauthorized
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        mut,
        seeds = [ROUND_SEED, lottery.key().as_ref(), lottery.current_game_id.to_le_bytes().as_ref()],
        bump = round.bump
    )]
    pub round: Account<'info, Round>,

    #[account(
        init,
        payer = authority,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [TICKET_SEED, lottery.key().as_ref(), lottery.ticket_counter.to_le_bytes().as_ref()],
        bump
    )]
    pub ticket: Account<'info, Ticket>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + PickIndex::INIT_SPACE,
        seeds = [
            PICKS_SEED,
            lottery.key().as_ref(),
            lottery.current_game_id.to_le_bytes().as_ref(),
            pick::encode(&picks).as_ref(),
        ],
        bump
    )]
    pub pick_index: Account<'info, PickIndex>,

    pub system_program: Program<'info, System>,
}

impl<'info> OwnerPick<'info> {
    /// Mints a ticket exactly like `purchase`, minus the payment and the fee
    /// accounting. The jackpot is untouched.
    pub fn owner_pick(
        &mut self,
        recipient: Pubkey,
        picks: Vec<u8>,
        bumps: OwnerPickBumps,
    ) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);

        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        pick::validate(&picks, self.lottery.num_picks, self.lottery.max_ball_value)?;
        let pick_id = pick::encode(&picks);

        let game_id = self.lottery.current_game_id;
        let ticket_id = self.lottery.ticket_counter;

        self.lottery.ticket_counter = ticket_id
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        self.round.record_sale()?;

        self.ticket.set_inner(Ticket {
            id: ticket_id,
            owner: recipient,
            game_id,
            pick_id,
            bump: bumps.ticket,
        });

        self.pick_index.game_id = game_id;
        self.pick_index.pick_id = pick_id;
        self.pick_index.bump = bumps.pick_index;
        self.pick_index.count = self
            .pick_index
            .count
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        emit!(TicketPurchased {
            game_id,
            ticket_id,
            recipient,
            pick_id,
        });

        Ok(())
    }
}
