use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount, Transfer};

use crate::{
    constants::{LOTTERY_SEED, PICKS_SEED, ROUND_SEED, TICKET_SEED},
    enums::GameState,
    errors::LooteryError,
    events::TicketPurchased,
    pick, Lottery, PickIndex, Round, Ticket,
};

#[derive(Accounts)]
#[instruction(recipient: Pubkey, picks: Vec<u8>)]
pub struct Purchase<'info> {
    #[account(mut)]
    pub purchaser: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
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
        payer = purchaser,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [TICKET_SEED, lottery.key().as_ref(), lottery.ticket_counter.to_le_bytes().as_ref()],
        bump
    )]
    pub ticket: Account<'info, Ticket>,

    #[account(
        init_if_needed,
        payer = purchaser,
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

    #[account(
        mut,
        constraint = purchaser_token_account.mint == lottery.prize_token_mint
            @ LooteryError::InvalidTicketPrice
    )]
    pub purchaser_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = vault.key() == lottery.vault @ LooteryError::InvalidTicketPrice
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Purchase<'info> {
    pub fn purchase(
        &mut self,
        recipient: Pubkey,
        picks: Vec<u8>,
        bumps: PurchaseBumps,
    ) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);

        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        pick::validate(&picks, self.lottery.num_picks, self.lottery.max_ball_value)?;
        let pick_id = pick::encode(&picks);

        // Pull the ticket price into the vault
        let cpi_ctx = CpiContext::new(
            self.token_program.to_account_info(),
            Transfer {
                from: self.purchaser_token_account.to_account_info(),
                to: self.vault.to_account_info(),
                authority: self.purchaser.to_account_info(),
            },
        );

        anchor_spl::token::transfer(cpi_ctx, self.lottery.ticket_price)?;

        // Split the price between community fees and the jackpot
        self.lottery.accrue_ticket_sale()?;

        let game_id = self.lottery.current_game_id;
        let ticket_id = self.lottery.ticket_counter;

        self.lottery.ticket_counter = ticket_id
            .checked_add(1)
            .ok_or(LooteryError::MathOverflow)?;

        self.round.record_sale()?;

        // Mint the ticket to the recipient
        self.ticket.set_inner(Ticket {
            id: ticket_id,
            owner: recipient,
            game_id,
            pick_id,
            bump: bumps.ticket,
        });

        // Index the pick so winners can be counted in O(1) after the draw
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
