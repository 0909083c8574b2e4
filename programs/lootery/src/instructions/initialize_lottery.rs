use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::{LOTTERY_SEED, MIN_GAME_PERIOD, ROUND_SEED, VAULT_SEED},
    enums::GameState,
    errors::LooteryError,
    Lottery, Round,
};

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump,
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = authority,
        space = 8 + Round::INIT_SPACE,
        seeds = [ROUND_SEED, lottery.key().as_ref(), 0u64.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Account<'info, Round>,

    /// CHECK: PDA authority for vault
    #[account(
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = prize_token_mint,
        associated_token::authority = vault_authority
    )]
    pub vault: Account<'info, TokenAccount>,

    pub prize_token_mint: Account<'info, Mint>,

    /// CHECK: off-chain oracle key that will sign randomness fulfilments
    pub randomiser: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeLottery<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn initialize_lottery(
        &mut self,
        num_picks: u8,
        max_ball_value: u8,
        game_period: u64,
        ticket_price: u64,
        community_fee_bps: u16,
        seed_jackpot_delay: i64,
        seed_jackpot_min_value: u64,
        request_fee: u64,
        bumps: InitializeLotteryBumps,
    ) -> Result<()> {
        // Ball domain is [1, max_ball_value]; u8 already caps it at 255
        require!(max_ball_value >= 1, LooteryError::InvalidBallValue);

        require!(
            num_picks >= 1 && num_picks <= max_ball_value,
            LooteryError::InvalidNumPicks
        );

        require!(game_period >= MIN_GAME_PERIOD, LooteryError::InvalidGamePeriod);

        require!(ticket_price > 0, LooteryError::InvalidTicketPrice);

        require!(
            community_fee_bps <= 10_000,
            LooteryError::InvalidCommunityFeeBps
        );

        require!(
            seed_jackpot_delay > 0 && seed_jackpot_min_value > 0,
            LooteryError::InvalidSeedJackpotConfig
        );

        let now = Clock::get()?.unix_timestamp;

        self.lottery.set_inner(Lottery {
            authority: self.authority.key(),
            randomiser: self.randomiser.key(),
            prize_token_mint: self.prize_token_mint.key(),
            vault: self.vault.key(),
            num_picks,
            max_ball_value,
            game_period,
            ticket_price,
            community_fee_bps,
            seed_jackpot_delay,
            seed_jackpot_min_value,
            request_fee,

            state: GameState::Purchase,
            current_game_id: 0,
            apocalypse_game_id: 0,

            jackpot: 0,
            unclaimed_payouts: 0,
            accrued_community_fees: 0,

            ticket_counter: 0,
            last_seeded_at: 0,
            request_id: 0,
            request_issued_at: 0,
            // Ids start at 1 so that 0 always means "no request in flight"
            next_request_id: 1,

            bump: bumps.lottery,
        });

        self.round.set_inner(Round::open(0, now, bumps.round));

        Ok(())
    }
}
