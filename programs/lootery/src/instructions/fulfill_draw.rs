use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, PICKS_SEED, ROUND_SEED},
    enums::GameState,
    errors::LooteryError,
    events::{GameFinalised, JackpotRollover},
    feistel, pick, Lottery, PickIndex, Round,
};

#[derive(Accounts)]
pub struct FulfillDraw<'info> {
    #[account(mut)]
    pub randomiser: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = randomiser @ LooteryError::CallerNotRandomiser
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
        payer = randomiser,
        space = 8 + Round::INIT_SPACE,
        seeds = [
            ROUND_SEED,
            lottery.key().as_ref(),
            lottery.current_game_id.saturating_add(1).to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub next_round: Account<'info, Round>,

    /// CHECK: the index entry at the drawn winning pick. The winning pick is
    /// only known once the seed is consumed, so the address is re-derived and
    /// verified in the handler; an empty account means zero winners.
    pub winning_pick_index: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> FulfillDraw<'info> {
    pub fn fulfill_draw(
        &mut self,
        request_id: u64,
        randomness: Vec<[u8; 32]>,
        bumps: FulfillDrawBumps,
    ) -> Result<()> {
        require!(
            self.lottery.state == GameState::DrawPending,
            LooteryError::UnexpectedState
        );

        self.lottery.consume_request(request_id)?;

        require!(!randomness.is_empty(), LooteryError::InsufficientRandomWords);

        let game_id = self.lottery.current_game_id;
        let lottery_key = self.lottery.key();

        // Derive the winning set from the first random word
        let balls = feistel::draw_balls(
            &randomness[0],
            self.lottery.num_picks,
            self.lottery.max_ball_value,
        );
        let winning_pick_id = pick::encode(&balls);

        self.round.winning_pick_id = winning_pick_id;

        // The oracle computes the winning pick off-chain with the same
        // deterministic draw and supplies the matching index entry; prove it
        // handed us the right one before trusting its count.
        let (expected_index, _) = Pubkey::find_program_address(
            &[
                PICKS_SEED,
                lottery_key.as_ref(),
                game_id.to_le_bytes().as_ref(),
                winning_pick_id.as_ref(),
            ],
            &crate::ID,
        );

        require!(
            self.winning_pick_index.key() == expected_index,
            LooteryError::WinningPickAccountMismatch
        );

        let winners = if self.winning_pick_index.data_is_empty() {
            0
        } else {
            require!(
                self.winning_pick_index.owner == &crate::ID,
                LooteryError::WinningPickAccountMismatch
            );

            let data = self.winning_pick_index.data.borrow();
            let index = PickIndex::try_deserialize(&mut &data[..])
                .map_err(|_| LooteryError::WinningPickAccountMismatch)?;
            index.count
        };

        self.round.winners = winners;

        emit!(GameFinalised {
            game_id,
            winning_balls: balls,
            winners,
        });

        // A pending draw implies tickets were sold, so a terminal round here
        // always hands the whole pot to its participants.
        let terminal = self.lottery.is_terminal_round(game_id);
        self.lottery.rollover(winners, terminal)?;

        let now = Clock::get()?.unix_timestamp;
        let next_game_id = self.lottery.advance_game()?;

        self.next_round
            .set_inner(Round::open(next_game_id, now, bumps.next_round));

        emit!(JackpotRollover {
            game_id,
            jackpot_after: self.lottery.jackpot,
            unclaimed_payouts_after: self.lottery.unclaimed_payouts,
        });

        Ok(())
    }
}
