use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    constants::{LOTTERY_SEED, OPERATIONAL_SEED, REQUEST_DEADLINE, REQUEST_TIMEOUT, ROUND_SEED},
    enums::GameState,
    errors::LooteryError,
    events::{DrawSkipped, JackpotRollover, RandomnessRequested},
    Lottery, Round,
};

#[derive(Accounts)]
pub struct Draw<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

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

    /// Needed only when the round closes without tickets: the skip path
    /// finalises immediately and opens this round.
    #[account(
        init,
        payer = caller,
        space = 8 + Round::INIT_SPACE,
        seeds = [
            ROUND_SEED,
            lottery.key().as_ref(),
            lottery.current_game_id.saturating_add(1).to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub next_round: Option<Account<'info, Round>>,

    /// Holds the lamports that pay for oracle requests.
    #[account(
        mut,
        seeds = [OPERATIONAL_SEED, lottery.key().as_ref()],
        bump
    )]
    pub operational_vault: SystemAccount<'info>,

    /// CHECK: request fee recipient; must be the configured oracle
    #[account(
        mut,
        address = lottery.randomiser @ LooteryError::CallerNotRandomiser
    )]
    pub randomiser: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Draw<'info> {
    pub fn draw(&mut self, bumps: DrawBumps) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);

        let now = Clock::get()?.unix_timestamp;

        match self.lottery.state {
            GameState::Purchase => {
                let deadline = self
                    .round
                    .started_at
                    .saturating_add(self.lottery.game_period as i64);

                require!(now >= deadline, LooteryError::WaitLonger);

                if self.round.tickets_sold == 0 {
                    self.skip_draw(now, bumps)
                } else {
                    self.request_randomness(now, bumps)
                }
            }
            // Re-issue only once the in-flight request has gone stale
            GameState::DrawPending => {
                require!(
                    now >= self.lottery.request_issued_at.saturating_add(REQUEST_TIMEOUT),
                    LooteryError::RequestAlreadyInFlight
                );

                self.request_randomness(now, bumps)
            }
        }
    }

    /// Nothing to draw: fold the pot into the next round's jackpot and open
    /// it without touching the oracle.
    fn skip_draw(&mut self, now: i64, bumps: DrawBumps) -> Result<()> {
        let game_id = self.lottery.current_game_id;

        emit!(DrawSkipped { game_id });

        self.lottery.rollover(0, false)?;
        let next_game_id = self.lottery.advance_game()?;

        let next_round = self
            .next_round
            .as_mut()
            .ok_or(LooteryError::UnexpectedState)?;
        let next_round_bump = bumps
            .next_round
            .ok_or(LooteryError::UnexpectedState)?;

        next_round.set_inner(Round::open(next_game_id, now, next_round_bump));

        emit!(JackpotRollover {
            game_id,
            jackpot_after: self.lottery.jackpot,
            unclaimed_payouts_after: self.lottery.unclaimed_payouts,
        });

        Ok(())
    }

    fn request_randomness(&mut self, now: i64, bumps: DrawBumps) -> Result<()> {
        // The next round is opened by the fulfilment callback, not here. A
        // stray placeholder at that address would block the callback's init,
        // so reject (and thereby roll back) any eager creation.
        require!(self.next_round.is_none(), LooteryError::UnexpectedState);

        let fee = self.lottery.request_fee;

        require!(
            self.operational_vault.lamports() >= fee,
            LooteryError::InsufficientOperationalFunds
        );

        let lottery_key = self.lottery.key();

        let seeds: &[&[u8]] = &[
            OPERATIONAL_SEED,
            lottery_key.as_ref(),
            &[bumps.operational_vault],
        ];

        let ix = system_instruction::transfer(
            &self.operational_vault.key(),
            &self.randomiser.key(),
            fee,
        );

        invoke_signed(
            &ix,
            &[
                self.operational_vault.to_account_info(),
                self.randomiser.to_account_info(),
                self.system_program.to_account_info(),
            ],
            &[seeds],
        )?;

        let request_id = self.lottery.issue_request(now)?;

        emit!(RandomnessRequested {
            game_id: self.lottery.current_game_id,
            request_id,
            deadline: now.saturating_add(REQUEST_DEADLINE),
        });

        Ok(())
    }
}
