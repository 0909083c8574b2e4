//! Lifecycle tests driving the round state machine, the accounting and the
//! draw pipeline in memory, in the same order the instruction handlers do.

use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::enums::GameState;
use crate::errors::LooteryError;
use crate::pick::PickId;
use crate::states::{Lottery, Round, Ticket};
use crate::{feistel, pick};

const PRICE: u64 = 100_000; // 0.1 at six decimals
const SEED_MIN: u64 = 10;
const SEED_DELAY: i64 = 3_600;
const PERIOD: u64 = 3_600;
const GENESIS: i64 = 1_000_000;

/// In-memory stand-in for the transactional host: one lottery, its rounds,
/// its tickets, the prize vault balance, and a clock.
struct Sim {
    lottery: Lottery,
    rounds: Vec<Round>,
    tickets: Vec<Ticket>,
    pick_counts: HashMap<(u64, PickId), u64>,
    vault: u64,
    now: i64,
}

impl Sim {
    fn new(num_picks: u8, max_ball_value: u8, community_fee_bps: u16) -> Self {
        Sim {
            lottery: Lottery {
                authority: Pubkey::new_unique(),
                randomiser: Pubkey::new_unique(),
                prize_token_mint: Pubkey::new_unique(),
                vault: Pubkey::new_unique(),
                num_picks,
                max_ball_value,
                game_period: PERIOD,
                ticket_price: PRICE,
                community_fee_bps,
                seed_jackpot_delay: SEED_DELAY,
                seed_jackpot_min_value: SEED_MIN,
                request_fee: 1_000,
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
                next_request_id: 1,
                bump: 255,
            },
            rounds: vec![Round::open(0, GENESIS, 255)],
            tickets: Vec::new(),
            pick_counts: HashMap::new(),
            vault: 0,
            now: GENESIS,
        }
    }

    fn advance_time(&mut self, seconds: i64) {
        self.now += seconds;
    }

    fn current_round(&mut self) -> &mut Round {
        let id = self.lottery.current_game_id as usize;
        &mut self.rounds[id]
    }

    fn purchase(&mut self, recipient: Pubkey, picks: &[u8]) -> Result<u64> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        pick::validate(picks, self.lottery.num_picks, self.lottery.max_ball_value)?;
        let pick_id = pick::encode(picks);

        self.vault += self.lottery.ticket_price;
        self.lottery.accrue_ticket_sale()?;

        let game_id = self.lottery.current_game_id;
        let ticket_id = self.lottery.ticket_counter;
        self.lottery.ticket_counter += 1;

        self.current_round().record_sale()?;

        self.tickets.push(Ticket {
            id: ticket_id,
            owner: recipient,
            game_id,
            pick_id,
            bump: 255,
        });

        *self.pick_counts.entry((game_id, pick_id)).or_insert(0) += 1;

        self.assert_funds_covered();
        Ok(ticket_id)
    }

    fn seed_jackpot(&mut self, amount: u64) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        self.lottery.record_jackpot_seed(amount, self.now)?;
        self.vault += amount;

        self.assert_funds_covered();
        Ok(())
    }

    /// `draw` followed, when tickets exist, by the oracle's fulfilment.
    fn draw_and_fulfill(&mut self, seed: [u8; 32]) -> Result<Vec<u8>> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        let game_id = self.lottery.current_game_id;
        let deadline = self.rounds[game_id as usize]
            .started_at
            .saturating_add(self.lottery.game_period as i64);
        require!(self.now >= deadline, LooteryError::WaitLonger);

        if self.rounds[game_id as usize].tickets_sold == 0 {
            // DrawSkipped path: no randomness request
            self.lottery.rollover(0, false)?;
            let next = self.lottery.advance_game()?;
            self.rounds.push(Round::open(next, self.now, 255));
            self.assert_funds_covered();
            return Ok(Vec::new());
        }

        let request_id = self.lottery.issue_request(self.now)?;
        assert_eq!(self.lottery.state, GameState::DrawPending);

        // Oracle callback
        self.lottery.consume_request(request_id)?;

        let balls = feistel::draw_balls(&seed, self.lottery.num_picks, self.lottery.max_ball_value);
        let winning_pick_id = pick::encode(&balls);

        let winners = *self
            .pick_counts
            .get(&(game_id, winning_pick_id))
            .unwrap_or(&0);

        let round = &mut self.rounds[game_id as usize];
        round.winning_pick_id = winning_pick_id;
        round.winners = winners;

        let terminal = self.lottery.is_terminal_round(game_id);
        self.lottery.rollover(winners, terminal)?;

        let next = self.lottery.advance_game()?;
        self.rounds.push(Round::open(next, self.now, 255));

        self.assert_funds_covered();
        Ok(balls)
    }

    fn claim(&mut self, ticket_id: u64) -> Result<u64> {
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );

        let pos = self
            .tickets
            .iter()
            .position(|t| t.id == ticket_id)
            .expect("ticket exists");
        let ticket = self.tickets[pos].clone();

        require!(
            ticket.game_id + 1 == self.lottery.current_game_id,
            LooteryError::ClaimWindowMissed
        );

        let round = &self.rounds[ticket.game_id as usize];

        let payout = if round.winners == 0 && !self.lottery.is_active() {
            self.lottery.consolation_payout(round.tickets_sold)?
        } else if ticket.pick_id == round.winning_pick_id {
            let remaining = round.remaining_winners();
            let payout = self.lottery.take_winning_payout(remaining)?;
            self.rounds[ticket.game_id as usize].claims += 1;
            payout
        } else {
            return Err(LooteryError::NoWin.into());
        };

        // Burn the ticket and move the funds out
        self.tickets.remove(pos);
        self.vault -= payout;

        Ok(payout)
    }

    fn kill(&mut self) -> Result<()> {
        require!(self.lottery.is_active(), LooteryError::GameInactive);
        require!(
            self.lottery.state == GameState::Purchase,
            LooteryError::UnexpectedState
        );
        require!(
            self.lottery.apocalypse_game_id == 0,
            LooteryError::UnexpectedState
        );

        self.lottery.apocalypse_game_id = self.lottery.current_game_id + 1;
        Ok(())
    }

    fn withdraw_fees(&mut self) -> u64 {
        let amount = self.lottery.accrued_community_fees;
        self.lottery.accrued_community_fees = 0;
        self.vault -= amount;
        self.assert_funds_covered();
        amount
    }

    /// The vault must always cover every named balance.
    fn assert_funds_covered(&self) {
        assert!(
            self.vault
                >= self.lottery.jackpot
                    + self.lottery.unclaimed_payouts
                    + self.lottery.accrued_community_fees,
            "vault {} cannot cover jackpot {} + unclaimed {} + fees {}",
            self.vault,
            self.lottery.jackpot,
            self.lottery.unclaimed_payouts,
            self.lottery.accrued_community_fees,
        );
    }
}

fn seed_word(tag: u8) -> [u8; 32] {
    let mut s = [0u8; 32];
    s[0] = tag;
    s
}

/// A valid pick that differs from `avoid`.
fn losing_picks(avoid: &[u8], num_picks: u8, max_ball_value: u8) -> Vec<u8> {
    let candidate: Vec<u8> = (1..=num_picks).collect();
    if candidate != avoid {
        return candidate;
    }
    (2..=num_picks + 1).map(|b| b.min(max_ball_value)).collect()
}

#[test]
fn happy_win_pays_the_whole_pot() {
    let mut sim = Sim::new(5, 69, 5_000);
    let buyer = Pubkey::new_unique();
    let seed = seed_word(42);

    sim.advance_time(10);
    sim.seed_jackpot(10_000_000).unwrap();

    // Buy exactly the set this seed will draw
    let winning = feistel::draw_balls(&seed, 5, 69);
    let ticket = sim.purchase(buyer, &winning).unwrap();

    assert_eq!(sim.lottery.jackpot, 10_000_000 + 50_000);
    assert_eq!(sim.lottery.accrued_community_fees, 50_000);

    sim.advance_time(PERIOD as i64);
    let balls = sim.draw_and_fulfill(seed).unwrap();
    assert_eq!(balls, winning);

    assert_eq!(sim.lottery.unclaimed_payouts, 10_050_000);
    assert_eq!(sim.lottery.jackpot, 0);
    assert_eq!(sim.lottery.current_game_id, 1);

    let payout = sim.claim(ticket).unwrap();
    assert_eq!(payout, 10_050_000);
    assert_eq!(sim.lottery.unclaimed_payouts, 0);

    assert_eq!(sim.withdraw_fees(), 50_000);
    assert_eq!(sim.vault, 0);
}

#[test]
fn no_winner_rolls_the_pot_forward() {
    let mut sim = Sim::new(5, 69, 5_000);
    let buyer = Pubkey::new_unique();
    let seed = seed_word(43);

    sim.advance_time(10);
    sim.seed_jackpot(10_000_000).unwrap();

    let winning = feistel::draw_balls(&seed, 5, 69);
    let ticket = sim.purchase(buyer, &losing_picks(&winning, 5, 69)).unwrap();

    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed).unwrap();

    assert_eq!(sim.lottery.jackpot, 10_050_000);
    assert_eq!(sim.lottery.unclaimed_payouts, 0);

    // The losing ticket has nothing to claim
    assert!(sim.claim(ticket).is_err());
}

#[test]
fn winners_of_a_round_claim_during_the_next_round_only() {
    let mut sim = Sim::new(2, 9, 0);
    let buyer = Pubkey::new_unique();
    let seed = seed_word(7);

    let winning = feistel::draw_balls(&seed, 2, 9);
    let ticket = sim.purchase(buyer, &winning).unwrap();

    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed).unwrap();

    // Let the claim window lapse: next round closes too
    sim.advance_time(PERIOD as i64);
    sim.purchase(buyer, &winning).unwrap();
    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed_word(8)).unwrap();

    let err = sim.claim(ticket).unwrap_err();
    assert_eq!(err, LooteryError::ClaimWindowMissed.into());
}

#[test]
fn expired_unclaimed_payouts_seed_the_next_jackpot() {
    let mut sim = Sim::new(2, 9, 0);
    let buyer = Pubkey::new_unique();
    let seed = seed_word(7);

    let winning = feistel::draw_balls(&seed, 2, 9);
    sim.purchase(buyer, &winning).unwrap();

    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed).unwrap();
    assert_eq!(sim.lottery.unclaimed_payouts, PRICE);

    // Nobody claims; the next round has a loser only (a pick that the next
    // seed is known not to draw)
    let next_winning = feistel::draw_balls(&seed_word(9), 2, 9);
    sim.advance_time(PERIOD as i64);
    let loser = sim
        .purchase(buyer, &losing_picks(&next_winning, 2, 9))
        .unwrap();
    let before = sim.lottery.jackpot + sim.lottery.unclaimed_payouts;
    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed_word(9)).unwrap();

    // The pot is conserved at the finalisation boundary, expired winnings
    // folded back in
    assert_eq!(
        sim.lottery.jackpot + sim.lottery.unclaimed_payouts,
        before
    );
    assert_eq!(sim.lottery.unclaimed_payouts, 0);
    let _ = loser;
}

#[test]
fn equal_share_apocalypse() {
    let mut sim = Sim::new(5, 69, 5_000);
    let seed = seed_word(44);

    sim.advance_time(10);
    sim.seed_jackpot(10_000_000).unwrap();

    // A few empty rounds roll the pot forward untouched
    for _ in 0..2 {
        sim.advance_time(PERIOD as i64);
        sim.draw_and_fulfill(seed).unwrap();
        assert_eq!(sim.lottery.jackpot, 10_000_000);
    }

    // Operator declares the apocalypse; the current round is the last one
    sim.kill().unwrap();
    assert_eq!(
        sim.lottery.apocalypse_game_id,
        sim.lottery.current_game_id + 1
    );

    let winning = feistel::draw_balls(&seed, 5, 69);
    let losing = losing_picks(&winning, 5, 69);

    let buyers: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
    let tickets: Vec<u64> = buyers
        .iter()
        .map(|b| sim.purchase(*b, &losing).unwrap())
        .collect();

    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed).unwrap();

    // Terminal round, no winners: the whole pot becomes the consolation pool
    assert!(!sim.lottery.is_active());
    assert_eq!(sim.lottery.jackpot, 0);
    let pool = sim.lottery.unclaimed_payouts;
    assert_eq!(pool, 10_000_000 + 4 * 50_000);

    let share = pool / 4;
    for ticket in tickets {
        assert_eq!(sim.claim(ticket).unwrap(), share);
    }

    // The pool is not decremented by consolation claims
    assert_eq!(sim.lottery.unclaimed_payouts, pool);

    // Every write operation now refuses
    assert_eq!(
        sim.purchase(buyers[0], &losing).unwrap_err(),
        LooteryError::GameInactive.into()
    );
    assert_eq!(
        sim.seed_jackpot(10_000_000).unwrap_err(),
        LooteryError::GameInactive.into()
    );
    assert_eq!(
        sim.draw_and_fulfill(seed).unwrap_err(),
        LooteryError::GameInactive.into()
    );
    assert_eq!(sim.kill().unwrap_err(), LooteryError::GameInactive.into());
}

#[test]
fn rate_limited_seeding() {
    let mut sim = Sim::new(5, 69, 5_000);

    sim.advance_time(10);
    sim.seed_jackpot(100).unwrap();

    assert_eq!(
        sim.seed_jackpot(100).unwrap_err(),
        LooteryError::RateLimited.into()
    );

    sim.advance_time(SEED_DELAY);
    sim.seed_jackpot(100).unwrap();

    assert_eq!(
        sim.seed_jackpot(9).unwrap_err(),
        LooteryError::InsufficientJackpotSeed.into()
    );
}

#[test]
fn empty_round_skip_requests_no_randomness() {
    let mut sim = Sim::new(5, 69, 5_000);

    sim.advance_time(10);
    sim.seed_jackpot(10_000_000).unwrap();

    // Too early
    assert_eq!(
        sim.draw_and_fulfill(seed_word(1)).unwrap_err(),
        LooteryError::WaitLonger.into()
    );

    sim.advance_time(PERIOD as i64);
    let balls = sim.draw_and_fulfill(seed_word(1)).unwrap();

    assert!(balls.is_empty());
    assert_eq!(sim.lottery.request_id, 0);
    assert_eq!(sim.lottery.state, GameState::Purchase);
    assert_eq!(sim.lottery.current_game_id, 1);
    assert_eq!(sim.lottery.jackpot, 10_000_000);
    assert_eq!(sim.lottery.unclaimed_payouts, 0);
}

#[test]
fn batch_minting_assigns_distinct_recipients() {
    let mut sim = Sim::new(5, 69, 5_000);
    let winning = feistel::draw_balls(&seed_word(5), 5, 69);
    let picks = losing_picks(&winning, 5, 69);

    let recipients: Vec<Pubkey> = (0..10).map(|_| Pubkey::new_unique()).collect();
    let first = sim.lottery.ticket_counter;

    for recipient in &recipients {
        sim.purchase(*recipient, &picks).unwrap();
    }

    for (i, recipient) in recipients.iter().enumerate() {
        let ticket = &sim.tickets[i];
        assert_eq!(ticket.id, first + i as u64);
        assert_eq!(ticket.owner, *recipient);
    }
}

#[test]
fn co_winners_split_with_dust_to_later_claimants() {
    let mut sim = Sim::new(2, 9, 0);
    let seed = seed_word(21);

    sim.advance_time(10);
    // Odd pool: 3 winners of 1_000_001 total
    sim.lottery.seed_jackpot_min_value = 1;
    sim.seed_jackpot(1_000_001 - 3 * PRICE).unwrap();

    let winning = feistel::draw_balls(&seed, 2, 9);
    let buyers: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
    let tickets: Vec<u64> = buyers
        .iter()
        .map(|b| sim.purchase(*b, &winning).unwrap())
        .collect();

    sim.advance_time(PERIOD as i64);
    sim.draw_and_fulfill(seed).unwrap();

    let pool = sim.lottery.unclaimed_payouts;
    assert_eq!(pool, 1_000_001);

    let p1 = sim.claim(tickets[0]).unwrap();
    let p2 = sim.claim(tickets[1]).unwrap();
    let p3 = sim.claim(tickets[2]).unwrap();

    assert_eq!(p1, 333_333);
    assert_eq!(p2, 333_334);
    assert_eq!(p3, 333_334);
    assert_eq!(p1 + p2 + p3, pool);
    assert_eq!(sim.lottery.unclaimed_payouts, 0);
}

#[test]
fn draw_is_deterministic_across_identical_seeds() {
    let seed = seed_word(99);
    let a = feistel::draw_balls(&seed, 5, 69);
    let b = feistel::draw_balls(&seed, 5, 69);
    assert_eq!(a, b);
    assert!(a.windows(2).all(|w| w[0] < w[1]));
}
