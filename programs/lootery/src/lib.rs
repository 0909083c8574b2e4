use anchor_lang::prelude::*;

declare_id!("5HKnMDyLrGFsP2mnSmsAdGeu9mcf6gqpPZgxfhALmdhG");

pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod feistel;
pub mod instructions;
pub mod pick;
pub mod states;

#[cfg(test)]
mod tests;

pub use constants::*;
pub use enums::*;
pub use errors::*;
pub use instructions::*;
pub use states::*;

#[program]
pub mod lootery {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        num_picks: u8,
        max_ball_value: u8,
        game_period: u64,
        ticket_price: u64,
        community_fee_bps: u16,
        seed_jackpot_delay: i64,
        seed_jackpot_min_value: u64,
        request_fee: u64,
    ) -> Result<()> {
        ctx.accounts.initialize_lottery(
            num_picks,
            max_ball_value,
            game_period,
            ticket_price,
            community_fee_bps,
            seed_jackpot_delay,
            seed_jackpot_min_value,
            request_fee,
            ctx.bumps,
        )
    }

    pub fn purchase(
        ctx: Context<Purchase>,
        recipient: Pubkey,
        picks: Vec<u8>,
    ) -> Result<()> {
        ctx.accounts.purchase(recipient, picks, ctx.bumps)
    }

    pub fn owner_pick(
        ctx: Context<OwnerPick>,
        recipient: Pubkey,
        picks: Vec<u8>,
    ) -> Result<()> {
        ctx.accounts.owner_pick(recipient, picks, ctx.bumps)
    }

    pub fn seed_jackpot(ctx: Context<SeedJackpot>, amount: u64) -> Result<()> {
        ctx.accounts.seed_jackpot(amount)
    }

    pub fn draw(ctx: Context<Draw>) -> Result<()> {
        ctx.accounts.draw(ctx.bumps)
    }

    pub fn fulfill_draw(
        ctx: Context<FulfillDraw>,
        request_id: u64,
        randomness: Vec<[u8; 32]>,
    ) -> Result<()> {
        ctx.accounts.fulfill_draw(request_id, randomness, ctx.bumps)
    }

    pub fn claim_winnings(ctx: Context<ClaimWinnings>) -> Result<()> {
        ctx.accounts.claim_winnings(ctx.bumps)
    }

    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        ctx.accounts.withdraw_fees(ctx.bumps)
    }

    pub fn kill(ctx: Context<Kill>) -> Result<()> {
        ctx.accounts.kill()
    }

    pub fn rescue_native(ctx: Context<RescueNative>) -> Result<()> {
        ctx.accounts.rescue_native(ctx.bumps)
    }

    pub fn rescue_token(ctx: Context<RescueToken>) -> Result<()> {
        ctx.accounts.rescue_token(ctx.bumps)
    }
}
