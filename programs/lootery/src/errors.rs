use anchor_lang::prelude::*;

#[error_code]
pub enum LooteryError {

    #[msg("Number of picks must be at least 1 and no larger than the ball domain.")]
    InvalidNumPicks,

    #[msg("Ball values must be in [1, max_ball_value].")]
    InvalidBallValue,

    #[msg("Picks must be strictly ascending.")]
    UnsortedPicks,

    #[msg("Ticket price must be positive.")]
    InvalidTicketPrice,

    #[msg("Game period must be at least 10 minutes.")]
    InvalidGamePeriod,

    #[msg("Community fee bps must be between 0 and 10000.")]
    InvalidCommunityFeeBps,

    #[msg("Jackpot seed delay and minimum value must be positive.")]
    InvalidSeedJackpotConfig,

    #[msg("Jackpot seed amount is below the configured minimum.")]
    InsufficientJackpotSeed,

    #[msg("Lottery is not in the required state.")]
    UnexpectedState,

    #[msg("Game is no longer active.")]
    GameInactive,

    #[msg("Game period has not elapsed yet.")]
    WaitLonger,

    #[msg("Ticket is not claimable in the current round.")]
    ClaimWindowMissed,

    #[msg("A randomness request is already in flight.")]
    RequestAlreadyInFlight,

    #[msg("Caller is not the configured randomiser.")]
    CallerNotRandomiser,

    #[msg("Request id does not match the in-flight request.")]
    RequestIdMismatch,

    #[msg("Randomness payload must contain at least one word.")]
    InsufficientRandomWords,

    #[msg("Winning pick index account does not match the drawn pick.")]
    WinningPickAccountMismatch,

    #[msg("Operational balance cannot cover the oracle request fee.")]
    InsufficientOperationalFunds,

    #[msg("Ticket did not win this round.")]
    NoWin,

    #[msg("Jackpot seeding is rate limited.")]
    RateLimited,

    #[msg("Tickets sold counter overflowed.")]
    TicketsSoldOverflow,

    #[msg("Math overflow occurred.")]
    MathOverflow,

    #[msg("Unauthorized access.")]
    Unauthorized,
}
