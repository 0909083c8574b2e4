pub mod initialize_lottery;
pub mod purchase;
pub mod owner_pick;
pub mod seed_jackpot;
pub mod draw;
pub mod fulfill_draw;
pub mod claim_winnings;
pub mod withdraw_fees;
pub mod kill;
pub mod rescue_native;
pub mod rescue_token;

pub use initialize_lottery::*;
pub use purchase::*;
pub use owner_pick::*;
pub use seed_jackpot::*;
pub use draw::*;
pub use fulfill_draw::*;
pub use claim_winnings::*;
pub use withdraw_fees::*;
pub use kill::*;
pub use rescue_native::*;
pub use rescue_token::*;
