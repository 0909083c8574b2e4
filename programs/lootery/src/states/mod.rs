pub mod lottery;
pub mod round;
pub mod ticket;
pub mod pick_index;

pub use lottery::*;
pub use round::*;
pub use ticket::*;
pub use pick_index::*;
