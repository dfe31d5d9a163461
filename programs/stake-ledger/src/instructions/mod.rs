// =============================================================================
// Instructions Module - Stake Ledger
// =============================================================================

pub mod deposit;
pub mod initialize;
pub mod inject;
pub mod queries;
pub mod withdraw;

pub use deposit::*;
pub use initialize::*;
pub use inject::*;
pub use queries::*;
pub use withdraw::*;
