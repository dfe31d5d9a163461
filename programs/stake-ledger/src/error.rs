use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // Amount Errors
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Cannot inject rewards into a pool with no principal")]
    NoPrincipal,

    #[msg("Withdrawal amount exceeds settled principal")]
    ExceedsAvailableBalance,

    // Authorization Errors
    #[msg("Unauthorized: only the position owner may withdraw")]
    Unauthorized,

    // Math Errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Invalid fraction")]
    InvalidFraction,

    // Account Validation Errors
    #[msg("Invalid stake mint")]
    InvalidStakeMint,
}
