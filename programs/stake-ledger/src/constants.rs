// =============================================================================
// Stake Ledger Constants
// =============================================================================

// PDA Seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"stake_vault";
pub const PARTICIPANT_SEED: &[u8] = b"participant";
