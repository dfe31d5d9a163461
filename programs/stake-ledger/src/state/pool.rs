use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::math::Fraction;

/// Global pool state
/// PDA: ["pool", stake_mint]
#[account]
#[derive(Default)]
pub struct Pool {
    /// Stake token mint; deposits and rewards use the same token
    pub stake_mint: Pubkey,

    /// Vault holding staked tokens plus injected rewards
    /// PDA: ["stake_vault", pool]
    pub vault: Pubkey,

    /// Sum of all participants' settled principal. Excludes floor-rounding
    /// dust that remains in the vault.
    pub total_principal: u64,

    /// Cumulative reward-per-unit-principal since pool creation.
    /// Monotonically non-decreasing, exact (no precision loss).
    pub reward_index: Fraction,

    /// Total rewards injected (lifetime)
    pub total_rewards_injected: u64,

    /// Number of participants with a non-zero principal
    pub participant_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Vault bump seed
    pub vault_bump: u8,
}

impl Pool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // stake_mint
        32 + // vault
        8 +  // total_principal
        Fraction::SIZE + // reward_index
        8 +  // total_rewards_injected
        8 +  // participant_count
        1 +  // bump
        1 +  // vault_bump
        64;  // padding for future fields

    /// Raise the reward index when new rewards are injected.
    /// Formula: reward_index += amount / total_principal (exact)
    ///
    /// Fails with `NoPrincipal` when the pool is empty: there is no
    /// principal to distribute over, so the caller must hold the rewards
    /// back rather than have them silently absorbed.
    pub fn accrue(&mut self, amount: u64) -> Result<()> {
        require!(self.total_principal > 0, LedgerError::NoPrincipal);

        let delta = Fraction::new(amount as u128, self.total_principal as u128)?;
        self.reward_index = self.reward_index.checked_add(delta)?;

        self.total_rewards_injected = self
            .total_rewards_injected
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Ok(())
    }
}
