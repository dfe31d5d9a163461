use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::math::Fraction;
use crate::state::Pool;

/// Per-participant position
/// PDA: ["participant", pool, owner]
#[account]
#[derive(Default)]
pub struct Participant {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position; the only identity allowed to withdraw from it
    pub owner: Pubkey,

    /// Settled principal: deposits plus rewards compounded at settlement
    pub principal: u64,

    /// Value of the pool's reward index at this position's last settlement.
    /// Entitlement accrued since then is `principal * (index - snapshot)`.
    pub reward_snapshot: Fraction,

    /// PDA bump seed
    pub bump: u8,
}

impl Participant {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // principal
        Fraction::SIZE + // reward_snapshot
        1 +  // bump
        32;  // padding for future fields

    /// Reward entitlement accrued since the last settlement, floored to
    /// whole token units. Pure read, no mutation.
    pub fn pending_entitlement(&self, index: Fraction) -> Result<u64> {
        if self.principal == 0 {
            return Ok(0);
        }

        let accrued = index.checked_sub(self.reward_snapshot)?;
        accrued.scale_floor(self.principal)
    }

    /// Principal plus pending entitlement. Pure read, no mutation.
    pub fn max_withdrawable(&self, index: Fraction) -> Result<u64> {
        let pending = self.pending_entitlement(index)?;
        let total = self
            .principal
            .checked_add(pending)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(total)
    }

    /// Fold the pending entitlement into both this position's principal and
    /// the pool total (compounding, which widens the basis for future
    /// injections), then pin the snapshot to the current index. Returns the
    /// settled amount. Idempotent until the index moves again.
    pub fn settle(&mut self, pool: &mut Pool) -> Result<u64> {
        let pending = self.pending_entitlement(pool.reward_index)?;

        if pending > 0 {
            self.principal = self
                .principal
                .checked_add(pending)
                .ok_or(LedgerError::ArithmeticOverflow)?;

            pool.total_principal = pool
                .total_principal
                .checked_add(pending)
                .ok_or(LedgerError::ArithmeticOverflow)?;
        }

        self.reward_snapshot = pool.reward_index;

        Ok(pending)
    }

    /// Record a deposit: settle first, then credit principal and the pool
    /// total. Returns the amount settled along the way.
    pub fn record_deposit(&mut self, pool: &mut Pool, amount: u64) -> Result<u64> {
        let settled = self.settle(pool)?;

        self.principal = self
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        pool.total_principal = pool
            .total_principal
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Ok(settled)
    }

    /// Record a withdrawal: settle first, then require the amount to be
    /// covered by the settled principal and debit it from both this
    /// position and the pool total.
    pub fn record_withdraw(&mut self, pool: &mut Pool, amount: u64) -> Result<u64> {
        let settled = self.settle(pool)?;

        require!(
            amount <= self.principal,
            LedgerError::ExceedsAvailableBalance
        );

        self.principal = self
            .principal
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        pool.total_principal = pool
            .total_principal
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        Ok(settled)
    }
}
