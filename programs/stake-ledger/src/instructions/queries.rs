use anchor_lang::prelude::*;

use crate::constants::PARTICIPANT_SEED;
use crate::state::{Participant, Pool};

/// Read a position's maximum withdrawable balance
///
/// Read-only: computes principal plus pending entitlement on the fly from
/// the current reward index and the position's snapshot, without settling.
/// The result is returned as instruction return data.
///
#[derive(Accounts)]
pub struct MaxWithdrawable<'info> {
    /// Pool
    pub pool: Account<'info, Pool>,

    /// Position being queried
    #[account(
        seeds = [PARTICIPANT_SEED, pool.key().as_ref(), participant.owner.as_ref()],
        bump = participant.bump
    )]
    pub participant: Account<'info, Participant>,
}

pub fn handler_max_withdrawable(ctx: Context<MaxWithdrawable>) -> Result<u64> {
    ctx.accounts
        .participant
        .max_withdrawable(ctx.accounts.pool.reward_index)
}
