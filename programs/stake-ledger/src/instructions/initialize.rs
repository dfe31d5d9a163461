use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, VAULT_SEED};
use crate::math::Fraction;
use crate::state::Pool;

/// Initialize a new staking pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
///
/// # Accounts
/// * `payer` - Funds the pool and vault accounts (signer)
/// * `pool` - The pool PDA to create
/// * `stake_mint` - The token staked into and paid out of the pool
/// * `vault` - The vault holding staked tokens and injected rewards
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the pool and vault account creation
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Pool PDA
    #[account(
        init,
        payer = payer,
        space = Pool::SIZE,
        seeds = [POOL_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Stake token mint
    pub stake_mint: Account<'info, Mint>,

    /// Vault to hold staked tokens; the pool PDA is its authority
    #[account(
        init,
        payer = payer,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;

    // Initialize pool state
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.vault = ctx.accounts.vault.key();

    // Initialize counters
    pool.total_principal = 0;
    pool.reward_index = Fraction::ZERO;
    pool.total_rewards_injected = 0;
    pool.participant_count = 0;

    // Store bump seeds
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;

    msg!("Pool initialized: stake_mint={}", pool.stake_mint);

    Ok(())
}
