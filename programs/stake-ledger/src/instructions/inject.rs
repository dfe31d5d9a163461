use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, VAULT_SEED};
use crate::error::LedgerError;
use crate::state::Pool;

/// Inject rewards into the pool
///
/// Permissionless: any payer may fund rewards. The amount is spread over
/// all current principal by raising the pool's reward index; no participant
/// accounts are touched (cost is O(1) in the number of participants).
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to inject
///
/// # Flow
/// 1. Validate amount and that the pool has principal to distribute over
/// 2. Transfer tokens from payer to vault
/// 3. Raise the pool's reward index by amount / total_principal
///
#[derive(Accounts)]
pub struct InjectRewards<'info> {
    /// Pays the rewards being injected
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Stake token mint
    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// Payer's token account (source of rewards)
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = payer
    )]
    pub payer_token_account: Account<'info, TokenAccount>,

    /// Pool's vault
    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_inject_rewards(ctx: Context<InjectRewards>, amount: u64) -> Result<()> {
    // Validate amount; an empty pool cannot absorb rewards
    require!(amount > 0, LedgerError::ZeroAmount);
    require!(
        ctx.accounts.pool.total_principal > 0,
        LedgerError::NoPrincipal
    );

    // Transfer tokens from payer to vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.payer_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.payer.to_account_info(),
            },
        ),
        amount,
    )?;

    // Raise the reward index
    let pool = &mut ctx.accounts.pool;
    pool.accrue(amount)?;

    msg!(
        "Injected {}. Total injected: {}, pool total: {}, index: {}/{}",
        amount,
        pool.total_rewards_injected,
        pool.total_principal,
        pool.reward_index.num,
        pool.reward_index.den
    );

    Ok(())
}
