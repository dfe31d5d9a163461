use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{PARTICIPANT_SEED, POOL_SEED, VAULT_SEED};
use crate::error::LedgerError;
use crate::state::{Participant, Pool};

/// Withdraw tokens from the pool
///
/// Only the position owner may withdraw; the destination may be any token
/// account of the stake mint (`receiver`).
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to withdraw
///
/// # Flow
/// 1. Validate amount
/// 2. Settle the owner's pending entitlement, then debit principal
///    (fails if amount exceeds the settled principal)
/// 3. Update pool totals
/// 4. Transfer tokens from vault to receiver
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Owner of the position being debited
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Owner's position
    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump = participant.bump,
        constraint = participant.owner == owner.key() @ LedgerError::Unauthorized
    )]
    pub participant: Account<'info, Participant>,

    /// Stake token mint
    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// Destination token account; any account of the stake mint
    #[account(
        mut,
        token::mint = stake_mint
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

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

pub fn handler_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    // Validate amount
    require!(amount > 0, LedgerError::ZeroAmount);

    let pool = &mut ctx.accounts.pool;
    let participant = &mut ctx.accounts.participant;

    // Settle pending entitlement, then debit the position and the pool
    let settled = participant.record_withdraw(pool, amount)?;

    // Position emptied
    if participant.principal == 0 {
        pool.participant_count = pool
            .participant_count
            .checked_sub(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
    }

    // Transfer tokens from vault to receiver
    // Pool PDA signs as authority
    let stake_mint_key = pool.stake_mint;
    let seeds = &[POOL_SEED, stake_mint_key.as_ref(), &[pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.receiver_token_account.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    msg!(
        "Withdrew {} for {}. Settled {}, position: {}, pool total: {}",
        amount,
        participant.owner,
        settled,
        participant.principal,
        pool.total_principal
    );

    Ok(())
}
