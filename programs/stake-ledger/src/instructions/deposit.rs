use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{PARTICIPANT_SEED, POOL_SEED, VAULT_SEED};
use crate::error::LedgerError;
use crate::state::{Participant, Pool};

/// Deposit tokens into the pool
///
/// The signer funds the deposit; the position credited belongs to
/// `beneficiary`, which may be any identity (deposit-on-behalf-of).
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of tokens to deposit
///
/// # Flow
/// 1. Validate amount
/// 2. Transfer tokens from depositor to vault
/// 3. Settle the beneficiary's pending entitlement, then credit principal
/// 4. Update pool totals
///
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// Funds the deposit and pays for the participant account if new
    #[account(mut)]
    pub depositor: Signer<'info>,

    /// Identity credited with the deposit. Only used as the participant
    /// PDA seed; crediting requires no consent from the beneficiary.
    /// CHECK: never read or written, serves purely as a PDA seed
    pub beneficiary: UncheckedAccount<'info>,

    /// Pool
    #[account(
        mut,
        seeds = [POOL_SEED, pool.stake_mint.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Beneficiary's position (created on first deposit)
    #[account(
        init_if_needed,
        payer = depositor,
        space = Participant::SIZE,
        seeds = [PARTICIPANT_SEED, pool.key().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub participant: Account<'info, Participant>,

    /// Stake token mint
    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ LedgerError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// Depositor's token account (source of funds)
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = depositor
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    /// Pool's vault
    #[account(
        mut,
        seeds = [VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    // Validate amount
    require!(amount > 0, LedgerError::ZeroAmount);

    // Transfer tokens from depositor to vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    // Capture keys before mutable borrows
    let pool_key = ctx.accounts.pool.key();
    let beneficiary_key = ctx.accounts.beneficiary.key();
    let participant_bump = ctx.bumps.participant;

    let pool = &mut ctx.accounts.pool;
    let participant = &mut ctx.accounts.participant;

    // Initialize the position if it was just created
    if participant.owner == Pubkey::default() {
        participant.pool = pool_key;
        participant.owner = beneficiary_key;
        participant.reward_snapshot = pool.reward_index;
        participant.bump = participant_bump;
    }

    let was_empty = participant.principal == 0;

    // Settle pending entitlement, then credit the deposit
    let settled = participant.record_deposit(pool, amount)?;

    if was_empty {
        pool.participant_count = pool
            .participant_count
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
    }

    msg!(
        "Deposited {} for {}. Settled {}, position: {}, pool total: {}",
        amount,
        participant.owner,
        settled,
        participant.principal,
        pool.total_principal
    );

    Ok(())
}
