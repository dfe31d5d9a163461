use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod stake_ledger {
    use super::*;

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    /// # Accounts
    /// * `payer` - Funds the pool and vault accounts (signer)
    /// * `pool` - Pool PDA to create
    /// * `stake_mint` - Token staked into and paid out of the pool
    /// * `vault` - Vault holding staked tokens and injected rewards
    ///
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler_initialize(ctx)
    }

    /// Deposit tokens, crediting the beneficiary's position
    ///
    /// The signer funds the deposit; the beneficiary may be any identity.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to deposit
    ///
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Withdraw tokens from the signer's position to any receiver account
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to withdraw; must not exceed the
    ///   position's settled principal
    ///
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Inject rewards, spread pro-rata over all current principal
    ///
    /// Permissionless; fails if the pool holds no principal.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of tokens to inject
    ///
    pub fn inject_rewards(ctx: Context<InjectRewards>, amount: u64) -> Result<()> {
        instructions::inject::handler_inject_rewards(ctx, amount)
    }

    /// Read a position's maximum withdrawable balance (no state change)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    ///
    pub fn max_withdrawable(ctx: Context<MaxWithdrawable>) -> Result<u64> {
        instructions::queries::handler_max_withdrawable(ctx)
    }
}
