use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::RewardPoolError;
use crate::events::PoolInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = payer,
        space = Pool::LEN,
        seeds = [POOL_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    pub reward_mint: Account<'info, Mint>,

    /// CHECK: PDA authority signing outbound reward transfers.
    #[account(
        seeds = [REWARD_VAULT_AUTHORITY_SEED, pool.key().as_ref()],
        bump
    )]
    pub reward_vault_authority: UncheckedAccount<'info>,

    #[account(
        constraint = reward_vault.mint == reward_mint.key() @ RewardPoolError::InvalidAmount,
        constraint = reward_vault.owner == reward_vault_authority.key() @ RewardPoolError::InvalidAmount
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePool>,
    admin: Pubkey,
    router: Pubkey,
    points_ledger: Pubkey,
    boost_registry: Pubkey,
    start_time: i64,
    end_time: i64,
    emission_per_second: u128,
    total_rewards: u128,
) -> Result<()> {
    require!(end_time > start_time, RewardPoolError::InvalidVaultPeriod);
    require!(router != Pubkey::default(), RewardPoolError::InvalidRouter);
    require!(emission_per_second > 0, RewardPoolError::InvalidEmissionParameters);
    require!(
        ctx.accounts.reward_vault.amount as u128 >= total_rewards,
        RewardPoolError::InvalidEmissionParameters
    );

    let pool = &mut ctx.accounts.pool;
    pool.admin = admin;
    pool.router = router;
    pool.points_ledger = points_ledger;
    pool.boost_registry = boost_registry;
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();
    pool.start_time = start_time;
    pool.end_time = end_time;
    pool.emission_per_second = emission_per_second;
    pool.total_alloc_points = 0;
    pool.index = 0;
    pool.last_update_timestamp = start_time;
    pool.total_rewards = total_rewards;
    pool.rewards_emitted = 0;
    pool.frozen = false;
    pool.paused = false;
    pool.bump = ctx.bumps.pool;

    emit!(PoolInitialized {
        pool: pool.key(),
        admin,
        reward_mint: pool.reward_mint,
        start_time,
        end_time,
        emission_per_second,
        total_rewards,
        timestamp: start_time,
    });

    Ok(())
}
