use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::error::RewardPoolError;
use crate::events::VaultCreated;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey, salt: u64, duration_ordinal: u8)]
pub struct CreateVault<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = payer,
        space = Vault::LEN,
        seeds = [VAULT_SEED, on_behalf_of.as_ref(), &salt.to_le_bytes()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    pub principal_mint: Account<'info, Mint>,

    /// CHECK: PDA authority over `principal_vault`, derived from the vault it guards.
    #[account(
        seeds = [PRINCIPAL_VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump
    )]
    pub principal_vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        token::mint = principal_mint,
        token::authority = principal_vault_authority,
        seeds = [b"principal_token_account", vault.key().as_ref()],
        bump
    )]
    pub principal_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over `receipt_mint`, derived from the vault it guards.
    #[account(
        seeds = [RECEIPT_MINT_AUTHORITY_SEED, vault.key().as_ref()],
        bump
    )]
    pub receipt_mint_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        mint::decimals = principal_mint.decimals,
        mint::authority = receipt_mint_authority,
        seeds = [b"receipt_mint", vault.key().as_ref()],
        bump
    )]
    pub receipt_mint: Account<'info, Mint>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<CreateVault>,
    on_behalf_of: Pubkey,
    _salt: u64,
    duration_ordinal: u8,
    creator_fee_factor: u128,
    boost_fee_factor: u128,
    now: i64,
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    pool.assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    require!(
        creator_fee_factor
            .checked_add(boost_fee_factor)
            .map(|sum| sum <= crate::math::PRECISION)
            .unwrap_or(false),
        RewardPoolError::TotalFeeFactorExceeded
    );

    let duration = DurationClass::from_ordinal(duration_ordinal)?;
    let vault_end = now
        .checked_add(duration.duration_seconds())
        .ok_or(RewardPoolError::MathOverflow)?;
    require!(vault_end < pool.end_time, RewardPoolError::InvalidVaultPeriod);

    pool.update_index(now)?;

    let vault = &mut ctx.accounts.vault;
    vault.pool = pool.key();
    vault.creator = on_behalf_of;
    vault.principal_mint = ctx.accounts.principal_mint.key();
    vault.principal_vault = ctx.accounts.principal_vault.key();
    vault.receipt_mint = ctx.accounts.receipt_mint.key();
    vault.duration_class = duration;
    vault.end_time = vault_end;
    vault.multiplier = duration.base_multiplier();
    vault.staked_principal = 0;
    vault.staked_boosts = 0;
    vault.alloc_points = 0;
    vault.principal_limit = BASE_LIMIT;
    vault.creator_fee_factor = creator_fee_factor;
    vault.boost_fee_factor = boost_fee_factor;
    vault.vault_index = pool.index;
    vault.boost_index = 0;
    vault.rewards_per_token = 0;
    vault.acc_total_rewards = 0;
    vault.acc_creator_rewards = 0;
    vault.acc_boost_rewards = 0;
    vault.total_claimed = 0;
    vault.bump = ctx.bumps.vault;

    msg!(
        "Vault created: creator={}, duration_ordinal={}, end_time={}, multiplier={}",
        on_behalf_of,
        duration_ordinal,
        vault_end,
        vault.multiplier
    );

    emit!(VaultCreated {
        vault: vault.key(),
        creator: on_behalf_of,
        duration_ordinal,
        end_time: vault_end,
        multiplier: vault.multiplier,
        creator_fee_factor,
        boost_fee_factor,
        timestamp: now,
    });

    Ok(())
}
