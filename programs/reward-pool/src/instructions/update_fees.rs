use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::events::{BoostFeeUpdated, CreatorFeeUpdated};
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateVaultFee<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(mut, constraint = vault.pool == pool.key() @ RewardPoolError::NonExistentVault)]
    pub vault: Account<'info, Vault>,

    #[account(constraint = creator.key() == vault.creator @ RewardPoolError::UserIsNotVaultCreator)]
    pub creator: Signer<'info>,
}

pub fn update_creator_fee(ctx: Context<UpdateVaultFee>, new_factor: u128, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    let vault = &mut ctx.accounts.vault;
    vault.assert_not_matured(now)?;
    vault.validate_creator_fee_update(new_factor)?;

    run_prologue(pool, vault, None, now)?;
    vault.creator_fee_factor = new_factor;

    emit!(CreatorFeeUpdated {
        vault: vault.key(),
        new_factor,
        timestamp: now,
    });

    Ok(())
}

pub fn update_boost_fee(ctx: Context<UpdateVaultFee>, new_factor: u128, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    let vault = &mut ctx.accounts.vault;
    vault.assert_not_matured(now)?;
    vault.validate_boost_fee_update(new_factor)?;

    run_prologue(pool, vault, None, now)?;
    vault.boost_fee_factor = new_factor;

    emit!(BoostFeeUpdated {
        vault: vault.key(),
        new_factor,
        timestamp: now,
    });

    Ok(())
}
