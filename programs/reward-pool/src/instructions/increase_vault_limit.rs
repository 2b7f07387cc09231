use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::events::VaultLimitIncreased;
use crate::state::*;

#[derive(Accounts)]
pub struct IncreaseVaultLimit<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(mut, constraint = vault.pool == pool.key() @ RewardPoolError::NonExistentVault)]
    pub vault: Account<'info, Vault>,

    #[account(constraint = creator.key() == vault.creator @ RewardPoolError::UserIsNotVaultCreator)]
    pub creator: Signer<'info>,
}

pub fn handler(ctx: Context<IncreaseVaultLimit>, extra: u128, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    let vault = &mut ctx.accounts.vault;
    vault.assert_not_matured(now)?;

    let new_limit = vault
        .principal_limit
        .checked_add(extra)
        .ok_or(RewardPoolError::MathOverflow)?;
    require!(
        new_limit <= GLOBAL_PRINCIPAL_CAP,
        RewardPoolError::StakedTokenLimitExceeded
    );

    run_prologue(pool, vault, None, now)?;
    vault.principal_limit = new_limit;

    emit!(VaultLimitIncreased {
        vault: vault.key(),
        new_limit,
        timestamp: now,
    });

    Ok(())
}
