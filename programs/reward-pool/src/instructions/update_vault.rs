use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::events::VaultIndexUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateVault<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,
    // Vault accounts to refresh are passed via `remaining_accounts`; any
    // number of them, all belonging to `pool`. Bookkeeping only, no
    // business-logic change.
}

pub fn handler(ctx: Context<UpdateVault>, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    let effective_ts = pool.update_index(now)?;

    for account_info in ctx.remaining_accounts.iter() {
        let mut vault: Account<Vault> = Account::try_from(account_info)?;
        require!(vault.pool == pool.key(), RewardPoolError::NonExistentVault);

        vault.update_index(pool, effective_ts)?;
        let finalized = vault.alloc_points == 0 && effective_ts >= vault.end_time;

        emit!(VaultIndexUpdated {
            vault: vault.key(),
            vault_index: vault.vault_index,
            finalized,
            timestamp: now,
        });

        vault.exit(&crate::ID)?;
    }

    Ok(())
}
