use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::events::{PoolFrozen, PoolPaused, PoolUnpaused};
use crate::state::Pool;

#[derive(Accounts)]
pub struct AdminAction<'info> {
    #[account(mut, constraint = admin.key() == pool.admin @ RewardPoolError::IncorrectCaller)]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,
}

pub fn pause(ctx: Context<AdminAction>, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.paused = true;
    msg!("Pool paused");
    emit!(PoolPaused {
        pool: pool.key(),
        timestamp: now,
    });
    Ok(())
}

pub fn unpause(ctx: Context<AdminAction>, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_paused()?;
    pool.paused = false;
    emit!(PoolUnpaused {
        pool: pool.key(),
        timestamp: now,
    });
    Ok(())
}

pub fn freeze(ctx: Context<AdminAction>, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_paused()?;
    require!(!pool.frozen, RewardPoolError::AlreadyFrozen);
    pool.frozen = true;
    msg!("Pool frozen: emergency_exit now available");
    emit!(PoolFrozen {
        pool: pool.key(),
        timestamp: now,
    });
    Ok(())
}
