use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::events::EmissionUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateEmission<'info> {
    #[account(mut, constraint = admin.key() == pool.admin @ RewardPoolError::IncorrectCaller)]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,
}

pub fn handler(
    ctx: Context<UpdateEmission>,
    extra_amount: u128,
    extra_duration: i64,
    now: i64,
) -> Result<()> {
    require!(
        extra_amount > 0 || extra_duration > 0,
        RewardPoolError::InvalidEmissionParameters
    );

    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.update_index(now)?;

    let (new_total_rewards, new_end_time, new_eps) =
        pool.apply_emission_update(extra_amount, extra_duration, now)?;
    pool.total_rewards = new_total_rewards;
    pool.end_time = new_end_time;
    pool.emission_per_second = new_eps;

    msg!(
        "Emission updated: total_rewards={}, end_time={}, emission_per_second={}",
        pool.total_rewards,
        new_end_time,
        new_eps
    );

    emit!(EmissionUpdated {
        pool: pool.key(),
        new_total_rewards: pool.total_rewards,
        new_end_time,
        new_emission_per_second: new_eps,
        timestamp: now,
    });

    Ok(())
}
