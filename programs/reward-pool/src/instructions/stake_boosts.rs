use anchor_lang::prelude::*;

use crate::collaborators;
use crate::error::RewardPoolError;
use crate::events::BoostsStaked;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey)]
pub struct StakeBoosts<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(mut, constraint = vault.pool == pool.key() @ RewardPoolError::NonExistentVault)]
    pub vault: Account<'info, Vault>,

    #[account(
        init_if_needed,
        payer = payer,
        space = UserPosition::LEN,
        seeds = [USER_POSITION_SEED, vault.key().as_ref(), on_behalf_of.as_ref()],
        bump
    )]
    pub user_position: Account<'info, UserPosition>,

    /// CHECK: sibling boost-asset registry program, invoked by discriminator.
    #[account(address = pool.boost_registry)]
    pub boost_registry_program: UncheckedAccount<'info>,

    /// CHECK: registry's own state account, opaque to this program.
    #[account(mut)]
    pub registry_state: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<StakeBoosts>,
    on_behalf_of: Pubkey,
    ids: Vec<Pubkey>,
    now: i64,
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    pool.assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    require!(
        !ids.is_empty() && ids.len() < MAX_BOOSTS_PER_VAULT as usize,
        RewardPoolError::BoostStakingLimitExceeded
    );

    let vault = &mut ctx.accounts.vault;
    require!(now < vault.end_time, RewardPoolError::StakingEnded);
    require!(
        (vault.staked_boosts as usize) + ids.len() <= MAX_BOOSTS_PER_VAULT as usize,
        RewardPoolError::BoostStakingLimitExceeded
    );

    let user = &mut ctx.accounts.user_position;
    if user.owner == Pubkey::default() {
        user.owner = on_behalf_of;
        user.vault = vault.key();
        user.bump = ctx.bumps.user_position;
    }

    run_prologue(pool, vault, Some(user), now)?;

    let was_first_boost = vault.staked_boosts == 0;

    user.boost_ids.extend(ids.iter().copied());
    vault.staked_boosts = vault
        .staked_boosts
        .checked_add(ids.len() as u8)
        .ok_or(RewardPoolError::MathOverflow)?;
    vault.multiplier = vault
        .multiplier
        .checked_add((ids.len() as u16).checked_mul(BOOST_MULTIPLIER).ok_or(RewardPoolError::MathOverflow)?)
        .ok_or(RewardPoolError::MathOverflow)?;

    if vault.staked_principal > 0 {
        vault.recompute_alloc_points(pool)?;
    }

    let mut backfilled = 0u128;
    if was_first_boost {
        // The vault's accumulated boost-fee pool predates this staker;
        // reward them with the full balance rather than only future accrual
        // (core spec §4.5, stake_boosts; see Open Questions for later boosts).
        backfilled = vault.acc_boost_rewards;
        user.acc_boost_rewards = user
            .acc_boost_rewards
            .checked_add(backfilled)
            .ok_or(RewardPoolError::MathOverflow)?;
    }

    collaborators::record_boost_stake(
        &ctx.accounts.boost_registry_program,
        &ctx.accounts.registry_state,
        &ctx.accounts.authority.to_account_info(),
        on_behalf_of,
        ids,
        vault.key(),
        &[],
    )?;

    emit!(BoostsStaked {
        vault: vault.key(),
        owner: on_behalf_of,
        count: vault.staked_boosts,
        new_multiplier: vault.multiplier,
        backfilled_boost_rewards: backfilled,
        timestamp: now,
    });

    Ok(())
}
