use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::RewardPoolError;
use crate::events::RewardsClaimed;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    #[account(mut, constraint = vault.pool == pool.key() @ RewardPoolError::NonExistentVault)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [USER_POSITION_SEED, vault.key().as_ref(), on_behalf_of.as_ref()],
        bump = user_position.bump
    )]
    pub user_position: Account<'info, UserPosition>,

    #[account(mut, address = pool.reward_vault)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over `reward_vault`.
    #[account(seeds = [REWARD_VAULT_AUTHORITY_SEED, pool.key().as_ref()], bump)]
    pub reward_vault_authority: UncheckedAccount<'info>,

    #[account(mut, constraint = user_reward_account.mint == pool.reward_mint)]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimRewards>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    pool.assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_position;

    run_prologue(pool, vault, Some(user), now)?;

    let owed = user
        .acc_staking_rewards
        .checked_sub(user.claimed_staking_rewards)
        .ok_or(RewardPoolError::MathUnderflow)?;
    user.claimed_staking_rewards = user
        .claimed_staking_rewards
        .checked_add(owed)
        .ok_or(RewardPoolError::MathOverflow)?;
    vault.total_claimed = vault
        .total_claimed
        .checked_add(owed)
        .ok_or(RewardPoolError::MathOverflow)?;

    if owed > 0 {
        let owed_u64: u64 = owed.try_into().map_err(|_| RewardPoolError::InvalidAmount)?;
        let pool_key = pool.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            REWARD_VAULT_AUTHORITY_SEED,
            pool_key.as_ref(),
            &[ctx.bumps.reward_vault_authority],
        ]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.user_reward_account.to_account_info(),
                    authority: ctx.accounts.reward_vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            owed_u64,
        )?;
    }

    msg!("Rewards claimed: owner={}, amount={}", on_behalf_of, owed);

    emit!(RewardsClaimed {
        vault: vault.key(),
        owner: on_behalf_of,
        amount: owed,
        timestamp: now,
    });

    Ok(())
}
