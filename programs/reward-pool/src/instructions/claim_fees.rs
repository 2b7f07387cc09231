use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::RewardPoolError;
use crate::events::FeesClaimed;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey)]
pub struct ClaimFees<'info> {
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

    #[account(mut, address = pool.reward_vault)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over `reward_vault`.
    #[account(seeds = [REWARD_VAULT_AUTHORITY_SEED, pool.key().as_ref()], bump)]
    pub reward_vault_authority: UncheckedAccount<'info>,

    #[account(mut, constraint = user_reward_account.mint == pool.reward_mint)]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimFees>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    pool.assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_position;
    if user.owner == Pubkey::default() {
        user.owner = on_behalf_of;
        user.vault = vault.key();
        user.bump = ctx.bumps.user_position;
    }

    run_prologue(pool, vault, Some(user), now)?;

    let creator_amount = if on_behalf_of == vault.creator {
        let owed = vault
            .acc_creator_rewards
            .checked_sub(user.claimed_creator_rewards)
            .ok_or(RewardPoolError::MathUnderflow)?;
        user.claimed_creator_rewards = user
            .claimed_creator_rewards
            .checked_add(owed)
            .ok_or(RewardPoolError::MathOverflow)?;
        owed
    } else {
        0
    };

    let boost_amount = if !user.boost_ids.is_empty() {
        let owed = user
            .acc_boost_rewards
            .checked_sub(user.claimed_boost_rewards)
            .ok_or(RewardPoolError::MathUnderflow)?;
        user.claimed_boost_rewards = user
            .claimed_boost_rewards
            .checked_add(owed)
            .ok_or(RewardPoolError::MathOverflow)?;
        owed
    } else {
        0
    };

    let total = creator_amount
        .checked_add(boost_amount)
        .ok_or(RewardPoolError::MathOverflow)?;
    vault.total_claimed = vault
        .total_claimed
        .checked_add(total)
        .ok_or(RewardPoolError::MathOverflow)?;

    if total > 0 {
        let total_u64: u64 = total.try_into().map_err(|_| RewardPoolError::InvalidAmount)?;
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
            total_u64,
        )?;
    }

    msg!(
        "Fees claimed: owner={}, creator_amount={}, boost_amount={}",
        on_behalf_of,
        creator_amount,
        boost_amount
    );

    emit!(FeesClaimed {
        vault: vault.key(),
        owner: on_behalf_of,
        creator_amount,
        boost_amount,
        timestamp: now,
    });

    Ok(())
}
