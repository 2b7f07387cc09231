use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::error::RewardPoolError;
use crate::events::TokensStaked;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey)]
pub struct StakeTokens<'info> {
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

    #[account(mut, constraint = user_token_account.mint == vault.principal_mint)]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut, address = vault.principal_vault)]
    pub principal_vault: Account<'info, TokenAccount>,

    #[account(mut, address = vault.receipt_mint)]
    pub receipt_mint: Account<'info, Mint>,

    /// CHECK: PDA authority over `receipt_mint`.
    #[account(seeds = [RECEIPT_MINT_AUTHORITY_SEED, vault.key().as_ref()], bump)]
    pub receipt_mint_authority: UncheckedAccount<'info>,

    #[account(mut, constraint = user_receipt_account.mint == vault.receipt_mint)]
    pub user_receipt_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<StakeTokens>,
    on_behalf_of: Pubkey,
    amount: u128,
    now: i64,
) -> Result<()> {
    require!(amount > 0, RewardPoolError::InvalidAmount);

    let pool = &mut ctx.accounts.pool;
    pool.assert_started(now)?;
    pool.assert_not_paused()?;
    pool.assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    let vault = &mut ctx.accounts.vault;
    require!(now < vault.end_time, RewardPoolError::StakingEnded);

    let user = &mut ctx.accounts.user_position;
    if user.owner == Pubkey::default() {
        user.owner = on_behalf_of;
        user.vault = vault.key();
        user.bump = ctx.bumps.user_position;
    }

    run_prologue(pool, vault, Some(user), now)?;

    let new_total = vault
        .staked_principal
        .checked_add(amount)
        .ok_or(RewardPoolError::MathOverflow)?;
    require!(
        new_total <= vault.principal_limit && new_total <= GLOBAL_PRINCIPAL_CAP,
        RewardPoolError::StakedTokenLimitExceeded
    );

    // A vault sitting at alloc_points == 0 before this stake never synced
    // vault_index in the prologue above (core spec §9, dropped pre-stake
    // rewards). Snap it to the pool's current index now so the first
    // stake doesn't retroactively pull in rewards accrued before anyone
    // had principal allocated.
    if vault.staked_principal == 0 {
        vault.vault_index = pool.index;
    }

    vault.staked_principal = new_total;
    user.staked_principal = user
        .staked_principal
        .checked_add(amount)
        .ok_or(RewardPoolError::MathOverflow)?;
    vault.recompute_alloc_points(pool)?;

    let amount_u64: u64 = amount
        .try_into()
        .map_err(|_| RewardPoolError::InvalidAmount)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: ctx.accounts.principal_vault.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount_u64,
    )?;

    let vault_key = vault.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        RECEIPT_MINT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[ctx.bumps.receipt_mint_authority],
    ]];
    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.receipt_mint.to_account_info(),
                to: ctx.accounts.user_receipt_account.to_account_info(),
                authority: ctx.accounts.receipt_mint_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount_u64,
    )?;

    emit!(TokensStaked {
        vault: vault.key(),
        owner: on_behalf_of,
        amount,
        new_alloc_points: vault.alloc_points,
        timestamp: now,
    });

    Ok(())
}
