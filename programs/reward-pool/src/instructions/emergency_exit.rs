use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::collaborators;
use crate::error::RewardPoolError;
use crate::events::EmergencyExited;
use crate::state::*;

#[derive(Accounts)]
#[instruction(on_behalf_of: Pubkey)]
pub struct EmergencyExit<'info> {
    pub pool: Account<'info, Pool>,

    #[account(mut, constraint = vault.pool == pool.key() @ RewardPoolError::NonExistentVault)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        seeds = [USER_POSITION_SEED, vault.key().as_ref(), on_behalf_of.as_ref()],
        bump = user_position.bump
    )]
    pub user_position: Account<'info, UserPosition>,

    #[account(mut, address = vault.principal_vault)]
    pub principal_vault: Account<'info, TokenAccount>,

    /// CHECK: PDA authority over `principal_vault`.
    #[account(seeds = [PRINCIPAL_VAULT_AUTHORITY_SEED, vault.key().as_ref()], bump)]
    pub principal_vault_authority: UncheckedAccount<'info>,

    #[account(mut, constraint = user_token_account.mint == vault.principal_mint)]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut, address = vault.receipt_mint)]
    pub receipt_mint: Account<'info, Mint>,

    #[account(mut, constraint = user_receipt_account.mint == vault.receipt_mint)]
    pub user_receipt_account: Account<'info, TokenAccount>,

    /// CHECK: sibling boost-asset registry program, invoked by discriminator.
    #[account(address = pool.boost_registry)]
    pub boost_registry_program: UncheckedAccount<'info>,

    /// CHECK: registry's own state account, opaque to this program.
    #[account(mut)]
    pub registry_state: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// Escape hatch for a paused-and-frozen pool (core spec §4.5 emergency_exit,
/// §9 "does not touch alloc-points or advance any index"). Returns exactly
/// what the caller had staked; no reward is computed or paid.
pub fn handler(ctx: Context<EmergencyExit>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
    ctx.accounts.pool.assert_paused()?;
    ctx.accounts.pool.assert_frozen()?;
    ctx.accounts
        .pool
        .assert_authorized(&ctx.accounts.authority.key(), &on_behalf_of)?;

    let vault = &mut ctx.accounts.vault;
    let user = &mut ctx.accounts.user_position;
    require!(
        user.staked_principal > 0 || !user.boost_ids.is_empty(),
        RewardPoolError::UserHasNothingStaked
    );

    let returned_principal = user.staked_principal;
    vault.staked_principal = vault
        .staked_principal
        .checked_sub(returned_principal)
        .ok_or(RewardPoolError::MathUnderflow)?;
    user.staked_principal = 0;

    let boosts_returned = user.boost_ids.len() as u8;
    vault.staked_boosts = vault
        .staked_boosts
        .checked_sub(boosts_returned)
        .ok_or(RewardPoolError::MathUnderflow)?;
    let returned_ids = std::mem::take(&mut user.boost_ids);

    if !returned_ids.is_empty() {
        collaborators::record_boost_unstake(
            &ctx.accounts.boost_registry_program,
            &ctx.accounts.registry_state,
            &ctx.accounts.authority.to_account_info(),
            on_behalf_of,
            returned_ids,
            vault.key(),
            &[],
        )?;
    }

    if returned_principal > 0 {
        let returned_u64: u64 = returned_principal
            .try_into()
            .map_err(|_| RewardPoolError::InvalidAmount)?;
        let vault_key = vault.key();
        let signer_seeds: &[&[&[u8]]] = &[&[
            PRINCIPAL_VAULT_AUTHORITY_SEED,
            vault_key.as_ref(),
            &[ctx.bumps.principal_vault_authority],
        ]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.principal_vault.to_account_info(),
                    to: ctx.accounts.user_token_account.to_account_info(),
                    authority: ctx.accounts.principal_vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            returned_u64,
        )?;
        token::burn(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Burn {
                    mint: ctx.accounts.receipt_mint.to_account_info(),
                    from: ctx.accounts.user_receipt_account.to_account_info(),
                    authority: ctx.accounts.authority.to_account_info(),
                },
            ),
            returned_u64,
        )?;
    }

    msg!(
        "Emergency exit: owner={}, principal_returned={}, boosts_returned={}",
        on_behalf_of,
        returned_principal,
        boosts_returned
    );

    emit!(EmergencyExited {
        vault: vault.key(),
        owner: on_behalf_of,
        principal_returned: returned_principal,
        boosts_returned,
        timestamp: now,
    });

    Ok(())
}
