use anchor_lang::prelude::*;

pub mod collaborators;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("11111111111111111111111111111112");

#[program]
pub mod reward_pool {
    use super::*;

    /// Bootstrap the pool: emission schedule, reward envelope, collaborator addresses.
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        admin: Pubkey,
        router: Pubkey,
        points_ledger: Pubkey,
        boost_registry: Pubkey,
        start_time: i64,
        end_time: i64,
        emission_per_second: u128,
        total_rewards: u128,
    ) -> Result<()> {
        instructions::initialize_pool::handler(
            ctx,
            admin,
            router,
            points_ledger,
            boost_registry,
            start_time,
            end_time,
            emission_per_second,
            total_rewards,
        )
    }

    /// Open a new vault for `on_behalf_of` with a fixed duration class and fee split.
    pub fn create_vault(
        ctx: Context<CreateVault>,
        on_behalf_of: Pubkey,
        salt: u64,
        duration_ordinal: u8,
        creator_fee_factor: u128,
        boost_fee_factor: u128,
        now: i64,
    ) -> Result<()> {
        instructions::create_vault::handler(
            ctx,
            on_behalf_of,
            salt,
            duration_ordinal,
            creator_fee_factor,
            boost_fee_factor,
            now,
        )
    }

    /// Stake principal tokens into a vault, minting receipt tokens 1:1.
    pub fn stake_tokens(
        ctx: Context<StakeTokens>,
        on_behalf_of: Pubkey,
        amount: u128,
        now: i64,
    ) -> Result<()> {
        instructions::stake_tokens::handler(ctx, on_behalf_of, amount, now)
    }

    /// Stake boost assets against a vault, raising its multiplier.
    pub fn stake_boosts(
        ctx: Context<StakeBoosts>,
        on_behalf_of: Pubkey,
        ids: Vec<Pubkey>,
        now: i64,
    ) -> Result<()> {
        instructions::stake_boosts::handler(ctx, on_behalf_of, ids, now)
    }

    /// Claim accrued staking rewards.
    pub fn claim_rewards(ctx: Context<ClaimRewards>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
        instructions::claim_rewards::handler(ctx, on_behalf_of, now)
    }

    /// Claim creator and/or boost fee rewards.
    pub fn claim_fees(ctx: Context<ClaimFees>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
        instructions::claim_fees::handler(ctx, on_behalf_of, now)
    }

    /// Withdraw all staked principal and boosts from a matured vault.
    pub fn unstake_all(ctx: Context<UnstakeAll>, on_behalf_of: Pubkey, now: i64) -> Result<()> {
        instructions::unstake_all::handler(ctx, on_behalf_of, now)
    }

    /// Raise a vault's principal cap (creator only).
    pub fn increase_vault_limit(
        ctx: Context<IncreaseVaultLimit>,
        extra: u128,
        now: i64,
    ) -> Result<()> {
        instructions::increase_vault_limit::handler(ctx, extra, now)
    }

    /// Lower a vault's creator fee factor (creator only, one direction).
    pub fn update_creator_fee(
        ctx: Context<UpdateVaultFee>,
        new_factor: u128,
        now: i64,
    ) -> Result<()> {
        instructions::update_fees::update_creator_fee(ctx, new_factor, now)
    }

    /// Raise a vault's boost fee factor (creator only, one direction).
    pub fn update_boost_fee(
        ctx: Context<UpdateVaultFee>,
        new_factor: u128,
        now: i64,
    ) -> Result<()> {
        instructions::update_fees::update_boost_fee(ctx, new_factor, now)
    }

    /// Refresh one or more vaults' indexes without touching user state.
    pub fn update_vault(ctx: Context<UpdateVault>, now: i64) -> Result<()> {
        instructions::update_vault::handler(ctx, now)
    }

    /// Extend the pool's reward envelope and/or schedule (admin only).
    pub fn update_emission(
        ctx: Context<UpdateEmission>,
        extra_amount: u128,
        extra_duration: i64,
        now: i64,
    ) -> Result<()> {
        instructions::update_emission::handler(ctx, extra_amount, extra_duration, now)
    }

    /// Pause the pool (admin only).
    pub fn pause(ctx: Context<AdminAction>, now: i64) -> Result<()> {
        instructions::admin::pause(ctx, now)
    }

    /// Unpause the pool (admin only).
    pub fn unpause(ctx: Context<AdminAction>, now: i64) -> Result<()> {
        instructions::admin::unpause(ctx, now)
    }

    /// Freeze a paused pool, enabling emergency_exit (admin only).
    pub fn freeze(ctx: Context<AdminAction>, now: i64) -> Result<()> {
        instructions::admin::freeze(ctx, now)
    }

    /// Return a user's stake from a paused-and-frozen pool without paying rewards.
    pub fn emergency_exit(
        ctx: Context<EmergencyExit>,
        on_behalf_of: Pubkey,
        now: i64,
    ) -> Result<()> {
        instructions::emergency_exit::handler(ctx, on_behalf_of, now)
    }
}
