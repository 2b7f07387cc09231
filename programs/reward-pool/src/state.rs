use anchor_lang::prelude::*;

use crate::error::RewardPoolError;
use crate::math::{mul_div_u128, rewards_from_index, PRECISION};

// === PDA SEEDS ===
pub const POOL_SEED: &[u8] = b"pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const USER_POSITION_SEED: &[u8] = b"user_position";
pub const REWARD_VAULT_AUTHORITY_SEED: &[u8] = b"reward_vault_authority";
pub const PRINCIPAL_VAULT_AUTHORITY_SEED: &[u8] = b"principal_vault_authority";
pub const RECEIPT_MINT_AUTHORITY_SEED: &[u8] = b"receipt_mint_authority";

// === PROTOCOL CONSTANTS (§6, bit-exact) ===
pub const MAX_BOOSTS_PER_VAULT: u8 = 2;
pub const BOOST_MULTIPLIER: u16 = 250;
pub const BASE_LIMIT: u128 = 200_000 * PRECISION;
pub const GLOBAL_PRINCIPAL_CAP: u128 = 1_000_000 * PRECISION;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Vault duration classes and their base multipliers (units of 1/100).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DurationClass {
    ThirtyDays = 0,
    SixtyDays = 1,
    NinetyDays = 2,
}

impl Default for DurationClass {
    fn default() -> Self {
        DurationClass::ThirtyDays
    }
}

impl DurationClass {
    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        match ordinal {
            0 => Ok(DurationClass::ThirtyDays),
            1 => Ok(DurationClass::SixtyDays),
            2 => Ok(DurationClass::NinetyDays),
            _ => Err(RewardPoolError::InvalidVaultPeriod.into()),
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        let days = match self {
            DurationClass::ThirtyDays => 30,
            DurationClass::SixtyDays => 60,
            DurationClass::NinetyDays => 90,
        };
        days * SECONDS_PER_DAY
    }

    pub fn base_multiplier(&self) -> u16 {
        match self {
            DurationClass::ThirtyDays => 100,
            DurationClass::SixtyDays => 125,
            DurationClass::NinetyDays => 150,
        }
    }
}

/// Process-wide singleton holding global emission state (core spec §3 "Pool").
#[account]
#[derive(Default)]
pub struct Pool {
    /// Owner key; authorizes pause/unpause/freeze/update_emission.
    pub admin: Pubkey,
    /// Front-door router collaborator, authorized to act `on_behalf_of` end users.
    pub router: Pubkey,
    /// Off-chain points-ledger collaborator (§6).
    pub points_ledger: Pubkey,
    /// Boost-asset registry collaborator (§6).
    pub boost_registry: Pubkey,
    /// Reward token mint.
    pub reward_mint: Pubkey,
    /// Token account holding the reward envelope (the "custodian" of §6).
    pub reward_vault: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub emission_per_second: u128,
    pub total_alloc_points: u128,
    pub index: u128,
    pub last_update_timestamp: i64,
    pub total_rewards: u128,
    pub rewards_emitted: u128,
    pub frozen: bool,
    pub paused: bool,
    pub bump: u8,
}

impl Pool {
    pub const LEN: usize = 8 // discriminator
        + 32 * 6 // admin, router, points_ledger, boost_registry, reward_mint, reward_vault
        + 8 // start_time
        + 8 // end_time
        + 16 // emission_per_second
        + 16 // total_alloc_points
        + 16 // index
        + 8 // last_update_timestamp
        + 16 // total_rewards
        + 16 // rewards_emitted
        + 1 // frozen
        + 1 // paused
        + 1; // bump

    pub fn assert_started(&self, now: i64) -> Result<()> {
        require!(now >= self.start_time, RewardPoolError::NotStarted);
        Ok(())
    }

    pub fn assert_not_paused(&self) -> Result<()> {
        require!(!self.paused, RewardPoolError::PoolPaused);
        Ok(())
    }

    pub fn assert_paused(&self) -> Result<()> {
        require!(self.paused, RewardPoolError::NotPaused);
        Ok(())
    }

    pub fn assert_frozen(&self) -> Result<()> {
        require!(self.frozen, RewardPoolError::PoolNotFrozen);
        Ok(())
    }

    pub fn assert_not_frozen(&self) -> Result<()> {
        require!(!self.frozen, RewardPoolError::PoolFrozen);
        Ok(())
    }

    /// Caller must be the router (acting `on_behalf_of`) or the end user directly.
    pub fn assert_authorized(&self, signer: &Pubkey, on_behalf_of: &Pubkey) -> Result<()> {
        require!(
            signer == &self.router || signer == on_behalf_of,
            RewardPoolError::IncorrectCaller
        );
        Ok(())
    }

    /// Pool Ledger `update_pool_index` (core spec §4.2).
    ///
    /// Advances `index`/`rewards_emitted` to `now` and returns the effective
    /// timestamp (`min(now, end_time)`), which callers use for vault-maturity
    /// detection regardless of whether the index actually moved.
    pub fn update_index(&mut self, now: i64) -> Result<i64> {
        require!(
            now >= self.last_update_timestamp,
            RewardPoolError::InvalidAmount
        );
        let effective_ts = now.min(self.end_time);
        if now == self.last_update_timestamp {
            return Ok(effective_ts);
        }

        let adv = crate::math::advance_pool_index(
            self.index,
            self.emission_per_second,
            self.last_update_timestamp,
            self.total_alloc_points,
            now,
            self.end_time,
        )?;
        if adv.next_index != self.index {
            self.index = adv.next_index;
        }
        if adv.emitted > 0 {
            self.rewards_emitted = self
                .rewards_emitted
                .checked_add(adv.emitted)
                .ok_or(RewardPoolError::MathOverflow)?;
        }
        self.last_update_timestamp = now;
        Ok(effective_ts)
    }

    /// `update_emission` business logic (core spec §4.5): grows the
    /// envelope and/or extends `end_time`, then recomputes
    /// `emission_per_second` off the remaining undistributed balance.
    /// Assumes `update_index(now)` has already been called. Returns the
    /// new `(end_time, emission_per_second)`; does not mutate `self` so
    /// callers can validate before committing.
    pub fn apply_emission_update(
        &self,
        extra_amount: u128,
        extra_duration: i64,
        now: i64,
    ) -> Result<(u128, i64, u128)> {
        require!(now < self.end_time, RewardPoolError::InsufficientTimeLeft);

        let new_total_rewards = self
            .total_rewards
            .checked_add(extra_amount)
            .ok_or(RewardPoolError::MathOverflow)?;
        let new_end_time = self
            .end_time
            .checked_add(extra_duration)
            .ok_or(RewardPoolError::MathOverflow)?;
        require!(new_end_time > now, RewardPoolError::InvalidEmissionParameters);

        let remaining = new_total_rewards
            .checked_sub(self.rewards_emitted)
            .ok_or(RewardPoolError::MathUnderflow)?;
        let new_eps = remaining / ((new_end_time - now) as u128);
        require!(new_eps > 0, RewardPoolError::InvalidEmissionParameters);

        Ok((new_total_rewards, new_end_time, new_eps))
    }
}

/// Mapping from vault identifier to vault state (core spec §3 "Vault").
/// The vault's own PDA address serves as the opaque 256-bit `vault_id`.
#[account]
#[derive(Default)]
pub struct Vault {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub principal_mint: Pubkey,
    pub principal_vault: Pubkey,
    pub receipt_mint: Pubkey,
    pub duration_class: DurationClass,
    pub end_time: i64,
    /// Units of 1/100; starts at the duration class's base multiplier, +250 per boost.
    pub multiplier: u16,
    pub staked_principal: u128,
    pub staked_boosts: u8,
    /// `staked_principal * multiplier`; zero until first stake, zero again after maturity.
    pub alloc_points: u128,
    pub principal_limit: u128,
    pub creator_fee_factor: u128,
    pub boost_fee_factor: u128,
    pub vault_index: u128,
    pub boost_index: u128,
    pub rewards_per_token: u128,
    pub acc_total_rewards: u128,
    pub acc_creator_rewards: u128,
    pub acc_boost_rewards: u128,
    pub total_claimed: u128,
    pub bump: u8,
}

impl Vault {
    pub const LEN: usize = 8 // discriminator
        + 32 * 5 // pool, creator, principal_mint, principal_vault, receipt_mint
        + 1 // duration_class
        + 8 // end_time
        + 2 // multiplier
        + 16 // staked_principal
        + 1 // staked_boosts
        + 16 // alloc_points
        + 16 // principal_limit
        + 16 // creator_fee_factor
        + 16 // boost_fee_factor
        + 16 // vault_index
        + 16 // boost_index
        + 16 // rewards_per_token
        + 16 // acc_total_rewards
        + 16 // acc_creator_rewards
        + 16 // acc_boost_rewards
        + 16 // total_claimed
        + 1; // bump

    pub fn assert_not_matured(&self, now: i64) -> Result<()> {
        require!(now < self.end_time, RewardPoolError::VaultMatured);
        Ok(())
    }

    pub fn assert_matured(&self, now: i64) -> Result<()> {
        require!(now >= self.end_time, RewardPoolError::VaultNotMatured);
        Ok(())
    }

    /// Validates a creator-fee update (core spec §4.5, §8 scenario 5):
    /// factor may only decrease, and the two factors may never sum past P.
    pub fn validate_creator_fee_update(&self, new_factor: u128) -> Result<()> {
        require!(
            new_factor < self.creator_fee_factor,
            RewardPoolError::CreatorFeeCanOnlyBeDecreased
        );
        require!(
            new_factor
                .checked_add(self.boost_fee_factor)
                .map(|sum| sum <= PRECISION)
                .unwrap_or(false),
            RewardPoolError::TotalFeeFactorExceeded
        );
        Ok(())
    }

    /// Validates a boost-fee update (core spec §4.5, §8 scenario 5):
    /// factor may only increase, and the two factors may never sum past P.
    pub fn validate_boost_fee_update(&self, new_factor: u128) -> Result<()> {
        require!(
            new_factor > self.boost_fee_factor,
            RewardPoolError::BoostFeeCanOnlyBeIncreased
        );
        require!(
            new_factor
                .checked_add(self.creator_fee_factor)
                .map(|sum| sum <= PRECISION)
                .unwrap_or(false),
            RewardPoolError::TotalFeeFactorExceeded
        );
        Ok(())
    }

    /// Recomputes `alloc_points` from `staked_principal * multiplier`
    /// (core spec §3: multiplier is used as a raw integer weight, not
    /// rescaled by its "units of 1/100" origin -- only ratios between
    /// vaults' alloc_points matter, and every vault uses this same
    /// convention) and applies the delta to both vault and pool totals.
    pub fn recompute_alloc_points(&mut self, pool: &mut Pool) -> Result<()> {
        let new_alloc = self
            .staked_principal
            .checked_mul(self.multiplier as u128)
            .ok_or(RewardPoolError::MathOverflow)?;
        if new_alloc >= self.alloc_points {
            let delta = new_alloc - self.alloc_points;
            pool.total_alloc_points = pool
                .total_alloc_points
                .checked_add(delta)
                .ok_or(RewardPoolError::MathOverflow)?;
        } else {
            let delta = self.alloc_points - new_alloc;
            pool.total_alloc_points = pool
                .total_alloc_points
                .checked_sub(delta)
                .ok_or(RewardPoolError::MathUnderflow)?;
        }
        self.alloc_points = new_alloc;
        Ok(())
    }

    /// Vault Ledger `update_vault_index` (core spec §4.3), steps 2-6.
    /// Assumes `pool` has already been advanced to `now` via `Pool::update_index`.
    pub fn update_index(&mut self, pool: &mut Pool, effective_ts: i64) -> Result<()> {
        if pool.index == self.vault_index {
            return Ok(());
        }
        if self.alloc_points == 0 {
            // Finalized vault, or a vault with no principal staked yet: no
            // accrual and no index sync. Pre-stake rewards are dropped by
            // design (core spec §9, "boost-ball" note).
            return Ok(());
        }

        if self.staked_principal > 0 {
            let accrued = rewards_from_index(self.alloc_points, pool.index, self.vault_index)?;

            let creator_fee = if self.creator_fee_factor > 0 {
                mul_div_u128(accrued, self.creator_fee_factor, PRECISION)?
            } else {
                0
            };
            let boost_fee = if self.boost_fee_factor > 0 {
                mul_div_u128(accrued, self.boost_fee_factor, PRECISION)?
            } else {
                0
            };

            self.acc_total_rewards = self
                .acc_total_rewards
                .checked_add(accrued)
                .ok_or(RewardPoolError::MathOverflow)?;
            self.acc_creator_rewards = self
                .acc_creator_rewards
                .checked_add(creator_fee)
                .ok_or(RewardPoolError::MathOverflow)?;
            self.acc_boost_rewards = self
                .acc_boost_rewards
                .checked_add(boost_fee)
                .ok_or(RewardPoolError::MathOverflow)?;

            let net = accrued
                .checked_sub(creator_fee)
                .and_then(|v| v.checked_sub(boost_fee))
                .ok_or(RewardPoolError::MathUnderflow)?;
            let rpt_delta = mul_div_u128(net, PRECISION, self.staked_principal)?;
            self.rewards_per_token = self
                .rewards_per_token
                .checked_add(rpt_delta)
                .ok_or(RewardPoolError::MathOverflow)?;

            if self.staked_boosts > 0 {
                // Integer truncation here is intentional (core spec §4.3 step 4).
                let boost_incr = boost_fee / (self.staked_boosts as u128);
                self.boost_index = self
                    .boost_index
                    .checked_add(boost_incr)
                    .ok_or(RewardPoolError::MathOverflow)?;
            }
        }

        self.vault_index = pool.index;

        if effective_ts >= self.end_time {
            pool.total_alloc_points = pool
                .total_alloc_points
                .checked_sub(self.alloc_points)
                .ok_or(RewardPoolError::MathUnderflow)?;
            self.alloc_points = 0;
        }
        Ok(())
    }
}

/// Per (principal holder, vault) state (core spec §3 "User").
#[account]
#[derive(Default)]
pub struct UserPosition {
    pub owner: Pubkey,
    pub vault: Pubkey,
    pub staked_principal: u128,
    /// Ordered boost-asset identifiers; length <= MAX_BOOSTS_PER_VAULT.
    pub boost_ids: Vec<Pubkey>,
    pub user_index: u128,
    pub user_boost_index: u128,
    pub acc_staking_rewards: u128,
    pub claimed_staking_rewards: u128,
    pub acc_boost_rewards: u128,
    pub claimed_boost_rewards: u128,
    pub claimed_creator_rewards: u128,
    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8 // discriminator
        + 32 // owner
        + 32 // vault
        + 16 // staked_principal
        + 4 + 32 * (MAX_BOOSTS_PER_VAULT as usize) // boost_ids Vec<Pubkey>
        + 16 // user_index
        + 16 // user_boost_index
        + 16 // acc_staking_rewards
        + 16 // claimed_staking_rewards
        + 16 // acc_boost_rewards
        + 16 // claimed_boost_rewards
        + 16 // claimed_creator_rewards
        + 1; // bump

    /// User Ledger `update_user_indexes` (core spec §4.4), steps 2-4.
    /// Assumes `vault` has already been advanced via `Vault::update_index`.
    pub fn accrue(&mut self, vault: &Vault) -> Result<()> {
        if self.user_index != vault.rewards_per_token && self.staked_principal > 0 {
            let acc = rewards_from_index(self.staked_principal, vault.rewards_per_token, self.user_index)?;
            self.acc_staking_rewards = self
                .acc_staking_rewards
                .checked_add(acc)
                .ok_or(RewardPoolError::MathOverflow)?;
        }
        if !self.boost_ids.is_empty() && self.user_boost_index != vault.boost_index {
            let diff = vault
                .boost_index
                .checked_sub(self.user_boost_index)
                .ok_or(RewardPoolError::MathUnderflow)?;
            let acc = diff
                .checked_mul(self.boost_ids.len() as u128)
                .ok_or(RewardPoolError::MathOverflow)?;
            self.acc_boost_rewards = self
                .acc_boost_rewards
                .checked_add(acc)
                .ok_or(RewardPoolError::MathOverflow)?;
        }
        self.user_index = vault.rewards_per_token;
        self.user_boost_index = vault.boost_index;
        Ok(())
    }
}

/// Runs the Pool -> Vault -> User prologue shared by every mutating
/// operation (core spec §2, §9 "index freshness as a prerequisite").
/// Returns the effective timestamp, which business logic uses for
/// maturity checks.
pub fn run_prologue(
    pool: &mut Pool,
    vault: &mut Vault,
    user: Option<&mut UserPosition>,
    now: i64,
) -> Result<i64> {
    let effective_ts = pool.update_index(now)?;
    vault.update_index(pool, effective_ts)?;
    if let Some(user) = user {
        user.accrue(vault)?;
    }
    Ok(effective_ts)
}
