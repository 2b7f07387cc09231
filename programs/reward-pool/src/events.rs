use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub reward_mint: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub emission_per_second: u128,
    pub total_rewards: u128,
    pub timestamp: i64,
}

#[event]
pub struct VaultCreated {
    pub vault: Pubkey,
    pub creator: Pubkey,
    pub duration_ordinal: u8,
    pub end_time: i64,
    pub multiplier: u16,
    pub creator_fee_factor: u128,
    pub boost_fee_factor: u128,
    pub timestamp: i64,
}

#[event]
pub struct TokensStaked {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub amount: u128,
    pub new_alloc_points: u128,
    pub timestamp: i64,
}

#[event]
pub struct BoostsStaked {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub count: u8,
    pub new_multiplier: u16,
    pub backfilled_boost_rewards: u128,
    pub timestamp: i64,
}

#[event]
pub struct RewardsClaimed {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub amount: u128,
    pub timestamp: i64,
}

#[event]
pub struct FeesClaimed {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub creator_amount: u128,
    pub boost_amount: u128,
    pub timestamp: i64,
}

#[event]
pub struct UnstakedAll {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub principal_returned: u128,
    pub boosts_returned: u8,
    pub timestamp: i64,
}

#[event]
pub struct VaultLimitIncreased {
    pub vault: Pubkey,
    pub new_limit: u128,
    pub timestamp: i64,
}

#[event]
pub struct CreatorFeeUpdated {
    pub vault: Pubkey,
    pub new_factor: u128,
    pub timestamp: i64,
}

#[event]
pub struct BoostFeeUpdated {
    pub vault: Pubkey,
    pub new_factor: u128,
    pub timestamp: i64,
}

#[event]
pub struct VaultIndexUpdated {
    pub vault: Pubkey,
    pub vault_index: u128,
    pub finalized: bool,
    pub timestamp: i64,
}

#[event]
pub struct EmissionUpdated {
    pub pool: Pubkey,
    pub new_total_rewards: u128,
    pub new_end_time: i64,
    pub new_emission_per_second: u128,
    pub timestamp: i64,
}

#[event]
pub struct PoolPaused {
    pub pool: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolUnpaused {
    pub pool: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PoolFrozen {
    pub pool: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EmergencyExited {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub principal_returned: u128,
    pub boosts_returned: u8,
    pub timestamp: i64,
}
