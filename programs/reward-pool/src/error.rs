use anchor_lang::prelude::*;

#[error_code]
pub enum RewardPoolError {
    // --- Timing ---
    #[msg("E6000: Pool has not started yet")]
    NotStarted = 6000,

    #[msg("E6001: Not enough time left before pool end")]
    InsufficientTimeLeft = 6001,

    #[msg("E6002: Vault has already matured")]
    VaultMatured = 6002,

    #[msg("E6003: Vault has not matured yet")]
    VaultNotMatured = 6003,

    #[msg("E6004: Staking window for this vault has ended")]
    StakingEnded = 6004,

    // --- Identity / auth ---
    #[msg("E6005: Caller is not authorized for this action")]
    IncorrectCaller = 6005,

    #[msg("E6006: Caller is not the vault creator")]
    UserIsNotVaultCreator = 6006,

    #[msg("E6007: Vault does not exist")]
    NonExistentVault = 6007,

    // --- Shape ---
    #[msg("E6008: Invalid vault duration class")]
    InvalidVaultPeriod = 6008,

    #[msg("E6009: Invalid amount")]
    InvalidAmount = 6009,

    #[msg("E6010: Invalid vault id")]
    InvalidVaultId = 6010,

    #[msg("E6011: Invalid router address")]
    InvalidRouter = 6011,

    #[msg("E6012: Invalid emission parameters")]
    InvalidEmissionParameters = 6012,

    // --- Policy ---
    #[msg("E6013: Total fee factor exceeds precision")]
    TotalFeeFactorExceeded = 6013,

    #[msg("E6014: Creator fee factor can only be decreased")]
    CreatorFeeCanOnlyBeDecreased = 6014,

    #[msg("E6015: Boost fee factor can only be increased")]
    BoostFeeCanOnlyBeIncreased = 6015,

    #[msg("E6016: Boost staking limit exceeded for this vault")]
    BoostStakingLimitExceeded = 6016,

    #[msg("E6017: Staked token limit exceeded for this vault")]
    StakedTokenLimitExceeded = 6017,

    #[msg("E6018: User has nothing staked in this vault")]
    UserHasNothingStaked = 6018,

    // --- Lifecycle ---
    #[msg("E6019: Pool is frozen")]
    PoolFrozen = 6019,

    #[msg("E6020: Pool is not frozen")]
    PoolNotFrozen = 6020,

    #[msg("E6021: Pool is not paused")]
    NotPaused = 6021,

    #[msg("E6022: Pool is already frozen")]
    AlreadyFrozen = 6022,

    #[msg("E6023: Pool is paused")]
    PoolPaused = 6023,

    // --- Arithmetic (cannot occur given I1-I6, kept for defense in depth) ---
    #[msg("E6024: Math overflow")]
    MathOverflow = 6024,

    #[msg("E6025: Math underflow")]
    MathUnderflow = 6025,

    #[msg("E6026: Division by zero")]
    DivisionByZero = 6026,
}
