pub mod admin;
pub mod claim_fees;
pub mod claim_rewards;
pub mod create_vault;
pub mod emergency_exit;
pub mod increase_vault_limit;
pub mod initialize_pool;
pub mod stake_boosts;
pub mod stake_tokens;
pub mod unstake_all;
pub mod update_emission;
pub mod update_fees;
pub mod update_vault;

pub use admin::*;
pub use claim_fees::*;
pub use claim_rewards::*;
pub use create_vault::*;
pub use emergency_exit::*;
pub use increase_vault_limit::*;
pub use initialize_pool::*;
pub use stake_boosts::*;
pub use stake_tokens::*;
pub use unstake_all::*;
pub use update_emission::*;
pub use update_fees::*;
pub use update_vault::*;
