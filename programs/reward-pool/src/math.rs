//! Pure fixed-point index arithmetic. No Anchor types, no account access —
//! these are the only places integer division happens in the reward path.

use crate::error::RewardPoolError;
use anchor_lang::prelude::*;

/// Fixed-point precision: one "unit" of a factor or index increment.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Result of advancing the pool index to `now`.
pub struct PoolAdvance {
    pub next_index: u128,
    pub effective_ts: i64,
    pub emitted: u128,
}

/// `advance_pool_index` from the core spec (§4.1).
///
/// Truncating division here is canonical: the same rounding must be
/// reproduced by any compatible implementation.
pub fn advance_pool_index(
    current_index: u128,
    emission_per_second: u128,
    last_ts: i64,
    total_alloc: u128,
    now: i64,
    end_time: i64,
) -> Result<PoolAdvance> {
    if emission_per_second == 0 || total_alloc == 0 || last_ts >= now || last_ts >= end_time {
        return Ok(PoolAdvance {
            next_index: current_index,
            effective_ts: last_ts,
            emitted: 0,
        });
    }

    let effective_ts = now.min(end_time);
    let dt = effective_ts
        .checked_sub(last_ts)
        .ok_or(RewardPoolError::MathOverflow)?;
    let emitted = emission_per_second
        .checked_mul(dt as u128)
        .ok_or(RewardPoolError::MathOverflow)?;
    let delta = emitted
        .checked_mul(PRECISION)
        .ok_or(RewardPoolError::MathOverflow)?
        .checked_div(total_alloc)
        .ok_or(RewardPoolError::DivisionByZero)?;
    let next_index = current_index
        .checked_add(delta)
        .ok_or(RewardPoolError::MathOverflow)?;

    Ok(PoolAdvance {
        next_index,
        effective_ts,
        emitted,
    })
}

/// `rewards_from_index` from the core spec (§4.1): `balance * (cur - prior) / P`, truncating.
pub fn rewards_from_index(balance: u128, cur_index: u128, prior_index: u128) -> Result<u128> {
    let diff = cur_index
        .checked_sub(prior_index)
        .ok_or(RewardPoolError::MathUnderflow)?;
    balance
        .checked_mul(diff)
        .ok_or(RewardPoolError::MathOverflow)?
        .checked_div(PRECISION)
        .ok_or(RewardPoolError::DivisionByZero)
}

/// Checked `a * b / c` over `u128`, used for fee-factor application.
pub fn mul_div_u128(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(RewardPoolError::DivisionByZero.into());
    }
    let product = a.checked_mul(b).ok_or(RewardPoolError::MathOverflow)?;
    Ok(product / c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_pool_index_no_op_when_eps_zero() {
        let adv = advance_pool_index(7, 0, 10, 1000, 20, 1_000_000).unwrap();
        assert_eq!(adv.next_index, 7);
        assert_eq!(adv.emitted, 0);
        assert_eq!(adv.effective_ts, 10);
    }

    #[test]
    fn advance_pool_index_no_op_when_no_alloc() {
        let adv = advance_pool_index(7, 5, 10, 0, 20, 1_000_000).unwrap();
        assert_eq!(adv.next_index, 7);
        assert_eq!(adv.emitted, 0);
    }

    #[test]
    fn advance_pool_index_snaps_to_end_time() {
        // eps=1e18, total_alloc=5000e18, window from 3 to 10 but end_time=4
        let eps = PRECISION;
        let total_alloc = 5000 * PRECISION;
        let adv = advance_pool_index(0, eps, 3, total_alloc, 10, 4).unwrap();
        assert_eq!(adv.effective_ts, 4);
        assert_eq!(adv.emitted, eps * 1); // only 1 second elapsed (3->4)
    }

    #[test]
    fn advance_pool_index_matches_scenario_one() {
        // Scenario 1 from spec §8: eps=1e18, alloc=5000e18, one second elapsed.
        let eps = PRECISION;
        let total_alloc = 5000 * PRECISION;
        let adv = advance_pool_index(0, eps, 3, total_alloc, 4, 1 + 120 * 86_400).unwrap();
        assert_eq!(adv.emitted, PRECISION);
        // delta = emitted * P / total_alloc = 1e18 * 1e18 / 5000e18 = 2e14
        assert_eq!(adv.next_index, 200_000_000_000_000u128);
    }

    #[test]
    fn rewards_from_index_truncates() {
        // 50e18 staked at rewards_per_token diff of 0.8e18 expected -> 40e18 (exact here)
        let balance = 50 * PRECISION;
        let diff = (PRECISION * 8) / 10;
        let r = rewards_from_index(balance, diff, 0).unwrap();
        assert_eq!(r, 40 * PRECISION);
    }

    #[test]
    fn rewards_from_index_rejects_decreasing_index() {
        assert!(rewards_from_index(10, 5, 8).is_err());
    }
}
