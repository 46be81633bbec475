use soroban_sdk::{token, Env};

use crate::{
    error::ContractError,
    storage::{Config, Pool, Position},
};

/// Scaling factor for the per-share accumulator. Deferring the division by
/// `total_staked` to accrual time and the per-user multiplication to payout
/// time keeps the cost independent of elapsed ledgers and participant count;
/// the scaling preserves 12 decimal digits through the integer division.
pub const SHARE_PRECISION: u128 = 1_000_000_000_000;

/// Advances the pool's accumulator to `current_block` and returns the reward
/// amount that became due over the elapsed ledgers. While the pool is empty
/// the clock still advances, but nothing accrues and nothing is owed for the
/// interval. Idempotent within a single ledger.
pub fn settle_pool(
    pool: &mut Pool,
    current_block: u32,
    reward_per_block: i128,
) -> Result<i128, ContractError> {
    if current_block <= pool.last_accrual_block {
        return Ok(0);
    }
    let elapsed = current_block - pool.last_accrual_block;
    if pool.total_staked == 0 {
        pool.last_accrual_block = current_block;
        return Ok(0);
    }

    let reward_amount = i128::from(elapsed)
        .checked_mul(reward_per_block)
        .ok_or(ContractError::ContractMathError)?;
    // Integer division truncates; the remainder is lost precision bounded by
    // SHARE_PRECISION per settlement.
    let per_share = (reward_amount as u128)
        .checked_mul(SHARE_PRECISION)
        .ok_or(ContractError::ContractMathError)?
        / pool.total_staked as u128;
    pool.acc_reward_per_share = pool
        .acc_reward_per_share
        .checked_add(per_share)
        .ok_or(ContractError::ContractMathError)?;
    pool.last_accrual_block = current_block;

    Ok(reward_amount)
}

/// Settles the pool against the current ledger and mints the newly due
/// rewards into the contract's own custody. Minting requires the contract to
/// hold the admin role on the reward token.
pub fn update_rewards(env: &Env, config: &Config, pool: &mut Pool) -> Result<(), ContractError> {
    let minted = settle_pool(pool, env.ledger().sequence(), config.reward_per_block)?;
    if minted > 0 {
        token::StellarAssetClient::new(env, &config.reward_token)
            .mint(&env.current_contract_address(), &minted);
    }

    Ok(())
}

/// Reward debt checkpoint for a stake of `amount` at the pool's current
/// accumulator value.
pub fn reward_debt(pool: &Pool, amount: i128) -> Result<u128, ContractError> {
    let debt = (amount as u128)
        .checked_mul(pool.acc_reward_per_share)
        .ok_or(ContractError::ContractMathError)?
        / SHARE_PRECISION;

    Ok(debt)
}

/// Rewards accrued by the position since its last checkpoint. Must be called
/// after the pool has been settled; a result below zero means a checkpoint
/// was skipped and the accounting is corrupted.
pub fn calculate_pending_rewards(
    pool: &Pool,
    position: &Position,
) -> Result<i128, ContractError> {
    let accumulated = (position.amount as u128)
        .checked_mul(pool.acc_reward_per_share)
        .ok_or(ContractError::ContractMathError)?
        / SHARE_PRECISION;
    let pending = accumulated
        .checked_sub(position.reward_debt)
        .ok_or(ContractError::InvariantViolation)?;

    i128::try_from(pending).map_err(|_| ContractError::ContractMathError)
}
