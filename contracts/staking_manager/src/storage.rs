use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::error::ContractError;
use crate::ttl::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    // Token that is minted and paid out as staking rewards
    pub reward_token: Address,
    // Amount of reward tokens each pool emits per ledger
    pub reward_per_block: i128,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&CONFIG)
        .expect("Staking manager: Config not set");
    env.storage().persistent().extend_ttl(
        &CONFIG,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

pub fn save_config(env: &Env, config: Config) {
    env.storage().persistent().set(&CONFIG, &config);
    env.storage().persistent().extend_ttl(
        &CONFIG,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Token accepted for staking in this pool
    pub stake_token: Address,
    /// Sum of all positions' staked amounts
    pub total_staked: i128,
    /// Ledger at which rewards were last accrued
    pub last_accrual_block: u32,
    /// Cumulative rewards per staked token since pool creation, scaled by SHARE_PRECISION
    pub acc_reward_per_share: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Position {
    /// Currently staked balance
    pub amount: i128,
    /// The rewards debt is a mechanism to determine how much a user has already been credited
    /// in terms of staking rewards. Whenever a user deposits or withdraws staked tokens to the
    /// pool, the rewards for the user is updated based on the accumulated rewards per share, and
    /// the difference is stored as reward debt. When claiming rewards, this reward debt is used
    /// to determine how much rewards a user can actually claim.
    pub reward_debt: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionKey {
    pub pool_id: u32,
    pub user: Address,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    PoolCount,
    Pool(u32),
    Position(PositionKey),
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(e: &Env) {
    e.storage().instance().set(&DataKey::Initialized, &true);
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn init_pool_count(env: &Env) {
    env.storage().persistent().set(&DataKey::PoolCount, &0u32);
    env.storage().persistent().extend_ttl(
        &DataKey::PoolCount,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_pool_count(env: &Env) -> u32 {
    let count = env
        .storage()
        .persistent()
        .get(&DataKey::PoolCount)
        .unwrap();
    env.storage().persistent().extend_ttl(
        &DataKey::PoolCount,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    count
}

pub fn save_pool_count(env: &Env, count: u32) {
    env.storage().persistent().set(&DataKey::PoolCount, &count);
    env.storage().persistent().extend_ttl(
        &DataKey::PoolCount,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let pool = env
        .storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(ContractError::PoolNotFound)?;
    env.storage().persistent().extend_ttl(
        &DataKey::Pool(pool_id),
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    Ok(pool)
}

pub fn save_pool(env: &Env, pool_id: u32, pool: &Pool) {
    env.storage().persistent().set(&DataKey::Pool(pool_id), pool);
    env.storage().persistent().extend_ttl(
        &DataKey::Pool(pool_id),
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// Positions are created lazily; an absent key reads as a zeroed position and
// is never deleted afterwards, only zeroed again.
pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> Position {
    let key = DataKey::Position(PositionKey {
        pool_id,
        user: user.clone(),
    });
    let position = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_default();
    env.storage().persistent().has(&key).then(|| {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    });

    position
}

pub fn save_position(env: &Env, pool_id: u32, user: &Address, position: &Position) {
    let key = DataKey::Position(PositionKey {
        pool_id,
        user: user.clone(),
    });
    env.storage().persistent().set(&key, position);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}
