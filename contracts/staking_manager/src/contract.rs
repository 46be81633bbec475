use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env};

use crate::{
    distribution::{calculate_pending_rewards, reward_debt, settle_pool, update_rewards},
    error::ContractError,
    msg::{ConfigResponse, PoolResponse, PositionResponse},
    storage::{
        get_config, get_pool, get_pool_count, get_position, init_pool_count, is_initialized,
        save_config, save_pool, save_pool_count, save_position, set_initialized, Config, Pool,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Multi pool staking manager with per ledger reward emission"
);

#[contract]
pub struct StakingManager;

pub trait StakingManagerTrait {
    // Sets the reward token and the flat emission rate; both are immutable afterwards
    fn initialize(
        env: Env,
        reward_token: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError>;

    fn create_pool(env: Env, stake_token: Address) -> Result<u32, ContractError>;

    fn deposit(env: Env, sender: Address, pool_id: u32, amount: i128)
        -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError>;

    fn harvest_rewards(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError>;

    fn query_pools_count(env: Env) -> Result<u32, ContractError>;

    fn query_pool(env: Env, pool_id: u32) -> Result<PoolResponse, ContractError>;

    fn query_position(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<PositionResponse, ContractError>;

    fn query_pending_rewards(env: Env, pool_id: u32, user: Address)
        -> Result<i128, ContractError>;
}

#[contractimpl]
impl StakingManagerTrait for StakingManager {
    fn initialize(
        env: Env,
        reward_token: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(
                &env,
                "Staking manager: Initialize: initializing contract twice is not allowed"
            );
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block <= 0 {
            log!(
                &env,
                "Staking manager: Initialize: reward emission per ledger must be bigger than 0"
            );
            return Err(ContractError::InvalidRewardRate);
        }

        set_initialized(&env);

        let config = Config {
            reward_token: reward_token.clone(),
            reward_per_block,
        };
        save_config(&env, config);
        init_pool_count(&env);

        env.events()
            .publish(("initialize", "reward_token"), &reward_token);

        Ok(())
    }

    fn create_pool(env: Env, stake_token: Address) -> Result<u32, ContractError> {
        let pool_id = get_pool_count(&env);
        let pool = Pool {
            stake_token: stake_token.clone(),
            total_staked: 0,
            last_accrual_block: env.ledger().sequence(),
            acc_reward_per_share: 0,
        };
        save_pool(&env, pool_id, &pool);
        save_pool_count(&env, pool_id + 1);

        env.events().publish(("create_pool", "pool_id"), pool_id);
        env.events()
            .publish(("create_pool", "stake_token"), &stake_token);

        Ok(pool_id)
    }

    fn deposit(
        env: Env,
        sender: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        if amount < 0 {
            log!(
                &env,
                "Staking manager: Deposit: trying to stake negative amount: {}",
                amount
            );
            return Err(ContractError::InvalidStakeAmount);
        }

        let config = get_config(&env);
        let mut pool = get_pool(&env, pool_id)?;
        update_rewards(&env, &config, &mut pool)?;

        let mut position = get_position(&env, pool_id, &sender);
        let pending = calculate_pending_rewards(&pool, &position)?;
        if pending > 0 {
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &sender,
                &pending,
            );
        }

        // A zero amount settles rewards only; the stake stays untouched
        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &sender,
                &env.current_contract_address(),
                &amount,
            );
            position.amount += amount;
            pool.total_staked += amount;
        }
        position.reward_debt = reward_debt(&pool, position.amount)?;

        save_position(&env, pool_id, &sender, &position);
        save_pool(&env, pool_id, &pool);

        env.events().publish(("deposit", "user"), &sender);
        env.events().publish(("deposit", "pool_id"), pool_id);
        env.events().publish(("deposit", "amount"), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let mut pool = get_pool(&env, pool_id)?;
        let mut position = get_position(&env, pool_id, &sender);
        if position.amount == 0 {
            log!(&env, "Staking manager: Withdraw: nothing staked to withdraw");
            return Err(ContractError::NothingStaked);
        }

        update_rewards(&env, &config, &mut pool)?;

        let pending = calculate_pending_rewards(&pool, &position)?;
        if pending > 0 {
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &sender,
                &pending,
            );
        }

        let amount = position.amount;
        token::Client::new(&env, &pool.stake_token).transfer(
            &env.current_contract_address(),
            &sender,
            &amount,
        );

        position.amount = 0;
        position.reward_debt = 0;
        pool.total_staked -= amount;
        if pool.total_staked < 0 {
            log!(
                &env,
                "Staking manager: Withdraw: pool total dropped below zero"
            );
            return Err(ContractError::InvariantViolation);
        }

        save_position(&env, pool_id, &sender, &position);
        save_pool(&env, pool_id, &pool);

        env.events().publish(("withdraw", "user"), &sender);
        env.events().publish(("withdraw", "pool_id"), pool_id);
        env.events().publish(("withdraw", "amount"), amount);

        Ok(())
    }

    fn harvest_rewards(env: Env, sender: Address, pool_id: u32) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let mut pool = get_pool(&env, pool_id)?;
        update_rewards(&env, &config, &mut pool)?;

        let mut position = get_position(&env, pool_id, &sender);
        let pending = calculate_pending_rewards(&pool, &position)?;
        if pending > 0 {
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &sender,
                &pending,
            );
        }
        position.reward_debt = reward_debt(&pool, position.amount)?;

        save_position(&env, pool_id, &sender, &position);
        save_pool(&env, pool_id, &pool);

        env.events().publish(("harvest_rewards", "user"), &sender);
        env.events().publish(("harvest_rewards", "pool_id"), pool_id);
        env.events().publish(("harvest_rewards", "amount"), pending);

        Ok(())
    }

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError> {
        Ok(ConfigResponse {
            config: get_config(&env),
        })
    }

    fn query_pools_count(env: Env) -> Result<u32, ContractError> {
        Ok(get_pool_count(&env))
    }

    fn query_pool(env: Env, pool_id: u32) -> Result<PoolResponse, ContractError> {
        Ok(PoolResponse {
            pool: get_pool(&env, pool_id)?,
        })
    }

    fn query_position(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<PositionResponse, ContractError> {
        get_pool(&env, pool_id)?;

        Ok(PositionResponse {
            position: get_position(&env, pool_id, &user),
        })
    }

    fn query_pending_rewards(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<i128, ContractError> {
        let config = get_config(&env);
        let mut pool = get_pool(&env, pool_id)?;
        // Project the accumulator forward without minting; the pool is not saved
        settle_pool(&mut pool, env.ledger().sequence(), config.reward_per_block)?;
        let position = get_position(&env, pool_id, &user);

        calculate_pending_rewards(&pool, &position)
    }
}
