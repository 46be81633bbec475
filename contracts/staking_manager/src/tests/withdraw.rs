use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Env};
use test_case::test_case;

use super::setup::{
    advance_blocks, deploy_staking_manager, deploy_token_contract, REWARD_PER_BLOCK,
};

use crate::{error::ContractError, storage::Position};

#[test]
fn withdraw_all_tokens() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (reward_token, _) = deploy_token_contract(&env, &admin);
    let (stake_token, stake_asset) = deploy_token_contract(&env, &admin);

    let manager = deploy_staking_manager(&env, &reward_token.address);
    manager.create_pool(&stake_token.address);

    stake_asset.mint(&user, &20_000);
    manager.deposit(&user, &0, &20_000);

    // no ledger has passed, so the stake comes back without any rewards
    manager.withdraw(&user, &0);

    assert_eq!(stake_token.balance(&user), 20_000);
    assert_eq!(stake_token.balance(&manager.address), 0);
    assert_eq!(reward_token.balance(&user), 0);
    assert_eq!(
        manager.query_position(&0, &user).position,
        Position {
            amount: 0,
            reward_debt: 0,
        }
    );
    assert_eq!(manager.query_pool(&0).pool.total_staked, 0);
}

#[test]
fn withdraw_with_nothing_staked() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (reward_token, _) = deploy_token_contract(&env, &admin);
    let (stake_token, stake_asset) = deploy_token_contract(&env, &admin);

    let manager = deploy_staking_manager(&env, &reward_token.address);
    manager.create_pool(&stake_token.address);

    assert_eq!(
        manager.try_withdraw(&user, &0),
        Err(Ok(ContractError::NothingStaked))
    );

    // a position emptied by a withdrawal cannot be withdrawn again
    stake_asset.mint(&user, &1_000);
    manager.deposit(&user, &0, &1_000);
    manager.withdraw(&user, &0);
    assert_eq!(
        manager.try_withdraw(&user, &0),
        Err(Ok(ContractError::NothingStaked))
    );
}

#[test]
fn withdraw_pays_out_stake_and_rewards() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    // the pool stakes the reward token itself, as used for bootstrapping
    let (reward_token, reward_asset) = deploy_token_contract(&env, &admin);

    let manager = deploy_staking_manager(&env, &reward_token.address);
    manager.create_pool(&reward_token.address);

    reward_asset.mint(&user, &20_000);
    reward_asset.set_admin(&manager.address);

    manager.deposit(&user, &0, &20_000);
    advance_blocks(&env, 3);
    manager.withdraw(&user, &0);

    assert_eq!(
        reward_token.balance(&user),
        20_000 + 3 * REWARD_PER_BLOCK
    );
    assert_eq!(reward_token.balance(&manager.address), 0);
    assert_eq!(manager.query_pool(&0).pool.total_staked, 0);
}

#[test_case(1, 10_000; "one ledger")]
#[test_case(5, 80_000; "five ledgers")]
#[test_case(100, 250_000; "hundred ledgers")]
fn sole_staker_earns_full_emission(blocks: u32, amount: i128) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let (reward_token, reward_asset) = deploy_token_contract(&env, &admin);
    let (stake_token, stake_asset) = deploy_token_contract(&env, &admin);

    let manager = deploy_staking_manager(&env, &reward_token.address);
    reward_asset.set_admin(&manager.address);
    manager.create_pool(&stake_token.address);

    stake_asset.mint(&user, &amount);
    manager.deposit(&user, &0, &amount);
    advance_blocks(&env, blocks);
    manager.withdraw(&user, &0);

    // a sole staker owns the whole pool, so the payout does not depend on the
    // staked amount
    assert_eq!(stake_token.balance(&user), amount);
    assert_eq!(
        reward_token.balance(&user),
        i128::from(blocks) * REWARD_PER_BLOCK
    );
}
