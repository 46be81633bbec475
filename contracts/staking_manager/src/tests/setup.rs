use soroban_sdk::{testutils::Ledger, token, Address, Env};

use crate::contract::{StakingManager, StakingManagerClient};

pub const REWARD_PER_BLOCK: i128 = 4_000_000;

pub fn deploy_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (token::Client<'a>, token::StellarAssetClient<'a>) {
    let contract_id = env.register_stellar_asset_contract_v2(admin.clone());

    (
        token::Client::new(env, &contract_id.address()),
        token::StellarAssetClient::new(env, &contract_id.address()),
    )
}

pub fn deploy_staking_manager<'a>(env: &Env, reward_token: &Address) -> StakingManagerClient<'a> {
    let manager = StakingManagerClient::new(env, &env.register_contract(None, StakingManager {}));
    manager.initialize(reward_token, &REWARD_PER_BLOCK);

    manager
}

pub fn advance_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number += blocks;
    });
}
