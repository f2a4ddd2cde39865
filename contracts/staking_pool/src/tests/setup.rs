use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Ledger, token, Address, Env, Symbol,
};

use crate::contract::{StakingPool, StakingPoolClient};

pub const ONE_HOUR: u64 = 3600;

const REWARD_TOKEN: Symbol = symbol_short!("REWARD");

/// Reward treasury paying out of its own balance to any pool that asks.
#[contract]
pub struct MockTreasury;

#[contractimpl]
impl MockTreasury {
    pub fn __constructor(env: Env, reward_token: Address) {
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
    }

    pub fn pay_reward(env: Env, sender: Address, to: Address, amount: i128) {
        sender.require_auth();
        let reward_token: Address = env.storage().instance().get(&REWARD_TOKEN).unwrap();
        token::Client::new(&env, &reward_token).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );
    }
}

pub fn deploy_treasury(env: &Env, reward_token: &Address) -> Address {
    env.register(MockTreasury, (reward_token,))
}

pub fn deploy_token_contract<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    token::Client::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
}

pub fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

pub fn deploy_staking_pool<'a>(
    env: &Env,
    owner: &Address,
    reward_distributor: &Address,
    staked_token: &Address,
    reward_token: &Address,
    start_time: u64,
    external_incentivizer: Option<Address>,
) -> StakingPoolClient<'a> {
    StakingPoolClient::new(
        env,
        &env.register(
            StakingPool,
            (
                owner,
                reward_distributor,
                staked_token,
                reward_token,
                start_time,
                external_incentivizer,
            ),
        ),
    )
}

pub fn fund_treasury(env: &Env, reward_token: &token::Client, treasury: &Address, amount: i128) {
    mint(env, reward_token, treasury, amount);
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}
