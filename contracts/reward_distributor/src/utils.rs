use soroban_sdk::{xdr::ToXdr, Address, Bytes, Env};

use crate::storage::{next_pool_counter, Config};

/// Deploys a staking pool owned and rate-controlled by this distributor. The salt
/// mixes in a running counter so one staked token can back several pools.
pub fn deploy_staking_pool(
    env: &Env,
    config: &Config,
    staked_token: &Address,
    start_time: u64,
    external_incentivizer: Option<Address>,
) -> Address {
    let mut salt = Bytes::new(env);
    salt.append(&staked_token.clone().to_xdr(env));
    salt.append(&next_pool_counter(env).to_xdr(env));
    let salt = env.crypto().sha256(&salt).to_bytes();

    let distributor = env.current_contract_address();
    env.deployer().with_current_contract(salt).deploy_v2(
        config.pool_wasm_hash.clone(),
        (
            distributor.clone(),
            distributor,
            staked_token.clone(),
            config.reward_token.clone(),
            start_time,
            external_incentivizer,
        ),
    )
}
