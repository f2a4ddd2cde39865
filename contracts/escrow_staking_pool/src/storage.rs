use emission::ttl::{INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL};
use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use crate::error::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    // Yield bearing receipt token, also the yield source itself
    pub receipt_token: Address,
    pub underlying_token: Address,
    pub reward_token: Address,
    pub reward_distributor: Address,
    pub owner: Address,
    // Receives the swept principal once the pool is frozen
    pub escrow_account: Address,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "EscrowStakingPool: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    });
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

    config
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}
