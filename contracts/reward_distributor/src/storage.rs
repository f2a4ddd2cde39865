use emission::ttl::{
    INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
    PERSISTENT_TARGET_TTL,
};
use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, BytesN, ConversionError, Env,
    Symbol, TryFromVal, Val, Vec,
};

use crate::error::ContractError;

pub const PENDING_ADMIN: Symbol = symbol_short!("p_admin");

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum DataKey {
    Recipients = 1,
    PoolCounter = 2,
}

impl TryFromVal<Env, DataKey> for Val {
    type Error = ConversionError;

    fn try_from_val(_env: &Env, v: &DataKey) -> Result<Self, Self::Error> {
        Ok((*v as u32).into())
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    // Token every registered pool pays its rewards in, held by this contract
    pub reward_token: Address,
    // Staking pool code deployed by the factory entry points
    pub pool_wasm_hash: BytesN<32>,
}
const CONFIG: Symbol = symbol_short!("CONFIG");

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "RewardDistributor: Config not set");
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

pub fn get_recipients(env: &Env) -> Vec<Address> {
    match env.storage().persistent().get(&DataKey::Recipients) {
        Some(recipients) => {
            env.storage().persistent().extend_ttl(
                &DataKey::Recipients,
                PERSISTENT_RENEWAL_THRESHOLD,
                PERSISTENT_TARGET_TTL,
            );
            recipients
        }
        None => Vec::new(env),
    }
}

pub fn save_recipients(env: &Env, recipients: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&DataKey::Recipients, recipients);
    env.storage().persistent().extend_ttl(
        &DataKey::Recipients,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub fn is_recipient(env: &Env, recipient: &Address) -> bool {
    get_recipients(env).contains(recipient.clone())
}

/// Returns the current pool counter and bumps the stored value.
pub fn next_pool_counter(env: &Env) -> u32 {
    let counter: u32 = env
        .storage()
        .instance()
        .get(&DataKey::PoolCounter)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::PoolCounter, &(counter + 1));

    counter
}
