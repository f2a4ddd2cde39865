use soroban_sdk::{contracttype, log, panic_with_error, Address, Env};

use crate::{
    error::LedgerError,
    ledger::{AccountRecord, RewardState},
    ttl::{PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL},
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerDataKey {
    RewardState,
    Account(Address),
}

pub fn save_reward_state(env: &Env, state: &RewardState) {
    let key = LedgerDataKey::RewardState;
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}

pub fn get_reward_state(env: &Env) -> RewardState {
    let key = LedgerDataKey::RewardState;
    let state = env.storage().persistent().get(&key).unwrap_or_else(|| {
        log!(env, "Emission: Reward state not set");
        panic_with_error!(env, LedgerError::RewardStateNotSet)
    });
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);

    state
}

pub fn get_account(env: &Env, staker: &Address) -> AccountRecord {
    let key = LedgerDataKey::Account(staker.clone());
    let account = env
        .storage()
        .persistent()
        .get::<_, AccountRecord>(&key)
        .unwrap_or_default();
    env.storage().persistent().has(&key).then(|| {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    });

    account
}

pub fn save_account(env: &Env, staker: &Address, account: &AccountRecord) {
    let key = LedgerDataKey::Account(staker.clone());
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_RENEWAL_THRESHOLD, PERSISTENT_TARGET_TTL);
}
