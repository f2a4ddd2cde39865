//! Bookkeeping shared by every pool flavour. Each function persists the ledger
//! before returning, so callers move tokens only after the state is final.

use soroban_sdk::{token, Address, Env};

use crate::{
    error::LedgerError,
    interface::RewardTreasuryClient,
    storage::{get_account, get_reward_state, save_account, save_reward_state},
};

pub fn stake(env: &Env, staker: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount);
    }
    let now = env.ledger().timestamp();
    let mut state = get_reward_state(env);
    if state.is_frozen(now) {
        return Err(LedgerError::FreezingTimeEntered);
    }

    state.touch(env, now)?;
    let mut account = get_account(env, staker);
    state.settle(env, &mut account)?;
    state.deposit(&mut account, amount)?;

    save_account(env, staker, &account);
    save_reward_state(env, &state);
    Ok(())
}

pub fn withdraw(env: &Env, staker: &Address, amount: i128) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount);
    }
    let now = env.ledger().timestamp();
    let mut state = get_reward_state(env);
    if state.is_frozen(now) {
        return Err(LedgerError::FreezingTimeEntered);
    }

    state.touch(env, now)?;
    let mut account = get_account(env, staker);
    state.settle(env, &mut account)?;
    state.withdrawal(&mut account, amount)?;

    save_account(env, staker, &account);
    save_reward_state(env, &state);
    Ok(())
}

/// Settles `staker` and returns the reward that has to be paid out. Works in every
/// pool phase, including after freezing.
pub fn claim(env: &Env, staker: &Address) -> Result<i128, LedgerError> {
    let now = env.ledger().timestamp();
    let mut state = get_reward_state(env);

    state.touch(env, now)?;
    let mut account = get_account(env, staker);
    state.settle(env, &mut account)?;
    let reward = state.take_reward(&mut account);

    save_account(env, staker, &account);
    save_reward_state(env, &state);
    Ok(reward)
}

pub fn earned(env: &Env, staker: &Address) -> Result<i128, LedgerError> {
    let state = get_reward_state(env);
    state.earned(env, &get_account(env, staker), env.ledger().timestamp())
}

pub fn set_reward_rate(env: &Env, reward_rate: i128) -> Result<(), LedgerError> {
    let mut state = get_reward_state(env);
    state.set_rate(env, reward_rate, env.ledger().timestamp())?;
    save_reward_state(env, &state);
    Ok(())
}

/// Asks the reward treasury to pay `amount` to `to` on behalf of this pool.
pub fn pay_reward(env: &Env, treasury: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        RewardTreasuryClient::new(env, treasury).pay_reward(
            &env.current_contract_address(),
            to,
            &amount,
        );
    }
}

/// Part of this contract's `token` balance that is neither staker principal nor
/// reserved for rewards emitted up to now but not yet paid.
pub fn surplus(
    env: &Env,
    token: &Address,
    staked_token: &Address,
    reward_token: &Address,
    principal_held: i128,
) -> Result<i128, LedgerError> {
    let mut available = token::Client::new(env, token).balance(&env.current_contract_address());
    if token == staked_token {
        available -= principal_held;
    }
    if token == reward_token {
        let mut state = get_reward_state(env);
        state.touch(env, env.ledger().timestamp())?;
        available -= state.outstanding_rewards();
    }
    Ok(available.max(0))
}
