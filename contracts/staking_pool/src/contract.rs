use emission::{
    staking,
    storage::{get_account, get_reward_state, save_reward_state},
    AccountRecord, RewardState, NO_FREEZE,
};
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, Env};

use crate::{
    custody::{Custody, IncentivizerClient},
    error::ContractError,
    storage::{get_config, save_config, Config},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Emission staking pool with a distributor controlled reward rate"
);

#[contract]
pub struct StakingPool;

pub trait StakingPoolTrait {
    fn __constructor(
        env: Env,
        owner: Address,
        reward_distributor: Address,
        staked_token: Address,
        reward_token: Address,
        start_time: u64,
        external_incentivizer: Option<Address>,
    );

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn get_reward(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn exit(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128) -> Result<(), ContractError>;

    fn rescue_tokens(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError>;

    fn claim_external_rewards(env: Env, sender: Address, to: Address)
        -> Result<i128, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Config;

    fn query_reward_state(env: Env) -> RewardState;

    fn query_reward_rate(env: Env) -> i128;

    fn query_current_reward_rate(env: Env) -> i128;

    fn query_total_staked(env: Env) -> i128;

    fn query_balance(env: Env, address: Address) -> i128;

    fn query_account(env: Env, address: Address) -> AccountRecord;

    fn query_earned(env: Env, address: Address) -> Result<i128, ContractError>;
}

#[contractimpl]
impl StakingPoolTrait for StakingPool {
    fn __constructor(
        env: Env,
        owner: Address,
        reward_distributor: Address,
        staked_token: Address,
        reward_token: Address,
        start_time: u64,
        external_incentivizer: Option<Address>,
    ) {
        save_config(
            &env,
            &Config {
                staked_token: staked_token.clone(),
                reward_token,
                reward_distributor,
                owner,
                external_incentivizer,
            },
        );
        save_reward_state(&env, &RewardState::new(start_time, NO_FREEZE));

        env.events()
            .publish(("initialize", "Emission staking pool"), &staked_token);
    }

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        if amount <= 0 {
            log!(&env, "StakingPool: Stake: amount must be positive, got {}", amount);
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        staking::stake(&env, &sender, amount)?;

        token::Client::new(&env, &config.staked_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );
        Custody::from_config(&config).on_stake(&env, &config.staked_token, amount);

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        withdraw_stake(&env, &get_config(&env), &sender, amount)
    }

    fn get_reward(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        pay_out_reward(&env, &get_config(&env), &sender)
    }

    fn exit(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let staked = get_account(&env, &sender).staked;
        withdraw_stake(&env, &config, &sender, staked)?;

        pay_out_reward(&env, &config, &sender)
    }

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        if sender != config.reward_distributor {
            log!(
                &env,
                "StakingPool: Set reward rate: only the reward distributor can change the rate"
            );
            return Err(ContractError::Unauthorized);
        }
        if reward_rate < 0 {
            log!(&env, "StakingPool: Set reward rate: negative rate {}", reward_rate);
            return Err(ContractError::InvalidRewardRate);
        }

        staking::set_reward_rate(&env, reward_rate)?;

        env.events().publish(("set_reward_rate", "rate"), reward_rate);

        Ok(())
    }

    fn rescue_tokens(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        if sender != config.owner {
            log!(&env, "StakingPool: Rescue tokens: caller is not the owner");
            return Err(ContractError::Unauthorized);
        }
        if amount <= 0 {
            log!(&env, "StakingPool: Rescue tokens: amount must be positive");
            return Err(ContractError::InvalidAmount);
        }

        let principal_held =
            Custody::from_config(&config).principal_held(get_reward_state(&env).total_staked);
        let surplus = staking::surplus(
            &env,
            &token,
            &config.staked_token,
            &config.reward_token,
            principal_held,
        )?;
        if amount > surplus {
            log!(
                &env,
                "StakingPool: Rescue tokens: requested {} but only {} is rescuable",
                amount,
                surplus
            );
            return Err(ContractError::RescueExceedsSurplus);
        }

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);

        env.events().publish(("rescue_tokens", "token"), &token);
        env.events().publish(("rescue_tokens", "amount"), amount);

        Ok(())
    }

    fn claim_external_rewards(
        env: Env,
        sender: Address,
        to: Address,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        if sender != config.owner {
            log!(&env, "StakingPool: Claim external rewards: caller is not the owner");
            return Err(ContractError::Unauthorized);
        }
        let Some(incentivizer) = config.external_incentivizer else {
            log!(&env, "StakingPool: Claim external rewards: no incentivizer configured");
            return Err(ContractError::NoExternalIncentivizer);
        };

        let incentivizer = IncentivizerClient::new(&env, &incentivizer);
        let external_token = token::Client::new(&env, &incentivizer.query_reward_token());
        let pool = env.current_contract_address();

        let before = external_token.balance(&pool);
        incentivizer.claim_reward(&pool);
        let received = external_token.balance(&pool) - before;

        if received > 0 {
            external_token.transfer(&pool, &to, &received);
        }

        env.events()
            .publish(("claim_external_rewards", "amount"), received);

        Ok(received)
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_reward_state(env: Env) -> RewardState {
        get_reward_state(&env)
    }

    fn query_reward_rate(env: Env) -> i128 {
        get_reward_state(&env).reward_rate
    }

    fn query_current_reward_rate(env: Env) -> i128 {
        get_reward_state(&env).current_rate(env.ledger().timestamp())
    }

    fn query_total_staked(env: Env) -> i128 {
        get_reward_state(&env).total_staked
    }

    fn query_balance(env: Env, address: Address) -> i128 {
        get_account(&env, &address).staked
    }

    fn query_account(env: Env, address: Address) -> AccountRecord {
        get_account(&env, &address)
    }

    fn query_earned(env: Env, address: Address) -> Result<i128, ContractError> {
        Ok(staking::earned(&env, &address)?)
    }
}

fn withdraw_stake(
    env: &Env,
    config: &Config,
    sender: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "StakingPool: Withdraw: amount must be positive, got {}", amount);
        return Err(ContractError::InvalidAmount);
    }

    staking::withdraw(env, sender, amount)?;

    Custody::from_config(config).on_withdraw(env, amount);
    token::Client::new(env, &config.staked_token).transfer(
        &env.current_contract_address(),
        sender,
        &amount,
    );

    env.events().publish(("withdraw", "user"), sender);
    env.events().publish(("withdraw", "amount"), amount);

    Ok(())
}

fn pay_out_reward(env: &Env, config: &Config, sender: &Address) -> Result<i128, ContractError> {
    let reward = staking::claim(env, sender)?;

    staking::pay_reward(env, &config.reward_distributor, sender, reward);

    env.events().publish(("get_reward", "user"), sender);
    env.events().publish(("get_reward", "amount"), reward);

    Ok(reward)
}
