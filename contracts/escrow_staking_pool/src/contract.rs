use emission::{
    auth::authorize_transfer,
    math::{mul_div_ceil, mul_div_floor},
    staking,
    storage::{get_account, get_reward_state, save_reward_state},
    AccountRecord, PoolStatus, RewardState, PRECISION,
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error, token, Address, Env,
};

use crate::{
    error::ContractError,
    storage::{get_config, save_config, Config},
    yield_source::YieldSourceClient,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Emission escrow staking pool for yield bearing receipt tokens"
);

#[contract]
pub struct EscrowStakingPool;

pub trait EscrowStakingPoolTrait {
    #[allow(clippy::too_many_arguments)]
    fn __constructor(
        env: Env,
        owner: Address,
        reward_distributor: Address,
        receipt_token: Address,
        reward_token: Address,
        escrow_account: Address,
        start_time: u64,
        freeze_time: u64,
    );

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn get_reward(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn exit(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn mint_and_stake(
        env: Env,
        sender: Address,
        underlying_amount: i128,
    ) -> Result<i128, ContractError>;

    fn redeem_and_withdraw(
        env: Env,
        sender: Address,
        receipt_amount: i128,
    ) -> Result<i128, ContractError>;

    fn redeem_underlying_and_withdraw(
        env: Env,
        sender: Address,
        underlying_amount: i128,
    ) -> Result<i128, ContractError>;

    fn exit_underlying(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn escrow_transfer(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn escrow_underlying_transfer(env: Env, sender: Address) -> Result<i128, ContractError>;

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128) -> Result<(), ContractError>;

    fn rescue_tokens(
        env: Env,
        sender: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Config;

    fn query_status(env: Env) -> PoolStatus;

    fn query_reward_state(env: Env) -> RewardState;

    fn query_reward_rate(env: Env) -> i128;

    fn query_current_reward_rate(env: Env) -> i128;

    fn query_total_staked(env: Env) -> i128;

    fn query_balance(env: Env, address: Address) -> i128;

    fn query_account(env: Env, address: Address) -> AccountRecord;

    fn query_earned(env: Env, address: Address) -> Result<i128, ContractError>;

    fn query_balance_of_underlying(env: Env, address: Address) -> Result<i128, ContractError>;
}

#[contractimpl]
impl EscrowStakingPoolTrait for EscrowStakingPool {
    #[allow(clippy::too_many_arguments)]
    fn __constructor(
        env: Env,
        owner: Address,
        reward_distributor: Address,
        receipt_token: Address,
        reward_token: Address,
        escrow_account: Address,
        start_time: u64,
        freeze_time: u64,
    ) {
        if freeze_time <= start_time {
            log!(
                &env,
                "EscrowStakingPool: Initialize: freeze time {} must be after start time {}",
                freeze_time,
                start_time
            );
            panic_with_error!(&env, ContractError::InvalidFreezeTime);
        }

        let underlying_token = YieldSourceClient::new(&env, &receipt_token).underlying();
        save_config(
            &env,
            &Config {
                receipt_token: receipt_token.clone(),
                underlying_token,
                reward_token,
                reward_distributor,
                owner,
                escrow_account,
            },
        );
        save_reward_state(&env, &RewardState::new(start_time, freeze_time));

        env.events()
            .publish(("initialize", "Emission escrow staking pool"), &receipt_token);
        env.events()
            .publish(("initialize", "freeze_time"), freeze_time);
    }

    fn stake(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        ensure_positive(&env, amount)?;

        staking::stake(&env, &sender, amount)?;
        token::Client::new(&env, &config.receipt_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        env.events().publish(("stake", "user"), &sender);
        env.events().publish(("stake", "amount"), amount);

        Ok(())
    }

    fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        withdraw_receipts(&env, &config, &sender, amount)
    }

    fn get_reward(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        pay_out_reward(&env, &get_config(&env), &sender)
    }

    fn exit(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        let staked = get_account(&env, &sender).staked;
        withdraw_receipts(&env, &config, &sender, staked)?;

        pay_out_reward(&env, &config, &sender)
    }

    fn mint_and_stake(
        env: Env,
        sender: Address,
        underlying_amount: i128,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        ensure_positive(&env, underlying_amount)?;

        let pool = env.current_contract_address();
        token::Client::new(&env, &config.underlying_token).transfer(
            &sender,
            &pool,
            &underlying_amount,
        );

        let yield_source = YieldSourceClient::new(&env, &config.receipt_token);
        let before = yield_source.balance(&pool);
        authorize_transfer(
            &env,
            &config.underlying_token,
            &config.receipt_token,
            underlying_amount,
        );
        yield_source.mint(&pool, &underlying_amount);
        let minted = yield_source.balance(&pool) - before;

        staking::stake(&env, &sender, minted)?;

        env.events().publish(("mint_and_stake", "user"), &sender);
        env.events()
            .publish(("mint_and_stake", "underlying"), underlying_amount);
        env.events().publish(("mint_and_stake", "receipts"), minted);

        Ok(minted)
    }

    fn redeem_and_withdraw(
        env: Env,
        sender: Address,
        receipt_amount: i128,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        ensure_positive(&env, receipt_amount)?;

        staking::withdraw(&env, &sender, receipt_amount)?;

        let pool = env.current_contract_address();
        let underlying = token::Client::new(&env, &config.underlying_token);
        let before = underlying.balance(&pool);
        YieldSourceClient::new(&env, &config.receipt_token).redeem(&pool, &receipt_amount);
        let received = underlying.balance(&pool) - before;

        if received > 0 {
            underlying.transfer(&pool, &sender, &received);
        }

        env.events().publish(("redeem_and_withdraw", "user"), &sender);
        env.events()
            .publish(("redeem_and_withdraw", "receipts"), receipt_amount);
        env.events()
            .publish(("redeem_and_withdraw", "underlying"), received);

        Ok(received)
    }

    fn redeem_underlying_and_withdraw(
        env: Env,
        sender: Address,
        underlying_amount: i128,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;
        ensure_positive(&env, underlying_amount)?;

        redeem_underlying(&env, &config, &sender, underlying_amount)
    }

    fn exit_underlying(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_open(&env)?;

        let staked = get_account(&env, &sender).staked;
        let rate = current_exchange_rate(&env, &config)?;
        let underlying_amount = mul_div_floor(&env, staked, rate, PRECISION)?;
        if underlying_amount > 0 {
            redeem_underlying(&env, &config, &sender, underlying_amount)?;
        }

        pay_out_reward(&env, &config, &sender)
    }

    fn escrow_transfer(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_owner(&env, &config, &sender)?;
        ensure_frozen(&env)?;

        let pool = env.current_contract_address();
        let receipts = token::Client::new(&env, &config.receipt_token);
        let amount = receipts.balance(&pool);
        if amount > 0 {
            receipts.transfer(&pool, &config.escrow_account, &amount);
        }

        env.events()
            .publish(("escrow_transfer", "escrow_account"), &config.escrow_account);
        env.events().publish(("escrow_transfer", "amount"), amount);

        Ok(amount)
    }

    fn escrow_underlying_transfer(env: Env, sender: Address) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        ensure_owner(&env, &config, &sender)?;
        ensure_frozen(&env)?;

        let pool = env.current_contract_address();
        let yield_source = YieldSourceClient::new(&env, &config.receipt_token);
        let receipt_amount = yield_source.balance(&pool);

        let mut received = 0;
        if receipt_amount > 0 {
            let underlying = token::Client::new(&env, &config.underlying_token);
            let before = underlying.balance(&pool);
            yield_source.redeem(&pool, &receipt_amount);
            received = underlying.balance(&pool) - before;
            if received > 0 {
                underlying.transfer(&pool, &config.escrow_account, &received);
            }
        }

        env.events().publish(
            ("escrow_underlying_transfer", "escrow_account"),
            &config.escrow_account,
        );
        env.events()
            .publish(("escrow_underlying_transfer", "amount"), received);

        Ok(received)
    }

    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        if sender != config.reward_distributor {
            log!(
                &env,
                "EscrowStakingPool: Set reward rate: only the reward distributor can change the rate"
            );
            return Err(ContractError::Unauthorized);
        }
        if reward_rate < 0 {
            log!(
                &env,
                "EscrowStakingPool: Set reward rate: negative rate {}",
                reward_rate
            );
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
        ensure_owner(&env, &config, &sender)?;
        ensure_positive(&env, amount)?;

        let surplus = staking::surplus(
            &env,
            &token,
            &config.receipt_token,
            &config.reward_token,
            get_reward_state(&env).total_staked,
        )?;
        if amount > surplus {
            log!(
                &env,
                "EscrowStakingPool: Rescue tokens: requested {} but only {} is rescuable",
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

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_status(env: Env) -> PoolStatus {
        get_reward_state(&env).status(env.ledger().timestamp())
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

    fn query_balance_of_underlying(env: Env, address: Address) -> Result<i128, ContractError> {
        let config = get_config(&env);
        let rate = YieldSourceClient::new(&env, &config.receipt_token).exchange_rate_stored();
        if rate <= 0 {
            log!(&env, "EscrowStakingPool: Balance of underlying: invalid exchange rate");
            return Err(ContractError::InvalidExchangeRate);
        }

        let staked = get_account(&env, &address).staked;
        Ok(mul_div_floor(&env, staked, rate, PRECISION)?)
    }
}

fn ensure_open(env: &Env) -> Result<(), ContractError> {
    if get_reward_state(env).is_frozen(env.ledger().timestamp()) {
        log!(env, "EscrowStakingPool: Freezing time has entered");
        return Err(ContractError::FreezingTimeEntered);
    }
    Ok(())
}

fn ensure_frozen(env: &Env) -> Result<(), ContractError> {
    if !get_reward_state(env).is_frozen(env.ledger().timestamp()) {
        log!(env, "EscrowStakingPool: Freezing time has not expired");
        return Err(ContractError::FreezingTimeNotExpired);
    }
    Ok(())
}

fn ensure_owner(env: &Env, config: &Config, sender: &Address) -> Result<(), ContractError> {
    if sender != &config.owner {
        log!(env, "EscrowStakingPool: caller is not the owner");
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn ensure_positive(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "EscrowStakingPool: amount must be positive, got {}", amount);
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

fn current_exchange_rate(env: &Env, config: &Config) -> Result<i128, ContractError> {
    let rate = YieldSourceClient::new(env, &config.receipt_token).exchange_rate_current();
    if rate <= 0 {
        log!(env, "EscrowStakingPool: invalid exchange rate {}", rate);
        return Err(ContractError::InvalidExchangeRate);
    }
    Ok(rate)
}

fn withdraw_receipts(
    env: &Env,
    config: &Config,
    sender: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    ensure_positive(env, amount)?;

    staking::withdraw(env, sender, amount)?;
    token::Client::new(env, &config.receipt_token).transfer(
        &env.current_contract_address(),
        sender,
        &amount,
    );

    env.events().publish(("withdraw", "user"), sender);
    env.events().publish(("withdraw", "amount"), amount);

    Ok(())
}

/// Burns the receipts worth `underlying_amount`, rounded up so the pool never
/// gives away more than the staker owns, and forwards the underlying.
fn redeem_underlying(
    env: &Env,
    config: &Config,
    sender: &Address,
    underlying_amount: i128,
) -> Result<i128, ContractError> {
    let rate = current_exchange_rate(env, config)?;
    let receipt_amount = mul_div_ceil(env, underlying_amount, PRECISION, rate)?;

    staking::withdraw(env, sender, receipt_amount)?;

    let pool = env.current_contract_address();
    let burned = YieldSourceClient::new(env, &config.receipt_token)
        .redeem_underlying(&pool, &underlying_amount);
    if burned > receipt_amount {
        log!(
            env,
            "EscrowStakingPool: Redeem underlying: market burned {} receipts, only {} were withdrawn",
            burned,
            receipt_amount
        );
        return Err(ContractError::InvalidExchangeRate);
    }
    token::Client::new(env, &config.underlying_token).transfer(&pool, sender, &underlying_amount);

    env.events()
        .publish(("redeem_underlying_and_withdraw", "user"), sender);
    env.events()
        .publish(("redeem_underlying_and_withdraw", "receipts"), receipt_amount);
    env.events().publish(
        ("redeem_underlying_and_withdraw", "underlying"),
        underlying_amount,
    );

    Ok(receipt_amount)
}

fn pay_out_reward(env: &Env, config: &Config, sender: &Address) -> Result<i128, ContractError> {
    let reward = staking::claim(env, sender)?;

    staking::pay_reward(env, &config.reward_distributor, sender, reward);

    env.events().publish(("get_reward", "user"), sender);
    env.events().publish(("get_reward", "amount"), reward);

    Ok(reward)
}
