use emission::{interface::RewardRecipientClient, utils::AdminChange};
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, BytesN, Env, Vec};

use crate::{
    error::ContractError,
    storage::{
        get_config, get_recipients, is_recipient, save_config, save_recipients, Config,
        PENDING_ADMIN,
    },
    utils::deploy_staking_pool,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Emission reward distributor and staking pool factory"
);

#[contract]
pub struct RewardDistributor;

pub trait RewardDistributorTrait {
    fn __constructor(env: Env, admin: Address, reward_token: Address, pool_wasm_hash: BytesN<32>);

    fn add_recipient(
        env: Env,
        sender: Address,
        recipient: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError>;

    fn set_recipient_reward_rate(
        env: Env,
        sender: Address,
        recipient: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError>;

    fn set_recipients_reward_rates(
        env: Env,
        sender: Address,
        recipients: Vec<Address>,
        reward_rates: Vec<i128>,
    ) -> Result<Vec<Address>, ContractError>;

    fn new_staking_pool(
        env: Env,
        sender: Address,
        staked_token: Address,
        reward_rate: i128,
        start_time: u64,
    ) -> Result<Address, ContractError>;

    fn new_incentivized_staking_pool(
        env: Env,
        sender: Address,
        staked_token: Address,
        reward_rate: i128,
        start_time: u64,
        external_incentivizer: Address,
    ) -> Result<Address, ContractError>;

    fn pay_reward(env: Env, sender: Address, to: Address, amount: i128)
        -> Result<(), ContractError>;

    fn rescue_staking_pool_tokens(
        env: Env,
        sender: Address,
        pool: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Config;

    fn query_admin(env: Env) -> Address;

    fn query_all_recipients(env: Env) -> Vec<Address>;

    fn query_is_recipient(env: Env, recipient: Address) -> bool;
}

#[contractimpl]
impl RewardDistributorTrait for RewardDistributor {
    fn __constructor(env: Env, admin: Address, reward_token: Address, pool_wasm_hash: BytesN<32>) {
        save_config(
            &env,
            &Config {
                admin: admin.clone(),
                reward_token,
                pool_wasm_hash,
            },
        );
        save_recipients(&env, &Vec::new(&env));

        env.events()
            .publish(("initialize", "Emission reward distributor"), admin);
    }

    fn add_recipient(
        env: Env,
        sender: Address,
        recipient: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        check_admin(&env, &sender)?;

        if is_recipient(&env, &recipient) {
            log!(&env, "RewardDistributor: Add recipient: recipient already added");
            return Err(ContractError::RecipientAlreadyAdded);
        }

        register_recipient(&env, &recipient);
        forward_reward_rate(&env, &recipient, reward_rate)?;

        Ok(())
    }

    fn set_recipient_reward_rate(
        env: Env,
        sender: Address,
        recipient: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        check_admin(&env, &sender)?;
        ensure_recipient(&env, &recipient)?;

        forward_reward_rate(&env, &recipient, reward_rate)
    }

    fn set_recipients_reward_rates(
        env: Env,
        sender: Address,
        recipients: Vec<Address>,
        reward_rates: Vec<i128>,
    ) -> Result<Vec<Address>, ContractError> {
        check_admin(&env, &sender)?;

        if recipients.len() != reward_rates.len() {
            log!(
                &env,
                "RewardDistributor: Set reward rates: {} recipients but {} rates",
                recipients.len(),
                reward_rates.len()
            );
            return Err(ContractError::MismatchedInputLength);
        }
        for recipient in recipients.iter() {
            ensure_recipient(&env, &recipient)?;
        }

        // every pool is updated on its own, a failing one does not revert the rest
        let distributor = env.current_contract_address();
        let mut failed = Vec::new(&env);
        for (recipient, reward_rate) in recipients.iter().zip(reward_rates.iter()) {
            let updated = RewardRecipientClient::new(&env, &recipient)
                .try_set_reward_rate(&distributor, &reward_rate);
            if matches!(updated, Ok(Ok(()))) {
                env.events()
                    .publish(("set_reward_rate", "recipient"), &recipient);
                env.events()
                    .publish(("set_reward_rate", "rate"), reward_rate);
            } else {
                log!(&env, "RewardDistributor: Set reward rates: update failed");
                failed.push_back(recipient);
            }
        }

        Ok(failed)
    }

    fn new_staking_pool(
        env: Env,
        sender: Address,
        staked_token: Address,
        reward_rate: i128,
        start_time: u64,
    ) -> Result<Address, ContractError> {
        let config = check_admin(&env, &sender)?;
        ensure_valid_rate(&env, reward_rate)?;

        let pool = deploy_staking_pool(&env, &config, &staked_token, start_time, None);
        register_recipient(&env, &pool);
        forward_reward_rate(&env, &pool, reward_rate)?;

        env.events()
            .publish(("new_staking_pool", "recipient"), &pool);
        env.events()
            .publish(("new_staking_pool", "staked_token"), &staked_token);

        Ok(pool)
    }

    fn new_incentivized_staking_pool(
        env: Env,
        sender: Address,
        staked_token: Address,
        reward_rate: i128,
        start_time: u64,
        external_incentivizer: Address,
    ) -> Result<Address, ContractError> {
        let config = check_admin(&env, &sender)?;
        ensure_valid_rate(&env, reward_rate)?;

        let pool = deploy_staking_pool(
            &env,
            &config,
            &staked_token,
            start_time,
            Some(external_incentivizer.clone()),
        );
        register_recipient(&env, &pool);
        forward_reward_rate(&env, &pool, reward_rate)?;

        env.events()
            .publish(("new_staking_pool", "recipient"), &pool);
        env.events()
            .publish(("new_staking_pool", "incentivizer"), external_incentivizer);

        Ok(pool)
    }

    fn pay_reward(
        env: Env,
        sender: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        sender.require_auth();
        ensure_recipient(&env, &sender)?;

        if amount <= 0 {
            log!(
                &env,
                "RewardDistributor: Pay reward: amount must be positive, got {}",
                amount
            );
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        token::Client::new(&env, &config.reward_token).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );

        env.events().publish(("pay_reward", "recipient"), &sender);
        env.events().publish(("pay_reward", "to"), &to);
        env.events().publish(("pay_reward", "amount"), amount);

        Ok(())
    }

    fn rescue_staking_pool_tokens(
        env: Env,
        sender: Address,
        pool: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError> {
        check_admin(&env, &sender)?;

        RewardRecipientClient::new(&env, &pool).rescue_tokens(
            &env.current_contract_address(),
            &token,
            &amount,
            &to,
        );

        env.events()
            .publish(("rescue_staking_pool_tokens", "pool"), &pool);
        env.events()
            .publish(("rescue_staking_pool_tokens", "amount"), amount);

        Ok(())
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_config(&env).admin;
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "RewardDistributor: Propose admin: new admin is the current one");
            return Err(ContractError::SameAdmin);
        }

        env.storage().instance().set(
            &PENDING_ADMIN,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("RewardDistributor: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("RewardDistributor: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_config(&env).admin;
        current_admin.require_auth();

        if !env.storage().instance().has(&PENDING_ADMIN) {
            log!(&env, "RewardDistributor: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }

        env.storage().instance().remove(&PENDING_ADMIN);

        env.events()
            .publish(("RewardDistributor: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change_info: AdminChange = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or_else(|| {
                log!(&env, "RewardDistributor: No admin change request is in place");
                ContractError::NoAdminChangeInPlace
            })?;

        let pending_admin = admin_change_info.new_admin;
        pending_admin.require_auth();

        if let Some(time_limit) = admin_change_info.time_limit {
            if env.ledger().timestamp() > time_limit {
                log!(&env, "RewardDistributor: Admin change expired");
                return Err(ContractError::AdminChangeExpired);
            }
        }

        env.storage().instance().remove(&PENDING_ADMIN);

        let mut config = get_config(&env);
        config.admin = pending_admin.clone();
        save_config(&env, &config);

        env.events()
            .publish(("RewardDistributor: ", "Accepted new admin: "), &pending_admin);

        Ok(pending_admin)
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_config(&env).admin
    }

    fn query_all_recipients(env: Env) -> Vec<Address> {
        get_recipients(&env)
    }

    fn query_is_recipient(env: Env, recipient: Address) -> bool {
        is_recipient(&env, &recipient)
    }
}

fn check_admin(env: &Env, sender: &Address) -> Result<Config, ContractError> {
    sender.require_auth();

    let config = get_config(env);
    if sender != &config.admin {
        log!(env, "RewardDistributor: caller is not the admin");
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

fn ensure_recipient(env: &Env, recipient: &Address) -> Result<(), ContractError> {
    if !is_recipient(env, recipient) {
        log!(env, "RewardDistributor: recipient has not been added");
        return Err(ContractError::RecipientNotAdded);
    }
    Ok(())
}

fn ensure_valid_rate(env: &Env, reward_rate: i128) -> Result<(), ContractError> {
    if reward_rate < 0 {
        log!(env, "RewardDistributor: negative reward rate {}", reward_rate);
        return Err(ContractError::InvalidRewardRate);
    }
    Ok(())
}

fn register_recipient(env: &Env, recipient: &Address) {
    let mut recipients = get_recipients(env);
    recipients.push_back(recipient.clone());
    save_recipients(env, &recipients);

    env.events()
        .publish(("add_recipient", "recipient"), recipient);
}

fn forward_reward_rate(
    env: &Env,
    recipient: &Address,
    reward_rate: i128,
) -> Result<(), ContractError> {
    ensure_valid_rate(env, reward_rate)?;

    RewardRecipientClient::new(env, recipient)
        .set_reward_rate(&env.current_contract_address(), &reward_rate);

    env.events()
        .publish(("set_reward_rate", "recipient"), recipient);
    env.events().publish(("set_reward_rate", "rate"), reward_rate);

    Ok(())
}
