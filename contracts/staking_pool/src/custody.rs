use emission::auth::authorize_transfer;
use soroban_sdk::{contractclient, Address, Env};

use crate::storage::Config;

#[allow(dead_code)]
#[contractclient(name = "IncentivizerClient")]
pub trait ExternalIncentivizer {
    /// Pulls `amount` of the staked token from `staker`.
    fn stake(env: Env, staker: Address, amount: i128);

    /// Sends `amount` of the staked token back to `staker`.
    fn withdraw(env: Env, staker: Address, amount: i128);

    /// Pays everything `staker` earned in the incentivizer's own reward token.
    fn claim_reward(env: Env, staker: Address) -> i128;

    fn query_reward_token(env: Env) -> Address;
}

/// Where the staked principal lives.
pub enum Custody {
    Local,
    Incentivized(Address),
}

impl Custody {
    pub fn from_config(config: &Config) -> Self {
        match &config.external_incentivizer {
            Some(incentivizer) => Custody::Incentivized(incentivizer.clone()),
            None => Custody::Local,
        }
    }

    /// Called after the principal arrived in the pool.
    pub fn on_stake(&self, env: &Env, staked_token: &Address, amount: i128) {
        if let Custody::Incentivized(incentivizer) = self {
            authorize_transfer(env, staked_token, incentivizer, amount);
            IncentivizerClient::new(env, incentivizer)
                .stake(&env.current_contract_address(), &amount);
        }
    }

    /// Called before the principal leaves the pool.
    pub fn on_withdraw(&self, env: &Env, amount: i128) {
        if let Custody::Incentivized(incentivizer) = self {
            IncentivizerClient::new(env, incentivizer)
                .withdraw(&env.current_contract_address(), &amount);
        }
    }

    /// Principal that sits in this contract's own staked token balance.
    pub fn principal_held(&self, total_staked: i128) -> i128 {
        match self {
            Custody::Local => total_staked,
            Custody::Incentivized(_) => 0,
        }
    }
}
