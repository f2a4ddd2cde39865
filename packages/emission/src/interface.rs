use soroban_sdk::{contractclient, Address, Env};

/// Entry points every pool exposes towards the reward distributor.
#[allow(dead_code)]
#[contractclient(name = "RewardRecipientClient")]
pub trait RewardRecipient {
    fn set_reward_rate(env: Env, sender: Address, reward_rate: i128);

    fn query_reward_rate(env: Env) -> i128;

    fn rescue_tokens(env: Env, sender: Address, token: Address, amount: i128, to: Address);
}

/// Reward treasury the pools pay their stakers from.
#[allow(dead_code)]
#[contractclient(name = "RewardTreasuryClient")]
pub trait RewardTreasury {
    /// Sends `amount` of the reward token to `to`. `sender` is the calling pool and
    /// has to be a registered recipient.
    fn pay_reward(env: Env, sender: Address, to: Address, amount: i128);
}
