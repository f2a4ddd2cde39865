use soroban_sdk::{contractclient, Address, Env};

/// Lending market that issues a yield bearing receipt token for deposits of an
/// underlying asset. Exchange rates are underlying per receipt, scaled by 1e18.
#[allow(dead_code)]
#[contractclient(name = "YieldSourceClient")]
pub trait YieldSource {
    /// Pulls `underlying_amount` from `minter` and returns the receipts minted to it.
    fn mint(env: Env, minter: Address, underlying_amount: i128) -> i128;

    /// Burns `receipt_amount` of `from` and returns the underlying sent to it.
    fn redeem(env: Env, from: Address, receipt_amount: i128) -> i128;

    /// Sends exactly `underlying_amount` to `from` and returns the receipts burned.
    fn redeem_underlying(env: Env, from: Address, underlying_amount: i128) -> i128;

    /// Accrues interest first, so it mutates the yield source.
    fn exchange_rate_current(env: Env) -> i128;

    fn exchange_rate_stored(env: Env) -> i128;

    fn balance(env: Env, id: Address) -> i128;

    fn transfer(env: Env, from: Address, to: Address, amount: i128);

    fn underlying(env: Env) -> Address;
}
