use emission::PRECISION;
use soroban_sdk::{
    contract, contractimpl, contracttype, testutils::Address as _, testutils::Ledger, token,
    Address, Env,
};

use crate::contract::{EscrowStakingPool, EscrowStakingPoolClient};

pub const START: u64 = 100;
pub const FREEZE: u64 = 10_000;
pub const ONE_TO_ONE: i128 = PRECISION;

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Underlying,
    CurrentRate,
    StoredRate,
    BurnSurcharge,
    Balance(Address),
}

/// Lending market issuing receipts at an exchange rate the test controls.
/// `set_exchange_rate` changes the rate interest accrual would produce, it only
/// becomes the stored rate after the next accruing call.
#[contract]
pub struct MockYieldSource;

#[contractimpl]
impl MockYieldSource {
    pub fn __constructor(env: Env, underlying: Address, exchange_rate: i128) {
        env.storage().instance().set(&MockKey::Underlying, &underlying);
        env.storage()
            .instance()
            .set(&MockKey::CurrentRate, &exchange_rate);
        env.storage()
            .instance()
            .set(&MockKey::StoredRate, &exchange_rate);
    }

    pub fn set_exchange_rate(env: Env, exchange_rate: i128) {
        env.storage()
            .instance()
            .set(&MockKey::CurrentRate, &exchange_rate);
    }

    /// Extra receipts `redeem_underlying` burns on top of the rounded-up amount.
    pub fn set_burn_surcharge(env: Env, surcharge: i128) {
        env.storage()
            .instance()
            .set(&MockKey::BurnSurcharge, &surcharge);
    }

    pub fn exchange_rate_current(env: Env) -> i128 {
        let rate: i128 = env
            .storage()
            .instance()
            .get(&MockKey::CurrentRate)
            .unwrap();
        env.storage().instance().set(&MockKey::StoredRate, &rate);
        rate
    }

    pub fn exchange_rate_stored(env: Env) -> i128 {
        env.storage().instance().get(&MockKey::StoredRate).unwrap()
    }

    pub fn underlying(env: Env) -> Address {
        env.storage().instance().get(&MockKey::Underlying).unwrap()
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        Self::burn(&env, &from, amount);
        Self::credit(&env, &to, amount);
    }

    pub fn mint(env: Env, minter: Address, underlying_amount: i128) -> i128 {
        minter.require_auth();
        let rate = Self::exchange_rate_current(env.clone());
        token::Client::new(&env, &Self::underlying(env.clone())).transfer(
            &minter,
            &env.current_contract_address(),
            &underlying_amount,
        );
        let receipts = underlying_amount * PRECISION / rate;
        Self::credit(&env, &minter, receipts);
        receipts
    }

    pub fn redeem(env: Env, from: Address, receipt_amount: i128) -> i128 {
        from.require_auth();
        let rate = Self::exchange_rate_current(env.clone());
        let underlying_amount = receipt_amount * rate / PRECISION;
        Self::burn(&env, &from, receipt_amount);
        token::Client::new(&env, &Self::underlying(env.clone())).transfer(
            &env.current_contract_address(),
            &from,
            &underlying_amount,
        );
        underlying_amount
    }

    pub fn redeem_underlying(env: Env, from: Address, underlying_amount: i128) -> i128 {
        from.require_auth();
        let rate = Self::exchange_rate_current(env.clone());
        let surcharge: i128 = env
            .storage()
            .instance()
            .get(&MockKey::BurnSurcharge)
            .unwrap_or(0);
        let receipts = (underlying_amount * PRECISION + rate - 1) / rate + surcharge;
        Self::burn(&env, &from, receipts);
        token::Client::new(&env, &Self::underlying(env.clone())).transfer(
            &env.current_contract_address(),
            &from,
            &underlying_amount,
        );
        receipts
    }
}

impl MockYieldSource {
    fn credit(env: &Env, id: &Address, amount: i128) {
        let balance = Self::balance(env.clone(), id.clone());
        env.storage()
            .persistent()
            .set(&MockKey::Balance(id.clone()), &(balance + amount));
    }

    fn burn(env: &Env, id: &Address, amount: i128) {
        let balance = Self::balance(env.clone(), id.clone());
        if balance < amount {
            panic!("insufficient receipt balance");
        }
        env.storage()
            .persistent()
            .set(&MockKey::Balance(id.clone()), &(balance - amount));
    }
}

// Own module so its generated constructor symbols do not clash with MockYieldSource.
mod treasury {
    use super::*;

    #[contracttype]
    #[derive(Clone)]
    enum TreasuryKey {
        RewardToken,
    }

    /// Reward treasury paying out of its own balance to any pool that asks.
    #[contract]
    pub struct MockTreasury;

    #[contractimpl]
    impl MockTreasury {
        pub fn __constructor(env: Env, reward_token: Address) {
            env.storage()
                .instance()
                .set(&TreasuryKey::RewardToken, &reward_token);
        }

        pub fn pay_reward(env: Env, sender: Address, to: Address, amount: i128) {
            sender.require_auth();
            let reward_token: Address = env
                .storage()
                .instance()
                .get(&TreasuryKey::RewardToken)
                .unwrap();
            token::Client::new(&env, &reward_token).transfer(
                &env.current_contract_address(),
                &to,
                &amount,
            );
        }
    }
}

pub use treasury::MockTreasury;

pub fn deploy_token_contract<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    token::Client::new(
        env,
        &env.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
}

pub fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp = timestamp;
    });
}

pub struct EscrowSetup<'a> {
    pub pool: EscrowStakingPoolClient<'a>,
    pub yield_source: MockYieldSourceClient<'a>,
    pub underlying: token::Client<'a>,
    pub reward_token: token::Client<'a>,
    pub owner: Address,
    pub distributor: Address,
    pub escrow_account: Address,
}

/// Escrow pool over a mock yield source, rewards funded from the distributor
/// treasury, clock set to `START`.
pub fn setup<'a>(env: &Env, exchange_rate: i128) -> EscrowSetup<'a> {
    env.mock_all_auths_allowing_non_root_auth();

    let admin = Address::generate(env);
    let owner = Address::generate(env);
    let escrow_account = Address::generate(env);

    let underlying = deploy_token_contract(env, &admin);
    let reward_token = deploy_token_contract(env, &admin);
    let distributor = env.register(MockTreasury, (&reward_token.address,));
    let yield_source = MockYieldSourceClient::new(
        env,
        &env.register(MockYieldSource, (&underlying.address, exchange_rate)),
    );

    let pool = EscrowStakingPoolClient::new(
        env,
        &env.register(
            EscrowStakingPool,
            (
                &owner,
                &distributor,
                &yield_source.address,
                &reward_token.address,
                &escrow_account,
                START,
                FREEZE,
            ),
        ),
    );

    mint(env, &reward_token, &distributor, 1_000_000_000);
    set_time(env, START);

    EscrowSetup {
        pool,
        yield_source,
        underlying,
        reward_token,
        owner,
        distributor,
        escrow_account,
    }
}
