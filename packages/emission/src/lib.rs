#![no_std]

pub mod auth;
pub mod error;
pub mod interface;
pub mod ledger;
pub mod math;
pub mod staking;
pub mod storage;
pub mod ttl;
pub mod utils;

pub use error::LedgerError;
pub use ledger::{AccountRecord, PoolStatus, RewardState, NO_FREEZE};
pub use math::PRECISION;
