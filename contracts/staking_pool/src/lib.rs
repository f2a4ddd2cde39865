#![no_std]
mod contract;
mod custody;
mod error;
mod storage;

pub use contract::{StakingPool, StakingPoolClient};
pub use error::ContractError;
pub use storage::Config;
