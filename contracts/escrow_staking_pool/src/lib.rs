#![no_std]
mod contract;
mod error;
mod storage;
mod yield_source;

pub use contract::{EscrowStakingPool, EscrowStakingPoolClient};
pub use error::ContractError;
pub use storage::Config;
pub use yield_source::{YieldSource, YieldSourceClient};
