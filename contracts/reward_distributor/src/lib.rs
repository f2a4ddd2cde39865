#![no_std]
mod contract;
mod error;
mod storage;
mod utils;

pub use contract::{RewardDistributor, RewardDistributorClient};
