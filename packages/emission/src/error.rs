use soroban_sdk::contracterror;

/// Failures raised by the shared reward ledger. Each contract maps these onto its own
/// error enum so callers always see the contract specific code range.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    InvalidAmount = 100,
    InsufficientStake = 101,
    FreezingTimeEntered = 102,
    InvalidRewardRate = 103,
    ArithmeticOverflow = 104,
    RewardStateNotSet = 105,
}
