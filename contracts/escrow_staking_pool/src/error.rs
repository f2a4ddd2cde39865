use emission::LedgerError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 800,
    InvalidAmount = 801,
    InsufficientStake = 802,
    FreezingTimeEntered = 803,
    FreezingTimeNotExpired = 804,
    Unauthorized = 805,
    InvalidRewardRate = 806,
    InvalidFreezeTime = 807,
    InvalidExchangeRate = 808,
    RescueExceedsSurplus = 809,
    ArithmeticOverflow = 810,
    RewardStateNotSet = 811,
}

impl From<LedgerError> for ContractError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount => ContractError::InvalidAmount,
            LedgerError::InsufficientStake => ContractError::InsufficientStake,
            LedgerError::FreezingTimeEntered => ContractError::FreezingTimeEntered,
            LedgerError::InvalidRewardRate => ContractError::InvalidRewardRate,
            LedgerError::ArithmeticOverflow => ContractError::ArithmeticOverflow,
            LedgerError::RewardStateNotSet => ContractError::RewardStateNotSet,
        }
    }
}
