use emission::LedgerError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 700,
    InvalidAmount = 701,
    InsufficientStake = 702,
    FreezingTimeEntered = 703,
    Unauthorized = 704,
    InvalidRewardRate = 705,
    RescueExceedsSurplus = 706,
    NoExternalIncentivizer = 707,
    ArithmeticOverflow = 708,
    RewardStateNotSet = 709,
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
