use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 900,
    Unauthorized = 901,
    RecipientNotAdded = 902,
    RecipientAlreadyAdded = 903,
    MismatchedInputLength = 904,
    InvalidRewardRate = 905,
    SameAdmin = 906,
    NoAdminChangeInPlace = 907,
    AdminChangeExpired = 908,
    InvalidAmount = 909,
}
