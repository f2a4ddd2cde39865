use soroban_sdk::{contracttype, Address};

/// Pending two-step ownership hand-over. The proposed address has to accept before
/// `time_limit` (ledger timestamp) when one is set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    pub time_limit: Option<u64>,
}
