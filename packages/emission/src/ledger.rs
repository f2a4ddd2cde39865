use soroban_sdk::{contracttype, Env};

use crate::{
    error::LedgerError,
    math::{mul_div_floor, PRECISION},
};

/// Freeze time used by pools that never stop accruing.
pub const NO_FREEZE: u64 = u64::MAX;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolStatus {
    Open = 0,
    Frozen = 1,
}

/// Pool wide accrual state.
///
/// `reward_per_share` is scaled by [`PRECISION`] and never decreases.
/// `reward_distributed` is the total emitted obligation, accrued at `reward_rate`
/// over clamped elapsed time even while nothing is staked. `reward_paid` is what
/// has actually been transferred to stakers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardState {
    pub start_time: u64,
    pub freeze_time: u64,
    pub reward_rate: i128,
    pub last_update_time: u64,
    pub last_rate_update_time: u64,
    pub reward_per_share: i128,
    pub reward_distributed: i128,
    pub reward_paid: i128,
    pub total_staked: i128,
}

/// Per staker checkpoint.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountRecord {
    pub staked: i128,
    pub reward_per_share_paid: i128,
    pub accrued_reward: i128,
}

impl RewardState {
    pub fn new(start_time: u64, freeze_time: u64) -> Self {
        RewardState {
            start_time,
            freeze_time,
            reward_rate: 0,
            last_update_time: start_time,
            last_rate_update_time: 0,
            reward_per_share: 0,
            reward_distributed: 0,
            reward_paid: 0,
            total_staked: 0,
        }
    }

    /// `now` clamped into `[start_time, freeze_time]`.
    pub fn effective_time(&self, now: u64) -> u64 {
        now.max(self.start_time).min(self.freeze_time)
    }

    fn accrual_window(&self, now: u64) -> Option<(u64, u64)> {
        let effective = self.effective_time(now);
        let from = self.last_update_time.max(self.start_time);
        (effective > from).then_some((effective, effective - from))
    }

    fn emitted(&self, elapsed: u64) -> Result<i128, LedgerError> {
        (elapsed as i128)
            .checked_mul(self.reward_rate)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    fn per_share_increment(&self, env: &Env, elapsed: u64) -> Result<i128, LedgerError> {
        if self.total_staked == 0 {
            return Ok(0);
        }
        mul_div_floor(env, self.emitted(elapsed)?, PRECISION, self.total_staked)
    }

    /// Accumulator value as of `now` without persisting anything.
    pub fn reward_per_share_at(&self, env: &Env, now: u64) -> Result<i128, LedgerError> {
        match self.accrual_window(now) {
            Some((_, elapsed)) => self
                .reward_per_share
                .checked_add(self.per_share_increment(env, elapsed)?)
                .ok_or(LedgerError::ArithmeticOverflow),
            None => Ok(self.reward_per_share),
        }
    }

    /// Brings the accumulator and the emitted obligation up to `now`.
    pub fn touch(&mut self, env: &Env, now: u64) -> Result<(), LedgerError> {
        let Some((effective, elapsed)) = self.accrual_window(now) else {
            return Ok(());
        };

        self.reward_per_share = self
            .reward_per_share
            .checked_add(self.per_share_increment(env, elapsed)?)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.reward_distributed = self
            .reward_distributed
            .checked_add(self.emitted(elapsed)?)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.last_update_time = effective;

        Ok(())
    }

    fn pending(
        env: &Env,
        account: &AccountRecord,
        reward_per_share: i128,
    ) -> Result<i128, LedgerError> {
        let delta = reward_per_share - account.reward_per_share_paid;
        let fresh = mul_div_floor(env, account.staked, delta, PRECISION)?;
        account
            .accrued_reward
            .checked_add(fresh)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Moves everything the account earned since its last checkpoint into
    /// `accrued_reward`. Must follow a [`RewardState::touch`].
    pub fn settle(&self, env: &Env, account: &mut AccountRecord) -> Result<(), LedgerError> {
        account.accrued_reward = Self::pending(env, account, self.reward_per_share)?;
        account.reward_per_share_paid = self.reward_per_share;
        Ok(())
    }

    pub fn earned(&self, env: &Env, account: &AccountRecord, now: u64) -> Result<i128, LedgerError> {
        let reward_per_share = self.reward_per_share_at(env, now)?;
        Self::pending(env, account, reward_per_share)
    }

    pub fn current_rate(&self, now: u64) -> i128 {
        if now < self.freeze_time {
            self.reward_rate
        } else {
            0
        }
    }

    /// Checkpoints under the old rate, then switches to `new_rate`.
    pub fn set_rate(&mut self, env: &Env, new_rate: i128, now: u64) -> Result<(), LedgerError> {
        if new_rate < 0 {
            return Err(LedgerError::InvalidRewardRate);
        }
        self.touch(env, now)?;
        self.reward_rate = new_rate;
        self.last_rate_update_time = self.effective_time(now);
        Ok(())
    }

    pub fn status(&self, now: u64) -> PoolStatus {
        if now < self.freeze_time {
            PoolStatus::Open
        } else {
            PoolStatus::Frozen
        }
    }

    pub fn is_frozen(&self, now: u64) -> bool {
        self.status(now) == PoolStatus::Frozen
    }

    pub fn deposit(&mut self, account: &mut AccountRecord, amount: i128) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        account.staked = account
            .staked
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn withdrawal(
        &mut self,
        account: &mut AccountRecord,
        amount: i128,
    ) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if amount > account.staked {
            return Err(LedgerError::InsufficientStake);
        }
        account.staked -= amount;
        self.total_staked -= amount;
        Ok(())
    }

    /// Zeroes the settled reward of `account` and books it as paid.
    pub fn take_reward(&mut self, account: &mut AccountRecord) -> i128 {
        let reward = account.accrued_reward;
        account.accrued_reward = 0;
        self.reward_paid += reward;
        reward
    }

    /// Emitted but not yet transferred rewards.
    pub fn outstanding_rewards(&self) -> i128 {
        (self.reward_distributed - self.reward_paid).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stake(env: &Env, state: &mut RewardState, account: &mut AccountRecord, amount: i128, now: u64) {
        state.touch(env, now).unwrap();
        state.settle(env, account).unwrap();
        state.deposit(account, amount).unwrap();
    }

    fn running_state(env: &Env, start: u64, freeze: u64, rate: i128) -> RewardState {
        let mut state = RewardState::new(start, freeze);
        state.set_rate(env, rate, 0).unwrap();
        state
    }

    #[test]
    fn proportional_split_between_four_stakers() {
        let env = Env::default();
        let mut state = running_state(&env, 0, NO_FREEZE, 10_000);
        let mut accounts = [
            AccountRecord::default(),
            AccountRecord::default(),
            AccountRecord::default(),
            AccountRecord::default(),
        ];
        for (i, account) in accounts.iter_mut().enumerate() {
            stake(&env, &mut state, account, 10 * (i as i128 + 1), 0);
        }

        assert_eq!(state.earned(&env, &accounts[0], 3600).unwrap(), 3_600_000);
        assert_eq!(state.earned(&env, &accounts[1], 3600).unwrap(), 7_200_000);
        assert_eq!(state.earned(&env, &accounts[2], 3600).unwrap(), 10_800_000);
        assert_eq!(state.earned(&env, &accounts[3], 3600).unwrap(), 14_400_000);

        state.touch(&env, 3600).unwrap();
        assert_eq!(state.reward_distributed, 36_000_000);
    }

    #[test]
    fn nothing_accrues_before_start_time() {
        let env = Env::default();
        let mut state = running_state(&env, 1_000, NO_FREEZE, 100);
        let mut account = AccountRecord::default();
        stake(&env, &mut state, &mut account, 50, 10);

        assert_eq!(state.earned(&env, &account, 999).unwrap(), 0);
        state.touch(&env, 999).unwrap();
        assert_eq!(state.reward_per_share, 0);
        assert_eq!(state.reward_distributed, 0);

        assert_eq!(state.earned(&env, &account, 1_010).unwrap(), 1_000);
    }

    #[test]
    fn accrual_stops_at_freeze_time() {
        let env = Env::default();
        let mut state = running_state(&env, 0, 100, 10);
        let mut account = AccountRecord::default();
        stake(&env, &mut state, &mut account, 1, 0);

        assert_eq!(state.earned(&env, &account, 100).unwrap(), 1_000);
        assert_eq!(state.earned(&env, &account, 10_000).unwrap(), 1_000);
        assert_eq!(state.current_rate(99), 10);
        assert_eq!(state.current_rate(100), 0);
        assert_eq!(state.status(100), PoolStatus::Frozen);

        state.touch(&env, 50_000).unwrap();
        assert_eq!(state.last_update_time, 100);
        assert_eq!(state.reward_distributed, 1_000);
        // the stored rate survives freezing, it just has no effect
        assert_eq!(state.reward_rate, 10);
    }

    #[test]
    fn obligation_accrues_while_nothing_is_staked() {
        let env = Env::default();
        let mut state = running_state(&env, 0, NO_FREEZE, 7);

        state.touch(&env, 10).unwrap();
        assert_eq!(state.reward_per_share, 0);
        assert_eq!(state.reward_distributed, 70);
        assert_eq!(state.outstanding_rewards(), 70);
    }

    #[test]
    fn rate_change_checkpoints_under_old_rate() {
        let env = Env::default();
        let mut state = running_state(&env, 0, NO_FREEZE, 10);
        let mut account = AccountRecord::default();
        stake(&env, &mut state, &mut account, 5, 0);

        state.set_rate(&env, 20, 100).unwrap();
        assert_eq!(state.last_rate_update_time, 100);
        assert_eq!(state.earned(&env, &account, 100).unwrap(), 1_000);
        assert_eq!(state.earned(&env, &account, 150).unwrap(), 2_000);

        // same rate still checkpoints
        state.set_rate(&env, 20, 150).unwrap();
        assert_eq!(state.last_update_time, 150);
        assert_eq!(state.last_rate_update_time, 150);
    }

    #[test]
    fn negative_rate_is_rejected() {
        let env = Env::default();
        let mut state = RewardState::new(0, NO_FREEZE);
        assert_eq!(
            state.set_rate(&env, -1, 0),
            Err(LedgerError::InvalidRewardRate)
        );
    }

    #[test]
    fn claimed_reward_is_booked_once() {
        let env = Env::default();
        let mut state = running_state(&env, 0, NO_FREEZE, 3);
        let mut account = AccountRecord::default();
        stake(&env, &mut state, &mut account, 2, 0);

        state.touch(&env, 10).unwrap();
        state.settle(&env, &mut account).unwrap();
        assert_eq!(state.take_reward(&mut account), 30);
        assert_eq!(state.take_reward(&mut account), 0);
        assert_eq!(state.reward_paid, 30);
        assert_eq!(state.outstanding_rewards(), 0);
    }

    #[test]
    fn withdrawal_above_balance_fails() {
        let mut state = RewardState::new(0, NO_FREEZE);
        let mut account = AccountRecord::default();
        state.deposit(&mut account, 10).unwrap();

        assert_eq!(
            state.withdrawal(&mut account, 11),
            Err(LedgerError::InsufficientStake)
        );
        assert_eq!(
            state.withdrawal(&mut account, 0),
            Err(LedgerError::InvalidAmount)
        );
        state.withdrawal(&mut account, 10).unwrap();
        assert_eq!(state.total_staked, 0);
    }
}
