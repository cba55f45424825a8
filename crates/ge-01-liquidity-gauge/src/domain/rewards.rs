//! # Secondary Reward Accounts
//!
//! Per-token accounting for rewards pulled from the external incentive
//! contract. Allocation is by raw `balance`, not working balance.
//!
//! ```text
//! integral[token]      += received * PRECISION / total_stake
//! claimable[token][u]  += balance[u] * (integral[token] - integral_for[token][u]) / PRECISION
//! ```
//!
//! `custody[token]` is the last observed token balance held by the gauge.
//! Anything above it is new reward; payouts lower it. Tokens that arrive while
//! nothing is staked stay above custody until the next observation with stake.

use crate::domain::errors::GaugeError;
use shared_types::{math, Address, ArithmeticError, PRECISION, U256};
use std::collections::HashMap;

/// Maximum number of secondary reward tokens per gauge.
pub const MAX_REWARD_TOKENS: usize = 8;

type TokenUser = (Address, Address);

/// Token list, integrals and custody: at most [`MAX_REWARD_TOKENS`] of each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardTotals {
    tokens: Vec<Address>,
    integral: HashMap<Address, U256>,
    custody: HashMap<Address, U256>,
}

/// One user's stored rows for each tracked token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRewardRows {
    rows: Vec<(Address, UserRewardRow)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct UserRewardRow {
    integral_for: Option<U256>,
    claimable: Option<U256>,
    claimed: Option<U256>,
}

fn put(map: &mut HashMap<TokenUser, U256>, key: TokenUser, value: Option<U256>) {
    match value {
        Some(value) => map.insert(key, value),
        None => map.remove(&key),
    };
}

#[derive(Clone, Debug, Default)]
pub struct RewardAccounts {
    tokens: Vec<Address>,
    integral: HashMap<Address, U256>,
    custody: HashMap<Address, U256>,
    integral_for: HashMap<TokenUser, U256>,
    claimable: HashMap<TokenUser, U256>,
    claimed: HashMap<TokenUser, U256>,
}

fn read<K: std::hash::Hash + Eq>(map: &HashMap<K, U256>, key: &K) -> U256 {
    map.get(key).copied().unwrap_or_default()
}

impl RewardAccounts {
    pub fn tokens(&self) -> &[Address] {
        &self.tokens
    }

    /// Replaces the tracked token list.
    ///
    /// Already tracked tokens must remain, in order, as a prefix of `tokens`.
    pub fn set_tokens(&mut self, tokens: &[Address]) -> Result<(), GaugeError> {
        if tokens.len() > MAX_REWARD_TOKENS {
            return Err(GaugeError::TooManyRewardTokens {
                count: tokens.len(),
                max: MAX_REWARD_TOKENS,
            });
        }
        if !tokens.starts_with(&self.tokens) {
            return Err(GaugeError::InvalidRewardConfig(
                "tracked reward tokens cannot be removed or reordered".into(),
            ));
        }
        for (index, token) in tokens.iter().enumerate() {
            if tokens[..index].contains(token) {
                return Err(GaugeError::InvalidRewardConfig(format!(
                    "duplicate reward token {token:?}"
                )));
            }
        }
        self.tokens = tokens.to_vec();
        Ok(())
    }

    pub fn integral(&self, token: &Address) -> U256 {
        read(&self.integral, token)
    }

    pub fn custody(&self, token: &Address) -> U256 {
        read(&self.custody, token)
    }

    pub fn claimable(&self, token: &Address, user: &Address) -> U256 {
        read(&self.claimable, &(*token, *user))
    }

    pub fn claimed(&self, token: &Address, user: &Address) -> U256 {
        read(&self.claimed, &(*token, *user))
    }

    /// Records that the gauge now holds `held` of `token`. Returns the amount
    /// distributed into the integral.
    pub fn observe(&mut self, token: Address, held: U256, total_stake: U256) -> Result<U256, ArithmeticError> {
        let custody = self.custody(&token);
        if held < custody {
            self.custody.insert(token, held);
            return Ok(U256::zero());
        }
        if held == custody || total_stake.is_zero() {
            return Ok(U256::zero());
        }
        let received = held - custody;
        let step = math::mul_div(received, PRECISION, total_stake, "reward_integral")?;
        let integral = math::add(self.integral(&token), step, "reward_integral")?;
        self.integral.insert(token, integral);
        self.custody.insert(token, held);
        Ok(received)
    }

    /// Accrual `user` would get for `token` at `balance`, not yet credited.
    pub fn pending(&self, token: &Address, user: &Address, balance: U256) -> Result<U256, ArithmeticError> {
        let key = (*token, *user);
        let delta = math::sub(self.integral(token), read(&self.integral_for, &key), "reward delta")?;
        math::mul_div(balance, delta, PRECISION, "claimable_reward")
    }

    /// Credits accrual since the user's last settlement for every token.
    pub fn accrue(&mut self, user: Address, balance: U256) -> Result<(), ArithmeticError> {
        for index in 0..self.tokens.len() {
            let token = self.tokens[index];
            let credit = self.pending(&token, &user, balance)?;
            let key = (token, user);
            if !credit.is_zero() {
                let claimable = math::add(read(&self.claimable, &key), credit, "claimable_reward")?;
                self.claimable.insert(key, claimable);
            }
            self.integral_for.insert(key, self.integral(&token));
        }
        Ok(())
    }

    /// Undoes a [`take_claimable`](Self::take_claimable) of `amount` whose
    /// transfer never happened.
    pub fn refund(&mut self, token: Address, user: Address, amount: U256) -> Result<(), ArithmeticError> {
        let key = (token, user);
        let claimed = math::sub(read(&self.claimed, &key), amount, "claimed_reward")?;
        let claimable = math::add(read(&self.claimable, &key), amount, "claimable_reward")?;
        let custody = math::add(self.custody(&token), amount, "reward custody")?;
        self.claimed.insert(key, claimed);
        self.claimable.insert(key, claimable);
        self.custody.insert(token, custody);
        Ok(())
    }

    pub fn totals(&self) -> RewardTotals {
        RewardTotals {
            tokens: self.tokens.clone(),
            integral: self.integral.clone(),
            custody: self.custody.clone(),
        }
    }

    pub fn restore_totals(&mut self, totals: RewardTotals) {
        self.tokens = totals.tokens;
        self.integral = totals.integral;
        self.custody = totals.custody;
    }

    pub fn user_rows(&self, user: &Address) -> UserRewardRows {
        let rows = self
            .tokens
            .iter()
            .map(|token| {
                let key = (*token, *user);
                let row = UserRewardRow {
                    integral_for: self.integral_for.get(&key).copied(),
                    claimable: self.claimable.get(&key).copied(),
                    claimed: self.claimed.get(&key).copied(),
                };
                (*token, row)
            })
            .collect();
        UserRewardRows { rows }
    }

    pub fn restore_user_rows(&mut self, user: Address, saved: UserRewardRows) {
        for (token, row) in saved.rows {
            let key = (token, user);
            put(&mut self.integral_for, key, row.integral_for);
            put(&mut self.claimable, key, row.claimable);
            put(&mut self.claimed, key, row.claimed);
        }
    }

    /// Zeroes `user`'s claimable `token`, moving it to `claimed`. Returns the
    /// amount to transfer.
    pub fn take_claimable(&mut self, token: Address, user: Address) -> Result<U256, ArithmeticError> {
        let key = (token, user);
        let amount = read(&self.claimable, &key);
        if amount.is_zero() {
            return Ok(amount);
        }
        let custody = math::sub(self.custody(&token), amount, "reward custody")?;
        let claimed = math::add(read(&self.claimed, &key), amount, "claimed_reward")?;
        self.custody.insert(token, custody);
        self.claimed.insert(key, claimed);
        self.claimable.remove(&key);
        Ok(amount)
    }
}
