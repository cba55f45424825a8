//! # Secondary Reward Flows
//!
//! A gauge forwarding its principal into a streaming incentive contract:
//!
//! 1. `set_rewards` moves existing principal into the contract.
//! 2. Deposits and withdrawals forward and retract the exact amount.
//! 3. Claims distribute what the contract paid pro rata to plain balances.
//! 4. Transfers settle both parties without paying anyone.

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_close, e18, user, Deployment, StreamingRewards, REWARD_DURATION};
    use ge_01_liquidity_gauge::{GaugeEvent, IncentiveContract, RewardPayout, SharedGauge};
    use shared_types::{InMemoryToken, TokenLedger, U256};
    use std::sync::Arc;

    struct Farm {
        d: Deployment,
        gauge: SharedGauge,
        lp: Arc<InMemoryToken>,
        incentive: Arc<InMemoryToken>,
        contract: Arc<StreamingRewards>,
    }

    /// Alice has deposited 1000 LP; the gauge forwards into a streaming contract.
    fn farm() -> Farm {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();

        let incentive = Arc::new(InMemoryToken::new(user(0x2c)));
        let contract = StreamingRewards::new(0x3d, lp.clone(), vec![incentive.clone()], d.clock.clone());
        gauge.lock().set_rewards(d.admin, contract.setup()).unwrap();
        Farm {
            d,
            gauge,
            lp,
            incentive,
            contract,
        }
    }

    fn week_of_rewards() -> U256 {
        e18(REWARD_DURATION)
    }

    #[test]
    fn test_set_rewards_moves_principal() {
        let f = farm();
        let gauge_id = f.gauge.lock().gauge_id();
        assert_eq!(f.contract.staked_by(&gauge_id), e18(1_000));
        assert!(f.lp.balance_of(&gauge_id).is_zero());
        assert_eq!(f.gauge.lock().reward_contract(), Some(f.contract.contract_id()));
        assert_eq!(f.gauge.lock().reward_tokens(), vec![f.incentive.token_id()]);
    }

    #[test]
    fn test_claim_streamed_rewards() {
        let f = farm();
        let alice = user(1);
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION);

        let payouts = f.gauge.lock().claim_rewards(alice, None).unwrap();
        assert_eq!(payouts.len(), 1);
        assert_close(f.incentive.balance_of(&alice), week_of_rewards(), 1);
        assert_eq!(
            f.gauge.lock().claimed_reward(&alice, &f.incentive.token_id()),
            f.incentive.balance_of(&alice)
        );
        assert!(f.gauge.lock().claim_rewards(alice, None).unwrap().is_empty());
    }

    #[test]
    fn test_claim_without_deposit_gets_nothing() {
        let f = farm();
        let carol = user(3);
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION / 2);

        let payouts = f.gauge.lock().claim_rewards(carol, None).unwrap();
        assert!(payouts.is_empty());
        assert!(f.incentive.balance_of(&carol).is_zero());
        assert!(f
            .gauge
            .lock()
            .claimable_reward(&carol, &f.incentive.token_id())
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_transfer_mid_period_splits_rewards() {
        let f = farm();
        let (alice, bob) = (user(1), user(2));
        let token = f.incentive.token_id();
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION / 2);

        assert!(f.gauge.lock().transfer(alice, bob, e18(1_000)).unwrap());
        assert!(f.incentive.balance_of(&alice).is_zero());
        assert!(f.incentive.balance_of(&bob).is_zero());
        let half = week_of_rewards() / U256::from(2u64);
        assert_close(f.gauge.lock().claimable_reward(&alice, &token).unwrap(), half, 1);

        f.d.advance(REWARD_DURATION / 2);
        f.gauge.lock().claim_rewards(alice, None).unwrap();
        f.gauge.lock().claim_rewards(bob, None).unwrap();

        assert_close(f.incentive.balance_of(&alice), half, 1);
        assert_close(f.incentive.balance_of(&bob), half, 1);
        assert!(f.gauge.lock().invariants_hold());
    }

    #[test]
    fn test_transfer_emits_no_reward_payment() {
        let f = farm();
        let (alice, bob) = (user(1), user(2));
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION / 4);
        f.d.gauge_events.drain();

        f.gauge.lock().transfer(alice, bob, e18(10)).unwrap();
        let paid = f
            .d
            .gauge_events
            .events()
            .into_iter()
            .filter(|e| matches!(e, GaugeEvent::RewardPaid { .. }))
            .count();
        assert_eq!(paid, 0);
    }

    #[test]
    fn test_deposit_for_with_claim_pays_recipient() {
        let f = farm();
        let (alice, bob) = (user(1), user(2));
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION);

        f.gauge.lock().deposit(bob, e18(1), Some(alice), true).unwrap();
        assert_close(f.incentive.balance_of(&alice), week_of_rewards(), 1);
        assert!(f.incentive.balance_of(&bob).is_zero());
        assert_eq!(f.gauge.lock().balance_of(&alice), e18(1_001));
        assert_eq!(f.contract.staked_by(&f.gauge.lock().gauge_id()), e18(1_001));
    }

    #[test]
    fn test_withdraw_retracts_principal() {
        let f = farm();
        let alice = user(1);
        f.gauge.lock().withdraw(alice, e18(400), false).unwrap();

        assert_eq!(f.contract.staked_by(&f.gauge.lock().gauge_id()), e18(600));
        assert_eq!(f.lp.balance_of(&alice), e18(400));
        assert_eq!(f.gauge.lock().total_supply(), e18(600));
    }

    #[test]
    fn test_withdraw_with_claim() {
        let f = farm();
        let alice = user(1);
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION);

        f.gauge.lock().withdraw(alice, e18(1_000), true).unwrap();
        assert_close(f.incentive.balance_of(&alice), week_of_rewards(), 1);
        assert!(f.contract.staked_by(&f.gauge.lock().gauge_id()).is_zero());
    }

    #[test]
    fn test_reconfigure_keeps_old_accrual_claimable() {
        let f = farm();
        let alice = user(1);
        f.contract.notify_reward_amount(0, week_of_rewards());
        f.d.advance(REWARD_DURATION / 2);

        let successor = StreamingRewards::new(
            0x3e,
            f.lp.clone(),
            vec![f.incentive.clone()],
            f.d.clock.clone(),
        );
        f.gauge.lock().set_rewards(f.d.admin, successor.setup()).unwrap();
        let gauge_id = f.gauge.lock().gauge_id();
        assert!(f.contract.staked_by(&gauge_id).is_zero());
        assert_eq!(successor.staked_by(&gauge_id), e18(1_000));

        let payouts: Vec<RewardPayout> = f.gauge.lock().claim_rewards(alice, None).unwrap();
        assert_eq!(payouts.len(), 1);
        assert_close(
            f.incentive.balance_of(&alice),
            week_of_rewards() / U256::from(2u64),
            1,
        );
    }

    #[test]
    fn test_set_rewards_rejects_non_admin() {
        let f = farm();
        let setup = f.contract.setup();
        assert!(f.gauge.lock().set_rewards(user(1), setup).is_err());
    }
}
