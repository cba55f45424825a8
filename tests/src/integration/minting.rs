//! # Minting Flows
//!
//! Deposit into a gauge, let time pass, mint through the minter:
//!
//! 1. A sole depositor on a full-weight gauge receives `rate * elapsed`.
//! 2. Minting twice never pays the same accrual twice.
//! 3. Rate changes apply exactly from when they were set, even for gauges
//!    that checkpoint weeks later.
//! 4. Only the gauge registered under an id can mint under it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{e18, user, Deployment, RATE, START};
    use ge_02_minter::MinterError;
    use parking_lot::Mutex;
    use shared_types::{
        Address, CheckpointError, GaugeHandle, GaugeId, MintableGauge, TokenLedger, PRECISION, U256,
        WEEK,
    };
    use std::sync::Arc;

    const DAY: u64 = 86_400;

    fn rate() -> U256 {
        U256::from(RATE)
    }

    // =============================================================================
    // SINGLE GAUGE
    // =============================================================================

    #[test]
    fn test_mint_after_one_week() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(WEEK);

        let minted = d.minter.mint(alice, id, None).unwrap();
        assert_eq!(minted, rate() * U256::from(WEEK));
        assert_eq!(d.reward.balance_of(&alice), minted);
        let accrued = gauge.lock().integrate_fraction(&alice);
        assert_eq!(d.minter.minted(&alice, &id), accrued);
    }

    #[test]
    fn test_repeated_mint_pays_nothing_new() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(DAY);
        let first = d.minter.mint(alice, id, None).unwrap();
        let second = d.minter.mint(alice, id, None).unwrap();

        assert_eq!(first, rate() * U256::from(DAY));
        assert!(second.is_zero());
        assert_eq!(d.reward.total_supply(), first);
    }

    #[test]
    fn test_mint_for_another_user_pays_that_user() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(DAY);
        let minted = d.minter.mint(bob, id, Some(alice)).unwrap();

        assert_eq!(d.reward.balance_of(&alice), minted);
        assert!(d.reward.balance_of(&bob).is_zero());
    }

    #[test]
    fn test_two_depositors_split_emissions() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        gauge.lock().deposit(bob, e18(1_000), None, false).unwrap();
        d.advance(WEEK);

        let to_alice = d.minter.mint(alice, id, None).unwrap();
        let to_bob = d.minter.mint(bob, id, None).unwrap();
        let half = rate() * U256::from(WEEK) / U256::from(2u64);
        assert_eq!(to_alice, half);
        assert_eq!(to_bob, half);
    }

    #[test]
    fn test_no_deposit_mints_nothing() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        d.advance(WEEK);
        assert!(d.minter.mint(alice, id, None).unwrap().is_zero());
        assert!(d.reward.total_supply().is_zero());
    }

    #[test]
    fn test_mint_after_withdraw_counts_only_staked_time() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(3 * DAY);
        gauge.lock().withdraw(alice, e18(1_000), false).unwrap();
        d.advance(4 * DAY);

        let minted = d.minter.mint(alice, id, None).unwrap();
        assert_eq!(minted, rate() * U256::from(3 * DAY));
        assert_eq!(lp.balance_of(&alice), e18(1_000));
    }

    // =============================================================================
    // REGISTRY AND ISSUANCE START
    // =============================================================================

    #[test]
    fn test_deregistered_gauge_cannot_mint() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();
        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(DAY);

        d.minter.remove_gauge(d.admin, id).unwrap();
        let err = d.minter.mint(alice, id, None).unwrap_err();
        assert_eq!(err, MinterError::GaugeNotRegistered { gauge: id });
        assert!(d.reward.total_supply().is_zero());
    }

    /// Claims an arbitrary accrual under someone else's gauge id.
    struct Impostor {
        id: GaugeId,
        claimed: U256,
    }

    impl MintableGauge for Impostor {
        fn gauge_id(&self) -> GaugeId {
            self.id
        }

        fn user_checkpoint(&mut self, _caller: Address, _user: Address) -> Result<(), CheckpointError> {
            Ok(())
        }

        fn integrate_fraction(&self, _user: &Address) -> U256 {
            self.claimed
        }
    }

    #[test]
    fn test_registered_id_mints_only_from_registered_gauge() {
        let mut d = Deployment::new();
        let (alice, mallory) = (user(1), user(0x66));
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();
        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(DAY);

        let impostor: GaugeHandle = Arc::new(Mutex::new(Impostor {
            id,
            claimed: e18(1_000_000_000),
        }));
        assert!(d.minter.add_gauge(mallory, impostor.clone()).is_err());
        assert_eq!(
            d.minter.add_gauge(d.admin, impostor).unwrap_err(),
            MinterError::GaugeIdTaken { gauge: id }
        );

        assert!(d.minter.mint(mallory, id, None).unwrap().is_zero());
        assert!(d.reward.balance_of(&mallory).is_zero());
        let minted = d.minter.mint(alice, id, None).unwrap();
        assert_eq!(minted, rate() * U256::from(DAY));
        assert_eq!(d.reward.total_supply(), minted);
    }

    #[test]
    fn test_mint_before_emission_start() {
        let mut d = Deployment::starting_at(START - WEEK);
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(3 * DAY);
        assert!(d.minter.mint(alice, id, None).unwrap().is_zero());
        assert_eq!(gauge.lock().integrate_checkpoint_of(&alice), START - WEEK + 3 * DAY);

        d.clock.set(START + DAY);
        let minted = d.minter.mint(alice, id, None).unwrap();
        assert_eq!(minted, rate() * U256::from(DAY));
    }

    // =============================================================================
    // MULTIPLE GAUGES
    // =============================================================================

    #[test]
    fn test_mint_many_across_weighted_gauges() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp_a = d.lp_token(0x1b, &[alice], e18(1_000));
        let lp_b = d.lp_token(0x1c, &[alice], e18(1_000));
        let gauge_a = d.gauge(0x6a, &lp_a, &[alice]);
        let gauge_b = d.gauge(0x6b, &lp_b, &[alice]);
        let (id_a, id_b) = (gauge_a.lock().gauge_id(), gauge_b.lock().gauge_id());
        let half = PRECISION / U256::from(2u64);
        d.shares.set_weight(id_a, half);
        d.shares.set_weight(id_b, half);

        gauge_a.lock().deposit(alice, e18(1_000), None, false).unwrap();
        gauge_b.lock().deposit(alice, e18(500), None, false).unwrap();
        d.advance(WEEK);

        let minted = d.minter.mint_many(alice, &[id_a, id_b], None).unwrap();
        assert_eq!(minted, rate() * U256::from(WEEK));
        assert_eq!(d.minter.minted(&alice, &id_a), d.minter.minted(&alice, &id_b));
    }

    #[test]
    fn test_gauges_mint_independently() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp_a = d.lp_token(0x1b, &[alice], e18(1_000));
        let lp_b = d.lp_token(0x1c, &[bob], e18(1_000));
        let gauge_a = d.gauge(0x6a, &lp_a, &[alice]);
        let gauge_b = d.gauge(0x6b, &lp_b, &[bob]);
        let (id_a, id_b) = (gauge_a.lock().gauge_id(), gauge_b.lock().gauge_id());
        let quarter = PRECISION / U256::from(4u64);
        d.shares.set_weight(id_a, quarter);
        d.shares.set_weight(id_b, PRECISION - quarter);

        gauge_a.lock().deposit(alice, e18(1_000), None, false).unwrap();
        gauge_b.lock().deposit(bob, e18(1_000), None, false).unwrap();
        d.advance(WEEK);

        let to_alice = d.minter.mint(alice, id_a, None).unwrap();
        let to_bob = d.minter.mint(bob, id_b, None).unwrap();
        assert_eq!(to_alice * U256::from(3u64), to_bob);
        assert_eq!(to_alice + to_bob, rate() * U256::from(WEEK));
    }

    // =============================================================================
    // RATE CHANGES
    // =============================================================================

    #[test]
    fn test_rate_change_mid_week() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(3 * DAY);
        d.minter.set_rate(d.admin, rate() * U256::from(2u64)).unwrap();
        d.advance(4 * DAY);

        let minted = d.minter.mint(alice, id, None).unwrap();
        let expected = rate() * U256::from(3 * DAY) + rate() * U256::from(2u64 * 4 * DAY);
        assert_eq!(minted, expected);
    }

    #[test]
    fn test_lagging_checkpoint_sees_past_rate_change() {
        let mut d = Deployment::new();
        let alice = user(1);
        let lp = d.lp_token(0x1b, &[alice], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice]);
        let id = gauge.lock().gauge_id();

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        d.advance(5 * WEEK + DAY);
        d.minter.set_rate(d.admin, U256::zero()).unwrap();
        d.advance(5 * WEEK);

        let minted = d.minter.mint(alice, id, None).unwrap();
        assert_eq!(minted, rate() * U256::from(5 * WEEK + DAY));
        assert_eq!(gauge.lock().period(), 11);
    }
}
