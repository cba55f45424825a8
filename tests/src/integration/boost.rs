//! # Boost and Kick
//!
//! Vote-escrowed weight raises a depositor's working balance up to 2.5x;
//! once the lock decays, anyone can kick the cached boost back down.

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_close, e18, id_of, user, Deployment, RATE, START};
    use ge_01_liquidity_gauge::adapters::MAX_LOCK_TIME;
    use ge_01_liquidity_gauge::{GaugeConfig, GaugeError};
    use shared_types::{U256, WEEK};

    #[test]
    fn test_locked_depositor_is_boosted() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        d.lock(alice, e18(1_000), START + MAX_LOCK_TIME);

        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        gauge.lock().deposit(bob, e18(1_000), None, false).unwrap();

        assert_eq!(gauge.lock().working_balance(&alice), e18(2_500));
        assert_eq!(gauge.lock().working_balance(&bob), e18(1_000));
        assert_eq!(gauge.lock().working_supply(), e18(3_500));
        assert!(gauge.lock().invariants_hold());
    }

    #[test]
    fn test_boosted_depositor_mints_more() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        d.lock(alice, e18(1_000), START + MAX_LOCK_TIME);
        gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
        gauge.lock().deposit(bob, e18(1_000), None, false).unwrap();
        d.advance(WEEK);

        let to_alice = d.minter.mint(alice, id_of(&gauge), None).unwrap();
        let to_bob = d.minter.mint(bob, id_of(&gauge), None).unwrap();
        let emitted = U256::from(RATE) * U256::from(WEEK);

        assert_close(to_alice, emitted * U256::from(5u64) / U256::from(7u64), 1);
        assert_close(to_bob, emitted * U256::from(2u64) / U256::from(7u64), 1);
        assert!(to_alice + to_bob <= emitted);
    }

    #[test]
    fn test_kick_after_lock_expiry() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        d.lock(alice, e18(1_000), START + 2 * WEEK);
        gauge.lock().deposit(alice, e18(100), None, false).unwrap();
        gauge.lock().deposit(bob, e18(100), None, false).unwrap();
        assert_eq!(gauge.lock().working_balance(&alice), e18(250));

        let err = gauge.lock().kick(bob, alice).unwrap_err();
        assert_eq!(err, GaugeError::KickNotAllowed { user: alice });

        d.advance(3 * WEEK);
        gauge.lock().kick(bob, alice).unwrap();
        assert_eq!(gauge.lock().working_balance(&alice), e18(100));
        assert_eq!(gauge.lock().working_supply(), e18(200));

        let err = gauge.lock().kick(bob, alice).unwrap_err();
        assert_eq!(err, GaugeError::KickNotNeeded { user: alice });
    }

    #[test]
    fn test_kick_settles_boosted_accrual_first() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let gauge = d.gauge(0x6a, &lp, &[alice, bob]);
        d.lock(alice, e18(1_000), START + WEEK);
        gauge.lock().deposit(alice, e18(100), None, false).unwrap();
        gauge.lock().deposit(bob, e18(100), None, false).unwrap();

        d.advance(WEEK);
        gauge.lock().kick(bob, alice).unwrap();
        let before_kick = gauge.lock().integrate_fraction(&alice);

        // 250 of 350 working units for the first week.
        let emitted = U256::from(RATE) * U256::from(WEEK);
        assert_close(before_kick, emitted * U256::from(5u64) / U256::from(7u64), 1);
    }

    #[test]
    fn test_kick_grace_period() {
        let mut d = Deployment::new();
        let (alice, bob) = (user(1), user(2));
        let lp = d.lp_token(0x1b, &[alice, bob], e18(1_000));
        let mut config = GaugeConfig::for_lp_symbol("LP");
        config.boost.kick_grace_period = Some(WEEK);
        let gauge = d.gauge_with(0x6a, &lp, &[alice, bob], config);

        gauge.lock().deposit(bob, e18(100), None, false).unwrap();
        d.lock(alice, e18(1_000), START + MAX_LOCK_TIME);
        gauge.lock().deposit(alice, e18(100), None, false).unwrap();
        assert_eq!(gauge.lock().working_balance(&alice), e18(250));

        // A second locker dilutes alice's share of vote weight.
        d.lock(bob, e18(3_000), START + MAX_LOCK_TIME);
        assert_eq!(
            gauge.lock().kick(bob, alice).unwrap_err(),
            GaugeError::KickNotAllowed { user: alice }
        );

        d.advance(WEEK);
        gauge.lock().kick(bob, alice).unwrap();
        assert!(gauge.lock().working_balance(&alice) < e18(250));
        assert!(gauge.lock().working_balance(&alice) >= e18(100));
    }
}
