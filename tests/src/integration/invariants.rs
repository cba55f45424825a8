//! # Randomized Invariants
//!
//! Random sequences of deposits, withdrawals, transfers, locks, mints and
//! clock advances. After every step:
//!
//! - `working_supply == Σ working_balance` and `total_supply == Σ balance`
//! - `balance <= working_balance <= 2.5 * balance`
//! - `minted(user) <= integrate_fraction(user)`
//! - reward token supply equals the total minted
//! - accrued rewards never exceed `rate * elapsed`

#[cfg(test)]
mod tests {
    use crate::fixtures::{e18, id_of, user, Deployment, RATE, START};
    use proptest::prelude::*;
    use shared_types::{Address, PRECISION, U256, WEEK};

    const USERS: u64 = 3;

    #[derive(Clone, Debug)]
    enum Op {
        Deposit { who: u64, amount: u64 },
        Withdraw { who: u64, percent: u64 },
        Transfer { from: u64, to: u64, amount: u64 },
        Lock { who: u64, amount: u64, weeks: u64 },
        Mint { who: u64 },
        Advance { secs: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        let who = 1..=USERS;
        prop_oneof![
            (who.clone(), 1u64..1_000).prop_map(|(who, amount)| Op::Deposit { who, amount }),
            (who.clone(), 0u64..=100).prop_map(|(who, percent)| Op::Withdraw { who, percent }),
            (who.clone(), who.clone(), 0u64..500)
                .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
            (who.clone(), 1u64..5_000, 1u64..200)
                .prop_map(|(who, amount, weeks)| Op::Lock { who, amount, weeks }),
            who.clone().prop_map(|who| Op::Mint { who }),
            (1u64..3 * WEEK).prop_map(|secs| Op::Advance { secs }),
        ]
    }

    fn users() -> Vec<Address> {
        (1..=USERS).map(user).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_accounting_invariants_hold(ops in proptest::collection::vec(op(), 1..40)) {
            let mut d = Deployment::new();
            let holders = users();
            let lp = d.lp_token(0x1b, &holders, e18(1_000_000));
            let gauge = d.gauge(0x6a, &lp, &holders);
            let id = id_of(&gauge);

            for op in ops {
                let _ = match op {
                    Op::Deposit { who, amount } => {
                        gauge.lock().deposit(user(who), e18(amount), None, false).map(|_| ())
                    }
                    Op::Withdraw { who, percent } => {
                        let balance = gauge.lock().balance_of(&user(who));
                        let amount = balance * U256::from(percent) / U256::from(100u64);
                        gauge.lock().withdraw(user(who), amount, false)
                    }
                    Op::Transfer { from, to, amount } => {
                        gauge.lock().transfer(user(from), user(to), e18(amount)).map(|_| ())
                    }
                    Op::Lock { who, amount, weeks } => {
                        d.lock(user(who), e18(amount), d.now() + weeks * WEEK);
                        Ok(())
                    }
                    Op::Mint { who } => {
                        prop_assert!(d.minter.mint(user(who), id, None).is_ok());
                        Ok(())
                    }
                    Op::Advance { secs } => {
                        d.advance(secs);
                        Ok(())
                    }
                };

                prop_assert!(gauge.lock().invariants_hold());

                let mut minted_total = U256::zero();
                let mut accrued_total = U256::zero();
                for holder in &holders {
                    let minted = d.minter.minted(holder, &id);
                    let accrued = gauge.lock().integrate_fraction(holder);
                    prop_assert!(minted <= accrued);
                    let position = gauge.lock().position(holder);
                    prop_assert!(position.working_balance >= position.balance);
                    prop_assert!(
                        position.working_balance * U256::from(2u64)
                            <= position.balance * U256::from(5u64)
                    );
                    minted_total += minted;
                    accrued_total += accrued;
                }
                prop_assert_eq!(d.reward.total_supply(), minted_total);

                let emitted = U256::from(RATE) * U256::from(d.now() - START);
                prop_assert!(accrued_total <= emitted);
            }
        }

        #[test]
        fn prop_mint_is_idempotent(
            amounts in proptest::collection::vec(1u64..1_000, 1..4),
            secs in 1u64..10 * WEEK,
        ) {
            let mut d = Deployment::new();
            let holders = users();
            let lp = d.lp_token(0x1b, &holders, e18(1_000_000));
            let gauge = d.gauge(0x6a, &lp, &holders);
            let id = id_of(&gauge);
            for (holder, amount) in holders.iter().zip(&amounts) {
                gauge.lock().deposit(*holder, e18(*amount), None, false).unwrap();
            }
            d.advance(secs);

            for holder in &holders {
                let first = d.minter.mint(*holder, id, None).unwrap();
                let again = d.minter.mint(*holder, id, None).unwrap();
                prop_assert_eq!(again, U256::zero());
                prop_assert_eq!(first, d.minter.minted(holder, &id));
            }
            let emitted = U256::from(RATE) * U256::from(secs);
            let dust = U256::from(holders.len() as u64) * PRECISION;
            prop_assert!(d.reward.total_supply() <= emitted);
            prop_assert!(d.reward.total_supply() + dust >= emitted);
        }
    }
}
