//! # Checkpoint Benchmarks
//!
//! | Operation | Cost driver |
//! |-----------|-------------|
//! | `user_checkpoint` | weeks since the journal head (one entry per week) |
//! | `mint` | one checkpoint plus one issuance |
//! | `deposit` | checkpoint plus boost recompute |
//! | `deposit` after long history | flat: only touched rows are staged |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ge_tests::fixtures::{e18, id_of, user, Deployment};
use rand::Rng;
use shared_types::WEEK;

fn bench_checkpoint_lag(c: &mut Criterion) {
    let mut group = c.benchmark_group("ge-01-checkpoint-lag");

    for weeks in [1u64, 10, 52, 208] {
        group.bench_with_input(BenchmarkId::new("user_checkpoint", weeks), &weeks, |b, &weeks| {
            b.iter_batched(
                || {
                    let mut d = Deployment::new();
                    let alice = user(1);
                    let lp = d.lp_token(0x1b, &[alice], e18(1_000));
                    let gauge = d.gauge(0x6a, &lp, &[alice]);
                    gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
                    d.advance(weeks * WEEK);
                    (d, gauge, alice)
                },
                |(_d, gauge, alice)| {
                    let checkpointed = gauge.lock().user_checkpoint(alice, alice).unwrap();
                    black_box(checkpointed)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_mint(c: &mut Criterion) {
    let mut group = c.benchmark_group("ge-02-mint");

    group.bench_function("mint_after_one_week", |b| {
        b.iter_batched(
            || {
                let mut d = Deployment::new();
                let alice = user(1);
                let lp = d.lp_token(0x1b, &[alice], e18(1_000));
                let gauge = d.gauge(0x6a, &lp, &[alice]);
                gauge.lock().deposit(alice, e18(1_000), None, false).unwrap();
                d.advance(WEEK);
                let id = id_of(&gauge);
                (d, gauge, id, alice)
            },
            |(mut d, _gauge, id, alice)| black_box(d.minter.mint(alice, id, None).unwrap()),
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_deposit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ge-01-deposit");

    let sizes = [1u64, 16, 128];
    for holders in sizes {
        group.bench_with_input(BenchmarkId::new("deposit_with_holders", holders), &holders, |b, &holders| {
            let users: Vec<_> = (1..=holders).map(user).collect();
            let mut rng = rand::thread_rng();
            let stakes: Vec<u64> = users.iter().map(|_| rng.gen_range(1..1_000)).collect();
            b.iter_batched(
                || {
                    let mut d = Deployment::new();
                    let lp = d.lp_token(0x1b, &users, e18(1_000));
                    let gauge = d.gauge(0x6a, &lp, &users);
                    for (holder, stake) in users.iter().zip(&stakes).skip(1) {
                        gauge.lock().deposit(*holder, e18(*stake), None, false).unwrap();
                    }
                    (d, gauge)
                },
                |(_d, gauge)| {
                    gauge.lock().deposit(users[0], e18(10), None, false).unwrap();
                    black_box(gauge)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Deposits into a gauge that has already journaled `ops` operations from
/// many holders; the per-operation cost should not grow with `ops`.
fn bench_deposit_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("ge-01-deposit-history");
    group.sample_size(20);

    for ops in [1_000u64, 20_000] {
        let mut d = Deployment::new();
        let users: Vec<_> = (1..=256).map(user).collect();
        let lp = d.lp_token(0x1b, &users, e18(1_000_000_000));
        let gauge = d.gauge(0x6a, &lp, &users);
        let mut rng = rand::thread_rng();
        for _ in 0..ops {
            let holder = users[rng.gen_range(0..users.len())];
            gauge.lock().deposit(holder, e18(1), None, false).unwrap();
            d.advance(rng.gen_range(1..3_600));
        }

        group.bench_with_input(BenchmarkId::new("deposit_after_ops", ops), &ops, |b, _| {
            b.iter(|| {
                gauge.lock().deposit(users[0], e18(1), None, false).unwrap();
                d.advance(60);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_checkpoint_lag,
    bench_mint,
    bench_deposit,
    bench_deposit_history
);
criterion_main!(benches);
