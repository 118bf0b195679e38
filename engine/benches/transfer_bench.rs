use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use balances_engine::{BalancesConfig, BalancesEngine};
use balances_nullables::NullStore;
use balances_types::{AccountId, Preservation};

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    for accounts in [2u8, 16, 128] {
        let store = NullStore::new();
        let engine = BalancesEngine::new(&store, &store, &store, BalancesConfig::default());
        for i in 0..accounts {
            engine
                .mint_into(&AccountId::repeat_byte(i), 1_000_000_000)
                .unwrap();
        }
        store.take_events();

        group.bench_with_input(
            BenchmarkId::new("keep_alive", accounts),
            &accounts,
            |b, &n| {
                let mut i = 0u8;
                b.iter(|| {
                    let from = AccountId::repeat_byte(i % n);
                    let to = AccountId::repeat_byte(i.wrapping_add(1) % n);
                    i = i.wrapping_add(1);
                    black_box(
                        engine
                            .transfer(&from, &to, black_box(1), Preservation::Preserve)
                            .unwrap(),
                    );
                });
                store.take_events();
            },
        );
    }

    group.finish();
}

fn bench_predictions(c: &mut Criterion) {
    let store = NullStore::new();
    let engine = BalancesEngine::new(&store, &store, &store, BalancesConfig::default());
    let who = AccountId::repeat_byte(1);
    engine.mint_into(&who, 1_000).unwrap();

    c.bench_function("can_withdraw", |b| {
        b.iter(|| black_box(engine.can_withdraw(&who, black_box(500)).unwrap()));
    });
}

criterion_group!(benches, bench_transfer, bench_predictions);
criterion_main!(benches);
