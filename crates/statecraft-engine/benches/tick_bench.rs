use criterion::{criterion_group, criterion_main, Criterion};
use statecraft_engine::{data, Engine, SimConfig};

fn bench_ticks(c: &mut Criterion) {
    c.bench_function("year_of_days", |b| {
        b.iter(|| {
            let mut engine = Engine::new(
                data::default_catalog(),
                data::default_metrics(),
                data::default_coalition(),
                SimConfig::default(),
            )
            .unwrap();
            engine
                .make_decision("climate_investment_program", &["solar_expansion"])
                .unwrap();
            for _ in 0..365 {
                let _ = engine.advance_one_day();
            }
            engine
        })
    });
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
