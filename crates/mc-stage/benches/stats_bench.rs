//! Stats aggregation benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use mc_stage::{FailureKind, RoundOutcome, SessionJournal, StageCatalog, StageId, StatsAggregator};

fn bench_aggregator(c: &mut Criterion) {
    let catalog = StageCatalog::mind_circus();
    let ids: Vec<StageId> = catalog.ids().cloned().collect();

    c.bench_function("stats_apply_1000", |b| {
        b.iter(|| {
            let mut agg = StatsAggregator::new(&catalog);
            for i in 0..1000u32 {
                let id = &ids[i as usize % ids.len()];
                let outcome = if i % 4 == 0 {
                    RoundOutcome::failure(FailureKind::Early)
                } else {
                    RoundOutcome::success(150 + i % 300)
                };
                agg.apply(id, outcome).ok();
            }
            black_box(agg.progress_percent())
        })
    });

    c.bench_function("journal_push_bounded", |b| {
        let mut journal = SessionJournal::new(256);
        let id = StageId::new("spark");
        let mut t = 0.0;
        b.iter(|| {
            t += 1.0;
            journal.record(id.clone(), t, RoundOutcome::success(200));
            black_box(journal.len())
        })
    });
}

criterion_group!(benches, bench_aggregator);
criterion_main!(benches);
