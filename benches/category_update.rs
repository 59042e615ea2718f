use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scioly_elo::{
    config::Config,
    model::{
        rating_update::{compute_category_update, FieldContext},
        structures::{tie_score::TieScore, tournament_kind::TournamentKind}
    },
    utils::test_utils::generate_participants
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let config = Config::default();
    let field = FieldContext::new(TournamentKind::Regular, &config);

    let mut group = c.benchmark_group("compute_category_update");
    for size in [10usize, 60, 200] {
        // Spread ratings so the field is not a wall of ties
        let ratings: Vec<f64> = (0..size).map(|i| 1800.0 - (i as f64) * 3.5).collect();
        let participants = generate_participants(&ratings);

        group.bench_with_input(BenchmarkId::from_parameter(size), &participants, |b, participants| {
            b.iter(|| compute_category_update(black_box(participants), &field, &config, TieScore::FullWin))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
