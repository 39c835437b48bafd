use criterion::{Criterion, criterion_group, criterion_main};
use mjscore::{AgariCalculator, RoundContext, WinningTile, decompose, parse_tile, parse_tiles};
use std::hint::black_box;

fn bench_decompose(c: &mut Criterion) {
    // the most ambiguous shape: every triplet can also be read as sequences
    let concealed = parse_tiles("1112223334445m").unwrap();
    let winning = parse_tile("5m").unwrap();

    c.bench_function("decompose_ambiguous", |b| {
        b.iter(|| black_box(decompose(black_box(&concealed), winning, &[])));
    });
}

fn bench_agari(c: &mut Criterion) {
    let ctx = RoundContext {
        dora_indicators: parse_tiles("1m").unwrap().into_iter().collect(),
        ..Default::default()
    };
    let cases = [
        ("223344m 556677p 8s", "8s"),
        ("1112345678999m", "5m"),
        ("234m 067p 345s 555s 8p", "8p"),
    ];
    let cases: Vec<_> = cases
        .iter()
        .map(|(concealed, winning)| {
            (
                parse_tiles(concealed).unwrap(),
                WinningTile::tsumo(parse_tile(winning).unwrap()),
            )
        })
        .collect();

    c.bench_function("agari_best", |b| {
        b.iter(|| {
            for (concealed, winning) in &cases {
                let calc = AgariCalculator {
                    concealed,
                    called: &[],
                    winning: *winning,
                    ctx: &ctx,
                };
                black_box(calc.best());
            }
        });
    });
}

criterion_group!(benches, bench_decompose, bench_agari);
criterion_main!(benches);
