use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use yatzy_engine::core::{GameRng, PlayerId, Variant};
use yatzy_engine::dice::{DiceSource, Hand};
use yatzy_engine::rules::layout;
use yatzy_engine::scoreboard::Scoreboard;

fn gen_hands(n: usize, dice: usize) -> Vec<Hand> {
    let mut rng = GameRng::new(0x5EED);
    (0..n).map(|_| rng.roll(dice)).collect()
}

fn variants() -> [(&'static str, Variant); 3] {
    [
        ("yatzy", Variant::YATZY),
        ("yahtzee", Variant::YAHTZEE),
        ("maxi", Variant::maxi()),
    ]
}

fn bench_rule_scores(c: &mut Criterion) {
    let mut g = c.benchmark_group("rule_scores");
    for (name, variant) in variants() {
        let specs = layout(variant);
        let hands = gen_hands(4096, variant.dice_count());
        g.bench_with_input(BenchmarkId::new("layout_batch", name), &hands, |b, hands| {
            b.iter(|| {
                for hand in hands {
                    for spec in &specs {
                        black_box(spec.rule.score(black_box(hand)));
                    }
                }
            })
        });
    }
    g.finish();
}

fn bench_score_options(c: &mut Criterion) {
    let mut g = c.benchmark_group("score_options");
    let seat = PlayerId::new(0);
    for (name, variant) in variants() {
        let board = Scoreboard::new(variant, 1);
        let hands = gen_hands(4096, variant.dice_count());
        g.bench_with_input(BenchmarkId::new("empty_card_batch", name), &hands, |b, hands| {
            b.iter(|| {
                for hand in hands {
                    black_box(board.get_score_options(seat, black_box(hand)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_rule_scores, bench_score_options);
criterion_main!(benches);
