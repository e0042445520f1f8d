//! Benchmarks for the per-turn hot paths: ranking and question selection.

use std::collections::BTreeSet;
use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;

use guesswork::answer::{Answer, AnswerState};
use guesswork::catalog::{Catalog, Entity, RawCatalog};
use guesswork::config::GameConfig;
use guesswork::engine::Engine;
use guesswork::game::Session;
use guesswork::score::Scorer;
use guesswork::select::QuestionSelector;

fn catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/words.json");
    let raw = RawCatalog::load(&path).unwrap();
    Catalog::build(&raw)
}

fn animal_answers() -> AnswerState {
    [
        ("vivant", Answer::Yes),
        ("animal", Answer::Yes),
        ("fam_mammifere", Answer::Yes),
        ("domestique", Answer::No),
    ]
    .into_iter()
    .collect()
}

fn bench_rank(c: &mut Criterion) {
    let catalog = catalog();
    let scorer = Scorer::new(&catalog);
    let answers = animal_answers();

    c.bench_function("rank_catalog", |bench| {
        bench.iter(|| black_box(scorer.rank(&answers, catalog.entities())))
    });
}

fn bench_choose_next(c: &mut Criterion) {
    let catalog = catalog();
    let scorer = Scorer::new(&catalog);
    let selector = QuestionSelector::new(&catalog);
    let answers = animal_answers();
    let asked: BTreeSet<String> = answers.keys().map(str::to_string).collect();
    let ranked = scorer.rank(&answers, catalog.entities());
    let focus: Vec<&Entity> = ranked.iter().take(60).map(|r| r.entity).collect();

    c.bench_function("choose_next", |bench| {
        bench.iter(|| black_box(selector.choose_next(&answers, &asked, &focus, false)))
    });
}

fn bench_turn(c: &mut Criterion) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/words.json");
    let engine = Engine::from_path(&path, GameConfig::default()).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let session = Session {
        answers: animal_answers(),
        asked: animal_answers().keys().map(str::to_string).collect(),
        last_answer_unknown: false,
    };

    c.bench_function("decide", |bench| {
        bench.iter(|| black_box(engine.decide(&session, &mut rng).unwrap()))
    });
}

criterion_group!(benches, bench_rank, bench_choose_next, bench_turn);
criterion_main!(benches);
