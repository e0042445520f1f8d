//! End-to-end integration tests for the guesswork engine.
//!
//! These tests load the bundled word catalog and play whole games against an
//! oracle that answers from a word's own attribute values, validating that
//! loading, propagation, scoring, selection and termination work together.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};

use guesswork::answer::Answer;
use guesswork::catalog::{AttributeSpec, RawCatalog};
use guesswork::config::GameConfig;
use guesswork::engine::Engine;
use guesswork::error::{CatalogError, GuessError};
use guesswork::game::{Session, StopReason, Turn, Verdict};

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/words.json")
}

fn bundled_engine() -> Engine {
    Engine::from_path(&catalog_path(), GameConfig::default()).unwrap()
}

/// Answer the way the player thinking of `word` would.
fn oracle(engine: &Engine, word: &str, key: &str) -> Value {
    let entity = engine.catalog().entity(word).unwrap();
    let threshold = engine
        .catalog()
        .specs()
        .get(key)
        .map_or(AttributeSpec::DEFAULT_THRESHOLD, |s| s.threshold);
    match entity.value(key) {
        Some(v) if v >= threshold => json!("oui"),
        Some(_) => json!("non"),
        None => json!("je ne sais pas"),
    }
}

fn play(engine: &Engine, word: &str, seed: u64) -> (Session, Verdict) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut session, mut question) = engine.start().unwrap();
    let cap = engine.config().max_questions();
    loop {
        assert!(question.number <= cap, "{word}: asked past the cap");
        let raw = oracle(engine, word, &question.id);
        let (next, turn) = engine
            .answer(session, Some(&question.id), &raw, &mut rng)
            .unwrap();
        session = next;
        match turn {
            Turn::Ask(q) => {
                assert!(!q.id.is_empty());
                question = q;
            }
            Turn::Done(verdict) => return (session, verdict),
        }
    }
}

#[test]
fn every_bundled_word_is_found() {
    let engine = bundled_engine();
    let words: Vec<String> = engine
        .catalog()
        .entities()
        .map(|e| e.name.clone())
        .collect();
    assert!(words.len() >= 20);

    for (seed, word) in words.iter().enumerate() {
        let (session, verdict) = play(&engine, word, seed as u64);
        assert!(
            verdict.candidates.contains(word),
            "{word}: got {} ({:?}) after {:?}",
            verdict.prediction,
            verdict.candidates,
            session.answers
        );
        assert!(verdict.debug.questions_asked <= engine.config().max_questions());
    }
}

#[test]
fn size_separates_the_eagle_from_small_birds() {
    let engine = bundled_engine();
    let (session, verdict) = play(&engine, "aigle", 0);
    assert_eq!(verdict.reason, StopReason::EarlyConfidence);
    assert_eq!(verdict.prediction, "aigle");
    assert!(session.answers.is_yes("taille"));
    assert_eq!(verdict.debug.questions_asked, 7);
}

#[test]
fn identical_profiles_end_in_a_tie() {
    let engine = bundled_engine();
    for seed in 0..4 {
        let (session, verdict) = play(&engine, "moineau", seed);
        assert_eq!(verdict.reason, StopReason::PerfectTie);
        assert_eq!(verdict.candidates, vec!["canard", "moineau"]);
        assert!(verdict.candidates.contains(&verdict.prediction));
        assert_eq!(session.question_count(), 5);
        assert!(verdict.message().is_some());
    }
}

#[test]
fn close_farm_animals_use_the_whole_budget() {
    let engine = bundled_engine();
    let (session, verdict) = play(&engine, "mouton", 0);
    assert_eq!(verdict.reason, StopReason::MaxQuestionsReached);
    assert_eq!(verdict.prediction, "mouton");
    assert_eq!(session.question_count(), engine.config().max_questions());
}

#[test]
fn dead_branch_never_asks_animal_traits() {
    let engine = bundled_engine();
    let schema = engine.catalog().schema();
    let mut rng = StdRng::seed_from_u64(11);

    let (mut session, first) = engine.start().unwrap();
    assert_eq!(first.id, "vivant");
    let mut id = first.id;
    let mut raw = json!("non");
    loop {
        let (next, turn) = engine.answer(session, Some(&id), &raw, &mut rng).unwrap();
        session = next;
        let Turn::Ask(q) = turn else { break };
        assert!(!schema.is_animal_only(&q.id), "{}", q.id);
        assert!(!schema.is_family(&q.id), "{}", q.id);
        id = q.id;
        raw = json!(false);
    }
    assert!(session.answers.is_no("vivant"));
}

#[test]
fn session_survives_serialization_between_turns() {
    let engine = bundled_engine();
    let mut rng = StdRng::seed_from_u64(5);
    let (session, q) = engine.start().unwrap();
    let (session, _) = engine
        .answer(session, Some(&q.id), &json!(true), &mut rng)
        .unwrap();

    let stored = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, session);
    assert_eq!(restored.answers.get("vivant"), Some(Answer::Yes));
}

#[test]
fn catalog_and_config_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let words = dir.path().join("words.json");
    std::fs::write(
        &words,
        r#"{
            " Chat ": {"vivant": "5", "animal": 5, "miaule": "4,5", "note": "n/a"},
            "pierre": {"vivant": false, "objet": 7},
            "vide": {"note": ""},
            "bizarre": 42
        }"#,
    )
    .unwrap();
    let config_path = dir.path().join("game.toml");
    std::fs::write(&config_path, "total_questions = 30\nalternates = 2\n").unwrap();

    let config = GameConfig::load(&config_path).unwrap();
    assert_eq!(config.total_questions(), 18);
    let engine = Engine::from_path(&words, config).unwrap();
    let catalog = engine.catalog();

    assert_eq!(catalog.database().len(), 2);
    let chat = catalog.entity("chat").unwrap();
    assert_eq!(chat.value("miaule"), Some(4.5));
    assert_eq!(chat.value("note"), None);
    let pierre = catalog.entity("pierre").unwrap();
    assert_eq!(pierre.value("vivant"), Some(0.0));
    assert_eq!(pierre.value("objet"), Some(5.0));
    assert!(catalog.entity("vide").is_none());
}

#[test]
fn non_object_catalog_is_empty_and_games_fail() {
    let raw = RawCatalog::from_json_str("[1, 2, 3]").unwrap();
    assert!(raw.is_empty());
    let engine = Engine::new(&raw, GameConfig::default());
    assert!(engine.start().is_err());
}

#[test]
fn invalid_json_is_a_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let words = dir.path().join("words.json");
    std::fs::write(&words, "{ not json").unwrap();
    let err = Engine::from_path(&words, GameConfig::default()).unwrap_err();
    assert!(matches!(err, GuessError::Catalog(CatalogError::Parse { .. })));
}
