//! Consistency propagation over the answer state.
//!
//! A fixed, ordered battery of implication rules. Most rules only fill in
//! absent answers; the category rules may overwrite `vivant`, `animal`,
//! `objet`, `lieu` and `concept` so that strong signals win over weak ones.
//! The battery is re-run until a pass changes nothing, which makes
//! [`propagate`] idempotent. Keys outside the schema are never written.

use crate::answer::{Answer, AnswerState};
use crate::catalog::Schema;
use crate::catalog::keys::{
    ANIMAL, CONCEPT, FAM_INSECTE, FAM_OISEAU, FAM_POISSON, FAM_REPTILE, LIEU, OBJET,
    PHENOM_METEO, PLANTE, SIZE_TIERS, STRONG_ANIMAL, VIVANT,
};

/// Upper bound on passes; the rules settle in two or three.
const MAX_PASSES: usize = 8;

/// Apply the implication rules to a fixpoint.
pub fn propagate(schema: &Schema, answers: &mut AnswerState) {
    for _ in 0..MAX_PASSES {
        let before = answers.clone();
        apply_pass(schema, answers);
        if *answers == before {
            return;
        }
    }
    tracing::warn!(
        passes = MAX_PASSES,
        "answer propagation did not settle, keeping last pass"
    );
}

/// Convenience wrapper returning a propagated copy.
pub fn propagated(schema: &Schema, answers: &AnswerState) -> AnswerState {
    let mut out = answers.clone();
    propagate(schema, &mut out);
    out
}

/// Writes restricted to discovered keys.
struct Writer<'a> {
    schema: &'a Schema,
    answers: &'a mut AnswerState,
}

impl Writer<'_> {
    fn yes(&self, key: &str) -> bool {
        self.answers.is_yes(key)
    }

    fn any_yes<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> bool {
        keys.into_iter().any(|k| self.answers.is_yes(k))
    }

    fn force(&mut self, key: &str, answer: Answer) {
        if self.schema.contains(key) {
            self.answers.set(key, answer);
        }
    }

    fn default_no(&mut self, keys: &[&str]) {
        for key in keys {
            self.default(key, Answer::No);
        }
    }

    fn default(&mut self, key: &str, answer: Answer) {
        if self.schema.contains(key) {
            self.answers.set_default(key, answer);
        }
    }
}

fn apply_pass(schema: &Schema, answers: &mut AnswerState) {
    let mut w = Writer { schema, answers };

    // Top-level categories.
    if w.yes(ANIMAL) {
        w.force(VIVANT, Answer::Yes);
        w.default_no(&[PLANTE, OBJET, LIEU]);
    }
    if w.yes(PLANTE) {
        w.force(VIVANT, Answer::Yes);
        w.default_no(&[ANIMAL, OBJET, LIEU]);
    }
    if w.yes(OBJET) {
        w.force(VIVANT, Answer::No);
        w.default_no(&[ANIMAL, PLANTE]);
    }
    if w.yes(LIEU) {
        w.force(VIVANT, Answer::No);
        w.default_no(&[ANIMAL, PLANTE, OBJET]);
    }
    if w.yes(CONCEPT) {
        w.force(VIVANT, Answer::No);
        w.default_no(&[ANIMAL, PLANTE, OBJET]);
    }

    // animal = 0 stands only while a category answer above backs it.
    let category_no = w.answers.is_no(ANIMAL) && w.any_yes([PLANTE, OBJET, LIEU, CONCEPT]);
    if w.any_yes(STRONG_ANIMAL) && !category_no {
        w.force(ANIMAL, Answer::Yes);
        w.force(VIVANT, Answer::Yes);
        w.default_no(&[PLANTE, OBJET]);
    }

    let object_signal = w.any_yes(schema.object_subtypes().iter().map(String::as_str))
        || w.any_yes(schema.object_functions().iter().map(String::as_str));
    if object_signal && !w.yes(ANIMAL) {
        w.force(OBJET, Answer::Yes);
        w.force(VIVANT, Answer::No);
    }

    if w.any_yes(schema.place_subtypes().iter().map(String::as_str)) {
        w.force(LIEU, Answer::Yes);
        w.force(VIVANT, Answer::No);
    }

    if w.yes(PHENOM_METEO) {
        w.force(CONCEPT, Answer::Yes);
        w.force(VIVANT, Answer::No);
    }

    // Secondary defaults, never overwriting.
    if w.yes("bec") || w.yes("plumes") {
        w.default(FAM_OISEAU, Answer::Yes);
        w.default_no(&[FAM_INSECTE, FAM_POISSON]);
    }
    if w.yes("antennes") || w.yes("insecte") {
        w.default(FAM_INSECTE, Answer::Yes);
        w.default_no(&[FAM_OISEAU]);
    }
    if w.yes("nageoires") {
        w.default("aquatique", Answer::Yes);
        w.default(FAM_POISSON, Answer::Yes);
        w.default_no(&[FAM_OISEAU, "plumes"]);
    }
    if w.yes("reptile") {
        w.default(FAM_REPTILE, Answer::Yes);
    }

    for tier in SIZE_TIERS {
        if w.yes(tier) {
            for other in SIZE_TIERS.iter().filter(|t| **t != tier) {
                w.default(other, Answer::No);
            }
        }
    }
}
