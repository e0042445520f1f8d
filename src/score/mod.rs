//! Probabilistic scoring and ranking of entities against an answer state.
//!
//! Each attribute value is turned into a "yes" probability with a logistic
//! curve centred on the attribute threshold. An entity's loss is the
//! importance-weighted negative log-likelihood of the recorded answers;
//! missing values are charged a fixed penalty instead.

pub mod gain;

use crate::answer::{Answer, AnswerState};
use crate::catalog::{Catalog, Entity};

/// Floor applied to probabilities before taking the log.
pub const LOSS_EPS: f64 = 1e-6;

/// Numerically stable logistic function.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// An entity with its accumulated loss. Lower is better.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub entity: &'a Entity,
    pub score: f64,
}

impl Ranked<'_> {
    pub fn name(&self) -> &str {
        &self.entity.name
    }
}

/// Read-only scorer over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    catalog: &'a Catalog,
}

impl<'a> Scorer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Probability that an entity with `value` answers "yes" to `key`.
    pub fn p_yes(&self, key: &str, value: f64) -> f64 {
        let threshold = self
            .catalog
            .specs()
            .get(key)
            .map(|s| s.threshold)
            .unwrap_or(crate::catalog::AttributeSpec::DEFAULT_THRESHOLD);
        let slope = self.catalog.schema().group(key).slope();
        sigmoid((value - threshold) * slope)
    }

    /// Loss charged when the entity has no value for `key`, independent of
    /// the answer given.
    pub fn unknown_loss(&self, key: &str) -> f64 {
        self.catalog.schema().group(key).unknown_penalty() * self.catalog.importance().get(key)
    }

    /// Loss of one answer for one entity.
    pub fn loss(&self, entity: &Entity, key: &str, answer: Answer) -> f64 {
        let Some(value) = entity.value(key) else {
            return self.unknown_loss(key);
        };
        let p = self.p_yes(key, value);
        let p = match answer {
            Answer::Yes => p,
            Answer::No => 1.0 - p,
        };
        -p.max(LOSS_EPS).ln() * self.catalog.importance().get(key)
    }

    /// Sum of losses over every answer whose key has a spec.
    pub fn total_loss(&self, entity: &Entity, answers: &AnswerState) -> f64 {
        answers
            .iter()
            .filter(|(key, _)| self.catalog.specs().contains(key))
            .map(|(key, ans)| self.loss(entity, key, ans))
            .sum()
    }

    /// Rank candidates by ascending loss. Equal scores keep input order.
    pub fn rank<I>(&self, answers: &AnswerState, candidates: I) -> Vec<Ranked<'a>>
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let mut ranked: Vec<Ranked<'a>> = candidates
            .into_iter()
            .map(|entity| Ranked {
                entity,
                score: self.total_loss(entity, answers),
            })
            .collect();
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        ranked
    }

    /// Whether the entity's structural values agree with the answers.
    ///
    /// A missing value excludes the entity only when the answer is "yes".
    /// Values more than `margin` under the threshold fail a "yes"; values
    /// more than `margin + 0.4` over it fail a "no".
    pub fn is_structurally_compatible(
        &self,
        entity: &Entity,
        answers: &AnswerState,
        margin: f64,
    ) -> bool {
        let schema = self.catalog.schema();
        answers
            .iter()
            .filter(|(key, _)| schema.is_structural(key))
            .all(|(key, ans)| {
                let Some(threshold) = self.catalog.specs().get(key).map(|s| s.threshold) else {
                    return true;
                };
                match (entity.value(key), ans) {
                    (None, Answer::Yes) => false,
                    (None, Answer::No) => true,
                    (Some(v), Answer::Yes) => v >= threshold - margin,
                    (Some(v), Answer::No) => v <= threshold + margin + 0.4,
                }
            })
    }

    /// Entities passing the structural filter, or the whole catalog when
    /// fewer than `min_survivors` pass.
    pub fn structural_candidates(
        &self,
        answers: &AnswerState,
        margin: f64,
        min_survivors: usize,
    ) -> Vec<&'a Entity> {
        let survivors: Vec<&'a Entity> = self
            .catalog
            .entities()
            .filter(|e| self.is_structurally_compatible(e, answers, margin))
            .collect();
        if survivors.len() < min_survivors {
            tracing::debug!(
                survivors = survivors.len(),
                min_survivors,
                "structural filter too strict, using full catalog"
            );
            return self.catalog.entities().collect();
        }
        survivors
    }
}

/// Entities whose score is within `epsilon` of the best one, when there is
/// more than one of them. Otherwise empty.
pub fn detect_perfect_ties<'r, 'a>(ranked: &'r [Ranked<'a>], epsilon: f64) -> Vec<&'r Ranked<'a>> {
    let Some(top) = ranked.first() else {
        return Vec::new();
    };
    let tied: Vec<&Ranked<'a>> = ranked
        .iter()
        .filter(|r| (r.score - top.score).abs() < epsilon)
        .collect();
    if tied.len() > 1 { tied } else { Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawCatalog;
    use serde_json::json;

    fn catalog(value: serde_json::Value) -> Catalog {
        Catalog::build(&RawCatalog::from_value(value))
    }

    fn answers(pairs: &[(&str, Answer)]) -> AnswerState {
        pairs.iter().copied().collect()
    }

    #[test]
    fn p_yes_is_bounded_and_centred() {
        let cat = catalog(json!({"x": {"vivant": 5, "aquatique": 1}}));
        let scorer = Scorer::new(&cat);
        assert!((scorer.p_yes("aquatique", 2.5) - 0.5).abs() < 1e-12);
        assert!((scorer.p_yes("vivant", 3.0) - 0.5).abs() < 1e-12);
        for v in [-1e6, -50.0, 0.0, 2.5, 5.0, 50.0] {
            let p = scorer.p_yes("aquatique", v);
            assert!((0.0..=1.0).contains(&p));
        }
        for v in [0.0, 1.0, 2.5, 4.0, 5.0] {
            let p = scorer.p_yes("aquatique", v);
            assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn unknown_value_gets_fixed_penalty() {
        let cat = catalog(json!({
            "chat": {"vivant": 5},
            "truite": {"vivant": 5, "aquatique": 5},
        }));
        let scorer = Scorer::new(&cat);
        let chat = cat.entity("chat").unwrap();

        let yes = scorer.loss(chat, "aquatique", Answer::Yes);
        let no = scorer.loss(chat, "aquatique", Answer::No);
        // Descriptive key: penalty 2.2, importance 1.0.
        assert_eq!(yes, 2.2);
        assert_eq!(no, yes);
        assert!(yes > 0.0);

        let truite = cat.entity("truite").unwrap();
        assert!(scorer.loss(truite, "aquatique", Answer::Yes) < yes);
    }

    #[test]
    fn loss_is_bounded_by_eps() {
        let cat = catalog(json!({"pierre": {"vivant": 0}}));
        let scorer = Scorer::new(&cat);
        let pierre = cat.entity("pierre").unwrap();
        let loss = scorer.loss(pierre, "vivant", Answer::Yes);
        assert!(loss.is_finite());
        assert!(loss <= -(LOSS_EPS.ln()) * 2.8 + 1e-9);
    }

    #[test]
    fn cat_outranks_rock() {
        let cat = catalog(json!({
            "cat": {"alive": 5, "animal": 5, "fam_mammifere": 5, "felin": 4, "domestique": 4},
            "rock": {"alive": 0, "objet": 5},
        }));
        let scorer = Scorer::new(&cat);
        let ans = answers(&[
            ("alive", Answer::Yes),
            ("animal", Answer::Yes),
            ("fam_mammifere", Answer::Yes),
        ]);
        let ranked = scorer.rank(&ans, cat.entities());
        assert_eq!(ranked[0].name(), "cat");
        assert_eq!(ranked[1].name(), "rock");
        assert!(ranked[0].score < ranked[1].score);
    }

    #[test]
    fn ranking_is_deterministic() {
        let cat = catalog(json!({
            "a": {"vivant": 5, "aquatique": 3},
            "b": {"vivant": 4, "aquatique": 1},
            "c": {"vivant": 1},
        }));
        let scorer = Scorer::new(&cat);
        let ans = answers(&[("vivant", Answer::Yes), ("aquatique", Answer::No)]);
        let first: Vec<(String, f64)> = scorer
            .rank(&ans, cat.entities())
            .iter()
            .map(|r| (r.name().to_string(), r.score))
            .collect();
        let second: Vec<(String, f64)> = scorer
            .rank(&ans, cat.entities())
            .iter()
            .map(|r| (r.name().to_string(), r.score))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn answers_without_spec_are_ignored() {
        let cat = catalog(json!({"a": {"vivant": 5}}));
        let scorer = Scorer::new(&cat);
        let a = cat.entity("a").unwrap();
        let with_unknown = answers(&[("vivant", Answer::Yes), ("inexistant", Answer::Yes)]);
        let plain = answers(&[("vivant", Answer::Yes)]);
        assert_eq!(scorer.total_loss(a, &with_unknown), scorer.total_loss(a, &plain));
    }

    #[test]
    fn structural_filter_excludes_and_falls_back() {
        let mut words = serde_json::Map::new();
        for i in 0..6 {
            words.insert(format!("bete{i}"), json!({"vivant": 5, "animal": 5}));
        }
        words.insert("caillou".into(), json!({"vivant": 0, "objet": 5}));
        words.insert("mystere".into(), json!({"objet": 1}));
        words.insert("tiede".into(), json!({"vivant": 2.7, "animal": 3.5}));
        let cat = catalog(serde_json::Value::Object(words));
        let scorer = Scorer::new(&cat);

        let ans = answers(&[("vivant", Answer::Yes)]);
        let caillou = cat.entity("caillou").unwrap();
        let mystere = cat.entity("mystere").unwrap();
        let tiede = cat.entity("tiede").unwrap();
        assert!(!scorer.is_structurally_compatible(caillou, &ans, 0.4));
        assert!(!scorer.is_structurally_compatible(mystere, &ans, 0.4));
        assert!(scorer.is_structurally_compatible(tiede, &ans, 0.4));

        // 3.5 > 3.0 + 0.4 but not > 3.0 + 0.8: still compatible with "no".
        let not_animal = answers(&[("animal", Answer::No)]);
        assert!(scorer.is_structurally_compatible(tiede, &not_animal, 0.4));

        let pool = scorer.structural_candidates(&ans, 0.4, 5);
        assert_eq!(pool.len(), 7);

        // Only the rock is compatible, so the whole catalog comes back.
        let rocky = answers(&[("objet", Answer::Yes), ("vivant", Answer::No)]);
        let pool = scorer.structural_candidates(&rocky, 0.4, 5);
        assert_eq!(pool.len(), cat.database().len());
    }

    #[test]
    fn identical_entities_tie() {
        let cat = catalog(json!({
            "jumeau_a": {"vivant": 5, "animal": 5, "aquatique": 0, "domestique": 5, "ferme": 5},
            "jumeau_b": {"vivant": 5, "animal": 5, "aquatique": 0, "domestique": 5, "ferme": 5},
            "autre": {"vivant": 5, "animal": 5, "aquatique": 5, "domestique": 0, "ferme": 0},
        }));
        let scorer = Scorer::new(&cat);
        let ans = answers(&[
            ("vivant", Answer::Yes),
            ("animal", Answer::Yes),
            ("aquatique", Answer::No),
            ("domestique", Answer::Yes),
            ("ferme", Answer::Yes),
        ]);
        let ranked = scorer.rank(&ans, cat.entities());
        let ties: Vec<&str> = detect_perfect_ties(&ranked, 0.001)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(ties, vec!["jumeau_a", "jumeau_b"]);

        let single = scorer.rank(&ans, cat.entity("autre"));
        assert!(detect_perfect_ties(&single, 0.001).is_empty());
    }
}
