//! Expected information gain of asking one attribute over a focus pool.

use crate::answer::AnswerState;
use crate::catalog::{AttributeGroup, Entity, keys};

use super::Scorer;

/// Probability clamp for entropy computations.
const P_CLAMP: f64 = 1e-9;
/// Mean probabilities outside `[NEAR_UNANIMOUS, 1 - NEAR_UNANIMOUS]` carry no gain.
const NEAR_UNANIMOUS: f64 = 0.05;
/// Multiplier applied once per correlated attribute already answered.
const CORRELATION_DAMPING: f64 = 0.2;

/// Binary entropy in bits, with `p` clamped away from 0 and 1.
pub fn entropy(p: f64) -> f64 {
    let p = p.clamp(P_CLAMP, 1.0 - P_CLAMP);
    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
}

/// Entropy of a weight vector normalized to a distribution.
fn weighted_entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 1e-9 {
        return 0.0;
    }
    weights
        .iter()
        .filter(|w| **w > 1e-12)
        .map(|w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

impl Scorer<'_> {
    /// Estimated gain of asking `key` given the focus pool.
    ///
    /// Zero when the pool has fewer than two entities, no entity has a value,
    /// or the known values nearly all point the same way. Coverage of known
    /// values and the spread of yes/no weight both scale the result.
    pub fn information_gain(&self, focus: &[&Entity], key: &str, answers: &AnswerState) -> f64 {
        if focus.len() < 2 {
            return 0.0;
        }

        let ps: Vec<f64> = focus
            .iter()
            .filter_map(|e| e.value(key))
            .map(|v| self.p_yes(key, v))
            .collect();
        let known = ps.len();
        if known == 0 {
            return 0.0;
        }

        let coverage = known as f64 / focus.len() as f64;
        let p_bar = ps.iter().sum::<f64>() / known as f64;
        if !(NEAR_UNANIMOUS..=1.0 - NEAR_UNANIMOUS).contains(&p_bar) {
            return 0.0;
        }

        let no_weights: Vec<f64> = ps.iter().map(|p| 1.0 - p).collect();
        let sum_yes: f64 = ps.iter().sum();
        let sum_no: f64 = no_weights.iter().sum();
        if sum_yes <= 1e-9 || sum_no <= 1e-9 {
            return 0.0;
        }

        let h_yes = weighted_entropy(&ps);
        let h_no = weighted_entropy(&no_weights);
        let spread_norm = ((known.max(2) as f64).log2() * 2.0).max(1e-9);

        let root = coverage.sqrt();
        let mut gain = entropy(p_bar) * root * 0.8 + root * 0.2;
        gain *= 1.0 - (p_bar - 0.5).abs() * 1.2;
        gain *= 0.7 + 0.3 * (h_yes + h_no) / spread_norm;

        match self.catalog().schema().group(key) {
            AttributeGroup::Structural => gain *= 1.3,
            AttributeGroup::Family => gain *= 1.2,
            _ => {}
        }

        for corr in keys::correlated_with(key) {
            if answers.contains(corr) {
                gain *= CORRELATION_DAMPING;
            }
        }

        gain.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use crate::catalog::{Catalog, RawCatalog};
    use serde_json::json;

    fn catalog(value: serde_json::Value) -> Catalog {
        Catalog::build(&RawCatalog::from_value(value))
    }

    #[test]
    fn entropy_bounds() {
        assert!((entropy(0.5) - 1.0).abs() < 1e-12);
        for p in [0.0, 1e-12, 0.01, 0.3, 0.7, 0.99, 1.0] {
            let h = entropy(p);
            assert!((0.0..=1.0).contains(&h), "{p} -> {h}");
        }
        assert!((entropy(0.2) - entropy(0.8)).abs() < 1e-12);
    }

    #[test]
    fn split_attribute_has_gain() {
        let cat = catalog(json!({
            "chat": {"domestique": 5, "sauvage": 5},
            "chien": {"domestique": 5, "sauvage": 5},
            "loup": {"domestique": 0, "sauvage": 5},
            "ours": {"domestique": 0, "sauvage": 5},
        }));
        let scorer = Scorer::new(&cat);
        let focus: Vec<&Entity> = cat.entities().collect();
        let none = AnswerState::new();

        let split = scorer.information_gain(&focus, "domestique", &none);
        assert!(split > 0.5, "{split}");
        // Everybody agrees on "sauvage": not discriminating.
        assert_eq!(scorer.information_gain(&focus, "sauvage", &none), 0.0);
    }

    #[test]
    fn degenerate_pools_have_no_gain() {
        let cat = catalog(json!({
            "chat": {"domestique": 5},
            "loup": {"domestique": 0},
            "ours": {"vivant": 5},
        }));
        let scorer = Scorer::new(&cat);
        let none = AnswerState::new();

        let one = vec![cat.entity("chat").unwrap()];
        assert_eq!(scorer.information_gain(&one, "domestique", &none), 0.0);

        let no_values = vec![cat.entity("ours").unwrap(), cat.entity("ours").unwrap()];
        assert_eq!(scorer.information_gain(&no_values, "domestique", &none), 0.0);
    }

    #[test]
    fn coverage_scales_gain() {
        let cat = catalog(json!({
            "a": {"domestique": 5, "aquatique": 5},
            "b": {"domestique": 0, "aquatique": 0},
            "c": {"domestique": 5},
            "d": {"domestique": 0},
        }));
        let scorer = Scorer::new(&cat);
        let focus: Vec<&Entity> = cat.entities().collect();
        let none = AnswerState::new();
        let full = scorer.information_gain(&focus, "domestique", &none);
        let half = scorer.information_gain(&focus, "aquatique", &none);
        assert!(half > 0.0);
        assert!(half < full);
    }

    #[test]
    fn structural_and_family_boosts() {
        let cat = catalog(json!({
            "a": {"animal": 5, "fam_oiseau": 5, "domestique": 5},
            "b": {"animal": 0, "fam_oiseau": 0, "domestique": 0},
        }));
        let scorer = Scorer::new(&cat);
        let focus: Vec<&Entity> = cat.entities().collect();
        let none = AnswerState::new();
        let plain = scorer.information_gain(&focus, "domestique", &none);
        let structural = scorer.information_gain(&focus, "animal", &none);
        let family = scorer.information_gain(&focus, "fam_oiseau", &none);
        assert!(structural > plain);
        assert!(family > plain);
    }

    #[test]
    fn correlated_answers_damp_gain() {
        let cat = catalog(json!({
            "pie": {"bec": 5, "plumes": 5},
            "chat": {"bec": 0, "plumes": 0},
        }));
        let scorer = Scorer::new(&cat);
        let focus: Vec<&Entity> = cat.entities().collect();
        let fresh = scorer.information_gain(&focus, "bec", &AnswerState::new());
        let answered: AnswerState = [("plumes", Answer::Yes)].into_iter().collect();
        let damped = scorer.information_gain(&focus, "bec", &answered);
        assert!((damped - fresh * 0.2).abs() < 1e-12);
    }
}
