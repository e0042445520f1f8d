//! Per-attribute importance multipliers.

use std::collections::{BTreeMap, BTreeSet};

use super::schema::Schema;

const DEFAULT: f64 = 1.0;
const FAMILY: f64 = 2.2;
const SUBTYPE: f64 = 1.9;
const OBJECT_FUNCTION: f64 = 1.7;
const ANIMAL_ONLY_FLOOR: f64 = 1.6;
const SCALE: f64 = 1.3;
const STRUCTURAL: f64 = 2.8;

/// Static weighting of each attribute's loss contribution.
#[derive(Debug, Clone, Default)]
pub struct ImportanceTable {
    weights: BTreeMap<String, f64>,
}

impl ImportanceTable {
    /// Layer group weights over the 1.0 default. Structural keys are
    /// assigned last so they always end at 2.8.
    pub fn build(schema: &Schema) -> Self {
        let mut weights: BTreeMap<String, f64> =
            schema.keys().map(|k| (k.to_string(), DEFAULT)).collect();

        assign(&mut weights, schema.families(), FAMILY);
        assign(&mut weights, schema.object_subtypes(), SUBTYPE);
        assign(&mut weights, schema.place_subtypes(), SUBTYPE);
        assign(&mut weights, schema.concept_subtypes(), SUBTYPE);
        assign(&mut weights, schema.object_functions(), OBJECT_FUNCTION);

        for k in schema.animal_only() {
            let w = weights.entry(k.clone()).or_insert(DEFAULT);
            *w = w.max(ANIMAL_ONLY_FLOOR);
        }

        assign(&mut weights, schema.scales(), SCALE);
        assign(&mut weights, schema.structural(), STRUCTURAL);

        Self { weights }
    }

    /// Importance of `key`, 1.0 for keys outside the table.
    pub fn get(&self, key: &str) -> f64 {
        self.weights.get(key).copied().unwrap_or(DEFAULT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn assign(weights: &mut BTreeMap<String, f64>, set: &BTreeSet<String>, w: f64) {
    for k in set {
        weights.insert(k.clone(), w);
    }
}
