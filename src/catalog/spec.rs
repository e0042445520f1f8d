//! Attribute weight specifications.

use std::collections::BTreeMap;

use serde::Serialize;

use super::keys;
use super::schema::Schema;

/// Value range and yes/no threshold of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeSpec {
    pub value_min: f64,
    pub value_max: f64,
    /// Value at which "yes" and "no" are equally likely.
    pub threshold: f64,
}

impl AttributeSpec {
    pub const DEFAULT_THRESHOLD: f64 = 2.5;
    pub const STRICT_THRESHOLD: f64 = 3.0;

    /// A `[0, 5]` weight with the given threshold.
    pub fn weight(threshold: f64) -> Self {
        Self {
            value_min: 0.0,
            value_max: 5.0,
            threshold,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.value_min, self.value_max)
    }
}

impl Default for AttributeSpec {
    fn default() -> Self {
        Self::weight(Self::DEFAULT_THRESHOLD)
    }
}

/// One spec per discovered key.
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    specs: BTreeMap<String, AttributeSpec>,
}

impl SpecTable {
    /// Derive specs from the schema alone.
    ///
    /// Structural, scale, prefix-grouped and typed object-function keys get the
    /// stricter 3.0 threshold; every other key keeps the 2.5 default.
    pub fn build(schema: &Schema) -> Self {
        let specs = schema
            .keys()
            .map(|key| {
                let strict = schema.is_structural(key)
                    || schema.is_scale(key)
                    || key.starts_with(keys::FAMILY_PREFIX)
                    || key.starts_with(keys::OBJECT_PREFIX)
                    || key.starts_with(keys::PLACE_PREFIX)
                    || schema.is_object_function(key)
                    || key == keys::PHENOM_METEO;
                let spec = if strict {
                    AttributeSpec::weight(AttributeSpec::STRICT_THRESHOLD)
                } else {
                    AttributeSpec::default()
                };
                (key.to_string(), spec)
            })
            .collect();
        Self { specs }
    }

    pub fn get(&self, key: &str) -> Option<&AttributeSpec> {
        self.specs.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.specs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_by_family() {
        let schema = Schema::new([
            "vivant",
            "poids",
            "fam_poisson",
            "obj_mobilier",
            "lieu_nature",
            "fait_du_son",
            "phenom_meteo",
            "couleur_typique",
            "aquatique",
        ]);
        let table = SpecTable::build(&schema);

        for strict in [
            "vivant",
            "poids",
            "fam_poisson",
            "obj_mobilier",
            "lieu_nature",
            "fait_du_son",
            "phenom_meteo",
        ] {
            assert_eq!(table.get(strict).unwrap().threshold, 3.0, "{strict}");
        }
        assert_eq!(table.get("aquatique").unwrap().threshold, 2.5);
        assert_eq!(table.get("couleur_typique").unwrap().threshold, 2.5);
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn thresholds_stay_inside_range() {
        let schema = Schema::new(["vivant", "aquatique", "fam_oiseau"]);
        let table = SpecTable::build(&schema);
        for (_, spec) in table.iter() {
            assert!(spec.threshold >= spec.value_min && spec.threshold <= spec.value_max);
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let schema = Schema::new(["vivant", "aquatique", "obj_cuisine"]);
        let a: Vec<_> = SpecTable::build(&schema).iter().map(|(k, s)| (k.to_string(), *s)).collect();
        let b: Vec<_> = SpecTable::build(&schema).iter().map(|(k, s)| (k.to_string(), *s)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn clamp_bounds_values() {
        let spec = AttributeSpec::default();
        assert_eq!(spec.clamp(7.0), 5.0);
        assert_eq!(spec.clamp(-1.0), 0.0);
        assert_eq!(spec.clamp(3.3), 3.3);
    }
}
