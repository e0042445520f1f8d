//! Attribute schema: discovered keys classified into named groups.

use std::collections::BTreeSet;

use serde::Serialize;

use super::keys;

/// The primary group of an attribute.
///
/// A key can sit in several membership sets (e.g. `tres_petit` is both a size
/// tier and animal-only); the primary group follows the precedence
/// structural > family > subtype > object function > animal-only > scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeGroup {
    Structural,
    Family,
    ObjectSubtype,
    PlaceSubtype,
    ConceptSubtype,
    ObjectFunction,
    AnimalOnly,
    Scale,
    Descriptive,
}

impl AttributeGroup {
    /// Logistic slope used when converting a value into a "yes" probability.
    pub fn slope(self) -> f64 {
        match self {
            Self::Structural => 3.2,
            Self::Family => 3.0,
            Self::ObjectSubtype | Self::PlaceSubtype => 2.8,
            Self::ObjectFunction => 2.6,
            _ => 2.2,
        }
    }

    /// Base loss charged when an entity has no value for the attribute.
    pub fn unknown_penalty(self) -> f64 {
        match self {
            Self::Structural => 5.0,
            Self::Family => 4.0,
            Self::ObjectSubtype | Self::PlaceSubtype | Self::ConceptSubtype => 3.5,
            Self::ObjectFunction => 3.0,
            Self::AnimalOnly => 2.8,
            _ => 2.2,
        }
    }
}

impl std::fmt::Display for AttributeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Structural => "structural",
            Self::Family => "family",
            Self::ObjectSubtype => "object-subtype",
            Self::PlaceSubtype => "place-subtype",
            Self::ConceptSubtype => "concept-subtype",
            Self::ObjectFunction => "object-function",
            Self::AnimalOnly => "animal-only",
            Self::Scale => "scale",
            Self::Descriptive => "descriptive",
        };
        f.write_str(name)
    }
}

/// Discovered attribute keys and their group memberships.
///
/// Built once from the raw catalog; every set is a subset of `keys`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    keys: BTreeSet<String>,
    structural: BTreeSet<String>,
    families: BTreeSet<String>,
    object_subtypes: BTreeSet<String>,
    place_subtypes: BTreeSet<String>,
    concept_subtypes: BTreeSet<String>,
    object_functions: BTreeSet<String>,
    animal_only: BTreeSet<String>,
    scales: BTreeSet<String>,
    size_tiers: BTreeSet<String>,
}

impl Schema {
    /// Classify a set of discovered keys.
    pub fn new<I, S>(discovered: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = discovered
            .into_iter()
            .map(Into::into)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        let named = |names: &[&str]| -> BTreeSet<String> {
            names
                .iter()
                .filter(|n| keys.contains(**n))
                .map(|n| n.to_string())
                .collect()
        };
        let prefixed = |prefix: &str| -> BTreeSet<String> {
            keys.iter().filter(|k| k.starts_with(prefix)).cloned().collect()
        };

        Self {
            structural: named(&keys::STRUCTURAL),
            families: prefixed(keys::FAMILY_PREFIX),
            object_subtypes: prefixed(keys::OBJECT_PREFIX),
            place_subtypes: prefixed(keys::PLACE_PREFIX),
            concept_subtypes: named(&keys::CONCEPT_SUBTYPES),
            object_functions: named(&keys::OBJECT_FUNCTIONS),
            animal_only: named(&keys::ANIMAL_ONLY),
            scales: named(&keys::SCALES),
            size_tiers: named(&keys::SIZE_TIERS),
            keys,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_structural(&self, key: &str) -> bool {
        self.structural.contains(key)
    }

    pub fn is_family(&self, key: &str) -> bool {
        self.families.contains(key)
    }

    pub fn is_object_subtype(&self, key: &str) -> bool {
        self.object_subtypes.contains(key)
    }

    pub fn is_place_subtype(&self, key: &str) -> bool {
        self.place_subtypes.contains(key)
    }

    pub fn is_concept_subtype(&self, key: &str) -> bool {
        self.concept_subtypes.contains(key)
    }

    pub fn is_object_function(&self, key: &str) -> bool {
        self.object_functions.contains(key)
    }

    pub fn is_animal_only(&self, key: &str) -> bool {
        self.animal_only.contains(key)
    }

    pub fn is_scale(&self, key: &str) -> bool {
        self.scales.contains(key)
    }

    pub fn is_size_tier(&self, key: &str) -> bool {
        self.size_tiers.contains(key)
    }

    pub fn structural(&self) -> &BTreeSet<String> {
        &self.structural
    }

    pub fn families(&self) -> &BTreeSet<String> {
        &self.families
    }

    pub fn object_subtypes(&self) -> &BTreeSet<String> {
        &self.object_subtypes
    }

    pub fn place_subtypes(&self) -> &BTreeSet<String> {
        &self.place_subtypes
    }

    pub fn concept_subtypes(&self) -> &BTreeSet<String> {
        &self.concept_subtypes
    }

    pub fn object_functions(&self) -> &BTreeSet<String> {
        &self.object_functions
    }

    pub fn animal_only(&self) -> &BTreeSet<String> {
        &self.animal_only
    }

    pub fn scales(&self) -> &BTreeSet<String> {
        &self.scales
    }

    pub fn size_tiers(&self) -> &BTreeSet<String> {
        &self.size_tiers
    }

    /// Primary group of a key. Unknown keys are `Descriptive`.
    pub fn group(&self, key: &str) -> AttributeGroup {
        if self.is_structural(key) {
            AttributeGroup::Structural
        } else if self.is_family(key) {
            AttributeGroup::Family
        } else if self.is_object_subtype(key) {
            AttributeGroup::ObjectSubtype
        } else if self.is_place_subtype(key) {
            AttributeGroup::PlaceSubtype
        } else if self.is_concept_subtype(key) {
            AttributeGroup::ConceptSubtype
        } else if self.is_object_function(key) {
            AttributeGroup::ObjectFunction
        } else if self.is_animal_only(key) {
            AttributeGroup::AnimalOnly
        } else if self.is_scale(key) {
            AttributeGroup::Scale
        } else {
            AttributeGroup::Descriptive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new([
            "vivant",
            "animal",
            "fam_oiseau",
            "obj_cuisine",
            "lieu_eau",
            "lieu",
            "phenom_meteo",
            "sert_a_couper",
            "plumes",
            "tres_petit",
            "taille",
            "couleur_typique",
        ])
    }

    #[test]
    fn groups_follow_precedence() {
        let s = schema();
        assert_eq!(s.group("vivant"), AttributeGroup::Structural);
        assert_eq!(s.group("lieu"), AttributeGroup::Structural);
        assert_eq!(s.group("lieu_eau"), AttributeGroup::PlaceSubtype);
        assert_eq!(s.group("fam_oiseau"), AttributeGroup::Family);
        assert_eq!(s.group("obj_cuisine"), AttributeGroup::ObjectSubtype);
        assert_eq!(s.group("phenom_meteo"), AttributeGroup::ConceptSubtype);
        assert_eq!(s.group("sert_a_couper"), AttributeGroup::ObjectFunction);
        assert_eq!(s.group("tres_petit"), AttributeGroup::AnimalOnly);
        assert_eq!(s.group("taille"), AttributeGroup::Scale);
        assert_eq!(s.group("couleur_typique"), AttributeGroup::Descriptive);
    }

    #[test]
    fn named_groups_only_hold_discovered_keys() {
        let s = schema();
        assert!(s.is_structural("animal"));
        assert!(!s.is_structural("plante"));
        assert!(s.object_functions().iter().all(|k| s.contains(k)));
        assert_eq!(s.size_tiers().len(), 2);
    }

    #[test]
    fn blank_keys_are_dropped() {
        let s = Schema::new(["  ", "vivant ", ""]);
        assert_eq!(s.len(), 1);
        assert!(s.contains("vivant"));
    }
}
