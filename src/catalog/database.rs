//! Normalized entity database.

use std::collections::{BTreeMap, HashMap};

use super::raw::{RawCatalog, coerce_value};
use super::spec::SpecTable;

/// A guessable word and its validated attribute values.
///
/// Absence of a key means "unknown", never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub attrs: BTreeMap<String, f64>,
}

impl Entity {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.attrs.get(key).copied()
    }
}

/// Immutable mapping word → clamped attribute values.
#[derive(Debug, Clone, Default)]
pub struct EntityDatabase {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl EntityDatabase {
    /// Clean every raw record against the spec table.
    ///
    /// Unknown keys and unparseable values are omitted; values are clamped to
    /// their spec range. Records left with no attribute are dropped.
    pub fn normalize(raw: &RawCatalog, specs: &SpecTable) -> Self {
        let mut entities = Vec::with_capacity(raw.len());
        let mut dropped = 0usize;

        for (name, attrs) in raw.records() {
            let cleaned: BTreeMap<String, f64> = attrs
                .iter()
                .filter_map(|(key, value)| {
                    let spec = specs.get(key)?;
                    let v = coerce_value(value)?;
                    Some((key.clone(), spec.clamp(v)))
                })
                .collect();

            if cleaned.is_empty() {
                tracing::debug!(word = name, "dropping entity with no usable attributes");
                dropped += 1;
                continue;
            }
            entities.push(Entity {
                name: name.to_string(),
                attrs: cleaned,
            });
        }

        if dropped > 0 {
            tracing::info!(dropped, kept = entities.len(), "catalog cleaning dropped entities");
        }

        let index = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entities, index }
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::Schema;
    use serde_json::json;

    fn normalize(value: serde_json::Value, known: &[&str]) -> EntityDatabase {
        let raw = RawCatalog::from_value(value);
        let specs = SpecTable::build(&Schema::new(known.iter().copied()));
        EntityDatabase::normalize(&raw, &specs)
    }

    #[test]
    fn clamps_and_filters_values() {
        let db = normalize(
            json!({
                "chat": {"vivant": 9, "animal": "4,5", "taches": "", "inconnu": 3},
            }),
            &["vivant", "animal", "taches"],
        );
        let chat = db.get("chat").unwrap();
        assert_eq!(chat.value("vivant"), Some(5.0));
        assert_eq!(chat.value("animal"), Some(4.5));
        assert_eq!(chat.value("taches"), None);
        assert_eq!(chat.value("inconnu"), None);
    }

    #[test]
    fn entities_without_valid_attributes_are_dropped() {
        let db = normalize(
            json!({
                "chat": {"vivant": 5},
                "fantome": {"vivant": "?"},
            }),
            &["vivant"],
        );
        assert_eq!(db.len(), 1);
        assert!(db.get("fantome").is_none());
    }
}
