//! The word catalog: schema, specs, importances and normalized entities.
//!
//! Built once at startup in two phases: raw JSON records are parsed into a
//! generic key → value store ([`RawCatalog`]), then the deterministic builder
//! derives typed, immutable tables from the discovered keys. Nothing here is
//! mutated after [`Catalog::build`] returns.

pub mod database;
pub mod importance;
pub mod keys;
pub mod raw;
pub mod schema;
pub mod spec;

use std::collections::BTreeSet;

pub use database::{Entity, EntityDatabase};
pub use importance::ImportanceTable;
pub use raw::RawCatalog;
pub use schema::{AttributeGroup, Schema};
pub use spec::{AttributeSpec, SpecTable};

/// Immutable catalog shared by every session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schema: Schema,
    specs: SpecTable,
    importance: ImportanceTable,
    database: EntityDatabase,
    pool: Vec<String>,
}

impl Catalog {
    /// Derive every table from raw records.
    pub fn build(raw: &RawCatalog) -> Self {
        let schema = Schema::new(raw.discover_keys());
        let specs = SpecTable::build(&schema);
        let importance = ImportanceTable::build(&schema);
        let database = EntityDatabase::normalize(raw, &specs);
        let pool = master_pool(&schema);

        tracing::info!(
            words = database.len(),
            attributes = schema.len(),
            families = schema.families().len(),
            pool = pool.len(),
            "catalog built"
        );

        Self {
            schema,
            specs,
            importance,
            database,
            pool,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn specs(&self) -> &SpecTable {
        &self.specs
    }

    pub fn importance(&self) -> &ImportanceTable {
        &self.importance
    }

    pub fn database(&self) -> &EntityDatabase {
        &self.database
    }

    /// Master question ordering used by the fallback selection steps.
    pub fn question_pool(&self) -> &[String] {
        &self.pool
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.database.get(name)
    }

    pub fn entities(&self) -> std::slice::Iter<'_, Entity> {
        self.database.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.database.is_empty()
    }
}

/// Fixed master ordering: structural keys, families, general descriptors,
/// animal-only traits, scales, then the subtype and function groups. Every
/// remaining discovered key is appended so that each one stays askable.
fn master_pool(schema: &Schema) -> Vec<String> {
    let mut ordered: Vec<&str> = Vec::with_capacity(schema.len());

    ordered.extend(keys::STRUCTURAL);
    ordered.extend([
        keys::FAM_OISEAU,
        keys::FAM_INSECTE,
        keys::FAM_POISSON,
        keys::FAM_REPTILE,
        keys::FAM_MAMMIFERE,
        keys::FAM_ARACHNIDE,
        keys::FAM_AMPHIBIEN,
    ]);
    ordered.extend(keys::GENERAL_DESCRIPTORS);

    let mut animal: Vec<&str> = schema
        .animal_only()
        .iter()
        .map(String::as_str)
        .filter(|k| !schema.is_size_tier(k))
        .collect();
    animal.sort_unstable();
    ordered.extend(animal);

    ordered.extend([keys::TRES_PETIT, keys::TAILLE, keys::GEANT, "poids", "durete"]);
    for group in [
        schema.object_subtypes(),
        schema.object_functions(),
        schema.place_subtypes(),
        schema.concept_subtypes(),
    ] {
        ordered.extend(group.iter().map(String::as_str));
    }

    let mut seen = BTreeSet::new();
    let mut pool: Vec<String> = ordered
        .into_iter()
        .filter(|k| schema.contains(k) && seen.insert(*k))
        .map(str::to_string)
        .collect();

    let rest: Vec<String> = schema
        .keys()
        .filter(|k| !seen.contains(k))
        .map(str::to_string)
        .collect();
    pool.extend(rest);
    pool
}
