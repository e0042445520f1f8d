//! Read-only introspection of the catalog and the ranking, for tooling.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::answer::AnswerState;
use crate::engine::Engine;
use crate::error::{CatalogError, CatalogResult};
use crate::propagate::propagated;
use crate::score::Scorer;
use crate::select::QuestionSelector;

/// Maximum number of sample values in an [`AttributeReport`].
const REPORT_SAMPLES: usize = 10;

/// Catalog summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogInfo {
    pub words: usize,
    pub attributes: usize,
    pub structural: usize,
    pub families: usize,
    pub object_subtypes: usize,
    pub place_subtypes: usize,
    pub concept_subtypes: usize,
    pub object_functions: usize,
    pub animal_only: usize,
    pub question_pool: usize,
}

impl std::fmt::Display for CatalogInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "guesswork catalog info")?;
        writeln!(f, "  words:            {}", self.words)?;
        writeln!(f, "  attributes:       {}", self.attributes)?;
        writeln!(f, "  structural:       {}", self.structural)?;
        writeln!(f, "  families:         {}", self.families)?;
        writeln!(f, "  object subtypes:  {}", self.object_subtypes)?;
        writeln!(f, "  place subtypes:   {}", self.place_subtypes)?;
        writeln!(f, "  concept subtypes: {}", self.concept_subtypes)?;
        writeln!(f, "  object functions: {}", self.object_functions)?;
        writeln!(f, "  animal-only:      {}", self.animal_only)?;
        writeln!(f, "  question pool:    {}", self.question_pool)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSample {
    pub word: String,
    pub value: f64,
}

/// Coverage of one attribute across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeReport {
    pub attribute: String,
    pub present_count: usize,
    pub nonzero_count: usize,
    pub present_ratio: f64,
    pub samples: Vec<AttributeSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWord {
    pub word: String,
    pub score: f64,
    pub attributes: BTreeMap<String, f64>,
}

/// Top of the unfiltered ranking for an answer state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    /// Answers after propagation.
    pub answers: AnswerState,
    pub top: Vec<RankedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextReport {
    pub answers: AnswerState,
    pub asked: BTreeSet<String>,
    pub suggested_next: Option<String>,
}

impl Engine {
    pub fn info(&self) -> CatalogInfo {
        let catalog = self.catalog();
        let schema = catalog.schema();
        CatalogInfo {
            words: catalog.database().len(),
            attributes: catalog.specs().len(),
            structural: schema.structural().len(),
            families: schema.families().len(),
            object_subtypes: schema.object_subtypes().len(),
            place_subtypes: schema.place_subtypes().len(),
            concept_subtypes: schema.concept_subtypes().len(),
            object_functions: schema.object_functions().len(),
            animal_only: schema.animal_only().len(),
            question_pool: catalog.question_pool().len(),
        }
    }

    /// Presence statistics for one attribute.
    pub fn attribute_report(&self, key: &str) -> CatalogResult<AttributeReport> {
        let key = key.trim();
        let catalog = self.catalog();
        if !catalog.specs().contains(key) {
            return Err(CatalogError::UnknownAttribute {
                key: key.to_string(),
            });
        }

        let mut present_count = 0;
        let mut nonzero_count = 0;
        let mut samples = Vec::new();
        for entity in catalog.entities() {
            let Some(value) = entity.value(key) else {
                continue;
            };
            present_count += 1;
            if value > 0.0 {
                nonzero_count += 1;
            }
            if samples.len() < REPORT_SAMPLES {
                samples.push(AttributeSample {
                    word: entity.name.clone(),
                    value,
                });
            }
        }

        Ok(AttributeReport {
            attribute: key.to_string(),
            present_count,
            nonzero_count,
            present_ratio: present_count as f64 / catalog.database().len().max(1) as f64,
            samples,
        })
    }

    /// The `n` best-scoring words over the whole catalog.
    pub fn rank_top(&self, answers: &AnswerState, n: usize) -> RankReport {
        let catalog = self.catalog();
        let answers = propagated(catalog.schema(), answers);
        let top = Scorer::new(catalog)
            .rank(&answers, catalog.entities())
            .into_iter()
            .take(n)
            .map(|r| RankedWord {
                word: r.entity.name.clone(),
                score: r.score,
                attributes: r.entity.attrs.clone(),
            })
            .collect();
        RankReport { answers, top }
    }

    /// The question the engine would ask next, ignoring the unknown flag.
    pub fn suggest_next(&self, answers: &AnswerState, asked: &BTreeSet<String>) -> NextReport {
        let catalog = self.catalog();
        let answers = propagated(catalog.schema(), answers);
        let ranked = Scorer::new(catalog).rank(&answers, catalog.entities());
        let focus: Vec<_> = ranked
            .iter()
            .take(self.config().focus_size)
            .map(|r| r.entity)
            .collect();
        let suggested_next =
            QuestionSelector::new(catalog).choose_next(&answers, asked, &focus, false);
        NextReport {
            answers,
            asked: asked.clone(),
            suggested_next,
        }
    }
}
