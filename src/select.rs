//! Question selection: which attribute to ask next.
//!
//! The policy is an ordered table of rules. Each rule has a guard over the
//! current answers and a step that either asks one fixed attribute or picks
//! the best-gain attribute from a pool (optionally with a minimum gain). The
//! first rule whose guard holds and whose step yields an attribute wins.
//! Every step is filtered through the dont-ask set, recomputed per call.

use std::collections::{BTreeSet, HashSet};

use crate::answer::{Answer, AnswerState};
use crate::catalog::keys::{
    self, ANIMAL, CONCEPT, FAM_INSECTE, FAM_MAMMIFERE, FAM_OISEAU, FAM_POISSON, FAM_REPTILE,
    GEANT, LIEU, OBJET, PLANTE, TAILLE, TRES_PETIT, VIVANT,
};
use crate::catalog::{Catalog, Entity};
use crate::score::Scorer;

const REORIENT: [&str; 6] = [VIVANT, ANIMAL, OBJET, LIEU, CONCEPT, PLANTE];
const INANIMATE: [&str; 3] = [OBJET, LIEU, CONCEPT];
const BIRD_FOLLOWUP: [&str; 4] = ["aquatique", TAILLE, "bec", "chante"];
const INSECT_FOLLOWUP: [&str; 3] = [TRES_PETIT, "antennes", "ailes"];
const FISH_FOLLOWUP: [&str; 3] = ["nageoires", TAILLE, "dangereux"];
const REPTILE_FOLLOWUP: [&str; 3] = ["carapace", "ecailles", "aquatique"];
const MAMMAL_FOLLOWUP: [&str; 7] = [
    "domestique",
    "ferme",
    "felin",
    "rongeur",
    "aboie",
    "miaule",
    TAILLE,
];
const OBJECT_SUBTYPE_PRIORITY: [&str; 5] = [
    "obj_instrument_musique",
    "obj_electronique",
    "obj_mobilier",
    "obj_cuisine",
    "obj_hygiene",
];
const OBJECT_FUNCTION_PRIORITY: [&str; 4] = [
    "se_tient_en_main",
    "sert_a_manger_boire",
    "sert_a_lire_ecrire",
    "fait_du_son",
];
const OBJECT_MISC: [&str; 2] = ["technologique", "transport"];
const PLACE_MISC: [&str; 2] = ["naturel", "interieur"];
const CONCEPT_FOLLOWUP: [&str; 2] = [keys::PHENOM_METEO, "feu_chaud"];

/// Where a best-gain step draws its options from.
#[derive(Debug, Clone, Copy)]
enum Pool {
    Keys(&'static [&'static str]),
    PlaceSubtypes,
    /// Master pool minus object/place/concept subtypes and object functions.
    LivingMaster,
    Master,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    /// Ask this attribute if it is still askable.
    Ask(&'static str),
    /// Highest-gain askable attribute of the pool, if its gain reaches the floor.
    BestGain { pool: Pool, min_gain: f64 },
    /// First askable attribute of the pool, in pool order.
    First(Pool),
}

struct Rule {
    name: &'static str,
    when: fn(&Turn<'_>) -> bool,
    step: Step,
}

const RULES: &[Rule] = &[
    Rule {
        name: "reorient-after-unknown",
        when: |t| t.last_was_unknown,
        step: Step::BestGain {
            pool: Pool::Keys(&REORIENT),
            min_gain: 0.01,
        },
    },
    Rule {
        name: "root",
        when: |_| true,
        step: Step::Ask(VIVANT),
    },
    Rule {
        name: "animal-split",
        when: |t| t.alive() == Some(Answer::Yes),
        step: Step::Ask(ANIMAL),
    },
    Rule {
        name: "plant-split",
        when: |t| t.alive() == Some(Answer::Yes) && t.answers.is_no(ANIMAL),
        step: Step::Ask(PLANTE),
    },
    Rule {
        name: "flyer-feathers",
        when: |t| t.is_animal() && t.answers.is_yes("vole"),
        step: Step::Ask("plumes"),
    },
    Rule {
        name: "flyer-antennae",
        when: |t| t.is_animal() && t.answers.is_yes("vole"),
        step: Step::Ask("antennes"),
    },
    Rule {
        name: "family",
        when: |t| t.is_animal() && t.confirmed_family().is_none(),
        step: Step::BestGain {
            pool: Pool::Keys(&keys::FAMILY_ORDER),
            min_gain: 0.02,
        },
    },
    Rule {
        name: "bird-followup",
        when: |t| t.is_animal() && t.confirmed_family() == Some(FAM_OISEAU),
        step: Step::BestGain {
            pool: Pool::Keys(&BIRD_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "insect-followup",
        when: |t| t.is_animal() && t.confirmed_family() == Some(FAM_INSECTE),
        step: Step::BestGain {
            pool: Pool::Keys(&INSECT_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "fish-followup",
        when: |t| t.is_animal() && t.confirmed_family() == Some(FAM_POISSON),
        step: Step::BestGain {
            pool: Pool::Keys(&FISH_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "reptile-followup",
        when: |t| t.is_animal() && t.confirmed_family() == Some(FAM_REPTILE),
        step: Step::BestGain {
            pool: Pool::Keys(&REPTILE_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "mammal-followup",
        when: |t| t.is_animal() && t.confirmed_family() == Some(FAM_MAMMIFERE),
        step: Step::BestGain {
            pool: Pool::Keys(&MAMMAL_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "living-best-gain",
        when: |t| t.alive() == Some(Answer::Yes),
        step: Step::BestGain {
            pool: Pool::LivingMaster,
            min_gain: 0.0,
        },
    },
    Rule {
        name: "inanimate-split",
        when: |t| t.alive() == Some(Answer::No),
        step: Step::BestGain {
            pool: Pool::Keys(&INANIMATE),
            min_gain: 0.01,
        },
    },
    Rule {
        name: "object-subtype",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(OBJET),
        step: Step::BestGain {
            pool: Pool::Keys(&OBJECT_SUBTYPE_PRIORITY),
            min_gain: 0.02,
        },
    },
    Rule {
        name: "object-function",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(OBJET),
        step: Step::BestGain {
            pool: Pool::Keys(&OBJECT_FUNCTION_PRIORITY),
            min_gain: 0.01,
        },
    },
    Rule {
        name: "object-misc",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(OBJET),
        step: Step::BestGain {
            pool: Pool::Keys(&OBJECT_MISC),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "place-subtype",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(LIEU),
        step: Step::BestGain {
            pool: Pool::PlaceSubtypes,
            min_gain: 0.02,
        },
    },
    Rule {
        name: "place-misc",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(LIEU),
        step: Step::BestGain {
            pool: Pool::Keys(&PLACE_MISC),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "concept-followup",
        when: |t| t.alive() == Some(Answer::No) && t.answers.is_yes(CONCEPT),
        step: Step::BestGain {
            pool: Pool::Keys(&CONCEPT_FOLLOWUP),
            min_gain: 0.0,
        },
    },
    Rule {
        name: "inanimate-best-gain",
        when: |t| t.alive() == Some(Answer::No),
        step: Step::BestGain {
            pool: Pool::Master,
            min_gain: 0.0,
        },
    },
    Rule {
        name: "master-order",
        when: |_| true,
        step: Step::First(Pool::Master),
    },
];

/// Inputs of one selection call.
struct Turn<'t> {
    answers: &'t AnswerState,
    last_was_unknown: bool,
}

impl Turn<'_> {
    fn alive(&self) -> Option<Answer> {
        self.answers.get(VIVANT)
    }

    fn is_animal(&self) -> bool {
        self.alive() == Some(Answer::Yes) && self.answers.is_yes(ANIMAL)
    }

    fn confirmed_family(&self) -> Option<&'static str> {
        keys::FAMILY_ORDER
            .into_iter()
            .find(|f| self.answers.is_yes(f))
    }
}

/// Attributes made irrelevant by the current answers.
///
/// Always contains every answered key. Category answers gate the groups that
/// cannot apply (e.g. `vivant = 0` gates animal-only traits and families), a
/// confirmed family gates the other families, and size tiers gate each other.
pub fn dont_ask(catalog: &Catalog, answers: &AnswerState) -> HashSet<String> {
    let schema = catalog.schema();
    let mut d: HashSet<String> = answers.keys().map(str::to_string).collect();

    let gate = |d: &mut HashSet<String>, set: &BTreeSet<String>| {
        d.extend(set.iter().cloned());
    };
    let names = |d: &mut HashSet<String>, ks: &[&str]| {
        d.extend(ks.iter().map(|k| k.to_string()));
    };

    let yes = |k: &str| answers.is_yes(k);

    if answers.is_no(VIVANT) {
        names(&mut d, &[ANIMAL, PLANTE]);
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
    }
    if yes(VIVANT) {
        names(&mut d, &[OBJET, LIEU, CONCEPT]);
        gate(&mut d, schema.object_subtypes());
        gate(&mut d, schema.object_functions());
        gate(&mut d, schema.place_subtypes());
        gate(&mut d, schema.concept_subtypes());
    }
    if yes(ANIMAL) {
        names(&mut d, &[PLANTE, OBJET, LIEU, CONCEPT]);
        gate(&mut d, schema.object_subtypes());
        gate(&mut d, schema.object_functions());
        gate(&mut d, schema.place_subtypes());
    }
    if yes(PLANTE) {
        names(&mut d, &[ANIMAL, OBJET, LIEU, CONCEPT]);
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
    }
    if yes(OBJET) {
        names(&mut d, &[ANIMAL, PLANTE, LIEU, CONCEPT]);
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
    }
    if yes(LIEU) {
        names(&mut d, &[ANIMAL, PLANTE, OBJET, CONCEPT]);
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
        gate(&mut d, schema.object_subtypes());
        gate(&mut d, schema.object_functions());
    }
    if yes(CONCEPT) {
        names(&mut d, &[ANIMAL, PLANTE, OBJET, LIEU]);
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
        gate(&mut d, schema.object_subtypes());
        gate(&mut d, schema.object_functions());
    }
    if yes("technologique") {
        gate(&mut d, schema.animal_only());
        gate(&mut d, schema.families());
    }

    if !yes(OBJET) {
        gate(&mut d, schema.object_subtypes());
        gate(&mut d, schema.object_functions());
    }
    if !yes(LIEU) {
        gate(&mut d, schema.place_subtypes());
    }
    if !yes(CONCEPT) {
        gate(&mut d, schema.concept_subtypes());
    }

    if let Some(family) = schema.families().iter().find(|f| yes(f.as_str())) {
        let others: BTreeSet<String> = schema
            .families()
            .iter()
            .filter(|f| *f != family)
            .cloned()
            .collect();
        gate(&mut d, &others);
    }

    for tier in [TRES_PETIT, TAILLE, GEANT] {
        if yes(tier) {
            names(&mut d, &[TRES_PETIT, TAILLE, GEANT]);
        }
    }

    d
}

/// Picks the next question from the catalog's attributes.
#[derive(Debug, Clone, Copy)]
pub struct QuestionSelector<'a> {
    scorer: Scorer<'a>,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            scorer: Scorer::new(catalog),
        }
    }

    fn catalog(&self) -> &'a Catalog {
        self.scorer.catalog()
    }

    /// The next attribute to ask, or `None` when every attribute is asked or
    /// gated.
    pub fn choose_next(
        &self,
        answers: &AnswerState,
        asked: &BTreeSet<String>,
        focus: &[&Entity],
        last_was_unknown: bool,
    ) -> Option<String> {
        let dont = dont_ask(self.catalog(), answers);
        let turn = Turn {
            answers,
            last_was_unknown,
        };
        let askable = |key: &str| {
            self.catalog().schema().contains(key) && !asked.contains(key) && !dont.contains(key)
        };

        for rule in RULES {
            if !(rule.when)(&turn) {
                continue;
            }
            let picked = match rule.step {
                Step::Ask(key) => askable(key).then(|| key.to_string()),
                Step::BestGain { pool, min_gain } => {
                    let options: Vec<&str> = self.pool(pool).filter(|k| askable(k)).collect();
                    self.best_gain(&options, focus, answers, min_gain)
                }
                Step::First(pool) => self.pool(pool).find(|k| askable(k)).map(str::to_string),
            };
            if let Some(key) = picked {
                tracing::debug!(rule = rule.name, question = %key, "selected next question");
                return Some(key);
            }
        }
        None
    }

    fn pool(&self, pool: Pool) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let catalog = self.catalog();
        let schema = catalog.schema();
        match pool {
            Pool::Keys(list) => Box::new(list.iter().copied()),
            Pool::PlaceSubtypes => Box::new(schema.place_subtypes().iter().map(String::as_str)),
            Pool::LivingMaster => Box::new(
                catalog
                    .question_pool()
                    .iter()
                    .map(String::as_str)
                    .filter(move |k| {
                        !(schema.is_object_subtype(k)
                            || schema.is_object_function(k)
                            || schema.is_place_subtype(k)
                            || schema.is_concept_subtype(k))
                    }),
            ),
            Pool::Master => Box::new(catalog.question_pool().iter().map(String::as_str)),
        }
    }

    /// First attribute with the strictly highest gain, if it reaches `min_gain`.
    fn best_gain(
        &self,
        options: &[&str],
        focus: &[&Entity],
        answers: &AnswerState,
        min_gain: f64,
    ) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for &key in options {
            let gain = self.scorer.information_gain(focus, key, answers);
            if best.is_none_or(|(_, g)| gain > g) {
                best = Some((key, gain));
            }
        }
        let (key, gain) = best?;
        (gain >= min_gain).then(|| key.to_string())
    }
}
