//! Attribute vocabulary.
//!
//! Keys are discovered from catalog data, but a handful of families are
//! recognised by name: the six structural categories, the scale and size-tier
//! keys, and the `fam_` / `obj_` / `lieu_` prefix groups. Everything listed
//! here is only ever used after intersecting with the discovered key set.

pub const VIVANT: &str = "vivant";
pub const ANIMAL: &str = "animal";
pub const PLANTE: &str = "plante";
pub const OBJET: &str = "objet";
pub const LIEU: &str = "lieu";
pub const CONCEPT: &str = "concept";

/// Top-level existence categories.
pub const STRUCTURAL: [&str; 6] = [VIVANT, ANIMAL, PLANTE, OBJET, LIEU, CONCEPT];

/// Continuous magnitude attributes.
pub const SCALES: [&str; 3] = ["taille", "poids", "durete"];

pub const TRES_PETIT: &str = "tres_petit";
pub const TAILLE: &str = "taille";
pub const GEANT: &str = "geant";

/// Mutually exclusive size tiers (tiny / bigger than a human / giant).
pub const SIZE_TIERS: [&str; 3] = [TRES_PETIT, TAILLE, GEANT];

pub const FAMILY_PREFIX: &str = "fam_";
pub const OBJECT_PREFIX: &str = "obj_";
pub const PLACE_PREFIX: &str = "lieu_";

pub const PHENOM_METEO: &str = "phenom_meteo";

pub const CONCEPT_SUBTYPES: [&str; 1] = [PHENOM_METEO];

pub const OBJECT_FUNCTIONS: [&str; 5] = [
    "fait_du_son",
    "se_tient_en_main",
    "sert_a_couper",
    "sert_a_lire_ecrire",
    "sert_a_manger_boire",
];

/// Attributes that only make sense for animals.
pub const ANIMAL_ONLY: [&str; 27] = [
    "aboie",
    "miaule",
    "ronronne",
    "rongeur",
    "grimpe_arbres",
    "cage",
    "ferme",
    "lait",
    "laine",
    "oeufs",
    "felin",
    "rayures",
    "criniere",
    "taches",
    "vole",
    "chante",
    "bec",
    "plumes",
    "nageoires",
    "ecailles",
    "reptile",
    "carapace",
    "insecte",
    "ailes",
    "antennes",
    TRES_PETIT,
    GEANT,
];

/// A "yes" on any of these is enough to call the entity an animal.
pub const STRONG_ANIMAL: [&str; 20] = [
    "bec", "plumes", "aboie", "miaule", "ronronne", "nageoires", "ecailles", "reptile",
    "carapace", "insecte", "ailes", "antennes", "oeufs", "felin", "rongeur", "ferme", "lait",
    "laine", "vole", "chante",
];

pub const FAM_MAMMIFERE: &str = "fam_mammifere";
pub const FAM_OISEAU: &str = "fam_oiseau";
pub const FAM_INSECTE: &str = "fam_insecte";
pub const FAM_POISSON: &str = "fam_poisson";
pub const FAM_REPTILE: &str = "fam_reptile";
pub const FAM_ARACHNIDE: &str = "fam_arachnide";
pub const FAM_AMPHIBIEN: &str = "fam_amphibien";

/// Animal families in the order they are probed.
pub const FAMILY_ORDER: [&str; 7] = [
    FAM_MAMMIFERE,
    FAM_OISEAU,
    FAM_INSECTE,
    FAM_POISSON,
    FAM_REPTILE,
    FAM_ARACHNIDE,
    FAM_AMPHIBIEN,
];

/// General descriptors, in master-pool order.
pub const GENERAL_DESCRIPTORS: [&str; 13] = [
    "technologique",
    "naturel",
    "domestique",
    "interieur",
    "mobile",
    "aquatique",
    "aerien",
    "dangereux",
    "bruyant",
    "comestible",
    "transport",
    "outil",
    "feu_chaud",
];

/// Pairs of attributes that mostly carry the same information.
pub const CORRELATIONS: [(&str, &[&str]); 10] = [
    ("bec", &["plumes", FAM_OISEAU]),
    ("plumes", &["bec", FAM_OISEAU]),
    ("miaule", &["ronronne", "felin"]),
    ("ronronne", &["miaule", "felin"]),
    ("ecailles", &["nageoires", FAM_POISSON]),
    ("nageoires", &["ecailles", FAM_POISSON]),
    ("bruyant", &["fait_du_son"]),
    ("fait_du_son", &["bruyant"]),
    (PLANTE, &["fam_plante"]),
    ("fam_plante", &[PLANTE]),
];

/// Attributes correlated with `key`, or an empty slice.
pub fn correlated_with(key: &str) -> &'static [&'static str] {
    CORRELATIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, corr)| *corr)
        .unwrap_or(&[])
}
