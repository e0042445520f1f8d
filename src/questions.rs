//! Display text for questions and the payload sent to the player.

use serde::{Deserialize, Serialize};

/// Curated question texts, keyed by attribute id.
const QUESTION_TEXT: &[(&str, &str)] = &[
    // Structural
    ("vivant", "Je ressens une énergie… Est-ce quelque chose de vivant ?"),
    ("animal", "Un regard… Est-ce un animal ?"),
    ("plante", "Une sève… Est-ce une plante ?"),
    ("objet", "Je vois une forme… Est-ce un objet (qu'on peut tenir / utiliser) ?"),
    ("lieu", "Je perçois un endroit… Est-ce plutôt un lieu ?"),
    ("concept", "Je sens une idée… Est-ce plutôt un concept ?"),
    // General descriptors
    ("domestique", "Cette essence… Fait-elle partie du quotidien humain (domestique) ?"),
    ("interieur", "Je vois un espace clos… Est-ce plutôt à l'intérieur ?"),
    ("naturel", "Je sens l'origine… Est-ce naturel (pas fabriqué par l'humain) ?"),
    ("technologique", "Une vibration… Est-ce technologique ?"),
    ("transport", "Je vois un déplacement… Sert-il au transport ?"),
    ("outil", "Je perçois une utilité… Est-ce un outil ?"),
    ("comestible", "Une odeur… une tentation… Est-ce comestible ?"),
    ("dangereux", "Un frisson… Est-ce dangereux ?"),
    ("bruyant", "J'entends… Est-ce bruyant ?"),
    ("mobile", "Je sens un mouvement… Est-ce mobile ?"),
    ("vivant_sauvage", "Je perçois la nature… Est-ce un vivant sauvage ?"),
    ("aquatique", "L'eau… je sens l'eau… Est-ce lié à l'eau ?"),
    ("aerien", "Je perçois l'air… Est-ce lié au ciel / à l'air ?"),
    ("feu_chaud", "Je sens la chaleur… Est-ce lié au feu / au chaud ?"),
    // Scales
    ("tres_petit", "Minuscule… Tient-il dans la paume d'une main ?"),
    ("taille", "Cette présence… Est-elle plus grande qu'un humain ?"),
    ("geant", "Une présence imposante… Est-ce gigantesque ?"),
    ("poids", "Je sens une masse… Est-ce plutôt lourd ?"),
    ("durete", "Je perçois la matière… Est-ce plutôt dur ?"),
    // Animal traits
    ("aboie", "J'entends un son… Est-ce que ça aboie ?"),
    ("miaule", "Un miaulement… Est-ce que ça miaule ?"),
    ("ronronne", "Une vibration douce… Est-ce que ça ronronne ?"),
    ("rongeur", "Je vois des dents… Est-ce un rongeur ?"),
    ("grimpe_arbres", "Je vois de la hauteur… Grimpe-t-il aux arbres ?"),
    ("cage", "Un espace restreint… Vit-il typiquement en cage ?"),
    ("ferme", "Je sens la campagne… Est-ce un animal de ferme ?"),
    ("lait", "Je perçois un liquide blanc… Produit-il du lait ?"),
    ("laine", "Une texture douce… Donne-t-il de la laine ?"),
    ("oeufs", "Une forme ovale… Pond-il des œufs ?"),
    ("felin", "Une grâce féline… Est-ce un félin ?"),
    ("rayures", "Des lignes parallèles… A-t-il des rayures ?"),
    ("criniere", "Une couronne royale… A-t-il une crinière ?"),
    ("taches", "Des motifs irréguliers… A-t-il des taches ?"),
    ("vole", "Des ailes déployées… Vole-t-il réellement ?"),
    ("chante", "Une mélodie… Chante-t-il ?"),
    ("bec", "Je vois une pointe… A-t-il un bec ?"),
    ("plumes", "Une texture légère… A-t-il des plumes ?"),
    ("nageoires", "Des extensions aquatiques… A-t-il des nageoires ?"),
    ("ecailles", "Une peau particulière… A-t-il des écailles ?"),
    ("reptile", "Un sang froid… Est-ce un reptile ?"),
    ("carapace", "Une protection dure… A-t-il une carapace ?"),
    ("insecte", "Six pattes… Est-ce un insecte ?"),
    ("ailes", "Des ailes fines… A-t-il des ailes d'insecte ?"),
    ("antennes", "Des capteurs… A-t-il des antennes ?"),
    // Families
    ("fam_mammifere", "Je sens du sang chaud… Est-ce un mammifère ?"),
    ("fam_oiseau", "Je vois des plumes… Est-ce un oiseau ?"),
    ("fam_poisson", "Je sens l'eau… Est-ce un poisson ?"),
    ("fam_reptile", "Je perçois du sang froid… Est-ce un reptile ?"),
    ("fam_insecte", "Je perçois de petites pattes… Est-ce un insecte ?"),
    ("fam_arachnide", "Huit pattes… Est-ce un arachnide ?"),
    ("fam_amphibien", "Eau et terre… Est-ce un amphibien ?"),
    ("fam_plante", "Racines et feuilles… Est-ce une plante ?"),
    ("fam_lieu", "Je sens un endroit… Est-ce un lieu ?"),
    ("fam_objet", "Je perçois une utilisation… Est-ce un objet ?"),
    ("fam_concept", "Je sens une idée… Est-ce un concept ?"),
    // Object subtypes
    ("obj_electronique", "Des circuits… Est-ce un objet électronique ?"),
    ("obj_mobilier", "Je vois une pièce… Est-ce du mobilier ?"),
    ("obj_cuisine", "Je sens la cuisine… Est-ce lié à la cuisine ?"),
    ("obj_recipent", "Contenant… Est-ce un récipient ?"),
    ("obj_outil_tranchant", "Une lame… Est-ce un outil tranchant ?"),
    ("obj_ecriture_papeterie", "Papier et encre… Est-ce pour écrire / papeterie ?"),
    ("obj_instrument_musique", "Une note… Est-ce un instrument de musique ?"),
    ("obj_hygiene", "Propreté… Est-ce lié à l'hygiène ?"),
    ("obj_vetement_accessoire", "Porté sur soi… Vêtement / accessoire ?"),
    ("obj_audio_video", "Images ou sons… Audio / vidéo ?"),
    ("obj_energie_charge", "Énergie… charge / alimentation ?"),
    ("obj_mesure_temps", "Le temps… mesure du temps ?"),
    // Place subtypes
    ("lieu_nature", "Je vois la nature… Est-ce un lieu naturel ?"),
    ("lieu_batiment", "Des murs… Est-ce un bâtiment / lieu construit ?"),
    ("lieu_transport", "Départs et arrivées… Est-ce lié au transport (gare, etc.) ?"),
    ("lieu_eau", "Présence d'eau… Est-ce un lieu d'eau (mer/lac/rivière) ?"),
    // Concepts
    ("phenom_meteo", "Ciel et climat… Est-ce un phénomène météo ?"),
    // Object functions
    ("fait_du_son", "Je perçois un son… Cet objet fait-il du son ?"),
    ("se_tient_en_main", "Prise en main… Est-ce quelque chose qui se tient en main ?"),
    ("sert_a_couper", "Fonction… Sert-il à couper ?"),
    ("sert_a_lire_ecrire", "Fonction… Sert-il à lire ou écrire ?"),
    ("sert_a_manger_boire", "Fonction… Sert-il à manger ou boire ?"),
];

/// Curated text for `key`, if any.
pub fn curated_text(key: &str) -> Option<&'static str> {
    QUESTION_TEXT
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

/// Question text for `key`, falling back to a generic template.
pub fn text_for(key: &str) -> String {
    match curated_text(key) {
        Some(text) => text.to_string(),
        None => format!("Est-ce lié à {key} ?"),
    }
}

/// A question as presented to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub id: String,
    pub text: String,
    /// 1-based position of this question in the session.
    pub number: usize,
    pub total: usize,
    pub is_tiebreaker: bool,
}

impl QuestionPayload {
    pub fn new(id: &str, number: usize, total: usize, is_tiebreaker: bool) -> Self {
        Self {
            id: id.to_string(),
            text: text_for(id),
            number,
            total,
            is_tiebreaker,
        }
    }
}
