//! Shared sample data for unit tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use nihongo_api::models::drill::{DrillPrompt, DrillSentence};
use nihongo_api::models::verb::{Conjugation, Verb};
use nihongo_api::models::{JlptLevel, WordType};
use nihongo_api::persistence::db::{self, Database};
use nihongo_api::persistence::seed::{self, SeedData};

/// Path of the JSON seed shared by unit and integration tests.
pub const SEED_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/seed.json");

pub fn seed_data() -> SeedData {
    SeedData::load_from_path(SEED_PATH).expect("fixture seed parses")
}

/// In-memory database loaded with the fixture seed.
pub async fn seeded_db() -> Arc<Database> {
    let db = Arc::new(db::connect_memory().await.expect("db"));
    seed::apply(&db, &seed_data()).await.expect("seed");
    db
}

pub fn conj(kanji: &str, reading: &str, romaji: &str) -> Conjugation {
    Conjugation {
        kanji: kanji.to_owned(),
        reading: reading.to_owned(),
        romaji: romaji.to_owned(),
    }
}

/// 食べる with the common plain and polite forms.
pub fn taberu() -> Verb {
    let mut conjugations = BTreeMap::new();
    conjugations.insert("masu".to_owned(), conj("食べます", "たべます", "tabemasu"));
    conjugations.insert("te_form".to_owned(), conj("食べて", "たべて", "tabete"));
    conjugations.insert("past".to_owned(), conj("食べた", "たべた", "tabeta"));
    conjugations.insert("negative".to_owned(), conj("食べない", "たべない", "tabenai"));
    conjugations.insert(
        "past_negative".to_owned(),
        conj("食べなかった", "たべなかった", "tabenakatta"),
    );
    Verb {
        dictionary_form: "食べる".to_owned(),
        reading: "たべる".to_owned(),
        romaji: "taberu".to_owned(),
        meaning: "to eat".to_owned(),
        word_type: WordType::Ichidan,
        jlpt_level: JlptLevel::N5,
        conjugations,
    }
}

pub fn sentence(id: &str, dictionary_form: &str, word_type: WordType) -> DrillSentence {
    DrillSentence {
        id: id.to_owned(),
        dictionary_form: dictionary_form.to_owned(),
        word_type,
        jlpt_level: JlptLevel::N5,
        japanese: "昨日＿＿。".to_owned(),
        english: "Yesterday.".to_owned(),
    }
}

pub fn prompt(id: &str, target_form: &str, word_types: &[WordType]) -> DrillPrompt {
    DrillPrompt {
        id: id.to_owned(),
        target_form: target_form.to_owned(),
        prompt_text: format!("Use the {target_form} form."),
        word_types: word_types.to_vec(),
    }
}
