//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS`, so the
//! bootstrap re-runs on every startup.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS verbs (
    dictionary_form TEXT PRIMARY KEY NOT NULL,
    reading         TEXT NOT NULL,
    romaji          TEXT NOT NULL,
    meaning         TEXT NOT NULL,
    word_type       TEXT NOT NULL CHECK(word_type IN ('godan','ichidan','irregular','i-adjective','na-adjective')),
    jlpt_level      TEXT NOT NULL CHECK(jlpt_level IN ('N1','N2','N3','N4','N5')),
    conjugations    TEXT NOT NULL DEFAULT '{}'
);

CREATE TABLE IF NOT EXISTS drill_sentences (
    id              TEXT PRIMARY KEY NOT NULL,
    dictionary_form TEXT NOT NULL,
    word_type       TEXT NOT NULL,
    jlpt_level      TEXT NOT NULL,
    japanese        TEXT NOT NULL,
    english         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS drill_prompts (
    id              TEXT PRIMARY KEY NOT NULL,
    target_form     TEXT NOT NULL,
    prompt_text     TEXT NOT NULL,
    word_types      TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS example_sentences (
    id              TEXT PRIMARY KEY NOT NULL,
    japanese        TEXT NOT NULL,
    reading         TEXT,
    english         TEXT NOT NULL,
    dictionary_form TEXT,
    jlpt_level      TEXT
);

CREATE TABLE IF NOT EXISTS sentence_favorites (
    id              TEXT PRIMARY KEY NOT NULL,
    user_id         TEXT NOT NULL,
    sentence_id     TEXT NOT NULL REFERENCES example_sentences(id) ON DELETE CASCADE,
    created_at      TEXT NOT NULL,
    UNIQUE(user_id, sentence_id)
);

CREATE TABLE IF NOT EXISTS kanji (
    character       TEXT PRIMARY KEY NOT NULL,
    meaning         TEXT NOT NULL,
    onyomi          TEXT NOT NULL DEFAULT '[]',
    kunyomi         TEXT NOT NULL DEFAULT '[]',
    stroke_count    INTEGER,
    grade           INTEGER,
    jlpt_level      TEXT,
    fetched_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS grammar_topics (
    id              TEXT PRIMARY KEY NOT NULL,
    title           TEXT NOT NULL,
    jlpt_level      TEXT NOT NULL,
    structure       TEXT NOT NULL,
    explanation     TEXT NOT NULL,
    examples        TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS user_google_tokens (
    user_id         TEXT PRIMARY KEY NOT NULL,
    access_token    TEXT NOT NULL,
    refresh_token   TEXT NOT NULL,
    expires_at      TEXT NOT NULL,
    scope           TEXT,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS oauth_states (
    state           TEXT PRIMARY KEY NOT NULL,
    user_id         TEXT NOT NULL,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_verbs_level ON verbs(jlpt_level);
CREATE INDEX IF NOT EXISTS idx_drill_sentences_level ON drill_sentences(jlpt_level);
CREATE INDEX IF NOT EXISTS idx_example_sentences_form ON example_sentences(dictionary_form);
CREATE INDEX IF NOT EXISTS idx_favorites_user ON sentence_favorites(user_id);
CREATE INDEX IF NOT EXISTS idx_grammar_level ON grammar_topics(jlpt_level);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
