//! `POST /api/validate-grammar`: conjugation lookup, answer validation,
//! and random conjugation drills, selected by the body's `action` field.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::conjugation::{validate, validate_batch, BatchItem};
use crate::drill::RandomDrillRequest;
use crate::models::verb::Verb;
use crate::models::{JlptLevel, WordType};
use crate::persistence::verb_repo::VerbRepo;
use crate::{AppError, Result};

use super::AppState;

/// Request body, discriminated by `action`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum GrammarAction {
    /// Return one conjugation.
    GetConjugation(ConjugationRequest),
    /// Check one learner answer.
    Validate(ValidateRequest),
    /// Check several answers against one verb.
    ValidateBatch(ValidateBatchRequest),
    /// Random verb + form drill.
    GetRandomDrill(RandomDrillBody),
}

/// Body of `get-conjugation`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConjugationRequest {
    dictionary_form: String,
    form_key: String,
}

/// Body of `validate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    dictionary_form: String,
    form_key: String,
    input: String,
}

/// Body of `validate-batch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBatchRequest {
    dictionary_form: String,
    items: Vec<BatchItem>,
}

/// Body of `get-random-drill`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RandomDrillBody {
    level: Option<JlptLevel>,
    word_types: Vec<WordType>,
    forms: Vec<String>,
    count: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConjugationResponse<'a> {
    dictionary_form: &'a str,
    form_key: &'a str,
    conjugation: &'a crate::models::verb::Conjugation,
}

/// Dispatch one grammar action.
///
/// # Errors
///
/// 400 on malformed bodies or unknown actions, 404 on unknown dictionary
/// forms or form keys.
pub async fn validate_grammar(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>> {
    let action: GrammarAction = super::json_body(&body)?;
    let verbs = VerbRepo::new(Arc::clone(&state.db));

    match action {
        GrammarAction::GetConjugation(req) => {
            let verb = verbs.get_by_dictionary_form(req.dictionary_form.trim()).await?;
            let conjugation = lookup(&verb, &req.form_key)?;
            Ok(Json(json!(ConjugationResponse {
                dictionary_form: &verb.dictionary_form,
                form_key: &req.form_key,
                conjugation,
            })))
        }
        GrammarAction::Validate(req) => {
            let verb = verbs.get_by_dictionary_form(req.dictionary_form.trim()).await?;
            let expected = lookup(&verb, &req.form_key)?;
            let result = validate(expected, &req.input);
            debug!(
                dictionary_form = %verb.dictionary_form,
                form_key = %req.form_key,
                is_valid = result.is_valid,
                "answer validated"
            );
            Ok(Json(json!(result)))
        }
        GrammarAction::ValidateBatch(req) => {
            if req.items.is_empty() {
                return Err(AppError::BadRequest("items must not be empty".into()));
            }
            let verb = verbs.get_by_dictionary_form(req.dictionary_form.trim()).await?;
            let results = validate_batch(&verb, &req.items);
            let correct = results.iter().filter(|r| r.is_valid).count();
            Ok(Json(json!({
                "dictionaryForm": verb.dictionary_form,
                "results": results,
                "correct": correct,
                "total": results.len(),
            })))
        }
        GrammarAction::GetRandomDrill(req) => {
            let count = req.count.unwrap_or(state.config.drill.default_count);
            if count == 0 || count > state.config.drill.max_count {
                return Err(AppError::BadRequest(format!(
                    "count must be between 1 and {}",
                    state.config.drill.max_count
                )));
            }
            let items = state
                .random_drills
                .generate(&RandomDrillRequest {
                    level: req.level,
                    word_types: req.word_types,
                    forms: req.forms,
                    count,
                })
                .await?;
            Ok(Json(json!({ "items": items, "count": items.len() })))
        }
    }
}

fn lookup<'a>(verb: &'a Verb, form_key: &str) -> Result<&'a crate::models::verb::Conjugation> {
    verb.conjugation(form_key.trim()).ok_or_else(|| {
        AppError::NotFound(format!(
            "form {form_key} not found for {}",
            verb.dictionary_form
        ))
    })
}
