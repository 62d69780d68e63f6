//! Core submission behavior shared by the HTTP handlers.
//!
//! The flow is strictly linear: validate presence of the required fields,
//! issue exactly one generation call, store the session. Any failure
//! leaves no session behind so the client returns to the editable form
//! with its entered values intact.

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::UserInput;
use crate::gemini::GenerationError;
use crate::state::AppState;

/// User-visible message for required-field validation failure.
pub const MSG_REQUIRED: &str = "Mohon lengkapi semua data wajib.";
/// User-visible message for any generation failure.
pub const MSG_GENERATION_FAILED: &str =
    "Gagal membuat rencana pembelajaran. Silakan coba lagi atau cek koneksi internet.";

pub enum SubmitError {
    /// Required fields empty; no request was issued.
    Validation(Vec<&'static str>),
    /// No GEMINI_API_KEY configured; no request was issued.
    NoGenerator,
    /// The one-shot generation call failed.
    Generation(GenerationError),
}

/// Validate, generate once, store. No retry, no partial results.
#[instrument(level = "info", skip(state, input), fields(subject = %input.subject, topic = %input.topic))]
pub async fn submit_plan(state: &AppState, input: UserInput) -> Result<Uuid, SubmitError> {
    let missing = input.missing_required();
    if !missing.is_empty() {
        warn!(target: "generator", ?missing, "Submission rejected: required fields empty");
        return Err(SubmitError::Validation(missing));
    }

    let Some(gemini) = &state.gemini else {
        error!(target: "generator", "Submission rejected: Gemini not configured");
        return Err(SubmitError::NoGenerator);
    };

    match gemini.generate_lesson_plan(&state.prompts, &input).await {
        Ok(plan) => {
            let id = state.insert_session(input, plan).await;
            info!(target: "generator", plan_id = %id, "Plan session stored");
            Ok(id)
        }
        Err(e) => {
            error!(target: "generator", error = %e, "Generation failed; returning to input state");
            Err(SubmitError::Generation(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn state_without_generator() -> AppState {
        AppState {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            gemini: None,
            prompts: Prompts::default(),
        }
    }

    fn valid_input() -> UserInput {
        UserInput {
            teacher_name: "Sari".into(),
            teacher_nip: String::new(),
            principal_name: String::new(),
            principal_nip: String::new(),
            school_name: "SMAN 1".into(),
            class_name: "X".into(),
            subject: "Fisika".into(),
            topic: "Energi".into(),
            date: String::new(),
        }
    }

    #[tokio::test]
    async fn missing_fields_short_circuit_before_the_generator() {
        let state = state_without_generator();
        let mut input = valid_input();
        input.school_name = String::new();

        // Validation must win even though no generator is configured.
        match submit_plan(&state, input).await {
            Err(SubmitError::Validation(missing)) => assert_eq!(missing, vec!["schoolName"]),
            _ => panic!("expected validation failure"),
        }
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn valid_input_without_key_fails_without_a_session() {
        let state = state_without_generator();
        match submit_plan(&state, valid_input()).await {
            Err(SubmitError::NoGenerator) => {}
            _ => panic!("expected NoGenerator"),
        }
        assert!(state.sessions.read().await.is_empty());
    }
}
