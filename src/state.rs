//! Application state: the in-memory plan-session store, prompts, and the
//! optional Gemini client.
//!
//! A session is one `(UserInput, LessonPlan)` pair created by a successful
//! generation. Sessions live for the browser session only: they are held
//! in memory, dropped on "back", and never persisted to durable storage.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_prompt_config_from_env, Prompts};
use crate::domain::{LessonPlan, UserInput};
use crate::gemini::Gemini;

#[derive(Clone)]
pub struct PlanSession {
    pub input: UserInput,
    pub plan: LessonPlan,
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, PlanSession>>>,
    pub gemini: Option<Gemini>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load prompt overrides, init the Gemini client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let prompts = load_prompt_config_from_env()
            .map(|c| c.prompts)
            .unwrap_or_default();

        let gemini = Gemini::from_env();
        if let Some(g) = &gemini {
            info!(target: "rppm_backend", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            info!(target: "rppm_backend", "Gemini disabled (no GEMINI_API_KEY). Submissions will fail until configured.");
        }

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            gemini,
            prompts,
        }
    }

    /// Store a freshly generated plan and hand back its session id.
    #[instrument(level = "debug", skip(self, input, plan), fields(subject = %input.subject, topic = %input.topic))]
    pub async fn insert_session(&self, input: UserInput, plan: LessonPlan) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, PlanSession { input, plan });
        id
    }

    /// Read-only access to a session by id.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &Uuid) -> Option<PlanSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Discard a session ("back" navigation). Returns whether it existed.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_session(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }
}
