//! Public JSON DTOs for the HTTP API (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::UserInput;
use crate::state::PlanSession;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// Uniform error body for every failing endpoint.
#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

/// Returned by POST /api/v1/plan on success.
#[derive(Serialize)]
pub struct PlanCreated {
    pub plan_id: Uuid,
}

/// Summary view of a stored session (input echo + worksheet counts).
/// The document views themselves are served as HTML, not JSON.
#[derive(Serialize)]
pub struct PlanSummary {
    pub plan_id: Uuid,
    pub input: UserInput,
    pub judul_lkpd: String,
    pub soal_pilihan_ganda: usize,
    pub soal_numerasi: usize,
    pub video_rekomendasi: usize,
}

pub fn to_summary(id: Uuid, s: &PlanSession) -> PlanSummary {
    PlanSummary {
        plan_id: id,
        input: s.input.clone(),
        judul_lkpd: s.plan.lkpd.judul.clone(),
        soal_pilihan_ganda: s.plan.lkpd.soal_pilihan_ganda.len(),
        soal_numerasi: s.plan.lkpd.soal_numerasi.len(),
        video_rekomendasi: s.plan.video_rekomendasi.len(),
    }
}
