//! Minimal Gemini client for our single use-case.
//!
//! We call `models/{model}:generateContent` exactly once per submission,
//! with a JSON response MIME type and a declarative response schema that
//! mirrors `LessonPlan` field-for-field. Calls are instrumented and log
//! model name, latency, and token usage (not contents).
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::Prompts;
use crate::domain::{LessonPlan, UserInput};
use crate::util::{fill_template, trunc_for_log};

/// Everything that can abort a generation attempt. Any variant fails the
/// whole submission; there is no partial acceptance or repair.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini request failed: {0}")]
    Http(String),
    #[error("Gemini returned no text")]
    EmptyResponse,
    #[error("Gemini payload did not match the plan shape: {0}")]
    BadPayload(String),
}

#[derive(Clone)]
pub struct Gemini {
    pub client: reqwest::Client,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Gemini {
    /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());

        // No timeout override: the one-shot plan generation runs long and
        // the caller blocks on it by design.
        Some(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        })
    }

    /// One-shot schema-constrained lesson plan generation.
    #[instrument(level = "info", skip(self, prompts, input), fields(model = %self.model, subject = %input.subject, topic = %input.topic))]
    pub async fn generate_lesson_plan(
        &self,
        prompts: &Prompts,
        input: &UserInput,
    ) -> Result<LessonPlan, GenerationError> {
        let user = fill_template(
            &prompts.plan_user_template,
            &[
                ("teacher", &input.teacher_name),
                ("school", &input.school_name),
                ("class", &input.class_name),
                ("subject", &input.subject),
                ("topic", &input.topic),
            ],
        );

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let req = GenerateContentRequest {
            system_instruction: Content {
                parts: vec![Part { text: prompts.plan_system.clone() }],
            },
            contents: vec![Content { parts: vec![Part { text: user }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: response_schema(),
            },
        };

        let start = std::time::Instant::now();
        let res = self
            .client
            .post(&url)
            .header(USER_AGENT, "rppm-backend/0.1")
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let msg = extract_gemini_error(&body).unwrap_or_else(|| trunc_for_log(&body, 300));
            error!(target: "generator", %status, error = %msg, "Gemini call failed");
            return Err(GenerationError::Http(format!("HTTP {}: {}", status, msg)));
        }

        let body: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;
        let elapsed = start.elapsed();
        if let Some(usage) = &body.usage_metadata {
            info!(
                prompt_tokens = ?usage.prompt_token_count,
                candidate_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                ?elapsed,
                "Gemini usage"
            );
        }

        let text = extract_text(&body).ok_or(GenerationError::EmptyResponse)?;
        let plan = parse_plan(&text)?;
        info!(target: "generator", ?elapsed, mcq = plan.lkpd.soal_pilihan_ganda.len(), numerasi = plan.lkpd.soal_numerasi.len(), videos = plan.video_rekomendasi.len(), "Lesson plan generated");
        Ok(plan)
    }
}

/// First candidate's first non-empty text part, if any.
fn extract_text(body: &GenerateContentResponse) -> Option<String> {
    let text = body
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strict deserialization: a field missing anywhere in the tree fails the
/// whole generation here, never at render time.
fn parse_plan(text: &str) -> Result<LessonPlan, GenerationError> {
    serde_json::from_str::<LessonPlan>(text).map_err(|e| GenerationError::BadPayload(e.to_string()))
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(default, rename = "promptTokenCount")]
    prompt_token_count: Option<u32>,
    #[serde(default, rename = "candidatesTokenCount")]
    candidates_token_count: Option<u32>,
    #[serde(default, rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct EWrap {
        error: EObj,
    }
    #[derive(Deserialize)]
    struct EObj {
        message: String,
    }
    serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

/// Declarative response schema sent with every request. Per-field
/// descriptions steer content; `required` lists keep the shape exact.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identifikasi": {
                "type": "OBJECT",
                "properties": {
                    "peserta_didik": { "type": "STRING", "description": "Analysis of student (murid) readiness, interests, background." },
                    "materi_pelajaran": { "type": "STRING", "description": "Analysis of material structure, relevance to DAILY LIFE, difficulty." },
                    "dimensi_profil_lulusan": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "List of selected DPL codes ONLY (e.g. ['DPL1', 'DPL3', 'DPL5']) that are most relevant to the topic."
                    }
                },
                "required": ["peserta_didik", "materi_pelajaran", "dimensi_profil_lulusan"]
            },
            "desain_pembelajaran": {
                "type": "OBJECT",
                "properties": {
                    "capaian_pembelajaran": { "type": "STRING" },
                    "lintas_disiplin_ilmu": { "type": "STRING" },
                    "tujuan_pembelajaran": { "type": "STRING" },
                    "topik_pembelajaran": { "type": "STRING" },
                    "pertanyaan_pemantik": { "type": "STRING" },
                    "praktik_pedagogis": { "type": "STRING" },
                    "kemitraan_pembelajaran": { "type": "STRING" },
                    "lingkungan_pembelajaran": { "type": "STRING" },
                    "pemanfaatan_digital": { "type": "STRING" }
                },
                "required": [
                    "capaian_pembelajaran", "lintas_disiplin_ilmu", "tujuan_pembelajaran",
                    "topik_pembelajaran", "pertanyaan_pemantik", "praktik_pedagogis",
                    "kemitraan_pembelajaran", "lingkungan_pembelajaran", "pemanfaatan_digital"
                ]
            },
            "langkah_pembelajaran": {
                "type": "OBJECT",
                "properties": {
                    "awal": {
                        "type": "OBJECT",
                        "properties": {
                            "prinsip": { "type": "STRING" },
                            "kegiatan": { "type": "STRING" }
                        },
                        "required": ["prinsip", "kegiatan"]
                    },
                    "inti": {
                        "type": "OBJECT",
                        "properties": {
                            "memahami": sub_phase_schema(),
                            "mengaplikasi": sub_phase_schema(),
                            "merefleksi": sub_phase_schema()
                        },
                        "required": ["memahami", "mengaplikasi", "merefleksi"]
                    },
                    "penutup": {
                        "type": "OBJECT",
                        "properties": {
                            "prinsip": { "type": "STRING" },
                            "kegiatan": { "type": "STRING" }
                        },
                        "required": ["prinsip", "kegiatan"]
                    }
                },
                "required": ["awal", "inti", "penutup"]
            },
            "asesmen_pembelajaran": {
                "type": "OBJECT",
                "properties": {
                    "awal": { "type": "STRING" },
                    "proses": { "type": "STRING" },
                    "akhir": { "type": "STRING" }
                },
                "required": ["awal", "proses", "akhir"]
            },
            "modul_ajar": {
                "type": "OBJECT",
                "properties": {
                    "informasi_umum": {
                        "type": "OBJECT",
                        "properties": {
                            "identitas_sekolah": { "type": "STRING" },
                            "kompetensi_awal": { "type": "STRING", "description": "Focus on student prior knowledge" },
                            "dimensi_profil_lulusan": { "type": "STRING", "description": "Describe the specific DPL targets" }
                        },
                        "required": ["identitas_sekolah", "kompetensi_awal", "dimensi_profil_lulusan"]
                    },
                    "komponen_inti": {
                        "type": "OBJECT",
                        "properties": {
                            "tujuan_pembelajaran": { "type": "STRING" },
                            "pertanyaan_pemantik": { "type": "STRING" },
                            "uraian_materi_detail": { "type": "STRING", "description": "VERY EXTENSIVE, COMPREHENSIVE, AND DETAILED explanation of the material (Isi Materi Terurai secara mendalam)." },
                            "link_video_materi": { "type": "STRING", "description": "Search query for a video specifically matching the detailed material." },
                            "glosarium": { "type": "STRING" },
                            "daftar_pustaka": { "type": "STRING" }
                        },
                        "required": ["tujuan_pembelajaran", "pertanyaan_pemantik", "uraian_materi_detail", "link_video_materi", "glosarium", "daftar_pustaka"]
                    }
                },
                "required": ["informasi_umum", "komponen_inti"]
            },
            "lkpd": {
                "type": "OBJECT",
                "properties": {
                    "judul": { "type": "STRING" },
                    "materi_singkat": { "type": "STRING" },
                    "petunjuk_umum": { "type": "STRING" },
                    "soal_pilihan_ganda": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "pertanyaan": { "type": "STRING" },
                                "pilihan": { "type": "ARRAY", "items": { "type": "STRING" } },
                                "kunci": { "type": "STRING" },
                                "level_kognitif": { "type": "STRING", "description": "Bloom's taxonomy level (e.g., 'C2 (Memahami)', 'C4 (Menganalisis)')" },
                                "tingkat_kesulitan": { "type": "STRING", "description": "'Mudah', 'Sedang', or 'Sulit'" }
                            },
                            "required": ["pertanyaan", "pilihan", "kunci", "level_kognitif", "tingkat_kesulitan"]
                        }
                    },
                    "soal_numerasi": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "pertanyaan": { "type": "STRING" },
                                "kunci": { "type": "STRING" },
                                "level_kognitif": { "type": "STRING", "description": "Bloom's taxonomy level (C3, C4, C5, C6)" },
                                "tingkat_kesulitan": { "type": "STRING", "description": "'Sedang' or 'Sulit'" }
                            },
                            "required": ["pertanyaan", "kunci", "level_kognitif", "tingkat_kesulitan"]
                        }
                    },
                    "rubrik_penilaian": { "type": "STRING" }
                },
                "required": ["judul", "materi_singkat", "petunjuk_umum", "soal_pilihan_ganda", "soal_numerasi", "rubrik_penilaian"]
            },
            "video_rekomendasi": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "judul": { "type": "STRING" },
                        "deskripsi": { "type": "STRING" },
                        "query_pencarian": { "type": "STRING" }
                    },
                    "required": ["judul", "deskripsi", "query_pencarian"]
                }
            }
        },
        "required": [
            "identifikasi", "desain_pembelajaran", "langkah_pembelajaran",
            "asesmen_pembelajaran", "modul_ajar", "lkpd", "video_rekomendasi"
        ]
    })
}

fn sub_phase_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "prinsip": { "type": "STRING" },
            "kegiatan": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["prinsip", "kegiatan"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_every_top_level_section() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        for section in [
            "identifikasi",
            "desain_pembelajaran",
            "langkah_pembelajaran",
            "asesmen_pembelajaran",
            "modul_ajar",
            "lkpd",
            "video_rekomendasi",
        ] {
            assert!(required.contains(&section), "missing {section}");
            assert!(schema["properties"][section].is_object());
        }
    }

    #[test]
    fn extract_text_joins_parts_and_rejects_blank() {
        let body: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_text(&body).as_deref(), Some("{\"a\":1}"));

        let blank: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        }))
        .unwrap();
        assert!(extract_text(&blank).is_none());

        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(extract_text(&empty).is_none());
    }

    #[test]
    fn parse_plan_rejects_non_json_text() {
        assert!(matches!(
            parse_plan("Maaf, saya tidak bisa."),
            Err(GenerationError::BadPayload(_))
        ));
    }

    #[test]
    fn gemini_error_body_is_unwrapped() {
        let body = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_gemini_error(body).as_deref(), Some("quota exceeded"));
        assert!(extract_gemini_error("not json").is_none());
    }
}
