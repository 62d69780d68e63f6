//! Loading prompt configuration from TOML.
//!
//! The generation prompt ships with compiled-in defaults that reproduce the
//! canonical instruction; a TOML file at PROMPT_CONFIG_PATH can override
//! either part for tuning without a rebuild.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PromptConfig {
    #[serde(default)]
    pub prompts: Prompts,
}

/// Prompts used by the Gemini client.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
    /// Role line given as the system instruction.
    pub plan_system: String,
    /// User message template; placeholders: {teacher} {school} {class} {subject} {topic}.
    pub plan_user_template: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            plan_system: "You are an expert Indonesian Curriculum Designer.".into(),
            plan_user_template: r#"Task: Create "RPPM" (Deep Learning Plan), "Modul Ajar", and "LKM".

Context:
Teacher: {teacher}
School: {school}
Class: {class}
Subject: {subject}
Topic: {topic}

REQUIREMENTS:
1. Terminology: Use "murid" (lowercase).
2. Video: STRICTLY search for "Animasi Pembelajaran" or "Kartun Edukasi" for videos.
3. Modul Ajar Focus:
   - Kompetensi Awal: Elaborate on what students must know before this lesson.
   - Dimensi Profil Lulusan: List the specific dimensions targeted.
   - Uraian Materi: Provide a VERY DETAILED, EXTENSIVE, LONG explanation of the topic material (Isi Materi Terurai). It should be substantial enough for a full lesson.
   - Link Video: Inside the material section, provide a specific search query for a video that explains this material.
   - Komponen Inti: Only include Tujuan Pembelajaran, Pertanyaan Pemantik, Uraian Materi, Glosarium, and Daftar Pustaka.
   - EXCLUSIONS: Do NOT include Sarana Prasarana, Target Murid, Model Pembelajaran, Kegiatan Pembelajaran, Asesmen, Refleksi, or Lampiran in the Modul Ajar section.
4. Formatting:
   - STRICTLY PLAIN TEXT.
   - DO NOT use markdown symbols like **, ##, *, or #.
   - DO NOT use bullet points that look like markdown. Use standard numbering (1. 2. 3.) or plain dashes (-).
5. Questions:
   - 10 MCQs (Keys + Levels C1-C6).
   - 10 Numeracy (HOTS C3-C5 + Keys).

Language: Indonesian."#
                .into(),
        }
    }
}

/// Attempt to load `PromptConfig` from PROMPT_CONFIG_PATH.
/// On any parsing/IO error, returns None and the defaults stay in effect.
pub fn load_prompt_config_from_env() -> Option<PromptConfig> {
    let path = std::env::var("PROMPT_CONFIG_PATH").ok()?;
    match std::fs::read_to_string(&path) {
        Ok(s) => match toml::from_str::<PromptConfig>(&s) {
            Ok(cfg) => {
                info!(target: "rppm_backend", %path, "Loaded prompt config (TOML)");
                Some(cfg)
            }
            Err(e) => {
                error!(target: "rppm_backend", %path, error = %e, "Failed to parse TOML config");
                None
            }
        },
        Err(e) => {
            error!(target: "rppm_backend", %path, error = %e, "Failed to read TOML config file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::fill_template;

    #[test]
    fn default_template_carries_context_placeholders() {
        let p = Prompts::default();
        for key in ["{teacher}", "{school}", "{class}", "{subject}", "{topic}"] {
            assert!(p.plan_user_template.contains(key), "missing {key}");
        }
    }

    #[test]
    fn filled_template_contains_values_verbatim() {
        let p = Prompts::default();
        let filled = fill_template(
            &p.plan_user_template,
            &[
                ("teacher", "Sari"),
                ("school", "SMAN 1"),
                ("class", "X"),
                ("subject", "Fisika"),
                ("topic", "Energi"),
            ],
        );
        for v in ["Sari", "SMAN 1", "Fisika", "Energi"] {
            assert!(filled.contains(v));
        }
        assert!(!filled.contains('{'));
    }

    #[test]
    fn toml_override_replaces_defaults() {
        let cfg: PromptConfig = toml::from_str(
            r#"
            [prompts]
            plan_system = "sys"
            plan_user_template = "{topic}"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.prompts.plan_system, "sys");
        assert_eq!(cfg.prompts.plan_user_template, "{topic}");
    }
}
