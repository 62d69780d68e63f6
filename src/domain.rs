//! Domain models: the teacher's form input, the generated plan structure,
//! and the fixed graduate-profile-dimension (DPL) table.
//!
//! The plan structs mirror the wire schema field-for-field and are
//! deserialized strictly: no `#[serde(default)]` anywhere, so a payload
//! missing any field fails at the boundary instead of surfacing as a
//! rendering-time hole.

use serde::{Deserialize, Serialize};

/// Metadata collected from the form. Immutable once submitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub teacher_name: String,
    pub teacher_nip: String,
    pub principal_name: String,
    pub principal_nip: String,
    pub school_name: String,
    pub class_name: String,
    pub subject: String,
    pub topic: String,
    pub date: String,
}

impl UserInput {
    /// Names of required fields that are empty (whitespace-only counts).
    /// Submission must be rejected unless this is empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.teacher_name.trim().is_empty() {
            missing.push("teacherName");
        }
        if self.school_name.trim().is_empty() {
            missing.push("schoolName");
        }
        if self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.topic.trim().is_empty() {
            missing.push("topic");
        }
        missing
    }
}

/// One entry of the fixed 8-item DPL table.
pub struct Dpl {
    pub code: &'static str,
    pub label: &'static str,
}

/// Fixed DPL table in canonical display order. Rendering filters this
/// table by the plan's selected codes, so output order follows this
/// table, never the response's order.
pub const DPL_TABLE: [Dpl; 8] = [
    Dpl { code: "DPL1", label: "Keimanan dan Ketakwaan terhadap Tuhan YME" },
    Dpl { code: "DPL3", label: "Penalaran Kritis" },
    Dpl { code: "DPL5", label: "Kolaborasi" },
    Dpl { code: "DPL7", label: "Kesehatan" },
    Dpl { code: "DPL2", label: "Kewargaan" },
    Dpl { code: "DPL4", label: "Kreativitas" },
    Dpl { code: "DPL6", label: "Kemandirian" },
    Dpl { code: "DPL8", label: "Komunikasi" },
];

/// Selects DPL labels for a set of codes, preserving the fixed table order.
pub fn selected_dpl_labels(codes: &[String]) -> Vec<&'static str> {
    DPL_TABLE
        .iter()
        .filter(|d| codes.iter().any(|c| c == d.code))
        .map(|d| d.label)
        .collect()
}

// --- Generated plan structure (Indonesian wire field names) ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonPlan {
    pub identifikasi: Identifikasi,
    pub desain_pembelajaran: DesainPembelajaran,
    pub langkah_pembelajaran: LangkahPembelajaran,
    pub asesmen_pembelajaran: AsesmenPembelajaran,
    pub modul_ajar: ModulAjar,
    pub lkpd: Lkpd,
    pub video_rekomendasi: Vec<VideoRecommendation>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identifikasi {
    pub peserta_didik: String,
    pub materi_pelajaran: String,
    pub dimensi_profil_lulusan: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DesainPembelajaran {
    pub capaian_pembelajaran: String,
    pub lintas_disiplin_ilmu: String,
    pub tujuan_pembelajaran: String,
    pub topik_pembelajaran: String,
    pub pertanyaan_pemantik: String,
    pub praktik_pedagogis: String,
    pub kemitraan_pembelajaran: String,
    pub lingkungan_pembelajaran: String,
    pub pemanfaatan_digital: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LangkahPembelajaran {
    pub awal: FaseTunggal,
    pub inti: FaseInti,
    pub penutup: FaseTunggal,
}

/// Opening/closing phase: one principle, one activity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaseTunggal {
    pub prinsip: String,
    pub kegiatan: String,
}

/// Core phase: three named sub-phases, each with an ordered activity list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaseInti {
    pub memahami: SubFase,
    pub mengaplikasi: SubFase,
    pub merefleksi: SubFase,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubFase {
    pub prinsip: String,
    pub kegiatan: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AsesmenPembelajaran {
    pub awal: String,
    pub proses: String,
    pub akhir: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModulAjar {
    pub informasi_umum: InformasiUmum,
    pub komponen_inti: KomponenInti,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InformasiUmum {
    pub identitas_sekolah: String,
    pub kompetensi_awal: String,
    pub dimensi_profil_lulusan: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KomponenInti {
    pub tujuan_pembelajaran: String,
    pub pertanyaan_pemantik: String,
    pub uraian_materi_detail: String,
    pub link_video_materi: String,
    pub glosarium: String,
    pub daftar_pustaka: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lkpd {
    pub judul: String,
    pub materi_singkat: String,
    pub petunjuk_umum: String,
    pub soal_pilihan_ganda: Vec<MultipleChoiceQuestion>,
    pub soal_numerasi: Vec<NumeracyQuestion>,
    pub rubrik_penilaian: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub pertanyaan: String,
    pub pilihan: Vec<String>,
    /// Correct option letter ("A".."E").
    pub kunci: String,
    /// Bloom level tag, e.g. "C4 (Menganalisis)".
    pub level_kognitif: String,
    /// "Mudah", "Sedang", or "Sulit".
    pub tingkat_kesulitan: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NumeracyQuestion {
    pub pertanyaan: String,
    pub kunci: String,
    pub level_kognitif: String,
    pub tingkat_kesulitan: String,
}

/// One recommended video: the model produces a search query, never a URL.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoRecommendation {
    pub judul: String,
    pub deskripsi: String,
    pub query_pencarian: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> UserInput {
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

    #[test]
    fn complete_required_fields_pass() {
        assert!(input().missing_required().is_empty());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut i = input();
        i.subject = "   ".into();
        i.topic = String::new();
        assert_eq!(i.missing_required(), vec!["subject", "topic"]);
    }

    #[test]
    fn dpl_selection_follows_table_order() {
        let codes = vec!["DPL5".to_string(), "DPL1".to_string()];
        let labels = selected_dpl_labels(&codes);
        assert_eq!(
            labels,
            vec!["Keimanan dan Ketakwaan terhadap Tuhan YME", "Kolaborasi"]
        );
    }

    #[test]
    fn dpl_selection_empty_yields_no_labels() {
        assert!(selected_dpl_labels(&[]).is_empty());
    }

    #[test]
    fn video_recommendation_parses_all_fields() {
        let v: VideoRecommendation = serde_json::from_value(serde_json::json!({
            "judul": "Animasi Energi",
            "deskripsi": "Kartun edukasi",
            "query_pencarian": "Animasi Pembelajaran Energi"
        }))
        .unwrap();
        assert_eq!(v.query_pencarian, "Animasi Pembelajaran Energi");

        // No defaults: a missing field is rejected.
        assert!(serde_json::from_value::<VideoRecommendation>(serde_json::json!({
            "judul": "x", "deskripsi": "y"
        }))
        .is_err());
    }

    #[test]
    fn plan_rejects_missing_fields() {
        // identifikasi.materi_pelajaran deliberately absent.
        let payload = serde_json::json!({
            "identifikasi": { "peserta_didik": "x", "dimensi_profil_lulusan": [] }
        });
        assert!(serde_json::from_value::<LessonPlan>(payload).is_err());
    }
}
