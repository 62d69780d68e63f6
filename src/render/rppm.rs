//! RPPM view: identity table, identification + design table, lesson steps,
//! and assessment, as one formal bordered document.

use super::{dyn_or, dyn_text};
use crate::domain::{selected_dpl_labels, LessonPlan, SubFase, UserInput};

pub(super) fn body(input: &UserInput, plan: &LessonPlan) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="doc-title">Rencana Program Pembelajaran Mendalam</div>"#);

    // Identity table
    out.push_str(&format!(
        r#"<table class="doc"><tbody>
<tr><td class="head" style="width:150px">Nama Sekolah</td><td>: {school}</td><td class="head" style="width:150px">Kelas / Fase</td><td>: {class}</td></tr>
<tr><td class="head">Nama Guru</td><td>: {teacher}</td><td class="head">Mata Pelajaran</td><td>: {subject}</td></tr>
<tr><td class="head">Topik</td><td>: {topic}</td><td class="head">Waktu</td><td>: {date}</td></tr>
</tbody></table>"#,
        school = dyn_text(&input.school_name),
        class = dyn_text(&input.class_name),
        teacher = dyn_text(&input.teacher_name),
        subject = dyn_text(&input.subject),
        topic = dyn_text(&input.topic),
        date = dyn_or(&input.date, "-"),
    ));

    // Identification + design
    let ident = &plan.identifikasi;
    let desain = &plan.desain_pembelajaran;
    out.push_str(&format!(
        r#"<table class="doc"><tbody>
<tr><td rowspan="3" class="section" style="width:150px">Identifikasi</td>
<td style="background:#f9fafb"><strong>Murid:</strong> {murid}</td></tr>
<tr><td><strong>Materi Pelajaran:</strong> {materi}</td></tr>
<tr><td><strong>Dimensi Profil Lulusan:</strong><div class="dpl-list">{dpl}</div></td></tr>
<tr><td rowspan="9" class="section">Desain Pembelajaran</td>
<td><strong>Capaian Pembelajaran:</strong> {capaian}</td></tr>
<tr><td><strong>Lintas Disiplin Ilmu:</strong> {lintas}</td></tr>
<tr><td><strong>Tujuan Pembelajaran:</strong> {tujuan}</td></tr>
<tr><td><strong>Topik Pembelajaran:</strong> {topik}</td></tr>
<tr><td style="background:#fffbeb"><strong>Pertanyaan Pemantik:</strong> {pemantik}</td></tr>
<tr><td><strong>Praktik Pedagogis:</strong> {praktik}</td></tr>
<tr><td><strong>Kemitraan Pembelajaran:</strong> {kemitraan}</td></tr>
<tr><td><strong>Lingkungan Pembelajaran:</strong> {lingkungan}</td></tr>
<tr><td><strong>Pemanfaatan Digital:</strong> {digital}</td></tr>
</tbody></table>"#,
        murid = dyn_text(&ident.peserta_didik),
        materi = dyn_text(&ident.materi_pelajaran),
        dpl = dpl_list(&ident.dimensi_profil_lulusan),
        capaian = dyn_text(&desain.capaian_pembelajaran),
        lintas = dyn_text(&desain.lintas_disiplin_ilmu),
        tujuan = dyn_text(&desain.tujuan_pembelajaran),
        topik = dyn_text(&desain.topik_pembelajaran),
        pemantik = dyn_text(&desain.pertanyaan_pemantik),
        praktik = dyn_text(&desain.praktik_pedagogis),
        kemitraan = dyn_text(&desain.kemitraan_pembelajaran),
        lingkungan = dyn_text(&desain.lingkungan_pembelajaran),
        digital = dyn_text(&desain.pemanfaatan_digital),
    ));

    // Lesson steps
    let langkah = &plan.langkah_pembelajaran;
    out.push_str(&format!(
        r#"<table class="doc">
<thead><tr><th colspan="2" class="section">Langkah-Langkah Pembelajaran</th></tr></thead>
<tbody>
<tr><td rowspan="3" class="section" style="width:150px">Pengalaman Belajar</td>
<td class="phase"><strong>AWAL ({awal_prinsip})</strong><p style="margin:4px 0 0 0">{awal_kegiatan}</p></td></tr>
<tr><td style="padding:0">
<table class="plain"><tbody>
<tr><td class="inti-head" style="border-bottom:1px solid black;padding:6px">INTI</td></tr>
<tr><td style="border-bottom:1px solid black;padding:6px">{memahami}</td></tr>
<tr><td style="border-bottom:1px solid black;padding:6px">{mengaplikasi}</td></tr>
<tr><td style="padding:6px">{merefleksi}</td></tr>
</tbody></table>
</td></tr>
<tr><td class="phase"><strong>PENUTUP ({penutup_prinsip})</strong><p style="margin:4px 0 0 0">{penutup_kegiatan}</p></td></tr>
</tbody></table>"#,
        awal_prinsip = dyn_text(&langkah.awal.prinsip),
        awal_kegiatan = dyn_text(&langkah.awal.kegiatan),
        memahami = sub_phase("Memahami", &langkah.inti.memahami),
        mengaplikasi = sub_phase("Mengaplikasi", &langkah.inti.mengaplikasi),
        merefleksi = sub_phase("Merefleksi", &langkah.inti.merefleksi),
        penutup_prinsip = dyn_text(&langkah.penutup.prinsip),
        penutup_kegiatan = dyn_text(&langkah.penutup.kegiatan),
    ));

    // Assessment
    let asesmen = &plan.asesmen_pembelajaran;
    out.push_str(&format!(
        r#"<table class="doc"><tbody>
<tr><td rowspan="3" class="section" style="width:150px">Asesmen Pembelajaran</td>
<td style="width:35%"><strong>Asesmen pada Awal Pembelajaran:</strong><p style="margin:4px 0 0 0">{awal}</p></td>
<td rowspan="3" class="note" style="background:#f9fafb;text-align:justify;vertical-align:middle">Asesmen dalam pembelajaran mendalam disesuaikan dengan assessment as learning, assessment for learning, dan assessment of learning. Metode yang digunakan bersifat komprehensif untuk mengukur pencapaian kompetensi murid.</td></tr>
<tr><td><strong>Asesmen pada Proses Pembelajaran:</strong><p style="margin:4px 0 0 0">{proses}</p></td></tr>
<tr><td><strong>Asesmen pada Akhir Pembelajaran:</strong><p style="margin:4px 0 0 0">{akhir}</p></td></tr>
</tbody></table>"#,
        awal = dyn_text(&asesmen.awal),
        proses = dyn_text(&asesmen.proses),
        akhir = dyn_text(&asesmen.akhir),
    ));

    out
}

/// Bulleted DPL labels in fixed table order, or the italic placeholder.
fn dpl_list(codes: &[String]) -> String {
    let labels = selected_dpl_labels(codes);
    if labels.is_empty() {
        return r#"<span class="note">- Tidak ada dimensi spesifik terpilih -</span>"#.into();
    }
    labels
        .iter()
        .map(|l| format!("<div>\u{2022} {}</div>", l))
        .collect()
}

fn sub_phase(name: &str, fase: &SubFase) -> String {
    let items: String = fase
        .kegiatan
        .iter()
        .map(|k| format!("<li>{}</li>", dyn_text(k)))
        .collect();
    format!(
        r#"<strong>{name} ({prinsip}):</strong><ol class="kegiatan">{items}</ol>"#,
        prinsip = dyn_text(&fase.prinsip),
    )
}
