//! Modul Ajar view: general info and core components, with banner rows
//! for the long-form material and its video search link.

use super::dyn_text;
use crate::domain::LessonPlan;
use crate::util::youtube_search_url;

pub(super) fn body(plan: &LessonPlan) -> String {
    let umum = &plan.modul_ajar.informasi_umum;
    let inti = &plan.modul_ajar.komponen_inti;
    let video_url = youtube_search_url(&inti.link_video_materi);

    format!(
        r#"<div class="double-rule"><h1>MODUL AJAR</h1></div>
<table class="doc">
<thead><tr><th colspan="2" class="banner">A. INFORMASI UMUM</th></tr></thead>
<tbody>
<tr><td class="label">Identitas Sekolah</td><td class="value">{identitas}</td></tr>
<tr><td class="label">Kompetensi Awal</td><td class="value">{kompetensi}</td></tr>
<tr><td class="label">Dimensi Profil Lulusan</td><td class="value">{dpl}</td></tr>
</tbody></table>
<br>
<table class="doc">
<thead><tr><th colspan="2" class="banner">B. KOMPONEN INTI</th></tr></thead>
<tbody>
<tr><td class="label">Tujuan Pembelajaran</td><td class="value">{tujuan}</td></tr>
<tr><td class="label">Pertanyaan Pemantik</td><td class="value">{pemantik}</td></tr>
<tr><td colspan="2" style="background:#eff6ff;font-weight:bold;text-align:center">URAIAN MATERI PEMBELAJARAN</td></tr>
<tr><td colspan="2" class="prewrap" style="padding:15px">{materi}</td></tr>
<tr><td colspan="2" style="background:#fdf2f8;font-weight:bold;text-align:center;color:#be123c">VIDEO PEMBELAJARAN</td></tr>
<tr><td colspan="2" style="text-align:center;padding:10px"><a href="{url}" target="_blank" rel="noopener noreferrer" style="color:blue;text-decoration:underline;font-weight:bold">{url}</a></td></tr>
<tr><td class="label">Glosarium</td><td class="value">{glosarium}</td></tr>
<tr><td class="label">Daftar Pustaka</td><td class="value">{pustaka}</td></tr>
</tbody></table>"#,
        identitas = dyn_text(&umum.identitas_sekolah),
        kompetensi = dyn_text(&umum.kompetensi_awal),
        dpl = dyn_text(&umum.dimensi_profil_lulusan),
        tujuan = dyn_text(&inti.tujuan_pembelajaran),
        pemantik = dyn_text(&inti.pertanyaan_pemantik),
        materi = dyn_text(&inti.uraian_materi_detail),
        url = video_url,
        glosarium = dyn_text(&inti.glosarium),
        pustaka = dyn_text(&inti.daftar_pustaka),
    )
}
