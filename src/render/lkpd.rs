//! LKM worksheet view: interactive multiple-choice rows, numeracy scratch
//! areas, and a toggleable answer key. Selections and scratch text are
//! client-side state only and are never submitted anywhere.

use super::{dyn_or, dyn_text};
use crate::domain::{LessonPlan, MultipleChoiceQuestion, NumeracyQuestion, UserInput};
use crate::util::youtube_search_url;

pub(super) fn body(input: &UserInput, plan: &LessonPlan) -> String {
    let lkpd = &plan.lkpd;
    let mut out = String::new();

    out.push_str(&format!(
        r#"<div class="double-rule"><h1>Lembar Kerja Murid (LKM)</h1><h2>{judul}</h2></div>"#,
        judul = dyn_text(&lkpd.judul),
    ));

    // Name/date header, dotted lines where values are absent.
    out.push_str(&format!(
        r#"<table class="plain" style="margin-bottom:20px"><tbody>
<tr><td style="width:150px;font-weight:bold">Nama Guru</td><td>: {teacher}</td><td style="width:150px;font-weight:bold">Kelas</td><td>: {class}</td></tr>
<tr><td style="font-weight:bold">Nama Murid</td><td>: ...........................................................</td><td style="font-weight:bold">Tanggal</td><td>: {date}</td></tr>
</tbody></table>"#,
        teacher = dyn_text(&input.teacher_name),
        class = dyn_text(&input.class_name),
        date = dyn_or(&input.date, "..........................................................."),
    ));

    // First recommended video as a pre-work callout.
    if let Some(vid) = plan.video_rekomendasi.first() {
        let url = youtube_search_url(&vid.query_pencarian);
        out.push_str(&format!(
            r#"<table class="doc video-callout"><tbody>
<tr><td class="head">VIDEO PEMBELAJARAN</td></tr>
<tr><td><p style="margin:0 0 5px 0">Simak video berikut sebelum mengerjakan soal:</p>
<a href="{url}" target="_blank" rel="noreferrer" style="color:blue;text-decoration:underline;font-weight:bold">{judul} (Klik Disini)</a>
<div style="font-size:10pt;color:#666;margin-top:5px">Atau salin link: <em>{url}</em></div></td></tr>
</tbody></table>"#,
            judul = dyn_text(&vid.judul),
        ));
    }

    out.push_str(&format!(
        r#"<table class="doc"><tbody>
<tr><td class="head">RINGKASAN MATERI</td></tr>
<tr><td class="prewrap">{materi}</td></tr>
</tbody></table>
<br>
<table class="doc"><tbody>
<tr><td class="head">PETUNJUK PENGERJAAN</td></tr>
<tr><td class="prewrap">{petunjuk}</td></tr>
</tbody></table>
<br>"#,
        materi = dyn_or(&lkpd.materi_singkat, "Ringkasan materi akan muncul di sini..."),
        petunjuk = dyn_text(&lkpd.petunjuk_umum),
    ));

    // A. Multiple choice
    out.push_str(&format!(
        r#"<table class="doc">
<thead>
<tr><th colspan="2" class="banner">A. Soal Pilihan Ganda ({n} Soal)</th></tr>
<tr><th class="head qno">No</th><th class="head">Pertanyaan dan Pilihan Jawaban</th></tr>
</thead>
<tbody>"#,
        n = lkpd.soal_pilihan_ganda.len(),
    ));
    for (idx, q) in lkpd.soal_pilihan_ganda.iter().enumerate() {
        out.push_str(&mcq_row(idx, q));
    }
    out.push_str("</tbody></table><br>");

    // B. Numeracy
    out.push_str(
        r#"<table class="doc">
<thead>
<tr><th colspan="2" class="banner">B. Soal Numerasi (HOTS - C3, C4, C5)</th></tr>
<tr><th class="head qno">No</th><th class="head">Pertanyaan dan Jawaban</th></tr>
</thead>
<tbody>"#,
    );
    for (idx, q) in lkpd.soal_numerasi.iter().enumerate() {
        out.push_str(&numeracy_row(idx, q));
    }
    out.push_str("</tbody></table>");

    out.push_str(&format!(
        r#"<table class="doc" style="margin-top:20px">
<thead><tr><th class="head">RUBRIK PENILAIAN</th></tr></thead>
<tbody><tr><td class="note" style="padding:10px">{rubrik}</td></tr></tbody>
</table>"#,
        rubrik = dyn_text(&lkpd.rubrik_penilaian),
    ));

    out
}

fn mcq_row(idx: usize, q: &MultipleChoiceQuestion) -> String {
    let mut options = String::new();
    for (opt_idx, opt) in q.pilihan.iter().enumerate() {
        let letter = option_letter(opt_idx);
        let is_key = q.kunci.trim() == letter;
        let class = if is_key { "opt key" } else { "opt" };
        options.push_str(&format!(
            r#"<div class="{class}" data-q="{idx}" data-opt="{letter}">
<span class="glyph"><span class="glyph-mark">&#9675;</span> {letter}.</span>
<span>{text}</span>
</div>"#,
            text = dyn_text(strip_option_prefix(opt)),
        ));
    }
    format!(
        r#"<tr class="question-row"><td class="qno">{no}</td><td>
<div style="margin-bottom:8px;font-weight:bold">{pertanyaan}<span class="answer-meta">{level} - {sulit}</span></div>
<div style="padding-left:10px">{options}</div>
<div class="answer-key">Kunci: {kunci}</div>
</td></tr>"#,
        no = idx + 1,
        pertanyaan = dyn_text(&q.pertanyaan),
        level = dyn_text(&q.level_kognitif),
        sulit = dyn_text(&q.tingkat_kesulitan),
        kunci = dyn_text(&q.kunci),
    )
}

fn numeracy_row(idx: usize, q: &NumeracyQuestion) -> String {
    format!(
        r#"<tr class="question-row"><td class="qno">{no}</td><td>
<div style="margin-bottom:10px">{pertanyaan}<div style="margin-top:4px"><span class="answer-meta num">{level} - {sulit}</span></div></div>
<textarea class="jawaban" data-q="{idx}" placeholder="Tulis jawaban Anda di sini..."></textarea>
<div class="answer-key num"><span class="kunci-label">Kunci &amp; Pembahasan:</span><div style="margin-top:2px">{kunci}</div></div>
</td></tr>"#,
        no = idx + 1,
        pertanyaan = dyn_text(&q.pertanyaan),
        level = dyn_text(&q.level_kognitif),
        sulit = dyn_text(&q.tingkat_kesulitan),
        kunci = dyn_text(&q.kunci),
    )
}

fn option_letter(idx: usize) -> &'static str {
    const LETTERS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];
    LETTERS.get(idx).copied().unwrap_or("?")
}

/// The model sometimes prefixes option text with its own letter ("A. ...");
/// drop it so letters are not doubled.
fn strip_option_prefix(opt: &str) -> &str {
    let bytes = opt.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_uppercase() && bytes[0] <= b'E' && bytes[1] == b'.' {
        opt[2..].trim_start()
    } else {
        opt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_prefix_is_stripped_once() {
        assert_eq!(strip_option_prefix("A. Joule"), "Joule");
        assert_eq!(strip_option_prefix("Joule"), "Joule");
        assert_eq!(strip_option_prefix("B.Newton"), "Newton");
        // Lowercase / out-of-range letters stay.
        assert_eq!(strip_option_prefix("f. lain"), "f. lain");
    }

    #[test]
    fn option_letters_follow_index() {
        assert_eq!(option_letter(0), "A");
        assert_eq!(option_letter(4), "E");
        assert_eq!(option_letter(99), "?");
    }
}
