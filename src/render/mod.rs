//! Server-rendered document views.
//!
//! Each view is a self-contained HTML page laid out as a sequence of
//! bordered tables mimicking a formal printed document, with two export
//! paths: the browser print dialog (landscape, chrome hidden, exact
//! colors) and a rich-clipboard copy that preserves table structure when
//! pasted into a word processor.
//!
//! Every dynamic value goes through `dyn_text`: markdown artifacts are
//! stripped first, then the result is HTML-escaped.

use uuid::Uuid;

use crate::domain::UserInput;
use crate::state::PlanSession;
use crate::util::{clean_text, html_escape};

mod lkpd;
mod media;
mod modul;
mod rppm;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Rppm,
    Modul,
    Lkpd,
    Media,
}

impl Tab {
    pub fn slug(self) -> &'static str {
        match self {
            Tab::Rppm => "rppm",
            Tab::Modul => "modul",
            Tab::Lkpd => "lkpd",
            Tab::Media => "media",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Rppm => "RPPM",
            Tab::Modul => "Modul Ajar",
            Tab::Lkpd => "LKM",
            Tab::Media => "Video Animasi",
        }
    }
}

/// Cleaned and escaped dynamic text.
fn dyn_text(s: &str) -> String {
    html_escape(&clean_text(s))
}

/// Cleaned dynamic text, or a fallback when the value is empty.
fn dyn_or(s: &str, fallback: &str) -> String {
    let t = dyn_text(s);
    if t.trim().is_empty() {
        fallback.to_string()
    } else {
        t
    }
}

/// Render one of the four views over a stored session.
pub fn render_page(id: Uuid, tab: Tab, session: &PlanSession) -> String {
    let body = match tab {
        Tab::Rppm => wrap_printable(rppm::body(&session.input, &session.plan), &session.input),
        Tab::Modul => wrap_printable(modul::body(&session.plan), &session.input),
        Tab::Lkpd => wrap_printable(lkpd::body(&session.input, &session.plan), &session.input),
        Tab::Media => media::body(&session.input, &session.plan),
    };
    page_shell(id, tab, &body)
}

/// Documents (not the media cards) share the printable container and the
/// side-by-side signature block.
fn wrap_printable(inner: String, input: &UserInput) -> String {
    format!(
        r#"<div id="printable-area">{}{}</div>"#,
        inner,
        signature_block(input)
    )
}

fn signature_block(input: &UserInput) -> String {
    let principal = dyn_or(&input.principal_name, "..............................");
    let principal_nip = dyn_or(&input.principal_nip, "....................");
    let teacher = dyn_text(&input.teacher_name);
    let teacher_nip = dyn_or(&input.teacher_nip, "....................");
    let date = dyn_or(&input.date, "........................");
    format!(
        r#"<div class="signature">
<table class="plain"><tbody><tr>
<td class="sign-cell">Mengetahui,<br>Kepala Sekolah<div class="sign-space"></div><strong>{principal}</strong><br>NIP. {principal_nip}</td>
<td class="sign-cell">{date}<br>Guru Mata Pelajaran<div class="sign-space"></div><strong>{teacher}</strong><br>NIP. {teacher_nip}</td>
</tr></tbody></table>
</div>"#
    )
}

fn tab_bar(id: Uuid, active: Tab) -> String {
    let mut out = String::from(r#"<nav class="tabs">"#);
    for tab in [Tab::Rppm, Tab::Modul, Tab::Lkpd, Tab::Media] {
        let class = if tab == active { "tab active" } else { "tab" };
        out.push_str(&format!(
            r#"<a class="{class}" href="/plan/{id}/{slug}">{label}</a>"#,
            slug = tab.slug(),
            label = tab.label(),
        ));
    }
    out.push_str("</nav>");
    out
}

fn page_shell(id: Uuid, tab: Tab, body: &str) -> String {
    let answers_button = if tab == Tab::Lkpd {
        r#"<button id="toggle-answers" type="button">Tampilkan Jawaban</button>"#
    } else {
        ""
    };
    let export_buttons = if tab != Tab::Media {
        r#"<button id="copy-doc" type="button">Salin ke Word</button><button id="print-doc" type="button">Salin ke PDF</button>"#
    } else {
        ""
    };
    format!(
        r##"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Auto-RPPM · {label}</title>
<style>{css}</style>
</head>
<body data-plan-id="{id}">
<div class="toolbar no-print">
<a id="back-btn" href="#">&larr; Kembali</a>
{tabs}
<div class="actions">{answers_button}{export_buttons}</div>
</div>
{body}
<script>{js}</script>
</body>
</html>"##,
        label = tab.label(),
        tabs = tab_bar(id, tab),
        css = PAGE_CSS,
        js = PAGE_JS,
    )
}

const PAGE_CSS: &str = r#"
body { font-family: "Times New Roman", Times, serif; font-size: 12pt; line-height: 1.4; color: black; margin: 0; background: #eef2f7; }
.toolbar { font-family: system-ui, sans-serif; display: flex; justify-content: space-between; align-items: center; gap: 12px; padding: 10px 16px; background: white; border-bottom: 1px solid #d1d5db; flex-wrap: wrap; }
.toolbar a { color: #374151; text-decoration: none; }
.tabs { display: flex; gap: 4px; background: #e5e7eb; padding: 4px; border-radius: 8px; }
.tab { padding: 6px 14px; border-radius: 6px; font-size: 10pt; }
.tab.active { background: white; color: #1e40af; font-weight: 600; }
.actions button { margin-left: 6px; padding: 7px 14px; border: none; border-radius: 6px; background: #1d4ed8; color: white; font-size: 10pt; cursor: pointer; }
.actions button#print-doc { background: #dc2626; }
.actions button#toggle-answers { background: #4b5563; }
body.show-answers .actions button#toggle-answers { background: #16a34a; }
#printable-area { background: white; max-width: 297mm; margin: 16px auto; padding: 1cm; box-shadow: 0 2px 12px rgba(0,0,0,.15); min-height: 210mm; }
table.doc { width: 100%; border-collapse: collapse; border: 1px solid black; margin-bottom: 20px; font-size: 12pt; }
table.doc td, table.doc th { border: 1px solid black; padding: 8px; vertical-align: top; text-align: left; }
table.doc th.section, table.doc td.section { background: #1d4ed8; color: white; font-weight: bold; text-align: center; vertical-align: middle; }
table.doc th.banner { background: black; color: white; text-transform: uppercase; text-align: center; }
table.doc td.label { width: 30%; font-weight: bold; background: #f9fafb; }
table.doc td.value { width: 70%; background: white; }
table.doc th.head, table.doc td.head { font-weight: bold; background: #f0f0f0; }
table.plain { width: 100%; border-collapse: collapse; border: none; }
table.plain td { border: none; padding: 4px; }
.doc-title { text-align: center; font-weight: bold; font-size: 14pt; margin-bottom: 15px; text-transform: uppercase; }
.double-rule { border-bottom: 3px double black; margin-bottom: 20px; padding-bottom: 10px; text-align: center; }
.double-rule h1 { font-weight: bold; font-size: 14pt; text-transform: uppercase; margin: 0; }
.double-rule h2 { font-weight: bold; font-size: 12pt; margin: 5px 0 0 0; }
.prewrap { white-space: pre-line; text-align: justify; }
.note { font-style: italic; color: #666; }
.dpl-list { margin-top: 4px; padding-left: 8px; }
.dpl-list div { margin-bottom: 2px; }
ol.kegiatan { padding-left: 20px; margin: 4px 0; }
.phase { background: #eff6ff; }
.inti-head { background: #e5e7eb; font-weight: bold; text-align: center; }
.question-row { page-break-inside: avoid; }
.qno { text-align: center; font-weight: bold; width: 50px; }
.opt { display: flex; align-items: flex-start; margin-bottom: 4px; cursor: pointer; }
.opt .glyph { margin-right: 8px; min-width: 25px; }
.opt.selected { color: blue; font-weight: bold; }
body.show-answers .opt.selected { color: blue; font-weight: normal; }
body.show-answers .opt.key { color: red; font-weight: bold; }
.answer-meta { display: none; margin-left: 10px; font-size: 10pt; background: #e0e7ff; color: #3730a3; padding: 2px 6px; border-radius: 4px; }
.answer-meta.num { background: #fef3c7; color: #92400e; margin-left: 0; }
body.show-answers .answer-meta { display: inline-block; }
.answer-key { display: none; margin-top: 5px; color: red; font-weight: bold; font-size: 11pt; border-top: 1px dashed #ccc; padding-top: 4px; }
.answer-key.num { border: 1px dashed red; border-top: 1px dashed red; background: #fff5f5; padding: 8px; font-weight: normal; color: black; }
.answer-key.num .kunci-label { color: red; font-weight: bold; }
body.show-answers .answer-key { display: block; }
textarea.jawaban { width: 100%; min-height: 80px; padding: 8px; border: 1px solid #ccc; border-radius: 0; font-family: inherit; font-size: inherit; resize: vertical; background: #f9fafb; box-sizing: border-box; }
.video-callout { background: #fff5f5; }
.video-callout td.head { background: #fee2e2; color: #991b1b; }
.cards { background: white; max-width: 1100px; margin: 16px auto; padding: 24px; border-radius: 12px; box-shadow: 0 2px 12px rgba(0,0,0,.1); font-family: system-ui, sans-serif; }
.cards-header { border-bottom: 1px solid #e5e7eb; padding-bottom: 12px; margin-bottom: 20px; }
.cards-header h2 { margin: 0 0 4px 0; }
.cards-header p { margin: 0; color: #6b7280; font-size: 10pt; }
.card-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 20px; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; overflow: hidden; display: flex; flex-direction: column; }
.card .card-body { padding: 14px; flex-grow: 1; }
.card .badge { background: #dbeafe; color: #1e40af; font-size: 9pt; padding: 2px 8px; border-radius: 4px; font-weight: 600; }
.card h3 { margin: 8px 0; color: #1e3a8a; font-size: 12pt; }
.card p { color: #4b5563; font-size: 10pt; margin: 0; }
.card .card-foot { padding: 14px; background: #f9fafb; border-top: 1px solid #e5e7eb; }
.card a.watch { display: block; background: #dc2626; color: white; text-align: center; padding: 8px; border-radius: 6px; text-decoration: none; font-size: 10pt; }
.card .raw-link { font-family: monospace; font-size: 8pt; color: #2563eb; background: white; border: 1px solid #e5e7eb; border-radius: 4px; padding: 6px; margin-top: 8px; word-break: break-all; user-select: all; }
.signature { break-inside: avoid; margin-top: 40px; }
.sign-cell { width: 50%; text-align: center; vertical-align: top; padding: 10px; }
.sign-space { height: 80px; }
@media print {
  @page { size: landscape; margin: 0; }
  body * { visibility: hidden; }
  #printable-area, #printable-area * { visibility: visible; }
  #printable-area { position: absolute; left: 0; top: 0; width: 100%; margin: 0 !important; padding: 1cm !important; box-shadow: none !important; border: none !important; background: white; }
  html, body { height: auto !important; overflow: visible !important; background: white !important; }
  * { -webkit-print-color-adjust: exact !important; print-color-adjust: exact !important; }
}
"#;

const PAGE_JS: &str = r#"
(function () {
  var planId = document.body.getAttribute('data-plan-id');

  var back = document.getElementById('back-btn');
  if (back) back.addEventListener('click', function (e) {
    e.preventDefault();
    fetch('/api/v1/plan/' + planId, { method: 'DELETE' })
      .catch(function () {})
      .then(function () { window.location.href = '/'; });
  });

  var printBtn = document.getElementById('print-doc');
  if (printBtn) printBtn.addEventListener('click', function () { window.print(); });

  var toggle = document.getElementById('toggle-answers');
  if (toggle) toggle.addEventListener('click', function () {
    var shown = document.body.classList.toggle('show-answers');
    toggle.textContent = shown ? 'Sembunyikan Jawaban' : 'Tampilkan Jawaban';
  });

  // Visual-only option marking; the recorded choice never affects grading
  // and is left untouched by the answer toggle.
  document.querySelectorAll('.opt').forEach(function (opt) {
    opt.addEventListener('click', function () {
      var q = opt.getAttribute('data-q');
      document.querySelectorAll('.opt[data-q="' + q + '"]').forEach(function (o) {
        o.classList.remove('selected');
        o.querySelector('.glyph-mark').textContent = '○';
      });
      opt.classList.add('selected');
      opt.querySelector('.glyph-mark').textContent = '◉';
    });
  });

  var copyBtn = document.getElementById('copy-doc');
  if (copyBtn) copyBtn.addEventListener('click', function () {
    var content = document.getElementById('printable-area');
    if (!content) { alert('Konten tidak ditemukan!'); return; }

    // Inline scratch answers so they survive the paste; placeholders are
    // suppressed for the duration of the copy.
    var textareas = content.querySelectorAll('textarea');
    textareas.forEach(function (ta) {
      ta.setAttribute('data-placeholder', ta.placeholder);
      ta.placeholder = '';
      ta.innerHTML = ta.value;
    });

    var range = document.createRange();
    range.selectNode(content);
    var selection = window.getSelection();
    if (selection) {
      selection.removeAllRanges();
      selection.addRange(range);
      try {
        var ok = document.execCommand('copy');
        if (ok) {
          alert('Berhasil disalin! Buka Microsoft Word dan Paste (Ctrl+V). Format tabel akan terjaga.');
        } else {
          alert('Gagal menyalin otomatis. Silakan seleksi manual (Ctrl+A pada area dokumen) dan copy.');
        }
      } catch (err) {
        alert('Browser tidak mendukung copy otomatis.');
      }
      selection.removeAllRanges();
    }

    textareas.forEach(function (ta) {
      ta.placeholder = ta.getAttribute('data-placeholder') || '';
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::*;

    fn fixture_input() -> UserInput {
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

    fn fixture_plan() -> LessonPlan {
        let sub = |p: &str| SubFase {
            prinsip: p.into(),
            kegiatan: vec!["Diskusi kelompok".into(), "Presentasi hasil".into()],
        };
        LessonPlan {
            identifikasi: Identifikasi {
                peserta_didik: "Murid kelas X beragam minat".into(),
                materi_pelajaran: "Energi dalam kehidupan sehari-hari".into(),
                dimensi_profil_lulusan: vec!["DPL5".into(), "DPL1".into()],
            },
            desain_pembelajaran: DesainPembelajaran {
                capaian_pembelajaran: "Memahami konsep energi".into(),
                lintas_disiplin_ilmu: "Matematika".into(),
                tujuan_pembelajaran: "Murid menganalisis bentuk energi".into(),
                topik_pembelajaran: "Energi".into(),
                pertanyaan_pemantik: "Dari mana listrik berasal?".into(),
                praktik_pedagogis: "Pembelajaran berbasis proyek".into(),
                kemitraan_pembelajaran: "Orang tua".into(),
                lingkungan_pembelajaran: "Kelas dan laboratorium".into(),
                pemanfaatan_digital: "Simulasi PhET".into(),
            },
            langkah_pembelajaran: LangkahPembelajaran {
                awal: FaseTunggal { prinsip: "Berkesadaran".into(), kegiatan: "Apersepsi".into() },
                inti: FaseInti {
                    memahami: sub("Memahami konsep"),
                    mengaplikasi: sub("Menerapkan"),
                    merefleksi: sub("Merefleksi"),
                },
                penutup: FaseTunggal { prinsip: "Bermakna".into(), kegiatan: "Kesimpulan".into() },
            },
            asesmen_pembelajaran: AsesmenPembelajaran {
                awal: "Pertanyaan diagnostik".into(),
                proses: "Observasi".into(),
                akhir: "Tes tertulis".into(),
            },
            modul_ajar: ModulAjar {
                informasi_umum: InformasiUmum {
                    identitas_sekolah: "SMAN 1".into(),
                    kompetensi_awal: "Konsep gaya".into(),
                    dimensi_profil_lulusan: "Kolaborasi dan keimanan".into(),
                },
                komponen_inti: KomponenInti {
                    tujuan_pembelajaran: "Menganalisis energi".into(),
                    pertanyaan_pemantik: "Mengapa bola jatuh?".into(),
                    uraian_materi_detail: "Energi adalah kemampuan melakukan usaha.".into(),
                    link_video_materi: "Animasi Pembelajaran Energi".into(),
                    glosarium: "Energi: kemampuan melakukan usaha".into(),
                    daftar_pustaka: "Buku Fisika Kelas X".into(),
                },
            },
            lkpd: Lkpd {
                judul: "LKM Energi".into(),
                materi_singkat: "Ringkasan energi".into(),
                petunjuk_umum: "Kerjakan mandiri".into(),
                soal_pilihan_ganda: vec![MultipleChoiceQuestion {
                    pertanyaan: "Satuan energi adalah?".into(),
                    pilihan: vec!["Joule".into(), "Newton".into(), "Watt".into(), "Pascal".into()],
                    kunci: "A".into(),
                    level_kognitif: "C1 (Mengingat)".into(),
                    tingkat_kesulitan: "Mudah".into(),
                }],
                soal_numerasi: vec![NumeracyQuestion {
                    pertanyaan: "Hitung energi kinetik benda 2 kg pada 3 m/s.".into(),
                    kunci: "9 Joule".into(),
                    level_kognitif: "C3 (Menerapkan)".into(),
                    tingkat_kesulitan: "Sedang".into(),
                }],
                rubrik_penilaian: "Setiap soal bernilai 5 poin.".into(),
            },
            video_rekomendasi: vec![VideoRecommendation {
                judul: "Animasi Energi".into(),
                deskripsi: "Kartun edukasi tentang energi".into(),
                query_pencarian: "Animasi Pembelajaran Energi".into(),
            }],
        }
    }

    fn session() -> PlanSession {
        PlanSession { input: fixture_input(), plan: fixture_plan() }
    }

    #[test]
    fn rppm_page_shows_subject_topic_and_dash_for_empty_date() {
        let page = render_page(Uuid::nil(), Tab::Rppm, &session());
        assert!(page.contains("Fisika"));
        assert!(page.contains("Energi"));
        assert!(page.contains(": -"));
    }

    #[test]
    fn dpl_codes_render_in_fixed_table_order() {
        let page = render_page(Uuid::nil(), Tab::Rppm, &session());
        let keimanan = page.find("Keimanan dan Ketakwaan").expect("DPL1 label");
        let kolaborasi = page.find("Kolaborasi</div>").expect("DPL5 label");
        assert!(keimanan < kolaborasi, "DPL1 must precede DPL5");
    }

    #[test]
    fn empty_dpl_selection_renders_placeholder_and_no_bullets() {
        let mut s = session();
        s.plan.identifikasi.dimensi_profil_lulusan.clear();
        let page = render_page(Uuid::nil(), Tab::Rppm, &s);
        assert!(page.contains("- Tidak ada dimensi spesifik terpilih -"));
        assert!(!page.contains("\u{2022} Keimanan"));
    }

    #[test]
    fn lkpd_page_marks_key_option_and_keeps_toggle_button() {
        let page = render_page(Uuid::nil(), Tab::Lkpd, &session());
        // Option A carries the key class; B does not.
        assert!(page.contains(r#"data-q="0" data-opt="A""#));
        assert!(page.contains(r#"class="opt key""#));
        assert!(page.contains("Tampilkan Jawaban"));
        assert!(page.contains("Kunci: A"));
        assert!(page.contains("Tulis jawaban Anda di sini..."));
    }

    #[test]
    fn media_page_links_to_encoded_search_url() {
        let page = render_page(Uuid::nil(), Tab::Media, &session());
        assert!(page
            .contains("https://www.youtube.com/results?search_query=Animasi%20Pembelajaran%20Energi"));
        // No export buttons and no signature block on the media tab.
        assert!(!page.contains("Salin ke Word"));
        assert!(!page.contains("Guru Mata Pelajaran"));
    }

    #[test]
    fn modul_page_carries_material_and_video_banners() {
        let page = render_page(Uuid::nil(), Tab::Modul, &session());
        assert!(page.contains("URAIAN MATERI PEMBELAJARAN"));
        assert!(page.contains("VIDEO PEMBELAJARAN"));
        assert!(page.contains("A. INFORMASI UMUM"));
        assert!(page.contains("B. KOMPONEN INTI"));
    }

    #[test]
    fn toolbar_carries_back_link_and_tab_bar() {
        let page = render_page(Uuid::nil(), Tab::Rppm, &session());
        assert!(page.contains(r##"<a id="back-btn" href="#">"##));
        for slug in ["rppm", "modul", "lkpd", "media"] {
            assert!(page.contains(&format!("/plan/{}/{}", Uuid::nil(), slug)));
        }
        assert!(page.contains("</html>"));
    }

    #[test]
    fn dynamic_text_is_cleaned_and_escaped() {
        let mut s = session();
        s.plan.lkpd.rubrik_penilaian = "**Rubrik** <b>nilai</b>".into();
        let page = render_page(Uuid::nil(), Tab::Lkpd, &s);
        assert!(page.contains("Rubrik &lt;b&gt;nilai&lt;/b&gt;"));
    }
}
