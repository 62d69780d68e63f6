//! Video recommendation cards. Links are search-results URLs built from
//! the model's queries; no video ids are ever resolved.

use super::dyn_text;
use crate::domain::{LessonPlan, UserInput};
use crate::util::youtube_search_url;

pub(super) fn body(input: &UserInput, plan: &LessonPlan) -> String {
    let mut cards = String::new();
    for (idx, vid) in plan.video_rekomendasi.iter().enumerate() {
        let url = youtube_search_url(&vid.query_pencarian);
        cards.push_str(&format!(
            r#"<div class="card">
<div class="card-body">
<span class="badge">Animasi {no}</span>
<h3>{judul}</h3>
<p>{deskripsi}</p>
</div>
<div class="card-foot">
<a class="watch" href="{url}" target="_blank" rel="noopener noreferrer">Tonton di YouTube</a>
<p style="font-size:9pt;color:#6b7280;margin:8px 0 2px 0;font-weight:600">Link Video (Copy ke Word):</p>
<div class="raw-link">{url}</div>
</div>
</div>"#,
            no = idx + 1,
            judul = dyn_text(&vid.judul),
            deskripsi = dyn_text(&vid.deskripsi),
        ));
    }

    format!(
        r#"<div class="cards">
<div class="cards-header">
<h2>Rekomendasi Video Animasi</h2>
<p>Kartun edukasi &amp; animasi dipilih otomatis untuk topik: {topic}</p>
</div>
<div class="card-grid">{cards}</div>
</div>"#,
        topic = dyn_text(&input.topic),
    )
}
