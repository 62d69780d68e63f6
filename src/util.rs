//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = tpl.to_string();
    for (k, v) in pairs {
        let needle = format!("{{{}}}", k);
        out = out.replace(&needle, v);
    }
    out
}

/// Strip stray markdown artifacts the model is told not to emit but
/// occasionally does anyway: `**`, `__`, `##`, and lone `*` / `#`.
/// A single underscore is legitimate text and survives.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '*' | '#' => {}
            '_' if chars.peek() == Some(&'_') => {
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Minimal HTML attribute/body escaping for server-rendered views.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// YouTube search-results URL for a model-produced search query.
/// We never resolve video ids; the model produces queries, not links.
pub fn youtube_search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}… ({} bytes total)", &s[..end], s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_markdown_artifacts() {
        assert_eq!(clean_text("**bold**"), "bold");
        assert_eq!(clean_text("## heading"), " heading");
        assert_eq!(clean_text("* item"), " item");
        assert_eq!(clean_text("__tegas__"), "tegas");
    }

    #[test]
    fn clean_text_leaves_ordinary_text_alone() {
        assert_eq!(clean_text("1. Energi kinetik (E = 1/2 mv^2)"), "1. Energi kinetik (E = 1/2 mv^2)");
        assert_eq!(clean_text("suhu_awal"), "suhu_awal");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn fill_template_replaces_all_keys() {
        let out = fill_template("{a} dan {b} dan {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x dan y dan x");
    }

    #[test]
    fn youtube_url_percent_encodes_query() {
        assert_eq!(
            youtube_search_url("Animasi Pembelajaran Energi"),
            "https://www.youtube.com/results?search_query=Animasi%20Pembelajaran%20Energi"
        );
    }

    #[test]
    fn html_escape_covers_special_chars() {
        assert_eq!(html_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
