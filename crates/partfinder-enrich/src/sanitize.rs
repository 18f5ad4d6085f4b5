//! Best-effort reduction of raw HTML to something worth sending to the
//! extraction model. Pattern based; this is not an HTML parser.

use std::sync::LazyLock;

use regex::Regex;

static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid body regex"));
static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script regex")
});
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

/// Truncates `html` to at most `max_bytes` and strips script blocks, style
/// blocks and comments.
///
/// Oversized pages keep the inside of `<body>` when one can be found, else a
/// raw prefix. Cuts always land on a UTF-8 character boundary.
#[must_use]
pub fn prepare_page(html: &str, max_bytes: usize) -> String {
    let bounded = if html.len() > max_bytes {
        let region = BODY_RE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map_or(html, |m| m.as_str());
        truncate_at_char_boundary(region, max_bytes)
    } else {
        html
    };

    let cleaned = SCRIPT_RE.replace_all(bounded, "");
    let cleaned = STYLE_RE.replace_all(&cleaned, "");
    COMMENT_RE.replace_all(&cleaned, "").into_owned()
}

fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
