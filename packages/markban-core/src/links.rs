/// Link detection in card text.
///
/// Inline `[label](url)` links come first, in document order, followed by
/// bare `http(s)://` URLs that were not already the target of an inline link.
use regex::Regex;
use std::sync::LazyLock;

use crate::types::CardLink;

static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]+)\]\(([^()]+)\)").unwrap());

static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s()\[\]<>]+").unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

pub fn extract_links(text: &str) -> Vec<CardLink> {
    let mut links: Vec<CardLink> = INLINE_LINK_RE
        .captures_iter(text)
        .map(|caps| CardLink {
            display_text: caps[1].to_string(),
            target_url: caps[2].to_string(),
        })
        .collect();
    let inline_count = links.len();

    for m in BARE_URL_RE.find_iter(text) {
        // No look-behind in `regex`: skip the url half of `[label](url)`.
        if text[..m.start()].ends_with('(') {
            continue;
        }
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if links[..inline_count].iter().any(|l| l.target_url == url) {
            continue;
        }
        links.push(CardLink {
            display_text: url.to_string(),
            target_url: url.to_string(),
        });
    }

    links
}
