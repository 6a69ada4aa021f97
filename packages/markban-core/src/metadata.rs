/// Inline metadata tokens embedded in card text.
///
///   #tag             any number, first-occurrence order, duplicates kept
///   @due(YYYY-MM-DD) first occurrence wins, digits not validated
///   !high|!medium|!low  first occurrence wins, case-insensitive
///
/// Every finder reports the byte span of its token (including the
/// whitespace in front of it) so callers can remove tokens with
/// `strip_spans` instead of editing the string in place.
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::types::Priority;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s+)#([\w-]+)").unwrap());

static DUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*@due\((\d{4}-\d{2}-\d{2})\)").unwrap());

static PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*!(high|medium|low)\b").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    pub span: Range<usize>,
    pub value: String,
}

/// Result of running all extractors over one line of card text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardMetadata {
    /// Input with every recognised token removed, trimmed.
    pub text: String,
    pub tags: Vec<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
}

pub fn find_tags(text: &str) -> Vec<TokenMatch> {
    TAG_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(TokenMatch {
                span: whole.range(),
                value: caps[1].to_string(),
            })
        })
        .collect()
}

pub fn find_due_date(text: &str) -> Option<TokenMatch> {
    let caps = DUE_RE.captures(text)?;
    Some(TokenMatch {
        span: caps.get(0)?.range(),
        value: caps[1].to_string(),
    })
}

pub fn find_priority(text: &str) -> Option<TokenMatch> {
    let caps = PRIORITY_RE.captures(text)?;
    Some(TokenMatch {
        span: caps.get(0)?.range(),
        value: caps[1].to_lowercase(),
    })
}

pub fn extract_tags(text: &str) -> Vec<String> {
    find_tags(text).into_iter().map(|m| m.value).collect()
}

pub fn extract_due_date(text: &str) -> Option<String> {
    find_due_date(text).map(|m| m.value)
}

pub fn extract_priority(text: &str) -> Option<Priority> {
    find_priority(text).and_then(|m| Priority::from_str_loose(&m.value))
}

/// Remove the given byte ranges from `text`. Ranges may come in any order
/// but must not overlap.
pub fn strip_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut sorted: Vec<&Range<usize>> = spans.iter().collect();
    sorted.sort_by_key(|r| r.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in sorted {
        if span.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn spans_of(matches: &[TokenMatch]) -> Vec<Range<usize>> {
    matches.iter().map(|m| m.span.clone()).collect()
}

fn find_all(re: &Regex, text: &str) -> Vec<TokenMatch> {
    re.captures_iter(text)
        .filter_map(|caps| {
            Some(TokenMatch {
                span: caps.get(0)?.range(),
                value: caps[1].to_lowercase(),
            })
        })
        .collect()
}

/// Extract tags, then due date, then priority, removing each kind of
/// token before looking for the next.
///
/// Removing a token can bring a glued one to the front (`!high#b` leaves
/// `#b`), so the passes repeat until the text holds no token at all. Only
/// the first due date and priority are kept as values; later ones are
/// still removed from the text.
pub fn extract_metadata(text: &str) -> CardMetadata {
    let mut meta = CardMetadata::default();
    let mut working = text.to_string();

    loop {
        let tags = find_tags(&working);
        working = strip_spans(&working, &spans_of(&tags));

        let dues = find_all(&DUE_RE, &working);
        working = strip_spans(&working, &spans_of(&dues));

        let priorities = find_all(&PRIORITY_RE, &working);
        working = strip_spans(&working, &spans_of(&priorities));

        if tags.is_empty() && dues.is_empty() && priorities.is_empty() {
            break;
        }
        meta.tags.extend(tags.into_iter().map(|m| m.value));
        if meta.due_date.is_none() {
            meta.due_date = dues.into_iter().next().map(|m| m.value);
        }
        if meta.priority.is_none() {
            meta.priority = priorities
                .first()
                .and_then(|m| Priority::from_str_loose(&m.value));
        }
    }

    meta.text = working.trim().to_string();
    meta
}
