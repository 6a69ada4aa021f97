/// Line-oriented parser for kanban boards.
///
/// Handles the format:
///   --- YAML header ---
///   ## Column Title
///   - [ ] Card text !priority @due(YYYY-MM-DD) #tag
///     continuation line
///     - [ ] subtask
///   %% kanban:settings ... %%
///
/// Each line is classified once and then fed to an explicit `ParseState`;
/// nothing is carried between calls.
use regex::Regex;
use std::sync::LazyLock;

use crate::error::StructureError;
use crate::links;
use crate::metadata;
use crate::types::{KanbanBoard, KanbanCard, KanbanColumn, Subtask, INDENT_WIDTH};

static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([ xX])\]").unwrap());

pub(crate) const FENCE: &str = "```";
const TRAILER_FENCE: &str = "%%";
const SETTINGS_KEY: &str = "kanban:settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Fence,
    Heading(&'a str),
    Item { indent: usize, body: &'a str },
    Text,
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.starts_with(FENCE) {
        return LineKind::Fence;
    }
    if let Some(title) = trimmed.strip_prefix("##") {
        return LineKind::Heading(title.trim());
    }
    if let Some(body) = list_item_body(trimmed) {
        return LineKind::Item {
            indent: indentation_of(line),
            body,
        };
    }
    LineKind::Text
}

/// `-` followed by whitespace or end of line. Rules like `---` are not items.
pub(crate) fn list_item_body(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('-')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn indentation_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count() / INDENT_WIDTH
}

/// Split a leading `[ ]` / `[x]` / `[X]` off an item body.
/// Bodies without a checkbox count as incomplete.
fn split_checkbox(body: &str) -> (bool, &str) {
    match CHECKBOX_RE.captures(body) {
        Some(caps) => {
            let completed = !caps[1].trim().is_empty();
            (completed, body[caps[0].len()..].trim_start())
        }
        None => (false, body),
    }
}

fn has_checkbox(body: &str) -> bool {
    CHECKBOX_RE.is_match(body)
}

/// Remove up to `width` leading spaces.
fn strip_leading_spaces(line: &str, width: usize) -> &str {
    let n = line.bytes().take(width).take_while(|b| *b == b' ').count();
    &line[n..]
}

fn trim_trailing_blank_lines(content: &str) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[derive(Debug, Default)]
struct ParseState {
    columns: Vec<KanbanColumn>,
    card_open: bool,
    in_code_block: bool,
    in_trailer: bool,
}

impl ParseState {
    fn open_card(&mut self) -> Option<&mut KanbanCard> {
        if !self.card_open {
            return None;
        }
        self.columns.last_mut()?.cards.last_mut()
    }

    fn feed(&mut self, line: &str) {
        if self.in_trailer {
            if line.trim() == TRAILER_FENCE {
                self.in_trailer = false;
            }
            return;
        }

        let kind = classify(line);

        if kind == LineKind::Fence {
            self.in_code_block = !self.in_code_block;
            self.push_content(line);
            return;
        }

        if self.in_code_block {
            self.push_content(line);
            return;
        }

        // Under an open card only the settings trailer ends it; any other
        // `%%` comment is part of the card's content.
        if let Some(rest) = line.strip_prefix(TRAILER_FENCE) {
            if !self.card_open || rest.trim_start().starts_with(SETTINGS_KEY) {
                self.card_open = false;
                let rest = rest.trim_end();
                let self_closing =
                    rest.len() >= TRAILER_FENCE.len() && rest.ends_with(TRAILER_FENCE);
                if !self_closing {
                    self.in_trailer = true;
                }
                return;
            }
        }

        match kind {
            LineKind::Heading(title) => {
                self.card_open = false;
                log::trace!("[markban.parser] column: {}", title);
                self.columns.push(KanbanColumn::new(title));
            }
            LineKind::Item { indent, body } => self.feed_item(line, indent, body),
            // Blank lines, `---` and `%` lines only matter inside a card.
            LineKind::Text | LineKind::Fence => self.push_content(line),
        }
    }

    fn feed_item(&mut self, line: &str, indent: usize, body: &str) {
        let card_indent = self.open_card().map(|card| card.indentation);
        match card_indent {
            Some(parent) if indent > parent => {
                let (completed, text) = split_checkbox(body);
                if let Some(card) = self.open_card() {
                    card.subtasks.push(Subtask {
                        text: text.trim().to_string(),
                        completed,
                        indentation: indent - parent,
                    });
                }
            }
            Some(_) if !has_checkbox(body) => self.push_content(line),
            _ => self.start_card(indent, body),
        }
    }

    fn start_card(&mut self, indent: usize, body: &str) {
        let Some(column) = self.columns.last_mut() else {
            return;
        };
        let (completed, raw_text) = split_checkbox(body);
        let meta = metadata::extract_metadata(raw_text);
        column.cards.push(KanbanCard {
            links: links::extract_links(&meta.text),
            text: meta.text,
            completed,
            indentation: indent,
            content: String::new(),
            subtasks: Vec::new(),
            tags: meta.tags,
            due_date: meta.due_date,
            priority: meta.priority,
        });
        self.card_open = true;
    }

    /// Append a continuation line to the open card, if any.
    fn push_content(&mut self, line: &str) {
        let Some(card) = self.open_card() else {
            return;
        };
        let width = (card.indentation + 1) * INDENT_WIDTH;
        card.content.push_str(strip_leading_spaces(line, width));
        card.content.push('\n');
    }

    fn finish(mut self) -> Result<KanbanBoard, StructureError> {
        if self.in_code_block {
            log::warn!("[markban.parser] unterminated code fence at end of input");
        }
        for card in self.columns.iter_mut().flat_map(|col| col.cards.iter_mut()) {
            card.content = trim_trailing_blank_lines(&card.content);
        }
        if self.columns.is_empty() {
            return Err(StructureError::NoColumns);
        }
        Ok(KanbanBoard {
            columns: self.columns,
        })
    }
}

/// Number of leading lines taken by a `---` delimited YAML header, or 0.
fn frontmatter_len(lines: &[&str]) -> usize {
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return 0;
    };
    if lines[start].trim() != "---" {
        return 0;
    }
    match lines[start + 1..].iter().position(|l| l.trim() == "---") {
        Some(offset) => {
            let end = start + 1 + offset;
            // A heading between the rules means they were not a header.
            if lines[start..end].iter().any(|l| l.trim().starts_with("##")) {
                return 0;
            }
            if !lines[start..end].iter().any(|l| l.contains("kanban-plugin")) {
                log::debug!("[markban.parser] frontmatter has no kanban-plugin key");
            }
            end + 1
        }
        None => 0,
    }
}

/// Parse kanban markdown into a board.
pub fn parse(markdown: &str) -> Result<KanbanBoard, StructureError> {
    let normalized = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let skip = frontmatter_len(&lines);

    let state = lines[skip..]
        .iter()
        .fold(ParseState::default(), |mut state, line| {
            state.feed(line);
            state
        });

    let board = state.finish()?;
    log::debug!(
        "[markban.parser] parsed {} columns, {} cards",
        board.columns.len(),
        board.cards().count()
    );
    Ok(board)
}
