/// Serialize a board back to kanban markdown.
///
/// The output is exactly what `parser::parse` reads: a fixed YAML header,
/// one `##` section per column, one checklist item per card with its
/// metadata tokens re-appended, and the settings trailer at the end.
use crate::parser::{list_item_body, FENCE};
use crate::types::{KanbanBoard, KanbanCard, INDENT_WIDTH};

pub const FRONTMATTER: &str = "---\n\nkanban-plugin: board\n\n---\n\n";

pub const SETTINGS_TRAILER: &str =
    "%% kanban:settings\n```\n{\"kanban-plugin\":\"board\"}\n```\n%%\n";

fn indent(levels: usize) -> String {
    " ".repeat(levels * INDENT_WIDTH)
}

fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// True when `text` already carries `#tag` as a complete token.
fn text_has_tag(text: &str, tag: &str) -> bool {
    let needle = format!("#{}", tag);
    text.match_indices(&needle).any(|(pos, _)| {
        text[pos + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '-'))
    })
}

/// Card text followed by priority, due date and tags, space separated.
fn card_line(card: &KanbanCard) -> String {
    let mut tokens: Vec<String> = Vec::new();
    if let Some(priority) = card.priority {
        tokens.push(format!("!{}", priority));
    }
    if let Some(due) = &card.due_date {
        tokens.push(format!("@due({})", due));
    }
    for tag in &card.tags {
        if !text_has_tag(&card.text, tag) {
            tokens.push(format!("#{}", tag));
        }
    }

    let mut line = card.text.clone();
    for token in tokens {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    line
}

/// Leading spaces for a content line that is itself a list item. Its own
/// whitespace plus the prefix must still read as the card's depth, or the
/// line comes back as a subtask.
fn item_prefix(card_indent: usize, line: &str) -> String {
    let own = line.chars().take_while(|c| c.is_whitespace()).count();
    let deepest = (card_indent + 1) * INDENT_WIDTH - 1;
    let width = deepest.saturating_sub(own).min(card_indent * INDENT_WIDTH);
    " ".repeat(width)
}

fn write_card(out: &mut String, card: &KanbanCard) {
    let prefix = indent(card.indentation);
    let item = format!("{}- {} {}", prefix, checkbox(card.completed), card_line(card));
    out.push_str(item.trim_end());
    out.push('\n');

    if !card.content.is_empty() {
        let mut in_fence = false;
        for line in card.content.split('\n') {
            let is_fence = line.trim().starts_with(FENCE);
            let bare_item = !in_fence && !is_fence && list_item_body(line.trim_start()).is_some();
            if is_fence {
                in_fence = !in_fence;
            }
            if !line.is_empty() {
                if bare_item {
                    out.push_str(&item_prefix(card.indentation, line));
                } else {
                    out.push_str(&indent(card.indentation + 1));
                }
                out.push_str(line);
            }
            out.push('\n');
        }
    }

    for subtask in &card.subtasks {
        let levels = card.indentation + subtask.indentation.max(1);
        let item = format!(
            "{}- {} {}",
            indent(levels),
            checkbox(subtask.completed),
            subtask.text
        );
        out.push_str(item.trim_end());
        out.push('\n');
    }

    out.push('\n');
}

/// Generate markdown from a board. Never fails.
pub fn generate(board: &KanbanBoard) -> String {
    let mut markdown = String::from(FRONTMATTER);

    for column in &board.columns {
        markdown.push_str(&format!("## {}\n\n", column.title));
        for card in &column.cards {
            write_card(&mut markdown, card);
        }
        markdown.push('\n');
    }

    markdown.push_str(SETTINGS_TRAILER);
    log::debug!(
        "[markban.generator] wrote {} columns ({} bytes)",
        board.columns.len(),
        markdown.len()
    );
    markdown
}
