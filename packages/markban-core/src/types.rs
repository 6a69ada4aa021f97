use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::links;
use crate::metadata;

/// Number of whitespace columns per nesting level.
pub const INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse from a keyword (case-insensitive). Returns `None` for
    /// unrecognised values.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLink {
    pub display_text: String,
    pub target_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Depth relative to the owning card.
    #[serde(default)]
    pub indentation: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanCard {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub indentation: usize,
    /// Free-form lines below the card line, relative to the card's
    /// continuation indent.
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CardLink>,
}

impl KanbanCard {
    /// Build an incomplete, top-level card from freshly typed text.
    pub fn new(raw_text: &str) -> Self {
        let mut card = Self::default();
        card.set_text(raw_text);
        card
    }

    /// Re-derive text, tags, due date, priority and links from `raw_text`.
    /// Completion state, content, subtasks and indentation are kept.
    pub fn set_text(&mut self, raw_text: &str) {
        let meta = metadata::extract_metadata(raw_text);
        self.links = links::extract_links(&meta.text);
        self.text = meta.text;
        self.tags = meta.tags;
        self.due_date = meta.due_date;
        self.priority = meta.priority;
    }

    /// The due date as a calendar date. `None` when absent or when the
    /// stored digits do not form a real date.
    pub fn due_date_naive(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date_naive().map(|d| d < today).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub title: String,
    #[serde(default)]
    pub cards: Vec<KanbanCard>,
}

impl KanbanColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Per-column card counts, in column order.
    pub fn summary(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, col)| ColumnSummary {
                index,
                title: col.title.clone(),
                card_count: col.cards.len(),
                completed_count: col.cards.iter().filter(|c| c.completed).count(),
            })
            .collect()
    }

    /// All cards across columns, paired with their column title.
    pub fn cards(&self) -> impl Iterator<Item = (&str, &KanbanCard)> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter().map(move |card| (col.title.as_str(), card)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub index: usize,
    pub title: String,
    pub card_count: usize,
    pub completed_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str_loose() {
        assert_eq!(Priority::from_str_loose("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_str_loose("Medium"), Some(Priority::Medium));
        assert_eq!(Priority::from_str_loose("urgent"), None);
        assert_eq!(Priority::Low.to_string(), "low");
    }

    #[test]
    fn test_set_text_rederives_metadata() {
        let mut card = KanbanCard::new("Old #a");
        card.completed = true;
        card.content = "notes".to_string();

        card.set_text("Read [guide](https://x.io) !LOW @due(2024-01-31) #docs");
        assert_eq!(card.text, "Read [guide](https://x.io)");
        assert_eq!(card.tags, vec!["docs"]);
        assert_eq!(card.priority, Some(Priority::Low));
        assert_eq!(card.due_date.as_deref(), Some("2024-01-31"));
        assert_eq!(card.links.len(), 1);
        assert!(card.completed);
        assert_eq!(card.content, "notes");
    }

    #[test]
    fn test_due_date_naive_rejects_impossible_dates() {
        let card = KanbanCard::new("Pay rent @due(2025-02-30)");
        assert_eq!(card.due_date.as_deref(), Some("2025-02-30"));
        assert_eq!(card.due_date_naive(), None);
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let mut card = KanbanCard::new("Ship @due(2025-03-01)");
        assert!(card.is_overdue(today));
        card.completed = true;
        assert!(!card.is_overdue(today));
        assert!(!KanbanCard::new("No date").is_overdue(today));
        assert!(!KanbanCard::new("Later @due(2025-03-02)").is_overdue(today));
    }

    #[test]
    fn test_summary_counts() {
        let mut todo = KanbanColumn::new("Todo");
        todo.cards.push(KanbanCard::new("a"));
        let mut done_card = KanbanCard::new("b");
        done_card.completed = true;
        todo.cards.push(done_card);
        let board = KanbanBoard {
            columns: vec![todo, KanbanColumn::new("Done")],
        };

        let summary = board.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].card_count, 2);
        assert_eq!(summary[0].completed_count, 1);
        assert_eq!(summary[1].title, "Done");
        assert_eq!(summary[1].card_count, 0);
        assert_eq!(board.cards().count(), 2);
    }

    #[test]
    fn test_json_field_names() {
        let card = KanbanCard::new("Call [bob](tel:1) @due(2025-01-01) !high");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["dueDate"], "2025-01-01");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["links"][0]["displayText"], "bob");
        assert_eq!(json["links"][0]["targetUrl"], "tel:1");
        assert_eq!(json["completed"], false);
    }
}
