use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const UNKNOWN_BOOK: &str = "Unknown book";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// A saved quotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub id: Uuid,
    pub text: String,
    pub book: String,
    pub author: String,
    pub saved_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(text: String, book: String, author: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            book,
            author,
            saved_at: Utc::now(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// User edits collected in the preview step before saving
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteDraft {
    pub text: String,
    pub book: Option<String>,
    pub author: Option<String>,
}

impl QuoteDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            book: None,
            author: None,
        }
    }

    pub fn book(mut self, book: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Book title with blanks treated as missing
    pub fn book_title(&self) -> Option<&str> {
        non_blank(self.book.as_deref())
    }

    pub fn author_name(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_blank_fields() {
        let draft = QuoteDraft::new("text").book("   ").author(" Seneca ");
        assert_eq!(draft.book_title(), None);
        assert_eq!(draft.author_name(), Some("Seneca"));
    }

    #[test]
    fn test_quote_serializes_id_and_timestamp() {
        let quote = Quote::new(
            "The obstacle is the way".to_string(),
            "The Obstacle Is the Way".to_string(),
            "Ryan Holiday".to_string(),
        );
        assert_eq!(quote.word_count(), 5);

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains(&quote.id.to_string()));
        assert!(json.contains("\"saved_at\""));

        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
