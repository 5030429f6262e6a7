use std::collections::HashMap;

use uuid::Uuid;

use crate::model::Quote;

/// Where saved quotes go
pub trait QuoteStore {
    fn add(&mut self, quote: Quote);

    fn get(&self, id: Uuid) -> Option<&Quote>;

    fn list(&self) -> Vec<&Quote>;

    fn remove(&mut self, id: Uuid) -> Option<Quote>;

    /// Author known for a book title, if any
    fn author_for_book(&self, book: &str) -> Option<String>;
}

/// Quotes held in memory for the lifetime of the app
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteStore {
    quotes: Vec<Quote>,
    catalog: HashMap<String, String>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the book → author catalog used to fill in missing authors
    pub fn with_catalog<I, B, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (B, A)>,
        B: Into<String>,
        A: Into<String>,
    {
        Self {
            quotes: Vec::new(),
            catalog: entries
                .into_iter()
                .map(|(book, author)| (book.into(), author.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl QuoteStore for InMemoryQuoteStore {
    fn add(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    fn get(&self, id: Uuid) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    fn list(&self) -> Vec<&Quote> {
        let mut sorted: Vec<_> = self.quotes.iter().collect();
        sorted.sort_by_key(|q| q.saved_at);
        sorted
    }

    fn remove(&mut self, id: Uuid) -> Option<Quote> {
        let pos = self.quotes.iter().position(|q| q.id == id)?;
        Some(self.quotes.remove(pos))
    }

    fn author_for_book(&self, book: &str) -> Option<String> {
        if let Some(author) = self.catalog.get(book) {
            return Some(author.clone());
        }
        self.quotes
            .iter()
            .rev()
            .find(|q| q.book == book && q.author != crate::model::UNKNOWN_AUTHOR)
            .map(|q| q.author.clone())
    }
}
