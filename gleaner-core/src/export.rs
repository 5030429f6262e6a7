use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::Quote;

/// Export format for saved quotes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuote {
    pub id: String,
    pub text: String,
    pub book: String,
    pub author: String,
    pub saved_at: String,
    pub word_count: usize,
}

impl From<&Quote> for ExportQuote {
    fn from(quote: &Quote) -> Self {
        Self {
            id: quote.id.to_string(),
            text: quote.text.clone(),
            book: quote.book.clone(),
            author: quote.author.clone(),
            saved_at: quote.saved_at.to_rfc3339(),
            word_count: quote.word_count(),
        }
    }
}

/// Serialize quotes as a pretty-printed JSON array
pub fn to_json<'a>(quotes: impl IntoIterator<Item = &'a Quote>) -> Result<String> {
    let export: Vec<ExportQuote> = quotes.into_iter().map(ExportQuote::from).collect();
    serde_json::to_string_pretty(&export).context("Failed to serialize quotes")
}
