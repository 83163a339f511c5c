use indexmap::{IndexMap, IndexSet};

use crate::vectorizer::token::TermFrequency;

/// Per-term statistics over the whole corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermStats {
    /// number of documents containing the term
    pub doc_freq: u64,
    /// total occurrences across all documents
    pub total_count: u64,
}

/// keep document count and term statistics for IDF and vocabulary selection
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    terms: IndexMap<Box<str>, TermStats>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            let stats = self.terms.entry(term.into()).or_default();
            stats.doc_freq += 1;
            stats.total_count += count as u64;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    #[inline]
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.terms.get(term).map_or(0, |s| s.doc_freq)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary in alphabetical order, capped at `max_features` terms
    ///
    /// Under the cap the terms with the highest total count are kept; equal
    /// counts are decided alphabetically.
    pub fn vocabulary(&self, max_features: Option<usize>) -> IndexSet<Box<str>> {
        let mut terms: Vec<(&str, u64)> = self
            .terms
            .iter()
            .map(|(t, s)| (t.as_ref(), s.total_count))
            .collect();
        if let Some(limit) = max_features {
            if terms.len() > limit {
                terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                terms.truncate(limit);
            }
        }
        terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
        terms.into_iter().map(|(t, _)| t.into()).collect()
    }
}
