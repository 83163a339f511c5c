pub mod corpus;
pub mod stop_words;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Float;
use rayon::prelude::*;
use tracing::info;

use crate::error::VectorizeError;
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{corpus::Corpus, stop_words::StopWords, tfidf::{DefaultTfIdfEngine, TfIdfEngine}, token::TermFrequency};

/// Row-per-document TF-IDF vectors
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix<N>
where
    N: Float,
{
    /// L2-normalized rows, one per input document, in input order
    pub rows: Vec<SparseVec<N>>,
    /// number of columns (vocabulary size)
    pub dim: usize,
}

impl<N> TfIdfMatrix<N>
where
    N: Float,
{
    /// (documents, vocabulary)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.dim)
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseVec::nnz).sum()
    }
}

/// Bag-of-words TF-IDF vectorizer
///
/// `fit_transform` learns the vocabulary and IDF weights from a corpus and
/// returns one L2-normalized vector per document. Fitted state is kept so
/// the vocabulary and weights can be inspected afterwards.
///
/// `TfIdfVectorizer<N, E>`:
/// - `N`: element type (f32 or f64)
/// - `E`: weighting engine, `DefaultTfIdfEngine` by default
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    stop_words: Option<StopWords>,
    max_features: Option<usize>,
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<N>,
    _marker: PhantomData<E>,
}

impl<N, E> Default for TfIdfVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TfIdfEngine<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> TfIdfVectorizer<N, E>
where
    N: Float + Send + Sync,
    E: TfIdfEngine<N>,
{
    /// No stop words, no vocabulary cap
    pub fn new() -> Self {
        Self {
            stop_words: None,
            max_features: None,
            vocabulary: IndexSet::new(),
            idf: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Fitted vocabulary, index = column
    pub fn vocabulary(&self) -> &IndexSet<Box<str>> {
        &self.vocabulary
    }

    /// Fitted IDF weights, aligned with `vocabulary`
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    /// Learn vocabulary and IDF from `docs`, then vectorize them
    pub fn fit_transform<S>(&mut self, docs: &[S]) -> Result<TfIdfMatrix<N>, VectorizeError>
    where
        S: AsRef<str> + Sync,
    {
        let stop_words = self.stop_words.as_ref();
        let freqs: Vec<TermFrequency> = docs
            .par_iter()
            .map(|doc| TermFrequency::from_text(doc.as_ref(), stop_words))
            .collect();

        let mut corpus = Corpus::new();
        for freq in &freqs {
            corpus.add_doc(freq);
        }

        let vocabulary = corpus.vocabulary(self.max_features);
        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }
        info!(
            corpus_terms = corpus.vocab_size(),
            kept = vocabulary.len(),
            "vocabulary built"
        );

        let idf = E::idf_vec(&corpus, &vocabulary);
        let rows = freqs
            .par_iter()
            .map(|freq| {
                let mut row = E::tf_vec(freq, &vocabulary);
                row.scale_by(&idf);
                row.normalize_l2();
                row.shrink_to_fit();
                row
            })
            .collect();

        let dim = vocabulary.len();
        self.vocabulary = vocabulary;
        self.idf = idf;
        Ok(TfIdfMatrix { rows, dim })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> TfIdfVectorizer<f64> {
        TfIdfVectorizer::new()
            .with_stop_words(StopWords::english())
            .with_max_features(5000)
    }

    #[test]
    fn rows_are_unit_length_and_ordered() {
        let docs = ["space adventure action", "space opera drama", "romantic drama"];
        let mut vectorizer = english();
        let matrix = vectorizer.fit_transform(&docs).unwrap();

        assert_eq!(matrix.shape(), (3, 6));
        for row in &matrix.rows {
            assert!((row.norm_l2() - 1.0).abs() < 1e-12);
        }
        let vocab: Vec<&str> = vectorizer.vocabulary().iter().map(|t| t.as_ref()).collect();
        assert_eq!(vocab, vec!["action", "adventure", "drama", "opera", "romantic", "space"]);
        // row 0 has action, adventure, space
        assert_eq!(matrix.rows[0].nnz(), 3);
        assert_eq!(matrix.rows[0].get(2), Some(0.0));
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let docs = ["space adventure", "space opera"];
        let mut vectorizer = english();
        let matrix = vectorizer.fit_transform(&docs).unwrap();
        let idf = vectorizer.idf();
        // adventure, opera, space
        assert!(idf[0] > idf[2]);
        let row = &matrix.rows[0];
        assert!(row.get(0).unwrap() > row.get(2).unwrap());
    }

    #[test]
    fn stop_words_only_document_gets_zero_row() {
        let docs = ["the and of", "space opera"];
        let matrix = english().fit_transform(&docs).unwrap();
        assert!(matrix.rows[0].is_zero());
        assert!(!matrix.rows[1].is_zero());
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let docs = ["the", "a an of", ""];
        assert_eq!(english().fit_transform(&docs), Err(VectorizeError::EmptyVocabulary));
        let none: [&str; 0] = [];
        assert_eq!(english().fit_transform(&none), Err(VectorizeError::EmptyVocabulary));
    }

    #[test]
    fn max_features_caps_columns() {
        let docs = ["alpha alpha beta", "alpha gamma delta"];
        let mut vectorizer = TfIdfVectorizer::<f32>::new().with_max_features(2);
        let matrix = vectorizer.fit_transform(&docs).unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        // alpha=3, then beta/delta/gamma tie at 1, beta wins alphabetically
        let vocab: Vec<&str> = vectorizer.vocabulary().iter().map(|t| t.as_ref()).collect();
        assert_eq!(vocab, vec!["alpha", "beta"]);
    }
}
