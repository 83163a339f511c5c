use indexmap::IndexSet;
use num::Float;

use crate::{utils::math::vector::SparseVec, vectorizer::{corpus::Corpus, token::TermFrequency}};

/// Weighting strategy plugged into `TfIdfVectorizer<N, E>`
pub trait TfIdfEngine<N>
where
    N: Float,
{
    /// IDF ベクトルを生成する (vocabulary の順)
    /// # Arguments
    /// * `corpus` - コーパス
    /// * `vocabulary` - 語彙 (index = 次元)
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N>;

    /// TF ベクトルを生成する
    /// Terms outside the vocabulary are ignored.
    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> SparseVec<N>;
}

/// デフォルトの TF-IDF エンジン
///
/// - tf = raw count
/// - idf = ln((1 + n) / (1 + df)) + 1 (smoothed, never zero)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl DefaultTfIdfEngine {
    #[inline]
    pub fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

#[inline]
fn cast<N: Float>(v: f64) -> N {
    <N as num::NumCast>::from(v).unwrap_or_else(N::zero)
}

impl<N> TfIdfEngine<N> for DefaultTfIdfEngine
where
    N: Float,
{
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N> {
        let doc_num = corpus.doc_num();
        vocabulary
            .iter()
            .map(|term| cast(Self::idf(doc_num, corpus.doc_freq(term))))
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> SparseVec<N> {
        let pairs = freq
            .iter()
            .filter_map(|(term, count)| {
                vocabulary
                    .get_index_of(term)
                    .map(|idx| (idx as u32, cast(count as f64)))
            })
            .collect();
        SparseVec::from_pairs(vocabulary.len(), pairs)
    }
}
