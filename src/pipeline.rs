//! One batch run: load, extract, vectorize, score, persist.

use std::path::PathBuf;

use tracing::info;

use crate::artifacts::{self, MovieDict};
use crate::config::PipelineConfig;
use crate::dataset;
use crate::error::PipelineResult;
use crate::features::FeatureCombiner;
use crate::similarity::linear_kernel;
use crate::vectorizer::{stop_words::StopWords, TfIdfVectorizer};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// rows in both artifacts
    pub rows: usize,
    pub vocabulary_size: usize,
    /// list-literal cells that failed to parse and were emptied
    pub degraded_cells: usize,
    pub movie_dict_path: PathBuf,
    pub similarity_path: PathBuf,
}

/// Run the whole pipeline
///
/// Returns `Ok(None)` when the input tables could not be loaded; nothing is
/// written in that case. Later failures are errors.
pub fn run(config: &PipelineConfig) -> PipelineResult<Option<RunSummary>> {
    let Some(records) = dataset::load_and_merge(config) else {
        return Ok(None);
    };

    let mut combiner = FeatureCombiner::new(config.top_cast);
    let movies = combiner.process_all(&records);
    drop(records);

    let mut vectorizer = TfIdfVectorizer::<f64>::new().with_max_features(config.max_features);
    if config.english_stop_words {
        vectorizer = vectorizer.with_stop_words(StopWords::english());
    }
    let docs: Vec<&str> = movies.iter().map(|m| m.combined.as_str()).collect();
    let tfidf = vectorizer.fit_transform(&docs)?;
    let (n_docs, n_terms) = tfidf.shape();
    info!(rows = n_docs, columns = n_terms, nnz = tfidf.nnz(), "TF-IDF matrix shape");

    let similarity = linear_kernel(&tfidf.rows);
    let (rows, cols) = similarity.shape();
    info!(rows, columns = cols, "similarity matrix shape");

    let dict = MovieDict::from_processed(&movies);
    artifacts::write_movie_dict(&config.movie_dict_path, &dict)?;
    info!(path = %config.movie_dict_path.display(), rows = dict.len(), "wrote movie dict");
    artifacts::write_similarity(&config.similarity_path, &similarity)?;
    info!(path = %config.similarity_path.display(), cells = similarity.as_slice().len(), "wrote similarity matrix");

    Ok(Some(RunSummary {
        rows,
        vocabulary_size: n_terms,
        degraded_cells: combiner.degraded(),
        movie_dict_path: config.movie_dict_path.clone(),
        similarity_path: config.similarity_path.clone(),
    }))
}
