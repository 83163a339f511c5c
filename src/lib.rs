/// This crate builds a content-based movie similarity index using a TF-IDF Vectorizer.
pub mod artifacts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod similarity;
pub mod utils;
pub mod vectorizer;

/// Pipeline Entry Point
/// Runs one batch: load and join the two tables, extract text features,
/// fit TF-IDF, compute the similarity matrix and write both artifacts.
///
/// Returns `Ok(None)` when the inputs cannot be loaded; no artifact is
/// written in that case.
pub use pipeline::{run, RunSummary};

/// Pipeline Configuration
/// Input paths, artifact paths and model settings.
/// `PipelineConfig::default()` reproduces the fixed relative paths the
/// binary uses.
pub use config::PipelineConfig;

/// Joined Movie Record
/// One row of the left join between the movies table and the credits table.
/// List-valued fields are still the raw list-literal strings.
pub use dataset::MovieRecord;

/// Feature Combiner
/// Turns joined records into `ProcessedMovie`s: extracts genres, keywords,
/// top cast and director, and builds the combined text that gets vectorized.
///
/// Cells that fail to parse become empty strings; the combiner counts them.
pub use features::{FeatureCombiner, ProcessedMovie};

/// TF-IDF Vectorizer
/// Learns a vocabulary and IDF weights from a corpus and produces one
/// L2-normalized sparse vector per document.
///
/// `TfIdfVectorizer<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32, f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTfIdfEngine)
pub use vectorizer::{TfIdfMatrix, TfIdfVectorizer};

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different weighting strategies
/// into `TfIdfVectorizer<N, E>`.
/// `DefaultTfIdfEngine` uses raw counts and smoothed IDF.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// English Stop Words
pub use vectorizer::stop_words::StopWords;

/// Similarity Matrix
/// Dense square matrix of pairwise cosine similarities, indexed by row
/// position. Supports serialization and nearest-neighbour lookup (`top_k`).
pub use similarity::{linear_kernel, SimilarityMatrix};

/// Output Artifacts
/// `MovieDict` holds the parallel metadata arrays. Row `i` of the dict and
/// row `i` of the similarity matrix describe the same record.
pub use artifacts::{read_movie_dict, read_similarity, write_movie_dict, write_similarity, MovieDict};

/// Errors
pub use error::{ArtifactError, ExtractError, LoadError, PipelineError, VectorizeError};
