use std::path::PathBuf;

use serde::Deserialize;

/// Settings for one pipeline run
///
/// `PipelineConfig::default()` is what the binary runs with: fixed relative
/// input paths and outputs written to the working directory.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Primary table (one row per movie, key `id`)
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Secondary table (credits, key `movie_id`)
    #[serde(default = "default_credits_path")]
    pub credits_path: PathBuf,

    /// Metadata mapping artifact
    #[serde(default = "default_movie_dict_path")]
    pub movie_dict_path: PathBuf,

    /// Similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Vocabulary cap, most frequent terms are kept
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Number of leading cast entries used as features
    #[serde(default = "default_top_cast")]
    pub top_cast: usize,

    /// Drop English stop words before counting
    #[serde(default = "default_stop_words")]
    pub english_stop_words: bool,
}

fn default_movies_path() -> PathBuf {
    PathBuf::from("../ML_Model/movies.csv")
}

fn default_credits_path() -> PathBuf {
    PathBuf::from("../ML_Model/credits.csv")
}

fn default_movie_dict_path() -> PathBuf {
    PathBuf::from("movie_dict.cbor")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("similarity.cbor")
}

fn default_max_features() -> usize {
    5000
}

fn default_top_cast() -> usize {
    3
}

fn default_stop_words() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            movies_path: default_movies_path(),
            credits_path: default_credits_path(),
            movie_dict_path: default_movie_dict_path(),
            similarity_path: default_similarity_path(),
            max_features: default_max_features(),
            top_cast: default_top_cast(),
            english_stop_words: default_stop_words(),
        }
    }
}

impl PipelineConfig {
    /// Read inputs from `input_dir` and write artifacts into `output_dir`,
    /// keeping the default file names and model settings.
    pub fn with_dirs(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let output_dir = output_dir.into();
        Self {
            movies_path: input_dir.join("movies.csv"),
            credits_path: input_dir.join("credits.csv"),
            movie_dict_path: output_dir.join(default_movie_dict_path()),
            similarity_path: output_dir.join(default_similarity_path()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_fixed_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.movies_path, PathBuf::from("../ML_Model/movies.csv"));
        assert_eq!(config.credits_path, PathBuf::from("../ML_Model/credits.csv"));
        assert_eq!(config.movie_dict_path, PathBuf::from("movie_dict.cbor"));
        assert_eq!(config.similarity_path, PathBuf::from("similarity.cbor"));
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.top_cast, 3);
        assert!(config.english_stop_words);
    }

    #[test]
    fn with_dirs_keeps_model_settings() {
        let config = PipelineConfig::with_dirs("in", "out");
        assert_eq!(config.movies_path, PathBuf::from("in").join("movies.csv"));
        assert_eq!(config.credits_path, PathBuf::from("in").join("credits.csv"));
        assert_eq!(config.similarity_path, PathBuf::from("out").join("similarity.cbor"));
        assert_eq!(config.max_features, 5000);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut partial = std::collections::BTreeMap::new();
        partial.insert("max_features", 10usize);
        let bytes = serde_cbor::to_vec(&partial).unwrap();

        let config: PipelineConfig = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(config.max_features, 10);
        assert_eq!(config.top_cast, 3);
        assert_eq!(config.movies_path, PathBuf::from("../ML_Model/movies.csv"));
    }
}
