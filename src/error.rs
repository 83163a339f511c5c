use std::path::PathBuf;

/// Errors raised while reading or joining the input tables
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while parsing one list-literal cell
///
/// These never leave the feature combiner; a failed cell becomes an empty string.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("literal syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("expected a list of objects, found {0}")]
    NotAList(&'static str),

    #[error("entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("entry {index} has no `{key}` key")]
    MissingKey { index: usize, key: &'static str },

    #[error("entry {index} has a non-string `name`")]
    NameNotString { index: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VectorizeError {
    #[error("empty vocabulary; perhaps the documents only contain stop words")]
    EmptyVocabulary,
}

/// Errors raised while writing or reading the output artifacts
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cbor error on {path}: {source}")]
    Cbor {
        path: PathBuf,
        #[source]
        source: serde_cbor::Error,
    },
}

/// Pipeline-level errors
///
/// Load failures are not listed here: the loader reports them and the
/// pipeline stops without output.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("vectorize error: {0}")]
    Vectorize(#[from] VectorizeError),

    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
