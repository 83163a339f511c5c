//! Output artifacts: the metadata mapping and the similarity matrix.
//!
//! Both are CBOR files written independently. Row position is the only link
//! between them, so they must come from the same row ordering.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::features::ProcessedMovie;
use crate::similarity::SimilarityMatrix;

/// Four parallel arrays indexed by row position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDict {
    pub movie_id: Vec<i64>,
    pub title: Vec<Option<String>>,
    pub genres: Vec<String>,
    pub overview: Vec<String>,
}

impl MovieDict {
    pub fn from_processed(movies: &[ProcessedMovie]) -> Self {
        let mut dict = Self {
            movie_id: Vec::with_capacity(movies.len()),
            title: Vec::with_capacity(movies.len()),
            genres: Vec::with_capacity(movies.len()),
            overview: Vec::with_capacity(movies.len()),
        };
        for movie in movies {
            dict.movie_id.push(movie.id);
            dict.title.push(movie.title.clone());
            dict.genres.push(movie.genres.clone());
            dict.overview.push(movie.overview.clone());
        }
        dict
    }

    pub fn len(&self) -> usize {
        self.movie_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movie_id.is_empty()
    }

    /// First row holding `movie_id`
    pub fn row_of(&self, movie_id: i64) -> Option<usize> {
        self.movie_id.iter().position(|&id| id == movie_id)
    }
}

fn write_cbor<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_cbor::to_writer(&mut writer, value).map_err(|source| ArtifactError::Cbor {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_cbor<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_cbor::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Cbor {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_movie_dict<P: AsRef<Path>>(path: P, dict: &MovieDict) -> Result<(), ArtifactError> {
    write_cbor(path.as_ref(), dict)
}

pub fn write_similarity<N, P>(path: P, matrix: &SimilarityMatrix<N>) -> Result<(), ArtifactError>
where
    N: Float + Serialize,
    P: AsRef<Path>,
{
    write_cbor(path.as_ref(), matrix)
}

pub fn read_movie_dict<P: AsRef<Path>>(path: P) -> Result<MovieDict, ArtifactError> {
    read_cbor(path.as_ref())
}

pub fn read_similarity<N, P>(path: P) -> Result<SimilarityMatrix<N>, ArtifactError>
where
    N: Float + for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    read_cbor(path.as_ref())
}
