//! Input tables and the left join that produces one `MovieRecord` per output row.

pub mod merge;

use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::error::LoadError;

/// Cell values read as missing, in addition to the empty cell
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 欠損セルは None
fn na_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?;
    Ok(cell.filter(|v| !NA_VALUES.contains(&v.as_str())))
}

/// Row of the primary table
///
/// Only the columns the pipeline needs are read; any other column is ignored.
/// Empty cells and the markers in `NA_VALUES` become `None`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MovieRow {
    pub id: i64,
    #[serde(default, deserialize_with = "na_cell")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "na_cell")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "na_cell")]
    pub genres: Option<String>,
    #[serde(default, deserialize_with = "na_cell")]
    pub keywords: Option<String>,
}

/// Row of the secondary (credits) table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreditRow {
    pub movie_id: i64,
    #[serde(default, deserialize_with = "na_cell")]
    pub cast: Option<String>,
    #[serde(default, deserialize_with = "na_cell")]
    pub crew: Option<String>,
}

/// One row of the joined table
///
/// `cast` and `crew` are `None` both for empty cells and for movies without
/// a matching credits row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Read every row of a CSV file into `T`, matching columns by header name
pub fn read_table<T, P>(path: P) -> Result<Vec<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(std::io::BufReader::new(file));
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Load both tables and left-join them
pub fn try_load_and_merge(config: &PipelineConfig) -> Result<Vec<MovieRecord>, LoadError> {
    let movies: Vec<MovieRow> = read_table(&config.movies_path)?;
    let credits: Vec<CreditRow> = read_table(&config.credits_path)?;
    info!(movies = movies.len(), "loaded movies");
    info!(credits = credits.len(), "loaded credits");

    let merged = merge::left_join(movies, credits);
    info!(rows = merged.len(), "merged dataset");
    Ok(merged)
}

/// Load both tables and left-join them
///
/// Any failure is logged and reported as `None`; the caller is expected to
/// stop without producing output.
pub fn load_and_merge(config: &PipelineConfig) -> Option<Vec<MovieRecord>> {
    match try_load_and_merge(config) {
        Ok(records) => Some(records),
        Err(e) => {
            error!("error loading data: {e}");
            None
        }
    }
}
