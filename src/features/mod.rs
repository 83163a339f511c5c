//! Per-row feature extraction
//!
//! Four extractors turn list-literal cells into space-joined names. Each has a
//! `try_*` form that reports why a cell could not be used, and a plain form
//! that turns any failure into an empty string. One bad cell only weakens that
//! record's text; it never stops the batch.

pub mod literal;

use tracing::debug;

use crate::dataset::MovieRecord;
use crate::error::ExtractError;
use literal::Literal;

/// Fill value for missing list cells
pub const EMPTY_LIST: &str = "[]";

/// Default number of cast members kept
pub const TOP_CAST: usize = 3;

const DIRECTOR_JOB: &str = "Director";

/// Entries of a parsed cell
///
/// Lists and tuples are the normal case. Empty strings, dicts and sets have no
/// entries; non-empty ones have entries that are not objects.
fn entries(value: &Literal) -> Result<&[Literal], ExtractError> {
    match value {
        Literal::List(items) | Literal::Tuple(items) => Ok(items.as_slice()),
        Literal::Set(items) if items.is_empty() => Ok(&[][..]),
        Literal::Dict(pairs) if pairs.is_empty() => Ok(&[][..]),
        Literal::Str(s) if s.is_empty() => Ok(&[][..]),
        Literal::Set(_) | Literal::Dict(_) | Literal::Str(_) => Err(ExtractError::NotAnObject { index: 0 }),
        other => Err(ExtractError::NotAList(other.kind())),
    }
}

fn name_of(index: usize, entry: &Literal) -> Result<&str, ExtractError> {
    if !matches!(entry, Literal::Dict(_)) {
        return Err(ExtractError::NotAnObject { index });
    }
    entry
        .get("name")
        .ok_or(ExtractError::MissingKey { index, key: "name" })?
        .as_str()
        .ok_or(ExtractError::NameNotString { index })
}

/// Join the `name` of the first `limit` entries
fn join_names(cell: Option<&str>, limit: usize) -> Result<String, ExtractError> {
    let Some(raw) = cell else {
        return Ok(String::new());
    };
    let value = literal::parse(raw)?;
    let names = entries(&value)?
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| name_of(i, entry))
        .collect::<Result<Vec<&str>, _>>()?;
    Ok(names.join(" "))
}

pub fn try_genres(cell: Option<&str>) -> Result<String, ExtractError> {
    join_names(cell, usize::MAX)
}

pub fn try_keywords(cell: Option<&str>) -> Result<String, ExtractError> {
    join_names(cell, usize::MAX)
}

/// Names of the first `top` cast entries, or all of them if there are fewer
pub fn try_cast(cell: Option<&str>, top: usize) -> Result<String, ExtractError> {
    join_names(cell, top)
}

/// Names of every crew entry whose `job` is exactly `Director`
///
/// Every entry must carry a `job`; only directors need a `name`.
pub fn try_director(cell: Option<&str>) -> Result<String, ExtractError> {
    let Some(raw) = cell else {
        return Ok(String::new());
    };
    let value = literal::parse(raw)?;
    let mut directors = Vec::new();
    for (index, entry) in entries(&value)?.iter().enumerate() {
        if !matches!(entry, Literal::Dict(_)) {
            return Err(ExtractError::NotAnObject { index });
        }
        let job = entry.get("job").ok_or(ExtractError::MissingKey { index, key: "job" })?;
        if job.as_str() == Some(DIRECTOR_JOB) {
            directors.push(name_of(index, entry)?);
        }
    }
    Ok(directors.join(" "))
}

pub fn extract_genres(cell: Option<&str>) -> String {
    try_genres(cell).unwrap_or_default()
}

pub fn extract_keywords(cell: Option<&str>) -> String {
    try_keywords(cell).unwrap_or_default()
}

pub fn extract_cast(cell: Option<&str>) -> String {
    try_cast(cell, TOP_CAST).unwrap_or_default()
}

pub fn extract_director(cell: Option<&str>) -> String {
    try_director(cell).unwrap_or_default()
}

/// A joined row after extraction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessedMovie {
    pub id: i64,
    pub title: Option<String>,
    /// overview with missing filled as empty
    pub overview: String,
    pub genres: String,
    pub keywords: String,
    pub cast: String,
    pub director: String,
    /// text that gets vectorized
    pub combined: String,
}

/// Join the five segments with single spaces, in fixed order
pub fn combine(overview: &str, genres: &str, keywords: &str, cast: &str, director: &str) -> String {
    [overview, genres, keywords, cast, director].join(" ")
}

/// Turns `MovieRecord`s into `ProcessedMovie`s and counts degraded cells
#[derive(Debug, Clone)]
pub struct FeatureCombiner {
    top_cast: usize,
    degraded: usize,
}

impl Default for FeatureCombiner {
    fn default() -> Self {
        Self::new(TOP_CAST)
    }
}

impl FeatureCombiner {
    pub fn new(top_cast: usize) -> Self {
        Self { top_cast, degraded: 0 }
    }

    /// Number of cells that fell back to an empty string so far
    pub fn degraded(&self) -> usize {
        self.degraded
    }

    fn settle(&mut self, id: i64, field: &str, result: Result<String, ExtractError>) -> String {
        result.unwrap_or_else(|e| {
            self.degraded += 1;
            debug!(movie_id = id, field, "unusable cell: {e}");
            String::new()
        })
    }

    pub fn process(&mut self, record: &MovieRecord) -> ProcessedMovie {
        let overview = record.overview.clone().unwrap_or_default();
        let genres_raw = record.genres.as_deref().unwrap_or(EMPTY_LIST);
        let keywords_raw = record.keywords.as_deref().unwrap_or(EMPTY_LIST);
        let cast_raw = record.cast.as_deref().unwrap_or(EMPTY_LIST);
        let crew_raw = record.crew.as_deref().unwrap_or(EMPTY_LIST);

        let genres = self.settle(record.id, "genres", try_genres(Some(genres_raw)));
        let keywords = self.settle(record.id, "keywords", try_keywords(Some(keywords_raw)));
        let cast = self.settle(record.id, "cast", try_cast(Some(cast_raw), self.top_cast));
        let director = self.settle(record.id, "crew", try_director(Some(crew_raw)));

        let combined = combine(&overview, &genres, &keywords, &cast, &director);
        ProcessedMovie {
            id: record.id,
            title: record.title.clone(),
            overview,
            genres,
            keywords,
            cast,
            director,
            combined,
        }
    }

    pub fn process_all(&mut self, records: &[MovieRecord]) -> Vec<ProcessedMovie> {
        records.iter().map(|r| self.process(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENRES: &str = r#"[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}, {"id": 878, "name": "Science Fiction"}]"#;
    const CAST: &str = "[{'cast_id': 1, 'name': 'Sam Worthington'}, {'cast_id': 2, 'name': 'Zoe Saldana'}, \
                        {'cast_id': 3, 'name': 'Sigourney Weaver'}, {'cast_id': 4, 'name': 'Stephen Lang'}]";

    #[test]
    fn missing_cells_yield_empty_strings() {
        assert_eq!(extract_genres(None), "");
        assert_eq!(extract_keywords(None), "");
        assert_eq!(extract_cast(None), "");
        assert_eq!(extract_director(None), "");
        assert_eq!(try_director(None), Ok(String::new()));
    }

    #[test]
    fn malformed_cells_yield_empty_strings() {
        for bad in ["", "not a list", "[{'name': 'x'}", "42", "[1, 2]", "[{'id': 1}]", "[{'name': 3}]"] {
            assert_eq!(extract_genres(Some(bad)), "", "{bad:?}");
            assert_eq!(extract_keywords(Some(bad)), "", "{bad:?}");
            assert_eq!(extract_cast(Some(bad)), "", "{bad:?}");
            assert_eq!(extract_director(Some(bad)), "", "{bad:?}");
        }
        assert!(matches!(try_genres(Some("42")), Err(ExtractError::NotAList("int"))));
        assert!(matches!(
            try_keywords(Some("[{'id': 1}]")),
            Err(ExtractError::MissingKey { index: 0, key: "name" })
        ));
    }

    #[test]
    fn genres_join_every_name() {
        assert_eq!(extract_genres(Some(GENRES)), "Action Adventure Science Fiction");
        assert_eq!(extract_genres(Some("[]")), "");
    }

    #[test]
    fn leading_zeros_and_string_prefixes() {
        assert_eq!(extract_genres(Some("[{'id': 007, 'name': 'Bond'}]")), "");
        assert_eq!(extract_genres(Some("[{'id': --18, 'name': 'Drama'}]")), "");
        assert_eq!(extract_genres(Some("[{'id': -18, 'name': u'Drama'}]")), "Drama");
        assert_eq!(extract_director(Some("[{'job': u'Director', 'name': U\"Ang Lee\"}]")), "Ang Lee");
    }

    #[test]
    fn cast_takes_first_three_in_order() {
        assert_eq!(extract_cast(Some(CAST)), "Sam Worthington Zoe Saldana Sigourney Weaver");
        assert_eq!(try_cast(Some(CAST), 1).unwrap(), "Sam Worthington");
    }

    #[test]
    fn short_cast_lists_return_everything_available() {
        let two = "[{'name': 'A B'}, {'name': 'C'}]";
        assert_eq!(extract_cast(Some(two)), "A B C");
    }

    #[test]
    fn cast_ignores_entries_past_the_limit() {
        let tail_garbage = "[{'name': 'A'}, {'name': 'B'}, {'name': 'C'}, 17]";
        assert_eq!(extract_cast(Some(tail_garbage)), "A B C");
        assert_eq!(extract_genres(Some(tail_garbage)), "");
    }

    #[test]
    fn director_selection() {
        let none = "[{'job': 'Producer', 'name': 'P'}, {'job': 'director', 'name': 'lower'}]";
        let one = "[{'job': 'Producer', 'name': 'P'}, {'job': 'Director', 'name': 'James Cameron'}]";
        let many = "[{'job': 'Director', 'name': 'Lana Wachowski'}, {'job': 'Writer', 'name': 'W'}, \
                    {'job': 'Director', 'name': 'Lilly Wachowski'}]";
        assert_eq!(extract_director(Some(none)), "");
        assert_eq!(extract_director(Some(one)), "James Cameron");
        assert_eq!(extract_director(Some(many)), "Lana Wachowski Lilly Wachowski");
    }

    #[test]
    fn director_requires_job_on_every_entry() {
        let missing_job = "[{'job': 'Director', 'name': 'D'}, {'name': 'no job'}]";
        assert_eq!(extract_director(Some(missing_job)), "");
        assert_eq!(
            try_director(Some(missing_job)),
            Err(ExtractError::MissingKey { index: 1, key: "job" })
        );
        // only directors need a name
        assert_eq!(extract_director(Some("[{'job': 'Sound'}, {'job': 'Director', 'name': 'D'}]")), "D");
    }

    #[test]
    fn empty_non_list_containers_have_no_entries() {
        assert_eq!(try_genres(Some("{}")), Ok(String::new()));
        assert_eq!(try_genres(Some("''")), Ok(String::new()));
        assert!(try_genres(Some("'Drama'")).is_err());
        assert_eq!(try_genres(Some("({'name': 'Tuple'},)")), Ok("Tuple".to_string()));
    }

    #[test]
    fn combine_keeps_order_and_separators() {
        assert_eq!(combine("o", "g", "k", "c", "d"), "o g k c d");
        assert_eq!(combine("", "", "", "", ""), "    ");
        assert_eq!(combine("plot", "Drama", "", "", "D"), "plot Drama   D");
    }

    #[test]
    fn processing_fills_missing_fields() {
        let record = MovieRecord {
            id: 19995,
            title: Some("Avatar".to_string()),
            overview: None,
            genres: Some(GENRES.to_string()),
            keywords: None,
            cast: Some(CAST.to_string()),
            crew: Some("[{'job': 'Director', 'name': 'James Cameron'}]".to_string()),
        };
        let mut combiner = FeatureCombiner::default();
        let processed = combiner.process(&record);

        assert_eq!(processed.overview, "");
        assert_eq!(processed.keywords, "");
        assert_eq!(
            processed.combined,
            " Action Adventure Science Fiction  Sam Worthington Zoe Saldana Sigourney Weaver James Cameron"
        );
        assert_eq!(combiner.degraded(), 0);
    }

    #[test]
    fn processing_counts_degraded_cells() {
        let record = MovieRecord {
            id: 1,
            overview: Some("story".to_string()),
            genres: Some("[broken".to_string()),
            crew: Some("[{'name': 'x'}]".to_string()),
            ..MovieRecord::default()
        };
        let mut combiner = FeatureCombiner::default();
        let processed = combiner.process_all(&[record]);

        assert_eq!(processed[0].combined, "story    ");
        assert_eq!(combiner.degraded(), 2);
    }
}
