use indexmap::IndexMap;

use super::{CreditRow, MovieRecord, MovieRow};

/// Left join of `movies.id` to `credits.movie_id`
///
/// Output follows movie order. A movie with several credit rows is repeated
/// once per match (in credits order); a movie with none keeps `cast`/`crew`
/// as `None`.
pub fn left_join(movies: Vec<MovieRow>, credits: Vec<CreditRow>) -> Vec<MovieRecord> {
    let mut by_movie: IndexMap<i64, Vec<CreditRow>> = IndexMap::with_capacity(credits.len());
    for credit in credits {
        by_movie.entry(credit.movie_id).or_default().push(credit);
    }

    let mut out = Vec::with_capacity(movies.len());
    for movie in movies {
        match by_movie.get(&movie.id) {
            Some(matches) => {
                for credit in matches {
                    out.push(MovieRecord {
                        cast: credit.cast.clone(),
                        crew: credit.crew.clone(),
                        ..record_of(&movie)
                    });
                }
            }
            None => out.push(record_of(&movie)),
        }
    }
    out
}

fn record_of(movie: &MovieRow) -> MovieRecord {
    MovieRecord {
        id: movie.id,
        title: movie.title.clone(),
        overview: movie.overview.clone(),
        genres: movie.genres.clone(),
        keywords: movie.keywords.clone(),
        cast: None,
        crew: None,
    }
}
