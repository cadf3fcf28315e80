// src/app/types.rs
use crate::catalog::{CatalogError, Genre, Movie, MovieDetails, MoviePage};

// ---- cross-thread messages ----

/// Outcome of one browse fetch, tagged with the generation it was issued
/// under so superseded responses can be dropped on arrival.
pub struct BrowseMsg {
    pub generation: u64,
    pub page: u32,
    pub result: Result<MoviePage, CatalogError>,
}

/// Joint outcome of the detail + recommendations pair for one movie.
pub struct DetailMsg {
    pub movie_id: u32,
    pub result: Result<(MovieDetails, Vec<Movie>), CatalogError>,
}

pub type GenresMsg = Result<Vec<Genre>, CatalogError>;

// ---- poster worker queue ----

pub struct PosterJob {
    pub key: String,
    pub url: String,
}

pub struct PosterDone {
    pub key: String,
    // (width, height, RGBA8 bytes), decoded off-thread
    pub result: Result<(u32, u32, Vec<u8>), String>,
}
