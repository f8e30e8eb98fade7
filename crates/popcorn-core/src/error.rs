use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("no movie is selected")]
    NothingSelected,

    #[error("movie details have not finished loading")]
    DetailNotLoaded,

    #[error("rate the movie before adding it to the watched list")]
    Unrated,
}
