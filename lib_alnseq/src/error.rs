use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[error("The scoring matrix file is malformed at byte offset {offset}.")]
    ScoreFileFormat { offset: usize },

    #[error("The match matrix file is malformed at byte offset {offset}.")]
    MatchFileFormat { offset: usize },

    #[error(
        "The alignment range [{offset}, {end}] of sequence '{id}' does not fit its length {length}."
    )]
    InvalidAlignmentRange {
        id: String,
        offset: usize,
        end: usize,
        length: usize,
    },

    #[error("A buffer of {requested} bytes could not be allocated.")]
    OutOfMemory { requested: usize },
}
