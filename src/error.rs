/// Errors raised by the generator, the aggregator and session edits.
///
/// Both variants are recoverable: the presentation layer renders an empty
/// view instead of surfacing them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Negative point count, zero bin count, out-of-range row or parameter
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Aggregation requested on a dataset without any finite `x`
    #[error("Cannot aggregate an empty dataset")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, Error>;
