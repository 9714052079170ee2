use crate::{aggregate::InvalidRowError, grouped::ResponseError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error. Module errors converge here so callers handle one
/// type at the call boundary.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    InvalidRow(#[from] InvalidRowError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}
