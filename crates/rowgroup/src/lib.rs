//! Row aggregation for relational join results: flat parent/child rows in,
//! ordered nested parent aggregates out via the ergonomics exported in the
//! `prelude`.

pub mod aggregate;
pub mod error;
pub mod grouped;
pub mod key;
pub mod row;
pub mod value;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or serializer helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        aggregate::{AggregateConfig, aggregate},
        grouped::{Grouped, Parent},
        key::GroupKey,
        row::Row,
        value::Value,
    };
}
