//! Module: key
//! Responsibility: canonical parent-identifier materialization for grouping.
//! Does not own: row validation policy or the grouping pass itself.
//! Boundary: key canonicalization consumed by the aggregate slot lookup.

use crate::value::Value;
use std::fmt;

///
/// GroupKey
///
/// Canonical parent identifier used by the aggregate slot lookup.
/// `Int` and `Uint` identifiers unify into one signed 128-bit key so
/// `Int(7)` and `Uint(7)` address the same parent. Keys may be negative
/// or sparse; nothing assumes contiguity or a positional relationship to
/// output slots.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GroupKey(i128);

impl GroupKey {
    /// Canonicalize a raw identifier value.
    /// Returns `None` when the value cannot key a group.
    #[must_use]
    pub const fn try_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(Self(*v as i128)),
            Value::Uint(v) => Some(Self(*v as i128)),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// TESTS
///
