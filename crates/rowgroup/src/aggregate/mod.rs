//! Module: aggregate
//! Responsibility: one-pass grouping of flat join rows into nested parents.
//! Does not own: identifier canonicalization or response cardinality helpers.
//! Boundary: runs after the upstream fetch completes and before the caller
//! serializes the result; synchronous, no I/O, no shared state.

#[cfg(test)]
mod tests;

use crate::{
    Error,
    grouped::{Grouped, Parent},
    key::GroupKey,
    row::Row,
    value::Value,
};
use std::collections::HashMap;
use thiserror::Error as ThisError;

const DEFAULT_CHILDREN_LABEL: &str = "children";

///
/// InvalidRowError
///
/// A row cannot identify its parent. Raised on the first offending row;
/// the whole batch aborts so callers never observe a truncated nested
/// structure.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum InvalidRowError {
    #[error("row {index}: parent identifier is null")]
    MissingKey { index: usize },

    #[error("row {index}: parent identifier must be an integer, found {type_label}: {value}")]
    UnkeyableKey {
        index: usize,
        type_label: &'static str,
        value: Value,
    },
}

///
/// AggregateConfig
///
/// Per-call aggregation policy. Currently only the wire label for the
/// nested children field (e.g. `"tags"` for a message/tag join).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateConfig {
    children_label: String,
}

impl AggregateConfig {
    #[must_use]
    pub fn new(children_label: impl Into<String>) -> Self {
        Self {
            children_label: children_label.into(),
        }
    }

    #[must_use]
    pub fn children_label(&self) -> &str {
        &self.children_label
    }
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHILDREN_LABEL)
    }
}

///
/// AggregateObservability
///
/// Counters observed during one aggregation pass, projected for
/// route/metrics reporting.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AggregateObservability {
    rows: u64,
    parents: u64,
    children: u64,
}

impl AggregateObservability {
    /// Return observed row consumption.
    #[must_use]
    pub const fn rows(self) -> u64 {
        self.rows
    }

    /// Return observed parent starts.
    #[must_use]
    pub const fn parents(self) -> u64 {
        self.parents
    }

    /// Return observed child attachments.
    #[must_use]
    pub const fn children(self) -> u64 {
        self.children
    }
}

/// aggregate
///
/// Group flat join rows into nested parents, one per distinct identifier,
/// in first-appearance order.
///
/// Rows are consumed in input order. A parent is started from the first
/// row carrying its identifier; every row appends its child value to its
/// parent's children. Identifier routing is a genuine hash lookup keyed by
/// [`GroupKey`], so a group whose rows are interleaved with another
/// group's still lands in one parent and output slots never depend on
/// identifier arithmetic.
///
/// The first row with a null or non-integer identifier aborts the whole
/// batch with [`InvalidRowError`]; no partial output is returned.
pub fn aggregate(rows: Vec<Row>, config: &AggregateConfig) -> Result<Grouped, Error> {
    let mut parents: Vec<Parent> = Vec::new();
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();
    let mut observability = AggregateObservability::default();

    for (index, row) in rows.into_iter().enumerate() {
        let (key_value, fields, child) = row.into_parts();

        if key_value.is_null() {
            return Err(InvalidRowError::MissingKey { index }.into());
        }
        let Some(key) = GroupKey::try_from_value(&key_value) else {
            return Err(InvalidRowError::UnkeyableKey {
                index,
                type_label: key_value.type_label(),
                value: key_value,
            }
            .into());
        };

        observability.rows = observability.rows.saturating_add(1);

        let slot = match slots.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = parents.len();
                parents.push(Parent::start(key_value, fields));
                slots.insert(key, slot);
                observability.parents = observability.parents.saturating_add(1);
                slot
            }
        };

        parents[slot].push_child(child);
        observability.children = observability.children.saturating_add(1);
    }

    Ok(Grouped::new(
        parents,
        config.children_label().to_string(),
        observability,
    ))
}
