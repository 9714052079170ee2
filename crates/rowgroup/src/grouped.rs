use crate::{Error, aggregate::AggregateObservability, key::GroupKey, row::Row, value::Value};
use derive_more::Deref;
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized aggregate.
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("expected exactly one parent, found 0")]
    NotFound,

    #[error("expected exactly one parent, found {count}")]
    NotUnique { count: u32 },
}

///
/// Children
///
/// Ordered, duplicate-friendly list of child values. Preserves insertion
/// order and serializes identically to `Vec<Value>`.
///
/// Mutation is append-only and crate-internal; `Children` does not expose
/// `DerefMut` so a materialized aggregate cannot be reordered in place.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Children(Vec<Value>);

impl Children {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Children {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

///
/// Parent
///
/// One aggregate output record: the parent identifier as it appeared on
/// the first row of its group, the parent's scalar fields in column order,
/// and the ordered children collected from every row sharing the
/// identifier.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parent {
    key: Value,
    fields: Vec<(String, Value)>,
    children: Children,
}

impl Parent {
    pub(crate) const fn start(key: Value, fields: Vec<(String, Value)>) -> Self {
        Self {
            key,
            fields,
            children: Children::new(),
        }
    }

    pub(crate) fn push_child(&mut self, child: Value) {
        self.children.push(child);
    }

    #[must_use]
    pub const fn key(&self) -> &Value {
        &self.key
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub const fn children(&self) -> &Children {
        &self.children
    }

    fn into_parts(self) -> (Value, Vec<(String, Value)>, Children) {
        (self.key, self.fields, self.children)
    }
}

/// Wire view of one parent: a flat object carrying the identifier under
/// `"id"`, the parent fields under their own names, and the children under
/// the aggregate's configured label.
struct ParentView<'a> {
    parent: &'a Parent,
    label: &'a str,
}

impl Serialize for ParentView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.parent.fields.len() + 2))?;
        map.serialize_entry("id", &self.parent.key)?;
        for (name, value) in &self.parent.fields {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(self.label, &self.parent.children)?;
        map.end()
    }
}

///
/// Grouped
///
/// Materialized aggregation result: parents in first-appearance order,
/// the wire label for the children field, and the counters observed
/// during the pass. The caller owns the structure; the byte encoding of
/// the serialized form stays with the caller's serializer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grouped {
    parents: Vec<Parent>,
    children_label: String,
    observability: AggregateObservability,
}

impl Grouped {
    pub(crate) const fn new(
        parents: Vec<Parent>,
        children_label: String,
        observability: AggregateObservability,
    ) -> Self {
        Self {
            parents,
            children_label,
            observability,
        }
    }

    //
    // Cardinality
    //

    #[must_use]
    /// Number of parents in the aggregate, truncated to `u32`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u32 {
        self.parents.len() as u32
    }

    #[must_use]
    /// True when no parents were produced.
    pub const fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Require exactly one parent.
    pub fn one(self) -> Result<Parent, Error> {
        let count = self.count();

        match count {
            0 => Err(ResponseError::NotFound.into()),
            1 => Ok(self.parents.into_iter().next().unwrap()),
            _ => Err(ResponseError::NotUnique { count }.into()),
        }
    }

    /// Require at most one parent.
    pub fn one_opt(self) -> Result<Option<Parent>, Error> {
        let count = self.count();

        match count {
            0 => Ok(None),
            1 => Ok(Some(self.parents.into_iter().next().unwrap())),
            _ => Err(ResponseError::NotUnique { count }.into()),
        }
    }

    //
    // Keys
    //

    #[must_use]
    /// Collect the parent identifiers in output order.
    pub fn keys(&self) -> Vec<Value> {
        self.parents.iter().map(|p| p.key().clone()).collect()
    }

    #[must_use]
    /// True when some parent answers to `key`, compared canonically so
    /// `Int(7)` finds a parent keyed by `Uint(7)`.
    pub fn contains_key(&self, key: &Value) -> bool {
        let Some(needle) = GroupKey::try_from_value(key) else {
            return false;
        };

        self.parents
            .iter()
            .any(|p| GroupKey::try_from_value(p.key()) == Some(needle))
    }

    //
    // Parents
    //

    #[must_use]
    /// Consume the aggregate and return its parents.
    pub fn parents(self) -> Vec<Parent> {
        self.parents
    }

    /// Iterate parents without consuming the aggregate.
    pub fn parents_iter(&self) -> std::slice::Iter<'_, Parent> {
        self.parents.iter()
    }

    #[must_use]
    pub fn children_label(&self) -> &str {
        &self.children_label
    }

    #[must_use]
    pub const fn observability(&self) -> AggregateObservability {
        self.observability
    }

    //
    // Flattening
    //

    #[must_use]
    /// Re-expand parents into the equivalent flat row sequence: one row per
    /// child, parent fields replicated. The inverse of aggregation; feeding
    /// the result back through `aggregate` reproduces this structure.
    pub fn flatten(self) -> Vec<Row> {
        let mut rows = Vec::new();

        for parent in self.parents {
            let (key, fields, children) = parent.into_parts();
            for child in children {
                let mut row = Row::new(key.clone(), child);
                for (name, value) in &fields {
                    row = row.with_field(name.clone(), value.clone());
                }
                rows.push(row);
            }
        }

        rows
    }
}

impl IntoIterator for Grouped {
    type Item = Parent;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.parents.into_iter()
    }
}

impl Serialize for Grouped {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.parents.len()))?;
        for parent in &self.parents {
            seq.serialize_element(&ParentView {
                parent,
                label: &self.children_label,
            })?;
        }
        seq.end()
    }
}

///
/// TESTS
///
