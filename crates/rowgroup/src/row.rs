use crate::value::Value;

///
/// Row
///
/// One flat record from a relational join: the parent identifier, the
/// parent-side scalar columns, and the single child-side scalar this row
/// contributes.
///
/// The identifier is carried raw and validated at aggregation time, so a
/// query boundary can hand rows over without pre-checking them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    key: Value,
    fields: Vec<(String, Value)>,
    child: Value,
}

impl Row {
    #[must_use]
    pub fn new(key: impl Into<Value>, child: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            fields: Vec::new(),
            child: child.into(),
        }
    }

    /// Append one named parent-side column.
    ///
    /// Field order is preserved; rows sharing an identifier are expected to
    /// carry identical parent fields (an upstream join guarantee).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
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
    pub const fn child(&self) -> &Value {
        &self.child
    }

    pub(crate) fn into_parts(self) -> (Value, Vec<(String, Value)>, Value) {
        (self.key, self.fields, self.child)
    }
}

///
/// TESTS
///
