use crate::{
    row::Row,
    schema::ColumnSchema,
    value::Value,
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Record
///
/// One row materialized against its schema.
/// Every column becomes a named field except the reverse-key column, which
/// fills `reverse_key` instead. An invalid record carries no fields.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Record {
    valid: bool,
    fields: BTreeMap<String, Value>,
    reverse_key: Option<i64>,
}

impl Record {
    /// The "not found" record.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }

    pub(crate) fn materialize(schema: &ColumnSchema, row: &Row, reverse_column: Option<usize>) -> Self {
        let mut record = Self {
            valid: true,
            ..Self::default()
        };

        for (idx, (column, value)) in schema.columns().iter().zip(row.iter()).enumerate() {
            if Some(idx) == reverse_column {
                record.reverse_key = value.as_int();
            } else {
                record.fields.insert(column.name.clone(), value.clone());
            }
        }

        record
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Reverse-key value; `None` on a miss or when the schema has no
    /// reverse-key column.
    #[must_use]
    pub const fn reverse_key(&self) -> Option<i64> {
        self.reverse_key
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }
}
