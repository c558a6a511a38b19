use crate::{
    KEY_SENTINEL, MAX_KEY_COLUMNS,
    index::KeyTuple,
    row::{Row, RowError},
    schema::{ColumnSchema, SchemaError},
    source::LogicalLine,
    value::{Value, ValueKind},
};

///
/// DecodedRow
///

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedRow {
    pub row: Row,

    /// `None` when the schema flags more key columns than a tuple can hold.
    pub key: Option<KeyTuple>,

    /// `None` when the schema has no reverse-key column.
    pub reverse_key: Option<i64>,
}

///
/// RowDecoder
/// Schema-bound decoder for data lines.
///

#[derive(Clone, Copy, Debug)]
pub struct RowDecoder<'a> {
    schema: &'a ColumnSchema,
    reverse_column: Option<usize>,
}

impl<'a> RowDecoder<'a> {
    /// Bind a decoder to `schema`, resolving the reverse-key column by name.
    ///
    /// A missing reverse-key column is fine (rows just never reach the
    /// reverse index); a present one must be Int.
    pub fn new(schema: &'a ColumnSchema, reverse_key_column: &str) -> Result<Self, SchemaError> {
        let reverse_column = schema.position(reverse_key_column);

        if let Some(column) = schema.get(reverse_key_column)
            && column.kind != ValueKind::Int
        {
            return Err(SchemaError::ReverseKeyKind {
                name: column.name.clone(),
                kind: column.kind,
            });
        }

        Ok(Self {
            schema,
            reverse_column,
        })
    }

    #[must_use]
    pub const fn reverse_column(&self) -> Option<usize> {
        self.reverse_column
    }

    pub fn decode(&self, line: &LogicalLine) -> Result<DecodedRow, RowError> {
        let tokens: Vec<&str> = line.tokens().collect();
        if tokens.len() != self.schema.len() {
            return Err(RowError::Arity {
                line: line.number,
                expected: self.schema.len(),
                found: tokens.len(),
            });
        }

        let mut values = Vec::with_capacity(tokens.len());
        let mut slots = [KEY_SENTINEL; MAX_KEY_COLUMNS];

        for (column, token) in self.schema.columns().iter().zip(tokens) {
            let value = column
                .kind
                .parse(token)
                .map_err(|source| RowError::InvalidValue {
                    line: line.number,
                    column: column.name.clone(),
                    source,
                })?;

            // key columns are Int by schema construction
            if let Some(ordinal) = column.key_ordinal
                && let (Some(slot), Value::Int(v)) = (slots.get_mut(ordinal), &value)
            {
                *slot = *v;
            }

            values.push(value);
        }

        let key = (self.schema.key_arity() <= MAX_KEY_COLUMNS).then(|| KeyTuple::new(slots));
        let reverse_key = self
            .reverse_column
            .and_then(|idx| values.get(idx))
            .and_then(Value::as_int);

        Ok(DecodedRow {
            row: Row::new(values),
            key,
            reverse_key,
        })
    }
}
