use crate::{
    error::LoadError,
    schema::{Column, ColumnSchema, HeaderSection, SchemaError},
    source::{LogicalLine, LogicalLines},
    value::ValueKind,
};
use std::{collections::HashSet, io::BufRead};
use tracing::debug;

/// Consume the four header lines from `lines` and build the column schema.
///
/// Leaves `lines` positioned at the first data line. The key column limit
/// is not checked here; it applies only once the whole file is read.
pub fn parse_header<R: BufRead>(lines: &mut LogicalLines<R>) -> Result<ColumnSchema, LoadError> {
    let mut parser = HeaderParser::default();

    loop {
        let Some(line) = lines.next() else {
            return Err(SchemaError::TruncatedHeader {
                missing: parser.section,
            }
            .into());
        };
        let line = line.map_err(|source| LoadError::Read { source })?;

        if let Some(schema) = parser.feed(&line)? {
            return Ok(schema);
        }
    }
}

///
/// HeaderParser
///
/// Line-at-a-time header state machine; `section` is the line it expects next.
///

struct HeaderParser {
    section: HeaderSection,
    count: usize,
    names: Vec<String>,
    kinds: Vec<ValueKind>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            section: HeaderSection::ColumnCount,
            count: 0,
            names: Vec::new(),
            kinds: Vec::new(),
        }
    }
}

impl HeaderParser {
    // Returns the schema once the key flag line has been consumed.
    fn feed(&mut self, line: &LogicalLine) -> Result<Option<ColumnSchema>, SchemaError> {
        match self.section {
            HeaderSection::ColumnCount => {
                self.count = parse_count(line)?;
                self.section = HeaderSection::Names;
            }
            HeaderSection::Names => {
                self.names = self.parse_names(line)?;
                self.section = HeaderSection::Types;
            }
            HeaderSection::Types => {
                self.kinds = self.parse_kinds(line)?;
                self.section = HeaderSection::KeyFlags;
            }
            HeaderSection::KeyFlags => {
                let columns = self.parse_key_flags(line)?;
                let schema = ColumnSchema::new(columns);
                debug!(
                    columns = schema.len(),
                    keys = ?schema.key_names(),
                    "map header parsed"
                );

                return Ok(Some(schema));
            }
        }

        debug!(line = line.number, next = %self.section, "header line accepted");

        Ok(None)
    }

    fn expect_tokens<'a>(
        &self,
        line: &'a LogicalLine,
        section: HeaderSection,
    ) -> Result<Vec<&'a str>, SchemaError> {
        let tokens: Vec<&str> = line.tokens().collect();
        if tokens.len() != self.count {
            return Err(SchemaError::TokenCount {
                line: line.number,
                section,
                expected: self.count,
                found: tokens.len(),
            });
        }

        Ok(tokens)
    }

    fn parse_names(&self, line: &LogicalLine) -> Result<Vec<String>, SchemaError> {
        let tokens = self.expect_tokens(line, HeaderSection::Names)?;

        let mut seen = HashSet::with_capacity(tokens.len());
        for name in &tokens {
            if !seen.insert(*name) {
                return Err(SchemaError::DuplicateColumn {
                    line: line.number,
                    name: (*name).to_string(),
                });
            }
        }

        Ok(tokens.into_iter().map(str::to_string).collect())
    }

    fn parse_kinds(&self, line: &LogicalLine) -> Result<Vec<ValueKind>, SchemaError> {
        self.expect_tokens(line, HeaderSection::Types)?
            .into_iter()
            .zip(&self.names)
            .map(|(token, name)| {
                ValueKind::from_token(token).ok_or_else(|| SchemaError::UnknownType {
                    line: line.number,
                    name: name.clone(),
                    token: token.to_string(),
                })
            })
            .collect()
    }

    fn parse_key_flags(&mut self, line: &LogicalLine) -> Result<Vec<Column>, SchemaError> {
        let tokens = self.expect_tokens(line, HeaderSection::KeyFlags)?;
        let names = std::mem::take(&mut self.names);

        let mut columns = Vec::with_capacity(self.count);
        let mut next_ordinal = 0;

        for ((token, name), &kind) in tokens.into_iter().zip(names).zip(&self.kinds) {
            let flag: i64 = token.parse().map_err(|_| SchemaError::KeyFlag {
                line: line.number,
                name: name.clone(),
                token: token.to_string(),
            })?;

            let key_ordinal = if flag == 0 {
                None
            } else {
                if kind != ValueKind::Int {
                    return Err(SchemaError::KeyKind {
                        line: line.number,
                        name,
                        kind,
                    });
                }
                next_ordinal += 1;
                Some(next_ordinal - 1)
            };

            columns.push(Column {
                name,
                kind,
                key_ordinal,
            });
        }

        Ok(columns)
    }
}

fn parse_count(line: &LogicalLine) -> Result<usize, SchemaError> {
    let tokens: Vec<&str> = line.tokens().collect();
    let [token] = tokens.as_slice() else {
        return Err(SchemaError::TokenCount {
            line: line.number,
            section: HeaderSection::ColumnCount,
            expected: 1,
            found: tokens.len(),
        });
    };

    match token.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(SchemaError::ColumnCount {
            line: line.number,
            token: (*token).to_string(),
        }),
    }
}
