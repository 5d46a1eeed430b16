use std::collections::HashMap;

use crate::{Cursor, Error, Row, Statement, Value};

/// Remaining rows of a cursor reshaped into an associative array, keyed by the value of the first
/// column. See [`Cursor::to_mapping`].
#[derive(Clone, Debug, PartialEq)]
pub enum Mapping {
    /// Value of the second column for each key. Produced for result sets with exactly two columns.
    Values(HashMap<String, Value>),
    /// All columns but the first for each key.
    Rows(HashMap<String, Row>),
}

impl Mapping {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        match self {
            Mapping::Values(values) => values.len(),
            Mapping::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Some` if this is [`Mapping::Values`].
    pub fn as_values(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Mapping::Values(values) => Some(values),
            Mapping::Rows(_) => None,
        }
    }

    /// `Some` if this is [`Mapping::Rows`].
    pub fn as_rows(&self) -> Option<&HashMap<String, Row>> {
        match self {
            Mapping::Values(_) => None,
            Mapping::Rows(rows) => Some(rows),
        }
    }
}

impl<S> Cursor<S>
where
    S: Statement,
{
    /// Consumes the remaining rows, starting with the current one, into a [`Mapping`]. Keys are
    /// the values of the first column, converted to text with surrounding whitespace trimmed.
    ///
    /// * Exactly two columns and `force_rows` is `false`: Each key maps to the value of the second
    ///   column ([`Mapping::Values`]).
    /// * More than two columns, or `force_rows` is `true`: Each key maps to a row holding all the
    ///   other columns ([`Mapping::Rows`]).
    ///
    /// If several rows share the same key, the row which comes last wins.
    ///
    /// # Return
    ///
    /// `None` if the result set has less than two columns. Afterwards the cursor is at end of
    /// data, so calling this method a second time returns an empty mapping.
    pub fn to_mapping(&mut self, force_rows: bool) -> Result<Option<Mapping>, Error> {
        if self.field_count() < 2 {
            return Ok(None);
        }
        let mapping = if self.field_count() == 2 && !force_rows {
            let mut values = HashMap::new();
            for row in self.rows() {
                let row = row?;
                let (Some(key), Some(value)) = (row.get_by_index(0), row.get_by_index(1)) else {
                    continue;
                };
                values.insert(key_of(key), value.clone());
            }
            Mapping::Values(values)
        } else {
            let mut rows = HashMap::new();
            for row in self.rows() {
                let row = row?;
                if let Some((key, rest)) = row.split_first() {
                    rows.insert(key_of(key), rest);
                }
            }
            Mapping::Rows(rows)
        };
        Ok(Some(mapping))
    }
}

fn key_of(value: &Value) -> String {
    value.to_string().trim().to_owned()
}
