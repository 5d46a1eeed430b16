use crate::Value;

/// Whether a statement produces rows addressable by column name or only by column position. A
/// statement decides this once, all rows it produces share the same style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStyle {
    /// Rows are [`Row::Named`].
    Named,
    /// Rows are [`Row::Positional`].
    Positional,
}

/// The field values of a single row of a result set.
///
/// Named rows still keep the order of the columns in the result set, so they can be accessed by
/// position as well.
#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    /// Pairs of column name and value, in column order.
    Named(Vec<(String, Value)>),
    /// Values in column order.
    Positional(Vec<Value>),
}

impl Row {
    /// Style of this row.
    pub fn fetch_style(&self) -> FetchStyle {
        match self {
            Row::Named(_) => FetchStyle::Named,
            Row::Positional(_) => FetchStyle::Positional,
        }
    }

    /// Value of the column with the given name. Always `None` for positional rows, since they do
    /// not know the names of their columns. If the result set contains the same name more than
    /// once, the first column wins.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Row::Named(fields) => fields
                .iter()
                .find(|(column, _)| column == name)
                .map(|(_, value)| value),
            Row::Positional(_) => None,
        }
    }

    /// Value of the column at the zero based `index`.
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        match self {
            Row::Named(fields) => fields.get(index).map(|(_, value)| value),
            Row::Positional(values) => values.get(index),
        }
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        match self {
            Row::Named(fields) => fields.len(),
            Row::Positional(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the values in column order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        let (named, positional) = match self {
            Row::Named(fields) => (Some(fields.iter().map(|(_, value)| value)), None),
            Row::Positional(values) => (None, Some(values.iter())),
        };
        named
            .into_iter()
            .flatten()
            .chain(positional.into_iter().flatten())
    }

    /// Column names in column order. `None` for positional rows.
    pub fn column_names(&self) -> Option<impl Iterator<Item = &str>> {
        match self {
            Row::Named(fields) => Some(fields.iter().map(|(name, _)| name.as_str())),
            Row::Positional(_) => None,
        }
    }

    /// Splits the row into the value of the first column and a row of the same style holding the
    /// remaining columns. `None` for an empty row.
    pub fn split_first(&self) -> Option<(&Value, Row)> {
        match self {
            Row::Named(fields) => fields
                .split_first()
                .map(|((_, first), rest)| (first, Row::Named(rest.to_vec()))),
            Row::Positional(values) => values
                .split_first()
                .map(|(first, rest)| (first, Row::Positional(rest.to_vec()))),
        }
    }
}
