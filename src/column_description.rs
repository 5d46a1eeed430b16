use crate::DataType;

/// Indication of whether a column is nullable or not.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Nullability {
    /// Indicates that we do not know whether or not the column is Nullable.
    #[default]
    Unknown,
    /// The column may hold NULL values.
    Nullable,
    /// The column can not hold NULL values.
    NoNulls,
}

/// Describes the type and attributes of a column.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct ColumnDescription {
    /// Column name. May be empty if unavailable.
    pub name: String,
    /// Type of the column
    pub data_type: DataType,
    /// Indicates whether the column is nullable or not.
    pub nullability: Nullability,
}

impl ColumnDescription {
    /// In production, an 'empty' [`ColumnDescription`] is expected to be constructed via the
    /// [`Default`] trait. It is then filled in by the statement. Yet for test cases it is
    /// convenient to create a [`ColumnDescription`] in one go.
    pub fn new(name: &str, data_type: DataType, nullability: Nullability) -> Self {
        Self {
            name: name.to_owned(),
            data_type,
            nullability,
        }
    }

    /// `true` if the column is `Nullable` or it is not know whether the column is nullable. `false`
    /// if and only if the column is `NoNulls`.
    pub fn could_be_nullable(&self) -> bool {
        match self.nullability {
            Nullability::Nullable | Nullability::Unknown => true,
            Nullability::NoNulls => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnDescription, Nullability};
    use crate::DataType;

    #[test]
    fn unknown_nullability_could_be_null() {
        let unknown = ColumnDescription::new("a", DataType::Integer, Nullability::Unknown);
        let no_nulls = ColumnDescription::new("b", DataType::Integer, Nullability::NoNulls);

        assert!(unknown.could_be_nullable());
        assert!(!no_nulls.could_be_nullable());
    }
}
