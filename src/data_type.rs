/// Enumeration over the SQL data types a statement may report for a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DataType {
    /// The type is not known.
    #[default]
    Unknown,
    /// `Char(n)`. Character string of fixed length.
    Char {
        /// Column size in characters.
        length: usize,
    },
    /// `Varchar(n)`. Variable length character string.
    Varchar {
        /// Maximum length of the character string.
        length: usize,
    },
    /// `Numeric(p,s)`. Signed, exact, numeric value with a precision p and scale s.
    Numeric {
        /// Total number of digits.
        precision: usize,
        /// Number of decimal digits.
        scale: i16,
    },
    /// `Decimal(p,s)`. Signed, exact, numeric value with a precision of at least p and scale s.
    Decimal {
        /// Total number of digits.
        precision: usize,
        /// Number of decimal digits.
        scale: i16,
    },
    /// `Integer`. 32 Bit Integer
    Integer,
    /// `Smallint`. 16 Bit Integer
    SmallInt,
    /// `BIGINT`. 64 Bit Integer
    BigInt,
    /// `TINYINT`. 8 Bit Integer
    TinyInt,
    /// `Real`. Signed, approximate, numeric value with a binary precision 24.
    Real,
    /// `Double Precision`. Signed, approximate, numeric value with a binary precision 53.
    Double,
    /// `BIT`. Single bit binary data.
    Bit,
    /// `Date`. Year, month, and day fields.
    Date,
    /// `Time`. Hour, minute, and second fields. Precision p indicates the seconds precision.
    Time { precision: i16 },
    /// `Timestamp`. Year, month, day, hour, minute, and second fields.
    Timestamp { precision: i16 },
    /// `Binary(n)`. Binary data of fixed length.
    Binary { length: usize },
    /// `Varbinary(n)`. Binary data of variable length.
    Varbinary { length: usize },
    /// The driver returned a type, but it is not among the other types of this enumeration. This
    /// is a catchall, in case the data source supports custom or non-standard types.
    Other {
        /// Name of the type as reported by the driver.
        name: &'static str,
    },
}

impl DataType {
    /// Maximum length of a value in characters or bytes for character and binary types. `None`
    /// for all other types.
    pub fn length(&self) -> Option<usize> {
        match *self {
            DataType::Char { length }
            | DataType::Varchar { length }
            | DataType::Binary { length }
            | DataType::Varbinary { length } => Some(length),
            _ => None,
        }
    }

    /// `true` for the character types.
    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Char { .. } | DataType::Varchar { .. })
    }
}
