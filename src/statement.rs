use std::time::SystemTime;

use crate::{ColumnDescription, DriverError, FetchStyle, Row};

/// Capabilities a cursor requires from an executed statement. Implemented by drivers.
///
/// A [`crate::Cursor`] drives exactly one statement. The statement owns the live database cursor
/// and performs the physical fetches, the [`crate::Cursor`] owns the navigation state on top of
/// it. Implementations are not required to be thread safe, the cursor never calls them
/// concurrently.
pub trait Statement {
    /// Point in time the statement has been executed.
    fn time_created(&self) -> SystemTime;

    /// `true` if the statement supports [`Self::fetch`] with a row number, i.e. it can move
    /// backwards or jump to arbitrary rows. If `false` the cursor falls back to materializing the
    /// result set using [`Self::fetch_all`] the first time random access is requested.
    fn can_seek(&self) -> bool;

    /// Whether the rows returned by this statement are named or positional. Must not change over
    /// the lifetime of the statement.
    fn fetch_style(&self) -> FetchStyle;

    /// Total number of rows in the current result set. `None` if the driver can not tell before
    /// all rows have been fetched.
    fn row_count(&self) -> Result<Option<usize>, DriverError>;

    /// Number of columns in the current result set.
    fn column_count(&self) -> Result<usize, DriverError>;

    /// Fetches a row.
    ///
    /// * `None`: The next row in sequence.
    /// * `Some(n)`: The row with the zero based index `n`. Subsequent sequential fetches continue
    ///   with row `n + 1`. Only called if [`Self::can_seek`] is `true`.
    ///
    /// Returns `Ok(None)` if there is no such row.
    fn fetch(&mut self, row_number: Option<usize>) -> Result<Option<Row>, DriverError>;

    /// All rows of the current result set, starting with row `0`, regardless of how many rows have
    /// already been fetched. Called at most once per result set, and only if [`Self::can_seek`] is
    /// `false`.
    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError>;

    /// Describes the column at the zero based `index`. `None` if the driver does not provide
    /// column metadata.
    fn column_metadata(&self, index: usize) -> Result<Option<ColumnDescription>, DriverError>;

    /// Advances to the next result set for statements producing more than one. `true` if there is
    /// another result set.
    fn next_rowset(&mut self) -> Result<bool, DriverError> {
        Ok(false)
    }

    /// Releases the database cursor. Must be idempotent.
    fn close(&mut self) -> Result<(), DriverError>;
}

impl<S> Statement for &mut S
where
    S: Statement + ?Sized,
{
    fn time_created(&self) -> SystemTime {
        (**self).time_created()
    }

    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }

    fn fetch_style(&self) -> FetchStyle {
        (**self).fetch_style()
    }

    fn row_count(&self) -> Result<Option<usize>, DriverError> {
        (**self).row_count()
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        (**self).column_count()
    }

    fn fetch(&mut self, row_number: Option<usize>) -> Result<Option<Row>, DriverError> {
        (**self).fetch(row_number)
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        (**self).fetch_all()
    }

    fn column_metadata(&self, index: usize) -> Result<Option<ColumnDescription>, DriverError> {
        (**self).column_metadata(index)
    }

    fn next_rowset(&mut self) -> Result<bool, DriverError> {
        (**self).next_rowset()
    }

    fn close(&mut self) -> Result<(), DriverError> {
        (**self).close()
    }
}

impl<S> Statement for Box<S>
where
    S: Statement + ?Sized,
{
    fn time_created(&self) -> SystemTime {
        (**self).time_created()
    }

    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }

    fn fetch_style(&self) -> FetchStyle {
        (**self).fetch_style()
    }

    fn row_count(&self) -> Result<Option<usize>, DriverError> {
        (**self).row_count()
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        (**self).column_count()
    }

    fn fetch(&mut self, row_number: Option<usize>) -> Result<Option<Row>, DriverError> {
        (**self).fetch(row_number)
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        (**self).fetch_all()
    }

    fn column_metadata(&self, index: usize) -> Result<Option<ColumnDescription>, DriverError> {
        (**self).column_metadata(index)
    }

    fn next_rowset(&mut self) -> Result<bool, DriverError> {
        (**self).next_rowset()
    }

    fn close(&mut self) -> Result<(), DriverError> {
        (**self).close()
    }
}
