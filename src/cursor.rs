mod mapping;
mod rows;
mod strategy;

use std::time::SystemTime;

use log::{debug, error, warn};

use crate::{
    ColumnDescription, Error, FetchStyle, Row, Statement, Value, error::IntoCursorResult,
};

use self::strategy::{FetchStrategy, open};

pub use self::{mapping::Mapping, rows::Rows};

/// Cursors are used to navigate the result set of an executed [`Statement`].
///
/// A cursor is always positioned on a single row, the current row, or at the end of the result
/// set (end of data). Right after creation it is positioned on the first row. It can be moved
/// forward with [`Self::advance`] and to an arbitrary row using [`Self::seek`]. Statements which
/// can only move forward still support [`Self::seek`]. The first time random access is requested,
/// the entire result set is fetched into memory and all further navigation is served from there.
/// Both ways yield identical rows.
///
/// A cursor holds mutable navigation state and is intended to be driven by one owner. It does not
/// synchronize access to itself or the statement.
///
/// # Example
///
/// ```
/// use row_cursor::{Cursor, MemoryStatement, Value};
///
/// let statement = MemoryStatement::new(
///     &["title", "year"],
///     vec![
///         vec![Value::from("Jurassic Park"), Value::from(1993)],
///         vec![Value::from("2001: A Space Odyssey"), Value::from(1968)],
///     ],
/// )
/// .seekable(false);
///
/// let mut cursor = Cursor::new(statement)?;
/// let mut titles = Vec::new();
/// while !cursor.is_end_of_data() {
///     titles.push(cursor.current_field_value("title").unwrap().to_string());
///     cursor.advance()?;
/// }
/// assert_eq!(vec!["Jurassic Park", "2001: A Space Odyssey"], titles);
///
/// // Moving backwards works, even though the statement can not seek.
/// assert!(cursor.seek_first()?);
/// assert_eq!(Some(0), cursor.current_row_index());
/// # Ok::<(), row_cursor::Error>(())
/// ```
pub struct Cursor<S: Statement> {
    /// `None` once the cursor has been closed.
    statement: Option<S>,
    strategy: FetchStrategy,
    fetch_style: FetchStyle,
    time_created: SystemTime,
    /// `None` if the statement could not tell us (yet).
    row_count: Option<usize>,
    field_count: usize,
    /// `None` before the first row has been fetched.
    current_row_index: Option<usize>,
    current_row: Option<Row>,
    end_of_data: bool,
}

impl<S> Drop for Cursor<S>
where
    S: Statement,
{
    fn drop(&mut self) {
        // Dropping a cursor is not supposed to fail, so the best we can do is to tell someone.
        if let Err(e) = self.close() {
            error!("Unexpected error closing cursor: {e}");
        }
    }
}

impl<S> Cursor<S>
where
    S: Statement,
{
    /// Takes ownership of an executed statement and positions the cursor on its first row. For an
    /// empty result set the cursor is at end of data right away.
    ///
    /// Fails if the statement fails to report its metadata or to fetch the first row. In that case
    /// the statement is closed before the error is returned.
    pub fn new(statement: S) -> Result<Self, Error> {
        let mut cursor = Cursor {
            fetch_style: statement.fetch_style(),
            time_created: statement.time_created(),
            strategy: FetchStrategy::new(statement.can_seek()),
            statement: Some(statement),
            row_count: None,
            field_count: 0,
            current_row_index: None,
            current_row: None,
            end_of_data: false,
        };
        cursor.prime()?;
        Ok(cursor)
    }

    /// Captures the metadata of the current result set of the statement and fetches its first row.
    /// The cursor is only modified once all of these succeeded.
    fn prime(&mut self) -> Result<(), Error> {
        let statement = open(&mut self.statement, "row_count")?;
        let mut row_count = statement.row_count().for_function("row_count")?;
        let field_count = statement.column_count().for_function("column_count")?;
        let mut strategy = FetchStrategy::new(statement.can_seek());
        let first_row = if row_count == Some(0) {
            None
        } else {
            strategy.next_row(&mut self.statement, 0)?
        };
        if first_row.is_none() && row_count.is_none() {
            row_count = Some(0);
        }
        debug!(
            "Cursor over result set. Rows: {:?}, Columns: {}, Seekable: {}",
            row_count,
            field_count,
            strategy.is_live()
        );
        self.row_count = row_count;
        self.field_count = field_count;
        self.strategy = strategy;
        self.current_row_index = Some(0);
        self.end_of_data = first_row.is_none();
        self.current_row = first_row;
        Ok(())
    }

    /// Moves the cursor to the next row.
    ///
    /// # Return
    ///
    /// `true` if the cursor is now positioned on a row. `false` if it moved past the last row, or
    /// has already been at end of data. Once at end of data only [`Self::seek`] is able to
    /// position the cursor on a row again.
    pub fn advance(&mut self) -> Result<bool, Error> {
        if self.end_of_data {
            return Ok(false);
        }
        let index = self.current_row_index.map_or(0, |index| index + 1);
        if self.row_count.is_some_and(|row_count| index >= row_count) {
            self.current_row_index = Some(index);
            self.reach_end_of_data();
            return Ok(false);
        }
        let row = self.strategy.next_row(&mut self.statement, index)?;
        self.current_row_index = Some(index);
        match row {
            Some(row) => {
                self.current_row = Some(row);
                Ok(true)
            }
            None => {
                // We ran into the end of the result set, so now we know how large it is.
                if self.row_count.is_none() {
                    self.row_count = Some(index);
                }
                self.reach_end_of_data();
                Ok(false)
            }
        }
    }

    /// Positions the cursor on the row with the zero based index `row_number`.
    ///
    /// If the row count is known and `row_number` lies beyond the last row, the cursor is moved to
    /// the second to last row (index `row_count - 2`, or `0` for results with less than two rows)
    /// instead.
    ///
    /// Forward only statements are materialized in memory by the first call to this method, which
    /// also makes their row count known before it is compared with `row_number`.
    ///
    /// # Return
    ///
    /// `true` if the cursor is now positioned on a row, `false` if there is no such row. In the
    /// latter case the cursor is at end of data.
    pub fn seek(&mut self, row_number: usize) -> Result<bool, Error> {
        if self.current_row_index == Some(row_number) && self.current_row.is_some() {
            return Ok(true);
        }
        if !self.strategy.is_live() {
            // Clamp against the row count of the materialized result set, not the estimate.
            self.strategy.materialize(&mut self.statement)?;
            self.adopt_materialized_row_count();
        }
        let row_number = match self.row_count {
            Some(row_count) if row_number >= row_count => row_count.saturating_sub(2),
            _ => row_number,
        };
        if self.current_row_index == Some(row_number) && self.current_row.is_some() {
            return Ok(true);
        }
        let row = self.strategy.row_at(&mut self.statement, row_number)?;
        self.current_row_index = Some(row_number);
        match row {
            Some(row) => {
                self.current_row = Some(row);
                self.end_of_data = false;
                Ok(true)
            }
            None => {
                self.reach_end_of_data();
                Ok(false)
            }
        }
    }

    /// Positions the cursor on the first row. Same as `seek(0)`, which does not touch the statement
    /// if the cursor is already there.
    pub fn seek_first(&mut self) -> Result<bool, Error> {
        self.seek(0)
    }

    /// Positions the cursor on the row with index `row_count - 2` (`0` for a single row), matching
    /// the overflow behavior of [`Self::seek`]. If the row count is not known yet, it is determined
    /// first, either by materializing the result set or by moving forward to its end.
    ///
    /// `false` if the result set is empty.
    pub fn seek_last(&mut self) -> Result<bool, Error> {
        let row_count = match self.row_count {
            Some(row_count) => row_count,
            None => self.determine_row_count()?,
        };
        if row_count == 0 {
            self.reach_end_of_data();
            return Ok(false);
        }
        self.seek(row_count.saturating_sub(2))
    }

    fn determine_row_count(&mut self) -> Result<usize, Error> {
        if self.strategy.is_live() {
            if self.end_of_data && !self.seek(0)? {
                self.row_count = Some(0);
            }
            while self.advance()? {}
        } else {
            self.strategy.materialize(&mut self.statement)?;
            self.adopt_materialized_row_count();
        }
        Ok(self.row_count.unwrap_or_default())
    }

    /// A materialized buffer always holds the entire result set, so its length is the row count.
    fn adopt_materialized_row_count(&mut self) {
        let Some(len) = self.strategy.materialized_len() else {
            return;
        };
        match self.row_count {
            Some(row_count) if row_count != len => {
                warn!(
                    "Statement reported {row_count} rows, but materializing the result set yielded \
                    {len}. Using {len}."
                );
                self.row_count = Some(len);
            }
            Some(_) => (),
            None => self.row_count = Some(len),
        }
    }

    fn reach_end_of_data(&mut self) {
        self.current_row = None;
        self.end_of_data = true;
    }

    /// Value of the field with the name `name` in the current row. `None` at end of data, if there
    /// is no such column or if the statement produces positional rows.
    pub fn current_field_value(&self, name: &str) -> Option<&Value> {
        self.current_row.as_ref()?.get(name)
    }

    /// Value of the field at the zero based column `index` in the current row. `None` at end of
    /// data or if there is no such column.
    pub fn current_field_value_at(&self, index: usize) -> Option<&Value> {
        self.current_row.as_ref()?.get_by_index(index)
    }

    /// The row the cursor is positioned on. `None` at end of data.
    pub fn current_row(&self) -> Option<&Row> {
        self.current_row.as_ref()
    }

    /// Returns a copy of the current row and moves the cursor to the next one. `None` at end of
    /// data.
    pub fn fetch_row(&mut self) -> Result<Option<Row>, Error> {
        let row = self.current_row.clone();
        if row.is_some() {
            self.advance()?;
        }
        Ok(row)
    }

    /// Iterates over the remaining rows, starting with the current one. See [`Rows`].
    pub fn rows(&mut self) -> Rows<'_, S> {
        Rows::new(self)
    }

    /// Collects up to `limit` remaining rows, or all of them if `limit` is `None`. Afterwards the
    /// cursor is positioned on the first row not collected.
    pub fn get_rows(&mut self, limit: Option<usize>) -> Result<Vec<Row>, Error> {
        let rows = self.rows();
        match limit {
            Some(limit) => rows.take(limit).collect(),
            None => rows.collect(),
        }
    }

    /// Total number of rows in the result set. `None` if the statement could not tell, and the
    /// cursor did not reach the end of the result set yet.
    pub fn row_count(&self) -> Option<usize> {
        self.row_count
    }

    /// Number of columns in the result set.
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Zero based index of the current row. After moving past the last row, this is the number of
    /// rows in the result set.
    pub fn current_row_index(&self) -> Option<usize> {
        self.current_row_index
    }

    /// `true` if there is no current row.
    pub fn is_end_of_data(&self) -> bool {
        self.end_of_data
    }

    /// `true` if the statement supports seeking natively and no rows are buffered in memory.
    pub fn can_seek(&self) -> bool {
        self.strategy.is_live()
    }

    /// Whether rows of this cursor are named or positional.
    pub fn fetch_style(&self) -> FetchStyle {
        self.fetch_style
    }

    /// Point in time the underlying statement has been executed.
    pub fn time_created(&self) -> SystemTime {
        self.time_created
    }

    /// The underlying statement. `None` after the cursor has been closed.
    pub fn statement(&self) -> Option<&S> {
        self.statement.as_ref()
    }

    /// Moves on to the next result set, for statements producing more than one.
    ///
    /// # Return
    ///
    /// `true` if there is another result set. The cursor is then positioned on its first row, with
    /// row and field count of the new result set. `false` if there are no more result sets, in
    /// which case the cursor stays as it is. If the new result set can not be entered, the error
    /// is returned and the cursor also keeps its previous state.
    pub fn next_result_set(&mut self) -> Result<bool, Error> {
        let has_next = open(&mut self.statement, "next_rowset")?
            .next_rowset()
            .for_function("next_rowset")?;
        if has_next {
            self.prime()?;
        }
        Ok(has_next)
    }

    /// Releases the statement. Closing an already closed cursor does nothing. Rows already
    /// buffered in memory can still be navigated after closing.
    pub fn close(&mut self) -> Result<(), Error> {
        if let Some(mut statement) = self.statement.take() {
            debug!("Closing cursor.");
            statement.close().for_function("close")?;
        }
        Ok(())
    }

    /// `true` once [`Self::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.statement.is_none()
    }

    /// Describes the column at the zero based `index`.
    ///
    /// Fails with [`Error::NotSupported`] if the statement does not provide column metadata.
    pub fn column_metadata(&self, index: usize) -> Result<ColumnDescription, Error> {
        let function = "column_metadata";
        let statement = self
            .statement
            .as_ref()
            .ok_or(Error::CursorClosed { function })?;
        statement
            .column_metadata(index)
            .for_function(function)?
            .ok_or(Error::NotSupported { function })
    }

    /// Descriptions of all columns in the result set.
    pub fn column_descriptions(&self) -> Result<Vec<ColumnDescription>, Error> {
        (0..self.field_count)
            .map(|index| self.column_metadata(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::{MemoryStatement, Value};

    fn numbers(num_rows: i64) -> MemoryStatement {
        let rows = (0..num_rows).map(|i| vec![Value::from(i)]).collect();
        MemoryStatement::new(&["n"], rows)
    }

    #[test]
    fn failed_fetch_does_not_move_cursor() {
        let statement = numbers(3).with_failing_fetch(1);
        let mut cursor = Cursor::new(statement).unwrap();

        assert!(cursor.advance().is_err());

        assert_eq!(Some(0), cursor.current_row_index());
        assert_eq!(Some(&Value::from(0)), cursor.current_field_value("n"));
        assert!(!cursor.is_end_of_data());
    }

    #[test]
    fn unknown_row_count_becomes_known_at_end_of_data() {
        let statement = numbers(2).report_row_count(false);
        let mut cursor = Cursor::new(statement).unwrap();
        assert_eq!(None, cursor.row_count());

        while cursor.advance().unwrap() {}

        assert_eq!(Some(2), cursor.row_count());
        assert_eq!(Some(2), cursor.current_row_index());
    }

    #[test]
    fn materializing_corrects_wrong_row_count() {
        let statement = numbers(3).seekable(false).with_reported_row_count(5);
        let mut cursor = Cursor::new(statement).unwrap();

        cursor.seek(1).unwrap();

        assert_eq!(Some(3), cursor.row_count());
    }

    #[test]
    fn seek_after_failed_seek_on_unknown_row_count() {
        let statement = numbers(3).report_row_count(false);
        let mut cursor = Cursor::new(statement).unwrap();

        assert!(!cursor.seek(7).unwrap());
        assert!(cursor.is_end_of_data());
        assert!(cursor.current_row().is_none());

        assert!(cursor.seek(2).unwrap());
        assert_eq!(Some(&Value::from(2)), cursor.current_field_value("n"));
    }

    #[test]
    fn seek_last_with_unknown_row_count_at_end_of_data() {
        let statement = numbers(4).report_row_count(false);
        let mut cursor = Cursor::new(statement).unwrap();
        cursor.seek(9).unwrap();

        assert!(cursor.seek_last().unwrap());

        assert_eq!(Some(4), cursor.row_count());
        assert_eq!(Some(2), cursor.current_row_index());
    }

    #[test]
    fn buffered_rows_survive_closing() {
        let statement = numbers(3).seekable(false);
        let mut cursor = Cursor::new(statement).unwrap();
        cursor.seek(2).unwrap();

        cursor.close().unwrap();

        assert!(cursor.seek_first().unwrap());
        assert!(cursor.advance().unwrap());
        assert_eq!(Some(&Value::from(1)), cursor.current_field_value("n"));
    }

    #[test]
    fn live_navigation_after_close_fails() {
        let mut cursor = Cursor::new(numbers(3)).unwrap();

        cursor.close().unwrap();

        assert!(matches!(
            cursor.advance(),
            Err(crate::Error::CursorClosed { function: "fetch" })
        ));
        assert!(cursor.is_closed());
    }
}
