use std::{collections::VecDeque, time::SystemTime};

use crate::{ColumnDescription, DriverError, FetchStyle, Row, Statement, Value};

/// A single result set of a [`MemoryStatement`].
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    column_names: Vec<String>,
    rows: Vec<Vec<Value>>,
    descriptions: Option<Vec<ColumnDescription>>,
    failing_fetch: Option<usize>,
}

impl ResultSet {
    /// Result set with the given column names and rows. Each row is expected to hold one value for
    /// each column.
    pub fn new(column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self {
            column_names: column_names.iter().map(|&name| name.to_owned()).collect(),
            rows,
            descriptions: None,
            failing_fetch: None,
        }
    }

    /// Column metadata reported by [`Statement::column_metadata`]. Without it, the statement does
    /// not provide any column metadata.
    pub fn with_descriptions(mut self, descriptions: Vec<ColumnDescription>) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    /// Sequential fetches of the row with the zero based index `row` fail, emulating a connection
    /// lost in the middle of a result set.
    pub fn with_failing_fetch(mut self, row: usize) -> Self {
        self.failing_fetch = Some(row);
        self
    }

    fn row(&self, index: usize, style: FetchStyle) -> Option<Row> {
        let values = self.rows.get(index)?.clone();
        let row = match style {
            FetchStyle::Positional => Row::Positional(values),
            FetchStyle::Named => Row::Named(self.column_names.iter().cloned().zip(values).collect()),
        };
        Some(row)
    }
}

/// A [`Statement`] serving rows from memory.
///
/// Useful for applications which already hold a result in memory, yet want to navigate it with
/// the same code as live results. Its capabilities can be configured to behave like a scrollable
/// driver, or like a forward only driver which can not report a row count up front.
///
/// ```
/// use row_cursor::{Cursor, MemoryStatement, Value};
///
/// let statement = MemoryStatement::new(
///     &["id"],
///     (0..10).map(|i| vec![Value::from(i)]).collect(),
/// )
/// .seekable(false)
/// .report_row_count(false);
///
/// let mut cursor = Cursor::new(statement)?;
/// assert_eq!(None, cursor.row_count());
/// cursor.seek(4)?;
/// // Seeking materialized the result set, so now the row count is known.
/// assert_eq!(Some(10), cursor.row_count());
/// # Ok::<(), row_cursor::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MemoryStatement {
    /// Current result set is at the front.
    result_sets: VecDeque<ResultSet>,
    /// Index of the row returned by the next sequential fetch.
    position: usize,
    seekable: bool,
    reported_row_count: RowCountReport,
    fetch_style: FetchStyle,
    time_created: SystemTime,
    closed: bool,
    num_fetch_all_calls: usize,
    num_close_calls: usize,
}

#[derive(Clone, Copy, Debug)]
enum RowCountReport {
    Actual,
    Unknown,
    Fixed(usize),
}

impl MemoryStatement {
    /// Statement with a single result set. By default it can seek, reports its row count and
    /// produces named rows.
    pub fn new(column_names: &[&str], rows: Vec<Vec<Value>>) -> Self {
        Self::from_result_sets(vec![ResultSet::new(column_names, rows)])
    }

    /// Statement producing several result sets. The first one is current.
    pub fn from_result_sets(result_sets: Vec<ResultSet>) -> Self {
        Self {
            result_sets: result_sets.into(),
            position: 0,
            seekable: true,
            reported_row_count: RowCountReport::Actual,
            fetch_style: FetchStyle::Named,
            time_created: SystemTime::now(),
            closed: false,
            num_fetch_all_calls: 0,
            num_close_calls: 0,
        }
    }

    /// `false` makes this statement behave like a forward only driver.
    pub fn seekable(mut self, seekable: bool) -> Self {
        self.seekable = seekable;
        self
    }

    /// `false` makes this statement report an unknown row count.
    pub fn report_row_count(mut self, report: bool) -> Self {
        self.reported_row_count = if report {
            RowCountReport::Actual
        } else {
            RowCountReport::Unknown
        };
        self
    }

    /// Report `row_count` instead of the actual number of rows, like a driver which only has an
    /// estimate.
    pub fn with_reported_row_count(mut self, row_count: usize) -> Self {
        self.reported_row_count = RowCountReport::Fixed(row_count);
        self
    }

    pub fn with_fetch_style(mut self, fetch_style: FetchStyle) -> Self {
        self.fetch_style = fetch_style;
        self
    }

    pub fn with_time_created(mut self, time_created: SystemTime) -> Self {
        self.time_created = time_created;
        self
    }

    /// Sequential fetches of the row with the zero based index `row` in the current result set
    /// fail. See [`ResultSet::with_failing_fetch`].
    pub fn with_failing_fetch(mut self, row: usize) -> Self {
        if let Some(result_set) = self.result_sets.front_mut() {
            result_set.failing_fetch = Some(row);
        }
        self
    }

    /// Number of times [`Statement::fetch_all`] has been called.
    pub fn num_fetch_all_calls(&self) -> usize {
        self.num_fetch_all_calls
    }

    /// Number of times [`Statement::close`] has been called.
    pub fn num_close_calls(&self) -> usize {
        self.num_close_calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn current(&self) -> Result<&ResultSet, DriverError> {
        if self.closed {
            return Err("Statement has been closed.".into());
        }
        self.result_sets
            .front()
            .ok_or_else(|| "Statement has no result set.".into())
    }
}

impl Statement for MemoryStatement {
    fn time_created(&self) -> SystemTime {
        self.time_created
    }

    fn can_seek(&self) -> bool {
        self.seekable
    }

    fn fetch_style(&self) -> FetchStyle {
        self.fetch_style
    }

    fn row_count(&self) -> Result<Option<usize>, DriverError> {
        let actual = self.current()?.rows.len();
        Ok(match self.reported_row_count {
            RowCountReport::Actual => Some(actual),
            RowCountReport::Unknown => None,
            RowCountReport::Fixed(row_count) => Some(row_count),
        })
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        Ok(self.current()?.column_names.len())
    }

    fn fetch(&mut self, row_number: Option<usize>) -> Result<Option<Row>, DriverError> {
        let index = match row_number {
            None => {
                if self.current()?.failing_fetch == Some(self.position) {
                    return Err(format!("Lost connection fetching row {}.", self.position).into());
                }
                self.position
            }
            Some(_) if !self.seekable => {
                return Err("Statement is forward only and can not seek.".into());
            }
            Some(row_number) => row_number,
        };
        let row = self.current()?.row(index, self.fetch_style);
        if row.is_some() {
            self.position = index + 1;
        }
        Ok(row)
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        self.num_fetch_all_calls += 1;
        let style = self.fetch_style;
        let result_set = self.current()?;
        let rows: Vec<Row> = (0..result_set.rows.len())
            .filter_map(|index| result_set.row(index, style))
            .collect();
        self.position = rows.len();
        Ok(rows)
    }

    fn column_metadata(&self, index: usize) -> Result<Option<ColumnDescription>, DriverError> {
        let descriptions = match &self.current()?.descriptions {
            Some(descriptions) => descriptions,
            None => return Ok(None),
        };
        descriptions
            .get(index)
            .cloned()
            .map(Some)
            .ok_or_else(|| format!("Invalid column index {index}.").into())
    }

    fn next_rowset(&mut self) -> Result<bool, DriverError> {
        self.current()?;
        self.result_sets.pop_front();
        self.position = 0;
        Ok(!self.result_sets.is_empty())
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.num_close_calls += 1;
        self.closed = true;
        Ok(())
    }
}
