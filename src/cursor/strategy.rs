use log::debug;

use crate::{
    Error, Row, Statement,
    error::IntoCursorResult,
};

/// How a cursor retrieves rows. Chosen once when the cursor is created, based on the seek
/// capability of the statement.
pub enum FetchStrategy {
    /// Every row is fetched from the statement, which is able to seek on its own.
    Live,
    /// The statement can only move forward. Sequential access is served by the statement until the
    /// first random access materializes the entire result set. From then on all rows are read
    /// from memory.
    Buffered(Option<Vec<Row>>),
}

impl FetchStrategy {
    pub fn new(can_seek: bool) -> Self {
        if can_seek {
            FetchStrategy::Live
        } else {
            FetchStrategy::Buffered(None)
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FetchStrategy::Live)
    }

    /// Number of rows held in memory, if the result set has been materialized.
    pub fn materialized_len(&self) -> Option<usize> {
        match self {
            FetchStrategy::Buffered(Some(rows)) => Some(rows.len()),
            _ => None,
        }
    }

    /// Row following the current one. `index` is the zero based index of that row.
    pub fn next_row(
        &mut self,
        statement: &mut Option<impl Statement>,
        index: usize,
    ) -> Result<Option<Row>, Error> {
        match self {
            FetchStrategy::Buffered(Some(rows)) => Ok(rows.get(index).cloned()),
            _ => open(statement, "fetch")?.fetch(None).for_function("fetch"),
        }
    }

    /// Row at the zero based `index`. Materializes the result set first for forward only
    /// statements.
    pub fn row_at(
        &mut self,
        statement: &mut Option<impl Statement>,
        index: usize,
    ) -> Result<Option<Row>, Error> {
        match self {
            FetchStrategy::Live => open(statement, "fetch")?
                .fetch(Some(index))
                .for_function("fetch"),
            FetchStrategy::Buffered(_) => {
                let rows = self.materialize(statement)?;
                Ok(rows.get(index).cloned())
            }
        }
    }

    /// Fetches all rows of the result set into memory, unless this already happened. A statement
    /// which can seek is never materialized and yields an empty slice.
    pub fn materialize(
        &mut self,
        statement: &mut Option<impl Statement>,
    ) -> Result<&[Row], Error> {
        if let FetchStrategy::Buffered(buffer) = self {
            if buffer.is_none() {
                let rows = open(statement, "fetch_all")?
                    .fetch_all()
                    .for_function("fetch_all")?;
                debug!("Materialized result set of forward only statement. Rows: {}", rows.len());
                *buffer = Some(rows);
            }
            Ok(buffer.as_deref().unwrap_or_default())
        } else {
            Ok(&[])
        }
    }
}

/// The statement of a cursor, unless the cursor has been closed.
pub fn open<'s, S>(
    statement: &'s mut Option<S>,
    function: &'static str,
) -> Result<&'s mut S, Error> {
    statement.as_mut().ok_or(Error::CursorClosed { function })
}
