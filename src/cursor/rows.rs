use std::iter::FusedIterator;

use crate::{Cursor, Error, Row, Statement};

/// Iterates over the remaining rows of a [`Cursor`], starting with its current row. Created by
/// [`Cursor::rows`].
///
/// Each item is an owned copy of the row, so moving the cursor further does not affect rows
/// already yielded. The iterator can not be restarted. To iterate once more, move the cursor back
/// using [`Cursor::seek_first`] and create a new one. If moving past a row fails, the row is still
/// yielded and the error is returned by the following call. After the error the iterator is
/// exhausted.
///
/// ```
/// use row_cursor::{Cursor, MemoryStatement, Value};
///
/// let statement = MemoryStatement::new(
///     &["id"],
///     vec![vec![Value::from(1)], vec![Value::from(2)]],
/// );
/// let mut cursor = Cursor::new(statement)?;
///
/// let ids = cursor
///     .rows()
///     .map(|row| row.map(|row| row.get("id").cloned()))
///     .collect::<Result<Vec<_>, _>>()?;
///
/// assert_eq!(vec![Some(Value::from(1)), Some(Value::from(2))], ids);
/// assert!(cursor.is_end_of_data());
/// # Ok::<(), row_cursor::Error>(())
/// ```
pub struct Rows<'c, S: Statement> {
    cursor: &'c mut Cursor<S>,
    /// Error advancing past the row yielded last.
    pending: Option<Error>,
    failed: bool,
}

impl<'c, S> Rows<'c, S>
where
    S: Statement,
{
    pub(crate) fn new(cursor: &'c mut Cursor<S>) -> Self {
        Self {
            cursor,
            pending: None,
            failed: false,
        }
    }
}

impl<S> Iterator for Rows<'_, S>
where
    S: Statement,
{
    type Item = Result<Row, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(error) = self.pending.take() {
            self.failed = true;
            return Some(Err(error));
        }
        let row = self.cursor.current_row()?.clone();
        if let Err(error) = self.cursor.advance() {
            self.pending = Some(error);
        }
        Some(Ok(row))
    }
}

impl<S> FusedIterator for Rows<'_, S> where S: Statement {}

#[cfg(test)]
mod tests {
    use crate::{Cursor, MemoryStatement, Row, Value};

    fn letters(seekable: bool) -> MemoryStatement {
        let rows = ["a", "b", "c"]
            .into_iter()
            .map(|letter| vec![Value::from(letter)])
            .collect();
        MemoryStatement::new(&["letter"], rows).seekable(seekable)
    }

    #[test]
    fn starts_at_current_row() {
        let mut cursor = Cursor::new(letters(true)).unwrap();
        cursor.advance().unwrap();

        let rows: Vec<Row> = cursor.rows().collect::<Result<_, _>>().unwrap();

        assert_eq!(2, rows.len());
        assert_eq!(Some(&Value::from("b")), rows[0].get("letter"));
    }

    #[test]
    fn yielded_rows_are_not_affected_by_moving_the_cursor() {
        let mut cursor = Cursor::new(letters(false)).unwrap();
        let first = cursor.rows().next().unwrap().unwrap();

        cursor.seek(2).unwrap();

        assert_eq!(Some(&Value::from("a")), first.get("letter"));
    }

    #[test]
    fn not_restartable() {
        let mut cursor = Cursor::new(letters(true)).unwrap();
        assert_eq!(3, cursor.rows().count());

        assert_eq!(0, cursor.rows().count());

        cursor.seek_first().unwrap();
        assert_eq!(3, cursor.rows().count());
    }

    #[test]
    fn fused_after_error() {
        let mut cursor = Cursor::new(letters(true).with_failing_fetch(1)).unwrap();
        let mut rows = cursor.rows();

        // Advancing past the first row fails, yet the row itself is still yielded.
        assert!(matches!(rows.next(), Some(Ok(_))));
        assert!(matches!(rows.next(), Some(Err(_))));
        assert!(rows.next().is_none());
    }
}
