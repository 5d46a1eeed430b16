use thiserror::Error as ThisError;

/// Error type reported by implementations of [`crate::Statement`]. The cursor forwards these
/// unchanged, only tagging them with the statement function which emitted them.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, ThisError)]
/// Error type used to indicate a failed cursor operation.
///
/// Running out of rows is not an error. It is signaled through the boolean returns of
/// [`crate::Cursor::advance`] and [`crate::Cursor::seek`].
pub enum Error {
    /// The statement does not expose the requested information. Emitted by
    /// [`crate::Cursor::column_metadata`] if the driver has no column metadata to offer.
    #[error("The statement does not support '{function}'.")]
    NotSupported {
        /// Statement function which could not provide the information.
        function: &'static str,
    },
    /// A call to the underlying statement failed. The error returned by the driver is preserved
    /// as `source`.
    #[error("The statement emitted an error calling '{function}':\n{source}")]
    Driver {
        /// Statement function which failed.
        function: &'static str,
        /// Error as reported by the driver.
        source: DriverError,
    },
    /// The operation would require the statement, yet the cursor has already been closed.
    #[error("Cannot call '{function}' on a closed cursor.")]
    CursorClosed {
        /// Statement function the cursor would have needed to call.
        function: &'static str,
    },
}

/// Convinience for tagging driver errors with the name of the statement function without an
/// additional call to `map_err` at every call site.
pub(crate) trait IntoCursorResult<T> {
    fn for_function(self, function: &'static str) -> Result<T, Error>;
}

impl<T> IntoCursorResult<T> for Result<T, DriverError> {
    fn for_function(self, function: &'static str) -> Result<T, Error> {
        self.map_err(|source| Error::Driver { function, source })
    }
}
