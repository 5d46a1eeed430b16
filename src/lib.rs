//! # Row cursors
//!
//! Navigate the rows produced by an executed database statement, forward as well as backward,
//! regardless of whether the driver executing the statement supports scrolling.
//!
//! Drivers expose an executed statement by implementing the [`Statement`] trait. Wrapping it in a
//! [`Cursor`] offers:
//!
//! * Moving forward row by row using [`Cursor::advance`].
//! * Jumping to arbitrary rows using [`Cursor::seek`], [`Cursor::seek_first`] and
//!   [`Cursor::seek_last`]. If the statement can only move forward, the cursor fetches the entire
//!   result set into memory the first time this is required.
//! * Consuming the remaining rows as an iterator using [`Cursor::rows`].
//! * Reshaping the remaining rows into a key value mapping using [`Cursor::to_mapping`].
//!
//! [`MemoryStatement`] implements [`Statement`] for rows already held in memory.
//!
//! Cursors are synchronous and meant to be driven by a single owner. All operations block until the
//! underlying statement returns.

mod column_description;
mod cursor;
mod data_type;
mod error;
mod memory;
mod row;
mod statement;
mod value;

pub use self::{
    column_description::{ColumnDescription, Nullability},
    cursor::{Cursor, Mapping, Rows},
    data_type::DataType,
    error::{DriverError, Error},
    memory::{MemoryStatement, ResultSet},
    row::{FetchStyle, Row},
    statement::Statement,
    value::Value,
};
