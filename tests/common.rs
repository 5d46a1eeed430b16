use std::time::SystemTime;

use row_cursor::{
    ColumnDescription, Cursor, DriverError, FetchStyle, MemoryStatement, Row, Statement, Value,
};

/// Capabilities of the driver a test runs against.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub seekable: bool,
    pub report_row_count: bool,
    pub fetch_style: FetchStyle,
}

impl Profile {
    /// Statement with the capabilities of this profile, serving `rows`.
    pub fn given(&self, column_names: &[&str], rows: Vec<Vec<Value>>) -> MemoryStatement {
        let _ = env_logger::builder().is_test(true).try_init();
        MemoryStatement::new(column_names, rows)
            .seekable(self.seekable)
            .report_row_count(self.report_row_count)
            .with_fetch_style(self.fetch_style)
    }

    /// Single column `n` holding the numbers `0..num_rows`.
    pub fn numbers(&self, num_rows: i64) -> MemoryStatement {
        self.given(&["n"], (0..num_rows).map(|n| vec![Value::from(n)]).collect())
    }
}

pub const SCROLLABLE: &Profile = &Profile {
    seekable: true,
    report_row_count: true,
    fetch_style: FetchStyle::Named,
};

pub const FORWARD_ONLY: &Profile = &Profile {
    seekable: false,
    report_row_count: true,
    fetch_style: FetchStyle::Named,
};

pub const FORWARD_ONLY_UNKNOWN_COUNT: &Profile = &Profile {
    seekable: false,
    report_row_count: false,
    fetch_style: FetchStyle::Positional,
};

pub const SCROLLABLE_UNKNOWN_COUNT: &Profile = &Profile {
    seekable: true,
    report_row_count: false,
    fetch_style: FetchStyle::Positional,
};

/// Renders the remaining rows of the cursor as comma separated values, one line per row.
pub fn cursor_to_string<S: Statement>(cursor: &mut Cursor<S>) -> String {
    let lines: Vec<String> = cursor
        .rows()
        .map(|row| {
            row.unwrap()
                .values()
                .map(|value| {
                    if value.is_null() {
                        "NULL".to_owned()
                    } else {
                        value.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    lines.join("\n")
}

/// A statement which fails every call, emulating a driver which lost its connection.
pub struct BrokenStatement;

impl Statement for BrokenStatement {
    fn time_created(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    fn can_seek(&self) -> bool {
        true
    }

    fn fetch_style(&self) -> FetchStyle {
        FetchStyle::Named
    }

    fn row_count(&self) -> Result<Option<usize>, DriverError> {
        Err("Communication link failure".into())
    }

    fn column_count(&self) -> Result<usize, DriverError> {
        Err("Communication link failure".into())
    }

    fn fetch(&mut self, _row_number: Option<usize>) -> Result<Option<Row>, DriverError> {
        Err("Communication link failure".into())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        Err("Communication link failure".into())
    }

    fn column_metadata(&self, _index: usize) -> Result<Option<ColumnDescription>, DriverError> {
        Err("Communication link failure".into())
    }

    fn close(&mut self) -> Result<(), DriverError> {
        Err("Communication link failure".into())
    }
}

#[test]
fn render_cursor_as_text() {
    let statement = SCROLLABLE.given(
        &["title", "year"],
        vec![
            vec![Value::from("Jurassic Park"), Value::from(1993)],
            vec![Value::from("Interstellar"), Value::Null],
        ],
    );
    let mut cursor = Cursor::new(statement).unwrap();

    assert_eq!(
        "Jurassic Park,1993\nInterstellar,NULL",
        cursor_to_string(&mut cursor)
    );
}
