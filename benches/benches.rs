use criterion::{Criterion, criterion_group, criterion_main};
use row_cursor::{Cursor, MemoryStatement, Value};

fn statement(num_rows: i64, seekable: bool) -> MemoryStatement {
    let rows = (0..num_rows)
        .map(|i| vec![Value::from(i), Value::from(format!("row {i}"))])
        .collect();
    MemoryStatement::new(&["id", "text"], rows).seekable(seekable)
}

fn add_benchmark(c: &mut Criterion) {
    (10..=16).step_by(2).for_each(|log2_size| {
        let num_rows = 2i64.pow(log2_size);

        for (label, seekable) in [("live", true), ("buffered", false)] {
            c.bench_function(&format!("advance {label} 2^{log2_size}"), |b| {
                b.iter_batched(
                    || statement(num_rows, seekable),
                    |statement| {
                        let mut cursor = Cursor::new(statement).unwrap();
                        while cursor.advance().unwrap() {}
                    },
                    criterion::BatchSize::LargeInput,
                )
            });

            c.bench_function(&format!("seek backwards {label} 2^{log2_size}"), |b| {
                b.iter_batched(
                    || statement(num_rows, seekable),
                    |statement| {
                        let mut cursor = Cursor::new(statement).unwrap();
                        for row in (0..num_rows as usize).rev() {
                            cursor.seek(row).unwrap();
                        }
                    },
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    });
}

criterion_group!(benches, add_benchmark);
criterion_main!(benches);
