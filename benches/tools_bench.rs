use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use binlog_text_parser::tools::{classify_line, is_row_event_header, is_table_map_line};

/// Benchmark: is_table_map_line 函数
fn bench_is_table_map_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_table_map_line");

    let table_map = "#180129 17:28:04 server id 1  end_log_pos 372 CRC32 0x5e1f0a4b \tTable_map: `binlog_analyser`.`test_table` mapped to number 108";
    group.bench_function("table_map", |b| {
        b.iter(|| is_table_map_line(black_box(table_map)))
    });

    // 长度相近但不含标记的事件头行
    let write_rows = "#180129 17:28:04 server id 1  end_log_pos 432 CRC32 0x6d2a91c7 \tWrite_rows: table id 108 flags: STMT_END_F";
    group.bench_function("write_rows", |b| {
        b.iter(|| is_table_map_line(black_box(write_rows)))
    });

    group.finish();
}

/// Benchmark: classify_line 函数
fn bench_classify_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_line");

    let cases = [
        ("begin", "BEGIN"),
        ("row_header", "### UPDATE `binlog_analyser`.`test_table`"),
        (
            "continuation",
            "###   @2='transaction-1' /* VARSTRING(60) meta=60 nullable=1 is_null=0 */",
        ),
        ("footer", "# at 1342"),
        ("other", "SET @@session.pseudo_thread_id=3/*!*/;"),
    ];

    for (name, line) in cases {
        group.bench_with_input(BenchmarkId::new("shape", name), &line, |b, &line| {
            b.iter(|| classify_line(black_box(line)))
        });
    }

    group.bench_function("row_header_miss", |b| {
        b.iter(|| is_row_event_header(black_box("### WHERE")))
    });

    group.finish();
}

criterion_group!(benches, bench_is_table_map_line, bench_classify_line);
criterion_main!(benches);
