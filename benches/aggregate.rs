/// Aggregation and rendering benchmarks
///
/// Measures the full analysis pass and the report renderer over the built-in
/// 80-record dataset to catch performance regressions in the kernels.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resumen::record::{BuiltinDataset, RecordSource};
use resumen::report;
use resumen::stats::{analyze, AnalysisConfig};

fn bench_analyze(c: &mut Criterion) {
    let records = BuiltinDataset.records().expect("builtin dataset");
    let config = AnalysisConfig::default();

    c.bench_function("analyze_builtin_dataset", |b| {
        b.iter(|| black_box(analyze(black_box(&records), &config)));
    });
}

fn bench_render(c: &mut Criterion) {
    let records = BuiltinDataset.records().expect("builtin dataset");
    let config = AnalysisConfig::default();
    let analysis = analyze(&records, &config).expect("non-empty dataset");

    c.bench_function("render_report", |b| {
        b.iter(|| black_box(report::render(black_box(&analysis), &config)));
    });
}

criterion_group!(benches, bench_analyze, bench_render);
criterion_main!(benches);
