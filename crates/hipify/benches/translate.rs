use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hipify::{apply_edits, ReplacementSet, SymbolTable};
use hipify_api::{ConflictPolicy, Edit, EditOrigin, Span};

fn synthetic_source(lines: usize) -> (String, Vec<(usize, &'static str)>) {
    let calls = ["cudaMalloc", "cudaMemcpy", "cudaFree", "cudaDeviceSynchronize"];
    let mut text = String::new();
    let mut sites = Vec::new();
    for i in 0..lines {
        let name = calls[i % calls.len()];
        text.push_str("    ");
        sites.push((text.len(), name));
        text.push_str(name);
        text.push_str("(ptr, size);\n");
    }
    (text, sites)
}

fn bench_symbol_lookup(c: &mut Criterion) {
    let table = SymbolTable::cuda_to_hip();
    c.bench_function("symbol_lookup", |b| {
        b.iter(|| {
            black_box(table.lookup(black_box("cudaMemcpyHostToDevice")));
            black_box(table.lookup(black_box("notInTheTable")));
        });
    });
}

fn bench_propose_and_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("propose_and_apply");
    let table = SymbolTable::cuda_to_hip();

    for lines in [100, 1_000, 10_000].iter() {
        let (text, sites) = synthetic_source(*lines);
        let edits: Vec<Edit> = sites
            .iter()
            .filter_map(|(offset, name)| {
                let target = table.lookup(name)?;
                Some(Edit::new(Span::at(*offset, name.len()), target, EditOrigin::CallRename))
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("lines", lines), lines, |b, _| {
            b.iter(|| {
                let mut set = ReplacementSet::new(ConflictPolicy::ExactSpan);
                for edit in edits.iter().cloned() {
                    set.propose(edit);
                }
                black_box(apply_edits(&text, &set));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_symbol_lookup, bench_propose_and_apply);
criterion_main!(benches);
