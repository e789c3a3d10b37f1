use blockmat::{BlockMatrix, MultiplyConfig, RayonExecutor, matmul_naive_ijk};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn generate(rows: usize, columns: usize, seed: usize) -> Vec<f64> {
    (0..rows * columns)
        .map(|i| ((i * 31 + seed) % 97) as f64 / 97.0)
        .collect()
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    let executor = RayonExecutor::global();
    let forced = MultiplyConfig::default().with_parallel_threshold(0);

    for size in [104usize, 256, 520] {
        let data_a = generate(size, size, 1);
        let data_b = generate(size, size, 2);
        let a = BlockMatrix::from_row_major(size, size, &data_a).unwrap();
        let b = BlockMatrix::from_row_major(size, size, &data_b).unwrap();
        group.throughput(Throughput::Elements((2 * size * size * size) as u64));

        if size <= 256 {
            group.bench_with_input(BenchmarkId::new("naive_ijk", size), &size, |bench, &n| {
                let mut out = vec![0.0; n * n];
                bench.iter(|| {
                    out.iter_mut().for_each(|x| *x = 0.0);
                    matmul_naive_ijk(black_box(&data_a), black_box(&data_b), &mut out, n, n, n);
                })
            });
        }

        group.bench_with_input(BenchmarkId::new("blocked", size), &size, |bench, _| {
            bench.iter(|| black_box(&a).multiply_sequential(black_box(&b)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |bench, _| {
            bench.iter(|| {
                black_box(&a)
                    .multiply_with(black_box(&b), &forced, &executor)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let m = BlockMatrix::from_row_major(520, 520, &generate(520, 520, 3)).unwrap();
    c.bench_function("transpose_520", |bench| bench.iter(|| black_box(&m).transpose()));
}

criterion_group!(benches, bench_multiply, bench_transpose);
criterion_main!(benches);
