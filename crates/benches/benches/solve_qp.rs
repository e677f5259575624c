use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use splitqp_admm::AdmmSolver;
use splitqp_core::math::Scalar;
use splitqp_core::problem::{CscMatrix, ProblemData};
use splitqp_core::settings::Settings;
use splitqp_linsys::DenseKkt;

fn random_diagonal_spd(n: usize, rng: &mut SmallRng) -> CscMatrix<Scalar> {
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::with_capacity(n);
    let mut data = Vec::with_capacity(n);
    indptr.push(0);
    for col in 0..n {
        indices.push(col);
        data.push(1.0 + rng.gen::<Scalar>());
        indptr.push(indices.len());
    }
    CscMatrix {
        nrows: n,
        ncols: n,
        indptr,
        indices,
        data,
    }
}

fn build_problem(n: usize, rng: &mut SmallRng) -> ProblemData<Scalar> {
    ProblemData {
        p: random_diagonal_spd(n, rng),
        q: (0..n).map(|_| rng.gen::<Scalar>() - 0.5).collect(),
        a: CscMatrix::identity(n, 1.0),
        lx: vec![-1.0; n],
        ux: vec![1.0; n],
        la: vec![-1.0; n],
        ua: vec![1.0; n],
    }
}

fn solve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("admm_box_qp");
    let mut rng = SmallRng::seed_from_u64(42);
    group.bench_function("n=50_m=50", |b| {
        b.iter_batched(
            || build_problem(50, &mut rng),
            |problem| {
                let solver = AdmmSolver::new(Settings::<Scalar>::default());
                let mut kkt = DenseKkt::new();
                let _ = solver.solve(&problem, &mut kkt).unwrap();
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, solve_benchmark);
criterion_main!(benches);
