// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use voyage_bnb::{
    bnb::BnbSolver, config::BnbConfig, frontier::PriorityPolicy,
    monitor::no_op::NoOperationMonitor, state::SearchState,
};
use voyage_model::{generate::InstanceGenerator, index::LocationIndex, model::Model};
use voyage_search::seed::nearest::NearestNeighborSeed;

const SIZES: [usize; 3] = [8, 10, 12];

fn instance(n: usize) -> Model<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
    InstanceGenerator::new(1, 100).generate(n, &mut rng)
}

fn bench_root_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_reduction");
    for n in [16, 64, 256] {
        let model = instance(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &model, |b, model| {
            b.iter(|| SearchState::root(black_box(model), LocationIndex::new(0), 0))
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_solve");
    group.sample_size(10);

    for policy in [PriorityPolicy::DepthNormalized, PriorityPolicy::BestFirst] {
        for n in SIZES {
            let model = instance(n);
            let config = BnbConfig::builder().priority_policy(policy).build();
            let mut solver = BnbSolver::with_config(config);

            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), n),
                &model,
                |b, model| {
                    b.iter(|| {
                        let outcome = solver.solve(
                            black_box(model),
                            NearestNeighborSeed::new(),
                            NoOperationMonitor::new(),
                        );
                        if !outcome.is_optimal() {
                            panic!("Benchmark configuration error: search did not finish within the time limit.");
                        }
                        outcome.cost()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_root_reduction, bench_solve);
criterion_main!(benches);
