use criterion::{black_box, criterion_group, criterion_main, Criterion};
use realgen::{
    bounds::Bounds,
    evolution::{EvolutionEngine, EvolutionOptions, SelectionKind},
    genotype::Genotype,
    rng::RandomNumberGenerator,
};

fn sphere(candidate: &Genotype) -> f64 {
    candidate.genes().iter().map(|x| x * x).sum()
}

fn bench_generation(c: &mut Criterion) {
    let selections = [
        ("tournament", SelectionKind::Tournament { size: 2 }),
        ("roulette", SelectionKind::RouletteWheel),
    ];

    let mut group = c.benchmark_group("step_generation");
    for (name, selection) in selections {
        for size in [10, 100, 1000].iter() {
            let options = EvolutionOptions::builder().selection(selection).build();
            let mut engine = EvolutionEngine::new(
                *size,
                Bounds::uniform(10, -5.0, 5.0).unwrap(),
                options,
                sphere,
                RandomNumberGenerator::from_seed(1),
            )
            .unwrap();
            engine.initialize_random().unwrap();

            group.bench_function(&format!("{}_{}", name, size), |b| {
                b.iter(|| {
                    let result = black_box(&mut engine).step_generation();
                    assert!(result.is_ok());
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
