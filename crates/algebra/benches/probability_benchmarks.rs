use allelic_algebra::base::{locus_mask, locus_pattern};
use allelic_algebra::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::hint::black_box;

const LOCI: usize = 4;
const ALLELES: u8 = 4;

/// Single-locus combo `m:d` (either gamete order) on a random locus.
fn random_combo(rng: &mut Xoshiro256PlusPlus) -> AlleleCombo {
    let locus = rng.random_range(1..=LOCI);
    let m = rng.random_range(0..ALLELES);
    let d = rng.random_range(0..ALLELES);
    let patterns = vec![locus_pattern(locus, m, d), locus_pattern(locus, d, m)];
    AlleleCombo::new(0, locus_mask(locus), patterns).expect("pattern inside mask")
}

fn random_probability(n_entries: usize, rng: &mut Xoshiro256PlusPlus) -> GeneticProbability {
    let mut gp = GeneticProbability::from(rng.random::<f64>());
    for _ in 0..n_entries {
        gp.insert(AlleleComboProbability::new(random_combo(rng), rng.random::<f64>()));
    }
    gp
}

fn random_genotype(rng: &mut Xoshiro256PlusPlus) -> Genotype {
    (1..=LOCI).fold(Genotype::new(), |g, locus| {
        g.with_locus(locus, rng.random_range(0..ALLELES), rng.random_range(0..ALLELES))
    })
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    for &n in &[0, 2, 8, 16] {
        let left = random_probability(n, &mut rng);
        let right = random_probability(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{n}x{n}")), &(left, right), |b, (l, r)| {
            b.iter(|| black_box(l * r));
        });
    }

    group.finish();
}

fn bench_scalar_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_ops");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let gp = random_probability(16, &mut rng);

    group.bench_function("one_minus", |b| b.iter(|| black_box(1.0 - &gp)));
    group.bench_function("times_scalar", |b| b.iter(|| black_box(&gp * 0.5)));

    group.finish();
}

fn bench_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("value");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let genotypes: Vec<Genotype> = (0..256).map(|_| random_genotype(&mut rng)).collect();

    for &n in &[2, 16, 64] {
        let gp = random_probability(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &gp, |b, gp| {
            b.iter(|| {
                genotypes
                    .iter()
                    .map(|&g| gp.value(0, g))
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

fn bench_combo_interning(c: &mut Criterion) {
    c.bench_function("intern_existing_combo", |b| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let _held: Vec<AlleleCombo> = (0..64).map(|_| random_combo(&mut rng)).collect();
        b.iter(|| black_box(random_combo(&mut rng)));
    });
}

criterion_group!(
    benches,
    bench_multiply,
    bench_scalar_ops,
    bench_value,
    bench_combo_interning,
);
criterion_main!(benches);
