use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use compnum::{Elastic, I256, Nearest, Number, Rounding, Scaled, U512};
use compnum::typenum::{N16, N32, U40, U100};

// Establish a baseline by comparing with the native 128-bit operations

fn baseline_mul_i128(c: &mut Criterion) {
  c.bench_function("baseline_mul_i128", |b| {
    b.iter(|| black_box(0x1234_5678_9abc_def0_i128).wrapping_mul(black_box(-0x0fed_cba9_8765_4321)));
  });
}

fn baseline_div_i128(c: &mut Criterion) {
  c.bench_function("baseline_div_i128", |b| {
    b.iter(|| black_box(0x1234_5678_9abc_def0_1234_5678_i128) / black_box(-0x0fed_cba9_8765));
  });
}

// Time Duplex arithmetic

fn nums_256() -> [I256; 4] {
  [
    I256::from(i128::MAX) * I256::from(0x7777_i32),
    I256::from(-0x1234_5678_9abc_def0_i64) * I256::from(u128::MAX),
    I256::from(u64::MAX),
    I256::from(-3_i8),
  ]
}

fn mul_i256(c: &mut Criterion) {
  let mut g = c.benchmark_group("mul_i256");
  for (x, y) in nums_256().into_iter().zip(nums_256().into_iter().skip(1)) {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{x}*{y}")), &(x, y), |b, &(x, y)| {
      b.iter(|| black_box(x) * black_box(y));
    });
  }
  g.finish();
}

fn div_i256(c: &mut Criterion) {
  let mut g = c.benchmark_group("div_i256");
  for (x, y) in nums_256().into_iter().zip(nums_256().into_iter().skip(1)) {
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{x}/{y}")), &(x, y), |b, &(x, y)| {
      b.iter(|| black_box(x) / black_box(y));
    });
  }
  g.finish();
}

fn div_u512(c: &mut Criterion) {
  let x = U512::from(u128::MAX) * U512::from(u128::MAX) * U512::from(0x1234_u32);
  let y = U512::from(u128::MAX) * U512::from(0x5678_u32);
  c.bench_function("div_u512", |b| {
    b.iter(|| black_box(x) / black_box(y));
  });
}

// Time Elastic arithmetic (including the conversions to the result type)

fn add_elastic(c: &mut Criterion) {
  let x = Elastic::<U40>::new(-0x12_3456_7890_i64);
  let y = Elastic::<U100>::new(0x1234_5678_9abc_def0_1234_i128);
  c.bench_function("add_elastic_40_40", |b| {
    b.iter(|| black_box(x) + black_box(x));
  });
  c.bench_function("add_elastic_40_100", |b| {
    b.iter(|| black_box(x) + black_box(y));
  });
}

fn mul_elastic(c: &mut Criterion) {
  let x = Elastic::<U40>::new(-0x12_3456_7890_i64);
  let y = Elastic::<U100>::new(0x1234_5678_9abc_def0_1234_i128);
  c.bench_function("mul_elastic_40_40", |b| {
    b.iter(|| black_box(x) * black_box(x));
  });
  c.bench_function("mul_elastic_40_100", |b| {
    b.iter(|| black_box(x) * black_box(y));
  });
}

// Time fixed-point arithmetic

type Q16 = Scaled<i64, N16>;

fn mul_scaled(c: &mut Criterion) {
  let x = Q16::from_f64(3.14159);
  let y = Scaled::<i64, N32>::from_f64(-2.71828);
  c.bench_function("mul_scaled", |b| {
    b.iter(|| black_box(x) * black_box(y));
  });
}

fn div_scaled(c: &mut Criterion) {
  let x = Q16::from_f64(3.14159);
  let y = Q16::from_f64(-2.71828);
  c.bench_function("div_scaled", |b| {
    b.iter(|| black_box(x) / black_box(y));
  });
  c.bench_function("quotient_scaled", |b| {
    b.iter(|| Q16::quotient(black_box(x), black_box(y)));
  });
  c.bench_function("quotient_scaled_nearest", |b| {
    b.iter(|| Scaled::<Rounding<i64, Nearest>, N16>::quotient(black_box(x), black_box(y)));
  });
}

fn sqrt_scaled(c: &mut Criterion) {
  let mut g = c.benchmark_group("sqrt_scaled");
  for x in [0.5, 2., 12345.678] {
    let x = Q16::from_f64(x);
    g.throughput(Throughput::Elements(1));
    g.bench_with_input(BenchmarkId::from_parameter(x), &x, |b, &x| {
      b.iter(|| black_box(x).sqrt());
    });
  }
  g.finish();
}

criterion_group!(baseline,
  baseline_mul_i128,
  baseline_div_i128,
);

criterion_group!(duplex,
  mul_i256,
  div_i256,
  div_u512,
);

criterion_group!(elastic,
  add_elastic,
  mul_elastic,
);

criterion_group!(scaled,
  mul_scaled,
  div_scaled,
  sqrt_scaled,
);

criterion_main!(baseline, duplex, elastic, scaled);
