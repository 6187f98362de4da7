use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ticketing_client::resilience::{RetryConfig, RetryPolicy};
use ticketing_client::transport::Disposition;

fn bench_retry_decisions(c: &mut Criterion) {
    let policy = RetryPolicy::new(RetryConfig::new());
    let transient = Disposition::ServerError {
        status: 503,
        message: "Service Unavailable".into(),
    };
    let terminal = Disposition::ClientError {
        status: 404,
        message: "Not Found".into(),
    };

    c.bench_function("decide_transient", |b| {
        b.iter(|| policy.decide(black_box(&transient), black_box(2)))
    });
    c.bench_function("decide_terminal", |b| {
        b.iter(|| policy.decide(black_box(&terminal), black_box(1)))
    });
}

criterion_group!(benches, bench_retry_decisions);
criterion_main!(benches);
