use criterion::{criterion_group, criterion_main, Criterion};

use models::{ComplaintInput, RegisterInput};
use service::Store;

fn bench_store(c: &mut Criterion) {
    let store = Store::default();
    let user = store
        .register(RegisterInput { name: "Bench".into(), email: "bench@example.com".into() })
        .unwrap();

    c.bench_function("store_submit_complaint", |b| {
        b.iter(|| {
            store
                .submit_complaint(
                    &user.secret_code,
                    ComplaintInput { title: "bench".into(), summary: "bench".into(), severity: 1 },
                )
                .unwrap();
        });
    });

    c.bench_function("store_list_complaints_for_user", |b| {
        b.iter(|| {
            let _ = store.list_complaints_for_user(&user.secret_code).unwrap();
        });
    });
}

criterion_group!(benches, bench_store);
criterion_main!(benches);
