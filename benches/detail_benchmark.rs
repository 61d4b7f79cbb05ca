use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fitness_ai_client::models::{Activity, ActivityId};
use fitness_ai_client::services::detail::{find_by_id, is_incomplete, resolve_fields};

const COLLECTION_SIZE: u64 = 5_000;

fn collection() -> Vec<Activity> {
    (0..COLLECTION_SIZE)
        .map(|i| Activity {
            id: Some(ActivityId::from(i)),
            activity_type: Some("RUNNING".to_string()),
            duration: Some(30.0 + (i % 60) as f64),
            calories_burned: Some(200.0 + (i % 400) as f64),
            ..Default::default()
        })
        .collect()
}

fn benchmark_fallback_lookup(c: &mut Criterion) {
    let activities = collection();
    let partial = Activity {
        id: Some(ActivityId::from("4999")),
        activity_type: Some(String::new()),
        duration: Some(30.0),
        ..Default::default()
    };

    let mut group = c.benchmark_group("detail_fallback");

    // Worst case: match is the last entry, and numeric ids compare as strings
    group.bench_function("find_by_id_last_entry", |b| {
        b.iter(|| find_by_id(black_box(&activities), black_box("4999")))
    });

    group.bench_function("find_by_id_missing", |b| {
        b.iter(|| find_by_id(black_box(&activities), black_box("not-there")))
    });

    group.bench_function("check_and_resolve", |b| {
        b.iter(|| {
            let primary = black_box(partial.clone());
            let fallback = if is_incomplete(&primary) {
                find_by_id(&activities, "4999")
            } else {
                None
            };
            resolve_fields("4999", primary, fallback)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_fallback_lookup);
criterion_main!(benches);
