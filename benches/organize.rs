use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use tcf_topics::{clean_topic, Config, PipelineKind, TopicOrganizer};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const TOPIC: &str = "Vous racontez à un ami un voyage qui vous a beaucoup plu et vous \
                     expliquez pourquoi cette destination vous a marqué durablement.";

const NOISE: &str = "AccueilSe connecter Compréhension écrite Expression Orale Nos \
                     Formations Contactez-nous Mentions Légales";

/// One month of oral topics: a few parts, a few topics each, some noise.
fn oral_doc(parts: usize, topics_per_part: usize) -> Value {
    let mut tache_2 = serde_json::Map::new();
    for part in 1..=parts {
        let mut topics: Vec<Value> = (0..topics_per_part)
            .map(|i| json!(format!("{TOPIC} (variante {i})")))
            .collect();
        topics.push(json!(NOISE));
        topics.push(json!("court"));
        tache_2.insert(format!("partie_{part}"), json!(topics));
    }
    json!({
        "source_url": "https://example.test/sujets",
        "topics": { "tache_2": tache_2 }
    })
}

fn bench_clean(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("clean_topic");

    group.bench_function("valid", |b| {
        b.iter(|| clean_topic(black_box(TOPIC), PipelineKind::Oral, &config))
    });
    group.bench_function("boilerplate", |b| {
        b.iter(|| clean_topic(black_box(NOISE), PipelineKind::Written, &config))
    });
    group.bench_function("labelled", |b| {
        b.iter(|| {
            clean_topic(
                black_box("Partie 12 :   Vous décrivez   votre quartier à un nouveau voisin."),
                PipelineKind::Oral,
                &config,
            )
        })
    });

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_all_topics");

    for (label, parts, topics_per_part) in [("small", 2, 5), ("medium", 6, 25)] {
        let dir = tempfile::tempdir().unwrap();
        for month in ["janvier", "fevrier", "mars", "avril"] {
            let doc = oral_doc(parts, topics_per_part);
            std::fs::write(
                dir.path().join(format!("{month}-2025-expression-orale.json")),
                serde_json::to_string(&doc).unwrap(),
            )
            .unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(label), &dir, |b, dir| {
            b.iter(|| {
                let mut organizer =
                    TopicOrganizer::new(PipelineKind::Oral, dir.path(), Config::default());
                organizer.load_all_topics().unwrap();
                black_box(organizer.report().total_topics)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clean, bench_load);
criterion_main!(benches);
