// Throughput of search, similarity, encoding and chat over a synthetic dataset
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kalakaart_assistant::{Assistant, ChatRequest, PatternClassifier};
use kalakaart_core::{find_similar, search, ArtisanRecord, Language, Location, RecordStore, SearchFilters};
use kalakaart_retrieval::corpus::{builtin_documents, documents_from_store};
use kalakaart_retrieval::{Encoder, HashingEncoder, Retriever};
use std::sync::Arc;

const CRAFTS: &[&str] = &["Pottery", "Weaving", "Madhubani Painting", "Chikankari", "Wood Carving", "Bidriware"];
const STATES: &[&str] = &["Gujarat", "Rajasthan", "Bihar", "Uttar Pradesh", "Karnataka", "Kerala", "Odisha"];

fn generate_store(size: usize) -> RecordStore {
    let records = (0..size)
        .map(|i| ArtisanRecord {
            id: format!("A{}", i),
            name: format!("Artisan {}", i),
            gender: if i % 2 == 0 { "Female" } else { "Male" }.to_string(),
            age: 20 + (i % 50) as u32,
            craft_type: CRAFTS[i % CRAFTS.len()].to_string(),
            location: Location {
                state: STATES[i % STATES.len()].to_string(),
                district: format!("District {}", i % 40),
                village: String::new(),
            },
            languages: vec!["Hindi".to_string()],
            cluster_code: format!("C{}", i % 25),
            ..Default::default()
        })
        .collect();
    RecordStore::from_records(records)
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000].iter() {
        let store = generate_store(*size);
        let filters = SearchFilters {
            state: Some("up".to_string()),
            craft_type: Some("chikan".to_string()),
            age_min: Some(30),
            sort_by: Some("age".to_string()),
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("filter_sort_page", size), &store, |b, store| {
            b.iter(|| black_box(search(store, black_box(&filters))));
        });
    }

    group.finish();
}

fn benchmark_similar(c: &mut Criterion) {
    let store = generate_store(10_000);
    c.bench_function("similar_10k", |b| {
        b.iter(|| black_box(find_similar(&store, black_box("A42"), 5)));
    });
}

fn benchmark_encoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoder");

    for dim in [128, 384, 1024].iter() {
        let encoder = HashingEncoder::new(*dim).unwrap();
        group.bench_with_input(BenchmarkId::new("hashing", dim), &encoder, |b, encoder| {
            b.iter(|| black_box(encoder.encode(black_box("blue pottery artisans from jaipur, rajasthan"))));
        });
    }

    group.finish();
}

fn benchmark_retrieval(c: &mut Criterion) {
    let store = generate_store(1_000);
    let mut documents = builtin_documents();
    documents.extend(documents_from_store(&store));
    let retriever = Retriever::build(Arc::new(HashingEncoder::default()), documents).unwrap();

    c.bench_function("retrieve_english", |b| {
        b.iter(|| black_box(retriever.retrieve(black_box("history of madhubani painting"), Language::English)));
    });
    c.bench_function("retrieve_hindi_with_fallback", |b| {
        b.iter(|| black_box(retriever.retrieve(black_box("मिट्टी के बर्तन"), Language::Hindi)));
    });
}

fn benchmark_chat(c: &mut Criterion) {
    let store = Arc::new(generate_store(10_000));
    let assistant = Assistant::new(store, Box::new(PatternClassifier::new().unwrap()));
    let request = ChatRequest::new("show me young pottery artists in Gujarat");

    c.bench_function("chat_combined_search", |b| {
        b.iter(|| black_box(assistant.chat(black_box(&request))));
    });
}

criterion_group!(
    benches,
    benchmark_search,
    benchmark_similar,
    benchmark_encoder,
    benchmark_retrieval,
    benchmark_chat
);
criterion_main!(benches);
