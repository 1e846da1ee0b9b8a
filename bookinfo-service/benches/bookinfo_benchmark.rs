use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use url::form_urlencoded::byte_serialize;

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(inner) => inner.get("value").and_then(Value::as_str).and_then(non_empty),
        _ => None,
    }
}

fn first_link(record: &Value, list_key: &str) -> Option<String> {
    record
        .get(list_key)?
        .as_array()?
        .first()?
        .get("key")?
        .as_str()
        .and_then(non_empty)
}

fn isbn_path(isbn: &str) -> String {
    format!(
        "/isbn/{}.json",
        byte_serialize(isbn.as_bytes())
            .collect::<String>()
            .replace('+', "%20")
    )
}

fn sample_book() -> Value {
    let subjects: Vec<Value> = (0..200)
        .map(|i| Value::String(format!("Subject {}", i)))
        .collect();

    json!({
        "title": "Dune",
        "publish_date": "1990",
        "authors": [{"key": "/authors/OL79034A"}, {"key": "/authors/OL2A"}],
        "works": [{"key": "/works/OL893415W"}],
        "subjects": subjects,
        "number_of_pages": 535
    })
}

fn benchmark_extract_book_fields(c: &mut Criterion) {
    let book = sample_book();

    c.bench_function("extract_book_fields", |b| {
        b.iter(|| {
            (
                text(black_box(&book), "title"),
                text(black_box(&book), "publish_date"),
                first_link(black_box(&book), "authors"),
                first_link(black_box(&book), "works"),
            )
        })
    });
}

fn benchmark_extract_typed_description(c: &mut Criterion) {
    let work = json!({
        "description": {
            "type": "/type/text",
            "value": "Set on the desert planet Arrakis. ".repeat(200)
        }
    });

    c.bench_function("extract_typed_description", |b| {
        b.iter(|| text(black_box(&work), "description"))
    });
}

fn benchmark_isbn_path(c: &mut Criterion) {
    c.bench_function("isbn_path", |b| {
        b.iter(|| isbn_path(black_box("978-0-441-01359-3")))
    });
}

criterion_group!(
    benches,
    benchmark_extract_book_fields,
    benchmark_extract_typed_description,
    benchmark_isbn_path
);
criterion_main!(benches);
