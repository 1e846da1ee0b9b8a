use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regex::Regex;

fn verify_password(password: &str, encoded: &str) -> bool {
    PasswordHash::new(encoded)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn page_link(path: &str, page: usize, page_size: usize) -> String {
    format!("{}?page={}&page_size={}", path, page, page_size)
}

fn benchmark_verify_password(c: &mut Criterion) {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2::default()
        .hash_password(b"testpass123", &salt)
        .unwrap()
        .to_string();

    c.bench_function("verify_password", |b| {
        b.iter(|| verify_password(black_box("testpass123"), black_box(&encoded)))
    });
}

fn benchmark_username_validation(c: &mut Criterion) {
    let re = Regex::new(r"^[\w.@+-]+$").unwrap();
    let usernames: Vec<String> = (0..1000)
        .map(|i| {
            if i % 10 == 0 {
                format!("bad user {}", i)
            } else {
                format!("reader.{}@books", i)
            }
        })
        .collect();

    c.bench_function("username_validation", |b| {
        b.iter(|| {
            usernames
                .iter()
                .filter(|u| re.is_match(black_box(u)))
                .count()
        })
    });
}

fn benchmark_page_links(c: &mut Criterion) {
    c.bench_function("page_links", |b| {
        b.iter(|| {
            (1..=100)
                .map(|page| page_link(black_box("/api/reviews/9780441013593/"), page, 10))
                .collect::<Vec<_>>()
        })
    });
}

criterion_group!(
    benches,
    benchmark_verify_password,
    benchmark_username_validation,
    benchmark_page_links
);
criterion_main!(benches);
