use book_finder::models::book::BookSummary;
use book_finder::models::responses::parse_search_body;
use book_finder::utils::text::{format_created, strip_identifier_prefix};
use book_finder::view::render::render;
use book_finder::view::state::{reduce, Action, Effect, ViewState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_search_body(count: usize) -> Vec<u8> {
    let books: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"workId":"/works/OL{}W","title":"Test Book {}","author":"Test Author {}, Co Author","cover":"https://covers.openlibrary.org/b/id/{}-M.jpg","year":{}}}"#,
                i,
                i,
                i % 50,
                i,
                1800 + (i % 200)
            )
        })
        .collect();
    format!(r#"{{"books":[{}]}}"#, books.join(",")).into_bytes()
}

fn create_results_state(count: usize) -> ViewState {
    let books: Vec<BookSummary> = parse_search_body(&create_search_body(count)).unwrap();
    let (state, _) = reduce(&ViewState::new(), Action::EditQuery("test".to_string()));
    let (state, effects) = reduce(&state, Action::SubmitSearch);
    let request = match effects.first() {
        Some(Effect::Search { request, .. }) => *request,
        _ => unreachable!(),
    };
    let (state, _) = reduce(
        &state,
        Action::SearchCompleted {
            request,
            outcome: Ok(books),
        },
    );
    state
}

fn benchmark_strip_identifier(c: &mut Criterion) {
    c.bench_function("strip_identifier_prefix", |b| {
        b.iter(|| strip_identifier_prefix(black_box("/works/OL45883W")))
    });
}

fn benchmark_format_created(c: &mut Criterion) {
    c.bench_function("format_created", |b| {
        b.iter(|| format_created(black_box("2009-10-15T11:34:21.437031")))
    });
}

fn benchmark_parse_search_body(c: &mut Criterion) {
    let body = create_search_body(100);

    c.bench_function("parse_search_body_100", |b| {
        b.iter(|| parse_search_body(black_box(&body)))
    });
}

fn benchmark_reduce_select(c: &mut Criterion) {
    let state = create_results_state(100);

    c.bench_function("reduce_select_result", |b| {
        b.iter(|| reduce(black_box(&state), Action::SelectResult(black_box(42))))
    });
}

fn benchmark_render_results(c: &mut Criterion) {
    let state = create_results_state(100);

    c.bench_function("render_100_results", |b| b.iter(|| render(black_box(&state))));
}

criterion_group!(
    benches,
    benchmark_strip_identifier,
    benchmark_format_created,
    benchmark_parse_search_body,
    benchmark_reduce_select,
    benchmark_render_results
);
criterion_main!(benches);
