use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lite_youtube::renderer::HtmlParser;
use lite_youtube::{LinkRewriter, RewriterConfig, resolve};
use url::Url;

/// Link resolution across the supported URL shapes
fn benchmark_resolve(c: &mut Criterion) {
    let urls: Vec<Url> = [
        "https://youtu.be/dQw4w9WgXcQ?t=42",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&start=90",
        "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        "https://m.youtube.com/watch?v=dQw4w9WgXcQ#t=1h2m3s",
    ]
    .iter()
    .filter_map(|u| Url::parse(u).ok())
    .collect();

    c.bench_function("resolve", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(resolve(black_box(url)));
            }
        })
    });
}

/// Full rewrite pass over a feed page with more links than the cap
fn benchmark_rewriting(c: &mut Criterion) {
    let html: String = (0..150)
        .map(|i| {
            format!(
                r#"<div class="e-content"><p>Post {i}: <a href="https://youtu.be/dQw4w9WgX{:02}">watch</a></p></div>"#,
                i % 100
            )
        })
        .collect();
    let parsed = HtmlParser::new().parse(&html).unwrap();

    let mut group = c.benchmark_group("rewriting");

    group.bench_function("parse_150_links", |b| {
        b.iter(|| black_box(HtmlParser::new().parse(black_box(&html)).unwrap()))
    });

    group.bench_function("rewrite_150_links", |b| {
        b.iter(|| {
            let mut document = parsed.clone();
            let mut rewriter = LinkRewriter::new(RewriterConfig::default()).unwrap();
            black_box(rewriter.rewrite(&mut document))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolve, benchmark_rewriting);
criterion_main!(benches);
