//! Benchmarks for markdown rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pressroom_markdown::render;

/// Generate an article body with the given number of sections.
fn generate_article(sections: usize) -> String {
    let mut md = String::with_capacity(sections * 400);
    md.push_str("# Article Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!(
            "Paragraph {i} with **bold**, *italic* and a [link](https://example.com/{i}).\n\n"
        ));
        md.push_str("- first point\n- second point\n\n");
        md.push_str("> A quotation\n> spanning two lines\n\n");
        md.push_str(&format!("![Figure {i}](https://cdn.example.com/{i}.png)\n\n"));
    }
    md
}

fn bench_render_simple(c: &mut Criterion) {
    c.bench_function("render_simple_markdown", |b| {
        b.iter(|| render("# Hello\n\nSimple **content**."));
    });
}

fn bench_render_passthrough(c: &mut Criterion) {
    let html = "<h2>Title</h2><p>Rich text with **markers** and [a link](/x).</p>".repeat(50);

    c.bench_function("render_passthrough_html", |b| {
        b.iter(|| render(&html));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_article_sizes");

    for sections in [1, 10, 100] {
        let article = generate_article(sections);
        group.throughput(Throughput::Bytes(article.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &article, |b, md| {
            b.iter(|| render(md));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render_simple,
    bench_render_passthrough,
    bench_render_varying_sizes
);
criterion_main!(benches);
