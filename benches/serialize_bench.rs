#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use domoxide::{serialize, serialize_with_options, Element, Node, SerializeOptions};

// ---------------------------------------------------------------------------
// Tree generators
// ---------------------------------------------------------------------------

/// A flat document: one root with `n` attribute-carrying children.
fn make_flat(n: usize) -> Node {
    let mut root = Element::new("catalog");
    for i in 0..n {
        root = root.child(
            Element::new("item")
                .attr("id", i.to_string())
                .text(format!("Value {i}")),
        );
    }
    Node::from(root)
}

/// A namespace-heavy document: alternating URIs so prefixes are declared,
/// leave scope, and are re-declared.
fn make_namespaced(n: usize) -> Node {
    let mut root = Element::new("feed").namespace("urn:feed");
    for i in 0..n {
        let uri = if i % 2 == 0 { "urn:even" } else { "urn:odd" };
        root = root.child(
            Element::new("entry")
                .namespace(uri)
                .attr_ns(uri, "seq", i.to_string())
                .text("payload"),
        );
    }
    Node::from(root)
}

/// Text dominated by characters that need escaping.
fn make_escape_heavy(n: usize) -> Node {
    let text = "a < b & c > d; ".repeat(n);
    Node::from(Element::new("quote").attr("src", "it's <mixed> & 'quoted'").text(text))
}

/// One deeply nested chain sharing a single namespace.
fn make_deep(depth: usize) -> Node {
    let mut el = Element::new("leaf").namespace("urn:deep").text("x");
    for _ in 0..depth {
        el = Element::new("level").namespace("urn:deep").child(el);
    }
    Node::from(el)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_serialize(c: &mut Criterion) {
    let flat = make_flat(1000);
    c.bench_function("serialize_flat_1000", |b| {
        b.iter(|| serialize(black_box(&flat)).unwrap());
    });

    let namespaced = make_namespaced(500);
    c.bench_function("serialize_namespaced_500", |b| {
        b.iter(|| serialize(black_box(&namespaced)).unwrap());
    });

    let escapes = make_escape_heavy(2000);
    c.bench_function("serialize_escape_heavy", |b| {
        b.iter(|| serialize(black_box(&escapes)).unwrap());
    });

    let deep = make_deep(256);
    c.bench_function("serialize_deep_256", |b| {
        b.iter(|| serialize(black_box(&deep)).unwrap());
    });

    // Same flat document, but sized so the first pass never overflows.
    let presized = SerializeOptions::default().initial_capacity(1 << 20);
    c.bench_function("serialize_flat_1000_presized", |b| {
        b.iter(|| serialize_with_options(black_box(&flat), &presized).unwrap());
    });
}

criterion_group!(benches, bench_serialize);
criterion_main!(benches);
