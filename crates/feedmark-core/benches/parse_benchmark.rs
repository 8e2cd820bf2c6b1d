//! Benchmarks comparing feedmark parsing vs pulldown-cmark (CommonMark)
//!
//! Run with: cargo bench -p feedmark-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feedmark_core::Parser;
use pulldown_cmark::{Options, Parser as MdParser};

/// Sample feedmark content
const FEEDMARK_SAMPLE: &str = r#"# User Service

This paragraph has *emphasis*, **strong text**, `inline code`, and a
[link](https://example.com) to demonstrate the inline grammar.

## Endpoints

%% GET /users/{id}

Fetches a single user.

%% POST /users

>info
> Requests are rate limited.
> See the **limits** section below.

## Parameters

| Name | Type | Required |
|:----:|------|----------|
| id | string | yes |
| expand | string | no |

## Example

```js
const user = await client.users.fetch('123')
console.log(user.name)
```

## Notes

- Responses are JSON
- Errors use problem detail
  - title
  - status
- Pagination is cursor based

---

> Quoted remark at the end of the document.
"#;

/// Equivalent Markdown content (as close as possible)
const MARKDOWN_SAMPLE: &str = r#"# User Service

This paragraph has *emphasis*, **strong text**, `inline code`, and a
[link](https://example.com) to demonstrate the inline grammar.

## Endpoints

`GET /users/{id}`

Fetches a single user.

`POST /users`

> **Note**
>
> Requests are rate limited.
> See the **limits** section below.

## Parameters

| Name | Type | Required |
|:----:|------|----------|
| id | string | yes |
| expand | string | no |

## Example

```js
const user = await client.users.fetch('123')
console.log(user.name)
```

## Notes

- Responses are JSON
- Errors use problem detail
  - title
  - status
- Pagination is cursor based

---

> Quoted remark at the end of the document.
"#;

fn bench_feedmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    // Set throughput for bytes/sec reporting
    group.throughput(Throughput::Bytes(FEEDMARK_SAMPLE.len() as u64));

    group.bench_function("feedmark", |b| {
        b.iter(|| {
            let parser = Parser::new();
            let ast = parser.parse(black_box(FEEDMARK_SAMPLE)).unwrap();
            black_box(ast.len())
        })
    });

    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(MARKDOWN_SAMPLE), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    // Test with different document sizes
    for size in [1, 5, 10, 20].iter() {
        let feedmark_content: String = FEEDMARK_SAMPLE.repeat(*size);
        let markdown_content: String = MARKDOWN_SAMPLE.repeat(*size);

        group.throughput(Throughput::Bytes(feedmark_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("feedmark", size),
            &feedmark_content,
            |b, content| {
                b.iter(|| {
                    let parser = Parser::new();
                    let ast = parser.parse(black_box(content)).unwrap();
                    black_box(ast.len())
                })
            },
        );

        group.throughput(Throughput::Bytes(markdown_content.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("markdown", size),
            &markdown_content,
            |b, content| {
                b.iter(|| {
                    let parser = MdParser::new_ext(black_box(content), Options::all());
                    let events: Vec<_> = parser.collect();
                    black_box(events.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_inline_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let inline_sample =
        "This has *emphasis*, **strong**, `code`, [a link](https://example.com), and \\*escapes\\*.";

    group.bench_function("feedmark_inline", |b| {
        b.iter(|| {
            let inlines = feedmark_core::inline::parse_inlines(black_box(inline_sample));
            black_box(inlines.len())
        })
    });

    group.bench_function("markdown_inline", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(inline_sample), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_feedmark_parse,
    bench_scaling,
    bench_inline_parsing
);
criterion_main!(benches);
