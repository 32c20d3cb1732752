//! Benchmarks for mdocx conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run synthetic lesson plans through each pipeline stage.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic lesson plan with the given number of activities.
fn create_lesson(activity_count: usize) -> String {
    let mut content = String::new();

    content.push_str("# Bài 5: Phân số\n\n");
    content.push_str("## I. Mục tiêu\n");
    content.push_str("- Hiểu khái niệm **phân số** $a/b$ với $b \\neq 0$\n");
    content.push_str("> Lưu ý: mẫu số khác không.\n\n");

    for i in 0..activity_count {
        content.push_str(&format!("### Hoạt động {}\n", i + 1));
        content.push_str("| Hoạt động của GV | Hoạt động của HS |\n");
        content.push_str("|---|:---:|\n");
        content.push_str(&format!(
            "| > Giao nhiệm vụ {}<br>- Tính $1/2 + 1/3$ | **Thực hiện**<br/>$\\frac{{5}}{{6}}$ |\n",
            i + 1
        ));
        content.push_str("| Nhận xét | Ghi bài |\n\n");
        content.push_str("Kết quả: $x = (a+b)/(c)$ và **đáp án** đúng.\n\n");
    }

    content
}

fn create_raw_lesson(activity_count: usize) -> String {
    (0..activity_count)
        .map(|i| format!("Bước {}: \\(x={}/{}\\)\n\n\n\n\\[y = (a+b)/(c)\\]\n", i, i + 1, i + 2))
        .collect()
}

/// Benchmark segmentation and block classification.
fn bench_parsing(c: &mut Criterion) {
    let text = create_lesson(20);

    c.bench_function("parse_blocks_20_activities", |b| {
        b.iter(|| mdocx::parse_blocks(black_box(&text)));
    });

    c.bench_function("parse_inline", |b| {
        b.iter(|| mdocx::parse_inline(black_box("**A** and $x/y$ then $$z$$ and **B**")));
    });
}

/// Benchmark assembly and packaging at various sizes.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_docx");

    for activity_count in [1, 10, 50].iter() {
        let text = create_lesson(*activity_count);

        group.bench_function(format!("{}_activities", activity_count), |b| {
            b.iter(|| mdocx::to_docx(black_box(&text)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the normalizer.
fn bench_normalize(c: &mut Criterion) {
    let text = create_raw_lesson(50);

    c.bench_function("normalize_50_steps", |b| {
        b.iter(|| mdocx::normalize(black_box(&text)));
    });
}

criterion_group!(benches, bench_parsing, bench_conversion, bench_normalize);
criterion_main!(benches);
