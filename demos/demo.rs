//! End-to-end demo of test generation.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Bank**: a small arithmetic bank is parsed from TeX text.
//! 2. **Sampling**: the same constraints are sampled with two seeds, showing
//!    that a seed fixes both the chosen problems and their order.
//! 3. **Layouts**: the first test is rendered in both layout styles.
//! 4. **Infeasible constraints**: a bounded attempt budget turns an
//!    impossible request into an error instead of an endless loop.

use exam_test_gen::test_engine::bank::parse_tex_bank;
use exam_test_gen::{
    generate_test, render_document, AttemptLimit, ConstraintSet, LayoutStyle, TestConfig,
    TestRequest,
};

fn bank_text() -> String {
    let mut text = String::from("% demo bank\n");
    let ops = [("addition", '+', 2), ("subtraction", '-', 3), ("multiplication", '\\', 4)];
    for (topic, op, difficulty) in ops {
        for i in 1..=6 {
            let question = if op == '\\' {
                format!("${i} \\times {}$", i + 2)
            } else {
                format!("${} {op} {i}$", i * 3)
            };
            text.push_str(&format!(
                "\\begin{{problem}}{{{topic}}}{{{difficulty}}}\n{question}\n\\answer\n?\n\\end{{problem}}\n\n"
            ));
        }
    }
    text
}

fn main() {
    let bank = parse_tex_bank(&bank_text()).expect("demo bank parses");
    println!("Bank: {} problems, topics {:?}", bank.len(), bank.topics());

    let constraints = ConstraintSet {
        size: 8,
        min_topic_count: 2,
        max_topic_count: 3,
        min_difficulty: 22,
        max_difficulty: 26,
    };
    println!("Constraints: {constraints}");
    println!();

    // ── Seeds ────────────────────────────────────────────────────────────────
    for seed in [1u64, 2] {
        let request = TestRequest::new(constraints)
            .with_seed(seed)
            .with_attempt_limit(AttemptLimit::AtMost(100_000));
        let test = generate_test(&bank, request).expect("feasible constraints");
        println!(
            "seed={seed}  id={}  attempts={}  difficulty={}",
            test.test_id,
            test.attempts,
            test.total_difficulty()
        );
        for (i, p) in test.problems.iter().enumerate() {
            println!("  {:>2}. {p}", i + 1);
        }
        println!();
    }

    // ── Layouts ──────────────────────────────────────────────────────────────
    for style in [LayoutStyle::Simple, LayoutStyle::Fancy] {
        let mut config = TestConfig::preset(style);
        config.constraints = constraints;
        config.rng_seed = Some(1);

        let test = generate_test(&bank, config.request()).expect("feasible constraints");
        let header = config.header().expect("preset variables are valid");
        let doc = render_document(&header, style.layout().as_ref(), &test.problems);
        println!("══ {style} layout ══");
        println!("{doc}");
        println!();
    }

    // ── Infeasible ───────────────────────────────────────────────────────────
    let impossible = ConstraintSet { min_topic_count: 4, max_topic_count: 4, ..constraints };
    let request = TestRequest::new(impossible)
        .with_seed(3)
        .with_attempt_limit(AttemptLimit::AtMost(5_000));
    match generate_test(&bank, request) {
        Ok(test) => println!("unexpected success: {}", test.test_id),
        Err(e) => println!("Infeasible request: {e}"),
    }
}
