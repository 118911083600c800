use criterion::{black_box, criterion_group, criterion_main, Criterion};
use foldwise_core::{FoldingSession, PatternResult};
use foldwise_ui::ui::{self, App, Focus};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn synthetic_body(fold_count: usize) -> String {
    let folds: Vec<String> = (0..fold_count)
        .map(|i| {
            let start = 20.0 + (i % 90) as f64;
            format!(
                r#"{{"page":{},"start_mm":{},"end_mm":{},"depth_mm":12.5}}"#,
                i * 2 + 1,
                start,
                start + 40.0 + (i % 30) as f64
            )
        })
        .collect();
    format!(
        r#"{{"pattern":[{}],"statistics":{{"total_folds":{},"pages_used":{},"estimated_time_minutes":{},"text":"HELLO WORLD"}},"book_specs":{{"pages":800,"height":200,"width":25}}}}"#,
        folds.join(","),
        fold_count,
        fold_count,
        fold_count * 2
    )
}

fn synthetic_app(fold_count: usize) -> App {
    let mut session = FoldingSession::default();
    session.text = "hello world".to_string();
    let submission = session.submit().expect("form should validate");
    let result = PatternResult::from_json(&synthetic_body(fold_count)).expect("valid body");
    session.complete(submission.ticket, Ok(result));

    let mut app = App::new(session, "http://127.0.0.1:5000");
    app.focus = Focus::Instructions;
    app
}

fn bench_decode(c: &mut Criterion) {
    let body = synthetic_body(400);
    c.bench_function("decode_pattern_400", |b| {
        b.iter(|| {
            let result = PatternResult::from_json(black_box(&body)).expect("decode");
            black_box(result.folds.len());
        });
    });
}

fn bench_views(c: &mut Criterion) {
    let app = synthetic_app(2_000);
    c.bench_function("instruction_window_scroll", |b| {
        b.iter(|| {
            let list = app.session.instruction_list();
            let mut pages = 0u64;
            for start in (0..list.len()).step_by(25) {
                for step in list.window(black_box(start), 25) {
                    pages += step.fold.page as u64;
                }
            }
            black_box(pages);
        });
    });

    c.bench_function("preview_stack", |b| {
        b.iter(|| {
            let depth: f64 = app
                .session
                .preview_stack()
                .iter()
                .map(|e| e.depth_percent)
                .sum();
            black_box(depth);
        });
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let mut app = synthetic_app(2_000);
    app.instructions_down(1_000);

    let backend = TestBackend::new(140, 42);
    let mut terminal = Terminal::new(backend).expect("terminal should initialize");

    c.bench_function("render_frame_with_pattern", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| ui::render(frame, &app))
                .expect("draw should succeed");
        });
    });
}

criterion_group!(benches, bench_decode, bench_views, bench_render_frame);
criterion_main!(benches);
