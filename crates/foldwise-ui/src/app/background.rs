//! Background calls to the pattern service
//!
//! Channel sends use `let _ =`: the receiver only disappears while the app is
//! shutting down, when nobody is waiting for the result.

use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::ui::{App, LoadingState};
use foldwise_adapters::save_instructions;
use foldwise_core::{ExportError, FlowOutcome};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use tokio::task::JoinHandle;

const GENERATION_TASK: &str = "pattern_generation";
const TEMPLATES_TASK: &str = "template_load";
const EXPORT_TASK: &str = "pattern_export";

/// Fetch the template catalog.
pub fn start_template_load(app: &mut App, ctx: &RuntimeContext) {
    if !app.loading.is_loading() {
        app.loading = LoadingState::LoadingTemplates;
    }
    let backend = ctx.backend.clone();
    let tx = ctx.tx.clone();
    spawn_background(ctx.tx.clone(), TEMPLATES_TASK, async move {
        let msg = match backend.templates().await {
            Ok(catalog) => BackgroundMessage::TemplatesLoaded(catalog),
            Err(e) => BackgroundMessage::TemplatesError(e),
        };
        let _ = tx.send(msg);
    });
}

/// Validate the form and send it. A request still in flight is superseded:
/// its task is aborted and any late answer is dropped by ticket.
pub fn start_generation(app: &mut App, ctx: &RuntimeContext) {
    let submission = match app.session.submit() {
        Ok(submission) => submission,
        Err(e) => {
            app.show_error(&e.to_string());
            return;
        }
    };

    if let Some(old) = submission.superseded {
        tracing::debug!(ticket = old.id(), "superseding in-flight generation");
    }
    app.loading = LoadingState::Generating;
    app.instruction_scroll = 0;

    let backend = ctx.backend.clone();
    let tx = ctx.tx.clone();
    let ticket = submission.ticket;
    let planned = submission.planned;
    let handle = spawn_background(ctx.tx.clone(), GENERATION_TASK, async move {
        let result = backend.generate(&planned).await;
        let _ = tx.send(BackgroundMessage::PatternFinished { ticket, result });
    });
    app.track_generation(handle);
}

/// Export the current pattern and write it into the export directory.
pub fn start_export(app: &mut App, ctx: &RuntimeContext) {
    if app.loading == LoadingState::Exporting {
        app.show_toast("Export already running");
        return;
    }
    let request = match app.session.prepare_export() {
        Ok(request) => request,
        Err(e) => {
            app.show_error(&e.to_string());
            return;
        }
    };
    if !app.loading.is_loading() {
        app.loading = LoadingState::Exporting;
    }

    let backend = ctx.backend.clone();
    let dir = ctx.export_dir.to_path_buf();
    let tx = ctx.tx.clone();
    spawn_background(ctx.tx.clone(), EXPORT_TASK, async move {
        let msg = match backend.export(&request).await {
            Ok(exported) => match save_instructions(&dir, &exported) {
                Ok(path) => BackgroundMessage::ExportSaved {
                    path,
                    filename: exported.filename,
                },
                Err(e) => BackgroundMessage::ExportError(format!("Could not save file: {:#}", e)),
            },
            Err(e) => BackgroundMessage::ExportError(ExportError::from(e).to_string()),
        };
        let _ = tx.send(msg);
    });
}

fn clear_loading(app: &mut App, state: LoadingState) {
    if app.loading == state {
        app.loading = LoadingState::None;
    }
}

/// Apply everything background tasks reported since the last call.
pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) -> bool {
    let mut changed = false;
    while let Ok(msg) = rx.try_recv() {
        changed = true;
        match msg {
            BackgroundMessage::TemplatesLoaded(catalog) => {
                clear_loading(app, LoadingState::LoadingTemplates);
                let count = catalog.len();
                if app.apply_catalog(catalog) {
                    app.show_toast("Selected template is no longer available");
                } else {
                    tracing::info!(count, "templates loaded");
                }
            }
            BackgroundMessage::TemplatesError(e) => {
                clear_loading(app, LoadingState::LoadingTemplates);
                tracing::warn!(error = %e, "template load failed");
                app.catalog_error = Some(format!("Could not load templates: {}", e));
                app.show_error("Could not load templates (Ctrl-R to retry)");
            }
            BackgroundMessage::PatternFinished { ticket, result } => {
                match app.session.complete(ticket, result) {
                    FlowOutcome::Applied { folds } => {
                        app.generation_settled();
                        app.instruction_scroll = 0;
                        app.show_success(&format!("Pattern ready: {} folds", folds));
                    }
                    FlowOutcome::Failed(e) => {
                        app.generation_settled();
                        tracing::warn!(error = %e, "generation failed");
                        app.show_alert("Generation failed", &e.to_string());
                    }
                    FlowOutcome::Stale => {
                        tracing::debug!(ticket = ticket.id(), "dropped stale pattern response");
                    }
                }
            }
            BackgroundMessage::ExportSaved { path, filename } => {
                clear_loading(app, LoadingState::Exporting);
                app.show_success(&format!("Saved {}", filename));
                app.last_export = Some(path);
            }
            BackgroundMessage::ExportError(message) => {
                clear_loading(app, LoadingState::Exporting);
                app.show_alert("Export failed", &message);
            }
            BackgroundMessage::TaskFailed { task, detail } => {
                tracing::error!(task, %detail, "background task panicked");
                match task {
                    GENERATION_TASK => {
                        app.session.cancel();
                        app.generation_settled();
                    }
                    TEMPLATES_TASK => clear_loading(app, LoadingState::LoadingTemplates),
                    EXPORT_TASK => clear_loading(app, LoadingState::Exporting),
                    _ => {}
                }
                app.show_alert(
                    "Something went wrong",
                    &format!("Background task '{}' crashed unexpectedly: {}", task, detail),
                );
            }
        }
    }
    changed
}

/// Run `fut` on the tokio runtime, reporting a panic as
/// [`BackgroundMessage::TaskFailed`].
pub fn spawn_background<F>(
    tx: mpsc::Sender<BackgroundMessage>,
    task_name: &'static str,
    fut: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            let _ = tx.send(BackgroundMessage::TaskFailed {
                task: task_name,
                detail,
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{catalog, pattern};
    use crate::ui::{Overlay, ToastKind};
    use async_trait::async_trait;
    use foldwise_core::{
        ExportRequest, ExportedInstructions, FoldingSession, PatternBackend, PatternResult,
        PlannedRequest, RequestError, TemplateCatalog,
    };
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct StubBackend {
        generated: Mutex<Vec<PlannedRequest>>,
        fail_generate: bool,
    }

    #[async_trait]
    impl PatternBackend for StubBackend {
        async fn templates(&self) -> Result<TemplateCatalog, RequestError> {
            Ok(catalog())
        }

        async fn generate(&self, planned: &PlannedRequest) -> Result<PatternResult, RequestError> {
            self.generated.lock().unwrap().push(planned.clone());
            if self.fail_generate {
                return Err(RequestError::server(
                    400,
                    Some("Book must have at least 200 pages".into()),
                ));
            }
            Ok(pattern(5))
        }

        async fn export(
            &self,
            _request: &ExportRequest,
        ) -> Result<ExportedInstructions, RequestError> {
            Ok(ExportedInstructions {
                instructions: "Step 1: Page 2".into(),
                filename: "book_folding_HELLO.txt".into(),
            })
        }
    }

    fn app() -> App {
        App::new(FoldingSession::default(), "local")
    }

    /// Drain until `done` holds or two seconds pass.
    async fn pump(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            drain_messages(app, rx);
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("background work did not finish");
    }

    fn run<'a>(
        backend: &'a Arc<dyn PatternBackend>,
        dir: &'a Path,
        tx: &'a mpsc::Sender<BackgroundMessage>,
    ) -> RuntimeContext<'a> {
        RuntimeContext {
            backend,
            export_dir: dir,
            tx,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn templates_then_generate_then_export() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Arc::new(StubBackend::default());
        let backend: Arc<dyn PatternBackend> = stub.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = run(&backend, dir.path(), &tx);
        let mut app = app();

        start_template_load(&mut app, &ctx);
        assert_eq!(app.loading, LoadingState::LoadingTemplates);
        pump(&mut app, &rx, |a| !a.session.catalog().is_empty()).await;
        assert_eq!(app.loading, LoadingState::None);

        app.session.text = "hello".into();
        start_generation(&mut app, &ctx);
        assert_eq!(app.loading, LoadingState::Generating);
        pump(&mut app, &rx, |a| a.session.view_model().has_result()).await;
        assert_eq!(app.loading, LoadingState::None);
        assert_eq!(stub.generated.lock().unwrap().len(), 1);
        assert_eq!(app.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));

        start_export(&mut app, &ctx);
        pump(&mut app, &rx, |a| a.last_export.is_some()).await;
        let saved = app.last_export.clone().unwrap();
        assert_eq!(saved, dir.path().join("book_folding_HELLO.txt"));
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "Step 1: Page 2");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn server_rejection_opens_alert() {
        let dir = tempfile::tempdir().unwrap();
        let backend: Arc<dyn PatternBackend> = Arc::new(StubBackend {
            fail_generate: true,
            ..Default::default()
        });
        let (tx, rx) = mpsc::channel();
        let ctx = run(&backend, dir.path(), &tx);
        let mut app = app();

        app.session.text = "hello".into();
        start_generation(&mut app, &ctx);
        pump(&mut app, &rx, |a| a.overlay != Overlay::None).await;
        match &app.overlay {
            Overlay::Alert { title, message } => {
                assert_eq!(title, "Generation failed");
                assert_eq!(message, "Book must have at least 200 pages");
            }
            other => panic!("unexpected overlay {:?}", other),
        }
        assert!(!app.session.view_model().has_result());
        assert_eq!(app.loading, LoadingState::None);
    }

    #[test]
    fn invalid_form_never_reaches_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Arc::new(StubBackend::default());
        let backend: Arc<dyn PatternBackend> = stub.clone();
        let (tx, _rx) = mpsc::channel();
        let ctx = run(&backend, dir.path(), &tx);
        let mut app = app();

        // No tokio runtime here: spawning would panic, so this also proves
        // nothing was spawned.
        start_generation(&mut app, &ctx);
        assert_eq!(app.loading, LoadingState::None);
        assert!(app.toast.as_ref().is_some_and(|t| t.is_error()));
        assert!(stub.generated.lock().unwrap().is_empty());
    }

    #[test]
    fn export_without_pattern_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend: Arc<dyn PatternBackend> = Arc::new(StubBackend::default());
        let (tx, _rx) = mpsc::channel();
        let ctx = run(&backend, dir.path(), &tx);
        let mut app = app();

        start_export(&mut app, &ctx);
        assert_eq!(app.loading, LoadingState::None);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Nothing to export yet: generate a pattern first")
        );
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut app = app();
        app.session.text = "first".into();
        let first = app.session.submit().unwrap();
        app.session.text = "second".into();
        let second = app.session.submit().unwrap();

        let (tx, rx) = mpsc::channel();
        tx.send(BackgroundMessage::PatternFinished {
            ticket: first.ticket,
            result: Ok(pattern(3)),
        })
        .unwrap();
        drain_messages(&mut app, &rx);
        assert!(!app.session.view_model().has_result());
        assert!(app.session.flow().is_requesting());

        tx.send(BackgroundMessage::PatternFinished {
            ticket: second.ticket,
            result: Ok(pattern(4)),
        })
        .unwrap();
        drain_messages(&mut app, &rx);
        assert_eq!(app.session.instruction_list().len(), 4);
    }

    #[test]
    fn template_failure_is_shown_in_gallery() {
        let mut app = app();
        app.loading = LoadingState::LoadingTemplates;
        let (tx, rx) = mpsc::channel();
        tx.send(BackgroundMessage::TemplatesError(RequestError::Network(
            "connection refused".into(),
        )))
        .unwrap();
        assert!(drain_messages(&mut app, &rx));
        assert_eq!(app.loading, LoadingState::None);
        assert!(app
            .catalog_error
            .as_deref()
            .is_some_and(|e| e.contains("connection refused")));
    }

    #[test]
    fn panicked_generation_releases_the_flow() {
        let mut app = app();
        app.session.text = "hello".into();
        app.session.submit().unwrap();
        app.loading = LoadingState::Generating;

        let (tx, rx) = mpsc::channel();
        tx.send(BackgroundMessage::TaskFailed {
            task: GENERATION_TASK,
            detail: "boom".into(),
        })
        .unwrap();
        drain_messages(&mut app, &rx);
        assert!(!app.session.flow().is_requesting());
        assert_eq!(app.loading, LoadingState::None);
        assert!(matches!(app.overlay, Overlay::Alert { .. }));
    }

    #[tokio::test]
    async fn spawn_background_reports_panics() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_background(tx, "boom", async {
            panic!("kaboom");
        });
        handle.await.unwrap();
        match rx.try_recv() {
            Ok(BackgroundMessage::TaskFailed { task, detail }) => {
                assert_eq!(task, "boom");
                assert_eq!(detail, "kaboom");
            }
            _ => panic!("expected TaskFailed"),
        }
    }
}
