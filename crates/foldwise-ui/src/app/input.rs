//! Key handling for the Foldwise TUI

use crate::app::RuntimeContext;
use crate::ui::{App, Overlay};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod normal;
mod overlay;

use normal::handle_normal_mode;
use overlay::handle_overlay_input;

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN INPUT DISPATCHER
// ═══════════════════════════════════════════════════════════════════════════

/// Main key event handler
pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    if app.overlay != Overlay::None {
        handle_overlay_input(app, key);
        return Ok(());
    }

    handle_normal_mode(app, key, ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::BackgroundMessage;
    use crate::ui::test_support::catalog;
    use crate::ui::Focus;
    use async_trait::async_trait;
    use foldwise_core::{
        ExportRequest, ExportedInstructions, FoldingSession, GeometryField, PatternBackend,
        PatternResult, PlannedRequest, RequestError, SelectionMode, TemplateCatalog,
    };
    use std::path::Path;
    use std::sync::{mpsc, Arc};

    struct Unreachable;

    #[async_trait]
    impl PatternBackend for Unreachable {
        async fn templates(&self) -> Result<TemplateCatalog, RequestError> {
            Err(RequestError::Network("offline".into()))
        }

        async fn generate(&self, _: &PlannedRequest) -> Result<PatternResult, RequestError> {
            Err(RequestError::Network("offline".into()))
        }

        async fn export(&self, _: &ExportRequest) -> Result<ExportedInstructions, RequestError> {
            Err(RequestError::Network("offline".into()))
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        let backend: Arc<dyn PatternBackend> = Arc::new(Unreachable);
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            backend: &backend,
            export_dir: Path::new("."),
            tx: &tx,
        };
        handle_key_event(app, KeyEvent::new(code, modifiers), &ctx).unwrap();
    }

    fn app() -> App {
        let mut app = App::new(FoldingSession::default(), "local");
        app.apply_catalog(catalog());
        app
    }

    #[test]
    fn typing_fills_text_field_including_question_mark() {
        let mut app = app();
        for c in "hi?".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.session.text, "hi?");
        assert_eq!(app.overlay, Overlay::None);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.text, "hi");
    }

    #[test]
    fn question_mark_opens_help_outside_text_field() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Geometry(GeometryField::Pages));
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.overlay, Overlay::Help { .. }));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.overlay, Overlay::Help { scroll: 1 });
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn f2_switches_mode_and_enter_picks_template() {
        let mut app = app();
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.mode(), SelectionMode::Template);
        assert_eq!(app.focus, Focus::Gallery);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.selection().selected_template(), Some("heart"));
    }

    #[test]
    fn alert_closes_on_enter_and_swallows_other_keys() {
        let mut app = app();
        app.show_alert("Generation failed", "nope");
        press(&mut app, KeyCode::Char('x'));
        assert!(app.session.text.is_empty());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.toggle_help();
        press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn control_chords_are_not_typed() {
        let mut app = app();
        press_with(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(app.session.text.is_empty());
    }

    #[test]
    fn geometry_fields_cycle_with_arrows() {
        let mut app = app();
        app.focus = Focus::Geometry(GeometryField::Pages);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Geometry(GeometryField::Height));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Text);
    }
}
