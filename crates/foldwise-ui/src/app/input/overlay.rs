use crate::ui::{App, Overlay};
use crossterm::event::{KeyCode, KeyEvent};

/// Keys while an overlay is open. Nothing reaches the form underneath.
pub(super) fn handle_overlay_input(app: &mut App, key: KeyEvent) {
    let close = match &mut app.overlay {
        Overlay::Alert { .. } => {
            matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q'))
        }
        Overlay::Help { scroll } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => true,
            KeyCode::Down | KeyCode::Char('j') => {
                *scroll += 1;
                false
            }
            KeyCode::Up | KeyCode::Char('k') => {
                *scroll = scroll.saturating_sub(1);
                false
            }
            _ => false,
        },
        Overlay::None => false,
    };
    if close {
        app.close_overlay();
    }
}
