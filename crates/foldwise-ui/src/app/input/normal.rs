use crate::app::background;
use crate::app::RuntimeContext;
use crate::ui::{App, Focus, INSTRUCTION_PAGE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn handle_control_chord(app: &mut App, code: KeyCode, ctx: &RuntimeContext) {
    match code {
        KeyCode::Char('t') => app.switch_mode(),
        KeyCode::Char('e') => background::start_export(app, ctx),
        KeyCode::Char('n') => app.reset_pattern(),
        KeyCode::Char('r') => {
            app.show_toast("Reloading templates");
            background::start_template_load(app, ctx);
        }
        _ => {}
    }
}

fn handle_enter(app: &mut App, ctx: &RuntimeContext) {
    if app.focus == Focus::Gallery {
        if !app.select_under_cursor() {
            app.show_toast("No templates to pick from");
        }
        return;
    }
    background::start_generation(app, ctx);
}

fn handle_vertical(app: &mut App, down: bool) {
    match (app.focus, down) {
        (Focus::Gallery, true) => app.gallery_down(),
        (Focus::Gallery, false) => app.gallery_up(),
        (Focus::Instructions, true) => app.instructions_down(1),
        (Focus::Instructions, false) => app.instructions_up(1),
        (_, true) => app.focus_next(),
        (_, false) => app.focus_prev(),
    }
}

pub(super) fn handle_normal_mode(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_control_chord(app, key.code, ctx);
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::F(2) => app.switch_mode(),
        KeyCode::Enter => handle_enter(app, ctx),
        KeyCode::Esc => {
            app.cancel_generation();
        }
        KeyCode::Down => handle_vertical(app, true),
        KeyCode::Up => handle_vertical(app, false),
        KeyCode::Right if app.focus == Focus::Gallery => app.gallery_next_category(),
        KeyCode::Left if app.focus == Focus::Gallery => app.gallery_prev_category(),
        KeyCode::PageDown => app.instructions_down(INSTRUCTION_PAGE),
        KeyCode::PageUp => app.instructions_up(INSTRUCTION_PAGE),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char('?') if app.focus != Focus::Text => app.toggle_help(),
        KeyCode::Char(' ') if app.focus == Focus::Gallery => {
            app.select_under_cursor();
        }
        KeyCode::Char(c) if app.focus.is_editable() => app.type_char(c),
        _ => {}
    }
}
