//! Foldwise UI module.
//!
//! `App` wraps one [`FoldingSession`] with the screen-only state around it
//! (focus, cursor positions, toasts, overlays). Rendering lives in
//! `render/` and only ever reads the app.

pub mod helpers;
pub mod theme;
pub mod types;

mod render;

pub use render::render;
pub use types::{Focus, LoadingState, Overlay, Toast, ToastKind, SPINNER_FRAMES};

use foldwise_core::{FoldingSession, GeometryField, SelectionMode, TemplateCatalog};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Longest value accepted in a geometry field.
const MAX_GEOMETRY_CHARS: usize = 10;

/// Rows moved by PageUp/PageDown in the instruction list.
pub(crate) const INSTRUCTION_PAGE: usize = 10;

// ═══════════════════════════════════════════════════════════════════════════
//  APP STATE
// ═══════════════════════════════════════════════════════════════════════════

pub struct App {
    pub session: FoldingSession,
    pub focus: Focus,
    /// Index into the catalog in display order.
    pub gallery_cursor: usize,
    pub instruction_scroll: usize,
    pub loading: LoadingState,
    pub loading_frame: usize,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// Why the last template fetch failed, shown in the gallery.
    pub catalog_error: Option<String>,
    pub last_export: Option<PathBuf>,
    /// Shown in the header.
    pub server_label: String,
    generation_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(session: FoldingSession, server_label: impl Into<String>) -> Self {
        Self {
            session,
            focus: Focus::Text,
            gallery_cursor: 0,
            instruction_scroll: 0,
            loading: LoadingState::None,
            loading_frame: 0,
            overlay: Overlay::None,
            toast: None,
            should_quit: false,
            needs_redraw: true,
            catalog_error: None,
            last_export: None,
            server_label: server_label.into(),
            generation_task: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.session.mode()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus and mode
    // ─────────────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.mode());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.mode());
    }

    /// Flip between Text and Template input. Leaving Text mode while the
    /// text field is focused moves focus to the gallery.
    pub fn switch_mode(&mut self) {
        let next = self.mode().toggle();
        self.session.switch_tab(next);
        match (next, self.focus) {
            (SelectionMode::Template, Focus::Text) => self.focus = Focus::Gallery,
            (SelectionMode::Text, Focus::Gallery) => self.focus = Focus::Text,
            _ => {}
        }
        self.show_toast(&format!("Input: {}", next.label()));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────

    pub fn type_char(&mut self, c: char) {
        match self.focus {
            Focus::Text => self.session.text.push(c),
            Focus::Geometry(field) => {
                let value = self.session.geometry.field_mut(field);
                if (c.is_ascii_digit() || c == '.') && value.chars().count() < MAX_GEOMETRY_CHARS {
                    value.push(c);
                }
            }
            Focus::Gallery | Focus::Instructions => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::Text => {
                self.session.text.pop();
            }
            Focus::Geometry(field) => {
                self.session.geometry.field_mut(field).pop();
            }
            Focus::Gallery | Focus::Instructions => {}
        }
    }

    pub fn focused_geometry(&self) -> Option<GeometryField> {
        match self.focus {
            Focus::Geometry(field) => Some(field),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Gallery
    // ─────────────────────────────────────────────────────────────────────

    pub fn gallery_up(&mut self) {
        self.gallery_cursor = self.gallery_cursor.saturating_sub(1);
    }

    pub fn gallery_down(&mut self) {
        let len = self.session.catalog().len();
        if self.gallery_cursor + 1 < len {
            self.gallery_cursor += 1;
        }
    }

    /// Jump to the first template of the next category.
    pub fn gallery_next_category(&mut self) {
        let starts = self.category_starts();
        if let Some(start) = starts.into_iter().find(|s| *s > self.gallery_cursor) {
            self.gallery_cursor = start;
        }
    }

    /// Jump to the start of the current category, or the previous one when
    /// already there.
    pub fn gallery_prev_category(&mut self) {
        let starts = self.category_starts();
        if let Some(start) = starts.into_iter().rev().find(|s| *s < self.gallery_cursor) {
            self.gallery_cursor = start;
        }
    }

    fn category_starts(&self) -> Vec<usize> {
        let catalog = self.session.catalog();
        let mut starts = Vec::new();
        let mut offset = 0;
        for category in catalog.categories() {
            starts.push(offset);
            offset += catalog.templates(category).len();
        }
        starts
    }

    pub fn gallery_cursor_id(&self) -> Option<&str> {
        self.session
            .catalog()
            .iter()
            .nth(self.gallery_cursor)
            .map(|t| t.id.as_str())
    }

    /// Select the template under the cursor (switches to Template mode).
    pub fn select_under_cursor(&mut self) -> bool {
        let Some(id) = self.gallery_cursor_id().map(str::to_string) else {
            return false;
        };
        self.session.select_gallery_template(&id);
        let name = self
            .session
            .catalog()
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or(id);
        self.show_toast(&format!("Template: {}", name));
        true
    }

    /// Install a reloaded catalog, keeping the cursor on the same template
    /// when it survived.
    pub fn apply_catalog(&mut self, catalog: TemplateCatalog) -> bool {
        let cursor_id = self.gallery_cursor_id().map(str::to_string);
        let dropped = self.session.set_catalog(catalog);
        let catalog = self.session.catalog();
        self.gallery_cursor = cursor_id
            .and_then(|id| catalog.position(&id))
            .unwrap_or(0)
            .min(catalog.len().saturating_sub(1));
        self.catalog_error = None;
        dropped
    }

    // ─────────────────────────────────────────────────────────────────────
    // Instruction list
    // ─────────────────────────────────────────────────────────────────────

    fn max_instruction_scroll(&self) -> usize {
        self.session.instruction_list().len().saturating_sub(1)
    }

    pub fn instructions_down(&mut self, rows: usize) {
        self.instruction_scroll = (self.instruction_scroll + rows).min(self.max_instruction_scroll());
    }

    pub fn instructions_up(&mut self, rows: usize) {
        self.instruction_scroll = self.instruction_scroll.saturating_sub(rows);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Generation task
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) fn track_generation(&mut self, handle: JoinHandle<()>) {
        self.abort_generation_task();
        self.generation_task = Some(handle);
    }

    pub(crate) fn abort_generation_task(&mut self) {
        if let Some(handle) = self.generation_task.take() {
            handle.abort();
        }
    }

    pub(crate) fn generation_settled(&mut self) {
        self.generation_task = None;
        if self.loading == LoadingState::Generating {
            self.loading = LoadingState::None;
        }
    }

    /// Esc while generating. Returns `false` when nothing was in flight.
    pub fn cancel_generation(&mut self) -> bool {
        match self.session.cancel() {
            Some(_) => {
                self.abort_generation_task();
                self.generation_settled();
                self.show_toast("Generation cancelled");
                true
            }
            None => false,
        }
    }

    /// "New pattern": clear text, selection and result.
    pub fn reset_pattern(&mut self) {
        if self.session.reset_form().is_some() {
            self.abort_generation_task();
        }
        self.generation_settled();
        self.focus = Focus::Text;
        self.instruction_scroll = 0;
        self.show_toast("New pattern");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Toasts, overlays, animation
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, ToastKind::Info));
    }

    pub fn show_success(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, ToastKind::Success));
    }

    pub fn show_error(&mut self, message: &str) {
        self.toast = Some(Toast::new(message, ToastKind::Error));
    }

    pub fn clear_expired_toast(&mut self) -> bool {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn show_alert(&mut self, title: &str, message: &str) {
        self.overlay = Overlay::Alert {
            title: title.to_string(),
            message: message.to_string(),
        };
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help { .. } => Overlay::None,
            _ => Overlay::Help { scroll: 0 },
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Tick the loading animation
    pub fn tick_loading(&mut self) {
        if self.loading.is_loading() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.loading_frame % SPINNER_FRAMES.len()]
    }
}
