//! UI type definitions for Foldwise
//!
//! Enums and small structs for screen state that is not part of the
//! folding session itself.

use foldwise_core::{GeometryField, SelectionMode};
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════
//  FOCUS
// ═══════════════════════════════════════════════════════════════════════════

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    Geometry(GeometryField),
    Gallery,
    Instructions,
}

impl Focus {
    /// Tab order for a mode. The text field only exists in Text mode.
    pub fn order(mode: SelectionMode) -> Vec<Focus> {
        let mut order = Vec::with_capacity(7);
        if mode == SelectionMode::Text {
            order.push(Focus::Text);
        }
        order.extend(GeometryField::ALL.iter().map(|f| Focus::Geometry(*f)));
        order.push(Focus::Gallery);
        order.push(Focus::Instructions);
        order
    }

    pub fn next(self, mode: SelectionMode) -> Focus {
        let order = Self::order(mode);
        match order.iter().position(|f| *f == self) {
            Some(idx) => order[(idx + 1) % order.len()],
            None => order[0],
        }
    }

    pub fn prev(self, mode: SelectionMode) -> Focus {
        let order = Self::order(mode);
        match order.iter().position(|f| *f == self) {
            Some(idx) => order[(idx + order.len() - 1) % order.len()],
            None => order[0],
        }
    }

    /// Fields that take typed characters.
    pub fn is_editable(&self) -> bool {
        matches!(self, Focus::Text | Focus::Geometry(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOADING AND ANIMATION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    None,
    LoadingTemplates,
    Generating,
    Exporting,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        !matches!(self, LoadingState::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadingState::None => "",
            LoadingState::LoadingTemplates => "Loading templates",
            LoadingState::Generating => "Generating pattern",
            LoadingState::Exporting => "Exporting instructions",
        }
    }
}

/// Spinner animation frames (braille pattern)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ═══════════════════════════════════════════════════════════════════════════
//  OVERLAYS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    /// Blocking message panel for failed actions
    Alert { title: String, message: String },
    Help { scroll: usize },
}

// ═══════════════════════════════════════════════════════════════════════════
//  TOASTS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 4,
            ToastKind::Error => 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str, kind: ToastKind) -> Self {
        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ToastKind::Error)
    }
}
