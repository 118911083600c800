//! Foldwise Theme - paper and ink
//!
//! A quiet, high-contrast palette. Folded spans are the only warm color on
//! screen so the preview reads at a glance.

use ratatui::style::Color;

pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    //  CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Maximum emphasis
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// Primary text
    pub const GREY_100: Color = Color::Rgb(240, 240, 240);

    /// Secondary text, active elements
    pub const GREY_200: Color = Color::Rgb(220, 220, 220);

    /// Muted text
    pub const GREY_300: Color = Color::Rgb(190, 190, 190);

    /// Inactive tabs, hints
    pub const GREY_400: Color = Color::Rgb(155, 155, 155);

    /// Borders
    pub const GREY_500: Color = Color::Rgb(120, 120, 120);

    /// Dim borders
    pub const GREY_600: Color = Color::Rgb(70, 70, 70);

    /// Overlay backgrounds
    pub const GREY_700: Color = Color::Rgb(45, 45, 45);

    /// Panel background
    pub const GREY_800: Color = Color::Rgb(28, 28, 28);

    /// Deepest background
    pub const GREY_900: Color = Color::Rgb(16, 16, 16);

    pub const BG: Color = Self::GREY_900;

    // ─────────────────────────────────────────────────────────────────────
    // Accents
    // ─────────────────────────────────────────────────────────────────────

    pub const GREEN: Color = Color::Rgb(130, 220, 130);

    pub const RED: Color = Color::Rgb(230, 120, 120);

    pub const YELLOW: Color = Color::Rgb(255, 200, 100);

    /// Focus and selection
    pub const ACCENT: Color = Color::Rgb(140, 180, 255);

    /// Folded part of a page in the preview
    pub const FOLD: Color = Color::Rgb(232, 176, 120);

    /// Unfolded page edge in the preview
    pub const PAGE: Color = Self::GREY_600;

    // ═══════════════════════════════════════════════════════════════════════
    //  GLYPHS
    // ═══════════════════════════════════════════════════════════════════════

    pub const FOLD_CELL: &'static str = "█";
    pub const PAGE_CELL: &'static str = "│";
    pub const SELECTED_MARK: &'static str = "●";
    pub const UNSELECTED_MARK: &'static str = "○";
    pub const CURSOR: &'static str = "▏";

    // ═══════════════════════════════════════════════════════════════════════
    //  STRINGS
    // ═══════════════════════════════════════════════════════════════════════

    pub const LOGO: &'static str = "𝘧 𝘰 𝘭 𝘥 𝘸 𝘪 𝘴 𝘦";
    pub const TEXT_PLACEHOLDER: &'static str = "Type the word to fold";
}
