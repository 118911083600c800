use crate::ui::helpers::fit_width;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus};
use foldwise_core::FlowState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A footer hint: highlighted key followed by its label.
struct KeyHint {
    key: &'static str,
    label: &'static str,
    key_bg: Color,
}

impl KeyHint {
    fn primary(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            key_bg: Theme::GREEN,
        }
    }

    fn hint(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            key_bg: Theme::GREY_500,
        }
    }

    fn width(&self) -> usize {
        // " key " + " label  "
        self.key.width() + 2 + self.label.width() + 3
    }

    fn to_spans(&self) -> Vec<Span<'static>> {
        vec![
            Span::styled(
                format!(" {} ", self.key),
                Style::default().fg(Theme::GREY_900).bg(self.key_bg),
            ),
            Span::styled(
                format!(" {}  ", self.label),
                Style::default().fg(Theme::GREY_400),
            ),
        ]
    }
}

/// Hints by priority; the footer drops from the end when space runs out.
fn hints(app: &App) -> Vec<KeyHint> {
    let mut hints = Vec::with_capacity(6);
    if app.session.flow().is_requesting() {
        hints.push(KeyHint::primary("Esc", "cancel"));
    } else if app.focus == Focus::Gallery {
        hints.push(KeyHint::primary("↵", "pick"));
    } else {
        hints.push(KeyHint::primary("↵", "generate"));
    }
    hints.push(KeyHint::hint("F2", "mode"));
    if app.session.view_model().has_result() {
        hints.push(KeyHint::hint("^E", "export"));
    }
    hints.push(KeyHint::hint("^N", "new"));
    hints.push(KeyHint::hint("?", "help"));
    hints.push(KeyHint::hint("^C", "quit"));
    hints
}

fn status(app: &App) -> (String, Color) {
    if app.loading.is_loading() {
        return (
            format!("{} {}…", app.spinner(), app.loading.label()),
            Theme::GREY_200,
        );
    }
    match app.session.flow().state() {
        FlowState::Failed => ("Last request failed".to_string(), Theme::RED),
        _ => match &app.last_export {
            Some(path) => (format!("Saved {}", path.display()), Theme::GREEN),
            None => (app.mode().label().to_string() + " mode", Theme::GREY_500),
        },
    }
}

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let available = area.width as usize;

    let mut right: Vec<Span> = Vec::new();
    let mut right_width = 0;
    // Keep at least a short status visible on the left.
    let budget = available.saturating_sub(18);
    for hint in hints(app) {
        if right_width + hint.width() > budget {
            break;
        }
        right_width += hint.width();
        right.extend(hint.to_spans());
    }

    let (text, color) = status(app);
    let left = fit_width(&text, available.saturating_sub(right_width + 4));
    let pad = available.saturating_sub(2 + left.width() + right_width);

    let mut spans = vec![
        Span::raw("  "),
        Span::styled(left, Style::default().fg(color)),
        Span::raw(" ".repeat(pad)),
    ];
    spans.extend(right);

    let footer = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(Theme::GREY_900));
    frame.render_widget(footer, area);
}
