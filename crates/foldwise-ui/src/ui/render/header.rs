use crate::ui::helpers::fit_width;
use crate::ui::theme::Theme;
use crate::ui::App;
use foldwise_core::SelectionMode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

fn tab(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(Theme::GREY_900)
                .bg(Theme::GREY_200)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(Theme::GREY_400))
    }
}

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mode = app.mode();
    let mut spans = vec![
        Span::styled(
            format!("   {}", Theme::LOGO),
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("     "),
        tab(SelectionMode::Text.label(), mode == SelectionMode::Text),
        Span::raw(" "),
        tab(SelectionMode::Template.label(), mode == SelectionMode::Template),
    ];

    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let room = (area.width as usize).saturating_sub(used + 3);
    if room > 8 {
        let server = fit_width(&app.server_label, room.saturating_sub(2));
        let pad = room.saturating_sub(server.width());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(server, Style::default().fg(Theme::GREY_500)));
    }

    let lines = vec![Line::from(""), Line::from(spans)];
    let header = Paragraph::new(lines).style(Style::default().bg(Theme::BG));
    frame.render_widget(header, area);
}
