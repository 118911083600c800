use crate::ui::helpers::{centered_rect, fit_width, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::{Toast, ToastKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_chip(key: &str) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(Theme::GREY_900).bg(Theme::GREY_300),
    )
}

pub(super) fn render_alert(frame: &mut Frame, title: &str, message: &str) {
    let viewport = frame.area();
    let width = viewport.width.saturating_sub(6).clamp(1, 72);
    let text_width = width.saturating_sub(6).max(16) as usize;
    let wrapped = wrap_text(message, text_width);

    // blank + title + blank + message + blank + footer, plus borders
    let height = (wrapped.len() as u16 + 7).min(viewport.height);

    let area = Rect::new(
        viewport.x + viewport.width.saturating_sub(width) / 2,
        viewport.y + viewport.height.saturating_sub(height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in wrapped {
        lines.push(Line::from(Span::styled(
            format!("  {}", line),
            Style::default().fg(Theme::GREY_200),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        key_chip("Enter"),
        Span::styled(" or ", Style::default().fg(Theme::GREY_500)),
        key_chip("Esc"),
        Span::styled(" to close", Style::default().fg(Theme::GREY_500)),
    ]));

    let block = Block::default()
        .title(" Message ")
        .title_style(Style::default().fg(Theme::GREY_100))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::RED))
        .style(Style::default().bg(Theme::GREY_800));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub(super) fn render_help(frame: &mut Frame, scroll: usize) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    fn group_header(title: &str) -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("    ╭─ ", Style::default().fg(Theme::GREY_600)),
                Span::styled(
                    title.to_string(),
                    Style::default()
                        .fg(Theme::WHITE)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ───────────────────────╮", Style::default().fg(Theme::GREY_600)),
            ]),
        ]
    }

    fn binding(key: &str, action: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled("    │  ", Style::default().fg(Theme::GREY_600)),
            key_chip(key),
            Span::styled(format!("  {}", action), Style::default().fg(Theme::GREY_200)),
        ])
    }

    fn group_footer() -> Line<'static> {
        Line::from(Span::styled(
            "    ╰─────────────────────────────────────╯",
            Style::default().fg(Theme::GREY_600),
        ))
    }

    let mut rows: Vec<Line<'static>> = vec![Line::from("")];

    rows.extend(group_header("Pattern"));
    rows.push(binding("F2", "Switch input mode"));
    rows.push(binding("↵", "Generate pattern"));
    rows.push(binding("Esc", "Cancel generation"));
    rows.push(binding("^N", "Start a new pattern"));
    rows.push(binding("^E", "Export instructions"));
    rows.push(group_footer());

    rows.extend(group_header("Navigation"));
    rows.push(binding("Tab", "Next field"));
    rows.push(binding("⇧Tab", "Previous field"));
    rows.push(binding("↑↓", "Move in gallery or instructions"));
    rows.push(binding("←→", "Jump between categories"));
    rows.push(binding("↵", "Pick template under cursor"));
    rows.push(binding("PgUp/PgDn", "Page through instructions"));
    rows.push(group_footer());

    rows.extend(group_header("App"));
    rows.push(binding("^R", "Reload templates"));
    rows.push(binding("?", "Show help"));
    rows.push(binding("^C", "Quit"));
    rows.push(group_footer());

    let max_lines = (area.height as usize).saturating_sub(2);
    let start = scroll.min(rows.len().saturating_sub(1));
    let visible: Vec<Line> = rows.into_iter().skip(start).take(max_lines).collect();

    let block = Paragraph::new(visible).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Theme::GREY_100))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::GREY_400))
            .style(Style::default().bg(Theme::GREY_900)),
    );

    frame.render_widget(block, area);
}

pub(super) fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();

    let (prefix, bg, text_style) = match toast.kind {
        ToastKind::Success => (
            "  + ",
            Theme::GREEN,
            Style::default()
                .fg(Theme::GREY_900)
                .add_modifier(Modifier::BOLD),
        ),
        ToastKind::Error => ("  x ", Theme::RED, Style::default().fg(Theme::WHITE)),
        ToastKind::Info => (
            "  › ",
            Theme::GREY_700,
            Style::default()
                .fg(Theme::GREY_100)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let max_message = (area.width as usize).saturating_sub(8);
    let message = fit_width(&toast.message, max_message);
    let width = (4 + unicode_width::UnicodeWidthStr::width(message.as_str()) + 2) as u16;
    let toast_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(5),
        width: width.min(area.width),
        height: 1.min(area.height),
    };

    frame.render_widget(Clear, toast_area);
    let content = Paragraph::new(Line::from(vec![
        Span::styled(prefix, Style::default().fg(Theme::WHITE)),
        Span::styled(message, text_style),
        Span::raw("  "),
    ]))
    .style(Style::default().bg(bg));
    frame.render_widget(content, toast_area);
}
