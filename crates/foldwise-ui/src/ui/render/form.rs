use super::{is_focused, panel};
use crate::ui::helpers::{fit_width, pad_to_width};
use crate::ui::theme::Theme;
use crate::ui::{App, Focus};
use foldwise_core::catalog::icon_for;
use foldwise_core::{GeometryField, SelectionMode, TEXT_CHAR_HINT};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LABEL_WIDTH: usize = 17;

fn geometry_label(field: GeometryField) -> &'static str {
    match field {
        GeometryField::Pages => "Pages",
        GeometryField::Height => "Height (mm)",
        GeometryField::PageWidth => "Page width (mm)",
        GeometryField::Width => "Width (mm)",
    }
}

fn label(text: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Theme::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::GREY_400)
    };
    Span::styled(format!(" {}", pad_to_width(text, LABEL_WIDTH - 1)), style)
}

fn value(text: &str, focused: bool, max_width: usize) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        fit_width(text, max_width),
        Style::default().fg(Theme::GREY_100),
    )];
    if focused {
        spans.push(Span::styled(Theme::CURSOR, Style::default().fg(Theme::ACCENT)));
    }
    spans
}

fn input_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let session = &app.session;
    match app.mode() {
        SelectionMode::Text => {
            let focused = is_focused(app, Focus::Text);
            let mut first = vec![label("Text", focused)];
            first.extend(value(&session.text, focused, width));

            let preview = session.text_preview();
            let second = match preview.display {
                Some(display) => {
                    let count_style = if preview.over_hint {
                        Style::default().fg(Theme::YELLOW)
                    } else {
                        Style::default().fg(Theme::GREY_500)
                    };
                    vec![
                        label("Folds as", false),
                        Span::styled(
                            fit_width(&display, width.saturating_sub(10)),
                            Style::default().fg(Theme::WHITE).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}/{}", preview.char_count, TEXT_CHAR_HINT),
                            count_style,
                        ),
                    ]
                }
                None => vec![
                    label("", false),
                    Span::styled(
                        Theme::TEXT_PLACEHOLDER,
                        Style::default()
                            .fg(Theme::GREY_500)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ],
            };
            vec![Line::from(first), Line::from(second)]
        }
        SelectionMode::Template => {
            let selected = session
                .selection()
                .selected_template()
                .and_then(|id| session.catalog().get(id));
            let line = match selected {
                Some(template) => vec![
                    label("Template", false),
                    Span::styled(
                        format!("{} ", icon_for(&template.id)),
                        Style::default().fg(Theme::WHITE),
                    ),
                    Span::styled(
                        fit_width(&template.name, width.saturating_sub(3)),
                        Style::default().fg(Theme::WHITE).add_modifier(Modifier::BOLD),
                    ),
                ],
                None => vec![
                    label("Template", false),
                    Span::styled(
                        "pick one in the gallery",
                        Style::default()
                            .fg(Theme::GREY_500)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ],
            };
            let hint = selected
                .map(|t| t.description.clone())
                .unwrap_or_default();
            vec![
                Line::from(line),
                Line::from(vec![
                    label("", false),
                    Span::styled(fit_width(&hint, width), Style::default().fg(Theme::GREY_400)),
                ]),
            ]
        }
    }
}

pub(super) fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused = matches!(app.focus, Focus::Text | Focus::Geometry(_));
    let block = panel(" Pattern ", focused && app.overlay == crate::ui::Overlay::None);
    let inner_width = (area.width as usize).saturating_sub(2 + LABEL_WIDTH + 1);

    let mut lines = input_lines(app, inner_width);
    lines.push(Line::from(""));

    for field in GeometryField::ALL {
        let focused = is_focused(app, Focus::Geometry(field));
        let mut spans = vec![label(geometry_label(field), focused)];
        spans.extend(value(app.session.geometry.field(field), focused, inner_width));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter to generate",
        Style::default().fg(Theme::GREY_500),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
