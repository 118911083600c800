use super::{is_focused, panel};
use crate::ui::helpers::fit_width;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus, LoadingState};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn message(text: &str, color: ratatui::style::Color) -> Line<'static> {
    Line::from(Span::styled(format!(" {}", text), Style::default().fg(color)))
}

pub(super) fn render_gallery(frame: &mut Frame, area: Rect, app: &App) {
    let focused = is_focused(app, Focus::Gallery);
    let block = panel(" Templates ", focused);
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let catalog = app.session.catalog();

    if catalog.is_empty() {
        let line = if let Some(err) = &app.catalog_error {
            message(&fit_width(err, inner_width.saturating_sub(1)), Theme::RED)
        } else if app.loading == LoadingState::LoadingTemplates {
            message("Loading…", Theme::GREY_400)
        } else {
            message("No templates available", Theme::GREY_500)
        };
        frame.render_widget(Paragraph::new(vec![line]).block(block), area);
        return;
    }

    let selection = app.session.selection();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;
    let mut index = 0;

    for (n, category) in catalog.categories().enumerate() {
        if n > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", category.to_uppercase()),
            Style::default()
                .fg(Theme::GREY_300)
                .add_modifier(Modifier::BOLD),
        )));

        for entry in catalog.entries(category, selection) {
            let under_cursor = focused && index == app.gallery_cursor;
            if index == app.gallery_cursor {
                cursor_line = lines.len();
            }
            let mark = if entry.selected {
                Theme::SELECTED_MARK
            } else {
                Theme::UNSELECTED_MARK
            };
            let mut name_style = if entry.selected {
                Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::GREY_100)
            };
            if under_cursor {
                name_style = name_style.bg(Theme::GREY_700);
            }
            lines.push(Line::from(vec![
                Span::styled(format!("   {} ", mark), Style::default().fg(Theme::GREY_400)),
                Span::styled(format!("{} ", entry.icon), Style::default().fg(Theme::WHITE)),
                Span::styled(fit_width(entry.name, inner_width.saturating_sub(8)), name_style),
            ]));
            index += 1;
        }
    }

    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1));
    let visible: Vec<Line> = lines.into_iter().skip(scroll).take(inner_height).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}
