use super::{is_focused, panel};
use crate::ui::helpers::fit_width;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus};
use chrono::Local;
use foldwise_core::model::format_mm;
use foldwise_core::{PatternSummary, PreviewStack};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Terminal rows standing in for the book height.
const PREVIEW_ROWS: usize = 8;

/// Grid of `rows` × pages; `true` where the page is folded.
///
/// Row `r` covers `[r, r + 1) / rows` of the reference height and counts as
/// folded when its midpoint lies inside the folded span.
pub(crate) fn preview_rows(stack: &PreviewStack<'_>, rows: usize) -> Vec<Vec<bool>> {
    let entries: Vec<_> = stack.iter().collect();
    (0..rows)
        .map(|r| {
            let mid = (r as f64 + 0.5) * 100.0 / rows as f64;
            entries
                .iter()
                .map(|e| mid >= e.offset_percent && mid < e.offset_percent + e.depth_percent)
                .collect()
        })
        .collect()
}

fn summary_line(summary: &PatternSummary, width: usize) -> Line<'static> {
    let mut text = format!(
        "{} folds · {} pages · ~{:.0} min",
        summary.total_folds, summary.pages_used, summary.estimated_time_minutes
    );
    if let Some(subject) = &summary.subject {
        text.push_str(" · ");
        text.push_str(subject);
    }
    Line::from(Span::styled(
        format!(" {}", fit_width(&text, width.saturating_sub(1))),
        Style::default().fg(Theme::WHITE).add_modifier(Modifier::BOLD),
    ))
}

fn preview_lines(stack: &PreviewStack<'_>) -> Vec<Line<'static>> {
    if stack.is_empty() {
        return vec![Line::from(Span::styled(
            " No folds in this pattern",
            Style::default().fg(Theme::GREY_400),
        ))];
    }

    let mut lines: Vec<Line> = preview_rows(stack, PREVIEW_ROWS)
        .into_iter()
        .map(|row| {
            let mut spans = vec![Span::raw(" ")];
            for folded in row {
                if folded {
                    spans.push(Span::styled(Theme::FOLD_CELL, Style::default().fg(Theme::FOLD)));
                } else {
                    spans.push(Span::styled(Theme::PAGE_CELL, Style::default().fg(Theme::PAGE)));
                }
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    let hidden = stack.hidden_count();
    let legend = if hidden > 0 {
        format!(" first {} pages, +{} more", stack.len(), hidden)
    } else {
        format!(" {} pages", stack.len())
    };
    lines.push(Line::from(Span::styled(legend, Style::default().fg(Theme::GREY_500))));
    lines
}

fn render_instructions(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel(" Instructions ", is_focused(app, Focus::Instructions));
    let list = app.session.instruction_list();
    let rows = area.height.saturating_sub(2) as usize;
    let width = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = if list.is_empty() {
        Vec::new()
    } else {
        list.window(app.instruction_scroll, rows)
            .map(|step| {
                let f = step.fold;
                let text = format!(
                    "Step {:<4} Page {:<5} from {} mm  to {} mm  depth {} mm",
                    step.step_number,
                    f.page,
                    format_mm(f.start_mm),
                    format_mm(f.end_mm),
                    format_mm(f.depth_mm)
                );
                Line::from(Span::styled(
                    format!(" {}", fit_width(&text, width.saturating_sub(1))),
                    Style::default().fg(Theme::GREY_200),
                ))
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub(super) fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let stack = app.session.preview_stack();

    if stack.is_absent() {
        let block = panel(" Result ", false);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Generate a pattern to see the preview",
                Style::default().fg(Theme::GREY_400),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let preview_height = if stack.is_empty() { 6 } else { PREVIEW_ROWS as u16 + 6 };
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(preview_height), Constraint::Min(3)])
        .split(area);

    let width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    if let Some(summary) = app.session.summary() {
        lines.push(summary_line(&summary, width));
    }
    if let Some(at) = app.session.view_model().ingested_at() {
        lines.push(Line::from(Span::styled(
            format!(" generated {}", at.with_timezone(&Local).format("%H:%M:%S")),
            Style::default().fg(Theme::GREY_500),
        )));
    }
    lines.push(Line::from(""));
    lines.extend(preview_lines(&stack));

    frame.render_widget(Paragraph::new(lines).block(panel(" Result ", false)), split[0]);
    render_instructions(frame, split[1], app);
}
