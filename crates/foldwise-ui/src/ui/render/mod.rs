mod footer;
mod form;
mod gallery;
mod header;
mod overlays;
mod results;

use crate::ui::theme::Theme;
use crate::ui::{App, Focus, Overlay};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use footer::render_footer;
use form::render_form;
use gallery::render_gallery;
use header::render_header;
use overlays::{render_alert, render_help, render_toast};
use results::render_results;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .split(layout[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Form + gallery
            Constraint::Length(2),      // Gap
            Constraint::Percentage(60), // Result
        ])
        .split(padded[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(4)])
        .split(columns[0]);

    render_form(frame, left[0], app);
    render_gallery(frame, left[1], app);
    render_results(frame, columns[2], app);
    render_footer(frame, layout[2], app);

    match &app.overlay {
        Overlay::Alert { title, message } => render_alert(frame, title, message),
        Overlay::Help { scroll } => render_help(frame, *scroll),
        Overlay::None => {}
    }

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}

/// Bordered panel whose border brightens while it holds focus.
fn panel<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        Style::default().fg(Theme::ACCENT)
    } else {
        Style::default().fg(Theme::GREY_600)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title)
        .title_style(Style::default().fg(if focused { Theme::WHITE } else { Theme::GREY_300 }))
        .style(Style::default().bg(Theme::BG))
}

fn is_focused(app: &App, focus: Focus) -> bool {
    app.overlay == Overlay::None && app.focus == focus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{catalog, pattern};
    use foldwise_core::{FoldingSession, RequestError};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with_result(folds: usize) -> App {
        let mut app = App::new(FoldingSession::default(), "http://127.0.0.1:5000");
        app.apply_catalog(catalog());
        app.session.text = "hello".into();
        let submission = app.session.submit().unwrap();
        app.session.complete(submission.ticket, Ok(pattern(folds)));
        app
    }

    #[test]
    fn empty_session_renders_prompts() {
        let app = App::new(FoldingSession::default(), "http://127.0.0.1:5000");
        let screen = draw(&app, 120, 36);
        assert!(screen.contains("Type the word to fold"));
        assert!(screen.contains("Generate a pattern"));
        assert!(screen.contains("127.0.0.1:5000"));
    }

    #[test]
    fn result_renders_summary_and_instructions() {
        let app = app_with_result(5);
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("HELLO"));
        assert!(screen.contains("5 folds"));
        assert!(screen.contains("Page 2"));
        assert!(screen.contains("Page 10"));
    }

    #[test]
    fn preview_reports_hidden_folds() {
        let app = app_with_result(14);
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("+4 more"));
    }

    #[test]
    fn empty_fold_list_is_shown_as_such() {
        let app = app_with_result(0);
        let screen = draw(&app, 120, 36);
        assert!(screen.contains("No folds"));
    }

    #[test]
    fn gallery_lists_categories_and_selection() {
        let mut app = App::new(FoldingSession::default(), "local");
        app.apply_catalog(catalog());
        app.gallery_cursor = 2;
        app.select_under_cursor();
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("LOGOS"));
        assert!(screen.contains("SYMBOLS"));
        assert!(screen.contains("Heart"));
        assert!(screen.contains("♥"));
    }

    #[test]
    fn alert_and_help_overlays_render() {
        let mut app = App::new(FoldingSession::default(), "local");
        app.show_alert(
            "Generation failed",
            &RequestError::server(400, Some("Book must have at least 200 pages".into()))
                .to_string(),
        );
        let screen = draw(&app, 120, 36);
        assert!(screen.contains("Generation failed"));
        assert!(screen.contains("at least 200 pages"));

        app.close_overlay();
        app.toggle_help();
        let screen = draw(&app, 120, 36);
        assert!(screen.contains("Switch input mode"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = app_with_result(30);
        draw(&app, 20, 8);
        draw(&app, 1, 1);
    }
}
