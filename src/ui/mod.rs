// UI module for rendering the TUI.
// Contains widgets for tabs, breadcrumbs, the registry sub-views, and the description box.

mod breadcrumb;
mod description;
mod details;
mod modal;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Modal, Page};
use crate::state::{EditorMode, LoadingState};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar / title
            Constraint::Length(2), // Breadcrumb
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let edited_at = match &app.page {
        Page::Registry(page) => {
            tabs::draw_tabs(frame, &app.chrome.location.title(), page.tab, chunks[0]);
            None
        }
        Page::PullRequest(page) => {
            description::draw_title(frame, page.pull_request.data(), page.number, chunks[0]);
            page.pull_request.data().and_then(|pr| pr.edited_at())
        }
    };

    breadcrumb::draw_breadcrumb(frame, &app.chrome.breadcrumbs(), chunks[1], edited_at);

    match &app.page {
        Page::Registry(page) => details::draw_registry_page(frame, page, chunks[2]),
        Page::PullRequest(page) => description::draw_conversation(frame, page, chunks[2]),
    }

    draw_status_bar(frame, app, chunks[3]);

    modal::draw_toasts(frame, &app.chrome.toasts);

    // Overlays are rendered last, on top of everything
    match app.modal {
        Some(Modal::OptionsMenu) => modal::draw_options_menu(frame),
        Some(Modal::ConfirmLeave) => modal::draw_confirm_leave(frame),
        Some(Modal::Help) => modal::draw_help_overlay(frame),
        None => {}
    }
}

/// Centered placeholder block used while an entity is loading or failed.
pub(crate) fn draw_loading_state<T>(
    frame: &mut Frame,
    state: &LoadingState<T>,
    title: &str,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));
    let (text, color) = match state {
        LoadingState::Idle | LoadingState::Loading => ("⏳ Loading...".to_string(), Color::Yellow),
        LoadingState::Error(e) => (format!("❌ {}", e), Color::Red),
        LoadingState::Loaded(_) => return,
    };
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::raw(key),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

/// Draw the key hints for the current mode.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<[Span<'static>; 2]> = match (&app.page, app.editor_mode()) {
        (Page::PullRequest(_), EditorMode::Edit) => vec![
            hint(" ^S ", "Save"),
            hint("  Esc ", "Cancel"),
            hint("  Tab ", "Write/Preview"),
            hint("  ↵ ", "Newline"),
            hint("  ^X ", "Dismiss"),
        ],
        (Page::PullRequest(_), EditorMode::Saving) => vec![hint(" ⏳ ", "Saving...")],
        (Page::PullRequest(_), EditorMode::View) => vec![
            hint(" e ", "Edit"),
            hint("  o ", "Options"),
            hint("  r ", "Refresh"),
            hint("  x ", "Dismiss"),
            hint("  ? ", "Help"),
            hint("  q ", "Quit"),
        ],
        (Page::Registry(_), _) => vec![
            hint(" Tab ", "Switch"),
            hint("  r ", "Refresh"),
            hint("  x ", "Dismiss"),
            hint("  ? ", "Help"),
            hint("  q ", "Quit"),
        ],
    };

    let mut spans: Vec<Span> = hints.into_iter().flatten().collect();
    if app.chrome.guard.is_armed() {
        spans.push(Span::styled(
            "  ● unsaved changes",
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}
