// Pull request conversation rendering.
// Title line plus the description box in viewer or editor form.

use ratatui::{prelude::*, widgets::*};

use crate::api::PullRequest;
use crate::app::PullRequestPage;
use crate::state::{DescriptionEditor, EditorMode, EditorPane};

/// Draw the pull request title line.
pub fn draw_title(frame: &mut Frame, pr: Option<&PullRequest>, number: u64, area: Rect) {
    let line = match pr {
        Some(pr) => Line::from(vec![
            Span::styled(
                format!("#{} ", pr.number),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                pr.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", pr.state.label()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("  {} → {}", pr.source_branch, pr.target_branch),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        None => Line::from(Span::styled(
            format!("#{}", number),
            Style::default().fg(Color::DarkGray),
        )),
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" repodesk ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the conversation area: the description box.
pub fn draw_conversation(frame: &mut Frame, page: &PullRequestPage, area: Rect) {
    let Some(editor) = page.editor.as_ref() else {
        super::draw_loading_state(frame, &page.pull_request, "Description", area);
        return;
    };

    match editor.mode() {
        EditorMode::View => draw_viewer(frame, editor, area),
        EditorMode::Edit | EditorMode::Saving => draw_editor(frame, editor, area),
    }
}

/// Text through the viewer. Markdown is shown as written.
fn rendered_text(text: &str) -> Text<'_> {
    if text.trim().is_empty() {
        Text::from(Span::styled(
            "No description provided.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Text::from(text)
    }
}

fn draw_viewer(frame: &mut Frame, editor: &DescriptionEditor, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Description ")
        .title(Line::from(Span::styled(" ⋯ o ", Style::default().fg(Color::Cyan))).right_aligned());

    let paragraph = Paragraph::new(rendered_text(editor.view_text()))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_editor(frame: &mut Frame, editor: &DescriptionEditor, area: Rect) {
    let saving = editor.is_saving();
    let pane_style = |pane: EditorPane| {
        if editor.pane() == pane {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut title = vec![
        Span::raw(" "),
        Span::styled("Write", pane_style(EditorPane::Write)),
        Span::raw(" │ "),
        Span::styled("Preview", pane_style(EditorPane::Preview)),
        Span::raw(" "),
    ];
    if saving {
        title.push(Span::styled(
            "⏳ Saving... ",
            Style::default().fg(Color::Yellow),
        ));
    } else if editor.is_dirty() {
        title.push(Span::styled("● ", Style::default().fg(Color::Yellow)));
    }

    let border = if saving { Color::DarkGray } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Line::from(title))
        .title_bottom(Line::from(" ^S Save  Esc Cancel ").right_aligned());

    let draft = editor.draft().current_text.as_str();
    let text = match editor.pane() {
        EditorPane::Preview => rendered_text(draft),
        EditorPane::Write => {
            let mut text = if draft.is_empty() {
                Text::from(Span::styled(
                    "Enter description here",
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Text::from(draft)
            };
            if !saving {
                // Cursor sits at the end of the draft
                if draft.ends_with('\n') || draft.is_empty() {
                    text.push_line(Line::from(Span::styled(
                        "█",
                        Style::default().fg(Color::Yellow),
                    )));
                } else {
                    text.push_span(Span::styled("█", Style::default().fg(Color::Yellow)));
                }
            }
            text
        }
    };

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
