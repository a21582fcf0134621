// Modal UI components.
// Options menu, leave confirmation, help overlay, and toast notifications.

use ratatui::{prelude::*, widgets::*};

use crate::state::{ToastLevel, Toasts};

/// Rect of the given size centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw the description options menu. Its only entry starts editing.
pub fn draw_options_menu(frame: &mut Frame) {
    let modal_area = centered(frame.area(), 30, 5);
    frame.render_widget(Clear, modal_area);

    let items = vec![ListItem::new(Line::from(vec![
        Span::styled("✎ ", Style::default().fg(Color::Cyan)),
        Span::raw("Edit"),
    ]))];
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Options ")
                .title_bottom(Line::from(" ↵ select  Esc close ").right_aligned()),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default().with_selected(Some(0));
    frame.render_stateful_widget(list, modal_area, &mut state);
}

/// Draw the unsaved changes confirmation.
pub fn draw_confirm_leave(frame: &mut Frame) {
    let modal_area = centered(frame.area(), 50, 6);
    frame.render_widget(Clear, modal_area);

    let text = vec![
        Line::from("You have unsaved changes."),
        Line::from("Leave anyway and discard them?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::styled(" leave   ", Style::default().fg(Color::DarkGray)),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::styled(" stay", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Unsaved changes "),
    );
    frame.render_widget(paragraph, modal_area);
}

/// Draw the help overlay.
pub fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered(frame.area(), 52, 18);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(label),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("Tab/Shift+Tab", "Switch registry tabs"),
        key("e", "Edit description"),
        key("o", "Description options"),
        key("Ctrl+S", "Save description"),
        key("Esc", "Cancel editing"),
        key("Tab (editing)", "Toggle Write/Preview"),
        key("r", "Refresh current page"),
        key("x / Ctrl+X", "Dismiss notification"),
        key("?", "Show this help"),
        key("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );
    frame.render_widget(help_paragraph, popup_area);
}

/// Draw visible toasts stacked in the bottom-right corner, newest lowest.
pub fn draw_toasts(frame: &mut Frame, toasts: &Toasts) {
    let area = frame.area();
    let width = 44u16.min(area.width);
    let height = 4;
    let mut bottom = area.height.saturating_sub(1);

    for toast in toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        if bottom < height {
            break;
        }
        let toast_area = Rect::new(area.width.saturating_sub(width), bottom - height, width, height);
        bottom -= height;

        let (color, icon) = match toast.level {
            ToastLevel::Info => (Color::Green, "✓"),
            ToastLevel::Error => (Color::Red, "✗"),
        };
        let title = match &toast.title {
            Some(title) => format!(" {} {} ", icon, title),
            None => format!(" {} ", icon),
        };

        frame.render_widget(Clear, toast_area);
        let paragraph = Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            );
        frame.render_widget(paragraph, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 50, 10), Rect::new(25, 15, 50, 10));

        let small = Rect::new(0, 0, 20, 5);
        assert_eq!(centered(small, 50, 10), Rect::new(0, 0, 20, 5));
    }
}
