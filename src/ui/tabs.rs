// Tab bar rendering for the registry details page.
// Highlights the active tab; an unrecognized tab leaves nothing selected.

use ratatui::{prelude::*, widgets::*};

use crate::state::RepositoryDetailsTab;

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, title: &str, active: RepositoryDetailsTab, area: Rect) {
    let tab_titles: Vec<Line> = RepositoryDetailsTab::ALL
        .iter()
        .map(|tab| {
            let style = if *tab == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(tab.title(), style))
        })
        .collect();

    let selected_index = RepositoryDetailsTab::ALL
        .iter()
        .position(|t| *t == active);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
