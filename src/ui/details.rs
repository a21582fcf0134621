// Registry details sub-views.
// Renders whichever delegated view the tab selector picked.

use ratatui::{prelude::*, widgets::*};

use crate::app::RegistryPage;
use crate::state::TabView;

/// Draw the content of the registry details page.
pub fn draw_registry_page(frame: &mut Frame, page: &RegistryPage, area: Rect) {
    match page.view {
        TabView::Packages => draw_packages(frame, page, area),
        TabView::Configuration {
            package_type,
            config_type,
            readonly,
        } => {
            if page.registry.is_loaded() {
                let rows = vec![
                    field("Package type", package_type.map(|p| p.label())),
                    field("Registry type", config_type.map(|c| c.label())),
                    field(
                        "Description",
                        page.registry
                            .data()
                            .and_then(|r| r.description.as_deref()),
                    ),
                    field(
                        "Mode",
                        Some(if readonly { "read only" } else { "editable" }),
                    ),
                ];
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(" Configuration ");
                frame.render_widget(Paragraph::new(rows).block(block), area);
            } else {
                super::draw_loading_state(frame, &page.registry, "Configuration", area);
            }
        }
        TabView::Webhooks => {
            let block = Block::default().borders(Borders::ALL).title(" Webhooks ");
            let text = Paragraph::new(format!("Webhooks for {}", page.registry_ref))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(text, area);
        }
        TabView::NotFound => {
            let text = Paragraph::new("⚠ Step not found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(text, area);
        }
    }
}

fn draw_packages(frame: &mut Frame, page: &RegistryPage, area: Rect) {
    let Some(registry) = page.registry.data() else {
        super::draw_loading_state(frame, &page.registry, "Packages", area);
        return;
    };

    let mut lines = vec![
        field("Registry", Some(registry.identifier.as_str())),
        field("Package type", Some(registry.package_type.label())),
    ];
    if let Some(url) = &registry.url {
        lines.push(field("URL", Some(url.as_str())));
    }

    let block = Block::default().borders(Borders::ALL).title(" Packages ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field<'a>(label: &'a str, value: Option<&'a str>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Cyan)),
        match value {
            Some(value) => Span::raw(value),
            None => Span::styled("—", Style::default().fg(Color::DarkGray)),
        },
    ])
}
