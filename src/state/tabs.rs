// Registry details tab selection.
// Maps the route's tab segment to one of the delegated sub-views.

use std::fmt;
use std::str::FromStr;

use crate::api::{ConfigType, PackageType, Registry};

/// Tab of the registry details page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryDetailsTab {
    #[default]
    Packages,
    Configuration,
    Webhooks,
    Unknown,
}

impl RepositoryDetailsTab {
    /// Tabs shown in the tab bar, in display order.
    pub const ALL: [RepositoryDetailsTab; 3] = [
        RepositoryDetailsTab::Packages,
        RepositoryDetailsTab::Configuration,
        RepositoryDetailsTab::Webhooks,
    ];

    /// Decode a route segment. Unrecognized segments become `Unknown`.
    pub fn from_route_segment(segment: &str) -> Self {
        match segment.trim().to_ascii_lowercase().as_str() {
            "packages" => RepositoryDetailsTab::Packages,
            "configuration" => RepositoryDetailsTab::Configuration,
            "webhooks" => RepositoryDetailsTab::Webhooks,
            other => {
                tracing::warn!(segment = other, "unrecognized registry tab");
                RepositoryDetailsTab::Unknown
            }
        }
    }

    /// Route segment for this tab.
    pub fn route_segment(&self) -> &'static str {
        match self {
            RepositoryDetailsTab::Packages => "packages",
            RepositoryDetailsTab::Configuration => "configuration",
            RepositoryDetailsTab::Webhooks => "webhooks",
            RepositoryDetailsTab::Unknown => "unknown",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RepositoryDetailsTab::Packages => "Packages",
            RepositoryDetailsTab::Configuration => "Configuration",
            RepositoryDetailsTab::Webhooks => "Webhooks",
            RepositoryDetailsTab::Unknown => "Not found",
        }
    }

    /// Next tab in the tab bar. `Unknown` re-enters at the first tab.
    pub fn next(&self) -> Self {
        match self {
            RepositoryDetailsTab::Packages => RepositoryDetailsTab::Configuration,
            RepositoryDetailsTab::Configuration => RepositoryDetailsTab::Webhooks,
            RepositoryDetailsTab::Webhooks => RepositoryDetailsTab::Packages,
            RepositoryDetailsTab::Unknown => RepositoryDetailsTab::Packages,
        }
    }

    /// Previous tab in the tab bar. `Unknown` re-enters at the last tab.
    pub fn prev(&self) -> Self {
        match self {
            RepositoryDetailsTab::Packages => RepositoryDetailsTab::Webhooks,
            RepositoryDetailsTab::Configuration => RepositoryDetailsTab::Packages,
            RepositoryDetailsTab::Webhooks => RepositoryDetailsTab::Configuration,
            RepositoryDetailsTab::Unknown => RepositoryDetailsTab::Webhooks,
        }
    }
}

impl FromStr for RepositoryDetailsTab {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_route_segment(s))
    }
}

impl fmt::Display for RepositoryDetailsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_segment())
    }
}

/// Sub-view selected for the current tab, with the props it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabView {
    /// Artifact listing.
    Packages,
    /// Registry configuration form. Values are passed through as loaded.
    Configuration {
        package_type: Option<PackageType>,
        config_type: Option<ConfigType>,
        readonly: bool,
    },
    /// Webhook listing.
    Webhooks,
    /// Static "not found" notice.
    NotFound,
}

/// Receiver of tab activation notifications.
pub trait TabHost {
    /// Called once each time the rendered tab changes, including the first render.
    fn tab_activated(&mut self, tab: RepositoryDetailsTab);
}

/// Selects the sub-view for a tab and reports tab changes to its host.
#[derive(Debug, Default)]
pub struct TabSelector {
    last_rendered: Option<RepositoryDetailsTab>,
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the view for `tab`, notifying `host` if the tab changed.
    pub fn render(
        &mut self,
        tab: RepositoryDetailsTab,
        registry: Option<&Registry>,
        readonly: bool,
        host: &mut impl TabHost,
    ) -> TabView {
        if self.last_rendered != Some(tab) {
            self.last_rendered = Some(tab);
            tracing::debug!(%tab, "tab activated");
            host.tab_activated(tab);
        }

        match tab {
            RepositoryDetailsTab::Packages => TabView::Packages,
            RepositoryDetailsTab::Configuration => TabView::Configuration {
                package_type: registry.map(|r| r.package_type),
                config_type: registry.map(|r| r.config.config_type),
                readonly,
            },
            RepositoryDetailsTab::Webhooks => TabView::Webhooks,
            RepositoryDetailsTab::Unknown => TabView::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RegistryConfig;

    #[derive(Default)]
    struct RecordingHost {
        activated: Vec<RepositoryDetailsTab>,
    }

    impl TabHost for RecordingHost {
        fn tab_activated(&mut self, tab: RepositoryDetailsTab) {
            self.activated.push(tab);
        }
    }

    fn registry() -> Registry {
        Registry {
            identifier: "helm-charts".to_string(),
            package_type: PackageType::Helm,
            config: RegistryConfig {
                config_type: ConfigType::Upstream,
            },
            description: None,
            url: None,
        }
    }

    #[test]
    fn test_each_tab_maps_to_its_view() {
        let mut selector = TabSelector::new();
        let mut host = RecordingHost::default();
        let registry = registry();

        assert_eq!(
            selector.render(RepositoryDetailsTab::Packages, Some(&registry), false, &mut host),
            TabView::Packages
        );
        assert_eq!(
            selector.render(
                RepositoryDetailsTab::Configuration,
                Some(&registry),
                true,
                &mut host
            ),
            TabView::Configuration {
                package_type: Some(PackageType::Helm),
                config_type: Some(ConfigType::Upstream),
                readonly: true,
            }
        );
        assert_eq!(
            selector.render(RepositoryDetailsTab::Webhooks, Some(&registry), false, &mut host),
            TabView::Webhooks
        );
        assert_eq!(
            selector.render(RepositoryDetailsTab::Unknown, Some(&registry), false, &mut host),
            TabView::NotFound
        );
    }

    #[test]
    fn test_invalid_segment_renders_not_found() {
        let mut selector = TabSelector::new();
        let mut host = RecordingHost::default();
        let tab = RepositoryDetailsTab::from_route_segment("settings");
        assert_eq!(
            selector.render(tab, None, false, &mut host),
            TabView::NotFound
        );
        assert_eq!(host.activated, vec![RepositoryDetailsTab::Unknown]);
    }

    #[test]
    fn test_configuration_without_snapshot() {
        let mut selector = TabSelector::new();
        let mut host = RecordingHost::default();
        assert_eq!(
            selector.render(RepositoryDetailsTab::Configuration, None, false, &mut host),
            TabView::Configuration {
                package_type: None,
                config_type: None,
                readonly: false,
            }
        );
    }

    #[test]
    fn test_activation_fires_once_per_change() {
        let mut selector = TabSelector::new();
        let mut host = RecordingHost::default();

        selector.render(RepositoryDetailsTab::Packages, None, false, &mut host);
        selector.render(RepositoryDetailsTab::Packages, None, false, &mut host);
        selector.render(RepositoryDetailsTab::Packages, None, true, &mut host);
        selector.render(RepositoryDetailsTab::Webhooks, None, false, &mut host);
        selector.render(RepositoryDetailsTab::Webhooks, None, false, &mut host);
        selector.render(RepositoryDetailsTab::Packages, None, false, &mut host);

        assert_eq!(
            host.activated,
            vec![
                RepositoryDetailsTab::Packages,
                RepositoryDetailsTab::Webhooks,
                RepositoryDetailsTab::Packages,
            ]
        );
    }

    #[test]
    fn test_route_segments() {
        assert_eq!(
            RepositoryDetailsTab::from_route_segment("packages"),
            RepositoryDetailsTab::Packages
        );
        assert_eq!(
            RepositoryDetailsTab::from_route_segment("Configuration"),
            RepositoryDetailsTab::Configuration
        );
        assert_eq!(
            "webhooks".parse::<RepositoryDetailsTab>(),
            Ok(RepositoryDetailsTab::Webhooks)
        );
        assert_eq!(
            RepositoryDetailsTab::from_route_segment(""),
            RepositoryDetailsTab::Unknown
        );
    }

    #[test]
    fn test_tab_cycle() {
        let mut tab = RepositoryDetailsTab::Packages;
        for _ in 0..3 {
            tab = tab.next();
        }
        assert_eq!(tab, RepositoryDetailsTab::Packages);
        assert_eq!(
            RepositoryDetailsTab::Unknown.prev(),
            RepositoryDetailsTab::Webhooks
        );
        assert_eq!(
            RepositoryDetailsTab::Packages.prev(),
            RepositoryDetailsTab::Webhooks
        );
    }
}
