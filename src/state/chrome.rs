// Page chrome shared by the hosted views.
// Receives tab activations, refresh requests, notifications, and the leave guard.

use super::description::EditorHost;
use super::guard::NavigationGuard;
use super::navigation::{BreadcrumbNode, ViewLevel};
use super::tabs::{RepositoryDetailsTab, TabHost};
use super::toast::Toasts;

/// Title of the notification raised when a description update fails.
pub const UPDATE_FAILED_TITLE: &str = "Failed to update pull request";

/// Everything around the page content that views may influence.
#[derive(Debug)]
pub struct PageChrome {
    /// Current page; drives the breadcrumb trail.
    pub location: ViewLevel,
    pub toasts: Toasts,
    pub guard: NavigationGuard,
    refresh_requested: bool,
}

impl PageChrome {
    pub fn new(location: ViewLevel) -> Self {
        Self {
            location,
            toasts: Toasts::default(),
            guard: NavigationGuard::new(),
            refresh_requested: false,
        }
    }

    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.location.breadcrumbs()
    }

    /// Take a pending refresh request raised by a view.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }
}

impl TabHost for PageChrome {
    fn tab_activated(&mut self, tab: RepositoryDetailsTab) {
        self.location.set_tab(tab);
    }
}

impl EditorHost for PageChrome {
    fn entity_updated(&mut self) {
        self.refresh_requested = true;
    }

    fn show_error(&mut self, message: &str) {
        self.toasts.error(UPDATE_FAILED_TITLE, message);
    }

    fn set_leave_guard(&mut self, when: bool) {
        self.guard.set_when(when);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::toast::ToastLevel;

    #[test]
    fn test_tab_activation_updates_breadcrumbs() {
        let mut chrome = PageChrome::new(ViewLevel::Registry {
            registry_ref: "acme/npm".to_string(),
            tab: RepositoryDetailsTab::Packages,
        });
        chrome.tab_activated(RepositoryDetailsTab::Configuration);

        let last = chrome.breadcrumbs().pop().map(|n| n.label);
        assert_eq!(last.as_deref(), Some("Configuration"));
    }

    #[test]
    fn test_editor_host_capabilities() {
        let mut chrome = PageChrome::new(ViewLevel::PullRequest {
            repo_path: "acme/web".to_string(),
            number: 1,
        });

        chrome.set_leave_guard(true);
        assert!(chrome.guard.is_armed());

        chrome.show_error("timeout");
        let toast = chrome.toasts.iter().next().cloned().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.title.as_deref(), Some(UPDATE_FAILED_TITLE));
        assert_eq!(toast.message, "timeout");

        assert!(!chrome.take_refresh_request());
        chrome.entity_updated();
        assert!(chrome.take_refresh_request());
        assert!(!chrome.take_refresh_request());
    }
}
