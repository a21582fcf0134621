// Page location and breadcrumb trail.
// Builds the breadcrumb shown above the page content.

use super::tabs::RepositoryDetailsTab;

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
}

impl BreadcrumbNode {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Page the application is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLevel {
    /// Registry details, on a given tab.
    Registry {
        registry_ref: String,
        tab: RepositoryDetailsTab,
    },
    /// Pull request conversation.
    PullRequest { repo_path: String, number: u64 },
}

impl ViewLevel {
    /// Get the display title for this view level.
    pub fn title(&self) -> String {
        match self {
            ViewLevel::Registry { registry_ref, .. } => format!("{} / Registry", registry_ref),
            ViewLevel::PullRequest { repo_path, number } => {
                format!("{} / Pull Request #{}", repo_path, number)
            }
        }
    }

    /// Breadcrumb trail leading to this page.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        match self {
            ViewLevel::Registry { registry_ref, tab } => {
                let mut trail = vec![BreadcrumbNode::new("Registries")];
                trail.extend(
                    registry_ref
                        .split('/')
                        .filter(|s| !s.is_empty())
                        .map(BreadcrumbNode::new),
                );
                trail.push(BreadcrumbNode::new(tab.title()));
                trail
            }
            ViewLevel::PullRequest { repo_path, number } => {
                let mut trail: Vec<BreadcrumbNode> = repo_path
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(BreadcrumbNode::new)
                    .collect();
                trail.push(BreadcrumbNode::new("Pull Requests"));
                trail.push(BreadcrumbNode::new(format!("#{}", number)));
                trail
            }
        }
    }

    /// Update the tab of a registry page. No effect on other pages.
    pub fn set_tab(&mut self, new_tab: RepositoryDetailsTab) {
        if let ViewLevel::Registry { tab, .. } = self {
            *tab = new_tab;
        }
    }
}
