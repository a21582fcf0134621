// State management module.
// View state for the registry details tabs and the pull request description box.

#![allow(dead_code)]

pub mod chrome;
pub mod description;
pub mod guard;
pub mod loading;
pub mod navigation;
pub mod tabs;
pub mod toast;

pub use chrome::PageChrome;
#[allow(unused_imports)]
pub use description::{
    DescriptionEditor, DraftState, EditorHost, EditorMode, EditorPane, PullRequestUpdater,
    SaveOutcome, SaveRequest, SaveTicket,
};
pub use guard::Navigation;
pub use loading::LoadingState;
pub use navigation::{BreadcrumbNode, ViewLevel};
#[allow(unused_imports)]
pub use tabs::{RepositoryDetailsTab, TabHost, TabSelector, TabView};
pub use toast::{ToastLevel, Toasts};
