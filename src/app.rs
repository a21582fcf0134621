// App state and main event loop.
// Hosts the registry details and pull request pages, dispatches keys and API results.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{GitnessClient, PullRequest, Registry};
use crate::error::Result;
use crate::state::{
    DescriptionEditor, EditorMode, EditorPane, LoadingState, Navigation, PageChrome,
    RepositoryDetailsTab, SaveOutcome, SaveTicket, TabSelector, TabView, ViewLevel,
};
use crate::ui;

/// Result of a background API call, delivered to the UI loop.
#[derive(Debug)]
pub enum ApiEvent {
    RegistryLoaded(Result<Registry>),
    PullRequestLoaded(Result<PullRequest>),
    DescriptionSaved {
        ticket: SaveTicket,
        result: Result<PullRequest>,
    },
}

/// Overlay shown on top of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Options menu of the description viewer.
    OptionsMenu,
    /// Unsaved changes confirmation.
    ConfirmLeave,
    Help,
}

/// Registry details page.
#[derive(Debug)]
pub struct RegistryPage {
    pub registry_ref: String,
    /// Tab decoded from the route.
    pub tab: RepositoryDetailsTab,
    pub registry: LoadingState<Registry>,
    pub selector: TabSelector,
    /// View picked by the last selector render.
    pub view: TabView,
}

/// Pull request conversation page.
#[derive(Debug)]
pub struct PullRequestPage {
    pub repo_path: String,
    pub number: u64,
    pub pull_request: LoadingState<PullRequest>,
    /// Created once the pull request is first loaded.
    pub editor: Option<DescriptionEditor>,
}

/// Page hosted by the application.
#[derive(Debug)]
pub enum Page {
    Registry(RegistryPage),
    PullRequest(PullRequestPage),
}

/// Main application state.
pub struct App {
    pub page: Page,
    pub chrome: PageChrome,
    pub modal: Option<Modal>,
    /// Readonly flag handed to the configuration view.
    pub readonly: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    client: GitnessClient,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
}

impl App {
    /// App showing the registry details page on `tab`.
    pub fn registry(
        client: GitnessClient,
        registry_ref: String,
        tab: RepositoryDetailsTab,
        readonly: bool,
    ) -> Self {
        let chrome = PageChrome::new(ViewLevel::Registry {
            registry_ref: registry_ref.clone(),
            tab,
        });
        let page = Page::Registry(RegistryPage {
            registry_ref,
            tab,
            registry: LoadingState::Idle,
            selector: TabSelector::new(),
            view: TabView::NotFound,
        });
        Self::with_page(client, page, chrome, readonly)
    }

    /// App showing the conversation page of a pull request.
    pub fn pull_request(client: GitnessClient, repo_path: String, number: u64) -> Self {
        let chrome = PageChrome::new(ViewLevel::PullRequest {
            repo_path: repo_path.clone(),
            number,
        });
        let page = Page::PullRequest(PullRequestPage {
            repo_path,
            number,
            pull_request: LoadingState::Idle,
            editor: None,
        });
        Self::with_page(client, page, chrome, false)
    }

    fn with_page(client: GitnessClient, page: Page, chrome: PageChrome, readonly: bool) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            page,
            chrome,
            modal: None,
            readonly,
            should_quit: false,
            client,
            events_tx,
            events_rx,
        };
        app.render_views();
        app
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.reload();
        while !self.should_quit {
            self.render_views();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
            while let Ok(event) = self.events_rx.try_recv() {
                self.apply_api_event(event);
            }
            self.chrome.toasts.prune();
        }
        Ok(())
    }

    /// Wait for the next background result. Used where no terminal drives the loop.
    pub async fn next_api_event(&mut self) -> Option<ApiEvent> {
        self.events_rx.recv().await
    }

    /// Run the selector for the registry page, notifying the chrome of tab changes.
    pub fn render_views(&mut self) {
        let App {
            page,
            chrome,
            readonly,
            ..
        } = self;
        if let Page::Registry(page) = page {
            page.view = page
                .selector
                .render(page.tab, page.registry.data(), *readonly, chrome);
        }
    }

    /// Fetch the entity shown by the current page.
    pub fn reload(&mut self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        match &mut self.page {
            Page::Registry(page) => {
                page.registry.set_loading();
                let registry_ref = page.registry_ref.clone();
                tokio::spawn(async move {
                    let result = client.get_registry(&registry_ref).await;
                    let _ = tx.send(ApiEvent::RegistryLoaded(result));
                });
            }
            Page::PullRequest(page) => {
                page.pull_request.set_loading();
                let repo_path = page.repo_path.clone();
                let number = page.number;
                tokio::spawn(async move {
                    let result = client.get_pull_request(&repo_path, number).await;
                    let _ = tx.send(ApiEvent::PullRequestLoaded(result));
                });
            }
        }
    }

    /// Apply a background result to the page it belongs to.
    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match (event, &mut self.page) {
            (ApiEvent::RegistryLoaded(result), Page::Registry(page)) => match result {
                Ok(registry) => page.registry = LoadingState::Loaded(registry),
                Err(e) => {
                    tracing::error!(error = %e, "failed to load registry");
                    page.registry = LoadingState::Error(e.user_message());
                }
            },
            (ApiEvent::PullRequestLoaded(result), Page::PullRequest(page)) => match result {
                Ok(pr) => {
                    if page.editor.is_none() {
                        page.editor = Some(DescriptionEditor::new(&pr));
                    }
                    page.pull_request = LoadingState::Loaded(pr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to load pull request");
                    if page.pull_request.is_loaded() {
                        self.chrome.toasts.error("Failed to refresh", e.user_message());
                    } else {
                        page.pull_request = LoadingState::Error(e.user_message());
                    }
                }
            },
            (ApiEvent::DescriptionSaved { ticket, result }, Page::PullRequest(page)) => {
                let Some(editor) = page
                    .editor
                    .as_mut()
                    .filter(|e| e.id() == ticket.editor_id())
                else {
                    tracing::debug!(?ticket, "save finished for an editor that is gone");
                    return;
                };
                if editor.complete_save(ticket, result, &mut self.chrome) == SaveOutcome::Saved {
                    self.chrome.toasts.info("Description updated");
                }
            }
            (event, _) => tracing::debug!(?event, "dropping event for another page"),
        }

        if self.chrome.take_refresh_request() {
            self.reload();
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.request_quit();
            return;
        }

        if let Some(modal) = self.modal {
            self.handle_modal_key(modal, key);
            return;
        }

        if self.editor_mode() != EditorMode::View {
            self.handle_editor_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('?') => self.modal = Some(Modal::Help),
            KeyCode::Char('x') => {
                self.chrome.toasts.dismiss_latest();
            }
            KeyCode::Char('r') => self.reload(),
            _ => self.handle_page_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match &mut self.page {
            Page::Registry(page) => match key.code {
                KeyCode::Tab => page.tab = page.tab.next(),
                KeyCode::BackTab => page.tab = page.tab.prev(),
                _ => {}
            },
            Page::PullRequest(page) => {
                let Some(editor) = page.editor.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Char('o') => self.modal = Some(Modal::OptionsMenu),
                    KeyCode::Char('e') => {
                        editor.start_edit();
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent) {
        match modal {
            Modal::Help => self.modal = None,
            Modal::OptionsMenu => match key.code {
                KeyCode::Enter | KeyCode::Char('e') => {
                    self.modal = None;
                    if let Some(editor) = self.editor_mut() {
                        editor.start_edit();
                    }
                }
                KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => self.modal = None,
                _ => {}
            },
            Modal::ConfirmLeave => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.modal = None;
                    if self.chrome.guard.confirm() == Some(Navigation::Quit) {
                        self.should_quit = true;
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.modal = None;
                    self.chrome.guard.dismiss();
                }
                _ => {}
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let Page::PullRequest(page) = &mut self.page else {
            return;
        };
        let Some(editor) = page.editor.as_mut() else {
            return;
        };
        let chrome = &mut self.chrome;

        match key.code {
            KeyCode::Char('s') if ctrl => {
                let Some(pr) = page.pull_request.data() else {
                    return;
                };
                let Some(request) = editor.begin_save(pr) else {
                    return;
                };
                let client = self.client.clone();
                let tx = self.events_tx.clone();
                let repo_path = page.repo_path.clone();
                tracing::info!(number = request.number, "saving description");
                tokio::spawn(async move {
                    let result = client
                        .update_pull_request(&repo_path, request.number, &request.body)
                        .await;
                    let _ = tx.send(ApiEvent::DescriptionSaved {
                        ticket: request.ticket,
                        result,
                    });
                });
            }
            KeyCode::Char('x') if ctrl => {
                chrome.toasts.dismiss_latest();
            }
            KeyCode::Esc => {
                editor.cancel(chrome);
            }
            KeyCode::Tab => editor.toggle_pane(),
            _ if editor.pane() == EditorPane::Preview => {}
            KeyCode::Enter => {
                editor.insert_char('\n', chrome);
            }
            KeyCode::Backspace => {
                editor.backspace(chrome);
            }
            KeyCode::Char(c) if !ctrl => {
                editor.insert_char(c, chrome);
            }
            _ => {}
        }
    }

    /// Leave the application, unless the guard holds it for confirmation.
    pub fn request_quit(&mut self) {
        match self.chrome.guard.request(Navigation::Quit) {
            Some(Navigation::Quit) => self.should_quit = true,
            None => self.modal = Some(Modal::ConfirmLeave),
        }
    }

    fn editor_mut(&mut self) -> Option<&mut DescriptionEditor> {
        match &mut self.page {
            Page::PullRequest(page) => page.editor.as_mut(),
            Page::Registry(_) => None,
        }
    }

    /// Mode of the description editor; `View` when there is none.
    pub fn editor_mode(&self) -> EditorMode {
        match &self.page {
            Page::PullRequest(page) => page
                .editor
                .as_ref()
                .map(|e| e.mode())
                .unwrap_or_default(),
            Page::Registry(_) => EditorMode::View,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::state::ToastLevel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn pr_json(description: &str) -> String {
        json!({
            "number": 5,
            "title": "Add webhooks tab",
            "description": description
        })
        .to_string()
    }

    fn pr_page(app: &App) -> &PullRequestPage {
        match &app.page {
            Page::PullRequest(page) => page,
            Page::Registry(_) => panic!("expected pull request page"),
        }
    }

    fn loaded_pr_app(server_url: &str, description: &str) -> App {
        let client = GitnessClient::new(server_url, None).unwrap();
        let mut app = App::pull_request(client, "acme/web".to_string(), 5);
        let pr: PullRequest = serde_json::from_str(&pr_json(description)).unwrap();
        app.apply_api_event(ApiEvent::PullRequestLoaded(Ok(pr)));
        app
    }

    #[tokio::test]
    async fn test_registry_tab_cycle_updates_breadcrumbs() {
        let client = GitnessClient::new("http://127.0.0.1:9", None).unwrap();
        let mut app = App::registry(
            client,
            "acme/docker".to_string(),
            RepositoryDetailsTab::Packages,
            true,
        );

        let Page::Registry(page) = &app.page else {
            panic!("expected registry page");
        };
        assert_eq!(page.view, TabView::Packages);

        app.handle_key(key(KeyCode::Tab));
        app.render_views();

        let Page::Registry(page) = &app.page else {
            panic!("expected registry page");
        };
        assert_eq!(
            page.view,
            TabView::Configuration {
                package_type: None,
                config_type: None,
                readonly: true,
            }
        );
        let last = app.chrome.breadcrumbs().pop().map(|n| n.label);
        assert_eq!(last.as_deref(), Some("Configuration"));
    }

    #[tokio::test]
    async fn test_edit_and_save_round_trip() {
        let mut server = mockito::Server::new_async().await;
        let patch = server
            .mock("PATCH", "/api/v1/repos/acme/web/+/pullreq/5")
            .match_body(Matcher::Json(json!({
                "title": "Add webhooks tab",
                "description": "v1 and more"
            })))
            .with_status(200)
            .with_body(pr_json("v1 and more"))
            .create_async()
            .await;
        let refresh = server
            .mock("GET", "/api/v1/repos/acme/web/+/pullreq/5")
            .with_status(200)
            .with_body(pr_json("v1 and more"))
            .create_async()
            .await;

        let mut app = loaded_pr_app(&server.url(), "v1");
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, " and more");
        assert!(app.chrome.guard.is_armed());

        app.handle_key(ctrl('s'));
        assert_eq!(app.editor_mode(), EditorMode::Saving);
        app.handle_key(ctrl('s'));

        let event = app.next_api_event().await.unwrap();
        app.apply_api_event(event);
        patch.assert_async().await;

        let editor = pr_page(&app).editor.as_ref().unwrap();
        assert_eq!(editor.mode(), EditorMode::View);
        assert_eq!(editor.view_text(), "v1 and more");
        assert!(!app.chrome.guard.is_armed());

        let event = app.next_api_event().await.unwrap();
        app.apply_api_event(event);
        refresh.assert_async().await;
        assert_eq!(
            pr_page(&app)
                .pull_request
                .data()
                .map(|pr| pr.description.as_str()),
            Some("v1 and more")
        );
    }

    #[tokio::test]
    async fn test_failed_save_shows_error_and_keeps_draft() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/v1/repos/acme/web/+/pullreq/5")
            .with_status(403)
            .with_body(r#"{"message":"not allowed"}"#)
            .create_async()
            .await;

        let mut app = loaded_pr_app(&server.url(), "Hello");
        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.modal, Some(Modal::OptionsMenu));
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, " world");
        app.handle_key(ctrl('s'));

        let event = app.next_api_event().await.unwrap();
        app.apply_api_event(event);

        let editor = pr_page(&app).editor.as_ref().unwrap();
        assert_eq!(editor.mode(), EditorMode::Edit);
        assert_eq!(editor.draft().current_text, "Hello world");

        let toasts: Vec<_> = app.chrome.toasts.iter().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "not allowed");
    }

    #[tokio::test]
    async fn test_quit_with_unsaved_changes_asks_first() {
        let mut app = loaded_pr_app("http://127.0.0.1:9", "draft me");
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "!");

        app.handle_key(ctrl('c'));
        assert_eq!(app.modal, Some(Modal::ConfirmLeave));
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.modal, None);
        assert!(!app.should_quit);

        app.handle_key(ctrl('c'));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_confirmed_quit_survives_save_landing_under_modal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/v1/repos/acme/web/+/pullreq/5")
            .with_status(200)
            .with_body(pr_json("Hello world"))
            .create_async()
            .await;

        let mut app = loaded_pr_app(&server.url(), "Hello");
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, " world");
        app.handle_key(ctrl('s'));
        app.handle_key(ctrl('c'));
        assert_eq!(app.modal, Some(Modal::ConfirmLeave));

        let event = app.next_api_event().await.unwrap();
        app.apply_api_event(event);
        assert!(!app.chrome.guard.is_armed());
        assert_eq!(app.modal, Some(Modal::ConfirmLeave));

        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_x_dismisses_error_while_editing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/v1/repos/acme/web/+/pullreq/5")
            .with_status(500)
            .with_body(r#"{"message":"boom"}"#)
            .create_async()
            .await;

        let mut app = loaded_pr_app(&server.url(), "Hello");
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "!");
        app.handle_key(ctrl('s'));
        let event = app.next_api_event().await.unwrap();
        app.apply_api_event(event);
        assert_eq!(app.chrome.toasts.len(), 1);
        assert_eq!(app.editor_mode(), EditorMode::Edit);

        app.handle_key(ctrl('x'));
        assert!(app.chrome.toasts.is_empty());
        let editor = pr_page(&app).editor.as_ref().unwrap();
        assert_eq!(editor.draft().current_text, "Hello!");
    }

    #[tokio::test]
    async fn test_cancel_restores_and_allows_quit() {
        let mut app = loaded_pr_app("http://127.0.0.1:9", "keep");
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "xyz");
        app.handle_key(key(KeyCode::Esc));

        let editor = pr_page(&app).editor.as_ref().unwrap();
        assert_eq!(editor.view_text(), "keep");
        assert_eq!(editor.draft().current_text, "keep");

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_preview_pane_ignores_typing() {
        let mut app = loaded_pr_app("http://127.0.0.1:9", "a");
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "bc");

        let editor = pr_page(&app).editor.as_ref().unwrap();
        assert_eq!(editor.pane(), EditorPane::Preview);
        assert_eq!(editor.draft().current_text, "a");
    }

    #[tokio::test]
    async fn test_save_result_for_dropped_editor_is_discarded() {
        let mut app = loaded_pr_app("http://127.0.0.1:9", "a");
        let pr: PullRequest = serde_json::from_str(&pr_json("a")).unwrap();

        let mut orphan = DescriptionEditor::new(&pr);
        orphan.start_edit();
        let request = orphan.begin_save(&pr).unwrap();
        drop(orphan);

        app.apply_api_event(ApiEvent::DescriptionSaved {
            ticket: request.ticket,
            result: Ok(pr),
        });
        assert!(app.chrome.toasts.is_empty());
        assert_eq!(app.editor_mode(), EditorMode::View);
    }
}
