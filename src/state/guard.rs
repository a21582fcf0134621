// Leave-page guard.
// Holds navigation that needs confirmation while there are unsaved changes.

/// Navigation the guard can hold back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Leave the application.
    Quit,
}

/// Warns before leaving while `when` is set.
#[derive(Debug, Default)]
pub struct NavigationGuard {
    when: bool,
    pending: Option<Navigation>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm or disarm the guard. A navigation already held for confirmation
    /// stays held until the user answers.
    pub fn set_when(&mut self, when: bool) {
        self.when = when;
    }

    pub fn is_armed(&self) -> bool {
        self.when
    }

    /// Request a navigation. Returns it if it may proceed now; otherwise
    /// it is held until `confirm` or `dismiss`.
    pub fn request(&mut self, navigation: Navigation) -> Option<Navigation> {
        if self.when {
            tracing::debug!(?navigation, "navigation held by unsaved changes");
            self.pending = Some(navigation);
            None
        } else {
            Some(navigation)
        }
    }

    /// User agreed to leave; releases the held navigation.
    pub fn confirm(&mut self) -> Option<Navigation> {
        self.pending.take()
    }

    /// User chose to stay.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}
