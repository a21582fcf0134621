// Loading state for async data.
// Wraps entity snapshots fetched from the server.

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Start a reload. Loaded data stays visible while refreshing.
    pub fn set_loading(&mut self) {
        if !self.is_loaded() {
            *self = LoadingState::Loading;
        }
    }
}
