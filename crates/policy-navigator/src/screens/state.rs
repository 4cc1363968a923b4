/// Lifecycle of one user-visible asynchronous request.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> ViewState<T> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// One-at-a-time asynchronous operation with a fixed user-facing failure
/// message.
///
/// The owning screen calls [`begin`](Self::begin) before issuing its gateway
/// request; while a request is outstanding `begin` refuses to start another,
/// which is what disables re-entrant submission. Resolution replaces the
/// state with the decoded result or with the fixed message, never with raw
/// cause text.
#[derive(Debug)]
pub struct AsyncOperation<T> {
    state: ViewState<T>,
    failure_message: &'static str,
}

impl<T> AsyncOperation<T> {
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            state: ViewState::Idle,
            failure_message,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Move to `Loading`, clearing any prior outcome. Returns `false` and
    /// leaves the state untouched while a request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = ViewState::Loading;
        true
    }

    /// Resolve the outstanding request with its decoded result.
    pub fn succeed(&mut self, value: T) {
        self.state = ViewState::Success(value);
    }

    /// Resolve the outstanding request as failed. Only the fixed message
    /// reaches the state; the cause stays with the caller's logs.
    pub fn fail(&mut self) {
        self.state = ViewState::Failure(self.failure_message.to_string());
    }
}
