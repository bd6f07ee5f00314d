use tokio::sync::mpsc;

use crate::features::regions::error::RegionError;

/// Receives every committed selection change and, separately, every error.
///
/// `on_selection` always describes the selection the resolver actually holds;
/// errors never masquerade as an empty selection.
pub trait SelectionObserver: Send {
    fn on_selection(&mut self, code: &str, name: &str);
    fn on_error(&mut self, error: &RegionError);
}

/// Owned form of an observer notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected { code: String, name: String },
    Failed(RegionError),
}

impl SelectionEvent {
    pub fn selected(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Selected {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Forward notifications to a channel, e.g. to a page that attaches the
/// selected region to a post
impl SelectionObserver for mpsc::UnboundedSender<SelectionEvent> {
    fn on_selection(&mut self, code: &str, name: &str) {
        if self.send(SelectionEvent::selected(code, name)).is_err() {
            tracing::debug!("Selection receiver dropped; ignoring ({}, {})", code, name);
        }
    }

    fn on_error(&mut self, error: &RegionError) {
        if self.send(SelectionEvent::Failed(error.clone())).is_err() {
            tracing::debug!("Selection receiver dropped; ignoring error: {}", error);
        }
    }
}
