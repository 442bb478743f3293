//! User notifications shown on the next rendered page.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::auth::Caller;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
}

/// Queues notifications for a caller until their next page is rendered.
pub trait Notifier: Send + Sync {
    fn notify(&self, caller: &Caller, kind: NotifyKind, message: String);

    /// Removes and returns the caller's pending notifications.
    fn take(&self, caller: &Caller) -> Vec<Notification>;
}

/// Per-caller notification queues held in memory.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    pending: Mutex<HashMap<Caller, Vec<Notification>>>,
}

impl QueuedNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&self, caller: &Caller, kind: NotifyKind, message: String) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending
            .entry(caller.clone())
            .or_default()
            .push(Notification { kind, message });
    }

    fn take(&self, caller: &Caller) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.remove(caller).unwrap_or_default()
    }
}
