//! Notification collaborator interface.
//!
//! The engine emits user-facing notifications on decision outcomes; how
//! they are displayed is the presentation layer's business.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
}

/// A user-facing message surfaced by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Receiver of engine notifications.
pub trait NotificationSink: Send {
    fn notify(&mut self, note: Notification);
}

/// Discards every notification. The default sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _note: Notification) {}
}

/// Logs notifications via `tracing`; used by headless consumers.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, note: Notification) {
        info!(kind = ?note.kind, title = %note.title, "{}", note.message);
    }
}

/// Collects notifications into a shared buffer; used by tests.
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    buffer: Arc<Mutex<Vec<Notification>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the shared buffer, valid after the sink moves into the
    /// engine.
    pub fn buffer(&self) -> Arc<Mutex<Vec<Notification>>> {
        Arc::clone(&self.buffer)
    }
}

impl NotificationSink for BufferSink {
    fn notify(&mut self, note: Notification) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(note);
        }
    }
}
