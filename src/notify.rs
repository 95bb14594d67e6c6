//! Transient notifications about the outcome of an interaction

use std::fmt;

use crate::error::Error;

/// How a notification is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A dismissible message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };

        write!(f, "[{label}] {}", self.message)
    }
}

/// Notifications waiting to be shown
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn success<M>(&mut self, message: M)
    where
        M: ToString,
    {
        self.pending.push(Notification {
            severity: Severity::Success,
            message: message.to_string(),
        });
    }

    /// Failure of an interaction, scoped to that interaction
    pub fn error(&mut self, error: &Error) {
        tracing::warn!("{error}");

        self.pending.push(Notification {
            severity: Severity::Error,
            message: error.to_string(),
        });
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Close a single notification
    pub fn dismiss(&mut self, index: usize) -> Option<Notification> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    /// Take everything for showing, leaving nothing pending
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_errors(&self) -> bool {
        self.pending
            .iter()
            .any(|notification| notification.severity == Severity::Error)
    }
}
