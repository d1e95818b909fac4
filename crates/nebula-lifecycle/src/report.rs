//! Per-transition outcome returned by dispatcher operations.

use crate::error::HookError;
use crate::event::LifecycleEvent;
use crate::ids::{ComponentId, ConnectionId, SessionId};

/// What a transition applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSubject {
    /// Process-level init (`initServer` / `initClient`).
    Process,
    /// A component's own registration or removal.
    Component(ComponentId),
    /// A game session.
    Session(SessionId),
    /// A client connection.
    Connection(ConnectionId),
}

/// A hook failure isolated to one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub component: String,
    pub event: LifecycleEvent,
    pub error: HookError,
}

/// Which components a completed transition reached and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport {
    pub event: LifecycleEvent,
    pub subject: TransitionSubject,
    /// Components whose hook completed successfully, in call order.
    pub invoked: Vec<String>,
    /// Components not eligible for this transition (disabled, or excluded by
    /// an earlier failure).
    pub skipped: Vec<String>,
    /// Components whose hook failed.
    pub failures: Vec<HookFailure>,
}

impl TransitionReport {
    pub(crate) fn new(event: LifecycleEvent, subject: TransitionSubject) -> Self {
        Self {
            event,
            subject,
            invoked: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// No hook failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether the named component's hook failed in this transition.
    pub fn failed(&self, component: &str) -> bool {
        self.failures.iter().any(|f| f.component == component)
    }

    /// The session this transition applied to, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        match self.subject {
            TransitionSubject::Session(id) => Some(id),
            _ => None,
        }
    }

    /// The connection this transition applied to, if any.
    pub fn connection_id(&self) -> Option<ConnectionId> {
        match self.subject {
            TransitionSubject::Connection(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn record(&mut self, component: &str, event: LifecycleEvent, result: Result<(), HookError>) {
        match result {
            Ok(()) => self.invoked.push(component.to_string()),
            Err(error) => self.failures.push(HookFailure {
                component: component.to_string(),
                event,
                error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_splits_success_and_failure() {
        let mut report = TransitionReport::new(
            LifecycleEvent::CreateGameServer,
            TransitionSubject::Session(SessionId(4)),
        );
        report.record("a", LifecycleEvent::CreateGameServer, Ok(()));
        report.record(
            "b",
            LifecycleEvent::CreateGameServer,
            Err(HookError::refused("no")),
        );

        assert_eq!(report.invoked, vec!["a"]);
        assert!(report.failed("b"));
        assert!(!report.failed("a"));
        assert!(!report.is_clean());
        assert_eq!(report.session_id(), Some(SessionId(4)));
        assert_eq!(report.connection_id(), None);
    }
}
