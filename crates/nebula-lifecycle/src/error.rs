//! Error types for hooks and for dispatcher misuse.

use crate::event::LifecycleEvent;
use crate::ids::{ConnectionId, SessionId};

/// Failure reported by a component from inside one of its hooks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// The component declines this transition. Only this component is
    /// affected; it will not receive the paired destroy hook.
    #[error("refused: {0}")]
    Refused(String),
    /// The component cannot continue. On a creation hook this aborts the
    /// transition for every component.
    #[error("fatal: {0}")]
    Fatal(String),
    /// The hook panicked; the payload message is kept when it is a string.
    #[error("panicked: {0}")]
    Panicked(String),
}

impl HookError {
    /// Shorthand for [`HookError::Refused`].
    pub fn refused(reason: impl Into<String>) -> Self {
        Self::Refused(reason.into())
    }

    /// Shorthand for [`HookError::Fatal`].
    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::Fatal(reason.into())
    }

    /// Whether this error asks to abort the whole transition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

/// Errors returned by [`LifecycleDispatcher`](crate::LifecycleDispatcher)
/// operations. Every variant except [`LifecycleError::TransitionAborted`]
/// means nothing was dispatched.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// A component with this name is already registered.
    #[error("component '{0}' is already registered")]
    DuplicateComponent(String),

    /// No registered component has this name.
    #[error("no component named '{0}' is registered")]
    UnknownComponent(String),

    /// A declared dependency is not registered.
    #[error("component '{component}' depends on unregistered component '{dependency}'")]
    MissingDependency {
        /// Component being registered.
        component: String,
        /// The dependency that was not found.
        dependency: String,
    },

    /// Another registered component still depends on this one.
    #[error("component '{component}' is still required by '{dependent}'")]
    DependencyInUse {
        /// Component being unregistered.
        component: String,
        /// The registered component that depends on it.
        dependent: String,
    },

    /// The component's `on_create` hook failed, so it was not registered.
    #[error("component '{component}' rejected registration: {source}")]
    RegistrationRejected {
        /// Component being registered.
        component: String,
        /// The error returned by `on_create`.
        #[source]
        source: HookError,
    },

    /// `initServer` already ran in this process.
    #[error("server subsystem is already initialized")]
    ServerAlreadyInitialized,

    /// A session transition was requested before `initServer`.
    #[error("server subsystem is not initialized")]
    ServerNotInitialized,

    /// A session is already active.
    #[error("{0} is already active")]
    SessionAlreadyActive(SessionId),

    /// No session is active.
    #[error("no game session is active")]
    NoActiveSession,

    /// `initClient` already ran in this process.
    #[error("client subsystem is already initialized")]
    ClientAlreadyInitialized,

    /// A connection transition was requested before `initClient`.
    #[error("client subsystem is not initialized")]
    ClientNotInitialized,

    /// The connection does not exist (never created, or already destroyed).
    #[error("{0} does not exist")]
    UnknownConnection(ConnectionId),

    /// The configured connection limit is reached.
    #[error("connection limit of {0} reached")]
    ConnectionLimit(u32),

    /// A creation hook returned a fatal error. Components that had already
    /// completed the hook were rolled back through the paired destroy hook.
    #[error("{event} aborted by component '{component}': {source}")]
    TransitionAborted {
        /// The creation event that was aborted.
        event: LifecycleEvent,
        /// Component whose hook failed.
        component: String,
        /// The fatal error.
        #[source]
        source: HookError,
    },

    /// The dispatcher has already been shut down.
    #[error("dispatcher has been shut down")]
    ShutDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_error_severity() {
        assert!(HookError::fatal("disk gone").is_fatal());
        assert!(!HookError::refused("not my map").is_fatal());
        assert!(!HookError::Panicked("boom".into()).is_fatal());
    }

    #[test]
    fn test_aborted_message_names_component_and_hook() {
        let err = LifecycleError::TransitionAborted {
            event: LifecycleEvent::CreateGameServer,
            component: "terrain".into(),
            source: HookError::fatal("missing heightmap"),
        };
        assert_eq!(
            err.to_string(),
            "onCreateGameServer aborted by component 'terrain': fatal: missing heightmap"
        );
    }

    #[test]
    fn test_unknown_connection_message() {
        let err = LifecycleError::UnknownConnection(ConnectionId(7));
        assert_eq!(err.to_string(), "conn#7 does not exist");
    }
}
