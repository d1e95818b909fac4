//! The component contract: metadata plus eight hooks with no-op defaults.

use crate::error::HookError;
use crate::state::{ClientConnection, GameSession};

/// Result type returned by every hook.
pub type HookResult = Result<(), HookError>;

/// Static description of a component, read once at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Unique name; the dispatcher's identity key.
    pub name: String,
    /// Human-readable name for diagnostics.
    pub friendly_name: String,
    /// Free-form description.
    pub description: String,
    /// Names of components that must be registered before this one.
    pub dependencies: Vec<String>,
}

impl ComponentInfo {
    /// Info with the given name used as friendly name too.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            friendly_name: name.clone(),
            name,
            description: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = friendly_name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a dependency on another component by name.
    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }
}

/// A unit that reacts to server and client lifecycle transitions.
///
/// Every hook defaults to a no-op, so implementors override only what they
/// need. Hooks are called synchronously by the
/// [`LifecycleDispatcher`](crate::LifecycleDispatcher), one at a time, on the
/// thread that drives the transition.
///
/// Creation hooks (`on_create`, `init_server`, `on_create_game_server`,
/// `init_client`, `on_create_client_connection`) may return
/// [`HookError::Refused`] to opt out of that transition, or
/// [`HookError::Fatal`] to abort it for everyone. A component that refused a
/// session or connection is not sent the paired destroy hook for it.
///
/// Destroy hooks are always delivered for anything the component accepted.
/// Errors they return are logged and otherwise ignored.
///
/// Descriptors are only borrowed for the call; anything a component derives
/// from a session or connection must be released by its destroy hook.
pub trait Component {
    /// Name, description and dependencies.
    fn info(&self) -> ComponentInfo;

    /// The component was registered.
    fn on_create(&mut self) -> HookResult {
        Ok(())
    }

    /// The component is being unregistered. Runs after any pending session or
    /// connection destroy hooks.
    fn on_destroy(&mut self) -> HookResult {
        Ok(())
    }

    /// The server subsystem was set up. Called at most once per component.
    fn init_server(&mut self) -> HookResult {
        Ok(())
    }

    /// A game/map session is starting.
    fn on_create_game_server(&mut self, _session: &GameSession) -> HookResult {
        Ok(())
    }

    /// A game/map session this component accepted has ended.
    fn on_destroy_game_server(&mut self, _session: &GameSession) -> HookResult {
        Ok(())
    }

    /// The client subsystem was set up. Called at most once per component.
    fn init_client(&mut self) -> HookResult {
        Ok(())
    }

    /// A connection to a server is being established.
    fn on_create_client_connection(&mut self, _connection: &ClientConnection) -> HookResult {
        Ok(())
    }

    /// A connection this component accepted has ended.
    fn on_destroy_client_connection(&mut self, _connection: &ClientConnection) -> HookResult {
        Ok(())
    }

    /// Another component was registered after this one.
    fn on_component_registered(&mut self, _peer: &ComponentInfo) -> HookResult {
        Ok(())
    }

    /// Another component was unregistered; its `on_destroy` has already run.
    fn on_component_unregistered(&mut self, _peer: &ComponentInfo) -> HookResult {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SessionId;

    struct Silent;

    impl Component for Silent {
        fn info(&self) -> ComponentInfo {
            ComponentInfo::new("silent")
        }
    }

    #[test]
    fn test_default_hooks_are_no_ops() {
        let mut c = Silent;
        let session = GameSession {
            id: SessionId(1),
            map: "arena".into(),
            end_reason: None,
        };
        assert!(c.on_create().is_ok());
        assert!(c.init_server().is_ok());
        assert!(c.on_create_game_server(&session).is_ok());
        assert!(c.on_destroy_game_server(&session).is_ok());
        assert!(c.init_client().is_ok());
        assert!(c.on_component_registered(&ComponentInfo::new("peer")).is_ok());
        assert!(c.on_component_unregistered(&ComponentInfo::new("peer")).is_ok());
        assert!(c.on_destroy().is_ok());
    }

    #[test]
    fn test_info_builder() {
        let info = ComponentInfo::new("physics")
            .with_friendly_name("Physics")
            .with_description("rigid bodies")
            .depends_on("terrain")
            .depends_on("clock");
        assert_eq!(info.name, "physics");
        assert_eq!(info.friendly_name, "Physics");
        assert_eq!(info.description, "rigid bodies");
        assert_eq!(info.dependencies, vec!["terrain", "clock"]);
    }

    #[test]
    fn test_friendly_name_defaults_to_name() {
        assert_eq!(ComponentInfo::new("audio").friendly_name, "audio");
    }
}
