//! The named lifecycle events a component can observe.

use std::fmt;

/// One lifecycle transition, named after the hook it invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The component was added to the dispatcher.
    Create,
    /// The component was removed from the dispatcher.
    Destroy,
    /// Server subsystem startup, once per process.
    InitServer,
    /// A game/map session started.
    CreateGameServer,
    /// A game/map session ended.
    DestroyGameServer,
    /// Client subsystem startup, once per process.
    InitClient,
    /// A client connection was established.
    CreateClientConnection,
    /// A client connection ended.
    DestroyClientConnection,
    /// Another component joined the dispatcher.
    ComponentRegistered,
    /// Another component left the dispatcher.
    ComponentUnregistered,
}

impl LifecycleEvent {
    /// All events, in the order the hooks are declared.
    pub const ALL: [LifecycleEvent; 10] = [
        Self::Create,
        Self::Destroy,
        Self::InitServer,
        Self::CreateGameServer,
        Self::DestroyGameServer,
        Self::InitClient,
        Self::CreateClientConnection,
        Self::DestroyClientConnection,
        Self::ComponentRegistered,
        Self::ComponentUnregistered,
    ];

    /// The hook name component authors know the event by.
    pub fn hook_name(self) -> &'static str {
        match self {
            Self::Create => "onCreate",
            Self::Destroy => "onDestroy",
            Self::InitServer => "initServer",
            Self::CreateGameServer => "onCreateGameServer",
            Self::DestroyGameServer => "onDestroyGameServer",
            Self::InitClient => "initClient",
            Self::CreateClientConnection => "onCreateClientConnection",
            Self::DestroyClientConnection => "onDestroyClientConnection",
            Self::ComponentRegistered => "onComponentRegistered",
            Self::ComponentUnregistered => "onComponentUnregistered",
        }
    }

    /// Teardown events run to completion and never abort.
    pub fn is_teardown(self) -> bool {
        matches!(
            self,
            Self::Destroy | Self::DestroyGameServer | Self::DestroyClientConnection
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}
