//! Lifecycle state: the descriptors passed to hooks, the engine-wide server and
//! client lifetimes, and the per-component tracks derived from them.
//!
//! Server track: `Uninitialized -> Ready <-> InSession(id)`.
//! Client track: `ready` flag plus the set of connections the component has
//! accepted. A component is only ever sent the destroy hook for a session or
//! connection its own create hook accepted.

use std::collections::BTreeSet;

use crate::ids::{ConnectionId, SessionId};

/// Why a session's destroy hook is being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEndReason {
    /// The game/map was exited normally.
    Exited,
    /// The host is shutting down with the session still active.
    ForcedShutdown,
    /// A fatal creation error rolled the session back before it started.
    Aborted,
    /// The receiving component is being unregistered; the session continues.
    Detached,
}

/// Descriptor of one game/map session, passed to the session hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Session identifier.
    pub id: SessionId,
    /// Name of the game/map being played.
    pub map: String,
    /// Set while destroy hooks run.
    pub end_reason: Option<SessionEndReason>,
}

/// Phase of a client connection as seen by hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    /// Create hooks are running.
    Connecting,
    /// Every create hook has run.
    Connected,
    /// Destroy hooks are running.
    Disconnecting,
}

/// Why a connection's destroy hook is being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Orderly disconnect initiated by either side.
    Graceful,
    /// The link was lost (timeout, transport error).
    Dropped,
    /// The host is shutting down with the connection still open.
    Shutdown,
    /// A fatal creation error rolled the connection back.
    Aborted,
    /// The receiving component is being unregistered; the connection stays up.
    Detached,
}

/// Descriptor of one client connection, passed to the connection hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConnection {
    /// Connection identifier.
    pub id: ConnectionId,
    /// Remote server address, as given by the networking layer.
    pub address: String,
    /// Current phase.
    pub phase: ConnectionPhase,
    /// Set while destroy hooks run.
    pub disconnect_reason: Option<DisconnectReason>,
}

/// Where one component stands on the server lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTrack {
    /// `initServer` has not completed for this component.
    Uninitialized,
    /// `initServer` completed; no session accepted.
    Ready,
    /// The component accepted this session and is owed its destroy hook.
    InSession(SessionId),
}

/// Where one component stands on the client lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientTrack {
    /// `initClient` completed for this component.
    pub ready: bool,
    /// Connections accepted and still owed a destroy hook.
    pub connections: BTreeSet<ConnectionId>,
}

/// Engine-wide server state owned by the dispatcher.
#[derive(Debug, Default)]
pub(crate) struct ServerLifetime {
    pub initialized: bool,
    pub session: Option<GameSession>,
    next_session: u64,
}

impl ServerLifetime {
    pub fn allocate_session(&mut self) -> SessionId {
        self.next_session += 1;
        SessionId(self.next_session)
    }
}

/// Engine-wide client state owned by the dispatcher. Connections are kept in
/// creation order.
#[derive(Debug, Default)]
pub(crate) struct ClientLifetime {
    pub initialized: bool,
    pub connections: Vec<ClientConnection>,
    next_connection: u64,
}

impl ClientLifetime {
    pub fn allocate_connection(&mut self) -> ConnectionId {
        self.next_connection += 1;
        ConnectionId(self.next_connection)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&ClientConnection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn remove(&mut self, id: ConnectionId) -> Option<ClientConnection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_never_reused() {
        let mut server = ServerLifetime::default();
        let a = server.allocate_session();
        let b = server.allocate_session();
        assert_eq!(a, SessionId(1));
        assert_eq!(b, SessionId(2));
    }

    #[test]
    fn test_client_lifetime_remove_keeps_order() {
        let mut client = ClientLifetime::default();
        for _ in 0..3 {
            let id = client.allocate_connection();
            client.connections.push(ClientConnection {
                id,
                address: "127.0.0.1:7777".into(),
                phase: ConnectionPhase::Connected,
                disconnect_reason: None,
            });
        }

        let removed = client.remove(ConnectionId(2)).unwrap();
        assert_eq!(removed.id, ConnectionId(2));
        let remaining: Vec<_> = client.connections.iter().map(|c| c.id).collect();
        assert_eq!(remaining, vec![ConnectionId(1), ConnectionId(3)]);
        assert!(client.remove(ConnectionId(2)).is_none());
        assert!(client.get(ConnectionId(3)).is_some());
    }

    #[test]
    fn test_default_tracks() {
        let track = ClientTrack::default();
        assert!(!track.ready);
        assert!(track.connections.is_empty());
    }
}
