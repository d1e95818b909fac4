//! Components the host registers by default.

use std::collections::HashMap;
use std::time::Instant;

use nebula_lifecycle::{
    ClientConnection, Component, ComponentInfo, ConnectionId, GameSession, HookError, HookResult,
};
use tracing::{debug, info, warn};

/// Rejects sessions that were started without a map. Registered first so a
/// bad session is aborted before anything else allocates for it.
pub struct MapValidator;

impl Component for MapValidator {
    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("map_validator")
            .with_friendly_name("Map Validator")
            .with_description("Aborts game sessions that have no map")
    }

    fn on_create_game_server(&mut self, session: &GameSession) -> HookResult {
        if session.map.trim().is_empty() {
            return Err(HookError::fatal(format!("{} has no map", session.id)));
        }
        Ok(())
    }
}

/// Measures how long each game session lasts.
#[derive(Default)]
pub struct SessionClock {
    started: Option<Instant>,
    completed: u32,
}

impl SessionClock {
    pub fn completed(&self) -> u32 {
        self.completed
    }
}

impl Component for SessionClock {
    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("session_clock")
            .with_friendly_name("Session Clock")
            .with_description("Logs the duration of every game session")
            .depends_on("map_validator")
    }

    fn on_destroy(&mut self) -> HookResult {
        info!(sessions = self.completed(), "Session clock stopped");
        Ok(())
    }

    fn on_create_game_server(&mut self, _session: &GameSession) -> HookResult {
        self.started = Some(Instant::now());
        Ok(())
    }

    fn on_destroy_game_server(&mut self, session: &GameSession) -> HookResult {
        if let Some(started) = self.started.take() {
            self.completed += 1;
            info!(
                session = %session.id,
                map = %session.map,
                elapsed_ms = started.elapsed().as_millis() as u64,
                reason = ?session.end_reason,
                "Session ended"
            );
        }
        Ok(())
    }
}

/// Keeps the address of every live client connection.
#[derive(Default)]
pub struct ConnectionRoster {
    addresses: HashMap<ConnectionId, String>,
    peak: usize,
}

impl ConnectionRoster {
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl Component for ConnectionRoster {
    fn info(&self) -> ComponentInfo {
        ComponentInfo::new("connection_roster")
            .with_friendly_name("Connection Roster")
            .with_description("Tracks the remote address of each client connection")
    }

    fn on_create_client_connection(&mut self, connection: &ClientConnection) -> HookResult {
        if connection.address.is_empty() {
            return Err(HookError::refused("connection has no address"));
        }
        self.addresses
            .insert(connection.id, connection.address.clone());
        self.peak = self.peak.max(self.addresses.len());
        Ok(())
    }

    fn on_destroy_client_connection(&mut self, connection: &ClientConnection) -> HookResult {
        if let Some(address) = self.addresses.remove(&connection.id) {
            debug!(
                connection = %connection.id,
                %address,
                reason = ?connection.disconnect_reason,
                remaining = self.addresses.len(),
                "Connection left roster"
            );
        }
        Ok(())
    }

    fn on_destroy(&mut self) -> HookResult {
        if !self.is_empty() {
            warn!(stale = self.len(), "Roster destroyed with live entries");
        }
        info!(peak = self.peak(), "Connection roster closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nebula_lifecycle::{ConnectionPhase, SessionEndReason, SessionId};

    use super::*;

    fn session(map: &str) -> GameSession {
        GameSession {
            id: SessionId(1),
            map: map.to_string(),
            end_reason: None,
        }
    }

    fn connection(id: u64, address: &str) -> ClientConnection {
        ClientConnection {
            id: ConnectionId(id),
            address: address.to_string(),
            phase: ConnectionPhase::Connecting,
            disconnect_reason: None,
        }
    }

    #[test]
    fn test_map_validator_rejects_blank_map() {
        let mut validator = MapValidator;
        assert!(validator.on_create_game_server(&session("arena")).is_ok());
        let err = validator.on_create_game_server(&session("  ")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_session_clock_counts_completed_sessions() {
        let mut clock = SessionClock::default();
        let mut s = session("arena");
        clock.on_create_game_server(&s).unwrap();
        s.end_reason = Some(SessionEndReason::Exited);
        clock.on_destroy_game_server(&s).unwrap();
        // A destroy without a matching create is ignored.
        clock.on_destroy_game_server(&s).unwrap();
        assert_eq!(clock.completed(), 1);
    }

    #[test]
    fn test_session_clock_depends_on_validator() {
        assert_eq!(SessionClock::default().info().dependencies, vec!["map_validator"]);
    }

    #[test]
    fn test_roster_tracks_addresses_and_peak() {
        let mut roster = ConnectionRoster::default();
        roster
            .on_create_client_connection(&connection(1, "10.0.0.1:7777"))
            .unwrap();
        roster
            .on_create_client_connection(&connection(2, "10.0.0.2:7777"))
            .unwrap();
        roster
            .on_destroy_client_connection(&connection(1, "10.0.0.1:7777"))
            .unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.peak(), 2);
    }

    #[test]
    fn test_roster_refuses_addressless_connection() {
        let mut roster = ConnectionRoster::default();
        let err = roster
            .on_create_client_connection(&connection(1, ""))
            .unwrap_err();
        assert_eq!(err, HookError::refused("connection has no address"));
        assert!(roster.is_empty());
    }
}
