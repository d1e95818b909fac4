//! Identifier newtypes handed out by the dispatcher.

use std::fmt;

/// Identifies a registered component for the lifetime of its registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

/// Identifies one game/map session. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// Identifies one client-server link. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(ComponentId(3).to_string(), "component#3");
        assert_eq!(SessionId(1).to_string(), "session#1");
        assert_eq!(ConnectionId(42).to_string(), "conn#42");
    }

    #[test]
    fn test_connection_ids_order_by_value() {
        let mut ids = vec![ConnectionId(5), ConnectionId(1), ConnectionId(3)];
        ids.sort();
        assert_eq!(ids, vec![ConnectionId(1), ConnectionId(3), ConnectionId(5)]);
    }
}
