//! The scripted lifecycle run the host performs: bring both subsystems up,
//! play one session with two clients (one of which drops), then shut down.

use nebula_config::Config;
use nebula_lifecycle::{DisconnectReason, LifecycleDispatcher, LifecycleError, TransitionReport};
use tracing::info;

use crate::components::{ConnectionRoster, MapValidator, SessionClock};

/// Map loaded by the scripted session.
pub const DEMO_MAP: &str = "arena";

/// Counts gathered from the reports of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub sessions: u32,
    pub connections: u32,
    pub dropped: u32,
    /// Hook failures isolated by the dispatcher across all transitions.
    pub hook_failures: usize,
}

impl RunSummary {
    fn absorb(&mut self, report: &TransitionReport) {
        self.hook_failures += report.failures.len();
    }
}

/// Register the default components on a dispatcher built from `config`.
pub fn build_dispatcher(config: &Config) -> Result<LifecycleDispatcher, LifecycleError> {
    let mut dispatcher = LifecycleDispatcher::new(config.lifecycle.clone());
    dispatcher.register(MapValidator)?;
    dispatcher.register(SessionClock::default())?;
    dispatcher.register(ConnectionRoster::default())?;
    Ok(dispatcher)
}

/// Run the scripted lifecycle. On error the dispatcher is dropped, which
/// still tears down whatever was created.
pub fn run(config: &Config) -> Result<RunSummary, LifecycleError> {
    let mut dispatcher = build_dispatcher(config)?;
    let mut summary = RunSummary::default();
    let address = format!(
        "{}:{}",
        config.network.server_address, config.network.server_port
    );

    summary.absorb(&dispatcher.init_server()?);
    summary.absorb(&dispatcher.init_client()?);

    summary.absorb(&dispatcher.create_game_server(DEMO_MAP)?);
    summary.sessions += 1;

    let mut connections = Vec::new();
    for _ in 0..2 {
        let report = dispatcher.create_client_connection(address.as_str())?;
        summary.absorb(&report);
        connections.extend(report.connection_id());
        summary.connections += 1;
    }

    if let Some(&first) = connections.first() {
        summary.absorb(&dispatcher.destroy_client_connection(first, DisconnectReason::Dropped)?);
        summary.dropped += 1;
    }

    for report in dispatcher.shutdown() {
        summary.absorb(&report);
    }

    info!(?summary, "Lifecycle run complete");
    Ok(summary)
}
