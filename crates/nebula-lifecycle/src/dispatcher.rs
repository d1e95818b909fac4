//! The lifecycle dispatcher: owns the registered components and the
//! engine-wide server/client state, and sequences hook calls for every
//! transition.
//!
//! Ordering rules:
//! - Creation events and normal teardown visit components in registration
//!   order.
//! - Rollback after a fatal creation error visits the components that already
//!   accepted in reverse order.
//! - Process shutdown closes connections newest-first, ends the session (in the
//!   order chosen by [`ShutdownOrder`]), then unregisters components in
//!   reverse registration order.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use nebula_config::{LifecycleConfig, ShutdownOrder};
use tracing::{debug, error, info, trace, warn};

use crate::component::{Component, ComponentInfo, HookResult};
use crate::error::{HookError, LifecycleError};
use crate::event::LifecycleEvent;
use crate::ids::{ComponentId, ConnectionId};
use crate::report::{TransitionReport, TransitionSubject};
use crate::state::{
    ClientConnection, ClientLifetime, ClientTrack, ConnectionPhase, DisconnectReason, GameSession,
    ServerLifetime, ServerTrack, SessionEndReason,
};

/// A registered component and its position on both lifecycle tracks.
struct ComponentSlot {
    id: ComponentId,
    info: ComponentInfo,
    enabled: bool,
    component: Box<dyn Component>,
    server: ServerTrack,
    client: ClientTrack,
    server_init_attempted: bool,
    client_init_attempted: bool,
}

impl ComponentSlot {
    fn call(
        &mut self,
        event: LifecycleEvent,
        catch_panics: bool,
        hook: impl FnOnce(&mut dyn Component) -> HookResult,
    ) -> HookResult {
        trace!(component = %self.info.name, %event, "Invoking hook");
        let component = self.component.as_mut();
        call_hook(catch_panics, || hook(component))
    }

    fn init_pending(&self, event: LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::InitServer => !self.server_init_attempted,
            LifecycleEvent::InitClient => !self.client_init_attempted,
            _ => false,
        }
    }

    /// Run `initServer` or `initClient` and advance the matching track.
    fn run_init(&mut self, event: LifecycleEvent, catch_panics: bool) -> HookResult {
        let result = match event {
            LifecycleEvent::InitServer => {
                self.server_init_attempted = true;
                self.call(event, catch_panics, |c| c.init_server())
            }
            LifecycleEvent::InitClient => {
                self.client_init_attempted = true;
                self.call(event, catch_panics, |c| c.init_client())
            }
            _ => return Ok(()),
        };

        if result.is_ok() {
            match event {
                LifecycleEvent::InitServer => self.server = ServerTrack::Ready,
                _ => self.client.ready = true,
            }
        }
        result
    }

    /// Allow a retry after this component aborted the init transition.
    fn reset_init(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::InitServer => self.server_init_attempted = false,
            _ => self.client_init_attempted = false,
        }
    }
}

/// Call a hook, converting a panic into [`HookError::Panicked`] when enabled.
fn call_hook(catch_panics: bool, hook: impl FnOnce() -> HookResult) -> HookResult {
    if !catch_panics {
        return hook();
    }
    panic::catch_unwind(AssertUnwindSafe(hook))
        .unwrap_or_else(|payload| Err(HookError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Sequences lifecycle events to registered [`Component`]s.
///
/// The dispatcher is the error boundary: hook failures are isolated to the
/// failing component and reported in the returned [`TransitionReport`], while
/// misuse of the dispatcher itself (out-of-order transitions, duplicate
/// registration) is rejected with a [`LifecycleError`] before any hook runs.
///
/// Dropping a dispatcher that was not [`shutdown`](Self::shutdown) runs the
/// shutdown sequence, so every accepted session and connection still gets its
/// destroy hook.
pub struct LifecycleDispatcher {
    config: LifecycleConfig,
    slots: Vec<ComponentSlot>,
    next_component: u32,
    server: ServerLifetime,
    client: ClientLifetime,
    shut_down: bool,
}

impl LifecycleDispatcher {
    /// Create an empty dispatcher.
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            next_component: 0,
            server: ServerLifetime::default(),
            client: ClientLifetime::default(),
            shut_down: false,
        }
    }

    /// The configuration this dispatcher was created with.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    // --- Registration ---

    /// Register a component. See [`register_boxed`](Self::register_boxed).
    pub fn register(
        &mut self,
        component: impl Component + 'static,
    ) -> Result<ComponentId, LifecycleError> {
        self.register_boxed(Box::new(component))
    }

    /// Register a boxed component and fire its `on_create` hook.
    ///
    /// If the server or client subsystem is already initialized, the matching
    /// init hook is fired immediately. The component joins sessions and
    /// connections created after this call.
    pub fn register_boxed(
        &mut self,
        mut component: Box<dyn Component>,
    ) -> Result<ComponentId, LifecycleError> {
        self.ensure_running()?;

        let info = component.info();
        if self.slot_index(&info.name).is_some() {
            return Err(LifecycleError::DuplicateComponent(info.name));
        }
        if let Some(missing) = info
            .dependencies
            .iter()
            .find(|dependency| self.slot_index(dependency).is_none())
        {
            return Err(LifecycleError::MissingDependency {
                component: info.name.clone(),
                dependency: missing.clone(),
            });
        }

        let catch_panics = self.config.catch_panics;
        if let Err(source) = call_hook(catch_panics, || component.on_create()) {
            warn!(component = %info.name, error = %source, "Component rejected registration");
            return Err(LifecycleError::RegistrationRejected {
                component: info.name,
                source,
            });
        }

        self.next_component += 1;
        let id = ComponentId(self.next_component);
        let mut slot = ComponentSlot {
            id,
            info,
            enabled: true,
            component,
            server: ServerTrack::Uninitialized,
            client: ClientTrack::default(),
            server_init_attempted: false,
            client_init_attempted: false,
        };
        info!(component = %slot.info.name, %id, "Component registered");

        self.notify_peers(LifecycleEvent::ComponentRegistered, &slot.info, None);
        self.catch_up(&mut slot);
        self.slots.push(slot);
        Ok(id)
    }

    /// Fire process-level init hooks the component missed.
    fn catch_up(&self, slot: &mut ComponentSlot) {
        let catch_panics = self.config.catch_panics;
        let initialized = [
            (LifecycleEvent::InitServer, self.server.initialized),
            (LifecycleEvent::InitClient, self.client.initialized),
        ];
        for (event, done) in initialized {
            if !done || !slot.init_pending(event) {
                continue;
            }
            if let Err(err) = slot.run_init(event, catch_panics) {
                warn!(
                    component = %slot.info.name,
                    %event,
                    error = %err,
                    "Late init failed; component excluded from this subsystem"
                );
            }
        }
    }

    /// Unregister a component.
    ///
    /// The component first receives destroy hooks for every connection
    /// (newest first) and the session it still holds, then `on_destroy`.
    /// Fails if another registered component depends on it.
    pub fn unregister(&mut self, name: &str) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;

        let index = self
            .slot_index(name)
            .ok_or_else(|| LifecycleError::UnknownComponent(name.to_string()))?;
        if let Some(dependent) = self
            .slots
            .iter()
            .find(|slot| slot.info.dependencies.iter().any(|d| d == name))
        {
            return Err(LifecycleError::DependencyInUse {
                component: name.to_string(),
                dependent: dependent.info.name.clone(),
            });
        }

        let slot = self.slots.remove(index);
        Ok(self.detach(slot))
    }

    fn detach(&mut self, mut slot: ComponentSlot) -> TransitionReport {
        let catch_panics = self.config.catch_panics;
        let mut report =
            TransitionReport::new(LifecycleEvent::Destroy, TransitionSubject::Component(slot.id));

        let owed: Vec<ConnectionId> = slot.client.connections.iter().rev().copied().collect();
        for id in owed {
            slot.client.connections.remove(&id);
            let Some(connection) = self.client.get(id) else {
                continue;
            };
            let mut connection = connection.clone();
            connection.phase = ConnectionPhase::Disconnecting;
            connection.disconnect_reason = Some(DisconnectReason::Detached);
            let event = LifecycleEvent::DestroyClientConnection;
            let result = slot.call(event, catch_panics, |c| {
                c.on_destroy_client_connection(&connection)
            });
            if let Err(err) = &result {
                error!(component = %slot.info.name, connection = %id, error = %err, "Teardown hook failed; continuing");
            }
            report.record(&slot.info.name, event, result);
        }

        if let ServerTrack::InSession(id) = slot.server {
            slot.server = ServerTrack::Ready;
            if let Some(session) = self.server.session.as_ref().filter(|s| s.id == id) {
                let mut session = session.clone();
                session.end_reason = Some(SessionEndReason::Detached);
                let event = LifecycleEvent::DestroyGameServer;
                let result = slot.call(event, catch_panics, |c| c.on_destroy_game_server(&session));
                if let Err(err) = &result {
                    error!(component = %slot.info.name, session = %id, error = %err, "Teardown hook failed; continuing");
                }
                report.record(&slot.info.name, event, result);
            }
        }

        let event = LifecycleEvent::Destroy;
        let result = slot.call(event, catch_panics, |c| c.on_destroy());
        if let Err(err) = &result {
            error!(component = %slot.info.name, error = %err, "onDestroy failed; component removed anyway");
        }
        report.record(&slot.info.name, event, result);
        info!(component = %slot.info.name, id = %slot.id, "Component unregistered");

        self.notify_peers(LifecycleEvent::ComponentUnregistered, &slot.info, Some(&mut report));
        report
    }

    /// Tell every registered component that `info` joined or left. Failures
    /// are logged and never undo the registration change.
    fn notify_peers(
        &mut self,
        event: LifecycleEvent,
        info: &ComponentInfo,
        mut report: Option<&mut TransitionReport>,
    ) {
        let catch_panics = self.config.catch_panics;
        for peer in &mut self.slots {
            let result = match event {
                LifecycleEvent::ComponentRegistered => {
                    peer.call(event, catch_panics, |c| c.on_component_registered(info))
                }
                _ => peer.call(event, catch_panics, |c| c.on_component_unregistered(info)),
            };
            if let Err(err) = &result {
                warn!(component = %peer.info.name, peer = %info.name, %event, error = %err, "Peer notification failed");
            }
            if let Some(report) = report.as_deref_mut() {
                report.record(&peer.info.name, event, result);
            }
        }
    }

    /// Enable or disable a component.
    ///
    /// A disabled component is skipped for creation events but still receives
    /// destroy hooks for sessions and connections it already accepted.
    /// Re-enabling fires any process-level init it missed while disabled.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), LifecycleError> {
        self.ensure_running()?;
        let index = self
            .slot_index(name)
            .ok_or_else(|| LifecycleError::UnknownComponent(name.to_string()))?;

        let mut slot = self.slots.remove(index);
        slot.enabled = enabled;
        debug!(component = %name, enabled, "Component enabled state changed");
        if enabled {
            self.catch_up(&mut slot);
        }
        self.slots.insert(index, slot);
        Ok(())
    }

    // --- Server lifecycle ---

    /// Fire `initServer` on every enabled component. Once per process.
    ///
    /// If a component returns a fatal error the server stays uninitialized and
    /// the call may be retried; components that already completed the hook are
    /// not called again.
    pub fn init_server(&mut self) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        if self.server.initialized {
            return Err(LifecycleError::ServerAlreadyInitialized);
        }
        let report = self.init_process(LifecycleEvent::InitServer)?;
        self.server.initialized = true;
        info!(
            initialized = report.invoked.len(),
            failed = report.failures.len(),
            "Server subsystem initialized"
        );
        Ok(report)
    }

    /// Start a game/map session and fire `onCreateGameServer`.
    ///
    /// Components that refuse are not part of the session. A fatal error
    /// rolls back the components that had already accepted and leaves no
    /// session active.
    pub fn create_game_server(
        &mut self,
        map: impl Into<String>,
    ) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        if !self.server.initialized {
            return Err(LifecycleError::ServerNotInitialized);
        }
        if let Some(active) = &self.server.session {
            return Err(LifecycleError::SessionAlreadyActive(active.id));
        }

        let id = self.server.allocate_session();
        let session = GameSession {
            id,
            map: map.into(),
            end_reason: None,
        };
        let event = LifecycleEvent::CreateGameServer;
        let mut report = TransitionReport::new(event, TransitionSubject::Session(id));
        let (catch_panics, abort_on_fatal) = (self.config.catch_panics, self.config.abort_on_fatal);
        debug!(%event, session = %id, map = %session.map, "Transition started");

        let mut aborted = None;
        for slot in &mut self.slots {
            if !slot.enabled || slot.server != ServerTrack::Ready {
                report.skipped.push(slot.info.name.clone());
                continue;
            }
            match slot.call(event, catch_panics, |c| c.on_create_game_server(&session)) {
                Ok(()) => {
                    slot.server = ServerTrack::InSession(id);
                    report.invoked.push(slot.info.name.clone());
                }
                Err(err) if abort_on_fatal && err.is_fatal() => {
                    aborted = Some((slot.info.name.clone(), err));
                    break;
                }
                Err(err) => {
                    warn!(component = %slot.info.name, session = %id, error = %err, "Component refused session");
                    report.record(&slot.info.name, event, Err(err));
                }
            }
        }

        if let Some((component, source)) = aborted {
            error!(%component, session = %id, error = %source, "Session creation aborted; rolling back");
            let mut rolled_back = session;
            rolled_back.end_reason = Some(SessionEndReason::Aborted);
            self.rollback_session(&rolled_back);
            return Err(LifecycleError::TransitionAborted {
                event,
                component,
                source,
            });
        }

        info!(session = %id, map = %session.map, accepted = report.invoked.len(), "Game session created");
        self.server.session = Some(session);
        Ok(report)
    }

    fn rollback_session(&mut self, session: &GameSession) {
        let catch_panics = self.config.catch_panics;
        let event = LifecycleEvent::DestroyGameServer;
        for slot in self.slots.iter_mut().rev() {
            if slot.server != ServerTrack::InSession(session.id) {
                continue;
            }
            slot.server = ServerTrack::Ready;
            if let Err(err) = slot.call(event, catch_panics, |c| c.on_destroy_game_server(session)) {
                error!(component = %slot.info.name, session = %session.id, error = %err, "Rollback hook failed; continuing");
            }
        }
    }

    /// End the active session and fire `onDestroyGameServer` on every
    /// component that accepted it. Never aborts.
    pub fn destroy_game_server(
        &mut self,
        reason: SessionEndReason,
    ) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        let mut session = self
            .server
            .session
            .take()
            .ok_or(LifecycleError::NoActiveSession)?;
        session.end_reason = Some(reason);
        Ok(self.teardown_session(&session))
    }

    fn teardown_session(&mut self, session: &GameSession) -> TransitionReport {
        let catch_panics = self.config.catch_panics;
        let event = LifecycleEvent::DestroyGameServer;
        let mut report = TransitionReport::new(event, TransitionSubject::Session(session.id));
        debug!(%event, session = %session.id, reason = ?session.end_reason, "Transition started");

        for slot in &mut self.slots {
            if slot.server != ServerTrack::InSession(session.id) {
                report.skipped.push(slot.info.name.clone());
                continue;
            }
            slot.server = ServerTrack::Ready;
            let result = slot.call(event, catch_panics, |c| c.on_destroy_game_server(session));
            if let Err(err) = &result {
                error!(component = %slot.info.name, session = %session.id, error = %err, "Teardown hook failed; continuing");
            }
            report.record(&slot.info.name, event, result);
        }

        info!(session = %session.id, map = %session.map, reason = ?session.end_reason, "Game session destroyed");
        report
    }

    // --- Client lifecycle ---

    /// Fire `initClient` on every enabled component. Once per process; same
    /// abort and retry rules as [`init_server`](Self::init_server).
    pub fn init_client(&mut self) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        if self.client.initialized {
            return Err(LifecycleError::ClientAlreadyInitialized);
        }
        let report = self.init_process(LifecycleEvent::InitClient)?;
        self.client.initialized = true;
        info!(
            initialized = report.invoked.len(),
            failed = report.failures.len(),
            "Client subsystem initialized"
        );
        Ok(report)
    }

    /// Register a new connection and fire `onCreateClientConnection`.
    ///
    /// The returned report carries the new [`ConnectionId`]. Refusal and abort
    /// rules match [`create_game_server`](Self::create_game_server).
    pub fn create_client_connection(
        &mut self,
        address: impl Into<String>,
    ) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        if !self.client.initialized {
            return Err(LifecycleError::ClientNotInitialized);
        }
        let limit = self.config.max_connections;
        if limit != 0 && self.client.connections.len() >= limit as usize {
            return Err(LifecycleError::ConnectionLimit(limit));
        }

        let id = self.client.allocate_connection();
        let mut connection = ClientConnection {
            id,
            address: address.into(),
            phase: ConnectionPhase::Connecting,
            disconnect_reason: None,
        };
        let event = LifecycleEvent::CreateClientConnection;
        let mut report = TransitionReport::new(event, TransitionSubject::Connection(id));
        let (catch_panics, abort_on_fatal) = (self.config.catch_panics, self.config.abort_on_fatal);
        debug!(%event, connection = %id, address = %connection.address, "Transition started");

        let mut aborted = None;
        for slot in &mut self.slots {
            if !slot.enabled || !slot.client.ready {
                report.skipped.push(slot.info.name.clone());
                continue;
            }
            match slot.call(event, catch_panics, |c| {
                c.on_create_client_connection(&connection)
            }) {
                Ok(()) => {
                    slot.client.connections.insert(id);
                    report.invoked.push(slot.info.name.clone());
                }
                Err(err) if abort_on_fatal && err.is_fatal() => {
                    aborted = Some((slot.info.name.clone(), err));
                    break;
                }
                Err(err) => {
                    warn!(component = %slot.info.name, connection = %id, error = %err, "Component refused connection");
                    report.record(&slot.info.name, event, Err(err));
                }
            }
        }

        if let Some((component, source)) = aborted {
            error!(%component, connection = %id, error = %source, "Connection creation aborted; rolling back");
            connection.phase = ConnectionPhase::Disconnecting;
            connection.disconnect_reason = Some(DisconnectReason::Aborted);
            self.rollback_connection(&connection);
            return Err(LifecycleError::TransitionAborted {
                event,
                component,
                source,
            });
        }

        connection.phase = ConnectionPhase::Connected;
        info!(connection = %id, address = %connection.address, accepted = report.invoked.len(), "Client connection created");
        self.client.connections.push(connection);
        Ok(report)
    }

    fn rollback_connection(&mut self, connection: &ClientConnection) {
        let catch_panics = self.config.catch_panics;
        let event = LifecycleEvent::DestroyClientConnection;
        for slot in self.slots.iter_mut().rev() {
            if !slot.client.connections.remove(&connection.id) {
                continue;
            }
            if let Err(err) = slot.call(event, catch_panics, |c| {
                c.on_destroy_client_connection(connection)
            }) {
                error!(component = %slot.info.name, connection = %connection.id, error = %err, "Rollback hook failed; continuing");
            }
        }
    }

    /// End a connection and fire `onDestroyClientConnection` on every
    /// component that accepted it. Never aborts.
    pub fn destroy_client_connection(
        &mut self,
        id: ConnectionId,
        reason: DisconnectReason,
    ) -> Result<TransitionReport, LifecycleError> {
        self.ensure_running()?;
        let mut connection = self
            .client
            .remove(id)
            .ok_or(LifecycleError::UnknownConnection(id))?;
        connection.phase = ConnectionPhase::Disconnecting;
        connection.disconnect_reason = Some(reason);
        Ok(self.teardown_connection(&connection))
    }

    fn teardown_connection(&mut self, connection: &ClientConnection) -> TransitionReport {
        let catch_panics = self.config.catch_panics;
        let event = LifecycleEvent::DestroyClientConnection;
        let mut report = TransitionReport::new(event, TransitionSubject::Connection(connection.id));
        debug!(%event, connection = %connection.id, reason = ?connection.disconnect_reason, "Transition started");

        for slot in &mut self.slots {
            if !slot.client.connections.remove(&connection.id) {
                report.skipped.push(slot.info.name.clone());
                continue;
            }
            let result = slot.call(event, catch_panics, |c| {
                c.on_destroy_client_connection(connection)
            });
            if let Err(err) = &result {
                error!(component = %slot.info.name, connection = %connection.id, error = %err, "Teardown hook failed; continuing");
            }
            report.record(&slot.info.name, event, result);
        }

        info!(connection = %connection.id, reason = ?connection.disconnect_reason, "Client connection destroyed");
        report
    }

    // --- Shared ---

    fn init_process(&mut self, event: LifecycleEvent) -> Result<TransitionReport, LifecycleError> {
        let (catch_panics, abort_on_fatal) = (self.config.catch_panics, self.config.abort_on_fatal);
        let mut report = TransitionReport::new(event, TransitionSubject::Process);
        debug!(%event, components = self.slots.len(), "Transition started");

        for slot in &mut self.slots {
            if !slot.init_pending(event) {
                continue;
            }
            if !slot.enabled {
                report.skipped.push(slot.info.name.clone());
                continue;
            }
            match slot.run_init(event, catch_panics) {
                Ok(()) => report.invoked.push(slot.info.name.clone()),
                Err(source) if abort_on_fatal && source.is_fatal() => {
                    slot.reset_init(event);
                    error!(component = %slot.info.name, %event, error = %source, "Init aborted");
                    return Err(LifecycleError::TransitionAborted {
                        event,
                        component: slot.info.name.clone(),
                        source,
                    });
                }
                Err(err) => {
                    warn!(component = %slot.info.name, %event, error = %err, "Init failed; component excluded from this subsystem");
                    report.record(&slot.info.name, event, Err(err));
                }
            }
        }
        Ok(report)
    }

    /// Tear down everything and unregister every component.
    ///
    /// Live connections and the active session are destroyed in the order
    /// given by [`LifecycleConfig::shutdown_order`], then components receive
    /// `on_destroy` in reverse registration order. Idempotent; later calls
    /// return no reports and every other operation fails with
    /// [`LifecycleError::ShutDown`].
    pub fn shutdown(&mut self) -> Vec<TransitionReport> {
        if self.shut_down {
            return Vec::new();
        }
        info!(order = ?self.config.shutdown_order, "Shutting down lifecycle dispatcher");

        let mut reports = Vec::new();
        match self.config.shutdown_order {
            ShutdownOrder::ClientsFirst => {
                self.close_all_connections(&mut reports);
                self.end_session(&mut reports);
            }
            ShutdownOrder::ServerFirst => {
                self.end_session(&mut reports);
                self.close_all_connections(&mut reports);
            }
        }
        while let Some(slot) = self.slots.pop() {
            reports.push(self.detach(slot));
        }

        self.shut_down = true;
        reports
    }

    fn close_all_connections(&mut self, reports: &mut Vec<TransitionReport>) {
        while let Some(mut connection) = self.client.connections.pop() {
            connection.phase = ConnectionPhase::Disconnecting;
            connection.disconnect_reason = Some(DisconnectReason::Shutdown);
            reports.push(self.teardown_connection(&connection));
        }
    }

    fn end_session(&mut self, reports: &mut Vec<TransitionReport>) {
        if let Some(mut session) = self.server.session.take() {
            session.end_reason = Some(SessionEndReason::ForcedShutdown);
            reports.push(self.teardown_session(&session));
        }
    }

    fn ensure_running(&self) -> Result<(), LifecycleError> {
        if self.shut_down {
            Err(LifecycleError::ShutDown)
        } else {
            Ok(())
        }
    }

    fn slot_index(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.info.name == name)
    }

    fn slot(&self, name: &str) -> Option<&ComponentSlot> {
        self.slots.iter().find(|slot| slot.info.name == name)
    }

    // --- Queries ---

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no component is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered component names in registration order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.info.name.as_str())
    }

    /// Metadata of a registered component.
    pub fn component_info(&self, name: &str) -> Option<&ComponentInfo> {
        self.slot(name).map(|slot| &slot.info)
    }

    /// Whether a registered component is enabled.
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.slot(name).map(|slot| slot.enabled)
    }

    /// A component's position on the server track.
    pub fn server_track(&self, name: &str) -> Option<ServerTrack> {
        self.slot(name).map(|slot| slot.server)
    }

    /// A component's position on the client track.
    pub fn client_track(&self, name: &str) -> Option<&ClientTrack> {
        self.slot(name).map(|slot| &slot.client)
    }

    pub fn is_server_initialized(&self) -> bool {
        self.server.initialized
    }

    pub fn is_client_initialized(&self) -> bool {
        self.client.initialized
    }

    /// The active game session, if any.
    pub fn active_session(&self) -> Option<&GameSession> {
        self.server.session.as_ref()
    }

    /// Live connections in creation order.
    pub fn connections(&self) -> &[ClientConnection] {
        &self.client.connections
    }

    /// A live connection by id.
    pub fn connection(&self, id: ConnectionId) -> Option<&ClientConnection> {
        self.client.get(id)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Default for LifecycleDispatcher {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}

impl Drop for LifecycleDispatcher {
    fn drop(&mut self) {
        if !self.shut_down && !std::thread::panicking() {
            self.shutdown();
        }
    }
}
